//! Delimited-text import with delimiter sniffing and legacy-encoding
//! fallback.

use std::io::Read;
use std::path::Path;

use crate::table::Table;

pub fn load(path: &Path) -> Result<Table, String> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    parse(&content, delimiter)
}

/// Read a file and convert to UTF-8 if needed. Korean spreadsheet tools
/// still emit EUC-KR/CP949 CSV exports, so that is the fallback codec.
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path)
        .map_err(|e| format!("failed to open {}: {e}", path.display()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::EUC_KR.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Detect the most likely field delimiter by checking consistency across
/// the first few lines. The candidate producing the most consistent
/// multi-field split wins; ties break toward more columns.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

fn parse(content: &str, delimiter: u8) -> Result<Table, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let headers: Vec<String> = records
        .next()
        .ok_or_else(|| "delimited file has no header row".to_string())?
        .map_err(|e| e.to_string())?
        .iter()
        .map(|f| f.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| e.to_string())?;
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }

    Ok(Table { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_with_headers() {
        let table = parse("송장번호,수량\n123456789012,2\n", b',').unwrap();
        assert_eq!(table.headers, vec!["송장번호", "수량"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.cell(0, 0), "123456789012");
    }

    #[test]
    fn sniffs_tab_delimiter() {
        let content = "a\tb\tc\n1\t2\t3\n1\t2\t3\n";
        assert_eq!(sniff_delimiter(content), b'\t');
    }

    #[test]
    fn sniffs_comma_for_plain_csv() {
        let content = "a,b\n1,2\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn euc_kr_fallback_roundtrip() {
        use std::io::Write;
        let (encoded, _, _) = encoding_rs::EUC_KR.encode("송장번호,수량\n1,2\n");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&encoded).unwrap();
        let content = read_file_as_utf8(file.path()).unwrap();
        assert!(content.starts_with("송장번호"));
    }
}
