//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract — settlement scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Code | Description                                            |
//! |------|--------------------------------------------------------|
//! | 0    | Success                                                |
//! | 1    | General error (unspecified)                            |
//! | 2    | CLI usage / config error (bad args, invalid config)    |
//! | 3    | Input file unreadable                                  |
//! | 4    | Input file unparseable (corrupt workbook, bad CSV)     |
//! | 5    | Required column could not be resolved                  |
//! | 6    | Fulfillment source has zero resolvable invoice keys    |
//! | 7    | Data-quality signal: consistency mismatch or unmatched |
//!
//! Code 7 is emitted *after* the report workbook is written — the
//! artifact is still produced, the exit code flags it for review.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, invalid config file.
pub const EXIT_USAGE: u8 = 2;

/// Input file missing or unreadable.
pub const EXIT_INPUT_IO: u8 = 3;

/// Input file exists but cannot be parsed as a spreadsheet.
pub const EXIT_INPUT_PARSE: u8 = 4;

/// A required column could not be resolved from the headers.
pub const EXIT_SCHEMA: u8 = 5;

/// The fulfillment table yielded no resolvable invoice keys.
pub const EXIT_EMPTY_KEYS: u8 = 6;

/// Consistency checks failed or unmatched invoices exist.
/// The report was still written.
pub const EXIT_CHECK_MISMATCH: u8 = 7;
