use chrono::{Datelike, NaiveDate};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single row from the fulfillment (사방넷) export, column-resolved upstream.
#[derive(Debug, Clone)]
pub struct RawFulfillmentRecord {
    pub invoice_text: String,
    pub product_name: String,
    pub quantity: f64,
}

/// A single row from the carrier (롯데) export, column-resolved upstream.
///
/// All fields are raw cell text; absent optional columns surface as empty
/// strings and the derived flags degrade to false/empty.
#[derive(Debug, Clone, Default)]
pub struct RawCarrierRecord {
    pub invoice_text: String,
    pub ship_date: String,
    pub annotation: String,
    pub jeju: String,
    pub pickup_ferry: String,
    pub delivery_ferry: String,
}

/// Pre-loaded records for one run. Immutable snapshot; never mutated.
#[derive(Debug, Clone)]
pub struct SettleInput {
    pub carrier: Vec<RawCarrierRecord>,
    pub fulfillment: Vec<RawFulfillmentRecord>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Per-category quantity sums for one invoice. The accumulator of the
/// aggregation fold; quantities are truncated toward zero before summing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub yeonmakgi: i64,
    pub beoksdelta: i64,
    pub hwaksan: i64,
}

/// One row per distinct normalized invoice key in the fulfillment source.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceAggregate {
    pub invoice: String,
    pub counts: CategoryCounts,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ShipmentType {
    A,
    B,
    C,
}

impl ShipmentType {
    pub const ALL: [ShipmentType; 3] = [Self::A, Self::B, Self::C];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl std::fmt::Display for ShipmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secondary shipment-method tag parsed from carrier annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RocketLabel {
    /// No label found in the annotation text.
    None,
    /// 20-count pattern only (로켓그로스 미작업).
    Simple,
    /// 2-pack pattern only (로켓그로스 작업).
    Processed,
    /// Both patterns present; takes precedence.
    Mixed,
}

impl RocketLabel {
    /// Detail-sheet representation: empty string when no label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Simple => "단순",
            Self::Processed => "작업",
            Self::Mixed => "혼합",
        }
    }

    /// Monthly-summary representation: the empty label becomes a sentinel.
    pub fn summary_label(&self) -> &'static str {
        match self {
            Self::None => "(없음)",
            other => other.as_str(),
        }
    }
}

impl serde::Serialize for RocketLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Canonical per-shipment record: one row per invoice key, driving every
/// downstream rollup and check.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedShipment {
    pub invoice: String,
    pub counts: CategoryCounts,
    pub ship_type: ShipmentType,
    pub ship_date: Option<NaiveDate>,
    pub weekday: String,
    pub day_of_month: Option<u32>,
    pub rocket_label: RocketLabel,
    pub yeonmakgi_rocket: u8,
    pub is_jeju: bool,
    pub is_ferry: bool,
}

// ---------------------------------------------------------------------------
// Rollups
// ---------------------------------------------------------------------------

/// One row per calendar day of the reporting month, dense (zero-activity
/// days included). D/E columns exist for downstream template compatibility
/// and are never populated.
#[derive(Debug, Clone, Serialize)]
pub struct DailyRollupRow {
    pub date: NaiveDate,
    pub day: u32,
    pub weekday: String,
    pub type_a: usize,
    pub type_b: usize,
    pub type_c: usize,
    pub type_d: usize,
    pub type_e: usize,
    pub gross_processed: usize,
    pub gross_simple: usize,
    pub yeonmakgi_gross: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeSummaryRow {
    pub ship_type: ShipmentType,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RocketSummaryRow {
    pub label: String,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Checks + Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ConsistencyReport {
    pub source_invoice_count: usize,
    pub reconciled_invoice_count: usize,
    pub monthly_type_total: usize,
    pub source_equals_reconciled: bool,
    pub reconciled_equals_typetotal: bool,
    /// Fulfillment invoice keys never seen in the carrier export, sorted.
    pub unmatched: Vec<String>,
}

impl ConsistencyReport {
    pub fn all_clear(&self) -> bool {
        self.source_equals_reconciled
            && self.reconciled_equals_typetotal
            && self.unmatched.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodSource {
    Override,
    Detected,
    Default,
}

impl std::fmt::Display for PeriodSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Override => write!(f, "override"),
            Self::Detected => write!(f, "detected"),
            Self::Default => write!(f, "default"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SettleMeta {
    pub year: i32,
    pub month: u32,
    pub period_source: PeriodSource,
    pub engine_version: String,
    /// Fulfillment rows whose invoice text normalized to no key. Excluded
    /// from aggregation but not silently dropped: surfaced here.
    pub fulfillment_rows_without_key: usize,
    pub carrier_rows_without_key: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SettleReport {
    pub meta: SettleMeta,
    pub detail: Vec<ClassifiedShipment>,
    pub daily: Vec<DailyRollupRow>,
    pub monthly_type: Vec<TypeSummaryRow>,
    pub monthly_rocket: Vec<RocketSummaryRow>,
    pub checks: ConsistencyReport,
}

// ---------------------------------------------------------------------------
// Weekday names
// ---------------------------------------------------------------------------

/// Korean weekday names, Monday-first to line up with
/// `Datelike::weekday().num_days_from_monday()`.
pub const WEEKDAY_NAMES: [&str; 7] = ["월", "화", "수", "목", "금", "토", "일"];

pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_monday() as usize]
}
