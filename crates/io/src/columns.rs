//! Schema resolution: map logical field names to column indices by
//! first-substring-hit against ordered header-fragment lists.
//!
//! Resolution is an explicit up-front step returning a typed column map —
//! required fields fail fast together, optional fields degrade to `None`.

use std::fmt;

use gensettle_recon::config::{CarrierColumns, FulfillmentColumns};

/// One logical field's resolution outcome, for diagnostics (`gensettle
/// columns`) and error hints.
#[derive(Debug, Clone)]
pub struct ResolvedColumn {
    pub field: &'static str,
    pub required: bool,
    pub fragments: Vec<String>,
    /// (column index, header text) when a fragment hit.
    pub hit: Option<(usize, String)>,
}

/// Required columns that could not be resolved, plus the headers that were
/// available — the CLI turns the latter into a hint.
#[derive(Debug)]
pub struct SchemaError {
    pub missing: Vec<String>,
    pub available: Vec<String>,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "required column(s) not found: {}", self.missing.join(", "))
    }
}

impl std::error::Error for SchemaError {}

/// Typed column map for the carrier export. Only the invoice column is
/// required; everything else degrades gracefully when absent.
#[derive(Debug, Clone)]
pub struct CarrierColumnMap {
    pub invoice: usize,
    pub ship_date: Option<usize>,
    pub annotation: Option<usize>,
    pub jeju: Option<usize>,
    pub pickup_ferry: Option<usize>,
    pub delivery_ferry: Option<usize>,
}

/// Typed column map for the fulfillment export. All three are required.
#[derive(Debug, Clone)]
pub struct FulfillmentColumnMap {
    pub invoice: usize,
    pub product_name: usize,
    pub quantity: usize,
}

/// First column whose header contains a fragment, trying fragments in
/// list order.
fn pick(headers: &[String], fragments: &[String]) -> Option<(usize, String)> {
    for fragment in fragments {
        if let Some((idx, header)) = headers
            .iter()
            .enumerate()
            .find(|(_, h)| h.contains(fragment.as_str()))
        {
            return Some((idx, header.clone()));
        }
    }
    None
}

fn resolved(
    headers: &[String],
    field: &'static str,
    required: bool,
    fragments: &[String],
) -> ResolvedColumn {
    ResolvedColumn {
        field,
        required,
        fragments: fragments.to_vec(),
        hit: pick(headers, fragments),
    }
}

/// All carrier field resolutions, hits and misses alike.
pub fn describe_carrier(headers: &[String], config: &CarrierColumns) -> Vec<ResolvedColumn> {
    vec![
        resolved(headers, "invoice", true, &config.invoice),
        resolved(headers, "ship_date", false, &config.ship_date),
        resolved(headers, "annotation", false, &config.annotation),
        resolved(headers, "jeju", false, &config.jeju),
        resolved(headers, "pickup_ferry", false, &config.pickup_ferry),
        resolved(headers, "delivery_ferry", false, &config.delivery_ferry),
    ]
}

/// All fulfillment field resolutions.
pub fn describe_fulfillment(
    headers: &[String],
    config: &FulfillmentColumns,
) -> Vec<ResolvedColumn> {
    vec![
        resolved(headers, "invoice", true, &config.invoice),
        resolved(headers, "product_name", true, &config.product_name),
        resolved(headers, "quantity", true, &config.quantity),
    ]
}

fn schema_error(resolutions: &[ResolvedColumn], headers: &[String]) -> SchemaError {
    SchemaError {
        missing: resolutions
            .iter()
            .filter(|r| r.required && r.hit.is_none())
            .map(|r| format!("{} ({})", r.field, r.fragments.join("/")))
            .collect(),
        available: headers.to_vec(),
    }
}

pub fn resolve_carrier(
    headers: &[String],
    config: &CarrierColumns,
) -> Result<CarrierColumnMap, SchemaError> {
    let resolutions = describe_carrier(headers, config);
    if resolutions.iter().any(|r| r.required && r.hit.is_none()) {
        return Err(schema_error(&resolutions, headers));
    }

    let index = |field: &str| -> Option<usize> {
        resolutions
            .iter()
            .find(|r| r.field == field)
            .and_then(|r| r.hit.as_ref())
            .map(|(idx, _)| *idx)
    };

    Ok(CarrierColumnMap {
        invoice: index("invoice").unwrap_or(0),
        ship_date: index("ship_date"),
        annotation: index("annotation"),
        jeju: index("jeju"),
        pickup_ferry: index("pickup_ferry"),
        delivery_ferry: index("delivery_ferry"),
    })
}

pub fn resolve_fulfillment(
    headers: &[String],
    config: &FulfillmentColumns,
) -> Result<FulfillmentColumnMap, SchemaError> {
    let resolutions = describe_fulfillment(headers, config);
    if resolutions.iter().any(|r| r.required && r.hit.is_none()) {
        return Err(schema_error(&resolutions, headers));
    }

    let index = |field: &str| -> Option<usize> {
        resolutions
            .iter()
            .find(|r| r.field == field)
            .and_then(|r| r.hit.as_ref())
            .map(|(idx, _)| *idx)
    };

    Ok(FulfillmentColumnMap {
        invoice: index("invoice").unwrap_or(0),
        product_name: index("product_name").unwrap_or(0),
        quantity: index("quantity").unwrap_or(0),
    })
}
