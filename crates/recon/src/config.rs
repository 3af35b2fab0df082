use serde::Deserialize;

use crate::error::SettleError;
use crate::markers::Markers;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Run configuration. Every section is optional and defaults to the
/// behavior of the stock settlement workflow; CLI flags override fields
/// after parsing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub period: PeriodConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub markers: Markers,
    #[serde(default)]
    pub columns: ColumnsConfig,
}

// ---------------------------------------------------------------------------
// Period
// ---------------------------------------------------------------------------

/// Reporting period override. Used only when both fields are set; a
/// half-set override is ignored (auto-detection applies).
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PeriodConfig {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
}

impl PeriodConfig {
    pub fn override_pair(&self) -> Option<(i32, u32)> {
        match (self.year, self.month) {
            (Some(y), Some(m)) => Some((y, m)),
            _ => None,
        }
    }

    pub fn is_half_set(&self) -> bool {
        self.year.is_some() != self.month.is_some()
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

pub const DEFAULT_PREFIX: &str = "제네시스_정산";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub prefix: Option<String>,
}

impl OutputConfig {
    pub fn prefix(&self) -> &str {
        match self.prefix.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => DEFAULT_PREFIX,
        }
    }

    /// The report filename for a resolved period.
    pub fn filename(&self, year: i32, month: u32) -> String {
        format!("{}_{year}년{month}월_산출.xlsx", self.prefix())
    }
}

// ---------------------------------------------------------------------------
// Column fragments
// ---------------------------------------------------------------------------

/// Ordered header-fragment lists for column resolution. Resolution takes
/// the first column whose header contains a fragment, trying fragments in
/// list order (see `gensettle-io`'s schema resolver).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnsConfig {
    #[serde(default)]
    pub carrier: CarrierColumns,
    #[serde(default)]
    pub fulfillment: FulfillmentColumns,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CarrierColumns {
    #[serde(default = "default_carrier_invoice")]
    pub invoice: Vec<String>,
    #[serde(default = "default_carrier_ship_date")]
    pub ship_date: Vec<String>,
    #[serde(default = "default_carrier_annotation")]
    pub annotation: Vec<String>,
    #[serde(default = "default_carrier_jeju")]
    pub jeju: Vec<String>,
    #[serde(default = "default_carrier_pickup_ferry")]
    pub pickup_ferry: Vec<String>,
    #[serde(default = "default_carrier_delivery_ferry")]
    pub delivery_ferry: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FulfillmentColumns {
    #[serde(default = "default_fulfillment_invoice")]
    pub invoice: Vec<String>,
    #[serde(default = "default_fulfillment_product_name")]
    pub product_name: Vec<String>,
    #[serde(default = "default_fulfillment_quantity")]
    pub quantity: Vec<String>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn default_carrier_invoice() -> Vec<String> {
    strings(&["운송장번호", "송장"])
}
fn default_carrier_ship_date() -> Vec<String> {
    strings(&["집하일자"])
}
fn default_carrier_annotation() -> Vec<String> {
    strings(&["특기사항"])
}
fn default_carrier_jeju() -> Vec<String> {
    strings(&["제주연계"])
}
fn default_carrier_pickup_ferry() -> Vec<String> {
    strings(&["집하도선료"])
}
fn default_carrier_delivery_ferry() -> Vec<String> {
    strings(&["배달도선료"])
}
fn default_fulfillment_invoice() -> Vec<String> {
    strings(&["송장번호", "운송장"])
}
fn default_fulfillment_product_name() -> Vec<String> {
    strings(&["출고상품명", "상품명"])
}
fn default_fulfillment_quantity() -> Vec<String> {
    strings(&["수량"])
}

impl Default for CarrierColumns {
    fn default() -> Self {
        Self {
            invoice: default_carrier_invoice(),
            ship_date: default_carrier_ship_date(),
            annotation: default_carrier_annotation(),
            jeju: default_carrier_jeju(),
            pickup_ferry: default_carrier_pickup_ferry(),
            delivery_ferry: default_carrier_delivery_ferry(),
        }
    }
}

impl Default for FulfillmentColumns {
    fn default() -> Self {
        Self {
            invoice: default_fulfillment_invoice(),
            product_name: default_fulfillment_product_name(),
            quantity: default_fulfillment_quantity(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl RunConfig {
    pub fn from_toml(input: &str) -> Result<Self, SettleError> {
        let config: RunConfig =
            toml::from_str(input).map_err(|e| SettleError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SettleError> {
        if let Some(month) = self.period.month {
            if !(1..=12).contains(&month) {
                return Err(SettleError::ConfigValidation(format!(
                    "month must be 1-12, got {month}"
                )));
            }
        }

        for (name, fragments) in [
            ("columns.carrier.invoice", &self.columns.carrier.invoice),
            (
                "columns.fulfillment.invoice",
                &self.columns.fulfillment.invoice,
            ),
            (
                "columns.fulfillment.product_name",
                &self.columns.fulfillment.product_name,
            ),
            (
                "columns.fulfillment.quantity",
                &self.columns.fulfillment.quantity,
            ),
        ] {
            if fragments.is_empty() {
                return Err(SettleError::ConfigValidation(format!(
                    "{name} must list at least one header fragment"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
