//! Category markers and the rocket-label extractor.
//!
//! Marker strings are a named table passed explicitly into the predicates,
//! so classification stays independently testable and configurable.

use regex::Regex;
use serde::Deserialize;

use crate::error::SettleError;
use crate::model::RocketLabel;

/// SKU marker strings. Category predicates are case-sensitive substring
/// containment; the rocket patterns are built from `rocket_sku` at compile
/// time with flexible interior whitespace.
#[derive(Debug, Clone, Deserialize)]
pub struct Markers {
    #[serde(default = "default_yeonmakgi")]
    pub yeonmakgi: String,
    #[serde(default = "default_beoksdelta")]
    pub beoksdelta: String,
    #[serde(default = "default_hwaksan")]
    pub hwaksan: String,
    #[serde(default = "default_rocket_sku")]
    pub rocket_sku: String,
}

fn default_yeonmakgi() -> String {
    "연막기".into()
}

fn default_beoksdelta() -> String {
    "벅스델타".into()
}

fn default_hwaksan() -> String {
    "확산제".into()
}

fn default_rocket_sku() -> String {
    "뱀이싹".into()
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            yeonmakgi: default_yeonmakgi(),
            beoksdelta: default_beoksdelta(),
            hwaksan: default_hwaksan(),
            rocket_sku: default_rocket_sku(),
        }
    }
}

impl Markers {
    pub fn compile(&self) -> Result<CompiledMarkers, SettleError> {
        let sku = regex::escape(&self.rocket_sku);
        let pack20 = Regex::new(&format!(r"{sku}\s*20\s*개(입)?"))
            .map_err(|e| SettleError::ConfigValidation(format!("bad rocket pattern: {e}")))?;
        let pack2 = Regex::new(&format!(r"{sku}\s*2\s*개입"))
            .map_err(|e| SettleError::ConfigValidation(format!("bad rocket pattern: {e}")))?;
        Ok(CompiledMarkers {
            markers: self.clone(),
            pack20,
            pack2,
        })
    }
}

/// Markers with the two rocket regexes compiled once per run.
#[derive(Debug, Clone)]
pub struct CompiledMarkers {
    markers: Markers,
    pack20: Regex,
    pack2: Regex,
}

impl CompiledMarkers {
    pub fn is_yeonmakgi(&self, product_name: &str) -> bool {
        product_name.contains(&self.markers.yeonmakgi)
    }

    pub fn is_beoksdelta(&self, product_name: &str) -> bool {
        product_name.contains(&self.markers.beoksdelta)
    }

    pub fn is_hwaksan(&self, product_name: &str) -> bool {
        product_name.contains(&self.markers.hwaksan)
    }

    /// Parse the rocket label from carrier annotation text.
    ///
    /// Priority-ordered: both patterns → Mixed, 2-pack only → Processed,
    /// 20-count only → Simple, neither → None.
    pub fn rocket_label(&self, annotation: &str) -> RocketLabel {
        let has20 = self.pack20.is_match(annotation);
        let has2 = self.pack2.is_match(annotation);
        match (has20, has2) {
            (true, true) => RocketLabel::Mixed,
            (false, true) => RocketLabel::Processed,
            (true, false) => RocketLabel::Simple,
            (false, false) => RocketLabel::None,
        }
    }
}
