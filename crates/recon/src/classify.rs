//! Shipment type classification from per-invoice SKU counts.

use crate::model::ShipmentType;

/// Map the three category counts to a handling type.
///
/// Total over non-negative integers:
/// - yeonmakgi ≥ 2 → B
/// - yeonmakgi == 1: B when the auxiliary counts are 0/0, 1/0, 0/1 or 1/1,
///   C when their sum is ≥ 2 (1/1 excluded above)
/// - yeonmakgi == 0 → A
pub fn classify_type(yeonmakgi: i64, beoksdelta: i64, hwaksan: i64) -> ShipmentType {
    if yeonmakgi >= 2 {
        return ShipmentType::B;
    }
    if yeonmakgi == 1 {
        let total = beoksdelta + hwaksan;
        if total == 0
            || (beoksdelta == 1 && hwaksan == 0)
            || (beoksdelta == 0 && hwaksan == 1)
            || (beoksdelta == 1 && hwaksan == 1)
        {
            return ShipmentType::B;
        }
        if total >= 2 {
            return ShipmentType::C;
        }
        // Unreachable under the current rule (total == 1 implies 1/0 or
        // 0/1, both handled above); kept so a future rule change has a
        // defined fallback.
        return ShipmentType::A;
    }
    ShipmentType::A
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShipmentType::{A, B, C};

    #[test]
    fn exhaustive_rule_table() {
        let cases = [
            ((0, 0, 0), A),
            ((0, 5, 0), A),
            ((0, 0, 9), A),
            ((0, 3, 3), A),
            ((1, 0, 0), B),
            ((1, 1, 0), B),
            ((1, 0, 1), B),
            ((1, 1, 1), B),
            ((1, 2, 0), C),
            ((1, 0, 2), C),
            ((1, 1, 2), C),
            ((1, 3, 4), C),
            ((2, 0, 0), B),
            ((3, 5, 5), B),
            ((10, 0, 2), B),
        ];
        for ((y, b, h), expected) in cases {
            assert_eq!(
                classify_type(y, b, h),
                expected,
                "classify({y},{b},{h})"
            );
        }
    }

    #[test]
    fn yeonmakgi_dominates_auxiliaries() {
        // once yeonmakgi ≥ 2, auxiliary counts are irrelevant
        for b in 0..5 {
            for h in 0..5 {
                assert_eq!(classify_type(2, b, h), B);
            }
        }
    }
}
