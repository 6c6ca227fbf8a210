use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One segment of the cantonal progressive schedule.
///
/// The walk consumes adjusted income segment by segment: each bracket taxes
/// `min(remaining, width)` at its own rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CantonalBracket {
    pub width: Decimal,
    pub rate: Decimal,
}

impl CantonalBracket {
    fn new(width: i64, rate: Decimal) -> Self {
        Self {
            width: Decimal::from(width),
            rate,
        }
    }
}

/// One row of the federal tariff.
///
/// Rows are searched in ascending `threshold` order for the first threshold
/// at or above the tax base; the tax is `base_tax` plus the marginal rate on
/// the slice above the previous row's threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederalBracket {
    pub threshold: Decimal,
    pub base_tax: Decimal,
    pub rate: Decimal,
}

impl FederalBracket {
    fn new(threshold: i64, base_tax: Decimal, rate: Decimal) -> Self {
        Self {
            threshold: Decimal::from(threshold),
            base_tax,
            rate,
        }
    }
}

/// The Kanton Solothurn bracket schedule (width, rate per segment).
pub fn solothurn_schedule() -> Vec<CantonalBracket> {
    vec![
        CantonalBracket::new(12_000, Decimal::ZERO),
        CantonalBracket::new(4_000, Decimal::new(45, 3)),
        CantonalBracket::new(4_000, Decimal::new(5, 2)),
        CantonalBracket::new(3_000, Decimal::new(65, 3)),
        CantonalBracket::new(2_000, Decimal::new(8, 2)),
        CantonalBracket::new(3_000, Decimal::new(9, 2)),
        CantonalBracket::new(11_000, Decimal::new(95, 3)),
        CantonalBracket::new(15_000, Decimal::new(1, 1)),
        CantonalBracket::new(44_000, Decimal::new(105, 3)),
        CantonalBracket::new(212_000, Decimal::new(115, 3)),
    ]
}

/// The simplified federal tariff (threshold, base tax at threshold, rate).
pub fn federal_schedule() -> Vec<FederalBracket> {
    vec![
        FederalBracket::new(18_500, Decimal::ZERO, Decimal::ZERO),
        FederalBracket::new(33_200, Decimal::ZERO, Decimal::new(77, 4)),
        FederalBracket::new(43_500, Decimal::new(1386, 1), Decimal::new(88, 4)),
        FederalBracket::new(58_000, Decimal::new(2292, 1), Decimal::new(264, 4)),
        FederalBracket::new(76_100, Decimal::from(612), Decimal::new(297, 4)),
        FederalBracket::new(82_000, Decimal::new(114_955, 2), Decimal::new(594, 4)),
        FederalBracket::new(108_800, Decimal::from(1_500), Decimal::new(66, 3)),
        FederalBracket::new(141_500, Decimal::new(32_688, 1), Decimal::new(88, 3)),
        FederalBracket::new(184_900, Decimal::new(61_464, 1), Decimal::new(11, 2)),
        FederalBracket::new(793_400, Decimal::new(109_204, 1), Decimal::new(132, 3)),
    ]
}
