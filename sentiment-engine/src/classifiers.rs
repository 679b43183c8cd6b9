//! Factor classifiers
//!
//! Each classifier maps one raw indicator (or one pair, for the opening gap)
//! onto a small integer point value. They are pure and total: any input,
//! including negative, extreme or NaN values, lands in a defined bucket.

use crate::config::{
    FactorRules, GapRule, InstitutionalFlowRule, PcrLevelRule, ThresholdRule, VolatilityRule,
};
use common::{Factor, GapTag, IndicatorInput, InstitutionRole};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of the opening gap classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapClassification {
    pub tag: GapTag,
    pub points: i32,
    /// Deviation of the reference value from the previous close, in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviation_pct: Option<f64>,
}

impl GapClassification {
    pub fn data_error() -> Self {
        Self {
            tag: GapTag::DataError,
            points: 0,
            deviation_pct: None,
        }
    }
}

/// Classify the expected opening from a previous close and the pre-open reference
pub fn opening_gap(prev_close: f64, reference: f64, rule: &GapRule) -> GapClassification {
    if prev_close == 0.0 {
        return GapClassification::data_error();
    }

    let pct = (reference - prev_close) / prev_close * 100.0;
    if pct.is_nan() {
        return GapClassification::data_error();
    }

    // An infinite deviation still has a direction and lands in a huge gap bucket
    let (tag, points) = classify_deviation(pct, rule);
    GapClassification {
        tag,
        points,
        deviation_pct: pct.is_finite().then_some(pct),
    }
}

/// Bucket a deviation percentage into a gap tag and points.
///
/// NaN has no direction and is treated as flat.
pub fn classify_deviation(pct: f64, rule: &GapRule) -> (GapTag, i32) {
    if pct.is_nan() {
        return (GapTag::FlatOpening, 0);
    }
    let up = pct > 0.0;
    if pct.abs() < rule.flat_below_pct {
        (GapTag::FlatOpening, 0)
    } else if pct.abs() <= rule.gap_up_to_pct {
        if up {
            (GapTag::GapUpOpening, rule.gap_points)
        } else {
            (GapTag::GapDownOpening, -rule.gap_points)
        }
    } else if up {
        (GapTag::HugeGapUpOpening, rule.huge_gap_points)
    } else {
        (GapTag::HugeGapDownOpening, -rule.huge_gap_points)
    }
}

/// Symmetric threshold: above `threshold`, below `-threshold`, or neither
pub fn threshold_points(value: f64, rule: &ThresholdRule) -> i32 {
    if value > rule.threshold {
        rule.points_above
    } else if value < -rule.threshold {
        rule.points_below
    } else {
        0
    }
}

/// Volatility index level
pub fn volatility_points(level: f64, rule: &VolatilityRule) -> i32 {
    if rule.zero_is_missing && level == 0.0 {
        return 0;
    }
    let above_floor = rule.calm_floor.map_or(true, |floor| level > floor);

    if level > rule.stressed_above {
        rule.stressed_points
    } else if level < rule.calm_below && above_floor {
        rule.calm_points
    } else {
        0
    }
}

/// Put/call ratio level
pub fn pcr_level_points(pcr: f64, rule: &PcrLevelRule) -> i32 {
    if pcr > rule.oversold_above {
        1
    } else if pcr > rule.bearish_skew_above {
        -1
    } else if pcr < rule.overbought_below {
        -1
    } else if pcr < rule.bullish_skew_below {
        1
    } else {
        0
    }
}

/// Institutional net flow; `None` when the role is not scored by the rule set
pub fn institutional_flow_points(
    net: f64,
    role: InstitutionRole,
    rule: &InstitutionalFlowRule,
) -> Option<i32> {
    let threshold = match role {
        InstitutionRole::Foreign => rule.foreign_threshold?,
        InstitutionRole::Domestic => rule.domestic_threshold?,
    };
    Some(threshold_points(net, &ThresholdRule::with_trend(threshold)))
}

/// One factor's contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorPoint {
    pub factor: Factor,
    pub points: i32,
}

/// Points of every non-gap factor the rule set scores, in factor order.
///
/// Computed once per evaluation and shared by the spot and futures tracks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaseFactors(Vec<FactorPoint>);

impl BaseFactors {
    pub fn iter(&self) -> impl Iterator<Item = &FactorPoint> + '_ {
        self.0.iter()
    }

    pub fn get(&self, factor: Factor) -> Option<i32> {
        self.0.iter().find(|p| p.factor == factor).map(|p| p.points)
    }

    pub fn total(&self) -> i32 {
        self.0.iter().map(|p| p.points).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Run every configured non-gap classifier over the input
pub fn classify_factors(input: &IndicatorInput, rules: &FactorRules) -> BaseFactors {
    let threshold = |factor: Factor, rule: &Option<ThresholdRule>, value: f64| {
        rule.as_ref().map(|r| FactorPoint {
            factor,
            points: threshold_points(value, r),
        })
    };
    let flow = |factor: Factor, role: InstitutionRole, value: f64| {
        institutional_flow_points(value, role, &rules.institutional_flow)
            .map(|points| FactorPoint { factor, points })
    };

    let candidates = [
        threshold(Factor::DowJones, &rules.dow_jones, input.dow_jones_change),
        threshold(Factor::Sp500, &rules.sp500, input.sp500_change),
        threshold(Factor::CboeVix, &rules.cboe_vix, input.cboe_vix_change),
        rules.india_vix.as_ref().map(|r| FactorPoint {
            factor: Factor::IndiaVix,
            points: volatility_points(input.india_vix, r),
        }),
        rules.pcr_level.as_ref().map(|r| FactorPoint {
            factor: Factor::PcrLevel,
            points: pcr_level_points(input.pcr, r),
        }),
        threshold(Factor::PcrChange, &rules.pcr_change, input.pcr_change),
        threshold(Factor::MaxPainShift, &rules.max_pain_shift, input.max_pain_shift),
        threshold(Factor::AtmIvChange, &rules.atm_iv_change, input.atm_iv_change),
        flow(Factor::FiiFlow, InstitutionRole::Foreign, input.fii_net),
        flow(Factor::DiiFlow, InstitutionRole::Domestic, input.dii_net),
        threshold(Factor::UsdInr, &rules.usd_inr, input.usd_inr_change),
        threshold(Factor::BrentCrude, &rules.brent_crude, input.brent_crude_change),
    ];

    let points: Vec<FactorPoint> = candidates.into_iter().flatten().collect();
    for p in &points {
        debug!(factor = ?p.factor, points = p.points, "Factor classified");
    }

    BaseFactors(points)
}
