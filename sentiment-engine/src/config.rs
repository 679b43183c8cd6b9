//! Rule configuration
//!
//! Every threshold used by the classifiers and the aggregator lives in a
//! [`RuleConfig`]. Each historical revision of the scoring rules is a named
//! [`RuleSet`] that expands to one of these values.

use crate::aggregator::OutcomeDistribution;
use anyhow::Context;
use common::SentimentLabel;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Named, versioned rule sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleSet {
    /// Original analyzer: gap, Dow, VIX, PCR, FII, crude, USD/INR
    CommonFactor,
    /// Options-market revision: adds S&P, CBOE VIX, PCR delta, max pain, ATM IV, DII
    #[default]
    OptionCentric,
}

impl RuleSet {
    pub fn name(&self) -> &'static str {
        match self {
            RuleSet::CommonFactor => "common-factor",
            RuleSet::OptionCentric => "option-centric",
        }
    }

    pub fn config(&self) -> RuleConfig {
        match self {
            RuleSet::CommonFactor => RuleConfig::common_factor(),
            RuleSet::OptionCentric => RuleConfig::option_centric(),
        }
    }
}

/// Complete scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Rule set name, shown in reports
    pub name: String,

    /// Revision number of the rule set
    pub version: u32,

    /// Opening gap thresholds
    pub opening_gap: GapRule,

    /// Per-factor classifier thresholds
    pub factors: FactorRules,

    /// Score bands for the sentiment label
    pub bands: SentimentBands,

    /// Outcome distribution per sentiment label
    pub outcomes: OutcomeTable,

    /// Special-condition alert thresholds
    #[serde(default)]
    pub alerts: AlertRules,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self::option_centric()
    }
}

impl RuleConfig {
    /// Latest rule set, with options-market factors
    pub fn option_centric() -> Self {
        Self {
            name: RuleSet::OptionCentric.name().to_string(),
            version: 3,
            opening_gap: GapRule {
                flat_below_pct: 0.2,
                gap_up_to_pct: 0.75,
                gap_points: 1,
                huge_gap_points: 2,
            },
            factors: FactorRules {
                dow_jones: Some(ThresholdRule::with_trend(0.2)),
                sp500: Some(ThresholdRule::with_trend(0.2)),
                cboe_vix: Some(ThresholdRule::against_trend(7.0)),
                india_vix: Some(VolatilityRule {
                    stressed_above: 22.0,
                    stressed_points: -2,
                    calm_below: 14.0,
                    calm_points: 1,
                    calm_floor: Some(0.0),
                    zero_is_missing: false,
                }),
                pcr_level: Some(PcrLevelRule::default()),
                pcr_change: Some(ThresholdRule::with_trend(0.10)),
                max_pain_shift: Some(ThresholdRule::with_trend(50.0)),
                atm_iv_change: Some(ThresholdRule::against_trend(5.0)),
                institutional_flow: InstitutionalFlowRule {
                    foreign_threshold: Some(1000.0),
                    domestic_threshold: Some(750.0),
                },
                usd_inr: Some(ThresholdRule::against_trend(0.25)),
                brent_crude: None,
            },
            bands: SentimentBands {
                strongly_bullish_at: 7,
                mildly_bullish_at: 3,
                mildly_bearish_at: -3,
                strongly_bearish_at: -7,
            },
            outcomes: OutcomeTable::default(),
            alerts: AlertRules {
                high_reward: Some(HighRewardRule {
                    domestic_buying: DomesticBuyingSignal::NetFlow,
                    vix_above: 22.0,
                }),
                bear_trap: Some(BearTrapRule {
                    fii_below: -750.0,
                    pcr_below: 0.7,
                }),
                oversold_bounce: Some(OversoldBounceRule {
                    pcr_above: 1.7,
                    vix_above: 20.0,
                }),
            },
        }
    }

    /// First rule set, before options data was added
    pub fn common_factor() -> Self {
        Self {
            name: RuleSet::CommonFactor.name().to_string(),
            version: 1,
            opening_gap: GapRule {
                flat_below_pct: 0.2,
                gap_up_to_pct: 0.5,
                gap_points: 1,
                huge_gap_points: 2,
            },
            factors: FactorRules {
                dow_jones: Some(ThresholdRule::with_trend(0.1)),
                sp500: None,
                cboe_vix: None,
                india_vix: Some(VolatilityRule {
                    stressed_above: 23.0,
                    stressed_points: -2,
                    calm_below: 15.0,
                    calm_points: 1,
                    calm_floor: None,
                    zero_is_missing: true,
                }),
                pcr_level: Some(PcrLevelRule::default()),
                pcr_change: None,
                max_pain_shift: None,
                atm_iv_change: None,
                institutional_flow: InstitutionalFlowRule {
                    foreign_threshold: Some(1000.0),
                    domestic_threshold: None,
                },
                usd_inr: Some(ThresholdRule::against_trend(0.3)),
                brent_crude: Some(ThresholdRule::against_trend(2.0)),
            },
            bands: SentimentBands {
                strongly_bullish_at: 3,
                mildly_bullish_at: 1,
                mildly_bearish_at: -1,
                strongly_bearish_at: -3,
            },
            outcomes: OutcomeTable::default(),
            alerts: AlertRules {
                high_reward: Some(HighRewardRule {
                    domestic_buying: DomesticBuyingSignal::Flag,
                    vix_above: 25.0,
                }),
                bear_trap: Some(BearTrapRule {
                    fii_below: 0.0,
                    pcr_below: 0.8,
                }),
                oversold_bounce: None,
            },
        }
    }

    /// Check internal consistency of thresholds, bands and outcome table
    pub fn validate(&self) -> Result<(), RuleConfigError> {
        let gap = &self.opening_gap;
        non_negative("opening_gap.flat_below_pct", gap.flat_below_pct)?;
        non_negative("opening_gap.gap_up_to_pct", gap.gap_up_to_pct)?;
        if gap.flat_below_pct > gap.gap_up_to_pct {
            return Err(RuleConfigError::GapBounds {
                flat: gap.flat_below_pct,
                gap: gap.gap_up_to_pct,
            });
        }

        let factors = &self.factors;
        let threshold_rules = [
            ("factors.dow_jones", &factors.dow_jones),
            ("factors.sp500", &factors.sp500),
            ("factors.cboe_vix", &factors.cboe_vix),
            ("factors.pcr_change", &factors.pcr_change),
            ("factors.max_pain_shift", &factors.max_pain_shift),
            ("factors.atm_iv_change", &factors.atm_iv_change),
            ("factors.usd_inr", &factors.usd_inr),
            ("factors.brent_crude", &factors.brent_crude),
        ];
        for (field, rule) in threshold_rules {
            if let Some(rule) = rule {
                non_negative(field, rule.threshold)?;
            }
        }

        if let Some(vix) = &factors.india_vix {
            finite("factors.india_vix.stressed_above", vix.stressed_above)?;
            finite("factors.india_vix.calm_below", vix.calm_below)?;
            if let Some(floor) = vix.calm_floor {
                finite("factors.india_vix.calm_floor", floor)?;
            }
        }

        if let Some(pcr) = &factors.pcr_level {
            for (field, value) in [
                ("factors.pcr_level.overbought_below", pcr.overbought_below),
                ("factors.pcr_level.bullish_skew_below", pcr.bullish_skew_below),
                ("factors.pcr_level.bearish_skew_above", pcr.bearish_skew_above),
                ("factors.pcr_level.oversold_above", pcr.oversold_above),
            ] {
                non_negative(field, value)?;
            }
            let ordered = pcr.overbought_below <= pcr.bullish_skew_below
                && pcr.bullish_skew_below <= pcr.bearish_skew_above
                && pcr.bearish_skew_above <= pcr.oversold_above;
            if !ordered {
                return Err(RuleConfigError::PcrBandOrder);
            }
        }

        let flow = &factors.institutional_flow;
        if let Some(t) = flow.foreign_threshold {
            non_negative("factors.institutional_flow.foreign_threshold", t)?;
        }
        if let Some(t) = flow.domestic_threshold {
            non_negative("factors.institutional_flow.domestic_threshold", t)?;
        }

        let b = &self.bands;
        let ordered = b.strongly_bearish_at < b.mildly_bearish_at
            && b.mildly_bearish_at < b.mildly_bullish_at
            && b.mildly_bullish_at < b.strongly_bullish_at;
        if !ordered {
            return Err(RuleConfigError::BandOrder {
                strongly_bearish_at: b.strongly_bearish_at,
                mildly_bearish_at: b.mildly_bearish_at,
                mildly_bullish_at: b.mildly_bullish_at,
                strongly_bullish_at: b.strongly_bullish_at,
            });
        }

        for label in SentimentLabel::ALL {
            let sum = self.outcomes.get(label).total();
            if sum != 100 {
                return Err(RuleConfigError::OutcomeSum { label, sum });
            }
        }
        for pair in SentimentLabel::ALL.windows(2) {
            let (lower, higher) = (pair[0], pair[1]);
            let lo = self.outcomes.get(lower);
            let hi = self.outcomes.get(higher);
            if lo.up > hi.up || lo.down < hi.down {
                return Err(RuleConfigError::NonMonotonicOutcomes { lower, higher });
            }
        }

        let alerts = &self.alerts;
        if let Some(rule) = &alerts.high_reward {
            finite("alerts.high_reward.vix_above", rule.vix_above)?;
        }
        if let Some(rule) = &alerts.bear_trap {
            finite("alerts.bear_trap.fii_below", rule.fii_below)?;
            finite("alerts.bear_trap.pcr_below", rule.pcr_below)?;
        }
        if let Some(rule) = &alerts.oversold_bounce {
            finite("alerts.oversold_bounce.pcr_above", rule.pcr_above)?;
            finite("alerts.oversold_bounce.vix_above", rule.vix_above)?;
        }

        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), RuleConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RuleConfigError::NonFiniteThreshold { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), RuleConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(RuleConfigError::NegativeThreshold { field, value });
    }
    Ok(())
}

/// Rule configuration consistency errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NonFiniteThreshold { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    NegativeThreshold { field: &'static str, value: f64 },

    #[error("flat opening bound {flat}% exceeds gap bound {gap}%")]
    GapBounds { flat: f64, gap: f64 },

    #[error("PCR bands must satisfy overbought <= bullish skew <= bearish skew <= oversold")]
    PcrBandOrder,

    #[error(
        "sentiment bands out of order: {strongly_bearish_at} < {mildly_bearish_at} < \
         {mildly_bullish_at} < {strongly_bullish_at} does not hold"
    )]
    BandOrder {
        strongly_bearish_at: i32,
        mildly_bearish_at: i32,
        mildly_bullish_at: i32,
        strongly_bullish_at: i32,
    },

    #[error("outcome distribution for {label} sums to {sum}, expected 100")]
    OutcomeSum { label: SentimentLabel, sum: u32 },

    #[error("outcome distribution is less bullish for {higher} than for {lower}")]
    NonMonotonicOutcomes {
        lower: SentimentLabel,
        higher: SentimentLabel,
    },
}

/// Opening gap thresholds, in percent of previous close
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapRule {
    /// |deviation| strictly below this is a flat opening
    pub flat_below_pct: f64,

    /// |deviation| up to and including this is a plain gap
    pub gap_up_to_pct: f64,

    pub gap_points: i32,
    pub huge_gap_points: i32,
}

/// Symmetric threshold around zero.
///
/// `value > threshold` scores `points_above`, `value < -threshold` scores
/// `points_below`, anything in between (boundaries included) scores 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub threshold: f64,
    pub points_above: i32,
    pub points_below: i32,
}

impl ThresholdRule {
    /// Rising value is bullish
    pub fn with_trend(threshold: f64) -> Self {
        Self {
            threshold,
            points_above: 1,
            points_below: -1,
        }
    }

    /// Rising value is bearish
    pub fn against_trend(threshold: f64) -> Self {
        Self {
            threshold,
            points_above: -1,
            points_below: 1,
        }
    }
}

/// Volatility index level rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityRule {
    /// Level strictly above this is stressed
    pub stressed_above: f64,
    pub stressed_points: i32,

    /// Level strictly below this is calm
    pub calm_below: f64,
    pub calm_points: i32,

    /// Calm also requires the level to be strictly above this floor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calm_floor: Option<f64>,

    /// Treat an exact zero as an unfilled field
    #[serde(default)]
    pub zero_is_missing: bool,
}

/// Put/call ratio level bands.
///
/// Extremes are read contrarian (very high PCR is oversold, bullish; very low
/// is overbought, bearish), the inner skew bands are read with the trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PcrLevelRule {
    /// Above this: +1
    pub oversold_above: f64,
    /// Above this, up to oversold: -1
    pub bearish_skew_above: f64,
    /// Below this, down to overbought: +1
    pub bullish_skew_below: f64,
    /// Below this: -1
    pub overbought_below: f64,
}

impl Default for PcrLevelRule {
    fn default() -> Self {
        Self {
            oversold_above: 1.7,
            bearish_skew_above: 1.3,
            bullish_skew_below: 0.7,
            overbought_below: 0.5,
        }
    }
}

/// Institutional net flow thresholds; an absent role is not scored
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InstitutionalFlowRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_threshold: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domestic_threshold: Option<f64>,
}

/// Classifier rules per factor; `None` leaves the factor out of the score
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FactorRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dow_jones: Option<ThresholdRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sp500: Option<ThresholdRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cboe_vix: Option<ThresholdRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub india_vix: Option<VolatilityRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pcr_level: Option<PcrLevelRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pcr_change: Option<ThresholdRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pain_shift: Option<ThresholdRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atm_iv_change: Option<ThresholdRule>,

    #[serde(default)]
    pub institutional_flow: InstitutionalFlowRule,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd_inr: Option<ThresholdRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brent_crude: Option<ThresholdRule>,
}

/// Score thresholds for the sentiment label (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentBands {
    pub strongly_bullish_at: i32,
    pub mildly_bullish_at: i32,
    pub mildly_bearish_at: i32,
    pub strongly_bearish_at: i32,
}

/// Outcome distribution per sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTable {
    pub strongly_bullish: OutcomeDistribution,
    pub mildly_bullish: OutcomeDistribution,
    pub neutral: OutcomeDistribution,
    pub mildly_bearish: OutcomeDistribution,
    pub strongly_bearish: OutcomeDistribution,
}

impl OutcomeTable {
    pub fn get(&self, label: SentimentLabel) -> OutcomeDistribution {
        match label {
            SentimentLabel::StronglyBullish => self.strongly_bullish,
            SentimentLabel::MildlyBullish => self.mildly_bullish,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::MildlyBearish => self.mildly_bearish,
            SentimentLabel::StronglyBearish => self.strongly_bearish,
        }
    }
}

impl Default for OutcomeTable {
    fn default() -> Self {
        Self {
            strongly_bullish: OutcomeDistribution::new(70, 20, 10),
            mildly_bullish: OutcomeDistribution::new(55, 30, 15),
            neutral: OutcomeDistribution::new(33, 34, 33),
            mildly_bearish: OutcomeDistribution::new(15, 30, 55),
            strongly_bearish: OutcomeDistribution::new(10, 20, 70),
        }
    }
}

/// Alert thresholds; a missing rule never fires
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlertRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_reward: Option<HighRewardRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bear_trap: Option<BearTrapRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oversold_bounce: Option<OversoldBounceRule>,
}

/// Where the "domestic institutions are buying" signal comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomesticBuyingSignal {
    /// `dii_net > 0`
    NetFlow,
    /// The `dii_buying` checkbox
    Flag,
}

/// Domestic buying into elevated volatility
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighRewardRule {
    pub domestic_buying: DomesticBuyingSignal,
    pub vix_above: f64,
}

/// Foreign selling while PCR is low
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BearTrapRule {
    pub fii_below: f64,
    pub pcr_below: f64,
}

/// Heavy put writing with elevated volatility
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OversoldBounceRule {
    pub pcr_above: f64,
    pub vix_above: f64,
}

/// Load and validate a rule configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<RuleConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading rule config {}", path.display()))?;
    let config: RuleConfig = toml::from_str(&content)
        .with_context(|| format!("parsing rule config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Save a rule configuration to a TOML file
pub fn save_config(config: &RuleConfig, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)
        .with_context(|| format!("writing rule config {}", path.display()))?;
    Ok(())
}

/// Write a commented rule configuration template (option-centric values)
pub fn create_config_template(path: impl AsRef<Path>) -> anyhow::Result<()> {
    let template = "# Nifty pre-open sentiment rule configuration
# Every threshold the scoring engine uses. Remove a [factors.*] table to
# stop scoring that factor; remove an [alerts.*] table to disable the alert.

name = \"option-centric\"
version = 3

[opening_gap]
# |deviation| strictly below this is a flat opening (%)
flat_below_pct = 0.2
# |deviation| up to and including this is a plain gap (%)
gap_up_to_pct = 0.75
gap_points = 1
huge_gap_points = 2

# Symmetric rules: value > threshold scores points_above,
# value < -threshold scores points_below, otherwise 0.

[factors.dow_jones]
threshold = 0.2
points_above = 1
points_below = -1

[factors.sp500]
threshold = 0.2
points_above = 1
points_below = -1

[factors.cboe_vix]
threshold = 7.0
points_above = -1
points_below = 1

[factors.india_vix]
stressed_above = 22.0
stressed_points = -2
calm_below = 14.0
calm_points = 1
# calm also requires the level to be above this
calm_floor = 0.0

[factors.pcr_level]
oversold_above = 1.7
bearish_skew_above = 1.3
bullish_skew_below = 0.7
overbought_below = 0.5

[factors.pcr_change]
threshold = 0.10
points_above = 1
points_below = -1

[factors.max_pain_shift]
threshold = 50.0
points_above = 1
points_below = -1

[factors.atm_iv_change]
threshold = 5.0
points_above = -1
points_below = 1

[factors.institutional_flow]
# Rs crore; leave a role out to stop scoring it
foreign_threshold = 1000.0
domestic_threshold = 750.0

[factors.usd_inr]
threshold = 0.25
points_above = -1
points_below = 1

# Sentiment bands (inclusive)
[bands]
strongly_bullish_at = 7
mildly_bullish_at = 3
mildly_bearish_at = -3
strongly_bearish_at = -7

# Outcome probabilities per label, each row must sum to 100
[outcomes.strongly_bullish]
up = 70
side = 20
down = 10

[outcomes.mildly_bullish]
up = 55
side = 30
down = 15

[outcomes.neutral]
up = 33
side = 34
down = 33

[outcomes.mildly_bearish]
up = 15
side = 30
down = 55

[outcomes.strongly_bearish]
up = 10
side = 20
down = 70

[alerts.high_reward]
# net_flow (dii_net > 0) or flag (dii_buying)
domestic_buying = \"net_flow\"
vix_above = 22.0

[alerts.bear_trap]
fii_below = -750.0
pcr_below = 0.7

[alerts.oversold_bounce]
pcr_above = 1.7
vix_above = 20.0
";

    std::fs::write(path.as_ref(), template)
        .with_context(|| format!("writing template {}", path.as_ref().display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("{}-{}.toml", name, std::process::id()))
    }

    #[test]
    fn test_default_config() {
        let config = RuleConfig::default();
        assert_eq!(config.name, "option-centric");
        assert_eq!(config.version, 3);
        assert_eq!(config, RuleSet::OptionCentric.config());
    }

    #[test]
    fn test_builtin_rule_sets_validate() {
        assert!(RuleSet::OptionCentric.config().validate().is_ok());
        assert!(RuleSet::CommonFactor.config().validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = RuleConfig::common_factor();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: RuleConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config, deserialized);
        assert!(deserialized.factors.sp500.is_none());
        assert_eq!(deserialized.factors.institutional_flow.domestic_threshold, None);
    }

    #[test]
    fn test_template_matches_option_centric() {
        let path = temp_path("nifty-rules-template");
        create_config_template(&path).unwrap();
        let loaded = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, RuleConfig::option_centric());
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("nifty-rules-saved");
        let config = RuleConfig::common_factor();
        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_rejects_bad_outcome_sum() {
        let mut config = RuleConfig::default();
        config.outcomes.neutral = OutcomeDistribution::new(33, 33, 33);

        assert_eq!(
            config.validate(),
            Err(RuleConfigError::OutcomeSum {
                label: SentimentLabel::Neutral,
                sum: 99
            })
        );
    }

    #[test]
    fn test_rejects_non_monotonic_outcomes() {
        let mut config = RuleConfig::default();
        config.outcomes.mildly_bullish = OutcomeDistribution::new(30, 40, 30);

        assert_eq!(
            config.validate(),
            Err(RuleConfigError::NonMonotonicOutcomes {
                lower: SentimentLabel::Neutral,
                higher: SentimentLabel::MildlyBullish,
            })
        );
    }

    #[test]
    fn test_rejects_unordered_bands() {
        let mut config = RuleConfig::default();
        config.bands.mildly_bullish_at = 8;

        assert!(matches!(
            config.validate(),
            Err(RuleConfigError::BandOrder { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_thresholds() {
        let mut config = RuleConfig::default();
        config.factors.usd_inr = Some(ThresholdRule::against_trend(-0.25));
        assert!(matches!(
            config.validate(),
            Err(RuleConfigError::NegativeThreshold { field: "factors.usd_inr", .. })
        ));

        let mut config = RuleConfig::default();
        config.opening_gap.flat_below_pct = 1.0;
        assert!(matches!(
            config.validate(),
            Err(RuleConfigError::GapBounds { .. })
        ));

        let mut config = RuleConfig::default();
        config.alerts.bear_trap = Some(BearTrapRule {
            fii_below: f64::NAN,
            pcr_below: 0.7,
        });
        assert!(matches!(
            config.validate(),
            Err(RuleConfigError::NonFiniteThreshold { .. })
        ));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let path = temp_path("nifty-rules-invalid");
        let mut config = RuleConfig::default();
        config.bands.strongly_bearish_at = 0;
        save_config(&config, &path).unwrap();

        let result = load_config(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
