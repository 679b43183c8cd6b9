//! Nifty pre-open sentiment engine
//!
//! Turns a manually entered set of overnight and options-market indicators
//! into a composite score, a sentiment label, an outcome probability
//! breakdown and a few alert flags. Every evaluation is a pure function of
//! the [`IndicatorInput`] and the active [`RuleConfig`].

pub mod aggregator;
pub mod classifiers;
pub mod config;
pub mod report;
pub mod settings;

pub use aggregator::{AlertFlags, OutcomeDistribution};
pub use classifiers::{BaseFactors, FactorPoint, GapClassification};
pub use crate::config::{
    create_config_template, load_config, save_config, RuleConfig, RuleConfigError, RuleSet,
};
pub use report::{Evaluation, FactorBreakdown, Report};
pub use settings::{OutputFormat, Settings};

pub use common::{Factor, GapTag, IndicatorInput, InstitutionRole, Outcome, SentimentLabel, Track};

use tracing::{debug, info};

/// Main entry point: scores indicator inputs against one rule configuration
#[derive(Debug, Clone)]
pub struct SentimentEngine {
    config: RuleConfig,
}

impl SentimentEngine {
    /// Create an engine with the latest built-in rule set
    pub fn new() -> Self {
        Self {
            config: RuleConfig::default(),
        }
    }

    /// Create an engine with a named built-in rule set
    pub fn with_rule_set(rule_set: RuleSet) -> Self {
        Self {
            config: rule_set.config(),
        }
    }

    /// Create an engine with a custom rule configuration
    pub fn with_config(config: RuleConfig) -> Result<Self, RuleConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Score one submission on both the spot and futures tracks
    pub fn evaluate(&self, input: &IndicatorInput) -> Evaluation {
        let config = &self.config;

        let base = classifiers::classify_factors(input, &config.factors);
        let alerts = AlertFlags::evaluate(input, &config.alerts);

        let spot_gap = classifiers::opening_gap(
            input.spot_prev_close,
            input.reference_value,
            &config.opening_gap,
        );
        let futures_gap = classifiers::opening_gap(
            input.futures_prev_close,
            input.reference_value,
            &config.opening_gap,
        );
        debug!(
            spot = %spot_gap.tag,
            futures = %futures_gap.tag,
            base_points = base.total(),
            "Opening gaps classified"
        );

        let spot = Report::build(Track::Spot, spot_gap, &base, alerts, config);
        let futures = Report::build(Track::Futures, futures_gap, &base, alerts, config);
        let evaluation = Evaluation::new(
            format!("{} v{}", config.name, config.version),
            spot,
            futures,
        );

        info!(
            rules = %evaluation.rules,
            spot_score = evaluation.spot.score,
            futures_score = evaluation.futures.score,
            sentiment = %evaluation.spot.sentiment,
            merged = evaluation.merged,
            "Evaluation complete"
        );

        evaluation
    }
}

impl Default for SentimentEngine {
    fn default() -> Self {
        Self::new()
    }
}
