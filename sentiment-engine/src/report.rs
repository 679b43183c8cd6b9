//! Report building and rendering

use crate::aggregator::{self, AlertFlags, OutcomeDistribution};
use crate::classifiers::{BaseFactors, FactorPoint, GapClassification};
use crate::config::RuleConfig;
use common::{Factor, SentimentLabel, Track};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-factor points for one track, gap entry first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorBreakdown(Vec<FactorPoint>);

impl FactorBreakdown {
    /// Shared base factors plus this track's gap entry
    pub fn new(gap_points: i32, base: &BaseFactors) -> Self {
        let gap = FactorPoint {
            factor: Factor::OpeningGap,
            points: gap_points,
        };
        Self(std::iter::once(gap).chain(base.iter().copied()).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FactorPoint> + '_ {
        self.0.iter()
    }

    pub fn get(&self, factor: Factor) -> Option<i32> {
        self.0.iter().find(|p| p.factor == factor).map(|p| p.points)
    }

    pub fn total(&self) -> i32 {
        self.0.iter().map(|p| p.points).sum()
    }
}

/// Outcome of one track's evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub track: Track,
    pub gap: GapClassification,
    pub sentiment: SentimentLabel,
    pub score: i32,
    pub outcomes: OutcomeDistribution,
    pub factors: FactorBreakdown,
    pub alerts: AlertFlags,
}

impl Report {
    /// Compose one track from its gap classification and the shared factors
    pub fn build(
        track: Track,
        gap: GapClassification,
        base: &BaseFactors,
        alerts: AlertFlags,
        config: &RuleConfig,
    ) -> Self {
        let score = aggregator::composite_score(base, gap.points);
        Self {
            track,
            gap,
            sentiment: aggregator::sentiment_label(score, &config.bands),
            score,
            outcomes: aggregator::outcome_distribution(score, &config.bands, &config.outcomes),
            factors: FactorBreakdown::new(gap.points, base),
            alerts,
        }
    }

    /// Two tracks agree when both the gap tag and the sentiment match
    pub fn agrees_with(&self, other: &Report) -> bool {
        self.gap.tag == other.gap.tag && self.sentiment == other.sentiment
    }

    /// Render as markdown-flavoured text under the given heading label
    pub fn render(&self, label: &str) -> String {
        LabeledReport { label, report: self }.to_string()
    }
}

/// A report shown under a heading label
struct LabeledReport<'a> {
    label: &'a str,
    report: &'a Report,
}

impl fmt::Display for LabeledReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;

        writeln!(f, "### {}: {} ➜ {}", self.label, report.gap.tag, report.sentiment)?;
        writeln!(f)?;
        writeln!(f, "Composite score: {:+}", report.score)?;
        writeln!(
            f,
            "Probabilities: Up {}% | Side {}% | Down {}%",
            report.outcomes.up, report.outcomes.side, report.outcomes.down
        )?;
        let (primary, primary_pct) = report.outcomes.primary();
        let (alternate, alternate_pct) = report.outcomes.alternate();
        writeln!(f, "Primary bias: {} ({}%)", primary, primary_pct)?;
        writeln!(f, "Alternate bias: {} ({}%)", alternate, alternate_pct)?;
        writeln!(f)?;

        writeln!(f, "Factor breakdown:")?;
        for p in report.factors.iter() {
            writeln!(f, "* {}: {:+}", p.factor, p.points)?;
        }
        writeln!(f)?;

        let triggered = report.alerts.triggered();
        if triggered.is_empty() {
            writeln!(f, "Alerts: none")?;
        } else {
            writeln!(f, "Alerts:")?;
            for message in triggered {
                writeln!(f, "* {}", message)?;
            }
        }
        Ok(())
    }
}

/// Both tracks of one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Rule set name and version, e.g. `option-centric v3`
    pub rules: String,
    pub spot: Report,
    pub futures: Report,
    /// Spot and futures agree; only the spot report is displayed
    pub merged: bool,
}

impl Evaluation {
    pub fn new(rules: String, spot: Report, futures: Report) -> Self {
        let merged = spot.agrees_with(&futures);
        Self {
            rules,
            spot,
            futures,
            merged,
        }
    }

    /// Reports to display with their heading labels
    pub fn reports(&self) -> Vec<(&'static str, &Report)> {
        if self.merged {
            vec![("Consensus", &self.spot)]
        } else {
            vec![
                (self.spot.track.display_name(), &self.spot),
                (self.futures.track.display_name(), &self.futures),
            ]
        }
    }

    pub fn render(&self) -> String {
        self.reports()
            .into_iter()
            .map(|(label, report)| report.render(label))
            .collect::<Vec<_>>()
            .join("\n---\n\n")
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::{classify_factors, opening_gap};
    use common::{GapTag, IndicatorInput};

    fn build(track: Track, prev_close: f64, input: &IndicatorInput, config: &RuleConfig) -> Report {
        let base = classify_factors(input, &config.factors);
        let gap = opening_gap(prev_close, input.reference_value, &config.opening_gap);
        let alerts = AlertFlags::evaluate(input, &config.alerts);
        Report::build(track, gap, &base, alerts, config)
    }

    #[test]
    fn test_breakdown_built_per_track() {
        let config = RuleConfig::default();
        let input = IndicatorInput {
            spot_prev_close: 22000.0,
            futures_prev_close: 21900.0,
            reference_value: 22100.0,
            fii_net: 2000.0,
            ..Default::default()
        };
        let spot = build(Track::Spot, input.spot_prev_close, &input, &config);
        let futures = build(Track::Futures, input.futures_prev_close, &input, &config);

        assert_eq!(spot.factors.get(Factor::OpeningGap), Some(1));
        assert_eq!(futures.factors.get(Factor::OpeningGap), Some(2));
        assert_eq!(spot.factors.get(Factor::FiiFlow), Some(1));
        assert_eq!(futures.factors.get(Factor::FiiFlow), Some(1));
        assert_eq!(spot.score, spot.factors.total());
        assert_eq!(futures.score, futures.factors.total());
        assert_eq!(futures.score - spot.score, 1);
    }

    #[test]
    fn test_split_when_tags_differ() {
        let config = RuleConfig::default();
        let input = IndicatorInput {
            spot_prev_close: 22000.0,
            futures_prev_close: 22090.0,
            reference_value: 22100.0,
            ..Default::default()
        };
        let spot = build(Track::Spot, input.spot_prev_close, &input, &config);
        let futures = build(Track::Futures, input.futures_prev_close, &input, &config);
        assert_eq!(spot.gap.tag, GapTag::GapUpOpening);
        assert_eq!(futures.gap.tag, GapTag::FlatOpening);
        // same neutral sentiment, different tag
        assert_eq!(spot.sentiment, futures.sentiment);

        let evaluation = Evaluation::new("test".to_string(), spot, futures);
        assert!(!evaluation.merged);
        let labels: Vec<&str> = evaluation.reports().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["Spot", "Futures"]);

        let text = evaluation.render();
        assert!(text.contains("### Spot: Gap Up Opening ➜ Neutral / Range-bound"));
        assert!(text.contains("### Futures: Flat Opening ➜ Neutral / Range-bound"));
    }

    #[test]
    fn test_render_contents() {
        let config = RuleConfig::default();
        let input = IndicatorInput {
            spot_prev_close: 22000.0,
            futures_prev_close: 22000.0,
            reference_value: 21500.0,
            dow_jones_change: -1.0,
            sp500_change: -1.0,
            india_vix: 24.0,
            fii_net: -2000.0,
            dii_net: 100.0,
            ..Default::default()
        };
        let spot = build(Track::Spot, input.spot_prev_close, &input, &config);
        assert_eq!(spot.score, -7);
        assert_eq!(spot.sentiment, SentimentLabel::StronglyBearish);

        let text = spot.render("Consensus");
        assert!(text.starts_with("### Consensus: Huge Gap Down Opening ➜ Strongly Bearish"));
        assert!(text.contains("Composite score: -7"));
        assert!(text.contains("Probabilities: Up 10% | Side 20% | Down 70%"));
        assert!(text.contains("Primary bias: Down (70%)"));
        assert!(text.contains("Alternate bias: Up (10%)"));
        assert!(text.contains("* Opening Gap: -2"));
        assert!(text.contains("* India VIX: -2"));
        assert!(text.contains("* PCR: +0"));
        assert!(text.contains("High-Reward Signal"));
        assert!(!text.contains("Alerts: none"));
    }

    #[test]
    fn test_render_no_alerts_marker() {
        let config = RuleConfig::default();
        let input = IndicatorInput {
            spot_prev_close: 22000.0,
            reference_value: 22000.0,
            ..Default::default()
        };
        let spot = build(Track::Spot, input.spot_prev_close, &input, &config);
        let text = spot.render("Spot");
        assert!(text.contains("Composite score: +0"));
        assert!(text.contains("Alerts: none"));
    }
}
