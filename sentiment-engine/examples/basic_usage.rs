//! Example usage of the sentiment engine

use sentiment_engine::{IndicatorInput, RuleConfig, RuleSet, SentimentEngine};

fn main() -> anyhow::Result<()> {
    println!("=== Nifty Pre-Open Sentiment Example ===\n");

    // Example 1: Engine with the latest rule set
    println!("Example 1: Creating Sentiment Engine");
    let engine = SentimentEngine::new();
    println!(
        "✓ Engine created with {} v{}\n",
        engine.config().name,
        engine.config().version
    );

    // Example 2: Evaluate a quiet morning
    println!("Example 2: Quiet Morning");
    let quiet = IndicatorInput {
        spot_prev_close: 22000.0,
        futures_prev_close: 22050.0,
        reference_value: 22100.0,
        dow_jones_change: 0.10,
        sp500_change: 0.15,
        india_vix: 15.5,
        fii_net: 500.0,
        dii_net: 300.0,
        ..Default::default()
    };
    let evaluation = engine.evaluate(&quiet);
    println!("  Merged: {}", evaluation.merged);
    println!("{}", evaluation);

    // Example 3: Spot and futures disagree
    println!("Example 3: Split Tracks");
    let split = IndicatorInput {
        spot_prev_close: 22000.0,
        futures_prev_close: 21800.0,
        reference_value: 22100.0,
        fii_net: -1800.0,
        pcr: 0.65,
        ..Default::default()
    };
    let evaluation = engine.evaluate(&split);
    for (label, report) in evaluation.reports() {
        println!(
            "  {}: {} ➜ {} (score {:+})",
            label, report.gap.tag, report.sentiment, report.score
        );
    }
    println!("  Bear trap: {}\n", evaluation.spot.alerts.bear_trap);

    // Example 4: Earlier rule set for comparison
    println!("Example 4: Common-Factor Rule Set");
    let legacy = SentimentEngine::with_rule_set(RuleSet::CommonFactor);
    let evaluation = legacy.evaluate(&split);
    println!(
        "  {} ➜ score {:+}, {}\n",
        evaluation.rules, evaluation.spot.score, evaluation.spot.sentiment
    );

    // Example 5: Custom rule configuration
    println!("Example 5: Custom Rule Configuration");
    let mut custom = RuleConfig::default();
    custom.name = "wide-gap".to_string();
    custom.opening_gap.gap_up_to_pct = 1.0;
    match SentimentEngine::with_config(custom) {
        Ok(engine) => {
            let evaluation = engine.evaluate(&split);
            println!("  Futures gap: {}", evaluation.futures.gap.tag);
        }
        Err(e) => println!("  ✗ Rule configuration rejected: {}", e),
    }

    Ok(())
}
