//! Score aggregation, sentiment bands and alert flags

use crate::classifiers::BaseFactors;
use crate::config::{AlertRules, DomesticBuyingSignal, OutcomeTable, SentimentBands};
use common::{IndicatorInput, Outcome, SentimentLabel};
use serde::{Deserialize, Serialize};

/// Probability of each session outcome, in whole percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeDistribution {
    pub up: u8,
    pub side: u8,
    pub down: u8,
}

impl OutcomeDistribution {
    pub const fn new(up: u8, side: u8, down: u8) -> Self {
        Self { up, side, down }
    }

    pub fn get(&self, outcome: Outcome) -> u8 {
        match outcome {
            Outcome::Up => self.up,
            Outcome::Side => self.side,
            Outcome::Down => self.down,
        }
    }

    pub fn total(&self) -> u32 {
        self.up as u32 + self.side as u32 + self.down as u32
    }

    /// Outcomes in Up, Side, Down order
    pub fn iter(&self) -> impl Iterator<Item = (Outcome, u8)> + '_ {
        Outcome::ALL.into_iter().map(move |o| (o, self.get(o)))
    }

    /// Most likely outcome; ties go to the earlier of Up, Side, Down
    pub fn primary(&self) -> (Outcome, u8) {
        self.iter()
            .fold(None, |best: Option<(Outcome, u8)>, (o, p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((o, p)),
            })
            .unwrap_or((Outcome::Side, self.side))
    }

    /// Least likely outcome; ties go to the earlier of Up, Side, Down
    pub fn alternate(&self) -> (Outcome, u8) {
        self.iter()
            .fold(None, |best: Option<(Outcome, u8)>, (o, p)| match best {
                Some((_, bp)) if bp <= p => best,
                _ => Some((o, p)),
            })
            .unwrap_or((Outcome::Side, self.side))
    }
}

/// Composite score: every non-gap factor point plus the track's gap points
pub fn composite_score(base: &BaseFactors, gap_points: i32) -> i32 {
    base.total() + gap_points
}

/// Map a composite score onto its sentiment band
pub fn sentiment_label(score: i32, bands: &SentimentBands) -> SentimentLabel {
    match score {
        s if s >= bands.strongly_bullish_at => SentimentLabel::StronglyBullish,
        s if s >= bands.mildly_bullish_at => SentimentLabel::MildlyBullish,
        s if s <= bands.strongly_bearish_at => SentimentLabel::StronglyBearish,
        s if s <= bands.mildly_bearish_at => SentimentLabel::MildlyBearish,
        _ => SentimentLabel::Neutral,
    }
}

/// Outcome distribution for a score, looked up through the same band as the label
pub fn outcome_distribution(
    score: i32,
    bands: &SentimentBands,
    table: &OutcomeTable,
) -> OutcomeDistribution {
    table.get(sentiment_label(score, bands))
}

/// Special-condition flags, evaluated on raw inputs and independent of the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlertFlags {
    pub high_reward: bool,
    pub bear_trap: bool,
    pub oversold_bounce_risk: bool,
}

impl AlertFlags {
    pub fn evaluate(input: &IndicatorInput, rules: &AlertRules) -> Self {
        let high_reward = rules.high_reward.is_some_and(|rule| {
            let domestic_buying = match rule.domestic_buying {
                DomesticBuyingSignal::NetFlow => input.dii_net > 0.0,
                DomesticBuyingSignal::Flag => input.dii_buying,
            };
            domestic_buying && input.india_vix > rule.vix_above
        });

        let bear_trap = rules
            .bear_trap
            .is_some_and(|rule| input.fii_net < rule.fii_below && input.pcr < rule.pcr_below);

        let oversold_bounce_risk = rules
            .oversold_bounce
            .is_some_and(|rule| input.pcr > rule.pcr_above && input.india_vix > rule.vix_above);

        Self {
            high_reward,
            bear_trap,
            oversold_bounce_risk,
        }
    }

    pub fn any(&self) -> bool {
        self.high_reward || self.bear_trap || self.oversold_bounce_risk
    }

    /// Messages for the flags that fired
    pub fn triggered(&self) -> Vec<&'static str> {
        let mut messages = Vec::new();
        if self.high_reward {
            messages.push("High-Reward Signal: DII buying into elevated VIX");
        }
        if self.bear_trap {
            messages.push("Bear-Trap Alert: FII selling with low PCR");
        }
        if self.oversold_bounce_risk {
            messages.push("Oversold-Bounce Risk: high PCR with elevated VIX");
        }
        messages
    }
}
