//! Enumerations shared by the engine and its front ends

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scored indicator, in breakdown display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    OpeningGap,
    DowJones,
    Sp500,
    CboeVix,
    IndiaVix,
    PcrLevel,
    PcrChange,
    MaxPainShift,
    AtmIvChange,
    FiiFlow,
    DiiFlow,
    UsdInr,
    BrentCrude,
}

impl Factor {
    pub fn display_name(&self) -> &'static str {
        match self {
            Factor::OpeningGap => "Opening Gap",
            Factor::DowJones => "Dow Jones",
            Factor::Sp500 => "S&P 500",
            Factor::CboeVix => "CBOE VIX",
            Factor::IndiaVix => "India VIX",
            Factor::PcrLevel => "PCR",
            Factor::PcrChange => "PCR Change",
            Factor::MaxPainShift => "Max Pain Shift",
            Factor::AtmIvChange => "ATM IV Change",
            Factor::FiiFlow => "FII Flow",
            Factor::DiiFlow => "DII Flow",
            Factor::UsdInr => "USD/INR",
            Factor::BrentCrude => "Brent Crude",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Opening gap category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapTag {
    DataError,
    FlatOpening,
    GapUpOpening,
    GapDownOpening,
    HugeGapUpOpening,
    HugeGapDownOpening,
}

impl GapTag {
    pub fn display_name(&self) -> &'static str {
        match self {
            GapTag::DataError => "Data Error",
            GapTag::FlatOpening => "Flat Opening",
            GapTag::GapUpOpening => "Gap Up Opening",
            GapTag::GapDownOpening => "Gap Down Opening",
            GapTag::HugeGapUpOpening => "Huge Gap Up Opening",
            GapTag::HugeGapDownOpening => "Huge Gap Down Opening",
        }
    }
}

impl fmt::Display for GapTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Qualitative sentiment, ordered from most bearish to most bullish
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    StronglyBearish,
    MildlyBearish,
    Neutral,
    MildlyBullish,
    StronglyBullish,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 5] = [
        SentimentLabel::StronglyBearish,
        SentimentLabel::MildlyBearish,
        SentimentLabel::Neutral,
        SentimentLabel::MildlyBullish,
        SentimentLabel::StronglyBullish,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            SentimentLabel::StronglyBearish => "Strongly Bearish",
            SentimentLabel::MildlyBearish => "Mildly Bearish",
            SentimentLabel::Neutral => "Neutral / Range-bound",
            SentimentLabel::MildlyBullish => "Mildly Bullish",
            SentimentLabel::StronglyBullish => "Strongly Bullish",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Session outcome bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Up,
    Side,
    Down,
}

impl Outcome {
    /// Tie-break order: earlier wins
    pub const ALL: [Outcome; 3] = [Outcome::Up, Outcome::Side, Outcome::Down];

    pub fn display_name(&self) -> &'static str {
        match self {
            Outcome::Up => "Up",
            Outcome::Side => "Side",
            Outcome::Down => "Down",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Institutional investor class for flow classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstitutionRole {
    Foreign,
    Domestic,
}

/// Which previous close the opening gap is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    Spot,
    Futures,
}

impl Track {
    pub fn display_name(&self) -> &'static str {
        match self {
            Track::Spot => "Spot",
            Track::Futures => "Futures",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_ordering() {
        assert!(SentimentLabel::StronglyBearish < SentimentLabel::MildlyBearish);
        assert!(SentimentLabel::Neutral < SentimentLabel::MildlyBullish);
        assert!(SentimentLabel::MildlyBullish < SentimentLabel::StronglyBullish);
    }

    #[test]
    fn test_factor_order_starts_with_gap() {
        let mut factors = vec![Factor::UsdInr, Factor::OpeningGap, Factor::FiiFlow];
        factors.sort();
        assert_eq!(factors, vec![Factor::OpeningGap, Factor::FiiFlow, Factor::UsdInr]);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(GapTag::DataError.to_string(), "Data Error");
        assert_eq!(SentimentLabel::Neutral.to_string(), "Neutral / Range-bound");
        assert_eq!(Track::Futures.to_string(), "Futures");
    }
}
