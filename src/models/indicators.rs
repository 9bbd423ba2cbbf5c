use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrossSignal {
    GoldenCross,
    DeathCross,
    Neutral,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BandPosition {
    AboveUpper,
    BelowLower,
    Inside,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Bullish => write!(f, "BULLISH"),
            Trend::Bearish => write!(f, "BEARISH"),
            Trend::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

impl std::fmt::Display for CrossSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrossSignal::GoldenCross => write!(f, "GOLDEN_CROSS"),
            CrossSignal::DeathCross => write!(f, "DEATH_CROSS"),
            CrossSignal::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

impl std::fmt::Display for BandPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BandPosition::AboveUpper => write!(f, "ABOVE_UPPER"),
            BandPosition::BelowLower => write!(f, "BELOW_LOWER"),
            BandPosition::Inside => write!(f, "INSIDE"),
        }
    }
}

/// MACD-style oscillator: fast line, signal line, histogram
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Oscillator {
    pub fast: f64,
    pub signal: f64,
    pub histogram: f64,
    pub cross: CrossSignal,
}

/// Bollinger-style band around the 20-period average
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bands {
    pub upper: f64,
    pub mid: f64,
    pub lower: f64,
    pub position: BandPosition,
}

/// Illustrative indicator set for one holding. The inputs are synthetic,
/// not derived from real price history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TechnicalIndicatorSet {
    pub symbol: String,
    pub ma5: f64,
    pub ma10: f64,
    pub ma20: f64,
    pub trend: Trend,
    pub oscillator: Oscillator,
    pub bands: Bands,
}
