use serde::{Deserialize, Serialize};

/// Pure projection of the current holding set. Never stored.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub total_value: f64,
    pub total_cost: f64,
    pub total_pnl: f64,
    pub pnl_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingWeight {
    pub id: String,
    pub symbol: String,
    pub market_value: f64,
    pub cost_value: f64,
    pub pnl_percentage: f64,
    /// Share of total portfolio value, in percent
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub snapshot: PortfolioSnapshot,
    pub holdings: Vec<HoldingWeight>,
}
