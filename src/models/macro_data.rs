use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MacroPoint {
    pub date: String,
    pub value: f64,
}

/// Loan prime rate carries both the 1-year and 5-year fixings.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LprPoint {
    pub date: String,
    pub value: f64,
    pub value_5y: Option<f64>,
}

#[derive(Deserialize)]
struct RawLprPoint {
    date: String,
    #[serde(alias = "value")]
    value_1y: f64,
    #[serde(default, alias = "value5y")]
    value_5y: Option<f64>,
}

impl<'de> Deserialize<'de> for LprPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawLprPoint::deserialize(deserializer)?;
        Ok(LprPoint {
            date: raw.date,
            value: raw.value_1y,
            value_5y: raw.value_5y,
        })
    }
}

/// Macro-economic series keyed by indicator. Series missing upstream are empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MacroBundle {
    pub cpi: Vec<MacroPoint>,
    pub ppi: Vec<MacroPoint>,
    pub lpr: Vec<LprPoint>,
    pub gdp: Vec<MacroPoint>,
    pub pmi: Vec<MacroPoint>,
    pub fx_reserves: Vec<MacroPoint>,
    pub exchange_rate: Vec<MacroPoint>,
    pub deposit_volume: Vec<MacroPoint>,
    pub deposit_rates: Vec<MacroPoint>,
}
