use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentGoals {
    #[serde(default)]
    pub target_profit: f64,
    /// Free-form date as entered by the user (usually YYYY-MM-DD)
    #[serde(default)]
    pub target_date: String,
    #[serde(default)]
    pub available_capital: f64,
}

impl InvestmentGoals {
    /// The backend returns an all-zero value when the user never saved goals.
    pub fn is_set(&self) -> bool {
        self.target_profit != 0.0
            || self.available_capital != 0.0
            || !self.target_date.trim().is_empty()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.target_profit < 0.0 || self.available_capital < 0.0 {
            return Err("Goal amounts cannot be negative".to_string());
        }
        Ok(())
    }
}
