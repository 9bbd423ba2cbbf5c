use serde::{Deserialize, Serialize};

/// Asset class as stored by the holdings backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AssetClass {
    #[serde(rename = "STOCK")]
    Equity,
    #[serde(rename = "FUND")]
    Fund,
    #[serde(rename = "CRYPTO")]
    Crypto,
    #[serde(rename = "CASH")]
    Cash,
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetClass::Equity => write!(f, "equity"),
            AssetClass::Fund => write!(f, "fund"),
            AssetClass::Crypto => write!(f, "crypto"),
            AssetClass::Cash => write!(f, "cash"),
        }
    }
}

// A single position in the active user's portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_class: AssetClass,
    pub quantity: f64,
    pub cost_price: f64,
    pub current_price: f64,
    pub currency: String,
}

impl Holding {
    pub fn market_value(&self) -> f64 {
        self.quantity * self.current_price
    }

    pub fn cost_value(&self) -> f64 {
        self.quantity * self.cost_price
    }

    /// Unrealized gain per unit relative to cost, in percent. Zero when cost price is zero.
    pub fn pnl_percentage(&self) -> f64 {
        if self.cost_price == 0.0 {
            0.0
        } else {
            (self.current_price - self.cost_price) / self.cost_price * 100.0
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.symbol.trim().is_empty() {
            return Err("Holding symbol cannot be empty".to_string());
        }
        if !(self.quantity >= 0.0) {
            return Err(format!("Holding {} has a negative quantity", self.symbol));
        }
        if self.cost_price < 0.0 || self.current_price < 0.0 {
            return Err(format!("Holding {} has a negative price", self.symbol));
        }
        Ok(())
    }
}
