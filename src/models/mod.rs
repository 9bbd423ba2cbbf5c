mod holding;
mod report;
mod news;
mod goals;
mod macro_data;
mod indicators;
mod portfolio;

pub use holding::{AssetClass, Holding};
pub use report::{AnalysisReport, AnalysisResult};
pub use news::{demo_news, NewsItem, NewsQueryParams};
pub use goals::InvestmentGoals;
pub use macro_data::{LprPoint, MacroBundle, MacroPoint};
pub use indicators::{BandPosition, Bands, CrossSignal, Oscillator, TechnicalIndicatorSet, Trend};
pub use portfolio::{HoldingWeight, PortfolioSnapshot, PortfolioSummary};
