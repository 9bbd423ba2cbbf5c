use crate::models::{CrossSignal, Holding, InvestmentGoals, NewsItem, TechnicalIndicatorSet};
use crate::services::portfolio_service::{aggregate, weight_of};
use crate::services::report_format::format_instruction;

/// Fixed role given to the model as the system message.
pub const SYSTEM_ROLE: &str = "You are a senior investment advisor with 20 years of Wall Street experience. \
Based on the user's portfolio (including technical data and position weights), recent market news and the \
broader market environment, produce a professional investment analysis report. Be professional, objective \
and incisive; use financial terminology but stay readable. Write the report in Markdown.";

/// Static description of the current macro environment.
pub const MARKET_CONTEXT: &str = "The market is in a volatile upward range, led by technology stocks while \
traditional energy pulls back. Inflation expectations have eased slightly and the market increasingly expects \
the Federal Reserve to cut rates.";

pub const GOALS_NOT_SET: &str = "No investment goals set";

/// Everything the analysis prompt is rendered from. `indicators` is index-aligned with `holdings`.
#[derive(Debug, Clone, Copy)]
pub struct PromptInput<'a> {
    pub holdings: &'a [Holding],
    pub indicators: &'a [TechnicalIndicatorSet],
    pub news: &'a [NewsItem],
    pub goals: Option<&'a InvestmentGoals>,
    pub market_context: &'a str,
}

pub fn build_analysis_prompt(input: &PromptInput<'_>) -> String {
    let snapshot = aggregate(input.holdings);

    let holdings_block = input
        .holdings
        .iter()
        .zip(input.indicators)
        .map(|(h, tech)| holding_block(h, tech, snapshot.total_value))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"**User portfolio (with technical indicators and position weights):**
{holdings}

**Overall account performance:**
- Total cost: {cost:.2}
- Current market value: {value:.2}
- Current P&L: {pnl:.2} ({pnl_pct:.2}%)

**User investment goals and resources:**
{goals}

**Recent market news:**
{news}

**Macro market background:**
{context}

**Tasks:**
1. **Portfolio health score**: rate the portfolio from 0 to 100.
2. **Summary rationale**: one sentence on the portfolio's health.
3. **In-depth holding analysis**: combine position weight, technical indicators (MA trend, MACD signal, BOLL position) and fundamental P&L when reviewing the main holdings. Focus on the risk of the heaviest positions.
4. **Allocation advice**: assess whether the current distribution is too concentrated or too scattered and propose adjustments.
5. **Goal attainment**: using the user's goals and resources, assess whether the portfolio can reach the profit target on time. If there is a gap, give a concrete remedy or acceleration plan using the available additional capital.
6. **Macro impact**: use the news to explain how macro events affect this portfolio specifically.
7. **Recommendations**: list them as a table: | Symbol | Direction (buy/sell/hold/reduce) | Rationale |.

{format}"#,
        holdings = holdings_block,
        cost = snapshot.total_cost,
        value = snapshot.total_value,
        pnl = snapshot.total_pnl,
        pnl_pct = snapshot.pnl_percentage,
        goals = goals_block(input.goals),
        news = news_digest(input.news),
        context = input.market_context,
        format = format_instruction(),
    )
}

fn holding_block(h: &Holding, tech: &TechnicalIndicatorSet, total_value: f64) -> String {
    let market_value = h.market_value();
    let cross = match tech.oscillator.cross {
        CrossSignal::Neutral => "no clear signal".to_string(),
        other => other.to_string(),
    };

    format!(
        "- **{name} ({symbol})**\n\
         \x20 - Basics: quantity {qty}, cost {cost}, price {price} (P&L: {pnl:.2}%)\n\
         \x20 - Position: market value {mv:.2}, weight {weight:.2}% of portfolio\n\
         \x20 - Technicals:\n\
         \x20   - MA trend: {trend} (MA5={ma5:.2}, MA20={ma20:.2})\n\
         \x20   - MACD: {cross} (Hist={hist:.3})\n\
         \x20   - BOLL: {band} (Upper={upper:.2}, Lower={lower:.2})",
        name = h.name,
        symbol = h.symbol,
        qty = h.quantity,
        cost = h.cost_price,
        price = h.current_price,
        pnl = h.pnl_percentage(),
        mv = market_value,
        weight = weight_of(market_value, total_value),
        trend = tech.trend,
        ma5 = tech.ma5,
        ma20 = tech.ma20,
        cross = cross,
        hist = tech.oscillator.histogram,
        band = tech.bands.position,
        upper = tech.bands.upper,
        lower = tech.bands.lower,
    )
}

fn goals_block(goals: Option<&InvestmentGoals>) -> String {
    match goals.filter(|g| g.is_set()) {
        Some(g) => format!(
            "- Profit target: {}\n- Target date: {}\n- Available additional capital: {}",
            g.target_profit, g.target_date, g.available_capital
        ),
        None => GOALS_NOT_SET.to_string(),
    }
}

fn news_digest(news: &[NewsItem]) -> String {
    news.iter()
        .map(|n| format!("- {} (Source: {}): {}", n.title, n.source, n.summary))
        .collect::<Vec<_>>()
        .join("\n")
}
