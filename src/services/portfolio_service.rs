use crate::models::{Holding, HoldingWeight, PortfolioSnapshot, PortfolioSummary};

/// Totals over the holding set. An empty set yields an all-zero snapshot.
pub fn aggregate(holdings: &[Holding]) -> PortfolioSnapshot {
    let (total_value, total_cost) = holdings
        .iter()
        .fold((0.0, 0.0), |(value, cost), h| (value + h.market_value(), cost + h.cost_value()));

    let total_pnl = total_value - total_cost;
    let pnl_percentage = if total_cost == 0.0 {
        0.0
    } else {
        total_pnl / total_cost * 100.0
    };

    PortfolioSnapshot {
        total_value,
        total_cost,
        total_pnl,
        pnl_percentage,
    }
}

/// Per-holding value and share of the portfolio, in input order.
pub fn holding_weights(holdings: &[Holding], total_value: f64) -> Vec<HoldingWeight> {
    holdings
        .iter()
        .map(|h| {
            let market_value = h.market_value();
            HoldingWeight {
                id: h.id.clone(),
                symbol: h.symbol.clone(),
                market_value,
                cost_value: h.cost_value(),
                pnl_percentage: h.pnl_percentage(),
                weight: weight_of(market_value, total_value),
            }
        })
        .collect()
}

pub fn weight_of(market_value: f64, total_value: f64) -> f64 {
    if total_value > 0.0 {
        market_value / total_value * 100.0
    } else {
        0.0
    }
}

pub fn summarize(holdings: &[Holding]) -> PortfolioSummary {
    let snapshot = aggregate(holdings);
    PortfolioSummary {
        holdings: holding_weights(holdings, snapshot.total_value),
        snapshot,
    }
}
