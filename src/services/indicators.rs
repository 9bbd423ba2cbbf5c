//! Synthetic technical indicators.
//!
//! There is no price history behind these numbers: moving averages are the
//! current price perturbed by seeded noise, so every classification is
//! illustrative only and must not be read as a trading signal. The values are
//! still deterministic for a given (symbol, current price) pair, which keeps
//! the prompt stable across repeated analyses of an unchanged portfolio.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{
    BandPosition, Bands, CrossSignal, Holding, Oscillator, TechnicalIndicatorSet, Trend,
};

/// Half-widths of the multiplicative noise applied to price for MA5/MA10/MA20.
const MA_BANDS: [f64; 3] = [0.025, 0.05, 0.075];

/// A histogram strictly inside (0, CROSS_THRESHOLD) counts as a fresh cross.
const CROSS_THRESHOLD: f64 = 0.2;

/// Standard-deviation proxy as a fraction of the current price.
const SIGMA_RATIO: f64 = 0.05;

/// Seed derived from the symbol: the sum of its character codes.
pub fn symbol_seed(symbol: &str) -> u64 {
    symbol.chars().map(|c| c as u64).sum()
}

/// Synthesize indicators using the symbol-seeded generator.
pub fn synthesize(holding: &Holding) -> TechnicalIndicatorSet {
    let mut rng = StdRng::seed_from_u64(symbol_seed(&holding.symbol));
    synthesize_with(holding, &mut rng)
}

/// Synthesize indicators from an explicit random source.
///
/// The generator is advanced exactly five times, in this order:
/// MA5, MA10, MA20, oscillator fast line, oscillator signal line.
pub fn synthesize_with<R: Rng + ?Sized>(holding: &Holding, rng: &mut R) -> TechnicalIndicatorSet {
    let price = holding.current_price;

    let [ma5, ma10, ma20] = MA_BANDS.map(|half_width| {
        let noise: f64 = rng.random();
        price * (1.0 + (noise - 0.5) * 2.0 * half_width)
    });

    let fast = (rng.random::<f64>() - 0.5) * 2.0;
    let signal = (rng.random::<f64>() - 0.5) * 2.0;
    let histogram = 2.0 * (fast - signal);

    let sigma = price * SIGMA_RATIO;
    let upper = ma20 + 2.0 * sigma;
    let lower = ma20 - 2.0 * sigma;

    TechnicalIndicatorSet {
        symbol: holding.symbol.clone(),
        ma5,
        ma10,
        ma20,
        trend: classify_trend(price, ma5, ma10, ma20),
        oscillator: Oscillator {
            fast,
            signal,
            histogram,
            cross: classify_cross(histogram),
        },
        bands: Bands {
            upper,
            mid: ma20,
            lower,
            position: classify_band(price, upper, lower),
        },
    }
}

/// Bullish only on a strict ascending stack, bearish only on a strict descending one.
pub fn classify_trend(price: f64, ma5: f64, ma10: f64, ma20: f64) -> Trend {
    if price > ma5 && ma5 > ma10 && ma10 > ma20 {
        Trend::Bullish
    } else if price < ma5 && ma5 < ma10 && ma10 < ma20 {
        Trend::Bearish
    } else {
        Trend::Neutral
    }
}

pub fn classify_cross(histogram: f64) -> CrossSignal {
    if histogram > 0.0 && histogram < CROSS_THRESHOLD {
        CrossSignal::GoldenCross
    } else if histogram < 0.0 && histogram > -CROSS_THRESHOLD {
        CrossSignal::DeathCross
    } else {
        CrossSignal::Neutral
    }
}

pub fn classify_band(price: f64, upper: f64, lower: f64) -> BandPosition {
    if price > upper {
        BandPosition::AboveUpper
    } else if price < lower {
        BandPosition::BelowLower
    } else {
        BandPosition::Inside
    }
}
