/// Tradable symbols and their reference prices
///
/// Base prices are in price-cents and only serve as the center of the random
/// jitter; they never reach the wire.

use crate::error::{FeedError, Result};
use crate::protocol::Symbol;
use crate::random::RandomSource;

pub const DEFAULT_SYMBOLS: [(Symbol, i64); 4] = [
    (Symbol::from_static("AAPL"), 15_000),
    (Symbol::from_static("GOOGL"), 280_000),
    (Symbol::from_static("MSFT"), 35_000),
    (Symbol::from_static("AMZN"), 17_000),
];

#[derive(Debug, Clone)]
pub struct SymbolCatalog {
    entries: Vec<(Symbol, i64)>,
}

impl SymbolCatalog {
    pub fn new(entries: Vec<(Symbol, i64)>) -> Result<Self> {
        if entries.is_empty() {
            return Err(FeedError::EmptyCatalog);
        }
        Ok(SymbolCatalog { entries })
    }

    /// Build a catalog from (ticker, base price) pairs
    pub fn from_tickers(pairs: &[(&str, i64)]) -> Result<Self> {
        let entries = pairs
            .iter()
            .map(|&(ticker, base)| Symbol::new(ticker).map(|s| (s, base)))
            .collect::<Result<Vec<_>>>()?;
        Self::new(entries)
    }

    /// One entry, each with probability 1/len
    pub fn pick_uniform<R: RandomSource + ?Sized>(&self, rng: &mut R) -> (Symbol, i64) {
        let last = self.entries.len() as i64 - 1;
        let idx = rng.next_int(0, last) as usize;
        self.entries[idx]
    }

    pub fn base_price_of(&self, symbol: &Symbol) -> Option<i64> {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|&(_, base)| base)
    }

    pub fn entries(&self) -> &[(Symbol, i64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        SymbolCatalog {
            entries: DEFAULT_SYMBOLS.to_vec(),
        }
    }
}
