/// Event sampling
///
/// Each call decides trade vs quote, picks a symbol, and jitters prices around
/// the symbol's base price. Quantities are always whole lots.

use crate::catalog::SymbolCatalog;
use crate::error::{FeedError, Result};
use crate::protocol::{QuoteRecord, Record, Symbol, TradeRecord};
use crate::random::RandomSource;

pub const DEFAULT_QUOTE_PROBABILITY: f64 = 0.7;
pub const LOT_SIZE: u32 = 100;

pub const TRADE_JITTER: (i64, i64) = (-50, 50);
pub const TRADE_LOTS: (i64, i64) = (1, 10);
pub const BID_JITTER: (i64, i64) = (-100, 0);
pub const ASK_JITTER: (i64, i64) = (0, 100);
pub const QUOTE_LOTS: (i64, i64) = (1, 20);

/// A sampled market event, not yet stamped with a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Trade {
        symbol: Symbol,
        price: i64,
        quantity: u32,
    },
    Quote {
        symbol: Symbol,
        bid_price: i64,
        bid_qty: u32,
        ask_price: i64,
        ask_qty: u32,
    },
}

impl Event {
    pub fn symbol(&self) -> &Symbol {
        match self {
            Event::Trade { symbol, .. } | Event::Quote { symbol, .. } => symbol,
        }
    }

    pub fn is_quote(&self) -> bool {
        matches!(self, Event::Quote { .. })
    }

    pub fn into_record(self, timestamp: u64) -> Record {
        match self {
            Event::Trade { symbol, price, quantity } => Record::Trade(TradeRecord {
                timestamp,
                symbol,
                price,
                quantity,
            }),
            Event::Quote {
                symbol,
                bid_price,
                bid_qty,
                ask_price,
                ask_qty,
            } => Record::Quote(QuoteRecord {
                timestamp,
                symbol,
                bid_price,
                bid_qty,
                ask_price,
                ask_qty,
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventSampler {
    catalog: SymbolCatalog,
    quote_probability: f64,
}

impl EventSampler {
    pub fn new(catalog: SymbolCatalog) -> Self {
        EventSampler {
            catalog,
            quote_probability: DEFAULT_QUOTE_PROBABILITY,
        }
    }

    pub fn with_quote_probability(mut self, p: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(FeedError::InvalidConfig(format!(
                "quote probability {} outside [0, 1]",
                p
            )));
        }
        self.quote_probability = p;
        Ok(self)
    }

    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    pub fn quote_probability(&self) -> f64 {
        self.quote_probability
    }

    /// Draw order: kind, symbol, then fields in wire order
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Event {
        let is_quote = rng.next_uniform_float() < self.quote_probability;
        let (symbol, base) = self.catalog.pick_uniform(rng);

        if is_quote {
            let bid_price = base + rng.next_int(BID_JITTER.0, BID_JITTER.1);
            let bid_qty = lots(rng, QUOTE_LOTS);
            let ask_price = base + rng.next_int(ASK_JITTER.0, ASK_JITTER.1);
            let ask_qty = lots(rng, QUOTE_LOTS);
            Event::Quote {
                symbol,
                bid_price,
                bid_qty,
                ask_price,
                ask_qty,
            }
        } else {
            let price = base + rng.next_int(TRADE_JITTER.0, TRADE_JITTER.1);
            let quantity = lots(rng, TRADE_LOTS);
            Event::Trade { symbol, price, quantity }
        }
    }
}

impl Default for EventSampler {
    fn default() -> Self {
        Self::new(SymbolCatalog::default())
    }
}

fn lots<R: RandomSource + ?Sized>(rng: &mut R, range: (i64, i64)) -> u32 {
    rng.next_int(range.0, range.1) as u32 * LOT_SIZE
}
