/// Post-generation invariant checks
///
/// Feeds decoded records through a running check: timestamps must strictly
/// increase, symbol padding must be zero, quantities must be whole lots in
/// range, and quotes must straddle the symbol's base price.

use std::fs;
use std::path::Path;

use log::warn;

use crate::catalog::SymbolCatalog;
use crate::decoder::Decoder;
use crate::error::{FeedError, Result};
use crate::protocol::Record;
use crate::sampler::{LOT_SIZE, QUOTE_LOTS, TRADE_LOTS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Record `index` did not move time forward
    NonIncreasingTimestamp { index: u64, previous: u64, current: u64 },
    DirtySymbolPadding { index: u64 },
    UnknownSymbol { index: u64, ticker: String },
    TradeLot { index: u64, quantity: u32 },
    QuoteLot { index: u64, quantity: u32 },
    /// bid above base or ask below base
    Spread { index: u64, bid: i64, base: i64, ask: i64 },
}

#[derive(Debug, Clone)]
pub struct FeedValidator {
    catalog: SymbolCatalog,
    last_timestamp: Option<u64>,
    records_checked: u64,
    violations: Vec<Violation>,
}

impl FeedValidator {
    pub fn new(catalog: SymbolCatalog) -> Self {
        FeedValidator {
            catalog,
            last_timestamp: None,
            records_checked: 0,
            violations: Vec::new(),
        }
    }

    /// Check one record against the running state
    pub fn process(&mut self, record: &Record) {
        let index = self.records_checked;
        let ts = record.timestamp();

        if let Some(previous) = self.last_timestamp {
            if ts <= previous {
                self.violations.push(Violation::NonIncreasingTimestamp {
                    index,
                    previous,
                    current: ts,
                });
            }
        }
        self.last_timestamp = Some(ts);

        let symbol = record.symbol();
        if !symbol.padding_is_zero() {
            self.violations.push(Violation::DirtySymbolPadding { index });
        }

        let base = self.catalog.base_price_of(symbol);
        if base.is_none() {
            self.violations.push(Violation::UnknownSymbol {
                index,
                ticker: symbol.to_string(),
            });
        }

        match record {
            Record::Trade(t) => {
                if !is_lot(t.quantity, TRADE_LOTS) {
                    self.violations.push(Violation::TradeLot {
                        index,
                        quantity: t.quantity,
                    });
                }
            }
            Record::Quote(q) => {
                for quantity in [q.bid_qty, q.ask_qty] {
                    if !is_lot(quantity, QUOTE_LOTS) {
                        self.violations.push(Violation::QuoteLot { index, quantity });
                    }
                }
                if let Some(base) = base {
                    if q.bid_price > base || q.ask_price < base {
                        self.violations.push(Violation::Spread {
                            index,
                            bid: q.bid_price,
                            base,
                            ask: q.ask_price,
                        });
                    }
                }
            }
        }

        self.records_checked += 1;
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn records_checked(&self) -> u64 {
        self.records_checked
    }

    pub fn reset(&mut self) {
        self.last_timestamp = None;
        self.records_checked = 0;
        self.violations.clear();
    }
}

fn is_lot(quantity: u32, lots: (i64, i64)) -> bool {
    let lo = lots.0 as u32 * LOT_SIZE;
    let hi = lots.1 as u32 * LOT_SIZE;
    quantity % LOT_SIZE == 0 && (lo..=hi).contains(&quantity)
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub message_count: u64,
    pub trades: u64,
    pub quotes: u64,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Decode a complete file and run every record through `FeedValidator`
pub fn validate_feed(buffer: &[u8], catalog: &SymbolCatalog) -> Result<ValidationReport> {
    let feed = Decoder::decode_feed(buffer)?;
    let mut validator = FeedValidator::new(catalog.clone());
    let mut trades = 0;

    for record in &feed.records {
        validator.process(record);
        if let Record::Trade(_) = record {
            trades += 1;
        }
    }

    for v in validator.violations() {
        warn!("feed violation: {:?}", v);
    }

    Ok(ValidationReport {
        message_count: feed.message_count,
        trades,
        quotes: feed.message_count - trades,
        violations: validator.violations,
    })
}

/// Read a generated file back and fail with `FeedError::Violations` if any
/// record breaks an invariant
pub fn verify_file(path: &Path, catalog: &SymbolCatalog) -> Result<ValidationReport> {
    let bytes = fs::read(path)?;
    let report = validate_feed(&bytes, catalog)?;
    if !report.is_clean() {
        return Err(FeedError::Violations(report.violations.len()));
    }
    Ok(report)
}
