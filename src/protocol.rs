/// Binary layout of the synthetic market-data file
///
/// File header: 8 bytes
///   - message_count: u64 (little-endian)
///
/// Records follow back to back with no length prefix. The leading byte is the
/// discriminant and fixes the record length:
///   - Trade (1): 36 bytes
///   - Quote (2): 48 bytes

use std::borrow::Cow;
use std::fmt;

use crate::error::{FeedError, Result};

pub const FILE_HEADER_SIZE: usize = 8;
pub const SYMBOL_WIDTH: usize = 12;
pub const RECORD_PADDING: usize = 3;
pub const TRADE_RECORD_SIZE: usize = 36;
pub const QUOTE_RECORD_SIZE: usize = 48;
pub const MAX_RECORD_SIZE: usize = QUOTE_RECORD_SIZE;

/// First timestamp of every generated file
pub const EPOCH_TIMESTAMP: u64 = 1_000_000;

// Shared prefix: [type(1)][timestamp(8)][symbol(12)]
pub const TYPE_OFFSET: usize = 0;
pub const TIMESTAMP_OFFSET: usize = 1;
pub const SYMBOL_OFFSET: usize = 9;
pub const BODY_OFFSET: usize = SYMBOL_OFFSET + SYMBOL_WIDTH;

// Trade body: [price(8)][quantity(4)][padding(3)]
pub const TRADE_PRICE_OFFSET: usize = BODY_OFFSET;
pub const TRADE_QTY_OFFSET: usize = TRADE_PRICE_OFFSET + 8;
pub const TRADE_PADDING_OFFSET: usize = TRADE_QTY_OFFSET + 4;

// Quote body: [bid_price(8)][bid_qty(4)][ask_price(8)][ask_qty(4)][padding(3)]
pub const QUOTE_BID_PRICE_OFFSET: usize = BODY_OFFSET;
pub const QUOTE_BID_QTY_OFFSET: usize = QUOTE_BID_PRICE_OFFSET + 8;
pub const QUOTE_ASK_PRICE_OFFSET: usize = QUOTE_BID_QTY_OFFSET + 4;
pub const QUOTE_ASK_QTY_OFFSET: usize = QUOTE_ASK_PRICE_OFFSET + 8;
pub const QUOTE_PADDING_OFFSET: usize = QUOTE_ASK_QTY_OFFSET + 4;

// Compile-time assertions for record layout
const _: () = {
    assert!(BODY_OFFSET == 21);
    assert!(TRADE_PADDING_OFFSET + RECORD_PADDING == TRADE_RECORD_SIZE);
    assert!(QUOTE_PADDING_OFFSET + RECORD_PADDING == QUOTE_RECORD_SIZE);
    assert!(TRADE_RECORD_SIZE <= MAX_RECORD_SIZE);
};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Trade = 1,
    Quote = 2,
}

impl MessageType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(MessageType::Trade),
            2 => Some(MessageType::Quote),
            _ => None,
        }
    }

    /// Total encoded length of a record with this discriminant
    pub fn record_len(self) -> usize {
        match self {
            MessageType::Trade => TRADE_RECORD_SIZE,
            MessageType::Quote => QUOTE_RECORD_SIZE,
        }
    }
}

/// Ticker stored as a fixed-width, zero-padded 12-byte field
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol([u8; SYMBOL_WIDTH]);

impl Symbol {
    pub fn new(ticker: &str) -> Result<Self> {
        let raw = ticker.as_bytes();
        if raw.is_empty() || raw.len() > SYMBOL_WIDTH || !ticker.is_ascii() || raw.contains(&0) {
            return Err(FeedError::InvalidSymbol(ticker.to_string()));
        }

        let mut bytes = [0u8; SYMBOL_WIDTH];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Symbol(bytes))
    }

    /// Compile-time constructor for fixed tickers
    ///
    /// Evaluated in a const context, an empty, oversized or non-ASCII ticker
    /// fails the build.
    pub const fn from_static(ticker: &'static str) -> Self {
        let raw = ticker.as_bytes();
        assert!(!raw.is_empty() && raw.len() <= SYMBOL_WIDTH);

        let mut bytes = [0u8; SYMBOL_WIDTH];
        let mut i = 0;
        while i < raw.len() {
            assert!(raw[i].is_ascii() && raw[i] != 0);
            bytes[i] = raw[i];
            i += 1;
        }
        Symbol(bytes)
    }

    /// Wrap raw wire bytes as-is; padding is not checked here
    pub fn from_bytes(bytes: [u8; SYMBOL_WIDTH]) -> Self {
        Symbol(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SYMBOL_WIDTH] {
        &self.0
    }

    /// Length of the ticker, i.e. bytes before the first zero
    pub fn ticker_len(&self) -> usize {
        self.0.iter().position(|&b| b == 0).unwrap_or(SYMBOL_WIDTH)
    }

    pub fn ticker(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0[..self.ticker_len()])
    }

    /// True when every byte after the ticker is 0x00
    pub fn padding_is_zero(&self) -> bool {
        self.0[self.ticker_len()..].iter().all(|&b| b == 0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ticker())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.ticker())
    }
}

/// Trade print: 36 bytes on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeRecord {
    pub timestamp: u64,
    pub symbol: Symbol,
    pub price: i64,    // price-cents
    pub quantity: u32, // lot-rounded
}

/// Two-sided quote: 48 bytes on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteRecord {
    pub timestamp: u64,
    pub symbol: Symbol,
    pub bid_price: i64,
    pub bid_qty: u32,
    pub ask_price: i64,
    pub ask_qty: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Trade(TradeRecord),
    Quote(QuoteRecord),
}

impl Record {
    pub fn timestamp(&self) -> u64 {
        match self {
            Record::Trade(t) => t.timestamp,
            Record::Quote(q) => q.timestamp,
        }
    }

    pub fn symbol(&self) -> &Symbol {
        match self {
            Record::Trade(t) => &t.symbol,
            Record::Quote(q) => &q.symbol,
        }
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            Record::Trade(_) => MessageType::Trade,
            Record::Quote(_) => MessageType::Quote,
        }
    }

    pub fn encoded_len(&self) -> usize {
        self.message_type().record_len()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Trade(t) => write!(
                f,
                "TRADE -> symbol: {}, price: {}, qty: {}, timestamp: {}",
                t.symbol, t.price, t.quantity, t.timestamp
            ),
            Record::Quote(q) => write!(
                f,
                "QUOTE -> symbol: {}, bid price: {}, bid qty: {}, ask price: {}, ask qty: {}, timestamp: {}",
                q.symbol, q.bid_price, q.bid_qty, q.ask_price, q.ask_qty, q.timestamp
            ),
        }
    }
}

/// A fully decoded file: declared count plus the records that followed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedFile {
    pub message_count: u64,
    pub records: Vec<Record>,
}

impl FeedFile {
    /// Size in bytes this file occupies on disk
    pub fn encoded_len(&self) -> usize {
        FILE_HEADER_SIZE + self.records.iter().map(Record::encoded_len).sum::<usize>()
    }
}
