/// Record decoder
///
/// Reads back what the encoder produced. There is no length field on the
/// wire, so the decoder branches on the discriminant byte and takes the
/// record length from `MessageType::record_len`.

use crate::protocol::*;
use byteorder::{ByteOrder, LittleEndian};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("buffer too small: need {need} bytes, have {have}")]
    BufferTooSmall { need: usize, have: usize },

    #[error("invalid message type: {0}")]
    InvalidMessageType(u8),

    #[error("truncated record: type {msg_type} needs {need} bytes, have {have}")]
    TruncatedRecord { msg_type: u8, need: usize, have: usize },

    #[error("header declares {declared} records but {actual} were found")]
    CountMismatch { declared: u64, actual: u64 },

    #[error("{0} trailing bytes after last record")]
    TrailingBytes(usize),
}

pub type DecodeResult<T> = Result<T, DecodeError>;

pub struct Decoder;

impl Decoder {
    /// Read the 8-byte message count at the start of a file
    pub fn decode_header(buffer: &[u8]) -> DecodeResult<u64> {
        if buffer.len() < FILE_HEADER_SIZE {
            return Err(DecodeError::BufferTooSmall {
                need: FILE_HEADER_SIZE,
                have: buffer.len(),
            });
        }
        Ok(LittleEndian::read_u64(&buffer[..FILE_HEADER_SIZE]))
    }

    /// Parse a single record from the front of `buffer`
    /// Returns the record and the size consumed
    pub fn decode(buffer: &[u8]) -> DecodeResult<(Record, usize)> {
        let msg_type = *buffer
            .first()
            .ok_or(DecodeError::BufferTooSmall { need: 1, have: 0 })?;

        let kind = MessageType::from_u8(msg_type).ok_or(DecodeError::InvalidMessageType(msg_type))?;

        let len = kind.record_len();
        if buffer.len() < len {
            return Err(DecodeError::TruncatedRecord {
                msg_type,
                need: len,
                have: buffer.len(),
            });
        }

        let msg = &buffer[..len];
        let timestamp = LittleEndian::read_u64(&msg[TIMESTAMP_OFFSET..SYMBOL_OFFSET]);
        let mut sym = [0u8; SYMBOL_WIDTH];
        sym.copy_from_slice(&msg[SYMBOL_OFFSET..BODY_OFFSET]);
        let symbol = Symbol::from_bytes(sym);

        let record = match kind {
            MessageType::Trade => Record::Trade(TradeRecord {
                timestamp,
                symbol,
                price: LittleEndian::read_i64(&msg[TRADE_PRICE_OFFSET..TRADE_QTY_OFFSET]),
                quantity: LittleEndian::read_u32(&msg[TRADE_QTY_OFFSET..TRADE_PADDING_OFFSET]),
            }),
            MessageType::Quote => Record::Quote(QuoteRecord {
                timestamp,
                symbol,
                bid_price: LittleEndian::read_i64(&msg[QUOTE_BID_PRICE_OFFSET..QUOTE_BID_QTY_OFFSET]),
                bid_qty: LittleEndian::read_u32(&msg[QUOTE_BID_QTY_OFFSET..QUOTE_ASK_PRICE_OFFSET]),
                ask_price: LittleEndian::read_i64(&msg[QUOTE_ASK_PRICE_OFFSET..QUOTE_ASK_QTY_OFFSET]),
                ask_qty: LittleEndian::read_u32(&msg[QUOTE_ASK_QTY_OFFSET..QUOTE_PADDING_OFFSET]),
            }),
        };

        Ok((record, len))
    }

    /// Decode back-to-back records (no file header)
    /// Calls callback for each record; stops on error or if callback returns false
    pub fn decode_stream<F>(buffer: &[u8], mut callback: F) -> DecodeResult<usize>
    where
        F: FnMut(&Record) -> bool,
    {
        let mut offset = 0;
        let mut count = 0;

        while offset < buffer.len() {
            let (record, consumed) = Self::decode(&buffer[offset..])?;
            if !callback(&record) {
                break;
            }
            offset += consumed;
            count += 1;
        }

        Ok(count)
    }

    /// Decode a whole file: header plus exactly `message_count` records
    pub fn decode_feed(buffer: &[u8]) -> DecodeResult<FeedFile> {
        let declared = Self::decode_header(buffer)?;
        let body = &buffer[FILE_HEADER_SIZE..];

        // a corrupt header must not drive the allocation
        let cap = (declared as usize).min(body.len() / TRADE_RECORD_SIZE);
        let mut records = Vec::with_capacity(cap);
        let mut offset = 0;

        while (records.len() as u64) < declared {
            if offset == body.len() {
                return Err(DecodeError::CountMismatch {
                    declared,
                    actual: records.len() as u64,
                });
            }
            let (record, consumed) = Self::decode(&body[offset..])?;
            records.push(record);
            offset += consumed;
        }

        if offset != body.len() {
            return Err(DecodeError::TrailingBytes(body.len() - offset));
        }

        Ok(FeedFile {
            message_count: declared,
            records,
        })
    }
}
