/// Record encoder
///
/// Serializes records into the exact little-endian layout described in
/// `protocol`. Field values are written as-is; nothing is range-checked.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{FeedError, Result};
use crate::protocol::*;

pub fn encode_header(message_count: u64) -> [u8; FILE_HEADER_SIZE] {
    let mut buf = [0u8; FILE_HEADER_SIZE];
    LittleEndian::write_u64(&mut buf, message_count);
    buf
}

/// Encode one record into the front of `buf`, returning the bytes written
pub fn encode_record(record: &Record, buf: &mut [u8]) -> Result<usize> {
    let len = record.encoded_len();
    if buf.len() < len {
        return Err(FeedError::BufferTooSmall {
            need: len,
            have: buf.len(),
        });
    }
    write_fields(record, &mut buf[..len]);
    Ok(len)
}

pub fn encode_to_vec(record: &Record) -> Vec<u8> {
    let mut buf = vec![0u8; record.encoded_len()];
    write_fields(record, &mut buf);
    buf
}

// `out` is exactly `record.encoded_len()` bytes
fn write_fields(record: &Record, out: &mut [u8]) {
    out[TYPE_OFFSET] = record.message_type() as u8;
    LittleEndian::write_u64(&mut out[TIMESTAMP_OFFSET..SYMBOL_OFFSET], record.timestamp());
    out[SYMBOL_OFFSET..BODY_OFFSET].copy_from_slice(record.symbol().as_bytes());

    match record {
        Record::Trade(t) => {
            LittleEndian::write_i64(&mut out[TRADE_PRICE_OFFSET..TRADE_QTY_OFFSET], t.price);
            LittleEndian::write_u32(&mut out[TRADE_QTY_OFFSET..TRADE_PADDING_OFFSET], t.quantity);
            out[TRADE_PADDING_OFFSET..].fill(0);
        }
        Record::Quote(q) => {
            LittleEndian::write_i64(&mut out[QUOTE_BID_PRICE_OFFSET..QUOTE_BID_QTY_OFFSET], q.bid_price);
            LittleEndian::write_u32(&mut out[QUOTE_BID_QTY_OFFSET..QUOTE_ASK_PRICE_OFFSET], q.bid_qty);
            LittleEndian::write_i64(&mut out[QUOTE_ASK_PRICE_OFFSET..QUOTE_ASK_QTY_OFFSET], q.ask_price);
            LittleEndian::write_u32(&mut out[QUOTE_ASK_QTY_OFFSET..QUOTE_PADDING_OFFSET], q.ask_qty);
            out[QUOTE_PADDING_OFFSET..].fill(0);
        }
    }
}
