/// Wire format conformance and decoder tests

use byteorder::{ByteOrder, LittleEndian};
use feed_synth::{
    encode_header, encode_to_vec, DecodeError, Decoder, MessageType, QuoteRecord, Record, Symbol,
    TradeRecord,
};

fn trade(ts: u64, ticker: &str, price: i64, quantity: u32) -> Record {
    Record::Trade(TradeRecord {
        timestamp: ts,
        symbol: Symbol::new(ticker).unwrap(),
        price,
        quantity,
    })
}

fn quote(ts: u64, ticker: &str, bid: i64, bid_qty: u32, ask: i64, ask_qty: u32) -> Record {
    Record::Quote(QuoteRecord {
        timestamp: ts,
        symbol: Symbol::new(ticker).unwrap(),
        bid_price: bid,
        bid_qty,
        ask_price: ask,
        ask_qty,
    })
}

fn build_file(records: &[Record], declared: u64) -> Vec<u8> {
    let mut buf = encode_header(declared).to_vec();
    for r in records {
        buf.extend_from_slice(&encode_to_vec(r));
    }
    buf
}

#[test]
fn test_round_trip_trade() {
    let rec = trade(1_234_567, "AAPL", 15_049, 900);
    let bytes = encode_to_vec(&rec);
    let (decoded, consumed) = Decoder::decode(&bytes).unwrap();
    assert_eq!(consumed, 36);
    assert_eq!(decoded, rec);
}

#[test]
fn test_round_trip_quote_extreme_values() {
    let rec = quote(u64::MAX, "ABCDEFGHIJKL", i64::MIN, u32::MAX, i64::MAX, 0);
    let bytes = encode_to_vec(&rec);
    let (decoded, consumed) = Decoder::decode(&bytes).unwrap();
    assert_eq!(consumed, 48);
    assert_eq!(decoded, rec);
}

#[test]
fn test_decode_hand_built_quote() {
    let mut msg = vec![0u8; 48];
    msg[0] = 2;
    LittleEndian::write_u64(&mut msg[1..9], 1_000_000);
    msg[9..13].copy_from_slice(b"AMZN");
    LittleEndian::write_u64(&mut msg[21..29], 16_950);
    LittleEndian::write_u32(&mut msg[29..33], 800);
    LittleEndian::write_u64(&mut msg[33..41], 17_020);
    LittleEndian::write_u32(&mut msg[41..45], 1_500);

    let (decoded, _) = Decoder::decode(&msg).unwrap();
    assert_eq!(decoded, quote(1_000_000, "AMZN", 16_950, 800, 17_020, 1_500));
}

#[test]
fn test_discriminant_drives_length() {
    let records = [
        trade(1, "AAPL", 1, 100),
        quote(2, "MSFT", 1, 100, 2, 100),
        quote(3, "GOOGL", 1, 100, 2, 100),
        trade(4, "AMZN", 1, 100),
    ];
    let body: Vec<u8> = records.iter().flat_map(encode_to_vec).collect();
    assert_eq!(body.len(), 36 + 48 + 48 + 36);

    let mut kinds = Vec::new();
    let count = Decoder::decode_stream(&body, |r| {
        kinds.push(r.message_type());
        true
    })
    .unwrap();

    assert_eq!(count, 4);
    assert_eq!(
        kinds,
        [MessageType::Trade, MessageType::Quote, MessageType::Quote, MessageType::Trade]
    );
}

#[test]
fn test_decode_stream_stops_on_callback_false() {
    let body: Vec<u8> = (0..5).flat_map(|i| encode_to_vec(&trade(i, "AAPL", 1, 100))).collect();
    let mut seen = 0;
    let count = Decoder::decode_stream(&body, |_| {
        seen += 1;
        seen < 2
    })
    .unwrap();
    assert_eq!(seen, 2);
    assert_eq!(count, 1);
}

#[test]
fn test_decode_feed_ok() {
    let records = vec![trade(1, "AAPL", 15_000, 100), quote(5, "MSFT", 34_990, 200, 35_010, 300)];
    let file = build_file(&records, 2);
    let feed = Decoder::decode_feed(&file).unwrap();
    assert_eq!(feed.message_count, 2);
    assert_eq!(feed.records, records);
    assert_eq!(feed.encoded_len(), file.len());
}

#[test]
fn test_decode_feed_missing_records() {
    let file = build_file(&[trade(1, "AAPL", 15_000, 100)], 3);
    let result = Decoder::decode_feed(&file);
    assert_eq!(result, Err(DecodeError::CountMismatch { declared: 3, actual: 1 }));
}

#[test]
fn test_decode_feed_trailing_bytes() {
    let file = build_file(&[trade(1, "AAPL", 15_000, 100), trade(2, "AAPL", 15_000, 100)], 1);
    let result = Decoder::decode_feed(&file);
    assert_eq!(result, Err(DecodeError::TrailingBytes(36)));
}

#[test]
fn test_decode_feed_partial_last_record() {
    let mut file = build_file(&[trade(1, "AAPL", 15_000, 100), quote(2, "AAPL", 1, 100, 2, 100)], 2);
    file.truncate(file.len() - 10);
    let result = Decoder::decode_feed(&file);
    assert!(matches!(
        result,
        Err(DecodeError::TruncatedRecord { msg_type: 2, need: 48, have: 38 })
    ));
}

#[test]
fn test_unknown_discriminant_in_feed() {
    let mut file = build_file(&[trade(1, "AAPL", 15_000, 100)], 1);
    file[8] = 3;
    assert_eq!(Decoder::decode_feed(&file), Err(DecodeError::InvalidMessageType(3)));
}

#[test]
fn test_huge_declared_count_does_not_allocate() {
    let file = encode_header(u64::MAX).to_vec();
    let result = Decoder::decode_feed(&file);
    assert_eq!(
        result,
        Err(DecodeError::CountMismatch { declared: u64::MAX, actual: 0 })
    );
}
