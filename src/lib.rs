/// Feed Synth - Synthetic Market Data File Generator
///
/// Produces a binary market-data fixture for exercising feed consumers:
/// - Fixed 8-byte message-count header
/// - Discriminant-framed trade (36 byte) and quote (48 byte) records
/// - Strictly increasing timestamps from a fixed epoch
/// - Uniform price jitter around per-symbol base prices, lot-sized quantities
/// - Pluggable random source for reproducible, seeded output
/// - Reference decoder and invariant validator for checking generated files

pub mod protocol;
pub mod error;
pub mod random;
pub mod catalog;
pub mod sequencer;
pub mod sampler;
pub mod encoder;
pub mod decoder;
pub mod validator;
pub mod stats;
pub mod config;
pub mod writer;

pub use protocol::{MessageType, Symbol, TradeRecord, QuoteRecord, Record, FeedFile};
pub use error::{FeedError, Result};
pub use random::RandomSource;
pub use catalog::SymbolCatalog;
pub use sequencer::TimestampSequencer;
pub use sampler::{Event, EventSampler};
pub use encoder::{encode_header, encode_record, encode_to_vec};
pub use decoder::{Decoder, DecodeError, DecodeResult};
pub use validator::{FeedValidator, Violation, ValidationReport, validate_feed, verify_file};
pub use stats::FeedStats;
pub use config::GeneratorConfig;
pub use writer::{FeedWriter, generate_file, generate_file_with_trace, run};
