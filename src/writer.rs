/// Feed writer
///
/// Single forward pass: header first, then one stamped, sampled, encoded
/// record per iteration. I/O errors abort the run on the spot and leave the
/// sink partially written.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use log::{debug, info};

use crate::catalog::SymbolCatalog;
use crate::config::GeneratorConfig;
use crate::encoder::{encode_header, encode_record};
use crate::error::Result;
use crate::protocol::MAX_RECORD_SIZE;
use crate::random::{self, RandomSource};
use crate::sampler::EventSampler;
use crate::sequencer::TimestampSequencer;
use crate::stats::FeedStats;
use crate::validator::verify_file;

const PROGRESS_INTERVAL: u64 = 1_000_000;

pub struct FeedWriter<W: Write, R: RandomSource> {
    sink: W,
    rng: R,
    sampler: EventSampler,
    sequencer: TimestampSequencer,
    trace: Option<Box<dyn Write>>,
}

impl<W: Write, R: RandomSource> FeedWriter<W, R> {
    pub fn new(sink: W, rng: R) -> Self {
        FeedWriter {
            sink,
            rng,
            sampler: EventSampler::default(),
            sequencer: TimestampSequencer::new(),
            trace: None,
        }
    }

    pub fn with_sampler(mut self, sampler: EventSampler) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn with_sequencer(mut self, sequencer: TimestampSequencer) -> Self {
        self.sequencer = sequencer;
        self
    }

    /// Print every record in human-readable form to `out`
    ///
    /// The trace bypasses the logger, so log levels never hide it. The binary
    /// sink is unaffected.
    pub fn with_trace_output<T: Write + 'static>(mut self, out: T) -> Self {
        self.trace = Some(Box::new(out));
        self
    }

    /// Write a complete file of `count` records
    pub fn write_feed(&mut self, count: u64) -> Result<FeedStats> {
        let mut stats = FeedStats::new();
        let mut buf = [0u8; MAX_RECORD_SIZE];

        self.sink.write_all(&encode_header(count))?;
        stats.record_header();

        for i in 0..count {
            let timestamp = self.sequencer.next(&mut self.rng);
            let record = self.sampler.sample(&mut self.rng).into_record(timestamp);

            let len = encode_record(&record, &mut buf)?;
            self.sink.write_all(&buf[..len])?;
            stats.record(&record, len);

            if let Some(out) = self.trace.as_mut() {
                writeln!(out, "{}", record)?;
            }
            if i > 0 && i % PROGRESS_INTERVAL == 0 {
                debug!("Generated {} records", i);
            }
        }

        self.sink.flush()?;
        if let Some(out) = self.trace.as_mut() {
            out.flush()?;
        }
        stats.finish();
        Ok(stats)
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Generate the file described by `config`
///
/// The output directory is checked before anything is created. With
/// `config.trace` set, each record is printed to stdout.
pub fn generate_file(config: &GeneratorConfig) -> Result<FeedStats> {
    generate_file_with_trace(config, io::stdout())
}

/// Like `generate_file`, but a trace (if enabled) goes to `trace_out`
pub fn generate_file_with_trace<T: Write + 'static>(
    config: &GeneratorConfig,
    trace_out: T,
) -> Result<FeedStats> {
    config.validate()?;

    let sampler =
        EventSampler::new(SymbolCatalog::default()).with_quote_probability(config.quote_probability)?;
    let rng = match config.seed {
        Some(seed) => random::seeded(seed),
        None => random::from_entropy(),
    };

    info!(
        "Generating {} records to {} (quote probability {})",
        config.message_count,
        config.output.display(),
        sampler.quote_probability()
    );

    let file = File::create(&config.output)?;
    let mut writer = FeedWriter::new(BufWriter::new(file), rng).with_sampler(sampler);
    if config.trace {
        writer = writer.with_trace_output(trace_out);
    }

    writer.write_feed(config.message_count)
}

/// Generate the file and, when `verify` is set, re-read and check it
///
/// Any error here maps to a non-zero exit in the binary.
pub fn run(config: &GeneratorConfig, verify: bool) -> Result<FeedStats> {
    let stats = generate_file(config)?;
    stats.log_summary();

    if verify {
        let report = verify_file(&config.output, &SymbolCatalog::default())?;
        info!("Verified {} records", report.message_count);
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Accepts `limit` bytes, then fails like a full disk
    struct FullDisk {
        written: usize,
        limit: usize,
    }

    impl Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written >= self.limit {
                return Err(io::Error::new(io::ErrorKind::Other, "no space left on device"));
            }
            let n = buf.len().min(self.limit - self.written);
            self.written += n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_zero_records_is_header_only() {
        let mut writer = FeedWriter::new(Vec::new(), seeded(1));
        let stats = writer.write_feed(0).unwrap();
        assert_eq!(stats.total_messages(), 0);
        assert_eq!(writer.into_inner(), vec![0u8; 8]);
    }

    #[test]
    fn test_stats_match_output() {
        let mut writer = FeedWriter::new(Vec::new(), seeded(17));
        let stats = writer.write_feed(500).unwrap();
        let bytes = writer.into_inner();
        assert_eq!(stats.total_messages(), 500);
        assert_eq!(stats.total_bytes(), bytes.len() as u64);
        assert_eq!(
            bytes.len() as u64,
            8 + stats.trade_count() * 36 + stats.quote_count() * 48
        );
        assert_eq!(stats.first_timestamp(), Some(1_000_000));
    }

    #[test]
    fn test_write_failure_propagates() {
        let sink = FullDisk { written: 0, limit: 100 };
        let mut writer = FeedWriter::new(sink, seeded(3));
        let err = writer.write_feed(1_000).unwrap_err();
        assert!(matches!(err, crate::FeedError::Io(_)));
        assert_eq!(writer.into_inner().written, 100);
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_trace_lines_are_verbatim() {
        let out = SharedBuf::default();
        let mut writer = FeedWriter::new(Vec::new(), seeded(1)).with_trace_output(out.clone());
        writer.write_feed(3).unwrap();

        let feed = crate::Decoder::decode_feed(&writer.into_inner()).unwrap();
        let expected: String = feed.records.iter().map(|r| format!("{}\n", r)).collect();
        let traced = String::from_utf8(out.0.borrow().clone()).unwrap();
        assert_eq!(traced, expected);
        assert!(traced.starts_with("TRADE -> ") || traced.starts_with("QUOTE -> "));
    }

    #[test]
    fn test_debug_env_traces_despite_log_level() {
        log::set_max_level(log::LevelFilter::Warn);
        let dir = tempfile::tempdir().unwrap();
        let mut config = GeneratorConfig::from_lookup(|key: &str| match key {
            "DEBUG" => Some("true".to_string()),
            "FEED_SEED" => Some("1".to_string()),
            "FEED_MESSAGE_COUNT" => Some("2".to_string()),
            _ => None,
        })
        .unwrap();
        config.output = dir.path().join("f.bin");

        let out = SharedBuf::default();
        generate_file_with_trace(&config, out.clone()).unwrap();

        let traced = String::from_utf8(out.0.borrow().clone()).unwrap();
        assert_eq!(traced.lines().count(), 2);
        assert!(traced.lines().next().unwrap().ends_with("timestamp: 1000000"));
    }

    #[test]
    fn test_no_trace_without_debug() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            output: dir.path().join("f.bin"),
            message_count: 5,
            seed: Some(1),
            ..GeneratorConfig::default()
        };
        let out = SharedBuf::default();
        generate_file_with_trace(&config, out.clone()).unwrap();
        assert!(out.0.borrow().is_empty());
    }

    #[test]
    fn test_run_missing_dir_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("build");
        let config = GeneratorConfig {
            output: missing.join("market_feed.bin"),
            message_count: 10,
            ..GeneratorConfig::default()
        };
        assert!(matches!(run(&config, true), Err(crate::FeedError::MissingOutputDir(_))));
        assert!(!missing.exists());
    }

    #[test]
    fn test_run_with_verify() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            output: dir.path().join("market_feed.bin"),
            message_count: 1_000,
            seed: Some(9),
            ..GeneratorConfig::default()
        };
        let stats = run(&config, true).unwrap();
        assert_eq!(stats.total_messages(), 1_000);
    }

    #[test]
    fn test_trace_does_not_change_bytes() {
        let mut plain = FeedWriter::new(Vec::new(), seeded(5));
        plain.write_feed(50).unwrap();
        let mut traced = FeedWriter::new(Vec::new(), seeded(5)).with_trace_output(io::sink());
        traced.write_feed(50).unwrap();
        assert_eq!(plain.into_inner(), traced.into_inner());
    }
}
