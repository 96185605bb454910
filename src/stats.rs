/// Generation statistics
///
/// Tracks record mix, bytes written, timestamp span and throughput for a run.

use std::time::{Duration, Instant};

use log::info;

use crate::protocol::{Record, FILE_HEADER_SIZE};

#[derive(Debug, Clone)]
pub struct FeedStats {
    start_time: Option<Instant>,
    finish_time: Option<Instant>,
    trades: u64,
    quotes: u64,
    total_bytes: u64,
    first_timestamp: Option<u64>,
    last_timestamp: Option<u64>,
}

impl FeedStats {
    pub fn new() -> Self {
        FeedStats {
            start_time: None,
            finish_time: None,
            trades: 0,
            quotes: 0,
            total_bytes: 0,
            first_timestamp: None,
            last_timestamp: None,
        }
    }

    fn mark_start(&mut self) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
    }

    /// Record the file header being written
    pub fn record_header(&mut self) {
        self.mark_start();
        self.total_bytes += FILE_HEADER_SIZE as u64;
    }

    /// Record one encoded record of `size` bytes
    pub fn record(&mut self, record: &Record, size: usize) {
        self.mark_start();
        match record {
            Record::Trade(_) => self.trades += 1,
            Record::Quote(_) => self.quotes += 1,
        }
        self.total_bytes += size as u64;

        let ts = record.timestamp();
        if self.first_timestamp.is_none() {
            self.first_timestamp = Some(ts);
        }
        self.last_timestamp = Some(ts);
    }

    /// Freeze the elapsed time
    pub fn finish(&mut self) {
        self.finish_time = Some(Instant::now());
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time
            .map(|st| self.finish_time.unwrap_or_else(Instant::now).duration_since(st))
    }

    fn per_sec(&self, n: u64) -> f64 {
        match self.elapsed() {
            Some(d) if d.as_secs_f64() > 0.0 => n as f64 / d.as_secs_f64(),
            _ => 0.0,
        }
    }

    pub fn messages_per_sec(&self) -> f64 {
        self.per_sec(self.total_messages())
    }

    pub fn bytes_per_sec(&self) -> f64 {
        self.per_sec(self.total_bytes)
    }

    pub fn total_messages(&self) -> u64 {
        self.trades + self.quotes
    }

    pub fn trade_count(&self) -> u64 {
        self.trades
    }

    pub fn quote_count(&self) -> u64 {
        self.quotes
    }

    /// Fraction of records that were quotes
    pub fn quote_ratio(&self) -> f64 {
        let total = self.total_messages();
        if total == 0 {
            0.0
        } else {
            self.quotes as f64 / total as f64
        }
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn first_timestamp(&self) -> Option<u64> {
        self.first_timestamp
    }

    pub fn last_timestamp(&self) -> Option<u64> {
        self.last_timestamp
    }

    pub fn log_summary(&self) {
        info!("=== Feed Statistics ===");
        info!(
            "Records: {} ({} trades, {} quotes, quote ratio {:.4})",
            self.total_messages(),
            self.trades,
            self.quotes,
            self.quote_ratio()
        );
        info!("Bytes: {}", self.total_bytes);
        if let (Some(first), Some(last)) = (self.first_timestamp, self.last_timestamp) {
            info!("Timestamps: {} .. {}", first, last);
        }
        info!("Elapsed: {:?}", self.elapsed());
        info!(
            "Throughput: {:.0} msgs/sec, {:.0} bytes/sec",
            self.messages_per_sec(),
            self.bytes_per_sec()
        );
    }
}

impl Default for FeedStats {
    fn default() -> Self {
        Self::new()
    }
}
