/// Generator configuration
///
/// Defaults reproduce the stock fixture: 5M records into
/// `./build/market_feed.bin` with a 70/30 quote/trade mix.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{FeedError, Result};
use crate::sampler::DEFAULT_QUOTE_PROBABILITY;

pub const DEFAULT_OUTPUT: &str = "./build/market_feed.bin";
pub const DEFAULT_MESSAGE_COUNT: u64 = 5_000_000;

pub const ENV_DEBUG: &str = "DEBUG";
pub const ENV_SEED: &str = "FEED_SEED";
pub const ENV_MESSAGE_COUNT: &str = "FEED_MESSAGE_COUNT";

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub output: PathBuf,
    pub message_count: u64,
    pub quote_probability: f64,
    /// Fixed seed for a reproducible file; entropy otherwise
    pub seed: Option<u64>,
    /// Log one human-readable line per record
    pub trace: bool,
}

impl GeneratorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` but reads variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = GeneratorConfig::default();

        config.trace = lookup(ENV_DEBUG).as_deref() == Some("true");

        if let Some(raw) = lookup(ENV_SEED) {
            config.seed = Some(parse_u64(ENV_SEED, &raw)?);
        }
        if let Some(raw) = lookup(ENV_MESSAGE_COUNT) {
            config.message_count = parse_u64(ENV_MESSAGE_COUNT, &raw)?;
        }

        Ok(config)
    }

    /// Directory the output file will be created in
    pub fn output_dir(&self) -> &Path {
        match self.output.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.quote_probability) {
            return Err(FeedError::InvalidConfig(format!(
                "quote probability {} outside [0, 1]",
                self.quote_probability
            )));
        }

        let dir = self.output_dir();
        if !dir.is_dir() {
            return Err(FeedError::MissingOutputDir(dir.to_path_buf()));
        }

        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            output: PathBuf::from(DEFAULT_OUTPUT),
            message_count: DEFAULT_MESSAGE_COUNT,
            quote_probability: DEFAULT_QUOTE_PROBABILITY,
            seed: None,
            trace: false,
        }
    }
}

fn parse_u64(key: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|e| FeedError::InvalidConfig(format!("{}={:?}: {}", key, raw, e)))
}
