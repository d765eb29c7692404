//! Command-line and environment configuration for the sidecar.

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use crate::ids::{IdGenerator, SequentialIds, UuidIds};
use crate::store::DuplicateMarkPolicy;

/// First sequential id that does not collide with the seed dataset.
const SEQUENTIAL_AFTER_SEED: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IdStrategy {
    /// Random v4 UUIDs
    Uuid,
    /// Monotonic decimal counter (deterministic)
    Sequential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DuplicateMark {
    /// Ignore a second mark for the same student, class and date
    KeepFirst,
    /// Overwrite the earlier mark's status and notes
    Replace,
}

impl From<DuplicateMark> for DuplicateMarkPolicy {
    fn from(v: DuplicateMark) -> Self {
        match v {
            DuplicateMark::KeepFirst => DuplicateMarkPolicy::KeepFirst,
            DuplicateMark::Replace => DuplicateMarkPolicy::Replace,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "edutrackd")]
#[command(version)]
#[command(about = "Student attendance tracker sidecar speaking line-delimited JSON on stdin/stdout", long_about = None)]
pub struct Config {
    /// Start with no students, classes or attendance instead of the demo dataset
    #[arg(long, env = "EDUTRACK_EMPTY")]
    pub empty: bool,

    /// Pin "today" (YYYY-MM-DD) instead of reading the local clock
    #[arg(long, env = "EDUTRACK_TODAY", value_name = "DATE", value_parser = parse_day)]
    pub today: Option<NaiveDate>,

    /// How new entity ids are generated
    #[arg(long, env = "EDUTRACK_IDS", value_enum, default_value = "uuid")]
    pub ids: IdStrategy,

    /// What marking an already-marked student does
    #[arg(long, env = "EDUTRACK_ON_DUPLICATE_MARK", value_enum, default_value = "keep-first")]
    pub on_duplicate_mark: DuplicateMark,

    /// Log filter directive, e.g. `info` or `edutrackd=debug`
    #[arg(long, env = "EDUTRACK_LOG", default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,
}

impl Config {
    pub fn id_generator(&self) -> Box<dyn IdGenerator> {
        match self.ids {
            IdStrategy::Uuid => Box::new(UuidIds),
            IdStrategy::Sequential if self.empty => Box::new(SequentialIds::new("", 1)),
            IdStrategy::Sequential => Box::new(SequentialIds::new("", SEQUENTIAL_AFTER_SEED)),
        }
    }
}

pub fn parse_day(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}
