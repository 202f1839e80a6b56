//! Error types shared across the simulation core.
use thiserror::Error;

use crate::choices::SlotKey;
use crate::config::ConfigError;
use crate::mood::MoodError;

/// Errors raised by the engine. Every variant points at an authoring or
/// integration defect; normal play never produces one.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    #[error("unknown skill `{0}`")]
    UnknownSkill(String),
    #[error("unknown outfit `{0}`")]
    UnknownOutfit(String),
    #[error("unknown resource `{0}`")]
    UnknownResource(String),
    #[error("unknown weekend activity `{0}`")]
    UnknownActivity(String),
    #[error("unknown mood code `{0}`")]
    UnknownMoodCode(String),
    #[error("invalid choice slot `{0}`")]
    InvalidSlot(String),
    #[error("skill vector must hold {expected} values (got {found})")]
    SkillVectorLength { expected: usize, found: usize },
    #[error("skill `{skill}` holds {value}, outside 0..={max}")]
    SkillOutOfRange { skill: String, value: f64, max: f64 },
    #[error("week {week} is outside 1..={max}")]
    WeekOutOfRange { week: u8, max: u8 },
    #[error("week {week} has no choice slot `{slot}`")]
    UnknownSlot { week: u8, slot: SlotKey },
    #[error("week {week} slot `{slot}` offers options 1..={options} (got {option})")]
    OptionOutOfRange {
        week: u8,
        slot: SlotKey,
        options: u8,
        option: u8,
    },
    #[error("no weekend script for {activity} (variant week {variant})")]
    MissingWeekendScript { activity: String, variant: u8 },
    #[error("invalid simulation config: {0}")]
    Config(String),
    #[error(transparent)]
    Mood(#[from] MoodError),
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
