//! LLTQ Planner Engine
//!
//! Deterministic core of the weekly life-sim planner: an immutable world state
//! (mood, resources, wardrobe, skills, flags), the weekly transition driver,
//! and a progress cache that recomputes only the weeks an edit invalidated.
//! No UI, I/O or platform dependencies live here.

pub mod choices;
pub mod config;
pub mod constants;
pub mod content;
pub mod driver;
pub mod error;
pub mod flags;
pub mod mood;
pub mod numbers;
pub mod plan_gen;
pub mod progress;
pub mod resources;
pub mod skills;
pub mod state;
pub mod wardrobe;

// Re-export commonly used types
pub use choices::{ChoiceLog, SlotKey, SlotSpec, WeekChoices, validate_week_choices};
pub use config::{ConfigError, DrainCfg, SimulationConfig, SkipTriggerCfg};
pub use content::weekend::run_weekend_route;
pub use content::{
    Activity, ContentPack, Page, PrologueContent, WeekPage, WeekendRoute, available_weekend,
};
pub use driver::{WeekOutcome, WeeklyDriver};
pub use error::EngineError;
pub use flags::FlagSet;
pub use mood::{Mood, MoodCode, MoodDelta, MoodError, MoodTerm};
pub use plan_gen::generate_plan;
pub use progress::{EntryStatus, ProgressCache, ProgressEntry, SweepReport};
pub use resources::{Resource, Resources};
pub use skills::{Skill, SkillGroup, Skills, TrainingStep};
pub use state::WorldState;
pub use wardrobe::{Outfit, Wardrobe};
