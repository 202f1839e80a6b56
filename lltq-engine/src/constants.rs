//! Centralized balance and tuning constants for the simulation core.
//!
//! These values define the deterministic math of the weekly simulation.
//! Housekeeping values that designers tune live in `SimulationConfig`;
//! everything here only changes through reviewed code.

// Calendar -----------------------------------------------------------------
pub const FINAL_WEEK: u8 = 40;

// Mood ---------------------------------------------------------------------
pub const MOOD_AXES: usize = 5;
pub const INJURY_AXIS: usize = 0;
pub const MOOD_FLOOR: i32 = -5;
pub const MOOD_CEILING: i32 = 5;

// Resources ----------------------------------------------------------------
pub const RESOURCE_COUNT: usize = 5;

// Wardrobe -----------------------------------------------------------------
pub const OUTFIT_SLOTS: usize = 14;

// Skills -------------------------------------------------------------------
pub const SKILL_COUNT: usize = 42;
pub const SKILL_MAX: f64 = 100.0;
pub const SKILL_NOVICE_CAP: f64 = 50.0;
pub const SKILL_UNLOCK_THRESHOLD: f64 = 25.0;
pub const OUTFIT_DISPLAY_BONUS: f64 = 10.0;
pub const BASE_MOOD_MODIFIER: f64 = 2.0;
pub const TRAINING_SCALE: f64 = 5.0;
pub const SUBGROUP_BONUS_RATE: f64 = 0.01;
pub const GROUP_BONUS_RATE: f64 = 0.001;
pub const PRIESTESS_SENSE_THRESHOLD: f64 = 80.0;

// Flags the core itself reads ----------------------------------------------
pub const FLAG_PRIESTESS: &str = "Priestess";
pub const FLAG_LEADERSHIP: &str = "Leadership";
pub const FLAG_LUMEN: &str = "Lumen";
pub(crate) const FLAG_TREMORS: &str = "Tremors";

// Housekeeping defaults ----------------------------------------------------
pub(crate) const WEEKLY_GOLD_DRAIN: f64 = 0.25;
pub(crate) const SKIP_TRIGGER_WEEK: u8 = 36;
