//! Built-in demo pack: the opening weeks of the story.
//!
//! Weeks 1-5 carry scripted events, weeks 1-3 carry character weekends, and
//! the rest of the calendar is quiet so training and the generic weekend
//! catalogue carry the simulation.
use super::{Activity, ContentPack, Page};
use crate::choices::{SlotSpec, WeekChoices};
use crate::error::EngineError;
use crate::mood::MoodCode;
use crate::resources::Resource;
use crate::skills::Skill;
use crate::state::WorldState;

const OPENING_MOOD: &str = "2F4D";
const OPENING_GOLD: f64 = 10_000.0;
const OPENING_SOLDIERS: f64 = 12_000.0;

const FLAG_ASSISTANT: &str = "Assistant";
const FLAG_CAUTION: &str = "Caution";
const FLAG_DUNGEONESS: &str = "Dungeoness";
const FLAG_FINERY: &str = "Finery";
const FLAG_HEARTLESS: &str = "Heartless";
const FLAG_INHERITANCE: &str = "Inheritance";
const FLAG_INTRANSIGENCE: &str = "Intransigence";
const FLAG_KIN: &str = "Kin";
const FLAG_LOVE: &str = "Love";
const FLAG_MENTOR: &str = "Mentor";
const FLAG_PLAYDATE: &str = "Playdate";
const FLAG_PROTECTOR: &str = "Protector";
const FLAG_TRUST: &str = "Trust";

#[derive(Debug, Clone, Copy, Default)]
pub struct PrologueContent;

impl PrologueContent {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn prompt(page: &mut Page, slot: &str, options: &[&str]) {
    let listed: Vec<String> = options
        .iter()
        .enumerate()
        .map(|(idx, option)| format!("{}. {option}", idx + 1))
        .collect();
    page.line(format!("[{slot}] {}", listed.join(" / ")));
}

fn mood(state: &WorldState, delta: &str, page: &mut Page) -> Result<WorldState, EngineError> {
    page.line(delta);
    state.apply_mood(delta)
}

fn barracks_route(state: &WorldState) -> u8 {
    u8::from(state.skill(Skill::Strategy) >= 40.0)
}

impl ContentPack for PrologueContent {
    fn name(&self) -> &str {
        "prologue"
    }

    fn setup(&self, state: &WorldState) -> Result<WorldState, EngineError> {
        Ok(state.apply_mood(OPENING_MOOD)?.apply_resources([
            (Resource::Gold, OPENING_GOLD),
            (Resource::Soldiers, OPENING_SOLDIERS),
        ]))
    }

    fn run_week(
        &self,
        week: u8,
        state: &WorldState,
        choices: &WeekChoices,
        page: &mut Page,
    ) -> Result<WorldState, EngineError> {
        match week {
            1 => {
                page.line("Family Visit");
                mood(state, "C", page)
            }
            2 => {
                page.line("Julianna Arrives");
                prompt(page, "1", &["Send Away", "Arrest", "Let Stay"]);
                match choices.event(1) {
                    Some(1) => mood(state, "AY", page),
                    Some(2) => {
                        page.line("K");
                        Ok(mood(state, "A", page)?
                            .apply_resources([(Resource::Kills, 1.0)])
                            .add_flag(FLAG_DUNGEONESS))
                    }
                    Some(3) => Ok(mood(state, "W", page)?.add_flag(FLAG_MENTOR)),
                    _ => Ok(state.clone()),
                }
            }
            3 => {
                page.line("Hidden Danger");
                if state.has_flag(FLAG_MENTOR) {
                    let state = state.add_flag(FLAG_PROTECTOR);
                    prompt(page, "1", &["Stay Still", "Look Down"]);
                    // Staying still needs the nerve for it.
                    let pick = match choices.event(1) {
                        Some(1) if state.skill(Skill::Composure) < 10.0 => Some(2),
                        other => other,
                    };
                    match pick {
                        Some(2) => mood(&state, "F", page),
                        _ => Ok(state),
                    }
                } else if state.skill(Skill::Reflexes) >= 20.0 {
                    mood(state, "A", page)
                } else {
                    Ok(mood(state, "F", page)?.add_flag(FLAG_KIN))
                }
            }
            5 => {
                page.line("An Unexpected Gift");
                let mut state = state.clone();
                if state.skill(Skill::ForeignIntelligence) < 10.0
                    && state.skill(Skill::ForeignAffairs) < 40.0
                {
                    page.line("Ca -3");
                    state = state.apply_resources([(Resource::CommonerApproval, -3.0)]);
                }
                if state.skill(Skill::CourtManners) >= 10.0 {
                    prompt(page, "1", &["Wear", "Wait"]);
                    match choices.event(1) {
                        Some(1) => Ok(mood(&state, "W", page)?.add_flag(FLAG_FINERY)),
                        Some(2) => mood(&state, "Y", page),
                        _ => Ok(state),
                    }
                } else {
                    Ok(mood(&state, "C", page)?.add_flag(FLAG_FINERY))
                }
            }
            _ => {
                page.line("A Quiet Day");
                Ok(state.clone())
            }
        }
    }

    fn slots(&self, week: u8) -> Vec<SlotSpec> {
        match week {
            2 => vec![
                SlotSpec::event(1, 3),
                SlotSpec::weekend('a', 2),
                SlotSpec::weekend('b', 2),
            ],
            3 => vec![
                SlotSpec::event(1, 2),
                SlotSpec::weekend('a', 2),
                SlotSpec::weekend('b', 2),
            ],
            5 => vec![SlotSpec::event(1, 2)],
            _ => Vec::new(),
        }
    }

    fn weekend_route(&self, week: u8, activity: Activity, state: &WorldState) -> Option<u8> {
        match (week, activity) {
            (1, Activity::Charlotte | Activity::Father | Activity::Dungeons) => Some(1),
            (1..=3, Activity::Barracks) => Some(barracks_route(state)),
            (2, Activity::Charlotte) => Some(if state.has_flag(FLAG_PLAYDATE) { 2 } else { 1 }),
            (2, Activity::Father) => Some(2),
            (2, Activity::Julianna) => Some(if state.has_flag(FLAG_MENTOR) { 2 } else { 0 }),
            (2, Activity::Dungeons) => Some(if state.has_flag(FLAG_DUNGEONESS) { 2 } else { 1 }),
            (3, Activity::Father) => Some(
                if state.has_flag(FLAG_INHERITANCE) || state.has_flag(FLAG_HEARTLESS) {
                    3
                } else {
                    2
                },
            ),
            (3, Activity::Julianna) => Some(if !state.has_flag(FLAG_MENTOR) {
                0
            } else if state.has_flag(FLAG_INHERITANCE) {
                3
            } else {
                2
            }),
            (3, Activity::Dungeons) => Some(
                if state.has_flag(FLAG_DUNGEONESS)
                    && state.has_no_flags(&[FLAG_CAUTION, "Amnesty", "Ambition"])
                {
                    2
                } else {
                    1
                },
            ),
            _ => None,
        }
    }

    fn run_weekend(
        &self,
        variant: u8,
        activity: Activity,
        state: &WorldState,
        choices: &WeekChoices,
        page: &mut Page,
    ) -> Result<WorldState, EngineError> {
        match (variant, activity) {
            (1, Activity::Charlotte) => Ok(mood(state, "C", page)?.add_flag(FLAG_PLAYDATE)),
            (1, Activity::Father) => mood(state, "L", page),
            (1, Activity::Barracks) => match state.mood_axis(MoodCode::Willful) {
                w if w > 0 => mood(state, "-WP", page),
                w if w < 0 => mood(state, "-YP", page),
                _ => mood(state, "P", page),
            },
            (1, Activity::Dungeons) => {
                let willful = state.mood_axis(MoodCode::Willful);
                if state.resource(Resource::Kills) >= 5.0 {
                    let state = state.apply_resources([(Resource::Kills, 0.5)]);
                    mood(&state, "AC", page)
                } else if willful > 0 {
                    mood(state, "AW", page)
                } else if willful < 0 {
                    mood(state, "FY", page)
                } else {
                    Ok(state.clone())
                }
            }
            (2, Activity::Charlotte) => Ok(state.clone()),
            (2, Activity::Father) => Ok(state.add_flag(FLAG_HEARTLESS)),
            (2, Activity::Julianna) => Ok(state.add_flag(FLAG_INHERITANCE)),
            (2, Activity::Dungeons) => {
                let state = state.add_flag(FLAG_CAUTION);
                prompt(page, "a", &["Listen", "Ignore"]);
                match choices.weekend_pick('a') {
                    Some(1) => {
                        prompt(page, "b", &["Free", "Refuse"]);
                        match choices.weekend_pick('b') {
                            Some(1) => Ok(mood(&state, "P", page)?.add_flag(FLAG_MENTOR)),
                            Some(2) => mood(&state, "AW", page),
                            _ => Ok(state),
                        }
                    }
                    Some(2) => mood(&state, "F", page),
                    _ => Ok(state),
                }
            }
            (3, Activity::Father) => {
                if state.has_flag(FLAG_INHERITANCE) || state.has_flag(FLAG_ASSISTANT) {
                    Ok(mood(state, "W", page)?.add_flag(FLAG_INTRANSIGENCE))
                } else {
                    Ok(mood(state, "CY", page)?.add_flag(FLAG_LOVE))
                }
            }
            (3, Activity::Julianna) => Ok(state.add_flag(FLAG_TRUST)),
            _ => Err(EngineError::MissingWeekendScript {
                activity: activity.key().to_string(),
                variant,
            }),
        }
    }
}
