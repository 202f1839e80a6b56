//! Weekend activity catalogue and per-week routing.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::{ContentPack, Page};
use crate::choices::WeekChoices;
use crate::constants::{FLAG_PRIESTESS, PRIESTESS_SENSE_THRESHOLD};
use crate::error::EngineError;
use crate::mood::MoodCode;
use crate::resources::Resource;
use crate::skills::Skill;
use crate::state::WorldState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Activity {
    Ball,
    Barracks,
    Castle,
    Court,
    Dungeons,
    Gardens,
    Hunt,
    Service,
    Sneak,
    Sports,
    Tomb,
    Toys,
    Adair,
    Advisors,
    Charlotte,
    Father,
    Julianna,
    Sabine,
    Selene,
    Treasury,
}

impl Activity {
    pub const ALL: [Self; 20] = [
        Self::Ball,
        Self::Barracks,
        Self::Castle,
        Self::Court,
        Self::Dungeons,
        Self::Gardens,
        Self::Hunt,
        Self::Service,
        Self::Sneak,
        Self::Sports,
        Self::Tomb,
        Self::Toys,
        Self::Adair,
        Self::Advisors,
        Self::Charlotte,
        Self::Father,
        Self::Julianna,
        Self::Sabine,
        Self::Selene,
        Self::Treasury,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Ball => "ball",
            Self::Barracks => "barracks",
            Self::Castle => "castle",
            Self::Court => "court",
            Self::Dungeons => "dungeons",
            Self::Gardens => "gardens",
            Self::Hunt => "hunt",
            Self::Service => "service",
            Self::Sneak => "sneak",
            Self::Sports => "sports",
            Self::Tomb => "tomb",
            Self::Toys => "toys",
            Self::Adair => "adair",
            Self::Advisors => "advisors",
            Self::Charlotte => "charlotte",
            Self::Father => "father",
            Self::Julianna => "julianna",
            Self::Sabine => "sabine",
            Self::Selene => "selene",
            Self::Treasury => "treasury",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ball => "Attend Ball",
            Self::Barracks => "Tour Barracks",
            Self::Castle => "Explore Castle",
            Self::Court => "Attend Court",
            Self::Dungeons => "Visit Dungeons",
            Self::Gardens => "Walk in Gardens",
            Self::Hunt => "Hunting",
            Self::Service => "Attend Service",
            Self::Sneak => "Sneak Out",
            Self::Sports => "Sports",
            Self::Tomb => "Visit Tomb",
            Self::Toys => "Play with Toys",
            Self::Adair => "Talk to Adair",
            Self::Advisors => "Meet with Advisors",
            Self::Charlotte => "Talk to Charlotte",
            Self::Father => "Talk to Father",
            Self::Julianna => "Visit Julianna",
            Self::Sabine => "Talk to Sabine",
            Self::Selene => "Visit Selene",
            Self::Treasury => "Visit Treasury",
        }
    }

    /// Whether the generic version of the activity is on offer.
    #[must_use]
    pub fn condition(self, state: &WorldState) -> bool {
        match self {
            Self::Ball => state.skill(Skill::Dance) >= 50.0,
            Self::Castle | Self::Court | Self::Gardens | Self::Sneak | Self::Tomb | Self::Toys => {
                true
            }
            Self::Hunt => state.skill(Skill::Horses) >= 50.0,
            Self::Service => {
                state.mood_axis(MoodCode::Angry) != 0 || state.mood_axis(MoodCode::Cheerful) != 0
            }
            Self::Sports => state.skill(Skill::Reflexes) >= 30.0,
            Self::Barracks
            | Self::Dungeons
            | Self::Adair
            | Self::Advisors
            | Self::Charlotte
            | Self::Father
            | Self::Julianna
            | Self::Sabine
            | Self::Selene
            | Self::Treasury => false,
        }
    }

    /// Short hint of the mood effect, `???` when the outcome is a story beat.
    #[must_use]
    pub fn preview(self, state: &WorldState) -> &'static str {
        match self {
            Self::Ball => match state.mood_axis(MoodCode::Pressured) {
                p if p > 0 => "DP",
                p if p < 0 => "CP",
                _ => "P",
            },
            Self::Barracks => {
                if state.has_flag("War") && state.has_no_flags(&["Prestige", "Victory"]) {
                    "DP"
                } else {
                    match state.mood_axis(MoodCode::Willful) {
                        w if w > 0 => "-WP",
                        w if w < 0 => "-YP",
                        _ => "P",
                    }
                }
            }
            Self::Castle => "FL",
            Self::Court => {
                if state.has_flag("Regicide") {
                    "2Y2P"
                } else {
                    "D2YP"
                }
            }
            Self::Dungeons => dungeons_preview(state),
            Self::Gardens => "CL",
            Self::Hunt => {
                if state.mood_axis(MoodCode::Angry) > 0 {
                    "-2AC"
                } else {
                    "-2FD"
                }
            }
            Self::Service => service_delta(state),
            Self::Sneak => {
                if state.has_flag("Regicide") {
                    "DWL"
                } else {
                    "2WL"
                }
            }
            Self::Sports => sports_delta(state),
            Self::Tomb => "FD",
            Self::Toys => "CYL",
            Self::Treasury => treasury_preview(state),
            Self::Adair
            | Self::Advisors
            | Self::Charlotte
            | Self::Father
            | Self::Julianna
            | Self::Sabine
            | Self::Selene => "???",
        }
    }

    /// Option label, e.g. `Explore Castle (FL)`.
    #[must_use]
    pub fn label(self, state: &WorldState) -> String {
        format!("{} ({})", self.name(), self.preview(state))
    }

    /// Generic transformer used when no week-specific script applies.
    ///
    /// # Errors
    ///
    /// Propagates mood delta errors.
    pub fn run_generic(self, state: &WorldState, page: &mut Page) -> Result<WorldState, EngineError> {
        let next = match self {
            Self::Ball => {
                let state = state.apply_resources([(Resource::NobleApproval, 1.0)]);
                let delta = match state.mood_axis(MoodCode::Pressured) {
                    p if p > 0 => "PD",
                    p if p < 0 => "PC",
                    _ => "P",
                };
                page.line(delta);
                state.apply_mood(delta)?
            }
            Self::Castle => mood_only(state, "FL", page)?,
            Self::Gardens => mood_only(state, "CL", page)?,
            Self::Tomb => mood_only(state, "FD", page)?,
            Self::Toys => mood_only(state, "CYL", page)?,
            Self::Sneak => mood_only(state, "2WL", page)?,
            Self::Sports => mood_only(state, sports_delta(state), page)?,
            Self::Court => {
                let state = state.apply_resources([
                    (Resource::NobleApproval, 1.0),
                    (Resource::CommonerApproval, 1.0),
                ]);
                mood_only(&state, "D2YP", page)?
            }
            Self::Hunt => {
                let (kills, delta) = if state.mood_axis(MoodCode::Angry) > 0 {
                    (1.0, "-2AC")
                } else {
                    (0.5, "-2FD")
                };
                let state = state.apply_resources([(Resource::Kills, kills)]);
                mood_only(&state, delta, page)?
            }
            Self::Service => {
                let delta = service_delta(state);
                let state = if state.skill(Skill::SenseMagic) >= PRIESTESS_SENSE_THRESHOLD {
                    state.add_flag(FLAG_PRIESTESS)
                } else {
                    state.clone()
                };
                mood_only(&state, delta, page)?
            }
            Self::Barracks
            | Self::Dungeons
            | Self::Adair
            | Self::Advisors
            | Self::Charlotte
            | Self::Father
            | Self::Julianna
            | Self::Sabine
            | Self::Selene
            | Self::Treasury => state.clone(),
        };
        Ok(next)
    }
}

fn mood_only(state: &WorldState, delta: &str, page: &mut Page) -> Result<WorldState, EngineError> {
    page.line(delta);
    state.apply_mood(delta)
}

fn service_delta(state: &WorldState) -> &'static str {
    let angry = state.mood_axis(MoodCode::Angry);
    let cheerful = state.mood_axis(MoodCode::Cheerful);
    let anger_dominates = angry.unsigned_abs() >= cheerful.unsigned_abs();
    if anger_dominates && angry > 0 {
        "-A"
    } else if anger_dominates && angry < 0 {
        "-F"
    } else if cheerful > 0 {
        "-C"
    } else {
        "-D"
    }
}

fn sports_delta(state: &WorldState) -> &'static str {
    if state.mood_axis(MoodCode::Lonely) > 0 {
        "A-L"
    } else {
        "A"
    }
}

fn dungeons_preview(state: &WorldState) -> &'static str {
    let prisoner_story = state.has_flag("Dungeoness")
        && state.has_no_flags(&["Caution", "Amnesty", "Ambition"]);
    let ambition_story =
        state.has_flag("Ambition") && state.has_no_flags(&["Brazenness", "Jailbreak"]);
    let machination_story = state.has_flag("Machination") && !state.has_flag("Madness");
    if prisoner_story || ambition_story || machination_story {
        return "???";
    }
    let willful = state.mood_axis(MoodCode::Willful);
    if state.resource(Resource::Kills) >= 5.0 {
        "AC"
    } else if willful > 0 {
        "AW"
    } else if willful < 0 {
        "FY"
    } else {
        "No Effect"
    }
}

fn treasury_preview(state: &WorldState) -> &'static str {
    let story = state.has_no_flags(&["Crystal", "Consequences"])
        && state.has_any_flag(&["Mentor", "Assistant"])
        && state.has_any_flag(&["Inheritance", "Intransigence"]);
    let untrained = state.skill(Skill::Accounting) < 60.0 && state.skill(Skill::Presence) < 70.0;
    if story || untrained { "???" } else { "W" }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Activity {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|activity| activity.key() == s)
            .ok_or_else(|| EngineError::UnknownActivity(s.to_string()))
    }
}

impl TryFrom<String> for Activity {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Activity> for String {
    fn from(value: Activity) -> Self {
        value.key().to_string()
    }
}

/// How a reachable weekend activity is resolved this week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekendRoute {
    /// Run the pack's script for this variant week.
    Variant(u8),
    /// Run the catalogue's generic transformer.
    Generic,
}

/// Reachable weekend activities for `week`, in catalogue order.
///
/// A week-specific entry always wins over the generic catalogue, even when it
/// routes to 0 and hides the activity.
#[must_use]
pub fn available_weekend<P>(pack: &P, week: u8, state: &WorldState) -> BTreeMap<Activity, WeekendRoute>
where
    P: ContentPack + ?Sized,
{
    let mut reachable = BTreeMap::new();
    for activity in Activity::ALL {
        match pack.weekend_route(week, activity, state) {
            Some(0) => {}
            Some(variant) => {
                reachable.insert(activity, WeekendRoute::Variant(variant));
            }
            None if activity.condition(state) => {
                reachable.insert(activity, WeekendRoute::Generic);
            }
            None => {}
        }
    }
    reachable
}

/// Run `activity` along `route`.
///
/// # Errors
///
/// Propagates errors from the weekend script.
pub fn run_weekend_route<P>(
    pack: &P,
    route: WeekendRoute,
    activity: Activity,
    state: &WorldState,
    choices: &WeekChoices,
    page: &mut Page,
) -> Result<WorldState, EngineError>
where
    P: ContentPack + ?Sized,
{
    match route {
        WeekendRoute::Variant(variant) => pack.run_weekend(variant, activity, state, choices, page),
        WeekendRoute::Generic => activity.run_generic(state, page),
    }
}
