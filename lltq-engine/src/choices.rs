//! Typed player choices per week and the validated choice log.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::content::weekend::Activity;
use crate::error::EngineError;
use crate::skills::Skill;
use crate::wardrobe::Outfit;

/// Key of a numbered choice inside a week.
///
/// Scripted weeks number their prompts `1`, `2`, ...; weekend scripts use
/// letters `a`, `b`, ... so both can share one mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SlotKey {
    Event(u8),
    Weekend(char),
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event(number) => write!(f, "{number}"),
            Self::Weekend(letter) => write!(f, "{letter}"),
        }
    }
}

impl FromStr for SlotKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(number) = s.parse::<u8>() {
            if number > 0 {
                return Ok(Self::Event(number));
            }
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) if letter.is_ascii_lowercase() => Ok(Self::Weekend(letter)),
            _ => Err(EngineError::InvalidSlot(s.to_string())),
        }
    }
}

impl TryFrom<String> for SlotKey {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotKey> for String {
    fn from(value: SlotKey) -> Self {
        value.to_string()
    }
}

/// A prompt a content pack may show in a given week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    pub key: SlotKey,
    pub options: u8,
}

impl SlotSpec {
    #[must_use]
    pub const fn event(number: u8, options: u8) -> Self {
        Self {
            key: SlotKey::Event(number),
            options,
        }
    }

    #[must_use]
    pub const fn weekend(letter: char, options: u8) -> Self {
        Self {
            key: SlotKey::Weekend(letter),
            options,
        }
    }
}

/// Everything the player decided for one week. Absent fields mean "none".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekChoices {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outfit: Option<Outfit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morning: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evening: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekend: Option<Activity>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub picks: BTreeMap<SlotKey, u8>,
}

static NO_CHOICES: WeekChoices = WeekChoices {
    outfit: None,
    morning: None,
    evening: None,
    weekend: None,
    picks: BTreeMap::new(),
};

impl WeekChoices {
    #[must_use]
    pub const fn none() -> &'static Self {
        &NO_CHOICES
    }

    #[must_use]
    pub fn with_outfit(mut self, outfit: Outfit) -> Self {
        self.outfit = Some(outfit);
        self
    }

    #[must_use]
    pub fn with_training(mut self, morning: Skill, evening: Skill) -> Self {
        self.morning = Some(morning);
        self.evening = Some(evening);
        self
    }

    #[must_use]
    pub fn with_weekend(mut self, activity: Activity) -> Self {
        self.weekend = Some(activity);
        self
    }

    #[must_use]
    pub fn with_pick(mut self, key: SlotKey, option: u8) -> Self {
        self.picks.insert(key, option);
        self
    }

    /// 1-based option chosen for `key`, if any.
    #[must_use]
    pub fn pick(&self, key: SlotKey) -> Option<u8> {
        self.picks.get(&key).copied()
    }

    #[must_use]
    pub fn event(&self, number: u8) -> Option<u8> {
        self.pick(SlotKey::Event(number))
    }

    #[must_use]
    pub fn weekend_pick(&self, letter: char) -> Option<u8> {
        self.pick(SlotKey::Weekend(letter))
    }
}

/// Recorded choices for every week that has any.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceLog {
    weeks: BTreeMap<u8, WeekChoices>,
}

impl ChoiceLog {
    #[must_use]
    pub fn get(&self, week: u8) -> &WeekChoices {
        self.weeks.get(&week).unwrap_or(WeekChoices::none())
    }

    /// Store `choices` for `week` after checking every pick against `slots`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::WeekOutOfRange` for weeks outside `1..=final_week`,
    /// `EngineError::UnknownSlot` for a pick the week never offers and
    /// `EngineError::OptionOutOfRange` for an option number past the slot's list.
    pub fn record(
        &mut self,
        week: u8,
        final_week: u8,
        choices: WeekChoices,
        slots: &[SlotSpec],
    ) -> Result<(), EngineError> {
        validate_week_choices(week, final_week, &choices, slots)?;
        if choices == NO_CHOICES {
            self.weeks.remove(&week);
        } else {
            self.weeks.insert(week, choices);
        }
        Ok(())
    }

    /// Weeks that carry any recorded choice, ascending.
    pub fn weeks(&self) -> impl Iterator<Item = (u8, &WeekChoices)> {
        self.weeks.iter().map(|(week, choices)| (*week, choices))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

/// Check a week's picks against the slots its content declares.
///
/// # Errors
///
/// See [`ChoiceLog::record`].
pub fn validate_week_choices(
    week: u8,
    final_week: u8,
    choices: &WeekChoices,
    slots: &[SlotSpec],
) -> Result<(), EngineError> {
    if week == 0 || week > final_week {
        return Err(EngineError::WeekOutOfRange {
            week,
            max: final_week,
        });
    }
    for (key, option) in &choices.picks {
        let spec = slots
            .iter()
            .find(|spec| spec.key == *key)
            .ok_or(EngineError::UnknownSlot { week, slot: *key })?;
        if *option == 0 || *option > spec.options {
            return Err(EngineError::OptionOutOfRange {
                week,
                slot: *key,
                options: spec.options,
                option: *option,
            });
        }
    }
    Ok(())
}
