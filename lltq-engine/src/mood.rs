//! Mood vector: five integer axes and the delta mini-language that moves them.
//!
//! Axis 0 is the unsigned injury axis. Axes 1-4 are bipolar and clamped to
//! `[MOOD_FLOOR, MOOD_CEILING]` after every delta. Deltas are written as a
//! concatenation of terms such as `"2F4D"` or `"-A"`.
use regex::Regex;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

use crate::constants::{INJURY_AXIS, MOOD_AXES, MOOD_CEILING, MOOD_FLOOR};
use crate::error::EngineError;
use crate::state::WorldState;
use crate::wardrobe::Outfit;

/// One pole of a mood axis, plus the neutral placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MoodCode {
    Injured,
    Neutral,
    Angry,
    Afraid,
    Cheerful,
    Depressed,
    Willful,
    Yielding,
    Pressured,
    Lonely,
}

impl MoodCode {
    pub const ALL: [Self; 10] = [
        Self::Injured,
        Self::Neutral,
        Self::Angry,
        Self::Afraid,
        Self::Cheerful,
        Self::Depressed,
        Self::Willful,
        Self::Yielding,
        Self::Pressured,
        Self::Lonely,
    ];

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Injured => 'I',
            Self::Neutral => 'N',
            Self::Angry => 'A',
            Self::Afraid => 'F',
            Self::Cheerful => 'C',
            Self::Depressed => 'D',
            Self::Willful => 'W',
            Self::Yielding => 'Y',
            Self::Pressured => 'P',
            Self::Lonely => 'L',
        }
    }

    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'I' => Some(Self::Injured),
            'N' => Some(Self::Neutral),
            'A' => Some(Self::Angry),
            'F' => Some(Self::Afraid),
            'C' => Some(Self::Cheerful),
            'D' => Some(Self::Depressed),
            'W' => Some(Self::Willful),
            'Y' => Some(Self::Yielding),
            'P' => Some(Self::Pressured),
            'L' => Some(Self::Lonely),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Injured => "Injured",
            Self::Neutral => "Neutral",
            Self::Angry => "Angry",
            Self::Afraid => "Afraid",
            Self::Cheerful => "Cheerful",
            Self::Depressed => "Depressed",
            Self::Willful => "Willful",
            Self::Yielding => "Yielding",
            Self::Pressured => "Pressured",
            Self::Lonely => "Lonely",
        }
    }

    /// Axis index this code moves, `None` for the neutral placeholder.
    #[must_use]
    pub const fn axis(self) -> Option<usize> {
        match self {
            Self::Injured => Some(INJURY_AXIS),
            Self::Neutral => None,
            Self::Angry | Self::Afraid => Some(1),
            Self::Cheerful | Self::Depressed => Some(2),
            Self::Willful | Self::Yielding => Some(3),
            Self::Pressured | Self::Lonely => Some(4),
        }
    }

    /// Unit sign of the pole: +1 for the positive pole, -1 for the negative one.
    #[must_use]
    pub const fn unit(self) -> i32 {
        match self {
            Self::Neutral => 0,
            Self::Injured | Self::Angry | Self::Cheerful | Self::Willful | Self::Pressured => 1,
            Self::Afraid | Self::Depressed | Self::Yielding | Self::Lonely => -1,
        }
    }

    /// Positive and negative pole codes of an axis.
    #[must_use]
    pub const fn poles(axis: usize) -> (Self, Self) {
        match axis {
            1 => (Self::Angry, Self::Afraid),
            2 => (Self::Cheerful, Self::Depressed),
            3 => (Self::Willful, Self::Yielding),
            4 => (Self::Pressured, Self::Lonely),
            _ => (Self::Injured, Self::Neutral),
        }
    }

    /// Training modifier this mood applies to skills owned by `outfit`.
    #[must_use]
    pub const fn training_modifier(self, outfit: Outfit) -> Option<i32> {
        use Outfit as O;
        match self {
            Self::Injured => match outfit {
                O::Agility | O::Weapons | O::Athletics | O::Animal => Some(-3),
                _ => None,
            },
            Self::Neutral => None,
            Self::Angry => match outfit {
                O::Royal | O::Expression | O::Animal | O::Medicine => Some(-1),
                O::Weapons | O::Military => Some(1),
                _ => None,
            },
            Self::Afraid => match outfit {
                O::Royal | O::Weapons | O::Intrigue | O::Military => Some(-1),
                O::Agility | O::Faith => Some(1),
                _ => None,
            },
            Self::Cheerful => match outfit {
                O::Military => Some(-2),
                O::Weapons | O::Intrigue => Some(-1),
                O::Conversation | O::Athletics => Some(1),
                _ => None,
            },
            Self::Depressed => match outfit {
                O::Conversation => Some(-2),
                O::Royal | O::Athletics => Some(-1),
                O::Expression | O::Animal => Some(1),
                _ => None,
            },
            Self::Willful => match outfit {
                O::Royal | O::History | O::Economics => Some(-2),
                O::Intrigue | O::Military | O::Lumen => Some(1),
                _ => None,
            },
            Self::Yielding => match outfit {
                O::Weapons | O::Lumen => Some(-3),
                O::Royal | O::History | O::Faith => Some(1),
                _ => None,
            },
            Self::Pressured => match outfit {
                O::Conversation | O::History | O::Economics => Some(-1),
                O::Athletics | O::Faith => Some(1),
                _ => None,
            },
            Self::Lonely => match outfit {
                O::Royal | O::Intrigue | O::Faith => Some(-1),
                O::Conversation | O::Medicine => Some(1),
                _ => None,
            },
        }
    }
}

impl fmt::Display for MoodCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for MoodCode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => {
                Self::from_letter(letter).ok_or_else(|| EngineError::UnknownMoodCode(s.to_string()))
            }
            _ => Err(EngineError::UnknownMoodCode(s.to_string())),
        }
    }
}

/// Errors raised while parsing a mood delta or a stored mood vector.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoodError {
    #[error("unexpected `{found}` at offset {offset} in mood delta `{expr}`")]
    UnexpectedChar {
        expr: String,
        offset: usize,
        found: char,
    },
    #[error("mood delta `{expr}` targets the neutral code")]
    NeutralTarget { expr: String },
    #[error("magnitude out of range in mood delta `{expr}`")]
    MagnitudeOverflow { expr: String },
    #[error("mood axis {axis} holds {value}, outside its clamp")]
    AxisOutOfRange { axis: usize, value: i32 },
}

/// A single `(sign, magnitude, code)` record of a delta expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodTerm {
    pub negative: bool,
    pub magnitude: i32,
    pub code: MoodCode,
}

impl MoodTerm {
    /// Signed amount, before the pole's unit is applied.
    #[must_use]
    pub const fn amount(self) -> i32 {
        if self.negative {
            -self.magnitude
        } else {
            self.magnitude
        }
    }
}

/// Terms stored inline; authored deltas rarely exceed four terms.
pub type MoodTerms = SmallVec<[MoodTerm; 4]>;

/// Parsed mood delta expression.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoodDelta {
    terms: MoodTerms,
}

fn term_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(-)?([0-9]*)(.)").expect("mood term pattern compiles"))
}

impl MoodDelta {
    #[must_use]
    pub fn terms(&self) -> &[MoodTerm] {
        &self.terms
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl FromStr for MoodDelta {
    type Err = MoodError;

    fn from_str(expr: &str) -> Result<Self, Self::Err> {
        let unexpected = |offset: usize| MoodError::UnexpectedChar {
            expr: expr.to_string(),
            offset,
            found: expr[offset..].chars().next().unwrap_or('\0'),
        };

        let mut terms = MoodTerms::new();
        let mut cursor = 0;
        for caps in term_pattern().captures_iter(expr) {
            let (Some(whole), Some(code)) = (caps.get(0), caps.get(3)) else {
                continue;
            };
            if whole.start() != cursor {
                return Err(unexpected(cursor));
            }
            let letter = code.as_str().chars().next().unwrap_or('\0');
            let code_value = MoodCode::from_letter(letter).ok_or_else(|| unexpected(code.start()))?;
            if code_value == MoodCode::Neutral {
                return Err(MoodError::NeutralTarget {
                    expr: expr.to_string(),
                });
            }
            let digits = caps.get(2).map_or("", |m| m.as_str());
            let magnitude = if digits.is_empty() {
                1
            } else {
                digits
                    .parse::<i32>()
                    .map_err(|_| MoodError::MagnitudeOverflow {
                        expr: expr.to_string(),
                    })?
            };
            terms.push(MoodTerm {
                negative: caps.get(1).is_some(),
                magnitude,
                code: code_value,
            });
            cursor = whole.end();
        }
        if cursor != expr.len() {
            return Err(unexpected(cursor));
        }
        Ok(Self { terms })
    }
}

/// The five mood axes of a world state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "MoodAxes")]
pub struct Mood {
    axes: [i32; MOOD_AXES],
}

#[derive(Deserialize)]
struct MoodAxes {
    axes: [i32; MOOD_AXES],
}

impl TryFrom<MoodAxes> for Mood {
    type Error = MoodError;

    fn try_from(raw: MoodAxes) -> Result<Self, Self::Error> {
        let mood = Self::from_axes(raw.axes);
        match raw.axes.iter().zip(mood.axes).position(|(given, kept)| *given != kept) {
            Some(axis) => Err(MoodError::AxisOutOfRange {
                axis,
                value: raw.axes[axis],
            }),
            None => Ok(mood),
        }
    }
}

impl Mood {
    /// Build a mood from raw axis values, applying the usual clamps.
    #[must_use]
    pub fn from_axes(axes: [i32; MOOD_AXES]) -> Self {
        let mut mood = Self { axes };
        mood.axes[INJURY_AXIS] = mood.axes[INJURY_AXIS].max(0);
        mood.clamp_bipolar();
        mood
    }

    #[must_use]
    pub const fn axes(&self) -> [i32; MOOD_AXES] {
        self.axes
    }

    /// Stored value of an axis. Out-of-range indices read as zero.
    #[must_use]
    pub fn raw(&self, axis: usize) -> i32 {
        self.axes.get(axis).copied().unwrap_or(0)
    }

    /// Intensity along the positive direction of `code`'s pole.
    #[must_use]
    pub fn axis_value(&self, code: MoodCode) -> i32 {
        code.axis()
            .map_or(0, |axis| self.axes[axis].saturating_mul(code.unit()))
    }

    #[must_use]
    pub fn dominant(&self) -> MoodCode {
        if self.axes[INJURY_AXIS] > 0 {
            return MoodCode::Injured;
        }
        let mut winner: Option<(u32, usize)> = None;
        for (axis, value) in self.axes.iter().enumerate().skip(1) {
            let magnitude = value.unsigned_abs();
            if magnitude == 0 {
                continue;
            }
            match winner {
                Some((best, _)) if best >= magnitude => {}
                _ => winner = Some((magnitude, axis)),
            }
        }
        winner.map_or(MoodCode::Neutral, |(_, axis)| self.pole(axis))
    }

    fn pole(&self, axis: usize) -> MoodCode {
        let (positive, negative) = MoodCode::poles(axis);
        if self.axes[axis] > 0 {
            positive
        } else {
            negative
        }
    }

    /// Compact rendering of every non-zero axis, e.g. `2F4D`.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for (axis, value) in self.axes.iter().enumerate() {
            if *value == 0 {
                continue;
            }
            let magnitude = value.unsigned_abs();
            if magnitude > 1 {
                out.push_str(&magnitude.to_string());
            }
            out.push(self.pole(axis).letter());
        }
        out
    }

    /// Dominant mood name followed by the axis summary, e.g. `Depressed (2F4D)`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} ({})", self.dominant().name(), self.summary())
    }

    #[must_use]
    pub fn apply(&self, delta: &MoodDelta) -> Self {
        let mut next = *self;
        for term in delta.terms() {
            next.apply_term(*term);
        }
        next.clamp_bipolar();
        next
    }

    fn apply_term(&mut self, term: MoodTerm) {
        let Some(axis) = term.code.axis() else {
            return;
        };
        let unit = term.code.unit();
        let amount = term.amount();
        let reducing = amount < 0;
        if reducing && unit.saturating_mul(self.axes[axis]) < 0 {
            return;
        }
        self.axes[axis] = self.axes[axis].saturating_add(amount.saturating_mul(unit));
        if reducing && unit.saturating_mul(self.axes[axis]) < 0 {
            self.axes[axis] = 0;
        }
    }

    fn clamp_bipolar(&mut self) {
        for value in self.axes.iter_mut().skip(1) {
            *value = (*value).clamp(MOOD_FLOOR, MOOD_CEILING);
        }
    }

    pub(crate) fn clear_injury(&mut self) {
        self.axes[INJURY_AXIS] = 0;
    }
}

impl WorldState {
    /// Apply a delta expression such as `"2F4D"`, returning the new state.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Mood` when the expression does not parse.
    pub fn apply_mood(&self, expr: &str) -> Result<Self, EngineError> {
        let delta: MoodDelta = expr.parse()?;
        Ok(self.apply_mood_delta(&delta))
    }

    #[must_use]
    pub fn apply_mood_delta(&self, delta: &MoodDelta) -> Self {
        self.with_changes(|state| state.mood = state.mood.apply(delta))
    }

    #[must_use]
    pub fn mood_axis(&self, code: MoodCode) -> i32 {
        self.mood.axis_value(code)
    }

    #[must_use]
    pub fn dominant_mood(&self) -> MoodCode {
        self.mood.dominant()
    }

    #[must_use]
    pub fn describe_mood(&self) -> String {
        self.mood.describe()
    }
}
