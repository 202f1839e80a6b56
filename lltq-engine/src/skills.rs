//! The 42-skill vector, its outfit and group structure, and weekly training.
//!
//! Skills are laid out so that `index / 3` is the owning outfit's slot. Each
//! outfit's three skills form its *subgroup*; outfits are further collected
//! into four *groups* whose raw totals feed a small training bonus.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::constants::{
    BASE_MOOD_MODIFIER, FLAG_LEADERSHIP, FLAG_LUMEN, FLAG_PRIESTESS, GROUP_BONUS_RATE,
    OUTFIT_DISPLAY_BONUS, PRIESTESS_SENSE_THRESHOLD, SKILL_COUNT, SKILL_MAX, SKILL_NOVICE_CAP,
    SKILL_UNLOCK_THRESHOLD, SUBGROUP_BONUS_RATE, TRAINING_SCALE,
};
use crate::error::EngineError;
use crate::mood::MoodCode;
use crate::state::WorldState;
use crate::wardrobe::Outfit;

const SKILLS_PER_OUTFIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Skill {
    Composure,
    Elegance,
    Presence,
    PublicSpeaking,
    CourtManners,
    Flattery,
    Decoration,
    Instrument,
    Voice,
    Dance,
    Reflexes,
    Flexibility,
    Swords,
    Archery,
    Polearms,
    Running,
    Swimming,
    Climbing,
    Horses,
    Dogs,
    Falcons,
    NovanHistory,
    ForeignAffairs,
    WorldHistory,
    InternalAffairs,
    ForeignIntelligence,
    Ciphering,
    Herbs,
    BattlefieldMedicine,
    Poison,
    Accounting,
    Trade,
    Production,
    Strategy,
    NavalStrategy,
    Logistics,
    Meditation,
    Divination,
    Lore,
    SenseMagic,
    ResistMagic,
    WieldMagic,
}

/// `(key, display name)` by skill index.
const SKILL_LABELS: [(&str, &str); SKILL_COUNT] = [
    ("composure", "Composure"),
    ("elegance", "Elegance"),
    ("presence", "Presence"),
    ("public", "Public Speaking"),
    ("court", "Court Manners"),
    ("flattery", "Flattery"),
    ("decorate", "Decoration"),
    ("instrument", "Instrument"),
    ("voice", "Voice"),
    ("dance", "Dance"),
    ("reflexes", "Reflexes"),
    ("flexible", "Flexibility"),
    ("swords", "Swords"),
    ("archery", "Archery"),
    ("polearms", "Polearms"),
    ("running", "Running"),
    ("swimming", "Swimming"),
    ("climbing", "Climbing"),
    ("horses", "Horses"),
    ("dogs", "Dogs"),
    ("falcons", "Falcons"),
    ("novan", "Novan History"),
    ("foraff", "Foreign Affairs"),
    ("world", "World History"),
    ("internal", "Internal Affairs"),
    ("forint", "Foreign Intelligence"),
    ("cipher", "Ciphering"),
    ("herbs", "Herbs"),
    ("battle", "Battlefield Medicine"),
    ("poison", "Poison"),
    ("account", "Accounting"),
    ("trade", "Trade"),
    ("product", "Production"),
    ("strategy", "Strategy"),
    ("naval", "Naval Strategy"),
    ("logs", "Logistics"),
    ("meditate", "Meditation"),
    ("divinate", "Divination"),
    ("lore", "Lore"),
    ("sense", "Sense Magic"),
    ("resist", "Resist Magic"),
    ("wield", "Wield Magic"),
];

static ALL_SKILLS: [Skill; SKILL_COUNT] = Skill::ALL;

/// Skills owned by the outfit in unlock-mask slot `slot`.
pub(crate) fn skills_of_slot(slot: usize) -> &'static [Skill] {
    let start = slot * SKILLS_PER_OUTFIT;
    ALL_SKILLS
        .get(start..start + SKILLS_PER_OUTFIT)
        .unwrap_or(&[])
}

impl Skill {
    pub const ALL: [Self; SKILL_COUNT] = [
        Self::Composure,
        Self::Elegance,
        Self::Presence,
        Self::PublicSpeaking,
        Self::CourtManners,
        Self::Flattery,
        Self::Decoration,
        Self::Instrument,
        Self::Voice,
        Self::Dance,
        Self::Reflexes,
        Self::Flexibility,
        Self::Swords,
        Self::Archery,
        Self::Polearms,
        Self::Running,
        Self::Swimming,
        Self::Climbing,
        Self::Horses,
        Self::Dogs,
        Self::Falcons,
        Self::NovanHistory,
        Self::ForeignAffairs,
        Self::WorldHistory,
        Self::InternalAffairs,
        Self::ForeignIntelligence,
        Self::Ciphering,
        Self::Herbs,
        Self::BattlefieldMedicine,
        Self::Poison,
        Self::Accounting,
        Self::Trade,
        Self::Production,
        Self::Strategy,
        Self::NavalStrategy,
        Self::Logistics,
        Self::Meditation,
        Self::Divination,
        Self::Lore,
        Self::SenseMagic,
        Self::ResistMagic,
        Self::WieldMagic,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        SKILL_LABELS[self.index()].0
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        SKILL_LABELS[self.index()].1
    }

    #[must_use]
    pub const fn owner(self) -> Outfit {
        Outfit::UNLOCKABLE[self.index() / SKILLS_PER_OUTFIT]
    }

    #[must_use]
    pub const fn group(self) -> SkillGroup {
        match self.index() {
            0..9 => SkillGroup::Courtly,
            9..21 => SkillGroup::Physical,
            21..36 => SkillGroup::Scholarly,
            _ => SkillGroup::Mystic,
        }
    }

    /// The skill and its two subgroup siblings.
    #[must_use]
    pub fn subgroup(self) -> &'static [Skill] {
        self.owner().skills()
    }

    /// Mood-derived training modifier for this skill.
    #[must_use]
    pub fn mood_modifier(self, mood: MoodCode) -> f64 {
        mood.training_modifier(self.owner())
            .map_or(BASE_MOOD_MODIFIER, |offset| {
                BASE_MOOD_MODIFIER + f64::from(offset)
            })
    }

    /// Label for a training choice: the name, with the mood's table entry
    /// appended when there is one, e.g. `Swords (-3)`.
    #[must_use]
    pub fn option_text(self, mood: MoodCode) -> String {
        match mood.training_modifier(self.owner()) {
            Some(offset) => format!("{} ({offset})", self.name()),
            None => self.name().to_string(),
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Skill {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|skill| skill.key() == s)
            .ok_or_else(|| EngineError::UnknownSkill(s.to_string()))
    }
}

impl TryFrom<String> for Skill {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Skill> for String {
    fn from(value: Skill) -> Self {
        value.key().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillGroup {
    Courtly,
    Physical,
    Scholarly,
    Mystic,
}

impl SkillGroup {
    const fn range(self) -> Range<usize> {
        match self {
            Self::Courtly => 0..9,
            Self::Physical => 9..21,
            Self::Scholarly => 21..36,
            Self::Mystic => 36..SKILL_COUNT,
        }
    }

    #[must_use]
    pub fn skills(self) -> &'static [Skill] {
        ALL_SKILLS.get(self.range()).unwrap_or(&[])
    }
}

/// Raw skill values, one per [`Skill`], serialized as a plain list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Skills {
    values: Vec<f64>,
}

impl Default for Skills {
    fn default() -> Self {
        Self {
            values: vec![0.0; SKILL_COUNT],
        }
    }
}

impl Skills {
    #[must_use]
    pub fn get(&self, skill: Skill) -> f64 {
        self.values.get(skill.index()).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    fn set(&mut self, skill: Skill, value: f64) {
        if let Some(slot) = self.values.get_mut(skill.index()) {
            *slot = value;
        }
    }

    fn sum(&self, skills: &[Skill]) -> f64 {
        skills.iter().map(|skill| self.get(*skill)).sum()
    }

    fn min(&self, skills: &[Skill]) -> f64 {
        skills
            .iter()
            .map(|skill| self.get(*skill))
            .fold(SKILL_MAX, f64::min)
    }
}

impl TryFrom<Vec<f64>> for Skills {
    type Error = EngineError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        if values.len() != SKILL_COUNT {
            return Err(EngineError::SkillVectorLength {
                expected: SKILL_COUNT,
                found: values.len(),
            });
        }
        for (skill, value) in Skill::ALL.iter().zip(&values) {
            if !(0.0..=SKILL_MAX).contains(value) {
                return Err(EngineError::SkillOutOfRange {
                    skill: skill.key().to_string(),
                    value: *value,
                    max: SKILL_MAX,
                });
            }
        }
        Ok(Self { values })
    }
}

impl From<Skills> for Vec<f64> {
    fn from(value: Skills) -> Self {
        value.values
    }
}

/// One skill's training plan, computed entirely from the pre-training state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingStep {
    pub skill: Skill,
    pub gain: f64,
    pub cap: f64,
    pub may_unlock: bool,
}

impl TrainingStep {
    #[must_use]
    pub fn plan(state: &WorldState, skill: Skill) -> Self {
        let skills = state.skills();
        let subgroup_bonus = skills.sum(skill.subgroup()) * SUBGROUP_BONUS_RATE;
        let group_bonus = skills.sum(skill.group().skills()) * GROUP_BONUS_RATE;
        let modifier = skill.mood_modifier(state.dominant_mood());
        let gain = (TRAINING_SCALE * (modifier + subgroup_bonus + group_bonus)).max(0.0);
        let novice = skills.min(skill.subgroup()) < SKILL_UNLOCK_THRESHOLD;
        Self {
            skill,
            gain,
            cap: if novice { SKILL_NOVICE_CAP } else { SKILL_MAX },
            may_unlock: novice,
        }
    }
}

impl WorldState {
    /// Train the morning and evening skills. Either being `None` leaves the
    /// state untouched.
    #[must_use]
    pub fn train(&self, morning: Option<Skill>, evening: Option<Skill>) -> Self {
        let (Some(morning), Some(evening)) = (morning, evening) else {
            return self.clone();
        };
        let steps = [
            TrainingStep::plan(self, morning),
            TrainingStep::plan(self, evening),
        ];
        self.with_changes(|state| {
            for step in &steps {
                let current = state.skills.get(step.skill);
                state.skills.set(step.skill, step.cap.min(current + step.gain));
            }

            let mut checked: Option<Outfit> = None;
            for step in steps.iter().filter(|step| step.may_unlock) {
                let owner = step.skill.owner();
                if checked == Some(owner) {
                    continue;
                }
                checked = Some(owner);
                if state.skills.min(owner.skills()) >= SKILL_UNLOCK_THRESHOLD {
                    state.wardrobe = state.wardrobe.with_unlocked(owner);
                }
            }

            let faith_trained = steps
                .iter()
                .any(|step| step.skill.owner() == Outfit::Faith);
            if faith_trained
                && state.read_effective(Skill::SenseMagic, false) >= PRIESTESS_SENSE_THRESHOLD
                && state.has_no_flags(&[FLAG_LEADERSHIP, FLAG_PRIESTESS])
            {
                state.flags.insert(FLAG_PRIESTESS);
            }
        })
    }

    /// Skill value as seen by checks: the equipped outfit adds a display bonus
    /// on top of the value capped at the maximum.
    #[must_use]
    pub fn read_effective(&self, skill: Skill, ignore_outfit: bool) -> f64 {
        let raw = self.skills.get(skill);
        if !ignore_outfit && self.current_outfit() == skill.owner() {
            raw.min(SKILL_MAX) + OUTFIT_DISPLAY_BONUS
        } else {
            raw
        }
    }

    #[must_use]
    pub fn skill(&self, skill: Skill) -> f64 {
        self.read_effective(skill, false)
    }

    /// Effective total of an outfit's three skills; zero for the base uniform.
    #[must_use]
    pub fn subgroup_total(&self, outfit: Outfit) -> f64 {
        outfit
            .skills()
            .iter()
            .map(|skill| self.read_effective(*skill, false))
            .sum()
    }

    /// Skills the player may pick for training this week.
    #[must_use]
    pub fn unlocked_skills(&self) -> Vec<Skill> {
        let lumen_active = self.has_flag(FLAG_LUMEN);
        Skill::ALL
            .into_iter()
            .filter(|skill| lumen_active || skill.owner() != Outfit::Lumen)
            .collect()
    }

    #[must_use]
    pub fn is_skill_unlocked(&self, skill: Skill) -> bool {
        skill.owner() != Outfit::Lumen || self.has_flag(FLAG_LUMEN)
    }
}
