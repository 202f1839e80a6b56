//! Outfits, the unlock mask and the currently equipped item.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::OUTFIT_SLOTS;
use crate::error::EngineError;
use crate::skills::{Skill, skills_of_slot};
use crate::state::WorldState;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Outfit {
    #[default]
    Base,
    Royal,
    Conversation,
    Expression,
    Agility,
    Weapons,
    Athletics,
    Animal,
    History,
    Intrigue,
    Medicine,
    Economics,
    Military,
    Faith,
    Lumen,
}

impl Outfit {
    pub const ALL: [Self; OUTFIT_SLOTS + 1] = [
        Self::Base,
        Self::Royal,
        Self::Conversation,
        Self::Expression,
        Self::Agility,
        Self::Weapons,
        Self::Athletics,
        Self::Animal,
        Self::History,
        Self::Intrigue,
        Self::Medicine,
        Self::Economics,
        Self::Military,
        Self::Faith,
        Self::Lumen,
    ];

    /// Outfits that own skills and can be unlocked, in slot order.
    pub const UNLOCKABLE: [Self; OUTFIT_SLOTS] = [
        Self::Royal,
        Self::Conversation,
        Self::Expression,
        Self::Agility,
        Self::Weapons,
        Self::Athletics,
        Self::Animal,
        Self::History,
        Self::Intrigue,
        Self::Medicine,
        Self::Economics,
        Self::Military,
        Self::Faith,
        Self::Lumen,
    ];

    /// Index into the unlock mask; the base uniform has none.
    #[must_use]
    pub const fn slot(self) -> Option<usize> {
        match self {
            Self::Base => None,
            other => Some(other as usize - 1),
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Royal => "royal",
            Self::Conversation => "conversation",
            Self::Expression => "expression",
            Self::Agility => "agility",
            Self::Weapons => "weapons",
            Self::Athletics => "athletics",
            Self::Animal => "animal",
            Self::History => "history",
            Self::Intrigue => "intrigue",
            Self::Medicine => "medicine",
            Self::Economics => "economics",
            Self::Military => "military",
            Self::Faith => "faith",
            Self::Lumen => "lumen",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base => "Boarding School Uniform",
            Self::Royal => "Coronet",
            Self::Conversation => "Tea Dress",
            Self::Expression => "Toga",
            Self::Agility => "Tutu",
            Self::Weapons => "Tabard",
            Self::Athletics => "Exercise Gear",
            Self::Animal => "Hunt Coat",
            Self::History => "Scholar's Gown",
            Self::Intrigue => "Catsuit",
            Self::Medicine => "Nurse's Gown",
            Self::Economics => "Tuxedo",
            Self::Military => "Uniform",
            Self::Faith => "Priestess Robe",
            Self::Lumen => "Magical Girl",
        }
    }

    /// The three skills this outfit boosts; empty for the base uniform.
    #[must_use]
    pub fn skills(self) -> &'static [Skill] {
        match self.slot() {
            Some(slot) => skills_of_slot(slot),
            None => &[],
        }
    }
}

impl fmt::Display for Outfit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Outfit {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|outfit| outfit.key() == s)
            .ok_or_else(|| EngineError::UnknownOutfit(s.to_string()))
    }
}

impl TryFrom<String> for Outfit {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Outfit> for String {
    fn from(value: Outfit) -> Self {
        value.key().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Wardrobe {
    current: Outfit,
    unlocked: [bool; OUTFIT_SLOTS],
}

impl Wardrobe {
    #[must_use]
    pub const fn current(&self) -> Outfit {
        self.current
    }

    /// The base uniform is always available.
    #[must_use]
    pub const fn is_unlocked(&self, outfit: Outfit) -> bool {
        match outfit.slot() {
            None => true,
            Some(slot) => self.unlocked[slot],
        }
    }

    #[must_use]
    pub fn available(&self) -> Vec<Outfit> {
        Outfit::ALL
            .into_iter()
            .filter(|outfit| self.is_unlocked(*outfit))
            .collect()
    }

    #[must_use]
    pub const fn with_unlocked(mut self, outfit: Outfit) -> Self {
        if let Some(slot) = outfit.slot() {
            self.unlocked[slot] = true;
        }
        self
    }

    #[must_use]
    pub const fn equipped(mut self, outfit: Outfit) -> Self {
        self.current = outfit;
        self
    }

    #[must_use]
    pub const fn mask(&self) -> [bool; OUTFIT_SLOTS] {
        self.unlocked
    }
}

impl WorldState {
    /// Set the current outfit. Callers only offer unlocked items; the driver
    /// drops stale requests for locked ones before calling this.
    #[must_use]
    pub fn equip(&self, outfit: Outfit) -> Self {
        self.with_changes(|state| state.wardrobe = state.wardrobe.equipped(outfit))
    }

    #[must_use]
    pub fn unlock(&self, outfit: Outfit) -> Self {
        self.with_changes(|state| state.wardrobe = state.wardrobe.with_unlocked(outfit))
    }

    #[must_use]
    pub const fn current_outfit(&self) -> Outfit {
        self.wardrobe.current()
    }

    #[must_use]
    pub const fn is_unlocked(&self, outfit: Outfit) -> bool {
        self.wardrobe.is_unlocked(outfit)
    }

    #[must_use]
    pub fn available_outfits(&self) -> Vec<Outfit> {
        self.wardrobe.available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_is_always_available() {
        let wardrobe = Wardrobe::default();
        assert_eq!(wardrobe.current(), Outfit::Base);
        assert_eq!(wardrobe.available(), vec![Outfit::Base]);
        assert!(Outfit::Base.skills().is_empty());
        assert_eq!(Outfit::Base.slot(), None);
    }

    #[test]
    fn unlocking_is_sticky_and_idempotent() {
        let wardrobe = Wardrobe::default()
            .with_unlocked(Outfit::Faith)
            .with_unlocked(Outfit::Faith)
            .with_unlocked(Outfit::Base);
        assert!(wardrobe.is_unlocked(Outfit::Faith));
        assert!(!wardrobe.is_unlocked(Outfit::Lumen));
        assert_eq!(wardrobe.available(), vec![Outfit::Base, Outfit::Faith]);
        assert_eq!(wardrobe.mask().iter().filter(|bit| **bit).count(), 1);
    }

    #[test]
    fn outfits_own_three_skills_in_slot_order() {
        assert_eq!(
            Outfit::Royal.skills(),
            &[Skill::Composure, Skill::Elegance, Skill::Presence]
        );
        assert_eq!(
            Outfit::Lumen.skills(),
            &[Skill::SenseMagic, Skill::ResistMagic, Skill::WieldMagic]
        );
        for outfit in Outfit::UNLOCKABLE {
            for skill in outfit.skills() {
                assert_eq!(skill.owner(), outfit);
            }
        }
    }

    #[test]
    fn keys_and_names() {
        assert_eq!("history".parse::<Outfit>().unwrap(), Outfit::History);
        assert_eq!(Outfit::History.name(), "Scholar's Gown");
        assert!(matches!(
            "cape".parse::<Outfit>(),
            Err(EngineError::UnknownOutfit(_))
        ));
    }
}
