//! The immutable world snapshot every weekly transition consumes and produces.
use serde::{Deserialize, Serialize};
use std::hash::Hasher;
use twox_hash::XxHash64;

use crate::flags::FlagSet;
use crate::mood::Mood;
use crate::resources::Resources;
use crate::skills::Skills;
use crate::wardrobe::{Outfit, Wardrobe};

/// Complete simulation state for one point in the calendar.
///
/// Every operation takes `&self` and returns a fresh value; the progress cache
/// relies on earlier snapshots never changing underneath it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldState {
    pub(crate) mood: Mood,
    pub(crate) resources: Resources,
    pub(crate) wardrobe: Wardrobe,
    pub(crate) skills: Skills,
    pub(crate) flags: FlagSet,
}

impl WorldState {
    /// All-zero mood, resources and skills, base uniform, no flags.
    #[must_use]
    pub fn initial() -> Self {
        Self::default()
    }

    /// Copy-on-write: clone `self`, let `edit` mutate the copy, return it.
    #[must_use]
    pub(crate) fn with_changes<F>(&self, edit: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut next = self.clone();
        edit(&mut next);
        next
    }

    #[must_use]
    pub const fn mood(&self) -> &Mood {
        &self.mood
    }

    #[must_use]
    pub const fn resources(&self) -> &Resources {
        &self.resources
    }

    #[must_use]
    pub const fn wardrobe(&self) -> &Wardrobe {
        &self.wardrobe
    }

    #[must_use]
    pub const fn skills(&self) -> &Skills {
        &self.skills
    }

    #[must_use]
    pub const fn flags(&self) -> &FlagSet {
        &self.flags
    }

    /// Header line used on every week page, e.g.
    /// `Depressed (2F4D), K: 0, Ca: 0, Na: 0, G: 10000, R: 12000`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{}, {}", self.mood.describe(), self.resources.summary())
    }

    /// Stable 64-bit digest over the exact bits of every field.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = XxHash64::with_seed(0);
        for axis in self.mood.axes() {
            hasher.write_i32(axis);
        }
        for value in self.resources.values() {
            hasher.write_u64(value.to_bits());
        }
        hasher.write_usize(self.wardrobe.current().slot().map_or(0, |slot| slot + 1));
        for unlocked in self.wardrobe.mask() {
            hasher.write_u8(u8::from(unlocked));
        }
        for value in self.skills.values() {
            hasher.write_u64(value.to_bits());
        }
        for flag in self.flags.iter() {
            hasher.write(flag.as_bytes());
            hasher.write_u8(0xff);
        }
        hasher.finish()
    }

    /// Whether `outfit` can be worn right now.
    #[must_use]
    pub const fn can_equip(&self, outfit: Outfit) -> bool {
        self.wardrobe.is_unlocked(outfit)
    }
}
