//! Seeded choice plans for replay runs and QA sweeps.
//!
//! Picks always fit the pack's declared slots, so every generated week
//! records cleanly. Outfits, skills and weekends are drawn from the full
//! catalogues, which makes stale choices show up often.
use log::warn;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::choices::{ChoiceLog, SlotSpec, WeekChoices};
use crate::content::{Activity, ContentPack};
use crate::skills::Skill;
use crate::wardrobe::Outfit;

pub const OUTFIT_CHANCE: f64 = 0.3;
pub const TRAINING_CHANCE: f64 = 0.9;
pub const WEEKEND_CHANCE: f64 = 0.8;
pub const PICK_CHANCE: f64 = 0.75;

/// Random but reproducible plan for weeks `1..=final_week`.
#[must_use]
pub fn generate_plan<P: ContentPack>(pack: &P, final_week: u8, seed: u64) -> ChoiceLog {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut log = ChoiceLog::default();
    for week in 1..=final_week {
        let slots = pack.slots(week);
        let choices = random_week(&mut rng, &slots);
        if let Err(err) = log.record(week, final_week, choices, &slots) {
            warn!("week {week}: generated choices rejected: {err}");
        }
    }
    log
}

fn random_week(rng: &mut ChaCha20Rng, slots: &[SlotSpec]) -> WeekChoices {
    let mut choices = WeekChoices::default();
    if rng.gen_bool(OUTFIT_CHANCE) {
        choices.outfit = Outfit::ALL.choose(rng).copied();
    }
    if rng.gen_bool(TRAINING_CHANCE) {
        choices.morning = Skill::ALL.choose(rng).copied();
        choices.evening = Skill::ALL.choose(rng).copied();
    }
    if rng.gen_bool(WEEKEND_CHANCE) {
        choices.weekend = Activity::ALL.choose(rng).copied();
    }
    for slot in slots {
        if rng.gen_bool(PICK_CHANCE) {
            choices.picks.insert(slot.key, rng.gen_range(1..=slot.options));
        }
    }
    choices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PrologueContent;

    #[test]
    fn generated_plans_are_reproducible() {
        let first = generate_plan(&PrologueContent, 40, 1337);
        let second = generate_plan(&PrologueContent, 40, 1337);
        assert_eq!(first, second);
        assert_ne!(first, generate_plan(&PrologueContent, 40, 1338));
    }

    #[test]
    fn generated_plans_stay_inside_the_calendar() {
        let plan = generate_plan(&PrologueContent, 12, 7);
        assert!(plan.weeks().all(|(week, _)| (1..=12).contains(&week)));
    }

    #[test]
    fn declared_picks_are_in_range() {
        let plan = generate_plan(&PrologueContent, 40, 11);
        for (week, choices) in plan.weeks() {
            let slots = PrologueContent.slots(week);
            for (key, option) in &choices.picks {
                let slot = slots.iter().find(|slot| slot.key == *key).unwrap();
                assert!((1..=slot.options).contains(option));
            }
        }
    }
}
