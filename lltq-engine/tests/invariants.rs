mod common;

use lltq_engine::{
    ContentPack, EngineError, Outfit, Page, ProgressCache, PrologueContent, SimulationConfig,
    WeekChoices, WorldState,
};

const PLANS: u64 = 48;

/// Pack that swings the mood hard in both directions every week.
struct Storm;

const SWINGS: [&str; 6] = ["5A3C", "-2A4F", "I5W", "-9C5L", "2Y3P-I", "A-FD"];

impl ContentPack for Storm {
    fn name(&self) -> &str {
        "storm"
    }

    fn setup(&self, state: &WorldState) -> Result<WorldState, EngineError> {
        state.apply_mood("4D2L")
    }

    fn run_week(
        &self,
        week: u8,
        state: &WorldState,
        _choices: &WeekChoices,
        page: &mut Page,
    ) -> Result<WorldState, EngineError> {
        let swing = SWINGS[usize::from(week) % SWINGS.len()];
        page.line(swing);
        state.apply_mood(swing)
    }
}

fn check_calendar<P: ContentPack>(cache: &ProgressCache<P>, seed: u64) {
    for week in 0..=common::FINAL_WEEK {
        let state = cache
            .state(week)
            .unwrap_or_else(|| panic!("seed {seed}: week {week} not computed"));

        let axes = state.mood().axes();
        assert!(axes[0] >= 0, "seed {seed} week {week}: injury {}", axes[0]);
        assert!(
            axes[1..].iter().all(|value| (-5..=5).contains(value)),
            "seed {seed} week {week}: mood {axes:?}"
        );
        assert!(
            state
                .skills()
                .values()
                .iter()
                .all(|value| (0.0..=100.0).contains(value)),
            "seed {seed} week {week}: skill out of range"
        );
        assert!(state.is_unlocked(state.current_outfit()));

        if week == 0 {
            continue;
        }
        let previous = cache.state(week - 1).unwrap();
        assert!(
            state.flags().is_superset(previous.flags()),
            "seed {seed} week {week}: a flag was removed"
        );
        for outfit in Outfit::ALL {
            assert!(
                !previous.is_unlocked(outfit) || state.is_unlocked(outfit),
                "seed {seed} week {week}: {outfit} was locked again"
            );
        }

        let page = cache.page(week).unwrap();
        assert_eq!(page.summary, previous.summary());
        assert_eq!(page.weekend.is_none(), week == common::FINAL_WEEK);
    }
}

#[test]
fn random_prologue_plans_respect_state_bounds() {
    for seed in 0..PLANS {
        let plan = common::prologue_plan(seed);
        let cache =
            ProgressCache::from_log(PrologueContent, SimulationConfig::default(), &plan).unwrap();
        check_calendar(&cache, seed);
    }
}

#[test]
fn mood_swings_stay_clamped() {
    for seed in 0..PLANS / 4 {
        let plan = common::random_plan(&Storm, seed);
        let cache = ProgressCache::from_log(Storm, SimulationConfig::default(), &plan).unwrap();
        check_calendar(&cache, seed);
    }
}

#[test]
fn long_training_reaches_the_novice_cap_and_unlocks() {
    let mut cache = ProgressCache::new(PrologueContent, SimulationConfig::default()).unwrap();
    let outfit = Outfit::Weapons;
    let skills = outfit.skills();
    for week in 1..=common::FINAL_WEEK {
        let pair = (usize::from(week) * 2) % skills.len();
        let morning = skills[pair];
        let evening = skills[(pair + 1) % skills.len()];
        cache
            .record(week, WeekChoices::default().with_training(morning, evening))
            .unwrap();
    }
    cache.sweep().unwrap();
    let last = cache.final_state().unwrap();
    assert!(last.is_unlocked(outfit));
    let unlocked_at = (1..=common::FINAL_WEEK)
        .find(|week| cache.state(*week).unwrap().is_unlocked(outfit))
        .unwrap();
    let before = cache.state(unlocked_at - 1).unwrap();
    assert!(skills.iter().any(|skill| before.skill(*skill) < 25.0));
    assert!(
        skills
            .iter()
            .all(|skill| cache.state(unlocked_at).unwrap().skill(*skill) >= 25.0)
    );
}
