mod common;

use lltq_engine::{
    Activity, ContentPack, EngineError, EntryStatus, Page, ProgressCache, PrologueContent, SimulationConfig,
    Skill, SlotKey, SlotSpec, WeekChoices, WorldState,
};

/// Pack whose week 10 applies a malformed mood delta when the second option
/// is picked.
struct Fragile;

impl ContentPack for Fragile {
    fn name(&self) -> &str {
        "fragile"
    }

    fn setup(&self, state: &WorldState) -> Result<WorldState, EngineError> {
        Ok(state.clone())
    }

    fn run_week(
        &self,
        week: u8,
        state: &WorldState,
        choices: &WeekChoices,
        page: &mut Page,
    ) -> Result<WorldState, EngineError> {
        page.line(format!("Week {week} passes"));
        match (week, choices.event(1)) {
            (10, Some(2)) => state.apply_mood("2Q"),
            (10, Some(1)) => state.apply_mood("C"),
            _ => Ok(state.clone()),
        }
    }

    fn slots(&self, week: u8) -> Vec<SlotSpec> {
        if week == 10 {
            vec![SlotSpec::event(1, 2)]
        } else {
            Vec::new()
        }
    }
}

/// Pack that starts the tremors late in the calendar.
struct Quake;

impl ContentPack for Quake {
    fn name(&self) -> &str {
        "quake"
    }

    fn setup(&self, state: &WorldState) -> Result<WorldState, EngineError> {
        Ok(state.clone())
    }

    fn run_week(
        &self,
        week: u8,
        state: &WorldState,
        _choices: &WeekChoices,
        _page: &mut Page,
    ) -> Result<WorldState, EngineError> {
        Ok(if week == 30 {
            state.add_flag("Tremors")
        } else {
            state.clone()
        })
    }
}

fn dance() -> WeekChoices {
    WeekChoices::default().with_training(Skill::Dance, Skill::Dance)
}

#[test]
fn editing_a_week_keeps_the_prefix_and_recomputes_the_suffix() {
    let plan = common::prologue_plan(2024);
    for week in [1_u8, 5, 17, 39, 40] {
        let mut cache =
            ProgressCache::from_log(PrologueContent, SimulationConfig::default(), &plan).unwrap();
        let before = cache.fingerprints();
        let pages_before: Vec<_> = (0..week).map(|w| cache.page(w).cloned()).collect();

        let report = cache
            .edit(week, dance().with_weekend(Activity::Castle))
            .unwrap();
        assert_eq!(report.first(), Some(week));
        assert_eq!(
            report.recomputed,
            (week..=common::FINAL_WEEK).collect::<Vec<_>>()
        );

        let after = cache.fingerprints();
        assert_eq!(before[..usize::from(week)], after[..usize::from(week)]);
        let pages_after: Vec<_> = (0..week).map(|w| cache.page(w).cloned()).collect();
        assert_eq!(pages_before, pages_after);
    }
}

#[test]
fn record_alone_leaves_earlier_weeks_readable() {
    let plan = common::prologue_plan(5);
    let mut cache =
        ProgressCache::from_log(PrologueContent, SimulationConfig::default(), &plan).unwrap();
    cache.record(12, dance()).unwrap();
    cache.record(8, WeekChoices::default()).unwrap();
    assert_eq!(cache.first_stale(), Some(8));
    assert!(cache.state(7).is_some());
    assert!(cache.state(8).is_none());
    assert_eq!(cache.status(12), Some(EntryStatus::Dirty));

    let report = cache.sweep().unwrap();
    assert_eq!(report.first(), Some(8));
    assert!(cache.choices().get(8).picks.is_empty());
}

#[test]
fn failing_week_stays_dirty_until_its_choice_is_fixed() {
    let mut cache = ProgressCache::new(Fragile, SimulationConfig::default()).unwrap();
    cache.sweep().unwrap();
    let clean = cache.fingerprints();

    let broken = WeekChoices::default().with_pick(SlotKey::Event(1), 2);
    let err = cache.edit(10, broken).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Mood(_) | EngineError::UnknownMoodCode(_)
    ));
    assert_eq!(cache.status(9), Some(EntryStatus::Clean));
    assert_eq!(cache.first_stale(), Some(10));
    assert!((10..=common::FINAL_WEEK).all(|week| cache.state(week).is_none()));

    // Sweeping again fails the same way without touching earlier weeks.
    assert!(cache.sweep().is_err());
    assert_eq!(cache.fingerprints()[..10], clean[..10]);

    let report = cache
        .edit(10, WeekChoices::default().with_pick(SlotKey::Event(1), 1))
        .unwrap();
    assert_eq!(report.first(), Some(10));
    assert!(cache.first_stale().is_none());
    assert_ne!(cache.fingerprints()[10], clean[10]);
}

#[test]
fn tremors_skip_the_free_choice_after_the_trigger_week() {
    let mut cache = ProgressCache::new(Quake, SimulationConfig::default()).unwrap();
    for week in 35..=38 {
        cache.record(week, dance()).unwrap();
    }
    cache.sweep().unwrap();

    let dance_after = |week: u8| cache.state(week).unwrap().skill(Skill::Dance);
    assert!(dance_after(36) > dance_after(35));
    assert!((dance_after(37) - dance_after(36)).abs() < f64::EPSILON);
    assert!(dance_after(38) > dance_after(37));

    assert!(cache.page(37).unwrap().free_choice_skipped);
    assert!(!cache.page(38).unwrap().free_choice_skipped);
    assert!(cache.entry(36).unwrap().skip_next_free_choice);
}

#[test]
fn no_tremors_means_no_skip() {
    let mut cache = ProgressCache::new(PrologueContent, SimulationConfig::default()).unwrap();
    cache.record(37, dance()).unwrap();
    cache.sweep().unwrap();
    assert!(!cache.page(37).unwrap().free_choice_skipped);
    assert!(cache.state(37).unwrap().skill(Skill::Dance) > 0.0);
}
