mod common;

use lltq_engine::{
    Activity, ChoiceLog, ContentPack, EntryStatus, ProgressCache, PrologueContent, Resource,
    SimulationConfig, Skill, SlotKey, WeekChoices,
};

const PLAN_JSON: &str = r#"{
    "1": {"morning": "reflexes", "evening": "dance", "weekend": "charlotte"},
    "2": {"morning": "swords", "evening": "archery", "weekend": "father", "picks": {"1": 3}},
    "3": {"morning": "composure", "evening": "elegance", "weekend": "julianna", "picks": {"1": 1}},
    "4": {"morning": "court", "evening": "flattery"},
    "5": {"morning": "court", "evening": "public", "picks": {"1": 1}}
}"#;

fn replay(log: &ChoiceLog) -> ProgressCache<PrologueContent> {
    ProgressCache::from_log(PrologueContent, SimulationConfig::default(), log).unwrap()
}

#[test]
fn identical_plans_give_identical_fingerprints() {
    for seed in [1_u64, 7, 1337, 0xdead_beef] {
        let plan = common::prologue_plan(seed);
        let first = replay(&plan);
        let second = replay(&plan);
        assert_eq!(first.fingerprints(), second.fingerprints(), "seed {seed}");
        for week in 0..=common::FINAL_WEEK {
            assert_eq!(first.state(week), second.state(week));
            assert_eq!(first.page(week), second.page(week));
        }
    }
}

#[test]
fn rebuild_reproduces_the_same_calendar() {
    let mut cache = replay(&common::prologue_plan(42));
    let before = cache.fingerprints();
    let report = cache.rebuild().unwrap();
    assert_eq!(report.recomputed.len(), usize::from(common::FINAL_WEEK));
    assert_eq!(cache.fingerprints(), before);
}

#[test]
fn json_plan_drives_the_prologue() {
    let plan: ChoiceLog = serde_json::from_str(PLAN_JSON).unwrap();
    let cache = replay(&plan);

    let week_two = cache.state(2).unwrap();
    assert!(week_two.has_flag("Mentor"));
    assert!(week_two.has_flag("Heartless"));

    // Julianna is reachable in week 3 only because of week 2's choice.
    let week_three = cache.state(3).unwrap();
    assert!(week_three.has_flag("Protector"));
    assert!(week_three.has_flag("Inheritance"));

    let week_five = cache.state(5).unwrap();
    assert!(week_five.skill(Skill::CourtManners) >= 10.0);
    assert!(week_five.has_flag("Finery"));
    assert!((week_five.resource(Resource::CommonerApproval) + 3.0).abs() < 1e-9);

    let page = cache.page(3).unwrap();
    assert_eq!(page.header(), "Week 3");
    assert_eq!(page.summary, cache.state(2).unwrap().summary());
    assert!(page.event.lines().iter().any(|line| line == "Hidden Danger"));
}

#[test]
fn incremental_edits_match_a_fresh_replay() {
    let plan = common::prologue_plan(99);
    let mut cache = ProgressCache::new(PrologueContent, SimulationConfig::default()).unwrap();
    cache.sweep().unwrap();
    // Apply the plan back to front so every edit invalidates a long suffix.
    let weeks: Vec<_> = plan.weeks().map(|(week, choices)| (week, choices.clone())).collect();
    for (week, choices) in weeks.into_iter().rev() {
        cache.edit(week, choices).unwrap();
    }
    assert_eq!(cache.fingerprints(), replay(&plan).fingerprints());
    assert!((0..=common::FINAL_WEEK).all(|week| cache.status(week) == Some(EntryStatus::Clean)));
}

#[test]
fn recorded_plan_serializes_back_to_json() {
    let mut log = ChoiceLog::default();
    log.record(
        2,
        common::FINAL_WEEK,
        WeekChoices::default()
            .with_training(Skill::Herbs, Skill::Poison)
            .with_weekend(Activity::Dungeons)
            .with_pick(SlotKey::Event(1), 2)
            .with_pick(SlotKey::Weekend('a'), 1),
        &PrologueContent.slots(2),
    )
    .unwrap();
    let json = serde_json::to_value(&log).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "2": {
                "morning": "herbs",
                "evening": "poison",
                "weekend": "dungeons",
                "picks": {"1": 2, "a": 1}
            }
        })
    );
}
