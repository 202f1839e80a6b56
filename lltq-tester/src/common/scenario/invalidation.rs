use anyhow::{Context, Result, ensure};
use lltq_engine::{ContentPack, EntryStatus, ProgressCache, PrologueContent, Skill, WeekChoices};

use super::ScenarioCtx;

/// Edit an early, a middle and the last week; the prefix must survive
/// untouched and the result must equal a fresh replay of the edited plan.
pub fn run(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let final_week = ctx.config.final_week;
    let mut weeks = vec![1, final_week / 2, final_week];
    weeks.dedup();

    for week in weeks {
        let mut cache = ctx.replay()?;
        let before = cache.fingerprints();
        let edited = toggled(cache.choices().get(week));

        let report = cache
            .edit(week, edited.clone())
            .with_context(|| format!("editing week {week}"))?;
        ensure!(
            report.first() == Some(week),
            "edit of week {week} started recomputing at {:?}",
            report.first()
        );
        ensure!(
            report.recomputed.len() == usize::from(final_week - week) + 1,
            "edit of week {week} recomputed {} weeks",
            report.recomputed.len()
        );

        let after = cache.fingerprints();
        let prefix = usize::from(week);
        ensure!(
            before[..prefix] == after[..prefix],
            "edit of week {week} changed an earlier week"
        );
        ensure!(
            (0..=final_week).all(|w| cache.status(w) == Some(EntryStatus::Clean)),
            "edit of week {week} left stale entries"
        );

        let mut plan = ctx.input.plan.clone();
        plan.record(week, final_week, edited, &PrologueContent.slots(week))?;
        let fresh = ProgressCache::from_log(PrologueContent, ctx.config.clone(), &plan)?;
        ensure!(
            fresh.fingerprints() == after,
            "incremental edit of week {week} disagrees with a fresh replay"
        );
    }
    Ok(())
}

/// A different set of choices for the same week.
fn toggled(current: &WeekChoices) -> WeekChoices {
    if current == WeekChoices::none() {
        WeekChoices::default().with_training(Skill::Dance, Skill::Swords)
    } else {
        WeekChoices::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_flips_between_empty_and_training() {
        let trained = toggled(WeekChoices::none());
        assert_eq!(trained.morning, Some(Skill::Dance));
        assert_eq!(&toggled(&trained), WeekChoices::none());
    }
}
