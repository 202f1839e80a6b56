use anyhow::{Context, Result, ensure};
use lltq_engine::{Outfit, WorldState};

use super::ScenarioCtx;

const MOOD_LIMIT: i32 = 5;
const SKILL_LIMIT: f64 = 100.0;

/// Every cached week keeps mood and skills in range and never loses a flag
/// or an unlocked outfit.
pub fn run(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let cache = ctx.replay()?;
    let mut previous: Option<&WorldState> = None;
    for week in 0..=cache.final_week() {
        let state = cache
            .state(week)
            .with_context(|| format!("week {week} not computed"))?;
        check_state(week, state)?;
        if let Some(previous) = previous {
            check_progression(week, previous, state)?;
        }
        previous = Some(state);
    }
    Ok(())
}

fn check_state(week: u8, state: &WorldState) -> Result<()> {
    let axes = state.mood().axes();
    ensure!(axes[0] >= 0, "week {week}: negative injury {}", axes[0]);
    ensure!(
        axes[1..].iter().all(|value| value.abs() <= MOOD_LIMIT),
        "week {week}: mood out of range {axes:?}"
    );
    if let Some(value) = state
        .skills()
        .values()
        .iter()
        .find(|value| !(0.0..=SKILL_LIMIT).contains(*value))
    {
        anyhow::bail!("week {week}: skill value {value} out of range");
    }
    ensure!(
        state.is_unlocked(state.current_outfit()),
        "week {week}: wearing locked outfit {}",
        state.current_outfit()
    );
    Ok(())
}

fn check_progression(week: u8, previous: &WorldState, state: &WorldState) -> Result<()> {
    ensure!(
        state.flags().is_superset(previous.flags()),
        "week {week}: a flag disappeared"
    );
    if let Some(outfit) = Outfit::ALL
        .into_iter()
        .find(|outfit| previous.is_unlocked(*outfit) && !state.is_unlocked(*outfit))
    {
        anyhow::bail!("week {week}: {outfit} was locked again");
    }
    Ok(())
}
