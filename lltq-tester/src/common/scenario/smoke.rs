use anyhow::{Context, Result, ensure};
use colored::Colorize;

use super::ScenarioCtx;

/// One full sweep: every week computes and renders a page.
pub fn run(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let cache = ctx.replay()?;
    let final_week = cache.final_week();
    ensure!(
        cache.first_stale().is_none(),
        "week {:?} is still stale after a full sweep",
        cache.first_stale()
    );

    for week in 1..=final_week {
        let page = cache
            .page(week)
            .with_context(|| format!("week {week} has no page"))?;
        ensure!(page.header() == format!("Week {week}"), "week {week} header mismatch");
        ensure!(!page.event.is_empty(), "week {week} rendered no event text");
    }

    let last = cache.final_state().context("final week missing")?;
    if ctx.verbose {
        println!("     ↳ {} final: {}", ctx.input.label, last.summary().dimmed());
    }
    Ok(())
}
