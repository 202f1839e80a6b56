use anyhow::{Result, ensure};

use super::ScenarioCtx;

/// Two independent sweeps and a rebuild agree on every fingerprint.
pub fn run(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let mut first = ctx.replay()?;
    let second = ctx.replay()?;
    let expected = first.fingerprints();

    if let Some(week) = first_mismatch(&expected, &second.fingerprints()) {
        anyhow::bail!("independent replays diverge at week {week}");
    }

    let report = first.rebuild()?;
    ensure!(
        report.recomputed.len() == usize::from(first.final_week()),
        "rebuild recomputed {} weeks",
        report.recomputed.len()
    );
    if let Some(week) = first_mismatch(&expected, &first.fingerprints()) {
        anyhow::bail!("rebuild diverges at week {week}");
    }
    Ok(())
}

fn first_mismatch(left: &[Option<u64>], right: &[Option<u64>]) -> Option<usize> {
    left.iter()
        .zip(right)
        .position(|(a, b)| a != b)
        .or_else(|| (left.len() != right.len()).then(|| left.len().min(right.len())))
}
