use anyhow::{Context, Result, bail};
use lltq_engine::{ChoiceLog, ContentPack, SimulationConfig, generate_plan};
use std::fs;
use std::path::Path;

/// One choice plan to replay, with the label reports show for it.
#[derive(Debug, Clone)]
pub struct PlanInput {
    pub label: String,
    pub seed: Option<u64>,
    pub plan: ChoiceLog,
}

impl PlanInput {
    /// Seeded plan covering every week of the calendar.
    #[must_use]
    pub fn from_seed<P: ContentPack>(pack: &P, final_week: u8, seed: u64) -> Self {
        Self {
            label: format!("seed {seed}"),
            seed: Some(seed),
            plan: generate_plan(pack, final_week, seed),
        }
    }

    /// Plan read from a JSON document.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self {
            label: path.display().to_string(),
            seed: None,
            plan: load_plan(path)?,
        })
    }
}

/// Resolve the CLI plan sources: an explicit plan file wins over seeds.
pub fn resolve_plan_inputs<P: ContentPack>(
    pack: &P,
    final_week: u8,
    plan: Option<&Path>,
    seed_tokens: &[String],
) -> Result<Vec<PlanInput>> {
    if let Some(path) = plan {
        return Ok(vec![PlanInput::from_file(path)?]);
    }

    let mut inputs = Vec::new();
    for token in seed_tokens {
        let Ok(seed) = token.parse::<u64>() else {
            bail!("invalid seed `{token}` (expected an unsigned integer)");
        };
        inputs.push(PlanInput::from_seed(pack, final_week, seed));
    }
    if inputs.is_empty() {
        bail!("no plans to replay: pass --plan or at least one seed");
    }
    Ok(inputs)
}

pub fn load_plan(path: &Path) -> Result<ChoiceLog> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read plan {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse plan {}", path.display()))
}

/// Load a configuration override, or the embedded default.
pub fn load_config(path: Option<&Path>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::default_config());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    SimulationConfig::from_json(&raw)
        .with_context(|| format!("invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lltq_engine::PrologueContent;

    #[test]
    fn seeded_inputs_are_labelled_and_reproducible() {
        let input = PlanInput::from_seed(&PrologueContent, 40, 1337);
        assert_eq!(input.label, "seed 1337");
        assert_eq!(input.seed, Some(1337));
        assert_eq!(input.plan, generate_plan(&PrologueContent, 40, 1337));
    }

    #[test]
    fn plan_file_wins_over_seeds() {
        let path = std::env::temp_dir().join("lltq-plan-inputs.json");
        fs::write(&path, r#"{"2": {"picks": {"1": 3}}}"#).unwrap();
        let inputs = resolve_plan_inputs(
            &PrologueContent,
            40,
            Some(&path),
            &["1".to_string(), "2".to_string()],
        )
        .unwrap();
        assert_eq!(inputs.len(), 1);
        assert!(inputs[0].seed.is_none());
        assert_eq!(inputs[0].plan.get(2).event(1), Some(3));
    }

    #[test]
    fn bad_seed_tokens_are_rejected() {
        let err = resolve_plan_inputs(&PrologueContent, 40, None, &["abc".to_string()])
            .unwrap_err();
        assert!(err.to_string().contains("invalid seed"));
        assert!(resolve_plan_inputs(&PrologueContent, 40, None, &[]).is_err());
    }

    #[test]
    fn missing_config_path_uses_embedded_default() {
        let config = load_config(None).unwrap();
        assert_eq!(config.final_week, 40);

        let path = std::env::temp_dir().join("lltq-bad-config.json");
        fs::write(&path, r#"{"final_week": 0}"#).unwrap();
        assert!(load_config(Some(&path)).is_err());
    }
}
