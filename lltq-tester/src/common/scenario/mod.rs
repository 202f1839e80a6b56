use anyhow::{Context, Result};
use lltq_engine::{ProgressCache, PrologueContent, SimulationConfig};

use crate::logic::PlanInput;

pub mod bounds;
pub mod invalidation;
pub mod replay;
pub mod smoke;

/// Everything a scenario check sees for one plan.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioCtx<'a> {
    pub input: &'a PlanInput,
    pub config: &'a SimulationConfig,
    pub verbose: bool,
}

impl ScenarioCtx<'_> {
    /// Fresh cache over the built-in pack, swept through the whole plan.
    pub fn replay(&self) -> Result<ProgressCache<PrologueContent>> {
        ProgressCache::from_log(PrologueContent, self.config.clone(), &self.input.plan)
            .with_context(|| format!("replaying {}", self.input.label))
    }
}

pub type ScenarioCheck = fn(&ScenarioCtx<'_>) -> Result<()>;

#[derive(Debug, Clone)]
pub struct TestScenario {
    pub key: &'static str,
    pub name: &'static str,
    pub check: ScenarioCheck,
}

impl TestScenario {
    #[must_use]
    pub const fn new(key: &'static str, name: &'static str, check: ScenarioCheck) -> Self {
        Self { key, name, check }
    }

    pub fn run(&self, ctx: &ScenarioCtx<'_>) -> Result<()> {
        (self.check)(ctx)
    }
}

const SCENARIOS: [TestScenario; 4] = [
    TestScenario::new("smoke", "Smoke Test", smoke::run),
    TestScenario::new("replay", "Deterministic Replay", replay::run),
    TestScenario::new("invalidation", "Forward Invalidation", invalidation::run),
    TestScenario::new("bounds", "State Bounds", bounds::run),
];

pub fn get_scenario(name: &str) -> Option<TestScenario> {
    let name = name.to_lowercase();
    let key = match name.as_str() {
        "deterministic" | "determinism" => "replay",
        "edit" | "invalidate" => "invalidation",
        "invariants" => "bounds",
        other => other,
    };
    SCENARIOS.iter().find(|scenario| scenario.key == key).cloned()
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS
        .iter()
        .map(|scenario| (scenario.key, scenario.name))
        .collect()
}

/// Expand `all` into every registered scenario, keeping explicit order.
pub fn expand_scenarios(requested: &[String]) -> Vec<String> {
    let mut scenarios: Vec<String> = requested
        .iter()
        .filter(|name| !name.eq_ignore_ascii_case("all"))
        .cloned()
        .collect();
    if requested.iter().any(|name| name.eq_ignore_ascii_case("all")) {
        for scenario in &SCENARIOS {
            if !scenarios.iter().any(|name| name == scenario.key) {
                scenarios.push(scenario.key.to_string());
            }
        }
    }
    scenarios
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_registered_scenarios() {
        assert_eq!(get_scenario("Smoke").map(|s| s.key), Some("smoke"));
        assert_eq!(get_scenario("determinism").map(|s| s.key), Some("replay"));
        assert_eq!(get_scenario("invariants").map(|s| s.key), Some("bounds"));
        assert!(get_scenario("weather").is_none());
    }

    #[test]
    fn all_expands_after_explicit_names() {
        let expanded = expand_scenarios(&["bounds".to_string(), "all".to_string()]);
        assert_eq!(expanded, vec!["bounds", "smoke", "replay", "invalidation"]);
    }

    #[test]
    fn listing_covers_every_scenario() {
        let listed = list_scenarios();
        assert_eq!(listed.len(), SCENARIOS.len());
        assert!(listed.iter().all(|(key, _)| get_scenario(key).is_some()));
    }
}
