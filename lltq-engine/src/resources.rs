//! Free-form numeric counters (kills, approval, gold, soldiers).
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::RESOURCE_COUNT;
use crate::error::EngineError;
use crate::numbers::format_counter;
use crate::state::WorldState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Resource {
    Kills,
    CommonerApproval,
    NobleApproval,
    Gold,
    Soldiers,
}

impl Resource {
    pub const ALL: [Self; RESOURCE_COUNT] = [
        Self::Kills,
        Self::CommonerApproval,
        Self::NobleApproval,
        Self::Gold,
        Self::Soldiers,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Kills => "K",
            Self::CommonerApproval => "Ca",
            Self::NobleApproval => "Na",
            Self::Gold => "G",
            Self::Soldiers => "R",
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Resource {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|resource| resource.key() == s)
            .ok_or_else(|| EngineError::UnknownResource(s.to_string()))
    }
}

impl TryFrom<String> for Resource {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Resource> for String {
    fn from(value: Resource) -> Self {
        value.key().to_string()
    }
}

/// Resource counters. No bounds are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Resources {
    values: [f64; RESOURCE_COUNT],
}

impl Resources {
    #[must_use]
    pub const fn read(&self, resource: Resource) -> f64 {
        self.values[resource.index()]
    }

    #[must_use]
    pub const fn values(&self) -> [f64; RESOURCE_COUNT] {
        self.values
    }

    /// Add every delta in order. The same resource may appear more than once.
    #[must_use]
    pub fn apply<I>(&self, deltas: I) -> Self
    where
        I: IntoIterator<Item = (Resource, f64)>,
    {
        let mut next = *self;
        for (resource, amount) in deltas {
            next.values[resource.index()] += amount;
        }
        next
    }

    /// `K: 0, Ca: 0, Na: 0, G: 10000, R: 12000`
    #[must_use]
    pub fn summary(&self) -> String {
        Resource::ALL
            .iter()
            .map(|resource| format!("{}: {}", resource.key(), format_counter(self.read(*resource))))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl WorldState {
    #[must_use]
    pub fn apply_resources<I>(&self, deltas: I) -> Self
    where
        I: IntoIterator<Item = (Resource, f64)>,
    {
        self.with_changes(|state| state.resources = state.resources.apply(deltas))
    }

    #[must_use]
    pub const fn resource(&self, resource: Resource) -> f64 {
        self.resources.read(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_accumulate_without_bounds() {
        let resources = Resources::default()
            .apply([(Resource::Gold, 10_000.0), (Resource::Soldiers, 12_000.0)])
            .apply([(Resource::Gold, -0.25), (Resource::Kills, 0.5), (Resource::Kills, 0.5)])
            .apply([(Resource::CommonerApproval, -3.0)]);
        assert!((resources.read(Resource::Gold) - 9_999.75).abs() < f64::EPSILON);
        assert!((resources.read(Resource::Kills) - 1.0).abs() < f64::EPSILON);
        assert!((resources.read(Resource::CommonerApproval) + 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_lists_every_key_in_order() {
        let resources =
            Resources::default().apply([(Resource::Gold, 10_000.0), (Resource::Soldiers, 12_000.0)]);
        assert_eq!(
            resources.summary(),
            "K: 0, Ca: 0, Na: 0, G: 10000, R: 12000"
        );
    }

    #[test]
    fn keys_parse_and_reject_unknowns() {
        assert_eq!("Ca".parse::<Resource>().unwrap(), Resource::CommonerApproval);
        assert!(matches!(
            "gold".parse::<Resource>(),
            Err(EngineError::UnknownResource(key)) if key == "gold"
        ));
        let json = serde_json::to_string(&Resource::NobleApproval).unwrap();
        assert_eq!(json, "\"Na\"");
    }
}
