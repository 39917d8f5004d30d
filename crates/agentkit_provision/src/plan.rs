//! Deployment plan and dependency graph.
//!
//! The graph is small and fixed: each unit declares the units whose outputs
//! it consumes. Validation and stage derivation are still done generically
//! so a trimmed plan (a subset of units) is caught when it drops a
//! dependency another unit needs.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ProvisionError, ProvisionResult};

/// The five provisioning units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitKind {
    Registry,
    Identity,
    AgentRuntime,
    Api,
    Distribution,
}

impl UnitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registry => "registry",
            Self::Identity => "identity",
            Self::AgentRuntime => "agent-runtime",
            Self::Api => "api",
            Self::Distribution => "distribution",
        }
    }

    pub fn all() -> [Self; 5] {
        [
            Self::Registry,
            Self::Identity,
            Self::AgentRuntime,
            Self::Api,
            Self::Distribution,
        ]
    }

    /// Units whose outputs this unit consumes.
    pub fn depends_on(&self) -> &'static [UnitKind] {
        match self {
            Self::Registry => &[],
            Self::Identity => &[],
            Self::AgentRuntime => &[Self::Registry, Self::Identity],
            Self::Api => &[Self::Identity, Self::AgentRuntime],
            Self::Distribution => &[Self::Identity, Self::Api],
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ordered deployment plan over a set of units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub units: Vec<UnitKind>,
}

impl Plan {
    /// The full five-unit deployment.
    pub fn full() -> Self {
        Self {
            units: UnitKind::all().to_vec(),
        }
    }

    /// Validate the plan: every declared dependency must be present, and the
    /// graph must be acyclic.
    ///
    /// The static `depends_on` table cannot cycle today; the cycle branch
    /// guards plans whose edges come from configuration or a later
    /// data-driven unit set.
    pub fn validate(&self) -> ProvisionResult<()> {
        let present: HashSet<UnitKind> = self.units.iter().copied().collect();

        for unit in &self.units {
            for dep in unit.depends_on() {
                if !present.contains(dep) {
                    return Err(ProvisionError::MissingDependency {
                        unit: *unit,
                        dependency: *dep,
                    });
                }
            }
        }

        // Kahn's algorithm: anything left unplaced sits on a cycle.
        let mut placed: HashSet<UnitKind> = HashSet::new();
        let mut remaining: Vec<UnitKind> = self.units.clone();
        while !remaining.is_empty() {
            let ready: Vec<UnitKind> = remaining
                .iter()
                .copied()
                .filter(|u| u.depends_on().iter().all(|d| placed.contains(d)))
                .collect();
            if ready.is_empty() {
                return Err(ProvisionError::Cycle(remaining));
            }
            placed.extend(ready.iter().copied());
            remaining.retain(|u| !placed.contains(u));
        }

        Ok(())
    }

    /// Derive execution stages: units in the same stage have no dependency
    /// edge between them and may run concurrently; stages serialize.
    pub fn stages(&self) -> ProvisionResult<Vec<Vec<UnitKind>>> {
        self.validate()?;

        let mut stages = Vec::new();
        let mut placed: HashSet<UnitKind> = HashSet::new();
        let mut remaining: Vec<UnitKind> = self.units.clone();

        while !remaining.is_empty() {
            let ready: Vec<UnitKind> = remaining
                .iter()
                .copied()
                .filter(|u| u.depends_on().iter().all(|d| placed.contains(d)))
                .collect();
            placed.extend(ready.iter().copied());
            remaining.retain(|u| !placed.contains(u));
            stages.push(ready);
        }

        Ok(stages)
    }

    /// Units in the plan that transitively depend on `unit`.
    pub fn dependents_of(&self, unit: UnitKind) -> Vec<UnitKind> {
        let mut blocked: HashSet<UnitKind> = HashSet::new();
        blocked.insert(unit);
        // Fixed point over the small unit set.
        loop {
            let before = blocked.len();
            for candidate in &self.units {
                if candidate.depends_on().iter().any(|d| blocked.contains(d)) {
                    blocked.insert(*candidate);
                }
            }
            if blocked.len() == before {
                break;
            }
        }
        blocked.remove(&unit);
        self.units
            .iter()
            .copied()
            .filter(|u| blocked.contains(u))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_plan_validates() {
        assert!(Plan::full().validate().is_ok());
    }

    #[test]
    fn test_full_plan_stages() {
        let stages = Plan::full().stages().unwrap();
        assert_eq!(
            stages,
            vec![
                vec![UnitKind::Registry, UnitKind::Identity],
                vec![UnitKind::AgentRuntime],
                vec![UnitKind::Api],
                vec![UnitKind::Distribution],
            ]
        );
    }

    #[test]
    fn test_missing_dependency_rejected() {
        let plan = Plan {
            units: vec![UnitKind::Registry, UnitKind::AgentRuntime],
        };
        let err = plan.validate().unwrap_err();
        match err {
            ProvisionError::MissingDependency { unit, dependency } => {
                assert_eq!(unit, UnitKind::AgentRuntime);
                assert_eq!(dependency, UnitKind::Identity);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dependents_of_registry() {
        let plan = Plan::full();
        let mut blocked = plan.dependents_of(UnitKind::Registry);
        blocked.sort_by_key(|u| u.as_str());
        assert_eq!(
            blocked,
            vec![UnitKind::AgentRuntime, UnitKind::Api, UnitKind::Distribution]
        );
    }

    #[test]
    fn test_identity_has_no_upstream() {
        assert!(UnitKind::Identity.depends_on().is_empty());
        let plan = Plan::full();
        // Identity is independent of the registry subgraph.
        assert!(!plan.dependents_of(UnitKind::Registry).contains(&UnitKind::Identity));
    }
}
