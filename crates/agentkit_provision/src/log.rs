//! Persistent provisioning log.
//!
//! Saved as JSON under `.agentkit/logs/` after each unit so an interrupted
//! run leaves an inspectable record.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agentkit_cloud::StackOutputs;

use crate::error::{ProvisionError, ProvisionResult};
use crate::plan::UnitKind;

/// State of a single unit within a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnitState {
    Pending,
    Running,
    Completed,
    Failed,
    /// A dependency failed; this unit never started.
    Blocked,
}

/// Overall run state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionState {
    Pending,
    Running,
    Completed,
    Failed,
}

/// Record for one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitRecord {
    pub unit: UnitKind,
    pub state: UnitState,
    /// Failure message, when the unit failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl UnitRecord {
    pub fn pending(unit: UnitKind) -> Self {
        Self {
            unit,
            state: UnitState::Pending,
            message: None,
            started_at: None,
            completed_at: None,
        }
    }
}

/// Record of one provisioning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionLog {
    /// Unique run identifier.
    pub execution_id: String,
    pub state: ProvisionState,
    pub units: Vec<UnitRecord>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// First failure message, when the run failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Aggregate outputs; present only after a fully completed run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<StackOutputs>,
}

impl ProvisionLog {
    /// Create a pending log covering the given units.
    pub fn new(units: &[UnitKind]) -> Self {
        Self {
            execution_id: uuid::Uuid::new_v4().to_string(),
            state: ProvisionState::Pending,
            units: units.iter().copied().map(UnitRecord::pending).collect(),
            started_at: None,
            completed_at: None,
            error: None,
            outputs: None,
        }
    }

    /// Log file location for this run under a workspace root.
    pub fn log_path(&self, workspace: &Path) -> PathBuf {
        workspace
            .join(".agentkit")
            .join("logs")
            .join(format!("{}.json", self.execution_id))
    }

    /// Save the log to disk.
    pub fn save(&self, workspace: &Path) -> ProvisionResult<()> {
        let path = self.log_path(workspace);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ProvisionError::Serialization(e.to_string()))?;
        fs::write(&path, json)?;
        Ok(())
    }

    /// Load a log from disk.
    pub fn load(path: &Path) -> ProvisionResult<Self> {
        let content = fs::read_to_string(path)?;
        let log: Self = serde_json::from_str(&content)
            .map_err(|e| ProvisionError::Serialization(e.to_string()))?;
        Ok(log)
    }

    /// Mutable record for a unit. Panics only if the unit is not in the log,
    /// which the provisioner never does.
    pub(crate) fn record_mut(&mut self, unit: UnitKind) -> &mut UnitRecord {
        self.units
            .iter_mut()
            .find(|r| r.unit == unit)
            .expect("unit missing from provision log")
    }

    /// State of a unit within this run.
    pub fn unit_state(&self, unit: UnitKind) -> Option<UnitState> {
        self.units.iter().find(|r| r.unit == unit).map(|r| r.state)
    }

    /// The failed units, in plan order.
    pub fn failed_units(&self) -> Vec<UnitKind> {
        self.units
            .iter()
            .filter(|r| r.state == UnitState::Failed)
            .map(|r| r.unit)
            .collect()
    }

    /// Outputs of a fully completed run.
    pub fn require_outputs(&self) -> ProvisionResult<&StackOutputs> {
        self.outputs
            .as_ref()
            .ok_or(ProvisionError::OutputsUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Plan;
    use tempfile::tempdir;

    #[test]
    fn test_log_roundtrip() {
        let dir = tempdir().unwrap();
        let mut log = ProvisionLog::new(&Plan::full().units);
        log.state = ProvisionState::Running;
        log.record_mut(UnitKind::Registry).state = UnitState::Completed;

        log.save(dir.path()).unwrap();

        let loaded = ProvisionLog::load(&log.log_path(dir.path())).unwrap();
        assert_eq!(loaded.execution_id, log.execution_id);
        assert_eq!(loaded.unit_state(UnitKind::Registry), Some(UnitState::Completed));
        assert_eq!(loaded.unit_state(UnitKind::Api), Some(UnitState::Pending));
    }

    #[test]
    fn test_require_outputs_on_incomplete_run() {
        let log = ProvisionLog::new(&Plan::full().units);
        assert!(matches!(
            log.require_outputs(),
            Err(ProvisionError::OutputsUnavailable)
        ));
    }
}
