//! Directory sweep for the convective-flame exploration runs.
//!
//! Each swept variable has a `low` and a `high` run directory, e.g.
//! `NU/low` and `NU/high`, plus one shared `reference` run.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

pub const DEFAULT_EXECUTABLE: &str = "./Castro2d.gnu.MPI.ex";
pub const DEFAULT_INPUTS: &str = "inputs.2d";
pub const REFERENCE_DIR: &str = "reference";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SweepVariable {
    pub name: String,
    pub low: String,
    pub high: String,
}

impl SweepVariable {
    fn low_high(name: &str) -> Self {
        Self {
            name: name.to_string(),
            low: "low".to_string(),
            high: "high".to_string(),
        }
    }
}

/// Ordered list of swept variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SweepTable {
    pub variables: Vec<SweepVariable>,
}

impl Default for SweepTable {
    fn default() -> Self {
        let names = [
            "ROT_PERIOD",
            "X_PERT_LOC",
            "NU",
            "Q_BURN",
            "COND",
            "PERT_WIDTH",
            "T_BURN_REF",
            "PERT_FACTOR",
            "RTILDE",
            "T_BASE",
        ];
        Self {
            variables: names.into_iter().map(SweepVariable::low_high).collect(),
        }
    }
}

impl SweepTable {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Reading {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Parsing sweep table {}", path.display()))
    }

    /// `name/low`, `name/high` for every variable in order, then `reference`.
    pub fn directories(&self) -> Vec<PathBuf> {
        self.variables
            .iter()
            .flat_map(|v| [Path::new(&v.name).join(&v.low), Path::new(&v.name).join(&v.high)])
            .chain(std::iter::once(PathBuf::from(REFERENCE_DIR)))
            .collect()
    }
}

/// Launches the simulation once per directory, one after another.
#[derive(Debug, Clone)]
pub struct SweepRunner {
    pub executable: PathBuf,
    pub inputs: String,
}

impl Default for SweepRunner {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            inputs: DEFAULT_INPUTS.to_string(),
        }
    }
}

/// What happened in one directory.
#[derive(Debug)]
pub enum RunOutcome {
    Finished(std::process::ExitStatus),
    SpawnFailed(std::io::Error),
}

impl SweepRunner {
    /// Run `executable inputs` with `dir` as the child's working directory.
    pub fn run_one(&self, dir: &Path) -> RunOutcome {
        info!("{}: {} {}", dir.display(), self.executable.display(), self.inputs);
        match Command::new(&self.executable)
            .arg(&self.inputs)
            .current_dir(dir)
            .status()
        {
            Ok(status) => {
                info!("{}: {}", dir.display(), status);
                RunOutcome::Finished(status)
            }
            Err(e) => {
                warn!("{}: could not launch {}: {}", dir.display(), self.executable.display(), e);
                RunOutcome::SpawnFailed(e)
            }
        }
    }

    /// Visit every directory. Failures are logged and the sweep carries on.
    pub fn run(&self, dirs: &[PathBuf]) -> Vec<RunOutcome> {
        dirs.iter().map(|d| self.run_one(d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directories() {
        let dirs = SweepTable::default().directories();

        assert_eq!(dirs.len(), 21);
        assert_eq!(dirs[0], PathBuf::from("ROT_PERIOD/low"));
        assert_eq!(dirs[1], PathBuf::from("ROT_PERIOD/high"));
        assert_eq!(dirs[4], PathBuf::from("NU/low"));
        assert_eq!(dirs[19], PathBuf::from("T_BASE/high"));
        assert_eq!(dirs[20], PathBuf::from("reference"));
    }

    #[test]
    fn test_table_from_json_keeps_order() {
        let table = SweepTable::from_json(
            r#"[
                { "name": "NU", "low": "lo", "high": "hi" },
                { "name": "COND", "low": "low", "high": "high" }
            ]"#,
        )
        .unwrap();

        assert_eq!(
            table.directories(),
            vec![
                PathBuf::from("NU/lo"),
                PathBuf::from("NU/hi"),
                PathBuf::from("COND/low"),
                PathBuf::from("COND/high"),
                PathBuf::from("reference"),
            ]
        );
    }

    #[test]
    fn test_empty_table_still_has_reference() {
        let table = SweepTable::from_json("[]").unwrap();
        assert_eq!(table.directories(), vec![PathBuf::from("reference")]);
    }

    #[test]
    fn test_missing_directory_does_not_stop_the_sweep() {
        let runner = SweepRunner::default();
        let dirs = vec![
            PathBuf::from("/nonexistent/sweep/a"),
            PathBuf::from("/nonexistent/sweep/b"),
        ];
        let outcomes = runner.run(&dirs);
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| matches!(o, RunOutcome::SpawnFailed(_))));
    }
}
