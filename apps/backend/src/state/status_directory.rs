//! Process-wide Status Directory.
//!
//! An immutable, versioned snapshot of the stage catalogue. Every change
//! builds a new snapshot and swaps it in under one lock; readers clone the
//! `Arc` and never see a half-updated table. The version is the highest
//! activation sequence in the catalogue, so it follows commit order, and a
//! snapshot that is not newer than the installed one is dropped. Roles and statuses need no
//! lookup: their stable identifiers are the string codes of the closed enums
//! in `crate::entities`.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::stage_rules;
use crate::entities::stages::StageType;
use crate::repos::stages::Stage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageEntry {
    pub id: i64,
    pub name: String,
    pub stage_type: StageType,
    pub order: i32,
}

impl From<&Stage> for StageEntry {
    fn from(stage: &Stage) -> Self {
        Self {
            id: stage.id,
            name: stage.name.clone(),
            stage_type: stage.stage_type,
            order: stage.order,
        }
    }
}

#[derive(Debug, Default)]
pub struct DirectorySnapshot {
    version: u64,
    stages: Vec<StageEntry>,
    by_type: HashMap<StageType, usize>,
    active: Option<StageType>,
}

impl DirectorySnapshot {
    fn build(stages: &[Stage]) -> Self {
        let version = stages
            .iter()
            .map(|s| u64::try_from(s.activation_seq).unwrap_or(0))
            .max()
            .unwrap_or(0);
        let mut entries: Vec<StageEntry> = stages.iter().map(StageEntry::from).collect();
        entries.sort_by_key(|e| e.order);
        let by_type = entries
            .iter()
            .enumerate()
            .map(|(idx, e)| (e.stage_type, idx))
            .collect();
        Self {
            version,
            stages: entries,
            by_type,
            active: stages.iter().find(|s| s.is_active).map(|s| s.stage_type),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn stages(&self) -> &[StageEntry] {
        &self.stages
    }

    pub fn stage(&self, stage_type: StageType) -> Option<&StageEntry> {
        self.by_type.get(&stage_type).map(|idx| &self.stages[*idx])
    }

    pub fn stage_id(&self, stage_type: StageType) -> Option<i64> {
        self.stage(stage_type).map(|e| e.id)
    }

    /// Active stage when the snapshot was taken. Not authoritative; see
    /// `repos::stages::current_stage`.
    pub fn active(&self) -> Option<StageType> {
        self.active
    }

    /// Stages an administrator may activate next from `current`.
    pub fn available_transitions(&self, current: StageType) -> Vec<StageEntry> {
        let Some(current) = self.stage(current) else {
            return Vec::new();
        };
        self.stages
            .iter()
            .filter(|e| stage_rules::is_adjacent(current.order, e.order))
            .filter(|e| stage_rules::is_manually_reachable(e.stage_type))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusDirectory {
    current: Arc<RwLock<Arc<DirectorySnapshot>>>,
}

impl StatusDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<DirectorySnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Replace the snapshot wholesale with one built from `stages`.
    ///
    /// Returns the new version, or `None` when the installed snapshot is
    /// already as new: a writer that committed earlier but got here later
    /// must not roll the directory back.
    pub fn install(&self, stages: &[Stage]) -> Option<u64> {
        let next = DirectorySnapshot::build(stages);
        let mut guard = self.current.write();
        if next.version <= guard.version {
            return None;
        }
        let version = next.version;
        *guard = Arc::new(next);
        Some(version)
    }
}
