//! In-process tracker backed by plain collections.
//!
//! Answers the same queries as the REST client. Updates are applied to the
//! stored records and also kept in a log for inspection.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};
use subwriter_model::{Playlist, Project, Shot, VersionRecord};

use crate::Tracker;
use crate::error::{Result, TrackerError};

#[derive(Debug, Clone)]
struct StoredVersion {
    record: VersionRecord,
    shot_id: Option<u64>,
}

/// A tracker whose data lives in memory.
#[derive(Debug, Default)]
pub struct MemoryTracker {
    project: Project,
    playlists: Vec<Playlist>,
    shots: Vec<Shot>,
    versions: RefCell<BTreeMap<u64, StoredVersion>>,
    rejected_updates: BTreeSet<u64>,
    offline: bool,
    updates: RefCell<Vec<(u64, Map<String, Value>)>>,
}

impl MemoryTracker {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_playlist(mut self, playlist: Playlist) -> Self {
        self.playlists.push(playlist);
        self
    }

    #[must_use]
    pub fn with_shot(mut self, shot: Shot) -> Self {
        self.shots.push(shot);
        self
    }

    /// Adds a version, optionally linked to a shot.
    #[must_use]
    pub fn with_version(mut self, record: VersionRecord, shot_id: Option<u64>) -> Self {
        self.versions
            .get_mut()
            .insert(record.id, StoredVersion { record, shot_id });
        self
    }

    /// Makes updates to the given version fail with an API error.
    #[must_use]
    pub fn rejecting_updates_for(mut self, id: u64) -> Self {
        self.rejected_updates.insert(id);
        self
    }

    /// Makes every call fail as if the server were unreachable.
    #[must_use]
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    /// Updates received so far, in order.
    pub fn updates(&self) -> Vec<(u64, Map<String, Value>)> {
        self.updates.borrow().clone()
    }

    /// Current attributes of a stored version.
    pub fn version(&self, id: u64) -> Option<VersionRecord> {
        self.versions
            .borrow()
            .get(&id)
            .map(|stored| stored.record.clone())
    }

    fn check_online(&self) -> Result<()> {
        if self.offline {
            Err(TrackerError::Network("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Copies only the requested fields, as the server would.
fn select_fields(record: &VersionRecord, fields: &[String]) -> VersionRecord {
    let attributes = fields
        .iter()
        .filter_map(|field| {
            record
                .get(field)
                .map(|value| (field.clone(), value.clone()))
        })
        .collect();
    VersionRecord {
        id: record.id,
        attributes,
    }
}

impl Tracker for MemoryTracker {
    fn project(&self) -> &Project {
        &self.project
    }

    fn find_playlists(&self) -> Result<Vec<Playlist>> {
        self.check_online()?;
        Ok(self.playlists.clone())
    }

    fn find_version(&self, id: u64, fields: &[String]) -> Result<Option<VersionRecord>> {
        self.check_online()?;
        Ok(self
            .versions
            .borrow()
            .get(&id)
            .map(|stored| select_fields(&stored.record, fields)))
    }

    fn find_shots(&self) -> Result<Vec<Shot>> {
        self.check_online()?;
        Ok(self.shots.clone())
    }

    fn find_shot_versions(&self, shot: &Shot, fields: &[String]) -> Result<Vec<VersionRecord>> {
        self.check_online()?;
        Ok(self
            .versions
            .borrow()
            .values()
            .filter(|stored| stored.shot_id == Some(shot.id))
            .map(|stored| select_fields(&stored.record, fields))
            .collect())
    }

    fn update_version(&self, id: u64, fields: &Map<String, Value>) -> Result<()> {
        self.check_online()?;
        let mut versions = self.versions.borrow_mut();
        let stored = versions
            .get_mut(&id)
            .filter(|_| !self.rejected_updates.contains(&id))
            .ok_or_else(|| TrackerError::Api {
                status: 400,
                message: format!("cannot update version {id}"),
            })?;
        for (key, value) in fields {
            stored.record.attributes.insert(key.clone(), value.clone());
        }
        self.updates.borrow_mut().push((id, fields.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tracker() -> MemoryTracker {
        MemoryTracker::new(Project::new(1))
            .with_shot(Shot {
                id: 10,
                code: "sh010".to_string(),
                tasks: Vec::new(),
            })
            .with_version(
                VersionRecord::new(100)
                    .with_attribute("code", "sh010_comp_v001")
                    .with_attribute("sg_status_list", "rev"),
                Some(10),
            )
            .with_version(VersionRecord::new(200).with_attribute("code", "orphan"), None)
    }

    #[test]
    fn test_find_version_selects_fields() {
        let version = tracker()
            .find_version(100, &["code".to_string()])
            .unwrap()
            .unwrap();
        assert_eq!(version.code(), "sh010_comp_v001");
        assert!(version.get("sg_status_list").is_none());
    }

    #[test]
    fn test_shot_versions() {
        let tracker = tracker();
        let shot = tracker.find_shots().unwrap().remove(0);
        let versions = tracker
            .find_shot_versions(&shot, &["code".to_string()])
            .unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].id, 100);
    }

    #[test]
    fn test_updates_are_recorded() {
        let tracker = tracker().rejecting_updates_for(200);
        let mut fields = Map::new();
        fields.insert("sg_height".to_string(), json!("1.0 -> 2.0"));

        tracker.update_version(100, &fields).unwrap();
        assert!(tracker.update_version(200, &fields).is_err());
        assert!(tracker.update_version(300, &fields).is_err());

        assert_eq!(tracker.updates(), vec![(100, fields)]);
        assert_eq!(tracker.version(100).unwrap().display("sg_height"), "1.0 -> 2.0");
    }

    #[test]
    fn test_offline() {
        let tracker = tracker().offline();
        let err = tracker.find_playlists().unwrap_err();
        assert!(err.is_connectivity());
    }
}
