//! Production-tracking database access.
//!
//! The [`Tracker`] trait covers the handful of queries the export and batch
//! update flows make. [`ShotgunClient`] talks to a live site over REST;
//! [`MemoryTracker`] serves the same queries from memory.

mod client;
mod error;
mod memory;
mod settings;
mod types;

use serde_json::{Map, Value};
use subwriter_model::{Playlist, Project, Shot, VersionRecord};

pub use client::ShotgunClient;
pub use error::{Result, TrackerError};
pub use memory::MemoryTracker;
pub use settings::{DEFAULT_TIMEOUT_SECS, TrackerSettings};

/// Queries against a tracker project.
///
/// Every query is scoped to [`Tracker::project`].
pub trait Tracker {
    /// The project queries are scoped to.
    fn project(&self) -> &Project;

    /// All playlists in the project, with their version links.
    fn find_playlists(&self) -> Result<Vec<Playlist>>;

    /// One version with the requested fields, or `None` if it does not exist.
    fn find_version(&self, id: u64, fields: &[String]) -> Result<Option<VersionRecord>>;

    /// All shots in the project, with their task links.
    fn find_shots(&self) -> Result<Vec<Shot>>;

    /// Versions linked to a shot, with the requested fields.
    fn find_shot_versions(&self, shot: &Shot, fields: &[String]) -> Result<Vec<VersionRecord>>;

    /// Writes field values to a version.
    fn update_version(&self, id: u64, fields: &Map<String, Value>) -> Result<()>;
}
