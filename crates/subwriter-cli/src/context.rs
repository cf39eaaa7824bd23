//! State shared by the stages of one export run.

use subwriter_model::{FieldMappingConfig, Playlist};
use subwriter_tracker::Tracker;
use subwriter_transform::RuleTable;

/// Everything an export needs: the column mapping, the tracker handle, and
/// the playlist being exported.
///
/// Built once per command and passed by reference to each stage.
#[derive(Debug)]
pub struct ProjectContext<'a, T: Tracker> {
    pub tracker: &'a T,
    pub config: FieldMappingConfig,
    pub playlist: Playlist,
    pub rules: RuleTable,
}

impl<'a, T: Tracker> ProjectContext<'a, T> {
    /// Creates a context using the standard normalization rules.
    pub fn new(tracker: &'a T, config: FieldMappingConfig, playlist: Playlist) -> Self {
        Self {
            tracker,
            config,
            playlist,
            rules: RuleTable::standard(),
        }
    }

    /// Replaces the normalization rules.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }
}
