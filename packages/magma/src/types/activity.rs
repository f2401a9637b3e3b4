use serde::{Deserialize, Serialize};

/// One row group of the activity-level table, e.g. "Level II (Waspada)".
///
/// `count` is the site's own tally and is not derived from `mounts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLevelGroup {
    pub status: String,
    pub description: String,
    pub count: u32,
    pub mounts: Vec<MountRef>,
}

/// A mountain listed under an activity level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountRef {
    pub name: String,
    /// Empty when the cell has no `" - "` delimiter
    pub location: String,
    pub link: String,
}

impl MountRef {
    /// Split a `"Name - Location"` label.
    pub fn from_label(label: &str, link: impl Into<String>) -> Self {
        let (name, location) = match label.split_once(" - ") {
            Some((name, location)) => (name.trim(), location.trim()),
            None => (label.trim(), ""),
        };

        Self {
            name: name.to_string(),
            location: location.to_string(),
            link: link.into(),
        }
    }
}
