// src/models/area.rs

//! Live-room category tree: major categories holding sub-categories.

use serde::{Deserialize, Serialize};

/// A major category and its sub-categories, in fetch order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaGroup {
    /// Major category id
    pub id: String,

    /// Major category display name
    pub name: String,

    /// Sub-categories under this major category
    pub areas: Vec<Area>,
}

/// A sub-category, addressed by its own id and its parent's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub area_id: String,
    pub parent_id: String,
    #[serde(default)]
    pub name: String,
}

impl AreaGroup {
    /// Count sub-categories across a category tree.
    pub fn area_count(groups: &[AreaGroup]) -> usize {
        groups.iter().map(|g| g.areas.len()).sum()
    }
}
