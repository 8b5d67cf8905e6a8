// src/services/areas.rs

//! Category discovery.

use crate::api::{LiveApi, RawAreaGroup};
use crate::error::Result;
use crate::models::{Area, AreaGroup};

/// Fetches the two-level category tree.
pub struct AreaDirectory<'a> {
    api: &'a dyn LiveApi,
}

impl<'a> AreaDirectory<'a> {
    pub fn new(api: &'a dyn LiveApi) -> Self {
        Self { api }
    }

    /// Fetch all categories.
    ///
    /// A non-zero code is logged and whatever data came back is used.
    /// Transport and decoding errors are returned.
    pub async fn fetch(&self) -> Result<Vec<AreaGroup>> {
        let reply = self.api.fetch_areas().await?;
        let raw = reply.soft("fetch_areas").unwrap_or_default();
        Ok(into_area_groups(raw))
    }
}

/// Project the raw directory onto `{area_id, parent_id}` records, keeping order.
pub fn into_area_groups(raw: Vec<RawAreaGroup>) -> Vec<AreaGroup> {
    raw.into_iter()
        .map(|group| AreaGroup {
            id: group.id,
            name: group.name,
            areas: group
                .list
                .into_iter()
                .map(|area| Area {
                    area_id: area.id,
                    parent_id: area.parent_id,
                    name: area.name,
                })
                .collect(),
        })
        .collect()
}
