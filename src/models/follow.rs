// src/models/follow.rs

//! Streamers that must be followed as a side effect of joined draws.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A streamer to follow, known either by uid or only by display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FollowTarget {
    Uid(u64),
    Name(String),
}

impl fmt::Display for FollowTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FollowTarget::Uid(uid) => write!(f, "{uid}"),
            FollowTarget::Name(name) => f.write_str(name),
        }
    }
}

/// Ordered, deduplicated collector for follow targets of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FollowList {
    targets: Vec<FollowTarget>,
}

impl FollowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a target. Returns `false` if it was already present.
    pub fn record(&mut self, target: FollowTarget) -> bool {
        if self.targets.contains(&target) {
            return false;
        }
        self.targets.push(target);
        true
    }

    /// Merge another list, keeping first-seen order.
    pub fn merge(&mut self, other: FollowList) {
        for target in other.targets {
            self.record(target);
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn as_slice(&self) -> &[FollowTarget] {
        &self.targets
    }

    pub fn into_vec(self) -> Vec<FollowTarget> {
        self.targets
    }
}
