// src/services/filter.rs

//! Award name include/exclude rules.

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::LotteryConfig;

/// Compiled award name patterns.
#[derive(Debug, Clone, Default)]
pub struct AwardFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl AwardFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: Self::compile(include)?,
            exclude: Self::compile(exclude)?,
        })
    }

    pub fn from_config(config: &LotteryConfig) -> Result<Self> {
        Self::new(&config.include_patterns, &config.exclude_patterns)
    }

    /// An award is excluded when an exclude pattern matches and no include pattern does.
    pub fn is_excluded(&self, award_name: &str) -> bool {
        self.exclude.iter().any(|re| re.is_match(award_name))
            && !self.include.iter().any(|re| re.is_match(award_name))
    }

    fn compile(patterns: &[String]) -> Result<Vec<Regex>> {
        patterns
            .iter()
            .map(|p| Regex::new(p).map_err(|e| AppError::pattern(p, e)))
            .collect()
    }
}
