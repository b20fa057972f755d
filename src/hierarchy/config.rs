//! Hierarchy level configuration.
//!
//! A hierarchy is a flat, ordered map from level identifier to the key
//! columns that define the groups of that level. The level without keys is the
//! root (grand total). Parent/child links are not stored: callers pick which
//! two levels to relate.

use crate::error::{ForecastError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Grouping keys of one level.
///
/// Deserializes from `null` (root), a single column name, or a list of names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelKeys {
    Root,
    Single(String),
    Many(Vec<String>),
}

impl LevelKeys {
    pub fn as_slice(&self) -> &[String] {
        match self {
            LevelKeys::Root => &[],
            LevelKeys::Single(key) => std::slice::from_ref(key),
            LevelKeys::Many(keys) => keys,
        }
    }

    pub fn is_root(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl From<&str> for LevelKeys {
    fn from(key: &str) -> Self {
        LevelKeys::Single(key.to_string())
    }
}

impl From<&[&str]> for LevelKeys {
    fn from(keys: &[&str]) -> Self {
        if keys.is_empty() {
            LevelKeys::Root
        } else {
            LevelKeys::Many(keys.iter().map(|k| k.to_string()).collect())
        }
    }
}

impl<const N: usize> From<[&str; N]> for LevelKeys {
    fn from(keys: [&str; N]) -> Self {
        LevelKeys::from(&keys[..])
    }
}

impl From<Vec<String>> for LevelKeys {
    fn from(keys: Vec<String>) -> Self {
        if keys.is_empty() {
            LevelKeys::Root
        } else {
            LevelKeys::Many(keys)
        }
    }
}

/// Ordered map of hierarchy levels.
///
/// # Example
/// ```
/// use hierarchy_forecast::hierarchy::{Hierarchy, LevelKeys};
///
/// let hierarchy = Hierarchy::new()
///     .with_level("Total", LevelKeys::Root)
///     .with_level("Region", "region")
///     .with_level("Store", ["region", "store"]);
///
/// assert!(hierarchy.is_root("Total").unwrap());
/// assert_eq!(hierarchy.keys("Store").unwrap(), &["region", "store"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hierarchy {
    levels: IndexMap<String, LevelKeys>,
}

impl Default for Hierarchy {
    fn default() -> Self {
        Self::m5()
    }
}

impl Hierarchy {
    /// Create a hierarchy without levels.
    pub fn new() -> Self {
        Self {
            levels: IndexMap::new(),
        }
    }

    /// The twelve-level M5 product/location hierarchy.
    ///
    /// | Level | Keys |
    /// |---|---|
    /// | Level1 | (total) |
    /// | Level2 | state_id |
    /// | Level3 | store_id |
    /// | Level4 | cat_id |
    /// | Level5 | dept_id |
    /// | Level6 | state_id, cat_id |
    /// | Level7 | state_id, dept_id |
    /// | Level8 | store_id, cat_id |
    /// | Level9 | store_id, dept_id |
    /// | Level10 | item_id |
    /// | Level11 | state_id, item_id |
    /// | Level12 | item_id, store_id |
    pub fn m5() -> Self {
        Self::new()
            .with_level("Level1", LevelKeys::Root)
            .with_level("Level2", "state_id")
            .with_level("Level3", "store_id")
            .with_level("Level4", "cat_id")
            .with_level("Level5", "dept_id")
            .with_level("Level6", ["state_id", "cat_id"])
            .with_level("Level7", ["state_id", "dept_id"])
            .with_level("Level8", ["store_id", "cat_id"])
            .with_level("Level9", ["store_id", "dept_id"])
            .with_level("Level10", ["item_id"])
            .with_level("Level11", ["state_id", "item_id"])
            .with_level("Level12", ["item_id", "store_id"])
    }

    /// Add or replace a level.
    pub fn with_level(mut self, level: impl Into<String>, keys: impl Into<LevelKeys>) -> Self {
        self.levels.insert(level.into(), keys.into());
        self
    }

    /// Load a hierarchy from a JSON object such as
    /// `{"Level1": null, "Level2": "state_id", "Level6": ["state_id", "cat_id"]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ForecastError::InvalidParameter(format!("invalid hierarchy: {e}")))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ForecastError::InvalidParameter(format!("invalid hierarchy: {e}")))
    }

    /// Grouping keys of `level`; empty for the root.
    pub fn keys(&self, level: &str) -> Result<&[String]> {
        self.levels
            .get(level)
            .map(LevelKeys::as_slice)
            .ok_or_else(|| ForecastError::UnknownLevel {
                level: level.to_string(),
            })
    }

    pub fn is_root(&self, level: &str) -> Result<bool> {
        self.keys(level).map(<[String]>::is_empty)
    }

    pub fn contains(&self, level: &str) -> bool {
        self.levels.contains_key(level)
    }

    /// Levels in configuration order.
    pub fn levels(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.levels
            .iter()
            .map(|(id, keys)| (id.as_str(), keys.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
