//! Purpose: Tunables for the transformation engine.
//! Exports: `TransformOptions`, `TagSelection`, `DEFAULT_MAX_DEPTH`.
//! Role: Plain data consumed by `Transformer`; loadable from a JSON options file.
//! Invariants: Defaults reproduce the documented behavior with no configuration at all.
use serde::{Deserialize, Serialize};

/// Aggregate nesting allowed below the top-level attribute set.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// How a tagged value carrying more than one key is resolved.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagSelection {
    /// Use the lexicographically smallest recognized tag and ignore the other keys.
    #[default]
    FirstRecognized,
    /// Reject any tagged value that does not have exactly one key.
    Strict,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformOptions {
    pub max_depth: usize,
    pub tag_selection: TagSelection,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            tag_selection: TagSelection::default(),
        }
    }
}

impl TransformOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_tag_selection(mut self, tag_selection: TagSelection) -> Self {
        self.tag_selection = tag_selection;
        self
    }
}
