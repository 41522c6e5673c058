/// Configuration for the history system.

/// Maximum number of undo steps kept per buffer.
/// Oldest groups are evicted when this limit is exceeded.
const DEFAULT_MAX_HISTORY_DEPTH: usize = 100;

/// Time window in milliseconds for grouping consecutive edits
/// into a single undo step.
const DEFAULT_GROUP_TIMEOUT_MS: u64 = 500;

/// Configuration for the history system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Max edit groups kept before the oldest are dropped.
    pub max_history_depth: usize,
    /// Grouping timeout in milliseconds. Zero disables grouping.
    pub group_timeout_ms: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_history_depth: DEFAULT_MAX_HISTORY_DEPTH,
            group_timeout_ms: DEFAULT_GROUP_TIMEOUT_MS,
        }
    }
}

impl HistoryConfig {
    /// Creates a config with the given depth and grouping window.
    ///
    /// A depth of zero is raised to one so at least the last edit can be undone.
    pub fn new(max_history_depth: usize, group_timeout_ms: u64) -> Self {
        Self {
            max_history_depth: max_history_depth.max(1),
            group_timeout_ms,
        }
    }
}
