//! Error types surfaced by table construction.

/// Errors returned when building a `TsHashMap`.
///
/// Lookups and removals of missing keys are not errors; they return `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("invalid capacity {capacity}: a table needs at least one bucket")]
    InvalidCapacity { capacity: usize },
}
