//! Error handling and result types for BPlusTree operations.
//!
//! Range search never fails: an unknown comparator only yields an empty
//! result. The errors below come from construction, comparator parsing and
//! invariant validation.

use thiserror::Error;

/// Error type for B+ tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BPlusTreeError {
    /// Invalid branching factor specified.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Comparator symbol outside `<=`, `==`, `>=`.
    #[error("Unknown comparator: {0:?}")]
    UnknownComparator(String),
    /// Internal data structure integrity violation.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),
    /// Tree corruption detected.
    #[error("Corrupted tree: {0}")]
    CorruptedTree(String),
}

impl BPlusTreeError {
    /// Create an InvalidConfiguration error for a rejected branching factor
    pub fn invalid_branching_factor(branching_factor: usize, min_required: usize) -> Self {
        Self::InvalidConfiguration(format!(
            "Illegal branching factor: {} (minimum required: {})",
            branching_factor, min_required
        ))
    }

    /// Create an UnknownComparator error
    pub fn unknown_comparator(symbol: &str) -> Self {
        Self::UnknownComparator(symbol.to_string())
    }

    /// Create a DataIntegrityError with context
    pub fn data_integrity(context: &str, details: &str) -> Self {
        Self::DataIntegrityError(format!("{}: {}", context, details))
    }

    /// Create a CorruptedTree error with context
    pub fn corrupted_tree(component: &str, details: &str) -> Self {
        Self::CorruptedTree(format!("{} corruption: {}", component, details))
    }

    /// Check if this error is a configuration error
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }

    /// Check if this error reports a structural problem
    pub fn is_structural_error(&self) -> bool {
        matches!(self, Self::DataIntegrityError(_) | Self::CorruptedTree(_))
    }
}

/// Internal result type for tree operations
pub(crate) type TreeResult<T> = Result<T, BPlusTreeError>;

/// Public result type for tree operations that may fail
pub type BTreeResult<T> = Result<T, BPlusTreeError>;

/// Result type for tree construction
pub type InitResult<T> = Result<T, BPlusTreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BPlusTreeError::invalid_branching_factor(2, 3);
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Illegal branching factor: 2 (minimum required: 3)"
        );

        let err = BPlusTreeError::unknown_comparator("!=");
        assert_eq!(err.to_string(), "Unknown comparator: \"!=\"");
    }

    #[test]
    fn test_error_classification() {
        assert!(BPlusTreeError::invalid_branching_factor(0, 3).is_configuration_error());
        assert!(!BPlusTreeError::unknown_comparator("<").is_configuration_error());
        assert!(BPlusTreeError::corrupted_tree("Leaf chain", "cycle").is_structural_error());
        assert!(BPlusTreeError::data_integrity("Leaf 3", "unsorted").is_structural_error());
    }

    #[test]
    fn test_context_formatting() {
        let err = BPlusTreeError::corrupted_tree("Leaf chain", "cycle at 4");
        assert_eq!(
            err,
            BPlusTreeError::CorruptedTree("Leaf chain corruption: cycle at 4".into())
        );
    }
}
