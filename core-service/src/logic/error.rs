//! Error handling

use thiserror::Error;

use super::features::LayoutMismatchError;

pub type TwinResult<T> = Result<T, TwinError>;

#[derive(Debug, Error)]
pub enum TwinError {
    // Configuration errors
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // Data errors
    #[error("telemetry series is empty")]
    EmptySeries,

    #[error("dataset contains no nodes")]
    EmptyDataset,

    #[error("series for {node_id} only contains failure_label={label}; a classifier needs both classes")]
    SingleClass { node_id: String, label: u8 },

    #[error("series for {expected} contains a record of {found}")]
    MixedNodes { expected: String, found: String },

    #[error("series for {node_id} has more than one record at {timestamp}")]
    DuplicateTimestamp { node_id: String, timestamp: String },

    #[error("line {line}: failure_label={stored} but the labeling rule gives {expected}")]
    LabelMismatch { line: usize, stored: u8, expected: u8 },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("unexpected CSV header: {0}")]
    InvalidHeader(String),

    #[error(transparent)]
    LayoutMismatch(#[from] LayoutMismatchError),

    #[error("invalid node id: {0:?}")]
    InvalidNodeId(String),

    // Lookup errors
    #[error("node {0} is not present in the dataset")]
    UnknownNode(String),

    // IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TwinError {
    /// Shorthand for a CSV parse failure on a given line
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        TwinError::Parse { line, message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TwinError::UnknownNode("NODE-42".to_string());
        assert_eq!(err.to_string(), "node NODE-42 is not present in the dataset");

        let err = TwinError::SingleClass { node_id: "NODE-1000".to_string(), label: 0 };
        assert!(err.to_string().contains("failure_label=0"));
    }

    #[test]
    fn test_parse_helper() {
        let err = TwinError::parse(3, "bad float");
        assert!(matches!(err, TwinError::Parse { line: 3, .. }));
        assert_eq!(err.to_string(), "line 3: bad float");
    }

    #[test]
    fn test_empty_dataset_message() {
        assert_eq!(TwinError::EmptyDataset.to_string(), "dataset contains no nodes");
    }
}
