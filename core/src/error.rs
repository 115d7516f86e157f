use thiserror::Error;

// Failures raised while building or filling a height grid
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TerrainError {
    #[error("terrain dimension {dimension} must be a power of 2 plus 1")]
    InvalidDimension { dimension: usize },

    // Offset access reports the (row, column) it resolved to
    #[error("invalid row {row} or column {column} for a {dimension}x{dimension} terrain")]
    OutOfRange {
        row: usize,
        column: usize,
        dimension: usize,
    },

    #[error("invalid generator parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, TerrainError>;
