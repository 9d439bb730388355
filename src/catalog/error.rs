use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("catalog has no header row")]
    MissingHeader,
    #[error("invalid {field} in row {row} ({name}): {message}")]
    InvalidCoordinate {
        row: usize,
        name: String,
        field: &'static str,
        message: String,
    },
}
