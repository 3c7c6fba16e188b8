use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid level dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("level of {cells} cells exceeds the limit of {limit} cells")]
    TooLarge { cells: u64, limit: u64 },

    #[error("invalid generator settings: {0}")]
    InvalidSettings(String),

    #[error("failed to parse generator settings")]
    SettingsFormat(#[from] serde_json::Error),

    #[error("tile layer holds {actual} tiles, expected {expected}")]
    LayerMismatch { expected: usize, actual: usize },

    #[error("unknown tileset index {0}")]
    UnknownTileIndex(i32),
}
