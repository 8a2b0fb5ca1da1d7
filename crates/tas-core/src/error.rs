use thiserror::Error;

use tas_model::DataType;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(
        "extractor conflict for ({data_type}, {label}): '{first}' and '{second}' share priority {priority}"
    )]
    ExtractorConflict {
        data_type: DataType,
        label: String,
        priority: i32,
        first: String,
        second: String,
    },

    #[error("invalid extractor: {0}")]
    InvalidExtractor(String),
}
