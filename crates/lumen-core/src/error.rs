// File: crates/lumen-core/src/error.rs
// Summary: Library error type shared by loaders, the numeric core and renderers.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("canvas with id \"{id}\" not found")]
    CanvasNotFound { id: String },

    #[error("invalid surface size {width}x{height}")]
    InvalidSurfaceSize { width: i32, height: i32 },

    #[error("failed to create raster surface")]
    Surface,

    #[error("encode PNG failed")]
    Encode,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] serde_json::Error),

    #[error("column \"{column}\" not found in record")]
    MissingColumn { column: String },

    #[error("column \"{column}\" holds {found}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("no color mapped for category \"{category}\" ({role})")]
    UnmappedCategory { category: String, role: &'static str },

    #[error("tick interval must be positive and finite, got {interval}")]
    InvalidInterval { interval: f64 },

    #[error("tick interval {interval} gives too many ticks over a span of {span}")]
    TooManyTicks { interval: f64, span: f64 },

    #[error("cannot parse \"{value}\" as a date")]
    InvalidDate { value: String },

    #[error("unrecognized color \"{value}\"")]
    InvalidColor { value: String },

    #[error("dataset is empty: {context}")]
    EmptyDataset { context: &'static str },
}
