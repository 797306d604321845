use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid series `{series}`: {reason}")]
    InvalidSeries { series: String, reason: String },

    #[error("unknown chart board `{0}`")]
    UnknownBoard(String),

    #[error("unknown series `{series}` on chart board `{board}`")]
    UnknownSeries { board: String, series: String },

    #[error("invalid config: {0}")]
    Config(String),

    #[error("export failed: {0}")]
    Export(String),
}
