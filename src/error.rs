#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unexpected end of data")]
    UnexpectedEof,

    #[error("string too long: {len} bytes (max {max})")]
    StringTooLong { len: usize, max: usize },

    #[error("invalid UTF-8 in string field")]
    InvalidString,

    #[error("no positions recorded for entity type index {index}")]
    MissingPositionIndex { index: i32 },

    #[error("template parse failure in {path}: {message}")]
    TemplateParse { path: String, message: String },

    #[error("decompression failed: {0}")]
    Decompress(String),

    #[error("io error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, Error>;
