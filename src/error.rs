use thiserror::Error;

/// Result type for emoji cipher operations
pub type Result<T> = std::result::Result<T, CipherError>;

/// Error types for loading the cipher alphabet
///
/// Encoding and decoding themselves never fail: unknown letters pass
/// through on encode, and decode resolves every position via the
/// literal-copy fallback.
#[derive(Error, Debug)]
pub enum CipherError {
    /// Mapping source could not be read
    #[error("Mapping source error: {0}")]
    MappingIo(#[from] std::io::Error),

    /// Mapping source yielded no usable letters
    #[error("Malformed mapping: {0}")]
    MalformedMapping(String),
}
