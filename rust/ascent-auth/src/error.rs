use thiserror::Error;

/// Errors raised while resolving credentials or minting tokens.
///
/// Messages never contain key material; variants distinguish malformed
/// input ([`AuthError::InvalidPrivateKey`]) from a failure of the signing
/// primitive itself ([`AuthError::SigningFailed`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No key identifier was supplied.
    #[error("missing key identifier (set ASCENT_KEY_ID)")]
    MissingKeyId,

    /// No issuer identifier was supplied.
    #[error("missing issuer identifier (set ASCENT_ISSUER_ID)")]
    MissingIssuerId,

    /// No private key was supplied through any supported channel.
    #[error(
        "missing private key (set ASCENT_PRIVATE_KEY_PATH, ASCENT_PRIVATE_KEY_B64 \
         or ASCENT_PRIVATE_KEY)"
    )]
    MissingPrivateKey,

    /// The private key file could not be read.
    #[error("failed to read private key file: {0}")]
    KeyFileUnreadable(String),

    /// The private key text could not be parsed as an EC key.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// The signing primitive errored on otherwise valid input.
    #[error("token signing failed: {0}")]
    SigningFailed(String),
}
