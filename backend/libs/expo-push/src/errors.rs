use thiserror::Error;

/// Expo client error types
///
/// These are batch-level transport failures. A failed request says nothing
/// about any individual token, so callers must fold these into transient
/// per-token failures rather than invalidating registrations.
#[derive(Error, Debug)]
pub enum ExpoError {
    #[error("Expo push request failed: {0}")]
    Request(String),

    #[error("Expo push endpoint returned HTTP {0}: {1}")]
    Status(u16, String),

    #[error("Failed to parse Expo push response: {0}")]
    ResponseParse(String),

    #[error("Expo push response had {got} tickets for {expected} messages")]
    TicketMismatch { expected: usize, got: usize },
}
