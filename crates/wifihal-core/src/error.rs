//! Error types.

use core::fmt;

use crate::StatusCode;

/// Transport-level errors.
#[derive(Debug)]
pub enum TransportError {
    /// The peer closed the connection (or the in-memory pair was dropped).
    Closed,
    Io(std::io::Error),
    Decode(DecodeError),
    Encode(EncodeError),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "transport closed"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Decode(e) => write!(f, "decode error: {e}"),
            Self::Encode(e) => write!(f, "encode error: {e}"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Decode(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::Closed => None,
        }
    }
}

impl From<std::io::Error> for TransportError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<DecodeError> for TransportError {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

impl From<EncodeError> for TransportError {
    fn from(e: EncodeError) -> Self {
        Self::Encode(e)
    }
}

/// Frame decoding errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The length prefix declared fewer bytes than one header.
    Truncated { len: u32 },
    /// The length prefix declared a body larger than [`crate::MAX_BODY_LEN`].
    BodyTooLarge { len: u32, max: u32 },
    /// The frame was produced for a different contract revision.
    VersionMismatch { expected: u16, actual: u16 },
    /// `body_len` in the header disagrees with the length prefix.
    LengthMismatch { declared: u32, framed: u32 },
    /// The frame kind is not request, response or event.
    UnknownKind(u16),
    /// The postcard body failed to parse.
    Payload(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { len } => {
                write!(f, "frame too short: {len} bytes")
            }
            Self::BodyTooLarge { len, max } => {
                write!(f, "body {len} bytes exceeds max {max}")
            }
            Self::VersionMismatch { expected, actual } => {
                write!(
                    f,
                    "contract version mismatch: expected {expected:#06x}, got {actual:#06x}"
                )
            }
            Self::LengthMismatch { declared, framed } => {
                write!(f, "header declares {declared} body bytes, frame carries {framed}")
            }
            Self::UnknownKind(kind) => write!(f, "unexpected frame kind {kind}"),
            Self::Payload(msg) => write!(f, "invalid payload: {msg}"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Frame encoding errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The encoded body exceeds [`crate::MAX_BODY_LEN`].
    BodyTooLarge { len: usize, max: usize },
    Payload(String),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BodyTooLarge { len, max } => {
                write!(f, "encoded body {len} bytes exceeds max {max}")
            }
            Self::Payload(msg) => write!(f, "encode failed: {msg}"),
        }
    }
}

impl std::error::Error for EncodeError {}

/// Errors surfaced by the typed client.
///
/// A gated operation answering an unexpected *status* is not an error at
/// this layer; status codes are values the conformance driver asserts on.
/// `ClientError` covers the cases where the exchange itself went wrong or a
/// setup operation failed.
#[derive(Debug)]
pub enum ClientError {
    Transport(TransportError),
    /// The response variant does not match the request.
    UnexpectedResponse { operation: &'static str },
    /// The response carries a sequence number for a different request.
    SequenceMismatch { expected: u32, actual: u32 },
    /// A setup operation answered a non-success status.
    Status {
        operation: &'static str,
        status: StatusCode,
    },
    /// `acquire` reported success without issuing a handle.
    HandleAbsent,
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport error: {e}"),
            Self::UnexpectedResponse { operation } => {
                write!(f, "{operation}: response variant does not match the request")
            }
            Self::SequenceMismatch { expected, actual } => {
                write!(f, "sequence mismatch: expected {expected}, got {actual}")
            }
            Self::Status { operation, status } => {
                write!(f, "{operation} failed: {status}")
            }
            Self::HandleAbsent => write!(f, "acquire reported success without a handle"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TransportError> for ClientError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl From<EncodeError> for ClientError {
    fn from(e: EncodeError) -> Self {
        Self::Transport(TransportError::Encode(e))
    }
}

impl From<DecodeError> for ClientError {
    fn from(e: DecodeError) -> Self {
        Self::Transport(TransportError::Decode(e))
    }
}
