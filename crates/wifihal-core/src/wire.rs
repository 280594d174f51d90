//! Wire format: length-prefixed frames with a fixed 12-byte header.
//!
//! ```text
//! [u32 LE total_len] [FrameHeader] [body]
//!   total_len = HEADER_LEN + body.len()
//!   FrameHeader = version: u16 LE | kind: u16 LE | seq: u32 LE | body_len: u32 LE
//! ```
//!
//! Bodies are postcard-encoded [`Request`](crate::Request),
//! [`Response`](crate::Response) or [`Event`](crate::Event) payloads
//! depending on `kind`. Every frame carries the contract revision; a
//! mismatch is surfaced to the receiver, never ignored.

use std::io::{self, Read, Write};

use crate::{DecodeError, TransportError};

/// Contract revision validated by this crate: major 1, minor 2.
pub const PROTOCOL_VERSION: u16 = 0x0102;

/// Size of the fixed frame header in bytes.
pub const HEADER_LEN: usize = 12;

/// Upper bound on a frame body; bounds allocation from the length prefix.
pub const MAX_BODY_LEN: u32 = 64 * 1024;

/// Frame kinds.
pub mod kind {
    /// Client-to-service operation carrying a [`Request`](crate::Request).
    pub const REQUEST: u16 = 1;
    /// Service answer carrying a [`Response`](crate::Response); echoes the
    /// request's `seq`.
    pub const RESPONSE: u16 = 2;
    /// Unsolicited notification carrying an [`Event`](crate::Event); `seq`
    /// is always 0.
    pub const EVENT: u16 = 3;
}

/// The fixed per-frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub version: u16,
    pub kind: u16,
    pub seq: u32,
    pub body_len: u32,
}

impl FrameHeader {
    pub fn request(seq: u32, body_len: u32) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            kind: kind::REQUEST,
            seq,
            body_len,
        }
    }

    pub fn response(seq: u32, body_len: u32) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            kind: kind::RESPONSE,
            seq,
            body_len,
        }
    }

    pub fn event(body_len: u32) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            kind: kind::EVENT,
            seq: 0,
            body_len,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..2].copy_from_slice(&self.version.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.kind.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.seq.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.body_len.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8; HEADER_LEN]) -> Self {
        Self {
            version: u16::from_le_bytes([bytes[0], bytes[1]]),
            kind: u16::from_le_bytes([bytes[2], bytes[3]]),
            seq: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            body_len: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        }
    }
}

/// Write one frame.
pub fn write_frame<W: Write>(w: &mut W, header: FrameHeader, body: &[u8]) -> io::Result<()> {
    debug_assert_eq!(header.body_len as usize, body.len());

    let total_len = (HEADER_LEN + body.len()) as u32;
    w.write_all(&total_len.to_le_bytes())?;
    w.write_all(&header.to_bytes())?;
    if !body.is_empty() {
        w.write_all(body)?;
    }
    w.flush()
}

/// Read one frame, validating the header.
///
/// EOF at a frame boundary is a clean close ([`TransportError::Closed`]);
/// EOF inside a frame is an I/O error.
pub fn read_frame<R: Read>(r: &mut R) -> Result<(FrameHeader, Vec<u8>), TransportError> {
    let mut len_buf = [0u8; 4];
    match r.read_exact(&mut len_buf) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Err(TransportError::Closed),
        Err(e) => return Err(e.into()),
    }
    let total_len = u32::from_le_bytes(len_buf);

    if (total_len as usize) < HEADER_LEN {
        return Err(DecodeError::Truncated { len: total_len }.into());
    }
    let framed = total_len - HEADER_LEN as u32;
    if framed > MAX_BODY_LEN {
        return Err(DecodeError::BodyTooLarge {
            len: framed,
            max: MAX_BODY_LEN,
        }
        .into());
    }

    let mut header_buf = [0u8; HEADER_LEN];
    r.read_exact(&mut header_buf)?;
    let header = FrameHeader::from_bytes(&header_buf);

    if header.version != PROTOCOL_VERSION {
        return Err(DecodeError::VersionMismatch {
            expected: PROTOCOL_VERSION,
            actual: header.version,
        }
        .into());
    }
    if header.body_len != framed {
        return Err(DecodeError::LengthMismatch {
            declared: header.body_len,
            framed,
        }
        .into());
    }
    if !matches!(header.kind, kind::REQUEST | kind::RESPONSE | kind::EVENT) {
        return Err(DecodeError::UnknownKind(header.kind).into());
    }

    let mut body = vec![0u8; framed as usize];
    r.read_exact(&mut body)?;

    Ok((header, body))
}
