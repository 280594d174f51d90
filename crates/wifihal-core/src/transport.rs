//! Transport enum over synchronous backends.
//!
//! The public API is the [`Transport`] enum. Each backend lives in its own
//! module under `transport/`. Calls are strictly sequential and blocking;
//! there are no timeouts, so a hung remote call hangs the caller.

mod mem;
mod tcp;

pub use mem::MemTransport;
pub use tcp::TcpTransport;

use std::net::TcpStream;

use crate::{FrameHeader, TransportError};

#[derive(Debug)]
pub enum Transport {
    Tcp(TcpTransport),
    Mem(MemTransport),
}

impl Transport {
    /// Wrap a connected stream. Used against an out-of-process service.
    pub fn tcp(stream: TcpStream) -> Result<Self, TransportError> {
        Ok(Transport::Tcp(TcpTransport::new(stream)?))
    }

    /// Connected in-process pair. Frames sent on one end arrive on the
    /// other.
    pub fn mem_pair() -> (Self, Self) {
        let (a, b) = MemTransport::pair();
        (Transport::Mem(a), Transport::Mem(b))
    }

    pub fn send(&mut self, header: FrameHeader, body: &[u8]) -> Result<(), TransportError> {
        match self {
            Transport::Tcp(t) => t.send(header, body),
            Transport::Mem(t) => t.send(header, body),
        }
    }

    /// Block until one frame arrives. A peer that goes away at a frame
    /// boundary yields [`TransportError::Closed`].
    pub fn recv(&mut self) -> Result<(FrameHeader, Vec<u8>), TransportError> {
        match self {
            Transport::Tcp(t) => t.recv(),
            Transport::Mem(t) => t.recv(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::kind;

    #[test]
    fn mem_pair_round_trip() {
        let (mut a, mut b) = Transport::mem_pair();
        a.send(FrameHeader::request(1, 3), b"abc").unwrap();

        let (header, body) = b.recv().unwrap();
        assert_eq!(header.kind, kind::REQUEST);
        assert_eq!(header.seq, 1);
        assert_eq!(body, b"abc");
    }

    #[test]
    fn mem_recv_after_peer_drop_is_closed() {
        let (a, mut b) = Transport::mem_pair();
        drop(a);
        assert!(matches!(b.recv(), Err(TransportError::Closed)));
    }

    #[test]
    fn mem_send_after_peer_drop_is_closed() {
        let (mut a, b) = Transport::mem_pair();
        drop(b);
        let err = a.send(FrameHeader::event(0), &[]).unwrap_err();
        assert!(matches!(err, TransportError::Closed));
    }
}
