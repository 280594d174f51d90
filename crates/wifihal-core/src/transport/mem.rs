//! In-process transport backed by a pair of byte channels.
//!
//! Each channel message is one fully framed message in the same byte
//! layout the TCP backend puts on the wire, so both backends go through
//! the identical decode path.

use std::io::Cursor;
use std::sync::mpsc::{channel, Receiver, Sender};

use crate::wire::{read_frame, write_frame};
use crate::{FrameHeader, TransportError};

#[derive(Debug)]
pub struct MemTransport {
    tx: Sender<Vec<u8>>,
    rx: Receiver<Vec<u8>>,
}

impl MemTransport {
    pub fn pair() -> (Self, Self) {
        let (tx_a, rx_a) = channel();
        let (tx_b, rx_b) = channel();
        (Self { tx: tx_b, rx: rx_a }, Self { tx: tx_a, rx: rx_b })
    }

    pub fn send(&mut self, header: FrameHeader, body: &[u8]) -> Result<(), TransportError> {
        let mut buf = Vec::with_capacity(crate::wire::HEADER_LEN + 4 + body.len());
        write_frame(&mut buf, header, body)?;
        self.tx.send(buf).map_err(|_| TransportError::Closed)
    }

    pub fn recv(&mut self) -> Result<(FrameHeader, Vec<u8>), TransportError> {
        let buf = self.rx.recv().map_err(|_| TransportError::Closed)?;
        read_frame(&mut Cursor::new(buf))
    }
}
