//! TCP transport over a connected `std::net::TcpStream`.

use std::net::TcpStream;

use crate::wire::{read_frame, write_frame};
use crate::{FrameHeader, TransportError};

#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Result<Self, TransportError> {
        stream.set_nodelay(true)?;
        Ok(Self { stream })
    }

    pub fn send(&mut self, header: FrameHeader, body: &[u8]) -> Result<(), TransportError> {
        write_frame(&mut self.stream, header, body)?;
        Ok(())
    }

    pub fn recv(&mut self) -> Result<(FrameHeader, Vec<u8>), TransportError> {
        read_frame(&mut self.stream)
    }
}
