//! Typed client for driving a chip service.
//!
//! [`ChipController`] issues one blocking round trip per operation, in
//! program order, with no retries and no timeouts. Event frames that
//! arrive while a response is pending are handed to the registered
//! observer and the wait continues.

use std::net::{TcpStream, ToSocketAddrs};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::wire::kind;
use crate::{
    dispatch_event, CapabilityMask, ChipEventObserver, ChipHandle, ChipModeId, ClientError, Event,
    FrameHeader, IfaceRole, InstanceId, Request, Response, StatusCode, Transport, TransportError,
    TxPowerScenario,
};

pub struct ChipController {
    transport: Transport,
    next_seq: u32,
    next_callback: u32,
    observer: Option<Arc<dyn ChipEventObserver>>,
}

impl ChipController {
    pub fn new(transport: Transport) -> Self {
        Self {
            transport,
            next_seq: 1,
            next_callback: 1,
            observer: None,
        }
    }

    /// Connect to a service listening on `addr`.
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(addr).map_err(TransportError::from)?;
        Ok(Self::new(Transport::tcp(stream)?))
    }

    /// Force the instance to a clean, stopped state. Idempotent.
    pub fn reset(&mut self, instance: &InstanceId) -> Result<(), ClientError> {
        let response = self.call(&Request::Reset {
            instance: instance.as_str().to_owned(),
        })?;
        match response {
            Response::Ack => Ok(()),
            _ => Err(ClientError::UnexpectedResponse { operation: "reset" }),
        }
    }

    /// Start the instance and obtain a chip handle. Any non-success
    /// status, and a success without a handle, is an error: nothing
    /// downstream can run without the handle.
    pub fn acquire(&mut self, instance: &InstanceId) -> Result<ChipHandle, ClientError> {
        let response = self.call(&Request::Acquire {
            instance: instance.as_str().to_owned(),
        })?;
        match response {
            Response::Chip { status, chip } => {
                if !status.is_success() {
                    return Err(ClientError::Status {
                        operation: "acquire",
                        status,
                    });
                }
                chip.map(ChipHandle::new).ok_or(ClientError::HandleAbsent)
            }
            _ => Err(ClientError::UnexpectedResponse {
                operation: "acquire",
            }),
        }
    }

    /// Put the chip into a mode supporting `role` and return the mode id.
    pub fn configure_for_role(
        &mut self,
        chip: ChipHandle,
        role: IfaceRole,
    ) -> Result<ChipModeId, ClientError> {
        let response = self.call(&Request::ConfigureForRole {
            chip: chip.get(),
            role,
        })?;
        match response {
            Response::Mode { status, mode } => {
                if !status.is_success() {
                    return Err(ClientError::Status {
                        operation: "configure_for_role",
                        status,
                    });
                }
                mode.map(ChipModeId::new)
                    .ok_or(ClientError::UnexpectedResponse {
                        operation: "configure_for_role",
                    })
            }
            _ => Err(ClientError::UnexpectedResponse {
                operation: "configure_for_role",
            }),
        }
    }

    /// Read the capability mask for the chip's current mode.
    pub fn query_capabilities(
        &mut self,
        chip: ChipHandle,
        mode: ChipModeId,
    ) -> Result<CapabilityMask, ClientError> {
        let response = self.call(&Request::QueryCapabilities {
            chip: chip.get(),
            mode: mode.get(),
        })?;
        match response {
            Response::Capabilities { status, caps } => {
                if !status.is_success() {
                    return Err(ClientError::Status {
                        operation: "query_capabilities",
                        status,
                    });
                }
                Ok(CapabilityMask::from_wire(caps))
            }
            _ => Err(ClientError::UnexpectedResponse {
                operation: "query_capabilities",
            }),
        }
    }

    /// Apply a transmit-power profile. The returned status is the value
    /// under test, so every code comes back as `Ok`.
    pub fn select_power_scenario(
        &mut self,
        chip: ChipHandle,
        scenario: TxPowerScenario,
    ) -> Result<StatusCode, ClientError> {
        let response = self.call(&Request::SelectPowerScenario {
            chip: chip.get(),
            scenario,
        })?;
        match response {
            Response::Status { status } => Ok(status),
            _ => Err(ClientError::UnexpectedResponse {
                operation: "select_power_scenario",
            }),
        }
    }

    /// Register `observer` under a fresh callback id. On success the
    /// observer receives events decoded during later waits; delivery is
    /// asynchronous and never awaited.
    pub fn register_callback(
        &mut self,
        chip: ChipHandle,
        observer: Arc<dyn ChipEventObserver>,
    ) -> Result<StatusCode, ClientError> {
        let callback = self.next_callback;
        self.next_callback += 1;

        let response = self.call(&Request::RegisterCallback {
            chip: chip.get(),
            callback,
        })?;
        match response {
            Response::Status { status } => {
                if status.is_success() {
                    self.observer = Some(observer);
                }
                Ok(status)
            }
            _ => Err(ClientError::UnexpectedResponse {
                operation: "register_callback",
            }),
        }
    }

    fn call(&mut self, request: &Request) -> Result<Response, ClientError> {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        let operation = request.operation();

        let body = request.encode()?;
        trace!(operation, seq, len = body.len(), "sending request");
        self.transport
            .send(FrameHeader::request(seq, body.len() as u32), &body)?;

        loop {
            let (header, body) = self.transport.recv()?;
            match header.kind {
                kind::EVENT => {
                    let event = Event::decode(&body)?;
                    match &self.observer {
                        Some(observer) => dispatch_event(observer.as_ref(), &event),
                        None => debug!(?event, "event with no observer registered; dropped"),
                    }
                }
                kind::RESPONSE => {
                    if header.seq != seq {
                        return Err(ClientError::SequenceMismatch {
                            expected: seq,
                            actual: header.seq,
                        });
                    }
                    let response = Response::decode(&body)?;
                    trace!(operation, seq, "response received");
                    return Ok(response);
                }
                // A request frame arriving at the client side.
                _ => return Err(ClientError::UnexpectedResponse { operation }),
            }
        }
    }
}
