//! Service-side trait and dispatch loop.
//!
//! A vendor implements [`ChipService`], one method per contract
//! operation. [`serve_connection`] pumps a transport: read a request,
//! call the matching method, answer with the request's sequence number,
//! then flush any events the service queued on its [`EventSink`].

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::wire::kind;
use crate::{
    CallbackId, CapabilityMask, ChipHandle, ChipModeId, DecodeError, Event, FrameHeader,
    IfaceRole, InstanceId, Request, Response, StatusCode, Transport, TransportError,
    TxPowerScenario,
};

/// One method per contract operation.
///
/// Gated operations return a bare [`StatusCode`]: every code is a legal
/// answer there, the caller asserts on it. Setup operations return
/// `Result<_, StatusCode>` so implementations cannot claim success
/// without producing the value.
pub trait ChipService: Send + Sync {
    /// Force the named instance to a clean, stopped state. Total and
    /// idempotent; unknown instances are acknowledged and ignored.
    fn reset(&self, instance: &InstanceId);

    /// Start the named instance and issue a fresh chip handle.
    fn acquire(&self, instance: &InstanceId) -> Result<ChipHandle, StatusCode>;

    /// Put the chip into a mode supporting `role`.
    fn configure_for_role(
        &self,
        chip: ChipHandle,
        role: IfaceRole,
    ) -> Result<ChipModeId, StatusCode>;

    /// Capability mask for the chip's current mode.
    fn query_capabilities(
        &self,
        chip: ChipHandle,
        mode: ChipModeId,
    ) -> Result<CapabilityMask, StatusCode>;

    /// Apply a transmit-power profile.
    fn select_power_scenario(&self, chip: ChipHandle, scenario: TxPowerScenario) -> StatusCode;

    /// Register an event callback under the client-chosen id.
    fn register_callback(&self, chip: ChipHandle, callback: CallbackId) -> StatusCode;
}

/// Queue of pending notifications, shared between a service and its
/// dispatch loop. Events are flushed after the response that triggered
/// them, so clients observe them during a later wait.
#[derive(Debug, Default, Clone)]
pub struct EventSink {
    queue: Arc<Mutex<VecDeque<Event>>>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Event) {
        self.queue.lock().push_back(event);
    }

    /// Take every queued event, in push order. The dispatch loop calls
    /// this after each response.
    pub fn drain(&self) -> Vec<Event> {
        self.queue.lock().drain(..).collect()
    }
}

/// Serve one connection until the peer goes away.
///
/// A clean close at a frame boundary ends the loop with `Ok(())`. Decode
/// failures and frames that are not requests terminate the connection
/// with the error.
pub fn serve_connection<S: ChipService>(
    mut transport: Transport,
    service: &S,
    events: &EventSink,
) -> Result<(), TransportError> {
    loop {
        let (header, body) = match transport.recv() {
            Ok(frame) => frame,
            Err(TransportError::Closed) => return Ok(()),
            Err(e) => return Err(e),
        };
        if header.kind != kind::REQUEST {
            return Err(DecodeError::UnknownKind(header.kind).into());
        }

        let request = Request::decode(&body)?;
        debug!(operation = request.operation(), seq = header.seq, "dispatching");

        let response = dispatch(service, &request);
        let body = response.encode()?;
        transport.send(FrameHeader::response(header.seq, body.len() as u32), &body)?;

        for event in events.drain() {
            let body = event.encode()?;
            transport.send(FrameHeader::event(body.len() as u32), &body)?;
        }
    }
}

fn dispatch<S: ChipService>(service: &S, request: &Request) -> Response {
    match request {
        Request::Reset { instance } => {
            service.reset(&InstanceId::new(instance.clone()));
            Response::Ack
        }
        Request::Acquire { instance } => match service.acquire(&InstanceId::new(instance.clone()))
        {
            Ok(chip) => Response::Chip {
                status: StatusCode::Success,
                chip: Some(chip.get()),
            },
            Err(status) => Response::Chip { status, chip: None },
        },
        Request::ConfigureForRole { chip, role } => {
            match service.configure_for_role(ChipHandle::new(*chip), *role) {
                Ok(mode) => Response::Mode {
                    status: StatusCode::Success,
                    mode: Some(mode.get()),
                },
                Err(status) => Response::Mode { status, mode: None },
            }
        }
        Request::QueryCapabilities { chip, mode } => {
            match service.query_capabilities(ChipHandle::new(*chip), ChipModeId::new(*mode)) {
                Ok(caps) => Response::Capabilities {
                    status: StatusCode::Success,
                    caps: caps.to_wire(),
                },
                Err(status) => Response::Capabilities { status, caps: 0 },
            }
        }
        Request::SelectPowerScenario { chip, scenario } => Response::Status {
            status: service.select_power_scenario(ChipHandle::new(*chip), *scenario),
        },
        Request::RegisterCallback { chip, callback } => Response::Status {
            status: service.register_callback(ChipHandle::new(*chip), CallbackId::new(*callback)),
        },
    }
}
