//! Loopback TCP serving for test instances.

use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::warn;

use wifihal_core::{serve_connection, ChipService, EventSink, Transport};

/// A service listening on an ephemeral loopback port.
///
/// Dropping the guard stops the listener and joins its thread.
/// Connections already being served run to their own completion.
#[derive(Debug)]
pub struct ServedInstance {
    addr: SocketAddr,
    shutdown: Arc<AtomicBool>,
    accept_thread: Option<JoinHandle<()>>,
}

impl ServedInstance {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Drop for ServedInstance {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        // Wake the blocking accept so the thread can observe the flag.
        let _ = TcpStream::connect(self.addr);
        if let Some(thread) = self.accept_thread.take() {
            let _ = thread.join();
        }
    }
}

/// Serve `service` on a fresh loopback port, one thread per connection.
///
/// All connections share the service's state and `events` sink; tests
/// hold one connection at a time, so queued events flush to the
/// connection whose request produced them.
pub fn serve_instance<S>(service: Arc<S>, events: EventSink) -> io::Result<ServedInstance>
where
    S: ChipService + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let shutdown = Arc::new(AtomicBool::new(false));

    let flag = Arc::clone(&shutdown);
    let accept_thread = thread::spawn(move || {
        for conn in listener.incoming() {
            if flag.load(Ordering::SeqCst) {
                break;
            }
            let stream = match conn {
                Ok(stream) => stream,
                Err(e) => {
                    warn!(error = %e, "accept failed");
                    continue;
                }
            };
            let service = Arc::clone(&service);
            let events = events.clone();
            thread::spawn(move || {
                let transport = match Transport::tcp(stream) {
                    Ok(transport) => transport,
                    Err(e) => {
                        warn!(error = %e, "could not set up connection");
                        return;
                    }
                };
                if let Err(e) = serve_connection(transport, service.as_ref(), &events) {
                    warn!(error = %e, "connection ended with error");
                }
            });
        }
    });

    Ok(ServedInstance {
        addr,
        shutdown,
        accept_thread: Some(accept_thread),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FakeChip;
    use wifihal_core::{CapabilityMask, ChipController, InstanceId, StatusCode, TxPowerScenario};

    #[test]
    fn served_fake_chip_answers_over_tcp() {
        let chip = FakeChip::new(
            "wifi0",
            CapabilityMask::SET_TX_POWER_LIMIT | CapabilityMask::USE_BODY_HEAD_SAR,
        );
        let events = chip.events().clone();
        let served = serve_instance(Arc::new(chip), events).unwrap();

        let mut controller = ChipController::connect(served.addr()).unwrap();
        let instance = InstanceId::new("wifi0");
        let handle = controller.acquire(&instance).unwrap();
        let mode = controller
            .configure_for_role(handle, wifihal_core::IfaceRole::Sta)
            .unwrap();
        let caps = controller.query_capabilities(handle, mode).unwrap();
        assert!(caps.contains(CapabilityMask::USE_BODY_HEAD_SAR));
        assert_eq!(
            controller
                .select_power_scenario(handle, TxPowerScenario::OnBodyCellOff)
                .unwrap(),
            StatusCode::Success
        );
    }

    #[test]
    fn state_survives_reconnects() {
        let chip = FakeChip::new("wifi0", CapabilityMask::SET_TX_POWER_LIMIT);
        let events = chip.events().clone();
        let served = serve_instance(Arc::new(chip), events).unwrap();
        let instance = InstanceId::new("wifi0");

        let handle = {
            let mut first = ChipController::connect(served.addr()).unwrap();
            first.acquire(&instance).unwrap()
        };

        // Same instance state behind a new connection: the handle issued
        // over the first connection is still live.
        let mut second = ChipController::connect(served.addr()).unwrap();
        let mode = second
            .configure_for_role(handle, wifihal_core::IfaceRole::Sta)
            .unwrap();
        assert!(second.query_capabilities(handle, mode).is_ok());
    }

    #[test]
    fn drop_stops_the_listener() {
        let chip = FakeChip::new("wifi0", CapabilityMask::empty());
        let events = chip.events().clone();
        let served = serve_instance(Arc::new(chip), events).unwrap();
        let addr = served.addr();
        drop(served);

        assert!(ChipController::connect(addr).is_err());
    }
}
