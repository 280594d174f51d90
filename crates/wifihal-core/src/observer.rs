//! Passive chip event observer.
//!
//! Notifications are delivered asynchronously by the service and carry no
//! acknowledgement, so observers are informational only. Every handler
//! defaults to a no-op; implement just the ones you care about.

use crate::{ChipModeId, Event, IfaceRole, StatusCode};

pub trait ChipEventObserver: Send + Sync {
    fn on_chip_reconfigured(&self, _mode: ChipModeId) {}
    fn on_chip_reconfigure_failure(&self, _status: StatusCode) {}
    fn on_iface_added(&self, _role: IfaceRole, _name: &str) {}
    fn on_iface_removed(&self, _role: IfaceRole, _name: &str) {}
    fn on_debug_ring_buffer_data(&self, _ring: u32, _len: u32) {}
    fn on_debug_error_alert(&self, _error_code: i32, _len: u32) {}
    fn on_radio_mode_change(&self, _radios: u32) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ChipEventObserver for NullObserver {}

/// Route a decoded event to the matching handler.
pub fn dispatch_event(observer: &dyn ChipEventObserver, event: &Event) {
    match event {
        Event::ChipReconfigured { mode } => {
            observer.on_chip_reconfigured(ChipModeId::new(*mode));
        }
        Event::ChipReconfigureFailure { status } => {
            observer.on_chip_reconfigure_failure(*status);
        }
        Event::IfaceAdded { role, name } => observer.on_iface_added(*role, name),
        Event::IfaceRemoved { role, name } => observer.on_iface_removed(*role, name),
        Event::DebugRingBufferData { ring, len } => {
            observer.on_debug_ring_buffer_data(*ring, *len);
        }
        Event::DebugErrorAlert { error_code, len } => {
            observer.on_debug_error_alert(*error_code, *len);
        }
        Event::RadioModeChange { radios } => observer.on_radio_mode_change(*radios),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Default)]
    struct Counting {
        reconfigured: AtomicU32,
        iface_added: AtomicU32,
    }

    impl ChipEventObserver for Counting {
        fn on_chip_reconfigured(&self, _mode: ChipModeId) {
            self.reconfigured.fetch_add(1, Ordering::SeqCst);
        }

        fn on_iface_added(&self, _role: IfaceRole, _name: &str) {
            self.iface_added.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn dispatch_routes_to_matching_handler() {
        let obs = Counting::default();
        dispatch_event(&obs, &Event::ChipReconfigured { mode: 1 });
        dispatch_event(
            &obs,
            &Event::IfaceAdded {
                role: IfaceRole::Sta,
                name: "wlan0".into(),
            },
        );
        assert_eq!(obs.reconfigured.load(Ordering::SeqCst), 1);
        assert_eq!(obs.iface_added.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn null_observer_ignores_everything() {
        dispatch_event(&NullObserver, &Event::RadioModeChange { radios: 2 });
    }
}
