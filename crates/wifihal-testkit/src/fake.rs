//! Reference chip service implementations.

use parking_lot::Mutex;
use tracing::debug;

use wifihal_core::{
    CallbackId, CapabilityMask, ChipHandle, ChipModeId, ChipService, Event, EventSink, IfaceRole,
    InstanceId, StatusCode, TxPowerScenario,
};

const STA_MODE: u32 = 1;
const AP_MODE: u32 = 2;

#[derive(Debug)]
struct State {
    started: bool,
    next_handle: u32,
    // Handles below this were issued before the last reset and are dead.
    live_min: u32,
    mode: Option<u32>,
}

/// In-process chip service with a configurable capability mask.
///
/// Honest by construction: gated operations are answered by evaluating
/// the instance's own mask, so a correct validator always passes against
/// it whatever mask it is given.
#[derive(Debug)]
pub struct FakeChip {
    instance: InstanceId,
    caps: CapabilityMask,
    callbacks_supported: bool,
    events: EventSink,
    state: Mutex<State>,
}

impl FakeChip {
    pub fn new(instance: &str, caps: CapabilityMask) -> Self {
        Self {
            instance: InstanceId::from(instance),
            caps,
            callbacks_supported: true,
            events: EventSink::new(),
            state: Mutex::new(State {
                started: false,
                next_handle: 1,
                live_min: 1,
                mode: None,
            }),
        }
    }

    /// Answer `NotSupported` to callback registration.
    pub fn without_callbacks(mut self) -> Self {
        self.callbacks_supported = false;
        self
    }

    /// The sink this chip queues notifications on. Hand a clone to
    /// [`serve_connection`](wifihal_core::serve_connection) or
    /// [`serve_instance`](crate::serve_instance).
    pub fn events(&self) -> &EventSink {
        &self.events
    }

    fn handle_is_live(&self, state: &State, chip: ChipHandle) -> bool {
        state.started && chip.get() >= state.live_min && chip.get() < state.next_handle
    }
}

impl ChipService for FakeChip {
    fn reset(&self, instance: &InstanceId) {
        if instance != &self.instance {
            // Reset is total: unknown instances are acknowledged untouched.
            return;
        }
        let mut state = self.state.lock();
        state.started = false;
        state.live_min = state.next_handle;
        state.mode = None;
        debug!(instance = %self.instance, "reset to stopped state");
    }

    fn acquire(&self, instance: &InstanceId) -> Result<ChipHandle, StatusCode> {
        if instance != &self.instance {
            return Err(StatusCode::NotAvailable);
        }
        let mut state = self.state.lock();
        state.started = true;
        let handle = state.next_handle;
        state.next_handle += 1;
        debug!(instance = %self.instance, handle, "issued chip handle");
        Ok(ChipHandle::new(handle))
    }

    fn configure_for_role(
        &self,
        chip: ChipHandle,
        role: IfaceRole,
    ) -> Result<ChipModeId, StatusCode> {
        let mut state = self.state.lock();
        if !self.handle_is_live(&state, chip) {
            return Err(StatusCode::ChipInvalid);
        }
        let mode = match role {
            IfaceRole::Sta => STA_MODE,
            IfaceRole::Ap => AP_MODE,
            IfaceRole::P2p | IfaceRole::Nan => return Err(StatusCode::NotSupported),
        };
        state.mode = Some(mode);
        self.events.push(Event::ChipReconfigured { mode });
        Ok(ChipModeId::new(mode))
    }

    fn query_capabilities(
        &self,
        chip: ChipHandle,
        mode: ChipModeId,
    ) -> Result<CapabilityMask, StatusCode> {
        let state = self.state.lock();
        if !self.handle_is_live(&state, chip) {
            return Err(StatusCode::ChipInvalid);
        }
        match state.mode {
            None => Err(StatusCode::NotStarted),
            Some(configured) if configured != mode.get() => Err(StatusCode::InvalidArgs),
            Some(_) => Ok(self.caps),
        }
    }

    fn select_power_scenario(&self, chip: ChipHandle, scenario: TxPowerScenario) -> StatusCode {
        let state = self.state.lock();
        if !self.handle_is_live(&state, chip) {
            return StatusCode::ChipInvalid;
        }
        if state.mode.is_none() {
            return StatusCode::NotStarted;
        }
        let required = if scenario.is_sar_profile() {
            CapabilityMask::SET_TX_POWER_LIMIT | CapabilityMask::USE_BODY_HEAD_SAR
        } else {
            CapabilityMask::SET_TX_POWER_LIMIT
        };
        if self.caps.contains(required) {
            StatusCode::Success
        } else {
            StatusCode::NotSupported
        }
    }

    fn register_callback(&self, chip: ChipHandle, callback: CallbackId) -> StatusCode {
        let state = self.state.lock();
        if !self.handle_is_live(&state, chip) {
            return StatusCode::ChipInvalid;
        }
        if !self.callbacks_supported {
            return StatusCode::NotSupported;
        }
        debug!(instance = %self.instance, callback = callback.get(), "callback registered");
        // Registration confirms the current configuration, if any.
        self.events.push(Event::ChipReconfigured {
            mode: state.mode.unwrap_or(0),
        });
        StatusCode::Success
    }
}

/// Wrapper that answers every gated operation with one fixed status,
/// ignoring its own mask. For negative tests: a validator that accepts
/// its answers is broken.
#[derive(Debug)]
pub struct MisbehavingChip {
    inner: FakeChip,
    answer: StatusCode,
}

impl MisbehavingChip {
    pub fn new(instance: &str, caps: CapabilityMask, answer: StatusCode) -> Self {
        Self {
            inner: FakeChip::new(instance, caps),
            answer,
        }
    }

    pub fn events(&self) -> &EventSink {
        self.inner.events()
    }
}

impl ChipService for MisbehavingChip {
    fn reset(&self, instance: &InstanceId) {
        self.inner.reset(instance);
    }

    fn acquire(&self, instance: &InstanceId) -> Result<ChipHandle, StatusCode> {
        self.inner.acquire(instance)
    }

    fn configure_for_role(
        &self,
        chip: ChipHandle,
        role: IfaceRole,
    ) -> Result<ChipModeId, StatusCode> {
        self.inner.configure_for_role(chip, role)
    }

    fn query_capabilities(
        &self,
        chip: ChipHandle,
        mode: ChipModeId,
    ) -> Result<CapabilityMask, StatusCode> {
        self.inner.query_capabilities(chip, mode)
    }

    fn select_power_scenario(&self, _chip: ChipHandle, _scenario: TxPowerScenario) -> StatusCode {
        self.answer
    }

    fn register_callback(&self, chip: ChipHandle, callback: CallbackId) -> StatusCode {
        self.inner.register_callback(chip, callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(chip: &FakeChip) -> (ChipHandle, ChipModeId) {
        let handle = chip.acquire(&InstanceId::from("wifi0")).unwrap();
        let mode = chip.configure_for_role(handle, IfaceRole::Sta).unwrap();
        (handle, mode)
    }

    #[test]
    fn reset_invalidates_issued_handles() {
        let chip = FakeChip::new("wifi0", CapabilityMask::SET_TX_POWER_LIMIT);
        let (handle, _) = configured(&chip);

        chip.reset(&InstanceId::from("wifi0"));
        assert_eq!(
            chip.select_power_scenario(handle, TxPowerScenario::VoiceCall),
            StatusCode::ChipInvalid
        );

        // A fresh acquire does not resurrect the old handle.
        let fresh = chip.acquire(&InstanceId::from("wifi0")).unwrap();
        assert_ne!(fresh, handle);
        assert_eq!(
            chip.query_capabilities(handle, ChipModeId::new(STA_MODE)),
            Err(StatusCode::ChipInvalid)
        );
    }

    #[test]
    fn reset_is_idempotent() {
        let mask = CapabilityMask::SET_TX_POWER_LIMIT | CapabilityMask::USE_BODY_HEAD_SAR;
        let chip = FakeChip::new("wifi0", mask);

        chip.reset(&InstanceId::from("wifi0"));
        chip.reset(&InstanceId::from("wifi0"));

        let (handle, mode) = configured(&chip);
        assert_eq!(chip.query_capabilities(handle, mode), Ok(mask));
    }

    #[test]
    fn reset_of_unknown_instance_is_ignored() {
        let chip = FakeChip::new("wifi0", CapabilityMask::empty());
        let (handle, mode) = configured(&chip);

        chip.reset(&InstanceId::from("wifi1"));
        assert!(chip.query_capabilities(handle, mode).is_ok());
    }

    #[test]
    fn gated_answers_follow_the_mask() {
        let both = CapabilityMask::SET_TX_POWER_LIMIT | CapabilityMask::USE_BODY_HEAD_SAR;
        let chip = FakeChip::new("wifi0", both);
        let (handle, _) = configured(&chip);
        assert_eq!(
            chip.select_power_scenario(handle, TxPowerScenario::OnBodyCellOff),
            StatusCode::Success
        );

        let chip = FakeChip::new("wifi0", CapabilityMask::SET_TX_POWER_LIMIT);
        let (handle, _) = configured(&chip);
        assert_eq!(
            chip.select_power_scenario(handle, TxPowerScenario::OnBodyCellOff),
            StatusCode::NotSupported
        );
        assert_eq!(
            chip.select_power_scenario(handle, TxPowerScenario::VoiceCall),
            StatusCode::Success
        );

        let chip = FakeChip::new("wifi0", CapabilityMask::empty());
        let (handle, _) = configured(&chip);
        assert_eq!(
            chip.select_power_scenario(handle, TxPowerScenario::VoiceCall),
            StatusCode::NotSupported
        );
    }

    #[test]
    fn operations_require_a_configured_mode() {
        let chip = FakeChip::new("wifi0", CapabilityMask::SET_TX_POWER_LIMIT);
        let handle = chip.acquire(&InstanceId::from("wifi0")).unwrap();

        assert_eq!(
            chip.select_power_scenario(handle, TxPowerScenario::VoiceCall),
            StatusCode::NotStarted
        );
        assert_eq!(
            chip.query_capabilities(handle, ChipModeId::new(STA_MODE)),
            Err(StatusCode::NotStarted)
        );
    }

    #[test]
    fn query_with_a_foreign_mode_is_invalid_args() {
        let chip = FakeChip::new("wifi0", CapabilityMask::SET_TX_POWER_LIMIT);
        let (handle, _) = configured(&chip);
        assert_eq!(
            chip.query_capabilities(handle, ChipModeId::new(99)),
            Err(StatusCode::InvalidArgs)
        );
    }

    #[test]
    fn callback_registration_queues_one_event() {
        let chip = FakeChip::new("wifi0", CapabilityMask::empty());
        let (handle, mode) = configured(&chip);

        chip.events().drain();
        assert_eq!(
            chip.register_callback(handle, CallbackId::new(1)),
            StatusCode::Success
        );
        assert_eq!(
            chip.events().drain(),
            vec![Event::ChipReconfigured { mode: mode.get() }]
        );
    }

    #[test]
    fn callbacks_can_be_disabled() {
        let chip = FakeChip::new("wifi0", CapabilityMask::empty()).without_callbacks();
        let (handle, _) = configured(&chip);

        chip.events().drain();
        assert_eq!(
            chip.register_callback(handle, CallbackId::new(1)),
            StatusCode::NotSupported
        );
        assert!(chip.events().drain().is_empty());
    }

    #[test]
    fn misbehaving_chip_ignores_its_mask() {
        let both = CapabilityMask::SET_TX_POWER_LIMIT | CapabilityMask::USE_BODY_HEAD_SAR;
        let chip = MisbehavingChip::new("wifi0", both, StatusCode::Busy);
        let handle = chip.acquire(&InstanceId::from("wifi0")).unwrap();
        chip.configure_for_role(handle, IfaceRole::Sta).unwrap();

        assert_eq!(
            chip.select_power_scenario(handle, TxPowerScenario::OnBodyCellOff),
            StatusCode::Busy
        );
    }
}
