//! Capability bits advertised by a chip.

bitflags::bitflags! {
    /// Optional features a chip instance supports in its current mode.
    ///
    /// Queried once per scenario via `query_capabilities` and immutable for
    /// that scenario's duration. Bit assignments are frozen by contract
    /// revision 1.2. On the wire the mask travels as a raw `u32`; decode
    /// with [`CapabilityMask::from_wire`] so bits this crate does not know
    /// about survive the round trip.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CapabilityMask: u32 {
        const DEBUG_MEMORY_FIRMWARE_DUMP      = 1 << 0;
        const DEBUG_MEMORY_DRIVER_DUMP        = 1 << 1;
        const DEBUG_RING_BUFFER_CONNECT_EVENT = 1 << 2;
        const DEBUG_RING_BUFFER_POWER_EVENT   = 1 << 3;
        const DEBUG_RING_BUFFER_WAKELOCK_EVENT = 1 << 4;
        const DEBUG_RING_BUFFER_VENDOR_DATA   = 1 << 5;
        const DEBUG_HOST_WAKE_REASON_STATS    = 1 << 6;
        const DEBUG_ERROR_ALERTS              = 1 << 7;
        /// Chip can apply transmit power limits (revision 1.1).
        const SET_TX_POWER_LIMIT              = 1 << 8;
        const D2D_RTT                         = 1 << 9;
        const D2AP_RTT                        = 1 << 10;
        /// Chip distinguishes on-head and on-body SAR profiles (revision 1.2).
        const USE_BODY_HEAD_SAR               = 1 << 11;
    }
}

impl CapabilityMask {
    /// Decode a wire mask, keeping bits newer than this crate.
    pub fn from_wire(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }

    pub fn to_wire(self) -> u32 {
        self.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frozen_bit_assignments() {
        assert_eq!(CapabilityMask::SET_TX_POWER_LIMIT.bits(), 1 << 8);
        assert_eq!(CapabilityMask::USE_BODY_HEAD_SAR.bits(), 1 << 11);
        assert_eq!(CapabilityMask::DEBUG_ERROR_ALERTS.bits(), 1 << 7);
    }

    #[test]
    fn unknown_bits_survive_the_wire() {
        let wire = (1 << 8) | (1 << 20);
        let mask = CapabilityMask::from_wire(wire);
        assert!(mask.contains(CapabilityMask::SET_TX_POWER_LIMIT));
        assert_eq!(mask.to_wire(), wire);
    }
}
