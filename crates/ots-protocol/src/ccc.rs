//! Client Characteristic Configuration values for the control point.

/// Value written to a Client Characteristic Configuration descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CccValue(pub u16);

impl CccValue {
    pub const DISABLED: Self = Self(0x0000);
    pub const NOTIFY: Self = Self(0x0001);
    pub const INDICATE: Self = Self(0x0002);

    /// Decode the 2-byte little-endian descriptor value.
    pub fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }
}

/// Indications are enabled only when the value is exactly "indicate";
/// anything else, including notify-and-indicate, disables them.
pub fn indications_enabled(value: CccValue) -> bool {
    value == CccValue::INDICATE
}
