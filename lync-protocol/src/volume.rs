//! Volume byte encoding
//!
//! The amplifier stores volume as a signed offset from `0xC4`: raw `0xC4` is
//! volume 0 and the scale wraps upward, so volume 60 lands on `0x00`. A raw
//! `0x00` is reported back as the minimum volume.

/// Lowest volume the amplifier accepts
pub const VOLUME_MIN: u8 = 0;

/// Highest volume the amplifier accepts
pub const VOLUME_MAX: u8 = 60;

const VOLUME_OFFSET: u8 = 0xC4;

/// Clamp an arbitrary requested volume into the protocol range
pub fn clamp_volume(value: i32) -> u8 {
    value.clamp(VOLUME_MIN as i32, VOLUME_MAX as i32) as u8
}

/// Encode a volume as the wire operand: `(value + 0xC4) & 0xFF`
pub fn encode_volume(value: u8) -> u8 {
    value.min(VOLUME_MAX).wrapping_add(VOLUME_OFFSET)
}

/// Decode a raw volume byte from a zone record
pub fn decode_volume(raw: u8) -> u8 {
    if raw == 0 {
        return VOLUME_MIN;
    }
    clamp_volume(raw as i32 - VOLUME_OFFSET as i32)
}
