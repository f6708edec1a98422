//! Five-bit slope quantization.
//!
//! Magnitudes below 16 degrees are stored with 1 degree precision. From 16
//! to 76 degrees bit 4 is set and the low nibble counts 4 degree steps
//! above 16. Anything steeper saturates at [`MAX_SLOPE_CODE`].

/// Width of a slope code in bits.
pub const SLOPE_CODE_BITS: u32 = 5;

/// Code for the steepest representable slope.
pub const MAX_SLOPE_CODE: u8 = 0x1f;

/// Magnitude in degrees that [`MAX_SLOPE_CODE`] decodes to.
pub const MAX_SLOPE_DEGREES: i32 = 76;

const COARSE_TIER: u8 = 0x10;
const FINE_LIMIT: f32 = 16.0;
const COARSE_STEP: i32 = 4;

/// Quantizes a non-negative slope magnitude.
///
/// Negative and NaN magnitudes encode as 0 (no slope).
pub fn encode_magnitude(magnitude: f32) -> u8 {
    // Also catches NaN.
    if !(magnitude > 0.0) {
        0
    } else if magnitude < FINE_LIMIT {
        magnitude.ceil() as u8
    } else if magnitude < MAX_SLOPE_DEGREES as f32 {
        COARSE_TIER | ((magnitude - FINE_LIMIT) * 0.25).ceil() as u8
    } else {
        MAX_SLOPE_CODE
    }
}

/// Magnitude in degrees represented by `code`.
pub const fn decode_magnitude(code: u8) -> i32 {
    if code & COARSE_TIER == 0 {
        code as i32
    } else {
        FINE_LIMIT as i32 + (code & 0x0f) as i32 * COARSE_STEP
    }
}

/// True when `magnitude` is beyond what a code can represent.
pub fn saturates(magnitude: f32) -> bool {
    magnitude >= MAX_SLOPE_DEGREES as f32
}

/// Encodes the maximum upward slope. Downhill values store 0.
pub fn encode_up_slope(slope: f32) -> u8 {
    encode_magnitude(slope)
}

/// Encodes the maximum downward slope (a non-positive grade). Uphill
/// values store 0.
pub fn encode_down_slope(slope: f32) -> u8 {
    encode_magnitude(-slope)
}

/// Decodes an upward slope code to degrees (non-negative).
pub const fn decode_up_slope(code: u8) -> i32 {
    decode_magnitude(code)
}

/// Decodes a downward slope code to degrees (non-positive).
pub const fn decode_down_slope(code: u8) -> i32 {
    -decode_magnitude(code)
}
