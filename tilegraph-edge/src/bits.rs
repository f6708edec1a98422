//! Sub-field packing for the per-local-index arrays of an edge.
//!
//! An array is a `u32` holding [`LOCAL_SLOTS`] slots of `WIDTH` bits each,
//! slot `i` at bit offset `i * WIDTH`.

use tilegraph_common::constants::MAX_LOCAL_EDGE_INDEX;

/// Number of slots in every per-local-index array.
pub const LOCAL_SLOTS: u32 = MAX_LOCAL_EDGE_INDEX + 1;

#[inline]
const fn ones(width: u32) -> u32 {
    if width >= u32::BITS {
        u32::MAX
    } else {
        (1 << width) - 1
    }
}

/// Returns `dst` with slot `slot` (of `width` bits) replaced by the low
/// `width` bits of `src`. All other bits are preserved.
///
/// `slot * width + width` must not exceed 32; the record never calls it
/// otherwise.
#[inline]
pub const fn overwrite_bits(dst: u32, src: u32, slot: u32, width: u32) -> u32 {
    if width == 0 {
        return dst;
    }
    let shift = slot * width;
    let mask = ones(width) << shift;
    (dst & !mask) | ((src << shift) & mask)
}

/// Reads slot `slot` of `width` bits from `src`.
#[inline]
pub const fn extract_bits(src: u32, slot: u32, width: u32) -> u32 {
    if width == 0 {
        return 0;
    }
    (src >> (slot * width)) & ones(width)
}

/// Fixed-capacity array of `WIDTH`-bit values addressed by local edge index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedArray<const WIDTH: u32>(u32);

/// 3-bit turn type per inbound edge.
pub type TurnTypes = PackedArray<3>;
/// 1-bit flag per inbound edge (edge to the left or right).
pub type EdgeFlags = PackedArray<1>;
/// 3-bit stop impact per inbound edge.
pub type StopImpacts = PackedArray<3>;

impl<const WIDTH: u32> PackedArray<WIDTH> {
    /// Largest value one slot can hold.
    pub const MAX_VALUE: u32 = ones(WIDTH);
    /// Width of the whole array in bits.
    pub const BITS: u32 = WIDTH * LOCAL_SLOTS;

    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & ones(Self::BITS))
    }

    #[inline]
    pub const fn into_bits(self) -> u32 {
        self.0
    }

    /// Value at `index`, or `None` past the last slot.
    #[inline]
    pub const fn get(&self, index: u32) -> Option<u32> {
        if index >= LOCAL_SLOTS {
            return None;
        }
        Some(extract_bits(self.0, index, WIDTH))
    }

    /// Copy with `value` (truncated to `WIDTH` bits) stored at `index`, or
    /// `None` past the last slot.
    #[inline]
    pub const fn with(self, index: u32, value: u32) -> Option<Self> {
        if index >= LOCAL_SLOTS {
            return None;
        }
        Some(Self(overwrite_bits(self.0, value, index, WIDTH)))
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (0..LOCAL_SLOTS).map(move |i| extract_bits(self.0, i, WIDTH))
    }
}
