/// FNV-1a 64-bit hasher used to derive per-tile stream seeds.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// SplitMix64 finalizer. Spreads entropy from the low bits of a seed across all 64 bits.
pub(crate) fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Clamp to `[0, 1]` and scale to an 8-bit channel, truncating.
pub(crate) fn unit_to_u8(v: f64) -> u8 {
    // NaN maps to 0 through the saturating cast.
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

/// Fractional part in `[0, 1)` for any finite input, including negatives.
pub(crate) fn fract01(v: f64) -> f64 {
    v - v.floor()
}

/// Contrast stretch around mid-grey.
pub(crate) fn stretch(v: f64, gain: f64) -> f64 {
    0.5 + (v - 0.5) * gain
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
