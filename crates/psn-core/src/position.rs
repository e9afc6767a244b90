//! Rotation offset (PSN) and its initial selection.

use core::fmt;

use rand::Rng;

/// Upper bound (exclusive) of positions produced by the selector.
pub const POSITION_RANGE: u32 = 16;

/// Rotation offset into the transform order.
///
/// Any value is legal; the cipher reduces it modulo 4.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(pub u32);

impl Position {
    /// Returns the raw offset.
    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Slot of the transform applied at loop step `step`.
    #[inline]
    pub(crate) fn slot(self, step: usize) -> usize {
        (self.0 as usize).wrapping_add(step)
    }
}

impl From<u32> for Position {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Picks the message position from its bytes, using the thread RNG when empty.
pub fn select_initial_position(data: &[u8]) -> Position {
    select_initial_position_with(data, &mut rand::thread_rng())
}

/// Picks the message position from its bytes.
///
/// Non-empty input yields `sum(bytes) % 16`. Empty input draws uniformly from
/// `[0, 16)` using `rng`.
pub fn select_initial_position_with<R: Rng + ?Sized>(data: &[u8], rng: &mut R) -> Position {
    if data.is_empty() {
        return Position(rng.gen_range(0..POSITION_RANGE));
    }
    // 16 divides 2^64, so the wrapping sum keeps the residue
    let sum = data
        .iter()
        .fold(0u64, |acc, &b| acc.wrapping_add(u64::from(b)));
    Position((sum % u64::from(POSITION_RANGE)) as u32)
}
