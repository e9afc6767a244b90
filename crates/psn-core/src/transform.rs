//! The four elementary word transforms.

/// One of the four reversible transforms applied to a 64-bit word.
///
/// The rotations ignore their key argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transform {
    /// `x ^ k`, its own inverse.
    Xor,
    /// Rotate left by 5.
    RotateLeft5,
    /// `x + k` modulo 2^64.
    AddMod,
    /// Rotate right by 7.
    RotateRight7,
}

impl Transform {
    /// Transforms in slot order; slot `i` is selected by `(psn + i) % 4`.
    pub const ORDER: [Transform; 4] = [
        Transform::Xor,
        Transform::RotateLeft5,
        Transform::AddMod,
        Transform::RotateRight7,
    ];

    /// Number of transforms.
    pub const COUNT: usize = Self::ORDER.len();

    /// Selects the transform at `index % 4`.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self::ORDER[index % Self::COUNT]
    }

    /// Applies the forward transform.
    #[inline]
    pub fn apply(self, x: u64, k: u64) -> u64 {
        match self {
            Transform::Xor => x ^ k,
            Transform::RotateLeft5 => x.rotate_left(5),
            Transform::AddMod => x.wrapping_add(k),
            Transform::RotateRight7 => x.rotate_right(7),
        }
    }

    /// Applies the inverse transform.
    #[inline]
    pub fn invert(self, x: u64, k: u64) -> u64 {
        match self {
            Transform::Xor => x ^ k,
            Transform::RotateLeft5 => x.rotate_right(5),
            Transform::AddMod => x.wrapping_sub(k),
            Transform::RotateRight7 => x.rotate_left(7),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    const EDGE_WORDS: [u64; 6] = [
        0,
        1,
        u64::MAX,
        1 << 63,
        0x8000_0000_0000_0001,
        0x0123_4567_89ab_cdef,
    ];

    #[test]
    fn inverse_undoes_forward_on_edges() {
        for t in Transform::ORDER {
            for &x in &EDGE_WORDS {
                for &k in &EDGE_WORDS {
                    assert_eq!(t.invert(t.apply(x, k), k), x, "{t:?} x={x:#x} k={k:#x}");
                    assert_eq!(t.apply(t.invert(x, k), k), x, "{t:?} x={x:#x} k={k:#x}");
                }
            }
        }
    }

    #[test]
    fn inverse_undoes_forward_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            let x: u64 = rng.gen();
            let k: u64 = rng.gen();
            for t in Transform::ORDER {
                assert_eq!(t.invert(t.apply(x, k), k), x);
            }
        }
    }

    #[test]
    fn rotations_ignore_key() {
        let x = 0xdead_beef_0bad_f00d;
        for t in [Transform::RotateLeft5, Transform::RotateRight7] {
            assert_eq!(t.apply(x, 0), t.apply(x, u64::MAX));
            assert_eq!(t.invert(x, 0), t.invert(x, 12345));
        }
    }

    #[test]
    fn forward_values() {
        assert_eq!(Transform::Xor.apply(0b1100, 0b1010), 0b0110);
        assert_eq!(Transform::RotateLeft5.apply(1 << 60, 0), 1 << 1);
        assert_eq!(Transform::AddMod.apply(u64::MAX, 2), 1);
        assert_eq!(Transform::AddMod.invert(1, 2), u64::MAX);
        assert_eq!(Transform::RotateRight7.apply(1, 0), 1 << 57);
    }

    #[test]
    fn from_index_wraps() {
        assert_eq!(Transform::from_index(0), Transform::Xor);
        assert_eq!(Transform::from_index(3), Transform::RotateRight7);
        assert_eq!(Transform::from_index(6), Transform::AddMod);
    }
}
