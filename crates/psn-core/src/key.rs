//! Seed triples and the subkey schedule.

/// Number of subkeys derived when no count is given.
pub const DEFAULT_SUBKEYS: usize = 8;

/// Seed triple `(P, Q, S)` for one party.
///
/// `p` and `q` are fixed per party and `s` is the initial generator state.
/// Nothing requires them to be prime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seeds {
    /// Product base.
    pub p: u64,
    /// Multiplier, also folded into the state update.
    pub q: u64,
    /// Initial generator state.
    pub s: u64,
}

impl Seeds {
    /// Builds a seed triple.
    pub const fn new(p: u64, q: u64, s: u64) -> Self {
        Self { p, q, s }
    }
}

impl From<(u64, u64, u64)> for Seeds {
    fn from((p, q, s): (u64, u64, u64)) -> Self {
        Self { p, q, s }
    }
}

/// Schedule parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Number of subkeys to derive.
    pub count: usize,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_SUBKEYS,
        }
    }
}

/// Ordered, immutable table of 64-bit subkeys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyTable(Vec<u64>);

impl KeyTable {
    /// Derives a table from `seeds` with the given configuration.
    pub fn generate(seeds: Seeds, config: ScheduleConfig) -> Self {
        generate(seeds, config.count)
    }

    /// Derives the default eight-entry table.
    pub fn generate_default(seeds: Seeds) -> Self {
        generate(seeds, DEFAULT_SUBKEYS)
    }

    /// Wraps subkeys obtained elsewhere.
    pub fn from_subkeys(subkeys: Vec<u64>) -> Self {
        Self(subkeys)
    }

    /// Number of subkeys.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for a table with no subkeys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the subkey at `index`, if present.
    #[inline]
    pub fn get(&self, index: usize) -> Option<u64> {
        self.0.get(index).copied()
    }

    /// Returns the subkey at `index % len`.
    ///
    /// # Panics
    ///
    /// Panics if the table is empty.
    #[inline]
    pub fn subkey(&self, index: usize) -> u64 {
        self.0[index % self.0.len()]
    }

    /// Iterates the subkeys in schedule order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().copied()
    }

    /// Borrows the subkeys.
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }
}

impl AsRef<[u64]> for KeyTable {
    fn as_ref(&self) -> &[u64] {
        &self.0
    }
}

impl From<KeyTable> for Vec<u64> {
    fn from(table: KeyTable) -> Self {
        table.0
    }
}

/// Derives `count` subkeys from a seed triple.
///
/// Each step emits `(P ^ S) * Q` and advances the state to `(S << 3) ^ Q`,
/// all wrapping at 64 bits.
pub fn generate(seeds: Seeds, count: usize) -> KeyTable {
    let Seeds { p, q, s } = seeds;
    let mut state = s;
    let mut subkeys = Vec::with_capacity(count);
    for _ in 0..count {
        let combined = p ^ state;
        subkeys.push(combined.wrapping_mul(q));
        state = (state << 3) ^ q;
    }
    KeyTable(subkeys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    const CLIENT_SEEDS: Seeds = Seeds::new(104_729, 1_299_709, 9_876_543_210_123_456_789);

    const CLIENT_TABLE: [u64; 8] = [
        0x3870_2773_0254_43dc,
        0xc381_3bca_08b6_ec1c,
        0x1c09_de82_3bcc_2e1c,
        0xe04e_f5d0_783a_3e1c,
        0x0277_ac27_4349_be1c,
        0x13bd_61f6_e34d_be1c,
        0x9deb_1073_e36d_be1c,
        0xef58_845b_e46d_be1c,
    ];

    #[test]
    fn client_seeds_match_fixture() {
        let table = KeyTable::generate_default(CLIENT_SEEDS);
        assert_eq!(table.len(), 8);
        assert_eq!(table.as_slice(), &CLIENT_TABLE);
    }

    #[test]
    fn server_seeds_match_fixture() {
        let table = generate(Seeds::new(104_759, 1_299_721, 123_456_789_876_543_210), 8);
        assert_eq!(table.get(0), Some(0x8542_ba03_9a84_b7c5));
        assert_eq!(table.get(7), Some(0x3f7b_8ca3_8023_b3e6));
    }

    #[test]
    fn small_seeds_follow_recurrence() {
        // s: 1 -> 9 -> 73
        let table = generate(Seeds::new(1, 1, 1), 3);
        assert_eq!(table.as_slice(), &[0, 8, 72]);
    }

    #[test]
    fn state_shift_truncates_high_bits() {
        let table = generate(Seeds::new(0, 1, u64::MAX), 2);
        assert_eq!(table.as_slice(), &[u64::MAX, (u64::MAX << 3) ^ 1]);
    }

    #[test]
    fn zero_count_yields_empty_table() {
        let table = generate(CLIENT_SEEDS, 0);
        assert!(table.is_empty());
        assert_eq!(table.get(0), None);
    }

    #[test]
    fn generation_is_deterministic() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let seeds = Seeds::new(rng.gen(), rng.gen(), rng.gen());
            let count = rng.gen_range(0..32);
            assert_eq!(generate(seeds, count), generate(seeds, count));
        }
    }

    #[test]
    fn longer_table_extends_shorter_one() {
        let short = generate(CLIENT_SEEDS, 4);
        let long = generate(CLIENT_SEEDS, 12);
        assert_eq!(short.as_slice(), &long.as_slice()[..4]);
    }

    #[test]
    fn subkey_wraps_index() {
        let table = KeyTable::from_subkeys(vec![10, 20, 30]);
        assert_eq!(table.subkey(0), 10);
        assert_eq!(table.subkey(4), 20);
        assert_eq!(table.subkey(3), 10);
    }

    #[test]
    fn config_default_is_eight() {
        let table = KeyTable::generate(CLIENT_SEEDS, ScheduleConfig::default());
        assert_eq!(table.len(), DEFAULT_SUBKEYS);
    }
}
