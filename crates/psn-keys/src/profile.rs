//! Endpoint profiles and serialization helpers.

use psn_core::{generate, KeyTable, Seeds};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

/// Seeds used by the demo round trip.
pub const DEMO_SEEDS: Seeds = Seeds::new(104_729, 1_299_709, 1_234_567_890_123_456_789);

const CLIENT_A_SEEDS: Seeds = Seeds::new(104_729, 1_299_709, 9_876_543_210_123_456_789);
const SERVER_B_SEEDS: Seeds = Seeds::new(104_759, 1_299_721, 123_456_789_876_543_210);

/// Static parameters stored alongside a profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileParams {
    /// Number of transform slots per block (4).
    pub transforms: usize,
    /// Block size in bytes (8).
    pub block_bytes: usize,
    /// Version tag for future compatibility changes.
    pub version: u32,
}

impl Default for ProfileParams {
    fn default() -> Self {
        Self {
            transforms: psn_core::Transform::COUNT,
            block_bytes: 8,
            version: 1,
        }
    }
}

/// Seed triple of one party together with its derived subkeys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointProfile {
    /// Display name of the endpoint.
    pub name: String,
    /// Product base `P`.
    pub p: u64,
    /// Multiplier `Q`.
    pub q: u64,
    /// Initial state `S`.
    pub s: u64,
    /// Derived subkeys, in schedule order.
    pub subkeys: Vec<u64>,
    /// Static parameters.
    pub params: ProfileParams,
}

impl EndpointProfile {
    /// Derives `count` subkeys for `seeds` under `name`.
    pub fn derive(name: impl Into<String>, seeds: Seeds, count: usize) -> Self {
        Self {
            name: name.into(),
            p: seeds.p,
            q: seeds.q,
            s: seeds.s,
            subkeys: generate(seeds, count).into(),
            params: ProfileParams::default(),
        }
    }

    /// Draws a fresh seed triple from `rng` and derives `count` subkeys.
    pub fn random<R: RngCore + CryptoRng>(
        name: impl Into<String>,
        rng: &mut R,
        count: usize,
    ) -> Self {
        let seeds = Seeds::new(rng.next_u64(), rng.next_u64(), rng.next_u64());
        Self::derive(name, seeds, count)
    }

    /// Built-in client endpoint.
    pub fn client_a() -> Self {
        Self::derive("CLIENT A", CLIENT_A_SEEDS, psn_core::DEFAULT_SUBKEYS)
    }

    /// Built-in server endpoint.
    pub fn server_b() -> Self {
        Self::derive("SERVER B", SERVER_B_SEEDS, psn_core::DEFAULT_SUBKEYS)
    }

    /// The seed triple.
    pub fn seeds(&self) -> Seeds {
        Seeds::new(self.p, self.q, self.s)
    }

    /// The stored subkeys as a key table.
    pub fn table(&self) -> KeyTable {
        KeyTable::from_subkeys(self.subkeys.clone())
    }

    /// Returns `true` when the stored subkeys match a fresh derivation.
    pub fn is_consistent(&self) -> bool {
        generate(self.seeds(), self.subkeys.len()).as_slice() == self.subkeys.as_slice()
    }

    /// Serializes the profile with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserializes a profile with `bincode`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}
