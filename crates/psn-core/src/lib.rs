//! Position-rotated 64-bit block transform.
//!
//! This crate holds the arithmetic core of the scheme and provides:
//! - Key schedule deriving 64-bit subkeys from a `(P, Q, S)` seed triple.
//! - Four reversible word transforms and their exact inverses.
//! - Single-block encryption and decryption rotated by a position (PSN).
//! - Text framing into zero-padded big-endian 64-bit blocks.
//! - Initial position selection from message bytes.
//!
//! The scheme is a toy: blocks are enciphered independently and the key space
//! per position is tiny. It must not be used to protect real data.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod key;
mod position;
mod transform;

pub use crate::block::{blocks_to_bytes, blocks_to_text, bytes_to_blocks, text_to_blocks, Block};
pub use crate::cipher::{
    decrypt_block, decrypt_blocks, decrypt_text, encrypt_block, encrypt_blocks, encrypt_text,
    BlockCipher,
};
pub use crate::key::{generate, KeyTable, ScheduleConfig, Seeds, DEFAULT_SUBKEYS};
pub use crate::position::{
    select_initial_position, select_initial_position_with, Position, POSITION_RANGE,
};
pub use crate::transform::Transform;
