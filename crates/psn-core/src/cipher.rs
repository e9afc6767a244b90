//! Position-rotated block encryption and decryption.

use crate::block::{blocks_to_text, text_to_blocks, Block};
use crate::key::KeyTable;
use crate::position::Position;
use crate::transform::Transform;

/// Encrypts one block.
///
/// Step `i` applies transform `(psn + i) % 4` keyed with `table[i % len]`.
///
/// # Panics
///
/// Panics if `table` is empty.
pub fn encrypt_block(block: Block, table: &KeyTable, psn: Position) -> Block {
    let mut state = block;
    for step in 0..Transform::COUNT {
        let transform = Transform::from_index(psn.slot(step));
        state = transform.apply(state, table.subkey(step));
    }
    state
}

/// Decrypts one block produced by [`encrypt_block`] with the same table and position.
///
/// # Panics
///
/// Panics if `table` is empty.
pub fn decrypt_block(block: Block, table: &KeyTable, psn: Position) -> Block {
    let mut state = block;
    for step in (0..Transform::COUNT).rev() {
        let transform = Transform::from_index(psn.slot(step));
        state = transform.invert(state, table.subkey(step));
    }
    state
}

/// Encrypts each block independently.
///
/// # Panics
///
/// Panics if `table` is empty and `blocks` is not.
pub fn encrypt_blocks(blocks: &[Block], table: &KeyTable, psn: Position) -> Vec<Block> {
    map_blocks(blocks, |b| encrypt_block(b, table, psn))
}

/// Decrypts each block independently.
///
/// # Panics
///
/// Panics if `table` is empty and `blocks` is not.
pub fn decrypt_blocks(blocks: &[Block], table: &KeyTable, psn: Position) -> Vec<Block> {
    map_blocks(blocks, |b| decrypt_block(b, table, psn))
}

/// Frames and encrypts text.
pub fn encrypt_text(text: &str, table: &KeyTable, psn: Position) -> Vec<Block> {
    encrypt_blocks(&text_to_blocks(text), table, psn)
}

/// Decrypts blocks and reassembles the text.
pub fn decrypt_text(blocks: &[Block], table: &KeyTable, psn: Position) -> String {
    blocks_to_text(&decrypt_blocks(blocks, table, psn))
}

#[cfg(not(feature = "parallel"))]
fn map_blocks<F>(blocks: &[Block], f: F) -> Vec<Block>
where
    F: Fn(Block) -> Block,
{
    blocks.iter().map(|&b| f(b)).collect()
}

#[cfg(feature = "parallel")]
fn map_blocks<F>(blocks: &[Block], f: F) -> Vec<Block>
where
    F: Fn(Block) -> Block + Sync + Send,
{
    use rayon::prelude::*;

    blocks.par_iter().map(|&b| f(b)).collect()
}

/// Key table and position fixed for the lifetime of a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockCipher {
    table: KeyTable,
    psn: Position,
}

impl BlockCipher {
    /// Binds a table to a position.
    ///
    /// # Panics
    ///
    /// Panics if `table` is empty.
    pub fn new(table: KeyTable, psn: Position) -> Self {
        assert!(!table.is_empty(), "key table must hold at least one subkey");
        Self { table, psn }
    }

    /// The bound key table.
    pub fn table(&self) -> &KeyTable {
        &self.table
    }

    /// The bound position.
    pub fn position(&self) -> Position {
        self.psn
    }

    /// Encrypts one block.
    pub fn encrypt_block(&self, block: Block) -> Block {
        encrypt_block(block, &self.table, self.psn)
    }

    /// Decrypts one block.
    pub fn decrypt_block(&self, block: Block) -> Block {
        decrypt_block(block, &self.table, self.psn)
    }

    /// Frames and encrypts text.
    pub fn encrypt_text(&self, text: &str) -> Vec<Block> {
        encrypt_text(text, &self.table, self.psn)
    }

    /// Decrypts blocks back into text.
    pub fn decrypt_text(&self, blocks: &[Block]) -> String {
        decrypt_text(blocks, &self.table, self.psn)
    }
}
