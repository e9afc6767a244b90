//! Endpoint key material for the PSN block transform.
//!
//! This crate wraps the core key schedule with the bookkeeping two parties
//! need: named seed profiles that persist with `bincode`, and statistics used
//! to eyeball a derived key table (bit balance, duplicates, overlap between
//! endpoints).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod profile;
mod report;

pub use profile::{EndpointProfile, ProfileParams, DEMO_SEEDS};
pub use report::{evaluate, shared_subkeys, SubkeyStats, TableReport};
