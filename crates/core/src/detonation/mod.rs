//! Detonation engine
//!
//! Pure function of (origin, terrain snapshot, config) to a [`BlastUpdate`].
//! The terrain is never written; the host applies the update.

pub mod config;
mod engine;
pub mod update;

pub use config::{BlastConfig, DEFAULT_BLAST_RADIUS};
pub use engine::{detonate, detonate_with};
pub use update::{BlastEntry, BlastUpdate};
