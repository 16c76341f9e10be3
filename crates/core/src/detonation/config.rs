//! Blast configuration.

use crate::error::BlastError;
use serde::{Deserialize, Serialize};

/// Radius used when the host supplies no configuration.
pub const DEFAULT_BLAST_RADIUS: u32 = 3;

/// Tunable parameters of a detonation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlastConfig {
    /// Maximum number of steps a ray travels away from its bomb.
    pub radius: u32,
}

impl Default for BlastConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_BLAST_RADIUS,
        }
    }
}

impl BlastConfig {
    pub const fn with_radius(radius: u32) -> Self {
        Self { radius }
    }

    /// Check the configuration before a detonation uses it.
    ///
    /// # Errors
    ///
    /// Returns [`BlastError::InvalidRadius`] if `radius` is zero.
    pub fn validate(&self) -> Result<(), BlastError> {
        if self.radius == 0 {
            return Err(BlastError::InvalidRadius);
        }
        Ok(())
    }
}
