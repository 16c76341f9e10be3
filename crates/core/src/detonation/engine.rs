//! Recursive blast propagation.
//!
//! A bomb lights its own cell with all four arms, then fires one ray in each
//! direction. A ray walks outward cell by cell for up to `radius` steps:
//!
//! - leaving the terrain ends the ray silently;
//! - a wall is destroyed (becomes [`Cell::Empty`]) and ends the ray;
//! - a bomb that has not gone off yet is detonated recursively and absorbs
//!   the ray, its own four rays carry the blast further;
//! - anything else (empty ground, flame, a bomb already spent this tick)
//!   gains flame arms and the ray continues.
//!
//! Interior ray cells get both arms of the ray's axis (`─`, `│`). The cell at
//! the full radius gets a single arm pointing back toward the bomb, so a ray
//! fired to the right ends in `╴`. Overlapping rays OR their masks.
//!
//! All chained bombs resolve inside one call, depth first, and the merged
//! result is returned as if they all went off in the same instant. Chains are
//! walked with an explicit stack of pending bombs, so chain length is bounded
//! by memory rather than by the thread's stack.

use crate::core_types::{Cell, Direction, FlameMask, Position};
use crate::detonation::config::BlastConfig;
use crate::detonation::update::BlastUpdate;
use crate::error::BlastError;
use crate::grid::Terrain;
use rustc_hash::FxHashSet;
use tracing::{debug, info, trace};

/// Detonate the bomb at `origin` with the default [`BlastConfig`].
///
/// # Errors
///
/// See [`detonate_with`].
pub fn detonate(origin: Position, terrain: &Terrain) -> Result<BlastUpdate, BlastError> {
    detonate_with(origin, terrain, &BlastConfig::default())
}

/// Detonate the bomb at `origin` and every bomb its blast reaches.
///
/// `terrain` is only read. The returned [`BlastUpdate`] lists every cell the
/// chain reaction changed; apply it with [`Terrain::apply`].
///
/// # Errors
///
/// - [`BlastError::InvalidRadius`] if `config.radius` is zero.
/// - [`BlastError::OutOfBounds`] if `origin` is not on the terrain.
/// - [`BlastError::NotABomb`] if the cell at `origin` holds no bomb.
pub fn detonate_with(
    origin: Position,
    terrain: &Terrain,
    config: &BlastConfig,
) -> Result<BlastUpdate, BlastError> {
    config.validate()?;

    let found = terrain.get(origin).ok_or(BlastError::OutOfBounds {
        position: origin,
        width: terrain.width(),
        height: terrain.height(),
    })?;
    if !found.is_bomb() {
        return Err(BlastError::NotABomb {
            position: origin,
            found,
        });
    }

    let mut state = BlastState::new(terrain, config.radius);
    state.run(origin);

    info!(
        origin = %origin,
        radius = config.radius,
        bombs = state.detonated.len(),
        cells = state.update.len(),
        "Detonation resolved"
    );

    Ok(state.update)
}

/// A detonated bomb whose rays have not all been fired yet.
struct PendingBomb {
    center: Position,
    /// Index into [`Direction::ALL`] of the next ray to fire.
    next_ray: usize,
}

/// Accumulator for one top-level detonation.
struct BlastState<'t> {
    terrain: &'t Terrain,
    radius: u32,
    /// Bombs that have gone off during this call.
    detonated: FxHashSet<Position>,
    update: BlastUpdate,
    /// Depth-first chain of bombs still firing; the top is the most recent.
    pending: Vec<PendingBomb>,
}

impl<'t> BlastState<'t> {
    fn new(terrain: &'t Terrain, radius: u32) -> Self {
        Self {
            terrain,
            radius,
            detonated: FxHashSet::default(),
            update: BlastUpdate::new(),
            pending: Vec::new(),
        }
    }

    /// Fire every ray of `origin` and of each bomb it chains into.
    ///
    /// A ray that sets off a bomb suspends its own bomb until the new one has
    /// fired all four rays, the same order a recursive walk would take.
    fn run(&mut self, origin: Position) {
        self.ignite(origin);

        while let Some(top) = self.pending.last_mut() {
            let Some(&direction) = Direction::ALL.get(top.next_ray) else {
                self.pending.pop();
                continue;
            };
            top.next_ray += 1;
            let center = top.center;

            if let Some(bomb) = self.fire_ray(center, direction) {
                self.ignite(bomb);
            }
        }
    }

    fn ignite(&mut self, center: Position) {
        self.detonated.insert(center);
        self.update.merge_flame(center, FlameMask::FULL);

        if self.detonated.len() > 1 {
            debug!(at = %center, chained = self.detonated.len() - 1, "Chained detonation");
        }

        self.pending.push(PendingBomb {
            center,
            next_ray: 0,
        });
    }

    /// Walk one ray, returning the live bomb that absorbed it, if any.
    fn fire_ray(&mut self, center: Position, direction: Direction) -> Option<Position> {
        let mut current = center;

        for step in 1..=self.radius {
            current = current.step(direction);

            let cell = self.terrain.get(current)?;

            match cell {
                Cell::Wall => {
                    trace!(at = %current, %direction, "Wall destroyed");
                    self.update.destroy_wall(current);
                    return None;
                }
                Cell::Bomb if !self.detonated.contains(&current) => return Some(current),
                _ => {
                    let mask = if step == self.radius {
                        FlameMask::from_direction(direction.opposite())
                    } else {
                        FlameMask::axis(direction)
                    };
                    self.update.merge_flame(current, mask);
                }
            }
        }

        None
    }
}
