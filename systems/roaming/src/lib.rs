#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stochastic stepping for hazards and leashed companions.

use nature_lovers_core::{CellCoord, Delta, Direction, FieldView};
use rand::Rng;

/// Random directions a companion tries before giving up on the tick.
pub const LEASH_ATTEMPTS: usize = 10;

/// Uniform displacement drawn from `{-1, 0, 1}` on each axis.
///
/// The zero displacement and diagonals are included. The column offset is
/// drawn before the row offset.
pub fn wander<R: Rng>(rng: &mut R) -> Delta {
    let dx = rng.gen_range(-1..=1);
    let dy = rng.gen_range(-1..=1);
    Delta::new(dx, dy)
}

/// Region a companion must stay inside, centred on its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Leash {
    owner: CellCoord,
    radius: u32,
}

impl Leash {
    /// Creates a leash of `radius` Manhattan steps around `owner`.
    #[must_use]
    pub const fn new(owner: CellCoord, radius: u32) -> Self {
        Self { owner, radius }
    }

    /// Reports whether `cell` lies within the leash.
    #[must_use]
    pub fn allows(&self, cell: CellCoord) -> bool {
        self.owner.manhattan_distance(cell) <= self.radius
    }
}

/// Picks a direction for a companion standing on `origin`.
///
/// Up to [`LEASH_ATTEMPTS`] uniformly random directions are tried; the first
/// whose destination is on the grid, inside the leash and unoccupied wins.
/// Returns `None` when every attempt fails, in which case the companion stays.
pub fn leash_step<R: Rng>(
    rng: &mut R,
    view: &FieldView<'_>,
    origin: CellCoord,
    leash: Leash,
) -> Option<Direction> {
    for _ in 0..LEASH_ATTEMPTS {
        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        let Some(candidate) = origin.translate(direction.delta()) else {
            continue;
        };
        if leash.allows(candidate) && view.is_vacant(candidate) {
            return Some(direction);
        }
    }
    None
}
