#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Rejection-sampling system that chooses cells for newly created entities.

use nature_lovers_core::{CellCoord, FieldView};
use rand::Rng;
use tracing::warn;

const DEFAULT_WARNING_INTERVAL: u64 = 100_000;

/// Acceptance criterion applied to each uniformly sampled cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Unoccupied and still showing the background color.
    Pristine,
    /// Unoccupied; paint is ignored.
    Vacant,
}

impl Placement {
    /// Reports whether the cell satisfies the criterion.
    #[must_use]
    pub fn admits(self, view: &FieldView<'_>, cell: CellCoord) -> bool {
        match self {
            Self::Pristine => view.is_vacant(cell) && view.is_unmarked(cell),
            Self::Vacant => view.is_vacant(cell),
        }
    }
}

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    warning_interval: u64,
}

impl Config {
    /// Creates a configuration that warns every `warning_interval` rejected samples.
    #[must_use]
    pub const fn new(warning_interval: u64) -> Self {
        Self { warning_interval }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_WARNING_INTERVAL)
    }
}

/// Pure system that draws cells uniformly until one is admitted.
#[derive(Debug)]
pub struct Spawning {
    warning_interval: u64,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            warning_interval: config.warning_interval.max(1),
        }
    }

    /// Samples cells until `placement` admits one.
    ///
    /// The loop is unbounded: when no admissible cell exists the call never
    /// returns. Long runs are reported through `tracing` so a saturated field
    /// can be diagnosed.
    ///
    /// # Panics
    ///
    /// Panics when the view describes a grid without cells.
    pub fn sample_cell<R: Rng>(
        &self,
        view: &FieldView<'_>,
        placement: Placement,
        rng: &mut R,
    ) -> CellCoord {
        self.sample_cell_excluding(view, placement, &[], rng)
    }

    /// Samples cells until `placement` admits one that is not `reserved`.
    ///
    /// # Panics
    ///
    /// Panics when the view describes a grid without cells.
    pub fn sample_cell_excluding<R: Rng>(
        &self,
        view: &FieldView<'_>,
        placement: Placement,
        reserved: &[CellCoord],
        rng: &mut R,
    ) -> CellCoord {
        let (columns, rows) = view.dimensions();
        assert!(
            columns > 0 && rows > 0,
            "spawning requires a grid with at least one cell"
        );

        let mut rejected: u64 = 0;
        loop {
            let cell = CellCoord::new(rng.gen_range(0..columns), rng.gen_range(0..rows));
            if placement.admits(view, cell) && !reserved.contains(&cell) {
                return cell;
            }

            rejected = rejected.saturating_add(1);
            if rejected % self.warning_interval == 0 {
                warn!(rejected, ?placement, "no admissible spawn cell found yet");
            }
        }
    }
}

impl Default for Spawning {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_warning_interval_is_raised_to_one() {
        let spawning = Spawning::new(Config::new(0));
        assert_eq!(spawning.warning_interval, 1);
    }
}
