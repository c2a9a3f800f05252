#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pollution-avoidance steering used by foragers.
//!
//! Each candidate direction is scored by the mean pollution inside a square
//! window ahead of the forager. The window reaches `1..=vision` cells along
//! the direction and `-vision..=vision` cells across it. Samples that fall off
//! the grid are discarded.

use nature_lovers_core::{CellCoord, Direction, FieldView};

/// Score given to a direction whose window holds no on-grid samples.
pub const UNREACHABLE: f64 = f64::INFINITY;

/// Pure system that chooses the cleanest direction for a forager.
#[derive(Clone, Copy, Debug)]
pub struct Foraging {
    vision_range: u32,
}

impl Foraging {
    /// Creates a steering system that looks `vision_range` cells ahead.
    #[must_use]
    pub const fn new(vision_range: u32) -> Self {
        Self { vision_range }
    }

    /// Scores every direction in the fixed up, down, left, right order.
    #[must_use]
    pub fn survey(&self, view: &FieldView<'_>, origin: CellCoord) -> [(Direction, f64); 4] {
        Direction::ALL.map(|direction| {
            (
                direction,
                windowed_average(view, origin, direction, self.vision_range),
            )
        })
    }

    /// Direction with the strictly lowest score.
    ///
    /// Ties keep the earliest direction in [`Direction::ALL`], so a forager
    /// surrounded by off-grid windows heads up.
    #[must_use]
    pub fn steer(&self, view: &FieldView<'_>, origin: CellCoord) -> Direction {
        let survey = self.survey(view, origin);
        let mut best = survey[0];
        for candidate in &survey[1..] {
            if candidate.1 < best.1 {
                best = *candidate;
            }
        }
        best.0
    }
}

/// Mean pollution inside the window ahead of `origin` in `direction`.
///
/// Returns [`UNREACHABLE`] when every sample lies off the grid.
#[must_use]
pub fn windowed_average(
    view: &FieldView<'_>,
    origin: CellCoord,
    direction: Direction,
    vision: u32,
) -> f64 {
    let delta = direction.delta();
    let (along_x, along_y) = (i64::from(delta.dx()), i64::from(delta.dy()));
    let (across_x, across_y) = (along_y.abs(), along_x.abs());
    let reach = i64::from(vision);
    let column = i64::from(origin.column());
    let row = i64::from(origin.row());

    let mut total: u64 = 0;
    let mut samples: u64 = 0;
    for step in 1..=reach {
        for offset in -reach..=reach {
            let sample = view.pollution_at(
                column + along_x * step + across_x * offset,
                row + along_y * step + across_y * offset,
            );
            if let Some(pollution) = sample {
                total += u64::from(pollution);
                samples += 1;
            }
        }
    }

    if samples == 0 {
        UNREACHABLE
    } else {
        total as f64 / samples as f64
    }
}
