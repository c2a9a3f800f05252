//! Named simulation parameters and explicit scenario layouts.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{CellCoord, EntityKind, INITIAL_VITALITY};

const DEFAULT_SEED: u64 = 0x5a7e_0e4f_1c3d_2b19;

/// Fixed parameters supplied when the world is initialized.
///
/// `width` and `height` are expressed in display units; the grid holds
/// `width / cell_size` columns and `height / cell_size` rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Width of the playing field in display units.
    pub width: u32,
    /// Height of the playing field in display units.
    pub height: u32,
    /// Side length of a single square cell in display units.
    pub cell_size: u32,
    /// Hazards placed at initialization.
    pub hazard_count: usize,
    /// Resources placed at initialization.
    pub resource_count: usize,
    /// Foragers placed at initialization.
    pub forager_count: usize,
    /// Depth and half-width of the forager sampling window.
    pub vision_range: u32,
    /// Maximum Manhattan distance between a companion and its owner.
    pub leash_radius: u32,
    /// Seed for every stochastic choice made by the world.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            cell_size: 10,
            hazard_count: 31,
            resource_count: 10,
            forager_count: 50,
            vision_range: 3,
            leash_radius: 5,
            seed: DEFAULT_SEED,
        }
    }
}

impl Config {
    /// Number of cell columns in the grid.
    #[must_use]
    pub fn columns(&self) -> u32 {
        self.width.checked_div(self.cell_size).unwrap_or(0)
    }

    /// Number of cell rows in the grid.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.height.checked_div(self.cell_size).unwrap_or(0)
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// Entities placed at initialization, including the agent.
    #[must_use]
    pub fn initial_population(&self) -> usize {
        1usize
            .saturating_add(self.hazard_count)
            .saturating_add(self.resource_count)
            .saturating_add(self.forager_count)
    }

    /// Checks that the grid has area and can hold the initial population.
    ///
    /// Spawns performed later in the simulation are not covered: companions
    /// accumulate without bound and the spawner is allowed to saturate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_grid()?;

        let requested = self.initial_population();
        let capacity = self.capacity();
        if requested > capacity {
            return Err(ConfigError::Overpopulated {
                requested,
                capacity,
            });
        }

        Ok(())
    }

    /// Checks only that the grid derived from the dimensions has area.
    pub fn validate_grid(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        let (columns, rows) = (self.columns(), self.rows());
        if columns == 0 || rows == 0 {
            return Err(ConfigError::EmptyGrid { columns, rows });
        }

        Ok(())
    }
}

/// Agent placement and starting counters within a [`Layout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentLayout {
    /// Cell the agent starts on.
    pub cell: CellCoord,
    /// Starting vitality.
    #[serde(default = "default_vitality")]
    pub vitality: i32,
    /// Starting consumption counter.
    #[serde(default)]
    pub consumed: u32,
}

impl AgentLayout {
    /// Agent on `cell` with default counters.
    #[must_use]
    pub const fn at(cell: CellCoord) -> Self {
        Self {
            cell,
            vitality: INITIAL_VITALITY,
            consumed: 0,
        }
    }
}

fn tagged(
    kind: EntityKind,
    cells: &[CellCoord],
) -> impl Iterator<Item = (EntityKind, CellCoord)> + '_ {
    cells.iter().map(move |cell| (kind, *cell))
}

fn default_vitality() -> i32 {
    INITIAL_VITALITY
}

/// Explicit initial population used instead of random placement.
///
/// Entities are created in the listed order, species by species, so the
/// order of each list is also the tick iteration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// The singleton agent.
    pub agent: AgentLayout,
    /// Hazard cells.
    #[serde(default)]
    pub hazards: Vec<CellCoord>,
    /// Resource cells.
    #[serde(default)]
    pub resources: Vec<CellCoord>,
    /// Forager cells.
    #[serde(default)]
    pub foragers: Vec<CellCoord>,
    /// Companion cells, all owned by the agent.
    #[serde(default)]
    pub companions: Vec<CellCoord>,
}

impl Layout {
    /// Layout holding only an agent on `cell`.
    #[must_use]
    pub fn new(cell: CellCoord) -> Self {
        Self {
            agent: AgentLayout::at(cell),
            hazards: Vec::new(),
            resources: Vec::new(),
            foragers: Vec::new(),
            companions: Vec::new(),
        }
    }

    /// Every placement in creation order.
    pub fn placements(&self) -> impl Iterator<Item = (EntityKind, CellCoord)> + '_ {
        std::iter::once((EntityKind::Agent, self.agent.cell))
            .chain(tagged(EntityKind::Hazard, &self.hazards))
            .chain(tagged(EntityKind::Resource, &self.resources))
            .chain(tagged(EntityKind::Forager, &self.foragers))
            .chain(tagged(EntityKind::Companion, &self.companions))
    }

    /// Checks every placement against the grid bounds and for collisions.
    pub fn validate(&self, columns: u32, rows: u32) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (_, cell) in self.placements() {
            if cell.column() >= columns || cell.row() >= rows {
                return Err(ConfigError::OutOfBounds { cell });
            }
            if !seen.insert(cell) {
                return Err(ConfigError::Collision { cell });
            }
        }
        Ok(())
    }
}

/// Reasons a configuration or layout is rejected at initialization.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The cell size was zero, so the grid cannot be derived.
    #[error("cell size must be greater than zero")]
    ZeroCellSize,
    /// The derived grid has no cells.
    #[error("grid of {columns}x{rows} cells has no area")]
    EmptyGrid {
        /// Derived number of columns.
        columns: u32,
        /// Derived number of rows.
        rows: u32,
    },
    /// The initial population does not fit on the grid.
    #[error("initial population of {requested} exceeds the {capacity} available cells")]
    Overpopulated {
        /// Entities requested at initialization.
        requested: usize,
        /// Cells available on the grid.
        capacity: usize,
    },
    /// A layout placement lies outside the grid.
    #[error("layout cell {cell} lies outside the grid")]
    OutOfBounds {
        /// Offending cell.
        cell: CellCoord,
    },
    /// Two layout placements share a cell.
    #[error("layout places more than one entity on cell {cell}")]
    Collision {
        /// Offending cell.
        cell: CellCoord,
    },
}
