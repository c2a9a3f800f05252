#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Nature Lovers simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values,
//! the world executes them through its `apply` entry point and reports
//! [`Event`] values describing what changed. Systems never mutate state; they
//! read a [`FieldView`] and answer with directions or cells.

use std::fmt;

use serde::{Deserialize, Serialize};

mod config;

pub use config::{AgentLayout, Config, ConfigError, Layout};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Save the Environment.";

/// Vitality assigned to the agent when the world is created.
pub const INITIAL_VITALITY: i32 = 100;

/// Color painted on cells that were never occupied or polluted.
pub const BACKGROUND: Rgb = Rgb::from_rgb(255, 255, 255);

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Queues a single agent move applied at the start of the next tick.
    ///
    /// Submitting again before the tick replaces the queued intent.
    SubmitAgentIntent {
        /// Direction the agent should attempt to move in.
        direction: Direction,
    },
    /// Runs one full simulation step.
    Tick,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that an entity moved between two cells.
    EntityMoved {
        /// Identifier of the entity that moved.
        entity: EntityId,
        /// Species of the entity that moved.
        kind: EntityKind,
        /// Cell the entity occupied before moving.
        from: CellCoord,
        /// Cell the entity occupies after moving.
        to: CellCoord,
    },
    /// Reports that the agent walked into a hazard and lost vitality.
    AgentStruck {
        /// Hazard that blocked the agent.
        hazard: EntityId,
        /// Vitality remaining after the strike.
        vitality: i32,
    },
    /// Reports that the agent consumed a resource.
    ResourceConsumed {
        /// Resource that was destroyed.
        resource: EntityId,
        /// Resource spawned elsewhere as a replacement.
        replacement: EntityId,
        /// Agent consumption counter after the meal.
        consumed: u32,
        /// Agent vitality after the meal.
        vitality: i32,
    },
    /// Reports companions created after a consumption milestone.
    CompanionsSpawned {
        /// Newly created companions in creation order.
        companions: Vec<EntityId>,
    },
    /// Reports the vacated cells repainted during the commit phase.
    CellsRepainted {
        /// Cells whose trail paint was recomputed, in the order they were vacated.
        cells: Vec<CellCoord>,
    },
    /// Confirms that a simulation step finished.
    TickCompleted {
        /// Index of the completed tick, starting at one.
        tick: u64,
    },
}

/// Opaque RGB color used by the display collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Creates a gray color with identical channels.
    #[must_use]
    pub const fn gray(value: u8) -> Self {
        Self::from_rgb(value, value, value)
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Paint stored on a cell and handed to the display collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Paint {
    /// Untouched cell.
    Background,
    /// Cell currently showing the visual tag of an entity.
    Tag(EntityKind),
    /// Vacated cell repainted from its pollution.
    Trail {
        /// Gray level `255 - pollution`. Not clamped; drops below zero once
        /// pollution exceeds 255.
        level: i64,
    },
}

impl Paint {
    /// Trail paint derived from a pollution counter.
    #[must_use]
    pub const fn trail(pollution: u32) -> Self {
        Self::Trail {
            level: 255 - pollution as i64,
        }
    }

    /// Converts the paint into a displayable color, clamping trail levels.
    #[must_use]
    pub fn rgb(self) -> Rgb {
        match self {
            Self::Background => BACKGROUND,
            Self::Tag(kind) => kind.color(),
            Self::Trail { level } => Rgb::gray(level.clamp(0, 255) as u8),
        }
    }

    /// Reports whether the paint is indistinguishable from the background.
    #[must_use]
    pub fn is_unmarked(self) -> bool {
        self.rgb() == BACKGROUND
    }
}

/// Cardinal movement directions, listed in steering tie-break order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in the fixed enumeration order: up, down, left, right.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit delta travelled by a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> Delta {
        match self {
            Self::Up => Delta::new(0, -1),
            Self::Down => Delta::new(0, 1),
            Self::Left => Delta::new(-1, 0),
            Self::Right => Delta::new(1, 0),
        }
    }
}

/// Signed displacement applied to a cell coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Delta {
    dx: i32,
    dy: i32,
}

impl Delta {
    /// Creates a new displacement.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Column displacement.
    #[must_use]
    pub const fn dx(&self) -> i32 {
        self.dx
    }

    /// Row displacement.
    #[must_use]
    pub const fn dy(&self) -> i32 {
        self.dy
    }
}

impl From<Direction> for Delta {
    fn from(direction: Direction) -> Self {
        direction.delta()
    }
}

/// Unique identifier assigned to an entity. Identifiers grow with creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Species of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// The player-controlled agent.
    Agent,
    /// Roaming hazard that pollutes the cells it leaves.
    Hazard,
    /// Animal steering toward clean air.
    Forager,
    /// Inert food consumed by the agent.
    Resource,
    /// Leashed follower owned by the agent.
    Companion,
}

impl EntityKind {
    /// Every species, in table order.
    pub const ALL: [EntityKind; 5] = [
        Self::Agent,
        Self::Hazard,
        Self::Forager,
        Self::Resource,
        Self::Companion,
    ];

    /// Visual tag painted on cells occupied by the species.
    #[must_use]
    pub const fn color(self) -> Rgb {
        match self {
            Self::Agent => Rgb::from_rgb(0, 255, 0),
            Self::Hazard => Rgb::from_rgb(255, 0, 0),
            Self::Forager => Rgb::from_rgb(255, 192, 203),
            Self::Resource => Rgb::from_rgb(0, 0, 255),
            Self::Companion => Rgb::from_rgb(255, 165, 0),
        }
    }

    /// Position of the species in [`EntityKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Agent => 0,
            Self::Hazard => 1,
            Self::Forager => 2,
            Self::Resource => 3,
            Self::Companion => 4,
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Applies a delta, returning `None` when either axis would go negative.
    ///
    /// The upper bound is not checked; callers compare against grid dimensions.
    #[must_use]
    pub fn translate(self, delta: Delta) -> Option<CellCoord> {
        Some(CellCoord::new(
            self.column.checked_add_signed(delta.dx())?,
            self.row.checked_add_signed(delta.dy())?,
        ))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Read-only view into the dense cell arrays of the field.
#[derive(Clone, Copy, Debug)]
pub struct FieldView<'a> {
    columns: u32,
    rows: u32,
    pollution: &'a [u32],
    occupants: &'a [Option<EntityId>],
    paint: &'a [Paint],
}

impl<'a> FieldView<'a> {
    /// Captures a new view backed by row-major cell slices.
    ///
    /// Every slice must hold exactly `columns * rows` entries.
    #[must_use]
    pub fn new(
        columns: u32,
        rows: u32,
        pollution: &'a [u32],
        occupants: &'a [Option<EntityId>],
        paint: &'a [Paint],
    ) -> Self {
        let cells = columns as usize * rows as usize;
        debug_assert_eq!(pollution.len(), cells, "pollution slice size");
        debug_assert_eq!(occupants.len(), cells, "occupant slice size");
        debug_assert_eq!(paint.len(), cells, "paint slice size");
        Self {
            columns,
            rows,
            pollution,
            occupants,
            paint,
        }
    }

    /// Provides the dimensions of the underlying grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Resolves signed coordinates into a cell, or `None` when off-grid.
    #[must_use]
    pub fn cell_at(&self, column: i64, row: i64) -> Option<CellCoord> {
        let column = u32::try_from(column).ok()?;
        let row = u32::try_from(row).ok()?;
        (column < self.columns && row < self.rows).then(|| CellCoord::new(column, row))
    }

    /// Reports whether the cell lies within the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.index(cell).is_some()
    }

    /// Pollution at signed coordinates, or `None` when out of range.
    #[must_use]
    pub fn pollution_at(&self, column: i64, row: i64) -> Option<u32> {
        let cell = self.cell_at(column, row)?;
        self.index(cell)
            .and_then(|index| self.pollution.get(index).copied())
    }

    /// Returns the entity occupying the provided cell, if any.
    #[must_use]
    pub fn occupant(&self, cell: CellCoord) -> Option<EntityId> {
        self.index(cell)
            .and_then(|index| self.occupants.get(index).copied().flatten())
    }

    /// Reports whether the cell is in bounds and unoccupied.
    #[must_use]
    pub fn is_vacant(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .is_some_and(|index| matches!(self.occupants.get(index), Some(None)))
    }

    /// Paint stored on the provided cell.
    #[must_use]
    pub fn paint(&self, cell: CellCoord) -> Option<Paint> {
        self.index(cell)
            .and_then(|index| self.paint.get(index).copied())
    }

    /// Reports whether the cell is in bounds and carries no visible marking.
    #[must_use]
    pub fn is_unmarked(&self, cell: CellCoord) -> bool {
        self.paint(cell).is_some_and(Paint::is_unmarked)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn translate_rejects_negative_axes() {
        let corner = CellCoord::new(0, 3);
        assert_eq!(corner.translate(Direction::Left.delta()), None);
        assert_eq!(
            corner.translate(Direction::Up.delta()),
            Some(CellCoord::new(0, 2))
        );
    }

    #[test]
    fn directions_follow_tie_break_order() {
        let deltas: Vec<(i32, i32)> = Direction::ALL
            .iter()
            .map(|direction| (direction.delta().dx(), direction.delta().dy()))
            .collect();
        assert_eq!(deltas, vec![(0, -1), (0, 1), (-1, 0), (1, 0)]);
    }

    #[test]
    fn trail_level_is_not_clamped() {
        assert_eq!(Paint::trail(0), Paint::Trail { level: 255 });
        assert_eq!(Paint::trail(300), Paint::Trail { level: -45 });
        assert_eq!(Paint::trail(300).rgb(), Rgb::gray(0));
    }

    #[test]
    fn clean_trail_counts_as_unmarked() {
        assert!(Paint::Background.is_unmarked());
        assert!(Paint::trail(0).is_unmarked());
        assert!(!Paint::trail(1).is_unmarked());
        assert!(!Paint::Tag(EntityKind::Hazard).is_unmarked());
    }

    #[test]
    fn kind_index_matches_table_order() {
        for (position, kind) in EntityKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), position);
        }
    }

    #[test]
    fn field_view_discards_out_of_range_samples() {
        let pollution = vec![1, 2, 3, 4, 5, 6];
        let occupants = vec![None, Some(EntityId::new(7)), None, None, None, None];
        let paint = vec![Paint::Background; 6];
        let view = FieldView::new(3, 2, &pollution, &occupants, &paint);

        assert_eq!(view.pollution_at(2, 1), Some(6));
        assert_eq!(view.pollution_at(-1, 0), None);
        assert_eq!(view.pollution_at(3, 0), None);
        assert_eq!(view.pollution_at(0, 2), None);
        assert_eq!(view.occupant(CellCoord::new(1, 0)), Some(EntityId::new(7)));
        assert!(!view.is_vacant(CellCoord::new(1, 0)));
        assert!(view.is_vacant(CellCoord::new(0, 0)));
        assert!(!view.is_vacant(CellCoord::new(5, 5)));
    }
}
