//! Dense cell storage for pollution, occupancy and paint.

use nature_lovers_core::{CellCoord, EntityId, FieldView, Paint};

#[derive(Clone, Debug)]
pub(crate) struct Field {
    columns: u32,
    rows: u32,
    pollution: Vec<u32>,
    occupants: Vec<Option<EntityId>>,
    paint: Vec<Paint>,
}

impl Field {
    pub(crate) fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            pollution: vec![0; capacity],
            occupants: vec![None; capacity],
            paint: vec![Paint::Background; capacity],
        }
    }

    pub(crate) fn view(&self) -> FieldView<'_> {
        FieldView::new(
            self.columns,
            self.rows,
            &self.pollution,
            &self.occupants,
            &self.paint,
        )
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    pub(crate) fn contains(&self, cell: CellCoord) -> bool {
        self.index(cell).is_some()
    }

    pub(crate) fn occupant(&self, cell: CellCoord) -> Option<EntityId> {
        self.index(cell).and_then(|index| self.occupants[index])
    }

    pub(crate) fn pollution(&self, cell: CellCoord) -> Option<u32> {
        self.index(cell).map(|index| self.pollution[index])
    }

    pub(crate) fn paint(&self, cell: CellCoord) -> Option<Paint> {
        self.index(cell).map(|index| self.paint[index])
    }

    /// Places `entity` on an empty cell and paints the cell with `paint`.
    ///
    /// Panics when the cell is outside the grid or already occupied; either
    /// case means the caller broke the single-occupant invariant.
    pub(crate) fn place(&mut self, entity: EntityId, cell: CellCoord, paint: Paint) {
        let Some(index) = self.index(cell) else {
            panic!("cannot place {entity:?} outside the field at {cell}");
        };
        if let Some(occupant) = self.occupants[index] {
            panic!("cannot place {entity:?} on {cell}: already occupied by {occupant:?}");
        }
        self.occupants[index] = Some(entity);
        self.paint[index] = paint;
    }

    pub(crate) fn vacate(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            self.occupants[index] = None;
        }
    }

    pub(crate) fn pollute(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            self.pollution[index] = self.pollution[index].saturating_add(1);
        }
    }

    pub(crate) fn scrub(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            self.pollution[index] = 0;
        }
    }

    /// Repaints a vacated cell from its pollution.
    pub(crate) fn repaint(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            debug_assert!(self.occupants[index].is_none(), "dirty cell {cell} was re-entered");
            self.paint[index] = Paint::trail(self.pollution[index]);
        }
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

/// Cells vacated during the current tick, awaiting the commit phase.
///
/// Each cell is recorded once, in the order it was first vacated. A recorded
/// cell cannot be entered until it is committed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirtyCells {
    cells: Vec<CellCoord>,
}

impl DirtyCells {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a vacated cell.
    pub fn mark(&mut self, cell: CellCoord) {
        if !self.cells.contains(&cell) {
            self.cells.push(cell);
        }
    }

    /// Reports whether `cell` was vacated and not yet committed.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }

    /// Reports whether no cell was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Recorded cells in first-vacated order.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, CellCoord> {
        self.cells.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nature_lovers_core::EntityKind;

    #[test]
    #[should_panic(expected = "already occupied")]
    fn placing_on_occupied_cell_panics() {
        let mut field = Field::new(4, 4);
        let cell = CellCoord::new(1, 2);
        field.place(EntityId::new(0), cell, Paint::Tag(EntityKind::Hazard));
        field.place(EntityId::new(1), cell, Paint::Tag(EntityKind::Forager));
    }

    #[test]
    fn repaint_replaces_the_tag_with_the_trail() {
        let mut field = Field::new(3, 3);
        let cell = CellCoord::new(1, 1);
        field.place(EntityId::new(0), cell, Paint::Tag(EntityKind::Hazard));
        field.pollute(cell);
        field.vacate(cell);
        assert_eq!(field.paint(cell), Some(Paint::Tag(EntityKind::Hazard)));

        field.repaint(cell);
        assert_eq!(field.paint(cell), Some(Paint::Trail { level: 254 }));
    }

    #[test]
    fn dirty_cells_keep_first_vacated_order() {
        let mut dirty = DirtyCells::new();
        dirty.mark(CellCoord::new(2, 0));
        dirty.mark(CellCoord::new(0, 1));
        dirty.mark(CellCoord::new(2, 0));
        assert_eq!(dirty.cells(), &[CellCoord::new(2, 0), CellCoord::new(0, 1)]);
        assert!(dirty.contains(CellCoord::new(0, 1)));
        assert!(!dirty.contains(CellCoord::new(1, 1)));
    }
}
