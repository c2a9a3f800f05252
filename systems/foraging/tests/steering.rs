use nature_lovers_core::{CellCoord, Direction, EntityId, FieldView, Paint};
use nature_lovers_system_foraging::{windowed_average, Foraging, UNREACHABLE};

struct Grid {
    columns: u32,
    rows: u32,
    pollution: Vec<u32>,
    occupants: Vec<Option<EntityId>>,
    paint: Vec<Paint>,
}

impl Grid {
    fn clean(columns: u32, rows: u32) -> Self {
        let cells = (columns * rows) as usize;
        Self {
            columns,
            rows,
            pollution: vec![0; cells],
            occupants: vec![None; cells],
            paint: vec![Paint::Background; cells],
        }
    }

    fn pollute(&mut self, column: u32, row: u32, amount: u32) {
        let index = (row * self.columns + column) as usize;
        self.pollution[index] = amount;
    }

    fn view(&self) -> FieldView<'_> {
        FieldView::new(
            self.columns,
            self.rows,
            &self.pollution,
            &self.occupants,
            &self.paint,
        )
    }
}

#[test]
fn steers_toward_cleanest_window() {
    let mut grid = Grid::clean(7, 7);
    for row in 0..7 {
        grid.pollute(2, row, 6);
        grid.pollute(4, row, 3);
    }
    for column in 0..7 {
        grid.pollute(column, 2, 6);
    }
    grid.pollute(3, 4, 1);

    let origin = CellCoord::new(3, 3);
    let view = grid.view();
    assert_eq!(windowed_average(&view, origin, Direction::Up, 1), 6.0);
    assert_eq!(
        windowed_average(&view, origin, Direction::Down, 1),
        (6.0 + 1.0 + 3.0) / 3.0
    );
    assert_eq!(Foraging::new(1).steer(&view, origin), Direction::Down);
}

#[test]
fn equal_windows_prefer_up_over_left() {
    let mut grid = Grid::clean(7, 7);
    grid.pollute(3, 4, 5);
    grid.pollute(4, 3, 5);

    let view = grid.view();
    let survey = Foraging::new(1).survey(&view, CellCoord::new(3, 3));
    assert_eq!(survey[0], (Direction::Up, 0.0));
    assert_eq!(survey[2], (Direction::Left, 0.0));
    assert_eq!(
        Foraging::new(1).steer(&view, CellCoord::new(3, 3)),
        Direction::Up
    );
}

#[test]
fn off_grid_windows_never_win() {
    let mut grid = Grid::clean(5, 5);
    for column in 0..5 {
        grid.pollute(column, 1, 9);
    }
    for row in 0..5 {
        grid.pollute(1, row, 4);
    }

    let origin = CellCoord::new(0, 0);
    let view = grid.view();
    assert_eq!(
        windowed_average(&view, origin, Direction::Up, 1),
        UNREACHABLE
    );
    assert_eq!(
        windowed_average(&view, origin, Direction::Left, 1),
        UNREACHABLE
    );
    assert_eq!(Foraging::new(1).steer(&view, origin), Direction::Right);
}

#[test]
fn partial_windows_average_only_on_grid_samples() {
    let mut grid = Grid::clean(7, 7);
    grid.pollute(0, 2, 4);
    grid.pollute(1, 2, 2);

    let average = windowed_average(&grid.view(), CellCoord::new(0, 3), Direction::Up, 1);
    assert_eq!(average, 3.0);
}

#[test]
fn wider_vision_sees_distant_pollution() {
    let mut grid = Grid::clean(9, 9);
    grid.pollute(4, 1, 30);

    let origin = CellCoord::new(4, 4);
    let view = grid.view();
    assert_eq!(windowed_average(&view, origin, Direction::Up, 2), 0.0);
    assert_eq!(windowed_average(&view, origin, Direction::Up, 3), 30.0 / 21.0);
    assert_eq!(Foraging::new(2).steer(&view, origin), Direction::Up);
    assert_eq!(Foraging::new(3).steer(&view, origin), Direction::Down);
}

#[test]
fn fully_enclosed_forager_defaults_to_up() {
    let grid = Grid::clean(1, 1);
    let view = grid.view();
    let survey = Foraging::new(3).survey(&view, CellCoord::new(0, 0));
    assert!(survey.iter().all(|(_, score)| *score == UNREACHABLE));
    assert_eq!(
        Foraging::new(3).steer(&view, CellCoord::new(0, 0)),
        Direction::Up
    );
}
