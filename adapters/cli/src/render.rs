//! Plain-text rendering of a field snapshot.

use std::fmt::Write as _;

use nature_lovers_core::{EntityKind, Paint};
use nature_lovers_world::query::FieldSnapshot;

const SHADES: [char; 9] = ['.', ':', '-', '=', '+', '*', '#', '%', '@'];

fn glyph(paint: Paint) -> char {
    match paint {
        Paint::Background => ' ',
        Paint::Tag(kind) => match kind {
            EntityKind::Agent => 'A',
            EntityKind::Hazard => 'H',
            EntityKind::Forager => 'F',
            EntityKind::Resource => 'R',
            EntityKind::Companion => 'C',
        },
        Paint::Trail { level } if level >= 255 => ' ',
        Paint::Trail { level } => {
            let pollution = (255 - level.max(0)) as usize;
            SHADES[((pollution - 1) * SHADES.len() / 255).min(SHADES.len() - 1)]
        }
    }
}

/// Draws one character per cell followed by a vitality status line.
pub(crate) fn render(snapshot: &FieldSnapshot) -> String {
    let columns = snapshot.columns as usize;
    let mut out = String::with_capacity((columns + 1) * snapshot.rows as usize + 16);
    for row in snapshot.cells.chunks(columns.max(1)) {
        out.extend(row.iter().map(|cell| glyph(cell.paint)));
        out.push('\n');
    }
    let _ = writeln!(out, "Vitality: {}", snapshot.vitality);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trails_darken_with_pollution() {
        assert_eq!(glyph(Paint::trail(0)), ' ');
        assert_eq!(glyph(Paint::trail(1)), '.');
        assert_eq!(glyph(Paint::trail(255)), '@');
        assert_eq!(glyph(Paint::trail(900)), '@');
        assert_eq!(glyph(Paint::Tag(EntityKind::Companion)), 'C');
    }
}
