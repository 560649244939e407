//! Grid geometry: bounded straight-line steps and clamping.
//!
//! Positions are integer cells, so a straight-line step has to be snapped
//! back onto the grid. The helpers here never move an entity further than
//! the distance it was allowed.

use heroism_types::Position;

/// Move from `from` toward `to`, covering at most `max_cells` of Euclidean
/// distance.
///
/// Returns `to` itself when it is within reach. Otherwise the fractional
/// step is rounded to the nearest cell when that stays within budget and
/// truncated toward `from` when it does not. If snapping would leave the
/// mover where it started, a single cell along the dominant axis is taken
/// provided the budget allows a whole cell.
pub fn step_toward(from: Position, to: Position, max_cells: f64) -> Position {
    let distance = from.distance_cells(to);
    if distance <= max_cells {
        return to;
    }
    if max_cells <= 0.0 || distance <= 0.0 {
        return from;
    }

    let fraction = max_cells / distance;
    let dr = f64::from(to.row) - f64::from(from.row);
    let dc = f64::from(to.col) - f64::from(from.col);

    let rounded = offset(from, (dr * fraction).round(), (dc * fraction).round());
    if rounded != from && from.distance_cells(rounded) <= max_cells {
        return rounded;
    }

    let truncated = offset(from, (dr * fraction).trunc(), (dc * fraction).trunc());
    if truncated != from {
        return truncated;
    }

    if max_cells >= 1.0 {
        return if dr.abs() >= dc.abs() {
            Position::new(from.row.saturating_add(sign(dr)), from.col)
        } else {
            Position::new(from.row, from.col.saturating_add(sign(dc)))
        };
    }
    from
}

/// Clamp a position onto a `size` x `size` grid.
pub fn clamp(position: Position, size: u8) -> Position {
    let last = i16::from(size).saturating_sub(1).max(0);
    Position::new(position.row.clamp(0, last), position.col.clamp(0, last))
}

/// Shift `position` by a whole-cell offset, clamped onto the grid.
pub fn shifted(position: Position, d_row: i16, d_col: i16, size: u8) -> Position {
    clamp(
        Position::new(
            position.row.saturating_add(d_row),
            position.col.saturating_add(d_col),
        ),
        size,
    )
}

/// Round a fractional cell offset to a whole-cell offset.
///
/// Offsets produced by the simulation are bounded by the grid size, so the
/// conversion never saturates in practice.
#[allow(clippy::cast_possible_truncation)]
pub fn whole_cells(offset: f64) -> i16 {
    offset.round().clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

fn offset(from: Position, d_row: f64, d_col: f64) -> Position {
    Position::new(
        from.row.saturating_add(whole_cells(d_row)),
        from.col.saturating_add(whole_cells(d_col)),
    )
}

const fn sign(value: f64) -> i16 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}
