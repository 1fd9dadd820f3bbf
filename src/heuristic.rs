use crate::grid::Position;

/// Manhattan distance between two cells.
///
/// Admissible and consistent for 4-connected unit-cost movement.
/// Distances beyond `u32::MAX` saturate.
pub fn estimate(a: Position, b: Position) -> u32 {
    let distance = a.row.abs_diff(b.row).saturating_add(a.col.abs_diff(b.col));
    u32::try_from(distance).unwrap_or(u32::MAX)
}
