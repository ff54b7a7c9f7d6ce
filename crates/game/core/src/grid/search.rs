//! Reachable-set search over the 4-connected grid.

use std::collections::{BTreeSet, VecDeque};

use super::{GridDimensions, Position};

/// In-bounds orthogonal neighbours of `position`.
pub fn neighbors(
    dimensions: GridDimensions,
    position: Position,
) -> impl Iterator<Item = Position> {
    position
        .orthogonal()
        .into_iter()
        .filter(move |p| dimensions.contains(*p))
}

/// Returns true if any of `positions` equals `coord`.
pub fn occupied<'a>(coord: Position, positions: impl IntoIterator<Item = &'a Position>) -> bool {
    positions.into_iter().any(|p| *p == coord)
}

/// Breadth-first search for every tile reachable from `origin` within `range` steps.
///
/// Moves are orthogonal only. The origin, out-of-bounds cells and anything in
/// `blocked` are excluded, and blocked cells are never expanded through. Each
/// coordinate is visited at most once. An out-of-bounds origin yields an empty
/// set.
pub fn reachable(
    dimensions: GridDimensions,
    origin: Position,
    range: u32,
    blocked: &BTreeSet<Position>,
) -> BTreeSet<Position> {
    let mut result = BTreeSet::new();
    if !dimensions.contains(origin) || range == 0 {
        return result;
    }

    let mut visited = BTreeSet::from([origin]);
    let mut frontier = VecDeque::from([(origin, 0u32)]);

    while let Some((current, steps)) = frontier.pop_front() {
        if steps == range {
            continue;
        }

        for next in neighbors(dimensions, current) {
            if blocked.contains(&next) || !visited.insert(next) {
                continue;
            }
            result.insert(next);
            frontier.push_back((next, steps + 1));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::distance;

    #[test]
    fn open_grid_range_two_matches_manhattan_diamond() {
        let dims = GridDimensions::new(5, 5);
        let origin = Position::new(2, 2);
        let reach = reachable(dims, origin, 2, &BTreeSet::new());

        let mut expected = BTreeSet::new();
        for x in 0..5 {
            for y in 0..5 {
                let p = Position::new(x, y);
                let d = distance(origin, p);
                if (1..=2).contains(&d) {
                    expected.insert(p);
                }
            }
        }

        assert_eq!(reach, expected);
        assert_eq!(reach.len(), 12);
        assert!(!reach.contains(&origin));
    }

    #[test]
    fn corner_origin_clips_to_bounds() {
        let dims = GridDimensions::new(5, 5);
        let reach = reachable(dims, Position::ORIGIN, 2, &BTreeSet::new());
        assert_eq!(reach.len(), 5);
        assert!(reach.iter().all(|p| dims.contains(*p)));
    }

    #[test]
    fn blocked_cells_are_excluded_and_not_traversed() {
        let dims = GridDimensions::new(5, 1);
        let blocked = BTreeSet::from([Position::new(1, 0)]);
        let reach = reachable(dims, Position::ORIGIN, 4, &blocked);
        assert!(reach.is_empty());
    }

    #[test]
    fn walls_force_detours_that_cost_steps() {
        // . # .
        // . # .
        // . . .
        let dims = GridDimensions::new(3, 3);
        let blocked = BTreeSet::from([Position::new(1, 0), Position::new(1, 1)]);
        let short = reachable(dims, Position::ORIGIN, 3, &blocked);
        assert!(!short.contains(&Position::new(2, 1)));
        let five = reachable(dims, Position::ORIGIN, 5, &blocked);
        assert!(five.contains(&Position::new(2, 1)));
        assert!(!five.contains(&Position::new(2, 0)));
        let six = reachable(dims, Position::ORIGIN, 6, &blocked);
        assert!(six.contains(&Position::new(2, 0)));
    }

    #[test]
    fn out_of_bounds_origin_is_empty() {
        let dims = GridDimensions::new(5, 5);
        let reach = reachable(dims, Position::new(-1, 7), 3, &BTreeSet::new());
        assert!(reach.is_empty());
    }

    #[test]
    fn occupied_checks_membership() {
        let positions = [Position::new(1, 1), Position::new(2, 3)];
        assert!(occupied(Position::new(2, 3), &positions));
        assert!(!occupied(Position::new(0, 0), &positions));
    }
}
