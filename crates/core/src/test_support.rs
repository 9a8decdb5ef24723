//! Shared map fixtures for the unit test suites.

use crate::grid::{GridMap, TileGrid, manhattan};
use crate::pathfinding::Path;
use crate::types::Pos;

/// Column wall at `x = 3` with a single gap on row 3.
pub(crate) fn wall_detour_fixture() -> (TileGrid, Pos, Pos) {
    let map = TileGrid::from_rows(&[
        "...#...", //
        "...#...",
        "...#...",
        ".......",
        "...#...",
    ])
    .expect("fixture rows are valid");
    (map, Pos { y: 1, x: 1 }, Pos { y: 1, x: 5 })
}

/// Two rooms separated by a solid wall column.
pub(crate) fn split_rooms_fixture() -> (TileGrid, Pos, Pos) {
    let map = TileGrid::from_rows(&[
        "..#..", //
        "..#..",
        "..#..",
        "..#..",
        "..#..",
    ])
    .expect("fixture rows are valid");
    (map, Pos { y: 2, x: 0 }, Pos { y: 2, x: 4 })
}

pub(crate) fn pillar_room_fixture() -> (TileGrid, Pos) {
    let map = TileGrid::from_rows(&[
        "#######", //
        "#.....#",
        "#.#.#.#",
        "#.....#",
        "#.#.#.#",
        "#.....#",
        "#######",
    ])
    .expect("fixture rows are valid");
    (map, Pos { y: 3, x: 3 })
}

pub(crate) fn assert_connected_walkable<M: GridMap>(map: &M, start: Pos, path: &Path) {
    let mut prev = start;
    for step in path.iter() {
        assert!(map.is_walkable(step), "path visits non-walkable tile {step:?}");
        assert_eq!(manhattan(prev, step), 1, "path jumps from {prev:?} to {step:?}");
        prev = step;
    }
}
