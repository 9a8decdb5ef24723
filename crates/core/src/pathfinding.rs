//! Path acquisition over a [`GridMap`]: bounded random walks for wandering and
//! A* for goal-directed pursuit.
//! Both planners return a [`Path`] that excludes the start tile; "no route" is an
//! empty path rather than an error.

use std::collections::{BTreeSet, VecDeque};

use crate::grid::{GridMap, manhattan};
use crate::rng::SimRng;
use crate::types::Pos;

/// Waypoints consumed front to back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    steps: VecDeque<Pos>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn front(&self) -> Option<Pos> {
        self.steps.front().copied()
    }

    pub fn last(&self) -> Option<Pos> {
        self.steps.back().copied()
    }

    pub fn pop_front(&mut self) -> Option<Pos> {
        self.steps.pop_front()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        self.steps.iter().copied()
    }
}

impl From<Vec<Pos>> for Path {
    fn from(steps: Vec<Pos>) -> Self {
        Self { steps: steps.into() }
    }
}

impl FromIterator<Pos> for Path {
    fn from_iter<I: IntoIterator<Item = Pos>>(iter: I) -> Self {
        Self { steps: iter.into_iter().collect() }
    }
}

/// Walks up to `max_steps` tiles from `start`, each step to a random walkable
/// neighbour not yet on the walk. Stops early when the walk boxes itself in.
pub fn random_path<M: GridMap + ?Sized>(
    map: &M,
    start: Pos,
    max_steps: usize,
    rng: &mut SimRng,
) -> Path {
    let mut steps = Vec::new();
    let mut visited = BTreeSet::from([start]);
    let mut frontier = start;

    while steps.len() < max_steps {
        let candidates: Vec<Pos> = map
            .neighbors(frontier)
            .into_iter()
            .filter(|next| map.is_walkable(*next) && !visited.contains(next))
            .collect();
        let Some(&next) = rng.choose(&candidates) else {
            break;
        };
        visited.insert(next);
        steps.push(next);
        frontier = next;
    }

    Path::from(steps)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

/// Shortest walkable route from `start` to `goal` under unit step cost.
///
/// Frontier ties break on `(f, h, y, x)`, so equal-cost routes resolve the same
/// way on every call. Returns an empty path when `start == goal`, when either
/// end is not walkable, or when the frontier is exhausted without reaching `goal`.
pub fn find_path<M: GridMap + ?Sized>(map: &M, start: Pos, goal: Pos) -> Path {
    if start == goal || !map.is_walkable(start) || !map.is_walkable(goal) {
        return Path::new();
    }

    let (width, height) = map.dimensions();
    let mut g_score = vec![u32::MAX; width * height];
    let mut came_from: Vec<Option<Pos>> = vec![None; width * height];
    let mut open_set = BTreeSet::new();

    let h = manhattan(start, goal);
    g_score[map.index(start)] = 0;
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });

    while let Some(curr) = open_set.pop_first() {
        let p = Pos { y: curr.y, x: curr.x };
        let cur_g = g_score[map.index(p)];
        // Superseded by a cheaper entry for the same tile.
        if curr.f - curr.h > cur_g {
            continue;
        }
        if p == goal {
            return reconstruct_path(map, &came_from, start, goal);
        }
        for n in map.neighbors(p) {
            if !map.is_walkable(n) {
                continue;
            }
            let tg = cur_g + 1;
            let idx = map.index(n);
            if tg < g_score[idx] {
                g_score[idx] = tg;
                came_from[idx] = Some(p);
                let h = manhattan(n, goal);
                open_set.insert(OpenNode { f: tg + h, h, y: n.y, x: n.x });
            }
        }
    }

    tracing::trace!(?start, ?goal, "frontier exhausted without reaching goal");
    Path::new()
}

fn reconstruct_path<M: GridMap + ?Sized>(
    map: &M,
    came_from: &[Option<Pos>],
    start: Pos,
    goal: Pos,
) -> Path {
    let mut result = vec![goal];
    let mut p = goal;
    while let Some(prev) = came_from[map.index(p)] {
        if prev == start {
            break;
        }
        result.push(prev);
        p = prev;
    }
    result.reverse();
    Path::from(result)
}
