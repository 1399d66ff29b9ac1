#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! A* route planning across the terrain grid.
//!
//! Movement is 8-connected and every edge costs the Manhattan distance
//! between its endpoints, so a diagonal step costs two. The heuristic is the
//! Manhattan distance to the goal. The grid itself is never written to: all
//! per-search bookkeeping lives in a scratch arena owned by the
//! [`Pathfinder`] and reset at the start of every search.

use tracing::debug;
use wayfinder_core::{CellKey, GridDimensions, Position, TerrainView};

/// Score used for cells the search has not reached.
const UNREACHED: u32 = u32::MAX;

/// Searches for a route from `start` to `goal` with a throwaway arena.
///
/// See [`Pathfinder::search`] for the shape of the result.
#[must_use]
pub fn search(terrain: TerrainView<'_>, start: Position, goal: Position) -> Vec<Position> {
    Pathfinder::default().search(terrain, start, goal)
}

/// Reusable A* planner that keeps its scratch arena between searches.
#[derive(Debug, Default)]
pub struct Pathfinder {
    scratch: SearchScratch,
}

impl Pathfinder {
    /// Creates a planner with an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plans a route from `start` to `goal`.
    ///
    /// The returned path begins with `start` and ends with `goal`; when the
    /// two coincide it is `[goal]`. An empty path means the goal is out of
    /// bounds, obstructed, or walled off, or that `start` lies outside the
    /// grid.
    pub fn search(
        &mut self,
        terrain: TerrainView<'_>,
        start: Position,
        goal: Position,
    ) -> Vec<Position> {
        let dimensions = terrain.dimensions();
        let Some(start_cell) = terrain.cell(start) else {
            return Vec::new();
        };
        if !dimensions.contains(goal) {
            return Vec::new();
        }

        self.scratch.reset(dimensions.cell_count());
        self.scratch
            .open(start_cell.key(), 0, start.manhattan_distance(goal));

        let mut expanded = 0_usize;
        while let Some(current_key) = self.scratch.pop_lowest() {
            let Some(current) = dimensions.position(current_key) else {
                continue;
            };

            if current == goal {
                return self.scratch.reconstruct(dimensions, current_key, goal);
            }

            expanded += 1;
            let current_g = self.scratch.g(current_key);
            for neighbor in neighbors(current, dimensions) {
                let Some(cell) = terrain.cell(neighbor) else {
                    continue;
                };

                if terrain.obstacles().contains(cell.kind()) {
                    continue;
                }

                let tentative = current_g.saturating_add(current.manhattan_distance(neighbor));
                if tentative < self.scratch.g(cell.key()) {
                    self.scratch.record_predecessor(cell.key(), current_key);
                    self.scratch
                        .open(cell.key(), tentative, neighbor.manhattan_distance(goal));
                }
            }
        }

        debug!(
            start_x = start.x(),
            start_y = start.y(),
            goal_x = goal.x(),
            goal_y = goal.y(),
            expanded,
            "goal unreachable"
        );
        Vec::new()
    }
}

#[derive(Clone, Copy, Debug)]
struct Scores {
    g: u32,
    h: u32,
}

impl Scores {
    const UNREACHED: Self = Self {
        g: UNREACHED,
        h: UNREACHED,
    };

    fn f(self) -> u32 {
        self.g.saturating_add(self.h)
    }
}

/// Per-search bookkeeping sized to the grid.
#[derive(Debug, Default)]
struct SearchScratch {
    scores: Vec<Scores>,
    came_from: Vec<Option<CellKey>>,
    in_frontier: Vec<bool>,
    // Insertion order decides ties between equal f scores.
    frontier: Vec<CellKey>,
}

impl SearchScratch {
    fn reset(&mut self, cell_count: usize) {
        if self.scores.len() != cell_count {
            self.scores = vec![Scores::UNREACHED; cell_count];
            self.came_from = vec![None; cell_count];
            self.in_frontier = vec![false; cell_count];
        } else {
            self.scores.fill(Scores::UNREACHED);
            self.came_from.fill(None);
            self.in_frontier.fill(false);
        }
        self.frontier.clear();
    }

    fn g(&self, key: CellKey) -> u32 {
        self.scores
            .get(key.index())
            .map_or(UNREACHED, |scores| scores.g)
    }

    fn f(&self, key: CellKey) -> u32 {
        self.scores
            .get(key.index())
            .map_or(UNREACHED, |scores| scores.f())
    }

    /// Stores new scores for `key` and adds it to the frontier if absent.
    fn open(&mut self, key: CellKey, g: u32, h: u32) {
        let index = key.index();
        let Some(scores) = self.scores.get_mut(index) else {
            return;
        };
        *scores = Scores { g, h };

        if let Some(flag) = self.in_frontier.get_mut(index) {
            if !*flag {
                *flag = true;
                self.frontier.push(key);
            }
        }
    }

    fn record_predecessor(&mut self, key: CellKey, predecessor: CellKey) {
        if let Some(slot) = self.came_from.get_mut(key.index()) {
            *slot = Some(predecessor);
        }
    }

    /// Removes and returns the first frontier cell with the lowest f score.
    fn pop_lowest(&mut self) -> Option<CellKey> {
        let mut best: Option<(usize, u32)> = None;
        for (slot, key) in self.frontier.iter().enumerate() {
            let f = self.f(*key);
            match best {
                Some((_, lowest)) if f >= lowest => {}
                _ => best = Some((slot, f)),
            }
        }

        let (slot, _) = best?;
        let key = self.frontier.remove(slot);
        if let Some(flag) = self.in_frontier.get_mut(key.index()) {
            *flag = false;
        }
        Some(key)
    }

    fn reconstruct(
        &self,
        dimensions: GridDimensions,
        reached: CellKey,
        goal: Position,
    ) -> Vec<Position> {
        let mut reversed = Vec::new();
        let mut current = reached;
        // Predecessor chains strictly decrease in g, so they visit each cell once.
        for _ in 0..self.came_from.len() {
            let Some(previous) = self.came_from.get(current.index()).copied().flatten() else {
                break;
            };
            if let Some(position) = dimensions.position(previous) {
                reversed.push(position);
            }
            current = previous;
        }

        reversed.reverse();
        reversed.push(goal);
        reversed
    }
}

/// In-bounds 8-connected neighbours in `(dx, dy)` scan order.
fn neighbors(cell: Position, dimensions: GridDimensions) -> NeighborIter {
    let mut neighbors = NeighborIter::default();
    for dx in -1_i64..=1 {
        for dy in -1_i64..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }

            let x = i64::from(cell.x()) + dx;
            let y = i64::from(cell.y()) + dy;
            let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
                continue;
            };

            let neighbor = Position::new(x, y);
            if dimensions.contains(neighbor) {
                neighbors.push(neighbor);
            }
        }
    }
    neighbors
}

#[derive(Clone, Debug, Default)]
struct NeighborIter {
    buffer: [Option<Position>; 8],
    len: usize,
    cursor: usize,
}

impl NeighborIter {
    fn push(&mut self, cell: Position) {
        if self.len < self.buffer.len() {
            self.buffer[self.len] = Some(cell);
            self.len += 1;
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }

        let value = self.buffer[self.cursor];
        self.cursor += 1;
        value
    }
}
