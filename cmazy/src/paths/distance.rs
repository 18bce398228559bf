use std::collections::VecDeque;

use hashbrown::HashMap;

use crate::{
    dims::Dims,
    error::{IntegrityError, MazeError},
    grid::{CellTag, Grid, CARVED, DISTANCE},
};

use super::PathAdjacency;

/// Added to the max distance when highlighting start and exit on the distance overlay.
pub const HIGHLIGHT_OFFSET: u32 = 10;

/// Hop distance of every walkable cell to the exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMap {
    start: Dims,
    exit: Dims,
    distances: HashMap<Dims, u32>,
    max: u32,
    start_distance: u32,
}

impl DistanceMap {
    /// Breadth first flood fill from `exit`. Fails if any walkable cell is left unlabeled.
    pub fn label(adjacency: &PathAdjacency, start: Dims, exit: Dims) -> Result<Self, MazeError> {
        if !adjacency.contains(exit) {
            return Err(IntegrityError::NotWalkable {
                role: "exit",
                pos: exit,
            }
            .into());
        }

        let mut distances = HashMap::with_capacity(adjacency.len());
        let mut queue = VecDeque::new();
        let mut max = 0;

        distances.insert(exit, 0);
        queue.push_back((exit, 0));
        while let Some((pos, dist)) = queue.pop_front() {
            max = max.max(dist);
            for &next in adjacency.neighbors(pos) {
                if !distances.contains_key(&next) {
                    distances.insert(next, dist + 1);
                    queue.push_back((next, dist + 1));
                }
            }
        }

        if distances.len() != adjacency.len() {
            return Err(IntegrityError::Unlabeled {
                labeled: distances.len(),
                total: adjacency.len(),
            }
            .into());
        }

        let start_distance =
            distances
                .get(&start)
                .copied()
                .ok_or(IntegrityError::NotWalkable {
                    role: "start",
                    pos: start,
                })?;
        log::debug!("start is {start_distance} steps from exit, furthest cell {max}");

        Ok(Self {
            start,
            exit,
            distances,
            max,
            start_distance,
        })
    }

    pub fn get(&self, pos: Dims) -> Option<u32> {
        self.distances.get(&pos).copied()
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn start_distance(&self) -> u32 {
        self.start_distance
    }

    pub fn exit(&self) -> Dims {
        self.exit
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dims, u32)> + '_ {
        self.distances.iter().map(|(&pos, &d)| (pos, d))
    }

    /// Cells furthest from the exit, sorted.
    pub fn furthest(&self) -> Vec<Dims> {
        let mut cells: Vec<_> = self
            .iter()
            .filter(|&(_, d)| d == self.max)
            .map(|(pos, _)| pos)
            .collect();
        cells.sort();
        cells
    }

    /// Writes the distance labels onto `grid` and keeps them as the [`DISTANCE`] snapshot.
    /// Start and exit are highlighted above the max distance. The clean grid is restored
    /// before returning.
    pub fn paint(&self, grid: &mut Grid) -> Result<(), MazeError> {
        grid.snapshot(CARVED);

        for (pos, dist) in self.iter() {
            grid.set_value(pos, CellTag::Distance(dist));
        }
        grid.set_values(
            [self.start, self.exit],
            CellTag::Highlight(self.max + HIGHLIGHT_OFFSET),
        );

        grid.snapshot(DISTANCE);
        grid.restore(CARVED)
    }
}
