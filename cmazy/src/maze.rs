use std::time::{Duration, Instant};

use rand::SeedableRng as _;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    algorithms::{seeded, validate_size, DepthFirstSearch, Random},
    dims::Dims,
    error::{IntegrityError, MazeError},
    grid::{CellTag, Grid},
    paths::{DistanceMap, PathAdjacency},
    runner::{DecisionStrategy, RunRecord, Runner},
};

/// What to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MazeSpec {
    /// Width and height, both odd and at least 5.
    pub size: Dims,
    pub toroidal: bool,
    /// Defaults to `(1, 1)`.
    pub start: Option<Dims>,
    /// Defaults to the bottom right room.
    pub exit: Option<Dims>,
    /// Seed of the maze.
    ///
    /// Used for deterministic generation, a random one is drawn if unset.
    pub seed: Option<u64>,
}

impl Default for MazeSpec {
    fn default() -> Self {
        Self {
            size: Dims(31, 21),
            toroidal: false,
            start: None,
            exit: None,
            seed: None,
        }
    }
}

impl MazeSpec {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Dims(width, height),
            ..Default::default()
        }
    }

    pub fn start(&self) -> Dims {
        self.start.unwrap_or(Dims(1, 1))
    }

    pub fn exit(&self) -> Dims {
        self.exit.unwrap_or(self.size - Dims(2, 2))
    }
}

/// A carved maze with everything derived from it. Read only once built.
#[derive(Debug, Clone)]
pub struct Maze {
    grid: Grid,
    start: Dims,
    exit: Dims,
    seed: u64,
    adjacency: PathAdjacency,
    distances: DistanceMap,
    build_time: Duration,
}

impl Maze {
    pub fn generate(spec: &MazeSpec) -> Result<Self, MazeError> {
        validate_size(spec.size)?;

        let started = Instant::now();
        let (mut rng, seed) = seeded(spec.seed);
        let (start, exit) = (spec.start(), spec.exit());
        let mut grid = Grid::new(spec.size, spec.toroidal, CellTag::Wall)?;
        DepthFirstSearch.carve(&mut grid, start, exit, &mut rng)?;

        let mut maze = Self::from_carved(grid, start, exit, seed)?;
        maze.build_time = started.elapsed();
        log::debug!(
            "maze {} seed {seed} built in {:?}: {} walkable cells, start {} steps from exit",
            maze.size(),
            maze.build_time,
            maze.walkable_count(),
            maze.start_distance()
        );
        Ok(maze)
    }

    /// Derives adjacency and distances from an already carved grid.
    pub fn from_carved(grid: Grid, start: Dims, exit: Dims, seed: u64) -> Result<Self, MazeError> {
        let started = Instant::now();
        let adjacency = PathAdjacency::build(&grid);
        if !adjacency.contains(start) {
            return Err(IntegrityError::NotWalkable {
                role: "start",
                pos: start,
            }
            .into());
        }
        let distances = DistanceMap::label(&adjacency, start, exit)?;

        Ok(Self {
            grid,
            start,
            exit,
            seed,
            adjacency,
            distances,
            build_time: started.elapsed(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> Dims {
        self.grid.size()
    }

    pub fn start(&self) -> Dims {
        self.start
    }

    pub fn exit(&self) -> Dims {
        self.exit
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn adjacency(&self) -> &PathAdjacency {
        &self.adjacency
    }

    pub fn distances(&self) -> &DistanceMap {
        &self.distances
    }

    pub fn start_distance(&self) -> u32 {
        self.distances.start_distance()
    }

    /// Time spent carving and deriving adjacency and distances.
    pub fn build_time(&self) -> Duration {
        self.build_time
    }

    pub fn walkable_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Generator for the runners, derived from the maze seed.
    pub fn rng(&self) -> Random {
        Random::seed_from_u64(self.seed)
    }

    pub fn runner<'a, S: DecisionStrategy + ?Sized>(&'a self, strategy: &'a S) -> Runner<'a, S> {
        Runner::new(&self.adjacency, strategy, self.start, self.exit)
    }

    pub fn run<S: DecisionStrategy + ?Sized>(
        &self,
        strategy: &S,
        rng: &mut Random,
    ) -> Result<RunRecord, MazeError> {
        self.runner(strategy).run(rng)
    }

    /// Paints the distance overlay into a copy of the grid. See [`DistanceMap::paint`].
    pub fn paint_distances(&self) -> Result<Grid, MazeError> {
        let mut grid = self.grid.clone();
        self.distances.paint(&mut grid)?;
        Ok(grid)
    }
}
