use std::{fmt, time::Duration};

use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{
    algorithms::{split_rng, Random},
    dims::Dims,
    error::MazeError,
    maze::Maze,
    runner::{RunRecord, Strategy},
};

/// One line of the summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub strategy: Strategy,
    pub steps: usize,
    pub segments: usize,
    pub dead_ends: usize,
    pub route_len: usize,
    /// Share of explored cells that ended up on the route, in percent.
    pub efficiency: f64,
}

impl RunSummary {
    pub fn new(strategy: Strategy, record: &RunRecord) -> Self {
        let route_len = record.route().len();

        Self {
            strategy,
            steps: record.steps(),
            segments: record.segments().len(),
            dead_ends: record.dead_ends(),
            route_len,
            efficiency: route_len as f64 / record.steps() as f64 * 100.0,
        }
    }
}

/// Every requested runner raced through the same maze.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub seed: u64,
    pub size: Dims,
    pub walkable: usize,
    pub start_distance: u32,
    pub build_time: Duration,
    pub runs: Vec<RunSummary>,
}

impl Summary {
    /// Runs every strategy in `strategies` on `maze`, in parallel if asked to. Each run gets its
    /// own generator split off the maze seed, so both ways give the same summary.
    pub fn collect(
        maze: &Maze,
        strategies: &[Strategy],
        parallel: bool,
    ) -> Result<Self, MazeError> {
        let rngs = split_rng(&mut maze.rng(), strategies.len());
        let jobs = strategies.iter().copied().zip(rngs).collect::<Vec<_>>();

        let run = |(strategy, mut rng): (Strategy, Random)| {
            maze.run(&strategy, &mut rng)
                .map(|record| RunSummary::new(strategy, &record))
        };

        let runs = if parallel {
            jobs.into_par_iter().map(run).collect::<Result<Vec<_>, _>>()?
        } else {
            jobs.into_iter().map(run).collect::<Result<Vec<_>, _>>()?
        };

        Ok(Self {
            seed: maze.seed(),
            size: maze.size(),
            walkable: maze.walkable_count(),
            start_distance: maze.start_distance(),
            build_time: maze.build_time(),
            runs,
        })
    }

    /// Run that explored the fewest cells. First one wins on ties.
    pub fn best(&self) -> Option<&RunSummary> {
        self.runs
            .iter()
            .reduce(|best, run| if run.steps < best.steps { run } else { best })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "seed:           {}", self.seed)?;
        writeln!(f, "size:           {}x{}", self.size.0, self.size.1)?;
        writeln!(f, "walkable cells: {}", self.walkable)?;
        writeln!(f, "start distance: {}", self.start_distance)?;
        writeln!(f, "built in:       {:.2?}", self.build_time)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<12} {:>7} {:>9} {:>10} {:>6} {:>11}",
            "runner", "steps", "segments", "dead ends", "route", "efficiency"
        )?;
        for run in &self.runs {
            writeln!(
                f,
                "{:<12} {:>7} {:>9} {:>10} {:>6} {:>10.1}%",
                run.strategy.as_str(),
                run.steps,
                run.segments,
                run.dead_ends,
                run.route_len,
                run.efficiency
            )?;
        }
        if let Some(best) = self.best() {
            writeln!(f)?;
            write!(f, "best: {} in {} steps", best.strategy, best.steps)?;
        }
        Ok(())
    }
}
