//! Runner engine: walks a carved maze from start to exit, asking a [`DecisionStrategy`] what to
//! do at every intersection and backtracking through an intersection stack on dead ends.

mod strategy;

use std::mem;

use hashbrown::{HashMap, HashSet};

use crate::{
    algorithms::Random,
    dims::Dims,
    error::{IntegrityError, MazeError},
    paths::PathAdjacency,
};
pub use strategy::{
    Candidates, Choice, Decision, DecisionStrategy, ParseStrategyError, Strategy, DEFAULT_HEADING,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunnerState {
    Advancing,
    AtDeadEnd,
    AtIntersection,
    AtExit,
}

/// Alternative left behind at an intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    from: Dims,
    to: Dims,
}

/// Result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    strategy: String,
    start: Dims,
    exit: Dims,
    segments: Vec<Vec<Dims>>,
    explored: Vec<Dims>,
    parents: HashMap<Dims, Dims>,
    dead_ends: usize,
    decisions: usize,
}

impl RunRecord {
    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    /// Cells entered, start included.
    pub fn steps(&self) -> usize {
        self.explored.len()
    }

    pub fn segments(&self) -> &[Vec<Dims>] {
        &self.segments
    }

    /// Explored cells in the order they were entered.
    pub fn explored(&self) -> &[Dims] {
        &self.explored
    }

    pub fn has_explored(&self, pos: Dims) -> bool {
        pos == self.start || self.parents.contains_key(&pos)
    }

    pub fn dead_ends(&self) -> usize {
        self.dead_ends
    }

    pub fn decisions(&self) -> usize {
        self.decisions
    }

    /// Start to exit path, following the cell each explored cell was entered from.
    pub fn route(&self) -> Vec<Dims> {
        let mut route = vec![self.exit];
        let mut pos = self.exit;
        while let Some(&parent) = self.parents.get(&pos) {
            route.push(parent);
            pos = parent;
        }
        route.reverse();
        route
    }
}

/// A single run in progress. Use [`Runner::run`] to go all the way, or [`Runner::step`] to
/// watch it move.
pub struct Runner<'a, S: DecisionStrategy + ?Sized> {
    adjacency: &'a PathAdjacency,
    strategy: &'a S,
    start: Dims,
    exit: Dims,
    position: Dims,
    previous: Dims,
    explored: Vec<Dims>,
    seen: HashSet<Dims>,
    parents: HashMap<Dims, Dims>,
    stack: Vec<Pending>,
    segments: Vec<Vec<Dims>>,
    segment: Vec<Dims>,
    dead_ends: usize,
    decisions: usize,
}

impl<'a, S: DecisionStrategy + ?Sized> Runner<'a, S> {
    pub fn new(adjacency: &'a PathAdjacency, strategy: &'a S, start: Dims, exit: Dims) -> Self {
        let mut seen = HashSet::with_capacity(adjacency.len());
        seen.insert(start);

        Self {
            adjacency,
            strategy,
            start,
            exit,
            position: start,
            previous: start,
            explored: vec![start],
            seen,
            parents: HashMap::with_capacity(adjacency.len()),
            stack: Vec::new(),
            segments: Vec::new(),
            segment: vec![start],
            dead_ends: 0,
            decisions: 0,
        }
    }

    pub fn position(&self) -> Dims {
        self.position
    }

    pub fn steps(&self) -> usize {
        self.explored.len()
    }

    pub fn is_done(&self) -> bool {
        self.position == self.exit
    }

    /// Moves to the next cell and reports what the runner had to deal with to get there.
    pub fn step(&mut self, rng: &mut Random) -> Result<RunnerState, MazeError> {
        if self.is_done() {
            return Ok(RunnerState::AtExit);
        }

        let candidates = self
            .adjacency
            .neighbors(self.position)
            .iter()
            .copied()
            .filter(|pos| !self.seen.contains(pos))
            .collect::<Candidates>();

        let state = match candidates.as_slice() {
            [] => {
                self.close_segment();
                self.dead_ends += 1;
                let next = self.pop_pending()?;
                log::trace!(
                    "{}: dead end at {}, back to {} via {}",
                    self.strategy.name(),
                    self.position,
                    next.to,
                    next.from
                );
                self.enter(next.from, next.to);
                RunnerState::AtDeadEnd
            }
            &[next] => {
                self.enter(self.position, next);
                RunnerState::Advancing
            }
            _ => {
                let choice = self.decide(&candidates, rng)?;
                self.close_segment();
                self.decisions += 1;
                let from = self.position;
                self.stack
                    .extend(choice.remaining.iter().map(|&to| Pending { from, to }));
                self.enter(from, choice.chosen);
                RunnerState::AtIntersection
            }
        };

        Ok(if self.is_done() {
            RunnerState::AtExit
        } else {
            state
        })
    }

    pub fn run(mut self, rng: &mut Random) -> Result<RunRecord, MazeError> {
        while !self.is_done() {
            self.step(rng)?;
        }

        let record = self.finish();
        log::debug!(
            "{}: reached exit in {} steps, {} segments, {} dead ends",
            record.strategy,
            record.steps(),
            record.segments.len(),
            record.dead_ends
        );
        Ok(record)
    }

    /// Freezes the run. Meant to be called once the exit is reached.
    pub fn finish(mut self) -> RunRecord {
        self.close_segment();

        RunRecord {
            strategy: self.strategy.name(),
            start: self.start,
            exit: self.exit,
            segments: self.segments,
            explored: self.explored,
            parents: self.parents,
            dead_ends: self.dead_ends,
            decisions: self.decisions,
        }
    }

    fn decide(&self, candidates: &[Dims], rng: &mut Random) -> Result<Choice, MazeError> {
        let decision = Decision {
            position: self.position,
            previous: self.previous,
            candidates,
            exit: self.exit,
        };
        let violation = |chosen| MazeError::StrategyContractViolation {
            strategy: self.strategy.name(),
            at: self.position,
            chosen,
        };

        let choice = self
            .strategy
            .decide(&decision, rng)
            .ok_or_else(|| violation(self.position))?;

        if !candidates.contains(&choice.chosen) {
            return Err(violation(choice.chosen));
        }

        let mut offered = HashSet::with_capacity(candidates.len());
        offered.insert(choice.chosen);
        for &pos in &choice.remaining {
            // each remaining cell must be a candidate, other than the chosen one, at most once
            if !candidates.contains(&pos) || !offered.insert(pos) {
                return Err(violation(pos));
            }
        }

        Ok(choice)
    }

    fn pop_pending(&mut self) -> Result<Pending, MazeError> {
        while let Some(pending) = self.stack.pop() {
            if !self.seen.contains(&pending.to) {
                return Ok(pending);
            }
        }

        Err(IntegrityError::StackExhausted { at: self.position }.into())
    }

    fn enter(&mut self, from: Dims, to: Dims) {
        self.previous = from;
        self.position = to;
        self.parents.insert(to, from);
        self.seen.insert(to);
        self.explored.push(to);
        self.segment.push(to);
    }

    fn close_segment(&mut self) {
        let segment = mem::take(&mut self.segment);
        if !segment.is_empty() {
            self.segments.push(segment);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;
    use crate::grid::{CellTag, Grid};

    // #######
    // #S....#
    // #.#####
    // #...#E#
    // ###.#.#
    // #.....#
    // #######
    fn maze() -> PathAdjacency {
        let mut grid = Grid::new(Dims(7, 7), false, CellTag::Wall).unwrap();
        grid.set_values(
            [
                Dims(2, 1),
                Dims(3, 1),
                Dims(4, 1),
                Dims(5, 1),
                Dims(1, 2),
                Dims(1, 3),
                Dims(2, 3),
                Dims(3, 3),
                Dims(3, 4),
                Dims(5, 4),
                Dims(1, 5),
                Dims(2, 5),
                Dims(3, 5),
                Dims(4, 5),
                Dims(5, 5),
            ],
            CellTag::Lane,
        );
        grid.set_value(Dims(1, 1), CellTag::Start);
        grid.set_value(Dims(5, 3), CellTag::Exit);
        PathAdjacency::build(&grid)
    }

    fn rng() -> Random {
        Random::seed_from_u64(9)
    }

    const START: Dims = Dims(1, 1);
    const EXIT: Dims = Dims(5, 3);

    #[test]
    fn right_hand_run() {
        let adj = maze();
        let record = Runner::new(&adj, &Strategy::RightHandRule, START, EXIT)
            .run(&mut rng())
            .unwrap();

        // heading east at the start, right is south
        assert_eq!(record.segments()[0], [START]);
        assert_eq!(record.segments()[1][0], Dims(1, 2));
        assert_eq!(*record.explored().last().unwrap(), EXIT);
        assert_eq!(record.steps(), record.explored().len());
        assert_eq!(
            record.route(),
            [
                START,
                Dims(1, 2),
                Dims(1, 3),
                Dims(2, 3),
                Dims(3, 3),
                Dims(3, 4),
                Dims(3, 5),
                Dims(4, 5),
                Dims(5, 5),
                Dims(5, 4),
                EXIT
            ]
        );
    }

    #[test]
    fn left_hand_run_backtracks() {
        let adj = maze();
        let record = Runner::new(&adj, &Strategy::LeftHandRule, START, EXIT)
            .run(&mut rng())
            .unwrap();

        // goes east along the top first, which is a dead end
        assert_eq!(record.segments()[1][0], Dims(2, 1));
        assert!(record.dead_ends() >= 1);
        assert!(record.has_explored(Dims(5, 1)));
        assert_eq!(record.route().len(), 11);
        assert_eq!(record.route().last(), Some(&EXIT));
    }

    #[test]
    fn every_strategy_reaches_exit() {
        let adj = maze();
        for strategy in Strategy::ALL {
            let mut rng = rng();
            let record = Runner::new(&adj, &strategy, START, EXIT).run(&mut rng).unwrap();
            let last = record.segments().last().unwrap();

            assert_eq!(last.last(), Some(&EXIT), "{strategy}");
            assert_eq!(record.strategy(), strategy.as_str());
            let unique: HashSet<_> = record.explored().iter().collect();
            assert_eq!(unique.len(), record.steps());
        }
    }

    #[test]
    fn stepping_reports_states() {
        let adj = maze();
        let mut runner = Runner::new(&adj, &Strategy::RightHandRule, START, EXIT);
        let mut rng = rng();

        assert_eq!(runner.step(&mut rng), Ok(RunnerState::AtIntersection));
        assert_eq!(runner.position(), Dims(1, 2));
        assert_eq!(runner.step(&mut rng), Ok(RunnerState::Advancing));

        let mut last = RunnerState::Advancing;
        while !runner.is_done() {
            last = runner.step(&mut rng).unwrap();
        }
        assert_eq!(last, RunnerState::AtExit);
        assert_eq!(runner.step(&mut rng), Ok(RunnerState::AtExit));
    }

    struct Rogue;

    impl DecisionStrategy for Rogue {
        fn name(&self) -> String {
            "rogue".into()
        }

        fn decide(&self, decision: &Decision<'_>, _: &mut Random) -> Option<Choice> {
            Some(Choice {
                chosen: decision.position + Dims(10, 10),
                remaining: Candidates::new(),
            })
        }
    }

    struct Duplicator;

    impl DecisionStrategy for Duplicator {
        fn name(&self) -> String {
            "duplicator".into()
        }

        fn decide(&self, decision: &Decision<'_>, _: &mut Random) -> Option<Choice> {
            let chosen = decision.candidates[0];
            Some(Choice {
                chosen,
                remaining: Candidates::from_slice(&[chosen]),
            })
        }
    }

    #[test]
    fn contract_violations_are_rejected() {
        let adj = maze();
        let err = Runner::new(&adj, &Rogue, START, EXIT)
            .run(&mut rng())
            .unwrap_err();
        assert_eq!(
            err,
            MazeError::StrategyContractViolation {
                strategy: "rogue".into(),
                at: START,
                chosen: Dims(11, 11),
            }
        );

        let err = Runner::new(&adj, &Duplicator, START, EXIT)
            .run(&mut rng())
            .unwrap_err();
        assert!(matches!(err, MazeError::StrategyContractViolation { .. }));
    }

    #[test]
    fn unreachable_exit_exhausts_stack() {
        let adj = maze();
        let err = Runner::new(&adj, &Strategy::GreedyToExit, START, Dims(0, 0))
            .run(&mut rng())
            .unwrap_err();
        assert!(matches!(
            err,
            MazeError::BuildIntegrity(IntegrityError::StackExhausted { .. })
        ));
    }
}
