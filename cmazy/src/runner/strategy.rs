use std::{cmp::Reverse, fmt, str::FromStr};

use rand::seq::SliceRandom as _;
use smallvec::SmallVec;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    algorithms::Random,
    dims::Dims,
    orientation::{rotation_table, Heading, Turn},
};

pub type Candidates = SmallVec<[Dims; 4]>;

/// Heading assumed when the runner hasn't moved yet.
pub const DEFAULT_HEADING: Heading = Heading::East;

/// What a strategy sees at an intersection.
#[derive(Debug, Clone, Copy)]
pub struct Decision<'a> {
    pub position: Dims,
    /// Same as `position` before the first move.
    pub previous: Dims,
    /// Unexplored neighbors, at least two, in cross order.
    pub candidates: &'a [Dims],
    pub exit: Dims,
}

/// Outcome of a decision. `remaining` is pushed onto the intersection stack in order, so its
/// last entry is the first one retried after a dead end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub chosen: Dims,
    pub remaining: Candidates,
}

pub trait DecisionStrategy {
    fn name(&self) -> String;

    /// `None` if the strategy can't pick anything, which the engine treats like an invalid
    /// choice.
    fn decide(&self, decision: &Decision<'_>, rng: &mut Random) -> Option<Choice>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Strategy {
    RandomChoice,
    RightHandRule,
    LeftHandRule,
    GreedyToExit,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::RandomChoice,
        Strategy::RightHandRule,
        Strategy::LeftHandRule,
        Strategy::GreedyToExit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::RandomChoice => "random",
            Strategy::RightHandRule => "right-hand",
            Strategy::LeftHandRule => "left-hand",
            Strategy::GreedyToExit => "greedy",
        }
    }

    /// Everything but `RandomChoice` gives the same run every time on the same maze.
    pub fn is_deterministic(self) -> bool {
        !matches!(self, Strategy::RandomChoice)
    }
}

impl DecisionStrategy for Strategy {
    fn name(&self) -> String {
        self.as_str().to_owned()
    }

    fn decide(&self, decision: &Decision<'_>, rng: &mut Random) -> Option<Choice> {
        match self {
            Strategy::RandomChoice => random_choice(decision, rng),
            Strategy::RightHandRule => hand_rule(decision, Turn::RIGHT_HAND),
            Strategy::LeftHandRule => hand_rule(decision, Turn::LEFT_HAND),
            Strategy::GreedyToExit => greedy_to_exit(decision),
        }
    }
}

fn random_choice(decision: &Decision<'_>, rng: &mut Random) -> Option<Choice> {
    let mut remaining = Candidates::from_slice(decision.candidates);
    remaining.shuffle(rng);
    let chosen = remaining.pop()?;
    Some(Choice { chosen, remaining })
}

fn hand_rule(decision: &Decision<'_>, preference: [Turn; 3]) -> Option<Choice> {
    let &Decision {
        position,
        previous,
        candidates,
        ..
    } = decision;

    let incoming = Heading::between(previous, position).unwrap_or(DEFAULT_HEADING);
    let order = rotation_table(preference)[incoming.index()];

    let mut ranked = order
        .iter()
        .filter_map(|&heading| {
            candidates
                .iter()
                .copied()
                .find(|&c| Heading::between(position, c) == Some(heading))
        })
        .collect::<Candidates>();
    // can't happen on a tree walk, but nothing gets dropped either way
    for &c in candidates {
        if !ranked.contains(&c) {
            ranked.push(c);
        }
    }

    if ranked.is_empty() {
        return None;
    }
    let chosen = ranked.remove(0);
    ranked.reverse();

    Some(Choice {
        chosen,
        remaining: ranked,
    })
}

fn greedy_to_exit(decision: &Decision<'_>) -> Option<Choice> {
    let mut remaining = Candidates::from_slice(decision.candidates);
    remaining.sort_by_key(|c| Reverse(c.sq_dist(decision.exit)));
    let chosen = remaining.pop()?;
    Some(Choice { chosen, remaining })
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown runner {0:?}, expected one of: random, right-hand, left-hand, greedy")]
pub struct ParseStrategyError(pub String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == normalized)
            .ok_or_else(|| ParseStrategyError(s.to_owned()))
    }
}

impl TryFrom<String> for Strategy {
    type Error = ParseStrategyError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<Strategy> for String {
    fn from(strategy: Strategy) -> Self {
        strategy.as_str().to_owned()
    }
}
