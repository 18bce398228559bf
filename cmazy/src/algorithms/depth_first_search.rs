use hashbrown::HashSet;
use rand::seq::SliceRandom as _;
use smallvec::SmallVec;

use crate::{
    dims::Dims,
    error::MazeError,
    grid::{CellTag, Grid, CARVED},
    orientation::Heading,
};

use super::{validate_endpoint, validate_size, Random};

/// Randomized depth first carving.
///
/// Rooms are the cells with both coordinates odd. Every step moves two cells from a room on the
/// frontier to an unvisited room and opens the door cell between them. The frontier is
/// shuffled before each pop, so branches are not biased towards the most recent room.
#[derive(Debug, Default, Clone, Copy)]
pub struct DepthFirstSearch;

impl DepthFirstSearch {
    /// Resets `grid` to walls and carves a perfect maze into it. Returns the number of cells
    /// opened.
    ///
    /// Nothing is written to `grid` if the size or the endpoints are invalid.
    pub fn carve(
        &self,
        grid: &mut Grid,
        start: Dims,
        exit: Dims,
        rng: &mut Random,
    ) -> Result<usize, MazeError> {
        let size = grid.size();
        validate_size(size)?;
        validate_endpoint(size, "start", start)?;
        validate_endpoint(size, "exit", exit)?;
        if start == exit {
            return Err(MazeError::InvalidEndpoint {
                role: "exit",
                pos: exit,
            });
        }

        log::debug!("carving {}x{} maze from {start} to {exit}", size.0, size.1);

        grid.fill(CellTag::Wall);
        grid.set_value(start, CellTag::Start);
        grid.set_value(exit, CellTag::Exit);

        let rooms = (((size.0 - 1) / 2) * ((size.1 - 1) / 2)) as usize;
        let mut visited = HashSet::with_capacity(rooms);
        let mut frontier = Vec::with_capacity(rooms);
        let mut opened = 0;

        visited.insert(start);
        frontier.push(start);
        loop {
            frontier.shuffle(rng);
            let Some(current) = frontier.pop() else {
                break;
            };

            let mut candidates = Heading::CROSS_ORDER
                .iter()
                .map(|heading| current + heading.offset() * 2)
                .filter(|&next| grid.is_in_bounds(next) && !visited.contains(&next))
                .collect::<SmallVec<[_; 4]>>();

            candidates.shuffle(rng);
            // dead end, `current` is dropped for good
            let Some(next) = candidates.pop() else {
                continue;
            };

            grid.set_value(current.halfway(next), CellTag::Lane);
            opened += 1;
            if next != exit {
                grid.set_value(next, CellTag::Lane);
                opened += 1;
            }

            visited.insert(next);
            frontier.push(current);
            frontier.push(next);
        }

        grid.snapshot(CARVED);
        log::debug!("carved {opened} cells, {} rooms visited", visited.len());

        Ok(opened)
    }
}
