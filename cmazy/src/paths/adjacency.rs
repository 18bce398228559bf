use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::{
    dims::Dims,
    grid::{Grid, Pattern},
};

pub type Links = SmallVec<[Dims; 4]>;

/// Walkable cell -> walkable cross neighbors, in canonical cross order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathAdjacency {
    links: HashMap<Dims, Links>,
}

impl PathAdjacency {
    pub fn build(grid: &Grid) -> Self {
        let walkable = |pos: Dims| grid.value_at(pos).is_some_and(|tag| tag.is_walkable());

        let links = grid
            .all_coords()
            .filter(|&pos| walkable(pos))
            .map(|pos| {
                let links = grid
                    .neighbors(pos, Pattern::Cross)
                    .into_iter()
                    .filter(|&n| walkable(n))
                    .collect();
                (pos, links)
            })
            .collect();

        Self { links }
    }

    /// Empty for cells that aren't walkable.
    pub fn neighbors(&self, pos: Dims) -> &[Dims] {
        self.links.get(&pos).map(|l| l.as_slice()).unwrap_or(&[])
    }

    pub fn contains(&self, pos: Dims) -> bool {
        self.links.contains_key(&pos)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = Dims> + '_ {
        self.links.keys().copied()
    }

    pub fn edge_count(&self) -> usize {
        self.links.values().map(|l| l.len()).sum::<usize>() / 2
    }

    pub fn is_symmetric(&self) -> bool {
        self.links
            .iter()
            .all(|(&a, links)| links.iter().all(|&b| self.neighbors(b).contains(&a)))
    }

    /// Number of cells reachable from `from`, `from` included.
    pub fn reachable_from(&self, from: Dims) -> usize {
        if !self.contains(from) {
            return 0;
        }

        let mut seen = HashSet::with_capacity(self.len());
        let mut stack = vec![from];
        seen.insert(from);
        while let Some(pos) = stack.pop() {
            for &next in self.neighbors(pos) {
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }

        seen.len()
    }

    /// Connected and acyclic, i.e. exactly one simple path between any two cells.
    pub fn is_tree(&self, root: Dims) -> bool {
        self.edge_count() + 1 == self.len() && self.reachable_from(root) == self.len()
    }
}
