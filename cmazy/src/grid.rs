use hashbrown::HashMap;
use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{array::Array2D, dims::Dims, error::MazeError, orientation::Heading};

/// Snapshot of the clean grid, taken right after carving.
pub const CARVED: &str = "carved";
/// Snapshot of the grid with distance labels painted on.
pub const DISTANCE: &str = "distance";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellTag {
    Wall,
    Lane,
    Start,
    Exit,
    Distance(u32),
    Highlight(u32),
}

impl CellTag {
    /// Tags a runner can stand on in a clean carved grid.
    pub fn is_walkable(self) -> bool {
        matches!(self, CellTag::Lane | CellTag::Start | CellTag::Exit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// 4 neighbors, in [`Heading::CROSS_ORDER`].
    Cross,
    /// 8 neighbors, row by row.
    Block,
}

pub type Neighbors = SmallVec<[Dims; 8]>;

#[derive(Debug, Clone)]
pub struct Grid {
    cells: Array2D<CellTag>,
    toroidal: bool,
    saved: HashMap<String, Array2D<CellTag>>,
}

impl Grid {
    pub fn new(size: Dims, toroidal: bool, value: CellTag) -> Result<Self, MazeError> {
        let cells = Array2D::new_dims(value, size).ok_or(MazeError::InvalidDimension {
            width: size.0,
            height: size.1,
        })?;

        Ok(Self {
            cells,
            toroidal,
            saved: HashMap::new(),
        })
    }

    pub fn size(&self) -> Dims {
        self.cells.size()
    }

    pub fn is_toroidal(&self) -> bool {
        self.toroidal
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        self.cells.dim_to_idx(pos).is_some()
    }

    pub fn value_at(&self, pos: Dims) -> Option<CellTag> {
        self.cells.get(pos).copied()
    }

    pub fn set_value(&mut self, pos: Dims, value: CellTag) {
        if let Some(cell) = self.cells.get_mut(pos) {
            *cell = value;
        }
    }

    /// Sets every in-bounds coordinate, anything else is skipped.
    pub fn set_values<I>(&mut self, coords: I, value: CellTag)
    where
        I: IntoIterator<Item = Dims>,
    {
        for pos in coords {
            self.set_value(pos, value);
        }
    }

    pub fn fill(&mut self, value: CellTag) {
        self.cells.fill(value);
    }

    pub fn all_coords(&self) -> impl Iterator<Item = Dims> + '_ {
        self.cells.iter_pos()
    }

    /// Neighbors of `pos`. Out-of-bounds ones are dropped, unless the grid is toroidal, then
    /// they wrap around.
    pub fn neighbors(&self, pos: Dims, pattern: Pattern) -> Neighbors {
        let offsets: SmallVec<[Dims; 8]> = match pattern {
            Pattern::Cross => Heading::CROSS_ORDER.iter().map(|h| h.offset()).collect(),
            Pattern::Block => Dims::iter_fill(Dims(-1, -1), Dims(2, 2))
                .filter(|&off| off != Dims::ZERO)
                .collect(),
        };

        offsets
            .into_iter()
            .filter_map(|off| self.wrap(pos + off))
            .collect()
    }

    fn wrap(&self, pos: Dims) -> Option<Dims> {
        if self.toroidal {
            Some(pos.rem_euclid(self.size()))
        } else if self.is_in_bounds(pos) {
            Some(pos)
        } else {
            None
        }
    }

    pub fn count(&self, pred: impl Fn(CellTag) -> bool) -> usize {
        self.cells.iter().filter(|&&tag| pred(tag)).count()
    }

    pub fn snapshot(&mut self, name: &str) {
        self.saved.insert(name.to_owned(), self.cells.clone());
    }

    pub fn restore(&mut self, name: &str) -> Result<(), MazeError> {
        let saved = self
            .saved
            .get(name)
            .ok_or_else(|| MazeError::UnknownSnapshot(name.to_owned()))?;
        self.cells.clone_from(saved);
        Ok(())
    }

    pub fn saved(&self, name: &str) -> Option<&Array2D<CellTag>> {
        self.saved.get(name)
    }

    pub fn cells(&self) -> &Array2D<CellTag> {
        &self.cells
    }
}
