mod adjacency;
mod distance;

pub use adjacency::{Links, PathAdjacency};
pub use distance::{DistanceMap, HIGHLIGHT_OFFSET};
