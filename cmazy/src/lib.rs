pub mod algorithms;
pub mod array;
pub mod dims;
pub mod error;
pub mod grid;
pub mod maze;
pub mod orientation;
pub mod paths;
pub mod report;
pub mod runner;

pub use error::{IntegrityError, MazeError};
pub use maze::{Maze, MazeSpec};
