//! Validate wall-encoded maze files and find a way out of them
//!
//! A maze is a rectangular grid of cells, each with a wall flag on every
//! side. It is read from a text file whose first line holds the number of
//! rows and columns, followed by one line of cell symbols per row. A symbol
//! is a hexadecimal digit whose bits mark the walls: north 1, east 2,
//! south 4, west 8.
//!
//! Three strategies lead out of a maze: the right hand rule, the left hand
//! rule and the shortest path to the nearest exit.
//!
//! # Examples
//! ```
//! use maze_solver::{shortest_path, wall_follow, Grid, Hand, Position};
//!
//! let text = "
//! 3 3
//! 9 5 3
//! A D 2
//! C 5 4";
//! let grid = Grid::parse(text).unwrap();
//! let start = Position::new(1, 1);
//!
//! let right = wall_follow(&grid, start, Hand::Right).unwrap();
//! assert_eq!(right.to_string(), "1,1\n2,1\n3,1\n3,2\n3,3");
//!
//! let left = wall_follow(&grid, start, Hand::Left).unwrap();
//! assert_eq!(left.to_string(), "1,1\n1,2\n1,3\n2,3\n3,3");
//!
//! let shortest = shortest_path(&grid, start).unwrap();
//! assert_eq!(shortest.len(), 5);
//! ```

pub mod cli;
pub mod grid;
pub mod parser;
pub mod path;
pub mod shortest_path;
#[cfg(test)]
mod testgen;
pub mod wall_follower;

pub use grid::{Cell, Direction, Grid, Position, StartOutOfBounds};
pub use parser::{parse_and_validate, InvalidKind, LoadError};
pub use path::Path;
pub use shortest_path::{shortest_path, NoPath};
pub use wall_follower::{wall_follow, Hand, Unsolvable};
