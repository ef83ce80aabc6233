//! Breadth-first search for the nearest exit

use std::collections::VecDeque;

use log::{debug, info};
use thiserror::Error;

use crate::{
    grid::{Direction, Grid, Position},
    path::Path,
};

/// Every cell reachable from the start was searched without finding an exit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No exit is reachable from {start} ({visited} cells searched).")]
pub struct NoPath {
    pub start: Position,
    pub visited: usize,
}

/// Find a shortest route from `start` to the nearest exit other than `start`.
///
/// When no other exit is reachable but `start` is an exit itself, the route
/// is `start` alone.
///
/// Neighbours are expanded north, east, south, west, so among equally short
/// routes the same one is always returned.
///
/// # Panics
/// If `start` is outside `grid`, see [Grid::check_start].
///
/// # Examples
/// ```
/// use maze_solver::{shortest_path, Grid, Position};
///
/// let grid = Grid::parse("2 2\n9 3\nC 4\n").unwrap();
/// let path = shortest_path(&grid, Position::new(1, 1)).unwrap();
/// assert_eq!(path.to_string(), "1,1\n1,2\n2,2");
/// ```
pub fn shortest_path(grid: &Grid, start: Position) -> Result<Path, NoPath> {
    assert!(
        grid.contains(start),
        "start {} outside of {}x{} grid",
        start,
        grid.rows(),
        grid.cols()
    );

    // Discovering neighbour of each visited cell, by grid index
    let mut prev: Vec<Option<Position>> = vec![None; grid.rows() * grid.cols()];
    let mut visited = vec![false; grid.rows() * grid.cols()];
    let mut queue = VecDeque::from([start]);
    visited[grid.index(start)] = true;
    let mut visited_n = 1;

    while let Some(pos) = queue.pop_front() {
        if pos != start && grid.is_exit(pos) {
            let path = reconstruct(grid, &prev, pos);
            info!("Exit {} found, {} steps from {}", pos, path.len() - 1, start);
            return Ok(path);
        }

        for next in Direction::ALL
            .iter()
            .filter_map(|dir| grid.passage(pos, *dir))
        {
            let idx = grid.index(next);
            if !visited[idx] {
                visited[idx] = true;
                visited_n += 1;
                prev[idx] = Some(pos);
                queue.push_back(next);
            }
        }
    }

    // Nothing else reachable, but the start itself leads out
    if grid.is_exit(start) {
        info!("Start {} is the only reachable exit", start);
        return Ok(Path::new(start));
    }

    debug!("Searched {} cells from {} without an exit", visited_n, start);
    Err(NoPath {
        start,
        visited: visited_n,
    })
}

/// Follow discovering neighbours back from `end` to the start
fn reconstruct(grid: &Grid, prev: &[Option<Position>], end: Position) -> Path {
    let mut steps = vec![end];
    let mut pos = end;
    while let Some(before) = prev[grid.index(pos)] {
        steps.push(before);
        pos = before;
    }
    steps.into_iter().rev().collect()
}
