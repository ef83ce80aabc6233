//! Left and right hand rule walkers

use log::{info, trace};
use thiserror::Error;

use crate::{
    grid::{Direction, Grid, Position},
    path::Path,
};

/// Hand kept on the wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Right,
    Left,
}

impl Hand {
    /// Directions to try, most preferred first, when facing `facing`
    pub fn priorities(self, facing: Direction) -> [Direction; 4] {
        match self {
            Hand::Right => [
                facing.turn_right(),
                facing,
                facing.turn_left(),
                facing.opposite(),
            ],
            Hand::Left => [
                facing.turn_left(),
                facing,
                facing.turn_right(),
                facing.opposite(),
            ],
        }
    }
}

/// The walker ran out of steps without reaching an exit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No exit found from {start} after {steps} steps.")]
pub struct Unsolvable {
    pub start: Position,
    pub steps: usize,
}

/// Agent walking the grid with one hand on the wall
struct Walker<'a> {
    grid: &'a Grid,
    hand: Hand,
    pos: Position,
    facing: Direction,
}

impl<'a> Walker<'a> {
    fn new(grid: &'a Grid, start: Position, hand: Hand) -> Self {
        Self {
            grid,
            hand,
            pos: start,
            facing: initial_facing(grid, start),
        }
    }

    /// Move through the first open side in hand order.
    ///
    /// Returns `false` if the current cell has no passage at all.
    fn take_step(&mut self) -> bool {
        let next = self
            .hand
            .priorities(self.facing)
            .into_iter()
            .find_map(|dir| self.grid.passage(self.pos, dir).map(|pos| (pos, dir)));

        match next {
            Some((pos, dir)) => {
                trace!("Move {:?} from {} to {}", dir, self.pos, pos);
                self.pos = pos;
                self.facing = dir;
                true
            }
            None => false,
        }
    }
}

/// Direction the walker faces when entering the maze at `start`
///
/// Starting on a border means the walker came in through it, so it faces
/// inward. Interior starts face north.
fn initial_facing(grid: &Grid, start: Position) -> Direction {
    if start.col == 1 {
        Direction::East
    } else if start.col == grid.cols() {
        Direction::West
    } else if start.row == 1 {
        Direction::South
    } else {
        // Bottom row, or inside the maze
        Direction::North
    }
}

/// Most moves a walk may take. The walker state is a position and a facing,
/// so a longer walk has repeated a state and loops forever.
pub fn step_ceiling(grid: &Grid) -> usize {
    4 * grid.rows() * grid.cols()
}

/// Walk from `start` keeping `hand` on the wall until an exit cell is reached.
///
/// The returned path starts with `start` and ends on the exit; cells may
/// appear more than once.
///
/// # Panics
/// If `start` is outside `grid`, see [Grid::check_start].
///
/// # Examples
/// ```
/// use maze_solver::{wall_follow, Grid, Hand, Position};
///
/// let grid = Grid::parse("1 3\nD 5 5\n").unwrap();
/// let path = wall_follow(&grid, Position::new(1, 1), Hand::Right).unwrap();
/// assert_eq!(path.to_string(), "1,1\n1,2\n1,3");
/// ```
pub fn wall_follow(grid: &Grid, start: Position, hand: Hand) -> Result<Path, Unsolvable> {
    assert!(
        grid.contains(start),
        "start {} outside of {}x{} grid",
        start,
        grid.rows(),
        grid.cols()
    );

    let mut walker = Walker::new(grid, start, hand);
    let mut path = Path::new(start);
    let ceiling = step_ceiling(grid);

    for steps in 1..=ceiling {
        if !walker.take_step() {
            // A cell without passages is only open towards the outside
            return Ok(path);
        }
        path.push(walker.pos);

        if grid.is_exit(walker.pos) {
            info!("Exit {} found in {} steps with {:?} hand", walker.pos, steps, hand);
            return Ok(path);
        }
    }

    info!("No exit after {} steps with {:?} hand", ceiling, hand);
    Err(Unsolvable {
        start,
        steps: ceiling,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        crate::parse_and_validate("tests/mazes/sample_maze.txt").unwrap()
    }

    #[test]
    fn priorities_keep_hand_first() {
        assert_eq!(
            Hand::Right.priorities(Direction::North),
            [
                Direction::East,
                Direction::North,
                Direction::West,
                Direction::South
            ]
        );
        assert_eq!(
            Hand::Left.priorities(Direction::East),
            [
                Direction::North,
                Direction::East,
                Direction::South,
                Direction::West
            ]
        );
    }

    #[test]
    fn facing_points_inward() {
        let grid = sample();
        assert_eq!(initial_facing(&grid, Position::new(6, 1)), Direction::East);
        assert_eq!(initial_facing(&grid, Position::new(3, 7)), Direction::West);
        assert_eq!(initial_facing(&grid, Position::new(1, 4)), Direction::South);
        assert_eq!(initial_facing(&grid, Position::new(6, 4)), Direction::North);
        assert_eq!(initial_facing(&grid, Position::new(3, 3)), Direction::North);
    }

    #[test]
    fn right_hand_sample() {
        let path = wall_follow(&sample(), Position::new(6, 1), Hand::Right).unwrap();
        assert_eq!(
            path.to_string(),
            "6,1\n6,2\n5,2\n5,3\n6,3\n6,4\n6,5\n6,6\n6,7"
        );
    }

    #[test]
    fn left_hand_sample_revisits_cells() {
        let path = wall_follow(&sample(), Position::new(6, 1), Hand::Left).unwrap();
        assert_eq!(path.len(), 71);
        assert_eq!(path.first(), Some(Position::new(6, 1)));
        assert_eq!(path.last(), Some(Position::new(6, 7)));

        let visits = path
            .iter()
            .filter(|pos| **pos == Position::new(3, 5))
            .count();
        assert_eq!(visits, 2);
    }

    #[test]
    fn walk_is_deterministic() {
        let grid = sample();
        for hand in [Hand::Right, Hand::Left] {
            let first = wall_follow(&grid, Position::new(6, 1), hand);
            let second = wall_follow(&grid, Position::new(6, 1), hand);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn no_exit_hits_ceiling() {
        let grid = crate::parse_and_validate("tests/mazes/no_exit_maze.txt").unwrap();
        for hand in [Hand::Right, Hand::Left] {
            let err = wall_follow(&grid, Position::new(6, 1), hand).unwrap_err();
            assert_eq!(err.steps, step_ceiling(&grid));
            assert_eq!(err.steps, 168);
        }
    }

    #[test]
    fn walking_back_to_entrance_is_an_exit() {
        // Dead-end corridor entered from the west side of (1, 1)
        let grid = Grid::parse("1 3\n5 5 7\n").unwrap();
        let path = wall_follow(&grid, Position::new(1, 1), Hand::Left).unwrap();
        assert_eq!(path.to_string(), "1,1\n1,2\n1,3\n1,2\n1,1");
    }

    #[test]
    fn isolated_start() {
        let grid = Grid::parse("1 1\n7\n").unwrap();
        let path = wall_follow(&grid, Position::new(1, 1), Hand::Right).unwrap();
        assert_eq!(path.to_string(), "1,1");
    }

    #[test]
    #[should_panic]
    fn start_outside_panics() {
        let _ = wall_follow(&sample(), Position::new(7, 1), Hand::Right);
    }
}
