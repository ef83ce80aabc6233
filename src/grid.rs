//! Grid model: positions, directions, walled cells and the validated grid

use std::fmt::Display;

use log::debug;
use thiserror::Error;

use crate::parser::InvalidKind;

/// Location in the grid, 1-indexed, rows grow downwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Adjacent position in `dir`, or `None` when it would fall before row 1
    /// or column 1.
    ///
    /// Positions past the last row or column are returned; use
    /// [Grid::contains] to check them.
    pub fn step(&self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::North if self.row > 1 => Some(Self::new(self.row - 1, self.col)),
            Direction::East => Some(Self::new(self.row, self.col + 1)),
            Direction::South => Some(Self::new(self.row + 1, self.col)),
            Direction::West if self.col > 1 => Some(Self::new(self.row, self.col - 1)),
            _ => None,
        }
    }
}

/// Rendered as `row,column`, the line format of printed paths
impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Compass direction, in clockwise order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions clockwise from north. This is also the neighbour
    /// expansion order of the shortest path search.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn turn_right(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    pub fn turn_left(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::East => Direction::North,
            Direction::South => Direction::East,
            Direction::West => Direction::South,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Bit of this side in a cell symbol's wall mask
    fn mask(self) -> u8 {
        match self {
            Direction::North => 0b0001,
            Direction::East => 0b0010,
            Direction::South => 0b0100,
            Direction::West => 0b1000,
        }
    }
}

/// One grid element with a wall flag per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl Cell {
    /// Cell with walls on every side set in `mask` (north 1, east 2, south 4, west 8)
    pub fn from_mask(mask: u8) -> Self {
        Self {
            north: mask & Direction::North.mask() != 0,
            east: mask & Direction::East.mask() != 0,
            south: mask & Direction::South.mask() != 0,
            west: mask & Direction::West.mask() != 0,
        }
    }

    /// Decode a cell symbol: one hexadecimal digit whose value is the wall mask.
    ///
    /// Returns `None` for anything outside the alphabet.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let mask = match symbol {
            '0' => 0x0,
            '1' => 0x1,
            '2' => 0x2,
            '3' => 0x3,
            '4' => 0x4,
            '5' => 0x5,
            '6' => 0x6,
            '7' => 0x7,
            '8' => 0x8,
            '9' => 0x9,
            'A' | 'a' => 0xA,
            'B' | 'b' => 0xB,
            'C' | 'c' => 0xC,
            'D' | 'd' => 0xD,
            'E' | 'e' => 0xE,
            'F' | 'f' => 0xF,
            _ => return None,
        };
        Some(Self::from_mask(mask))
    }

    /// Upper-case symbol encoding this cell
    pub fn symbol(&self) -> char {
        let mask = Direction::ALL
            .iter()
            .filter(|dir| self.has_wall(**dir))
            .fold(0u8, |acc, dir| acc | dir.mask());
        match mask {
            0..=9 => (b'0' + mask) as char,
            _ => (b'A' + mask - 10) as char,
        }
    }

    pub fn has_wall(&self, dir: Direction) -> bool {
        match dir {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    pub fn set_wall(&mut self, dir: Direction, wall: bool) {
        match dir {
            Direction::North => self.north = wall,
            Direction::East => self.east = wall,
            Direction::South => self.south = wall,
            Direction::West => self.west = wall,
        }
    }

    fn is_sealed(&self) -> bool {
        Direction::ALL.iter().all(|dir| self.has_wall(*dir))
    }
}

/// Start position given to a solver lies outside the grid
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Start position {start} is outside the {rows}x{cols} maze.")]
pub struct StartOutOfBounds {
    pub start: Position,
    pub rows: usize,
    pub cols: usize,
}

/// Validated rectangular maze
///
/// A `Grid` can only be built through [Grid::new], which rejects one-sided
/// walls between neighbours and sealed cells, so every instance is
/// consistent. It is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major cells
    cells: Vec<Cell>,
}

impl Grid {
    /// Build and validate a grid from row-major `cells`.
    pub fn new(rows: usize, cols: usize, cells: Vec<Cell>) -> Result<Self, InvalidKind> {
        if rows == 0 || cols == 0 {
            return Err(InvalidKind::NonPositiveDimensions {
                rows: rows as i64,
                cols: cols as i64,
            });
        }
        if rows.checked_mul(cols) != Some(cells.len()) {
            return Err(InvalidKind::CellCount {
                expected: rows.saturating_mul(cols),
                found: cells.len(),
            });
        }

        let grid = Self { rows, cols, cells };
        grid.check_walls()?;
        debug!("Grid {}x{} passed wall checks", rows, cols);
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Position) -> bool {
        (1..=self.rows).contains(&pos.row) && (1..=self.cols).contains(&pos.col)
    }

    /// Row-major index of an in-bounds position
    pub(crate) fn index(&self, pos: Position) -> usize {
        (pos.row - 1) * self.cols + pos.col - 1
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        if self.contains(pos) {
            self.cells.get(self.index(pos))
        } else {
            None
        }
    }

    /// Reject a start position outside the grid.
    pub fn check_start(&self, start: Position) -> Result<(), StartOutOfBounds> {
        if self.contains(start) {
            Ok(())
        } else {
            Err(StartOutOfBounds {
                start,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Neighbouring cell reachable from `pos` through an open wall.
    ///
    /// Open walls on the perimeter lead off the grid and give `None`.
    pub fn passage(&self, pos: Position, dir: Direction) -> Option<Position> {
        let cell = self.cell(pos)?;
        if cell.has_wall(dir) {
            return None;
        }
        pos.step(dir).filter(|next| self.contains(*next))
    }

    /// Whether `pos` is on the perimeter with an open outward-facing wall
    pub fn is_exit(&self, pos: Position) -> bool {
        let Some(cell) = self.cell(pos) else {
            return false;
        };
        Direction::ALL.iter().any(|dir| {
            !cell.has_wall(*dir) && pos.step(*dir).map_or(true, |next| !self.contains(next))
        })
    }

    /// All exits in row-major order
    pub fn exits(&self) -> impl Iterator<Item = Position> + '_ {
        (1..=self.rows)
            .flat_map(move |row| (1..=self.cols).map(move |col| Position::new(row, col)))
            .filter(|pos| self.is_exit(*pos))
    }

    /// Check shared walls, east neighbour then south neighbour, row-major.
    fn check_walls(&self) -> Result<(), InvalidKind> {
        for row in 1..=self.rows {
            for col in 1..=self.cols {
                let pos = Position::new(row, col);
                let cell = self.cells[self.index(pos)];

                if cell.is_sealed() {
                    return Err(InvalidKind::SealedCell { pos });
                }

                let east = Position::new(row, col + 1);
                if self.contains(east) && cell.east != self.cells[self.index(east)].west {
                    return Err(InvalidKind::HorizontalMismatch { pos });
                }

                let south = Position::new(row + 1, col);
                if self.contains(south) && cell.south != self.cells[self.index(south)].north {
                    return Err(InvalidKind::VerticalMismatch { pos });
                }
            }
        }
        Ok(())
    }
}
