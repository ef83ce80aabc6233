//! Maze file parsing and structural validation
//!
//! A maze file is a `rows columns` header line followed by `rows` lines of
//! `columns` cell symbols. Tokens may be separated by any run of whitespace.

use std::{fs, io, path::Path as FsPath};

use itertools::Itertools;
use log::debug;
use thiserror::Error;

use crate::grid::{Cell, Grid, Position};

/// Why the content of a maze file is not a valid maze
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidKind {
    #[error("Maze file is not valid UTF-8 text.")]
    NotText,
    #[error("Maze file has no size line.")]
    MissingHeader,
    #[error("Expect two numbers in size line, got `{0}`.")]
    MalformedHeader(String),
    #[error("Maze size {rows}x{cols} is not positive.")]
    NonPositiveDimensions { rows: i64, cols: i64 },
    #[error("Expect {expected} cells, got {found}.")]
    CellCount { expected: usize, found: usize },
    #[error("Row {row} has {found} cells, expect {expected}.")]
    WrongColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Unexpected cell `{symbol}` at {pos}.")]
    InvalidSymbol { pos: Position, symbol: String },
    #[error("File ends abruptly after {found} of {expected} rows.")]
    FileEndsAbruptly { expected: usize, found: usize },
    #[error("Unexpected content after the last row, at line {line}.")]
    TrailingContent { line: usize },
    /// Cell at `pos` disagrees with its east neighbour about their shared wall
    #[error("Cell {pos} mismatches its right neighbour's border.")]
    HorizontalMismatch { pos: Position },
    /// Cell at `pos` disagrees with its south neighbour about their shared wall
    #[error("Cell {pos} mismatches the border of the cell below.")]
    VerticalMismatch { pos: Position },
    #[error("Cell {pos} is walled on every side.")]
    SealedCell { pos: Position },
}

impl InvalidKind {
    pub fn is_vertical_mismatch(&self) -> bool {
        matches!(self, InvalidKind::VerticalMismatch { .. })
    }
}

/// Failure to load a maze file
#[derive(Error, Debug)]
pub enum LoadError {
    /// File is missing or unreadable
    #[error("Failed to read file.")]
    Io(#[source] io::Error),
    /// File was read, but does not describe a valid maze
    #[error("Invalid maze: {0}")]
    Invalid(#[from] InvalidKind),
}

/// Read the maze file at `path` and validate it.
///
/// I/O failures are kept apart from invalid content: only a file that could
/// not be read gives [LoadError::Io].
pub fn parse_and_validate<P: AsRef<FsPath>>(path: P) -> Result<Grid, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(LoadError::Io)?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    let text = String::from_utf8(bytes).map_err(|_| InvalidKind::NotText)?;
    Ok(Grid::parse(&text)?)
}

impl Grid {
    /// Parse maze text into a validated grid.
    ///
    /// # Examples
    /// ```
    /// use maze_solver::Grid;
    ///
    /// let grid = Grid::parse("2   2\n9 3\nC 4\n").unwrap();
    /// assert_eq!((grid.rows(), grid.cols()), (2, 2));
    /// assert!(Grid::parse("1 1\nF\n").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, InvalidKind> {
        let mut lines = text
            .lines()
            .enumerate()
            .skip_while(|(_, line)| line.trim().is_empty());

        let (_, header) = lines.next().ok_or(InvalidKind::MissingHeader)?;
        let (rows, cols) = parse_header(header)?;
        debug!("Maze size is {}x{}", rows, cols);

        // Header sizes are untrusted, so cells grow with the rows actually read
        let mut cells = Vec::new();
        for row in 1..=rows {
            let Some((_, line)) = lines.next() else {
                return Err(InvalidKind::FileEndsAbruptly {
                    expected: rows,
                    found: row - 1,
                });
            };
            cells.extend(parse_row(line, row, cols)?);
        }

        if let Some((idx, _)) = lines.find(|(_, line)| !line.trim().is_empty()) {
            return Err(InvalidKind::TrailingContent { line: idx + 1 });
        }

        Self::new(rows, cols, cells)
    }
}

fn parse_header(line: &str) -> Result<(usize, usize), InvalidKind> {
    let malformed = || InvalidKind::MalformedHeader(line.trim().to_string());

    let (rows, cols) = line
        .split_whitespace()
        .map(|token| token.parse::<i64>())
        .collect_tuple()
        .ok_or_else(malformed)?;
    let (rows, cols) = (rows.map_err(|_| malformed())?, cols.map_err(|_| malformed())?);

    if rows < 1 || cols < 1 {
        return Err(InvalidKind::NonPositiveDimensions { rows, cols });
    }
    let rows = usize::try_from(rows).map_err(|_| malformed())?;
    let cols = usize::try_from(cols).map_err(|_| malformed())?;
    Ok((rows, cols))
}

fn parse_row(line: &str, row: usize, cols: usize) -> Result<Vec<Cell>, InvalidKind> {
    let cells = line
        .split_whitespace()
        .enumerate()
        .map(|(idx, token)| {
            let mut chars = token.chars();
            match (chars.next().and_then(Cell::from_symbol), chars.next()) {
                (Some(cell), None) => Ok(cell),
                _ => Err(InvalidKind::InvalidSymbol {
                    pos: Position::new(row, idx + 1),
                    symbol: token.to_string(),
                }),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    if cells.len() != cols {
        return Err(InvalidKind::WrongColumnCount {
            row,
            expected: cols,
            found: cells.len(),
        });
    }
    Ok(cells)
}
