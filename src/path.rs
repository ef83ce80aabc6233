//! Walked route through a maze

use std::fmt::Display;

use itertools::Itertools;

use crate::grid::Position;

/// Positions in visiting order, start first.
///
/// Repeated positions are kept: wall following walks back over cells it has
/// already seen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    steps: Vec<Position>,
}

impl Path {
    pub fn new(start: Position) -> Self {
        Self { steps: vec![start] }
    }

    pub fn push(&mut self, pos: Position) {
        self.steps.push(pos);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn first(&self) -> Option<Position> {
        self.steps.first().copied()
    }

    pub fn last(&self) -> Option<Position> {
        self.steps.last().copied()
    }

    pub fn positions(&self) -> &[Position] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.steps.iter()
    }
}

impl FromIterator<Position> for Path {
    fn from_iter<T: IntoIterator<Item = Position>>(iter: T) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

/// One `row,column` line per position
impl Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.steps.iter().join("\n"))
    }
}
