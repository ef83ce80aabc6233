//! Random valid grids for tests

use itertools::Itertools;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::grid::{Cell, Direction, Grid, Position};

/// Grid generator, seeded for reproducible tests
pub struct GridGenerator {
    random: StdRng,
}

impl GridGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            random: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a grid with `exits` openings on the perimeter.
    ///
    /// Passages are carved depth-first from a random cell, so every cell is
    /// reachable. With probability `loop_chance` a carve may break into an
    /// already visited cell, which adds loops.
    pub fn generate(&mut self, rows: usize, cols: usize, loop_chance: f64, exits: usize) -> Grid {
        let mut cells = vec![Cell::from_mask(0xF); rows * cols];
        let mut visited = vec![false; rows * cols];

        let start = Position::new(
            self.random.gen_range(1..=rows),
            self.random.gen_range(1..=cols),
        );
        self.carve(&mut cells, &mut visited, start, rows, cols, loop_chance);

        // A lone cell needs an opening to be valid
        let exits = if rows * cols == 1 { exits.max(1) } else { exits };
        let mut sides = perimeter(rows, cols);
        sides.shuffle(&mut self.random);
        for (pos, dir) in sides.into_iter().take(exits) {
            cells[(pos.row - 1) * cols + pos.col - 1].set_wall(dir, false);
        }

        match Grid::new(rows, cols, cells) {
            Ok(grid) => grid,
            Err(e) => panic!("generated grid is invalid: {}", e),
        }
    }

    /// Carve passages recursively from `pos`, knocking down the shared wall
    /// on both sides.
    fn carve(
        &mut self,
        cells: &mut [Cell],
        visited: &mut [bool],
        pos: Position,
        rows: usize,
        cols: usize,
        loop_chance: f64,
    ) {
        let idx = |p: Position| (p.row - 1) * cols + p.col - 1;
        visited[idx(pos)] = true;

        let mut directions = Direction::ALL.to_vec();
        directions.shuffle(&mut self.random);

        for dir in directions {
            let Some(next) = pos
                .step(dir)
                .filter(|p| p.row <= rows && p.col <= cols)
            else {
                continue;
            };

            if !visited[idx(next)] {
                cells[idx(pos)].set_wall(dir, false);
                cells[idx(next)].set_wall(dir.opposite(), false);
                self.carve(cells, visited, next, rows, cols, loop_chance);
            } else if self.random.gen_bool(loop_chance) {
                cells[idx(pos)].set_wall(dir, false);
                cells[idx(next)].set_wall(dir.opposite(), false);
            }
        }
    }
}

/// Every outward-facing side of the perimeter cells
fn perimeter(rows: usize, cols: usize) -> Vec<(Position, Direction)> {
    (1..=rows)
        .cartesian_product(1..=cols)
        .map(|(row, col)| Position::new(row, col))
        .flat_map(|pos| Direction::ALL.into_iter().map(move |dir| (pos, dir)))
        .filter(|(pos, dir)| {
            pos.step(*dir)
                .map_or(true, |next| next.row > rows || next.col > cols)
        })
        .collect()
}

/// Maze file text for `grid`
pub fn render(grid: &Grid) -> String {
    let body = (1..=grid.rows())
        .map(|row| {
            (1..=grid.cols())
                .filter_map(|col| grid.cell(Position::new(row, col)))
                .map(|cell| cell.symbol())
                .join(" ")
        })
        .join("\n");
    format!("{} {}\n{}\n", grid.rows(), grid.cols(), body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{shortest_path, wall_follow, Hand};

    #[test]
    fn generated_grids_parse_back() {
        for seed in 0..50 {
            let mut gen = GridGenerator::new(seed);
            let rows = 1 + (seed as usize * 7) % 9;
            let cols = 1 + (seed as usize * 5) % 11;
            let grid = gen.generate(rows, cols, 0.1, (seed % 3) as usize);

            let parsed = Grid::parse(&render(&grid));
            assert_eq!(parsed, Ok(grid), "seed {}", seed);
        }
    }

    #[test]
    fn perimeter_sides() {
        assert_eq!(perimeter(1, 1).len(), 4);
        assert_eq!(perimeter(2, 3).len(), 10);
    }

    #[test]
    fn solvers_repeat_themselves() {
        for seed in 0..20 {
            let grid = GridGenerator::new(seed).generate(8, 8, 0.2, 1);
            let start = Position::new(1, 1);
            assert_eq!(shortest_path(&grid, start), shortest_path(&grid, start));
            for hand in [Hand::Right, Hand::Left] {
                assert_eq!(
                    wall_follow(&grid, start, hand),
                    wall_follow(&grid, start, hand)
                );
            }
        }
    }

    #[test]
    fn wall_following_finds_the_exit_of_connected_grids() {
        // Every generated grid is connected, and a single exit on the
        // perimeter lies on the outer wall the hand can reach.
        for seed in 0..20 {
            let grid = GridGenerator::new(seed).generate(6, 9, 0.0, 1);
            let exit = grid.exits().next();
            for hand in [Hand::Right, Hand::Left] {
                let path = wall_follow(&grid, Position::new(3, 1), hand).unwrap();
                assert_eq!(path.last(), exit);
            }
        }
    }
}
