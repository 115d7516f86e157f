// Neighbour stepping with edge wrap-around, shared by the particle
// deposition generators.

use rand::Rng;

use crate::config::StartLocation;
use crate::grid::HeightGrid;

// The four lattice neighbours, in roll-down priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    // Each direction with probability 0.25
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

// Offset of the neighbour of `offset` in `direction` on a
// `dimension`×`dimension` grid. Stepping off an edge wraps to the opposite
// edge of the same row (left/right) or the same column (up/down).
pub fn neighbor(dimension: usize, offset: usize, direction: Direction) -> usize {
    let row = offset / dimension;
    let column = offset % dimension;
    let last = dimension - 1;

    let (row, column) = match direction {
        Direction::Right if column == last => (row, 0),
        Direction::Right => (row, column + 1),
        Direction::Left if column == 0 => (row, last),
        Direction::Left => (row, column - 1),
        Direction::Up if row == 0 => (last, column),
        Direction::Up => (row - 1, column),
        Direction::Down if row == last => (0, column),
        Direction::Down => (row + 1, column),
    };
    row * dimension + column
}

// The four wrapped neighbours of `offset` in priority order
pub fn neighbors(dimension: usize, offset: usize) -> [usize; 4] {
    Direction::ALL.map(|direction| neighbor(dimension, offset, direction))
}

// A particle wandering over the grid one cell at a time
#[derive(Debug, Clone)]
pub struct RandomWalk {
    dimension: usize,
    current: usize,
}

impl RandomWalk {
    pub fn new(dimension: usize, start: usize) -> Self {
        Self {
            dimension,
            current: start,
        }
    }

    // Start on the centre cell ((N*N)/2) or a uniformly random cell
    pub fn seeded(grid: &HeightGrid, start: StartLocation, rng: &mut impl Rng) -> Self {
        let start = match start {
            StartLocation::Center => grid.len() / 2,
            StartLocation::Random => rng.gen_range(0..grid.len()),
        };
        Self::new(grid.dimension(), start)
    }

    pub fn current(&self) -> usize {
        self.current
    }

    // Move one cell in a random direction and return the new location
    pub fn step(&mut self, rng: &mut impl Rng) -> usize {
        self.step_towards(Direction::random(rng))
    }

    pub fn step_towards(&mut self, direction: Direction) -> usize {
        self.current = neighbor(self.dimension, self.current, direction);
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const N: usize = 5;

    #[test]
    fn walk_interior_steps() {
        // (2, 2) -> offset 12
        assert_eq!(neighbor(N, 12, Direction::Right), 13);
        assert_eq!(neighbor(N, 12, Direction::Left), 11);
        assert_eq!(neighbor(N, 12, Direction::Up), 7);
        assert_eq!(neighbor(N, 12, Direction::Down), 17);
    }

    #[test]
    fn walk_wraps_every_edge() {
        // last column of row 1 wraps to first column of row 1
        assert_eq!(neighbor(N, 9, Direction::Right), 5);
        // first column of row 3 wraps to last column of row 3
        assert_eq!(neighbor(N, 15, Direction::Left), 19);
        // top row wraps to the same column of the bottom row
        assert_eq!(neighbor(N, 3, Direction::Up), 23);
        // bottom row wraps to the same column of the top row
        assert_eq!(neighbor(N, 21, Direction::Down), 1);
    }

    #[test]
    fn walk_corners_stay_in_grid() {
        for corner in [0, N - 1, N * (N - 1), N * N - 1] {
            for n in neighbors(N, corner) {
                assert!(n < N * N);
                assert_ne!(n, corner);
            }
        }
        assert_eq!(neighbors(N, 0), [1, 4, 20, 5]);
        assert_eq!(neighbors(N, 24), [20, 23, 19, 4]);
    }

    #[test]
    fn walk_opposite_steps_cancel() {
        for offset in 0..N * N {
            let right = neighbor(N, offset, Direction::Right);
            assert_eq!(neighbor(N, right, Direction::Left), offset);
            let up = neighbor(N, offset, Direction::Up);
            assert_eq!(neighbor(N, up, Direction::Down), offset);
        }
    }

    #[test]
    fn walk_seeded_start() {
        let grid = HeightGrid::new(N).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let walk = RandomWalk::seeded(&grid, StartLocation::Center, &mut rng);
        assert_eq!(walk.current(), 12);

        for _ in 0..100 {
            let walk = RandomWalk::seeded(&grid, StartLocation::Random, &mut rng);
            assert!(walk.current() < N * N);
        }
    }

    #[test]
    fn walk_step_moves_to_a_neighbour() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut walk = RandomWalk::new(N, 12);
        for _ in 0..1000 {
            let before = walk.current();
            let after = walk.step(&mut rng);
            assert!(neighbors(N, before).contains(&after));
        }
    }
}
