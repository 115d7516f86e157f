// Fault-line displacement.
//
// A fault is a chord between two opposite edges of the grid. Cells on one
// side of the chord are raised, repeated for every fault.

use std::time::Instant;

use log::debug;
use rand::Rng;

use crate::TerrainGenerator;
use crate::config::FaultConfig;
use crate::error::{Result, TerrainError};
use crate::grid::HeightGrid;

// Which pair of opposite edges a fault connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultAxis {
    LeftRight,
    TopBottom,
}

// Ordered pair of grid offsets; the order picks the raised side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultLine {
    pub start: usize,
    pub end: usize,
}

impl FaultLine {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    // Random chord across the grid.
    //
    // Left-right runs from the first cell of one row to the last cell of
    // another; top-bottom from a cell of the top row to a cell of the
    // bottom row.
    pub fn random(dimension: usize, rng: &mut impl Rng) -> Self {
        let axis = if rng.gen_bool(0.5) {
            FaultAxis::LeftRight
        } else {
            FaultAxis::TopBottom
        };
        let first = rng.gen_range(0..dimension);
        let second = rng.gen_range(0..dimension);
        Self::across(dimension, axis, first, second)
    }

    // Chord on `axis` through edge cells `first` and `second`.
    pub fn across(dimension: usize, axis: FaultAxis, first: usize, second: usize) -> Self {
        match axis {
            FaultAxis::LeftRight => Self {
                start: dimension * first,
                end: dimension * (second + 1) - 1,
            },
            FaultAxis::TopBottom => Self {
                start: first,
                end: dimension * (dimension - 1) + second,
            },
        }
    }

    pub fn reversed(self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }
}

// Whether `point` lies strictly on the raised side of the chord
// `start -> end`. Based on the sign of the 2D cross product, so points on
// the line are never raised and swapping the endpoints swaps the sides.
pub fn raise_point(dimension: usize, start: usize, end: usize, point: usize) -> bool {
    let to_signed = |offset: usize| ((offset / dimension) as i64, (offset % dimension) as i64);
    let (start_row, start_col) = to_signed(start);
    let (end_row, end_col) = to_signed(end);
    let (point_row, point_col) = to_signed(point);

    let side = (end_col - start_col) * (point_row - start_row)
        - (end_row - start_row) * (point_col - start_col);
    side > 0
}

// Grid plus the fault lines cut across it. Faults are drawn once, when the
// generator is built, and kept for its lifetime.
pub struct FaultDisplacementGenerator {
    grid: HeightGrid,
    faults: Vec<FaultLine>,
}

impl FaultDisplacementGenerator {
    pub fn new(dimension: usize, fault_count: usize, rng: &mut impl Rng) -> Result<Self> {
        let grid = HeightGrid::new(dimension)?;
        let faults = (0..fault_count)
            .map(|_| FaultLine::random(dimension, &mut *rng))
            .collect();
        Ok(Self { grid, faults })
    }

    // Use the given faults instead of random ones. Endpoints must be inside
    // the grid.
    pub fn with_faults(dimension: usize, faults: Vec<FaultLine>) -> Result<Self> {
        let grid = HeightGrid::new(dimension)?;
        for fault in &faults {
            for offset in [fault.start, fault.end] {
                if offset >= grid.len() {
                    let (row, column) = grid.position(offset);
                    return Err(TerrainError::OutOfRange {
                        row,
                        column,
                        dimension,
                    });
                }
            }
        }
        Ok(Self { grid, faults })
    }

    pub fn faults(&self) -> &[FaultLine] {
        &self.faults
    }

    pub fn fault_count(&self) -> usize {
        self.faults.len()
    }

    pub fn raise_point(&self, start: usize, end: usize, point: usize) -> bool {
        raise_point(self.grid.dimension(), start, end, point)
    }

    pub fn grid(&self) -> &HeightGrid {
        &self.grid
    }

    // Add `amount` to every cell on the raised side of `fault`.
    pub fn displace(&mut self, fault: FaultLine, amount: f32) -> Result<usize> {
        let mut raised = 0;
        for point in 0..self.grid.len() {
            if raise_point(self.grid.dimension(), fault.start, fault.end, point) {
                self.grid.raise(point, amount)?;
                raised += 1;
            }
        }
        Ok(raised)
    }
}

// Fault terrain where each fault pushes one side up by a fixed step.
pub struct StepFaultGenerator {
    faults: FaultDisplacementGenerator,
    step_height: f32,
}

impl StepFaultGenerator {
    pub fn new<R: Rng>(dimension: usize, config: FaultConfig, mut rng: R) -> Result<Self> {
        Ok(Self {
            faults: FaultDisplacementGenerator::new(dimension, config.fault_count, &mut rng)?,
            step_height: config.step_height,
        })
    }

    pub fn with_faults(dimension: usize, faults: Vec<FaultLine>, step_height: f32) -> Result<Self> {
        Ok(Self {
            faults: FaultDisplacementGenerator::with_faults(dimension, faults)?,
            step_height,
        })
    }

    pub fn faults(&self) -> &[FaultLine] {
        self.faults.faults()
    }
}

impl TerrainGenerator for StepFaultGenerator {
    fn generate(&mut self) -> Result<()> {
        let start = Instant::now();
        let lines = self.faults.faults().to_vec();
        let mut raised = 0;
        for fault in lines {
            raised += self.faults.displace(fault, self.step_height)?;
        }
        debug!(
            "step faults: {} faults, {} cell raises in {:?}",
            self.faults.fault_count(),
            raised,
            start.elapsed()
        );
        Ok(())
    }

    fn grid(&self) -> &HeightGrid {
        self.faults.grid()
    }

    fn into_grid(self) -> HeightGrid {
        self.faults.grid
    }
}
