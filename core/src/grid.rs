use crate::error::{Result, TerrainError};
use crate::utils::HeightMap2D;

// Square height grid stored flat in row-major order.
// Offset = row * dimension + column.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    dimension: usize, // must be 2^n + 1, e.g. 5, 9, 257
    heights: Vec<f32>,
}

impl HeightGrid {
    // Every cell starts at 0.0
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension < 2 || !(dimension - 1).is_power_of_two() {
            return Err(TerrainError::InvalidDimension { dimension });
        }

        Ok(Self {
            dimension,
            heights: vec![0.0; dimension * dimension],
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    // Total number of cells (dimension²)
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn get(&self, row: usize, column: usize) -> Result<f32> {
        let offset = self.checked_offset(row, column)?;
        Ok(self.heights[offset])
    }

    pub fn set(&mut self, row: usize, column: usize, height: f32) -> Result<()> {
        let offset = self.checked_offset(row, column)?;
        self.heights[offset] = height;
        Ok(())
    }

    pub fn get_offset(&self, offset: usize) -> Result<f32> {
        let (row, column) = self.position(offset);
        self.get(row, column)
    }

    pub fn set_offset(&mut self, offset: usize, height: f32) -> Result<()> {
        let (row, column) = self.position(offset);
        self.set(row, column, height)
    }

    // Add `amount` to the cell at `offset`
    pub fn raise(&mut self, offset: usize, amount: f32) -> Result<()> {
        let current = self.get_offset(offset)?;
        self.set_offset(offset, current + amount)
    }

    // Flat offset for (row, column). Not bounds checked.
    #[inline]
    pub fn offset_of(&self, row: usize, column: usize) -> usize {
        row * self.dimension + column
    }

    // (row, column) for a flat offset. Not bounds checked.
    #[inline]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        (offset / self.dimension, offset % self.dimension)
    }

    // Owned copy of every height, row-major
    pub fn snapshot(&self) -> Vec<f32> {
        self.heights.clone()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.heights
    }

    // Nested rows, `map[row][column]`
    pub fn to_rows(&self) -> HeightMap2D {
        self.heights
            .chunks(self.dimension)
            .map(|row| row.to_vec())
            .collect()
    }

    // Lowest and highest height in the grid
    pub fn min_max(&self) -> (f32, f32) {
        self.heights
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &h| (lo.min(h), hi.max(h)))
    }

    // Every (row, column) pair in row-major order
    pub fn iter_positions(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let dimension = self.dimension;
        (0..dimension).flat_map(move |row| (0..dimension).map(move |column| (row, column)))
    }

    fn checked_offset(&self, row: usize, column: usize) -> Result<usize> {
        if row >= self.dimension || column >= self.dimension {
            return Err(TerrainError::OutOfRange {
                row,
                column,
                dimension: self.dimension,
            });
        }
        Ok(self.offset_of(row, column))
    }
}
