use std::time::Instant;

use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::TerrainGenerator;
use crate::config::SquareDiamondConfig;
use crate::error::{Result, TerrainError};
use crate::grid::HeightGrid;

// Square-diamond (midpoint displacement) terrain.
// Each square sets its centre (the diamond vertex) from its four corners,
// then its four edge midpoints (the square vertices), then recurses into
// its quadrants with half the roughness.
pub struct SquareDiamondGenerator<R> {
    grid: HeightGrid,
    roughness: f32, // noise scale at the top level
    noise: Normal<f32>,
    rng: R,
}

impl<R: Rng> SquareDiamondGenerator<R> {
    pub fn new(dimension: usize, config: SquareDiamondConfig, rng: R) -> Result<Self> {
        let grid = HeightGrid::new(dimension)?;
        if !(config.noise_std_dev.is_finite() && config.noise_std_dev >= 0.0) {
            return Err(TerrainError::InvalidParameter(format!(
                "noise standard deviation {} must be finite and non-negative",
                config.noise_std_dev
            )));
        }
        let noise = Normal::new(0.0, config.noise_std_dev).map_err(|e| {
            TerrainError::InvalidParameter(format!(
                "noise standard deviation {}: {}",
                config.noise_std_dev, e
            ))
        })?;

        Ok(Self {
            grid,
            roughness: config.roughness,
            noise,
            rng,
        })
    }

    fn noise(&mut self, roughness: f32) -> f32 {
        self.noise.sample(&mut self.rng) * roughness
    }

    // Subdivide the square with corners (top, left) and (bottom, right).
    // Side length halves every level, so recursion ends at side length 1.
    fn subdivide(
        &mut self,
        top: usize,
        left: usize,
        bottom: usize,
        right: usize,
        roughness: f32,
    ) -> Result<()> {
        if right <= left + 1 {
            return Ok(());
        }

        let top_left = self.grid.get(top, left)?;
        let top_right = self.grid.get(top, right)?;
        let bottom_left = self.grid.get(bottom, left)?;
        let bottom_right = self.grid.get(bottom, right)?;

        // Diamond vertex: mean of the corners plus noise
        let mid_row = (top + bottom) / 2;
        let mid_col = (left + right) / 2;
        let diamond =
            (top_left + top_right + bottom_left + bottom_right) / 4.0 + self.noise(roughness);
        self.grid.set(mid_row, mid_col, diamond)?;

        // Square vertices: left, bottom, right and top edge midpoints
        let edges = [
            (mid_row, left, top_left, bottom_left),
            (bottom, mid_col, bottom_left, bottom_right),
            (mid_row, right, bottom_right, top_right),
            (top, mid_col, top_right, top_left),
        ];
        for (row, column, a, b) in edges {
            let height = (2.0 * diamond + a + b) / 4.0 + self.noise(roughness);
            self.grid.set(row, column, height)?;
        }

        let roughness = roughness / 2.0;
        self.subdivide(top, left, mid_row, mid_col, roughness)?;
        self.subdivide(mid_row, left, bottom, mid_col, roughness)?;
        self.subdivide(mid_row, mid_col, bottom, right, roughness)?;
        self.subdivide(top, mid_col, mid_row, right, roughness)?;
        Ok(())
    }
}

impl<R: Rng> TerrainGenerator for SquareDiamondGenerator<R> {
    fn generate(&mut self) -> Result<()> {
        let start = Instant::now();
        let last = self.grid.dimension() - 1;
        debug!(
            "square-diamond: {}x{} with roughness {}",
            last + 1,
            last + 1,
            self.roughness
        );

        self.subdivide(0, 0, last, last, self.roughness)?;

        debug!("square-diamond finished in {:?}", start.elapsed());
        Ok(())
    }

    fn grid(&self) -> &HeightGrid {
        &self.grid
    }

    fn into_grid(self) -> HeightGrid {
        self.grid
    }
}
