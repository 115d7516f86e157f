use std::f64::consts::FRAC_PI_2;
use std::time::Instant;

use log::{debug, info, trace};
use rand::Rng;

use crate::TerrainGenerator;
use crate::config::BumpConfig;
use crate::error::{Result, TerrainError};
use crate::grid::HeightGrid;

// Outcome of one generate() run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BumpStats {
    pub stamped: usize,
    pub skipped: usize, // too close to an edge
}

// Terrain built by stamping cosine-shaped bumps at random centres.
// All bumps share one diameter, a fraction of the grid dimension.
pub struct BumpStampGenerator {
    grid: HeightGrid,
    config: BumpConfig,
    diameter: f64,
    centers: Vec<usize>,
    stats: BumpStats,
}

impl BumpStampGenerator {
    // Draws `bump_count` uniformly random centres up front
    pub fn new<R: Rng>(dimension: usize, config: BumpConfig, mut rng: R) -> Result<Self> {
        let grid = HeightGrid::new(dimension)?;
        let centers = (0..config.bump_count)
            .map(|_| rng.gen_range(0..grid.len()))
            .collect();
        Self::build(grid, config, centers)
    }

    // Stamp at the given centres instead of random ones
    pub fn with_centers(dimension: usize, config: BumpConfig, centers: Vec<usize>) -> Result<Self> {
        let grid = HeightGrid::new(dimension)?;
        if let Some(&center) = centers.iter().find(|&&c| c >= grid.len()) {
            let (row, column) = grid.position(center);
            return Err(TerrainError::OutOfRange {
                row,
                column,
                dimension,
            });
        }
        Self::build(grid, config, centers)
    }

    fn build(grid: HeightGrid, config: BumpConfig, centers: Vec<usize>) -> Result<Self> {
        let diameter = grid.dimension() as f64 * config.diameter_fraction;
        if !(diameter.is_finite() && diameter > 0.0) {
            return Err(TerrainError::InvalidParameter(format!(
                "bump diameter fraction {} gives no usable diameter",
                config.diameter_fraction
            )));
        }
        if !(config.padding.is_finite() && config.padding >= 0.0) {
            return Err(TerrainError::InvalidParameter(format!(
                "bump padding {} must be non-negative",
                config.padding
            )));
        }
        if config.falloff_divisor == 0.0 || !config.falloff_divisor.is_finite() {
            return Err(TerrainError::InvalidParameter(format!(
                "bump falloff divisor {} must be finite and non-zero",
                config.falloff_divisor
            )));
        }

        Ok(Self {
            grid,
            config,
            diameter,
            centers,
            stats: BumpStats::default(),
        })
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn centers(&self) -> &[usize] {
        &self.centers
    }

    pub fn stats(&self) -> BumpStats {
        self.stats
    }

    // Rows and columns sampled on each side of a centre. The padding lets
    // the falloff reach past half the nominal diameter.
    pub fn reach(&self) -> usize {
        (self.diameter / 2.0 + self.config.padding).floor() as usize
    }

    // A bump is only stamped if its whole bounding box lies inside the grid
    pub fn accepts(&self, center: usize) -> bool {
        let dimension = self.grid.dimension();
        let (row, column) = self.grid.position(center);
        let reach = self.reach();
        center < self.grid.len()
            && row >= reach
            && column >= reach
            && row + reach < dimension
            && column + reach < dimension
    }

    // Raise the cells around `center`. Returns false if the bump was skipped.
    pub fn stamp(&mut self, center: usize) -> Result<bool> {
        if !self.accepts(center) {
            trace!("skipping bump at offset {}: too close to an edge", center);
            return Ok(false);
        }

        let (center_row, center_col) = self.grid.position(center);
        let reach = self.reach();
        for row in center_row - reach..=center_row + reach {
            for column in center_col - reach..=center_col + reach {
                let dy = row as f64 - center_row as f64;
                let dx = column as f64 - center_col as f64;
                let distance = (dy * dy + dx * dx).sqrt();
                if distance <= self.diameter {
                    let angle = (distance / self.diameter) * FRAC_PI_2;
                    let height = angle.cos() / self.config.falloff_divisor;
                    let offset = self.grid.offset_of(row, column);
                    self.grid.raise(offset, height as f32)?;
                }
            }
        }
        Ok(true)
    }
}

impl TerrainGenerator for BumpStampGenerator {
    fn generate(&mut self) -> Result<()> {
        let start = Instant::now();
        debug!(
            "bump stamping: {} bumps of diameter {:.2}, reach {}",
            self.centers.len(),
            self.diameter,
            self.reach()
        );

        let centers = std::mem::take(&mut self.centers);
        let mut stats = BumpStats::default();
        for &center in &centers {
            if self.stamp(center)? {
                stats.stamped += 1;
            } else {
                stats.skipped += 1;
            }
        }
        self.centers = centers;
        self.stats = stats;

        info!(
            "stamped {} bumps, skipped {} near edges in {:?}",
            stats.stamped,
            stats.skipped,
            start.elapsed()
        );
        Ok(())
    }

    fn grid(&self) -> &HeightGrid {
        &self.grid
    }

    fn into_grid(self) -> HeightGrid {
        self.grid
    }
}
