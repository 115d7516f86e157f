use std::time::Instant;

use log::debug;
use rand::Rng;

use crate::TerrainGenerator;
use crate::config::ParticleConfig;
use crate::error::Result;
use crate::grid::HeightGrid;
use crate::walk::{RandomWalk, neighbors};

// Particle deposition where each particle may roll one cell downhill.
// The walk itself is unchanged: it continues from where the particle
// landed, not from where it rolled to.
pub struct RollDownParticleDepositionGenerator<R> {
    grid: HeightGrid,
    config: ParticleConfig,
    rng: R,
}

impl<R: Rng> RollDownParticleDepositionGenerator<R> {
    pub fn new(dimension: usize, config: ParticleConfig, rng: R) -> Result<Self> {
        Ok(Self {
            grid: HeightGrid::new(dimension)?,
            config,
            rng,
        })
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }
}

// First neighbour (right, left, up, down) strictly lower than `offset`,
// or `offset` itself when none is. A single step, no cascading.
pub fn roll_down_target(grid: &HeightGrid, offset: usize) -> Result<usize> {
    let here = grid.get_offset(offset)?;
    for neighbor in neighbors(grid.dimension(), offset) {
        if grid.get_offset(neighbor)? < here {
            return Ok(neighbor);
        }
    }
    Ok(offset)
}

impl<R: Rng> TerrainGenerator for RollDownParticleDepositionGenerator<R> {
    fn generate(&mut self) -> Result<()> {
        let start = Instant::now();
        let mut walk = RandomWalk::seeded(&self.grid, self.config.start, &mut self.rng);
        debug!(
            "roll-down deposition: {} particles from offset {} on {}x{}",
            self.config.iterations,
            walk.current(),
            self.grid.dimension(),
            self.grid.dimension()
        );

        let mut rolled = 0usize;
        for _ in 0..self.config.iterations {
            let next = walk.step(&mut self.rng);
            let target = roll_down_target(&self.grid, next)?;
            if target != next {
                rolled += 1;
            }
            self.grid.raise(target, self.config.particle_size)?;
        }

        debug!(
            "roll-down deposition finished in {:?}, {} particles rolled",
            start.elapsed(),
            rolled
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
