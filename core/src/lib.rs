// core holds the height grid and the terrain generation algorithms
pub mod bump;
pub mod config;
pub mod error;
pub mod fault;
pub mod grid;
pub mod particle;
pub mod roll_down;
pub mod square_diamond;
pub mod terrain;
pub mod utils;
pub mod walk;

pub use bump::{BumpStampGenerator, BumpStats};
pub use config::{
    BumpConfig, FaultConfig, ParticleConfig, SquareDiamondConfig, StartLocation, TerrainConfig,
};
pub use error::{Result, TerrainError};
pub use fault::{FaultAxis, FaultDisplacementGenerator, FaultLine, StepFaultGenerator};
pub use grid::HeightGrid;
pub use particle::ParticleDepositionGenerator;
pub use roll_down::RollDownParticleDepositionGenerator;
pub use square_diamond::SquareDiamondGenerator;
pub use terrain::{Terrain, TerrainKind, generate_terrain};
pub use utils::{ColorMode, HeightMap2D, normalize, save_png, to_le_bytes};

// A generator owns one grid and fills it in a single `generate()` call.
// Generators are single-use: calling `generate()` again keeps adding onto
// the heights already present.
pub trait TerrainGenerator {
    // Run the algorithm over the owned grid.
    fn generate(&mut self) -> Result<()>;

    // Read-only view of the grid.
    fn grid(&self) -> &HeightGrid;

    fn dimension(&self) -> usize {
        self.grid().dimension()
    }

    // Row-major copy of every height, length dimension².
    fn snapshot(&self) -> Vec<f32> {
        self.grid().snapshot()
    }

    fn into_grid(self) -> HeightGrid
    where
        Self: Sized;
}
