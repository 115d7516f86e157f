// Configuration for every terrain generator.

use serde::{Deserialize, Serialize};

// Where the particle walk begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartLocation {
    // Offset `(N*N)/2`.
    #[default]
    Center,
    // A uniformly random offset.
    Random,
}

// Particle deposition, plain and roll-down.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub start: StartLocation,
    // Number of particles deposited.
    pub iterations: usize,
    // Height added per particle.
    pub particle_size: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            start: StartLocation::Center,
            iterations: 100_000,
            particle_size: 0.01,
        }
    }
}

// Fault displacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FaultConfig {
    // Number of random chords cut across the grid.
    pub fault_count: usize,
    // Height added to the raised side of each fault.
    pub step_height: f32,
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            fault_count: 300,
            step_height: 0.004,
        }
    }
}

// Cosine bump stamping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BumpConfig {
    pub bump_count: usize,
    // Bump diameter as a fraction of the grid dimension.
    pub diameter_fraction: f64,
    // Extra cells sampled around each bump past half its diameter.
    pub padding: f64,
    // Peak height of a bump is `1 / falloff_divisor`.
    pub falloff_divisor: f64,
}

impl Default for BumpConfig {
    fn default() -> Self {
        Self {
            bump_count: 1000,
            diameter_fraction: 0.05,
            padding: 15.0,
            falloff_divisor: 35.0,
        }
    }
}

// Square-diamond midpoint displacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SquareDiamondConfig {
    // Noise scale at the top level, halved at every level below.
    pub roughness: f32,
    // Standard deviation of the zero-mean Gaussian noise.
    pub noise_std_dev: f32,
}

impl Default for SquareDiamondConfig {
    fn default() -> Self {
        Self {
            roughness: 0.2,
            noise_std_dev: 0.7,
        }
    }
}

// Settings for all generators, as loaded from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub particle: ParticleConfig,
    pub fault: FaultConfig,
    pub bump: BumpConfig,
    pub square_diamond: SquareDiamondConfig,
}
