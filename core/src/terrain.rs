// The closed set of terrain generators behind one type.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::TerrainGenerator;
use crate::bump::BumpStampGenerator;
use crate::config::TerrainConfig;
use crate::error::Result;
use crate::fault::StepFaultGenerator;
use crate::grid::HeightGrid;
use crate::particle::ParticleDepositionGenerator;
use crate::roll_down::RollDownParticleDepositionGenerator;
use crate::square_diamond::SquareDiamondGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    #[serde(rename = "particle")]
    ParticleDeposition,
    #[serde(rename = "roll-down")]
    RollDown,
    #[serde(rename = "step-fault")]
    StepFault,
    #[serde(rename = "bump")]
    Bump,
    #[serde(rename = "square-diamond")]
    SquareDiamond,
}

impl TerrainKind {
    pub const ALL: [TerrainKind; 5] = [
        TerrainKind::ParticleDeposition,
        TerrainKind::RollDown,
        TerrainKind::StepFault,
        TerrainKind::Bump,
        TerrainKind::SquareDiamond,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TerrainKind::ParticleDeposition => "particle",
            TerrainKind::RollDown => "roll-down",
            TerrainKind::StepFault => "step-fault",
            TerrainKind::Bump => "bump",
            TerrainKind::SquareDiamond => "square-diamond",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TerrainKind::ParticleDeposition => "particles dropped along a wrapping random walk",
            TerrainKind::RollDown => "particle deposition with a one-step downhill roll",
            TerrainKind::StepFault => "random fault lines that raise one side by a fixed step",
            TerrainKind::Bump => "cosine bumps stamped at random centres",
            TerrainKind::SquareDiamond => "recursive midpoint displacement",
        }
    }
}

impl fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub enum Terrain<R> {
    ParticleDeposition(ParticleDepositionGenerator<R>),
    RollDown(RollDownParticleDepositionGenerator<R>),
    StepFault(StepFaultGenerator),
    Bump(BumpStampGenerator),
    SquareDiamond(SquareDiamondGenerator<R>),
}

impl<R: Rng> Terrain<R> {
    // Build the generator for `kind`, taking its settings from `config`
    pub fn new(kind: TerrainKind, dimension: usize, config: &TerrainConfig, rng: R) -> Result<Self> {
        Ok(match kind {
            TerrainKind::ParticleDeposition => Terrain::ParticleDeposition(
                ParticleDepositionGenerator::new(dimension, config.particle.clone(), rng)?,
            ),
            TerrainKind::RollDown => Terrain::RollDown(RollDownParticleDepositionGenerator::new(
                dimension,
                config.particle.clone(),
                rng,
            )?),
            TerrainKind::StepFault => Terrain::StepFault(StepFaultGenerator::new(
                dimension,
                config.fault.clone(),
                rng,
            )?),
            TerrainKind::Bump => {
                Terrain::Bump(BumpStampGenerator::new(dimension, config.bump.clone(), rng)?)
            }
            TerrainKind::SquareDiamond => Terrain::SquareDiamond(SquareDiamondGenerator::new(
                dimension,
                config.square_diamond.clone(),
                rng,
            )?),
        })
    }

    pub fn kind(&self) -> TerrainKind {
        match self {
            Terrain::ParticleDeposition(_) => TerrainKind::ParticleDeposition,
            Terrain::RollDown(_) => TerrainKind::RollDown,
            Terrain::StepFault(_) => TerrainKind::StepFault,
            Terrain::Bump(_) => TerrainKind::Bump,
            Terrain::SquareDiamond(_) => TerrainKind::SquareDiamond,
        }
    }

    fn as_generator(&self) -> &dyn TerrainGenerator {
        match self {
            Terrain::ParticleDeposition(g) => g,
            Terrain::RollDown(g) => g,
            Terrain::StepFault(g) => g,
            Terrain::Bump(g) => g,
            Terrain::SquareDiamond(g) => g,
        }
    }

    fn as_generator_mut(&mut self) -> &mut dyn TerrainGenerator {
        match self {
            Terrain::ParticleDeposition(g) => g,
            Terrain::RollDown(g) => g,
            Terrain::StepFault(g) => g,
            Terrain::Bump(g) => g,
            Terrain::SquareDiamond(g) => g,
        }
    }
}

impl<R: Rng> TerrainGenerator for Terrain<R> {
    fn generate(&mut self) -> Result<()> {
        self.as_generator_mut().generate()
    }

    fn grid(&self) -> &HeightGrid {
        self.as_generator().grid()
    }

    fn into_grid(self) -> HeightGrid {
        match self {
            Terrain::ParticleDeposition(g) => g.into_grid(),
            Terrain::RollDown(g) => g.into_grid(),
            Terrain::StepFault(g) => g.into_grid(),
            Terrain::Bump(g) => g.into_grid(),
            Terrain::SquareDiamond(g) => g.into_grid(),
        }
    }
}

// Construct, generate once and hand back the finished grid
pub fn generate_terrain<R: Rng>(
    kind: TerrainKind,
    dimension: usize,
    config: &TerrainConfig,
    rng: R,
) -> Result<HeightGrid> {
    let mut terrain = Terrain::new(kind, dimension, config, rng)?;
    terrain.generate()?;
    Ok(terrain.into_grid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TerrainError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn terrain_every_kind_generates() {
        let mut config = TerrainConfig::default();
        config.particle.iterations = 2000;
        config.fault.fault_count = 20;
        config.bump.bump_count = 50;

        for kind in TerrainKind::ALL {
            let rng = ChaCha8Rng::seed_from_u64(2025);
            let mut terrain = Terrain::new(kind, 65, &config, rng).unwrap();
            assert_eq!(terrain.kind(), kind);
            terrain.generate().unwrap();
            assert_eq!(terrain.dimension(), 65);
            let snap = terrain.snapshot();
            assert_eq!(snap.len(), 65 * 65);
            assert!(snap.iter().all(|h| h.is_finite()), "{} produced NaN", kind);
        }
    }

    #[test]
    fn terrain_invalid_dimension() {
        for kind in TerrainKind::ALL {
            let rng = ChaCha8Rng::seed_from_u64(0);
            assert!(matches!(
                Terrain::new(kind, 100, &TerrainConfig::default(), rng),
                Err(TerrainError::InvalidDimension { dimension: 100 })
            ));
        }
    }

    #[test]
    fn terrain_same_seed_same_grid() {
        let mut config = TerrainConfig::default();
        config.particle.iterations = 1000;
        config.fault.fault_count = 10;
        for kind in TerrainKind::ALL {
            let a = generate_terrain(kind, 33, &config, ChaCha8Rng::seed_from_u64(5)).unwrap();
            let b = generate_terrain(kind, 33, &config, ChaCha8Rng::seed_from_u64(5)).unwrap();
            assert_eq!(a, b, "{} is not reproducible", kind);
        }
    }

    #[test]
    fn terrain_kind_names_unique() {
        let names: std::collections::HashSet<_> =
            TerrainKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), TerrainKind::ALL.len());
        assert_eq!(TerrainKind::RollDown.to_string(), "roll-down");
    }

    #[test]
    fn terrain_kind_json_uses_names() {
        for kind in TerrainKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
            let back: TerrainKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }
}
