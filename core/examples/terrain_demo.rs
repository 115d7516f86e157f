use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terrain_core::{SquareDiamondConfig, SquareDiamondGenerator, TerrainGenerator};

fn main() -> terrain_core::Result<()> {
    // 129×129 square-diamond terrain with seed 2025
    let rng = ChaCha8Rng::seed_from_u64(2025);
    let mut terrain = SquareDiamondGenerator::new(129, SquareDiamondConfig::default(), rng)?;
    terrain.generate()?;
    let grid = terrain.grid();

    // Print the top-left 16×16 corner of the map
    for row in 0..16 {
        for column in 0..16 {
            print!("{:>6.3} ", grid.get(row, column)?);
        }
        println!();
    }
    Ok(())
}
