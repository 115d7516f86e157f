// Generates and saves one 257×257 grayscale image per terrain generator

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terrain_core::{ColorMode, TerrainConfig, TerrainKind, generate_terrain, save_png};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let size = 257;
    let config = TerrainConfig::default();

    for kind in TerrainKind::ALL {
        let rng = ChaCha8Rng::seed_from_u64(42);
        let grid = generate_terrain(kind, size, &config, rng)?;
        let filename = format!("terrain_{}.png", kind.name());
        save_png(&grid, &filename, ColorMode::Gray)?;
        println!("Saved {}", filename);
    }
    Ok(())
}
