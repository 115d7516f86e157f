use image::{Rgb, RgbImage};
use palette::{Gradient, LinSrgb};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use terrain_core::{
    HeightGrid, HeightMap2D, SquareDiamondConfig, SquareDiamondGenerator, TerrainGenerator,
    normalize,
};

// Compute simple hillshade for a height-map
// `z_scale` adjusts vertical exaggeration
fn hillshade(map: &HeightMap2D, z_scale: f32) -> Vec<Vec<f32>> {
    let h = map.len();
    let w = map[0].len();
    let mut shade = vec![vec![0.0; w]; h];
    let azimuth = std::f32::consts::PI / 4.0; // 45°
    let altitude = std::f32::consts::PI / 4.0; // 45°
    let (sin_alt, cos_alt) = altitude.sin_cos();

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            // 3×3 neighborhood finite differences
            let dzdx = ((map[y][x + 1] - map[y][x - 1]) / 2.0) * z_scale;
            let dzdy = ((map[y + 1][x] - map[y - 1][x]) / 2.0) * z_scale;
            let (nx, ny, nz) = (-dzdx, -dzdy, 1.0);
            let len = (nx * nx + ny * ny + nz * nz).sqrt();
            let lx = azimuth.cos() * cos_alt;
            let ly = azimuth.sin() * cos_alt;
            let lz = sin_alt;
            // Lambertian dot
            shade[y][x] = ((nx * lx + ny * ly + nz * lz) / len).max(0.0);
        }
    }
    shade
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let size = 513; // 2^9 + 1
    let config = SquareDiamondConfig {
        roughness: 0.6,
        ..SquareDiamondConfig::default()
    };
    let mut terrain = SquareDiamondGenerator::new(size, config, ChaCha8Rng::seed_from_u64(2025))?;
    terrain.generate()?;
    let grid: HeightGrid = terrain.into_grid();

    // Heights are tiny next to the cell spacing, so exaggerate the relief
    let shade = hillshade(&grid.to_rows(), 200.0);
    let norm = normalize(grid.as_slice());

    // deep water to beach to grass to rock to snow
    let gradient = Gradient::with_domain(vec![
        (0.00, LinSrgb::new(0.0, 0.0, 0.5)),
        (0.30, LinSrgb::new(0.8, 0.8, 0.5)),
        (0.50, LinSrgb::new(0.1, 0.6, 0.2)),
        (0.75, LinSrgb::new(0.5, 0.4, 0.3)),
        (1.00, LinSrgb::new(1.0, 1.0, 1.0)),
    ]);

    let mut img = RgbImage::new(size as u32, size as u32);
    for y in 0..size {
        for x in 0..size {
            let col: LinSrgb = gradient.get(norm[y * size + x]);
            let rgb = col.into_format::<u8>();
            let light = (shade[y][x] * 0.5 + 0.5).clamp(0.0, 1.0);
            img.put_pixel(
                x as u32,
                y as u32,
                Rgb([
                    (rgb.red as f32 * light) as u8,
                    (rgb.green as f32 * light) as u8,
                    (rgb.blue as f32 * light) as u8,
                ]),
            );
        }
    }

    let path = Path::new("terrain_final.png");
    img.save(path)?;
    println!("Saved final terrain image to {:?}", path);
    Ok(())
}
