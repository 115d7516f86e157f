use std::path::Path;

use image::{GrayImage, ImageResult, Luma, RgbImage};
use serde::{Deserialize, Serialize};

use crate::grid::HeightGrid;

const GAMMA_CORRECTION: f32 = 1.2;
const WATER_THRESHOLD: f32 = 0.3;
const SAND_THRESHOLD: f32 = 0.4;
const GRASS_THRESHOLD: f32 = 0.6;
const ROCK_THRESHOLD: f32 = 0.8;

// 2D height map: row‐major Vec<Vec<f32>> of size N×N
// access as `map[row][column]`.
pub type HeightMap2D = Vec<Vec<f32>>;

// How heights are turned into pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    #[default]
    Gray,
    // water, sand, grass, rock and snow bands
    Terrain,
}

// Linearly interpolate between two RGB triples
fn lerp_color(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t) as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t) as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t) as u8,
    ]
}

// Map a height in [0.0,1.0] to a terrain color
fn height_to_rgb(h: f32) -> [u8; 3] {
    match h {
        x if x < WATER_THRESHOLD => {
            let t = x / WATER_THRESHOLD;
            lerp_color([0, 0, 128], [0, 128, 255], t) // deep to shallow water
        }
        x if x < SAND_THRESHOLD => {
            let t = (x - WATER_THRESHOLD) / (SAND_THRESHOLD - WATER_THRESHOLD);
            lerp_color([194, 178, 128], [220, 200, 160], t) // sand
        }
        x if x < GRASS_THRESHOLD => {
            let t = (x - SAND_THRESHOLD) / (GRASS_THRESHOLD - SAND_THRESHOLD);
            lerp_color([34, 139, 34], [50, 205, 50], t) // grass
        }
        x if x < ROCK_THRESHOLD => {
            let t = (x - GRASS_THRESHOLD) / (ROCK_THRESHOLD - GRASS_THRESHOLD);
            lerp_color([128, 128, 128], [192, 192, 192], t) // rock
        }
        x => {
            let t = ((x - ROCK_THRESHOLD) / (1.0 - ROCK_THRESHOLD)).min(1.0);
            lerp_color([220, 220, 220], [255, 255, 255], t) // snow
        }
    }
}

// Min-max normalize heights into [0, 1]. A flat grid maps to 0.
pub fn normalize(flat: &[f32]) -> Vec<f32> {
    let (min, max) = flat
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &h| (lo.min(h), hi.max(h)));
    let range = max - min;
    if !(range > f32::EPSILON) {
        return vec![0.0; flat.len()];
    }
    flat.iter().map(|&h| (h - min) / range).collect()
}

// Convert normalized heights into an RGB byte buffer
pub fn to_terrain_image(flat: &[f32]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(flat.len() * 3);
    for &h in flat {
        // Gamma curve for contrast boost
        let [r, g, b] = height_to_rgb(h.powf(GAMMA_CORRECTION));
        buf.extend_from_slice(&[r, g, b]);
    }
    buf
}

// Grayscale image, lowest cell black and highest white
pub fn to_gray_image(grid: &HeightGrid) -> GrayImage {
    let size = grid.dimension() as u32;
    let norm = normalize(grid.as_slice());
    GrayImage::from_fn(size, size, |x, y| {
        let h = norm[(y * size + x) as usize];
        Luma([(h * 255.0).round() as u8])
    })
}

pub fn to_color_image(grid: &HeightGrid) -> RgbImage {
    let size = grid.dimension() as u32;
    let rgb = to_terrain_image(&normalize(grid.as_slice()));
    RgbImage::from_fn(size, size, |x, y| {
        let i = (y * size + x) as usize * 3;
        image::Rgb([rgb[i], rgb[i + 1], rgb[i + 2]])
    })
}

// Save the grid as a PNG, one pixel per cell
pub fn save_png(grid: &HeightGrid, path: impl AsRef<Path>, mode: ColorMode) -> ImageResult<()> {
    match mode {
        ColorMode::Gray => to_gray_image(grid).save(path),
        ColorMode::Terrain => to_color_image(grid).save(path),
    }
}

// Row-major little-endian f32 heights
pub fn to_le_bytes(grid: &HeightGrid) -> Vec<u8> {
    grid.as_slice().iter().flat_map(|h| h.to_le_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utils_normalize_range() {
        let norm = normalize(&[2.0, 4.0, 3.0, 6.0]);
        assert_eq!(norm, vec![0.0, 0.5, 0.25, 1.0]);
    }

    #[test]
    fn utils_normalize_flat() {
        assert_eq!(normalize(&[1.5; 4]), vec![0.0; 4]);
    }

    #[test]
    fn utils_gray_image_extremes() {
        let mut grid = HeightGrid::new(3).unwrap();
        grid.set(1, 2, 4.0).unwrap();
        grid.set(0, 0, -1.0).unwrap();
        let img = to_gray_image(&grid);
        assert_eq!(img.dimensions(), (3, 3));
        // x is the column, y the row
        assert_eq!(img.get_pixel(2, 1)[0], 255);
        assert_eq!(img.get_pixel(0, 0)[0], 0);
        assert_eq!(img.get_pixel(1, 1)[0], 51);
    }

    #[test]
    fn utils_terrain_colors() {
        let rgb = to_terrain_image(&[0.0, 1.0]);
        assert_eq!(rgb.len(), 6);
        assert_eq!(&rgb[0..3], &[0, 0, 128]);
        assert_eq!(&rgb[3..6], &[255, 255, 255]);
    }

    #[test]
    fn utils_raw_bytes() {
        let mut grid = HeightGrid::new(3).unwrap();
        grid.set_offset(8, 1.0).unwrap();
        let bytes = to_le_bytes(&grid);
        assert_eq!(bytes.len(), 9 * 4);
        assert_eq!(&bytes[32..36], &1.0f32.to_le_bytes());
    }
}
