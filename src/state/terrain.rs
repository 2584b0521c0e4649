//! Procedural terrain: pure functions from tile coordinate (and seed) to a terrain class and a
//! colour jitter. Results depend only on their inputs, so they are stable across frames and
//! across restarts.

use std::hash::Hasher;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::ToPrimitive;

use crate::model::{Rgb, Terrain, TileCoord};

/// The seam the tile cache generates records through.
pub trait TerrainOracle {
    fn classify(&self, coord: &TileCoord) -> Terrain;
    /// Per-channel colour offset in `[-seed, seed]`.
    fn jitter(&self, coord: &TileCoord, seed: u32) -> i32;
}

/// A deterministic FNV-1a 64-bit hasher.
#[derive(Debug)]
pub struct FnvHasher {
    state: u64,
}

impl FnvHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    pub fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Default for FnvHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        // FNV alone mixes the high bits poorly for short inputs.
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= byte as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

fn hash_cell(x: &BigInt, y: &BigInt, salt: u64) -> u64 {
    let mut hasher = FnvHasher::new();
    hasher.write(&salt.to_le_bytes());
    let xb = x.to_signed_bytes_le();
    hasher.write(&(xb.len() as u32).to_le_bytes());
    hasher.write(&xb);
    hasher.write(&y.to_signed_bytes_le());
    hasher.finish()
}

fn unit(hash: u64) -> f64 {
    (hash >> 11) as f64 / (1u64 << 53) as f64
}

/// Deterministic per-coordinate integer in `[-seed, seed]`.
pub fn quick_hash(coord: &TileCoord, seed: u32) -> i32 {
    if seed == 0 {
        return 0;
    }
    let span = 2 * seed as u64 + 1;
    let h = hash_cell(&coord.x, &coord.y, 0x51_7c_c1_b7 ^ seed as u64);
    ((h % span) as i64 - seed as i64) as i32
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Bilinear value noise in `[0, 1)` on a lattice of `scale`-tile cells.
fn value_noise(coord: &TileCoord, scale: u32, salt: u64) -> f64 {
    let scale_big = BigInt::from(scale);
    let (cx, ox) = coord.x.div_mod_floor(&scale_big);
    let (cy, oy) = coord.y.div_mod_floor(&scale_big);
    let tx = smoothstep(ox.to_f64().unwrap_or(0.0) / scale as f64);
    let ty = smoothstep(oy.to_f64().unwrap_or(0.0) / scale as f64);
    let cx1 = &cx + 1;
    let cy1 = &cy + 1;
    let c00 = unit(hash_cell(&cx, &cy, salt));
    let c10 = unit(hash_cell(&cx1, &cy, salt));
    let c01 = unit(hash_cell(&cx, &cy1, salt));
    let c11 = unit(hash_cell(&cx1, &cy1, salt));
    let top = c00 + (c10 - c00) * tx;
    let bottom = c01 + (c11 - c01) * tx;
    top + (bottom - top) * ty
}

/// Two octaves of value noise thresholded into terrain bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseTerrain {
    pub scale: u32,
}

impl Default for NoiseTerrain {
    fn default() -> Self {
        Self { scale: 24 }
    }
}

impl NoiseTerrain {
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(2),
        }
    }

    pub fn elevation(&self, coord: &TileCoord) -> f64 {
        let detail_scale = (self.scale / 4).max(1);
        let broad = value_noise(coord, self.scale, 0x7e_44_a1);
        let detail = value_noise(coord, detail_scale, 0x19_d3_0f);
        broad * 0.75 + detail * 0.25
    }
}

impl TerrainOracle for NoiseTerrain {
    fn classify(&self, coord: &TileCoord) -> Terrain {
        match self.elevation(coord) {
            e if e < 0.38 => Terrain::Water,
            e if e < 0.43 => Terrain::Sand,
            e if e < 0.58 => Terrain::Grass,
            e if e < 0.68 => Terrain::Forest,
            e if e < 0.76 => Terrain::Hill,
            e if e < 0.84 => Terrain::Mountain,
            _ => Terrain::Snow,
        }
    }

    fn jitter(&self, coord: &TileCoord, seed: u32) -> i32 {
        quick_hash(coord, seed)
    }
}

pub fn base_colour(terrain: Terrain) -> Rgb {
    match terrain {
        Terrain::Water => Rgb::new(38, 92, 178),
        Terrain::Sand => Rgb::new(222, 204, 140),
        Terrain::Grass => Rgb::new(86, 170, 72),
        Terrain::Forest => Rgb::new(34, 110, 50),
        Terrain::Hill => Rgb::new(132, 140, 84),
        Terrain::Mountain => Rgb::new(120, 112, 108),
        Terrain::Snow => Rgb::new(236, 240, 246),
    }
}
