use egui::Color32;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

pub type SharedPalette = Arc<Mutex<ColorPalette>>;

/// The classic tube line colors
pub const TUBE_COLORS: [u32; 16] = [
    0xB36305, 0xE32017, 0xFFD300, 0x00782A, 0x6950A1, 0xF3A9BB, 0xA0A5A9, 0x9B0056,
    0x000000, 0x003688, 0x0098D4, 0x95CDBA, 0x00A4A7, 0xEE7C0E, 0x84B817, 0xE21836,
];

pub fn color_from_hex(hex: u32) -> Color32 {
    let [_, r, g, b] = hex.to_be_bytes();
    Color32::from_rgb(r, g, b)
}

/// How often a palette color has been handed out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorUsage {
    pub color: Color32,
    pub usage_count: u32,
}

/// Hands out the least-used color, breaking ties at random
#[derive(Debug, Clone)]
pub struct ColorPalette {
    colors: Vec<Color32>,
    usage: Vec<u32>,
    rng: StdRng,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::with_rng(Self::tube_colors(), StdRng::from_entropy())
    }
}

impl ColorPalette {
    /// Palette with a fixed seed, for reproducible tie-breaks
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(Self::tube_colors(), StdRng::seed_from_u64(seed))
    }

    /// Custom palette. An empty list falls back to the tube colors.
    pub fn with_colors(colors: Vec<Color32>, seed: u64) -> Self {
        let colors = if colors.is_empty() { Self::tube_colors() } else { colors };
        Self::with_rng(colors, StdRng::seed_from_u64(seed))
    }

    fn with_rng(colors: Vec<Color32>, rng: StdRng) -> Self {
        let usage = vec![0; colors.len()];
        Self { colors, usage, rng }
    }

    fn tube_colors() -> Vec<Color32> {
        TUBE_COLORS.iter().copied().map(color_from_hex).collect()
    }

    pub fn into_shared(self) -> SharedPalette {
        Arc::new(Mutex::new(self))
    }

    pub fn next_color(&mut self) -> Color32 {
        let min_usage = self.usage.iter().copied().min().unwrap_or(0);
        let least_used: Vec<usize> = self
            .usage
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count == min_usage)
            .map(|(index, _)| index)
            .collect();

        let index = least_used[self.rng.gen_range(0..least_used.len())];
        self.usage[index] += 1;
        self.colors[index]
    }

    pub fn usage_stats(&self) -> Vec<ColorUsage> {
        self.colors
            .iter()
            .zip(&self.usage)
            .map(|(&color, &usage_count)| ColorUsage { color, usage_count })
            .collect()
    }

    pub fn reset_usage(&mut self) {
        self.usage.iter_mut().for_each(|count| *count = 0);
    }

    pub fn colors(&self) -> &[Color32] {
        &self.colors
    }
}
