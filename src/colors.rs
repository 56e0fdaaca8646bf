use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use crate::data_types::Color;

/// Fixed palette, drawn without replacement within one batch.
pub const PALETTE: [&str; 8] = [
    "Yellow", "Olive", "Lime", "Aqua", "Teal", "Blue", "Fuchsia", "Purple",
];

/// Assigns one display color per series label for a single update cycle.
///
/// Palette entries are unique within a batch. Once all eight are used the
/// remaining labels get a random `#rgb` color, and the last label always
/// gets [`Color::HIGHLIGHT`]. The generator is owned and seeded, so the same
/// seed and the same label sequences always produce the same colors.
#[derive(Clone, Debug)]
pub struct ColorAssigner {
    rng: StdRng,
    used: HashSet<usize>,
}

impl ColorAssigner {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            used: HashSet::with_capacity(PALETTE.len()),
        }
    }

    pub fn palette_size(&self) -> usize {
        PALETTE.len()
    }

    /// Colors aligned with `labels`.
    pub fn assign<L: AsRef<str>>(&mut self, labels: &[L]) -> Vec<Color> {
        self.used.clear();

        let mut colors: Vec<Color> = labels.iter().map(|_| self.pick()).collect();
        if let Some(last) = colors.last_mut() {
            *last = Color::HIGHLIGHT;
        }
        colors
    }

    fn pick(&mut self) -> Color {
        if self.used.len() == PALETTE.len() {
            return self.random_color();
        }
        let mut idx = self.rng.random_range(0..PALETTE.len());
        while self.used.contains(&idx) {
            idx = self.rng.random_range(0..PALETTE.len());
        }
        self.used.insert(idx);
        Color::Named(PALETTE[idx])
    }

    fn random_color(&mut self) -> Color {
        let hex: String = (0..3).map(|_| self.rng.random_range('a'..='e')).collect();
        Color::Hex(format!("#{hex}"))
    }
}

impl Default for ColorAssigner {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_COLOR_SEED)
    }
}
