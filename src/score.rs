use std::fs;
use std::path::PathBuf;

use log::{error, info};

/// Longest final snake across runs, kept in a small text file.
pub struct BestLength {
    path: PathBuf,
    best: usize,
}

impl BestLength {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = match fs::read_to_string(&path).map(|s| s.trim().parse().unwrap_or(0)) {
            Ok(best) => best,
            Err(e) => {
                error!("Error loading best length from {}: {}", path.display(), e);
                0
            }
        };
        BestLength { path, best }
    }

    fn save(&self) {
        if let Err(e) = fs::write(&self.path, self.best.to_string()) {
            error!("Error saving best length: {}", e);
        }
    }

    /// Records a finished game's length, returning whether it set a new best.
    pub fn record(&mut self, length: usize) -> bool {
        if length > self.best {
            info!("New best length {} (was {})", length, self.best);
            self.best = length;
            self.save();
            true
        } else {
            false
        }
    }

    pub fn get(&self) -> usize {
        self.best
    }
}
