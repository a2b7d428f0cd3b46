//! Configuration types for maze geometry and automaton settings.

use serde::{Deserialize, Serialize};

fn default_width() -> usize {
    32
}
fn default_height() -> usize {
    32
}
fn default_iterations() -> usize {
    50
}

/// Geometry and automaton settings shared by every generated maze.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeConfig {
    /// Grid width in cells.
    #[serde(default = "default_width")]
    pub width: usize,
    /// Grid height in cells.
    #[serde(default = "default_height")]
    pub height: usize,
    /// Number of synchronous rule iterations applied to the blank grid.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            iterations: default_iterations(),
        }
    }
}

impl MazeConfig {
    /// Start cell, one cell inside the top-left border corner.
    #[inline]
    pub fn start(&self) -> (usize, usize) {
        (1, 1)
    }

    /// End cell, one cell inside the bottom-right border corner.
    #[inline]
    pub fn end(&self) -> (usize, usize) {
        (self.width - 2, self.height - 2)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Start and end must land on distinct interior cells.
        if self.width < 4 || self.height < 4 {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("grid {width}x{height} is too small; start and end need distinct interior cells")]
    GridTooSmall { width: usize, height: usize },
}
