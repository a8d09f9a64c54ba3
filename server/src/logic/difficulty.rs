use std::fmt;

/// Board dimensions and mine count for one difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultySettings {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parses a difficulty label. Anything unrecognised falls back to [`Difficulty::Easy`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "medium" => Self::Medium,
            "hard" => Self::Hard,
            _ => Self::Easy,
        }
    }

    pub const fn settings(self) -> DifficultySettings {
        match self {
            Self::Easy => DifficultySettings {
                rows: 8,
                cols: 8,
                mines: 10,
            },
            Self::Medium => DifficultySettings {
                rows: 16,
                cols: 16,
                mines: 40,
            },
            Self::Hard => DifficultySettings {
                rows: 16,
                cols: 30,
                mines: 99,
            },
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolves a difficulty label straight to `(rows, cols, mines)`.
pub fn resolve(label: &str) -> (usize, usize, usize) {
    let settings = Difficulty::from_label(label).settings();
    (settings.rows, settings.cols, settings.mines)
}
