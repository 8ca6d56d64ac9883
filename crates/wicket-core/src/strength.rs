//! Password strength scoring.
//!
//! One point per satisfied class: length of eight or more, a lowercase
//! letter, an uppercase letter, a digit, a non-alphanumeric character.
//! The score only ever feeds the on-screen meter; it is not a gate.

/// Highest possible score.
pub const MAX_SCORE: u8 = 5;

/// Scores a password in 0..=5.
pub fn score(password: &str) -> u8 {
    let mut score = 0;
    if password.chars().count() >= 8 {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 1;
    }
    score
}

/// Meter tier derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthTier {
    Weak,
    Medium,
    Strong,
}

impl StrengthTier {
    /// Maps a score to its tier: 4+ strong, 3 medium, below that weak.
    pub fn for_score(score: u8) -> Self {
        if score >= 4 {
            StrengthTier::Strong
        } else if score >= 3 {
            StrengthTier::Medium
        } else {
            StrengthTier::Weak
        }
    }

    /// Returns the label shown beside the meter.
    pub fn label(self) -> &'static str {
        match self {
            StrengthTier::Weak => "Weak",
            StrengthTier::Medium => "Medium",
            StrengthTier::Strong => "Strong",
        }
    }
}
