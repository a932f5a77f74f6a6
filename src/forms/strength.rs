//! Password strength meter.
//!
//! One point each for a length of at least 8, a lowercase letter, an
//! uppercase letter, a digit and a symbol. The score maps onto six levels.

/// Minimum length that earns the length point.
const STRONG_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Fair,
    Strong,
    VeryStrong,
    Excellent,
}

impl StrengthLevel {
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            0 => Self::VeryWeak,
            1 => Self::Weak,
            2 => Self::Fair,
            3 => Self::Strong,
            4 => Self::VeryStrong,
            _ => Self::Excellent,
        }
    }

    /// Filled segments of the meter, `0..=5`.
    #[must_use]
    pub const fn score(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::VeryWeak => "strength_very_weak",
            Self::Weak => "strength_weak",
            Self::Fair => "strength_fair",
            Self::Strong => "strength_strong",
            Self::VeryStrong => "strength_very_strong",
            Self::Excellent => "strength_excellent",
        }
    }
}

/// Scores `password` from 0 to 5.
///
/// ```rust
/// use companyplus::forms::strength_score;
///
/// assert_eq!(strength_score(""), 0);
/// assert_eq!(strength_score("Secreto-2024"), 5);
/// ```
#[must_use]
pub fn strength_score(password: &str) -> u8 {
    let checks = [
        password.chars().count() >= STRONG_LENGTH,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    checks.iter().map(|&hit| u8::from(hit)).sum()
}

#[must_use]
pub fn password_strength(password: &str) -> StrengthLevel {
    StrengthLevel::from_score(strength_score(password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_criterion_adds_one_point() {
        assert_eq!(strength_score(""), 0);
        assert_eq!(strength_score("abc"), 1);
        assert_eq!(strength_score("abcABC"), 2);
        assert_eq!(strength_score("abcABC1"), 3);
        assert_eq!(strength_score("abcABC12"), 4);
        assert_eq!(strength_score("abcABC1!"), 5);
    }

    #[test]
    fn length_alone_counts() {
        assert_eq!(strength_score("        "), 2);
        assert_eq!(strength_score("12345678"), 2);
    }

    #[test]
    fn non_ascii_letters_count_as_symbols() {
        assert_eq!(strength_score("ñ"), 1);
    }

    #[test]
    fn levels_follow_the_score() {
        assert_eq!(password_strength(""), StrengthLevel::VeryWeak);
        assert_eq!(password_strength("abc"), StrengthLevel::Weak);
        assert_eq!(password_strength("abcABC"), StrengthLevel::Fair);
        assert_eq!(password_strength("abcABC1"), StrengthLevel::Strong);
        assert_eq!(password_strength("abcABC12"), StrengthLevel::VeryStrong);
        assert_eq!(password_strength("abcABC1!"), StrengthLevel::Excellent);
        assert_eq!(StrengthLevel::Excellent.score(), 5);
        assert_eq!(StrengthLevel::from_score(9), StrengthLevel::Excellent);
    }
}
