//! Advisory password strength meter.
//!
//! The score never blocks a submission; the only enforced rule is
//! [`PASSWORD_MIN_LENGTH`], checked by the password change flow.

use std::fmt;

use serde::Serialize;

/// Minimum accepted length for a new password.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Four-level label shown next to the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StrengthLabel {
    /// Score of 0 or 1.
    Weak,
    /// Score of 2.
    Fair,
    /// Score of 3.
    Good,
    /// Score of 4.
    Strong,
}

impl StrengthLabel {
    /// Display text.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Strong => "Strong",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of scoring a candidate password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    score: u8,
}

impl PasswordStrength {
    /// Score `password` by summing four independent checks: length, an
    /// uppercase letter, a digit, and a character that is not an ASCII
    /// letter or digit.
    ///
    /// # Examples
    ///
    /// ```
    /// use dashboard::domain::{PasswordStrength, StrengthLabel};
    ///
    /// let strength = PasswordStrength::evaluate("Tr0ub4dor&3");
    /// assert_eq!(strength.score(), 4);
    /// assert_eq!(strength.label(), StrengthLabel::Strong);
    /// ```
    #[must_use]
    pub fn evaluate(password: &str) -> Self {
        let checks = [
            password.chars().count() >= PASSWORD_MIN_LENGTH,
            password.chars().any(|c| c.is_ascii_uppercase()),
            password.chars().any(|c| c.is_ascii_digit()),
            password.chars().any(|c| !c.is_ascii_alphanumeric()),
        ];
        let score = checks.iter().fold(0_u8, |acc, passed| acc + u8::from(*passed));
        Self { score }
    }

    /// Number of satisfied checks, 0 to 4.
    #[must_use]
    pub const fn score(&self) -> u8 {
        self.score
    }

    /// Label for the score.
    #[must_use]
    pub const fn label(&self) -> StrengthLabel {
        match self.score {
            0 | 1 => StrengthLabel::Weak,
            2 => StrengthLabel::Fair,
            3 => StrengthLabel::Good,
            _ => StrengthLabel::Strong,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty("", 0, StrengthLabel::Weak)]
    #[case::lower_short("abc", 0, StrengthLabel::Weak)]
    #[case::long_lower("abcdefgh", 1, StrengthLabel::Weak)]
    #[case::long_upper("Abcdefgh", 2, StrengthLabel::Fair)]
    #[case::long_upper_digit("Abcdefg1", 3, StrengthLabel::Good)]
    #[case::all_checks("Abcdef1!", 4, StrengthLabel::Strong)]
    #[case::short_but_varied("A1!", 3, StrengthLabel::Good)]
    #[case::space_counts_as_symbol("abc def", 1, StrengthLabel::Weak)]
    fn scores_and_labels(#[case] password: &str, #[case] score: u8, #[case] label: StrengthLabel) {
        let strength = PasswordStrength::evaluate(password);
        assert_eq!(strength.score(), score);
        assert_eq!(strength.label(), label);
    }

    #[rstest]
    fn length_counts_characters_not_bytes() {
        let strength = PasswordStrength::evaluate("ééééééé");
        // seven characters, each non-alphanumeric in ASCII terms
        assert_eq!(strength.score(), 1);
    }
}
