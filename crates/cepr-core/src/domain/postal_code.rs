use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const CEP_LEN: usize = 8;

/// Validated Brazilian postal code: exactly eight ASCII digits.
///
/// Accepts the formatted input form `01153-000` by stripping a single hyphen
/// between the fifth and sixth digit; the stored value is always unformatted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostalCode(String);

impl PostalCode {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyPostalCode);
        }

        let candidate = match trimmed.split_once('-') {
            Some((head, tail)) if head.len() == 5 && tail.len() == 3 => {
                format!("{head}{tail}")
            }
            Some(_) => trimmed.to_owned(),
            None => trimmed.to_owned(),
        };

        if candidate.len() != CEP_LEN {
            return Err(ValidationError::PostalCodeWrongLength {
                value: trimmed.to_owned(),
                len: candidate.len(),
            });
        }

        for (index, ch) in candidate.chars().enumerate() {
            if !ch.is_ascii_digit() {
                return Err(ValidationError::PostalCodeInvalidChar { ch, index });
            }
        }

        Ok(Self(candidate))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PostalCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PostalCode {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_eight_digits() {
        let code = PostalCode::parse("01153000").expect("must parse");
        assert_eq!(code.as_str(), "01153000");
    }

    #[test]
    fn strips_formatting_hyphen() {
        let code = PostalCode::parse("01153-000").expect("must parse");
        assert_eq!(code.as_str(), "01153000");
    }

    #[test]
    fn rejects_empty_input() {
        let err = PostalCode::parse("   ").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyPostalCode));
    }

    #[test]
    fn rejects_wrong_length() {
        let err = PostalCode::parse("0115300").expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::PostalCodeWrongLength { len: 7, .. }
        ));
    }

    #[test]
    fn rejects_non_digit_characters() {
        let err = PostalCode::parse("01153O00").expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::PostalCodeInvalidChar { ch: 'O', index: 5 }
        ));
    }

    #[test]
    fn rejects_misplaced_hyphen() {
        let err = PostalCode::parse("011-53000").expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::PostalCodeWrongLength { len: 9, .. }
        ));
    }
}
