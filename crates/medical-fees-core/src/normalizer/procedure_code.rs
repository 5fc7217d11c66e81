//! Procedure code mask and validation.
//!
//! Canonical shape: `NN.NN.NN.NNN-N` (10 digits, leading `0`).

use thiserror::Error;

use super::fields::digits_only;

/// Number of digits in a complete procedure code.
pub const PROCEDURE_CODE_DIGITS: usize = 10;

/// Reasons a procedure code is rejected before calculation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("O código deve ter exatamente 10 dígitos")]
    InvalidLength { digits: usize },

    #[error("O código deve começar com 0")]
    InvalidPrefix,
}

/// Apply the procedure code mask to whatever has been typed so far.
///
/// Non-digits are dropped and input is truncated to 10 digits. Separators
/// appear only once a digit follows them, so partial input yields a partial
/// mask (`"012"` → `"01.2"`).
pub fn format_procedure_code(raw: &str) -> String {
    let mut masked = String::with_capacity(PROCEDURE_CODE_DIGITS + 4);
    for (i, digit) in digits_only(raw)
        .chars()
        .take(PROCEDURE_CODE_DIGITS)
        .enumerate()
    {
        match i {
            2 | 4 | 6 => masked.push('.'),
            9 => masked.push('-'),
            _ => {}
        }
        masked.push(digit);
    }
    masked
}

/// Validate a (masked or bare) procedure code.
pub fn validate_procedure_code(masked: &str) -> Result<(), ValidationError> {
    let digits = digits_only(masked);
    if digits.len() != PROCEDURE_CODE_DIGITS {
        return Err(ValidationError::InvalidLength {
            digits: digits.len(),
        });
    }
    if !digits.starts_with('0') {
        return Err(ValidationError::InvalidPrefix);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_progressive_mask() {
        assert_eq!(format_procedure_code(""), "");
        assert_eq!(format_procedure_code("0"), "0");
        assert_eq!(format_procedure_code("04"), "04");
        assert_eq!(format_procedure_code("040"), "04.0");
        assert_eq!(format_procedure_code("04080"), "04.08.0");
        assert_eq!(format_procedure_code("0408010"), "04.08.01.0");
        assert_eq!(format_procedure_code("040801005"), "04.08.01.005");
        assert_eq!(format_procedure_code("0408010055"), "04.08.01.005-5");
    }

    #[test]
    fn test_format_strips_and_truncates() {
        assert_eq!(format_procedure_code("04-08 01/005.5"), "04.08.01.005-5");
        assert_eq!(format_procedure_code("040801005599"), "04.08.01.005-5");
        assert_eq!(format_procedure_code("abc"), "");
    }

    #[test]
    fn test_format_idempotent_on_full_code() {
        let once = format_procedure_code("0408010055");
        assert_eq!(format_procedure_code(&once), once);
    }

    #[test]
    fn test_validate_accepts_masked_and_bare() {
        assert_eq!(validate_procedure_code("04.08.01.005-5"), Ok(()));
        assert_eq!(validate_procedure_code("0408010055"), Ok(()));
    }

    #[test]
    fn test_validate_length() {
        assert_eq!(
            validate_procedure_code("04.08.01.005"),
            Err(ValidationError::InvalidLength { digits: 9 })
        );
        assert_eq!(
            validate_procedure_code(""),
            Err(ValidationError::InvalidLength { digits: 0 })
        );
        assert_eq!(
            validate_procedure_code("04080100551"),
            Err(ValidationError::InvalidLength { digits: 11 })
        );
    }

    #[test]
    fn test_validate_prefix() {
        assert_eq!(
            validate_procedure_code("14.08.01.005-5"),
            Err(ValidationError::InvalidPrefix)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::InvalidLength { digits: 3 }.to_string(),
            "O código deve ter exatamente 10 dígitos"
        );
        assert_eq!(
            ValidationError::InvalidPrefix.to_string(),
            "O código deve começar com 0"
        );
    }
}
