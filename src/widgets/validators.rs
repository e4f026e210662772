use regex::Regex;
use std::num::IntErrorKind;
use std::sync::LazyLock;

pub type ValidationError = String;
pub type Validator = Box<dyn Fn(&str) -> Result<(), ValidationError> + Send + Sync>;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern is valid")
});

/// Run a list of validators against `value`, returning the first error.
pub fn run_validators(validators: &[Validator], value: &str) -> Result<(), ValidationError> {
    for validator in validators {
        validator(value)?;
    }
    Ok(())
}

/// Rejects only the empty string; whitespace counts as a value.
pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.is_empty() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn email(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if is_email(value) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

/// Numeric text whose leading integer is not `<= 0`. Numbers without a
/// leading digit run, like `".5"`, have no integer part to reject.
pub fn positive_integer(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if !is_numeric(value) {
            return Err(message.clone());
        }
        match leading_integer(value) {
            Some(n) if n <= 0 => Err(message.clone()),
            _ => Ok(()),
        }
    })
}

pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// True when the trimmed text is a finite decimal number.
pub fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    // f64 parsing also accepts "inf" and "nan" spellings.
    if trimmed
        .chars()
        .any(|ch| ch.is_ascii_alphabetic() && !matches!(ch, 'e' | 'E'))
    {
        return false;
    }
    trimmed.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Integer formed by the leading optionally-signed digit run, e.g. `"12.5"` -> 12.
pub fn leading_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = match digits[..end].parse::<i64>() {
        Ok(n) => n,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => i64::MAX,
        Err(_) => return None,
    };
    Some(magnitude.saturating_mul(sign))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_accepts_whitespace_but_not_empty() {
        let validator = required("Required");
        assert_eq!(validator(""), Err("Required".to_string()));
        assert_eq!(validator(" "), Ok(()));
    }

    #[test]
    fn email_pattern() {
        assert!(is_email("test@example.com"));
        assert!(is_email("first.last+tag@mail.example.org"));
        assert!(!is_email("test@com"));
        assert!(!is_email("not-an-email"));
        assert!(!is_email("a@b.c"));
        assert!(!is_email(""));
    }

    #[test]
    fn positive_integer_rules() {
        let validator = positive_integer("Invalid age");
        for ok in ["1", "42", " 7 ", "1.5", "+3", "1e3", "99999999999999999999", ".5"] {
            assert_eq!(validator(ok), Ok(()), "{ok:?} should be valid");
        }
        for bad in ["", "0", "-5", "abc", "0.9", "12abc", "inf", "NaN", "-"] {
            assert!(validator(bad).is_err(), "{bad:?} should be invalid");
        }
    }

    #[test]
    fn leading_integer_stops_at_first_non_digit() {
        assert_eq!(leading_integer("12.5"), Some(12));
        assert_eq!(leading_integer("-5"), Some(-5));
        assert_eq!(leading_integer("x1"), None);
        assert_eq!(leading_integer(".5"), None);
        assert_eq!(leading_integer("99999999999999999999"), Some(i64::MAX));
        assert_eq!(leading_integer("-99999999999999999999"), Some(-i64::MAX));
    }

    #[test]
    fn run_validators_returns_first_error() {
        let validators = vec![required("Required"), email("Invalid email")];
        assert_eq!(
            run_validators(&validators, ""),
            Err("Required".to_string())
        );
        assert_eq!(
            run_validators(&validators, "nope"),
            Err("Invalid email".to_string())
        );
        assert_eq!(run_validators(&validators, "a@b.io"), Ok(()));
    }
}
