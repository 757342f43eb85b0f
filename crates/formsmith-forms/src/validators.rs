//! Validators
//!
//! Pure predicates over strings. None of them touch the element tree; the
//! wiring module turns their boolean results into visual state.

use crate::error::ValidationError;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// Local part: letters, digits and `._%+-`; domain: letters, digits and `.-`;
// TLD: two or more letters.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
		.expect("EMAIL_REGEX: invalid regex pattern")
});

/// Characters accepted as "special" by [`validate_password_strength`].
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Checks the general shape `local@domain.tld`.
///
/// # Examples
///
/// ```
/// use formsmith_forms::validate_email;
///
/// assert!(validate_email("user@example.com"));
/// assert!(!validate_email("user@example"));
/// ```
pub fn validate_email(value: &str) -> bool {
	EMAIL_REGEX.is_match(value)
}

/// True iff `value` has at least `min_length` characters and contains an
/// uppercase letter, a lowercase letter, a digit and one of
/// [`PASSWORD_SPECIAL_CHARS`].
///
/// Length is counted in UTF-16 code units, the way browsers count the
/// length of an input value, so characters outside the BMP count twice.
///
/// # Examples
///
/// ```
/// use formsmith_forms::validate_password_strength;
///
/// assert!(validate_password_strength("Abcdef1!", 8));
/// assert!(!validate_password_strength("abcdef1!", 8));
/// ```
pub fn validate_password_strength(value: &str, min_length: usize) -> bool {
	let has_uppercase = value.chars().any(|c| c.is_ascii_uppercase());
	let has_lowercase = value.chars().any(|c| c.is_ascii_lowercase());
	let has_digit = value.chars().any(|c| c.is_ascii_digit());
	let has_special = value.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c));

	value.encode_utf16().count() >= min_length
		&& has_uppercase
		&& has_lowercase
		&& has_digit
		&& has_special
}

/// True iff the trimmed value is non-empty.
pub fn validate_required_field(value: &str) -> bool {
	!value.trim().is_empty()
}

/// Matches `value` against a freshly compiled `pattern`.
///
/// Patterns use `regex` syntax, where classes such as `\d` and `\w` are
/// Unicode-aware: `\d` also matches non-ASCII digits like `١`. Use `[0-9]`
/// or `(?-u:\d)` for ASCII-only matching.
///
/// An invalid pattern is reported as an error instead of a non-match.
pub fn try_validate_with_regex(value: &str, pattern: &str) -> Result<bool, ValidationError> {
	let regex = Regex::new(pattern).map_err(|source| ValidationError::InvalidPattern {
		pattern: pattern.to_string(),
		source,
	})?;
	Ok(regex.is_match(value))
}

/// Matches `value` against a freshly compiled `pattern`.
///
/// An invalid pattern counts as a non-match and is logged.
pub fn validate_with_regex(value: &str, pattern: &str) -> bool {
	try_validate_with_regex(value, pattern).unwrap_or_else(|err| {
		tracing::warn!("{}", err);
		false
	})
}

/// Checks `value` against `pattern`, then checks that its first three
/// `-` separated components form a real calendar date.
///
/// # Examples
///
/// ```
/// use formsmith_forms::validate_date_format;
///
/// let pattern = r"^\d{4}-\d{2}-\d{2}$";
/// assert!(validate_date_format("2024-02-29", pattern));
/// assert!(!validate_date_format("2024-02-30", pattern));
/// assert!(!validate_date_format("2024/02/28", pattern));
/// ```
pub fn validate_date_format(value: &str, pattern: &str) -> bool {
	if !validate_with_regex(value, pattern) {
		return false;
	}

	let mut parts = value.split('-');
	let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
		return false;
	};
	let (Ok(year), Ok(month), Ok(day)) = (
		year.parse::<i32>(),
		month.parse::<u32>(),
		day.parse::<u32>(),
	) else {
		return false;
	};

	// Two-digit years would land in the 1900s and never round-trip.
	if (0..100).contains(&year) {
		return false;
	}

	NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// Outcome of a single validation, consumed immediately by the wiring.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
	pub valid: bool,
	pub message: Option<String>,
}

impl ValidationResult {
	pub fn valid() -> Self {
		Self {
			valid: true,
			message: None,
		}
	}

	pub fn invalid(message: impl Into<String>) -> Self {
		Self {
			valid: false,
			message: Some(message.into()),
		}
	}

	pub fn is_valid(&self) -> bool {
		self.valid
	}

	/// The message to render next to the field; empty when valid.
	pub fn message(&self) -> &str {
		if self.valid {
			return "";
		}
		self.message.as_deref().unwrap_or_default()
	}
}

/// Serializable description of a validator.
///
/// # Examples
///
/// ```
/// use formsmith_forms::ValidationRule;
///
/// let rule: ValidationRule =
/// 	serde_json::from_str(r#"{"type": "password_strength", "min_length": 8}"#).unwrap();
/// assert!(rule.check("Sup3r$ecret"));
/// assert!(!rule.validate("weak").is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationRule {
	Email,
	PasswordStrength { min_length: usize },
	Required,
	Regex { pattern: String },
	DateFormat { pattern: String },
}

impl ValidationRule {
	pub fn check(&self, value: &str) -> bool {
		match self {
			ValidationRule::Email => validate_email(value),
			ValidationRule::PasswordStrength { min_length } => {
				validate_password_strength(value, *min_length)
			}
			ValidationRule::Required => validate_required_field(value),
			ValidationRule::Regex { pattern } => validate_with_regex(value, pattern),
			ValidationRule::DateFormat { pattern } => validate_date_format(value, pattern),
		}
	}

	pub fn default_message(&self) -> String {
		match self {
			ValidationRule::Email => "Enter a valid email address.".to_string(),
			ValidationRule::PasswordStrength { min_length } => format!(
				"Password must be at least {} characters and contain an uppercase letter, a lowercase letter, a number and a special character.",
				min_length
			),
			ValidationRule::Required => "This field is required.".to_string(),
			ValidationRule::Regex { .. } => "Enter a valid value.".to_string(),
			ValidationRule::DateFormat { .. } => "Enter a valid date.".to_string(),
		}
	}

	/// Runs the rule and pairs a failure with [`Self::default_message`].
	pub fn validate(&self, value: &str) -> ValidationResult {
		if self.check(value) {
			ValidationResult::valid()
		} else {
			ValidationResult::invalid(self.default_message())
		}
	}
}
