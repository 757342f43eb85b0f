//! Form settings
//!
//! Settings can be built in code, loaded from a TOML file, or overridden from
//! environment variables. Every key is optional; missing keys fall back to
//! the defaults below.
//!
//! ```toml
//! submit_url = "/api/contact"
//! status_element_id = "responseMessage"
//! password_min_length = 10
//!
//! [messages]
//! submitting = "Sending..."
//!
//! [colors]
//! failure = "darkred"
//!
//! [classes]
//! invalid = "field-invalid"
//! ```

use crate::validators::ValidationRule;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SUBMIT_URL_ENV: &str = "FORMSMITH_SUBMIT_URL";
pub const STATUS_ELEMENT_ID_ENV: &str = "FORMSMITH_STATUS_ELEMENT_ID";

/// Settings shared by validation wiring and the submission pipeline.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
	/// Endpoint used by the wired submit handler
	pub submit_url: String,

	/// Id of the element that displays submission status
	pub status_element_id: String,

	/// Minimum length used by password-strength wiring
	pub password_min_length: usize,

	pub messages: StatusMessages,

	pub colors: StatusColors,

	pub classes: FieldClasses,
}

impl Default for FormSettings {
	fn default() -> Self {
		Self {
			submit_url: "/submit".to_string(),
			status_element_id: "responseMessage".to_string(),
			password_min_length: 8,
			messages: StatusMessages::default(),
			colors: StatusColors::default(),
			classes: FieldClasses::default(),
		}
	}
}

impl FormSettings {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses settings from a TOML document.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::FormSettings;
	///
	/// let settings = FormSettings::from_toml_str(r#"submit_url = "/api/signup""#).unwrap();
	/// assert_eq!(settings.submit_url, "/api/signup");
	/// assert_eq!(settings.password_min_length, 8);
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		toml::from_str(source).map_err(|e| SettingsError::ParseError(e.to_string()))
	}

	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path)
			.map_err(|e| SettingsError::FileError(format!("{}: {}", path.display(), e)))?;
		Self::from_toml_str(&source)
	}

	/// Defaults overridden by `FORMSMITH_*` environment variables.
	pub fn from_env() -> Self {
		Self::default().with_env_overrides()
	}

	pub fn with_env_overrides(mut self) -> Self {
		if let Ok(url) = std::env::var(SUBMIT_URL_ENV) {
			self.submit_url = url;
		}
		if let Ok(id) = std::env::var(STATUS_ELEMENT_ID_ENV) {
			self.status_element_id = id;
		}
		self
	}

	pub fn with_submit_url(mut self, url: impl Into<String>) -> Self {
		self.submit_url = url.into();
		self
	}

	pub fn with_status_element_id(mut self, id: impl Into<String>) -> Self {
		self.status_element_id = id.into();
		self
	}

	pub fn with_password_min_length(mut self, min_length: usize) -> Self {
		self.password_min_length = min_length;
		self
	}

	/// Password-strength rule using the configured minimum length.
	pub fn password_rule(&self) -> ValidationRule {
		ValidationRule::PasswordStrength {
			min_length: self.password_min_length,
		}
	}
}

/// Default texts rendered in the status element.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusMessages {
	pub submitting: String,
	pub success: String,
	pub failure: String,
}

impl Default for StatusMessages {
	fn default() -> Self {
		Self {
			submitting: "Submitting...".to_string(),
			success: "Form submitted successfully!".to_string(),
			failure: "An error occurred while submitting the form.".to_string(),
		}
	}
}

/// Text colors used by the status element.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusColors {
	pub pending: String,
	pub success: String,
	pub failure: String,
}

impl Default for StatusColors {
	fn default() -> Self {
		Self {
			pending: "blue".to_string(),
			success: "green".to_string(),
			failure: "red".to_string(),
		}
	}
}

/// Class names toggled by validation wiring.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldClasses {
	pub valid: String,
	pub invalid: String,
	pub error_message: String,
}

impl Default for FieldClasses {
	fn default() -> Self {
		Self {
			valid: crate::field::VALID_CLASS.to_string(),
			invalid: crate::field::INVALID_CLASS.to_string(),
			error_message: crate::field::ERROR_MESSAGE_CLASS.to_string(),
		}
	}
}

/// Settings error
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("File error: {0}")]
	FileError(String),

	#[error("Parse error: {0}")]
	ParseError(String),
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;
	use std::io::Write;

	#[rstest]
	fn test_defaults() {
		let settings = FormSettings::default();

		assert_eq!(settings.submit_url, "/submit");
		assert_eq!(settings.status_element_id, "responseMessage");
		assert_eq!(settings.password_min_length, 8);
		assert_eq!(settings.messages.submitting, "Submitting...");
		assert_eq!(settings.colors.pending, "blue");
		assert_eq!(settings.classes.invalid, "is-invalid");
	}

	#[rstest]
	fn test_partial_toml_keeps_other_defaults() {
		// Arrange
		let source = r#"
			password_min_length = 12

			[messages]
			success = "Thanks!"

			[colors]
			failure = "darkred"
		"#;

		// Act
		let settings = FormSettings::from_toml_str(source).unwrap();

		// Assert
		assert_eq!(settings.password_min_length, 12);
		assert_eq!(settings.messages.success, "Thanks!");
		assert_eq!(settings.messages.submitting, "Submitting...");
		assert_eq!(settings.colors.failure, "darkred");
		assert_eq!(settings.colors.success, "green");
	}

	#[rstest]
	fn test_password_rule_uses_configured_length() {
		let settings = FormSettings::from_toml_str("password_min_length = 12").unwrap();

		assert_eq!(
			settings.password_rule(),
			ValidationRule::PasswordStrength { min_length: 12 }
		);
		assert!(!settings.password_rule().check("Abcdef1!"));
		assert!(settings.password_rule().check("Abcdefgh12!?"));
	}

	#[rstest]
	fn test_invalid_toml_is_parse_error() {
		let result = FormSettings::from_toml_str("password_min_length = \"eight\"");

		assert!(matches!(result, Err(SettingsError::ParseError(_))));
	}

	#[rstest]
	fn test_from_file() {
		// Arrange
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "submit_url = \"/api/register\"").unwrap();

		// Act
		let settings = FormSettings::from_file(file.path()).unwrap();

		// Assert
		assert_eq!(settings.submit_url, "/api/register");
	}

	#[rstest]
	fn test_from_missing_file_is_file_error() {
		let result = FormSettings::from_file("/nonexistent/formsmith.toml");

		assert!(matches!(result, Err(SettingsError::FileError(_))));
	}

	#[rstest]
	#[serial]
	fn test_env_overrides() {
		// SAFETY: serialized with other environment-touching tests
		unsafe {
			std::env::set_var(SUBMIT_URL_ENV, "/env/submit");
			std::env::set_var(STATUS_ELEMENT_ID_ENV, "status");
		}

		let settings = FormSettings::from_env();

		unsafe {
			std::env::remove_var(SUBMIT_URL_ENV);
			std::env::remove_var(STATUS_ELEMENT_ID_ENV);
		}
		assert_eq!(settings.submit_url, "/env/submit");
		assert_eq!(settings.status_element_id, "status");
	}
}
