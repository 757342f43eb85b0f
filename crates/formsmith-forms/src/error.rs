//! Error types for form assembly, wiring, validation and submission

use formsmith_dom::DomError;

/// Errors raised while assembling forms.
///
/// Lookup failures are non-fatal: the operation is a no-op and the error is
/// logged before being returned.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Form with id '{0}' not found.")]
	FormNotFound(String),
	#[error("Field with name '{0}' not found in form.")]
	FieldNotFound(String),
	#[error("Input element not found within the provided wrapper.")]
	MissingInput,
	#[error(transparent)]
	Dom(#[from] DomError),
}

pub type FormResult<T> = Result<T, FormError>;

/// Errors raised while applying validation state to a field.
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
	#[error("Field '{0}' has no error element")]
	MissingErrorElement(String),
	#[error("<{0}> is not attached to a parent element")]
	Detached(String),
	#[error(transparent)]
	Dom(#[from] DomError),
}

/// Errors raised by validators with caller-supplied patterns.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
	#[error("Invalid pattern '{pattern}': {source}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},
}

/// Errors raised by the submission pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
	#[error("A submission for form '{0}' is already in flight")]
	InFlight(String),
	#[error("HTTP error! Status: {0}")]
	Status(u16),
	#[error("{0}")]
	Transport(String),
	#[error("Invalid response body: {0}")]
	Decode(String),
	#[error("Failed to encode payload: {0}")]
	Encode(String),
}
