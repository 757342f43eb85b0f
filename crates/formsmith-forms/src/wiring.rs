//! Validation wiring
//!
//! Turns validator results into visual state: the `is-valid`/`is-invalid`
//! classes on the control and the text of the field's error element.
//!
//! Every function has a `_with` variant taking the [`FieldClasses`] of a
//! [`FormSettings`](crate::FormSettings); the plain variants use the
//! default class names.

use crate::error::WiringError;
use crate::field::FieldFragment;
use crate::settings::FieldClasses;
use crate::validators::{ValidationResult, ValidationRule};
use formsmith_dom::{Element, EventType, ListenerId};

fn toggle_validity_classes(control: &Element, is_valid: bool, classes: &FieldClasses) {
	if is_valid {
		control.remove_class(&classes.invalid);
		control.add_class(&classes.valid);
	} else {
		control.remove_class(&classes.valid);
		control.add_class(&classes.invalid);
	}
}

/// Applies a validity flag and message to a field.
///
/// The classes are toggled even when the fragment has no error element; the
/// missing element is then reported as [`WiringError::MissingErrorElement`].
///
/// # Examples
///
/// ```
/// use formsmith_forms::{add_input_validation_listener, create_password_input};
///
/// let field = create_password_input("password", None, "");
/// add_input_validation_listener(&field, false, "Too weak").unwrap();
///
/// assert!(field.control().has_class("is-invalid"));
/// assert_eq!(field.error_element().unwrap().text_content(), "Too weak");
/// ```
pub fn add_input_validation_listener(
	field: &FieldFragment,
	is_valid: bool,
	message: &str,
) -> Result<(), WiringError> {
	add_input_validation_listener_with(field, is_valid, message, &FieldClasses::default())
}

/// [`add_input_validation_listener`] with configured class names.
///
/// The field's error element also receives the configured marker class, so
/// [`display_error_with`] and [`clear_error_with`] find it afterwards.
pub fn add_input_validation_listener_with(
	field: &FieldFragment,
	is_valid: bool,
	message: &str,
	classes: &FieldClasses,
) -> Result<(), WiringError> {
	apply_validity(field.control(), field.error_element(), is_valid, message, classes)
		.ok_or_else(|| WiringError::MissingErrorElement(field.name().to_string()))
}

// Returns `None` when there is no error element to write to.
fn apply_validity(
	control: &Element,
	error: Option<&Element>,
	is_valid: bool,
	message: &str,
	classes: &FieldClasses,
) -> Option<()> {
	toggle_validity_classes(control, is_valid, classes);
	let error = error?;
	error.add_class(&classes.error_message);
	if is_valid {
		error.set_text_content("");
	} else {
		error.set_text_content(message);
	}
	Some(())
}

/// [`add_input_validation_listener`] driven by a [`ValidationResult`].
pub fn apply_validation_result(
	field: &FieldFragment,
	result: &ValidationResult,
) -> Result<(), WiringError> {
	add_input_validation_listener(field, result.is_valid(), result.message())
}

/// Shows `message` in the error element right after `control`, creating a
/// `span.error-message` there when the next sibling is not one.
pub fn display_error(control: &Element, message: &str) -> Result<Element, WiringError> {
	display_error_with(control, message, &FieldClasses::default())
}

/// [`display_error`] looking for and creating the configured marker class.
pub fn display_error_with(
	control: &Element,
	message: &str,
	classes: &FieldClasses,
) -> Result<Element, WiringError> {
	let error = match control.next_element_sibling() {
		Some(sibling) if sibling.has_class(&classes.error_message) => sibling,
		next => {
			let parent = control
				.parent()
				.ok_or_else(|| WiringError::Detached(control.tag_name()))?;
			let error = Element::new("span");
			error.add_class(&classes.error_message);
			parent.insert_before(&error, next.as_ref())?;
			error
		}
	};

	error.set_text_content(message);
	error.set_style("color", "red");
	error.remove_style("display");
	Ok(error)
}

/// Clears and hides the error element after `control`, if there is one.
///
/// Returns whether an error element was found; a control without a parent
/// has none.
pub fn clear_error(control: &Element) -> Result<bool, WiringError> {
	clear_error_with(control, &FieldClasses::default())
}

/// [`clear_error`] looking for the configured marker class.
pub fn clear_error_with(control: &Element, classes: &FieldClasses) -> Result<bool, WiringError> {
	match control.next_element_sibling() {
		Some(sibling) if sibling.has_class(&classes.error_message) => {
			sibling.set_text_content("");
			sibling.set_style("display", "none");
			Ok(true)
		}
		_ => Ok(false),
	}
}

/// Re-validates the field on every `input` event.
///
/// `message` replaces the rule's default message when given.
///
/// # Examples
///
/// ```
/// use formsmith_dom::EventType;
/// use formsmith_forms::{ValidationRule, bind_validator, create_password_input};
///
/// let field = create_password_input("password", Some("Password:"), "");
/// bind_validator(&field, ValidationRule::PasswordStrength { min_length: 8 }, None);
///
/// field.set_value("weak");
/// field.control().dispatch_event(EventType::Input);
/// assert!(field.control().has_class("is-invalid"));
///
/// field.set_value("Str0ng!pass");
/// field.control().dispatch_event(EventType::Input);
/// assert!(field.control().has_class("is-valid"));
/// assert_eq!(field.error_element().unwrap().text_content(), "");
/// ```
pub fn bind_validator(
	field: &FieldFragment,
	rule: ValidationRule,
	message: Option<&str>,
) -> ListenerId {
	bind_validator_with(field, rule, message, &FieldClasses::default())
}

/// [`bind_validator`] with configured class names.
pub fn bind_validator_with(
	field: &FieldFragment,
	rule: ValidationRule,
	message: Option<&str>,
	classes: &FieldClasses,
) -> ListenerId {
	let message = message
		.map(str::to_string)
		.unwrap_or_else(|| rule.default_message());
	// Capturing the fragment would form an Rc cycle through the control.
	let error = field.error_element().cloned();
	let name = field.name().to_string();
	let classes = classes.clone();
	field.control().add_event_listener(EventType::Input, move |event| {
		let control = event.target();
		let is_valid = rule.check(&control.value());
		if apply_validity(control, error.as_ref(), is_valid, &message, &classes).is_none() {
			tracing::debug!(field = %name, "no error element to write validation message to");
		}
	})
}
