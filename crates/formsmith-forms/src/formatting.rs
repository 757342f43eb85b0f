//! Input formatting helpers
//!
//! Each [`Formatter`] rewrites a control's value in place on every `input`
//! event. Formatting is purely cosmetic; calendar checks belong to
//! [`crate::validate_date_format`].

use formsmith_dom::{Element, EventType, ListenerId};
use serde::{Deserialize, Serialize};

/// In-place transforms applied to input values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formatter {
	/// `(ddd) ddd-dddd`, built up as digits are typed
	PhoneNumber,
	/// Capitalizes each space-separated word
	CapitalizeName,
	/// `MM/DD/YYYY`, built up as digits are typed
	Date,
}

impl Formatter {
	pub fn apply(&self, value: &str) -> String {
		match self {
			Formatter::PhoneNumber => format_phone_number(value),
			Formatter::CapitalizeName => capitalize_name(value),
			Formatter::Date => format_date(value),
		}
	}
}

fn digits(value: &str) -> String {
	value.chars().filter(char::is_ascii_digit).collect()
}

/// Groups up to ten digits as a North American phone number.
///
/// # Examples
///
/// ```
/// use formsmith_forms::format_phone_number;
///
/// assert_eq!(format_phone_number("12"), "(12");
/// assert_eq!(format_phone_number("12345"), "(123) 45");
/// assert_eq!(format_phone_number("123-456-78901"), "(123) 456-7890");
/// ```
pub fn format_phone_number(value: &str) -> String {
	let digits = digits(value);
	let digits = &digits[..digits.len().min(10)];
	match digits.len() {
		0 => String::new(),
		1..=3 => format!("({}", digits),
		4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
		_ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
	}
}

/// Uppercases the first character of every word and lowercases the rest.
///
/// Words are split on single spaces, so repeated or surrounding spaces are
/// kept as they are.
pub fn capitalize_name(value: &str) -> String {
	value
		.split(' ')
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first
					.to_uppercase()
					.chain(chars.flat_map(char::to_lowercase))
					.collect(),
				None => String::new(),
			}
		})
		.collect::<Vec<_>>()
		.join(" ")
}

/// Inserts slashes after the month and day digits.
///
/// # Examples
///
/// ```
/// use formsmith_forms::format_date;
///
/// assert_eq!(format_date("1"), "1");
/// assert_eq!(format_date("123"), "12/3");
/// assert_eq!(format_date("12/31/2024"), "12/31/2024");
/// assert_eq!(format_date("1231202499"), "12/31/2024");
/// ```
pub fn format_date(value: &str) -> String {
	let digits = digits(value);
	let digits = &digits[..digits.len().min(8)];
	match digits.len() {
		0..=2 => digits.to_string(),
		3..=4 => format!("{}/{}", &digits[..2], &digits[2..]),
		_ => format!("{}/{}/{}", &digits[..2], &digits[2..4], &digits[4..]),
	}
}

/// Rewrites the control's value with `formatter` on every `input` event.
pub fn attach_formatter(control: &Element, formatter: Formatter) -> ListenerId {
	control.add_event_listener(EventType::Input, move |event| {
		let target = event.target();
		let formatted = formatter.apply(&target.value());
		target.set_value(&formatted);
	})
}
