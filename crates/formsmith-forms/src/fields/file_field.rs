//! File upload field

use crate::field::{FieldFragment, FieldKind, input_control};

/// `input type="file"` with an optional `accept` filter
#[derive(Debug, Clone, Default)]
pub struct FileField {
	pub name: String,
	pub label: Option<String>,
	pub accept: String,
	pub multiple: bool,
	pub required: bool,
}

impl FileField {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Restricts the picker, e.g. `"audio/*"` or `".pdf,.docx"`.
	pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
		self.accept = accept.into();
		self
	}

	pub fn multiple(mut self) -> Self {
		self.multiple = true;
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn build(&self) -> FieldFragment {
		let input = input_control("file", &self.name);
		input.set_attribute("accept", &self.accept);
		input.set_bool_attribute("multiple", self.multiple);
		input.set_bool_attribute("required", self.required);
		FieldFragment::assemble(FieldKind::File, &self.name, self.label.as_deref(), input)
	}
}
