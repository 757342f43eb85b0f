//! DOM error types

/// Errors raised by tree mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
	/// The child is the parent itself or one of its ancestors.
	#[error("Cannot insert <{child}> into <{parent}>: it would create a cycle")]
	HierarchyRequest { parent: String, child: String },
	/// The node is not a child of the element being modified.
	#[error("<{0}> is not a child of this element")]
	NotFound(String),
}

pub type DomResult<T> = Result<T, DomError>;
