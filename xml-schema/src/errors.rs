//! Error taxonomy and helper functions to generate common errors
//!
//! Every failure is one of four kinds, kept apart so callers can tell programmer misuse from bad
//! input:
//! - [`ApiError`]: registration or call-time misuse (duplicate keys, invalid object graphs during
//!   serialization, failing factories or serialize hooks, ...)
//! - [`FormatError`]: the input document doesn't match the schema; carries the line number
//! - [`AccessError`]: direct field access without a stored value or a matching hook
//! - errors from the XML layer and I/O, passed through unchanged

use std::fmt;
use thiserror::Error;

/// Crate error
#[derive(Debug, Error)]
pub enum Error {
	/// Registration or API misuse
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Document doesn't match the schema
	#[error(transparent)]
	Format(#[from] FormatError),
	/// Field access failed
	#[error(transparent)]
	Access(#[from] AccessError),
	/// Malformed XML (reported by the tokenizer or writer)
	#[cfg(feature = "quick-xml")]
	#[cfg_attr(doc_cfg, doc(cfg(feature = "quick-xml")))]
	#[error("xml error: {0}")]
	Xml(#[from] ::quick_xml::Error),
	/// Reading input or writing output failed
	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),
}

impl Error {
	/// Returns the API error if this is one
	pub fn as_api(&self) -> Option<&ApiError> {
		match self {
			Self::Api(e) => Some(e),
			_ => None,
		}
	}

	/// Returns the format error if this is one
	pub fn as_format(&self) -> Option<&FormatError> {
		match self {
			Self::Format(e) => Some(e),
			_ => None,
		}
	}

	/// Returns the access error if this is one
	pub fn as_access(&self) -> Option<&AccessError> {
		match self {
			Self::Access(e) => Some(e),
			_ => None,
		}
	}
}

/// Failure raised inside a caller-supplied hook
///
/// Keeps the name of the hook's error type and its message; the hook's error value itself is not
/// retained.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{type_name}: {message}")]
pub struct HookError {
	/// Type name of the error the hook returned
	pub type_name: &'static str,
	/// Rendered message of the error the hook returned
	pub message: String,
}

impl HookError {
	/// Wrap an error returned by a hook
	pub fn new<E: fmt::Display + 'static>(error: E) -> Self {
		Self {
			type_name: std::any::type_name::<E>(),
			message: error.to_string(),
		}
	}
}

/// Registration or API misuse
#[derive(Debug, Error)]
#[error("{context}: {kind}")]
pub struct ApiError {
	/// Name of the schema (or component) the error was raised for
	pub context: String,
	/// What went wrong
	pub kind: ApiErrorKind,
}

#[allow(missing_docs)] // messages document the variants
#[derive(Debug, Error)]
pub enum ApiErrorKind {
	#[error("two attributes have the same key {key:?} (members {member} and {conflict})")]
	DuplicateAttributeKey { key: String, member: String, conflict: String },
	#[error("two child objects have the same key {key:?} (members {member} and {conflict})")]
	DuplicateChildKey { key: String, member: String, conflict: String },
	#[error("two or more text contents are defined (members {member} and {conflict})")]
	DuplicateText { member: String, conflict: String },
	#[error("mixed usage of text content and child objects is not supported")]
	MixedTextAndChildren,
	#[error("unhandled constructor values: {}", .keys.join(", "))]
	UnhandledValues { keys: Vec<String> },
	#[error("failed to create child object {key:?} (member {member}) with the given factory")]
	ChildFactory {
		key: String,
		member: String,
		source: Box<Error>,
	},
	#[error("failed to create root object with the given factory")]
	RootFactory { source: Box<Error> },
	#[error("recursive child object {key:?} (member {member}) was never resolved")]
	UnresolvedRecursion { key: String, member: String },
	#[error("no serializable attribute {key:?}")]
	NoAttribute { key: String },
	#[error("no serializable text content")]
	NoText,
	#[error("missing required attribute {key:?} (member {member})")]
	MissingAttribute { key: String, member: String },
	#[error("missing required child object {key:?} (member {member})")]
	MissingChild { key: String, member: String },
	#[error("missing required text content (member {member})")]
	MissingText { member: String },
	#[error("failed to serialize attribute {key:?} (member {member}): {value} ({source})")]
	SerializeAttribute {
		key: String,
		member: String,
		value: String,
		source: HookError,
	},
	#[error("failed to serialize text content (member {member}): {value} ({source})")]
	SerializeText {
		member: String,
		value: String,
		source: HookError,
	},
	#[error("value of member {member} is {found}, which needs a serializer hook")]
	NotScalar { member: String, found: &'static str },
	#[error("child object {key:?} (member {member}) is not a collection")]
	NotCollection { key: String, member: String },
	#[error("child object {key:?} (member {member}) is not an object")]
	NotObject { key: String, member: String },
	#[error("unknown encoding {label:?}")]
	UnknownEncoding { label: String },
}

/// Document doesn't match the schema
#[derive(Debug, Error)]
#[error("line {line}{}: {kind}", .key.as_ref().map(|key| format!(", object {}", key)).unwrap_or_default())]
pub struct FormatError {
	/// Line the problem was detected on
	pub line: u64,
	/// Key of the enclosing element, if known
	pub key: Option<String>,
	/// What went wrong
	pub kind: FormatErrorKind,
}

#[allow(missing_docs)] // messages document the variants
#[derive(Debug, PartialEq, Eq, Error)]
pub enum FormatErrorKind {
	#[error("expecting tag {expected:?} ({found:?} found)")]
	UnexpectedRoot { expected: String, found: String },
	#[error("does not accept attribute {name:?}")]
	UnknownAttribute { name: String },
	#[error("does not accept child {name:?}")]
	UnknownChild { name: String },
	#[error("does not accept text content")]
	UnexpectedText,
	#[error("missing required attribute {key:?} (member {member})")]
	MissingAttribute { key: String, member: String },
	#[error("missing required child object {key:?} (member {member})")]
	MissingChild { key: String, member: String },
	#[error("missing required text content (member {member})")]
	MissingText { member: String },
	#[error("only accepts one child {key:?} (member {member})")]
	DuplicateChild { key: String, member: String },
	#[error("failed to deserialize attribute {key:?} (member {member}): {value} ({source})")]
	DeserializeAttribute {
		key: String,
		member: String,
		value: String,
		source: HookError,
	},
	#[error("failed to deserialize text content (member {member}): {value} ({source})")]
	DeserializeText {
		member: String,
		value: String,
		source: HookError,
	},
	#[error("text outside of the root element")]
	TextOutsideRoot,
	#[error("unexpected element {tag:?} after the root element")]
	ContentAfterRoot { tag: String },
	#[error("unexpected end tag {tag:?}")]
	UnexpectedEnd { tag: String },
	#[error("element {tag:?} not closed")]
	UnclosedElement { tag: String },
	#[error("no root element")]
	EmptyDocument,
	#[error("input is not valid {encoding}")]
	Decode { encoding: &'static str },
}

/// Field access failed
#[derive(Debug, Error)]
#[error("can't {op} property {member} ({reason})")]
pub struct AccessError {
	/// Member name the access was made through
	pub member: String,
	/// Attempted operation
	pub op: AccessOp,
	/// Why it failed
	pub reason: AccessReason,
}

impl AccessError {
	/// Whether the failure just means "no value": nothing stored, or the hooks don't support the
	/// operation.
	pub fn is_unset(&self) -> bool {
		matches!(self.reason, AccessReason::Missing | AccessReason::Unsupported)
	}
}

/// Field operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOp {
	/// Read
	Get,
	/// Write
	Set,
	/// Remove
	Delete,
}

impl fmt::Display for AccessOp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Get => "get",
			Self::Set => "set",
			Self::Delete => "delete",
		})
	}
}

/// Reason for an [`AccessError`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessReason {
	/// Nothing stored (and no hook)
	Missing,
	/// Field has accessor hooks, but none for this operation
	Unsupported,
	/// Object wasn't created by deserialization, or was shrunk
	NoOrigin,
	/// Accessor hook failed
	Hook(HookError),
}

impl fmt::Display for AccessReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Missing => f.write_str("no value"),
			Self::Unsupported => f.write_str("no accessor"),
			Self::NoOrigin => f.write_str(
				"not created via deserialization, or origin removed by shrink",
			),
			Self::Hook(e) => write!(f, "{}", e),
		}
	}
}

pub(crate) fn api(context: &str, kind: ApiErrorKind) -> Error {
	ApiError {
		context: context.into(),
		kind,
	}
	.into()
}

pub(crate) fn format(line: u64, key: Option<&str>, kind: FormatErrorKind) -> Error {
	FormatError {
		line,
		key: key.map(Into::into),
		kind,
	}
	.into()
}

pub(crate) fn access(member: &str, op: AccessOp, reason: AccessReason) -> AccessError {
	AccessError {
		member: member.into(),
		op,
		reason,
	}
}

pub(crate) fn unknown_attribute(line: u64, key: Option<&str>, name: &str) -> Error {
	format(line, key, FormatErrorKind::UnknownAttribute { name: name.into() })
}

pub(crate) fn unknown_child(line: u64, key: Option<&str>, name: &str) -> Error {
	format(line, key, FormatErrorKind::UnknownChild { name: name.into() })
}

pub(crate) fn missing_child(context: &str, key: &str, member: &str) -> Error {
	api(
		context,
		ApiErrorKind::MissingChild {
			key: key.into(),
			member: member.into(),
		},
	)
}
