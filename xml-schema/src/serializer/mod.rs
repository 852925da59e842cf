//! Writer seam and the recursive serialization walk
//!
//! [`serialize_object`] walks an object graph in schema order and reports it to a [`Writer`];
//! writer adaptors for XML libraries (see the `quick_xml` module) turn these calls into markup.
//!
//! Elements are opened through [`ElementScope`], which closes them again on every exit path.

mod scope;
mod walk;

pub use self::{
	scope::ElementScope,
	walk::serialize_object,
};

use crate::Result;

/// Interface to write a document
///
/// Calls are properly nested: every `start_element` is matched by one `end_element` for the same
/// tag, with text and nested elements in between.
pub trait Writer {
	/// Open an element with attributes in schema order
	fn start_element(&mut self, tag: &str, attributes: &[(String, String)]) -> Result<()>;

	/// Add text content; must be escaped by the writer
	fn write_text(&mut self, text: &str) -> Result<()>;

	/// Add whitespace for pretty output; written as is
	fn write_indent(&mut self, whitespace: &str) -> Result<()>;

	/// Close the innermost open element
	///
	/// Writers may use an empty-element tag if nothing was written since `start_element`.
	fn end_element(&mut self, tag: &str) -> Result<()>;
}
