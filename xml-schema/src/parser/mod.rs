//! Event seam between tokenizers and the deserialization state machine
//!
//! A tokenizer adaptor (see the `quick_xml` module) reads a document and reports it through
//! [`Handler`]: one `element_start` per start tag (empty-element tags are reported as start
//! followed by end), one `element_end` per end tag, and `character_data` for text and CDATA in
//! between.  Comments, processing instructions and declarations are not reported.
//!
//! [`Deserializer`] is the handler turning these events into an object graph.

mod state;

pub use self::state::Deserializer;

use crate::Result;

/// Receiver of tokenizer events
///
/// Line numbers are 1-based and refer to the line the markup of the event starts on.
pub trait Handler {
	/// Start tag with decoded and unescaped attributes in document order
	fn element_start(&mut self, name: &str, attributes: &[(String, String)], line: u64) -> Result<()>;

	/// End tag (or the end of an empty-element tag)
	fn element_end(&mut self, name: &str, line: u64) -> Result<()>;

	/// Chunk of unescaped character data; consecutive chunks belong together
	fn character_data(&mut self, data: &str, line: u64) -> Result<()>;
}
