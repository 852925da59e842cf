//! Tokenizer/writer adaptors using `quick-xml`, and the document entry points

mod parser;
mod serializer;

/// Re-export `quick-xml` crate
pub use quick_xml;

pub use self::{
	parser::{
		deserialize,
		deserialize_model,
		from_str,
		tokenize,
	},
	serializer::{
		serialize,
		to_string,
		XmlWriter,
	},
};
