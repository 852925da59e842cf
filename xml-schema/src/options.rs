//! Settings for reading and writing documents

/// Settings for deserialization
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
	/// Encoding label (as understood by the WHATWG encoding standard) to decode input with
	///
	/// Without a label a byte order mark is honoured, otherwise input is read as UTF-8.
	pub encoding: Option<String>,
}

impl ParseOptions {
	/// Decode input with the encoding named by `label`
	pub fn encoding(mut self, label: impl Into<String>) -> Self {
		self.encoding = Some(label.into());
		self
	}
}

/// Settings for serialization
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializeOptions {
	/// Put each element on its own line, indented by nesting depth
	pub pretty: bool,
	/// Indentation unit for pretty output
	pub indent: String,
	/// Start the document with an XML declaration
	pub declaration: bool,
}

impl Default for SerializeOptions {
	fn default() -> Self {
		Self {
			pretty: false,
			indent: "\t".into(),
			declaration: false,
		}
	}
}

impl SerializeOptions {
	/// Pretty output with the default indentation
	pub fn pretty() -> Self {
		Self {
			pretty: true,
			..Self::default()
		}
	}

	/// Use `indent` as indentation unit (implies pretty output)
	pub fn indent(mut self, indent: impl Into<String>) -> Self {
		self.pretty = true;
		self.indent = indent.into();
		self
	}

	/// Start the document with `<?xml version="1.0" encoding="utf-8"?>`
	pub fn declaration(mut self) -> Self {
		self.declaration = true;
		self
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn builders() {
		let options = SerializeOptions::default();
		assert!(!options.pretty);
		assert_eq!(options.indent, "\t");

		let options = SerializeOptions::default().indent("  ").declaration();
		assert!(options.pretty && options.declaration);
		assert_eq!(options.indent, "  ");

		assert_eq!(ParseOptions::default().encoding("latin1").encoding.as_deref(), Some("latin1"));
	}
}
