use crate::{
	options::SerializeOptions,
	serializer::{
		serialize_object,
		Writer,
	},
	Object,
	Result,
};
use quick_xml::events::{
	BytesDecl,
	BytesEnd,
	BytesStart,
	BytesText,
	Event,
};
use std::io;

/// Write an object graph as document with root element `root_tag`
pub fn serialize<W: io::Write>(output: W, root_tag: &str, object: &Object, options: &SerializeOptions) -> Result<()> {
	let mut writer = XmlWriter::new(output);
	if options.declaration {
		writer.write_declaration()?;
		if options.pretty {
			writer.write_indent("\n")?;
		}
	}
	serialize_object(&mut writer, root_tag, object, options)?;
	writer.finish()
}

/// Write an object graph into a string; see [`serialize`]
pub fn to_string(root_tag: &str, object: &Object, options: &SerializeOptions) -> Result<String> {
	let mut buf = Vec::new();
	serialize(&mut buf, root_tag, object, options)?;
	// there shouldn't be any way to write binary (non-utf8) data to the buffer
	Ok(String::from_utf8(buf).expect("buffer should be utf-8 clean"))
}

/// Writer adaptor for `quick_xml::Writer`
///
/// Start tags are held back until content follows; elements without content are written as
/// empty-element tags.
pub struct XmlWriter<W: io::Write> {
	writer: quick_xml::Writer<W>,
	pending: Option<BytesStart<'static>>,
}

impl<W: io::Write> XmlWriter<W> {
	/// New adaptor writing to `output`
	pub fn new(output: W) -> Self {
		Self {
			writer: quick_xml::Writer::new(output),
			pending: None,
		}
	}

	/// Write `<?xml version="1.0" encoding="utf-8"?>`
	pub fn write_declaration(&mut self) -> Result<()> {
		self.start()?;
		self.writer
			.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
		Ok(())
	}

	/// Flush the output
	pub fn finish(mut self) -> Result<()> {
		self.start()?;
		io::Write::flush(self.writer.get_mut())?;
		Ok(())
	}

	fn start(&mut self) -> Result<()> {
		if let Some(start) = self.pending.take() {
			self.writer.write_event(Event::Start(start))?;
		}
		Ok(())
	}
}

impl<W: io::Write> Writer for XmlWriter<W> {
	fn start_element(&mut self, tag: &str, attributes: &[(String, String)]) -> Result<()> {
		self.start()?;
		let mut start = BytesStart::new(tag.to_owned());
		for (key, value) in attributes {
			start.push_attribute((key.as_str(), value.as_str()));
		}
		self.pending = Some(start);
		Ok(())
	}

	fn write_text(&mut self, text: &str) -> Result<()> {
		if text.is_empty() {
			return Ok(());
		}
		self.start()?;
		self.writer.write_event(Event::Text(BytesText::new(text)))?;
		Ok(())
	}

	fn write_indent(&mut self, whitespace: &str) -> Result<()> {
		if whitespace.is_empty() {
			return Ok(());
		}
		self.start()?;
		self.writer.write_event(Event::Text(BytesText::from_escaped(whitespace)))?;
		Ok(())
	}

	fn end_element(&mut self, tag: &str) -> Result<()> {
		match self.pending.take() {
			Some(start) => self.writer.write_event(Event::Empty(start))?,
			None => self.writer.write_event(Event::End(BytesEnd::new(tag.to_owned())))?,
		}
		Ok(())
	}
}
