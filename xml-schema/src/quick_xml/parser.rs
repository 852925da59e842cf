use crate::{
	errors::{
		self,
		ApiErrorKind,
		FormatErrorKind,
	},
	options::ParseOptions,
	parser::{
		Deserializer,
		Handler,
	},
	schema::Model,
	Object,
	Result,
};
use encoding_rs::{
	Encoding,
	UTF_8,
};
use log::debug;
use quick_xml::{
	events::{
		BytesStart,
		Event,
	},
	Reader,
};
use std::io::Read;

/// Tracks the 1-based line of a byte position, moving forward only
struct LineCounter<'i> {
	input: &'i str,
	position: usize,
	line: u64,
}

impl<'i> LineCounter<'i> {
	fn new(input: &'i str) -> Self {
		Self {
			input,
			position: 0,
			line: 1,
		}
	}

	fn advance(&mut self, position: usize) -> u64 {
		let position = position.min(self.input.len());
		if position > self.position {
			let skipped = &self.input.as_bytes()[self.position..position];
			self.line += skipped.iter().filter(|&&b| b == b'\n').count() as u64;
			self.position = position;
		}
		self.line
	}
}

fn element_start<H: Handler + ?Sized>(
	reader: &Reader<&[u8]>,
	start: &BytesStart<'_>,
	handler: &mut H,
	line: u64,
) -> Result<String> {
	let name = reader.decoder().decode(start.name().as_ref())?.into_owned();
	let mut attributes = Vec::new();
	for attr in start.attributes() {
		let attr = attr.map_err(quick_xml::Error::from)?;
		let key = reader.decoder().decode(attr.key.as_ref())?.into_owned();
		let value = attr.decode_and_unescape_value(reader)?.into_owned();
		attributes.push((key, value));
	}
	handler.element_start(&name, &attributes, line)?;
	Ok(name)
}

/// Report the events of a document to `handler`
///
/// Returns the line the input ends on.
pub fn tokenize<H: Handler + ?Sized>(input: &str, handler: &mut H) -> Result<u64> {
	let mut reader = Reader::from_str(input);
	reader.trim_text(false);
	let mut lines = LineCounter::new(input);
	loop {
		// events start where the previous one ended: whitespace is reported as text
		let line = lines.advance(reader.buffer_position());
		match reader.read_event()? {
			Event::Start(start) => {
				element_start(&reader, &start, handler, line)?;
			},
			Event::Empty(start) => {
				let name = element_start(&reader, &start, handler, line)?;
				handler.element_end(&name, line)?;
			},
			Event::End(end) => {
				let name = reader.decoder().decode(end.name().into_inner())?;
				handler.element_end(&name, line)?;
			},
			Event::Text(text) => {
				handler.character_data(&text.unescape()?, line)?;
			},
			Event::CData(cdata) => {
				let raw = cdata.into_inner();
				handler.character_data(&reader.decoder().decode(&raw)?, line)?;
			},
			// ignored
			Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => (),
			Event::Eof => return Ok(lines.advance(input.len())),
		}
	}
}

fn decode_input(bytes: &[u8], options: &ParseOptions) -> Result<String> {
	let encoding = match &options.encoding {
		Some(label) => Encoding::for_label(label.as_bytes()).ok_or_else(|| {
			errors::api(
				"parser",
				ApiErrorKind::UnknownEncoding {
					label: label.clone(),
				},
			)
		})?,
		None => Encoding::for_bom(bytes).map_or(UTF_8, |(encoding, _)| encoding),
	};
	let (text, used, malformed) = encoding.decode(bytes);
	if malformed {
		return Err(errors::format(1, None, FormatErrorKind::Decode { encoding: used.name() }));
	}
	Ok(text.into_owned())
}

fn run<F>(input: &str, root_tag: &str, root_factory: F) -> Result<Object>
where
	F: FnOnce() -> Result<Object>,
{
	debug!("deserializing document with root <{}>", root_tag);
	let mut deserializer = Deserializer::new(root_tag, root_factory);
	let line = tokenize(input, &mut deserializer)?;
	deserializer.finish(line)
}

/// Read a document into an object graph
///
/// The root element must be called `root_tag`; its object is created by `root_factory`, all
/// nested objects by the factories of their child fields.
pub fn deserialize<R, F>(mut input: R, root_tag: &str, root_factory: F, options: &ParseOptions) -> Result<Object>
where
	R: Read,
	F: FnOnce() -> Result<Object>,
{
	let mut bytes = Vec::new();
	input.read_to_end(&mut bytes)?;
	let text = decode_input(&bytes, options)?;
	run(&text, root_tag, root_factory)
}

/// Read a document from a string; see [`deserialize`]
pub fn from_str<F>(input: &str, root_tag: &str, root_factory: F) -> Result<Object>
where
	F: FnOnce() -> Result<Object>,
{
	run(input, root_tag, root_factory)
}

/// Read a document with a root object of model `M`; see [`deserialize`]
pub fn deserialize_model<M: Model, R: Read>(input: R, root_tag: &str, options: &ParseOptions) -> Result<Object> {
	deserialize(input, root_tag, M::create, options)
}
