use crate::{
	errors::{
		self,
		ApiErrorKind,
		FormatErrorKind,
	},
	parser::Handler,
	Object,
	Result,
};
use log::trace;

/// Deserialization state machine
///
/// Keeps a stack of objects whose elements are still open and the character data collected since
/// the last start tag.  Each run needs its own instance.
pub struct Deserializer<F> {
	root_tag: String,
	root_factory: Option<F>,
	stack: Vec<Object>,
	text: String,
	root: Option<Object>,
}

impl<F> Deserializer<F>
where
	F: FnOnce() -> Result<Object>,
{
	/// New state machine expecting a root element `root_tag`, created by `root_factory`
	pub fn new(root_tag: impl Into<String>, root_factory: F) -> Self {
		Self {
			root_tag: root_tag.into(),
			root_factory: Some(root_factory),
			stack: Vec::new(),
			text: String::new(),
			root: None,
		}
	}

	/// Root object once the document was read completely
	pub fn finish(mut self, line: u64) -> Result<Object> {
		if let Some(open) = self.stack.pop() {
			return Err(errors::format(
				line,
				open.origin_key(),
				FormatErrorKind::UnclosedElement {
					tag: open.origin_key().unwrap_or_default().into(),
				},
			));
		}
		self.root
			.take()
			.ok_or_else(|| errors::format(line, None, FormatErrorKind::EmptyDocument))
	}

	fn create_root(&mut self, name: &str, line: u64) -> Result<Object> {
		if name != self.root_tag {
			return Err(errors::format(
				line,
				None,
				FormatErrorKind::UnexpectedRoot {
					expected: self.root_tag.clone(),
					found: name.into(),
				},
			));
		}
		let factory = match self.root_factory.take() {
			Some(factory) => factory,
			// a second root was already rejected in element_start
			None => {
				return Err(errors::format(
					line,
					None,
					FormatErrorKind::ContentAfterRoot { tag: name.into() },
				))
			},
		};
		let mut root = factory().map_err(|source| {
			errors::api(
				"parser",
				ApiErrorKind::RootFactory {
					source: Box::new(source),
				},
			)
		})?;
		root.stamp(name, line);
		Ok(root)
	}
}

impl<F> Handler for Deserializer<F>
where
	F: FnOnce() -> Result<Object>,
{
	fn element_start(&mut self, name: &str, attributes: &[(String, String)], line: u64) -> Result<()> {
		trace!("line {}: <{}>", line, name);
		self.text.clear();
		if self.root.is_some() {
			return Err(errors::format(
				line,
				None,
				FormatErrorKind::ContentAfterRoot { tag: name.into() },
			));
		}
		let mut object = match self.stack.last() {
			None => self.create_root(name, line)?,
			Some(parent) => parent.create_child_object(name, line)?,
		};
		for (key, value) in attributes {
			object.deserialize_attribute(key, value, line)?;
		}
		object.after_deserialize_attributes()?;
		self.stack.push(object);
		Ok(())
	}

	fn element_end(&mut self, name: &str, line: u64) -> Result<()> {
		trace!("line {}: </{}>", line, name);
		let mut object = match self.stack.pop() {
			Some(object) => object,
			None => {
				return Err(errors::format(
					line,
					None,
					FormatErrorKind::UnexpectedEnd { tag: name.into() },
				))
			},
		};
		let text = std::mem::take(&mut self.text);
		let text = text.trim();
		if !text.is_empty() {
			object.deserialize_text(text, line)?;
		}
		object.after_deserialize_all()?;
		match self.stack.last_mut() {
			None => self.root = Some(object),
			Some(parent) => parent.add_child_object(name, object)?,
		}
		Ok(())
	}

	fn character_data(&mut self, data: &str, line: u64) -> Result<()> {
		if self.stack.is_empty() {
			if data.trim().is_empty() {
				return Ok(());
			}
			return Err(errors::format(line, None, FormatErrorKind::TextOutsideRoot));
		}
		self.text.push_str(data);
		Ok(())
	}
}
