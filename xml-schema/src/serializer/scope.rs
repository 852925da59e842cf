use crate::{
	serializer::Writer,
	Result,
};
use log::warn;

/// Open element on a [`Writer`]
///
/// Closed by [`close`](Self::close), or on drop if that didn't happen (e.g. because an error is
/// propagated while writing the element's content).
pub struct ElementScope<'w, 't, W: Writer + ?Sized> {
	writer: &'w mut W,
	tag: &'t str,
	open: bool,
}

impl<'w, 't, W: Writer + ?Sized> ElementScope<'w, 't, W> {
	/// Start element `tag`
	pub fn open(writer: &'w mut W, tag: &'t str, attributes: &[(String, String)]) -> Result<Self> {
		writer.start_element(tag, attributes)?;
		Ok(Self {
			writer,
			tag,
			open: true,
		})
	}

	/// Writer to fill in the element's content
	pub fn writer(&mut self) -> &mut W {
		&mut *self.writer
	}

	/// End the element
	pub fn close(mut self) -> Result<()> {
		self.open = false;
		self.writer.end_element(self.tag)
	}
}

impl<W: Writer + ?Sized> Drop for ElementScope<'_, '_, W> {
	fn drop(&mut self) {
		if self.open {
			if let Err(e) = self.writer.end_element(self.tag) {
				warn!("failed to close element {:?}: {}", self.tag, e);
			}
		}
	}
}

#[cfg(test)]
pub(crate) mod test {
	use super::*;

	/// Records writer calls as strings
	#[derive(Default)]
	pub(crate) struct Recorder {
		pub(crate) calls: Vec<String>,
	}

	impl Writer for Recorder {
		fn start_element(&mut self, tag: &str, attributes: &[(String, String)]) -> Result<()> {
			let attributes: String = attributes.iter().map(|(k, v)| format!(" {}={:?}", k, v)).collect();
			self.calls.push(format!("<{}{}>", tag, attributes));
			Ok(())
		}

		fn write_text(&mut self, text: &str) -> Result<()> {
			self.calls.push(text.into());
			Ok(())
		}

		fn write_indent(&mut self, whitespace: &str) -> Result<()> {
			self.calls.push(whitespace.into());
			Ok(())
		}

		fn end_element(&mut self, tag: &str) -> Result<()> {
			self.calls.push(format!("</{}>", tag));
			Ok(())
		}
	}

	#[test]
	fn closes_on_drop() {
		let mut recorder = Recorder::default();
		{
			let mut scope = ElementScope::open(&mut recorder, "a", &[]).unwrap();
			scope.writer().write_text("x").unwrap();
		}
		assert_eq!(recorder.calls, ["<a>", "x", "</a>"]);

		let mut recorder = Recorder::default();
		let scope = ElementScope::open(&mut recorder, "b", &[]).unwrap();
		scope.close().unwrap();
		assert_eq!(recorder.calls, ["<b>", "</b>"]);
	}
}
