use crate::{
	errors::{
		self,
		ApiErrorKind,
	},
	options::SerializeOptions,
	schema::{
		ChildField,
		Field,
	},
	serializer::{
		ElementScope,
		Writer,
	},
	Object,
	Result,
};
use log::{
	debug,
	trace,
};

/// Write `object` as element `tag`, including all nested objects
pub fn serialize_object<W: Writer + ?Sized>(
	writer: &mut W,
	tag: &str,
	object: &Object,
	options: &SerializeOptions,
) -> Result<()> {
	debug!("serializing {} as <{}>", object.schema().name(), tag);
	write_object(writer, tag, object, 0, options)
}

fn indent<W: Writer + ?Sized>(writer: &mut W, depth: usize, options: &SerializeOptions) -> Result<()> {
	if depth == 0 || options.indent.is_empty() {
		return Ok(());
	}
	writer.write_indent(&options.indent.repeat(depth))
}

fn write_object<W: Writer + ?Sized>(
	writer: &mut W,
	tag: &str,
	object: &Object,
	depth: usize,
	options: &SerializeOptions,
) -> Result<()> {
	trace!("<{}> at depth {}", tag, depth);
	let schema = object.schema();
	let mut attributes = Vec::new();
	for field in schema.attributes() {
		if let Some(value) = object.serialize_attribute(field.key())? {
			attributes.push((field.key().to_owned(), value));
		}
	}

	if options.pretty {
		indent(writer, depth, options)?;
	}
	let mut scope = ElementScope::open(writer, tag, &attributes)?;

	if schema.text().is_some() {
		if let Some(text) = object.serialize_text()? {
			scope.writer().write_text(&text)?;
		}
	}

	let mut body = false;
	for field in schema.children() {
		write_children(scope.writer(), object, field, depth, &mut body, options)?;
	}

	if options.pretty && body {
		indent(scope.writer(), depth, options)?;
	}
	scope.close()?;
	if options.pretty && depth > 0 {
		writer.write_indent("\n")?;
	}
	Ok(())
}

fn write_children<W: Writer + ?Sized>(
	writer: &mut W,
	object: &Object,
	field: &ChildField,
	depth: usize,
	body: &mut bool,
	options: &SerializeOptions,
) -> Result<()> {
	let schema = object.schema();
	let value = match field.get(object) {
		Ok(value) => value,
		Err(e) if e.is_unset() => {
			if field.is_required() {
				return Err(errors::missing_child(schema.name(), field.key(), field.member()));
			}
			return Ok(());
		},
		Err(e) => return Err(e.into()),
	};

	let mut write = |child: &Object| -> Result<()> {
		if options.pretty && !*body {
			writer.write_indent("\n")?;
			*body = true;
		}
		write_object(writer, field.key(), child, depth + 1, options)
	};

	if field.is_multiple() {
		let children = value.as_objects().ok_or_else(|| {
			errors::api(
				schema.name(),
				ApiErrorKind::NotCollection {
					key: field.key().into(),
					member: field.member().into(),
				},
			)
		})?;
		let mut written = 0;
		for child in children {
			if object.ignore_child_object(field.key(), child) {
				continue;
			}
			write(child)?;
			written += 1;
		}
		if written == 0 && field.is_required() {
			return Err(errors::missing_child(schema.name(), field.key(), field.member()));
		}
	} else {
		let child = value.as_object().ok_or_else(|| {
			errors::api(
				schema.name(),
				ApiErrorKind::NotObject {
					key: field.key().into(),
					member: field.member().into(),
				},
			)
		})?;
		if !object.ignore_child_object(field.key(), child) {
			write(child)?;
		}
	}
	Ok(())
}
