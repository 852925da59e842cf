use crate::{
	AttributeField,
	ChildField,
	Declaration,
	Model,
	TextField,
};

pub struct Zoo;

impl Model for Zoo {
	fn declare() -> Declaration {
		Declaration::new("Zoo").child("animal", ChildField::of::<Animal>().multiple().required())
	}
}

impl Zoo {
	pub const TEST_DOCUMENT: &'static str =
		r#"<zoo><animal type="cat">TXT1</animal><animal type="dog">TXT2</animal></zoo>"#;

	pub const TEST_PRETTY_DOCUMENT: &'static str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>
<zoo>
	<animal type=\"cat\" legs=\"4\">TXT1</animal>
	<animal type=\"dog\" legs=\"4\">TXT2</animal>
</zoo>";
}

pub struct Animal;

impl Model for Animal {
	fn declare() -> Declaration {
		Declaration::new("Animal")
			.attribute("kind", AttributeField::new().key("type").required())
			.attribute("legs", AttributeField::new().parsed::<i64>().with_default(4))
			.text("text", TextField::new())
	}
}

/// Drops ghosts when written
pub struct Shelter;

impl Model for Shelter {
	fn declare() -> Declaration {
		Declaration::new("Shelter")
			.extends::<Zoo>()
			.ignore_child(|_, _, child| {
				child.get("kind").map_or(false, |kind| kind.as_str() == Some("ghost"))
			})
	}
}

pub struct Keeper;

impl Model for Keeper {
	fn declare() -> Declaration {
		Declaration::new("Keeper")
			.attribute("name", AttributeField::new())
			.child("badge", ChildField::of::<Badge>())
	}
}

pub struct Badge;

impl Model for Badge {
	fn declare() -> Declaration {
		Declaration::new("Badge").attribute("number", AttributeField::new().parsed::<i64>())
	}
}

pub struct Tree;

impl Model for Tree {
	fn declare() -> Declaration {
		Declaration::new("Tree")
			.attribute("name", AttributeField::new())
			.child("node", ChildField::recursive().multiple())
	}
}

/// Invalid: text content and children
pub struct Mixed;

impl Model for Mixed {
	fn declare() -> Declaration {
		Declaration::new("Mixed")
			.text("text", TextField::new())
			.child("child", ChildField::recursive())
	}
}
