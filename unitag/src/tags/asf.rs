//! The ASF (Windows Media) attribute model
//!
//! Attributes are name/value-list pairs; a name like `WM/Picture` may
//! carry several values.

/// One ASF attribute value
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AsfValue {
	/// A Unicode string value
	Unicode(String),
	/// A boolean value (e.g. `WM/IsCompilation`)
	Bool(bool),
	/// A byte-array value (e.g. `WM/Picture`)
	Bytes(Vec<u8>),
}

/// An ASF attribute list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AsfTag {
	pub(crate) attributes: Vec<(String, Vec<AsfValue>)>,
}

impl AsfTag {
	/// Create a new empty `AsfTag`
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// All attributes, in order
	pub fn attributes(&self) -> &[(String, Vec<AsfValue>)] {
		&self.attributes
	}

	/// Whether the tag carries no attributes
	pub fn is_empty(&self) -> bool {
		self.attributes.is_empty()
	}

	/// The values stored under the given attribute name
	pub fn values(&self, name: &str) -> Option<&[AsfValue]> {
		self.attributes
			.iter()
			.find(|(attr_name, _)| attr_name == name)
			.map(|(_, values)| values.as_slice())
	}

	/// Replaces (or inserts) the values under the given name
	pub fn set(&mut self, name: &str, values: Vec<AsfValue>) {
		if let Some((_, existing)) = self
			.attributes
			.iter_mut()
			.find(|(attr_name, _)| attr_name == name)
		{
			*existing = values;
			return;
		}

		self.attributes.push((name.to_owned(), values));
	}

	/// Removes the attribute with the given name
	pub fn remove(&mut self, name: &str) {
		self.attributes.retain(|(attr_name, _)| attr_name != name);
	}
}

#[cfg(test)]
mod tests {
	use super::{AsfTag, AsfValue};

	#[test_log::test]
	fn set_and_replace() {
		let mut tag = AsfTag::new();
		tag.set("Title", vec![AsfValue::Unicode(String::from("one"))]);
		tag.set("Title", vec![AsfValue::Unicode(String::from("two"))]);

		assert_eq!(tag.attributes().len(), 1);
		assert_eq!(
			tag.values("Title"),
			Some(&[AsfValue::Unicode(String::from("two"))][..])
		);
	}

	#[test_log::test]
	fn remove() {
		let mut tag = AsfTag::new();
		tag.set("WM/IsCompilation", vec![AsfValue::Bool(true)]);
		tag.remove("WM/IsCompilation");

		assert!(tag.is_empty());
		assert_eq!(tag.values("WM/IsCompilation"), None);
	}
}
