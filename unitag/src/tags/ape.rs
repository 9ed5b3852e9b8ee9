//! The APEv2 item model
//!
//! Carried by Monkey's Audio, Musepack, and WavPack containers. Item
//! keys are case-insensitive and unique within a tag; a text item may
//! carry several values.

/// The value of one APE item
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ApeItemValue {
	/// UTF-8 text values
	Text(Vec<String>),
	/// A binary payload (e.g. a cover-art item)
	Binary(Vec<u8>),
}

/// A single APEv2 item
#[derive(Debug, Clone, PartialEq)]
pub struct ApeItem {
	/// The item key
	pub key: String,
	/// The carried value
	pub value: ApeItemValue,
}

/// An APEv2 tag
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApeTag {
	pub(crate) items: Vec<ApeItem>,
}

impl ApeTag {
	/// Create a new empty `ApeTag`
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// All items, in order
	pub fn items(&self) -> &[ApeItem] {
		&self.items
	}

	/// Whether the tag carries no items
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// The item stored under the given key (case-insensitive)
	pub fn get(&self, key: &str) -> Option<&ApeItem> {
		self.items
			.iter()
			.find(|item| item.key.eq_ignore_ascii_case(key))
	}

	/// Replaces (or inserts) the item under the given key
	pub fn insert(&mut self, key: &str, value: ApeItemValue) {
		if let Some(item) = self
			.items
			.iter_mut()
			.find(|item| item.key.eq_ignore_ascii_case(key))
		{
			item.value = value;
			return;
		}

		self.items.push(ApeItem {
			key: key.to_owned(),
			value,
		});
	}

	/// Removes the item under the given key
	pub fn remove(&mut self, key: &str) {
		self.items
			.retain(|item| !item.key.eq_ignore_ascii_case(key));
	}
}
