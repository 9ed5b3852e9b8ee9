//! The Vorbis comment model
//!
//! Carried by FLAC, OGG Vorbis/Opus/Speex, and OGG FLAC containers.
//! Keys are case-insensitive and a key may repeat. FLAC files
//! additionally carry native picture blocks outside the comment list.

use crate::picture::Image;

/// A Vorbis comment list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VorbisComments {
	/// An identifier for the encoding software
	pub(crate) vendor: String,
	/// A collection of key/value pairs
	pub(crate) items: Vec<(String, String)>,
	/// FLAC native picture blocks; unused by the pure OGG kinds
	pub(crate) pictures: Vec<Image>,
}

impl VorbisComments {
	/// Create a new empty `VorbisComments`
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// The vendor string
	pub fn vendor(&self) -> &str {
		&self.vendor
	}

	/// Sets the vendor string
	pub fn set_vendor(&mut self, vendor: String) {
		self.vendor = vendor;
	}

	/// All key/value pairs, in order
	pub fn items(&self) -> &[(String, String)] {
		&self.items
	}

	/// Whether the comment list and picture list are both empty
	pub fn is_empty(&self) -> bool {
		self.items.is_empty() && self.pictures.is_empty()
	}

	/// The first value stored under the given key (case-insensitive)
	pub fn first(&self, key: &str) -> Option<&str> {
		self.items
			.iter()
			.find(|(item_key, _)| item_key.eq_ignore_ascii_case(key))
			.map(|(_, value)| value.as_str())
	}

	/// All values stored under the given key, in order
	pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
		self.items
			.iter()
			.filter(move |(item_key, _)| item_key.eq_ignore_ascii_case(key))
			.map(|(_, value)| value.as_str())
	}

	/// Whether any value is stored under the given key
	pub fn contains(&self, key: &str) -> bool {
		self.items
			.iter()
			.any(|(item_key, _)| item_key.eq_ignore_ascii_case(key))
	}

	/// Replaces every value under the given key
	pub fn set_all(&mut self, key: &str, values: Vec<String>) {
		self.remove(key);
		for value in values {
			self.items.push((key.to_owned(), value));
		}
	}

	/// Removes every value under the given key
	pub fn remove(&mut self, key: &str) {
		self.items
			.retain(|(item_key, _)| !item_key.eq_ignore_ascii_case(key));
	}

	/// The native FLAC picture blocks
	pub fn pictures(&self) -> &[Image] {
		&self.pictures
	}

	/// Replaces the native FLAC picture blocks
	pub fn set_pictures(&mut self, pictures: Vec<Image>) {
		self.pictures = pictures;
	}

	/// Removes every native FLAC picture block
	pub fn clear_pictures(&mut self) {
		self.pictures.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::VorbisComments;

	#[test_log::test]
	fn keys_are_case_insensitive() {
		let mut tag = VorbisComments::new();
		tag.set_all("Title", vec![String::from("x")]);

		assert_eq!(tag.first("TITLE"), Some("x"));
		assert!(tag.contains("title"));

		tag.set_all("TITLE", vec![String::from("y")]);
		assert_eq!(tag.items().len(), 1);
		assert_eq!(tag.first("title"), Some("y"));

		tag.remove("tItLe");
		assert!(tag.is_empty());
	}

	#[test_log::test]
	fn repeated_keys_keep_order() {
		let mut tag = VorbisComments::new();
		tag.set_all(
			"GENRE",
			vec![String::from("Ska"), String::from("Reggae")],
		);

		let values: Vec<_> = tag.get_all("genre").collect();
		assert_eq!(values, ["Ska", "Reggae"]);
		assert_eq!(tag.first("genre"), Some("Ska"));
	}
}
