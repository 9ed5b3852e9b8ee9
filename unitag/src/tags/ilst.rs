//! The MP4 `ilst` atom model
//!
//! Carried by AAC and ALAC containers. Each atom ident maps to exactly
//! one atom; freeform idents use the full `----:<mean>:<name>` form.

/// The storage format of a `covr` atom entry
///
/// MP4 cover atoms only carry these two formats; attempting to store
/// anything else is an encoding error.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum IlstPictureFormat {
	/// A PNG payload
	Png,
	/// A JPEG payload
	Jpeg,
}

/// One entry of a `covr` atom
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct IlstPicture {
	/// The declared payload format
	pub format: IlstPictureFormat,
	/// The payload bytes
	pub data: Vec<u8>,
}

/// The data one atom carries
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AtomData {
	/// UTF-8 text values
	Utf8(Vec<String>),
	/// Integer values (e.g. `tmpo`)
	Int(Vec<i64>),
	/// A boolean flag (e.g. `cpil`)
	Bool(bool),
	/// Fixed pairs of numbers (e.g. `trkn`, `disk`)
	Pair(Vec<(u16, u16)>),
	/// Cover art entries (`covr`)
	Pictures(Vec<IlstPicture>),
}

/// A single `ilst` atom
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
	/// The atom ident, e.g. `©nam` or `----:com.apple.iTunes:ASIN`
	pub ident: String,
	/// The carried data
	pub data: AtomData,
}

/// An MP4 `ilst` tag
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IlstTag {
	pub(crate) atoms: Vec<Atom>,
}

impl IlstTag {
	/// Create a new empty `IlstTag`
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// All atoms, in order
	pub fn atoms(&self) -> &[Atom] {
		&self.atoms
	}

	/// Whether the tag carries no atoms
	pub fn is_empty(&self) -> bool {
		self.atoms.is_empty()
	}

	/// The data of the atom with the given ident
	pub fn get(&self, ident: &str) -> Option<&AtomData> {
		self.atoms
			.iter()
			.find(|atom| atom.ident == ident)
			.map(|atom| &atom.data)
	}

	/// Replaces (or inserts) the atom with the given ident
	pub fn set(&mut self, ident: &str, data: AtomData) {
		if let Some(atom) = self.atoms.iter_mut().find(|atom| atom.ident == ident) {
			atom.data = data;
			return;
		}

		self.atoms.push(Atom {
			ident: ident.to_owned(),
			data,
		});
	}

	/// Removes the atom with the given ident
	pub fn remove(&mut self, ident: &str) {
		self.atoms.retain(|atom| atom.ident != ident);
	}
}

#[cfg(test)]
mod tests {
	use super::{AtomData, IlstTag};

	#[test_log::test]
	fn set_replaces_in_place() {
		let mut tag = IlstTag::new();
		tag.set("©nam", AtomData::Utf8(vec![String::from("one")]));
		tag.set("trkn", AtomData::Pair(vec![(1, 12)]));
		tag.set("©nam", AtomData::Utf8(vec![String::from("two")]));

		assert_eq!(tag.atoms().len(), 2);
		assert_eq!(
			tag.get("©nam"),
			Some(&AtomData::Utf8(vec![String::from("two")]))
		);
		// Replacement does not reorder
		assert_eq!(tag.atoms()[0].ident, "©nam");
	}

	#[test_log::test]
	fn idents_are_exact_match() {
		let mut tag = IlstTag::new();
		tag.set("ASIN", AtomData::Utf8(vec![String::from("B0000")]));

		assert_eq!(tag.get("asin"), None);
	}
}
