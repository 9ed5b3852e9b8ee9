//! The ID3v2 frame model
//!
//! Carried by MP3, AIFF, DSF, and WAV containers. Frames are kept in
//! file order; several frames may share an id (`TXXX`/`COMM` frames are
//! disambiguated by description, `APIC` frames simply repeat).

use crate::picture::Image;

/// The ID3v2 frame revision a tag is stored in
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[non_exhaustive]
pub enum Id3Revision {
	/// ID3v2.3, the legacy revision old software expects
	V23,
	/// ID3v2.4
	#[default]
	V24,
}

/// A single ID3v2 frame
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Frame {
	/// A text information frame (`T***`), possibly multi-valued
	Text {
		/// The frame id, e.g. `TIT2`
		id: String,
		/// The frame's values, in order
		values: Vec<String>,
	},
	/// A description-selected text frame (`TXXX`, `COMM`, `USLT`)
	ExtendedText {
		/// The frame id
		id: String,
		/// The description disambiguating frames sharing the id
		description: String,
		/// ISO-639-2 language code; empty for `TXXX`
		language: String,
		/// The frame's values, in order
		values: Vec<String>,
	},
	/// A user-defined URL frame (`WXXX`)
	Url {
		/// The description disambiguating `WXXX` frames
		description: String,
		/// The URL payload
		url: String,
	},
	/// An involved-people frame (`TIPL`), role/person pairs
	People {
		/// The frame id
		id: String,
		/// `(role, person)` pairs, in order
		pairs: Vec<(String, String)>,
	},
	/// A unique file identifier frame (`UFID`)
	UniqueFileId {
		/// The identifier namespace
		owner: String,
		/// The identifier payload
		data: Vec<u8>,
	},
	/// An attached picture frame (`APIC`)
	Picture(Image),
}

impl Frame {
	/// The frame id this frame is stored under
	pub fn id(&self) -> &str {
		match self {
			Frame::Text { id, .. }
			| Frame::ExtendedText { id, .. }
			| Frame::People { id, .. } => id,
			Frame::Url { .. } => "WXXX",
			Frame::UniqueFileId { .. } => "UFID",
			Frame::Picture(_) => "APIC",
		}
	}
}

/// An ID3v2 tag
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Id3Tag {
	pub(crate) revision: Id3Revision,
	pub(crate) frames: Vec<Frame>,
}

impl Id3Tag {
	/// Create a new empty `Id3Tag`
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// The frame revision the tag was read in (or will be written in)
	pub fn revision(&self) -> Id3Revision {
		self.revision
	}

	/// Sets the frame revision
	pub fn set_revision(&mut self, revision: Id3Revision) {
		self.revision = revision;
	}

	/// All frames, in order
	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	pub(crate) fn frames_mut(&mut self) -> &mut Vec<Frame> {
		&mut self.frames
	}

	/// Whether the tag carries no frames
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// Appends a frame
	pub fn push(&mut self, frame: Frame) {
		self.frames.push(frame);
	}

	/// The values of the first [`Frame::Text`] with the given id
	pub fn text_values(&self, id: &str) -> Option<&[String]> {
		self.frames.iter().find_map(|frame| match frame {
			Frame::Text { id: frame_id, values } if frame_id == id => Some(values.as_slice()),
			_ => None,
		})
	}

	/// The first value of the first [`Frame::Text`] with the given id
	pub fn text(&self, id: &str) -> Option<&str> {
		self.text_values(id)?.first().map(String::as_str)
	}

	/// Replaces every frame with the given id by one text frame
	pub fn set_text(&mut self, id: &str, values: Vec<String>) {
		self.remove_all(id);
		self.frames.push(Frame::Text {
			id: id.to_owned(),
			values,
		});
	}

	/// Removes every frame with the given id
	pub fn remove_all(&mut self, id: &str) {
		self.frames.retain(|frame| frame.id() != id);
	}

	/// Rewrites the tag to the ID3v2.3 revision
	///
	/// `join_descriptions` names the `TXXX` descriptions whose
	/// multi-valued frames old readers expect as one `/`-joined value.
	pub fn downgrade_to_v23(&mut self, join_descriptions: &[String]) {
		self.revision = Id3Revision::V23;

		for frame in &mut self.frames {
			let Frame::ExtendedText {
				id,
				description,
				values,
				..
			} = frame
			else {
				continue;
			};

			if id != "TXXX" || values.len() < 2 {
				continue;
			}

			if join_descriptions
				.iter()
				.any(|desc| desc.eq_ignore_ascii_case(description))
			{
				*values = vec![values.join("/")];
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{Frame, Id3Revision, Id3Tag};

	#[test_log::test]
	fn set_text_replaces_all() {
		let mut tag = Id3Tag::new();
		tag.set_text("TIT2", vec![String::from("one")]);
		tag.set_text("TIT2", vec![String::from("two")]);

		assert_eq!(tag.frames().len(), 1);
		assert_eq!(tag.text("TIT2"), Some("two"));
	}

	#[test_log::test]
	fn remove_all_spares_other_ids() {
		let mut tag = Id3Tag::new();
		tag.set_text("TIT2", vec![String::from("title")]);
		tag.set_text("TALB", vec![String::from("album")]);
		tag.remove_all("TIT2");

		assert_eq!(tag.text("TIT2"), None);
		assert_eq!(tag.text("TALB"), Some("album"));
	}

	#[test_log::test]
	fn v23_downgrade_joins_flagged_frames() {
		let mut tag = Id3Tag::new();
		tag.push(Frame::ExtendedText {
			id: String::from("TXXX"),
			description: String::from("MusicBrainz Artist Id"),
			language: String::new(),
			values: vec![String::from("a"), String::from("b")],
		});
		tag.push(Frame::ExtendedText {
			id: String::from("TXXX"),
			description: String::from("ASIN"),
			language: String::new(),
			values: vec![String::from("x"), String::from("y")],
		});

		tag.downgrade_to_v23(&[String::from("musicbrainz artist id")]);

		assert_eq!(tag.revision(), Id3Revision::V23);
		let values: Vec<_> = tag
			.frames()
			.iter()
			.filter_map(|frame| match frame {
				Frame::ExtendedText { values, .. } => Some(values.clone()),
				_ => None,
			})
			.collect();
		assert_eq!(values[0], vec![String::from("a/b")]);
		assert_eq!(values[1], vec![String::from("x"), String::from("y")]);
	}
}
