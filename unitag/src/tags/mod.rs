//! Parsed per-family tag models
//!
//! One [`TagSet`] is the in-memory representation of a single file's
//! tags, exclusively owned by the [`MediaFile`](crate::MediaFile) that
//! opened it. The variants mirror the five tag families; the storage
//! strategies in [`strategy`](crate::strategy) know how to locate one
//! slot inside each of them.

pub mod ape;
pub mod asf;
pub mod id3;
pub mod ilst;
pub mod vorbis;

pub use ape::{ApeItem, ApeItemValue, ApeTag};
pub use asf::{AsfTag, AsfValue};
pub use id3::{Frame, Id3Revision, Id3Tag};
pub use ilst::{Atom, AtomData, IlstPicture, IlstPictureFormat, IlstTag};
pub use vorbis::VorbisComments;

use crate::kind::TagFamily;

/// The tag set of one open container
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TagSet {
	/// ID3v2 frames
	Id3(Id3Tag),
	/// MP4 `ilst` atoms
	Ilst(IlstTag),
	/// ASF attributes
	Asf(AsfTag),
	/// Vorbis comments
	Vorbis(VorbisComments),
	/// APEv2 items
	Ape(ApeTag),
}

impl TagSet {
	/// Create an empty tag set of the given family
	pub fn new(family: TagFamily) -> Self {
		match family {
			TagFamily::Id3 => TagSet::Id3(Id3Tag::default()),
			TagFamily::Ilst => TagSet::Ilst(IlstTag::default()),
			TagFamily::Asf => TagSet::Asf(AsfTag::default()),
			TagFamily::VorbisComments => TagSet::Vorbis(VorbisComments::default()),
			TagFamily::Ape => TagSet::Ape(ApeTag::default()),
		}
	}

	/// The [`TagFamily`] of this tag set
	pub fn family(&self) -> TagFamily {
		match self {
			TagSet::Id3(_) => TagFamily::Id3,
			TagSet::Ilst(_) => TagFamily::Ilst,
			TagSet::Asf(_) => TagFamily::Asf,
			TagSet::Vorbis(_) => TagFamily::VorbisComments,
			TagSet::Ape(_) => TagFamily::Ape,
		}
	}

	/// Whether the tag set carries no items at all
	pub fn is_empty(&self) -> bool {
		match self {
			TagSet::Id3(tag) => tag.is_empty(),
			TagSet::Ilst(tag) => tag.is_empty(),
			TagSet::Asf(tag) => tag.is_empty(),
			TagSet::Vorbis(tag) => tag.is_empty(),
			TagSet::Ape(tag) => tag.is_empty(),
		}
	}

	pub(crate) fn id3(&self) -> Option<&Id3Tag> {
		match self {
			TagSet::Id3(tag) => Some(tag),
			_ => None,
		}
	}

	pub(crate) fn id3_mut(&mut self) -> Option<&mut Id3Tag> {
		match self {
			TagSet::Id3(tag) => Some(tag),
			_ => None,
		}
	}

	pub(crate) fn ilst(&self) -> Option<&IlstTag> {
		match self {
			TagSet::Ilst(tag) => Some(tag),
			_ => None,
		}
	}

	pub(crate) fn ilst_mut(&mut self) -> Option<&mut IlstTag> {
		match self {
			TagSet::Ilst(tag) => Some(tag),
			_ => None,
		}
	}

	pub(crate) fn asf(&self) -> Option<&AsfTag> {
		match self {
			TagSet::Asf(tag) => Some(tag),
			_ => None,
		}
	}

	pub(crate) fn asf_mut(&mut self) -> Option<&mut AsfTag> {
		match self {
			TagSet::Asf(tag) => Some(tag),
			_ => None,
		}
	}

	pub(crate) fn vorbis(&self) -> Option<&VorbisComments> {
		match self {
			TagSet::Vorbis(tag) => Some(tag),
			_ => None,
		}
	}

	pub(crate) fn vorbis_mut(&mut self) -> Option<&mut VorbisComments> {
		match self {
			TagSet::Vorbis(tag) => Some(tag),
			_ => None,
		}
	}

	pub(crate) fn ape(&self) -> Option<&ApeTag> {
		match self {
			TagSet::Ape(tag) => Some(tag),
			_ => None,
		}
	}

	pub(crate) fn ape_mut(&mut self) -> Option<&mut ApeTag> {
		match self {
			TagSet::Ape(tag) => Some(tag),
			_ => None,
		}
	}
}
