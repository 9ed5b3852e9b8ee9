//! The envelope container codec
//!
//! An envelope is the deterministic on-disk serialization of one
//! container: a `UTAG` magic, a format version, the reported container
//! and codec tokens, an audio-info block, and the family tag block.
//! Every tag model round-trips exactly; the ID3 block carries its
//! revision byte so a v2.3 downgrade survives a reopen.
//!
//! All framing integers are big-endian; strings and binary payloads are
//! length-prefixed. Each tag sub-record is individually length-prefixed
//! so a malformed one can be skipped under
//! [`ParsingMode::BestAttempt`](crate::config::ParsingMode::BestAttempt).

mod read;
mod write;

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::config::ParseOptions;
use crate::error::Result;
use crate::kind::FileKind;
use crate::macros::try_vec;
use crate::properties::AudioInfo;
use crate::tags::TagSet;

pub(crate) const MAGIC: [u8; 4] = *b"UTAG";
pub(crate) const VERSION: u8 = 1;

/// One parsed container: kind, audio info, and tag set
///
/// This is the boundary between [`MediaFile`](crate::MediaFile) and the
/// on-disk format. Reading and writing go through [`Envelope::read_from`]
/// and [`Envelope::write_to`]; a fresh container of a kind comes from
/// [`Envelope::create`].
#[derive(Debug)]
pub struct Envelope {
	kind: FileKind,
	info: AudioInfo,
	tag: TagSet,
}

impl Envelope {
	/// Creates an empty envelope of the given kind
	pub fn create(kind: FileKind) -> Self {
		Self {
			kind,
			info: AudioInfo::new(),
			tag: TagSet::new(kind.family()),
		}
	}

	/// The detected file kind
	pub fn kind(&self) -> FileKind {
		self.kind
	}

	/// The audio properties the container reported
	pub fn info(&self) -> &AudioInfo {
		&self.info
	}

	/// Mutable access to the audio properties
	pub fn info_mut(&mut self) -> &mut AudioInfo {
		&mut self.info
	}

	/// The tag set
	pub fn tag(&self) -> &TagSet {
		&self.tag
	}

	/// Mutable access to the tag set
	pub fn tag_mut(&mut self) -> &mut TagSet {
		&mut self.tag
	}

	/// Replaces the tag set with an empty one of the kind's family
	pub fn clear_tag(&mut self) {
		self.tag = TagSet::new(self.kind.family());
	}

	/// Reads an envelope
	///
	/// # Errors
	///
	/// * [`ErrorKind::UnknownFormat`](crate::error::ErrorKind::UnknownFormat):
	///   the magic does not match
	/// * [`ErrorKind::UnsupportedFormat`](crate::error::ErrorKind::UnsupportedFormat):
	///   the container token has no kind mapping
	/// * [`ErrorKind::FileDecoding`](crate::error::ErrorKind::FileDecoding):
	///   malformed content (always for the header; for tag sub-records
	///   only under [`ParsingMode::Strict`](crate::config::ParsingMode::Strict))
	pub fn read_from<R: Read>(reader: &mut R, parse_options: ParseOptions) -> Result<Self> {
		read::read_from(reader, parse_options)
	}

	/// Writes the envelope
	///
	/// # Errors
	///
	/// * [`ErrorKind::Io`](crate::error::ErrorKind::Io)
	pub fn write_to<W: std::io::Write>(&self, writer: &mut W) -> Result<()> {
		write::write_to(self, writer)
	}

	pub(crate) fn from_parts(kind: FileKind, info: AudioInfo, tag: TagSet) -> Self {
		Self { kind, info, tag }
	}
}

// Framing primitives shared by the reader and the writer.

pub(super) fn read_string<R: Read>(reader: &mut R) -> Result<String> {
	Ok(String::from_utf8(read_bytes(reader)?)?)
}

pub(super) fn read_bytes<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
	let length = reader.read_u32::<BigEndian>()? as usize;
	let mut content = try_vec![0; length];
	reader.read_exact(&mut content)?;
	Ok(content)
}

pub(super) fn write_string<W: std::io::Write>(writer: &mut W, value: &str) -> Result<()> {
	write_bytes(writer, value.as_bytes())
}

pub(super) fn write_bytes<W: std::io::Write>(writer: &mut W, value: &[u8]) -> Result<()> {
	writer.write_u32::<BigEndian>(value.len() as u32)?;
	writer.write_all(value)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;
	use std::time::Duration;

	use super::Envelope;
	use crate::config::{ParseOptions, ParsingMode};
	use crate::error::ErrorKind;
	use crate::kind::{FileKind, TagFamily};
	use crate::picture::{Image, ImageType};
	use crate::properties::BitrateMode;
	use crate::tags::{ApeItemValue, AsfValue, AtomData, Frame, Id3Revision};

	fn round_trip(envelope: &Envelope) -> Envelope {
		let mut buffer = Vec::new();
		envelope.write_to(&mut buffer).unwrap();
		Envelope::read_from(&mut Cursor::new(buffer), ParseOptions::new()).unwrap()
	}

	#[test_log::test]
	fn bad_magic_is_an_unknown_format() {
		let mut reader = Cursor::new(b"OggS\x00\x00\x00\x00".to_vec());
		let err = Envelope::read_from(&mut reader, ParseOptions::new()).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::UnknownFormat));
	}

	#[test_log::test]
	fn truncated_header_is_unreadable() {
		let mut reader = Cursor::new(b"UT".to_vec());
		assert!(Envelope::read_from(&mut reader, ParseOptions::new()).is_err());
	}

	#[test_log::test]
	fn audio_info_round_trips() {
		let mut envelope = Envelope::create(FileKind::Mp3);
		let info = envelope.info_mut();
		info.set_duration(Duration::from_millis(183_500));
		info.set_sample_rate(44_100);
		info.set_channels(2);
		info.set_bitrate(192_000);
		info.set_bitrate_mode(BitrateMode::Vbr);
		info.set_encoder_info(String::from("LAME 3.97.0"));

		let reopened = round_trip(&envelope);
		assert_eq!(reopened.kind(), FileKind::Mp3);
		assert_eq!(reopened.info(), envelope.info());
		assert!(reopened.info().bit_depth().is_none());
	}

	#[test_log::test]
	fn id3_tag_round_trips_with_revision() {
		let mut envelope = Envelope::create(FileKind::Mp3);
		{
			let id3 = envelope.tag_mut().id3_mut().unwrap();
			id3.set_revision(Id3Revision::V23);
			id3.set_text("TIT2", vec![String::from("Test α")]);
			id3.push(Frame::ExtendedText {
				id: String::from("TXXX"),
				description: String::from("ASIN"),
				language: String::new(),
				values: vec![String::from("B000002UAL")],
			});
			id3.push(Frame::Url {
				description: String::new(),
				url: String::from("https://example.org"),
			});
			id3.push(Frame::People {
				id: String::from("TIPL"),
				pairs: vec![(String::from("arranger"), String::from("A. Ranger"))],
			});
			id3.push(Frame::UniqueFileId {
				owner: String::from("http://musicbrainz.org"),
				data: b"8b882575".to_vec(),
			});

			let mut image = Image::from_data(vec![0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3, 4]);
			image.set_image_type(Some(ImageType::FrontCover));
			image.set_description(Some(String::from("front")));
			id3.push(Frame::Picture(image));
		}

		let reopened = round_trip(&envelope);
		let id3 = reopened.tag().id3().unwrap();
		assert_eq!(id3.revision(), Id3Revision::V23);
		assert_eq!(id3.frames(), envelope.tag().id3().unwrap().frames());
	}

	#[test_log::test]
	fn ilst_tag_round_trips() {
		let mut envelope = Envelope::create(FileKind::Alac);
		{
			let ilst = envelope.tag_mut().ilst_mut().unwrap();
			ilst.set("\u{a9}nam", AtomData::Utf8(vec![String::from("Test α")]));
			ilst.set("tmpo", AtomData::Int(vec![128]));
			ilst.set("cpil", AtomData::Bool(true));
			ilst.set("trkn", AtomData::Pair(vec![(3, 12)]));
		}

		let reopened = round_trip(&envelope);
		assert_eq!(reopened.kind(), FileKind::Alac);
		assert_eq!(
			reopened.tag().ilst().unwrap().atoms(),
			envelope.tag().ilst().unwrap().atoms()
		);
	}

	#[test_log::test]
	fn asf_tag_round_trips() {
		let mut envelope = Envelope::create(FileKind::Asf);
		{
			let asf = envelope.tag_mut().asf_mut().unwrap();
			asf.set(
				"Title",
				vec![AsfValue::Unicode(String::from("Test α"))],
			);
			asf.set("WM/IsCompilation", vec![AsfValue::Bool(true)]);
			asf.set("WM/Picture", vec![AsfValue::Bytes(vec![1, 2, 3])]);
		}

		let reopened = round_trip(&envelope);
		assert_eq!(
			reopened.tag().asf().unwrap().attributes(),
			envelope.tag().asf().unwrap().attributes()
		);
	}

	#[test_log::test]
	fn vorbis_tag_round_trips_with_vendor_and_pictures() {
		let mut envelope = Envelope::create(FileKind::Flac);
		{
			let vorbis = envelope.tag_mut().vorbis_mut().unwrap();
			vorbis.set_vendor(String::from("reference libFLAC 1.3.2"));
			vorbis.set_all("TITLE", vec![String::from("Test α")]);
			vorbis.set_all(
				"GENRE",
				vec![String::from("Ska"), String::from("Dub")],
			);

			let mut image = Image::from_data(vec![0x89, b'P', b'N', b'G', 0, 0, 0, 0]);
			image.set_image_type(Some(ImageType::FrontCover));
			vorbis.set_pictures(vec![image]);
		}

		let reopened = round_trip(&envelope);
		let vorbis = reopened.tag().vorbis().unwrap();
		assert_eq!(vorbis.vendor(), "reference libFLAC 1.3.2");
		assert_eq!(vorbis.items(), envelope.tag().vorbis().unwrap().items());
		assert_eq!(vorbis.pictures().len(), 1);
		assert_eq!(
			vorbis.pictures()[0].image_type(),
			Some(ImageType::FrontCover)
		);
	}

	#[test_log::test]
	fn ape_tag_round_trips() {
		let mut envelope = Envelope::create(FileKind::WavPack);
		{
			let ape = envelope.tag_mut().ape_mut().unwrap();
			ape.insert(
				"Title",
				ApeItemValue::Text(vec![String::from("Test α")]),
			);
			ape.insert(
				"Cover Art (Front)",
				ApeItemValue::Binary(b"front\0payload".to_vec()),
			);
		}

		let reopened = round_trip(&envelope);
		assert_eq!(
			reopened.tag().ape().unwrap().items(),
			envelope.tag().ape().unwrap().items()
		);
	}

	#[test_log::test]
	fn empty_tag_stays_empty() {
		let envelope = Envelope::create(FileKind::Opus);
		let reopened = round_trip(&envelope);
		assert_eq!(reopened.tag().family(), TagFamily::VorbisComments);
		assert!(reopened.tag().is_empty());
	}

	#[test_log::test]
	fn skipping_properties_reads_an_empty_info() {
		let mut envelope = Envelope::create(FileKind::Flac);
		envelope.info_mut().set_sample_rate(48_000);
		envelope
			.tag_mut()
			.vorbis_mut()
			.unwrap()
			.set_all("TITLE", vec![String::from("still read")]);

		let mut buffer = Vec::new();
		envelope.write_to(&mut buffer).unwrap();

		let options = ParseOptions::new().read_properties(false);
		let reopened = Envelope::read_from(&mut Cursor::new(buffer), options).unwrap();

		assert!(reopened.info().sample_rate().is_none());
		assert_eq!(
			reopened.tag().vorbis().unwrap().first("TITLE"),
			Some("still read")
		);
	}

	// A FLAC envelope with an empty info block and an appended record of
	// the unknown type 0xEE. The record count is patched to include it.
	fn buffer_with_bogus_record() -> Vec<u8> {
		let mut envelope = Envelope::create(FileKind::Flac);
		envelope
			.tag_mut()
			.vorbis_mut()
			.unwrap()
			.set_all("TITLE", vec![String::from("kept")]);

		let mut buffer = Vec::new();
		envelope.write_to(&mut buffer).unwrap();

		// magic + version + "FLAC" token + absent codec token + eight
		// absent info fields + family byte + empty vendor
		let count_offset = 4 + 1 + (4 + 4) + 1 + 8 + 1 + 4;
		let old_count = u32::from_be_bytes(
			buffer[count_offset..count_offset + 4].try_into().unwrap(),
		);
		buffer[count_offset..count_offset + 4]
			.copy_from_slice(&(old_count + 1).to_be_bytes());
		buffer.push(0xEE);
		buffer.extend(4u32.to_be_bytes());
		buffer.extend([0xDE, 0xAD, 0xBE, 0xEF]);
		buffer
	}

	#[test_log::test]
	fn malformed_record_skipped_by_default_fatal_in_strict() {
		let buffer = buffer_with_bogus_record();

		let reopened =
			Envelope::read_from(&mut Cursor::new(buffer.clone()), ParseOptions::new()).unwrap();
		assert_eq!(
			reopened.tag().vorbis().unwrap().first("TITLE"),
			Some("kept")
		);

		let strict = ParseOptions::new().parsing_mode(ParsingMode::Strict);
		let err = Envelope::read_from(&mut Cursor::new(buffer), strict).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::FileDecoding(_)));
	}
}
