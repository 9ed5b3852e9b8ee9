//! Format-agnostic embedded image handling
//!
//! [`Image`] is the canonical representation of one piece of embedded
//! artwork. The per-family wire layouts (ID3 `APIC` frames, ASF
//! `WM/Picture` attributes, FLAC picture blocks, base64 Vorbis comments,
//! and APE cover-art items) are converted to and from `Image` here.

use crate::error::{ErrorKind, Result, UnitagError};
use crate::macros::{err, try_vec};
use crate::util::text::{utf8_decode_dropping, utf16le_decode_terminated, utf16le_encode_terminated};

use std::fmt::{Debug, Display, Formatter};
use std::io::{Cursor, Read, Seek, SeekFrom};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt as _};
use data_encoding::BASE64;

/// APE cover-art item keys, indexed by [`ImageType`] code
pub const APE_PICTURE_KEYS: [&str; 21] = [
	"Cover Art (Other)",
	"Cover Art (Icon)",
	"Cover Art (Other Icon)",
	"Cover Art (Front)",
	"Cover Art (Back)",
	"Cover Art (Leaflet)",
	"Cover Art (Media)",
	"Cover Art (Lead Artist)",
	"Cover Art (Artist)",
	"Cover Art (Conductor)",
	"Cover Art (Band)",
	"Cover Art (Composer)",
	"Cover Art (Lyricist)",
	"Cover Art (Recording Location)",
	"Cover Art (During Recording)",
	"Cover Art (During Performance)",
	"Cover Art (Screen Capture)",
	"Cover Art (Bright Fish)",
	"Cover Art (Illustration)",
	"Cover Art (Band Logo)",
	"Cover Art (Publisher Logo)",
];

/// MIME types for pictures.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
	/// TIFF image
	Tiff,
	/// BMP image
	Bmp,
	/// GIF image
	Gif,
	/// Some unknown MIME type
	Unknown(String),
}

impl MimeType {
	/// Get a `MimeType` from a string
	///
	/// # Examples
	///
	/// ```rust
	/// use unitag::picture::MimeType;
	///
	/// assert_eq!(MimeType::from_str("image/jpeg"), MimeType::Jpeg);
	/// ```
	#[must_use]
	#[allow(clippy::should_implement_trait)] // Infallible in contrast to FromStr
	pub fn from_str(mime_type: &str) -> Self {
		match &*mime_type.to_lowercase() {
			"image/jpeg" | "image/jpg" => Self::Jpeg,
			"image/png" => Self::Png,
			"image/tiff" => Self::Tiff,
			"image/bmp" => Self::Bmp,
			"image/gif" => Self::Gif,
			_ => Self::Unknown(mime_type.to_owned()),
		}
	}

	/// Get a &str from a `MimeType`
	///
	/// # Examples
	///
	/// ```rust
	/// use unitag::picture::MimeType;
	///
	/// assert_eq!(MimeType::Jpeg.as_str(), "image/jpeg")
	/// ```
	#[must_use]
	pub fn as_str(&self) -> &str {
		match self {
			MimeType::Jpeg => "image/jpeg",
			MimeType::Png => "image/png",
			MimeType::Tiff => "image/tiff",
			MimeType::Bmp => "image/bmp",
			MimeType::Gif => "image/gif",
			MimeType::Unknown(unknown) => unknown,
		}
	}

	/// Returns the extension for the `MimeType` if it is known
	///
	/// # Examples
	///
	/// ```rust
	/// use unitag::picture::MimeType;
	///
	/// assert_eq!(MimeType::Jpeg.ext(), Some("jpg"));
	/// ```
	pub fn ext(&self) -> Option<&str> {
		match self {
			MimeType::Jpeg => Some("jpg"),
			MimeType::Png => Some("png"),
			MimeType::Tiff => Some("tif"),
			MimeType::Bmp => Some("bmp"),
			MimeType::Gif => Some("gif"),
			MimeType::Unknown(_) => None,
		}
	}

	/// Sniffs a `MimeType` from the signature bytes of an image payload
	///
	/// # Errors
	///
	/// `bytes` does not begin with a recognized image signature
	pub fn from_signature(bytes: &[u8]) -> Result<Self> {
		if bytes.len() < 8 {
			err!(NotAPicture);
		}

		match bytes[..8] {
			[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A] => Ok(MimeType::Png),
			[0xFF, 0xD8, ..] => Ok(MimeType::Jpeg),
			[b'G', b'I', b'F', 0x38, 0x37 | 0x39, b'a', ..] => Ok(MimeType::Gif),
			[b'B', b'M', ..] => Ok(MimeType::Bmp),
			[b'I', b'I', b'*', 0x00, ..] | [b'M', b'M', 0x00, b'*', ..] => Ok(MimeType::Tiff),
			_ => err!(NotAPicture),
		}
	}
}

impl Display for MimeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The kind of artwork an [`Image`] represents, according to ID3v2 APIC
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ImageType {
	Other,
	FileIcon,
	OtherIcon,
	FrontCover,
	BackCover,
	Leaflet,
	Media,
	LeadArtist,
	Artist,
	Conductor,
	Band,
	Composer,
	Lyricist,
	RecordingLocation,
	DuringRecording,
	DuringPerformance,
	ScreenCapture,
	BrightFish,
	Illustration,
	BandLogo,
	PublisherLogo,
}

impl ImageType {
	/// All types, in code order
	pub const ALL: [ImageType; 21] = [
		Self::Other,
		Self::FileIcon,
		Self::OtherIcon,
		Self::FrontCover,
		Self::BackCover,
		Self::Leaflet,
		Self::Media,
		Self::LeadArtist,
		Self::Artist,
		Self::Conductor,
		Self::Band,
		Self::Composer,
		Self::Lyricist,
		Self::RecordingLocation,
		Self::DuringRecording,
		Self::DuringPerformance,
		Self::ScreenCapture,
		Self::BrightFish,
		Self::Illustration,
		Self::BandLogo,
		Self::PublisherLogo,
	];

	/// Get a `u8` from an `ImageType` according to ID3v2 APIC
	pub fn as_u8(&self) -> u8 {
		match self {
			Self::Other => 0,
			Self::FileIcon => 1,
			Self::OtherIcon => 2,
			Self::FrontCover => 3,
			Self::BackCover => 4,
			Self::Leaflet => 5,
			Self::Media => 6,
			Self::LeadArtist => 7,
			Self::Artist => 8,
			Self::Conductor => 9,
			Self::Band => 10,
			Self::Composer => 11,
			Self::Lyricist => 12,
			Self::RecordingLocation => 13,
			Self::DuringRecording => 14,
			Self::DuringPerformance => 15,
			Self::ScreenCapture => 16,
			Self::BrightFish => 17,
			Self::Illustration => 18,
			Self::BandLogo => 19,
			Self::PublisherLogo => 20,
		}
	}

	/// Get an `ImageType` from a `u8` according to ID3v2 APIC
	///
	/// An unknown code reads as [`ImageType::Other`].
	pub fn from_u8(byte: u8) -> Self {
		match Self::ALL.get(usize::from(byte)) {
			Some(ty) => *ty,
			None => {
				log::debug!("Ignoring unknown image type code {}", byte);
				Self::Other
			},
		}
	}

	/// Get the APE cover-art item key for an `ImageType`
	pub fn as_ape_key(&self) -> &'static str {
		APE_PICTURE_KEYS[usize::from(self.as_u8())]
	}

	/// Get an `ImageType` from an APE cover-art item key
	///
	/// The match is case-insensitive; an unrecognized key reads as
	/// [`ImageType::Other`].
	pub fn from_ape_key(key: &str) -> Self {
		for (i, ape_key) in APE_PICTURE_KEYS.iter().enumerate() {
			if ape_key.eq_ignore_ascii_case(key) {
				return Self::ALL[i];
			}
		}

		Self::Other
	}
}

/// An embedded image and its metadata
///
/// The MIME type is never stored; it is derived on demand from the
/// payload's binary signature via [`Image::mime_type`].
#[derive(Clone, Eq, PartialEq, Hash, Default)]
pub struct Image {
	pub(crate) data: Vec<u8>,
	pub(crate) description: Option<String>,
	pub(crate) image_type: Option<ImageType>,
}

impl Debug for Image {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Image")
			.field("image_type", &self.image_type)
			.field("description", &self.description)
			.field("data", &format!("<{} bytes>", self.data.len()))
			.finish()
	}
}

impl Image {
	/// Create a new `Image`
	///
	/// # Examples
	///
	/// ```rust
	/// use unitag::picture::{Image, ImageType};
	///
	/// let image = Image::new(
	/// 	vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A],
	/// 	Some(String::from("Front")),
	/// 	Some(ImageType::FrontCover),
	/// );
	/// ```
	#[must_use]
	pub fn new(data: Vec<u8>, description: Option<String>, image_type: Option<ImageType>) -> Self {
		Self {
			data,
			description,
			image_type,
		}
	}

	/// Create an `Image` carrying only payload data
	pub fn from_data(data: Vec<u8>) -> Self {
		Self {
			data,
			description: None,
			image_type: None,
		}
	}

	/// Returns the binary payload
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Consumes the `Image`, returning the payload without cloning
	pub fn into_data(self) -> Vec<u8> {
		self.data
	}

	/// Returns the description, if one is set
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Sets the description
	pub fn set_description(&mut self, description: Option<String>) {
		self.description = description;
	}

	/// Returns the [`ImageType`], if one is set
	pub fn image_type(&self) -> Option<ImageType> {
		self.image_type
	}

	/// Sets the [`ImageType`]
	pub fn set_image_type(&mut self, image_type: Option<ImageType>) {
		self.image_type = image_type;
	}

	/// The APIC type code, defaulting to 0 ("Other") when no type is set
	///
	/// Used where a tag layout requires a code even for untyped images.
	pub fn type_code(&self) -> u8 {
		self.image_type.map_or(0, |ty| ty.as_u8())
	}

	/// Derives the [`MimeType`] from the payload's signature
	///
	/// `None` when the payload is empty or carries no recognized
	/// signature.
	pub fn mime_type(&self) -> Option<MimeType> {
		MimeType::from_signature(&self.data).ok()
	}

	// Used where a layout wants a MIME string even if we cannot sniff one
	pub(crate) fn mime_str(&self) -> String {
		self.mime_type()
			.map_or_else(String::new, |mime| mime.as_str().to_owned())
	}

	/// Pack this `Image` into an ASF `WM/Picture` byte array
	///
	/// Layout: type code (1 byte), payload length (4 bytes, little
	/// endian), MIME and description as double-null terminated UTF-16LE,
	/// then the raw payload.
	pub fn as_asf_bytes(&self) -> Vec<u8> {
		pack_asf_image(
			&self.mime_str(),
			&self.data,
			self.type_code(),
			self.description.as_deref().unwrap_or_default(),
		)
	}

	/// Unpack an `Image` from an ASF `WM/Picture` byte array
	///
	/// # Errors
	///
	/// Missing double-null terminator, or the payload is truncated
	pub fn from_asf_bytes(bytes: &[u8]) -> Result<Self> {
		let (_mime, data, type_code, description) = unpack_asf_image(bytes)?;

		let description = if description.is_empty() {
			None
		} else {
			Some(description)
		};

		Ok(Self {
			data,
			description,
			image_type: Some(ImageType::from_u8(type_code)),
		})
	}

	/// Convert this `Image` to a FLAC `METADATA_BLOCK_PICTURE` block
	///
	/// The width/height/depth/colors fields are written as zero. With
	/// `encode` the block is base64 encoded for embedding in a Vorbis
	/// comment.
	pub fn as_flac_bytes(&self, encode: bool) -> Vec<u8> {
		let mut data = Vec::<u8>::new();

		data.extend(u32::from(self.type_code()).to_be_bytes());

		let mime_str = self.mime_str();
		data.extend((mime_str.len() as u32).to_be_bytes());
		data.extend(mime_str.as_bytes());

		if let Some(desc) = &self.description {
			data.extend((desc.len() as u32).to_be_bytes());
			data.extend(desc.as_bytes());
		} else {
			data.extend([0; 4]);
		}

		// Width, height, color depth, color count
		data.extend([0; 16]);

		data.extend((self.data.len() as u32).to_be_bytes());
		data.extend(self.data.iter());

		if encode {
			BASE64.encode(&data).into_bytes()
		} else {
			data
		}
	}

	/// Get an `Image` from FLAC `METADATA_BLOCK_PICTURE` bytes
	///
	/// This takes both the base64 encoded form from Vorbis comments and
	/// the raw block data, specified with `encoded`.
	///
	/// # Errors
	///
	/// This function will return [`NotAPicture`](ErrorKind::NotAPicture)
	/// if at any point it is unable to parse the data
	pub fn from_flac_bytes(bytes: &[u8], encoded: bool) -> Result<Self> {
		if encoded {
			let data = BASE64
				.decode(bytes)
				.map_err(|_| UnitagError::new(ErrorKind::NotAPicture))?;
			Self::from_flac_bytes_inner(&data)
		} else {
			Self::from_flac_bytes_inner(bytes)
		}
	}

	fn from_flac_bytes_inner(content: &[u8]) -> Result<Self> {
		let mut size = content.len();
		let mut reader = Cursor::new(content);

		if size < 32 {
			err!(NotAPicture);
		}

		let type_code = reader.read_u32::<BigEndian>()?;
		size -= 4;

		// A single byte of picture type is all APIC allows. Anything
		// greater is garbage, not a large type code.
		if type_code > 255 {
			err!(NotAPicture);
		}

		let mime_len = reader.read_u32::<BigEndian>()? as usize;
		size -= 4;

		if mime_len > size {
			err!(SizeMismatch);
		}

		// The MIME string is only advisory, the payload signature wins.
		size -= mime_len;
		reader.seek(SeekFrom::Current(mime_len as i64))?;

		let desc_len = reader.read_u32::<BigEndian>()? as usize;
		size -= 4;

		let mut description = None;
		if desc_len > 0 && desc_len < size {
			let pos = 12 + mime_len;

			if let Ok(desc) = std::str::from_utf8(&content[pos..pos + desc_len]) {
				description = Some(desc.to_owned());
			}

			size -= desc_len;
			reader.seek(SeekFrom::Current(desc_len as i64))?;
		}

		// Width, height, color depth, color count are skipped, they are
		// derivable from the payload when anyone needs them.
		reader.seek(SeekFrom::Current(16))?;
		let data_len = reader.read_u32::<BigEndian>()? as usize;
		size -= 20;

		if data_len <= size {
			let mut data = try_vec![0; data_len];

			if reader.read_exact(&mut data).is_ok() {
				return Ok(Self {
					data,
					description,
					image_type: Some(ImageType::from_u8(type_code as u8)),
				});
			}
		}

		err!(NotAPicture)
	}

	/// Convert this `Image` to an APE cover-art item value
	///
	/// Only the description and payload; the item key is derived from
	/// the [`ImageType`] via [`ImageType::as_ape_key`].
	pub fn as_ape_bytes(&self) -> Vec<u8> {
		let mut data = Vec::new();

		if let Some(desc) = &self.description {
			data.extend(desc.as_bytes());
		}

		data.push(0);
		data.extend(self.data.iter());

		data
	}

	/// Get an `Image` from an APE cover-art item
	///
	/// `key` determines the [`ImageType`]; `bytes` is the item value,
	/// an optional UTF-8 description, a null byte, and the payload.
	///
	/// # Errors
	///
	/// `bytes` is empty
	pub fn from_ape_bytes(key: &str, bytes: &[u8]) -> Result<Self> {
		if bytes.is_empty() {
			err!(NotAPicture);
		}

		let image_type = ImageType::from_ape_key(key);

		let (description, data) = match bytes.iter().position(|b| *b == 0) {
			Some(0) => (None, bytes[1..].to_vec()),
			Some(pos) => (
				Some(utf8_decode_dropping(&bytes[..pos])),
				bytes[pos + 1..].to_vec(),
			),
			None => (None, bytes.to_vec()),
		};

		Ok(Self {
			data,
			description,
			image_type: Some(image_type),
		})
	}
}

/// Packs image data for an ASF `WM/Picture` attribute.
pub(crate) fn pack_asf_image(mime: &str, data: &[u8], type_code: u8, description: &str) -> Vec<u8> {
	let mut packed = Vec::with_capacity(5 + data.len());

	packed.push(type_code);
	packed.extend((data.len() as i32).to_le_bytes());
	packed.extend(utf16le_encode_terminated(mime));
	packed.extend(utf16le_encode_terminated(description));
	packed.extend_from_slice(data);

	packed
}

/// Unpacks an ASF `WM/Picture` attribute value.
///
/// Returns `(mime, data, type_code, description)`, the exact inverse of
/// [`pack_asf_image`].
pub(crate) fn unpack_asf_image(bytes: &[u8]) -> Result<(String, Vec<u8>, u8, String)> {
	let mut reader = Cursor::new(bytes);

	let type_code = reader.read_u8()?;
	let size = reader.read_i32::<LittleEndian>()?;
	if size < 0 {
		err!(SizeMismatch);
	}

	let mut pos = 5usize;
	let Some((mime, consumed)) = utf16le_decode_terminated(&bytes[pos..]) else {
		err!(NotAPicture);
	};
	pos += consumed;

	let Some((description, consumed)) = utf16le_decode_terminated(&bytes[pos..]) else {
		err!(NotAPicture);
	};
	pos += consumed;

	let end = pos.saturating_add(size as usize);
	if end > bytes.len() {
		err!(SizeMismatch);
	}

	Ok((mime, bytes[pos..end].to_vec(), type_code, description))
}

#[cfg(test)]
mod tests {
	use super::{APE_PICTURE_KEYS, Image, ImageType, MimeType, pack_asf_image, unpack_asf_image};

	const PNG_DATA: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3, 4];
	const JPEG_DATA: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 9, 8, 7, 6];

	#[test_log::test]
	fn mime_sniffing() {
		assert_eq!(MimeType::from_signature(PNG_DATA).unwrap(), MimeType::Png);
		assert_eq!(MimeType::from_signature(JPEG_DATA).unwrap(), MimeType::Jpeg);
		assert!(MimeType::from_signature(b"not an image").is_err());
		assert!(MimeType::from_signature(b"x").is_err());
	}

	#[test_log::test]
	fn image_type_codes() {
		for (i, ty) in ImageType::ALL.iter().enumerate() {
			assert_eq!(usize::from(ty.as_u8()), i);
			assert_eq!(ImageType::from_u8(ty.as_u8()), *ty);
		}

		// Unknown codes fall back to Other
		assert_eq!(ImageType::from_u8(21), ImageType::Other);
		assert_eq!(ImageType::from_u8(255), ImageType::Other);
	}

	#[test_log::test]
	fn ape_keys() {
		assert_eq!(ImageType::FrontCover.as_ape_key(), "Cover Art (Front)");
		assert_eq!(
			ImageType::from_ape_key("cover art (front)"),
			ImageType::FrontCover
		);
		assert_eq!(ImageType::from_ape_key("Not A Key"), ImageType::Other);

		for key in APE_PICTURE_KEYS {
			assert_eq!(ImageType::from_ape_key(key).as_ape_key(), key);
		}
	}

	#[test_log::test]
	fn asf_pack_round_trip() {
		let packed = pack_asf_image("image/png", PNG_DATA, 3, "the front cover");
		let (mime, data, type_code, desc) = unpack_asf_image(&packed).unwrap();

		assert_eq!(mime, "image/png");
		assert_eq!(data, PNG_DATA);
		assert_eq!(type_code, 3);
		assert_eq!(desc, "the front cover");
	}

	#[test_log::test]
	fn asf_pack_empty_fields() {
		let packed = pack_asf_image("", &[], 0, "");
		let (mime, data, type_code, desc) = unpack_asf_image(&packed).unwrap();

		assert!(mime.is_empty());
		assert!(data.is_empty());
		assert_eq!(type_code, 0);
		assert!(desc.is_empty());
	}

	#[test_log::test]
	fn asf_unpack_missing_terminator() {
		let mut packed = pack_asf_image("image/png", PNG_DATA, 3, "desc");
		packed.truncate(8);

		assert!(unpack_asf_image(&packed).is_err());
	}

	#[test_log::test]
	fn asf_unpack_truncated_payload() {
		let mut packed = pack_asf_image("image/png", PNG_DATA, 3, "desc");
		packed.truncate(packed.len() - 4);

		assert!(unpack_asf_image(&packed).is_err());
	}

	#[test_log::test]
	fn flac_block_round_trip() {
		let image = Image::new(
			PNG_DATA.to_vec(),
			Some(String::from("Back α")),
			Some(ImageType::BackCover),
		);

		for encode in [false, true] {
			let bytes = image.as_flac_bytes(encode);
			let read = Image::from_flac_bytes(&bytes, encode).unwrap();

			assert_eq!(read.data(), PNG_DATA);
			assert_eq!(read.description(), Some("Back α"));
			assert_eq!(read.image_type(), Some(ImageType::BackCover));
		}
	}

	#[test_log::test]
	fn flac_block_rejects_garbage() {
		assert!(Image::from_flac_bytes(b"short", false).is_err());
		assert!(Image::from_flac_bytes(b"!!! not base64 !!!", true).is_err());
	}

	#[test_log::test]
	fn ape_item_round_trip() {
		let image = Image::new(
			JPEG_DATA.to_vec(),
			Some(String::from("band shot")),
			Some(ImageType::Band),
		);

		let bytes = image.as_ape_bytes();
		let read = Image::from_ape_bytes(image.image_type().unwrap().as_ape_key(), &bytes).unwrap();

		assert_eq!(read.data(), JPEG_DATA);
		assert_eq!(read.description(), Some("band shot"));
		assert_eq!(read.image_type(), Some(ImageType::Band));
	}

	#[test_log::test]
	fn ape_item_without_description() {
		let image = Image::from_data(JPEG_DATA.to_vec());
		let bytes = image.as_ape_bytes();

		let read = Image::from_ape_bytes("Cover Art (Other)", &bytes).unwrap();
		assert_eq!(read.data(), JPEG_DATA);
		assert_eq!(read.description(), None);
	}

	#[test_log::test]
	fn derived_mime() {
		let image = Image::from_data(PNG_DATA.to_vec());
		assert_eq!(image.mime_type(), Some(MimeType::Png));

		let unknown = Image::from_data(vec![0; 4]);
		assert_eq!(unknown.mime_type(), None);
		assert!(unknown.mime_str().is_empty());
	}
}
