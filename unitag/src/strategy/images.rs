//! Embedded-image storage, per file kind
//!
//! Unlike scalar slots, image storage differs between FLAC and the
//! other Vorbis-comment formats, so image strategies select on
//! [`FileKind`] rather than on the tag family alone.

use data_encoding::BASE64;
use log::warn;

use crate::error::{ErrorKind, Result, UnitagError};
use crate::kind::{FileKind, TagFamily};
use crate::picture::{APE_PICTURE_KEYS, Image, ImageType, MimeType};
use crate::tags::{ApeItemValue, AsfValue, AtomData, Frame, IlstPicture, IlstPictureFormat, TagSet};

const METADATA_BLOCK_PICTURE: &str = "METADATA_BLOCK_PICTURE";
const LEGACY_COVERART: &str = "COVERART";
const LEGACY_COVERART_MIME: &str = "COVERARTMIME";
const WM_PICTURE: &str = "WM/Picture";
const COVR: &str = "covr";

/// One way of storing embedded images for a file kind
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ImageStrategy {
	/// ID3 `APIC` frames
	Apic,
	/// The MP4 `covr` atom
	Covr,
	/// ASF `WM/Picture` attributes
	AsfPicture,
	/// Base64 `METADATA_BLOCK_PICTURE` comments (Ogg streams)
	VorbisPicture,
	/// Native FLAC picture blocks
	FlacPicture,
	/// APE `Cover Art (...)` binary items
	ApeCoverArt,
}

impl ImageStrategy {
	/// Selects the image strategy for a file kind
	pub fn for_kind(kind: FileKind) -> ImageStrategy {
		match kind.family() {
			TagFamily::Id3 => ImageStrategy::Apic,
			TagFamily::Ilst => ImageStrategy::Covr,
			TagFamily::Asf => ImageStrategy::AsfPicture,
			TagFamily::VorbisComments if kind == FileKind::Flac => ImageStrategy::FlacPicture,
			TagFamily::VorbisComments => ImageStrategy::VorbisPicture,
			TagFamily::Ape => ImageStrategy::ApeCoverArt,
		}
	}

	/// Reads every stored image, in storage order
	///
	/// Malformed entries are skipped with a warning rather than failing
	/// the whole read.
	pub fn get(&self, tag: &TagSet) -> Vec<Image> {
		match self {
			ImageStrategy::Apic => {
				let Some(id3) = tag.id3() else {
					return Vec::new();
				};

				id3.frames()
					.iter()
					.filter_map(|frame| match frame {
						Frame::Picture(image) => Some(image.clone()),
						_ => None,
					})
					.collect()
			},
			ImageStrategy::Covr => {
				let Some(AtomData::Pictures(pictures)) = tag.ilst().and_then(|ilst| ilst.get(COVR))
				else {
					return Vec::new();
				};

				pictures
					.iter()
					.map(|picture| Image::from_data(picture.data.clone()))
					.collect()
			},
			ImageStrategy::AsfPicture => {
				let Some(values) = tag.asf().and_then(|asf| asf.values(WM_PICTURE)) else {
					return Vec::new();
				};

				values
					.iter()
					.filter_map(|value| match value {
						AsfValue::Bytes(bytes) => match Image::from_asf_bytes(bytes) {
							Ok(image) => Some(image),
							Err(err) => {
								warn!("Skipping malformed WM/Picture value: {err}");
								None
							},
						},
						_ => None,
					})
					.collect()
			},
			ImageStrategy::VorbisPicture => {
				let Some(vorbis) = tag.vorbis() else {
					return Vec::new();
				};

				let mut images: Vec<Image> = vorbis
					.get_all(METADATA_BLOCK_PICTURE)
					.filter_map(|value| match Image::from_flac_bytes(value.as_bytes(), true) {
						Ok(image) => Some(image),
						Err(err) => {
							warn!("Skipping malformed picture block: {err}");
							None
						},
					})
					.collect();

				// Deprecated COVERART comments are honored on read only
				if images.is_empty() {
					images.extend(vorbis.get_all(LEGACY_COVERART).filter_map(|value| {
						match BASE64.decode(value.as_bytes()) {
							Ok(data) => Some(Image::from_data(data)),
							Err(err) => {
								warn!("Skipping malformed legacy cover art: {err}");
								None
							},
						}
					}));
				}

				images
			},
			ImageStrategy::FlacPicture => match tag.vorbis() {
				Some(vorbis) => vorbis.pictures().to_vec(),
				None => Vec::new(),
			},
			ImageStrategy::ApeCoverArt => {
				let Some(ape) = tag.ape() else {
					return Vec::new();
				};

				APE_PICTURE_KEYS
					.iter()
					.filter_map(|key| match &ape.get(key)?.value {
						ApeItemValue::Binary(data) => match Image::from_ape_bytes(key, data) {
							Ok(image) => Some(image),
							Err(err) => {
								warn!("Skipping malformed \"{key}\" item: {err}");
								None
							},
						},
						ApeItemValue::Text(_) => None,
					})
					.collect()
			},
		}
	}

	/// Replaces all stored images
	///
	/// MP4 rejects anything but PNG and JPEG; validation happens before
	/// any image is stored, so a failed set leaves the tag untouched.
	pub fn set(&self, tag: &mut TagSet, images: &[Image]) -> Result<()> {
		match self {
			ImageStrategy::Apic => {
				if let Some(id3) = tag.id3_mut() {
					id3.frames_mut()
						.retain(|frame| !matches!(frame, Frame::Picture(_)));
					for image in images {
						id3.push(Frame::Picture(image.clone()));
					}
				}
			},
			ImageStrategy::Covr => {
				let mut pictures = Vec::with_capacity(images.len());
				for image in images {
					let format = match image.mime_type() {
						Some(MimeType::Png) => IlstPictureFormat::Png,
						Some(MimeType::Jpeg) => IlstPictureFormat::Jpeg,
						_ => {
							return Err(UnitagError::new(ErrorKind::UnsupportedPicture));
						},
					};

					pictures.push(IlstPicture {
						format,
						data: image.data().to_vec(),
					});
				}

				if let Some(ilst) = tag.ilst_mut() {
					ilst.set(COVR, AtomData::Pictures(pictures));
				}
			},
			ImageStrategy::AsfPicture => {
				if let Some(asf) = tag.asf_mut() {
					asf.set(
						WM_PICTURE,
						images
							.iter()
							.map(|image| AsfValue::Bytes(image.as_asf_bytes()))
							.collect(),
					);
				}
			},
			ImageStrategy::VorbisPicture => {
				if let Some(vorbis) = tag.vorbis_mut() {
					vorbis.remove(LEGACY_COVERART);
					vorbis.remove(LEGACY_COVERART_MIME);
					vorbis.set_all(
						METADATA_BLOCK_PICTURE,
						images
							.iter()
							.map(|image| {
								String::from_utf8_lossy(&image.as_flac_bytes(true)).into_owned()
							})
							.collect(),
					);
				}
			},
			ImageStrategy::FlacPicture => {
				if let Some(vorbis) = tag.vorbis_mut() {
					vorbis.set_pictures(images.to_vec());
				}
			},
			ImageStrategy::ApeCoverArt => {
				if let Some(ape) = tag.ape_mut() {
					for key in APE_PICTURE_KEYS {
						ape.remove(key);
					}

					for image in images {
						ape.insert(
							image.image_type().unwrap_or(ImageType::Other).as_ape_key(),
							ApeItemValue::Binary(image.as_ape_bytes()),
						);
					}
				}
			},
		}

		Ok(())
	}

	/// Removes every stored image
	pub fn delete(&self, tag: &mut TagSet) {
		match self {
			ImageStrategy::Apic => {
				if let Some(id3) = tag.id3_mut() {
					id3.frames_mut()
						.retain(|frame| !matches!(frame, Frame::Picture(_)));
				}
			},
			ImageStrategy::Covr => {
				if let Some(ilst) = tag.ilst_mut() {
					ilst.remove(COVR);
				}
			},
			ImageStrategy::AsfPicture => {
				if let Some(asf) = tag.asf_mut() {
					asf.remove(WM_PICTURE);
				}
			},
			ImageStrategy::VorbisPicture => {
				if let Some(vorbis) = tag.vorbis_mut() {
					vorbis.remove(METADATA_BLOCK_PICTURE);
					vorbis.remove(LEGACY_COVERART);
					vorbis.remove(LEGACY_COVERART_MIME);
				}
			},
			ImageStrategy::FlacPicture => {
				if let Some(vorbis) = tag.vorbis_mut() {
					vorbis.clear_pictures();
				}
			},
			ImageStrategy::ApeCoverArt => {
				if let Some(ape) = tag.ape_mut() {
					for key in APE_PICTURE_KEYS {
						ape.remove(key);
					}
				}
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::ImageStrategy;
	use crate::kind::{FileKind, TagFamily};
	use crate::picture::{Image, ImageType};
	use crate::tags::TagSet;

	const PNG: &[u8] = &[
		0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0, 0, 0, 0, 0,
	];
	const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0];

	fn front_cover(data: &[u8]) -> Image {
		Image::new(
			data.to_vec(),
			Some(String::from("front")),
			Some(ImageType::FrontCover),
		)
	}

	#[test_log::test]
	fn kind_selection() {
		assert_eq!(ImageStrategy::for_kind(FileKind::Mp3), ImageStrategy::Apic);
		assert_eq!(ImageStrategy::for_kind(FileKind::Aac), ImageStrategy::Covr);
		assert_eq!(
			ImageStrategy::for_kind(FileKind::Flac),
			ImageStrategy::FlacPicture
		);
		assert_eq!(
			ImageStrategy::for_kind(FileKind::Opus),
			ImageStrategy::VorbisPicture
		);
		assert_eq!(
			ImageStrategy::for_kind(FileKind::WavPack),
			ImageStrategy::ApeCoverArt
		);
	}

	#[test_log::test]
	fn apic_round_trip() {
		let strategy = ImageStrategy::Apic;
		let mut tag = TagSet::new(TagFamily::Id3);

		strategy
			.set(&mut tag, &[front_cover(PNG), Image::from_data(JPEG.to_vec())])
			.unwrap();

		let images = strategy.get(&tag);
		assert_eq!(images.len(), 2);
		assert_eq!(images[0].description(), Some("front"));
		assert_eq!(images[1].image_type(), None);

		strategy.delete(&mut tag);
		assert!(strategy.get(&tag).is_empty());
	}

	#[test_log::test]
	fn covr_rejects_unknown_formats_atomically() {
		let strategy = ImageStrategy::Covr;
		let mut tag = TagSet::new(TagFamily::Ilst);

		strategy.set(&mut tag, &[front_cover(PNG)]).unwrap();

		let gif = Image::from_data(b"GIF89a\x00\x00".to_vec());
		assert!(strategy.set(&mut tag, &[front_cover(JPEG), gif]).is_err());

		// The failed set must not have replaced the stored picture
		let images = strategy.get(&tag);
		assert_eq!(images.len(), 1);
		assert_eq!(images[0].data(), PNG);
	}

	#[test_log::test]
	fn vorbis_set_strips_legacy_comments() {
		use data_encoding::BASE64;

		let strategy = ImageStrategy::VorbisPicture;
		let mut tag = TagSet::new(TagFamily::VorbisComments);

		{
			let vorbis = tag.vorbis_mut().unwrap();
			vorbis.set_all("COVERART", vec![BASE64.encode(JPEG)]);
			vorbis.set_all("COVERARTMIME", vec![String::from("image/jpeg")]);
		}

		// Legacy comments are readable while no picture block exists
		let legacy = strategy.get(&tag);
		assert_eq!(legacy.len(), 1);
		assert_eq!(legacy[0].data(), JPEG);

		strategy.set(&mut tag, &[front_cover(PNG)]).unwrap();

		let vorbis = tag.vorbis().unwrap();
		assert!(!vorbis.contains("COVERART"));
		assert!(!vorbis.contains("COVERARTMIME"));

		let images = strategy.get(&tag);
		assert_eq!(images.len(), 1);
		assert_eq!(images[0].data(), PNG);
		assert_eq!(images[0].image_type(), Some(ImageType::FrontCover));
	}

	#[test_log::test]
	fn ape_items_keyed_by_type() {
		let strategy = ImageStrategy::ApeCoverArt;
		let mut tag = TagSet::new(TagFamily::Ape);

		let mut back = Image::from_data(JPEG.to_vec());
		back.set_image_type(Some(ImageType::BackCover));

		strategy.set(&mut tag, &[back, front_cover(PNG)]).unwrap();

		let ape = tag.ape().unwrap();
		assert!(ape.get("Cover Art (Front)").is_some());
		assert!(ape.get("Cover Art (Back)").is_some());

		// Read order follows the type-code table, not insertion order
		let images = strategy.get(&tag);
		assert_eq!(images.len(), 2);
		assert_eq!(images[0].image_type(), Some(ImageType::FrontCover));
		assert_eq!(images[1].image_type(), Some(ImageType::BackCover));
	}
}
