//! Envelope parsing

use std::io::{Cursor, Read};
use std::time::Duration;

use byteorder::{BigEndian, ReadBytesExt};
use log::{debug, warn};

use super::{Envelope, MAGIC, VERSION, read_bytes, read_string};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::kind::{FileKind, TagFamily};
use crate::macros::{decode_err, err, parse_mode_choice, try_vec};
use crate::picture::Image;
use crate::properties::{AudioInfo, BitrateMode};
use crate::tags::{
	ApeItemValue, AsfValue, AtomData, Frame, Id3Revision, IlstPicture, IlstPictureFormat, TagSet,
};

pub(super) fn read_from<R: Read>(reader: &mut R, parse_options: ParseOptions) -> Result<Envelope> {
	debug!("Starting probe of envelope header");

	let mut magic = [0; 4];
	reader.read_exact(&mut magic)?;
	if magic != MAGIC {
		err!(UnknownFormat);
	}

	let version = reader.read_u8()?;
	if version != VERSION {
		decode_err!(@BAIL "Unsupported envelope version");
	}

	let container = read_string(reader)?;
	let codec = match reader.read_u8()? {
		0 => None,
		_ => Some(read_string(reader)?),
	};

	debug!("Envelope reports container {container:?}, codec {codec:?}");
	let Some(kind) = FileKind::from_reported(&container, codec.as_deref()) else {
		err!(UnsupportedFormat(container));
	};

	let info = read_info(reader)?;
	let info = if parse_options.read_properties {
		info
	} else {
		AudioInfo::new()
	};

	let tag = read_tag(reader, kind, parse_options)?;

	Ok(Envelope::from_parts(kind, info, tag))
}

fn read_info<R: Read>(reader: &mut R) -> Result<AudioInfo> {
	let mut info = AudioInfo::new();

	if read_presence(reader)? {
		info.set_duration(Duration::from_millis(reader.read_u64::<BigEndian>()?));
	}
	if read_presence(reader)? {
		info.set_sample_rate(reader.read_u32::<BigEndian>()?);
	}
	if read_presence(reader)? {
		info.set_bit_depth(reader.read_u8()?);
	}
	if read_presence(reader)? {
		info.set_channels(reader.read_u8()?);
	}
	if read_presence(reader)? {
		info.set_bitrate(reader.read_u32::<BigEndian>()?);
	}
	if read_presence(reader)? {
		let mode = match reader.read_u8()? {
			0 => BitrateMode::Cbr,
			1 => BitrateMode::Vbr,
			2 => BitrateMode::Abr,
			_ => decode_err!(@BAIL "Invalid bitrate mode"),
		};
		info.set_bitrate_mode(mode);
	}
	if read_presence(reader)? {
		info.set_encoder_info(read_string(reader)?);
	}
	if read_presence(reader)? {
		info.set_encoder_settings(read_string(reader)?);
	}

	Ok(info)
}

fn read_presence<R: Read>(reader: &mut R) -> Result<bool> {
	Ok(reader.read_u8()? != 0)
}

fn read_tag<R: Read>(
	reader: &mut R,
	kind: FileKind,
	parse_options: ParseOptions,
) -> Result<TagSet> {
	let family = match reader.read_u8()? {
		0 => TagFamily::Id3,
		1 => TagFamily::Ilst,
		2 => TagFamily::Asf,
		3 => TagFamily::VorbisComments,
		4 => TagFamily::Ape,
		_ => decode_err!(@BAIL "Invalid tag family"),
	};

	if family != kind.family() {
		decode_err!(@BAIL "Tag family does not match the container kind");
	}

	let mut tag = TagSet::new(family);

	// Per-family prelude before the record list.
	match &mut tag {
		TagSet::Id3(id3) => {
			let revision = match reader.read_u8()? {
				3 => Id3Revision::V23,
				4 => Id3Revision::V24,
				_ => decode_err!(@BAIL "Invalid ID3 revision"),
			};
			id3.set_revision(revision);
		},
		TagSet::Vorbis(vorbis) => {
			vorbis.set_vendor(read_string(reader)?);
		},
		_ => {},
	}

	let count = reader.read_u32::<BigEndian>()?;
	for _ in 0..count {
		let record_type = reader.read_u8()?;
		let payload = read_bytes(reader)?;

		if let Err(err) = read_record(&mut tag, record_type, &payload) {
			let mode = parse_options.parsing_mode;
			parse_mode_choice!(
				mode,
				STRICT: return Err(err),
				DEFAULT: warn!("Skipping malformed tag record (type {record_type}): {err}")
			);
		}
	}

	Ok(tag)
}

fn read_record(tag: &mut TagSet, record_type: u8, payload: &[u8]) -> Result<()> {
	let reader = &mut Cursor::new(payload);

	match tag {
		TagSet::Id3(id3) => id3.push(read_frame(reader, record_type)?),
		TagSet::Ilst(ilst) => {
			let ident = read_string(reader)?;
			ilst.set(&ident, read_atom_data(reader, record_type)?);
		},
		TagSet::Asf(asf) => {
			if record_type != 0 {
				decode_err!(@BAIL "Invalid ASF attribute record");
			}

			let name = read_string(reader)?;
			let count = reader.read_u32::<BigEndian>()?;
			let mut values = try_vec![AsfValue::Bool(false); count as usize];
			for value in &mut values {
				*value = match reader.read_u8()? {
					0 => AsfValue::Unicode(read_string(reader)?),
					1 => AsfValue::Bool(reader.read_u8()? != 0),
					2 => AsfValue::Bytes(read_bytes(reader)?),
					_ => decode_err!(@BAIL "Invalid ASF value type"),
				};
			}

			asf.set(&name, values);
		},
		TagSet::Vorbis(vorbis) => match record_type {
			0 => {
				let key = read_string(reader)?;
				let value = read_string(reader)?;
				vorbis.items.push((key, value));
			},
			1 => {
				let image = Image::from_flac_bytes(&read_bytes(reader)?, false)?;
				vorbis.pictures.push(image);
			},
			_ => decode_err!(@BAIL "Invalid Vorbis record"),
		},
		TagSet::Ape(ape) => {
			if record_type != 0 {
				decode_err!(@BAIL "Invalid APE item record");
			}

			let key = read_string(reader)?;
			let value = match reader.read_u8()? {
				0 => {
					let count = reader.read_u32::<BigEndian>()?;
					let mut values = try_vec![String::new(); count as usize];
					for value in &mut values {
						*value = read_string(reader)?;
					}
					ApeItemValue::Text(values)
				},
				1 => ApeItemValue::Binary(read_bytes(reader)?),
				_ => decode_err!(@BAIL "Invalid APE item type"),
			};

			ape.insert(&key, value);
		},
	}

	Ok(())
}

fn read_frame<R: Read>(reader: &mut R, record_type: u8) -> Result<Frame> {
	let frame = match record_type {
		0 => Frame::Text {
			id: read_string(reader)?,
			values: read_string_list(reader)?,
		},
		1 => Frame::ExtendedText {
			id: read_string(reader)?,
			description: read_string(reader)?,
			language: read_string(reader)?,
			values: read_string_list(reader)?,
		},
		2 => Frame::Url {
			description: read_string(reader)?,
			url: read_string(reader)?,
		},
		3 => {
			let id = read_string(reader)?;
			let count = reader.read_u32::<BigEndian>()?;
			let mut pairs = try_vec![(String::new(), String::new()); count as usize];
			for pair in &mut pairs {
				pair.0 = read_string(reader)?;
				pair.1 = read_string(reader)?;
			}
			Frame::People { id, pairs }
		},
		4 => Frame::UniqueFileId {
			owner: read_string(reader)?,
			data: read_bytes(reader)?,
		},
		5 => Frame::Picture(Image::from_flac_bytes(&read_bytes(reader)?, false)?),
		_ => decode_err!(@BAIL "Invalid ID3 frame record"),
	};

	Ok(frame)
}

fn read_atom_data<R: Read>(reader: &mut R, record_type: u8) -> Result<AtomData> {
	let data = match record_type {
		0 => AtomData::Utf8(read_string_list(reader)?),
		1 => {
			let count = reader.read_u32::<BigEndian>()?;
			let mut values = try_vec![0i64; count as usize];
			for value in &mut values {
				*value = reader.read_i64::<BigEndian>()?;
			}
			AtomData::Int(values)
		},
		2 => AtomData::Bool(reader.read_u8()? != 0),
		3 => {
			let count = reader.read_u32::<BigEndian>()?;
			let mut pairs = try_vec![(0u16, 0u16); count as usize];
			for pair in &mut pairs {
				pair.0 = reader.read_u16::<BigEndian>()?;
				pair.1 = reader.read_u16::<BigEndian>()?;
			}
			AtomData::Pair(pairs)
		},
		4 => {
			let count = reader.read_u32::<BigEndian>()?;
			let mut pictures = try_vec![
				IlstPicture {
					format: IlstPictureFormat::Png,
					data: Vec::new(),
				};
				count as usize
			];
			for picture in &mut pictures {
				picture.format = match reader.read_u8()? {
					0 => IlstPictureFormat::Png,
					1 => IlstPictureFormat::Jpeg,
					_ => decode_err!(@BAIL "Invalid MP4 picture format"),
				};
				picture.data = read_bytes(reader)?;
			}
			AtomData::Pictures(pictures)
		},
		_ => decode_err!(@BAIL "Invalid MP4 atom record"),
	};

	Ok(data)
}

fn read_string_list<R: Read>(reader: &mut R) -> Result<Vec<String>> {
	let count = reader.read_u32::<BigEndian>()?;
	let mut values = try_vec![String::new(); count as usize];
	for value in &mut values {
		*value = read_string(reader)?;
	}

	Ok(values)
}
