//! Envelope serialization

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use super::{Envelope, MAGIC, VERSION, write_bytes, write_string};
use crate::error::Result;
use crate::kind::TagFamily;
use crate::properties::{AudioInfo, BitrateMode};
use crate::tags::{
	ApeItemValue, AsfValue, AtomData, Frame, Id3Revision, IlstPictureFormat, TagSet,
};

pub(super) fn write_to<W: Write>(envelope: &Envelope, writer: &mut W) -> Result<()> {
	writer.write_all(&MAGIC)?;
	writer.write_u8(VERSION)?;

	let kind = envelope.kind();
	write_string(writer, kind.reported_name())?;
	match kind.codec_token() {
		Some(codec) => {
			writer.write_u8(1)?;
			write_string(writer, codec)?;
		},
		None => writer.write_u8(0)?,
	}

	write_info(writer, envelope.info())?;
	write_tag(writer, envelope.tag())?;

	Ok(())
}

fn write_info<W: Write>(writer: &mut W, info: &AudioInfo) -> Result<()> {
	match info.duration() {
		Some(duration) => {
			writer.write_u8(1)?;
			writer.write_u64::<BigEndian>(duration.as_millis() as u64)?;
		},
		None => writer.write_u8(0)?,
	}
	match info.sample_rate() {
		Some(sample_rate) => {
			writer.write_u8(1)?;
			writer.write_u32::<BigEndian>(sample_rate)?;
		},
		None => writer.write_u8(0)?,
	}
	match info.bit_depth() {
		Some(bit_depth) => {
			writer.write_u8(1)?;
			writer.write_u8(bit_depth)?;
		},
		None => writer.write_u8(0)?,
	}
	match info.channels() {
		Some(channels) => {
			writer.write_u8(1)?;
			writer.write_u8(channels)?;
		},
		None => writer.write_u8(0)?,
	}
	match info.bitrate() {
		Some(bitrate) => {
			writer.write_u8(1)?;
			writer.write_u32::<BigEndian>(bitrate)?;
		},
		None => writer.write_u8(0)?,
	}
	match info.bitrate_mode() {
		Some(mode) => {
			writer.write_u8(1)?;
			writer.write_u8(match mode {
				BitrateMode::Cbr => 0,
				BitrateMode::Vbr => 1,
				BitrateMode::Abr => 2,
			})?;
		},
		None => writer.write_u8(0)?,
	}
	match info.encoder_info() {
		Some(encoder_info) => {
			writer.write_u8(1)?;
			write_string(writer, encoder_info)?;
		},
		None => writer.write_u8(0)?,
	}
	match info.encoder_settings() {
		Some(encoder_settings) => {
			writer.write_u8(1)?;
			write_string(writer, encoder_settings)?;
		},
		None => writer.write_u8(0)?,
	}

	Ok(())
}

fn write_tag<W: Write>(writer: &mut W, tag: &TagSet) -> Result<()> {
	writer.write_u8(match tag.family() {
		TagFamily::Id3 => 0,
		TagFamily::Ilst => 1,
		TagFamily::Asf => 2,
		TagFamily::VorbisComments => 3,
		TagFamily::Ape => 4,
	})?;

	// Every record is length-prefixed so the reader can recover from a
	// malformed one.
	let mut records: Vec<(u8, Vec<u8>)> = Vec::new();

	match tag {
		TagSet::Id3(id3) => {
			writer.write_u8(match id3.revision() {
				Id3Revision::V23 => 3,
				Id3Revision::V24 => 4,
			})?;

			for frame in id3.frames() {
				records.push(frame_record(frame)?);
			}
		},
		TagSet::Ilst(ilst) => {
			for atom in ilst.atoms() {
				records.push(atom_record(&atom.ident, &atom.data)?);
			}
		},
		TagSet::Asf(asf) => {
			for (name, values) in asf.attributes() {
				let mut payload = Vec::new();
				write_string(&mut payload, name)?;
				payload.write_u32::<BigEndian>(values.len() as u32)?;
				for value in values {
					match value {
						AsfValue::Unicode(text) => {
							payload.write_u8(0)?;
							write_string(&mut payload, text)?;
						},
						AsfValue::Bool(flag) => {
							payload.write_u8(1)?;
							payload.write_u8(u8::from(*flag))?;
						},
						AsfValue::Bytes(bytes) => {
							payload.write_u8(2)?;
							write_bytes(&mut payload, bytes)?;
						},
					}
				}
				records.push((0, payload));
			}
		},
		TagSet::Vorbis(vorbis) => {
			write_string(writer, vorbis.vendor())?;

			for (key, value) in vorbis.items() {
				let mut payload = Vec::new();
				write_string(&mut payload, key)?;
				write_string(&mut payload, value)?;
				records.push((0, payload));
			}
			for picture in vorbis.pictures() {
				let mut payload = Vec::new();
				write_bytes(&mut payload, &picture.as_flac_bytes(false))?;
				records.push((1, payload));
			}
		},
		TagSet::Ape(ape) => {
			for item in ape.items() {
				let mut payload = Vec::new();
				write_string(&mut payload, &item.key)?;
				match &item.value {
					ApeItemValue::Text(values) => {
						payload.write_u8(0)?;
						write_string_list(&mut payload, values)?;
					},
					ApeItemValue::Binary(bytes) => {
						payload.write_u8(1)?;
						write_bytes(&mut payload, bytes)?;
					},
				}
				records.push((0, payload));
			}
		},
	}

	writer.write_u32::<BigEndian>(records.len() as u32)?;
	for (record_type, payload) in records {
		writer.write_u8(record_type)?;
		write_bytes(writer, &payload)?;
	}

	Ok(())
}

fn frame_record(frame: &Frame) -> Result<(u8, Vec<u8>)> {
	let mut payload = Vec::new();

	let record_type = match frame {
		Frame::Text { id, values } => {
			write_string(&mut payload, id)?;
			write_string_list(&mut payload, values)?;
			0
		},
		Frame::ExtendedText {
			id,
			description,
			language,
			values,
		} => {
			write_string(&mut payload, id)?;
			write_string(&mut payload, description)?;
			write_string(&mut payload, language)?;
			write_string_list(&mut payload, values)?;
			1
		},
		Frame::Url { description, url } => {
			write_string(&mut payload, description)?;
			write_string(&mut payload, url)?;
			2
		},
		Frame::People { id, pairs } => {
			write_string(&mut payload, id)?;
			payload.write_u32::<BigEndian>(pairs.len() as u32)?;
			for (role, person) in pairs {
				write_string(&mut payload, role)?;
				write_string(&mut payload, person)?;
			}
			3
		},
		Frame::UniqueFileId { owner, data } => {
			write_string(&mut payload, owner)?;
			write_bytes(&mut payload, data)?;
			4
		},
		Frame::Picture(image) => {
			write_bytes(&mut payload, &image.as_flac_bytes(false))?;
			5
		},
	};

	Ok((record_type, payload))
}

fn atom_record(ident: &str, data: &AtomData) -> Result<(u8, Vec<u8>)> {
	let mut payload = Vec::new();
	write_string(&mut payload, ident)?;

	let record_type = match data {
		AtomData::Utf8(values) => {
			write_string_list(&mut payload, values)?;
			0
		},
		AtomData::Int(values) => {
			payload.write_u32::<BigEndian>(values.len() as u32)?;
			for value in values {
				payload.write_i64::<BigEndian>(*value)?;
			}
			1
		},
		AtomData::Bool(flag) => {
			payload.write_u8(u8::from(*flag))?;
			2
		},
		AtomData::Pair(pairs) => {
			payload.write_u32::<BigEndian>(pairs.len() as u32)?;
			for (position, total) in pairs {
				payload.write_u16::<BigEndian>(*position)?;
				payload.write_u16::<BigEndian>(*total)?;
			}
			3
		},
		AtomData::Pictures(pictures) => {
			payload.write_u32::<BigEndian>(pictures.len() as u32)?;
			for picture in pictures {
				payload.write_u8(match picture.format {
					IlstPictureFormat::Png => 0,
					IlstPictureFormat::Jpeg => 1,
				})?;
				write_bytes(&mut payload, &picture.data)?;
			}
			4
		},
	};

	Ok((record_type, payload))
}

fn write_string_list<W: Write>(writer: &mut W, values: &[String]) -> Result<()> {
	writer.write_u32::<BigEndian>(values.len() as u32)?;
	for value in values {
		write_string(writer, value)?;
	}

	Ok(())
}
