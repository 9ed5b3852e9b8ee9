//! Storage strategies: per-family access to one tag slot
//!
//! A [`Strategy`] knows how to locate, decode, encode, and store one
//! value inside the tag family (or families) it applies to. A logical
//! field composes several strategies in priority order; see
//! [`fields`](crate::fields).
//!
//! Strategies never fail on absent data: a missing key fetches as
//! `None`, and a delete of a missing key is a no-op.

pub(crate) mod images;

pub use images::ImageStrategy;

use crate::kind::TagFamily;
use crate::soundcheck;
use crate::tags::{ApeItemValue, AsfValue, AtomData, Frame, Id3Revision, TagSet};
use crate::value::{RawValue, cast_bool, cast_float, cast_int, cast_text};

const SOUNDCHECK_DESC: &str = "iTunNORM";
const SOUNDCHECK_ATOM: &str = "----:com.apple.iTunes:iTunNORM";
const FREEFORM_MEAN: &str = "----:com.apple.iTunes:";

/// How a value is represented on the wire in its slot
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum WireType {
	Text,
	Int,
	Bool,
}

/// The slot a strategy locates within its family's tag model
#[derive(Debug, Clone, PartialEq)]
enum Selector {
	/// A Vorbis comment or APE item key
	Comment { key: String },
	/// An ID3 text frame
	Frame { id: String },
	/// A description-selected ID3 frame (`TXXX`/`COMM`/`USLT`/`WXXX`)
	FrameDesc {
		id: String,
		description: String,
		language: Option<String>,
	},
	/// A role inside the ID3 involved-people frame
	FramePeople { id: String, role: String },
	/// One half of an `"a/b"` packed ID3 text frame
	FrameSlashPack { id: String, position: u8 },
	/// An owner-selected ID3 `UFID` frame
	FrameUfid { owner: String },
	/// An MP4 atom (plain or freeform ident)
	Atom { ident: String },
	/// An MP4 boolean atom
	AtomBool { ident: String },
	/// One half of an MP4 numeric-pair atom
	AtomTuple { ident: String, index: u8 },
	/// An ASF attribute
	Attribute { name: String },
	/// One half of the SoundCheck pair in the ID3 `COMM iTunNORM` slot
	SoundCheckComment { index: u8 },
	/// One half of the SoundCheck pair in the `iTunNORM` freeform atom
	SoundCheckAtom { index: u8 },
}

/// One way of storing a logical field's value in one tag family
///
/// Constructed through the associated functions and refined with the
/// builder methods:
///
/// ```rust
/// use unitag::strategy::Strategy;
///
/// let gain = Strategy::comment("REPLAYGAIN_TRACK_GAIN").suffix(" dB");
/// let total = Strategy::comment("TRACKC").read_only();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Strategy {
	selector: Selector,
	wire: WireType,
	suffix: Option<String>,
	float_places: u8,
	read_only: bool,
	v23_join: bool,
}

impl Strategy {
	fn with_selector(selector: Selector) -> Self {
		Self {
			selector,
			wire: WireType::Text,
			suffix: None,
			float_places: 2,
			read_only: false,
			v23_join: false,
		}
	}

	/// A Vorbis comment / APE item slot
	pub fn comment(key: &str) -> Self {
		Self::with_selector(Selector::Comment {
			key: key.to_owned(),
		})
	}

	/// An ID3 text frame slot
	pub fn frame(id: &str) -> Self {
		Self::with_selector(Selector::Frame { id: id.to_owned() })
	}

	/// A `TXXX` frame selected by description
	pub fn frame_desc(description: &str) -> Self {
		Self::frame_desc_keyed("TXXX", description, None)
	}

	/// A description-selected frame under another id (`COMM`, `USLT`,
	/// `WXXX`), with an optional language for newly created frames
	pub fn frame_desc_keyed(id: &str, description: &str, language: Option<&str>) -> Self {
		Self::with_selector(Selector::FrameDesc {
			id: id.to_owned(),
			description: description.to_owned(),
			language: language.map(str::to_owned),
		})
	}

	/// A role inside the `TIPL` involved-people frame
	pub fn frame_people(role: &str) -> Self {
		Self::with_selector(Selector::FramePeople {
			id: String::from("TIPL"),
			role: role.to_owned(),
		})
	}

	/// One position (0 or 1) of a slash-packed pair frame (`TRCK`,
	/// `TPOS`)
	pub fn frame_slash_pack(id: &str, position: u8) -> Self {
		Self::with_selector(Selector::FrameSlashPack {
			id: id.to_owned(),
			position,
		})
	}

	/// An owner-selected `UFID` frame
	pub fn frame_ufid(owner: &str) -> Self {
		Self::with_selector(Selector::FrameUfid {
			owner: owner.to_owned(),
		})
	}

	/// An MP4 atom slot, by full ident
	pub fn atom(ident: &str) -> Self {
		Self::with_selector(Selector::Atom {
			ident: ident.to_owned(),
		})
	}

	/// An MP4 freeform atom under the `com.apple.iTunes` mean
	pub fn freeform(name: &str) -> Self {
		Self::atom(&format!("{FREEFORM_MEAN}{name}"))
	}

	/// An MP4 boolean atom (`cpil`)
	pub fn atom_bool(ident: &str) -> Self {
		Self::with_selector(Selector::AtomBool {
			ident: ident.to_owned(),
		})
	}

	/// One index (0 or 1) of an MP4 numeric-pair atom (`trkn`, `disk`)
	pub fn atom_tuple(ident: &str, index: u8) -> Self {
		Self::with_selector(Selector::AtomTuple {
			ident: ident.to_owned(),
			index,
		})
	}

	/// An ASF attribute slot
	pub fn attribute(name: &str) -> Self {
		Self::with_selector(Selector::Attribute {
			name: name.to_owned(),
		})
	}

	/// The gain (0) or peak (1) half of the ID3 SoundCheck comment
	pub fn soundcheck_comment(index: u8) -> Self {
		Self::with_selector(Selector::SoundCheckComment { index })
	}

	/// The gain (0) or peak (1) half of the MP4 SoundCheck atom
	pub fn soundcheck_atom(index: u8) -> Self {
		Self::with_selector(Selector::SoundCheckAtom { index })
	}

	/// Disables writing through this strategy
	///
	/// Intended for wrongly-named legacy slots that should still be
	/// honored on read. Deletes are not blocked.
	#[must_use]
	pub fn read_only(mut self) -> Self {
		self.read_only = true;
		self
	}

	/// Stores the value as an integer on the wire
	#[must_use]
	pub fn wire_int(mut self) -> Self {
		self.wire = WireType::Int;
		self
	}

	/// Stores the value as a boolean on the wire
	#[must_use]
	pub fn wire_bool(mut self) -> Self {
		self.wire = WireType::Bool;
		self
	}

	/// A unit suffix appended on write and stripped on read
	#[must_use]
	pub fn suffix(mut self, suffix: &str) -> Self {
		self.suffix = Some(suffix.to_owned());
		self
	}

	/// Decimal places used when a float is rendered as text
	#[must_use]
	pub fn float_places(mut self, places: u8) -> Self {
		self.float_places = places;
		self
	}

	/// Joins this frame's values with `/` when saving to ID3v2.3, and
	/// splits them back when reading such a tag
	#[must_use]
	pub fn v23_join(mut self) -> Self {
		self.v23_join = true;
		self
	}

	/// Whether writes through this strategy are disabled
	pub fn is_read_only(&self) -> bool {
		self.read_only
	}

	/// The tag family this strategy can touch
	pub fn family(&self) -> TagFamily {
		match self.selector {
			Selector::Comment { .. } => TagFamily::VorbisComments,
			Selector::Frame { .. }
			| Selector::FrameDesc { .. }
			| Selector::FramePeople { .. }
			| Selector::FrameSlashPack { .. }
			| Selector::FrameUfid { .. }
			| Selector::SoundCheckComment { .. } => TagFamily::Id3,
			Selector::Atom { .. }
			| Selector::AtomBool { .. }
			| Selector::AtomTuple { .. }
			| Selector::SoundCheckAtom { .. } => TagFamily::Ilst,
			Selector::Attribute { .. } => TagFamily::Asf,
		}
	}

	/// Whether this strategy can touch the given family
	///
	/// Comment slots are shared by the Vorbis and APE families; every
	/// other selector is family-exclusive.
	pub fn applies_to(&self, family: TagFamily) -> bool {
		match self.selector {
			Selector::Comment { .. } => {
				family == TagFamily::VorbisComments || family == TagFamily::Ape
			},
			_ => self.family() == family,
		}
	}

	pub(crate) fn v23_join_description(&self) -> Option<&str> {
		match &self.selector {
			Selector::FrameDesc { description, .. } if self.v23_join => Some(description),
			_ => None,
		}
	}

	// Wire encoding.

	/// Shapes a value for storage, per this strategy's wire type.
	pub(crate) fn serialize(&self, value: &RawValue) -> RawValue {
		match self.wire {
			WireType::Int => RawValue::Int(cast_int(value)),
			WireType::Bool => RawValue::Bool(cast_bool(value)),
			WireType::Text => {
				let mut text = match value {
					RawValue::Float(float) => {
						format!("{:.*}", usize::from(self.float_places), float)
					},
					other => cast_text(other),
				};

				if let Some(suffix) = &self.suffix {
					text.push_str(suffix);
				}

				RawValue::Text(text)
			},
		}
	}

	/// The inverse of [`Strategy::serialize`], as far as the wire value
	/// allows: strips the unit suffix from text values.
	pub(crate) fn deserialize(&self, raw: RawValue) -> RawValue {
		match (&self.suffix, raw) {
			(Some(suffix), RawValue::Text(text)) => match text.strip_suffix(suffix.as_str()) {
				Some(stripped) => RawValue::Text(stripped.to_owned()),
				None => RawValue::Text(text),
			},
			(_, raw) => raw,
		}
	}

	fn serialize_text(&self, value: &RawValue) -> String {
		cast_text(&self.serialize(value))
	}

	// Fetch/store/delete.

	/// Reads the scalar value of this strategy's slot, if present.
	pub(crate) fn get(&self, tag: &TagSet) -> Option<RawValue> {
		match &self.selector {
			Selector::Comment { .. }
			| Selector::Frame { .. }
			| Selector::FrameDesc { .. }
			| Selector::Atom { .. }
			| Selector::Attribute { .. } => {
				let mut values = self.get_list(tag)?;
				if values.is_empty() {
					return None;
				}

				Some(values.remove(0))
			},
			Selector::FramePeople { id, role } => {
				let id3 = tag.id3()?;
				id3.frames().iter().find_map(|frame| match frame {
					Frame::People { id: frame_id, pairs } if frame_id == id => pairs
						.iter()
						.find(|(pair_role, _)| pair_role.eq_ignore_ascii_case(role))
						.map(|(_, person)| RawValue::Text(person.clone())),
					_ => None,
				})
			},
			Selector::FrameSlashPack { position, .. } => {
				let items = self.fetch_slash_pack(tag)?;
				items[usize::from(*position)]
					.clone()
					.map(RawValue::Text)
			},
			Selector::FrameUfid { owner } => {
				let id3 = tag.id3()?;
				id3.frames().iter().find_map(|frame| match frame {
					Frame::UniqueFileId {
						owner: frame_owner,
						data,
					} if frame_owner == owner => Some(RawValue::Bytes(data.clone())),
					_ => None,
				})
			},
			Selector::AtomBool { ident } => match tag.ilst()?.get(ident) {
				Some(AtomData::Bool(value)) => Some(RawValue::Bool(*value)),
				_ => None,
			},
			Selector::AtomTuple { ident, index } => {
				let pair = match tag.ilst()?.get(ident) {
					Some(AtomData::Pair(pairs)) => *pairs.first()?,
					_ => return None,
				};

				let value = if *index == 0 { pair.0 } else { pair.1 };

				// Pairs are always stored whole, a zero marks the
				// unset half.
				if value == 0 {
					return None;
				}

				Some(RawValue::Int(i64::from(value)))
			},
			Selector::SoundCheckComment { index } | Selector::SoundCheckAtom { index } => {
				let data = self.fetch_soundcheck(tag)?;
				let (gain, peak) = soundcheck::decode(&data);
				Some(RawValue::Float(if *index == 0 { gain } else { peak }))
			},
		}
	}

	/// Reads every value of this strategy's slot, in order.
	///
	/// `None` means the slot is absent; single-valued selectors yield
	/// one-element lists.
	pub(crate) fn get_list(&self, tag: &TagSet) -> Option<Vec<RawValue>> {
		match &self.selector {
			Selector::Comment { key } => match tag {
				TagSet::Vorbis(vorbis) => {
					if !vorbis.contains(key) {
						return None;
					}

					Some(
						vorbis
							.get_all(key)
							.map(|value| self.deserialize(RawValue::Text(value.to_owned())))
							.collect(),
					)
				},
				TagSet::Ape(ape) => match &ape.get(key)?.value {
					ApeItemValue::Text(values) => Some(
						values
							.iter()
							.map(|value| self.deserialize(RawValue::Text(value.clone())))
							.collect(),
					),
					ApeItemValue::Binary(data) => {
						Some(vec![self.deserialize(RawValue::Bytes(data.clone()))])
					},
				},
				_ => None,
			},
			Selector::Frame { id } => {
				let values = tag.id3()?.text_values(id)?;
				Some(
					values
						.iter()
						.map(|value| self.deserialize(RawValue::Text(value.clone())))
						.collect(),
				)
			},
			Selector::FrameDesc {
				id, description, ..
			} => {
				let id3 = tag.id3()?;
				let split = self.v23_join && id3.revision() == Id3Revision::V23;

				id3.frames().iter().find_map(|frame| match frame {
					Frame::ExtendedText {
						id: frame_id,
						description: frame_desc,
						values,
						..
					} if frame_id == id && frame_desc.eq_ignore_ascii_case(description) => {
						let values: Vec<RawValue> = if split {
							values
								.iter()
								.flat_map(|value| value.split('/'))
								.map(|value| {
									self.deserialize(RawValue::Text(value.to_owned()))
								})
								.collect()
						} else {
							values
								.iter()
								.map(|value| self.deserialize(RawValue::Text(value.clone())))
								.collect()
						};

						Some(values)
					},
					Frame::Url {
						description: frame_desc,
						url,
					} if id == "WXXX" && frame_desc.eq_ignore_ascii_case(description) => {
						Some(vec![self.deserialize(RawValue::Text(url.clone()))])
					},
					_ => None,
				})
			},
			Selector::Atom { ident } => match tag.ilst()?.get(ident)? {
				AtomData::Utf8(values) => Some(
					values
						.iter()
						.map(|value| self.deserialize(RawValue::Text(value.clone())))
						.collect(),
				),
				AtomData::Int(values) => {
					Some(values.iter().map(|value| RawValue::Int(*value)).collect())
				},
				AtomData::Bool(value) => Some(vec![RawValue::Bool(*value)]),
				_ => None,
			},
			Selector::Attribute { name } => {
				let values = tag.asf()?.values(name)?;
				Some(
					values
						.iter()
						.map(|value| match value {
							AsfValue::Unicode(text) => {
								self.deserialize(RawValue::Text(text.clone()))
							},
							AsfValue::Bool(flag) => RawValue::Bool(*flag),
							AsfValue::Bytes(bytes) => RawValue::Bytes(bytes.clone()),
						})
						.collect(),
				)
			},
			_ => self.get(tag).map(|value| vec![value]),
		}
	}

	/// Writes a scalar value into this strategy's slot.
	///
	/// A no-op when the tag set belongs to a family this strategy does
	/// not apply to.
	pub(crate) fn set(&self, tag: &mut TagSet, value: &RawValue) {
		if !self.applies_to(tag.family()) {
			return;
		}

		match &self.selector {
			Selector::Comment { .. }
			| Selector::Frame { .. }
			| Selector::FrameDesc { .. }
			| Selector::Atom { .. }
			| Selector::Attribute { .. } => {
				self.set_list(tag, std::slice::from_ref(value));
			},
			Selector::FramePeople { id, role } => {
				let Some(id3) = tag.id3_mut() else { return };
				let person = self.serialize_text(value);

				for frame in id3.frames_mut() {
					if let Frame::People { id: frame_id, pairs } = frame {
						if frame_id != id {
							continue;
						}

						if let Some(pair) = pairs
							.iter_mut()
							.find(|(pair_role, _)| pair_role.eq_ignore_ascii_case(role))
						{
							pair.1 = person;
							return;
						}
					}
				}

				id3.push(Frame::People {
					id: id.clone(),
					pairs: vec![(role.clone(), person)],
				});
			},
			Selector::FrameSlashPack { id, position } => {
				let mut items = self.fetch_slash_pack(tag).unwrap_or([None, None]);
				items[usize::from(*position)] = Some(self.serialize_text(value));

				if items[0].is_none() {
					items[0] = Some(String::new());
				}

				let packed = match &items[1] {
					// The unset trailing half is simply not stored
					None => items[0].clone().unwrap_or_default(),
					Some(second) => {
						format!("{}/{}", items[0].clone().unwrap_or_default(), second)
					},
				};

				if let Some(id3) = tag.id3_mut() {
					id3.set_text(id, vec![packed]);
				}
			},
			Selector::FrameUfid { owner } => {
				let Some(id3) = tag.id3_mut() else { return };
				let data = self.serialize_text(value).into_bytes();

				id3.frames_mut().retain(|frame| {
					!matches!(frame, Frame::UniqueFileId { owner: frame_owner, .. } if frame_owner == owner)
				});
				id3.push(Frame::UniqueFileId {
					owner: owner.clone(),
					data,
				});
			},
			Selector::AtomBool { ident } => {
				let flag = cast_bool(value);
				if let Some(ilst) = tag.ilst_mut() {
					ilst.set(ident, AtomData::Bool(flag));
				}
			},
			Selector::AtomTuple { ident, index } => {
				let Some(ilst) = tag.ilst_mut() else { return };

				let mut pair = match ilst.get(ident) {
					Some(AtomData::Pair(pairs)) => pairs.first().copied().unwrap_or((0, 0)),
					_ => (0, 0),
				};

				let int = cast_int(value).clamp(0, i64::from(u16::MAX)) as u16;
				if *index == 0 {
					pair.0 = int;
				} else {
					pair.1 = int;
				}

				ilst.set(ident, AtomData::Pair(vec![pair]));
			},
			Selector::SoundCheckComment { index } | Selector::SoundCheckAtom { index } => {
				let mut gain_peak = match self.fetch_soundcheck(tag) {
					Some(data) => {
						let (gain, peak) = soundcheck::decode(&data);
						[gain, peak]
					},
					None => [0.0, 0.0],
				};
				gain_peak[usize::from(*index)] = cast_float(value);

				self.store_soundcheck(tag, &soundcheck::encode(gain_peak[0], gain_peak[1]));
			},
		}
	}

	/// Replaces every value of this strategy's slot.
	pub(crate) fn set_list(&self, tag: &mut TagSet, values: &[RawValue]) {
		if !self.applies_to(tag.family()) {
			return;
		}

		match &self.selector {
			Selector::Comment { key } => {
				let serialized: Vec<String> =
					values.iter().map(|value| self.serialize_text(value)).collect();

				match tag {
					TagSet::Vorbis(vorbis) => vorbis.set_all(key, serialized),
					TagSet::Ape(ape) => ape.insert(key, ApeItemValue::Text(serialized)),
					_ => {},
				}
			},
			Selector::Frame { id } => {
				let serialized: Vec<String> =
					values.iter().map(|value| self.serialize_text(value)).collect();
				if let Some(id3) = tag.id3_mut() {
					id3.set_text(id, serialized);
				}
			},
			Selector::FrameDesc {
				id,
				description,
				language,
			} => {
				let serialized: Vec<String> =
					values.iter().map(|value| self.serialize_text(value)).collect();
				let Some(id3) = tag.id3_mut() else { return };

				self.delete_desc_frames(id3, id, description);

				if id == "WXXX" {
					id3.push(Frame::Url {
						description: description.clone(),
						url: serialized.into_iter().next().unwrap_or_default(),
					});
					return;
				}

				// COMM/USLT need a language; XXX is the conventional
				// "no particular language" code.
				let language = match (id.as_str(), language) {
					(_, Some(language)) => language.clone(),
					("TXXX", None) => String::new(),
					(_, None) => String::from("XXX"),
				};

				id3.push(Frame::ExtendedText {
					id: id.clone(),
					description: description.clone(),
					language,
					values: serialized,
				});
			},
			Selector::Atom { ident } => {
				let Some(ilst) = tag.ilst_mut() else { return };

				let data = if self.wire == WireType::Int {
					AtomData::Int(values.iter().map(cast_int).collect())
				} else {
					AtomData::Utf8(values.iter().map(|value| self.serialize_text(value)).collect())
				};

				ilst.set(ident, data);
			},
			Selector::Attribute { name } => {
				let serialized: Vec<AsfValue> = values
					.iter()
					.map(|value| {
						if self.wire == WireType::Bool {
							AsfValue::Bool(cast_bool(value))
						} else {
							AsfValue::Unicode(self.serialize_text(value))
						}
					})
					.collect();

				if let Some(asf) = tag.asf_mut() {
					asf.set(name, serialized);
				}
			},
			_ => {
				if let Some(value) = values.first() {
					self.set(tag, value);
				}
			},
		}
	}

	/// Removes this strategy's slot entirely.
	pub(crate) fn delete(&self, tag: &mut TagSet) {
		if !self.applies_to(tag.family()) {
			return;
		}

		match &self.selector {
			Selector::Comment { key } => match tag {
				TagSet::Vorbis(vorbis) => vorbis.remove(key),
				TagSet::Ape(ape) => ape.remove(key),
				_ => {},
			},
			Selector::Frame { id } | Selector::FramePeople { id, .. } => {
				if let Some(id3) = tag.id3_mut() {
					id3.remove_all(id);
				}
			},
			Selector::FrameDesc {
				id, description, ..
			} => {
				if let Some(id3) = tag.id3_mut() {
					self.delete_desc_frames(id3, id, description);
				}
			},
			Selector::FrameSlashPack { id, position } => {
				if *position == 0 {
					if let Some(id3) = tag.id3_mut() {
						id3.remove_all(id);
					}
					return;
				}

				// Deleting the trailing half truncates the pack
				let Some(items) = self.fetch_slash_pack(tag) else {
					return;
				};
				let first = items[0].clone().unwrap_or_default();
				if let Some(id3) = tag.id3_mut() {
					id3.set_text(id, vec![first]);
				}
			},
			Selector::FrameUfid { owner } => {
				if let Some(id3) = tag.id3_mut() {
					id3.frames_mut().retain(|frame| {
						!matches!(frame, Frame::UniqueFileId { owner: frame_owner, .. } if frame_owner == owner)
					});
				}
			},
			Selector::Atom { ident }
			| Selector::AtomBool { ident }
			| Selector::AtomTuple { ident, index: 0 } => {
				if let Some(ilst) = tag.ilst_mut() {
					ilst.remove(ident);
				}
			},
			Selector::AtomTuple { .. } => {
				// Zero marks the unset half of a stored pair
				self.set(tag, &RawValue::Int(0));
			},
			Selector::Attribute { name } => {
				if let Some(asf) = tag.asf_mut() {
					asf.remove(name);
				}
			},
			Selector::SoundCheckComment { .. } => {
				if let Some(id3) = tag.id3_mut() {
					self.delete_desc_frames(id3, "COMM", SOUNDCHECK_DESC);
				}
			},
			Selector::SoundCheckAtom { .. } => {
				if let Some(ilst) = tag.ilst_mut() {
					ilst.remove(SOUNDCHECK_ATOM);
				}
			},
		}
	}

	// Selector-specific helpers.

	fn delete_desc_frames(&self, id3: &mut crate::tags::Id3Tag, id: &str, description: &str) {
		id3.frames_mut().retain(|frame| match frame {
			Frame::ExtendedText {
				id: frame_id,
				description: frame_desc,
				..
			} => frame_id != id || !frame_desc.eq_ignore_ascii_case(description),
			Frame::Url {
				description: frame_desc,
				..
			} => id != "WXXX" || !frame_desc.eq_ignore_ascii_case(description),
			_ => true,
		});
	}

	/// The two halves of a slash-packed frame, absent halves as `None`.
	fn fetch_slash_pack(&self, tag: &TagSet) -> Option<[Option<String>; 2]> {
		let Selector::FrameSlashPack { id, .. } = &self.selector else {
			return None;
		};

		let text = tag.id3()?.text(id)?;
		let mut pieces = text.split('/');

		Some([
			pieces.next().map(str::to_owned),
			pieces.next().map(str::to_owned),
		])
	}

	fn fetch_soundcheck(&self, tag: &TagSet) -> Option<String> {
		match &self.selector {
			Selector::SoundCheckComment { .. } => {
				tag.id3()?.frames().iter().find_map(|frame| match frame {
					Frame::ExtendedText {
						id,
						description,
						values,
						..
					} if id == "COMM" && description.eq_ignore_ascii_case(SOUNDCHECK_DESC) => {
						values.first().cloned()
					},
					_ => None,
				})
			},
			Selector::SoundCheckAtom { .. } => match tag.ilst()?.get(SOUNDCHECK_ATOM)? {
				AtomData::Utf8(values) => values.first().cloned(),
				_ => None,
			},
			_ => None,
		}
	}

	fn store_soundcheck(&self, tag: &mut TagSet, encoded: &str) {
		match &self.selector {
			Selector::SoundCheckComment { .. } => {
				let Some(id3) = tag.id3_mut() else { return };
				self.delete_desc_frames(id3, "COMM", SOUNDCHECK_DESC);
				id3.push(Frame::ExtendedText {
					id: String::from("COMM"),
					description: String::from(SOUNDCHECK_DESC),
					language: String::from("eng"),
					values: vec![encoded.to_owned()],
				});
			},
			Selector::SoundCheckAtom { .. } => {
				if let Some(ilst) = tag.ilst_mut() {
					ilst.set(SOUNDCHECK_ATOM, AtomData::Utf8(vec![encoded.to_owned()]));
				}
			},
			_ => {},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::Strategy;
	use crate::kind::TagFamily;
	use crate::tags::TagSet;
	use crate::value::RawValue;

	fn text(value: &str) -> RawValue {
		RawValue::Text(value.to_owned())
	}

	#[test_log::test]
	fn applicability() {
		assert!(Strategy::comment("TITLE").applies_to(TagFamily::VorbisComments));
		assert!(Strategy::comment("TITLE").applies_to(TagFamily::Ape));
		assert!(!Strategy::comment("TITLE").applies_to(TagFamily::Id3));
		assert!(Strategy::frame("TIT2").applies_to(TagFamily::Id3));
		assert!(Strategy::atom("©nam").applies_to(TagFamily::Ilst));
		assert!(Strategy::attribute("Title").applies_to(TagFamily::Asf));
	}

	#[test_log::test]
	fn inapplicable_writes_are_no_ops() {
		let mut tag = TagSet::new(TagFamily::Ilst);
		Strategy::frame("TIT2").set(&mut tag, &text("nope"));

		assert!(tag.is_empty());
	}

	#[test_log::test]
	fn suffix_round_trip() {
		let strategy = Strategy::comment("REPLAYGAIN_TRACK_GAIN").suffix(" dB");
		let mut tag = TagSet::new(TagFamily::VorbisComments);

		strategy.set(&mut tag, &RawValue::Float(-2.25));
		assert_eq!(
			tag.vorbis().unwrap().first("REPLAYGAIN_TRACK_GAIN"),
			Some("-2.25 dB")
		);
		assert_eq!(strategy.get(&tag), Some(text("-2.25")));
	}

	#[test_log::test]
	fn float_places() {
		let strategy = Strategy::comment("REPLAYGAIN_TRACK_PEAK").float_places(6);
		let mut tag = TagSet::new(TagFamily::VorbisComments);

		strategy.set(&mut tag, &RawValue::Float(0.5));
		assert_eq!(
			tag.vorbis().unwrap().first("REPLAYGAIN_TRACK_PEAK"),
			Some("0.500000")
		);
	}

	#[test_log::test]
	fn slash_pack() {
		let track = Strategy::frame_slash_pack("TRCK", 0);
		let total = Strategy::frame_slash_pack("TRCK", 1);
		let mut tag = TagSet::new(TagFamily::Id3);

		track.set(&mut tag, &RawValue::Int(3));
		assert_eq!(tag.id3().unwrap().text("TRCK"), Some("3"));

		total.set(&mut tag, &RawValue::Int(12));
		assert_eq!(tag.id3().unwrap().text("TRCK"), Some("3/12"));
		assert_eq!(track.get(&tag), Some(text("3")));
		assert_eq!(total.get(&tag), Some(text("12")));

		// Writing the trailing half first defaults the leading one
		let mut empty = TagSet::new(TagFamily::Id3);
		total.set(&mut empty, &RawValue::Int(12));
		assert_eq!(empty.id3().unwrap().text("TRCK"), Some("/12"));

		// Deleting the trailing half truncates, deleting the leading
		// one removes the slot
		total.delete(&mut tag);
		assert_eq!(tag.id3().unwrap().text("TRCK"), Some("3"));
		track.delete(&mut tag);
		assert_eq!(tag.id3().unwrap().text("TRCK"), None);
	}

	#[test_log::test]
	fn atom_tuple_zero_is_unset() {
		let track = Strategy::atom_tuple("trkn", 0);
		let total = Strategy::atom_tuple("trkn", 1);
		let mut tag = TagSet::new(TagFamily::Ilst);

		track.set(&mut tag, &RawValue::Int(3));
		assert_eq!(track.get(&tag), Some(RawValue::Int(3)));
		assert_eq!(total.get(&tag), None);

		total.set(&mut tag, &RawValue::Int(12));
		assert_eq!(total.get(&tag), Some(RawValue::Int(12)));

		total.delete(&mut tag);
		assert_eq!(total.get(&tag), None);
		assert_eq!(track.get(&tag), Some(RawValue::Int(3)));

		track.delete(&mut tag);
		assert!(tag.is_empty());
	}

	#[test_log::test]
	fn people_updates_in_place() {
		let arranger = Strategy::frame_people("arranger");
		let mut tag = TagSet::new(TagFamily::Id3);

		arranger.set(&mut tag, &text("Some Person"));
		assert_eq!(arranger.get(&tag), Some(text("Some Person")));

		arranger.set(&mut tag, &text("Другой"));
		assert_eq!(arranger.get(&tag), Some(text("Другой")));
		assert_eq!(tag.id3().unwrap().frames().len(), 1);
	}

	#[test_log::test]
	fn desc_frames_match_case_insensitively() {
		let asin = Strategy::frame_desc("ASIN");
		let lower = Strategy::frame_desc("asin");
		let mut tag = TagSet::new(TagFamily::Id3);

		asin.set(&mut tag, &text("B000002UAL"));
		assert_eq!(lower.get(&tag), Some(text("B000002UAL")));

		lower.set(&mut tag, &text("B000002UAM"));
		assert_eq!(tag.id3().unwrap().frames().len(), 1);

		lower.delete(&mut tag);
		assert_eq!(asin.get(&tag), None);
	}

	#[test_log::test]
	fn ufid() {
		let mbid = Strategy::frame_ufid("http://musicbrainz.org");
		let mut tag = TagSet::new(TagFamily::Id3);

		mbid.set(&mut tag, &text("8b882575-08a5-4452-a7a7-cbb8a1531f9e"));
		assert_eq!(
			mbid.get(&tag),
			Some(RawValue::Bytes(
				b"8b882575-08a5-4452-a7a7-cbb8a1531f9e".to_vec()
			))
		);

		mbid.delete(&mut tag);
		assert_eq!(mbid.get(&tag), None);
	}

	#[test_log::test]
	fn soundcheck_pair_shares_one_slot() {
		let gain = Strategy::soundcheck_comment(0);
		let peak = Strategy::soundcheck_comment(1);
		let mut tag = TagSet::new(TagFamily::Id3);

		gain.set(&mut tag, &RawValue::Float(-6.0));
		peak.set(&mut tag, &RawValue::Float(0.5));

		assert_eq!(tag.id3().unwrap().frames().len(), 1);

		let read_gain = gain.get(&tag).unwrap();
		let read_peak = peak.get(&tag).unwrap();
		match (read_gain, read_peak) {
			(RawValue::Float(gain_value), RawValue::Float(peak_value)) => {
				assert!((gain_value + 6.0).abs() <= 0.01);
				assert!((peak_value - 0.5).abs() <= 1e-6);
			},
			other => panic!("unexpected values: {other:?}"),
		}
	}

	#[test_log::test]
	fn wire_types() {
		let bpm = Strategy::atom("tmpo").wire_int();
		let comp = Strategy::attribute("WM/IsCompilation").wire_bool();

		let mut ilst = TagSet::new(TagFamily::Ilst);
		bpm.set(&mut ilst, &text("128"));
		assert_eq!(bpm.get(&ilst), Some(RawValue::Int(128)));

		let mut asf = TagSet::new(TagFamily::Asf);
		comp.set(&mut asf, &RawValue::Int(1));
		assert_eq!(comp.get(&asf), Some(RawValue::Bool(true)));
	}

	#[test_log::test]
	fn list_order_preserved() {
		let genres = Strategy::comment("GENRE");
		let mut tag = TagSet::new(TagFamily::VorbisComments);

		let values = [text("Ska"), text("Reggae"), text("Dub")];
		genres.set_list(&mut tag, &values);

		assert_eq!(genres.get_list(&tag), Some(values.to_vec()));
		assert_eq!(genres.get(&tag), Some(text("Ska")));
	}
}
