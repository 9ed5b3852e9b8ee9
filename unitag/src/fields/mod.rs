//! Logical fields composed of ordered storage strategies
//!
//! A [`FieldSpec`] names one logical attribute and lists the strategies
//! that back it, in priority order. Reads stop at the first strategy
//! yielding a non-empty value; writes go through every applicable,
//! non-read-only strategy.

pub(crate) mod registry;

pub use registry::add_field;

use crate::date::DateValue;
use crate::error::Result;
use crate::kind::{FileKind, TagFamily};
use crate::picture::{Image, ImageType};
use crate::soundcheck;
use crate::strategy::{ImageStrategy, Strategy};
use crate::tags::TagSet;
use crate::value::{RawValue, Value, cast_bool, cast_float, cast_int, cast_text};

/// The canonical type a scalar field coerces its raw values to
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum ScalarType {
	/// Free-form text
	Text,
	/// A whole number
	Integer,
	/// A floating-point number
	Float,
	/// A flag
	Boolean,
}

#[derive(Debug, Clone)]
enum FieldKind {
	Scalar {
		value_type: ScalarType,
		strategies: Vec<Strategy>,
	},
	List {
		strategies: Vec<Strategy>,
	},
	/// Scalar view over a list field's strategies
	Single {
		parent: String,
	},
	Date {
		strategies: Vec<Strategy>,
		year_strategies: Vec<Strategy>,
	},
	/// One component (0 = year, 1 = month, 2 = day) of a date field
	DateComponent {
		parent: String,
		position: usize,
	},
	QNumber {
		fraction_bits: u8,
		strategies: Vec<Strategy>,
	},
	CoverArt,
	Images,
}

/// The description of one logical field: a name plus the strategies
/// backing it
///
/// Standard fields live in the built-in registry; callers can register
/// additional ones through [`add_field`].
#[derive(Debug, Clone)]
pub struct FieldSpec {
	name: String,
	kind: FieldKind,
}

impl FieldSpec {
	fn new(name: &str, kind: FieldKind) -> Self {
		Self {
			name: name.to_owned(),
			kind,
		}
	}

	/// A text-valued scalar field
	pub fn text(name: &str, strategies: Vec<Strategy>) -> Self {
		Self::scalar(name, ScalarType::Text, strategies)
	}

	/// An integer-valued scalar field
	pub fn integer(name: &str, strategies: Vec<Strategy>) -> Self {
		Self::scalar(name, ScalarType::Integer, strategies)
	}

	/// A float-valued scalar field
	pub fn float(name: &str, strategies: Vec<Strategy>) -> Self {
		Self::scalar(name, ScalarType::Float, strategies)
	}

	/// A boolean-valued scalar field
	pub fn boolean(name: &str, strategies: Vec<Strategy>) -> Self {
		Self::scalar(name, ScalarType::Boolean, strategies)
	}

	/// A scalar field of the given type
	pub fn scalar(name: &str, value_type: ScalarType, strategies: Vec<Strategy>) -> Self {
		Self::new(
			name,
			FieldKind::Scalar {
				value_type,
				strategies,
			},
		)
	}

	/// An ordered list-of-text field
	pub fn list(name: &str, strategies: Vec<Strategy>) -> Self {
		Self::new(name, FieldKind::List { strategies })
	}

	/// A scalar view over a list field: first element on read, whole
	/// replacement with a single element on write
	pub fn single_of(name: &str, parent: &str) -> Self {
		Self::new(
			name,
			FieldKind::Single {
				parent: parent.to_owned(),
			},
		)
	}

	/// A date field over primary date strategies plus legacy year-only
	/// strategies
	pub fn date(name: &str, strategies: Vec<Strategy>, year_strategies: Vec<Strategy>) -> Self {
		Self::new(
			name,
			FieldKind::Date {
				strategies,
				year_strategies,
			},
		)
	}

	/// A single year (0), month (1), or day (2) view of a date field
	pub fn date_component(name: &str, parent: &str, position: usize) -> Self {
		Self::new(
			name,
			FieldKind::DateComponent {
				parent: parent.to_owned(),
				position,
			},
		)
	}

	/// A float field stored as a fixed-point integer with
	/// `fraction_bits` fractional bits
	pub fn q_number(name: &str, fraction_bits: u8, strategies: Vec<Strategy>) -> Self {
		Self::new(
			name,
			FieldKind::QNumber {
				fraction_bits,
				strategies,
			},
		)
	}

	/// The legacy single-image view over the embedded image list
	pub fn cover_art(name: &str) -> Self {
		Self::new(name, FieldKind::CoverArt)
	}

	/// The embedded image list field
	pub fn images(name: &str) -> Self {
		Self::new(name, FieldKind::Images)
	}

	/// The field's logical name
	pub fn name(&self) -> &str {
		&self.name
	}

	pub(crate) fn is_list(&self) -> bool {
		matches!(self.kind, FieldKind::List { .. })
	}

	pub(crate) fn is_date(&self) -> bool {
		matches!(self.kind, FieldKind::Date { .. })
	}

	pub(crate) fn is_date_component(&self) -> bool {
		matches!(self.kind, FieldKind::DateComponent { .. })
	}

	pub(crate) fn has_strategies(&self) -> bool {
		match &self.kind {
			FieldKind::Scalar { strategies, .. }
			| FieldKind::List { strategies }
			| FieldKind::Date { strategies, .. }
			| FieldKind::QNumber { strategies, .. } => !strategies.is_empty(),
			_ => true,
		}
	}

	pub(crate) fn parent(&self) -> Option<&str> {
		match &self.kind {
			FieldKind::Single { parent } | FieldKind::DateComponent { parent, .. } => {
				Some(parent)
			},
			_ => None,
		}
	}

	pub(crate) fn v23_join_descriptions(&self) -> Vec<String> {
		match &self.kind {
			FieldKind::Scalar { strategies, .. }
			| FieldKind::List { strategies }
			| FieldKind::Date { strategies, .. }
			| FieldKind::QNumber { strategies, .. } => strategies
				.iter()
				.filter_map(|strategy| strategy.v23_join_description())
				.map(str::to_owned)
				.collect(),
			_ => Vec::new(),
		}
	}

	/// Reads the field's current value, `None` when unset everywhere.
	pub(crate) fn get(&self, kind: FileKind, tag: &TagSet) -> Option<Value> {
		match &self.kind {
			FieldKind::Scalar {
				value_type,
				strategies,
			} => {
				let raw = first_raw(strategies, tag)?;
				Some(coerce(*value_type, &raw))
			},
			FieldKind::List { strategies } => {
				for strategy in applicable(strategies, tag.family()) {
					if let Some(values) = strategy.get_list(tag) {
						if !values.is_empty() {
							return Some(Value::List(
								values.iter().map(cast_text).collect(),
							));
						}
					}
				}

				None
			},
			FieldKind::Single { parent } => {
				let strategies = resolve_list_strategies(parent)?;
				let raw = first_raw(&strategies, tag)?;
				Some(coerce(ScalarType::Text, &raw))
			},
			FieldKind::Date {
				strategies,
				year_strategies,
			} => {
				let date = date_tuple(strategies, year_strategies, tag);
				date.year?;
				Some(Value::Date(date))
			},
			FieldKind::DateComponent { parent, position } => {
				let (strategies, year_strategies) = resolve_date_strategies(parent)?;
				let date = date_tuple(&strategies, &year_strategies, tag);
				let component = match position {
					0 => date.year.map(i64::from),
					1 => date.month.map(i64::from),
					_ => date.day.map(i64::from),
				};
				component.map(Value::Int)
			},
			FieldKind::QNumber {
				fraction_bits,
				strategies,
			} => {
				let raw = first_raw(strategies, tag)?;
				Some(Value::Float(soundcheck::q_to_float(
					cast_int(&raw),
					*fraction_bits,
				)))
			},
			FieldKind::CoverArt => {
				let images = ImageStrategy::for_kind(kind).get(tag);
				let representative = guess_cover_image(&images)?;
				Some(Value::Binary(representative.data().to_vec()))
			},
			FieldKind::Images => {
				let images = ImageStrategy::for_kind(kind).get(tag);
				if images.is_empty() {
					return None;
				}

				Some(Value::Images(images))
			},
		}
	}

	/// Writes a value through every applicable, writable strategy.
	///
	/// `None` writes the type's zero value for scalars and deletes
	/// everything else.
	pub(crate) fn set(&self, kind: FileKind, tag: &mut TagSet, value: Option<&Value>) -> Result<()> {
		match &self.kind {
			FieldKind::Scalar {
				value_type,
				strategies,
			} => {
				let raw = match value {
					Some(value) => coerce_raw(*value_type, &raw_from_value(value)),
					None => zero_raw(*value_type),
				};

				for strategy in writable(strategies, tag.family()) {
					strategy.set(tag, &raw);
				}
			},
			FieldKind::List { strategies } => {
				let Some(value) = value else {
					self.delete(kind, tag);
					return Ok(());
				};

				let raws = raw_list_from_value(value);
				for strategy in writable(strategies, tag.family()) {
					strategy.set_list(tag, &raws);
				}
			},
			FieldKind::Single { parent } => {
				let Some(strategies) = resolve_list_strategies(parent) else {
					return Ok(());
				};

				let raw = match value {
					Some(value) => RawValue::Text(cast_text(&raw_from_value(value))),
					None => RawValue::Text(String::new()),
				};

				for strategy in writable(&strategies, tag.family()) {
					strategy.set(tag, &raw);
				}
			},
			FieldKind::Date {
				strategies,
				year_strategies,
			} => {
				let date = value.and_then(|value| match value {
					Value::Date(date) => Some(*date),
					other => {
						let parsed = DateValue::parse(&cast_text(&raw_from_value(other)));
						(!parsed.is_empty()).then_some(parsed)
					},
				});

				set_date(strategies, year_strategies, tag, date);
			},
			FieldKind::DateComponent { parent, position } => {
				let Some((strategies, year_strategies)) = resolve_date_strategies(parent)
				else {
					return Ok(());
				};

				let mut date = date_tuple(&strategies, &year_strategies, tag);
				let component = value.map(|value| cast_int(&raw_from_value(value)));
				match position {
					0 => date.year = component.map(|c| c as i32),
					1 => date.month = component.map(|c| c.clamp(0, 255) as u8),
					_ => date.day = component.map(|c| c.clamp(0, 255) as u8),
				}

				set_date(&strategies, &year_strategies, tag, Some(date));
			},
			FieldKind::QNumber {
				fraction_bits,
				strategies,
			} => {
				let Some(value) = value else {
					self.delete(kind, tag);
					return Ok(());
				};

				let stored = soundcheck::float_to_q(
					cast_float(&raw_from_value(value)),
					*fraction_bits,
				);
				let raw = RawValue::Int(stored);

				for strategy in writable(strategies, tag.family()) {
					strategy.set(tag, &raw);
				}
			},
			FieldKind::CoverArt => {
				let strategy = ImageStrategy::for_kind(kind);
				match value.map(raw_from_value) {
					Some(RawValue::Bytes(data)) if !data.is_empty() => {
						strategy.set(tag, &[Image::from_data(data)])?;
					},
					_ => strategy.set(tag, &[])?,
				}
			},
			FieldKind::Images => {
				let strategy = ImageStrategy::for_kind(kind);
				match value {
					Some(Value::Images(images)) => strategy.set(tag, images)?,
					_ => strategy.delete(tag),
				}
			},
		}

		Ok(())
	}

	/// Removes the field's slots through every applicable strategy.
	pub(crate) fn delete(&self, kind: FileKind, tag: &mut TagSet) {
		match &self.kind {
			FieldKind::Scalar { strategies, .. }
			| FieldKind::List { strategies }
			| FieldKind::QNumber { strategies, .. } => {
				for strategy in applicable(strategies, tag.family()) {
					strategy.delete(tag);
				}
			},
			FieldKind::Single { parent } => {
				if let Some(strategies) = resolve_list_strategies(parent) {
					for strategy in applicable(&strategies, tag.family()) {
						strategy.delete(tag);
					}
				}
			},
			FieldKind::Date {
				strategies,
				year_strategies,
			} => {
				delete_date(strategies, year_strategies, tag);
			},
			FieldKind::DateComponent { .. } => {
				// Unsetting a component is a read-mutate-write of the
				// parent date.
				let _ = self.set(kind, tag, None);
			},
			FieldKind::CoverArt | FieldKind::Images => {
				ImageStrategy::for_kind(kind).delete(tag);
			},
		}
	}
}

fn applicable(
	strategies: &[Strategy],
	family: TagFamily,
) -> impl Iterator<Item = &Strategy> {
	strategies
		.iter()
		.filter(move |strategy| strategy.applies_to(family))
}

fn writable(strategies: &[Strategy], family: TagFamily) -> impl Iterator<Item = &Strategy> {
	applicable(strategies, family).filter(|strategy| !strategy.is_read_only())
}

/// The first non-empty raw value among the applicable strategies.
fn first_raw(strategies: &[Strategy], tag: &TagSet) -> Option<RawValue> {
	for strategy in applicable(strategies, tag.family()) {
		if let Some(raw) = strategy.get(tag) {
			if !raw.is_empty() {
				return Some(raw);
			}
		}
	}

	None
}

fn coerce(value_type: ScalarType, raw: &RawValue) -> Value {
	match value_type {
		ScalarType::Text => Value::Text(cast_text(raw)),
		ScalarType::Integer => Value::Int(cast_int(raw)),
		ScalarType::Float => Value::Float(cast_float(raw)),
		ScalarType::Boolean => Value::Bool(cast_bool(raw)),
	}
}

fn coerce_raw(value_type: ScalarType, raw: &RawValue) -> RawValue {
	match value_type {
		ScalarType::Text => RawValue::Text(cast_text(raw)),
		ScalarType::Integer => RawValue::Int(cast_int(raw)),
		ScalarType::Float => RawValue::Float(cast_float(raw)),
		ScalarType::Boolean => RawValue::Bool(cast_bool(raw)),
	}
}

fn zero_raw(value_type: ScalarType) -> RawValue {
	match value_type {
		ScalarType::Text => RawValue::Text(String::new()),
		ScalarType::Integer => RawValue::Int(0),
		ScalarType::Float => RawValue::Float(0.0),
		ScalarType::Boolean => RawValue::Bool(false),
	}
}

fn raw_from_value(value: &Value) -> RawValue {
	match value {
		Value::Text(text) => RawValue::Text(text.clone()),
		Value::Int(int) => RawValue::Int(*int),
		Value::Float(float) => RawValue::Float(*float),
		Value::Bool(flag) => RawValue::Bool(*flag),
		Value::Date(date) => RawValue::Text(date.to_string()),
		Value::List(list) => RawValue::Text(list.first().cloned().unwrap_or_default()),
		Value::Binary(data) => RawValue::Bytes(data.clone()),
		_ => RawValue::Text(String::new()),
	}
}

fn raw_list_from_value(value: &Value) -> Vec<RawValue> {
	match value {
		Value::List(list) => list
			.iter()
			.map(|item| RawValue::Text(item.clone()))
			.collect(),
		other => vec![raw_from_value(other)],
	}
}

/// The strategies of a list field, resolved by name.
fn resolve_list_strategies(parent: &str) -> Option<Vec<Strategy>> {
	match registry::resolve(parent)?.kind {
		FieldKind::List { strategies } => Some(strategies),
		_ => None,
	}
}

fn resolve_date_strategies(parent: &str) -> Option<(Vec<Strategy>, Vec<Strategy>)> {
	match registry::resolve(parent)?.kind {
		FieldKind::Date {
			strategies,
			year_strategies,
		} => Some((strategies, year_strategies)),
		_ => None,
	}
}

/// The three date components, parsed from the primary slot with the
/// year backfilled from the legacy year-only slot when missing.
fn date_tuple(
	strategies: &[Strategy],
	year_strategies: &[Strategy],
	tag: &TagSet,
) -> DateValue {
	let mut date = match first_raw(strategies, tag) {
		Some(raw) => DateValue::parse(&cast_text(&raw)),
		None => DateValue::default(),
	};

	if date.year.is_none() {
		if let Some(raw) = first_raw(year_strategies, tag) {
			date.year = Some(cast_int(&raw) as i32);
		}
	}

	date
}

/// Serializes a date through the primary strategies and its year
/// through the legacy ones. A missing year deletes both.
fn set_date(
	strategies: &[Strategy],
	year_strategies: &[Strategy],
	tag: &mut TagSet,
	date: Option<DateValue>,
) {
	let Some(date) = date.filter(|date| date.year.is_some()) else {
		delete_date(strategies, year_strategies, tag);
		return;
	};

	let raw = RawValue::Text(date.to_string());
	for strategy in writable(strategies, tag.family()) {
		strategy.set(tag, &raw);
	}

	if let Some(year) = date.year {
		let raw = RawValue::Text(format!("{year:04}"));
		for strategy in writable(year_strategies, tag.family()) {
			strategy.set(tag, &raw);
		}
	}
}

fn delete_date(strategies: &[Strategy], year_strategies: &[Strategy], tag: &mut TagSet) {
	for strategy in applicable(strategies, tag.family()) {
		strategy.delete(tag);
	}
	for strategy in applicable(year_strategies, tag.family()) {
		strategy.delete(tag);
	}
}

/// Picks the image most likely to be the cover: a lone image, else the
/// first front cover, else the first image.
fn guess_cover_image(candidates: &[Image]) -> Option<&Image> {
	if candidates.len() == 1 {
		return candidates.first();
	}

	candidates
		.iter()
		.find(|image| image.image_type() == Some(ImageType::FrontCover))
		.or_else(|| candidates.first())
}

#[cfg(test)]
mod tests {
	use super::{FieldSpec, registry};
	use crate::date::DateValue;
	use crate::kind::{FileKind, TagFamily};
	use crate::picture::{Image, ImageType};
	use crate::strategy::{ImageStrategy, Strategy};
	use crate::tags::TagSet;
	use crate::value::Value;

	fn title_spec() -> FieldSpec {
		registry::resolve("title").unwrap()
	}

	#[test_log::test]
	fn scalar_read_priority() {
		let spec = FieldSpec::text(
			"label",
			vec![
				Strategy::comment("LABEL"),
				Strategy::comment("PUBLISHER"),
			],
		);

		let mut tag = TagSet::new(TagFamily::VorbisComments);
		tag.vorbis_mut()
			.unwrap()
			.set_all("PUBLISHER", vec![String::from("Fallback Records")]);

		assert_eq!(
			spec.get(FileKind::Flac, &tag),
			Some(Value::Text(String::from("Fallback Records")))
		);

		// The higher-priority key wins once present
		tag.vorbis_mut()
			.unwrap()
			.set_all("LABEL", vec![String::from("Primary Records")]);
		assert_eq!(
			spec.get(FileKind::Flac, &tag),
			Some(Value::Text(String::from("Primary Records")))
		);
	}

	#[test_log::test]
	fn scalar_write_through_skips_read_only() {
		let spec = FieldSpec::text(
			"barcode",
			vec![
				Strategy::comment("BARCODE"),
				Strategy::comment("UPC").read_only(),
			],
		);

		let mut tag = TagSet::new(TagFamily::VorbisComments);
		spec.set(FileKind::Flac, &mut tag, Some(&Value::from("0724596")))
			.unwrap();

		let vorbis = tag.vorbis().unwrap();
		assert_eq!(vorbis.first("BARCODE"), Some("0724596"));
		assert!(!vorbis.contains("UPC"));
	}

	#[test_log::test]
	fn set_none_writes_zero_value() {
		let spec = registry::resolve("track").unwrap();
		let mut tag = TagSet::new(TagFamily::VorbisComments);

		spec.set(FileKind::Flac, &mut tag, Some(&Value::Int(7)))
			.unwrap();
		assert_eq!(spec.get(FileKind::Flac, &tag), Some(Value::Int(7)));

		spec.set(FileKind::Flac, &mut tag, None).unwrap();
		assert_eq!(spec.get(FileKind::Flac, &tag), Some(Value::Int(0)));

		spec.delete(FileKind::Flac, &mut tag);
		assert_eq!(spec.get(FileKind::Flac, &tag), None);
	}

	#[test_log::test]
	fn list_round_trip_preserves_order() {
		let spec = registry::resolve("genres").unwrap();
		let mut tag = TagSet::new(TagFamily::Id3);

		let genres = vec![
			String::from("Dub"),
			String::from("Ska"),
			String::from("Reggae"),
		];
		spec.set(FileKind::Mp3, &mut tag, Some(&Value::List(genres.clone())))
			.unwrap();

		assert_eq!(spec.get(FileKind::Mp3, &tag), Some(Value::List(genres)));
	}

	#[test_log::test]
	fn single_view_reads_first_element() {
		let genres = registry::resolve("genres").unwrap();
		let genre = registry::resolve("genre").unwrap();
		let mut tag = TagSet::new(TagFamily::VorbisComments);

		genres
			.set(
				FileKind::Flac,
				&mut tag,
				Some(&Value::List(vec![
					String::from("Ska"),
					String::from("Dub"),
				])),
			)
			.unwrap();
		assert_eq!(
			genre.get(FileKind::Flac, &tag),
			Some(Value::Text(String::from("Ska")))
		);

		// Writing the single view replaces the whole list
		genre
			.set(FileKind::Flac, &mut tag, Some(&Value::from("Rocksteady")))
			.unwrap();
		assert_eq!(
			genres.get(FileKind::Flac, &tag),
			Some(Value::List(vec![String::from("Rocksteady")]))
		);
	}

	#[test_log::test]
	fn date_round_trip() {
		let spec = registry::resolve("date").unwrap();
		let mut tag = TagSet::new(TagFamily::Id3);

		let date = DateValue::from_components(Some(2020), Some(5), Some(1));
		spec.set(FileKind::Mp3, &mut tag, Some(&Value::Date(date)))
			.unwrap();

		assert_eq!(tag.id3().unwrap().text("TDRC"), Some("2020-05-01"));
		assert_eq!(spec.get(FileKind::Mp3, &tag), Some(Value::Date(date)));
	}

	#[test_log::test]
	fn date_year_only_leaves_month_and_day_unset() {
		let date = registry::resolve("date").unwrap();
		let month = registry::resolve("month").unwrap();
		let day = registry::resolve("day").unwrap();
		let year = registry::resolve("year").unwrap();
		let mut tag = TagSet::new(TagFamily::VorbisComments);

		let value = DateValue::from_components(Some(2020), None, None);
		date.set(FileKind::Flac, &mut tag, Some(&Value::Date(value)))
			.unwrap();

		assert_eq!(year.get(FileKind::Flac, &tag), Some(Value::Int(2020)));
		assert_eq!(month.get(FileKind::Flac, &tag), None);
		assert_eq!(day.get(FileKind::Flac, &tag), None);
	}

	#[test_log::test]
	fn date_components_read_and_write() {
		let date = registry::resolve("date").unwrap();
		let month = registry::resolve("month").unwrap();
		let year = registry::resolve("year").unwrap();
		let mut tag = TagSet::new(TagFamily::Id3);

		let value = DateValue::from_components(Some(2020), Some(5), Some(1));
		date.set(FileKind::Mp3, &mut tag, Some(&Value::Date(value)))
			.unwrap();

		month
			.set(FileKind::Mp3, &mut tag, Some(&Value::Int(11)))
			.unwrap();
		assert_eq!(tag.id3().unwrap().text("TDRC"), Some("2020-11-01"));

		// No year, no date
		year.set(FileKind::Mp3, &mut tag, None).unwrap();
		assert_eq!(date.get(FileKind::Mp3, &tag), None);
		assert_eq!(tag.id3().unwrap().text("TDRC"), None);
	}

	#[test_log::test]
	fn date_year_backfilled_from_legacy_comment() {
		let date = registry::resolve("date").unwrap();
		let mut tag = TagSet::new(TagFamily::VorbisComments);

		let vorbis = tag.vorbis_mut().unwrap();
		vorbis.set_all("DATE", vec![String::from("xxxx-06")]);
		vorbis.set_all("YEAR", vec![String::from("1994")]);

		assert_eq!(
			date.get(FileKind::Flac, &tag),
			Some(Value::Date(DateValue::from_components(
				Some(1994),
				Some(6),
				None
			)))
		);
	}

	#[test_log::test]
	fn q_number_precision() {
		let spec = registry::resolve("r128_track_gain").unwrap();
		let mut tag = TagSet::new(TagFamily::VorbisComments);

		spec.set(FileKind::Opus, &mut tag, Some(&Value::Float(-3.1)))
			.unwrap();

		let Some(Value::Float(read)) = spec.get(FileKind::Opus, &tag) else {
			panic!("expected a float");
		};
		assert!((read - -3.1).abs() <= 1.0 / 256.0);
	}

	#[test_log::test]
	fn cover_art_prefers_the_front_cover() {
		let art = registry::resolve("art").unwrap();
		let mut tag = TagSet::new(TagFamily::Id3);

		let mut media = Image::from_data(b"media-image".to_vec());
		media.set_image_type(Some(ImageType::Media));
		let mut front = Image::from_data(b"front-image".to_vec());
		front.set_image_type(Some(ImageType::FrontCover));
		let mut back = Image::from_data(b"back-image".to_vec());
		back.set_image_type(Some(ImageType::BackCover));

		ImageStrategy::Apic
			.set(&mut tag, &[media, back, front])
			.unwrap();

		assert_eq!(
			art.get(FileKind::Mp3, &tag),
			Some(Value::Binary(b"front-image".to_vec()))
		);
	}

	#[test_log::test]
	fn cover_art_write_replaces_the_list() {
		let art = registry::resolve("art").unwrap();
		let images = registry::resolve("images").unwrap();
		let mut tag = TagSet::new(TagFamily::Id3);

		art.set(
			FileKind::Mp3,
			&mut tag,
			Some(&Value::Binary(b"new-cover".to_vec())),
		)
		.unwrap();

		let Some(Value::Images(list)) = images.get(FileKind::Mp3, &tag) else {
			panic!("expected images");
		};
		assert_eq!(list.len(), 1);
		assert_eq!(list[0].image_type(), None);
		assert_eq!(list[0].description(), None);
	}

	#[test_log::test]
	fn every_family_round_trips_the_title() {
		let spec = title_spec();
		let cases = [
			(FileKind::Mp3, TagFamily::Id3),
			(FileKind::Aac, TagFamily::Ilst),
			(FileKind::Asf, TagFamily::Asf),
			(FileKind::Flac, TagFamily::VorbisComments),
			(FileKind::WavPack, TagFamily::Ape),
		];

		for (kind, family) in cases {
			let mut tag = TagSet::new(family);
			spec.set(kind, &mut tag, Some(&Value::from("Test α")))
				.unwrap();
			assert_eq!(
				spec.get(kind, &tag),
				Some(Value::Text(String::from("Test α"))),
				"{kind:?}"
			);

			spec.delete(kind, &mut tag);
			assert_eq!(spec.get(kind, &tag), None, "{kind:?}");
		}
	}
}
