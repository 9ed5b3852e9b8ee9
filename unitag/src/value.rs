//! Canonical field values and lossy coercion
//!
//! Every logical field reads and writes a [`Value`]. The per-family wire
//! representations are narrower (a text slot, an integer atom, a binary
//! attribute), so reads pass through the lossy-but-total coercion rules
//! in this module: a value of the wrong shape becomes the closest thing
//! of the declared type, never an error.

use crate::date::DateValue;
use crate::picture::Image;
use crate::util::text::utf8_decode_dropping;

/// A logical field value
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Value {
	/// A text value
	Text(String),
	/// An integer value
	Int(i64),
	/// A floating-point value
	Float(f64),
	/// A boolean value
	Bool(bool),
	/// A release date
	Date(DateValue),
	/// An ordered list of text values
	List(Vec<String>),
	/// A list of embedded images
	Images(Vec<Image>),
	/// Raw binary data
	Binary(Vec<u8>),
}

impl Value {
	/// Returns the text value, if this is [`Value::Text`]
	pub fn text(&self) -> Option<&str> {
		match self {
			Value::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Returns the integer value, if this is [`Value::Int`]
	pub fn int(&self) -> Option<i64> {
		match self {
			Value::Int(int) => Some(*int),
			_ => None,
		}
	}

	/// Returns the float value, if this is [`Value::Float`]
	pub fn float(&self) -> Option<f64> {
		match self {
			Value::Float(float) => Some(*float),
			_ => None,
		}
	}

	/// Returns the boolean value, if this is [`Value::Bool`]
	pub fn bool(&self) -> Option<bool> {
		match self {
			Value::Bool(bool) => Some(*bool),
			_ => None,
		}
	}

	/// Returns the date value, if this is [`Value::Date`]
	pub fn date(&self) -> Option<DateValue> {
		match self {
			Value::Date(date) => Some(*date),
			_ => None,
		}
	}

	/// Returns the list value, if this is [`Value::List`]
	pub fn list(&self) -> Option<&[String]> {
		match self {
			Value::List(list) => Some(list),
			_ => None,
		}
	}

	/// Returns the image list, if this is [`Value::Images`]
	pub fn images(&self) -> Option<&[Image]> {
		match self {
			Value::Images(images) => Some(images),
			_ => None,
		}
	}

	/// Returns the binary data, if this is [`Value::Binary`]
	pub fn binary(&self) -> Option<&[u8]> {
		match self {
			Value::Binary(data) => Some(data),
			_ => None,
		}
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::Text(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Text(value.to_owned())
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Int(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<DateValue> for Value {
	fn from(value: DateValue) -> Self {
		Value::Date(value)
	}
}

impl From<Vec<String>> for Value {
	fn from(value: Vec<String>) -> Self {
		Value::List(value)
	}
}

impl From<Vec<Image>> for Value {
	fn from(value: Vec<Image>) -> Self {
		Value::Images(value)
	}
}

/// A raw value as one tag slot carries it on the wire
///
/// This is the currency between the strategy layer and the tag models:
/// strategies fetch and store `RawValue`s, and the field layer coerces
/// them to the field's declared type.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawValue {
	Text(String),
	Int(i64),
	Float(f64),
	Bool(bool),
	Bytes(Vec<u8>),
}

impl RawValue {
	/// Whether a read of this value should count as "no value" for
	/// field fallback purposes (empty text never satisfies a read).
	pub(crate) fn is_empty(&self) -> bool {
		match self {
			RawValue::Text(text) => text.is_empty(),
			RawValue::Bytes(bytes) => bytes.is_empty(),
			_ => false,
		}
	}
}

/// The leading optionally-signed digit run of a string, if any.
fn leading_int(text: &str) -> Option<i64> {
	let trimmed = text.trim();
	let rest = trimmed
		.strip_prefix(['+', '-'])
		.map_or(trimmed, |rest| rest);

	let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
	if digits == 0 {
		return None;
	}

	let end = trimmed.len() - (rest.len() - digits);
	trimmed[..end].parse::<i64>().ok()
}

/// The leading optionally-signed decimal run of a string, if any.
///
/// Accepts `12`, `12.`, `12.5`, and `.5` forms.
fn leading_float(text: &str) -> Option<f64> {
	let trimmed = text.trim();
	let rest = trimmed
		.strip_prefix(['+', '-'])
		.map_or(trimmed, |rest| rest);

	let int_digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
	let mut end = int_digits;

	let mut frac_digits = 0;
	if rest[end..].starts_with('.') {
		end += 1;
		let frac = &rest[end..];
		frac_digits = frac.len() - frac.trim_start_matches(|c: char| c.is_ascii_digit()).len();
		end += frac_digits;
	}

	if int_digits == 0 && frac_digits == 0 {
		return None;
	}

	let end = trimmed.len() - (rest.len() - end);
	trimmed[..end].parse::<f64>().ok()
}

/// Coerces a raw value to an integer, per the lossy cast rules.
pub(crate) fn cast_int(raw: &RawValue) -> i64 {
	match raw {
		RawValue::Int(int) => *int,
		RawValue::Float(float) => *float as i64,
		RawValue::Bool(bool) => i64::from(*bool),
		RawValue::Text(text) => leading_int(text).unwrap_or(0),
		RawValue::Bytes(bytes) => leading_int(&utf8_decode_dropping(bytes)).unwrap_or(0),
	}
}

/// Coerces a raw value to a float.
pub(crate) fn cast_float(raw: &RawValue) -> f64 {
	match raw {
		RawValue::Int(int) => *int as f64,
		RawValue::Float(float) => *float,
		RawValue::Bool(bool) => f64::from(*bool),
		RawValue::Text(text) => leading_float(text).unwrap_or(0.0),
		RawValue::Bytes(bytes) => leading_float(&utf8_decode_dropping(bytes)).unwrap_or(0.0),
	}
}

/// Coerces a raw value to a boolean.
///
/// Text must be an integer literal; anything else reads as `false`.
pub(crate) fn cast_bool(raw: &RawValue) -> bool {
	match raw {
		RawValue::Bool(bool) => *bool,
		RawValue::Int(int) => *int != 0,
		RawValue::Float(float) => (*float as i64) != 0,
		RawValue::Text(text) => text.trim().parse::<i64>().is_ok_and(|int| int != 0),
		RawValue::Bytes(bytes) => utf8_decode_dropping(bytes)
			.trim()
			.parse::<i64>()
			.is_ok_and(|int| int != 0),
	}
}

/// Coerces a raw value to text. Invalid UTF-8 sequences are dropped.
pub(crate) fn cast_text(raw: &RawValue) -> String {
	match raw {
		RawValue::Text(text) => text.clone(),
		RawValue::Int(int) => int.to_string(),
		RawValue::Float(float) => float.to_string(),
		RawValue::Bool(bool) => if *bool { "1" } else { "0" }.to_owned(),
		RawValue::Bytes(bytes) => utf8_decode_dropping(bytes),
	}
}
