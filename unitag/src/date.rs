//! Release-date values with independently optional components

use std::fmt::Display;

/// A date with independently optional year, month, and day
///
/// Containers store release dates as strings of varying precision
/// (`"2004"`, `"2004-06"`, `"2004-06-03"`, sometimes with a trailing
/// time-of-day). Each component is tracked separately so that a partial
/// date round-trips without inventing the missing parts.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
#[allow(missing_docs)]
pub struct DateValue {
	pub year: Option<i32>,
	pub month: Option<u8>,
	pub day: Option<u8>,
}

impl DateValue {
	/// Create a `DateValue` from its components
	///
	/// # Examples
	///
	/// ```rust
	/// use unitag::date::DateValue;
	///
	/// let date = DateValue::from_components(Some(2004), Some(6), None);
	/// assert_eq!(date.to_string(), "2004-06");
	/// ```
	#[must_use]
	pub const fn from_components(year: Option<i32>, month: Option<u8>, day: Option<u8>) -> Self {
		Self { year, month, day }
	}

	/// Whether no component is set
	pub fn is_empty(&self) -> bool {
		self.year.is_none() && self.month.is_none() && self.day.is_none()
	}

	/// Leniently parses a date string into its components
	///
	/// Anything from the first `T`, `t`, or space onwards is dropped, the
	/// rest splits on `-` and `/`, and each of the first three pieces
	/// becomes a component when it parses as an integer.
	///
	/// # Examples
	///
	/// ```rust
	/// use unitag::date::DateValue;
	///
	/// let date = DateValue::parse("2004-06-03T14:08:49");
	/// assert_eq!(date.year, Some(2004));
	/// assert_eq!(date.month, Some(6));
	/// assert_eq!(date.day, Some(3));
	/// ```
	pub fn parse(datestring: &str) -> Self {
		let end = datestring
			.find(['T', 't', ' '])
			.unwrap_or(datestring.len());
		let mut pieces = datestring[..end].split(['-', '/']);

		let year = pieces.next().and_then(|p| p.parse::<i32>().ok());
		let month = pieces.next().and_then(|p| p.parse::<u8>().ok());
		let day = pieces.next().and_then(|p| p.parse::<u8>().ok());

		Self { year, month, day }
	}

	/// Returns `(year, month, day)` when a valid calendar date is derivable
	///
	/// A date needs at least a year; a missing month or day defaults to 1.
	/// Out-of-range components yield `None`.
	///
	/// # Examples
	///
	/// ```rust
	/// use unitag::date::DateValue;
	///
	/// let date = DateValue::from_components(Some(2004), None, None);
	/// assert_eq!(date.calendar(), Some((2004, 1, 1)));
	///
	/// let bad = DateValue::from_components(Some(2004), Some(13), None);
	/// assert_eq!(bad.calendar(), None);
	/// ```
	pub fn calendar(&self) -> Option<(i32, u8, u8)> {
		let year = self.year?;
		if !(1..=9999).contains(&year) {
			return None;
		}

		let month = self.month.unwrap_or(1);
		let day = self.day.unwrap_or(1);
		if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
			return None;
		}

		Some((year, month, day))
	}
}

impl Display for DateValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let Some(year) = self.year else {
			return Ok(());
		};

		write!(f, "{:04}", year)?;

		// A day without a month is not representable and stays unwritten.
		if let Some(month) = self.month.filter(|m| *m != 0) {
			write!(f, "-{:02}", month)?;

			if let Some(day) = self.day.filter(|d| *d != 0) {
				write!(f, "-{:02}", day)?;
			}
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::DateValue;

	fn date(year: Option<i32>, month: Option<u8>, day: Option<u8>) -> DateValue {
		DateValue::from_components(year, month, day)
	}

	#[test_log::test]
	fn parse_variants() {
		let cases: [(&str, DateValue); 8] = [
			("2004-06-03", date(Some(2004), Some(6), Some(3))),
			("2004/6/3", date(Some(2004), Some(6), Some(3))),
			("2004-06", date(Some(2004), Some(6), None)),
			("2004", date(Some(2004), None, None)),
			("2004-06-03T14:08:49", date(Some(2004), Some(6), Some(3))),
			("2004-06-03 14:08", date(Some(2004), Some(6), Some(3))),
			("", date(None, None, None)),
			("199x-06", date(None, Some(6), None)),
		];

		for (input, expected) in cases {
			assert_eq!(DateValue::parse(input), expected, "{input:?}");
		}
	}

	#[test_log::test]
	fn parse_truncates_extra_components() {
		let parsed = DateValue::parse("2004-06-03-99");
		assert_eq!(parsed, date(Some(2004), Some(6), Some(3)));
	}

	#[test_log::test]
	fn display() {
		assert_eq!(date(Some(2004), Some(6), Some(3)).to_string(), "2004-06-03");
		assert_eq!(date(Some(2004), Some(6), None).to_string(), "2004-06");
		assert_eq!(date(Some(2004), None, None).to_string(), "2004");
		assert_eq!(date(Some(44), None, None).to_string(), "0044");
		// A day with no month cannot be written.
		assert_eq!(date(Some(2004), None, Some(3)).to_string(), "2004");
		assert_eq!(date(None, Some(6), Some(3)).to_string(), "");
	}

	#[test_log::test]
	fn calendar_defaults_and_limits() {
		assert_eq!(
			date(Some(2004), None, None).calendar(),
			Some((2004, 1, 1))
		);
		assert_eq!(
			date(Some(2004), Some(6), Some(3)).calendar(),
			Some((2004, 6, 3))
		);
		assert_eq!(date(None, Some(6), Some(3)).calendar(), None);
		assert_eq!(date(Some(0), None, None).calendar(), None);
		assert_eq!(date(Some(2004), Some(13), None).calendar(), None);
		assert_eq!(date(Some(2004), Some(6), Some(32)).calendar(), None);
	}
}
