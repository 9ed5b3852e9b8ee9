//! The iTunes SoundCheck loudness codec and Q-number fixed point
//!
//! SoundCheck values are ten 32-bit integers rendered as space-prefixed
//! 8-digit uppercase hex fields. The first pair carries the measured RMS
//! magnitude against a reference of 1000 (gain), the second pair the
//! same against 2500, and the fourth pair the raw sample peak against a
//! 16-bit full scale of 32768.

/// Decodes a SoundCheck string into a `(gain, peak)` pair
///
/// `gain` is in dB, rounded to 2 decimal places; `peak` is a fraction of
/// full scale, rounded to 6 places. Malformed input decodes to
/// `(0.0, 0.0)` rather than failing the read.
///
/// # Examples
///
/// ```rust
/// use unitag::soundcheck;
///
/// let (gain, peak) = soundcheck::decode(
/// 	" 000003E8 000003E8 000009C4 000009C4 00000000 00000000 00008000 00008000 00000000 00000000",
/// );
/// assert_eq!(gain, 0.0);
/// assert_eq!(peak, 1.0);
/// ```
pub fn decode(soundcheck: &str) -> (f64, f64) {
	let Some(values) = parse_fields(soundcheck) else {
		log::warn!("Undecodable SoundCheck value, reading as silence");
		return (0.0, 0.0);
	};

	// The unit of the stored magnitude is unknown; what matters is its
	// ratio against the 1000-unit reference. The larger of the two
	// channel values gives the most attenuation.
	let max_gain = values[0].max(values[1]);
	let gain = if max_gain > 0 {
		-10.0 * (f64::from(max_gain) / 1000.0).log10()
	} else {
		0.0
	};

	let peak = f64::from(values[6].max(values[7])) / 32768.0;

	(round_to(gain, 2), round_to(peak, 6))
}

/// Encodes a `(gain, peak)` pair as a SoundCheck string
///
/// The inverse of [`decode`]: the reference-scaled magnitudes are
/// clamped to `[1, 65534]`, which bounds the representable gain to
/// roughly -18.2..=30.0 dB. The unused fields are written as zero.
pub fn encode(gain: f64, peak: f64) -> String {
	let peak = peak * 32768.0;

	let g1 = scale_gain(gain, 1000.0);
	let g2 = scale_gain(gain, 2500.0);
	let p = peak.round() as i32;

	let values = [g1, g1, g2, g2, 0, 0, p, p, 0, 0];

	let mut out = String::with_capacity(90);
	for value in values {
		out.push_str(&format!(" {:08X}", value));
	}

	out
}

fn scale_gain(gain: f64, reference: f64) -> i32 {
	let scaled = (10f64.powf(gain / -10.0) * reference).round();
	(scaled.min(65534.0) as i32).max(1)
}

fn round_to(value: f64, places: u32) -> f64 {
	let factor = 10f64.powi(places as i32);
	(value * factor).round() / factor
}

/// Parses ten 8-digit hex fields, whitespace stripped.
fn parse_fields(soundcheck: &str) -> Option<[i32; 10]> {
	let stripped: String = soundcheck.split_ascii_whitespace().collect();
	if stripped.len() != 80 {
		return None;
	}

	let mut values = [0i32; 10];
	for (i, value) in values.iter_mut().enumerate() {
		*value = u32::from_str_radix(&stripped[i * 8..(i + 1) * 8], 16).ok()? as i32;
	}

	Some(values)
}

/// Converts a stored Q-number integer to a float, given the fractional
/// bit count
///
/// # Examples
///
/// ```rust
/// use unitag::soundcheck::q_to_float;
///
/// assert_eq!(q_to_float(-1408, 8), -5.5);
/// ```
pub fn q_to_float(stored: i64, fraction_bits: u8) -> f64 {
	stored as f64 / f64::from(1u32 << fraction_bits)
}

/// Converts a float to its stored Q-number integer
///
/// # Examples
///
/// ```rust
/// use unitag::soundcheck::float_to_q;
///
/// assert_eq!(float_to_q(-5.5, 8), -1408);
/// ```
pub fn float_to_q(value: f64, fraction_bits: u8) -> i64 {
	(value * f64::from(1u32 << fraction_bits)).round() as i64
}

#[cfg(test)]
mod tests {
	use super::{decode, encode, float_to_q, q_to_float};

	#[test_log::test]
	fn round_trip() {
		// Peaks sit on the 1/32768 storage grid, the codec cannot do
		// better than that resolution.
		let cases: [(f64, f64); 6] = [
			(0.0, 0.0),
			(0.0, 1.0),
			(2.35, 0.5),
			(-6.0, 0.75),
			(-18.0, 1.0),
			(30.0, 0.25),
		];

		for (gain, peak) in cases {
			let (decoded_gain, decoded_peak) = decode(&encode(gain, peak));
			assert!(
				(decoded_gain - gain).abs() <= 0.01,
				"gain {gain} decoded as {decoded_gain}"
			);
			assert!(
				(decoded_peak - peak).abs() <= 1e-6,
				"peak {peak} decoded as {decoded_peak}"
			);
		}
	}

	#[test_log::test]
	fn encode_layout() {
		let encoded = encode(0.0, 1.0);
		assert_eq!(encoded.len(), 90);
		assert_eq!(
			encoded,
			" 000003E8 000003E8 000009C4 000009C4 00000000 00000000 00008000 00008000 00000000 \
			 00000000"
		);
	}

	#[test_log::test]
	fn decode_garbage() {
		assert_eq!(decode(""), (0.0, 0.0));
		assert_eq!(decode("not hex at all"), (0.0, 0.0));
		assert_eq!(decode(" 0000"), (0.0, 0.0));
		// Ten fields of the wrong width
		assert_eq!(decode(&" 0000".repeat(10)), (0.0, 0.0));
	}

	#[test_log::test]
	fn decode_zero_gain_field() {
		// A zero magnitude is invalid and reads as 0 dB
		let encoded = format!(" 00000000 00000000{}", " 00000000".repeat(8));
		assert_eq!(decode(&encoded), (0.0, 0.0));
	}

	#[test_log::test]
	fn q_number() {
		assert_eq!(float_to_q(0.0, 8), 0);
		assert_eq!(q_to_float(float_to_q(1.5, 1), 1), 1.5);

		for bits in [1u8, 4, 8] {
			let step = 1.0 / f64::from(1u32 << bits);
			for value in [-7.32, 0.1, 3.999] {
				let read = q_to_float(float_to_q(value, bits), bits);
				assert!((read - value).abs() <= step, "{value} at {bits} bits");
			}
		}
	}
}
