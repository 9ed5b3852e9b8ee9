/// Encodes text as UTF-16LE, appending the double-null terminator.
pub(crate) fn utf16le_encode_terminated(text: &str) -> Vec<u8> {
	let mut out = Vec::with_capacity((text.len() + 1) * 2);
	for unit in text.encode_utf16() {
		out.extend_from_slice(&unit.to_le_bytes());
	}

	out.extend_from_slice(&[0, 0]);
	out
}

/// Decodes a double-null terminated UTF-16LE string.
///
/// Returns the decoded text and the number of bytes consumed, terminator
/// included. `None` when the terminator is missing or the code units do not
/// form valid UTF-16.
pub(crate) fn utf16le_decode_terminated(bytes: &[u8]) -> Option<(String, usize)> {
	let mut units = Vec::new();
	let mut consumed = 0usize;

	for chunk in bytes.chunks_exact(2) {
		consumed += 2;

		let unit = u16::from_le_bytes([chunk[0], chunk[1]]);
		if unit == 0 {
			let text = String::from_utf16(&units).ok()?;
			return Some((text, consumed));
		}

		units.push(unit);
	}

	None
}

/// Decodes UTF-8, dropping any invalid sequences entirely.
pub(crate) fn utf8_decode_dropping(bytes: &[u8]) -> String {
	bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

#[cfg(test)]
mod tests {
	use super::{utf16le_decode_terminated, utf16le_encode_terminated, utf8_decode_dropping};

	#[test_log::test]
	fn utf16le_round_trip() {
		let encoded = utf16le_encode_terminated("image/png");
		assert_eq!(encoded.len(), "image/png".len() * 2 + 2);

		let (decoded, consumed) = utf16le_decode_terminated(&encoded).unwrap();
		assert_eq!(decoded, "image/png");
		assert_eq!(consumed, encoded.len());
	}

	#[test_log::test]
	fn utf16le_missing_terminator() {
		let mut encoded = utf16le_encode_terminated("front cover");
		encoded.truncate(encoded.len() - 2);

		assert!(utf16le_decode_terminated(&encoded).is_none());
	}

	#[test_log::test]
	fn utf8_dropping() {
		assert_eq!(utf8_decode_dropping(b"plain"), "plain");
		assert_eq!(utf8_decode_dropping(b"bro\xFFken"), "broken");
	}
}
