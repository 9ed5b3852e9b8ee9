//! Container kinds and tag families

/// The tagging scheme a container kind stores its metadata in
///
/// Every [`FileKind`] maps to exactly one family, and every storage strategy
/// declares the families (or, for images, the concrete kinds) it can touch.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[non_exhaustive]
pub enum TagFamily {
	/// Frame-based tags (ID3v2)
	Id3,
	/// Atom-based tags (MP4 `ilst`)
	Ilst,
	/// Attribute-based tags (ASF/Windows Media)
	Asf,
	/// Free-form comment tags (Vorbis comments)
	VorbisComments,
	/// APEv2 item tags
	Ape,
}

/// The type of a supported container
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[non_exhaustive]
pub enum FileKind {
	/// AAC audio in an MP4 container
	Aac,
	/// Audio Interchange File Format
	Aiff,
	/// Apple Lossless in an MP4 container
	Alac,
	/// Monkey's Audio
	Ape,
	/// Advanced Systems Format (Windows Media)
	Asf,
	/// DSD Stream File
	Dsf,
	/// Free Lossless Audio Codec
	Flac,
	/// MPEG layer III
	Mp3,
	/// Musepack
	Mpc,
	/// FLAC audio in an OGG container
	OggFlac,
	/// Opus audio in an OGG container
	Opus,
	/// Speex audio in an OGG container
	Speex,
	/// Vorbis audio in an OGG container
	Vorbis,
	/// Waveform Audio File Format
	Wav,
	/// WavPack
	WavPack,
}

impl FileKind {
	/// Returns the [`TagFamily`] this kind stores its tags in
	///
	/// # Examples
	///
	/// ```rust
	/// use unitag::kind::{FileKind, TagFamily};
	///
	/// assert_eq!(FileKind::Mp3.family(), TagFamily::Id3);
	/// assert_eq!(FileKind::Flac.family(), TagFamily::VorbisComments);
	/// ```
	pub fn family(&self) -> TagFamily {
		match self {
			FileKind::Aiff | FileKind::Dsf | FileKind::Mp3 | FileKind::Wav => TagFamily::Id3,
			FileKind::Aac | FileKind::Alac => TagFamily::Ilst,
			FileKind::Asf => TagFamily::Asf,
			FileKind::Flac
			| FileKind::OggFlac
			| FileKind::Opus
			| FileKind::Speex
			| FileKind::Vorbis => TagFamily::VorbisComments,
			FileKind::Ape | FileKind::Mpc | FileKind::WavPack => TagFamily::Ape,
		}
	}

	/// Returns a human-readable name for the format
	///
	/// # Examples
	///
	/// ```rust
	/// use unitag::kind::FileKind;
	///
	/// assert_eq!(FileKind::Asf.format_name(), "Windows Media");
	/// ```
	pub fn format_name(&self) -> &'static str {
		match self {
			FileKind::Aac => "AAC",
			FileKind::Aiff => "AIFF",
			FileKind::Alac => "ALAC",
			FileKind::Ape => "APE",
			FileKind::Asf => "Windows Media",
			FileKind::Dsf => "DSD Stream File",
			FileKind::Flac => "FLAC",
			FileKind::Mp3 => "MP3",
			FileKind::Mpc => "Musepack",
			FileKind::OggFlac => "OGG FLAC",
			FileKind::Opus => "Opus",
			FileKind::Speex => "Speex",
			FileKind::Vorbis => "OGG",
			FileKind::Wav => "WAVE",
			FileKind::WavPack => "WavPack",
		}
	}

	/// Maps a container type reported by the codec layer to a `FileKind`
	///
	/// MP4 containers are split by codec: anything starting with `alac`
	/// reads as [`FileKind::Alac`], everything else as [`FileKind::Aac`].
	/// `None` means the reported type has no mapping and the file must be
	/// rejected as unsupported.
	pub(crate) fn from_reported(container: &str, codec: Option<&str>) -> Option<FileKind> {
		match container {
			"M4A" | "MP4" => match codec {
				Some(codec) if codec.starts_with("alac") => Some(FileKind::Alac),
				_ => Some(FileKind::Aac),
			},
			"ID3" | "MP3" => Some(FileKind::Mp3),
			"FLAC" => Some(FileKind::Flac),
			"OggOpus" => Some(FileKind::Opus),
			"OggVorbis" => Some(FileKind::Vorbis),
			"OggSpeex" => Some(FileKind::Speex),
			"OggFLAC" => Some(FileKind::OggFlac),
			"MonkeysAudio" => Some(FileKind::Ape),
			"WavPack" => Some(FileKind::WavPack),
			"Musepack" => Some(FileKind::Mpc),
			"ASF" => Some(FileKind::Asf),
			"AIFF" => Some(FileKind::Aiff),
			"DSF" => Some(FileKind::Dsf),
			"WAVE" => Some(FileKind::Wav),
			_ => None,
		}
	}

	/// The container token written back when persisting a file of this kind
	pub(crate) fn reported_name(&self) -> &'static str {
		match self {
			FileKind::Aac | FileKind::Alac => "MP4",
			FileKind::Aiff => "AIFF",
			FileKind::Ape => "MonkeysAudio",
			FileKind::Asf => "ASF",
			FileKind::Dsf => "DSF",
			FileKind::Flac => "FLAC",
			FileKind::Mp3 => "MP3",
			FileKind::Mpc => "Musepack",
			FileKind::OggFlac => "OggFLAC",
			FileKind::Opus => "OggOpus",
			FileKind::Speex => "OggSpeex",
			FileKind::Vorbis => "OggVorbis",
			FileKind::Wav => "WAVE",
			FileKind::WavPack => "WavPack",
		}
	}

	/// The codec token accompanying [`FileKind::reported_name`], where one
	/// is needed to round-trip the kind
	pub(crate) fn codec_token(&self) -> Option<&'static str> {
		match self {
			FileKind::Aac => Some("mp4a.40.2"),
			FileKind::Alac => Some("alac"),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::FileKind;

	#[test_log::test]
	fn reported_names_round_trip() {
		let kinds = [
			FileKind::Aac,
			FileKind::Aiff,
			FileKind::Alac,
			FileKind::Ape,
			FileKind::Asf,
			FileKind::Dsf,
			FileKind::Flac,
			FileKind::Mp3,
			FileKind::Mpc,
			FileKind::OggFlac,
			FileKind::Opus,
			FileKind::Speex,
			FileKind::Vorbis,
			FileKind::Wav,
			FileKind::WavPack,
		];

		for kind in kinds {
			let mapped = FileKind::from_reported(kind.reported_name(), kind.codec_token());
			assert_eq!(mapped, Some(kind));
		}
	}

	#[test_log::test]
	fn unmapped_container() {
		assert_eq!(FileKind::from_reported("TrueAudio", None), None);
	}

	#[test_log::test]
	fn mp4_codec_split() {
		assert_eq!(
			FileKind::from_reported("MP4", Some("alac")),
			Some(FileKind::Alac)
		);
		assert_eq!(
			FileKind::from_reported("M4A", Some("mp4a.40.2")),
			Some(FileKind::Aac)
		);
		assert_eq!(FileKind::from_reported("MP4", None), Some(FileKind::Aac));
	}
}
