//! Audio properties reported by the codec layer

use std::fmt::{Display, Formatter};
use std::time::Duration;

/// The bitrate mode of an encoded stream
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum BitrateMode {
	/// Constant bitrate
	Cbr,
	/// Variable bitrate
	Vbr,
	/// Average bitrate
	Abr,
}

impl Display for BitrateMode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			BitrateMode::Cbr => f.write_str("CBR"),
			BitrateMode::Vbr => f.write_str("VBR"),
			BitrateMode::Abr => f.write_str("ABR"),
		}
	}
}

/// Various *immutable* audio properties
///
/// Every field is optional; formats report what they know and
/// [`MediaFile`](crate::MediaFile) falls back to a type-appropriate zero
/// for the rest.
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct AudioInfo {
	pub(crate) duration: Option<Duration>,
	pub(crate) sample_rate: Option<u32>,
	pub(crate) bit_depth: Option<u8>,
	pub(crate) channels: Option<u8>,
	pub(crate) bitrate: Option<u32>,
	pub(crate) bitrate_mode: Option<BitrateMode>,
	pub(crate) encoder_info: Option<String>,
	pub(crate) encoder_settings: Option<String>,
}

impl Default for AudioInfo {
	fn default() -> Self {
		Self::new()
	}
}

impl AudioInfo {
	/// Create a new, empty `AudioInfo`
	#[must_use]
	pub const fn new() -> Self {
		Self {
			duration: None,
			sample_rate: None,
			bit_depth: None,
			channels: None,
			bitrate: None,
			bitrate_mode: None,
			encoder_info: None,
			encoder_settings: None,
		}
	}

	/// Duration of the audio
	pub fn duration(&self) -> Option<Duration> {
		self.duration
	}

	/// Sets the duration
	pub fn set_duration(&mut self, duration: Duration) {
		self.duration = Some(duration);
	}

	/// Sample rate (Hz)
	pub fn sample_rate(&self) -> Option<u32> {
		self.sample_rate
	}

	/// Sets the sample rate
	pub fn set_sample_rate(&mut self, sample_rate: u32) {
		self.sample_rate = Some(sample_rate);
	}

	/// Bits per sample (usually 16 or 24 bit)
	pub fn bit_depth(&self) -> Option<u8> {
		self.bit_depth
	}

	/// Sets the bit depth
	pub fn set_bit_depth(&mut self, bit_depth: u8) {
		self.bit_depth = Some(bit_depth);
	}

	/// Channel count
	pub fn channels(&self) -> Option<u8> {
		self.channels
	}

	/// Sets the channel count
	pub fn set_channels(&mut self, channels: u8) {
		self.channels = Some(channels);
	}

	/// Bitrate, in bits per second
	pub fn bitrate(&self) -> Option<u32> {
		self.bitrate
	}

	/// Sets the bitrate
	pub fn set_bitrate(&mut self, bitrate: u32) {
		self.bitrate = Some(bitrate);
	}

	/// The [`BitrateMode`], where the format reports one
	pub fn bitrate_mode(&self) -> Option<BitrateMode> {
		self.bitrate_mode
	}

	/// Sets the bitrate mode
	pub fn set_bitrate_mode(&mut self, bitrate_mode: BitrateMode) {
		self.bitrate_mode = Some(bitrate_mode);
	}

	/// The name and/or version of the encoder (e.g. "LAME 3.97.0")
	pub fn encoder_info(&self) -> Option<&str> {
		self.encoder_info.as_deref()
	}

	/// Sets the encoder info
	pub fn set_encoder_info(&mut self, encoder_info: String) {
		self.encoder_info = Some(encoder_info);
	}

	/// A guess of the settings used for the encoder (e.g. "-V2")
	pub fn encoder_settings(&self) -> Option<&str> {
		self.encoder_settings.as_deref()
	}

	/// Sets the encoder settings
	pub fn set_encoder_settings(&mut self, encoder_settings: String) {
		self.encoder_settings = Some(encoder_settings);
	}
}
