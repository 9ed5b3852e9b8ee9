//! The main entry point, tying the field registry to one open container

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use paste::paste;

use crate::config::{ParseOptions, WriteOptions};
use crate::date::DateValue;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::fields::registry;
use crate::kind::{FileKind, TagFamily};
use crate::picture::Image;
use crate::value::Value;

/// The property names appended by [`MediaFile::readable_fields`]
const PROPERTY_NAMES: [&str; 9] = [
	"length",
	"samplerate",
	"bitdepth",
	"bitrate",
	"bitrate_mode",
	"channels",
	"encoder_info",
	"encoder_settings",
	"format",
];

// Generates the typed accessor triple (get / set / remove) for one
// standard field. The setter routes through the name-based `set`, so
// picture-backed fields keep their validation errors.
macro_rules! field_accessor {
	(@remove $name:ident) => {
		paste! {
			#[doc = concat!("Removes the `", stringify!($name), "` field")]
			pub fn [<remove_ $name>](&mut self) {
				self.remove(stringify!($name));
			}
		}
	};
	(text, $name:ident) => {
		paste! {
			#[doc = concat!("The `", stringify!($name), "` field")]
			pub fn $name(&self) -> Option<String> {
				match self.get(stringify!($name)) {
					Some(Value::Text(value)) => Some(value),
					_ => None,
				}
			}

			#[doc = concat!("Sets the `", stringify!($name), "` field")]
			///
			/// # Errors
			///
			/// * See [`MediaFile::set`]
			pub fn [<set_ $name>](&mut self, value: impl Into<String>) -> Result<()> {
				self.set(stringify!($name), Value::Text(value.into()))
			}
		}

		field_accessor!(@remove $name);
	};
	(int, $name:ident) => {
		paste! {
			#[doc = concat!("The `", stringify!($name), "` field")]
			pub fn $name(&self) -> Option<i64> {
				self.get(stringify!($name)).as_ref().and_then(Value::int)
			}

			#[doc = concat!("Sets the `", stringify!($name), "` field")]
			///
			/// # Errors
			///
			/// * See [`MediaFile::set`]
			pub fn [<set_ $name>](&mut self, value: i64) -> Result<()> {
				self.set(stringify!($name), Value::Int(value))
			}
		}

		field_accessor!(@remove $name);
	};
	(float, $name:ident) => {
		paste! {
			#[doc = concat!("The `", stringify!($name), "` field")]
			pub fn $name(&self) -> Option<f64> {
				self.get(stringify!($name)).as_ref().and_then(Value::float)
			}

			#[doc = concat!("Sets the `", stringify!($name), "` field")]
			///
			/// # Errors
			///
			/// * See [`MediaFile::set`]
			pub fn [<set_ $name>](&mut self, value: f64) -> Result<()> {
				self.set(stringify!($name), Value::Float(value))
			}
		}

		field_accessor!(@remove $name);
	};
	(bool, $name:ident) => {
		paste! {
			#[doc = concat!("The `", stringify!($name), "` field")]
			pub fn $name(&self) -> Option<bool> {
				self.get(stringify!($name)).as_ref().and_then(Value::bool)
			}

			#[doc = concat!("Sets the `", stringify!($name), "` field")]
			///
			/// # Errors
			///
			/// * See [`MediaFile::set`]
			pub fn [<set_ $name>](&mut self, value: bool) -> Result<()> {
				self.set(stringify!($name), Value::Bool(value))
			}
		}

		field_accessor!(@remove $name);
	};
	(date, $name:ident) => {
		paste! {
			#[doc = concat!("The `", stringify!($name), "` field")]
			pub fn $name(&self) -> Option<DateValue> {
				self.get(stringify!($name)).as_ref().and_then(Value::date)
			}

			#[doc = concat!("Sets the `", stringify!($name), "` field")]
			///
			/// # Errors
			///
			/// * See [`MediaFile::set`]
			pub fn [<set_ $name>](&mut self, value: DateValue) -> Result<()> {
				self.set(stringify!($name), Value::Date(value))
			}
		}

		field_accessor!(@remove $name);
	};
	(list, $name:ident) => {
		paste! {
			#[doc = concat!("The `", stringify!($name), "` field")]
			pub fn $name(&self) -> Option<Vec<String>> {
				match self.get(stringify!($name)) {
					Some(Value::List(values)) => Some(values),
					_ => None,
				}
			}

			#[doc = concat!("Sets the `", stringify!($name), "` field")]
			///
			/// # Errors
			///
			/// * See [`MediaFile::set`]
			pub fn [<set_ $name>](&mut self, values: Vec<String>) -> Result<()> {
				self.set(stringify!($name), Value::List(values))
			}
		}

		field_accessor!(@remove $name);
	};
	(binary, $name:ident) => {
		paste! {
			#[doc = concat!("The `", stringify!($name), "` field")]
			pub fn $name(&self) -> Option<Vec<u8>> {
				match self.get(stringify!($name)) {
					Some(Value::Binary(data)) => Some(data),
					_ => None,
				}
			}

			#[doc = concat!("Sets the `", stringify!($name), "` field")]
			///
			/// # Errors
			///
			/// * See [`MediaFile::set`]
			pub fn [<set_ $name>](&mut self, data: Vec<u8>) -> Result<()> {
				self.set(stringify!($name), Value::Binary(data))
			}
		}

		field_accessor!(@remove $name);
	};
	(images, $name:ident) => {
		paste! {
			#[doc = concat!("The `", stringify!($name), "` field")]
			pub fn $name(&self) -> Option<Vec<Image>> {
				match self.get(stringify!($name)) {
					Some(Value::Images(images)) => Some(images),
					_ => None,
				}
			}

			#[doc = concat!("Sets the `", stringify!($name), "` field")]
			///
			/// # Errors
			///
			/// * See [`MediaFile::set`]
			pub fn [<set_ $name>](&mut self, images: Vec<Image>) -> Result<()> {
				self.set(stringify!($name), Value::Images(images))
			}
		}

		field_accessor!(@remove $name);
	};
}

macro_rules! field_accessors {
	($($kind:tt $name:ident;)*) => {
		$(field_accessor!($kind, $name);)*
	};
}

/// One open audio container with logical-field access
///
/// A `MediaFile` reads the whole container into memory on open; every
/// field access works on that in-memory state and nothing touches the
/// file again until [`MediaFile::save`] or [`MediaFile::delete`].
///
/// Fields can be reached three ways: the typed accessors
/// (`title()` / `set_title()` / `remove_title()` and friends), the
/// name-based [`get`](MediaFile::get) / [`set`](MediaFile::set) /
/// [`remove`](MediaFile::remove) triple, and the map-shaped
/// [`as_dict`](MediaFile::as_dict) / [`update`](MediaFile::update) pair.
///
/// # Examples
///
/// ```rust,no_run
/// use unitag::MediaFile;
///
/// let mut file = MediaFile::open("music/song.flac")?;
///
/// println!("{}", file.title().unwrap_or_default());
///
/// file.set_title("Chained to the Rhythm")?;
/// file.save()?;
/// # Ok::<(), unitag::error::UnitagError>(())
/// ```
pub struct MediaFile {
	path: PathBuf,
	file_size: u64,
	envelope: Envelope,
}

impl MediaFile {
	/// Opens a file with the default [`ParseOptions`]
	///
	/// # Errors
	///
	/// * [`ErrorKind::Io`](crate::error::ErrorKind::Io): the path cannot
	///   be read
	/// * See [`Envelope::read_from`]
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::open_with(path, ParseOptions::new())
	}

	/// Opens a file
	///
	/// # Errors
	///
	/// * [`ErrorKind::Io`](crate::error::ErrorKind::Io): the path cannot
	///   be read
	/// * See [`Envelope::read_from`]
	pub fn open_with(path: impl AsRef<Path>, parse_options: ParseOptions) -> Result<Self> {
		let path = path.as_ref();
		debug!("Opening `{}`", path.display());

		let file = File::open(path)?;
		let file_size = file.metadata()?.len();

		let mut reader = BufReader::new(file);
		let envelope = Envelope::read_from(&mut reader, parse_options)?;

		Ok(Self {
			path: path.to_owned(),
			file_size,
			envelope,
		})
	}

	/// Saves the tag set back to the file with the default
	/// [`WriteOptions`]
	///
	/// # Errors
	///
	/// * [`ErrorKind::Io`](crate::error::ErrorKind::Io)
	pub fn save(&mut self) -> Result<()> {
		self.save_with(WriteOptions::new())
	}

	/// Saves the tag set back to the file
	///
	/// [`WriteOptions::id3v23`] is honored only for kinds carrying ID3
	/// frames; it rewrites the in-memory tag to the legacy revision
	/// before serializing, so the downgrade survives a reopen.
	///
	/// # Errors
	///
	/// * [`ErrorKind::Io`](crate::error::ErrorKind::Io)
	pub fn save_with(&mut self, write_options: WriteOptions) -> Result<()> {
		debug!("Saving `{}`", self.path.display());

		if write_options.id3v23 && self.envelope.kind().family() == TagFamily::Id3 {
			if let Some(id3) = self.envelope.tag_mut().id3_mut() {
				id3.downgrade_to_v23(&registry::v23_join_descriptions());
			}
		}

		let mut writer = BufWriter::new(File::create(&self.path)?);
		self.envelope.write_to(&mut writer)?;
		writer.flush()?;

		self.file_size = writer.get_ref().metadata()?.len();
		Ok(())
	}

	/// Clears the tag set and persists the cleared state
	///
	/// Audio properties are untouched; only the tag block is emptied.
	///
	/// # Errors
	///
	/// * [`ErrorKind::Io`](crate::error::ErrorKind::Io)
	pub fn delete(&mut self) -> Result<()> {
		self.envelope.clear_tag();
		self.save()
	}

	/// The path the file was opened from
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// The file's size in bytes, as of the last open or save
	pub fn file_size(&self) -> u64 {
		self.file_size
	}

	/// The detected [`FileKind`]
	pub fn kind(&self) -> FileKind {
		self.envelope.kind()
	}

	/// Reads a field by name, `None` when unknown or unset
	pub fn get(&self, name: &str) -> Option<Value> {
		let spec = registry::resolve(name)?;
		spec.get(self.envelope.kind(), self.envelope.tag())
	}

	/// Writes a field by name
	///
	/// Unknown names and strategies inapplicable to this container's
	/// family are no-ops.
	///
	/// # Errors
	///
	/// * [`ErrorKind::UnsupportedPicture`](crate::error::ErrorKind::UnsupportedPicture):
	///   the target container rejects an image payload
	pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
		if let Some(spec) = registry::resolve(name) {
			spec.set(self.envelope.kind(), self.envelope.tag_mut(), Some(&value.into()))?;
		}

		Ok(())
	}

	/// Removes a field by name; unknown names are no-ops
	pub fn remove(&mut self, name: &str) {
		if let Some(spec) = registry::resolve(name) {
			spec.delete(self.envelope.kind(), self.envelope.tag_mut());
		}
	}

	/// All logical field names, standard then runtime-registered
	pub fn fields() -> Vec<String> {
		registry::field_names()
	}

	/// All logical field names in a stable, date-aware order
	///
	/// Names sort lexicographically, except that the date-component
	/// substrings sort as if `year` were `date0`, `month` were `date1`
	/// and `day` were `date2`. A whole date therefore sorts before its
	/// components, and a component write never clobbers a later whole
	/// date in an [`update`](MediaFile::update).
	pub fn sorted_fields() -> Vec<String> {
		let mut names = Self::fields();
		names.sort_by_key(|name| date_sort_key(name));
		names
	}

	/// Every readable name: all fields plus the audio property names
	pub fn readable_fields() -> Vec<String> {
		let mut names = Self::fields();
		names.extend(PROPERTY_NAMES.iter().map(|&name| name.to_owned()));
		names
	}

	/// Maps every field name to its current value
	pub fn as_dict(&self) -> HashMap<String, Option<Value>> {
		Self::fields()
			.into_iter()
			.map(|name| {
				let value = self.get(&name);
				(name, value)
			})
			.collect()
	}

	/// Applies a map of field values in [`sorted_fields`](MediaFile::sorted_fields)
	/// order, deleting a field mapped to `None`
	///
	/// # Errors
	///
	/// * [`ErrorKind::UnsupportedPicture`](crate::error::ErrorKind::UnsupportedPicture):
	///   the target container rejects an image payload
	pub fn update(&mut self, values: &HashMap<String, Option<Value>>) -> Result<()> {
		for name in Self::sorted_fields() {
			match values.get(&name) {
				Some(Some(value)) => self.set(&name, value.clone())?,
				Some(None) => self.remove(&name),
				None => {},
			}
		}

		Ok(())
	}

	/// The duration in seconds, `0.0` when unreported
	pub fn length(&self) -> f64 {
		match self.envelope.info().duration() {
			Some(duration) => duration.as_secs_f64(),
			None => 0.0,
		}
	}

	/// The sample rate in Hz, `0` when unreported
	///
	/// Opus always decodes at 48 kHz, whatever the input rate was.
	pub fn samplerate(&self) -> u32 {
		if self.envelope.kind() == FileKind::Opus {
			return 48_000;
		}

		self.envelope.info().sample_rate().unwrap_or(0)
	}

	/// The bits per sample, `0` when unreported
	pub fn bitdepth(&self) -> u8 {
		self.envelope.info().bit_depth().unwrap_or(0)
	}

	/// The channel count, `0` when unreported
	pub fn channels(&self) -> u8 {
		self.envelope.info().channels().unwrap_or(0)
	}

	/// The bit rate in bits per second
	///
	/// Falls back to `file_size * 8 / length` when the container does
	/// not report one; `0` when the length is unknown too.
	pub fn bitrate(&self) -> u32 {
		if let Some(bitrate) = self.envelope.info().bitrate() {
			return bitrate;
		}

		let length = self.length();
		if length > 0.0 {
			(self.file_size as f64 * 8.0 / length) as u32
		} else {
			0
		}
	}

	/// The bit rate mode (`"CBR"`, `"VBR"`, `"ABR"`), empty when unknown
	pub fn bitrate_mode(&self) -> String {
		match self.envelope.info().bitrate_mode() {
			Some(mode) => mode.to_string(),
			None => String::new(),
		}
	}

	/// The encoding software, empty when unreported
	pub fn encoder_info(&self) -> String {
		self.envelope.info().encoder_info().unwrap_or_default().to_owned()
	}

	/// The encoder settings, empty when unreported
	pub fn encoder_settings(&self) -> String {
		self.envelope
			.info()
			.encoder_settings()
			.unwrap_or_default()
			.to_owned()
	}

	/// The human-readable format name, e.g. `"FLAC"`
	pub fn format(&self) -> String {
		self.envelope.kind().format_name().to_owned()
	}

	field_accessors! {
		text title;
		text artist;
		list artists;
		text album;
		list genres;
		text genre;
		text lyricist;
		text composer;
		text composer_sort;
		text arranger;
		text grouping;
		int track;
		int tracktotal;
		int disc;
		int disctotal;
		text url;
		text lyrics;
		text comments;
		text copyright;
		int bpm;
		bool comp;
		text albumartist;
		list albumartists;
		list albumtypes;
		text albumtype;
		text label;
		text artist_sort;
		text albumartist_sort;
		text asin;
		list catalognums;
		text catalognum;
		text barcode;
		text isrc;
		text disctitle;
		text encoder;
		text script;
		list languages;
		text language;
		text country;
		text albumstatus;
		text media;
		text albumdisambig;
		date date;
		int year;
		int month;
		int day;
		date original_date;
		int original_year;
		int original_month;
		int original_day;
		text artist_credit;
		list artists_credit;
		list artists_sort;
		text albumartist_credit;
		list albumartists_credit;
		list albumartists_sort;
		binary art;
		images images;
		text mb_trackid;
		text mb_releasetrackid;
		text mb_workid;
		text mb_albumid;
		list mb_artistids;
		text mb_artistid;
		list mb_albumartistids;
		text mb_albumartistid;
		text mb_releasegroupid;
		text acoustid_fingerprint;
		text acoustid_id;
		float rg_track_gain;
		float rg_album_gain;
		float rg_track_peak;
		float rg_album_peak;
		float r128_track_gain;
		float r128_album_gain;
		text initial_key;
	}
}

/// The sort key for [`MediaFile::sorted_fields`]: date components sort
/// right after their parent date.
fn date_sort_key(name: &str) -> String {
	name.replace("year", "date0")
		.replace("month", "date1")
		.replace("day", "date2")
}
