//! Uniform logical metadata fields over audio tagging formats.
//!
//! unitag maps the tagging scheme of a container (ID3v2 frames, MP4
//! `ilst` atoms, ASF attributes, Vorbis comments, APEv2 items) onto one
//! set of logical fields, so `title` reads and writes the right slot no
//! matter which kind of file is open. One write goes through every
//! tag slot a field is stored in for that family, so older readers keep
//! seeing their preferred keys.
//!
//! # Examples
//!
//! ## Reading and writing fields
//!
//! ```rust,no_run
//! use unitag::MediaFile;
//!
//! let mut file = MediaFile::open("music/song.flac")?;
//!
//! println!("{} - {}", file.artist().unwrap_or_default(), file.title().unwrap_or_default());
//!
//! file.set_genres(vec![String::from("Post-Rock")])?;
//! file.set_year(2011)?;
//! file.save()?;
//! # Ok::<(), unitag::error::UnitagError>(())
//! ```
//!
//! ## Name-based access
//!
//! Every logical field can also be reached by its name, which is how
//! runtime-registered fields (see [`fields::add_field`]) are used:
//!
//! ```rust,no_run
//! use unitag::MediaFile;
//! use unitag::value::Value;
//!
//! let mut file = MediaFile::open("music/song.m4a")?;
//!
//! file.set("albumstatus", "Official")?;
//! assert_eq!(file.get("albumstatus"), Some(Value::Text(String::from("Official"))));
//! # Ok::<(), unitag::error::UnitagError>(())
//! ```

pub mod config;
pub mod date;
pub mod envelope;
pub mod error;
pub mod fields;
pub mod kind;
pub(crate) mod macros;
mod media_file;
pub mod picture;
pub mod properties;
pub mod soundcheck;
pub mod strategy;
pub mod tags;
mod util;
pub mod value;

pub use media_file::MediaFile;
