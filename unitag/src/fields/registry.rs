//! The built-in field table and the runtime extension registry

use std::sync::{Mutex, OnceLock};

use crate::error::Result;
use crate::fields::FieldSpec;
use crate::macros::err;
use crate::strategy::Strategy;

/// The standard fields, in enumeration order.
pub(crate) fn standard_fields() -> &'static [FieldSpec] {
	static FIELDS: OnceLock<Vec<FieldSpec>> = OnceLock::new();
	FIELDS.get_or_init(build_standard_fields)
}

fn custom_fields() -> &'static Mutex<Vec<FieldSpec>> {
	static FIELDS: OnceLock<Mutex<Vec<FieldSpec>>> = OnceLock::new();
	FIELDS.get_or_init(|| Mutex::new(Vec::new()))
}

/// Looks a field up by name, standard fields first.
///
/// The spec is cloned out so no registry lock is held while field
/// operations (which may resolve parents themselves) run.
pub(crate) fn resolve(name: &str) -> Option<FieldSpec> {
	if let Some(spec) = standard_fields().iter().find(|spec| spec.name() == name) {
		return Some(spec.clone());
	}

	let fields = custom_fields().lock().unwrap();
	fields.iter().find(|spec| spec.name() == name).cloned()
}

/// All field names, standard then registered, in registration order.
pub(crate) fn field_names() -> Vec<String> {
	let mut names: Vec<String> = standard_fields()
		.iter()
		.map(|spec| spec.name().to_owned())
		.collect();

	let fields = custom_fields().lock().unwrap();
	names.extend(fields.iter().map(|spec| spec.name().to_owned()));
	names
}

/// The descriptions of every frame flagged for `/`-joining on ID3v2.3.
pub(crate) fn v23_join_descriptions() -> Vec<String> {
	let mut descriptions: Vec<String> = standard_fields()
		.iter()
		.flat_map(FieldSpec::v23_join_descriptions)
		.collect();

	let fields = custom_fields().lock().unwrap();
	descriptions.extend(fields.iter().flat_map(FieldSpec::v23_join_descriptions));
	descriptions
}

/// Registers a new logical field
///
/// The name must be unused and the spec well formed: a non-empty name,
/// at least one strategy for strategy-backed kinds, and a parent that
/// resolves to a field of the right kind for view fields.
///
/// # Errors
///
/// * [`ErrorKind::DuplicateField`](crate::error::ErrorKind::DuplicateField)
/// * [`ErrorKind::BadFieldSpec`](crate::error::ErrorKind::BadFieldSpec)
///
/// # Panics
///
/// * See [`Mutex::lock`]
///
/// # Examples
///
/// ```rust
/// use unitag::fields::{FieldSpec, add_field};
/// use unitag::strategy::Strategy;
///
/// let spec = FieldSpec::text(
/// 	"original_album",
/// 	vec![
/// 		Strategy::frame("TOAL"),
/// 		Strategy::comment("ORIGALBUM"),
/// 	],
/// );
/// add_field(spec)?;
/// # Ok::<(), unitag::error::UnitagError>(())
/// ```
pub fn add_field(spec: FieldSpec) -> Result<()> {
	if spec.name().is_empty() {
		err!(BadFieldSpec("field name must not be empty"));
	}

	if !spec.has_strategies() {
		err!(BadFieldSpec("field must have at least one strategy"));
	}

	if let Some(parent) = spec.parent() {
		let resolved = resolve(parent);
		let compatible = match &resolved {
			Some(parent_spec) if spec.is_date_component() => parent_spec.is_date(),
			Some(parent_spec) => parent_spec.is_list(),
			None => false,
		};

		if !compatible {
			err!(BadFieldSpec("parent does not resolve to a compatible field"));
		}
	}

	let mut fields = custom_fields().lock().unwrap();
	if fields.iter().any(|existing| existing.name() == spec.name())
		|| standard_fields()
			.iter()
			.any(|existing| existing.name() == spec.name())
	{
		err!(DuplicateField(spec.name().to_owned()));
	}

	fields.push(spec);
	Ok(())
}

#[allow(clippy::too_many_lines)]
fn build_standard_fields() -> Vec<FieldSpec> {
	vec![
		FieldSpec::text(
			"title",
			vec![
				Strategy::frame("TIT2"),
				Strategy::atom("\u{a9}nam"),
				Strategy::comment("TITLE"),
				Strategy::attribute("Title"),
			],
		),
		FieldSpec::text(
			"artist",
			vec![
				Strategy::frame("TPE1"),
				Strategy::atom("\u{a9}ART"),
				Strategy::comment("ARTIST"),
				Strategy::attribute("Author"),
			],
		),
		FieldSpec::list(
			"artists",
			vec![
				Strategy::frame_desc("ARTISTS"),
				Strategy::freeform("ARTISTS"),
				Strategy::comment("ARTISTS"),
				Strategy::attribute("WM/ARTISTS"),
			],
		),
		FieldSpec::text(
			"album",
			vec![
				Strategy::frame("TALB"),
				Strategy::atom("\u{a9}alb"),
				Strategy::comment("ALBUM"),
				Strategy::attribute("WM/AlbumTitle"),
			],
		),
		FieldSpec::list(
			"genres",
			vec![
				Strategy::frame("TCON"),
				Strategy::atom("\u{a9}gen"),
				Strategy::comment("GENRE"),
				Strategy::attribute("WM/Genre"),
			],
		),
		FieldSpec::single_of("genre", "genres"),
		FieldSpec::text(
			"lyricist",
			vec![
				Strategy::frame("TEXT"),
				Strategy::freeform("LYRICIST"),
				Strategy::comment("LYRICIST"),
				Strategy::attribute("WM/Writer"),
			],
		),
		FieldSpec::text(
			"composer",
			vec![
				Strategy::frame("TCOM"),
				Strategy::atom("\u{a9}wrt"),
				Strategy::comment("COMPOSER"),
				Strategy::attribute("WM/Composer"),
			],
		),
		FieldSpec::text(
			"composer_sort",
			vec![
				Strategy::frame("TSOC"),
				Strategy::atom("soco"),
				Strategy::comment("COMPOSERSORT"),
				Strategy::attribute("WM/Composersortorder"),
			],
		),
		FieldSpec::text(
			"arranger",
			vec![
				Strategy::frame_people("arranger"),
				Strategy::freeform("Arranger"),
				Strategy::comment("ARRANGER"),
				Strategy::attribute("beets/Arranger"),
			],
		),
		FieldSpec::text(
			"grouping",
			vec![
				Strategy::frame("TIT1"),
				Strategy::atom("\u{a9}grp"),
				Strategy::comment("GROUPING"),
				Strategy::attribute("WM/ContentGroupDescription"),
			],
		),
		FieldSpec::integer(
			"track",
			vec![
				Strategy::frame_slash_pack("TRCK", 0),
				Strategy::atom_tuple("trkn", 0),
				Strategy::comment("TRACK"),
				Strategy::comment("TRACKNUMBER"),
				Strategy::attribute("WM/TrackNumber"),
			],
		),
		FieldSpec::integer(
			"tracktotal",
			vec![
				Strategy::frame_slash_pack("TRCK", 1),
				Strategy::atom_tuple("trkn", 1),
				Strategy::comment("TRACKTOTAL"),
				Strategy::comment("TRACKC"),
				Strategy::comment("TOTALTRACKS"),
				Strategy::attribute("TotalTracks"),
			],
		),
		FieldSpec::integer(
			"disc",
			vec![
				Strategy::frame_slash_pack("TPOS", 0),
				Strategy::atom_tuple("disk", 0),
				Strategy::comment("DISC"),
				Strategy::comment("DISCNUMBER"),
				Strategy::attribute("WM/PartOfSet"),
			],
		),
		FieldSpec::integer(
			"disctotal",
			vec![
				Strategy::frame_slash_pack("TPOS", 1),
				Strategy::atom_tuple("disk", 1),
				Strategy::comment("DISCTOTAL"),
				Strategy::comment("DISCC"),
				Strategy::comment("TOTALDISCS"),
				Strategy::attribute("TotalDiscs"),
			],
		),
		FieldSpec::text(
			"url",
			vec![
				Strategy::frame_desc_keyed("WXXX", "", None),
				Strategy::atom("\u{a9}url"),
				Strategy::comment("URL"),
				Strategy::attribute("WM/URL"),
			],
		),
		FieldSpec::text(
			"lyrics",
			vec![
				Strategy::frame_desc_keyed("USLT", "", None),
				Strategy::atom("\u{a9}lyr"),
				Strategy::comment("LYRICS"),
				Strategy::attribute("WM/Lyrics"),
			],
		),
		FieldSpec::text(
			"comments",
			vec![
				Strategy::frame_desc_keyed("COMM", "", None),
				Strategy::atom("\u{a9}cmt"),
				Strategy::comment("DESCRIPTION"),
				Strategy::comment("COMMENT"),
				Strategy::attribute("WM/Comments"),
				Strategy::attribute("Description"),
			],
		),
		FieldSpec::text(
			"copyright",
			vec![
				Strategy::frame("TCOP"),
				Strategy::atom("cprt"),
				Strategy::comment("COPYRIGHT"),
				Strategy::attribute("Copyright"),
			],
		),
		FieldSpec::integer(
			"bpm",
			vec![
				Strategy::frame("TBPM"),
				Strategy::atom("tmpo").wire_int(),
				Strategy::comment("BPM"),
				Strategy::attribute("WM/BeatsPerMinute"),
			],
		),
		FieldSpec::boolean(
			"comp",
			vec![
				Strategy::frame("TCMP"),
				Strategy::atom_bool("cpil"),
				Strategy::comment("COMPILATION"),
				Strategy::attribute("WM/IsCompilation").wire_bool(),
			],
		),
		FieldSpec::text(
			"albumartist",
			vec![
				Strategy::frame("TPE2"),
				Strategy::atom("aART"),
				Strategy::comment("ALBUM ARTIST"),
				Strategy::comment("ALBUM_ARTIST"),
				Strategy::comment("ALBUMARTIST"),
				Strategy::attribute("WM/AlbumArtist"),
			],
		),
		FieldSpec::list(
			"albumartists",
			vec![
				Strategy::frame_desc("ALBUMARTISTS"),
				Strategy::frame_desc("ALBUM_ARTISTS"),
				Strategy::frame_desc("ALBUM ARTISTS").read_only(),
				Strategy::freeform("ALBUMARTISTS"),
				Strategy::freeform("ALBUM_ARTISTS"),
				Strategy::freeform("ALBUM ARTISTS").read_only(),
				Strategy::comment("ALBUMARTISTS"),
				Strategy::comment("ALBUM_ARTISTS"),
				Strategy::comment("ALBUM ARTISTS").read_only(),
				Strategy::attribute("WM/AlbumArtists"),
			],
		),
		FieldSpec::list(
			"albumtypes",
			vec![
				Strategy::frame_desc("MusicBrainz Album Type").v23_join(),
				Strategy::freeform("MusicBrainz Album Type"),
				Strategy::comment("RELEASETYPE"),
				Strategy::comment("MUSICBRAINZ_ALBUMTYPE"),
				Strategy::attribute("MusicBrainz/Album Type"),
			],
		),
		FieldSpec::single_of("albumtype", "albumtypes"),
		FieldSpec::text(
			"label",
			vec![
				Strategy::frame("TPUB"),
				Strategy::freeform("LABEL"),
				Strategy::freeform("publisher"),
				Strategy::freeform("Label").read_only(),
				Strategy::comment("LABEL"),
				Strategy::comment("PUBLISHER"),
				Strategy::attribute("WM/Publisher"),
			],
		),
		FieldSpec::text(
			"artist_sort",
			vec![
				Strategy::frame("TSOP"),
				Strategy::atom("soar"),
				Strategy::comment("ARTISTSORT"),
				Strategy::attribute("WM/ArtistSortOrder"),
			],
		),
		FieldSpec::text(
			"albumartist_sort",
			vec![
				Strategy::frame_desc("ALBUMARTISTSORT"),
				Strategy::atom("soaa"),
				Strategy::comment("ALBUMARTISTSORT"),
				Strategy::attribute("WM/AlbumArtistSortOrder"),
			],
		),
		FieldSpec::text(
			"asin",
			vec![
				Strategy::frame_desc("ASIN"),
				Strategy::freeform("ASIN"),
				Strategy::comment("ASIN"),
				Strategy::attribute("MusicBrainz/ASIN"),
			],
		),
		FieldSpec::list(
			"catalognums",
			vec![
				Strategy::frame_desc("CATALOGNUMBER").v23_join(),
				Strategy::frame_desc("CATALOGID").read_only(),
				Strategy::frame_desc("DISCOGS_CATALOG").read_only(),
				Strategy::freeform("CATALOGNUMBER"),
				Strategy::freeform("CATALOGID").read_only(),
				Strategy::freeform("DISCOGS_CATALOG").read_only(),
				Strategy::comment("CATALOGNUMBER"),
				Strategy::comment("CATALOGID").read_only(),
				Strategy::comment("DISCOGS_CATALOG").read_only(),
				Strategy::attribute("WM/CatalogNo"),
				Strategy::attribute("CATALOGID").read_only(),
				Strategy::attribute("DISCOGS_CATALOG").read_only(),
			],
		),
		FieldSpec::single_of("catalognum", "catalognums"),
		FieldSpec::text(
			"barcode",
			vec![
				Strategy::frame_desc("BARCODE"),
				Strategy::freeform("BARCODE"),
				Strategy::comment("BARCODE"),
				Strategy::comment("UPC").read_only(),
				Strategy::comment("EAN/UPN").read_only(),
				Strategy::comment("EAN").read_only(),
				Strategy::comment("UPN").read_only(),
				Strategy::attribute("WM/Barcode"),
			],
		),
		FieldSpec::text(
			"isrc",
			vec![
				Strategy::frame("TSRC"),
				Strategy::freeform("ISRC"),
				Strategy::comment("ISRC"),
				Strategy::attribute("WM/ISRC"),
			],
		),
		FieldSpec::text(
			"disctitle",
			vec![
				Strategy::frame("TSST"),
				Strategy::freeform("DISCSUBTITLE"),
				Strategy::comment("DISCSUBTITLE"),
				Strategy::attribute("WM/SetSubTitle"),
			],
		),
		FieldSpec::text(
			"encoder",
			vec![
				Strategy::frame("TENC"),
				Strategy::atom("\u{a9}too"),
				Strategy::comment("ENCODEDBY"),
				Strategy::comment("ENCODER"),
				Strategy::attribute("WM/EncodedBy"),
			],
		),
		FieldSpec::text(
			"script",
			vec![
				Strategy::frame_desc("Script"),
				Strategy::freeform("SCRIPT"),
				Strategy::comment("SCRIPT"),
				Strategy::attribute("WM/Script"),
			],
		),
		FieldSpec::list(
			"languages",
			vec![
				Strategy::frame("TLAN"),
				Strategy::freeform("LANGUAGE"),
				Strategy::comment("LANGUAGE"),
				Strategy::attribute("WM/Language"),
			],
		),
		FieldSpec::single_of("language", "languages"),
		FieldSpec::text(
			"country",
			vec![
				Strategy::frame_desc("MusicBrainz Album Release Country"),
				Strategy::freeform("MusicBrainz Album Release Country"),
				Strategy::comment("RELEASECOUNTRY"),
				Strategy::attribute("MusicBrainz/Album Release Country"),
			],
		),
		FieldSpec::text(
			"albumstatus",
			vec![
				Strategy::frame_desc("MusicBrainz Album Status"),
				Strategy::freeform("MusicBrainz Album Status"),
				Strategy::comment("RELEASESTATUS"),
				Strategy::comment("MUSICBRAINZ_ALBUMSTATUS"),
				Strategy::attribute("MusicBrainz/Album Status"),
			],
		),
		FieldSpec::text(
			"media",
			vec![
				Strategy::frame("TMED"),
				Strategy::freeform("MEDIA"),
				Strategy::comment("MEDIA"),
				Strategy::attribute("WM/Media"),
			],
		),
		FieldSpec::text(
			"albumdisambig",
			vec![
				Strategy::frame_desc("MusicBrainz Album Comment"),
				Strategy::freeform("MusicBrainz Album Comment"),
				Strategy::comment("MUSICBRAINZ_ALBUMCOMMENT"),
				Strategy::attribute("MusicBrainz/Album Comment"),
			],
		),
		FieldSpec::date(
			"date",
			vec![
				Strategy::frame("TDRC"),
				Strategy::atom("\u{a9}day"),
				Strategy::comment("DATE"),
				Strategy::attribute("WM/Year"),
			],
			vec![Strategy::comment("YEAR")],
		),
		FieldSpec::date_component("year", "date", 0),
		FieldSpec::date_component("month", "date", 1),
		FieldSpec::date_component("day", "date", 2),
		FieldSpec::date(
			"original_date",
			vec![
				Strategy::frame("TDOR"),
				Strategy::freeform("ORIGINAL YEAR"),
				Strategy::freeform("ORIGINALDATE"),
				Strategy::comment("ORIGINALDATE"),
				Strategy::attribute("WM/OriginalReleaseYear"),
			],
			Vec::new(),
		),
		FieldSpec::date_component("original_year", "original_date", 0),
		FieldSpec::date_component("original_month", "original_date", 1),
		FieldSpec::date_component("original_day", "original_date", 2),
		FieldSpec::text(
			"artist_credit",
			vec![
				Strategy::frame_desc("Artist Credit"),
				Strategy::freeform("Artist Credit"),
				Strategy::comment("ARTIST_CREDIT"),
				Strategy::attribute("beets/Artist Credit"),
			],
		),
		FieldSpec::list(
			"artists_credit",
			vec![
				Strategy::frame_desc("ARTISTS_CREDIT"),
				Strategy::freeform("ARTISTS_CREDIT"),
				Strategy::comment("ARTISTS_CREDIT"),
				Strategy::attribute("beets/ArtistsCredit"),
			],
		),
		FieldSpec::list(
			"artists_sort",
			vec![
				Strategy::frame_desc("ARTISTS_SORT"),
				Strategy::freeform("ARTISTS_SORT"),
				Strategy::comment("ARTISTS_SORT"),
				Strategy::attribute("beets/ArtistsSort"),
			],
		),
		FieldSpec::text(
			"albumartist_credit",
			vec![
				Strategy::frame_desc("Album Artist Credit"),
				Strategy::freeform("Album Artist Credit"),
				Strategy::comment("ALBUMARTIST_CREDIT"),
				Strategy::attribute("beets/Album Artist Credit"),
			],
		),
		FieldSpec::list(
			"albumartists_credit",
			vec![
				Strategy::frame_desc("ALBUMARTISTS_CREDIT"),
				Strategy::freeform("ALBUMARTISTS_CREDIT"),
				Strategy::comment("ALBUMARTISTS_CREDIT"),
				Strategy::attribute("beets/AlbumArtistsCredit"),
			],
		),
		FieldSpec::list(
			"albumartists_sort",
			vec![
				Strategy::frame_desc("ALBUMARTISTS_SORT"),
				Strategy::freeform("ALBUMARTISTS_SORT"),
				Strategy::comment("ALBUMARTISTS_SORT"),
				Strategy::attribute("beets/AlbumArtistsSort"),
			],
		),
		FieldSpec::cover_art("art"),
		FieldSpec::images("images"),
		FieldSpec::text(
			"mb_trackid",
			vec![
				Strategy::frame_ufid("http://musicbrainz.org"),
				Strategy::freeform("MusicBrainz Track Id"),
				Strategy::comment("MUSICBRAINZ_TRACKID"),
				Strategy::attribute("MusicBrainz/Track Id"),
			],
		),
		FieldSpec::text(
			"mb_releasetrackid",
			vec![
				Strategy::frame_desc("MusicBrainz Release Track Id"),
				Strategy::freeform("MusicBrainz Release Track Id"),
				Strategy::comment("MUSICBRAINZ_RELEASETRACKID"),
				Strategy::attribute("MusicBrainz/Release Track Id"),
			],
		),
		FieldSpec::text(
			"mb_workid",
			vec![
				Strategy::frame_desc("MusicBrainz Work Id"),
				Strategy::freeform("MusicBrainz Work Id"),
				Strategy::comment("MUSICBRAINZ_WORKID"),
				Strategy::attribute("MusicBrainz/Work Id"),
			],
		),
		FieldSpec::text(
			"mb_albumid",
			vec![
				Strategy::frame_desc("MusicBrainz Album Id"),
				Strategy::freeform("MusicBrainz Album Id"),
				Strategy::comment("MUSICBRAINZ_ALBUMID"),
				Strategy::attribute("MusicBrainz/Album Id"),
			],
		),
		FieldSpec::list(
			"mb_artistids",
			vec![
				Strategy::frame_desc("MusicBrainz Artist Id").v23_join(),
				Strategy::freeform("MusicBrainz Artist Id"),
				Strategy::comment("MUSICBRAINZ_ARTISTID"),
				Strategy::attribute("MusicBrainz/Artist Id"),
			],
		),
		FieldSpec::single_of("mb_artistid", "mb_artistids"),
		FieldSpec::list(
			"mb_albumartistids",
			vec![
				Strategy::frame_desc("MusicBrainz Album Artist Id").v23_join(),
				Strategy::freeform("MusicBrainz Album Artist Id"),
				Strategy::comment("MUSICBRAINZ_ALBUMARTISTID"),
				Strategy::attribute("MusicBrainz/Album Artist Id"),
			],
		),
		FieldSpec::single_of("mb_albumartistid", "mb_albumartistids"),
		FieldSpec::text(
			"mb_releasegroupid",
			vec![
				Strategy::frame_desc("MusicBrainz Release Group Id"),
				Strategy::freeform("MusicBrainz Release Group Id"),
				Strategy::comment("MUSICBRAINZ_RELEASEGROUPID"),
				Strategy::attribute("MusicBrainz/Release Group Id"),
			],
		),
		FieldSpec::text(
			"acoustid_fingerprint",
			vec![
				Strategy::frame_desc("Acoustid Fingerprint"),
				Strategy::freeform("Acoustid Fingerprint"),
				Strategy::comment("ACOUSTID_FINGERPRINT"),
				Strategy::attribute("Acoustid/Fingerprint"),
			],
		),
		FieldSpec::text(
			"acoustid_id",
			vec![
				Strategy::frame_desc("Acoustid Id"),
				Strategy::freeform("Acoustid Id"),
				Strategy::comment("ACOUSTID_ID"),
				Strategy::attribute("Acoustid/Id"),
			],
		),
		FieldSpec::float(
			"rg_track_gain",
			vec![
				Strategy::frame_desc("REPLAYGAIN_TRACK_GAIN").suffix(" dB"),
				Strategy::frame_desc("replaygain_track_gain").suffix(" dB"),
				Strategy::soundcheck_comment(0),
				Strategy::freeform("replaygain_track_gain").suffix(" dB"),
				Strategy::soundcheck_atom(0),
				Strategy::comment("REPLAYGAIN_TRACK_GAIN").suffix(" dB"),
				Strategy::attribute("replaygain_track_gain").suffix(" dB"),
			],
		),
		FieldSpec::float(
			"rg_album_gain",
			vec![
				Strategy::frame_desc("REPLAYGAIN_ALBUM_GAIN").suffix(" dB"),
				Strategy::frame_desc("replaygain_album_gain").suffix(" dB"),
				Strategy::freeform("replaygain_album_gain").suffix(" dB"),
				Strategy::comment("REPLAYGAIN_ALBUM_GAIN").suffix(" dB"),
				Strategy::attribute("replaygain_album_gain").suffix(" dB"),
			],
		),
		FieldSpec::float(
			"rg_track_peak",
			vec![
				Strategy::frame_desc("REPLAYGAIN_TRACK_PEAK").float_places(6),
				Strategy::frame_desc("replaygain_track_peak").float_places(6),
				Strategy::soundcheck_comment(1),
				Strategy::freeform("replaygain_track_peak").float_places(6),
				Strategy::soundcheck_atom(1),
				Strategy::comment("REPLAYGAIN_TRACK_PEAK").float_places(6),
				Strategy::attribute("replaygain_track_peak").float_places(6),
			],
		),
		FieldSpec::float(
			"rg_album_peak",
			vec![
				Strategy::frame_desc("REPLAYGAIN_ALBUM_PEAK").float_places(6),
				Strategy::frame_desc("replaygain_album_peak").float_places(6),
				Strategy::freeform("replaygain_album_peak").float_places(6),
				Strategy::comment("REPLAYGAIN_ALBUM_PEAK").float_places(6),
				Strategy::attribute("replaygain_album_peak").float_places(6),
			],
		),
		FieldSpec::q_number(
			"r128_track_gain",
			8,
			vec![
				Strategy::frame_desc("R128_TRACK_GAIN"),
				Strategy::freeform("R128_TRACK_GAIN"),
				Strategy::comment("R128_TRACK_GAIN"),
				Strategy::attribute("R128_TRACK_GAIN"),
			],
		),
		FieldSpec::q_number(
			"r128_album_gain",
			8,
			vec![
				Strategy::frame_desc("R128_ALBUM_GAIN"),
				Strategy::freeform("R128_ALBUM_GAIN"),
				Strategy::comment("R128_ALBUM_GAIN"),
				Strategy::attribute("R128_ALBUM_GAIN"),
			],
		),
		FieldSpec::text(
			"initial_key",
			vec![
				Strategy::frame("TKEY"),
				Strategy::freeform("initialkey"),
				Strategy::comment("INITIALKEY"),
				Strategy::attribute("INITIALKEY"),
			],
		),
	]
}

#[cfg(test)]
mod tests {
	use super::{add_field, field_names, resolve, standard_fields, v23_join_descriptions};
	use crate::error::ErrorKind;
	use crate::fields::FieldSpec;
	use crate::strategy::Strategy;

	#[test_log::test]
	fn standard_table_is_complete() {
		for name in [
			"title", "artist", "artists", "album", "genres", "genre", "track", "tracktotal",
			"disc", "disctotal", "comp", "bpm", "date", "year", "month", "day",
			"original_date", "original_year", "art", "images", "mb_trackid",
			"rg_track_gain", "rg_track_peak", "r128_track_gain", "initial_key",
		] {
			assert!(resolve(name).is_some(), "missing standard field {name:?}");
		}
	}

	#[test_log::test]
	fn enumeration_preserves_table_order() {
		let names = field_names();

		assert_eq!(names[0], "title");
		assert_eq!(names[1], "artist");
		assert_eq!(names[standard_fields().len() - 1], "initial_key");
	}

	#[test_log::test]
	fn join_descriptions_cover_the_flagged_frames() {
		let descriptions = v23_join_descriptions();

		assert!(descriptions.iter().any(|d| d == "MusicBrainz Album Type"));
		assert!(descriptions.iter().any(|d| d == "CATALOGNUMBER"));
		assert!(descriptions.iter().any(|d| d == "MusicBrainz Artist Id"));
		assert!(
			descriptions
				.iter()
				.any(|d| d == "MusicBrainz Album Artist Id")
		);
		assert!(!descriptions.iter().any(|d| d == "ARTISTS"));
	}

	#[test_log::test]
	fn rejects_malformed_registrations() {
		let empty_name = FieldSpec::text("", vec![Strategy::comment("X")]);
		assert!(matches!(
			add_field(empty_name).unwrap_err().kind(),
			ErrorKind::BadFieldSpec(_)
		));

		let no_strategies = FieldSpec::text("exotic", Vec::new());
		assert!(matches!(
			add_field(no_strategies).unwrap_err().kind(),
			ErrorKind::BadFieldSpec(_)
		));

		let bad_parent = FieldSpec::date_component("exotic_year", "title", 0);
		assert!(matches!(
			add_field(bad_parent).unwrap_err().kind(),
			ErrorKind::BadFieldSpec(_)
		));

		let duplicate = FieldSpec::text("title", vec![Strategy::comment("TITLE")]);
		assert!(matches!(
			add_field(duplicate).unwrap_err().kind(),
			ErrorKind::DuplicateField(_)
		));
	}

	#[test_log::test]
	fn registers_and_resolves_a_custom_field() {
		let spec = FieldSpec::text(
			"registry_test_subtitle",
			vec![
				Strategy::frame("TIT3"),
				Strategy::comment("SUBTITLE"),
			],
		);

		add_field(spec).unwrap();
		assert!(resolve("registry_test_subtitle").is_some());
		assert!(
			field_names()
				.iter()
				.any(|name| name == "registry_test_subtitle")
		);
	}
}
