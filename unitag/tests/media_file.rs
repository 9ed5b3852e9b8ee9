//! Integration tests for [`MediaFile`].

use std::fs::File;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};
use unitag::MediaFile;
use unitag::config::WriteOptions;
use unitag::envelope::Envelope;
use unitag::kind::FileKind;
use unitag::picture::{Image, ImageType};
use unitag::tags::TagSet;

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3];
const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 4, 5, 6];

fn seed(dir: &TempDir, name: &str, kind: FileKind) -> PathBuf {
	let path = dir.path().join(name);
	write_envelope(&path, &Envelope::create(kind));
	path
}

fn write_envelope(path: &Path, envelope: &Envelope) {
	let mut file = File::create(path).unwrap();
	envelope.write_to(&mut file).unwrap();
}

#[test_log::test]
fn title_round_trips_in_every_family() {
	let dir = tempdir().unwrap();

	for (name, kind) in [
		("a.mp3", FileKind::Mp3),
		("a.m4a", FileKind::Alac),
		("a.wma", FileKind::Asf),
		("a.flac", FileKind::Flac),
		("a.opus", FileKind::Opus),
		("a.wv", FileKind::WavPack),
	] {
		let path = seed(&dir, name, kind);

		let mut file = MediaFile::open(&path).unwrap();
		assert_eq!(file.kind(), kind);
		assert!(file.title().is_none(), "{name}: fresh file has a title");

		file.set_title("Test α").unwrap();
		file.save().unwrap();

		let reopened = MediaFile::open(&path).unwrap();
		assert_eq!(
			reopened.title().as_deref(),
			Some("Test α"),
			"{name}: title did not survive a reopen"
		);
	}
}

#[test_log::test]
fn image_list_round_trips_and_deletes() {
	let dir = tempdir().unwrap();
	let path = seed(&dir, "art.flac", FileKind::Flac);

	let mut front = Image::from_data(PNG.to_vec());
	front.set_image_type(Some(ImageType::FrontCover));
	let mut media = Image::from_data(JPEG.to_vec());
	media.set_image_type(Some(ImageType::Media));

	let mut file = MediaFile::open(&path).unwrap();
	file.set_images(vec![media, front]).unwrap();
	file.save().unwrap();

	let mut reopened = MediaFile::open(&path).unwrap();
	let images = reopened.images().unwrap();
	assert_eq!(images.len(), 2);
	assert_eq!(images[0].image_type(), Some(ImageType::Media));
	assert_eq!(images[0].data(), JPEG);
	assert_eq!(images[1].image_type(), Some(ImageType::FrontCover));
	assert_eq!(images[1].data(), PNG);

	// The representative cover prefers the front cover over list order.
	assert_eq!(reopened.art().as_deref(), Some(PNG));

	reopened.remove_images();
	reopened.save().unwrap();

	let emptied = MediaFile::open(&path).unwrap();
	assert!(emptied.images().is_none());
	assert!(emptied.art().is_none());
}

#[test_log::test]
fn id3v23_save_downgrades_and_joins() {
	let dir = tempdir().unwrap();
	let path = seed(&dir, "legacy.mp3", FileKind::Mp3);

	let ids = vec![
		String::from("7bcf1234-0000-0000-0000-000000000001"),
		String::from("7bcf1234-0000-0000-0000-000000000002"),
	];

	let mut file = MediaFile::open(&path).unwrap();
	file.set_mb_artistids(ids.clone()).unwrap();
	file.set_title("Test α").unwrap();
	file.save_with(WriteOptions::new().id3v23(true)).unwrap();

	// The downgrade must be persisted, not just applied in memory.
	let mut reader = File::open(&path).unwrap();
	let envelope = Envelope::read_from(&mut reader, unitag::config::ParseOptions::new()).unwrap();
	match envelope.tag() {
		TagSet::Id3(id3) => {
			assert_eq!(id3.revision(), unitag::tags::Id3Revision::V23);
		},
		other => panic!("expected an ID3 tag, got {other:?}"),
	}

	// The joined frame reads back as the original list.
	let reopened = MediaFile::open(&path).unwrap();
	assert_eq!(reopened.mb_artistids(), Some(ids));
	assert_eq!(reopened.title().as_deref(), Some("Test α"));
}

#[test_log::test]
fn delete_clears_tags_but_keeps_properties() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("keep.flac");

	let mut envelope = Envelope::create(FileKind::Flac);
	envelope.info_mut().set_sample_rate(96_000);
	envelope.info_mut().set_bit_depth(24);
	write_envelope(&path, &envelope);

	let mut file = MediaFile::open(&path).unwrap();
	file.set_title("doomed").unwrap();
	file.set_genres(vec![String::from("Drone")]).unwrap();
	file.save().unwrap();

	let mut reopened = MediaFile::open(&path).unwrap();
	assert_eq!(reopened.title().as_deref(), Some("doomed"));
	reopened.delete().unwrap();

	let cleared = MediaFile::open(&path).unwrap();
	assert!(cleared.title().is_none());
	assert!(cleared.genres().is_none());
	assert_eq!(cleared.samplerate(), 96_000);
	assert_eq!(cleared.bitdepth(), 24);
}

#[test_log::test]
fn date_and_components_survive_a_reopen() {
	let dir = tempdir().unwrap();
	let path = seed(&dir, "dated.m4a", FileKind::Aac);

	let mut file = MediaFile::open(&path).unwrap();
	file.set("date", "2020-05-01").unwrap();
	file.save().unwrap();

	let mut reopened = MediaFile::open(&path).unwrap();
	assert_eq!(reopened.year(), Some(2020));
	assert_eq!(reopened.month(), Some(5));
	assert_eq!(reopened.day(), Some(1));

	reopened.set_month(6).unwrap();
	reopened.save().unwrap();

	let adjusted = MediaFile::open(&path).unwrap();
	assert_eq!(adjusted.date().map(|date| date.to_string()).as_deref(), Some("2020-06-01"));
}

#[test_log::test]
fn file_size_tracks_the_last_save() {
	let dir = tempdir().unwrap();
	let path = seed(&dir, "sized.wv", FileKind::WavPack);

	let mut file = MediaFile::open(&path).unwrap();
	let initial = file.file_size();

	file.set_comments("a considerably longer comment than the empty one")
		.unwrap();
	file.save().unwrap();

	assert!(file.file_size() > initial);
	assert_eq!(
		file.file_size(),
		std::fs::metadata(&path).unwrap().len()
	);
}
