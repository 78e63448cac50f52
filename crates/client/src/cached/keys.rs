//! Bucket layout and per-operation cache keys.

use quranc_core::cache::CacheKey;
use quranc_core::{BucketPath, BucketSpec, Error};
use serde::Serialize;

use crate::request::{ReqOptions, VerseTafsirOptions, VersesOptions};

pub const CHAPTERS: &str = "chapters";
pub const CHAPTER: &str = "chapter";
pub const CHAPTER_INFO: &str = "chapterinfo";
pub const JUZZAH: &str = "juzzah";
pub const LANGUAGES: &str = "languages";
pub const RECITATIONS: &str = "recitations";
pub const TAFSIRAAT: &str = "tafsiraat";
pub const TRANSLATIONS: &str = "translations";
pub const VERSES: &str = "verses";
pub const VERSE: &str = "verse";
pub const VERSE_TAFSIR: &str = "verse_tafsir";

/// Every bucket the cached client reads or writes.
pub const BUCKET_LAYOUT: &[BucketSpec] = &[
    BucketSpec::new(CHAPTERS, &[CHAPTER, CHAPTER_INFO]),
    BucketSpec::new(JUZZAH, &[]),
    BucketSpec::new(LANGUAGES, &[]),
    BucketSpec::new(RECITATIONS, &[]),
    BucketSpec::new(TAFSIRAAT, &[]),
    BucketSpec::new(TRANSLATIONS, &[]),
    BucketSpec::new(VERSES, &[VERSE, VERSE_TAFSIR]),
];

pub const CHAPTERS_PATH: BucketPath<'static> = BucketPath::new(&[CHAPTERS]);
pub const CHAPTER_PATH: BucketPath<'static> = BucketPath::new(&[CHAPTERS, CHAPTER]);
pub const CHAPTER_INFO_PATH: BucketPath<'static> = BucketPath::new(&[CHAPTERS, CHAPTER_INFO]);
pub const JUZZAH_PATH: BucketPath<'static> = BucketPath::new(&[JUZZAH]);
pub const LANGUAGES_PATH: BucketPath<'static> = BucketPath::new(&[LANGUAGES]);
pub const RECITATIONS_PATH: BucketPath<'static> = BucketPath::new(&[RECITATIONS]);
pub const TAFSIRAAT_PATH: BucketPath<'static> = BucketPath::new(&[TAFSIRAAT]);
pub const TRANSLATIONS_PATH: BucketPath<'static> = BucketPath::new(&[TRANSLATIONS]);
pub const VERSES_PATH: BucketPath<'static> = BucketPath::new(&[VERSES]);
pub const VERSE_PATH: BucketPath<'static> = BucketPath::new(&[VERSES, VERSE]);
pub const VERSE_TAFSIR_PATH: BucketPath<'static> = BucketPath::new(&[VERSES, VERSE_TAFSIR]);

/// Key of the listing calls: the language filter, unset reading as `0`.
pub fn language_key(opts: &ReqOptions) -> CacheKey {
    CacheKey::scalar(opts.language_or_zero())
}

/// `<language>:<chapter>`
pub fn chapter_key(id: u32, opts: &ReqOptions) -> CacheKey {
    CacheKey::composite([opts.language_or_zero().to_string(), id.to_string()])
}

/// Same shape as [`chapter_key`], stored in its own bucket.
pub fn chapter_info_key(id: u32, opts: &ReqOptions) -> CacheKey {
    chapter_key(id, opts)
}

/// `<chapter>:<verse>`
pub fn verse_key(chapter_id: u32, verse_id: u32) -> CacheKey {
    CacheKey::composite([chapter_id.to_string(), verse_id.to_string()])
}

/// `<tafsir>:<chapter>:<verse>`, with an empty first part when no tafsir is selected.
pub fn verse_tafsir_key(chapter_id: u32, verse_id: u32, opts: &VerseTafsirOptions) -> CacheKey {
    let tafsir = opts.tafsir.map(|id| id.to_string()).unwrap_or_default();
    CacheKey::composite([tafsir, chapter_id.to_string(), verse_id.to_string()])
}

pub fn juzzah_key() -> CacheKey {
    CacheKey::scalar(JUZZAH)
}

#[derive(Serialize)]
struct VersesKey<'a> {
    options: &'a VersesOptions,
    chapter_id: u32,
}

/// Structured key of a verses listing.
///
/// Built from [`VersesOptions::normalized`], so unset-equivalent values
/// and the order or repetition of `media` and `translations` never change
/// the key.
pub fn verses_key(chapter_id: u32, opts: &VersesOptions) -> Result<CacheKey, Error> {
    let normalized = opts.normalized();
    CacheKey::structured(&VersesKey { options: &normalized, chapter_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_language_key_collapses_unset() {
        assert_eq!(language_key(&ReqOptions::default()), language_key(&ReqOptions::language(0)));
        assert_eq!(language_key(&ReqOptions::default()).as_bytes(), b"0");
        assert_eq!(language_key(&ReqOptions::language(38)).as_bytes(), b"38");
    }

    #[test]
    fn test_composite_keys() {
        assert_eq!(chapter_key(1, &ReqOptions::default()).as_bytes(), b"0:1");
        assert_eq!(chapter_info_key(114, &ReqOptions::language(9)).as_bytes(), b"9:114");
        assert_eq!(verse_key(2, 255).as_bytes(), b"2:255");
        assert_eq!(juzzah_key().as_bytes(), b"juzzah");
    }

    #[test]
    fn test_verse_tafsir_key() {
        assert_eq!(verse_tafsir_key(1, 1, &VerseTafsirOptions::default()).as_bytes(), b":1:1");
        assert_eq!(verse_tafsir_key(1, 1, &VerseTafsirOptions::tafsir(169)).as_bytes(), b"169:1:1");
    }

    #[test]
    fn test_verses_key_includes_chapter() {
        let opts = VersesOptions::new().with_translations([131]);
        assert_ne!(verses_key(1, &opts).unwrap(), verses_key(2, &opts).unwrap());
    }

    #[test]
    fn test_verses_key_ignores_zero_and_empty_values() {
        let unset = verses_key(2, &VersesOptions::new()).unwrap();
        let zeroed = VersesOptions::new().with_page(0).with_recitation(0).with_limit(0).with_offset(0);
        assert_eq!(verses_key(2, &zeroed).unwrap(), unset);

        let empty = VersesOptions::new().with_language("").with_text_type("");
        assert_eq!(verses_key(2, &empty).unwrap(), unset);
    }

    #[test]
    fn test_verses_key_ignores_duplicate_ids() {
        let repeated = VersesOptions::new().with_translations([1, 2, 2]);
        let distinct = VersesOptions::new().with_translations([2, 1]);
        assert_eq!(verses_key(1, &repeated).unwrap(), verses_key(1, &distinct).unwrap());
    }

    #[test]
    fn test_verses_key_distinguishes_options() {
        let a = VersesOptions::new().with_page(1);
        let b = VersesOptions::new().with_page(2);
        assert_ne!(verses_key(1, &a).unwrap(), verses_key(1, &b).unwrap());
    }

    #[test]
    fn test_layout_covers_all_paths() {
        for path in [
            CHAPTERS_PATH,
            CHAPTER_PATH,
            CHAPTER_INFO_PATH,
            JUZZAH_PATH,
            LANGUAGES_PATH,
            RECITATIONS_PATH,
            TAFSIRAAT_PATH,
            TRANSLATIONS_PATH,
            VERSES_PATH,
            VERSE_PATH,
            VERSE_TAFSIR_PATH,
        ] {
            let segments = path.segments();
            let spec = BUCKET_LAYOUT.iter().find(|s| s.name == segments[0]);
            assert!(spec.is_some(), "missing top-level bucket for {path}");
            if let Some(child) = segments.get(1) {
                assert!(spec.unwrap().nested.contains(child), "missing nested bucket {path}");
            }
        }
    }

    proptest! {
        #[test]
        fn verses_key_ignores_set_order(
            chapter in 1u32..=114,
            mut translations in proptest::collection::vec(1u32..500, 0..8),
            mut media in proptest::collection::vec(1u32..50, 0..4),
            page in proptest::option::of(1u32..20),
        ) {
            let mut opts = VersesOptions { page, ..Default::default() }
                .with_translations(translations.clone())
                .with_media(media.clone());
            let first = verses_key(chapter, &opts).unwrap();

            translations.reverse();
            media.reverse();
            opts = opts.with_translations(translations).with_media(media);
            let second = verses_key(chapter, &opts).unwrap();

            prop_assert_eq!(first, second);
        }

        #[test]
        fn verses_key_is_deterministic(chapter in 1u32..=114, limit in proptest::option::of(1u32..50)) {
            let opts = VersesOptions { limit, ..Default::default() };
            prop_assert_eq!(verses_key(chapter, &opts).unwrap(), verses_key(chapter, &opts).unwrap());
        }
    }
}
