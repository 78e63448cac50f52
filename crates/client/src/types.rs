//! Content types returned by the Quran content API.
//!
//! These are plain data carriers. Every struct tolerates missing fields
//! (`#[serde(default)]`) because the upstream API omits fields freely
//! depending on the options a request carries.

use serde::{Deserialize, Serialize};

/// A recitation (reciter and style) available for audio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recitation {
    pub id: u32,
    pub style: Option<String>,
    pub reciter_name_eng: String,
    pub reciter_name_translated: String,
}

/// A translation resource. Its id selects translations in verse queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Translation {
    pub id: u32,
    pub author_name: String,
    pub language_name: String,
    pub name: String,
    pub slug: Option<String>,
}

/// A name together with the language it is given in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatedName {
    pub language_name: String,
    pub name: String,
}

/// A language known to the API.
///
/// `id` filters other calls through [`ReqOptions`](crate::ReqOptions);
/// `iso_code` is what verse and search queries take.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub id: u32,
    pub name: String,
    pub iso_code: String,
    pub native_name: String,
    pub direction: String,
    pub translated_names: Vec<TranslatedName>,
}

/// A tafsir (commentary) overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tafsir {
    pub id: u32,
    pub author_name: String,
    pub slug: Option<String>,
    pub name: String,
    pub language_name: String,
}

/// First and last mushaf page of a chapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pages {
    pub start: u32,
    pub end: u32,
}

/// A chapter (surah) and its summary metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chapter {
    pub id: u32,
    pub chapter_number: u32,
    pub bismillah_pre: bool,
    pub revelation_order: u32,
    pub revelation_place: String,
    pub name_complex: String,
    pub name_arabic: String,
    pub name_simple: String,
    pub verses_count: u32,
    pub pages: Pages,
    pub translated_name: TranslatedName,
}

/// Long-form introduction to a chapter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChapterInfo {
    pub chapter_id: u32,
    pub text: String,
    pub source: String,
    pub short_text: String,
    pub language_name: String,
}

/// A translated or transliterated text attached to a verse or word.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    pub id: u32,
    pub language_name: String,
    pub text: String,
    pub resource_name: Option<String>,
    pub resource_id: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerseAudio {
    pub url: String,
    pub duration: u32,
    pub segments: Vec<Vec<String>>,
    pub format: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaContent {
    pub url: String,
    pub embed_text: String,
    pub provider: String,
    pub author_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordAudio {
    pub url: Option<String>,
}

/// A single word of a verse, with rendering codes and per-word resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Word {
    pub id: Option<u32>,
    pub position: u32,
    pub text_madani: Option<String>,
    pub text_indopak: Option<String>,
    pub text_simple: Option<String>,
    pub verse_key: String,
    pub class_name: String,
    pub line_number: u32,
    pub page_number: u32,
    pub code: String,
    pub code_v3: String,
    pub char_type: String,
    pub audio: Option<WordAudio>,
    pub translation: Option<Resource>,
    pub transliteration: Option<Resource>,
}

/// A verse (ayah) with whatever extras the request asked for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Verse {
    pub id: u32,
    pub verse_number: u32,
    pub chapter_id: u32,
    pub verse_key: String,
    pub text_madani: String,
    pub text_indopak: String,
    pub text_simple: String,
    pub juz_number: u32,
    pub hizb_number: u32,
    pub rub_number: u32,
    pub sajdah: Option<String>,
    pub sajdah_number: Option<u32>,
    pub page_number: u32,
    pub audio: Option<VerseAudio>,
    pub translations: Vec<Resource>,
    pub media_contents: Vec<MediaContent>,
    pub words: Vec<Word>,
}

/// One of the thirty juz divisions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Juz {
    pub id: u32,
    pub juz_number: u32,
    /// Verse ranges covered, ordered by chapter.
    pub verse_mapping: Vec<JuzMapping>,
}

/// A contiguous verse range of one chapter inside a juz.
///
/// Values that could not be parsed from the API are `-1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JuzMapping {
    pub chapter_id: i32,
    pub start_verse: i32,
    pub end_verse: i32,
}

/// Tafsir text for one verse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerseTafsir {
    pub id: u32,
    pub text: String,
    pub verse_id: u32,
    pub language_name: String,
    pub resource_name: String,
    /// Returned by the API without a documented shape.
    pub verse_key: Option<serde_json::Value>,
}

/// One page of full-text search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub query: String,
    pub total_count: u32,
    pub took: u32,
    pub current_page: u32,
    pub total_pages: u32,
    pub per_page: u32,
    pub results: Vec<SearchVerse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchVerse {
    pub id: u32,
    pub verse_number: u32,
    pub chapter_id: u32,
    pub verse_key: String,
    pub text_madani: String,
    pub words: Vec<Word>,
    pub translations: Vec<Resource>,
}
