//! Raw response envelopes and their normalization.
//!
//! The API wraps every payload in a single-field object and uses a few
//! shapes that are awkward to consume directly (page ranges as arrays,
//! juz verse ranges as `"start-end"` strings). These types mirror the wire
//! format; the public types in [`crate::types`] are what callers see.

use std::collections::HashMap;

use serde::Deserialize;

use crate::types::{
    Chapter, ChapterInfo, Juz, JuzMapping, Language, Pages, Recitation, Tafsir, TranslatedName, Translation, Verse,
    VerseTafsir,
};

#[derive(Debug, Deserialize)]
pub(crate) struct RecitationsEnvelope {
    #[serde(default)]
    pub recitations: Vec<Recitation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TranslationsEnvelope {
    #[serde(default)]
    pub translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LanguagesEnvelope {
    #[serde(default)]
    pub languages: Vec<Language>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TafsirsEnvelope {
    #[serde(default)]
    pub tafsirs: Vec<Tafsir>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChaptersEnvelope {
    #[serde(default)]
    pub chapters: Vec<ApiChapter>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChapterEnvelope {
    pub chapter: ApiChapter,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChapterInfoEnvelope {
    pub chapter_info: ChapterInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VersesEnvelope {
    #[serde(default)]
    pub verses: Vec<Verse>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerseEnvelope {
    pub verse: Verse,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JuzsEnvelope {
    #[serde(default)]
    pub juzs: Vec<ApiJuz>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerseTafsirsEnvelope {
    #[serde(default)]
    pub tafsirs: Vec<VerseTafsir>,
}

/// Chapter as sent by the API, with `pages` as `[start, end]`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiChapter {
    pub id: u32,
    pub chapter_number: u32,
    pub bismillah_pre: bool,
    pub revelation_order: u32,
    pub revelation_place: String,
    pub name_complex: String,
    pub name_arabic: String,
    pub name_simple: String,
    pub verses_count: u32,
    pub pages: Vec<u32>,
    pub translated_name: TranslatedName,
}

impl From<ApiChapter> for Chapter {
    fn from(ch: ApiChapter) -> Self {
        let page = |idx: usize| ch.pages.get(idx).copied().unwrap_or(0);
        let pages = Pages { start: page(0), end: page(1) };

        Chapter {
            id: ch.id,
            chapter_number: ch.chapter_number,
            bismillah_pre: ch.bismillah_pre,
            revelation_order: ch.revelation_order,
            revelation_place: ch.revelation_place,
            name_complex: ch.name_complex,
            name_arabic: ch.name_arabic,
            name_simple: ch.name_simple,
            verses_count: ch.verses_count,
            pages,
            translated_name: ch.translated_name,
        }
    }
}

/// Juz as sent by the API, with `verse_mapping` as `{"chapter": "start-end"}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiJuz {
    pub id: u32,
    pub juz_number: u32,
    pub verse_mapping: HashMap<String, String>,
}

fn parse_or_sentinel(s: &str) -> i32 {
    s.trim().parse().unwrap_or(-1)
}

impl From<ApiJuz> for Juz {
    fn from(juz: ApiJuz) -> Self {
        let mut verse_mapping: Vec<JuzMapping> = juz
            .verse_mapping
            .iter()
            .filter_map(|(chapter, range)| {
                let (start, end) = range.split_once('-')?;
                if end.contains('-') {
                    return None;
                }
                Some(JuzMapping {
                    chapter_id: parse_or_sentinel(chapter),
                    start_verse: parse_or_sentinel(start),
                    end_verse: parse_or_sentinel(end),
                })
            })
            .collect();
        verse_mapping.sort_by_key(|m| (m.chapter_id, m.start_verse));

        Juz { id: juz.id, juz_number: juz.juz_number, verse_mapping }
    }
}
