//! Client code for quranc.
//!
//! This crate provides the content API capability set ([`QuranApi`]), its
//! HTTP implementation ([`QuranClient`]) and the read-through cache
//! decorator ([`CachedClient`]) that can wrap any implementation of it.

pub mod api;
pub mod cached;
pub mod error;
pub mod http;
pub mod request;
pub mod types;

pub use api::{QuranApi, with_timeout};
pub use cached::CachedClient;
pub use error::ApiError;
pub use http::{ClientConfig, QuranClient};
pub use request::{ReqOptions, SearchRequest, VerseTafsirOptions, VersesOptions};
pub use types::{
    Chapter, ChapterInfo, Juz, JuzMapping, Language, MediaContent, Pages, Recitation, Resource, SearchResponse,
    SearchVerse, Tafsir, TranslatedName, Translation, Verse, VerseAudio, VerseTafsir, Word, WordAudio,
};
