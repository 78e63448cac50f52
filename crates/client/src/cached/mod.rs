//! Read-through cache decorator.
//!
//! [`CachedClient`] wraps any [`QuranApi`] and serves repeated calls from a
//! [`BucketStore`]. Each operation maps to one bucket and a key derived from
//! its arguments (see [`keys`]).
//!
//! Per call:
//!
//! 1. Look the key up. A stored value that decodes is returned as is.
//! 2. Anything else (absent, undecodable, unreadable) falls through to the
//!    wrapped API with the original arguments. Its errors are returned
//!    unchanged and nothing is written.
//! 3. A successful result is written back before it is returned. Write
//!    failures are logged and dropped.
//!
//! Entries never expire. Search is never cached.

pub mod keys;

use std::future::Future;

use async_trait::async_trait;
use quranc_core::cache::{CacheKey, decode_value, encode_value};
use quranc_core::{BucketPath, BucketStore, CacheDb, Error};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::QuranApi;
use crate::error::ApiError;
use crate::request::{ReqOptions, SearchRequest, VerseTafsirOptions, VersesOptions};
use crate::types::{
    Chapter, ChapterInfo, Juz, Language, Recitation, SearchResponse, Tafsir, Translation, Verse, VerseTafsir,
};
use keys::BUCKET_LAYOUT;

/// A [`QuranApi`] that caches the results of the API it wraps.
#[derive(Debug, Clone)]
pub struct CachedClient<A, S = CacheDb> {
    next: A,
    store: S,
}

impl<A: QuranApi, S: BucketStore> CachedClient<A, S> {
    /// Wrap `next`, caching into `store`.
    ///
    /// Creates every bucket the decorator uses if it is missing. Existing
    /// buckets and their entries are kept.
    ///
    /// # Errors
    ///
    /// Returns the store error if any bucket cannot be created; no
    /// partially initialized client is handed out.
    pub async fn new(next: A, store: S) -> Result<Self, Error> {
        store.ensure_buckets(BUCKET_LAYOUT).await?;
        tracing::debug!(buckets = BUCKET_LAYOUT.len(), "cache buckets ready");
        Ok(Self { next, store })
    }

    /// The store entries are read from and written to.
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn lookup<T: DeserializeOwned>(&self, path: BucketPath<'_>, key: &CacheKey) -> Result<T, Error> {
        let bytes = self.store.get(path, key.as_bytes()).await?;
        decode_value(bytes.as_deref(), key)
    }

    async fn persist<T: Serialize + Sync>(&self, path: BucketPath<'_>, key: &CacheKey, value: &T) -> Result<(), Error> {
        let bytes = encode_value(value)?;
        self.store.put(path, key.as_bytes(), &bytes).await
    }

    /// Serve `key` from `path`, or await `fetch` and store its result.
    ///
    /// A key that could not be derived skips the cache for this call.
    async fn read_through<T, F>(&self, path: BucketPath<'_>, key: Result<CacheKey, Error>, fetch: F) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: Future<Output = Result<T, ApiError>> + Send,
    {
        let key = match key {
            Ok(key) => key,
            Err(e) => {
                tracing::debug!(bucket = %path, "cache key unavailable, fetching directly: {}", e);
                return fetch.await;
            }
        };

        match self.lookup::<T>(path, &key).await {
            Ok(value) => {
                tracing::debug!(bucket = %path, %key, "cache hit");
                return Ok(value);
            }
            Err(e) if e.is_miss() => tracing::debug!(bucket = %path, %key, "cache miss: {}", e),
            Err(e) => tracing::warn!(bucket = %path, %key, "cache read failed, fetching: {}", e),
        }

        let value = fetch.await?;

        if let Err(e) = self.persist(path, &key, &value).await {
            tracing::warn!(bucket = %path, %key, "failed to cache result: {}", e);
        }
        Ok(value)
    }
}

#[async_trait]
impl<A: QuranApi, S: BucketStore> QuranApi for CachedClient<A, S> {
    async fn recitations(&self, opts: &ReqOptions) -> Result<Vec<Recitation>, ApiError> {
        self.read_through(keys::RECITATIONS_PATH, Ok(keys::language_key(opts)), self.next.recitations(opts))
            .await
    }

    async fn translations(&self, opts: &ReqOptions) -> Result<Vec<Translation>, ApiError> {
        self.read_through(keys::TRANSLATIONS_PATH, Ok(keys::language_key(opts)), self.next.translations(opts))
            .await
    }

    async fn languages(&self, opts: &ReqOptions) -> Result<Vec<Language>, ApiError> {
        self.read_through(keys::LANGUAGES_PATH, Ok(keys::language_key(opts)), self.next.languages(opts))
            .await
    }

    async fn tafsiraat(&self, opts: &ReqOptions) -> Result<Vec<Tafsir>, ApiError> {
        self.read_through(keys::TAFSIRAAT_PATH, Ok(keys::language_key(opts)), self.next.tafsiraat(opts))
            .await
    }

    async fn chapters(&self, opts: &ReqOptions) -> Result<Vec<Chapter>, ApiError> {
        self.read_through(keys::CHAPTERS_PATH, Ok(keys::language_key(opts)), self.next.chapters(opts))
            .await
    }

    async fn chapter(&self, id: u32, opts: &ReqOptions) -> Result<Chapter, ApiError> {
        self.read_through(keys::CHAPTER_PATH, Ok(keys::chapter_key(id, opts)), self.next.chapter(id, opts))
            .await
    }

    async fn chapter_info(&self, id: u32, opts: &ReqOptions) -> Result<ChapterInfo, ApiError> {
        let key = keys::chapter_info_key(id, opts);
        self.read_through(keys::CHAPTER_INFO_PATH, Ok(key), self.next.chapter_info(id, opts))
            .await
    }

    async fn verses(&self, chapter_id: u32, opts: &VersesOptions) -> Result<Vec<Verse>, ApiError> {
        let key = keys::verses_key(chapter_id, opts);
        self.read_through(keys::VERSES_PATH, key, self.next.verses(chapter_id, opts))
            .await
    }

    async fn verse(&self, chapter_id: u32, verse_id: u32) -> Result<Verse, ApiError> {
        let key = keys::verse_key(chapter_id, verse_id);
        self.read_through(keys::VERSE_PATH, Ok(key), self.next.verse(chapter_id, verse_id))
            .await
    }

    async fn juzzah(&self) -> Result<Vec<Juz>, ApiError> {
        self.read_through(keys::JUZZAH_PATH, Ok(keys::juzzah_key()), self.next.juzzah())
            .await
    }

    async fn verse_tafsir(
        &self, chapter_id: u32, verse_id: u32, opts: &VerseTafsirOptions,
    ) -> Result<Vec<VerseTafsir>, ApiError> {
        let key = keys::verse_tafsir_key(chapter_id, verse_id, opts);
        self.read_through(keys::VERSE_TAFSIR_PATH, Ok(key), self.next.verse_tafsir(chapter_id, verse_id, opts))
            .await
    }

    async fn search(&self, query: &SearchRequest) -> Result<SearchResponse, ApiError> {
        self.next.search(query).await
    }
}
