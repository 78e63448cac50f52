//! The content API capability set.
//!
//! [`QuranClient`](crate::QuranClient) implements it over HTTP and
//! [`CachedClient`](crate::CachedClient) implements it by wrapping another
//! implementation, so decorators stack by plain wrapping:
//!
//! ```ignore
//! let http = QuranClient::new(ClientConfig::default())?;
//! let api = CachedClient::new(http, CacheDb::open("cache.sqlite").await?).await?;
//! let chapter = api.chapter(1, &ReqOptions::default()).await?;
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::ApiError;
use crate::request::{ReqOptions, SearchRequest, VerseTafsirOptions, VersesOptions};
use crate::types::{
    Chapter, ChapterInfo, Juz, Language, Recitation, SearchResponse, Tafsir, Translation, Verse, VerseTafsir,
};

/// Query operations over the Quran content catalog.
#[async_trait]
pub trait QuranApi: Send + Sync {
    /// All available recitations.
    async fn recitations(&self, opts: &ReqOptions) -> Result<Vec<Recitation>, ApiError>;

    /// All available translations, ordered by id.
    async fn translations(&self, opts: &ReqOptions) -> Result<Vec<Translation>, ApiError>;

    /// All available languages, ordered by id.
    async fn languages(&self, opts: &ReqOptions) -> Result<Vec<Language>, ApiError>;

    /// All available tafsirs, ordered by id.
    async fn tafsiraat(&self, opts: &ReqOptions) -> Result<Vec<Tafsir>, ApiError>;

    /// All chapters, ordered by chapter number.
    async fn chapters(&self, opts: &ReqOptions) -> Result<Vec<Chapter>, ApiError>;

    async fn chapter(&self, id: u32, opts: &ReqOptions) -> Result<Chapter, ApiError>;

    async fn chapter_info(&self, id: u32, opts: &ReqOptions) -> Result<ChapterInfo, ApiError>;

    /// One page of a chapter's verses.
    async fn verses(&self, chapter_id: u32, opts: &VersesOptions) -> Result<Vec<Verse>, ApiError>;

    async fn verse(&self, chapter_id: u32, verse_id: u32) -> Result<Verse, ApiError>;

    /// The thirty juz divisions.
    async fn juzzah(&self) -> Result<Vec<Juz>, ApiError>;

    async fn verse_tafsir(
        &self, chapter_id: u32, verse_id: u32, opts: &VerseTafsirOptions,
    ) -> Result<Vec<VerseTafsir>, ApiError>;

    /// Full-text search.
    async fn search(&self, query: &SearchRequest) -> Result<SearchResponse, ApiError>;
}

#[async_trait]
impl<T: QuranApi + ?Sized> QuranApi for Arc<T> {
    async fn recitations(&self, opts: &ReqOptions) -> Result<Vec<Recitation>, ApiError> {
        (**self).recitations(opts).await
    }

    async fn translations(&self, opts: &ReqOptions) -> Result<Vec<Translation>, ApiError> {
        (**self).translations(opts).await
    }

    async fn languages(&self, opts: &ReqOptions) -> Result<Vec<Language>, ApiError> {
        (**self).languages(opts).await
    }

    async fn tafsiraat(&self, opts: &ReqOptions) -> Result<Vec<Tafsir>, ApiError> {
        (**self).tafsiraat(opts).await
    }

    async fn chapters(&self, opts: &ReqOptions) -> Result<Vec<Chapter>, ApiError> {
        (**self).chapters(opts).await
    }

    async fn chapter(&self, id: u32, opts: &ReqOptions) -> Result<Chapter, ApiError> {
        (**self).chapter(id, opts).await
    }

    async fn chapter_info(&self, id: u32, opts: &ReqOptions) -> Result<ChapterInfo, ApiError> {
        (**self).chapter_info(id, opts).await
    }

    async fn verses(&self, chapter_id: u32, opts: &VersesOptions) -> Result<Vec<Verse>, ApiError> {
        (**self).verses(chapter_id, opts).await
    }

    async fn verse(&self, chapter_id: u32, verse_id: u32) -> Result<Verse, ApiError> {
        (**self).verse(chapter_id, verse_id).await
    }

    async fn juzzah(&self) -> Result<Vec<Juz>, ApiError> {
        (**self).juzzah().await
    }

    async fn verse_tafsir(
        &self, chapter_id: u32, verse_id: u32, opts: &VerseTafsirOptions,
    ) -> Result<Vec<VerseTafsir>, ApiError> {
        (**self).verse_tafsir(chapter_id, verse_id, opts).await
    }

    async fn search(&self, query: &SearchRequest) -> Result<SearchResponse, ApiError> {
        (**self).search(query).await
    }
}

#[async_trait]
impl<T: QuranApi + ?Sized> QuranApi for Box<T> {
    async fn recitations(&self, opts: &ReqOptions) -> Result<Vec<Recitation>, ApiError> {
        (**self).recitations(opts).await
    }

    async fn translations(&self, opts: &ReqOptions) -> Result<Vec<Translation>, ApiError> {
        (**self).translations(opts).await
    }

    async fn languages(&self, opts: &ReqOptions) -> Result<Vec<Language>, ApiError> {
        (**self).languages(opts).await
    }

    async fn tafsiraat(&self, opts: &ReqOptions) -> Result<Vec<Tafsir>, ApiError> {
        (**self).tafsiraat(opts).await
    }

    async fn chapters(&self, opts: &ReqOptions) -> Result<Vec<Chapter>, ApiError> {
        (**self).chapters(opts).await
    }

    async fn chapter(&self, id: u32, opts: &ReqOptions) -> Result<Chapter, ApiError> {
        (**self).chapter(id, opts).await
    }

    async fn chapter_info(&self, id: u32, opts: &ReqOptions) -> Result<ChapterInfo, ApiError> {
        (**self).chapter_info(id, opts).await
    }

    async fn verses(&self, chapter_id: u32, opts: &VersesOptions) -> Result<Vec<Verse>, ApiError> {
        (**self).verses(chapter_id, opts).await
    }

    async fn verse(&self, chapter_id: u32, verse_id: u32) -> Result<Verse, ApiError> {
        (**self).verse(chapter_id, verse_id).await
    }

    async fn juzzah(&self) -> Result<Vec<Juz>, ApiError> {
        (**self).juzzah().await
    }

    async fn verse_tafsir(
        &self, chapter_id: u32, verse_id: u32, opts: &VerseTafsirOptions,
    ) -> Result<Vec<VerseTafsir>, ApiError> {
        (**self).verse_tafsir(chapter_id, verse_id, opts).await
    }

    async fn search(&self, query: &SearchRequest) -> Result<SearchResponse, ApiError> {
        (**self).search(query).await
    }
}

/// Run `call`, giving up with `ApiError::Cancelled` after `limit`.
///
/// Giving up drops the in-flight call, which aborts any pending upstream
/// request. Cache writes that already committed stay committed.
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::debug!(?limit, "call cancelled after deadline");
            Err(ApiError::Cancelled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_timeout_passes_result() {
        let result = with_timeout(Duration::from_secs(1), async { Ok::<_, ApiError>(7) }).await;
        assert_eq!(result.unwrap(), 7);

        let result =
            with_timeout(Duration::from_secs(1), async { Err::<u32, _>(ApiError::HttpError { status: 500 }) }).await;
        assert!(matches!(result, Err(ApiError::HttpError { status: 500 })));
    }

    #[tokio::test]
    async fn test_with_timeout_cancels() {
        let result = with_timeout(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, ApiError>(())
        })
        .await;
        assert!(matches!(result, Err(ApiError::Cancelled)));
    }
}
