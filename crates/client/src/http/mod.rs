//! HTTP implementation of the content API.
//!
//! ### Endpoints
//!
//! All paths are relative to `{host}/api/v3`:
//!
//! - `/options/{recitations,translations,languages,tafsirs}`
//! - `/chapters`, `/chapters/{id}`, `/chapters/{id}/info`
//! - `/chapters/{id}/verses`, `/chapters/{id}/verses/{verse}`
//! - `/chapters/{id}/verses/{verse}/tafsirs`
//! - `/juzs`, `/search`
//!
//! ### Normalization
//!
//! - Envelope objects are unwrapped
//! - Translations, languages and tafsirs are ordered by id, chapters by number
//! - Chapter page ranges and juz verse ranges become typed structs

mod response;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use quranc_core::AppConfig;
use reqwest::header;
use serde::de::DeserializeOwned;

use crate::api::QuranApi;
use crate::error::ApiError;
use crate::request::{ReqOptions, SearchRequest, VerseTafsirOptions, VersesOptions};
use crate::types::{
    Chapter, ChapterInfo, Juz, Language, Recitation, SearchResponse, Tafsir, Translation, Verse, VerseTafsir,
};
use response::{
    ChapterEnvelope, ChapterInfoEnvelope, ChaptersEnvelope, JuzsEnvelope, LanguagesEnvelope, RecitationsEnvelope,
    TafsirsEnvelope, TranslationsEnvelope, VerseEnvelope, VerseTafsirsEnvelope, VersesEnvelope,
};

/// Default API host.
const DEFAULT_HOST: &str = "https://api.quran.com";

/// Path prefix of the versioned API.
const API_PREFIX: &str = "/api/v3";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = concat!("quranc/", env!("CARGO_PKG_VERSION"));

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API host (default: https://api.quran.com).
    pub host: String,
    /// Request timeout (default: 15s).
    pub timeout: Duration,
    /// User-agent string (default: quranc/0.x).
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&AppConfig> for ClientConfig {
    fn from(config: &AppConfig) -> Self {
        Self { host: config.host.clone(), timeout: config.timeout(), user_agent: config.user_agent.clone() }
    }
}

/// Content API client over HTTP.
#[derive(Debug, Clone)]
pub struct QuranClient {
    http: reqwest::Client,
    base_url: String,
}

impl QuranClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let host = url::Url::parse(&config.host).map_err(|e| ApiError::InvalidHost(format!("{}: {e}", config.host)))?;
        if !matches!(host.scheme(), "http" | "https") {
            return Err(ApiError::InvalidHost(format!("unsupported scheme: {}", host.scheme())));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;

        let base_url = format!("{}{API_PREFIX}", config.host.trim_end_matches('/'));
        Ok(Self { http, base_url })
    }

    /// Base URL every request path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with `query` and decode a JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiError> {
        let start = Instant::now();
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(%url, ?query, "requesting content API");

        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "content API returned error status");
            return Err(ApiError::HttpError { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        let decoded = serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(format!("{path}: {e}")))?;

        tracing::debug!(%url, elapsed = ?start.elapsed(), bytes = bytes.len(), "content API request completed");
        Ok(decoded)
    }
}

#[async_trait]
impl QuranApi for QuranClient {
    async fn recitations(&self, opts: &ReqOptions) -> Result<Vec<Recitation>, ApiError> {
        let resp: RecitationsEnvelope = self.get_json("/options/recitations", &opts.query_params()).await?;
        Ok(resp.recitations)
    }

    async fn translations(&self, opts: &ReqOptions) -> Result<Vec<Translation>, ApiError> {
        let mut resp: TranslationsEnvelope = self.get_json("/options/translations", &opts.query_params()).await?;
        resp.translations.sort_by_key(|t| t.id);
        Ok(resp.translations)
    }

    async fn languages(&self, opts: &ReqOptions) -> Result<Vec<Language>, ApiError> {
        let mut resp: LanguagesEnvelope = self.get_json("/options/languages", &opts.query_params()).await?;
        resp.languages.sort_by_key(|l| l.id);
        Ok(resp.languages)
    }

    async fn tafsiraat(&self, opts: &ReqOptions) -> Result<Vec<Tafsir>, ApiError> {
        let mut resp: TafsirsEnvelope = self.get_json("/options/tafsirs", &opts.query_params()).await?;
        resp.tafsirs.sort_by_key(|t| t.id);
        Ok(resp.tafsirs)
    }

    async fn chapters(&self, opts: &ReqOptions) -> Result<Vec<Chapter>, ApiError> {
        let resp: ChaptersEnvelope = self.get_json("/chapters", &opts.query_params()).await?;
        let mut chapters: Vec<Chapter> = resp.chapters.into_iter().map(Chapter::from).collect();
        chapters.sort_by_key(|c| c.chapter_number);
        Ok(chapters)
    }

    async fn chapter(&self, id: u32, opts: &ReqOptions) -> Result<Chapter, ApiError> {
        let resp: ChapterEnvelope = self.get_json(&format!("/chapters/{id}"), &opts.query_params()).await?;
        Ok(resp.chapter.into())
    }

    async fn chapter_info(&self, id: u32, opts: &ReqOptions) -> Result<ChapterInfo, ApiError> {
        let resp: ChapterInfoEnvelope = self.get_json(&format!("/chapters/{id}/info"), &opts.query_params()).await?;
        Ok(resp.chapter_info)
    }

    async fn verses(&self, chapter_id: u32, opts: &VersesOptions) -> Result<Vec<Verse>, ApiError> {
        let resp: VersesEnvelope =
            self.get_json(&format!("/chapters/{chapter_id}/verses"), &opts.query_params()).await?;
        Ok(resp.verses)
    }

    async fn verse(&self, chapter_id: u32, verse_id: u32) -> Result<Verse, ApiError> {
        let resp: VerseEnvelope = self.get_json(&format!("/chapters/{chapter_id}/verses/{verse_id}"), &[]).await?;
        Ok(resp.verse)
    }

    async fn juzzah(&self) -> Result<Vec<Juz>, ApiError> {
        let resp: JuzsEnvelope = self.get_json("/juzs", &[]).await?;
        Ok(resp.juzs.into_iter().map(Juz::from).collect())
    }

    async fn verse_tafsir(
        &self, chapter_id: u32, verse_id: u32, opts: &VerseTafsirOptions,
    ) -> Result<Vec<VerseTafsir>, ApiError> {
        let path = format!("/chapters/{chapter_id}/verses/{verse_id}/tafsirs");
        let resp: VerseTafsirsEnvelope = self.get_json(&path, &opts.query_params()).await?;
        Ok(resp.tafsirs)
    }

    async fn search(&self, query: &SearchRequest) -> Result<SearchResponse, ApiError> {
        query.validate()?;
        self.get_json("/search", &query.query_params()).await
    }
}
