//! Request option types and their query-string encoding.

use serde::Serialize;

use crate::ApiError;

/// Options shared by the listing and single-chapter calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReqOptions {
    /// Restrict translated fields to this language id.
    ///
    /// `None` and `Some(0)` both mean "no filter".
    pub language_id: Option<u32>,
}

impl ReqOptions {
    pub fn language(id: u32) -> Self {
        Self { language_id: Some(id) }
    }

    /// Language filter as sent upstream; an unset filter reads as `0`.
    pub fn language_or_zero(&self) -> u32 {
        self.language_id.unwrap_or(0)
    }

    pub(crate) fn query_params(&self) -> Vec<(&'static str, String)> {
        match self.language_id {
            Some(id) if id > 0 => vec![("language", id.to_string())],
            _ => Vec::new(),
        }
    }
}

/// Options for listing the verses of a chapter.
///
/// `media` and `translations` are sets: their order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersesOptions {
    /// ISO code of the language for translated fields.
    pub language: Option<String>,
    pub recitation: Option<u32>,
    pub text_type: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub media: Vec<u32>,
    pub translations: Vec<u32>,
}

impl VersesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(mut self, iso_code: impl Into<String>) -> Self {
        self.language = Some(iso_code.into());
        self
    }

    pub fn with_recitation(mut self, recitation: u32) -> Self {
        self.recitation = Some(recitation);
        self
    }

    pub fn with_text_type(mut self, text_type: impl Into<String>) -> Self {
        self.text_type = Some(text_type.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_media(mut self, media: impl IntoIterator<Item = u32>) -> Self {
        self.media = media.into_iter().collect();
        self
    }

    pub fn with_translations(mut self, translations: impl IntoIterator<Item = u32>) -> Self {
        self.translations = translations.into_iter().collect();
        self
    }

    /// Canonical copy of these options.
    ///
    /// Zero numbers and empty strings become `None`, the same as they are
    /// treated upstream, and `media` and `translations` are sorted with
    /// duplicates removed. Two option sets that produce the same request
    /// normalize to equal values.
    pub fn normalized(&self) -> Self {
        let positive = |value: Option<u32>| value.filter(|v| *v > 0);
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

        let mut media = self.media.clone();
        media.sort_unstable();
        media.dedup();
        let mut translations = self.translations.clone();
        translations.sort_unstable();
        translations.dedup();

        Self {
            language: non_empty(&self.language),
            recitation: positive(self.recitation),
            text_type: non_empty(&self.text_type),
            page: positive(self.page),
            limit: positive(self.limit),
            offset: positive(self.offset),
            media,
            translations,
        }
    }

    pub(crate) fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(language) = self.language.as_deref().filter(|l| !l.is_empty()) {
            params.push(("language", language.to_string()));
        }
        if let Some(recitation) = self.recitation.filter(|r| *r > 0) {
            params.push(("recitation", recitation.to_string()));
        }
        if let Some(text_type) = self.text_type.as_deref().filter(|t| !t.is_empty()) {
            params.push(("text_type", text_type.to_string()));
        }
        if let Some(page) = self.page.filter(|p| *p > 0) {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset.filter(|o| *o > 0) {
            params.push(("offset", offset.to_string()));
        }
        params.extend(self.media.iter().map(|m| ("media[]", m.to_string())));
        params.extend(self.translations.iter().map(|t| ("translations[]", t.to_string())));

        params
    }
}

/// Options for a verse's tafsir lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerseTafsirOptions {
    /// Only return this tafsir.
    pub tafsir: Option<u32>,
}

impl VerseTafsirOptions {
    pub fn tafsir(id: u32) -> Self {
        Self { tafsir: Some(id) }
    }

    pub(crate) fn query_params(&self) -> Vec<(&'static str, String)> {
        self.tafsir
            .map(|id| vec![("tafsirs", id.to_string())])
            .unwrap_or_default()
    }
}

/// Full-text search parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    /// Search text (required).
    pub query: String,
    /// ISO code of the result language.
    pub language: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), ..Default::default() }
    }

    /// Validate the search request parameters.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.query.trim().is_empty() {
            return Err(ApiError::InvalidQuery("no query param provided".to_string()));
        }
        Ok(())
    }

    pub(crate) fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", self.query.clone())];
        if let Some(language) = self.language.as_deref().filter(|l| !l.is_empty()) {
            params.push(("language", language.to_string()));
        }
        if let Some(page) = self.page.filter(|p| *p > 0) {
            params.push(("page", page.to_string()));
        }
        if let Some(size) = self.size.filter(|s| *s > 0) {
            params.push(("size", size.to_string()));
        }
        params
    }
}
