//! Command-line surface for `quranc`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use quranc_client::{SearchRequest, VerseTafsirOptions, VersesOptions};
use quranc_core::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "quranc", version, about = "Query the Quran content API", long_about = None)]
pub struct Cli {
    /// API host, e.g. <https://api.quran.com>
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Per-call deadline in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Cache database file
    #[arg(long, global = true)]
    pub db_path: Option<PathBuf>,

    /// Always query the API directly
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Language id for translated fields (0 for none)
    #[arg(long, global = true)]
    pub language_id: Option<u32>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Apply command-line overrides on top of loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.host.clone_from(host);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        if let Some(db_path) = &self.db_path {
            config.db_path.clone_from(db_path);
        }
        if self.no_cache {
            config.cache_enabled = false;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List recitations
    Recitations,
    /// List translations
    Translations,
    /// List languages
    Languages,
    /// List tafsirs
    Tafsirs,
    /// List chapters
    Chapters,
    /// Show one chapter
    Chapter { id: u32 },
    /// Show a chapter's introduction
    ChapterInfo { id: u32 },
    /// List the verses of a chapter
    Verses(VersesArgs),
    /// Show one verse
    Verse { chapter: u32, verse: u32 },
    /// List the juz divisions
    Juzs,
    /// Show tafsir for one verse
    VerseTafsir {
        chapter: u32,
        verse: u32,
        #[arg(long)]
        tafsir: Option<u32>,
    },
    /// Full-text search
    Search(SearchArgs),
}

#[derive(Args, Debug)]
pub struct VersesArgs {
    pub chapter: u32,
    /// ISO language code
    #[arg(long)]
    pub language: Option<String>,
    #[arg(long)]
    pub recitation: Option<u32>,
    #[arg(long)]
    pub text_type: Option<String>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub offset: Option<u32>,
    /// Media ids, comma separated
    #[arg(long, value_delimiter = ',')]
    pub media: Vec<u32>,
    /// Translation ids, comma separated
    #[arg(long, value_delimiter = ',')]
    pub translations: Vec<u32>,
}

impl From<&VersesArgs> for VersesOptions {
    fn from(args: &VersesArgs) -> Self {
        VersesOptions {
            language: args.language.clone(),
            recitation: args.recitation,
            text_type: args.text_type.clone(),
            page: args.page,
            limit: args.limit,
            offset: args.offset,
            media: args.media.clone(),
            translations: args.translations.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    pub query: String,
    /// ISO language code
    #[arg(long)]
    pub language: Option<String>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub size: Option<u32>,
}

impl From<&SearchArgs> for SearchRequest {
    fn from(args: &SearchArgs) -> Self {
        SearchRequest { query: args.query.clone(), language: args.language.clone(), page: args.page, size: args.size }
    }
}

pub fn tafsir_options(tafsir: Option<u32>) -> VerseTafsirOptions {
    VerseTafsirOptions { tafsir }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chapter() {
        let cli = Cli::try_parse_from(["quranc", "chapter", "1", "--language-id", "9"]).unwrap();
        assert!(matches!(cli.command, Command::Chapter { id: 1 }));
        assert_eq!(cli.language_id, Some(9));
        assert!(!cli.no_cache);
    }

    #[test]
    fn test_parse_verses_lists() {
        let cli = Cli::try_parse_from(["quranc", "verses", "2", "--translations", "3,1,2", "--media", "5", "--page", "2"])
            .unwrap();
        let Command::Verses(args) = &cli.command else { panic!("expected verses") };

        let opts = VersesOptions::from(args);
        assert_eq!(args.chapter, 2);
        assert_eq!(opts.translations, vec![3, 1, 2]);
        assert_eq!(opts.media, vec![5]);
        assert_eq!(opts.page, Some(2));
    }

    #[test]
    fn test_parse_verse_tafsir() {
        let cli = Cli::try_parse_from(["quranc", "verse-tafsir", "1", "1", "--tafsir", "169"]).unwrap();
        let Command::VerseTafsir { chapter, verse, tafsir } = cli.command else { panic!("expected verse-tafsir") };
        assert_eq!((chapter, verse), (1, 1));
        assert_eq!(tafsir_options(tafsir), VerseTafsirOptions::tafsir(169));
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from(["quranc", "search", "mercy", "--size", "5"]).unwrap();
        let Command::Search(args) = &cli.command else { panic!("expected search") };
        let req = SearchRequest::from(args);
        assert_eq!(req.query, "mercy");
        assert_eq!(req.size, Some(5));
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(Cli::try_parse_from(["quranc"]).is_err());
    }

    #[test]
    fn test_overrides_applied() {
        let cli = Cli::try_parse_from([
            "quranc",
            "--host",
            "http://localhost:9000",
            "--timeout-ms",
            "500",
            "--db-path",
            "/tmp/q.sqlite",
            "--no-cache",
            "juzs",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.host, "http://localhost:9000");
        assert_eq!(config.timeout_ms, 500);
        assert_eq!(config.db_path, PathBuf::from("/tmp/q.sqlite"));
        assert!(!config.cache_enabled);
    }

    #[test]
    fn test_flags_replace_invalid_loaded_values() {
        let cli = Cli::try_parse_from(["quranc", "--timeout-ms", "500", "juzs"]).unwrap();

        let mut config = AppConfig { timeout_ms: 5, ..Default::default() };
        assert!(config.validate().is_err());
        cli.apply(&mut config);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["quranc", "languages", "--no-cache"]).unwrap();
        assert!(cli.no_cache);
    }
}
