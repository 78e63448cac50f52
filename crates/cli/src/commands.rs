//! Subcommand dispatch.

use std::time::Duration;

use anyhow::Result;
use quranc_client::{QuranApi, ReqOptions, SearchRequest, VersesOptions, with_timeout};
use serde::Serialize;

use crate::args::{Command, tafsir_options};

/// Run `command` against `api`, printing the result as pretty JSON.
///
/// Every call is abandoned after `deadline`.
pub async fn run<A: QuranApi + ?Sized>(api: &A, command: &Command, opts: ReqOptions, deadline: Duration) -> Result<()> {
    tracing::debug!(?command, ?opts, "running command");

    match command {
        Command::Recitations => print_json(&with_timeout(deadline, api.recitations(&opts)).await?),
        Command::Translations => print_json(&with_timeout(deadline, api.translations(&opts)).await?),
        Command::Languages => print_json(&with_timeout(deadline, api.languages(&opts)).await?),
        Command::Tafsirs => print_json(&with_timeout(deadline, api.tafsiraat(&opts)).await?),
        Command::Chapters => print_json(&with_timeout(deadline, api.chapters(&opts)).await?),
        Command::Chapter { id } => print_json(&with_timeout(deadline, api.chapter(*id, &opts)).await?),
        Command::ChapterInfo { id } => print_json(&with_timeout(deadline, api.chapter_info(*id, &opts)).await?),
        Command::Verses(args) => {
            let verses = VersesOptions::from(args);
            print_json(&with_timeout(deadline, api.verses(args.chapter, &verses)).await?)
        }
        Command::Verse { chapter, verse } => print_json(&with_timeout(deadline, api.verse(*chapter, *verse)).await?),
        Command::Juzs => print_json(&with_timeout(deadline, api.juzzah()).await?),
        Command::VerseTafsir { chapter, verse, tafsir } => {
            let tafsir = tafsir_options(*tafsir);
            print_json(&with_timeout(deadline, api.verse_tafsir(*chapter, *verse, &tafsir)).await?)
        }
        Command::Search(args) => {
            let query = SearchRequest::from(args);
            print_json(&with_timeout(deadline, api.search(&query)).await?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}
