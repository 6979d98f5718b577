//! # Kalam CLI (`kalam`)
//!
//! Every reading route of the reader is a subcommand: the chapter, section
//! and page indexes, the three reading views, the single-verse view and the
//! bookmark list.
//!
//! ## Usage
//!
//! ```bash
//! kalam --config ./config/kalam.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `kalam init` | Create the SQLite database |
//! | `kalam surahs` | Chapter index (`--search` filters by name) |
//! | `kalam surah <id>` | Read a chapter |
//! | `kalam juzs` | Section index |
//! | `kalam juz <id>` | Read a section |
//! | `kalam pages` | Page index |
//! | `kalam page <id>` | Read a page |
//! | `kalam ayah <surah> <ayah>` | One verse with its translation |
//! | `kalam bookmarks list` | Saved verses, most recent first |
//! | `kalam bookmarks toggle <key>` | Star or unstar a verse |
//! | `kalam bookmarks remove <key>` | Delete a bookmark |
//! | `kalam bookmarks clear --yes` | Delete every bookmark |
//!
//! ## Examples
//!
//! ```bash
//! # Read Al-Fatiha with the English translation
//! kalam surah 1 --lang en
//!
//! # Recite section 30 from its fifth verse
//! kalam juz 30 --play --from 5
//!
//! # Save Ayat al-Kursi
//! kalam bookmarks toggle surah:2:255
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use kalam::batch::BatchPlan;
use kalam::config::{self, Config};
use kalam::player::{self, AudioSink, CommandSink, PlaybackEnd, PrintSink};
use kalam::progress::ProgressMode;
use kalam::provider::{AudioClip, ContentProvider};
use kalam::sqlite_store::SqliteBookmarkStore;
use kalam::views::{self, ReadingController, VerseController};
use kalam::{migrate, render};
use kalam_core::bookmarks::Toggled;
use kalam_core::edition::{find_language, languages_for};
use kalam_core::error::ViewError;
use kalam_core::models::{BookmarkKey, ReadingView};
use kalam_core::route::UnitKind;
use kalam_core::store::BookmarkStore;

/// Kalam: read, recite and bookmark the Quran from the terminal.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/kalam.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "kalam",
    about = "Kalam: read, recite and bookmark the Quran from the terminal",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/kalam.toml`. Built-in defaults are used when
    /// the file does not exist.
    #[arg(long, global = true, default_value = "./config/kalam.toml")]
    config: PathBuf,

    /// Index loading progress on stderr: off, human or json.
    ///
    /// Defaults to human when stderr is a terminal, otherwise off.
    #[arg(long, global = true)]
    progress: Option<ProgressMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the bookmark database. Idempotent.
    Init,

    /// List all 114 chapters.
    Surahs {
        /// Keep chapters whose Latin name (case-insensitive) or Arabic
        /// name contains this text.
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Read a chapter (1-114).
    Surah {
        id: String,
        #[command(flatten)]
        read: ReadArgs,
    },

    /// List all 30 sections with their first chapter.
    Juzs {
        #[arg(long)]
        json: bool,
    },

    /// Read a section (1-30).
    Juz {
        id: String,
        #[command(flatten)]
        read: ReadArgs,
    },

    /// List the pages of the standard printed layout.
    Pages {
        /// Only load the first N pages.
        #[arg(long)]
        limit: Option<u16>,

        #[arg(long)]
        json: bool,
    },

    /// Read a page (1-604).
    Page {
        id: String,
        #[command(flatten)]
        read: ReadArgs,
    },

    /// Show one verse with its Indonesian translation.
    Ayah {
        surah: String,
        ayah: String,

        /// Recite the verse.
        #[arg(long)]
        play: bool,

        #[arg(long)]
        json: bool,
    },

    /// Manage saved verses.
    Bookmarks {
        #[command(subcommand)]
        action: BookmarkAction,
    },
}

#[derive(Args)]
struct ReadArgs {
    /// Show a translation next to each verse (e.g. en, id, fr, tr, ur).
    #[arg(long)]
    lang: Option<String>,

    /// Recite every verse in order after printing the view.
    #[arg(long)]
    play: bool,

    /// Start recitation at this verse position (1-based) instead of the
    /// first.
    #[arg(long, requires = "play")]
    from: Option<usize>,

    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum BookmarkAction {
    /// Show the saved list, most recent first.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Star or unstar a verse: `surah:<chapter>:<verse>` or
    /// `juz:<section>:<global verse>`.
    Toggle { key: String },
    /// Delete one bookmark.
    Remove { key: String },
    /// Delete every bookmark.
    Clear {
        /// Confirm clearing the whole list.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let cfg = config::load_or_default(&cli.config)?;
    let progress = cli.progress.unwrap_or_else(ProgressMode::default_for_tty);

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!(
                "Database initialized successfully at {}.",
                cfg.storage.path.display()
            );
        }
        Commands::Surahs { search, json } => {
            let provider = ContentProvider::from_config(&cfg)?;
            let chapters = views::index::chapter_index(&provider, search.as_deref())
                .await
                .unwrap_or_else(|e| exit_with(&e));
            print_model(chapters.as_slice(), json, render::chapter_index)?;
        }
        Commands::Juzs { json } => {
            let provider = ContentProvider::from_config(&cfg)?;
            let reporter = progress.reporter();
            let sections = views::index::section_index(
                &provider,
                BatchPlan::from(&cfg.index),
                reporter.as_ref(),
            )
            .await
            .unwrap_or_else(|e| exit_with(&e));
            print_model(sections.as_slice(), json, render::section_index)?;
        }
        Commands::Pages { limit, json } => {
            let provider = ContentProvider::from_config(&cfg)?;
            let reporter = progress.reporter();
            let pages = views::index::page_index(
                &provider,
                BatchPlan::from(&cfg.index),
                reporter.as_ref(),
                limit,
            )
            .await
            .unwrap_or_else(|e| exit_with(&e));
            print_model(pages.as_slice(), json, render::page_index)?;
        }
        Commands::Surah { id, read } => read_unit(&cfg, UnitKind::Chapter, &id, read).await?,
        Commands::Juz { id, read } => read_unit(&cfg, UnitKind::Section, &id, read).await?,
        Commands::Page { id, read } => read_unit(&cfg, UnitKind::Page, &id, read).await?,
        Commands::Ayah {
            surah,
            ayah,
            play,
            json,
        } => {
            let provider = ContentProvider::from_config(&cfg)?;
            let store = SqliteBookmarkStore::open(&cfg).await?;
            let saved = store.load().await?;
            store.close().await;

            let mut controller = VerseController::new(&provider);
            if let Some(e) = controller.activate(&surah, &ayah, &saved).await.error() {
                exit_with(e);
            }
            if let Some(detail) = controller.state().model() {
                print_model(detail, json, render::verse_detail)?;
            }
            if play {
                let clips: Vec<AudioClip> = controller.clip().into_iter().collect();
                recite(&cfg, &clips, 0, |_| {}).await?;
            }
        }
        Commands::Bookmarks { action } => bookmarks(&cfg, action).await?,
    }

    Ok(())
}

async fn read_unit(cfg: &Config, kind: UnitKind, id: &str, args: ReadArgs) -> Result<()> {
    let provider = ContentProvider::from_config(cfg)?;
    let store = SqliteBookmarkStore::open(cfg).await?;
    let saved = store.load().await?;
    store.close().await;

    let mut controller = ReadingController::new(&provider, kind);
    if let Some(e) = controller.activate(id, &saved).await.error() {
        exit_with(e);
    }
    let Some(unit) = controller.unit() else {
        bail!("nothing was loaded for {}", id);
    };

    if let Some(code) = args.lang.as_deref() {
        let Some(language) = find_language(unit, code) else {
            let codes: Vec<&str> = languages_for(unit).iter().map(|l| l.code).collect();
            bail!(
                "unknown translation language '{}' for {}: expected one of {}",
                code,
                unit.label(),
                codes.join(", ")
            );
        };
        if let Err(e) = controller.show_translation(language).await {
            log::warn!("translation unavailable: {}", e);
            eprintln!(
                "Could not load the {} translation; showing the original text only.",
                language.name
            );
        }
    }

    let Some(view) = controller.state().model() else {
        bail!("nothing was loaded for {}", unit.label());
    };
    print_model(view, args.json, render::reading_view)?;

    if args.play {
        let clips = controller.playlist();
        let start = args.from.unwrap_or(1);
        if start == 0 || start > clips.len() {
            exit_with(&ViewError::InvalidParameter {
                kind: "start position",
                value: start.to_string(),
                min: 1,
                max: clips.len() as u32,
            });
        }
        recite(cfg, &clips, start - 1, |i| announce(view, i)).await?;
    }
    Ok(())
}

fn announce(view: &ReadingView, index: usize) {
    if let Some(verse) = view.verses.get(index) {
        eprintln!("▶ {}:{}", verse.chapter.number, verse.number);
    }
}

/// Play `clips` through the configured player until done or Ctrl-C.
async fn recite(
    cfg: &Config,
    clips: &[AudioClip],
    start: usize,
    on_verse: impl FnMut(usize),
) -> Result<()> {
    let mut sink: Box<dyn AudioSink> = match &cfg.audio.player {
        Some(command) => Box::new(CommandSink::new(command)?),
        None => Box::new(PrintSink),
    };
    let stop = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    let report = player::play_all(sink.as_mut(), clips, start, on_verse, stop).await?;
    match report.end {
        PlaybackEnd::Completed => eprintln!("Recitation finished ({} verses).", report.played),
        PlaybackEnd::Stopped => eprintln!("Recitation stopped."),
        PlaybackEnd::Failed { .. } => {}
    }
    Ok(())
}

async fn bookmarks(cfg: &Config, action: BookmarkAction) -> Result<()> {
    let store = SqliteBookmarkStore::open(cfg).await?;
    match action {
        BookmarkAction::List { json } => {
            let view = views::bookmarks::list(&store).await?;
            print_model(&view, json, render::bookmark_list)?;
        }
        BookmarkAction::Toggle { key } => {
            let key: BookmarkKey = key.parse()?;
            let provider = ContentProvider::from_config(cfg)?;
            let outcome = views::bookmarks::toggle_key(&provider, &store, key)
                .await
                .with_context(|| format!("Failed to toggle bookmark {}", key))?;
            match outcome {
                Toggled::Added => println!("Saved {}.", key),
                Toggled::Removed => println!("Removed {}.", key),
            }
        }
        BookmarkAction::Remove { key } => {
            let key: BookmarkKey = key.parse()?;
            if views::bookmarks::remove(&store, &key).await? {
                println!("Removed {}.", key);
            } else {
                println!("{} is not bookmarked.", key);
            }
        }
        BookmarkAction::Clear { yes } => {
            if !yes {
                bail!("refusing to clear every bookmark without --yes");
            }
            views::bookmarks::clear(&store).await?;
            println!("All bookmarks cleared.");
        }
    }
    store.close().await;
    Ok(())
}

fn print_model<T: serde::Serialize + ?Sized>(
    model: &T,
    json: bool,
    text: impl Fn(&T) -> String,
) -> Result<()> {
    if json {
        println!("{}", render::json(model)?);
    } else {
        print!("{}", text(model));
    }
    Ok(())
}

/// Print a view error with a retry hint and exit non-zero.
fn exit_with(e: &ViewError) -> ! {
    eprintln!("Error: {}", e);
    if e.is_retryable() {
        eprintln!("Check your connection and run the command again to retry.");
    }
    std::process::exit(1);
}
