//! journal-prompts 命令行入口

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use journal_prompts_core::init_logging;
use journal_prompts_lib::commands::{
    affirmation_cmd, custom_prompt_cmd, favorites_cmd, preferences_cmd, prompt_cmd,
};
use journal_prompts_lib::{AppConfig, AppState};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "journal-prompts")]
#[command(about = "Journal prompt and affirmation generator")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.journal-prompts/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate journal prompts for a goal and journal type
    Generate {
        /// Journal goal (e.g. "Self-Reflection")
        #[arg(short, long)]
        goal: String,

        /// Journal type (e.g. "Gratitude Journal")
        #[arg(short = 't', long = "type", default_value = "Standard")]
        journal_type: String,

        /// Number of prompts (default from config)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Generate several rounds in a row
        #[arg(long, default_value = "1")]
        rounds: usize,

        /// Copy prompt N (1-based) of the last round to the clipboard
        #[arg(long, value_name = "N")]
        copy: Option<usize>,

        /// Favorite prompt N (1-based) of the last round
        #[arg(long, value_name = "N")]
        favorite: Option<usize>,
    },

    /// List journal goals and types
    Catalog {
        /// Reload the dataset first (also resets repeat avoidance)
        #[arg(long)]
        reload: bool,
    },

    /// Generate an affirmation
    Affirm {
        /// Category (self-love, health, career, ...)
        #[arg(short, long, default_value = "self-love")]
        category: String,

        /// Personalize with a name
        #[arg(long)]
        name: Option<String>,

        /// Save to affirmation favorites
        #[arg(long)]
        save: bool,

        /// List the available categories instead
        #[arg(long, conflicts_with_all = ["name", "save"])]
        list: bool,
    },

    /// Manage favorite prompts
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Manage custom prompts
    Custom {
        #[command(subcommand)]
        action: CustomAction,
    },

    /// Show or change preferences
    Prefs {
        #[command(subcommand)]
        action: Option<PrefsAction>,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorites
    List {
        /// Affirmation favorites instead of prompts
        #[arg(long)]
        affirmations: bool,
    },
    /// Add a prompt to favorites
    Add { text: String },
    /// Add a prompt if it is not a favorite, otherwise remove it
    Toggle { text: String },
    /// Remove a favorite (prompt text, or record id with --affirmations)
    Remove {
        value: String,
        #[arg(long)]
        affirmations: bool,
    },
    /// Remove all favorites
    Clear {
        #[arg(long)]
        affirmations: bool,
    },
    /// Copy favorite N (1-based) to the clipboard
    Copy { index: usize },
}

#[derive(Subcommand)]
enum CustomAction {
    /// List custom prompts, newest first
    List,
    /// Create a custom prompt
    Create { text: String },
    /// Change the text of a custom prompt
    Update { id: String, text: String },
    /// Delete a custom prompt (and its favorite)
    Delete { id: String },
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Show preferences
    Show,
    /// Set reading voice (male / female)
    Voice { voice: String },
    /// Set language code
    Language { code: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    init_logging(&config.logger_config()).map_err(|e| anyhow!(e))?;

    let state = AppState::initialize(config).await?;
    let output = Output { json: cli.json };

    match cli.command {
        Commands::Generate {
            goal,
            journal_type,
            count,
            rounds,
            copy,
            favorite,
        } => {
            let cancel = CancellationToken::new();
            let ctrl_c = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    ctrl_c.cancel();
                }
            });

            let mut last = None;
            for _ in 0..rounds.max(1) {
                let request = prompt_cmd::GeneratePromptsRequest {
                    goal: goal.clone(),
                    journal_type: journal_type.clone(),
                    count,
                };
                let result = prompt_cmd::generate_prompts(&state, request, &cancel)
                    .await
                    .map_err(|e| anyhow!(e))?;
                output.prompts(&result)?;
                last = Some(result);
            }

            let Some(last) = last else {
                return Ok(());
            };
            if let Some(n) = favorite {
                let text = pick(&last.prompts, n)?;
                let added = favorites_cmd::add_favorite(&state, text.clone())
                    .map_err(|e| anyhow!(e))?;
                output.note(if added { "Added to favorites" } else { "Already a favorite" });
            }
            if let Some(n) = copy {
                let text = pick(&last.prompts, n)?;
                output.copied(state.clipboard.copy(&text));
            }
        }

        Commands::Catalog { reload } => {
            if reload {
                let ok = prompt_cmd::reload_dataset(&state)
                    .await
                    .map_err(|e| anyhow!(e))?;
                if !ok {
                    eprintln!("Dataset reload failed, using built-in fallback prompts");
                }
            }
            let catalog = prompt_cmd::get_catalog(&state)
                .await
                .map_err(|e| anyhow!(e))?;
            if output.json {
                output.print_json(&catalog)?;
            } else {
                println!("Goals:");
                for goal in &catalog.goals {
                    let types = catalog
                        .available
                        .get(&goal.value)
                        .map(|types| types.join(", "))
                        .unwrap_or_else(|| "Standard (fallback)".to_string());
                    println!("  {} {}  [{}]", goal.emoji, goal.value, types);
                }
                println!("Types:");
                for journal_type in &catalog.types {
                    println!("  {} {}", journal_type.emoji, journal_type.value);
                }
                if catalog.degraded {
                    println!("(using built-in fallback prompts)");
                }
            }
        }

        Commands::Affirm { list: true, .. } => {
            let categories = affirmation_cmd::list_affirmation_categories();
            if output.json {
                output.print_json(&categories)?;
            } else {
                for category in &categories {
                    println!("{}", category);
                }
            }
        }

        Commands::Affirm {
            category,
            name,
            save,
            ..
        } => {
            let result = affirmation_cmd::generate_affirmation(&state, category, name, save)
                .map_err(|e| anyhow!(e))?;
            if output.json {
                output.print_json(&result)?;
            } else {
                println!("{} {}", result.affirmation.emoji, result.affirmation.text);
                if let Some(id) = result.favorite_id {
                    println!("Saved ({})", id);
                }
            }
        }

        Commands::Favorites { action } => run_favorites(&state, &output, action)?,
        Commands::Custom { action } => run_custom(&state, &output, action)?,
        Commands::Prefs { action } => {
            let prefs = match action.unwrap_or(PrefsAction::Show) {
                PrefsAction::Show => preferences_cmd::get_preferences(&state),
                PrefsAction::Voice { voice } => preferences_cmd::set_voice(&state, voice),
                PrefsAction::Language { code } => preferences_cmd::set_language(&state, code),
            }
            .map_err(|e| anyhow!(e))?;
            if output.json {
                output.print_json(&prefs)?;
            } else {
                println!("voice: {}", prefs.voice);
                println!("language: {}", prefs.language);
            }
        }
    }

    Ok(())
}

fn run_favorites(state: &AppState, output: &Output, action: FavoritesAction) -> Result<()> {
    match action {
        FavoritesAction::List { affirmations: false } => {
            let favorites = favorites_cmd::list_favorites(state).map_err(|e| anyhow!(e))?;
            if output.json {
                output.print_json(&favorites)?;
            } else if favorites.is_empty() {
                println!("No favorites yet");
            } else {
                for (i, text) in favorites.iter().enumerate() {
                    println!("{:>3}. {}", i + 1, text);
                }
            }
        }
        FavoritesAction::List { affirmations: true } => {
            let records =
                favorites_cmd::list_affirmation_favorites(state).map_err(|e| anyhow!(e))?;
            if output.json {
                output.print_json(&records)?;
            } else if records.is_empty() {
                println!("No favorite affirmations yet");
            } else {
                for record in &records {
                    println!("{}  [{}] {}", record.id, record.category, record.text);
                }
            }
        }
        FavoritesAction::Add { text } => {
            let added = favorites_cmd::add_favorite(state, text).map_err(|e| anyhow!(e))?;
            output.note(if added { "Added to favorites" } else { "Already a favorite" });
        }
        FavoritesAction::Toggle { text } => {
            let favorited = favorites_cmd::toggle_favorite(state, text).map_err(|e| anyhow!(e))?;
            output.note(if favorited { "Added to favorites" } else { "Removed" });
        }
        FavoritesAction::Remove {
            value,
            affirmations,
        } => {
            let removed = if affirmations {
                favorites_cmd::remove_affirmation_favorite(state, value)
            } else {
                favorites_cmd::remove_favorite(state, value)
            }
            .map_err(|e| anyhow!(e))?;
            output.note(if removed { "Removed" } else { "Not a favorite" });
        }
        FavoritesAction::Clear { affirmations } => {
            if affirmations {
                favorites_cmd::clear_affirmation_favorites(state)
            } else {
                favorites_cmd::clear_favorites(state)
            }
            .map_err(|e| anyhow!(e))?;
            output.note("Favorites cleared");
        }
        FavoritesAction::Copy { index } => {
            let index = index
                .checked_sub(1)
                .ok_or_else(|| anyhow!("index starts at 1"))?;
            let copied = favorites_cmd::copy_favorite(state, index).map_err(|e| anyhow!(e))?;
            output.copied(copied);
        }
    }
    Ok(())
}

fn run_custom(state: &AppState, output: &Output, action: CustomAction) -> Result<()> {
    let prompt = match action {
        CustomAction::List => {
            let prompts = custom_prompt_cmd::list_custom_prompts(state).map_err(|e| anyhow!(e))?;
            if output.json {
                output.print_json(&prompts)?;
            } else if prompts.is_empty() {
                println!("No custom prompts yet");
            } else {
                for prompt in &prompts {
                    println!("{}  {}  {}", prompt.id, format_time(prompt.created_at), prompt.text);
                }
            }
            return Ok(());
        }
        CustomAction::Create { text } => custom_prompt_cmd::create_custom_prompt(state, text),
        CustomAction::Update { id, text } => custom_prompt_cmd::update_custom_prompt(state, id, text),
        CustomAction::Delete { id } => custom_prompt_cmd::delete_custom_prompt(state, id),
    }
    .map_err(|e| anyhow!(e))?;

    if output.json {
        output.print_json(&prompt)?;
    } else {
        println!("{}  {}", prompt.id, prompt.text);
    }
    Ok(())
}

/// 取第 n 条（从 1 开始）
fn pick(prompts: &[prompt_cmd::PromptCard], n: usize) -> Result<String> {
    n.checked_sub(1)
        .and_then(|i| prompts.get(i))
        .map(|card| card.text.clone())
        .ok_or_else(|| anyhow!("prompt #{} does not exist", n))
}

fn format_time(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}

struct Output {
    json: bool,
}

impl Output {
    fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn prompts(&self, result: &prompt_cmd::GeneratedPrompts) -> Result<()> {
        if self.json {
            return self.print_json(result);
        }
        println!("{} {} · {}", result.emoji, result.goal, result.journal_type);
        for (i, card) in result.prompts.iter().enumerate() {
            let mark = if card.is_favorite { "★" } else { " " };
            println!("{} {}. {}", mark, i + 1, card.text);
        }
        println!();
        Ok(())
    }

    fn note(&self, message: &str) {
        if !self.json {
            println!("{}", message);
        }
    }

    fn copied(&self, ok: bool) {
        if ok {
            self.note("Copied to clipboard");
        } else {
            eprintln!("Clipboard is not available");
        }
    }
}
