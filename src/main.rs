mod app;
mod clipboard;
mod config;
mod duration;
mod logging;
mod storage;
mod system;
mod theme;
mod tui;

use anyhow::Result;
use app::App;
use clap::{Parser, Subcommand};
use clipboard::{Clipboard, Osc52Clipboard};
use crossterm::tty::IsTty;
use duration::{format_duration, is_sentinel};
use std::io;
use std::path::PathBuf;
use storage::Storage;
use system::{DetectedScheme, SystemScheme};
use theme::{Theme, ThemeController};

#[derive(Parser)]
#[command(name = "upfmt")]
#[command(about = "Turn a count of seconds into a readable duration", long_about = None)]
struct Cli {
    /// Directory for config, preferences and logs (defaults to ~/.upfmt)
    #[arg(long, global = true, env = "UPFMT_HOME")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive formatter
    Start,
    /// Format a number of seconds and print it
    Format {
        /// Seconds to format (e.g. 3661)
        #[arg(allow_negative_numbers = true)]
        input: String,
        /// Also copy the result to the clipboard
        #[arg(short, long)]
        copy: bool,
    },
    /// Show or change the stored theme preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the stored preference and the theme in effect
    Show,
    /// Flip between light and dark
    Toggle,
    /// Store an explicit theme
    Set {
        #[arg(value_enum)]
        theme: Theme,
    },
    /// Forget the stored theme and follow the system again
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let base_dir = Storage::get_base_dir(cli.data_dir.as_deref())?;
    let config = config::load_config(&base_dir)?;
    logging::init_tracing(&base_dir, &config.log_level)?;

    let themes = ThemeController::new(Storage::new(&base_dir));
    let system = DetectedScheme;

    match cli.command {
        Commands::Start => {
            let clipboard = Osc52Clipboard::new(io::stdout());
            let mut app = App::new(
                themes,
                clipboard,
                system.prefers_dark(),
                config.copied_flash()?,
            )?;
            tracing::info!(theme = %app.theme, "starting interactive session");

            tui::run_tui(&mut app, &system, config.scheme_poll()?)?;
        }
        Commands::Format { input, copy } => {
            let formatted = format_duration(&input);
            println!("{}", formatted);
            if is_sentinel(&formatted) {
                tracing::warn!(input = %input, "rejected input");
            }

            if copy && !formatted.trim().is_empty() && io::stdout().is_tty() {
                if let Err(e) = Osc52Clipboard::new(io::stdout()).write_text(&formatted) {
                    tracing::debug!(error = %e, "clipboard write failed");
                }
            }
        }
        Commands::Theme { action } => {
            let system_dark = system.prefers_dark();
            match action {
                ThemeAction::Show => {}
                ThemeAction::Toggle => {
                    themes.toggle(system_dark)?;
                }
                ThemeAction::Set { theme } => themes.set_stored(Some(theme))?,
                ThemeAction::Reset => themes.set_stored(None)?,
            }

            let stored = themes
                .stored()?
                .map_or("system".to_string(), |t| t.to_string());
            println!("Preference: {}", stored);
            println!("Effective:  {}", themes.effective(system_dark)?);
        }
    }

    Ok(())
}
