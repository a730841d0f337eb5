use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use plcredits::{cli, config, error, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Collect credits for a playlist and export them as CSV
    Analyze(AnalyzeOptions),

    /// Serve the web form
    Serve(ServeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeOptions {
    /// Spotify playlist URL, URI or id
    pub playlist_url: String,

    /// Directory for the CSV reports (default: current directory)
    #[clap(long)]
    pub out_dir: Option<PathBuf>,

    /// Only print the summary table
    #[clap(long)]
    pub no_export: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Open the form in the default browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        warning!("Cannot load {}. Err: {}", config::env_path().display(), e);
    }

    let settings = match config::Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };

    match cli.command {
        Command::Analyze(opt) => {
            cli::analyze(&settings, opt.playlist_url, opt.out_dir, opt.no_export).await
        }
        Command::Serve(opt) => cli::serve(settings, opt.open).await,
        Command::Completions(_) => {}
    }
}
