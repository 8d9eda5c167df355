mod cli;

use clap::Parser;
use console::style;

use cli::commands::{self, ls::LsArgs};
use cli::{Cli, Commands};
use fpath::watcher::WatchOptions;
use fpath::{LoadOptions, Settings};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{} configuration: {e}", style("error:").red().bold());
            std::process::exit(2);
        }
    };

    fpath::logging::init_with_config(&settings.logging);

    if let Err(e) = run(cli.command, &settings).await {
        eprintln!("{} {e:#}", style("error:").red().bold());
        std::process::exit(1);
    }
}

async fn run(command: Commands, settings: &Settings) -> anyhow::Result<()> {
    match command {
        Commands::Info { path } => commands::info::run(&path),
        Commands::Ls {
            dir,
            all,
            recursive,
            glob,
            find,
        } => commands::ls::run(
            &dir,
            LsArgs {
                all,
                recursive,
                glob,
                find,
            },
        ),
        Commands::Kv {
            file,
            sep,
            unquote,
            expand,
            json,
        } => {
            let mut options = LoadOptions::from(&settings.kv);
            if let Some(sep) = sep {
                options.separator = sep;
            }
            options.unquote |= unquote;
            options.expand_vars |= expand;
            commands::kv::run(&file, &options, json)
        }
        Commands::Fetch { url, target } => commands::fetch::run(url, target).await,
        Commands::Watch {
            dir,
            patterns,
            no_recursive,
        } => {
            let mut options = WatchOptions::from(&settings.watch);
            if no_recursive {
                options.recursive = false;
            }
            commands::watch::run(&dir, &patterns, &options).await
        }
        Commands::Init { force } => commands::init::run_init(force),
        Commands::Config => commands::init::run_config(settings),
    }
}
