//! CLI argument parsing using clap.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

#[derive(Parser)]
#[command(
    name = "fpath",
    version = env!("CARGO_PKG_VERSION"),
    about = "Inspect paths, load key-value files and watch directories",
    next_line_help = true,
    styles = clap_cargo_style()
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show what fpath knows about a path
    #[command(after_help = "Examples:\n  fpath info '$HOME/.bashrc'\n  fpath info src/lib.rs")]
    Info {
        /// Path to inspect; environment variables are expanded
        path: String,
    },

    /// List a directory
    #[command(
        after_help = "Examples:\n  fpath ls\n  fpath ls static --glob '*.css'\n  fpath ls logs --find '^app-[0-9]+\\.log$'\n  fpath ls . --recursive --all"
    )]
    Ls {
        /// Directory to list
        #[arg(default_value = ".")]
        dir: String,

        /// Include hidden entries
        #[arg(short, long)]
        all: bool,

        /// Walk subdirectories too
        #[arg(short, long, conflicts_with_all = ["glob", "find"])]
        recursive: bool,

        /// Only entries matching a shell glob (may contain `/`)
        #[arg(short, long, conflicts_with = "find")]
        glob: Option<String>,

        /// Only direct children whose name matches a regex
        #[arg(short, long)]
        find: Option<String>,
    },

    /// Load a key-value file
    #[command(
        after_help = "Defaults come from the [kv] section of the settings file.\n\nExamples:\n  fpath kv app.conf\n  fpath kv /etc/passwd --sep :\n  fpath kv .env --unquote --expand --json"
    )]
    Kv {
        /// File to load
        file: String,

        /// Separator between key and value
        #[arg(short, long)]
        sep: Option<String>,

        /// Interpret quoted values as string literals
        #[arg(short, long)]
        unquote: bool,

        /// Expand ${NAME} from earlier keys and the environment
        #[arg(short, long)]
        expand: bool,

        /// Print as a JSON object
        #[arg(long)]
        json: bool,
    },

    /// Download a URL unless the target already exists
    Fetch {
        url: String,

        /// Target file; defaults to the URL's last element
        target: Option<String>,
    },

    /// Print changes to files matching glob patterns until interrupted
    #[command(after_help = "Examples:\n  fpath watch static '*.css' '*.js'\n  fpath watch . '*' --no-recursive")]
    Watch {
        /// Directory to watch
        dir: String,

        /// Patterns matched against the changed file's name
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Only watch the directory itself
        #[arg(long)]
        no_recursive: bool,
    },

    /// Set up .fpath directory with default configuration
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Display active settings
    Config,
}
