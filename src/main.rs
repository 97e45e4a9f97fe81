use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hlsp::{
    create_service, discover_settings, read_lossy, replace_in_file, resolve_language, restyle,
    Highlighter, Language, TerminalSurface, Theme,
};
use tower_lsp::Server;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the language server over stdin/stdout (the default).
    Serve,

    /// Print a file with syntax highlighting.
    Highlight {
        /// The input file.
        path: PathBuf,

        /// Language id, overriding detection.
        #[arg(short, long)]
        language: Option<String>,

        /// Built-in theme name ("light" or "dark"), overriding hlsp.toml.
        #[arg(short, long)]
        theme: Option<String>,

        /// When to emit colour escape sequences.
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// Replace every occurrence of a string in a file.
    Replace {
        /// The file to edit in place.
        path: PathBuf,
        /// Literal text to search for.
        find: String,
        /// Replacement text.
        replace: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

fn main() -> Result<()> {
    // stdout carries the LSP protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(serve());
            Ok(())
        }
        Command::Highlight {
            path,
            language,
            theme,
            color,
        } => highlight(&path, language.as_deref(), theme.as_deref(), color),
        Command::Replace {
            path,
            find,
            replace,
        } => replace_file(&path, &find, &replace),
    }
}

async fn serve() {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = create_service();
    Server::new(stdin, stdout, socket).serve(service).await;
}

/// Directory to start the settings search from for `path`.
fn settings_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

fn highlight(
    path: &Path,
    language: Option<&str>,
    theme: Option<&str>,
    color: ColorChoice,
) -> Result<()> {
    let text = read_lossy(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let (settings, _) = discover_settings(settings_dir(path));

    let language = match language {
        Some(id) => {
            Language::from_id(id).with_context(|| format!("unknown language '{}'", id))?
        }
        None => resolve_language(Some(path), None, &text, &settings),
    };
    let theme = match theme {
        Some(name) => {
            Theme::by_name(name).with_context(|| format!("unknown theme '{}'", name))?
        }
        None => settings.theme(),
    };

    let mut surface = TerminalSurface::new(text);
    let applied = restyle(&mut surface, &Highlighter::builtin(), language, &theme);
    tracing::debug!(path = %path.display(), language = language.id(), applied, "highlighted");

    let colored = match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal(),
    };
    let out = if colored {
        surface.render()
    } else {
        surface.render_plain().to_string()
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(out.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn replace_file(path: &Path, find: &str, replacement: &str) -> Result<()> {
    let count = replace_in_file(path, find, replacement)
        .with_context(|| format!("failed to replace in {}", path.display()))?;
    println!("{} replacement(s) in {}", count, path.display());
    Ok(())
}
