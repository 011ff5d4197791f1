//! cursorchats - Entry Point

use clap::Parser;
use cursorchats::config::{self, CliOverrides, ResolvedConfig};
use cursorchats::model::{AppError, DumpError};
use cursorchats::render::{BlobRenderer, VALID_THEMES};
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Columns reserved for the dump prefix when sizing byte-dump rows.
const TERMINAL_WIDTH_RESERVE: u16 = 9;

/// cursorchats - dump Cursor chat stores as readable text
#[derive(Parser, Debug)]
#[command(name = "cursorchats")]
#[command(version)]
#[command(about = "Dump the SQLite chat stores written by Cursor as readable text")]
pub struct Args {
    /// Directory containing chat *.db files [default: $HOME/.cursor/chats]
    #[arg(long)]
    pub chats_dir: Option<PathBuf>,

    /// Write output to file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Colorize roles and syntax-highlight JSON and expanded text
    #[arg(long)]
    pub color: bool,

    /// Color theme for syntax highlighting
    #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(VALID_THEMES.iter().copied()))]
    pub theme: Option<String>,

    /// Append the wire-format structure of binary blobs
    #[arg(long)]
    pub wire: bool,

    /// Bytes per byte-dump row (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            chats_dir: self.chats_dir.clone(),
            color: self.color,
            theme: self.theme.clone(),
            wire_structure: self.wire,
            byte_dump_width: self.width.map(|w| w as usize),
        }
    }
}

/// Byte-dump width that fills a terminal `columns` wide, kept even.
fn terminal_byte_dump_width(columns: u16) -> Option<usize> {
    (columns > TERMINAL_WIDTH_RESERVE)
        .then(|| usize::from(columns - TERMINAL_WIDTH_RESERVE) & !1)
        .filter(|&w| w > 0)
}

/// Defaults → Config File → Env Vars → CLI Args
fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    let config_file = config::load_config_with_precedence(args.config.clone())?;
    let merged = config::merge_config(config_file);
    let with_env = config::apply_env_overrides(merged);
    let resolved = config::apply_cli_overrides(with_env, args.cli_overrides());
    resolved.validate()?;
    Ok(resolved)
}

fn run(args: Args) -> Result<(), AppError> {
    let mut config = resolve_config(&args)?;

    cursorchats::logging::init(&config.log_file_path)?;

    let stdout = io::stdout();
    if args.output.is_none() && config.byte_dump_width.is_none() && stdout.is_terminal() {
        if let Ok((columns, _rows)) = crossterm::terminal::size() {
            config.byte_dump_width = terminal_byte_dump_width(columns);
        }
    }

    info!(config = ?config, "Configuration loaded and resolved");

    let renderer = BlobRenderer::new(config.to_render_options());

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| AppError::Output {
                path: path.clone(),
                source,
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(stdout.lock())),
    };

    match cursorchats::dump_all(&config.chats_dir, &mut out, &renderer) {
        Ok(_) => Ok(()),
        // Reader went away (`cursorchats | head`).
        Err(DumpError::Write(err)) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "dump failed");
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["cursorchats", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["cursorchats", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["cursorchats"]);
        assert_eq!(args.chats_dir, None);
        assert_eq!(args.output, None);
        assert!(!args.color);
        assert_eq!(args.theme, None);
        assert!(!args.wire);
        assert_eq!(args.width, None);
        assert_eq!(args.config, None);
        assert_eq!(args.cli_overrides(), CliOverrides::default());
    }

    #[test]
    fn test_output_short_and_long() {
        let short = Args::parse_from(["cursorchats", "-o", "dump.txt"]);
        let long = Args::parse_from(["cursorchats", "--output", "dump.txt"]);
        assert_eq!(short.output, Some(PathBuf::from("dump.txt")));
        assert_eq!(long.output, short.output);
    }

    #[test]
    fn test_chats_dir_flag() {
        let args = Args::parse_from(["cursorchats", "--chats-dir", "/tmp/chats"]);
        assert_eq!(args.chats_dir, Some(PathBuf::from("/tmp/chats")));
    }

    #[test]
    fn test_theme_valid() {
        let args = Args::parse_from(["cursorchats", "--theme", "solarized-dark"]);
        assert_eq!(args.theme.as_deref(), Some("solarized-dark"));
    }

    #[test]
    fn test_theme_invalid_rejects() {
        let result = Args::try_parse_from(["cursorchats", "--theme", "invalid-theme"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_width_rejects_zero() {
        let result = Args::try_parse_from(["cursorchats", "--width", "0"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_combined_flags_become_overrides() {
        let args = Args::parse_from([
            "cursorchats",
            "--chats-dir",
            "/c",
            "--color",
            "--theme",
            "nord",
            "--wire",
            "--width",
            "32",
        ]);
        assert_eq!(
            args.cli_overrides(),
            CliOverrides {
                chats_dir: Some(PathBuf::from("/c")),
                color: true,
                theme: Some("nord".to_string()),
                wire_structure: true,
                byte_dump_width: Some(32),
            }
        );
    }

    #[test]
    fn test_terminal_width_is_even_and_reserves_prefix() {
        assert_eq!(terminal_byte_dump_width(80), Some(70));
        assert_eq!(terminal_byte_dump_width(81), Some(72));
        assert_eq!(terminal_byte_dump_width(12), Some(2));
    }

    #[test]
    fn test_narrow_terminal_keeps_default_width() {
        assert_eq!(terminal_byte_dump_width(9), None);
        assert_eq!(terminal_byte_dump_width(10), None);
        assert_eq!(terminal_byte_dump_width(0), None);
    }

    #[test]
    fn test_theme_flows_through_config_precedence_chain() {
        use cursorchats::config::{apply_cli_overrides, apply_env_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            theme: Some("solarized-dark".to_string()),
            ..ConfigFile::default()
        };

        let merged = merge_config(Some(config_file));
        assert_eq!(merged.theme, "solarized-dark");

        let args = Args::parse_from(["cursorchats", "--theme", "monokai"]);
        let with_cli = apply_cli_overrides(apply_env_overrides(merged), args.cli_overrides());
        assert_eq!(
            with_cli.theme, "monokai",
            "CLI theme should override all other sources"
        );
    }
}
