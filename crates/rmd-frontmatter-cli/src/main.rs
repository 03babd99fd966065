//! rmdfm: CLI tool to inspect and edit R Markdown output options

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{CONFIG_FILE_NAME, Config};
use rmd_frontmatter::{FrontMatter, OutputOptions};

#[derive(Parser, Debug)]
#[command(name = "rmdfm")]
#[command(about = "Inspect and edit the output options of R Markdown front matter")]
#[command(version)]
#[command(after_help = "Front matter is read as JSON (use - for stdin).

Examples:
  rmdfm formats doc.json                                  # List output formats
  rmdfm get doc.json html_document                        # Print options of one format
  rmdfm set doc.json pdf_document '{\"toc\": true}'         # Print the updated record
  rmdfm set doc.json pdf_document default --in-place      # Update doc.json
  rmdfm init                                              # Create _rmdfm.toml")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (default: _rmdfm.toml in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write JSON on a single line
    #[arg(long, global = true)]
    compact: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - only show errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the configured output formats, one per line
    Formats {
        /// Front matter JSON file
        input: PathBuf,
    },

    /// Print the options of an output format (`null` when not configured)
    Get {
        /// Front matter JSON file
        input: PathBuf,
        /// Output format name (e.g. html_document)
        format: String,
    },

    /// Replace the options of an output format
    Set {
        /// Front matter JSON file
        input: PathBuf,
        /// Output format name (e.g. html_document)
        format: String,
        /// Options as JSON; a bare word such as `default` is taken as a string
        options: String,
        /// Write the updated record to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the updated record back to the input file
        #[arg(long, conflicts_with = "output")]
        in_place: bool,
    },

    /// Write a sample _rmdfm.toml to the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Print the JSON schema of the configuration file
    Schema,
}

/// Settings resolved from the config file and command-line flags
struct Settings {
    pretty: bool,
    in_place: bool,
    quiet: bool,
}

impl Settings {
    fn resolve(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => Config::load(path)?,
            None => {
                let cwd = std::env::current_dir().context("Failed to get current directory")?;
                Config::load_from_dir(&cwd)?.unwrap_or_default()
            }
        };
        debug!("loaded config: {:?}", config);

        Ok(Self {
            pretty: config.pretty() && !cli.compact,
            in_place: config.in_place(),
            quiet: cli.quiet,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match &cli.command {
        Command::Formats { input } => {
            // Only validates the config; listing has no settings
            Settings::resolve(&cli)?;
            list_formats(input)
        }
        Command::Get { input, format } => {
            let settings = Settings::resolve(&cli)?;
            get_output_option(input, format, &settings)
        }
        Command::Set {
            input,
            format,
            options,
            output,
            in_place,
        } => {
            if *in_place && is_stdin(input) {
                anyhow::bail!("Cannot update stdin in place; use --output instead");
            }
            let mut settings = Settings::resolve(&cli)?;
            // `edit.in_place` from the config only applies to file input without `-o`
            settings.in_place =
                *in_place || (settings.in_place && output.is_none() && !is_stdin(input));
            set_output_option(input, format, options, output.as_deref(), &settings)
        }
        Command::Init { force } => init_config(*force, cli.quiet),
        Command::Schema => {
            println!("{}", Config::json_schema_string()?);
            Ok(())
        }
    }
}

/// Log to stderr so stdout stays machine readable; `RUST_LOG` takes precedence
fn init_logging(verbose: bool, quiet: bool) {
    let default_filter = if verbose {
        "rmdfm=debug,rmd_frontmatter=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Print configured output format names
fn list_formats(input: &Path) -> Result<()> {
    let fm = read_front_matter(input)?;
    let formats = fm.list_formats();
    if formats.is_empty() {
        debug!("no output formats configured in {}", display_input(input));
    }
    for format in formats {
        println!("{}", format);
    }
    Ok(())
}

/// Print the options payload of one format
fn get_output_option(input: &Path, format: &str, settings: &Settings) -> Result<()> {
    let fm = read_front_matter(input)?;
    match fm.get_output_option(format) {
        Some(options) => {
            let json = if settings.pretty {
                options.to_json_pretty()?
            } else {
                options.to_json()?
            };
            println!("{}", json);
        }
        None => {
            debug!("format {} is not configured", format);
            println!("null");
        }
    }
    Ok(())
}

/// Replace the options payload of one format and write the record
fn set_output_option(
    input: &Path,
    format: &str,
    options: &str,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<()> {
    let mut fm = read_front_matter(input)?;
    let options = parse_options(options)
        .with_context(|| format!("Invalid options for format {}", format))?;

    fm.set_output_option(format, options);

    let mut json = if settings.pretty {
        fm.to_json_pretty()?
    } else {
        fm.to_json()?
    };
    json.push('\n');

    let destination = if settings.in_place { Some(input) } else { output };

    match destination {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            if !settings.quiet {
                println!("{}", path.display());
            }
        }
        None => print!("{}", json),
    }

    Ok(())
}

/// Parse an options argument
///
/// Anything that is not valid JSON is taken as a plain string, so
/// `rmdfm set doc.json pdf_document default` works without extra quoting.
fn parse_options(options: &str) -> Result<OutputOptions> {
    match OutputOptions::from_json(options) {
        Ok(options) => Ok(options),
        Err(err) => {
            let trimmed = options.trim();
            if trimmed.starts_with('{') || trimmed.starts_with('[') || trimmed.starts_with('"') {
                return Err(err.into());
            }
            Ok(OutputOptions::from(serde_json::Value::String(
                trimmed.to_string(),
            )))
        }
    }
}

/// Write a sample configuration file to the current directory
fn init_config(force: bool, quiet: bool) -> Result<()> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let content = Config::sample().to_toml_with_schema()?;
    fs::write(&path, content).with_context(|| format!("Failed to write: {}", path.display()))?;

    if !quiet {
        println!("{}", path.display());
    }
    Ok(())
}

fn is_stdin(input: &Path) -> bool {
    input.as_os_str() == "-"
}

fn display_input(input: &Path) -> String {
    if is_stdin(input) {
        "<stdin>".to_string()
    } else {
        input.display().to_string()
    }
}

/// Read a front matter record from a file or stdin
fn read_front_matter(input: &Path) -> Result<FrontMatter> {
    let content = if is_stdin(input) {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(input)
            .with_context(|| format!("Failed to read: {}", input.display()))?
    };

    FrontMatter::from_json(&content)
        .with_context(|| format!("Failed to parse front matter: {}", display_input(input)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_options_json() {
        let options = parse_options(r#"{"toc": true}"#).unwrap();
        assert_eq!(options.as_value(), &json!({"toc": true}));
    }

    #[test]
    fn test_parse_options_bare_word() {
        let options = parse_options("default").unwrap();
        assert_eq!(options.as_value(), &json!("default"));
    }

    #[test]
    fn test_parse_options_scalars() {
        assert_eq!(parse_options("null").unwrap().as_value(), &json!(null));
        assert_eq!(parse_options("false").unwrap().as_value(), &json!(false));
    }

    #[test]
    fn test_parse_options_broken_json() {
        assert!(parse_options(r#"{"toc": }"#).is_err());
        assert!(parse_options("[1, 2").is_err());
    }

    #[test]
    fn test_is_stdin() {
        assert!(is_stdin(Path::new("-")));
        assert!(!is_stdin(Path::new("doc.json")));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
