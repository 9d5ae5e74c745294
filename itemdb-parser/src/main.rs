use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use itemdb_parser::{
    export::{write_json, write_table},
    parse_file,
    schema::item_schema,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "itemdb")]
#[command(version)]
#[command(about = "Decode an itemdb container into a table of items", long_about = None)]
struct Cli {
    /// Path to the itemdb file
    #[arg(default_value = "items.dat")]
    input: PathBuf,

    /// Where to write the decoded items ("-" for stdout)
    #[arg(default_value = "items.txt")]
    output: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Pipe-separated columns with a header row
    Table,
    Json,
}

/// `RUST_LOG` replaces the default level entirely when it is set and non-empty.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    match rust_log.filter(|s| !s.trim().is_empty()) {
        Some(directives) => EnvFilter::builder().parse_lossy(directives),
        None => {
            let level = if verbose {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            };
            EnvFilter::default().add_directive(level.into())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(log_filter(cli.verbose, rust_log.as_deref()))
        .init();

    let schema = item_schema();
    let result = parse_file(&cli.input, &schema)
        .with_context(|| format!("failed to parse {}", cli.input.display()))?;

    let to_stdout = cli.output.as_os_str() == "-";
    let mut out: Box<dyn Write> = if to_stdout {
        Box::new(io::stdout().lock())
    } else {
        let file = File::create(&cli.output)
            .with_context(|| format!("cannot create {}", cli.output.display()))?;
        Box::new(BufWriter::new(file))
    };
    match cli.format {
        Format::Table => write_table(&mut out, &schema, &result),
        Format::Json => write_json(&mut out, &result),
    }
    .and_then(|_| out.flush())
    .with_context(|| format!("failed to write {}", cli.output.display()))?;

    info!(
        "parsed {} items from itemdb v{} and wrote them to {}",
        result.count,
        result.version,
        if to_stdout {
            "stdout".into()
        } else {
            cli.output.display().to_string()
        }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing::level_filters::LevelFilter;

    use super::*;

    #[test]
    fn defaults_follow_verbose_flag() {
        assert_eq!(log_filter(false, None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(true, None).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(true, Some("  ")).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn rust_log_overrides_default_level() {
        assert_eq!(log_filter(false, Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(false, Some("trace")).max_level_hint(), Some(LevelFilter::TRACE));
        assert_eq!(log_filter(true, Some("error")).max_level_hint(), Some(LevelFilter::ERROR));
    }
}
