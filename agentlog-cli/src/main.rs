use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use agentlog_core::{
    AgentlogError, RawRecord, RenderOptions, decode_transcript, parse_records, read_records,
    render_transcript_markdown, transcript_to_raw_json,
};
use clap::Parser;

const STDIN_PATH: &str = "-";

#[derive(Debug, Parser)]
#[command(name = "agentlog", version, about = "Decode and display agent execution transcripts")]
struct Cli {
    /// JSONL file of records ({"id","created_at","sequence","content"} per line), or - for stdin
    path: String,

    /// Output decoded records as JSON instead of markdown
    #[arg(long)]
    raw: bool,

    /// Show the full content of every block instead of its preview
    #[arg(long)]
    expand: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> agentlog_core::Result<()> {
    let records = load_records(&cli.path)?;
    tracing::debug!("loaded {} records from {}", records.len(), cli.path);

    let decoded = decode_transcript(records);

    if cli.raw {
        let raw_json = transcript_to_raw_json(&decoded)?;
        print!("{raw_json}");
    } else {
        let markdown = render_transcript_markdown(
            &decoded,
            RenderOptions {
                expand: cli.expand,
            },
        );
        print!("{markdown}");
    }

    Ok(())
}

fn load_records(path: &str) -> agentlog_core::Result<Vec<RawRecord>> {
    if path != STDIN_PATH {
        return read_records(Path::new(path));
    }

    let mut raw = String::new();
    io::stdin()
        .read_to_string(&mut raw)
        .map_err(|source| AgentlogError::Io {
            path: PathBuf::from(STDIN_PATH),
            source,
        })?;

    if raw.trim().is_empty() {
        return Err(AgentlogError::EmptyTranscript {
            path: PathBuf::from(STDIN_PATH),
        });
    }

    parse_records(Path::new(STDIN_PATH), &raw)
}
