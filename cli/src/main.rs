//! autotyper CLI - play typer sequences in the terminal
//!
//! # Commands
//! - `autotyper run <script>` - Play a TOML script
//! - `autotyper words <word>...` - Cycle through words, landing page style
//! - `autotyper scramble` - Type a random alphanumeric string
//! - `autotyper schematic <script>` - Print the script's event graph as JSON
//! - `autotyper schema` - Print the JSON schema of the script format

mod render;

use anyhow::{Context, Result};
use autotyper::prelude::*;
use autotyper::schematic::Schematic;
use clap::{Parser, Subcommand};
use render::Terminal;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// autotyper CLI
#[derive(Parser)]
#[command(name = "autotyper")]
#[command(author, version, about = "Play typewriter animations in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a TOML script until it finishes or Ctrl-C
    Run {
        /// Script file
        script: String,

        /// Stop after this many milliseconds
        #[arg(long)]
        duration_ms: Option<u64>,

        /// Write the recorded timeline as JSON to this file
        #[arg(long)]
        timeline: Option<String>,
    },

    /// Type, hold and erase each word, forever
    Words {
        /// Words to cycle through
        #[arg(required = true)]
        words: Vec<String>,

        /// Delay between letters in milliseconds
        #[arg(long, default_value_t = 100)]
        delay: u64,

        /// How long each word stays on screen in milliseconds
        #[arg(long, default_value_t = 500)]
        pause: u64,

        /// Stop after this many milliseconds
        #[arg(long)]
        duration_ms: Option<u64>,
    },

    /// Type a random alphanumeric string
    Scramble {
        /// Number of characters
        #[arg(short, long, default_value_t = 16)]
        len: usize,

        /// Delay between letters in milliseconds
        #[arg(long, default_value_t = 500)]
        delay: u64,
    },

    /// Print the event graph of a script as JSON
    Schematic {
        /// Script file
        script: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the JSON schema of the script format
    Schema {
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            script,
            duration_ms,
            timeline,
        } => run_script_command(&script, duration_ms, timeline.as_deref()).await,
        Commands::Words {
            words,
            delay,
            pause,
            duration_ms,
        } => {
            let preset = WordCycle::new(words).with_type_delay(delay).with_pause(pause);
            run_preset_command(&preset, duration_ms).await
        }
        Commands::Scramble { len, delay } => {
            let preset = Scramble { len, delay_ms: delay };
            run_preset_command(&preset, None).await
        }
        Commands::Schematic { script, output } => run_schematic_command(&script, output.as_deref()),
        Commands::Schema { output } => run_schema_command(output.as_deref()),
    }
}

/// Logs go to stderr so they never tear the animated line on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,autotyper_runtime=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_script_command(
    path: &str,
    duration_ms: Option<u64>,
    timeline_path: Option<&str>,
) -> Result<()> {
    let mut script = Script::from_path(path)?;
    if timeline_path.is_some() {
        script.typer.record_timeline = true;
    }

    let terminal = Arc::new(Terminal::new());
    let typer = AutoTyper::from_script(&script, terminal.clone())?;
    typer.try_start()?;

    let phase = play(&typer, duration_ms).await;
    terminal.finish();
    tracing::info!(?phase, "script done");

    if let (Some(out), Some(timeline)) = (timeline_path, typer.timeline()) {
        let json = serde_json::to_string_pretty(&timeline)?;
        write_output(Some(out), &json)?;
    }

    Ok(())
}

async fn run_preset_command(preset: &dyn Preset, duration_ms: Option<u64>) -> Result<()> {
    let terminal = Arc::new(Terminal::new());
    let typer = preset.apply(AutoTyper::with_listener("", terminal.clone()));
    typer.try_start()?;

    play(&typer, duration_ms).await;
    terminal.finish();
    Ok(())
}

/// Wait for the typer to finish, the deadline to pass, or Ctrl-C.
async fn play(typer: &AutoTyper, duration_ms: Option<u64>) -> Phase {
    let deadline = async {
        match duration_ms {
            Some(ms) => tokio::time::sleep(Duration::from_millis(ms)).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        phase = typer.wait() => return phase,
        _ = deadline => tracing::debug!("duration elapsed"),
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                tracing::warn!(error = %e, "failed to listen for ctrl-c");
            }
        }
    }

    typer.stop();
    typer.phase()
}

fn schematic_json(path: &str) -> Result<String> {
    let script = Script::from_path(path)?;
    let events = script.events()?;
    let name = Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("script");

    let schematic = Schematic::from_events(name, &events);
    serde_json::to_string_pretty(&schematic).context("Failed to serialize schematic")
}

fn run_schematic_command(path: &str, output: Option<&str>) -> Result<()> {
    let json = schematic_json(path)?;
    write_output(output, &json)
}

fn run_schema_command(output: Option<&str>) -> Result<()> {
    let schema = Script::json_schema()?;
    let json = serde_json::to_string_pretty(&schema)?;
    write_output(output, &json)
}

fn write_output(output: Option<&str>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output file: {}", path))?;
            eprintln!("Saved to: {}", path);
        }
        None => println!("{}", content),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCRIPT: &str = r#"
[[steps]]
kind = "type"
text = "hi"

[[steps]]
kind = "remove"

[[steps]]
kind = "loop"
"#;

    #[test]
    fn test_cli_parses_words() {
        let cli = Cli::try_parse_from(["autotyper", "words", "one", "two", "--delay", "20"])
            .unwrap();
        match cli.command {
            Commands::Words { words, delay, pause, .. } => {
                assert_eq!(words, vec!["one", "two"]);
                assert_eq!(delay, 20);
                assert_eq!(pause, 500);
            }
            _ => panic!("expected words"),
        }
    }

    #[test]
    fn test_words_requires_a_word() {
        assert!(Cli::try_parse_from(["autotyper", "words"]).is_err());
    }

    #[test]
    fn test_schematic_json() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(SCRIPT.as_bytes()).unwrap();

        let json = schematic_json(file.path().to_str().unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nodes"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        write_output(path.to_str(), "{}").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_stops_at_deadline() {
        let typer = AutoTyper::with_listener("", Arc::new(NoopListener))
            .type_str("ab")
            .repeat_forever()
            .start();

        assert_eq!(play(&typer, Some(250)).await, Phase::Stopped);
    }
}
