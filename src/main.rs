use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stepflow_config::GraphConfig;
use stepflow_graph::{GraphStore, LogObserver};

mod script;

/// Stepflow - build a workflow as a dependency graph and complete it step by step
#[derive(Parser)]
#[command(name = "stepflow")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to the data directory (default: ~/.stepflow)
  #[arg(long, global = true)]
  data_dir: Option<PathBuf>,

  /// Initial graph configuration (default: <data-dir>/graph.json, else the sample workflow)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the initial graph as JSON
  Show,

  /// Replay a script of actions against the initial graph
  Run {
    /// Path to the script file, or `-` for stdin
    script: PathBuf,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();

  let data_dir = match cli.data_dir {
    Some(dir) => dir,
    None => dirs::home_dir()
      .context("could not determine home directory")?
      .join(".stepflow"),
  };

  match cli.command {
    Some(Commands::Show) => {
      let store = load_store(cli.config.as_deref(), &data_dir)?;
      println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
    }
    Some(Commands::Run { script }) => {
      run_script(&script, cli.config.as_deref(), &data_dir)?;
    }
    None => {
      println!("stepflow - use --help to see available commands");
    }
  }

  Ok(())
}

fn load_config(config: Option<&Path>, data_dir: &Path) -> Result<GraphConfig> {
  let path = match config {
    Some(path) => path.to_path_buf(),
    None => {
      let default_path = data_dir.join("graph.json");
      if !default_path.exists() {
        return Ok(GraphConfig::sample());
      }
      default_path
    }
  };

  let content = std::fs::read_to_string(&path)
    .with_context(|| format!("failed to read config file: {}", path.display()))?;
  serde_json::from_str(&content)
    .with_context(|| format!("failed to parse config file: {}", path.display()))
}

fn load_store(config: Option<&Path>, data_dir: &Path) -> Result<GraphStore> {
  let config = load_config(config, data_dir)?;
  GraphStore::from_config(&config).context("invalid initial graph")
}

fn run_script(script_path: &Path, config: Option<&Path>, data_dir: &Path) -> Result<()> {
  let input = read_script(script_path)?;
  let commands = script::parse_script(&input)
    .with_context(|| format!("failed to parse script: {}", script_path.display()))?;

  let mut store = load_store(config, data_dir)?;
  store.subscribe(LogObserver);
  eprintln!("Loaded graph with {} nodes", store.graph().node_count());

  for (line, command) in &commands {
    if *command == script::Command::Show {
      println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
      continue;
    }
    let report = script::apply(&mut store, command)
      .with_context(|| format!("line {line}: {command}"))?;
    eprintln!("{line}: {report}");
  }

  println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
  Ok(())
}

fn read_script(path: &Path) -> Result<String> {
  if path == Path::new("-") {
    let mut input = String::new();
    io::stdin()
      .read_to_string(&mut input)
      .context("failed to read script from stdin")?;
    return Ok(input);
  }

  std::fs::read_to_string(path)
    .with_context(|| format!("failed to read script file: {}", path.display()))
}
