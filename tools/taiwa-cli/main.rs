use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use taiwa::prelude::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionCli {
    Tb,
    Lr,
}

impl From<DirectionCli> for Direction {
    fn from(value: DirectionCli) -> Self {
        match value {
            DirectionCli::Tb => Direction::TopToBottom,
            DirectionCli::Lr => Direction::LeftToRight,
        }
    }
}

/// Inspect, lay out and convert bot scripts
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import a script JSON file and report whether it is valid
    Check {
        /// Path to the script JSON file
        script_path: PathBuf,
    },
    /// Import a script, lay it out and print node placements
    Layout {
        /// Path to the script JSON file
        script_path: PathBuf,

        /// Layout direction
        #[arg(short, long, value_enum, default_value = "tb")]
        direction: DirectionCli,

        /// Save the laid-out document as a snapshot
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
    },
    /// Export a saved snapshot back to script JSON
    Export {
        /// Path to the snapshot file
        snapshot_path: PathBuf,

        /// Write the script here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Check { script_path } => run_check(&script_path),
        Command::Layout {
            script_path,
            direction,
            snapshot,
        } => run_layout(&script_path, direction.into(), snapshot),
        Command::Export {
            snapshot_path,
            output,
        } => run_export(&snapshot_path, output),
    }
}

fn load_script(path: &Path) -> ScriptConfig {
    let json = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read script file '{}': {}",
            path.display(),
            e
        ))
    });
    ScriptConfig::from_json(&json).unwrap_or_else(|e| exit_with_error(&e.to_string()))
}

fn run_check(path: &Path) {
    let script = load_script(path);
    let graph = import_script(&script)
        .unwrap_or_else(|e| exit_with_error(&Notification::from(&e).to_string()));

    let choices = graph.nodes().iter().filter(|n| n.is_choice()).count();
    println!("Script '{}' is valid.", path.display());
    println!("  -> Start question: {}", script.first_node_name);
    println!("  -> Questions:      {}", graph.question_count());
    println!("  -> Choices:        {}", choices);
    println!("  -> Edges:          {}", graph.edges().len());

    let reachable = export_script(&graph).map(|s| s.nodes.len()).unwrap_or(0);
    if reachable < graph.question_count() {
        println!(
            "  -> {} question(s) are not reachable from the start.",
            graph.question_count() - reachable
        );
    }
}

fn run_layout(path: &Path, direction: Direction, snapshot: Option<PathBuf>) {
    let script = load_script(path);
    let mut editor = Editor::builder().with_direction(direction).build();
    editor
        .import_config(&script)
        .unwrap_or_else(|e| exit_with_error(&Notification::from(&e).to_string()));

    let start = Instant::now();
    let layout = editor
        .run_layout(direction)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let duration = start.elapsed();

    println!("\n--- Layout ({}) ---", layout.direction);
    for placement in &layout.placements {
        println!(
            "{:<24} component {:>2}  rank {:>3}  order {:>3}  at ({:>8.1}, {:>8.1})",
            placement.id,
            placement.component,
            placement.rank,
            placement.order,
            placement.position.x,
            placement.position.y
        );
    }
    println!("-----------------------------");
    println!("Remaining crossings:  {}", layout.crossings);
    println!("Layout time:          {:?}", duration);

    if let Some(snapshot_path) = snapshot {
        editor
            .snapshot()
            .save(&snapshot_path)
            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
        println!("Snapshot saved to '{}'", snapshot_path.display());
    }
}

fn run_export(path: &Path, output: Option<PathBuf>) {
    let snapshot =
        DocumentSnapshot::from_file(path).unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let mut editor = Editor::new();
    editor
        .restore(snapshot)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    let script = editor
        .export_config()
        .unwrap_or_else(|e| exit_with_error(&Notification::from(&e).to_string()));
    let json = script
        .to_json_pretty()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize script: {}", e)));

    match output {
        Some(out) => {
            fs::write(&out, json).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", out.display(), e))
            });
            println!("Exported {} questions to '{}'", script.nodes.len(), out.display());
        }
        None => println!("{}", json),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
