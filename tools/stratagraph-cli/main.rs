use clap::{Parser, ValueEnum};
use stratagraph::prelude::*;
use std::fs;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetCli {
    SymmetricTree,
    Hierarchical,
}

impl From<PresetCli> for LayoutPreset {
    fn from(preset: PresetCli) -> Self {
        match preset {
            PresetCli::SymmetricTree => LayoutPreset::SymmetricTree,
            PresetCli::Hierarchical => LayoutPreset::Hierarchical,
        }
    }
}

/// Inspect, clone, paste and lay out strategy graphs from the command line
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the strategy graph JSON file
    graph_path: String,

    /// Optional path to an editor config JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Node ids to select before editing
    #[arg(short, long, value_delimiter = ',')]
    select: Vec<String>,

    /// Clone the selected nodes
    #[arg(long, conflicts_with = "paste_parent")]
    clone: bool,

    /// Copy the selected nodes and paste them below this node
    #[arg(long)]
    paste_parent: Option<String>,

    /// Layout preset to run after editing
    #[arg(short, long, value_enum)]
    layout: Option<PresetCli>,

    /// Where to write the resulting graph JSON
    #[arg(short, long)]
    output: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EditorConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => EditorConfig::default(),
    };
    init_tracing(&config.log_level);

    let total_start = Instant::now();

    // --- 1. Loading ---
    let document = GraphDocument::from_file(&cli.graph_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load graph: {}", e)));
    let mut editor = StrategyEditor::with_graph(document, config)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to import graph: {}", e)));
    info!(
        nodes = editor.nodes().len(),
        edges = editor.edges().len(),
        "Loaded graph from '{}'",
        cli.graph_path
    );
    print_flags("Loaded graph", &editor.flags());

    // --- 2. Editing ---
    let mut pending_layout = cli.layout.map(LayoutPreset::from);
    if !cli.select.is_empty() {
        run(&mut editor, EditorCommand::Select(cli.select.clone()));
    }
    if cli.clone {
        let outcome = run(&mut editor, EditorCommand::CloneSelection);
        println!("Cloned nodes: {:?}", outcome.created);
        pending_layout = pending_layout.or(outcome.layout);
    }
    if let Some(parent) = cli.paste_parent {
        let clipboard = editor.copy_selection();
        let outcome = run(&mut editor, EditorCommand::Paste { clipboard, parent });
        println!("Pasted nodes: {:?}", outcome.created);
        pending_layout = pending_layout.or(outcome.layout);
    }

    // --- 3. Layout ---
    if let Some(preset) = pending_layout {
        let adapter = LayoutAdapter::new(LayeredSolver, editor.config().layout.clone());
        let layout_start = Instant::now();
        let applied = futures::executor::block_on(editor.auto_arrange(&adapter, preset));
        info!(?preset, applied, elapsed = ?layout_start.elapsed(), "Layout finished");
    }

    print_flags("Result", &editor.flags());

    // --- 4. Output ---
    let document = GraphDocument::from_graph(editor.nodes(), editor.edges());
    let json = document
        .to_json_pretty()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode graph: {}", e)));
    match cli.output {
        Some(path) => {
            fs::write(&path, json).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write output file '{}': {}", path, e))
            });
            println!("Wrote graph to '{}'", path);
        }
        None => println!("{}", json),
    }

    info!(elapsed = ?total_start.elapsed(), "Done");
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(editor: &mut StrategyEditor, command: EditorCommand) -> EditOutcome {
    let name = command.name();
    editor.apply(command).unwrap_or_else(|e| {
        error!(command = name, error = %e, "Command failed");
        exit_with_error(&format!("'{}' failed: {}", name, e))
    })
}

fn print_flags(title: &str, flags: &GraphFlags) {
    if flags.is_clean() {
        println!("{}: no structural issues", title);
        return;
    }
    println!("{}:", title);
    for id in &flags.orphan_ids {
        println!("  -> Orphan node: {}", id);
    }
    for id in &flags.extra_start_ids {
        println!("  -> Extra start node: {}", id);
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
