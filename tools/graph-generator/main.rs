use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use std::fs;
use stratagraph::prelude::{EditError, EditorCommand, GraphDocument, NodeType, StrategyEditor};

/// A CLI tool to generate random strategy graphs for the stratagraph editor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_graph.json")]
    output: String,

    /// The minimum number of nodes to generate below the start node
    #[arg(long, default_value_t = 3)]
    min: usize,

    /// The maximum number of nodes to generate below the start node
    #[arg(long, default_value_t = 20)]
    max: usize,

    /// Chance (0-100) of appending a terminal node below each leaf
    #[arg(long, default_value_t = 30)]
    terminal_chance: u32,
}

/// Node types that may appear in the body of a generated strategy.
const BODY_TYPES: [NodeType; 11] = [
    NodeType::Signal,
    NodeType::EntrySignal,
    NodeType::ExitSignal,
    NodeType::Action,
    NodeType::Entry,
    NodeType::Exit,
    NodeType::Modify,
    NodeType::Alert,
    NodeType::Retry,
    NodeType::ReEntrySignal,
    NodeType::SquareOff,
];

const TERMINAL_TYPES: [NodeType; 2] = [NodeType::End, NodeType::ForceEnd];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) cannot be greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }

    let count = rng.random_range(cli.min..=cli.max);
    println!("Generating a strategy graph with {} body node(s)...", count);

    let mut editor = StrategyEditor::default();
    editor.apply(EditorCommand::AddNode {
        node_type: NodeType::Start,
        parent: None,
    })?;

    generate_body(&mut editor, &mut rng, count)?;
    let terminals = generate_terminals(&mut editor, &mut rng, cli.terminal_chance)?;
    println!("-> Added {} terminal node(s).", terminals);

    let flags = editor.flags();
    if !flags.is_clean() {
        eprintln!("Warning: generated graph has structural issues: {:?}", flags);
    }

    let document = GraphDocument::from_graph(editor.nodes(), editor.edges());
    fs::write(&cli.output, document.to_json_pretty()?)?;

    println!(
        "Successfully generated {} nodes and {} edges and saved them to '{}'",
        editor.nodes().len(),
        editor.edges().len(),
        cli.output
    );

    Ok(())
}

/// Adds `count` random body nodes, each below a random non-terminal node.
fn generate_body(
    editor: &mut StrategyEditor,
    rng: &mut ThreadRng,
    count: usize,
) -> Result<(), EditError> {
    for _ in 0..count {
        let parent = editor
            .selectable_parents()
            .choose(rng)
            .map(|n| n.id.clone());
        let node_type = *BODY_TYPES.choose(rng).unwrap_or(&NodeType::Signal);
        editor.apply(EditorCommand::AddNode { node_type, parent })?;
    }
    Ok(())
}

/// Closes some of the leaves with a terminal node. Returns how many were added.
fn generate_terminals(
    editor: &mut StrategyEditor,
    rng: &mut ThreadRng,
    chance: u32,
) -> Result<usize, EditError> {
    let leaves: Vec<String> = editor
        .nodes()
        .iter()
        .filter(|n| n.node_type() != NodeType::Start)
        .filter(|n| !editor.edges().iter().any(|e| e.source == n.id))
        .map(|n| n.id.clone())
        .collect();

    let mut added = 0;
    for leaf in leaves {
        if rng.random_range(0..100) >= chance {
            continue;
        }
        let node_type = *TERMINAL_TYPES.choose(rng).unwrap_or(&NodeType::End);
        editor.apply(EditorCommand::AddNode {
            node_type,
            parent: Some(leaf),
        })?;
        added += 1;
    }
    Ok(added)
}
