//! Diagram Graph CLI
//!
//! Usage:
//!   diagram-graph [OPTIONS] <EDGE>...
//!
//! Options:
//!   -s, --stylesheet <FILE>  Stylesheet file for color palette (TOML format)
//!   -g, --grid <SPACING>     Snap dragged nodes to a grid
//!   -m, --move <NAME=X,Y>    Drag a node to a location (repeatable)
//!   -d, --debug              Enable debug logging
//!   -h, --help               Print help

use std::path::PathBuf;

use clap::Parser;

use diagram_graph::{render_with_config, NodeMove, RenderConfig, Stylesheet};

#[derive(Parser)]
#[command(name = "diagram-graph")]
#[command(about = "Render a node-link preview from edge descriptions")]
struct Cli {
    /// Edges such as 'a->b' (directed) or 'a--b' (undirected)
    #[arg(required = true)]
    edges: Vec<String>,

    /// Stylesheet file for color palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Grid spacing used to snap dragged nodes
    #[arg(short, long)]
    grid: Option<f64>,

    /// Drag a node to a location, e.g. 'b=200,40'
    #[arg(short, long = "move", value_name = "NAME=X,Y")]
    moves: Vec<NodeMove>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    // Load stylesheet
    let stylesheet = match &cli.stylesheet {
        Some(path) => match Stylesheet::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Stylesheet::default(),
    };

    let mut config = RenderConfig::new().with_stylesheet(stylesheet);
    if let Some(spacing) = cli.grid {
        config = config.with_grid(spacing);
    }
    for node_move in cli.moves {
        config = config.with_move(node_move);
    }

    let edges: Vec<&str> = cli.edges.iter().map(String::as_str).collect();
    match render_with_config(&edges, config) {
        Ok(svg) => {
            println!("{}", svg);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
