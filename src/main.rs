use anyhow::Result;
use clap::{Parser, Subcommand};
use slices_graph::graph::{ClosureResult, InferredEdge};
use slices_graph::ingest::{find_slice, load_snapshot, read_slice};
use slices_graph::{compute_all_inferences, compute_closure, Config, RelationshipType};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slices-graph")]
#[command(about = "Infer implied links between slices", version)]
struct Args {
    /// Slices directory (overrides config and SLICES_DIR)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Infer every implied link in the slices directory
    Infer {
        /// Maximum hops followed per closure
        #[arg(long)]
        max_depth: Option<usize>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Transitive closure of one relationship type from one slice or agent
    Closure {
        /// Slice id (exact or partial) or routing agent id, e.g. agent:triage
        id: String,
        /// Relationship type, e.g. depends_on
        rel: RelationshipType,
        #[arg(long)]
        max_depth: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// List relationship types and their properties
    Relations,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = Config::load()?;
    if let Some(dir) = args.dir {
        config.slices.dir = dir;
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", config.slices.log_level.as_str()),
    )
    .init();

    match &config.source {
        Some(path) => log::debug!("Using config {}", path.display()),
        None => log::debug!("No config.toml found, using defaults"),
    }

    match args.command {
        Command::Infer { max_depth, json } => run_infer(&config, max_depth, json),
        Command::Closure {
            id,
            rel,
            max_depth,
            json,
        } => run_closure(&config, &id, rel, max_depth, json),
        Command::Relations => {
            print_relations();
            Ok(())
        }
    }
}

fn options(config: &Config, max_depth: Option<usize>) -> Result<slices_graph::InferenceOptions> {
    let mut options = config.inference_options();
    if let Some(depth) = max_depth {
        if depth == 0 {
            anyhow::bail!("--max-depth must be greater than 0");
        }
        options.max_depth = depth;
    }
    Ok(options)
}

fn run_infer(config: &Config, max_depth: Option<usize>, json: bool) -> Result<()> {
    let options = options(config, max_depth)?;
    let snapshot = load_snapshot(config.slices_dir(), &config.slices.extension)?;
    let inferred = compute_all_inferences(&snapshot.edges, &snapshot.node_ids, &options);

    if json {
        println!("{}", serde_json::to_string_pretty(&inferred)?);
        return Ok(());
    }

    if inferred.is_empty() {
        println!("No inferred links.");
        return Ok(());
    }

    println!("Inferred links ({}):", inferred.len());
    for edge in &inferred {
        println!("  {}", format_edge(edge));
    }
    Ok(())
}

fn run_closure(
    config: &Config,
    id: &str,
    rel: RelationshipType,
    max_depth: Option<usize>,
    json: bool,
) -> Result<()> {
    let options = options(config, max_depth)?;
    let dir = config.slices_dir();
    let ext = &config.slices.extension;

    let snapshot = load_snapshot(dir, ext)?;

    // Known ids (including routing agents) start directly; anything else is
    // resolved as a partial slice id to the slice's declared id
    let (start_id, title) = if snapshot.node_ids.iter().any(|node| node == id) {
        match find_slice(dir, ext, id).and_then(|path| read_slice(&path)) {
            Ok(slice) if slice.id == id => (slice.id, slice.title),
            _ => (id.to_string(), id.to_string()),
        }
    } else {
        let slice = read_slice(&find_slice(dir, ext, id)?)?;
        (slice.id, slice.title)
    };
    let closure = compute_closure(&snapshot.edges, &start_id, rel, &options);

    if json {
        println!("{}", serde_json::to_string_pretty(&closure)?);
        return Ok(());
    }

    print_closure(&title, &closure);
    Ok(())
}

fn print_closure(title: &str, closure: &ClosureResult) {
    println!("=== {} ({}) -[{}]-> ===", title, closure.start_id, closure.rel);

    if !closure.rel.is_transitive() {
        println!("{} is not transitive; nothing to infer.", closure.rel);
        return;
    }

    if closure.reachable.is_empty() {
        println!("Nothing reachable.");
    } else {
        println!("Reachable ({}):", closure.reachable.len());
        for node in &closure.reachable {
            println!("  → {}", node);
        }
    }

    if !closure.inferred.is_empty() {
        println!("\nInferred ({}):", closure.inferred.len());
        for edge in &closure.inferred {
            println!("  {}", format_edge(edge));
        }
    }

    if closure.truncated {
        println!("\n(truncated: depth limit reached, results are a lower bound)");
    }
}

fn format_edge(edge: &InferredEdge) -> String {
    if edge.via.is_empty() {
        format!("{} -[{}]-> {}", edge.from, edge.rel, edge.to)
    } else {
        format!(
            "{} -[{}]-> {}  via {}",
            edge.from,
            edge.rel,
            edge.to,
            edge.via.join(" → ")
        )
    }
}

fn print_relations() {
    println!(
        "{:<18} {:<18} {:>10} {:>10}",
        "Type", "Inverse", "Transitive", "Symmetric"
    );
    println!("{:-<59}", "");
    for rel in RelationshipType::ALL {
        let props = rel.properties();
        println!(
            "{:<18} {:<18} {:>10} {:>10}",
            rel.as_str(),
            props.inverse.as_str(),
            if props.transitive { "yes" } else { "no" },
            if props.symmetric { "yes" } else { "no" }
        );
    }
}
