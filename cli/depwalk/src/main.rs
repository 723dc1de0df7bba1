//! depwalk CLI: walk and analyze dependency graphs described in `depwalk.toml`.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use depwalk_core::Graph;
use tracing_subscriber::EnvFilter;

use manifest::DepwalkManifest;

#[derive(Parser)]
#[command(name = "depwalk", version, about = "Depth-first dependency graph walker")]
struct Cli {
    /// Path to depwalk.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,
    /// Log debug events (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter depwalk.toml
    Init {
        /// Directory to create the manifest in
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Walk the graph depth first and print every visit
    Walk {
        /// Start node (overrides [graph].start)
        #[arg(long)]
        start: Option<String>,
        /// Walk only what is reachable from this node
        #[arg(long)]
        from: Option<String>,
        /// Re-announce a node on every backtrack
        #[arg(long)]
        show_backtrack: bool,
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// List nodes and their direct dependencies
    Nodes {
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Report dependency cycles
    Cycles {
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let explicit = cli.manifest.as_deref();

    match cli.command {
        Commands::Init { dir } => commands::init::run(&dir),

        Commands::Walk {
            start,
            from,
            show_backtrack,
            format,
        } => {
            let mut graph = load_graph(&cwd, explicit)?;
            commands::walk::run(
                &mut graph,
                start.as_deref(),
                from.as_deref(),
                show_backtrack,
                format.as_deref(),
            )
        }

        Commands::Nodes { format } => {
            let graph = load_graph(&cwd, explicit)?;
            commands::nodes::run(&graph, format.as_deref())
        }

        Commands::Cycles { format } => {
            let mut graph = load_graph(&cwd, explicit)?;
            commands::cycles::run(&mut graph, format.as_deref())
        }
    }
}

/// Load the manifest (explicit path, or found upward from `cwd`) and build
/// its graph.
fn load_graph(cwd: &Path, explicit: Option<&Path>) -> anyhow::Result<Graph<(), String>> {
    let (manifest, path) = match explicit {
        Some(path) => (DepwalkManifest::load(path)?, path.to_path_buf()),
        None => match DepwalkManifest::find_and_load(cwd)? {
            Some(found) => found,
            None => anyhow::bail!("no depwalk.toml found (run `depwalk init` first)"),
        },
    };
    tracing::debug!(manifest = %path.display(), "loaded manifest");
    manifest.build_graph()
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// Full workflow: init → load → walk → nodes → cycles.
    #[test]
    fn init_walk_cycles_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("workflow");
        commands::init::create_manifest(&project).unwrap();

        let nested = project.join("src");
        std::fs::create_dir_all(&nested).unwrap();
        let mut graph = load_graph(&nested, None).unwrap();
        assert_eq!(graph.node_count(), 5);

        let walk = commands::walk::render(&mut graph, None, None, false, None).unwrap();
        assert!(walk.starts_with("walk of 'workflow' starting at node1"));

        let listing = commands::nodes::render(&graph, None).unwrap();
        assert!(listing.contains("    -> node4 (edge54)"));

        let cycles = commands::cycles::render(&mut graph, None).unwrap();
        assert!(cycles.contains("node1 <-> node2 <-> node3"));
    }

    /// An explicit manifest path skips discovery.
    #[test]
    fn explicit_manifest_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[graph]\nname = \"custom\"\n[[dependency]]\nnode = \"a\"\ndepends_on = \"b\"\n",
        )
        .unwrap();

        let graph = load_graph(Path::new("/"), Some(&path)).unwrap();
        assert_eq!(graph.name(), "custom");
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "depwalk",
            "walk",
            "--start",
            "node2",
            "--show-backtrack",
            "--manifest",
            "deps.toml",
            "-v",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.manifest.as_deref(), Some(Path::new("deps.toml")));
        match cli.command {
            Commands::Walk {
                start,
                show_backtrack,
                ..
            } => {
                assert_eq!(start.as_deref(), Some("node2"));
                assert!(show_backtrack);
            }
            _ => panic!("expected walk"),
        }
    }
}
