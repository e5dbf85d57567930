use arbor::graphlib::{Edge, Graph, Vertex};
use arbor::{Arborescence, solve};
use serde::Serialize;
use std::io::{Read, Write};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Graph(arbor::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Graph(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<arbor::Error> for CliError {
    fn from(value: arbor::Error) -> Self {
        Self::Graph(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Solve,
    Graph,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    root: Option<String>,
    json: bool,
    pretty: bool,
    show_graph: bool,
    verbose: bool,
}

#[derive(Serialize)]
struct EdgeOut<'a> {
    from: &'a str,
    to: &'a str,
    weight: f64,
}

impl<'a> From<&'a Edge> for EdgeOut<'a> {
    fn from(e: &'a Edge) -> Self {
        Self {
            from: e.from().name(),
            to: e.to().name(),
            weight: e.weight(),
        }
    }
}

#[derive(Serialize)]
struct SolveOut<'a> {
    root: &'a str,
    weight: f64,
    contractions: usize,
    edges: Vec<EdgeOut<'a>>,
}

#[derive(Serialize)]
struct GraphOut<'a> {
    vertices: Vec<&'a str>,
    edges: Vec<EdgeOut<'a>>,
}

fn usage() -> &'static str {
    "arbor-cli\n\
\n\
USAGE:\n\
  arbor-cli [solve] --root <name> [--json] [--pretty] [--show-graph] [--verbose] [<path>|-]\n\
  arbor-cli graph [--json] [--pretty] [--verbose] [<path>|-]\n\
\n\
INPUT:\n\
  <E>\n\
  <from> <to> <weight>     (E times)\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - solve prints the minimum-weight spanning arborescence rooted at --root.\n\
  - graph prints the parsed graph without solving.\n\
  - Log output goes to stderr and follows RUST_LOG (default: warn; --verbose: debug).\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "solve" => args.command = Command::Solve,
            "graph" => args.command = Command::Graph,
            "--json" => args.json = true,
            "--pretty" => args.pretty = true,
            "--show-graph" => args.show_graph = true,
            "--verbose" | "-v" => args.verbose = true,
            "--root" => {
                let Some(root) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if root.trim().is_empty() {
                    return Err(CliError::Usage(usage()));
                }
                args.root = Some(root.trim().to_string());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if matches!(args.command, Command::Solve) && args.root.is_none() {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_graph(g: &Graph, json: bool, pretty: bool) -> Result<(), CliError> {
    if json {
        let out = GraphOut {
            vertices: g.vertices().map(Vertex::name).collect(),
            edges: g.edges().map(|(_, e)| EdgeOut::from(e)).collect(),
        };
        return write_json(&out, pretty);
    }
    print!("{g}");
    Ok(())
}

fn write_arborescence(a: &Arborescence, json: bool, pretty: bool) -> Result<(), CliError> {
    if json {
        let out = SolveOut {
            root: a.root().name(),
            weight: a.weight(),
            contractions: a.contractions(),
            edges: a.edges().iter().map(EdgeOut::from).collect(),
        };
        return write_json(&out, pretty);
    }
    let mut out = std::io::stdout().lock();
    for e in a.edges() {
        writeln!(out, "{e}")?;
    }
    writeln!(out, "Total weight: {:.2}", a.weight())?;
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let graph = Graph::from_edge_list(&text)?;
    tracing::debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );

    match args.command {
        Command::Graph => write_graph(&graph, args.json, args.pretty),
        Command::Solve => {
            let Some(root) = args.root.as_deref() else {
                return Err(CliError::Usage(usage()));
            };
            if args.show_graph && !args.json {
                print!("{graph}");
            }
            let arborescence = solve(&graph, &Vertex::new(root))?;
            write_arborescence(&arborescence, args.json, args.pretty)
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => {}
        Err(CliError::Graph(err)) if err.is_infeasible() => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
