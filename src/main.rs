use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use shape_geom::{PipelineConfig, ShapeData, ShapeError, ShapePipeline, SolidKind};

/// Compute exact geometry of a Platonic solid.
#[derive(Parser)]
#[command(name = "shape-geom")]
#[command(about = "Vertices, edges, faces and metrics of the Platonic solids", long_about = None)]
#[command(version)]
struct Cli {
    /// Solid name: tetrahedron, hexahedron (cube), octahedron, dodecahedron, icosahedron
    #[arg(value_name = "SOLID", required_unless_present = "all")]
    solid: Option<String>,

    /// Compute all five solids
    #[arg(long, conflicts_with = "solid")]
    all: bool,

    /// Relative tolerance for every floating-point comparison
    #[arg(long, default_value_t = PipelineConfig::default().tolerance)]
    tolerance: f64,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Print only metrics and counts
    #[arg(long)]
    summary: bool,

    /// Log stage transitions to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// Metrics and counts without the element lists.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    kind: SolidKind,
    radius: f64,
    inradius: f64,
    midradius: f64,
    edge_length: f64,
    volume: f64,
    face_area: f64,
    surf_area: f64,
    vert_count: usize,
    edge_count: usize,
    face_count: usize,
}

impl From<&ShapeData> for Summary {
    fn from(shape: &ShapeData) -> Self {
        Self {
            kind: shape.kind,
            radius: shape.radius,
            inradius: shape.inradius,
            midradius: shape.midradius,
            edge_length: shape.edge_length,
            volume: shape.volume,
            face_area: shape.face_area,
            surf_area: shape.surf_area,
            vert_count: shape.vert_count,
            edge_count: shape.edge_count,
            face_count: shape.face_count,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = PipelineConfig::with_tolerance(cli.tolerance);

    let results: Vec<(SolidKind, Result<ShapeData, ShapeError>)> = if cli.all {
        shape_geom::compute_all_with(config)
    } else {
        let name = cli.solid.as_deref().unwrap_or_default();
        let kind = match name.parse::<SolidKind>() {
            Ok(kind) => kind,
            Err(err) => return fail(&err),
        };
        vec![(kind, ShapePipeline::new(kind).with_config(config).execute())]
    };

    let mut errors = Vec::new();
    for (_, result) in results {
        match result {
            Ok(shape) => {
                if let Err(err) = print_shape(&shape, cli.format, cli.summary) {
                    eprintln!("error: {err}");
                    return ExitCode::from(2);
                }
            }
            Err(err) => {
                eprintln!("error: {err}");
                errors.push(err);
            }
        }
    }
    ExitCode::from(exit_status(&errors))
}

/// Process status for a run: 0 when nothing failed, else the highest
/// error code.
fn exit_status(errors: &[ShapeError]) -> u8 {
    errors
        .iter()
        .map(|err| u8::try_from(err.exit_code()).unwrap_or(2))
        .max()
        .unwrap_or(0)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "shape_geom=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(err: &ShapeError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(exit_status(std::slice::from_ref(err)))
}

fn print_shape(shape: &ShapeData, format: Format, summary: bool) -> serde_json::Result<()> {
    match format {
        Format::Json if summary => {
            println!("{}", serde_json::to_string_pretty(&Summary::from(shape))?);
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(shape)?),
        Format::Text => print_text(shape, summary),
    }
    Ok(())
}

fn print_text(shape: &ShapeData, summary: bool) {
    println!("{}", shape.kind);
    println!("  radius      {:.12}", shape.radius);
    println!("  inradius    {:.12}", shape.inradius);
    println!("  midradius   {:.12}", shape.midradius);
    println!("  edgeLength  {:.12}", shape.edge_length);
    println!("  faceArea    {:.12}", shape.face_area);
    println!("  surfArea    {:.12}", shape.surf_area);
    println!("  volume      {:.12}", shape.volume);
    println!("  vertCount   {}", shape.vert_count);
    println!("  edgeCount   {}", shape.edge_count);
    println!("  faceCount   {}", shape.face_count);
    if summary {
        return;
    }
    println!("  vertices");
    for (i, v) in shape.vertices.iter().enumerate() {
        println!(
            "    {i:>2}  ({:+.12}, {:+.12}, {:+.12})",
            v.point.x, v.point.y, v.point.z
        );
    }
    println!("  edges");
    for e in &shape.edges {
        println!("    {:>2} - {:<2}  {:.12}", e.start.index(), e.end.index(), e.length);
    }
    println!("  faces");
    for f in &shape.faces {
        let cycle: Vec<String> = f.vertices.iter().map(|v| v.index().to_string()).collect();
        println!(
            "    [{}]  n = ({:+.6}, {:+.6}, {:+.6})",
            cycle.join(", "),
            f.normal.x,
            f.normal.y,
            f.normal.z
        );
    }
}
