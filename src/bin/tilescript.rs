use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tilescript", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a script and write the final composite.
    Run(RunArgs),
    /// Parse a script and print its variables, images, axes and coordinates as JSON.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Script path; reads standard input when omitted.
    script: Option<PathBuf>,

    /// Output image path (default: the `output` variable, then `output.png`).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Image backend.
    #[arg(long, value_enum, default_value_t = BackendChoice::Magick)]
    backend: BackendChoice,

    /// Foreground image name (default: the `foreground` variable, then `fg`).
    #[arg(long)]
    fg: Option<String>,

    /// Background image name (default: the `background` variable, then `bg`).
    #[arg(long)]
    bg: Option<String>,

    /// Scale the foreground to WIDTHxHEIGHT before each composite.
    #[arg(long)]
    size: Option<tilescript::Geometry>,

    /// ImageMagick executable (magick backend only).
    #[arg(long, default_value = "magick")]
    magick: PathBuf,

    /// Script read size in bytes.
    #[arg(long, default_value_t = tilescript::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Script path; reads standard input when omitted.
    script: Option<PathBuf>,

    /// Script read size in bytes.
    #[arg(long, default_value_t = tilescript::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    /// Shell out to ImageMagick.
    Magick,
    /// Composite in-process.
    Raster,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_script(path: Option<&Path>) -> anyhow::Result<Box<dyn Read>> {
    Ok(match path {
        Some(p) => Box::new(
            File::open(p).with_context(|| format!("open script '{}'", p.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    })
}

fn parse_script(
    path: Option<&Path>,
    chunk_size: usize,
) -> anyhow::Result<tilescript::ContextFactory> {
    let r = open_script(path)?;
    let source = path.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
    let factory = tilescript::parse_reader_with_chunk_size(r, chunk_size)
        .with_context(|| format!("parse script {source}"))?;
    for d in factory.diagnostics() {
        eprintln!("warning: {source}:{}: {}", d.line, d.kind);
    }
    Ok(factory)
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let factory = parse_script(args.script.as_deref(), args.chunk_size)?;

    match args.backend {
        BackendChoice::Magick => {
            let tool = tilescript::MagickTool::new().with_program(&args.magick);
            if !tool.is_available() {
                anyhow::bail!(
                    "'{}' was not found or failed to run; install ImageMagick or use --backend raster",
                    args.magick.display()
                );
            }
            run_with(&factory, &tool, &args)
        }
        BackendChoice::Raster => {
            let tool = tilescript::RasterTool::default();
            run_with(&factory, &tool, &args)
        }
    }
}

fn run_with<T: tilescript::ImageTool>(
    factory: &tilescript::ContextFactory,
    tool: &T,
    args: &RunArgs,
) -> anyhow::Result<()> {
    let ctx = factory.build(tool).with_context(|| "load script images")?;

    let mut opts = tilescript::ComposeOpts::from_vars(&ctx)?;
    if let Some(out) = &args.out {
        opts.out = out.clone();
    }
    if let Some(fg) = &args.fg {
        opts.foreground = fg.clone();
    }
    if let Some(bg) = &args.bg {
        opts.background = bg.clone();
    }
    if args.size.is_some() {
        opts.size = args.size;
    }

    let stats = tilescript::render(&ctx, tool, &opts)?;
    eprintln!(
        "wrote {} ({} composites)",
        opts.out.display(),
        stats.composites
    );
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let factory = parse_script(args.script.as_deref(), args.chunk_size)?;
    let plan = factory.plan();
    let stdout = io::stdout().lock();
    serde_json::to_writer_pretty(stdout, &plan).with_context(|| "write plan JSON")?;
    println!();
    Ok(())
}
