use std::{
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scrollcue", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a scene and print the compilation report as JSON.
    Compile(CompileArgs),
    /// Evaluate every element at one scroll position.
    Sample(SampleArgs),
    /// Print the total scrollable extent (vh).
    Extent(SceneArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Fail on the first directive diagnostic.
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Debug)]
struct CompileArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug)]
struct SampleArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Global scroll position in vh.
    #[arg(long, allow_negative_numbers = true)]
    at: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Compile(args) => cmd_compile(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Extent(args) => cmd_extent(args),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn compile_scene(args: &SceneArgs) -> anyhow::Result<scrollcue::CompilationReport> {
    let scene = read_scene(&args.in_path)?;
    let opts = scrollcue::CompileOpts {
        strict: args.strict,
        ..scrollcue::CompileOpts::default()
    };
    let report = scene
        .compile(&opts)
        .with_context(|| format!("compile scene '{}'", args.in_path.display()))?;
    Ok(report)
}

fn read_scene(path: &Path) -> anyhow::Result<scrollcue::Scene> {
    scrollcue::Scene::from_path(path).with_context(|| format!("read scene '{}'", path.display()))
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let report = compile_scene(&args.scene)?;
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if args.pretty {
        serde_json::to_writer_pretty(&mut out, &report)
    } else {
        serde_json::to_writer(&mut out, &report)
    }
    .context("write report JSON")?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let report = compile_scene(&args.scene)?;
    let stdout = std::io::stdout();
    let mut renderer = scrollcue::TextRenderer::new(BufWriter::new(stdout.lock()));
    report
        .render(args.at, &mut renderer)
        .context("render samples")?;
    Ok(())
}

fn cmd_extent(args: SceneArgs) -> anyhow::Result<()> {
    let report = compile_scene(&args)?;
    println!("{}", report.total_extent);
    Ok(())
}
