use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use pathreveal::Clock as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pathreveal", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the parsed elements and the chosen render order as JSON.
    Inspect(InspectArgs),
    /// Render the reveal as a PNG sequence.
    Frames(FramesArgs),
    /// Run the reveal without painting and dump diagnostics as JSON lines.
    Record(RecordArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input SVG document.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Reveal configuration JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ordering policy name, overriding the configuration.
    #[arg(long)]
    order: Option<String>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RecordArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output JSONL path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Record(args) => cmd_record(args),
    }
}

fn load_config(input: &InputArgs) -> anyhow::Result<pathreveal::RevealConfig> {
    let mut cfg = match &input.config {
        Some(path) => pathreveal::RevealConfig::from_json_file(path)?,
        None => pathreveal::RevealConfig::default(),
    };
    if let Some(order) = &input.order {
        cfg.order = order.clone();
    }
    cfg.validate()?;
    Ok(cfg)
}

fn load_engine(
    input: &InputArgs,
) -> anyhow::Result<(pathreveal::RevealConfig, pathreveal::RevealEngine)> {
    let cfg = load_config(input)?;
    let drawing = pathreveal::parse(&pathreveal::Source::SvgFile(input.in_path.clone()))
        .with_context(|| format!("load drawing '{}'", input.in_path.display()))?;
    let mut engine = pathreveal::RevealEngine::new(&cfg)?;
    engine.set_drawing_with_range(drawing, cfg.range)?;
    Ok((cfg, engine))
}

#[derive(serde::Serialize)]
struct InspectReport<'a> {
    requested_policy: pathreveal::OrderPolicy,
    effective_policy: pathreveal::OrderPolicy,
    elements: &'a [pathreveal::DrawingElement],
    order: Vec<(usize, usize)>,
    background: Vec<usize>,
    foreground: Vec<usize>,
    excluded: Vec<usize>,
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let (_, engine) = load_engine(&args.input)?;
    let ordered = engine.ordered_segments();
    let indices = |positions: &[usize]| -> Vec<usize> {
        positions.iter().map(|&p| ordered[p].path_index).collect()
    };
    let partition = engine
        .partition()
        .context("engine has no partition after load")?;

    let report = InspectReport {
        requested_policy: engine.requested_policy(),
        effective_policy: engine.effective_policy(),
        elements: &engine.drawing().elements,
        order: ordered
            .iter()
            .map(|s| (s.path_index, s.source_order))
            .collect(),
        background: indices(&partition.background),
        foreground: indices(&partition.foreground),
        excluded: indices(&partition.excluded),
    };
    let json = serde_json::to_string_pretty(&report).context("serialize inspect report")?;
    println!("{json}");
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let (cfg, mut engine) = load_engine(&args.input)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let mut painter = pathreveal::CpuPainter::new(cfg.canvas, cfg.background)?;
    if cfg.scale_to_viewport {
        painter.set_transform(pathreveal::fit_transform(
            engine.drawing().bounds,
            cfg.canvas,
        ));
    }

    let mut clock = pathreveal::FrameClock::new(cfg.fps, cfg.duration_frames)?;
    let mut completed = 0usize;
    for f in 0..=cfg.duration_frames {
        clock.seek(pathreveal::FrameIndex(f));
        let sample = clock.sample();
        painter.begin_frame();
        let events = engine.render_frame(sample, &mut painter)?;
        completed += events
            .iter()
            .filter(|e| matches!(e, pathreveal::CompletionEvent::SegmentCompleted { .. }))
            .count();

        let frame = painter.finish_frame();
        let path = frame_path(&args.out, f);
        frame.to_png(&path)?;
    }

    eprintln!(
        "wrote {} frames to {} ({completed} elements completed)",
        cfg.duration_frames + 1,
        args.out.display()
    );
    Ok(())
}

fn frame_path(dir: &Path, frame: u64) -> PathBuf {
    dir.join(format!("frame_{frame:05}.png"))
}

fn cmd_record(args: RecordArgs) -> anyhow::Result<()> {
    let (cfg, mut engine) = load_engine(&args.input)?;
    let recorder = std::rc::Rc::new(std::cell::RefCell::new(pathreveal::FrameRecorder::new()));
    engine.set_diagnostics(Box::new(recorder.clone()));

    let mut clock = pathreveal::FrameClock::new(cfg.fps, cfg.duration_frames)?;
    for f in 0..=cfg.duration_frames {
        clock.seek(pathreveal::FrameIndex(f));
        let sample = clock.sample();
        engine.begin_frame(sample)?;
        engine.end_frame();
    }
    engine.take_diagnostics();

    let lines = recorder.borrow().to_json_lines()?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, lines)
                .with_context(|| format!("write diagnostics '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => print!("{lines}"),
    }
    Ok(())
}
