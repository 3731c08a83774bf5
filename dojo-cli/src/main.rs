use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use dojo::{
    AnchorMetrics, AnchorPreset, AnchorRect, Device, FileBackend, Point, ProgressStore, Quiz,
    QuizPhase, QuizSession, ScaleMode, ScaledControls, StepTracker, Viewport, hierarchy,
    layout_2048, match_square_side, resolve_preview_rect,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "dojo", version)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve an anchor preset or custom anchors to a preview rect.
    Anchor(AnchorArgs),
    /// Print the resolved 2048 screen layout.
    Layout(LayoutArgs),
    /// Show canvas scaler results for each device frame.
    Scale(ScaleArgs),
    /// Play a quiz on stdin/stdout, resuming saved progress.
    Quiz(QuizArgs),
    /// Toggle and list completed lesson steps.
    Steps(StepsArgs),
    /// Print the editor hierarchy mock as indented rows.
    Tree(TreeArgs),
}

#[derive(Parser, Debug)]
struct AnchorArgs {
    /// Preset id (e.g. `center`, `stretch-all`).
    #[arg(long, conflicts_with_all = ["min", "max"])]
    preset: Option<AnchorPreset>,

    /// Anchor min as `x,y`.
    #[arg(long, requires = "max", value_parser = parse_point)]
    min: Option<Point>,

    /// Anchor max as `x,y`.
    #[arg(long, requires = "min", value_parser = parse_point)]
    max: Option<Point>,

    #[command(flatten)]
    metrics: MetricsArgs,

    /// Container width in pixels; with `--height`, output is in pixels.
    #[arg(long, requires = "height")]
    width: Option<f64>,

    /// Container height in pixels.
    #[arg(long, requires = "width")]
    height: Option<f64>,
}

#[derive(Parser, Debug)]
struct MetricsArgs {
    /// Point-anchor edge length as a fraction of the container.
    #[arg(long, default_value_t = AnchorMetrics::default().size)]
    size: f64,

    /// Stretch-anchor inset as a fraction of the container.
    #[arg(long, default_value_t = AnchorMetrics::default().margin)]
    margin: f64,
}

impl MetricsArgs {
    fn metrics(&self) -> anyhow::Result<AnchorMetrics> {
        Ok(AnchorMetrics::new(self.size, self.margin)?)
    }
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    #[command(flatten)]
    metrics: MetricsArgs,
}

#[derive(Parser, Debug)]
struct ScaleArgs {
    /// Scale mode: constantPixel, scaleWithScreen or constantPhysical.
    #[arg(long, default_value = "scaleWithScreen")]
    mode: ScaleMode,

    /// Match width (0) or height (1).
    #[arg(long = "match", default_value_t = 0.5)]
    match_factor: f64,

    /// Device ids to show (defaults to all).
    #[arg(long = "device")]
    devices: Vec<String>,
}

#[derive(Parser, Debug)]
struct QuizArgs {
    /// Quiz JSON (`{"id": .., "questions": [..]}`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Progress file.
    #[arg(long)]
    store: PathBuf,

    /// Override the quiz id used for the progress key.
    #[arg(long)]
    id: Option<String>,

    /// Discard saved progress before starting.
    #[arg(long, default_value_t = false)]
    restart: bool,
}

#[derive(Parser, Debug)]
struct StepsArgs {
    /// Progress file.
    #[arg(long)]
    store: PathBuf,

    /// Lesson slug the steps belong to.
    #[arg(long)]
    lesson: String,

    /// Step numbers to toggle, in order.
    #[arg(long = "toggle")]
    toggles: Vec<u32>,
}

#[derive(Parser, Debug)]
struct TreeArgs {
    /// Show the project folder tree instead of the scene hierarchy.
    #[arg(long, default_value_t = false)]
    project: bool,

    /// Node ids whose expansion to flip, in order.
    #[arg(long = "toggle")]
    toggles: Vec<String>,

    /// Keep only items whose name contains this text.
    #[arg(long)]
    filter: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Anchor(args) => cmd_anchor(args),
        Command::Layout(args) => cmd_layout(args),
        Command::Scale(args) => cmd_scale(args),
        Command::Quiz(args) => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            cmd_quiz(args, stdin.lock(), stdout.lock())
        }
        Command::Steps(args) => cmd_steps(args),
        Command::Tree(args) => cmd_tree(args, std::io::stdout().lock()),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got '{s}'"))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("x: {e}"))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("y: {e}"))?;
    Ok(Point::new(x, y))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("write json to stdout")?;
    writeln!(out)?;
    Ok(())
}

#[derive(Serialize)]
struct PixelRect {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

fn cmd_anchor(args: AnchorArgs) -> anyhow::Result<()> {
    let anchor = match (args.preset, args.min, args.max) {
        (Some(preset), _, _) => preset.anchor(),
        (None, Some(min), Some(max)) => AnchorRect::new(min, max)?,
        _ => anyhow::bail!("pass --preset or both --min and --max"),
    };
    let rect = resolve_preview_rect(&anchor, &args.metrics.metrics()?);

    match (args.width, args.height) {
        (Some(w), Some(h)) => {
            let px = rect.scaled(Viewport::new(w, h)?);
            print_json(&PixelRect {
                left: px.x0,
                top: px.y0,
                width: px.width(),
                height: px.height(),
            })
        }
        _ => print_json(&rect),
    }
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let tree = layout_2048();
    tree.validate()?;
    print_json(&tree.resolve(&args.metrics.metrics()?))
}

#[derive(Serialize)]
struct DeviceScale {
    device: &'static str,
    label: &'static str,
    scale: f64,
    controls: ScaledControls,
    match_side: f64,
}

fn cmd_scale(args: ScaleArgs) -> anyhow::Result<()> {
    let devices = Device::select(&args.devices);
    let mut rows = Vec::with_capacity(devices.len());
    for device in devices {
        let p = device.profile();
        let scale = args.mode.ui_scale(p.width, p.height);
        rows.push(DeviceScale {
            device: device.id(),
            label: p.label,
            scale,
            controls: ScaledControls::for_scale(scale),
            match_side: match_square_side(p.width, p.height, args.match_factor)?,
        });
    }
    print_json(&serde_json::json!({
        "mode": args.mode.inspector_name(),
        "devices": rows,
    }))
}

fn cmd_quiz<R: BufRead, W: Write>(args: QuizArgs, input: R, mut out: W) -> anyhow::Result<()> {
    let f = std::fs::File::open(&args.in_path)
        .with_context(|| format!("open quiz '{}'", args.in_path.display()))?;
    let mut quiz: Quiz = serde_json::from_reader(std::io::BufReader::new(f))
        .with_context(|| format!("parse quiz '{}'", args.in_path.display()))?;
    if args.id.is_some() {
        quiz.id = args.id;
    }

    let store = ProgressStore::new(FileBackend::new(&args.store));
    let mut session = QuizSession::restore(quiz, store)?;
    if args.restart {
        session.restart();
    }

    let mut lines = input.lines();
    loop {
        match session.phase() {
            QuizPhase::Finished => {
                let Some(summary) = session.summary() else {
                    break;
                };
                writeln!(out, "{summary}")?;
                writeln!(out, "{}", summary.verdict().message())?;
                break;
            }
            QuizPhase::Answering => {
                let Some(question) = session.current_question() else {
                    break;
                };
                writeln!(
                    out,
                    "Вопрос {} из {}: {}",
                    session.state().current_index + 1,
                    session.len(),
                    question.question
                )?;
                for (idx, option) in question.options.iter().enumerate() {
                    writeln!(out, "  {}. {}", idx + 1, option.text)?;
                }
                let Some(line) = lines.next() else {
                    break;
                };
                let line = line.context("read answer")?;
                let Ok(choice) = line.trim().parse::<usize>() else {
                    writeln!(out, "enter an option number")?;
                    continue;
                };
                if choice == 0 {
                    writeln!(out, "enter an option number")?;
                    continue;
                }
                session.select(choice - 1);
            }
            QuizPhase::Answered { correct, .. } => {
                writeln!(out, "{}", if correct { "✓ верно" } else { "✗ неверно" })?;
                if let Some(text) = session.explanation() {
                    writeln!(out, "{text}")?;
                }
                session.next();
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn cmd_steps(args: StepsArgs) -> anyhow::Result<()> {
    let store = ProgressStore::new(FileBackend::new(&args.store));
    let mut steps = StepTracker::restore(store, Some(&args.lesson));
    for n in args.toggles {
        let done = steps.toggle(n);
        tracing::debug!(step = n, done, "toggled step");
    }
    print_json(&steps.completed())
}

fn cmd_tree<W: Write>(args: TreeArgs, mut out: W) -> anyhow::Result<()> {
    let mut items = if args.project {
        hierarchy::project_folders()
    } else {
        hierarchy::scene_hierarchy()
    };
    hierarchy::validate(&items)?;
    for id in &args.toggles {
        if !hierarchy::toggle_in_place(&mut items, id) {
            tracing::warn!(id = %id, "no expandable item with this id");
        }
    }
    if let Some(query) = args.filter.as_deref() {
        items = hierarchy::filter(&items, query);
    }

    for row in hierarchy::visible_rows(&items) {
        let marker = match (row.item.has_children(), row.item.expanded) {
            (false, _) => ' ',
            (true, true) => '▾',
            (true, false) => '▸',
        };
        writeln!(
            out,
            "{:indent$}{marker} {}",
            "",
            row.item.name,
            indent = row.depth * 2
        )?;
    }
    out.flush()?;
    Ok(())
}
