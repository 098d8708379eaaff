use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use inkstroke::Config;
use inkstroke::draw::{Frame, LogRenderObserver, ShapeRegistry, render_shapes};
use inkstroke::input::{PenTool, ToolContext, ToolEvent, UserSettings, system_time_provider};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Viewport tag stamped on strokes captured by a replay.
const REPLAY_VIEWPORT: &str = "replay";

#[derive(Parser, Debug)]
#[command(name = "inkstroke")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("INKSTROKE_GIT_HASH"), ")"),
    about = "Freehand stroke capture and variable-width rendering"
)]
struct Cli {
    /// Replay a JSON list of gesture events through the pen tool
    #[arg(long, value_name = "EVENTS", conflicts_with = "render")]
    replay: Option<PathBuf>,

    /// Render a JSON file of saved stroke records
    #[arg(long, value_name = "STROKES")]
    render: Option<PathBuf>,

    /// PNG file to write
    #[arg(long, short = 'o', value_name = "PNG")]
    output: Option<PathBuf>,

    /// Also save the replayed strokes as JSON records
    #[arg(long, value_name = "STROKES", requires = "replay")]
    save: Option<PathBuf>,

    /// Narrow strokes as the pointer speeds up (overrides config)
    #[arg(long, action = ArgAction::SetTrue, requires = "replay")]
    velocity: bool,

    /// Replay with the eraser selected (overrides config)
    #[arg(long, action = ArgAction::SetTrue, requires = "replay")]
    eraser: bool,

    /// Config file to use instead of ~/.config/inkstroke/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.replay.is_none() && cli.render.is_none() {
        print_usage();
        return Ok(());
    }

    let Some(output) = cli.output.as_deref() else {
        bail!("--output <PNG> is required with --replay or --render");
    };

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if cli.velocity {
        config.pen.velocity_based_width = true;
    }
    if cli.eraser {
        config.pen.eraser = true;
    }

    let frame = match (&cli.replay, &cli.render) {
        (Some(events), _) => {
            let frame = replay(&config, events)?;
            if let Some(save) = &cli.save {
                let records = serde_json::to_string_pretty(&frame.to_json())?;
                fs::write(save, records)
                    .with_context(|| format!("Failed to write strokes to {}", save.display()))?;
                log::info!("Saved {} stroke(s) to {}", frame.shapes.len(), save.display());
            }
            frame
        }
        (None, Some(strokes)) => load_frame(strokes)?,
        (None, None) => return Ok(()),
    };

    write_png(&config, &frame, output)?;
    log::info!("Rendered {} shape(s) to {}", frame.shapes.len(), output.display());
    Ok(())
}

/// Feeds every event in `path` through a fresh pen tool and returns the finished shapes.
fn replay(config: &Config, path: &Path) -> Result<Frame> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read events from {}", path.display()))?;
    let events: Vec<ToolEvent> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse events from {}", path.display()))?;

    let settings = UserSettings::from_config(config);
    let mut frame = Frame::with_limit(config.frame.max_shapes);
    let mut tool = PenTool::from_config(
        config,
        system_time_provider(),
        Box::new(|| Some(REPLAY_VIEWPORT.to_string())),
    );
    tool.set_render_observer(Some(Box::new(LogRenderObserver)));

    for (index, event) in events.into_iter().enumerate() {
        let mut ctx = ToolContext::new(&settings, &mut frame);
        if let Err(err) = tool.handle_event(&mut ctx, event) {
            log::warn!("Event {index}: {err}");
        }
    }

    if tool.is_drawing() {
        log::warn!("Replay ended mid-stroke; the unfinished stroke is discarded");
    }

    Ok(frame)
}

fn load_frame(path: &Path) -> Result<Frame> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read strokes from {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse strokes from {}", path.display()))?;
    Frame::from_json(value, &ShapeRegistry::with_defaults())
        .with_context(|| format!("Invalid stroke records in {}", path.display()))
}

fn write_png(config: &Config, frame: &Frame, output: &Path) -> Result<()> {
    let width = i32::try_from(config.surface.width).context("surface width too large")?;
    let height = i32::try_from(config.surface.height).context("surface height too large")?;
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
        .context("Failed to create image surface")?;
    {
        let ctx = cairo::Context::new(&surface).context("Failed to create Cairo context")?;
        render_shapes(&ctx, &frame.shapes);
    }
    surface.flush();

    let mut file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    surface
        .write_to_png(&mut file)
        .with_context(|| format!("Failed to encode PNG {}", output.display()))?;
    Ok(())
}

fn print_usage() {
    println!("inkstroke: Freehand stroke capture and variable-width rendering");
    println!();
    println!("Usage:");
    println!("  inkstroke --replay <EVENTS> --output <PNG> [--save <STROKES>] [--velocity] [--eraser]");
    println!("  inkstroke --render <STROKES> --output <PNG>");
    println!("  inkstroke --help");
    println!();
    println!("Event logs are JSON arrays such as:");
    println!(r#"  [{{"event": "drag-start", "point": {{"x": 10, "y": 10}}}},"#);
    println!(r#"   {{"event": "drag-continue", "point": {{"x": 40, "y": 12}}}},"#);
    println!(r#"   {{"event": "drag-end", "point": {{"x": 40, "y": 12}}}}]"#);
}
