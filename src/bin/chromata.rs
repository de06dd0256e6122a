use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chromata::{
    Canvas, Config, CpuSurface, ManualScheduler, OriginSpec, Options, Session, decode_image,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chromata", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Trace an image with color-seeking pathfinders and write the drawing as a PNG.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Source image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Options JSON (camelCase keys). Flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Frames to run unless the iteration limit stops the session first.
    #[arg(long, default_value_t = 300)]
    frames: u64,

    /// Directory receiving intermediate frames.
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    /// Write every K-th frame to `--frames-dir`.
    #[arg(long, default_value_t = 10)]
    every: u64,

    #[arg(long)]
    count: Option<f64>,

    #[arg(long)]
    speed: Option<f64>,

    /// Radians.
    #[arg(long)]
    turning_angle: Option<f64>,

    #[arg(long)]
    line_width: Option<f64>,

    /// smooth | square | point
    #[arg(long)]
    line_mode: Option<String>,

    /// color | greyscale
    #[arg(long)]
    color_mode: Option<String>,

    /// Canvas composite operation, e.g. lighten, lighter, multiply.
    #[arg(long)]
    composite: Option<String>,

    /// Space-separated origin tokens, e.g. "bottom left" or "50% 50%".
    #[arg(long)]
    origin: Option<String>,

    /// low | high
    #[arg(long)]
    key: Option<String>,

    #[arg(long)]
    iteration_limit: Option<u64>,

    /// Fit the drawing inside a WxH box.
    #[arg(long, value_parser = parse_container)]
    container: Option<Canvas>,
}

impl RenderArgs {
    fn flag_options(&self) -> Options {
        Options {
            path_finder_count: self.count,
            origin: self.origin.clone().map(OriginSpec::One),
            speed: self.speed,
            turning_angle: self.turning_angle,
            color_mode: self.color_mode.clone(),
            line_width: self.line_width,
            line_mode: self.line_mode.clone(),
            composite_operation: self.composite.clone(),
            output_size: self.container.map(|_| "container".to_owned()),
            container: self.container,
            iteration_limit: self.iteration_limit,
            key: self.key.clone(),
        }
    }
}

fn parse_container(s: &str) -> Result<Canvas, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let w = w.trim().parse::<u32>().map_err(|e| e.to_string())?;
    let h = h.trim().parse::<u32>().map_err(|e| e.to_string())?;
    Ok(Canvas::new(w, h))
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn read_options(path: &Path) -> anyhow::Result<Options> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read options '{}'", path.display()))?;
    Ok(Options::from_json(&json)?)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let base = match &args.config {
        Some(path) => read_options(path)?,
        None => Options::default(),
    };
    let mut config = Config::from_options(&base.overlay(args.flag_options()));

    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let decoded = decode_image(&bytes, config.output_size)
        .with_context(|| format!("decode image '{}'", args.in_path.display()))?;
    config.apply_output_scale(decoded.scale);

    let canvas = decoded.pixels.canvas();
    tracing::info!(
        width = canvas.width,
        height = canvas.height,
        agents = config.path_finder_count,
        "rendering"
    );

    if let Some(dir) = &args.frames_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create frames dir '{}'", dir.display()))?;
    }

    let mut session = Session::new(config, CpuSurface::new(canvas)?, ManualScheduler::new());
    session.image_ready(decoded.pixels)?;
    session.start();

    let every = args.every.max(1);
    let mut written = session.iteration_count();
    loop {
        let count = session.iteration_count();
        if let Some(dir) = &args.frames_dir
            && count % every == 0
            && count != written
        {
            write_png(session.surface(), &dir.join(format!("frame_{count:06}.png")))?;
            written = count;
        }
        if count >= args.frames {
            break;
        }
        let Some(token) = session.scheduler_mut().take_due() else {
            break;
        };
        session.on_frame(token);
    }

    let iterations = session.stop();
    let (surface, _) = session.into_parts();
    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    write_png(&surface, &args.out)?;
    tracing::info!(iterations, out = %args.out.display(), "wrote drawing");
    Ok(())
}

fn write_png(surface: &CpuSurface, path: &Path) -> anyhow::Result<()> {
    surface
        .to_rgba_image()
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))
}
