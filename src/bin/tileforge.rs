use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use sha2::Digest as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tileforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the SHA-256 of a frame's RGB bytes.
    Digest(DigestArgs),
}

/// Scene options shared by every subcommand. Flags override the config file.
#[derive(Args, Debug)]
struct SceneArgs {
    /// Run config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Tile edge length in pixels.
    #[arg(long)]
    tile_size: Option<u32>,

    /// Pattern name (e.g. `polar`, `wave-interference`).
    #[arg(long)]
    pattern: Option<tileforge::PatternKind>,

    /// Color mode name.
    #[arg(long)]
    color: Option<tileforge::ColorMode>,

    /// Randomness mode name.
    #[arg(long)]
    randomness: Option<tileforge::RandomnessMode>,

    /// `filled` or `outline`.
    #[arg(long)]
    fill: Option<tileforge::TileFill>,

    /// Use the time-driven pattern variants.
    #[arg(long)]
    animated: bool,

    /// Worker threads per frame.
    #[arg(long)]
    workers: Option<usize>,

    /// Worker output placement.
    #[arg(long, value_enum)]
    assembly: Option<AssemblyChoice>,

    /// Base seed.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AssemblyChoice {
    Direct,
    Scratch,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Animation clock.
    #[arg(long)]
    time: Option<f32>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Number of frames.
    #[arg(long)]
    frames: Option<u64>,

    /// Frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Clock advance per frame.
    #[arg(long)]
    time_step: Option<f32>,

    /// Draw a new seed for every frame.
    #[arg(long)]
    reseed_each_frame: bool,

    /// Video bitrate in kbit/s.
    #[arg(long)]
    bitrate_kbps: Option<u32>,

    /// x264 preset.
    #[arg(long)]
    preset: Option<String>,

    /// x264 tune.
    #[arg(long)]
    tune: Option<String>,
}

#[derive(Parser, Debug)]
struct DigestArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Animation clock.
    #[arg(long)]
    time: Option<f32>,

    /// Also render single-threaded and fail unless both digests match.
    #[arg(long)]
    check_reference: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Digest(args) => cmd_digest(args),
    }
}

fn load_config(scene: &SceneArgs) -> anyhow::Result<tileforge::RunConfig> {
    let mut cfg = match &scene.config {
        Some(path) => tileforge::RunConfig::from_path(path)
            .with_context(|| format!("load run config '{}'", path.display()))?,
        None => tileforge::RunConfig::default(),
    };
    if let Some(v) = scene.width {
        cfg.width = v;
    }
    if let Some(v) = scene.height {
        cfg.height = v;
    }
    if let Some(v) = scene.tile_size {
        cfg.tile_size = v;
    }
    if let Some(v) = scene.pattern {
        cfg.pattern = v;
    }
    if let Some(v) = scene.color {
        cfg.color_mode = v;
    }
    if let Some(v) = scene.randomness {
        cfg.randomness = v;
    }
    if let Some(v) = scene.fill {
        cfg.fill = v;
    }
    if scene.animated {
        cfg.animated = true;
    }
    if let Some(v) = scene.workers {
        cfg.workers = v;
    }
    if let Some(v) = scene.assembly {
        cfg.assembly = match v {
            AssemblyChoice::Direct => tileforge::AssemblyStrategy::Direct,
            AssemblyChoice::Scratch => tileforge::AssemblyStrategy::Scratch,
        };
    }
    if let Some(v) = scene.seed {
        cfg.seed = v;
    }
    Ok(cfg)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.scene)?;
    cfg.validate()?;
    let time = args.time.unwrap_or(cfg.start_time);

    let mut pipeline = tileforge::configure(cfg.pipeline_config())?;
    let frame = pipeline.generate_frame(cfg.seed, time)?;
    tileforge::save_png(&args.out, frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.scene)?;
    if let Some(v) = args.frames {
        cfg.frames = v;
    }
    if let Some(v) = args.fps {
        cfg.fps = v;
    }
    if let Some(v) = args.time_step {
        cfg.time_step = v;
    }
    if args.reseed_each_frame {
        cfg.reseed_each_frame = true;
    }
    if let Some(v) = args.bitrate_kbps {
        cfg.encoder.bitrate_kbps = v;
    }
    if let Some(v) = args.preset {
        cfg.encoder.preset = v;
    }
    if let Some(v) = args.tune {
        cfg.encoder.tune = Some(v);
    }
    cfg.validate()?;

    let mut pipeline = tileforge::configure(cfg.pipeline_config())?;
    let mut session = tileforge::EncodeSession::with_target(
        tileforge::EncodeTarget::Mp4(tileforge::FfmpegOpts::new(&args.out)),
        cfg.encode_params()?,
    )?;

    let rendered = tileforge::render_to_session(&mut pipeline, &mut session, &cfg.schedule());
    // Finalize whatever was written even when rendering stopped early.
    let closed = session.close();
    let stats = rendered?;
    let summary = closed?;

    eprintln!(
        "wrote {} ({} frames, {:.2}s of video, {:.1} fps)",
        args.out.display(),
        summary.frames,
        summary.duration_secs,
        stats.frames_per_sec()
    );
    Ok(())
}

fn cmd_digest(args: DigestArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.scene)?;
    cfg.validate()?;
    let time = args.time.unwrap_or(cfg.start_time);

    let mut pipeline = tileforge::configure(cfg.pipeline_config())?;
    let digest = sha256_hex(pipeline.generate_frame(cfg.seed, time)?.data());

    if args.check_reference {
        let mut chaos = tileforge::ChaoticState::INITIAL;
        let reference =
            tileforge::render_reference(&cfg.pipeline_config(), cfg.seed, time, &mut chaos)?;
        let expected = sha256_hex(reference.data());
        if expected != digest {
            anyhow::bail!("parallel frame {digest} differs from reference {expected}");
        }
    }

    println!(
        "{digest}  {}x{} {} {} {}",
        cfg.width, cfg.height, cfg.pattern, cfg.color_mode, cfg.randomness
    );
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
