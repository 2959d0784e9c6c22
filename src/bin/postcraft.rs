use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use postcraft::{
    BackgroundSet, BatchOptions, ComposeConfig, Compositor, PAYLOAD_FILE_NAME,
    compose_all_with_report,
    content::{
        assemble::{assemble_posts, composed_images, load_products, write_payloads},
        captions::{load_captions, save_captions, template_captions},
    },
};

#[derive(Parser, Debug)]
#[command(name = "postcraft", version)]
struct Cli {
    /// JSON config file; environment variables and flags override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace). Overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose one PNG per caption.
    Compose(ComposeArgs),
    /// Pair captions, composed images and products into a post payload file.
    Assemble(AssembleArgs),
    /// Compose, then assemble.
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct CaptionArgs {
    /// JSON array of caption strings.
    #[arg(long, conflicts_with = "templates")]
    captions: Option<PathBuf>,

    /// Use this many built-in template captions (default when no file is given).
    #[arg(long)]
    templates: Option<usize>,

    /// Also save the caption list as `hooks_<UTC timestamp>.json` in this directory.
    #[arg(long)]
    save_captions: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Background image directory.
    #[arg(long)]
    backgrounds: Option<PathBuf>,

    /// Output directory for composed images.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Primary font file.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Font size in pixels.
    #[arg(long)]
    font_size: Option<f32>,

    /// Target canvas width.
    #[arg(long)]
    width: Option<u32>,

    /// Target canvas height.
    #[arg(long)]
    height: Option<u32>,

    /// Overlay image pasted on every composition (repeatable).
    #[arg(long = "overlay")]
    overlays: Vec<PathBuf>,

    /// Compose on a worker pool.
    #[arg(long)]
    parallel: bool,

    /// Worker count for --parallel.
    #[arg(long, requires = "parallel")]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct PayloadArgs {
    /// Product CSV with a `title,price,link,image` header row.
    #[arg(long)]
    products: Option<PathBuf>,

    /// Payload output file.
    #[arg(long)]
    payload: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ComposeArgs {
    #[command(flatten)]
    captions: CaptionArgs,
    #[command(flatten)]
    render: RenderArgs,
}

#[derive(Args, Debug)]
struct AssembleArgs {
    #[command(flatten)]
    captions: CaptionArgs,

    /// Directory holding the composed_<n>.png files of these captions (defaults to the configured
    /// output directory).
    #[arg(long)]
    images: Option<PathBuf>,

    #[command(flatten)]
    payload: PayloadArgs,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    captions: CaptionArgs,
    #[command(flatten)]
    render: RenderArgs,
    #[command(flatten)]
    payload: PayloadArgs,
}

const DEFAULT_TEMPLATE_COUNT: usize = 10;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut cfg = ComposeConfig::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        cfg.log_level = level;
    }
    init_logging(&cfg.log_level)?;

    match cli.cmd {
        Command::Compose(args) => {
            apply_render_args(&mut cfg, &args.render)?;
            let captions = read_captions(&args.captions)?;
            compose(&cfg, &args.render, &captions)?;
        }
        Command::Assemble(args) => {
            let captions = read_captions(&args.captions)?;
            let images_dir = args.images.unwrap_or_else(|| cfg.output_dir.clone());
            let images = composed_images(&images_dir, captions.len());
            assemble(&cfg, &args.payload, &captions, &images)?;
        }
        Command::Run(args) => {
            apply_render_args(&mut cfg, &args.render)?;
            let captions = read_captions(&args.captions)?;
            let images = compose(&cfg, &args.render, &captions)?;
            assemble(&cfg, &args.payload, &captions, &images)?;
        }
    }
    Ok(())
}

fn init_logging(level: &str) -> anyhow::Result<()> {
    let level: tracing::Level = level
        .trim()
        .parse()
        .with_context(|| format!("invalid log level '{level}'"))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn apply_render_args(cfg: &mut ComposeConfig, args: &RenderArgs) -> anyhow::Result<()> {
    if let Some(dir) = &args.backgrounds {
        cfg.background_dir = dir.clone();
    }
    if let Some(dir) = &args.out {
        cfg.output_dir = dir.clone();
    }
    if let Some(font) = &args.font {
        cfg.font_path = Some(font.clone());
    }
    if let Some(size) = args.font_size {
        cfg.font_size = size;
    }
    if let Some(w) = args.width {
        cfg.canvas_width = w;
    }
    if let Some(h) = args.height {
        cfg.canvas_height = h;
    }
    cfg.overlays.extend(args.overlays.iter().cloned());
    cfg.validate()?;
    Ok(())
}

fn read_captions(args: &CaptionArgs) -> anyhow::Result<Vec<String>> {
    let captions = match (&args.captions, args.templates) {
        (Some(path), _) => load_captions(path)?,
        (None, n) => template_captions(n.unwrap_or(DEFAULT_TEMPLATE_COUNT)),
    };
    if let Some(dir) = &args.save_captions {
        let path = save_captions(dir, &captions)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(captions)
}

fn compose(
    cfg: &ComposeConfig,
    args: &RenderArgs,
    captions: &[String],
) -> anyhow::Result<Vec<Option<PathBuf>>> {
    let backgrounds = BackgroundSet::discover(&cfg.background_dir)?;
    let compositor = Compositor::from_config(cfg);
    let options = BatchOptions {
        parallel: args.parallel,
        threads: args.threads,
    };
    let report = compose_all_with_report(&compositor, &backgrounds, captions, &options)?;

    for path in &report.outputs {
        eprintln!("wrote {}", path.display());
    }
    if !report.failures.is_empty() {
        eprintln!(
            "{} of {} captions failed; see log for details",
            report.failures.len(),
            captions.len()
        );
    }
    Ok(report.outputs_by_index())
}

fn assemble(
    cfg: &ComposeConfig,
    args: &PayloadArgs,
    captions: &[String],
    images: &[Option<PathBuf>],
) -> anyhow::Result<()> {
    let products = match &args.products {
        Some(path) => load_products(path)?,
        None => Vec::new(),
    };
    let posts = assemble_posts(captions, images, &products);
    let out = args
        .payload
        .clone()
        .unwrap_or_else(|| default_payload_path(&cfg.output_dir));
    write_payloads(&out, &posts)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

/// Next to the composed image directory, like `data/posts_payload.json` for `data/composed`.
fn default_payload_path(output_dir: &Path) -> PathBuf {
    output_dir
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(output_dir)
        .join(PAYLOAD_FILE_NAME)
}
