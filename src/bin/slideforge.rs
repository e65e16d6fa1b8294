use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use slideforge::{
    DEFAULT_SMART_LIMIT, DeckSession, DeckSessionOpts, FontLibrary, RenderConfig, Tier,
};

#[derive(Parser, Debug)]
#[command(name = "slideforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render each slide to a PNG file in a directory.
    Slides(SlidesArgs),
    /// Render and bundle the deck into a single ZIP archive.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Input text file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Register a font as NAME=PATH (repeatable).
    #[arg(long = "font", value_name = "NAME=PATH", required = true)]
    fonts: Vec<String>,

    /// Body font family; must match a registered font NAME.
    #[arg(long, default_value = "Montserrat")]
    family: String,

    /// Body font size in pixels (40-160).
    #[arg(long, default_value_t = 85)]
    font_size: u32,

    /// Signature line drawn near the bottom of each slide.
    #[arg(long, default_value = "")]
    signature: String,

    /// Export without the free-tier watermark.
    #[arg(long, default_value_t = false)]
    premium: bool,

    /// Re-split the document into chunks of roughly LIMIT characters
    /// before rendering.
    #[arg(long, value_name = "LIMIT", num_args = 0..=1, default_missing_value = "220")]
    smart_split: Option<usize>,

    /// Render slides in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override worker thread count.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct SlidesArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output directory for slide-N.png files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output ZIP path. Defaults to <prefix>-<timestamp>.zip in the
    /// current directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// File name prefix used when --out is not given.
    #[arg(long, default_value = "carousel")]
    prefix: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Slides(args) => cmd_slides(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn build_session(common: &CommonArgs) -> anyhow::Result<DeckSession> {
    let mut fonts = FontLibrary::new();
    for spec in &common.fonts {
        let (name, path) = spec
            .split_once('=')
            .with_context(|| format!("--font '{spec}' is not NAME=PATH"))?;
        let bytes =
            std::fs::read(path).with_context(|| format!("read font file '{path}'"))?;
        fonts.register(name, bytes);
    }

    let config = RenderConfig {
        font_size_px: common.font_size,
        font_family: common.family.clone(),
        signature: common.signature.clone(),
        tier: if common.premium {
            Tier::Premium
        } else {
            Tier::Free
        },
    };
    let opts = DeckSessionOpts {
        parallel: common.parallel,
        threads: common.threads,
    };

    let mut session = DeckSession::new(fonts, config, opts)?;
    let raw = std::fs::read_to_string(&common.in_path)
        .with_context(|| format!("read input '{}'", common.in_path.display()))?;
    session.set_text(raw);
    if let Some(limit) = common.smart_split {
        session.resplit(if limit == 0 { DEFAULT_SMART_LIMIT } else { limit });
    }
    Ok(session)
}

fn cmd_slides(args: SlidesArgs) -> anyhow::Result<()> {
    let mut session = build_session(&args.common)?;
    let surfaces = session.render_deck()?.to_vec();
    if surfaces.is_empty() {
        anyhow::bail!("input document produced no slides");
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for (i, surface) in surfaces.iter().enumerate() {
        let out = args.out_dir.join(slideforge::entry_name(i as u32 + 1));
        image::save_buffer_with_format(
            &out,
            &surface.data,
            surface.width,
            surface.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", out.display()))?;
    }

    eprintln!("wrote {} slides to {}", surfaces.len(), args.out_dir.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut session = build_session(&args.common)?;
    let archive = session.export_zip()?;

    // The timestamped download name is a boundary convention; the archive's
    // internal entry names are the stable contract.
    let out = match args.out {
        Some(path) => path,
        None => {
            let ts = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            PathBuf::from(format!("{}-{ts}.zip", args.prefix))
        }
    };

    std::fs::write(&out, &archive.blob)
        .with_context(|| format!("write archive '{}'", out.display()))?;
    eprintln!(
        "wrote {} ({} entries)",
        out.display(),
        archive.entry_names.len()
    );
    Ok(())
}
