use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use punchkit::init_logging;
use punchkit_core::model::{GridDivisionConfig, HoleShape, MarginSet, Panel};
use punchkit_core::sampling::{SampleMode, SampleParams};
use punchkit_export::{export, ExportFormat, ExportGate, ExportOptions, OpenGate};
use punchkit_pattern::{PatternController, PatternDescription, PatternState, PatternStatistics};
use punchkit_sampler::RasterBuffer;
use punchkit_settings::{Settings, SettingsManager};

#[derive(Parser)]
#[command(name = "punchkit")]
#[command(about = "Convert images into punch-hole patterns for perforated aluminum panels")]
#[command(version)]
struct Cli {
    /// Settings file overriding the platform default.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample an image into a punch pattern.
    Sample(SampleArgs),

    /// Export a saved pattern to a manufacturing format.
    Export(ExportArgs),

    /// Print statistics for a saved pattern.
    Info {
        /// Path to a pattern JSON file.
        pattern: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
struct SampleArgs {
    /// Path to the input image.
    image: PathBuf,

    /// Path to write the pattern (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Conversion mode (density, contour, pixel).
    #[arg(long)]
    mode: Option<SampleMode>,

    /// Punch diameters in mm, comma separated.
    #[arg(long, value_delimiter = ',')]
    diameters: Vec<f64>,

    /// Grid pitch between sample points in mm.
    #[arg(long)]
    spacing: Option<f64>,

    /// Edge exclusion band in mm.
    #[arg(long)]
    edge_margin: Option<f64>,

    /// Hole shape (circle, square, hexagon, triangle).
    #[arg(long)]
    shape: Option<HoleShape>,

    /// Panel length (X) in mm.
    #[arg(long)]
    panel_length: Option<f64>,

    /// Panel height (Y) in mm.
    #[arg(long)]
    panel_height: Option<f64>,

    /// Panel thickness in mm.
    #[arg(long)]
    thickness: Option<f64>,

    /// Brightness adjustment percentage (100 = unchanged).
    #[arg(long, default_value = "100.0")]
    brightness: f64,

    /// Contrast adjustment percentage (100 = unchanged).
    #[arg(long, default_value = "100.0")]
    contrast: f64,

    /// Rotation about the image center in degrees.
    #[arg(long, default_value = "0.0")]
    rotation: f64,

    /// Enable grid division cut lines.
    #[arg(long)]
    grid: bool,

    /// Number of vertical columns when grid division is enabled.
    #[arg(long)]
    grid_columns: Option<u32>,

    /// Number of horizontal bands when grid division is enabled.
    #[arg(long)]
    grid_rows: Option<u32>,

    /// Also export the pattern in this format (dxf, gcode, report, csv).
    #[arg(long)]
    format: Option<ExportFormat>,

    /// Output path for the export; defaults to the project name plus the
    /// format extension.
    #[arg(long)]
    export_out: Option<PathBuf>,

    /// Path to write a reproducible pattern record (JSON).
    #[arg(long)]
    describe: Option<PathBuf>,

    /// Project name used in reports and default file names.
    #[arg(long)]
    name: Option<String>,
}

#[derive(Debug, Clone, Args)]
struct ExportArgs {
    /// Path to a pattern JSON file produced by `sample`.
    pattern: PathBuf,

    /// Export format (dxf, gcode, report, csv).
    #[arg(long)]
    format: ExportFormat,

    /// Output path; defaults to the project name plus the format extension.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Project name used in reports and default file names.
    #[arg(long)]
    name: Option<String>,

    /// Feed rate override in mm/min.
    #[arg(long)]
    feed_rate: Option<f64>,

    /// Plunge rate override in mm/min.
    #[arg(long)]
    plunge_rate: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Sample(args) => run_sample(&args, &settings),
        Commands::Export(args) => run_export(&args, &settings),
        Commands::Info { pattern } => run_info(&pattern),
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut manager = match path {
        Some(p) => SettingsManager::with_path(p.to_path_buf()),
        None => SettingsManager::new().context("resolving settings path")?,
    };
    manager.load().context("loading settings")?;
    Ok(manager.settings().clone())
}

// ── sample ─────────────────────────────────────────────────────────────

fn run_sample(args: &SampleArgs, settings: &Settings) -> anyhow::Result<()> {
    info!("Loading image: {}", args.image.display());
    let img = image::open(&args.image)
        .with_context(|| format!("Failed to open image {}", args.image.display()))?;
    let raster = RasterBuffer::from_image(img);
    info!("Image size: {}x{}", raster.width(), raster.height());

    let params = build_params(args, settings);
    let thickness = args.thickness.unwrap_or(settings.panel.thickness_mm);
    let panel = Panel::new(params.panel_length_mm, params.panel_height_mm, thickness);

    let holes = punchkit_sampler::sample(&raster, &params).context("sampling image")?;
    info!("Sampled {} holes in {} mode", holes.len(), params.mode);

    let controller = PatternController::new();
    controller.set_panel(panel)?;
    controller.set_margins(MarginSet::with_edge_exclusion(params.edge_margin_mm));
    controller.set_grid_config(grid_config(args, settings));
    controller.set_holes(holes);

    let state = controller.snapshot();
    let stats = PatternStatistics::compute(&state);
    info!(
        "Pattern: {} holes, {} cut lines, {:.1}% material",
        stats.total_holes, stats.grid_line_count, stats.material_usage_percent
    );

    let json = serde_json::to_string_pretty(&state)?;
    fs::write(&args.out, &json).with_context(|| format!("writing {}", args.out.display()))?;
    info!("Pattern written to {}", args.out.display());

    if let Some(describe_path) = &args.describe {
        let record = PatternDescription::new(&state, &params);
        fs::write(describe_path, record.to_json()?)
            .with_context(|| format!("writing {}", describe_path.display()))?;
        info!("Pattern record written to {}", describe_path.display());
    }

    if let Some(format) = args.format {
        let opts = export_options(args.name.clone(), settings);
        write_export(&state, format, &opts, args.export_out.as_deref())?;
    }

    Ok(())
}

/// Sampling parameters from CLI arguments, falling back to settings for
/// anything not given.
fn build_params(args: &SampleArgs, settings: &Settings) -> SampleParams {
    let mut params = settings.sampling.to_params(&settings.panel);
    if let Some(mode) = args.mode {
        params.mode = mode;
    }
    if !args.diameters.is_empty() {
        params.hole_diameters = args.diameters.clone();
        params
            .hole_diameters
            .sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    }
    if let Some(spacing) = args.spacing {
        params.hole_spacing_mm = spacing;
    }
    if let Some(margin) = args.edge_margin {
        params.edge_margin_mm = margin;
    }
    if let Some(shape) = args.shape {
        params.shape = shape;
    }
    if let Some(length) = args.panel_length {
        params.panel_length_mm = length;
    }
    if let Some(height) = args.panel_height {
        params.panel_height_mm = height;
    }
    params.brightness_pct = args.brightness;
    params.contrast_pct = args.contrast;
    params.rotation_deg = args.rotation;
    params
}

fn grid_config(args: &SampleArgs, settings: &Settings) -> GridDivisionConfig {
    let mut config = settings.grid.clone();
    if args.grid {
        config.enabled = true;
    }
    if let Some(columns) = args.grid_columns {
        config.set_vertical_count(columns);
    }
    if let Some(rows) = args.grid_rows {
        config.set_horizontal_count(rows);
    }
    config
}

// ── export ─────────────────────────────────────────────────────────────

fn run_export(args: &ExportArgs, settings: &Settings) -> anyhow::Result<()> {
    let state = read_pattern(&args.pattern)?;

    let mut opts = export_options(args.name.clone(), settings);
    if let Some(feed) = args.feed_rate {
        opts.toolpath.feed_rate = feed;
    }
    if let Some(plunge) = args.plunge_rate {
        opts.toolpath.plunge_rate = plunge;
    }

    write_export(&state, args.format, &opts, args.out.as_deref())
}

fn export_options(name: Option<String>, settings: &Settings) -> ExportOptions {
    let mut opts = ExportOptions::default();
    if let Some(name) = name {
        opts.project_name = name;
    }
    opts.toolpath = settings.toolpath;
    opts
}

fn write_export(
    state: &PatternState,
    format: ExportFormat,
    opts: &ExportOptions,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let mut gate = OpenGate;
    if !gate.may_export() {
        anyhow::bail!("export quota exhausted");
    }

    let bytes = export(state, format, opts)?;
    let path = match out {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(format!("{}.{}", opts.project_name, format.extension())),
    };
    fs::write(&path, &bytes).with_context(|| format!("writing {}", path.display()))?;
    gate.record_usage();
    info!(
        "{} export written to {} ({} bytes)",
        format,
        path.display(),
        bytes.len()
    );

    Ok(())
}

// ── info ───────────────────────────────────────────────────────────────

fn run_info(path: &Path) -> anyhow::Result<()> {
    let state = read_pattern(path)?;
    let stats = PatternStatistics::compute(&state);

    println!("punchkit pattern {}", path.display());
    println!("  panel:            {}", state.panel);
    println!("  holes:            {}", stats.total_holes);
    println!("  after filtering:  {}", state.filtered_holes.len());
    println!("  small (<3mm):     {}", stats.small_holes);
    println!("  medium (3-5mm):   {}", stats.medium_holes);
    println!("  large (>=5mm):    {}", stats.large_holes);
    println!("  cut lines:        {}", stats.grid_line_count);
    println!("  material usage:   {:.1}%", stats.material_usage_percent);

    Ok(())
}

fn read_pattern(path: &Path) -> anyhow::Result<PatternState> {
    let json =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let state = serde_json::from_str(&json)
        .with_context(|| format!("parsing pattern {}", path.display()))?;
    Ok(state)
}
