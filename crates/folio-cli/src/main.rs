//! Folio CLI - inspect tooltip placement and settings.

use clap::{Parser, Subcommand};
use folio_core::{Point, Rect, Size};
use folio_widgets::{
    adjust, layout_panel, Adjustment, GeometrySnapshot, PanelLayout, Placement, TooltipSettings,
    WidgetError,
};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Inspect tooltip placement and settings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute where a tooltip panel lands for a given geometry
    Place {
        /// Viewport size as WxH
        #[arg(long, value_parser = parse_size, default_value = "1280x720")]
        viewport: Size,

        /// Trigger rect as X,Y,W,H
        #[arg(long, value_parser = parse_rect)]
        trigger: Rect,

        /// Panel size as WxH
        #[arg(long, value_parser = parse_size)]
        panel: Size,

        /// Requested placement (overrides the settings file)
        #[arg(short, long)]
        placement: Option<String>,

        /// Settings file (.toml, .yaml or .yml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Load, validate and print a settings file
    Config {
        /// Settings file (.toml, .yaml or .yml)
        path: PathBuf,

        /// Print JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Widget(#[from] WidgetError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything `place` computed, in the order it was decided.
#[derive(Debug, Serialize)]
struct PlaceReport {
    requested: Placement,
    viewport: Size,
    trigger: Rect,
    adjustment: Adjustment,
    layout: PanelLayout,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Place {
            viewport,
            trigger,
            panel,
            placement,
            config,
            json,
        } => place(viewport, trigger, panel, placement.as_deref(), config, json),
        Commands::Config { path, json } => show_config(path, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var("RUST_LOG")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<PathBuf>) -> Result<TooltipSettings, WidgetError> {
    path.map_or_else(|| Ok(TooltipSettings::default()), |p| TooltipSettings::load(&p))
}

fn place(
    viewport: Size,
    trigger: Rect,
    panel: Size,
    placement: Option<&str>,
    config: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let settings = load_settings(config)?;
    let requested = match placement {
        Some(name) => name.parse::<Placement>()?,
        None => settings.placement,
    };
    let report = compute_placement(requested, viewport, trigger, panel, &settings);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

fn compute_placement(
    requested: Placement,
    viewport: Size,
    trigger: Rect,
    panel: Size,
    settings: &TooltipSettings,
) -> PlaceReport {
    let snapshot = GeometrySnapshot {
        trigger,
        panel: Rect::from_origin_size(Point::ORIGIN, panel),
        viewport,
    };
    let adjustment = adjust(requested, &snapshot, &settings.positioning);
    let layout = layout_panel(trigger, panel, &adjustment, viewport, &settings.positioning);
    tracing::debug!(%requested, placement = %adjustment.placement, rule = ?adjustment.rule, "placed");

    PlaceReport {
        requested,
        viewport,
        trigger,
        adjustment,
        layout,
    }
}

fn render_report(report: &PlaceReport) -> String {
    let frame = report.layout.frame;
    let arrow = report.layout.arrow;
    format!(
        "requested: {}\nplacement: {}\nrule:      {:?}\npin:       {:?}\nframe:     {}\narrow:     {}\n",
        report.requested,
        report.adjustment.placement,
        report.adjustment.rule,
        report.adjustment.pin,
        format_rect(frame),
        format_rect(arrow),
    )
}

fn format_rect(r: Rect) -> String {
    format!("{},{} {}x{}", r.x, r.y, r.width, r.height)
}

fn show_config(path: PathBuf, json: bool) -> Result<(), CliError> {
    let settings = TooltipSettings::load(&path)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
    } else {
        print!("{}", settings.to_toml_string()?);
    }
    Ok(())
}

fn parse_numbers<const N: usize>(s: &str, sep: char) -> Result<[f32; N], String> {
    let parts: Vec<&str> = s.split(sep).map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {N} values separated by '{sep}', got {s:?}"));
    }
    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        let value: f32 = part
            .parse()
            .map_err(|_| format!("{part:?} is not a number"))?;
        if !value.is_finite() {
            return Err(format!("{part:?} is not finite"));
        }
        *slot = value;
    }
    Ok(out)
}

fn parse_size(s: &str) -> Result<Size, String> {
    let [width, height] = parse_numbers::<2>(&s.to_ascii_lowercase(), 'x')?;
    if width < 0.0 || height < 0.0 {
        return Err(format!("size must be non-negative, got {s:?}"));
    }
    Ok(Size::new(width, height))
}

fn parse_rect(s: &str) -> Result<Rect, String> {
    let [x, y, width, height] = parse_numbers::<4>(s, ',')?;
    if width < 0.0 || height < 0.0 {
        return Err(format!("rect size must be non-negative, got {s:?}"));
    }
    Ok(Rect::new(x, y, width, height))
}
