use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use seatplan::render::html::{HtmlOptions, emit_page};
use seatplan::{ExportFormat, GuestList, PortraitStore, SeatplanConfig, TableLayout};

#[derive(Parser, Debug)]
#[command(name = "seatplan", version, about = "Radial seating-chart layout and export")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write one file per table.
    Export(ExportArgs),
    /// Print the computed table layouts as JSON.
    Layout(LayoutArgs),
    /// Write a single interactive HTML page with every table.
    Html(HtmlArgs),
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input guest list JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory (created if missing).
    #[arg(long)]
    out_dir: PathBuf,

    /// Output format; overrides the config file.
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// Directory portrait paths resolve against. Defaults to the input file's directory.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker threads for per-table capture; overrides the config file.
    #[arg(long)]
    threads: Option<usize>,

    /// Pause before each capture, in milliseconds; overrides the config file.
    #[arg(long)]
    settle_ms: Option<u64>,

    /// Extra font directory for PNG capture (repeatable).
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Input guest list JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct HtmlArgs {
    /// Input guest list JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output HTML path.
    #[arg(long)]
    out: PathBuf,

    /// Directory portrait paths resolve against. Defaults to the input file's directory.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reference portraits by path instead of inlining them.
    #[arg(long)]
    link_portraits: bool,

    /// Page title.
    #[arg(long)]
    title: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Svg,
    Png,
    Html,
}

impl From<FormatChoice> for ExportFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Svg => Self::Svg,
            FormatChoice::Png => Self::Png,
            FormatChoice::Html => Self::Html,
        }
    }
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
        Command::Export(args) => cmd_export(args),
        Command::Layout(args) => cmd_layout(args),
        Command::Html(args) => cmd_html(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SeatplanConfig> {
    match path {
        Some(p) => SeatplanConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(SeatplanConfig::default()),
    }
}

fn assets_root(assets: Option<PathBuf>, in_path: &Path) -> PathBuf {
    assets.unwrap_or_else(|| {
        in_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    })
}

fn read_layouts(in_path: &Path, cfg: &SeatplanConfig) -> anyhow::Result<Vec<TableLayout>> {
    let guests = GuestList::from_path(in_path)
        .with_context(|| format!("read guest list '{}'", in_path.display()))?;
    Ok(seatplan::layout_tables(guests.guests(), &cfg.layout_params()))
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(format) = args.format {
        cfg.export.format = format.into();
    }
    if let Some(threads) = args.threads {
        cfg.export.threads = threads;
    }
    if let Some(ms) = args.settle_ms {
        cfg.export.settle_ms = ms;
    }
    cfg.export.font_dirs.extend(args.font_dirs);
    cfg.validate().context("invalid export options")?;

    let assets = assets_root(args.assets, &args.in_path);
    let report = seatplan::export_tables(&args.in_path, &args.out_dir, &assets, &cfg)
        .with_context(|| format!("export '{}'", args.in_path.display()))?;

    for path in &report.written {
        eprintln!("wrote {}", path.display());
    }
    if !report.is_success() {
        for failure in &report.failed {
            eprintln!("failed table-{}: {}", failure.group_key, failure.error);
        }
        anyhow::bail!(
            "{} table(s) failed: {}",
            report.failed.len(),
            report.failed_keys().join(", ")
        );
    }
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let tables = read_layouts(&args.in_path, &cfg)?;
    let json = serde_json::to_string_pretty(&tables).context("serialize layouts")?;
    println!("{json}");
    Ok(())
}

fn cmd_html(args: HtmlArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let tables = read_layouts(&args.in_path, &cfg)?;

    let opts = HtmlOptions {
        embed_portraits: !args.link_portraits,
        deep_links: true,
        page_title: args.title.unwrap_or_else(|| HtmlOptions::default().page_title),
    };
    let portraits = if opts.embed_portraits {
        PortraitStore::prepare(&tables, assets_root(args.assets, &args.in_path))
    } else {
        PortraitStore::default()
    };
    let page = emit_page(&tables, &cfg.style, &portraits, &cfg.viewport, &opts);

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, page)
        .with_context(|| format!("write html '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
