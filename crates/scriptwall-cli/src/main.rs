use anyhow::Result;
use clap::{Parser, Subcommand};
use scriptwall_model::{
    paginate, slug_from_url, slugify, BreakStyle, ProgressRecord, ScheduleError, SlugStore,
};
use scriptwall_render::{PageRenderer, PageStyle, Rgba8};
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scriptwall")]
#[command(about = "Rotate desktop wallpapers through the pages of a screenplay, one page per day")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// Full pipeline: fetch (or reuse cache), paginate, render, set today's page as wallpaper
    Apply(ApplyArgs),

    /// Download, clean, and cache the screenplay text, replacing any cached copy
    Fetch(FetchArgs),

    /// Generate the page images without touching the wallpaper
    Render(RenderArgs),

    /// Report slug, page count, start date, and today's page (read-only)
    Status(StatusArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Screenplay URL (an HTML page carrying the script in a <pre> block,
    /// e.g. https://www.dailyscript.com/scripts/pulp_fiction.html)
    #[arg(long)]
    url: String,

    /// Optional short name for the slug (e.g. pulp_fiction); derived from
    /// the URL when omitted
    #[arg(long)]
    name: Option<String>,

    /// Directory holding per-screenplay caches, progress records, and images
    #[arg(short = 'd', long, default_value = ".")]
    data_dir: PathBuf,
}

impl SourceArgs {
    fn slug(&self) -> String {
        match &self.name {
            Some(name) => slugify(name),
            None => slug_from_url(&self.url),
        }
    }

    fn store(&self) -> SlugStore {
        SlugStore::new(&self.data_dir, &self.slug())
    }
}

#[derive(Parser, Debug)]
struct PageArgs {
    /// Approximate number of words per wallpaper page
    #[arg(short = 'w', long, default_value_t = NonZeroUsize::new(900).unwrap())]
    words_per_page: NonZeroUsize,

    /// How page boundaries are chosen
    #[arg(long, value_enum, default_value = "tokens")]
    break_style: BreakStyleArg,
}

impl PageArgs {
    fn split(&self, text: &str) -> Vec<String> {
        paginate(text, self.words_per_page, self.break_style.into())
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum BreakStyleArg {
    /// Fixed word-count chunks joined with single spaces
    Tokens,
    /// Cut on line boundaries, preserving screenplay formatting
    Lines,
}

impl From<BreakStyleArg> for BreakStyle {
    fn from(value: BreakStyleArg) -> Self {
        match value {
            BreakStyleArg::Tokens => BreakStyle::Tokens,
            BreakStyleArg::Lines => BreakStyle::Lines,
        }
    }
}

#[derive(Parser, Debug)]
struct StyleArgs {
    /// Canvas width in pixels
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Left margin of the text column in pixels
    #[arg(long, default_value_t = 140)]
    margin_x: u32,

    /// Top/bottom margin in pixels
    #[arg(long, default_value_t = 80)]
    margin_y: u32,

    /// Font size in pixels
    #[arg(long, default_value_t = 28.0)]
    font_size: f32,

    /// Background color as hex (e.g. "#000000")
    #[arg(long, default_value = "#000000")]
    background: Rgba8,

    /// Text color as hex (e.g. "#E8D9A8")
    #[arg(long, default_value = "#E8D9A8")]
    foreground: Rgba8,

    /// Font file to use instead of the built-in monospace candidates
    #[arg(long)]
    font: Option<PathBuf>,
}

impl StyleArgs {
    fn style(&self) -> PageStyle {
        PageStyle {
            width: self.width,
            height: self.height,
            margin_x: self.margin_x,
            margin_y: self.margin_y,
            font_size: self.font_size,
            background: self.background,
            foreground: self.foreground,
        }
    }
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    pages: PageArgs,

    #[command(flatten)]
    style: StyleArgs,

    /// Re-render page images even if they already exist
    #[arg(long)]
    force: bool,
}

#[derive(Parser, Debug)]
struct FetchArgs {
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    pages: PageArgs,

    #[command(flatten)]
    style: StyleArgs,

    /// Re-render page images even if they already exist
    #[arg(long)]
    force: bool,
}

#[derive(Parser, Debug)]
struct StatusArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    pages: PageArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-08-07 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(
                time_format.to_string(),
            ))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(
                time_format.to_string(),
            ))
            .init();
    }

    match cli.command {
        Commands::Apply(args) => cmd_apply(args).await,
        Commands::Fetch(args) => cmd_fetch(args).await,
        Commands::Render(args) => cmd_render(args).await,
        Commands::Status(args) => cmd_status(args),
    }
}

async fn cmd_apply(args: ApplyArgs) -> Result<()> {
    let slug = args.source.slug();
    let store = args.source.store();
    tracing::info!(slug = %slug, "Applying today's screenplay page");

    let text = scriptwall_acquire::cache::load_or_fetch(&store, &args.source.url, &slug).await?;
    let pages = args.pages.split(&text);
    if pages.is_empty() {
        return Err(ScheduleError::EmptyContent.into());
    }
    tracing::info!(
        pages = pages.len(),
        words_per_page = %args.pages.words_per_page,
        "Paginated screenplay"
    );

    let font_bytes = scriptwall_render::load_font(args.style.font.as_deref())?;
    let mut renderer = PageRenderer::new(args.style.style(), font_bytes)?;
    let image_paths = scriptwall_render::render_all(&mut renderer, &pages, &store, args.force)?;

    let today = chrono::Local::now().date_naive();
    let record = scriptwall_model::get_or_create(&store.meta_path(), &slug, today)?;
    let index = record.page_index(today, image_paths.len())?;
    let today_page = &image_paths[index];
    tracing::info!(index = index, image = %today_page.display(), "Selected today's page");

    let target = scriptwall_wallpaper::detect();
    target.apply(today_page)?;
    tracing::info!("Wallpaper updated");

    Ok(())
}

async fn cmd_fetch(args: FetchArgs) -> Result<()> {
    let slug = args.source.slug();
    let store = args.source.store();
    tracing::info!(slug = %slug, url = %args.source.url, "Fetching screenplay text");

    let acquired = scriptwall_acquire::daily_script::acquire(&args.source.url, &slug).await?;
    scriptwall_acquire::cache::write_acquired(&acquired, &store)?;

    Ok(())
}

async fn cmd_render(args: RenderArgs) -> Result<()> {
    let slug = args.source.slug();
    let store = args.source.store();
    tracing::info!(slug = %slug, "Rendering screenplay pages");

    let text = scriptwall_acquire::cache::load_or_fetch(&store, &args.source.url, &slug).await?;
    let pages = args.pages.split(&text);
    if pages.is_empty() {
        return Err(ScheduleError::EmptyContent.into());
    }

    let font_bytes = scriptwall_render::load_font(args.style.font.as_deref())?;
    let mut renderer = PageRenderer::new(args.style.style(), font_bytes)?;
    let image_paths = scriptwall_render::render_all(&mut renderer, &pages, &store, args.force)?;
    tracing::info!(
        count = image_paths.len(),
        dir = %store.pages_dir().display(),
        "Page images ready"
    );

    Ok(())
}

fn cmd_status(args: StatusArgs) -> Result<()> {
    let slug = args.source.slug();
    let store = args.source.store();
    tracing::info!(slug = %slug, dir = %store.root().display(), "Status");

    let cached = scriptwall_acquire::cache::load_cached(&store)?;
    let Some(text) = cached else {
        tracing::info!("No cached screenplay text; run `scriptwall fetch` or `scriptwall apply`");
        return Ok(());
    };
    tracing::info!(
        words = text.split_whitespace().count(),
        lines = text.lines().count(),
        "Cached screenplay text"
    );

    let pages = args.pages.split(&text);
    tracing::info!(
        pages = pages.len(),
        words_per_page = %args.pages.words_per_page,
        "Pagination"
    );

    let rendered = scriptwall_render::existing_pages(&store)?;
    tracing::info!(rendered = rendered.len(), "Rendered page images");

    // Read-only: report the record if one exists, never create it here.
    let meta_path = store.meta_path();
    if !meta_path.exists() {
        tracing::info!("No progress record yet; the first `apply` will start the rotation today");
        return Ok(());
    }
    let record: ProgressRecord = serde_json::from_str(&std::fs::read_to_string(&meta_path)?)?;
    let today = chrono::Local::now().date_naive();
    let index = record.page_index(today, pages.len())?;
    tracing::info!(
        start_date = %record.start_date,
        index = index,
        image = %store.page_path(index).display(),
        "Today's page"
    );

    Ok(())
}
