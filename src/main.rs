use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use brickmosaic::api;
use brickmosaic::assets::AssetLoader;
use brickmosaic::models::AppConfig;
use brickmosaic::rendering::{MosaicRenderer, PreviewStyle};
use brickmosaic::server;
use brickmosaic::services::{PaletteStore, Studio};
use mosaic_core::{BaseplateSize, MosaicBuilder, Resampler};

#[derive(Parser)]
#[command(name = "brickmosaic")]
#[command(about = "Turn pictures into brick mosaics with build instructions and a shopping list")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Build a mosaic and write preview, instructions and shopping list
    Generate {
        /// Source image (PNG, JPEG, GIF, WebP, BMP)
        #[arg(short, long, conflicts_with = "demo", required_unless_present = "demo")]
        input: Option<PathBuf>,

        /// Use the built-in gradient instead of an input image
        #[arg(long)]
        demo: bool,

        /// Palette id (see `brickmosaic palettes`)
        #[arg(short, long)]
        palette: Option<String>,

        /// Grid size: 16, 32, 48, 64, 96 or 128
        #[arg(short, long, default_value_t = 32)]
        size: u32,

        /// Preview pixels per stud
        #[arg(long)]
        cell: Option<u32>,

        /// Preview style (default: the palette's style)
        #[arg(long, value_enum)]
        style: Option<PreviewStyle>,

        /// Outline each preview cell
        #[arg(long)]
        outline: bool,

        /// Directory for mosaic.png, instructions.png and shopping_list.csv
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// List palettes and grid sizes
    Palettes,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Brickmosaic API",
        description = "Turn pictures into brick mosaics",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_palettes,
        api::handle_demo_image,
        api::handle_mosaic,
        api::handle_preview,
        api::handle_instructions,
        api::handle_shopping_list,
    ),
    components(schemas(
        api::PalettesResponse,
        api::PaletteInfo,
        api::SizeInfo,
        api::CellBounds,
        api::MosaicResponse,
        api::LegendEntry,
        api::ShoppingItem,
        PreviewStyle,
    )),
    tags(
        (name = "Palettes", description = "Palettes and grid sizes"),
        (name = "Mosaic", description = "Mosaic generation and outputs")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate {
            input,
            demo,
            palette,
            size,
            cell,
            style,
            outline,
            out_dir,
        }) => run_generate_command(
            input.as_deref(),
            demo,
            palette.as_deref(),
            size,
            cell,
            style,
            outline,
            &out_dir,
        ),
        Some(Commands::Palettes) => run_palettes_command(),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brickmosaic=warn,mosaic_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Build a mosaic directly to files (no server needed)
#[allow(clippy::too_many_arguments)]
fn run_generate_command(
    input: Option<&Path>,
    demo: bool,
    palette: Option<&str>,
    size: u32,
    cell: Option<u32>,
    style: Option<PreviewStyle>,
    outline: bool,
    out_dir: &Path,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let loader = AssetLoader::from_env();
    let config = AppConfig::load_from_assets(&loader);
    let store = Arc::new(PaletteStore::load(&config, &loader));
    let builder = Arc::new(MosaicBuilder::with_resampler(Resampler::probe(
        &config.resample_filters,
    )));
    let renderer = Arc::new(MosaicRenderer::with_fonts(loader.get_fonts()));

    let mut studio = Studio::new(store, builder, renderer);
    if let Some(id) = palette {
        studio.select_palette(id)?;
    }
    studio.select_size(size)?;

    match input {
        Some(path) if !demo => {
            let bytes = std::fs::read(path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
            studio.load_image_bytes(&bytes)?;
        }
        _ => studio.load_demo(),
    }

    let mosaic = studio.generate()?;
    for warning in &mosaic.warnings {
        eprintln!("warning: {warning}");
    }

    let cell = cell.unwrap_or(config.preview.default_cell);
    let preview = studio
        .preview_png(cell, style, outline || config.preview.outline)?
        .ok_or_else(|| anyhow::anyhow!("Nothing to render"))?;
    let instructions = studio
        .instructions_png(config.instructions.cell)?
        .ok_or_else(|| anyhow::anyhow!("Nothing to render"))?;
    let manifest = studio
        .shopping_list()
        .ok_or_else(|| anyhow::anyhow!("Nothing to render"))?;

    std::fs::create_dir_all(out_dir)?;
    let outputs = [
        ("mosaic.png", preview),
        ("instructions.png", instructions),
        ("shopping_list.csv", manifest.to_csv()?.into_bytes()),
    ];
    for (name, data) in &outputs {
        let path = out_dir.join(name);
        std::fs::write(&path, data)?;
        println!("Wrote {} ({} bytes)", path.display(), data.len());
    }

    println!(
        "\nShopping list ({}, palette {}):",
        studio.size().label(),
        studio.palette_id()
    );
    for entry in &manifest.entries {
        println!("  {:>6}  {}", entry.quantity, entry.name);
    }
    for name in &manifest.skipped {
        println!("  (not in palette: {name})");
    }
    println!("  {:>6}  total pieces", manifest.total());

    Ok(())
}

/// List palettes and grid sizes
fn run_palettes_command() -> anyhow::Result<()> {
    init_cli_tracing();

    let loader = AssetLoader::from_env();
    let config = AppConfig::load_from_assets(&loader);
    let store = PaletteStore::load(&config, &loader);

    println!("Palettes:");
    for (id, stored) in store.iter() {
        let marker = if id == store.default_id() { " (default)" } else { "" };
        println!(
            "  {id:<8} {:<20} {:>3} colors, {:?} preview{marker}",
            stored.label,
            stored.palette.len(),
            stored.preview_style
        );
    }

    println!("\nSizes:");
    for size in BaseplateSize::ALL {
        let marker = if size.is_standard() {
            " (standard baseplate)"
        } else {
            ""
        };
        println!("  {}{marker}", size.label());
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let loader = AssetLoader::from_env();

    println!("Brickmosaic v{VERSION}");
    println!("Pictures to brick mosaics\n");

    fn source(path: Option<&Path>) -> String {
        match path {
            Some(p) if p.exists() => p.display().to_string(),
            Some(_) => "embedded (path not found)".to_string(),
            None => "embedded".to_string(),
        }
    }

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR    = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!("  CONFIG_FILE  = {}", source(loader.config_file()));
    println!("  PALETTES_DIR = {}", source(loader.palettes_dir()));
    println!(
        "  FONTS_DIR    = {} ({} fonts, {} embedded, plus system fonts)",
        loader
            .fonts_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
        loader.get_fonts().len(),
        AssetLoader::list_embedded_fonts().len()
    );

    println!("\nPalettes:");
    println!(
        "  {} available, {} embedded",
        loader.list_palettes().len(),
        AssetLoader::list_embedded_palettes().len()
    );

    println!("\nCommands:");
    println!("  brickmosaic serve      Start the HTTP server");
    println!("  brickmosaic generate   Build a mosaic to files");
    println!("  brickmosaic palettes   List palettes and sizes");
    println!("\nRun 'brickmosaic --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brickmosaic=debug,mosaic_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let asset_loader = Arc::new(AssetLoader::from_env());

    let describe = |p: Option<&Path>| {
        p.map(|p| p.display().to_string())
            .unwrap_or_else(|| "embedded".to_string())
    };
    tracing::info!(
        palettes = %describe(asset_loader.palettes_dir()),
        fonts = %describe(asset_loader.fonts_dir()),
        config = %describe(asset_loader.config_file()),
        "Asset sources configured"
    );

    // Seed if configured paths are empty
    match asset_loader.seed_if_configured() {
        Ok(report) if !report.is_empty() => {
            tracing::info!(
                palettes = report.palettes_seeded.len(),
                config = report.config_seeded,
                "Seeded empty locations with embedded assets"
            );
        }
        Err(e) => {
            tracing::warn!(%e, "Failed to seed assets");
        }
        _ => {}
    }

    let state = server::create_app_state(asset_loader)?;

    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Brickmosaic server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
