use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use msx_sprite::api::PaletteResponse;
use msx_sprite::models::{AppConfig, SpriteSpec};
use msx_sprite::rendering::OutputFormat;
use msx_sprite::server;
use msx_sprite::services::{ConversionService, ConvertOptions};

#[derive(Parser)]
#[command(name = "msx-sprite")]
#[command(about = "Convert images into MSX-palette sprites")]
struct Cli {
    /// YAML config file (defaults to $CONFIG_FILE)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image file into a sprite
    Convert {
        /// Input image file (PNG, JPEG, GIF, BMP or WebP)
        input: PathBuf,

        /// Output PNG file (default: msx-sprite-{W}x{H}.png in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sprite width in pixels
        #[arg(short = 'W', long)]
        width: Option<u32>,

        /// Sprite height in pixels
        #[arg(short = 'H', long)]
        height: Option<u32>,

        /// PNG layout of the output
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Skip the oxipng re-compression pass
        #[arg(long)]
        no_optimize: bool,
    },
    /// Print the MSX palette
    Palette {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start the HTTP server
    Serve {
        /// Address to listen on (defaults to $BIND_ADDR or 0.0.0.0:3000)
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));

    match cli.command {
        Some(Commands::Convert {
            input,
            output,
            width,
            height,
            format,
            no_optimize,
        }) => {
            init_cli_logging();
            let config = load_config(config_path.as_deref(), true)?;
            run_convert_command(
                config,
                &input,
                output.as_deref(),
                width,
                height,
                format,
                no_optimize,
            )
        }
        Some(Commands::Palette { json }) => run_palette_command(json),
        Some(Commands::Serve { bind }) => {
            init_server_logging();
            let config = load_config(config_path.as_deref(), false)?;
            run_server(config, bind).await
        }
        None => {
            run_status_command(config_path.as_deref());
            Ok(())
        }
    }
}

/// Minimal logging for CLI commands
fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "msx_sprite=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn init_server_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "msx_sprite=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// An explicitly requested config must load; otherwise fall back to defaults.
fn load_config(path: Option<&Path>, strict: bool) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) if strict => Ok(AppConfig::load(path)?),
        _ => Ok(AppConfig::load_or_default(path)),
    }
}

/// Convert one file (no server needed)
fn run_convert_command(
    config: AppConfig,
    input: &Path,
    output: Option<&Path>,
    width: Option<u32>,
    height: Option<u32>,
    format: Option<OutputFormat>,
    no_optimize: bool,
) -> anyhow::Result<()> {
    let spec = SpriteSpec::new(
        width.unwrap_or(config.sprite.width),
        height.unwrap_or(config.sprite.height),
        config.sprite.max_dimension,
    )?;
    let options = ConvertOptions {
        spec,
        format: format.unwrap_or(config.output.format),
        optimize: config.output.optimize && !no_optimize,
    };

    let service = ConversionService::new(config.into());
    let (path, sprite) = service.convert_file(input, output, Path::new("."), &options)?;

    println!(
        "Converted {} ({}x{}) -> {} ({}x{}, {} bytes)",
        input.display(),
        sprite.source_width,
        sprite.source_height,
        path.display(),
        spec.width,
        spec.height,
        sprite.png.len()
    );

    Ok(())
}

fn run_palette_command(json: bool) -> anyhow::Result<()> {
    let palette = PaletteResponse::msx();

    if json {
        println!("{}", serde_json::to_string_pretty(&palette)?);
        return Ok(());
    }

    println!("MSX palette ({} colors):\n", palette.colors.len());
    for color in &palette.colors {
        println!("  {:>2}  {}  {}", color.index, color.hex, color.label);
    }
    Ok(())
}

/// Display status and configuration information
fn run_status_command(config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();

    println!("msx-sprite v{VERSION}");
    println!("Converts images into MSX-palette sprites\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );

    let source = match config_path {
        Some(p) if p.exists() => p.display().to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    let config = AppConfig::load_or_default(config_path);
    println!("\nConfiguration ({source}):");
    println!(
        "  Sprite size:   {}x{} (max {})",
        config.sprite.width, config.sprite.height, config.sprite.max_dimension
    );
    println!(
        "  Output:        {:?}{}",
        config.output.format,
        if config.output.optimize {
            ", oxipng"
        } else {
            ""
        }
    );
    println!("  Upload limit:  {} bytes", config.limits.max_upload_bytes);

    println!("\nCommands:");
    println!("  msx-sprite convert   Convert an image file into a sprite");
    println!("  msx-sprite palette   Print the MSX palette");
    println!("  msx-sprite serve     Start the HTTP server");
    println!("\nRun 'msx-sprite --help' for more details.");
}

/// Run the HTTP server
async fn run_server(config: AppConfig, bind: Option<String>) -> anyhow::Result<()> {
    let bind_addr = bind
        .or_else(|| std::env::var("BIND_ADDR").ok())
        .unwrap_or_else(|| "0.0.0.0:3000".to_string());

    tracing::info!(
        width = config.sprite.width,
        height = config.sprite.height,
        max_dimension = config.sprite.max_dimension,
        max_upload_bytes = config.limits.max_upload_bytes,
        "Configuration loaded"
    );

    let state = server::create_app_state(config);
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "msx-sprite server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
