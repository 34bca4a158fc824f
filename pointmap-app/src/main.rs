//! pointmap-app: test data, style output and a headless map session

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pointmap::{
    core::config::MapConfig,
    data::{feature::Feature, generator::write_csv},
    input::events::ClickEvent,
    rendering::surface::SurfaceCall,
    tiles::{loader::check_health, source::TileSource},
    traits::StyleSpec,
    CircleLayer, LatLng, MapClient, MapEvent, PointGenerator, RecordingSurface, TileCoord,
    VectorTileSource,
};
use std::{fs::File, io::BufWriter, path::PathBuf};

#[derive(Parser)]
#[command(name = "pointmap-app")]
#[command(author, version, about = "Point map companion tool", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate random points around a center as CSV
    Generate {
        /// Number of points
        #[arg(long, default_value = "1000")]
        n: usize,
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        center_lat: f64,
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        center_lon: f64,
        /// Standard deviation of the spread in kilometers
        #[arg(long, default_value = "50.0")]
        std_km: f64,
        #[arg(long, default_value = "points.csv")]
        output_file: PathBuf,
        /// Seed for a reproducible sequence
        #[arg(long)]
        seed: Option<u64>,
        /// Add a dist_m column with the distance to the center
        #[arg(long)]
        with_distance: bool,
    },
    /// Print the source and layer definitions as JSON
    Style {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the tile URL for z/x/y
    TileUrl {
        #[arg(long)]
        z: u8,
        #[arg(long)]
        x: u32,
        #[arg(long)]
        y: u32,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Check the tile server's health endpoint
    Health {
        /// Server origin; defaults to the origin of the first tile template
        #[arg(long)]
        server: Option<String>,
    },
    /// Load a headless map, click one feature and print the surface calls
    Simulate {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long)]
        id: String,
        #[arg(long, allow_negative_numbers = true)]
        dist_m: f64,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Generate {
            n,
            center_lat,
            center_lon,
            std_km,
            output_file,
            seed,
            with_distance,
        } => generate(n, LatLng::new(center_lat, center_lon), std_km, output_file, seed, with_distance),
        Commands::Style { config } => style(load_config(config)?),
        Commands::TileUrl { z, x, y, config } => tile_url(load_config(config)?, TileCoord::new(x, y, z)),
        Commands::Health { server } => health(server),
        Commands::Simulate {
            lat,
            lon,
            id,
            dist_m,
            config,
        } => simulate(load_config(config)?, LatLng::new(lat, lon), id, dist_m),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<MapConfig> {
    match path {
        Some(path) => MapConfig::from_file(&path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(MapConfig::default()),
    }
}

fn generate(
    n: usize,
    center: LatLng,
    std_km: f64,
    output_file: PathBuf,
    seed: Option<u64>,
    with_distance: bool,
) -> Result<()> {
    if !(std_km.is_finite() && std_km >= 0.0) {
        bail!("--std-km must be a non-negative number, got {}", std_km);
    }

    let file = File::create(&output_file)
        .with_context(|| format!("Failed to create {}", output_file.display()))?;
    let mut generator = PointGenerator::new(center, std_km, seed).with_distance(with_distance);
    let rows = write_csv(BufWriter::new(file), generator.points(n))
        .context("Failed to write points")?;

    log::info!("wrote {} points to {}", rows, output_file.display());
    Ok(())
}

fn style(config: MapConfig) -> Result<()> {
    let source = VectorTileSource::from_config(&config.source)?;
    let layer = CircleLayer::from_config(&config.layer, &config.source.id)?;

    let mut sources = serde_json::Map::new();
    sources.insert(source.id().to_string(), source.to_spec());
    let style = serde_json::json!({
        "sources": sources,
        "layers": [layer.to_spec()],
    });
    println!("{}", serde_json::to_string_pretty(&style)?);
    Ok(())
}

fn tile_url(config: MapConfig, coord: TileCoord) -> Result<()> {
    let source = VectorTileSource::from_config(&config.source)?;
    match source.url(coord) {
        Some(url) => {
            println!("{}", url);
            Ok(())
        }
        None => bail!(
            "tile {} is outside source '{}' (zoom {}..={})",
            coord,
            source.id(),
            source.min_zoom(),
            source.max_zoom()
        ),
    }
}

fn health(server: Option<String>) -> Result<()> {
    let server = match server {
        Some(server) => server,
        None => MapConfig::default()
            .source
            .server_origin()
            .context("No server given and the default tile template has no origin")?,
    };

    let status = check_health(&server).with_context(|| format!("Health check against {} failed", server))?;
    println!("{}: {}", server, status.status);
    if !status.is_ok() {
        bail!("tile server at {} reports '{}'", server, status.status);
    }
    Ok(())
}

fn simulate(config: MapConfig, at: LatLng, id: String, dist_m: f64) -> Result<()> {
    let layer_id = config.layer.id.clone();
    let mut client = MapClient::initialize(config, RecordingSurface::new())?;

    client.handle_event(MapEvent::Load)?;
    client.handle_event(MapEvent::MouseEnter {
        layer_id: layer_id.clone(),
    })?;

    let feature = Feature::default()
        .with_property("id", id)
        .with_property("dist_m", dist_m);
    client.handle_event(MapEvent::Click {
        layer_id: layer_id.clone(),
        event: ClickEvent::new(at, vec![feature]),
    })?;
    client.handle_event(MapEvent::MouseLeave { layer_id })?;

    for call in client.surface().calls() {
        match call {
            SurfaceCall::CreateView(spec) => println!("createView {}", spec),
            SurfaceCall::AddSource { id, spec } => println!("addSource {} {}", id, spec),
            SurfaceCall::AddLayer { id, spec } => println!("addLayer {} {}", id, spec),
            SurfaceCall::ShowPopup(popup) => println!(
                "showPopup [{}, {}] {}",
                popup.position.lng, popup.position.lat, popup.html
            ),
            SurfaceCall::SetCursor(cursor) => println!("setCursor {:?}", cursor.as_css()),
        }
    }
    Ok(())
}
