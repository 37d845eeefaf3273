use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use mgrs_grid::io::geojson::geometry_to_geojson;
use mgrs_grid::{
    Bounds, GeoPoint, GridGeometry, GridsConfig, Precision, classify, decode, encode, locate,
    to_utm,
};
use std::path::PathBuf;

/// Convert between longitude/latitude, UTM and MGRS, and export MGRS grids as GeoJSON.
///
/// Examples:
///   mgrs encode -- -77.0365 38.8977
///   mgrs decode 18SUJ2339407395
///   mgrs grid --precision 10km -- -77.5 38.5 -76.5 39.5 > grid.geojson
///   mgrs locate "18 N 323394.3 4307395.6"
#[derive(Parser, Debug)]
#[command(name = "mgrs")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// MGRS reference of a point
    Encode {
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        /// gzd, 100km, 10km, 1km, 100m, 10m or 1m
        #[arg(short, long, default_value = "1m")]
        precision: Precision,
    },

    /// Center of an MGRS cell as "lon lat"
    Decode { mgrs: String },

    /// UTM coordinate of a point
    Utm {
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        /// Project into this zone instead of the point's own
        #[arg(short, long)]
        zone: Option<u8>,
    },

    /// Grid zone designation of a point and its bounds
    Zone {
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        #[arg(allow_negative_numbers = true)]
        lat: f64,
    },

    /// Grid lines and labels over a box, as GeoJSON on stdout
    Grid {
        #[arg(allow_negative_numbers = true)]
        west: f64,
        #[arg(allow_negative_numbers = true)]
        south: f64,
        #[arg(allow_negative_numbers = true)]
        east: f64,
        #[arg(allow_negative_numbers = true)]
        north: f64,
        /// Grid precision; ignored when --zoom is given
        #[arg(short, long, default_value = "100km")]
        precision: Precision,
        /// Pick precision and labels from the zoom configuration
        #[arg(short, long)]
        zoom: Option<u8>,
        /// Zoom configuration file (JSON); built-in defaults when absent
        #[arg(long, requires = "zoom")]
        config: Option<PathBuf>,
        /// Leave labels out
        #[arg(long)]
        no_labels: bool,
    },

    /// Resolve an MGRS, UTM or "lon, lat" query
    Locate { query: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .parse_default_env()
        .init();
    debug!("{:?}", cli.command);

    match cli.command {
        Command::Encode {
            lon,
            lat,
            precision,
        } => {
            let point = GeoPoint::new(lon, lat)?;
            println!("{}", encode(&point, precision)?);
        }
        Command::Decode { mgrs } => {
            let point = decode(&mgrs).with_context(|| format!("Cannot decode '{}'", mgrs))?;
            println!("{} {}", point.lon(), point.lat());
        }
        Command::Utm { lon, lat, zone } => {
            let point = GeoPoint::new(lon, lat)?;
            println!("{}", to_utm(&point, zone)?);
        }
        Command::Zone { lon, lat } => {
            let zone = classify(&GeoPoint::new(lon, lat)?)?;
            let bounds = zone.bounds();
            println!(
                "{} {} {} {} {}",
                zone,
                bounds.west(),
                bounds.south(),
                bounds.east(),
                bounds.north()
            );
        }
        Command::Grid {
            west,
            south,
            east,
            north,
            precision,
            zoom,
            config,
            no_labels,
        } => {
            let bounds = Bounds::degrees(west, south, east, north);
            let geometry = match zoom {
                Some(zoom) => {
                    let grids = match config {
                        Some(path) => GridsConfig::from_path(&path).with_context(|| {
                            format!("Cannot load grid configuration {}", path.display())
                        })?,
                        None => GridsConfig::new(),
                    };
                    grids.geometry(&bounds, zoom)?
                }
                None => GridGeometry::builder()
                    .precision(precision)
                    .bounds(&bounds)
                    .labels(!no_labels)
                    .build()?,
            };
            println!("{}", geometry_to_geojson(&geometry)?);
        }
        Command::Locate { query } => {
            let location = locate(&query).with_context(|| format!("Cannot locate '{}'", query))?;
            let reference = match location.mgrs {
                Some(mgrs) => mgrs,
                None => encode(&location.point, Precision::Meter)?.to_string(),
            };
            println!(
                "{} {} {}",
                location.point.lon(),
                location.point.lat(),
                reference
            );
        }
    }

    Ok(())
}
