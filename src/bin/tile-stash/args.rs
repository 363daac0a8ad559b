use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{ErrorLevel, Verbosity};
use std::{path::PathBuf, time::Duration};

use crate::validators::{parse_latitude, parse_longitude, parse_zoom};
use tile_stash::{BoundingBox, Config, Fixture, UrlFormat};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Latitude of the south bounding box edge (in degrees)
    #[arg(
        long,
        value_parser = parse_latitude,
        allow_hyphen_values = true,
        required_unless_present = "fixture"
    )]
    pub min_lat: Option<f64>,

    /// Latitude of the north bounding box edge (in degrees)
    #[arg(
        long,
        value_parser = parse_latitude,
        allow_hyphen_values = true,
        required_unless_present = "fixture"
    )]
    pub max_lat: Option<f64>,

    /// Longitude of the west bounding box edge (in degrees)
    #[arg(
        long,
        value_parser = parse_longitude,
        allow_hyphen_values = true,
        required_unless_present = "fixture"
    )]
    pub min_lon: Option<f64>,

    /// Longitude of the east bounding box edge (in degrees)
    #[arg(
        long,
        value_parser = parse_longitude,
        allow_hyphen_values = true,
        required_unless_present = "fixture"
    )]
    pub max_lon: Option<f64>,

    /// Use a known, named bounding box (eg. tehran)
    #[arg(short, long)]
    pub fixture: Option<Fixture>,

    /// The minimum zoom level to fetch
    #[arg(long, value_parser = parse_zoom, default_value = "15")]
    pub min_zoom: u8,

    /// The maximum zoom level to fetch
    #[arg(long, value_parser = parse_zoom, default_value = "15")]
    pub max_zoom: u8,

    /// Only fetch a single zoom level (implies min=x/max=x)
    #[arg(short, long, value_parser = parse_zoom)]
    pub zoom: Option<u8>,

    /// The folder to write the z/x/y.png tile hierarchy below
    #[arg(short, long, default_value = "tehran_tiles")]
    pub output: PathBuf,

    /// The URL with format specifiers `{x}`, `{y}`, `{z}` to fetch the
    /// tiles from
    #[arg(
        short,
        long,
        default_value = "https://tile.openstreetmap.org/{z}/{x}/{y}.png"
    )]
    pub url: String,

    /// The timeout (in seconds) for fetching a single tile. Pass 0 for no
    /// timeout
    #[arg(short, long, default_value = "10")]
    pub timeout: u64,

    /// The pause (in milliseconds) after each tile, downloads and skips
    /// alike
    #[arg(short, long, default_value = "1000")]
    pub delay: u64,

    /// Skip all tile columns west of this index
    #[arg(long)]
    pub min_column: Option<usize>,

    /// Don't actually fetch anything, just determine how many tiles would
    /// be fetched
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub verbose: Verbosity<ErrorLevel>,
}

impl TryFrom<Args> for Config {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> Result<Self> {
        // if `zoom` is set, use it for both min/max
        let (min_zoom, max_zoom) = match args.zoom {
            Some(zoom) => (zoom, zoom),
            None => (args.min_zoom, args.max_zoom),
        };

        let bounding_box = match args.fixture {
            // if a fixture is specified, construct the bounding box from that
            Some(fixture) => BoundingBox::from(fixture),
            // otherwise, parse the 4 coords separately
            None => BoundingBox::new(
                args.min_lat.context("--min-lat is required")?,
                args.max_lat.context("--max-lat is required")?,
                args.min_lon.context("--min-lon is required")?,
                args.max_lon.context("--max-lon is required")?,
            )?,
        };

        Ok(Self {
            bounding_box,
            min_zoom,
            max_zoom,
            url: UrlFormat::from_string(args.url),
            base_folder: args.output,
            request_timeout: Duration::from_secs(args.timeout),
            inter_request_delay: Duration::from_millis(args.delay),
            column_lower_bound: args.min_column,
        })
    }
}
