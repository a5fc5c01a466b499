//! `venue` CLI — run schedule and floor-plan checks from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Check one range (or an array of ranges) against existing bookings
//! echo '{"date":"2025-01-01","startTime":"10:00","endTime":"11:00"}' \
//!   | venue check -e existing.json
//!
//! # Exit with status 2 when anything collides
//! venue check -n batch.json -e existing.json --fail-on-collision
//!
//! # Does a moved table hit anything but itself?
//! venue rects -n table.json -e floorplan.json --exclude table-1
//!
//! # Auto-fill a zone with tables (defaults from VENUE_TABLE_* env vars)
//! venue layout --zone-width 400 --zone-height 300
//!
//! # Expand a recurring line
//! venue occurrences -i line.json --count 10
//! ```

use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use venue_engine::{LayoutOptions, Line, Rectangle, TimeRange};

/// Exit status when `--fail-on-collision` is set and a collision was found.
const COLLISION_EXIT_CODE: i32 = 2;

#[derive(Parser)]
#[command(
    name = "venue",
    version,
    about = "Venue schedule collision checks and floor-plan layout"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine decisions to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check time ranges against existing ranges
    Check {
        /// Candidate range or array of ranges (reads from stdin if omitted)
        #[arg(short, long)]
        new: Option<String>,
        /// Existing ranges as a JSON array (none if omitted)
        #[arg(short, long)]
        existing: Option<String>,
        /// Exit with status 2 when a collision is found
        #[arg(long)]
        fail_on_collision: bool,
    },
    /// Check a floor-plan rectangle against existing elements
    Rects {
        /// Rectangle to place (reads from stdin if omitted)
        #[arg(short, long)]
        new: Option<String>,
        /// Existing rectangles as a JSON array (none if omitted)
        #[arg(short, long)]
        existing: Option<String>,
        /// Id of an existing element to ignore (the element being moved)
        #[arg(long)]
        exclude: Option<String>,
        /// Exit with status 2 when a collision is found
        #[arg(long)]
        fail_on_collision: bool,
    },
    /// Fill a zone with a grid of tables
    Layout {
        #[arg(long)]
        zone_width: f64,
        #[arg(long)]
        zone_height: f64,
        #[arg(long, env = "VENUE_TABLE_WIDTH", default_value_t = LayoutOptions::DEFAULT_TABLE_WIDTH)]
        table_width: f64,
        #[arg(long, env = "VENUE_TABLE_HEIGHT", default_value_t = LayoutOptions::DEFAULT_TABLE_HEIGHT)]
        table_height: f64,
        #[arg(long, env = "VENUE_TABLE_SPACING", default_value_t = LayoutOptions::DEFAULT_SPACING)]
        spacing: f64,
    },
    /// Expand a recurring line into dated occurrences
    Occurrences {
        /// Line definition as JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Last date to expand to, inclusive (YYYY-MM-DD)
        #[arg(long)]
        until: Option<String>,
        /// Maximum number of occurrences
        #[arg(long)]
        count: Option<u32>,
    },
}

#[derive(Serialize)]
struct RectangleCheck {
    collides: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check {
            new,
            existing,
            fail_on_collision,
        } => {
            let candidates = read_input(new.as_deref())?;
            let existing: Vec<TimeRange> = read_list(existing.as_deref())?;

            let value: Value =
                serde_json::from_str(&candidates).context("Failed to parse candidate ranges")?;
            let collided = if value.is_array() {
                let ranges: Vec<TimeRange> =
                    serde_json::from_value(value).context("Invalid candidate ranges")?;
                let result = venue_engine::check_multiple_collisions(&ranges, &existing);
                print_json(&result)?;
                result.has_collision
            } else {
                let range: TimeRange =
                    serde_json::from_value(value).context("Invalid candidate range")?;
                let result = venue_engine::check_collision(&range, &existing);
                print_json(&result)?;
                result.has_collision
            };

            if collided && fail_on_collision {
                process::exit(COLLISION_EXIT_CODE);
            }
        }
        Commands::Rects {
            new,
            existing,
            exclude,
            fail_on_collision,
        } => {
            let rect: Rectangle = serde_json::from_str(&read_input(new.as_deref())?)
                .context("Invalid rectangle")?;
            let existing: Vec<Rectangle> = read_list(existing.as_deref())?;

            let collides =
                venue_engine::check_rectangle_collision(&rect, &existing, exclude.as_deref());
            print_json(&RectangleCheck { collides })?;

            if collides && fail_on_collision {
                process::exit(COLLISION_EXIT_CODE);
            }
        }
        Commands::Layout {
            zone_width,
            zone_height,
            table_width,
            table_height,
            spacing,
        } => {
            let options = LayoutOptions {
                table_width,
                table_height,
                spacing,
            };
            let layout = options.layout(zone_width, zone_height);
            tracing::debug!(count = layout.count, "computed table layout");
            print_json(&layout)?;
        }
        Commands::Occurrences {
            input,
            until,
            count,
        } => {
            let line: Line = serde_json::from_str(&read_input(input.as_deref())?)
                .context("Invalid line definition")?;
            let until = until.as_deref().map(parse_until).transpose()?;

            let occurrences = venue_engine::expand_line(&line, until, count)
                .with_context(|| format!("Failed to expand line '{}'", line.id))?;
            print_json(&occurrences)?;
        }
    }

    Ok(())
}

/// Install a stderr fmt subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_until(raw: &str) -> Result<NaiveDate> {
    venue_engine::time::parse_date(raw).with_context(|| format!("Invalid --until date: {}", raw))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

/// Read a JSON array from a file, or an empty list when no file was given.
fn read_list<T: serde::de::DeserializeOwned>(path: Option<&str>) -> Result<Vec<T>> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path))?;
            serde_json::from_str(&raw).with_context(|| format!("Invalid JSON array in {}", path))
        }
        None => Ok(Vec::new()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value)?;
    println!("{}", pretty);
    Ok(())
}
