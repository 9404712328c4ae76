use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use flexi_logger::Logger;
use log::debug;
use vega_sky::{
    GeoLocation, StarCoordinate, TwilightAngle, VisibilityConfig, classify, direction_name,
    horizontal_position, pointing_hint, rise_time, set_time, sun_event_time, transit_time,
    twilight_bounds,
};
use vega_time::night_date;
use vega_visibility::{
    EndReason, VisibilityEnd, diurnal_track, is_visible, next_visibility_start, night_windows,
    search_next_visibility_start, search_visibility_end, visibility_end, visibility_info,
};

#[derive(Parser)]
#[command(name = "vega", about = "Star visibility calculator")]
struct Cli {
    /// TOML file with visibility settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Offset for displayed wall-clock times, e.g. +01:00
    #[arg(long, global = true, default_value = "+00:00", value_parser = parse_offset)]
    utc_offset: FixedOffset,
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SiteArgs {
    /// Observer latitude in degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    /// Observer longitude in degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,
}

#[derive(Args)]
struct StarArgs {
    /// Right ascension in degrees [0, 360)
    #[arg(long)]
    ra: f64,
    /// Declination in degrees
    #[arg(long, allow_hyphen_values = true)]
    dec: f64,
}

#[derive(Subcommand)]
enum Commands {
    /// Altitude and azimuth of a star
    Altaz {
        #[command(flatten)]
        site: SiteArgs,
        #[command(flatten)]
        star: StarArgs,
        /// UTC instant (RFC 3339); defaults to now
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
    },
    /// Circumpolar / never rises / rises and sets, with rise, transit and set
    Classify {
        #[command(flatten)]
        site: SiteArgs,
        #[command(flatten)]
        star: StarArgs,
        /// Date (YYYY-MM-DD); defaults to tonight
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Sunrise, sunset and darkness bounds for a night
    Twilight {
        #[command(flatten)]
        site: SiteArgs,
        /// Date (YYYY-MM-DD); defaults to tonight
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Viewing windows for a night
    Window {
        #[command(flatten)]
        site: SiteArgs,
        #[command(flatten)]
        star: StarArgs,
        /// Date (YYYY-MM-DD); defaults to tonight
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Whether the star is visible at an instant
    Visible {
        #[command(flatten)]
        site: SiteArgs,
        #[command(flatten)]
        star: StarArgs,
        /// UTC instant (RFC 3339); defaults to now
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
    },
    /// Next visibility start
    Next {
        #[command(flatten)]
        site: SiteArgs,
        #[command(flatten)]
        star: StarArgs,
        /// UTC instant (RFC 3339); defaults to now
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
        /// Use the stepped search instead of the closed form
        #[arg(long)]
        search: bool,
    },
    /// End of the current visibility period
    End {
        #[command(flatten)]
        site: SiteArgs,
        #[command(flatten)]
        star: StarArgs,
        /// UTC instant (RFC 3339); defaults to now
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
        /// Use the stepped search instead of the closed form
        #[arg(long)]
        search: bool,
    },
    /// Status summary
    Info {
        #[command(flatten)]
        site: SiteArgs,
        #[command(flatten)]
        star: StarArgs,
        /// UTC instant (RFC 3339); defaults to now
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
    },
    /// Altitude/azimuth track over a UTC day
    Track {
        #[command(flatten)]
        site: SiteArgs,
        #[command(flatten)]
        star: StarArgs,
        /// Date (YYYY-MM-DD); defaults to today (UTC)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Print every 10-minute sample instead of the even-hour marks
        #[arg(long)]
        all: bool,
    },
    /// Compass point for an azimuth, optionally with a pointing hint
    Direction {
        /// Target azimuth in degrees
        #[arg(allow_hyphen_values = true)]
        azimuth: f64,
        /// Target altitude in degrees (for the pointing hint)
        #[arg(long, allow_hyphen_values = true, default_value = "0")]
        altitude: f64,
        /// Current view azimuth in degrees
        #[arg(long, allow_hyphen_values = true)]
        view_az: Option<f64>,
        /// Current view altitude in degrees
        #[arg(long, allow_hyphen_values = true, default_value = "0")]
        view_alt: f64,
    },
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected RFC 3339 (2024-01-15T22:00:00Z): {e}"))
}

fn parse_offset(s: &str) -> Result<FixedOffset, String> {
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return Err(format!("expected ±HH:MM, got {s}")),
    };
    let (hh, mm) = rest
        .split_once(':')
        .ok_or_else(|| format!("expected ±HH:MM, got {s}"))?;
    let digits = |field: &str| -> Result<u32, String> {
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("expected ±HH:MM, got {s}"));
        }
        field.parse().map_err(|e| format!("{e}"))
    };
    let hours = digits(hh)?;
    let minutes = digits(mm)?;
    if hours > 23 || minutes >= 60 {
        return Err(format!("offset out of range: {s}"));
    }
    let seconds = i32::try_from(hours * 3600 + minutes * 60)
        .map_err(|_| format!("offset out of range: {s}"))?;
    FixedOffset::east_opt(sign * seconds)
        .ok_or_else(|| format!("offset out of range: {s}"))
}

fn load_config(path: Option<&Path>) -> VisibilityConfig {
    let Some(path) = path else {
        return VisibilityConfig::default();
    };
    let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read config {}: {e}", path.display());
        std::process::exit(1);
    });
    let config: VisibilityConfig = toml::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Failed to parse config {}: {e}", path.display());
        std::process::exit(1);
    });
    if let Err(msg) = config.validate() {
        eprintln!("Invalid config {}: {msg}", path.display());
        std::process::exit(1);
    }
    debug!("loaded config from {}: {config:?}", path.display());
    config
}

fn init_logging(level: &str) -> Option<flexi_logger::LoggerHandle> {
    Logger::try_with_env_or_str(level)
        .and_then(|logger| logger.log_to_stderr().start())
        .map_err(|e| eprintln!("Logger initialization failed: {e}"))
        .ok()
}

fn require_site(site: &SiteArgs) -> GeoLocation {
    GeoLocation::new(site.lat, site.lon).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    })
}

fn require_star(star: &StarArgs) -> StarCoordinate {
    StarCoordinate::new(star.ra, star.dec).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    })
}

fn or_exit<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

fn tonight(date: Option<NaiveDate>, loc: &GeoLocation) -> NaiveDate {
    date.unwrap_or_else(|| or_exit(night_date(Utc::now(), loc.longitude_deg())))
}

fn show(at: DateTime<Utc>, offset: &FixedOffset) -> String {
    at.with_timezone(offset)
        .format("%Y-%m-%d %H:%M:%S %:z")
        .to_string()
}

fn show_opt(at: Option<DateTime<Utc>>, offset: &FixedOffset) -> String {
    at.map_or_else(|| "none".to_string(), |t| show(t, offset))
}

fn print_end(end: Option<VisibilityEnd>, offset: &FixedOffset) {
    match end {
        Some(end) => {
            let reason = match end.reason {
                EndReason::Dawn => "dawn",
                EndReason::Setting => "star sets",
            };
            println!("Visible until {} ({reason})", show(end.at, offset));
        }
        None => println!("Not visible now, or no end within the search horizon"),
    }
}

fn main() {
    let cli = Cli::parse();
    let _logger = init_logging(&cli.log_level);
    let cfg = load_config(cli.config.as_deref());
    let offset = cli.utc_offset;

    match cli.command {
        Commands::Altaz { site, star, at } => {
            let loc = require_site(&site);
            let star = require_star(&star);
            let at = at.unwrap_or_else(Utc::now);
            let pos = horizontal_position(&star, &loc, at);
            println!("At {}", show(at, &offset));
            println!(
                "Altitude: {:.4} deg  Azimuth: {:.4} deg ({})",
                pos.altitude_deg,
                pos.azimuth_deg,
                direction_name(pos.azimuth_deg)
            );
        }

        Commands::Classify { site, star, date } => {
            let loc = require_site(&site);
            let star = require_star(&star);
            let date = tonight(date, &loc);
            println!(
                "Class: {} (threshold {:.1} deg)",
                classify(&star, &loc, &cfg),
                cfg.min_altitude_deg
            );
            let transit = or_exit(transit_time(&star, &loc, date));
            let rise = or_exit(rise_time(&star, &loc, date, &cfg));
            let set = or_exit(set_time(&star, &loc, date, &cfg));
            println!("Rise:    {}", show_opt(rise, &offset));
            println!("Transit: {}", show(transit, &offset));
            println!("Set:     {}", show_opt(set, &offset));
        }

        Commands::Twilight { site, date } => {
            let loc = require_site(&site);
            let date = tonight(date, &loc);
            let sunset = or_exit(sun_event_time(&loc, date, TwilightAngle::Sunrise, false));
            let next = date.succ_opt().unwrap_or(date);
            let sunrise = or_exit(sun_event_time(&loc, next, TwilightAngle::Sunrise, true));
            println!("Night of {date}");
            println!("Sunset:  {}", show_opt(sunset, &offset));
            match twilight_bounds(&loc, date, &cfg) {
                Some(b) => {
                    println!("Dusk:    {}", show(or_exit(b.dusk()), &offset));
                    println!("Dawn:    {}", show(or_exit(b.dawn()), &offset));
                    println!("Dark:    {:.2} h", b.duration_days() * 24.0);
                }
                None => println!("No {:?} darkness tonight", cfg.darkness),
            }
            println!("Sunrise: {}", show_opt(sunrise, &offset));
        }

        Commands::Window { site, star, date } => {
            let loc = require_site(&site);
            let star = require_star(&star);
            let date = tonight(date, &loc);
            let windows = or_exit(night_windows(&star, &loc, date, &cfg));
            if windows.is_empty() {
                println!("Not visible on the night of {date}");
            }
            for w in windows {
                println!("{} -> {}", show(w.start, &offset), show_opt(w.end, &offset));
            }
        }

        Commands::Visible { site, star, at } => {
            let loc = require_site(&site);
            let star = require_star(&star);
            let at = at.unwrap_or_else(Utc::now);
            let visible = or_exit(is_visible(&star, &loc, at, &cfg));
            println!("{}", if visible { "visible" } else { "not visible" });
        }

        Commands::Next {
            site,
            star,
            at,
            search,
        } => {
            let loc = require_site(&site);
            let star = require_star(&star);
            let at = at.unwrap_or_else(Utc::now);
            let start = if search {
                or_exit(search_next_visibility_start(&star, &loc, at, &cfg))
            } else {
                or_exit(next_visibility_start(&star, &loc, at, &cfg))
            };
            match start {
                Some(t) => println!("Next visible from {}", show(t, &offset)),
                None => println!("Not visible in the next {} nights", cfg.horizon_days),
            }
        }

        Commands::End {
            site,
            star,
            at,
            search,
        } => {
            let loc = require_site(&site);
            let star = require_star(&star);
            let at = at.unwrap_or_else(Utc::now);
            let end = if search {
                or_exit(search_visibility_end(&star, &loc, at, &cfg))
            } else {
                or_exit(visibility_end(&star, &loc, at, &cfg))
            };
            print_end(end, &offset);
        }

        Commands::Info { site, star, at } => {
            let loc = require_site(&site);
            let star = require_star(&star);
            let at = at.unwrap_or_else(Utc::now);
            let info = or_exit(visibility_info(&star, &loc, at, &offset, &cfg));
            println!("Status:   {}", info.status);
            println!(
                "Position: alt {:.2} deg, az {:.2} deg ({})",
                info.position.altitude_deg, info.position.azimuth_deg, info.direction
            );
            if let Some(w) = info.window {
                println!("Window:   {} -> {}", show(w.start, &offset), show_opt(w.end, &offset));
            }
            println!("{}", info.summary);
        }

        Commands::Track {
            site,
            star,
            date,
            all,
        } => {
            let loc = require_site(&site);
            let star = require_star(&star);
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            let track = or_exit(diurnal_track(&star, &loc, date, &cfg));
            let rows: Vec<(String, _)> = if all {
                track
                    .points
                    .iter()
                    .map(|p| (p.at.format("%H:%M").to_string(), p))
                    .collect()
            } else {
                track.labelled_marks()
            };
            for (label, p) in rows {
                println!(
                    "{label:>5}  alt {:>7.2}  az {:>7.2}{}",
                    p.altitude_deg,
                    p.azimuth_deg,
                    if p.observable { "  *" } else { "" }
                );
            }
            if let Some(top) = track.highest() {
                println!(
                    "Highest: {:.2} deg at {} UTC",
                    top.altitude_deg,
                    top.at.format("%H:%M")
                );
            }
        }

        Commands::Direction {
            azimuth,
            altitude,
            view_az,
            view_alt,
        } => {
            println!("{}", direction_name(azimuth));
            if let Some(view_az) = view_az {
                let target = vega_sky::HorizontalPosition {
                    altitude_deg: altitude,
                    azimuth_deg: azimuth,
                };
                let hint = pointing_hint(&target, view_az, view_alt);
                println!(
                    "Turn {:+.1} deg, tilt {:+.1} deg, arrow at {:.1} deg",
                    hint.delta_azimuth_deg, hint.delta_altitude_deg, hint.arrow_angle_deg
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offsets() {
        assert_eq!(parse_offset("+01:00").unwrap().local_minus_utc(), 3600);
        assert_eq!(parse_offset("-05:30").unwrap().local_minus_utc(), -19800);
        assert!(parse_offset("01:00").is_err());
        assert!(parse_offset("+01:75").is_err());
        assert!(parse_offset("+-01:00").is_err());
        assert!(parse_offset("-+01:00").is_err());
        assert!(parse_offset("++01:00").is_err());
        assert!(parse_offset("+01:-5").is_err());
        assert!(parse_offset("+24:00").is_err());
    }

    #[test]
    fn parses_instants() {
        let at = parse_instant("2024-01-15T23:00:00+01:00").unwrap();
        assert_eq!(at.to_rfc3339(), "2024-01-15T22:00:00+00:00");
        assert!(parse_instant("2024-01-15 22:00").is_err());
    }

    #[test]
    fn cli_parses_window_command() {
        let cli = Cli::try_parse_from([
            "vega", "window", "--lat", "48.85", "--lon", "2.35", "--ra", "101.29", "--dec",
            "-16.72", "--date", "2024-01-15",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Window { .. }));
    }
}
