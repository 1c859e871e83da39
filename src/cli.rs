use std::path::PathBuf;

use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;

use crate::config::CardConfig;

const ABOUT: &str = "Hourly weather strip builder";

const LONG_ABOUT: &str = "
Turns an hourly weather forecast into the data behind a compact weather strip: runs of weather
conditions, one temperature label per displayed hour, and any warnings about the forecast.

The forecast entity is either a JSON file (file:forecast.json) holding an array of
{datetime, condition, temperature} entries, or a NOAA station (noaa:KMSN) whose hourly forecast is
fetched from https://api.weather.gov. The result is printed as JSON.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(help = "YAML card configuration")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Forecast entity (file:<path> or noaa:<station>)")]
    pub entity: Option<String>,

    #[arg(short, long, help = "Number of hours to display")]
    pub num_hours: Option<String>,

    #[arg(short, long, help = "Number of forecast entries to skip")]
    pub offset: Option<String>,

    #[arg(long, help = "List registered display types and exit")]
    pub list_types: bool,

    #[arg(long, help = "Print JSON on a single line")]
    pub compact: bool,
}

impl Args {
    /// Command-line flags take precedence over the config file.
    pub fn apply(&self, mut config: CardConfig) -> CardConfig {
        if let Some(ref entity) = self.entity {
            config.entity = Some(entity.clone());
        }
        if let Some(ref num_hours) = self.num_hours {
            config.num_hours = Some(num_hours.clone());
        }
        if let Some(ref offset) = self.offset {
            config.offset = Some(offset.clone());
        }
        config
    }
}

#[test]
fn test_flags_override_config() {
    let args = Args::parse_from(["wx-strip", "card.yaml", "--num-hours", "6", "-e", "noaa:KELP"]);
    assert_eq!(args.config, Some(PathBuf::from("card.yaml")));

    let config = CardConfig::parse("entity: file:forecast.json\nnum_hours: 24\noffset: 3").unwrap();
    let config = args.apply(config);
    assert_eq!(config.entity.as_deref(), Some("noaa:KELP"));
    assert_eq!(config.num_hours.as_deref(), Some("6"));
    assert_eq!(config.offset.as_deref(), Some("3"));
}
