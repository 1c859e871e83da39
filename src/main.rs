use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use wx_strip::cli::Args;
use wx_strip::config::CardConfig;
use wx_strip::registry::Registry;
use wx_strip::{source, strip};

fn run(args: &Args, registry: &Registry) -> Result<(), Box<dyn Error>> {
    if args.list_types {
        println!("{}", serde_json::to_string_pretty(registry.types())?);
        return Ok(());
    }

    let config = match args.config {
        Some(ref path) => CardConfig::from_file(path)?,
        None => CardConfig::default(),
    };
    let config = args.apply(config);

    // configuration problems stop us before any data is fetched
    let entity = config.entity()?;
    let request = config.request()?;
    info!(
        "Building strip: entity={:?} num_hours={} offset={}",
        entity, request.num_hours, request.offset
    );

    let forecast = source::load_forecast(&entity)?;
    let data = strip::build(
        &forecast,
        &request,
        config.colors.as_ref(),
        &config.formatter(),
    )?;

    for advisory in &data.advisories {
        warn!("{advisory}");
    }

    let json = if args.compact {
        serde_json::to_string(&data)?
    } else {
        serde_json::to_string_pretty(&data)?
    };
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let args = Args::parse();

    let mut registry = Registry::new();
    if let Err(err) = registry.register(strip::DISPLAY_TYPE) {
        error!("{err}");
        return ExitCode::FAILURE;
    }

    match run(&args, &registry) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
