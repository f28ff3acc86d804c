use std::path::PathBuf;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use trailstamp_core::{replay, EngineConfig, PointerPath};
use trailstamp_platform::Result;
use trailstamp_ui::run_ui;

const USAGE: &str = "usage: trailstamp [--config FILE.toml|FILE.json] [--replay PATH.json]";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    replay: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                parsed.config = Some(args.next().ok_or("--config needs a path")?.into());
            }
            "--replay" | "-r" => {
                parsed.replay = Some(args.next().ok_or("--replay needs a path")?.into());
            }
            "--help" | "-h" => return Err(USAGE.into()),
            other => return Err(format!("unexpected argument `{other}`\n{USAGE}").into()),
        }
    }
    Ok(parsed)
}

fn run() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    match &args.replay {
        Some(path) => {
            let pointer_path = PointerPath::load(path)?;
            let report = replay(&config, &pointer_path)?;
            println!("{}", report.to_json()?);
            Ok(())
        }
        None => run_ui(config),
    }
}

fn main() {
    // Init logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    info!("Trailstamp starting");
    if let Err(e) = run() {
        error!("Trailstamp error: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_config_and_replay() {
        let parsed = parse_args(args(&["--config", "look.toml", "-r", "path.json"])).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("look.toml")));
        assert_eq!(parsed.replay, Some(PathBuf::from("path.json")));
    }

    #[test]
    fn rejects_missing_values_and_unknown_flags() {
        assert!(parse_args(args(&["--config"])).is_err());
        assert!(parse_args(args(&["--fullscreen"])).is_err());
        let none = parse_args(args(&[])).unwrap();
        assert!(none.config.is_none() && none.replay.is_none());
    }
}
