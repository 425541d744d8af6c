//! Offline scenario runner: reads a JSON scenario document, runs the
//! simulation to completion, and prints (or writes) the metrics series.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use liftsim::{run_scenario, ScenarioConfig};

fn usage() -> String {
    "usage: run_scenario <config.json> [--output <results.json>]".to_string()
}

fn parse_args() -> Result<(PathBuf, Option<PathBuf>), String> {
    let mut args = env::args().skip(1);
    let config_path = PathBuf::from(args.next().ok_or_else(usage)?);
    let mut output_path = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--output" => {
                let path = args.next().ok_or_else(usage)?;
                output_path = Some(PathBuf::from(path));
            }
            _ => return Err(usage()),
        }
    }
    Ok((config_path, output_path))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scenario".to_string())
}

fn main() -> Result<(), String> {
    env_logger::init();

    let (config_path, output_path) = parse_args()?;
    let text = fs::read_to_string(&config_path)
        .map_err(|e| format!("failed to read {}: {}", config_path.display(), e))?;
    let mut config: ScenarioConfig = serde_json::from_str(&text)
        .map_err(|e| format!("invalid scenario {}: {}", config_path.display(), e))?;
    if config.name.is_none() {
        config.name = Some(file_stem(&config_path));
    }

    let results = run_scenario(&config).map_err(|e| e.to_string())?;

    println!("Scenario: {}", results.scenario);
    if let Some(description) = &results.description {
        println!("{}", description);
    }
    println!("Scheduler: {}", results.scheduler);
    println!("Duration: {} ticks", results.duration);
    println!("Final metrics:");
    let final_metrics = serde_json::to_value(&results.final_metrics)
        .map_err(|e| e.to_string())?;
    if let Some(fields) = final_metrics.as_object() {
        for (key, value) in fields {
            println!("  {}: {}", key, value);
        }
    }

    if let Some(path) = output_path {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("failed to create {}: {}", parent.display(), e))?;
            }
        }
        let body = serde_json::to_string_pretty(&results).map_err(|e| e.to_string())?;
        fs::write(&path, body).map_err(|e| format!("failed to write {}: {}", path.display(), e))?;
        println!("Saved metrics to {}", path.display());
    }

    Ok(())
}
