/*

    Generate half-space constraint files (A x <= b per box)
    for obstacle and region aware planners.

    Usage: scenegen [<scenario>.json] [<output>]

    @date: Oct, 2026
*/

use std::{env, path::PathBuf};
use tracing::{info, warn, error};

use halfspace_scenes::scenario::Scenario;

const AXES: [&str; 3] = ["x", "y", "z"];

fn main() -> Result<(), Box<dyn std::error::Error>> {

    // Logging on console
    tracing_subscriber::fmt::init();

    // Parse args
    let args: Vec<String> = env::args().collect();
    let (scenario_path, output_override) = match args.len() {
        1 => {
            warn!("No arguments were provided, setting default scenario path...");
            (PathBuf::from("./scenarios/concrete_blocks.json"), None)
        }
        2 => (PathBuf::from(&args[1]), None),
        3 => (PathBuf::from(&args[1]), Some(PathBuf::from(&args[2]))),
        _ => {
            error!("Usage: {} [<scenario>.json] [<output>]", args[0]);
            std::process::exit(1);
        }
    };

    let scenario = Scenario::load(&scenario_path).map_err(|e| {
        error!("Failed to load scenario: {}", e);
        Box::<dyn std::error::Error>::from(e)
    })?;

    let output = output_override.unwrap_or_else(|| scenario.output_path(&scenario_path));
    let assembled = scenario.generate(&output).map_err(|e| {
        error!("Generation failed: {}", e);
        Box::<dyn std::error::Error>::from(e)
    })?;

    // Print map limits
    if let Some(limits) = assembled.map_limits {
        for (axis, lim) in AXES.iter().zip(limits) {
            info!("{}_lim: [{} {}]", axis, lim.min, lim.max);
        }
    }
    for (axis, occ) in AXES.iter().zip(assembled.scene.occupied()) {
        if !occ.is_empty() {
            info!("{} occupied: [{} {}]", axis, occ.min, occ.max);
        }
    }

    info!("Finished execution.");
    Ok(())
}
