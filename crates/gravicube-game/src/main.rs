//! `gravicube`: replays an input script against one match and reports how
//! it went.

use std::process::ExitCode;

use clap::Parser;
use gravicube_config::CliArgs;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match gravicube_game::run(&args) {
        Ok(report) => {
            println!("Gravicube");
            println!("  frames:  {}", report.frames);
            println!("  clock:   {}", report.hud.clock);
            println!("  {}", report.hud.cubes);
            println!("  gravity: {:?}", report.gravity.direction);
            match report.outcome {
                Some(outcome) => println!("  result:  {outcome}"),
                None => println!("  result:  still playing"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("gravicube: {e}");
            ExitCode::FAILURE
        }
    }
}
