use clap::{Parser, Subcommand};
use farezone::app::{inspect::run_inspect, replay::run_replay, FarezoneCliError};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct FarezoneAppArguments {
    #[command(subcommand)]
    app: App,
}

#[derive(Subcommand)]
pub enum App {
    /// summarize a zone dataset and its adjacency
    Inspect {
        #[arg(long, help = "path to GeoJSON zone dataset")]
        dataset_file: String,
    },
    /// replay a recorded selection session, printing one JSON outcome per step
    Replay {
        #[arg(long, help = "path to GeoJSON zone dataset")]
        dataset_file: String,
        #[arg(long, help = "path to JSON file containing the session steps")]
        script_file: String,
        #[arg(long, help = "path to .toml or .json file with engine parameters")]
        configuration_file: Option<String>,
    },
}

pub fn run(app: &App) -> Result<(), FarezoneCliError> {
    env_logger::init();
    match app {
        App::Inspect { dataset_file } => run_inspect(dataset_file),
        App::Replay {
            dataset_file,
            script_file,
            configuration_file,
        } => run_replay(dataset_file, script_file, configuration_file),
    }
}

fn main() {
    let args = FarezoneAppArguments::parse();
    if let Err(e) = run(&args.app) {
        log::error!("farezone failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
