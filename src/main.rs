mod logging;

use std::env;
use std::path::PathBuf;
use std::process;

use log::{error, info, LevelFilter};
use token_lens::server::start_language_server;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        // Use eprintln for usage info since logger isn't initialized yet
        eprintln!("Usage: {} <project_path> [config_path]", args[0]);
        eprintln!("  <project_path>: Project directory, the token config is looked up here");
        eprintln!("  [config_path]:  Token config file, relative to the project directory");
        eprintln!("Example: {} ~/projects/app tokens.config.json", args[0]);
        process::exit(1);
    }

    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = logging::init_logger(level) {
        eprintln!("Failed to initialize logger: {}", e);
        process::exit(1);
    }

    info!("Token Lens starting");
    info!("Command line arguments: {:?}", args);

    let project_path = PathBuf::from(&args[1]);
    let config_override = args.get(2).map(PathBuf::from);

    if let Err(e) = start_language_server(project_path, config_override).await {
        error!("Token Language Server error: {}", e);
        process::exit(1);
    }

    info!("Token Lens shutting down");
}
