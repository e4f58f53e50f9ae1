use clap::Parser;
use tf_export_cli::commands::import_cmd::{run, ImportArgs};
use tf_export_cli::logging;
use tracing::error;

#[tokio::main]
async fn main() {
    logging::init();

    let args = ImportArgs::parse();
    if let Err(e) = run(args).await {
        error!("Error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
