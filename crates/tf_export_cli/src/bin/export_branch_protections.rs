use clap::Parser;
use tf_export_cli::commands::branch_protections_cmd::{run, BranchProtectionsArgs};
use tf_export_cli::logging;
use tracing::error;

#[tokio::main]
async fn main() {
    logging::init();

    let args = BranchProtectionsArgs::parse();
    if let Err(e) = run(args).await {
        error!("Error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
