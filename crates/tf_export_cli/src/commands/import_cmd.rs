//! Repository import: one `terraform import` per repository.
//!
//! Only the first page of the organization's repositories is imported.
//! Re-running after a failure re-attempts every repository; terraform rejects
//! those that are already in state.

use std::io;

use clap::Parser;
use github_client::OrganizationClient;
use tf_export_core::{import_targets, plan_repositories, StateImporter, TerraformImporter};
use tracing::{info, instrument};

use crate::commands::{check_org, connect, output_error, CommonArgs};
use crate::config::AppConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "import_cmd_tests.rs"]
mod tests;

/// Import the repositories of a GitHub organization into Terraform state
#[derive(Parser, Debug)]
#[command(name = "import-repositories", version)]
pub struct ImportArgs {
    /// Organization login
    pub org: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn run(args: ImportArgs) -> Result<(), Error> {
    let config = AppConfig::resolve(args.common.config.as_deref())?;
    let client = connect(&config, args.common.token_file.as_deref())?;
    let importer = TerraformImporter::new(config.terraform.clone());

    let mut stdout = io::stdout();
    execute(&client, &importer, &args.org, &mut stdout).await
}

#[instrument(skip(client, importer, out))]
pub async fn execute<W: io::Write>(
    client: &dyn OrganizationClient,
    importer: &dyn StateImporter,
    org: &str,
    out: &mut W,
) -> Result<(), Error> {
    check_org(org)?;

    let repositories = client.list_org_repositories_first_page(org).await?;
    let resources = plan_repositories(org, repositories)?;
    let targets: Vec<_> = resources.iter().map(|r| r.import_target()).collect();

    let imported = import_targets(importer, &targets, out)
        .await
        .map_err(output_error)?;

    info!(imported, "Repository import finished");
    Ok(())
}
