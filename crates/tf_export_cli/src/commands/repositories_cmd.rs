//! Repository export: one `github_repository` block per repository.

use std::io;

use clap::Parser;
use github_client::OrganizationClient;
use tf_export_core::{plan_repositories, write_blocks, PolicySource};
use tracing::{info, instrument};

use crate::commands::{check_org, connect, output_error, CommonArgs};
use crate::config::AppConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "repositories_cmd_tests.rs"]
mod tests;

/// Export the repositories of a GitHub organization as Terraform resources
#[derive(Parser, Debug)]
#[command(name = "export-repositories", version)]
pub struct RepositoriesArgs {
    /// Organization login
    pub org: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn run(args: RepositoriesArgs) -> Result<(), Error> {
    let config = AppConfig::resolve(args.common.config.as_deref())?;
    let client = connect(&config, args.common.token_file.as_deref())?;

    let mut stdout = io::stdout();
    execute(
        &client,
        &args.org,
        config.page_size,
        &config.policy,
        &mut stdout,
    )
    .await
}

/// Lists every repository of `org`, `page_size` at a time, and writes a
/// resource block for each.
#[instrument(skip(client, policy, out))]
pub async fn execute<W: io::Write>(
    client: &dyn OrganizationClient,
    org: &str,
    page_size: u8,
    policy: &PolicySource,
    out: &mut W,
) -> Result<(), Error> {
    check_org(org)?;

    let repositories = client.list_org_repositories(org, page_size).await?;
    let resources = plan_repositories(org, repositories)?;

    write_blocks(out, resources.iter().map(|r| r.to_block(policy))).map_err(output_error)?;

    info!(exported = resources.len(), "Repository export finished");
    Ok(())
}
