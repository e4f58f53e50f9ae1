//! Branch protection export.
//!
//! ```bash
//! # Print the rules as github_branch_protection resources
//! export-branch-protections acme generate > branch_protections.tf
//!
//! # Import the same rules into Terraform state
//! export-branch-protections acme import
//! ```

use std::io;

use clap::{Parser, ValueEnum};
use github_client::OrganizationClient;
use tf_export_core::{
    import_targets, plan_branch_protections, write_blocks, StateImporter, TerraformImporter,
    ValidationRules, BRANCH_PROTECTION_IMPORT_ARGS,
};
use tracing::{info, instrument};

use crate::commands::{check_org, connect, output_error, CommonArgs};
use crate::config::AppConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "branch_protections_cmd_tests.rs"]
mod tests;

/// What to do with each branch protection rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Print a resource block per rule
    Generate,
    /// Run `terraform import` per rule
    Import,
}

/// Export the branch protection rules of a GitHub organization to Terraform
#[derive(Parser, Debug)]
#[command(name = "export-branch-protections", version)]
pub struct BranchProtectionsArgs {
    /// Organization login
    pub org: String,

    #[arg(value_enum)]
    pub mode: Mode,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Runs the exporter with the real GitHub client, terraform and stdout.
pub async fn run(args: BranchProtectionsArgs) -> Result<(), Error> {
    let config = AppConfig::resolve(args.common.config.as_deref())?;
    let client = connect(&config, args.common.token_file.as_deref())?;
    let importer = TerraformImporter::new(config.terraform.clone())
        .with_args(BRANCH_PROTECTION_IMPORT_ARGS.iter().copied());

    let mut stdout = io::stdout();
    execute(
        &client,
        &importer,
        &args.org,
        args.mode,
        &config.validation,
        &mut stdout,
    )
    .await
}

/// Fetches every rule of `org`, validates it, then renders or imports it.
///
/// Nothing is written or imported unless every rule passed validation (or
/// was skipped under the skip policy).
#[instrument(skip(client, importer, rules, out))]
pub async fn execute<W: io::Write>(
    client: &dyn OrganizationClient,
    importer: &dyn StateImporter,
    org: &str,
    mode: Mode,
    rules: &ValidationRules,
    out: &mut W,
) -> Result<(), Error> {
    check_org(org)?;

    let fetched = client.list_branch_protections(org).await?;
    let plan = plan_branch_protections(&fetched.login, &fetched.repositories, rules)?;

    match mode {
        Mode::Generate => {
            write_blocks(out, plan.rules.iter().map(|rule| rule.to_block()))
                .map_err(output_error)?;
        }
        Mode::Import => {
            let targets: Vec<_> = plan.rules.iter().map(|rule| rule.import_target()).collect();
            import_targets(importer, &targets, out)
                .await
                .map_err(output_error)?;
        }
    }

    info!(
        exported = plan.rules.len(),
        skipped = plan.skipped,
        "Branch protection export finished"
    );
    Ok(())
}
