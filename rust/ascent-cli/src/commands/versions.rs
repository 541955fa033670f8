use crate::output::{Column, Formatter};
use crate::provider;
use anyhow::{Result, bail};
use ascent_api::{AppRepository, RestAppRepository, RestSubmissionRepository, SubmissionRepository};
use ascent_domain::{AppStoreVersion, Platform, ReviewSubmission};
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct VersionsArgs {
    #[command(subcommand)]
    pub command: VersionsCommand,
}

#[derive(Subcommand, Debug)]
pub enum VersionsCommand {
    /// List store versions of an app.
    List {
        #[arg(long)]
        app_id: String,
    },

    /// Create a new store version.
    Create {
        #[arg(long)]
        app_id: String,

        /// Version string, e.g. "1.2.0".
        #[arg(long)]
        version: String,

        /// Target platform: ios, macos, tvos, watchos, or visionos.
        #[arg(long, default_value = "ios")]
        platform: String,
    },

    /// Submit a version for review.
    Submit {
        #[arg(long)]
        version_id: String,
    },
}

pub async fn run_versions(args: &VersionsArgs, formatter: &Formatter) -> Result<()> {
    match &args.command {
        VersionsCommand::List { app_id } => {
            let repository = RestAppRepository::new(provider::rest_client()?);
            let versions = repository.list_versions(app_id).await?;
            println!(
                "{}",
                formatter.render_with_affordances(&versions, &version_columns())
            );
        }
        VersionsCommand::Create {
            app_id,
            version,
            platform,
        } => {
            let Some(platform) = Platform::from_cli_argument(platform) else {
                bail!("unknown platform {platform:?}; expected ios, macos, tvos, watchos, or visionos");
            };
            let repository = RestAppRepository::new(provider::rest_client()?);
            let created = repository.create_version(app_id, version, platform).await?;
            println!(
                "{}",
                formatter.render_with_affordances(&[created], &version_columns())
            );
        }
        VersionsCommand::Submit { version_id } => {
            let repository = RestSubmissionRepository::new(provider::rest_client()?);
            let submission = repository.submit_version(version_id).await?;
            println!(
                "{}",
                formatter.render_with_affordances(&[submission], &submission_columns())
            );
        }
    }
    Ok(())
}

fn version_columns() -> Vec<Column<AppStoreVersion>> {
    vec![
        Column::new("ID", |version: &AppStoreVersion| version.id.clone()),
        Column::new("Version", |version: &AppStoreVersion| {
            version.version_string.clone()
        }),
        Column::new("Platform", |version: &AppStoreVersion| {
            version.platform.to_string()
        }),
        Column::new("State", |version: &AppStoreVersion| {
            version.state.display_name().to_string()
        }),
    ]
}

fn submission_columns() -> Vec<Column<ReviewSubmission>> {
    vec![
        Column::new("ID", |submission: &ReviewSubmission| submission.id.clone()),
        Column::new("Platform", |submission: &ReviewSubmission| {
            submission.platform.to_string()
        }),
        Column::new("State", |submission: &ReviewSubmission| {
            submission.state.display_name().to_string()
        }),
    ]
}
