use crate::output::{Column, Formatter};
use crate::provider;
use anyhow::Result;
use ascent_api::{RestScreenshotRepository, ScreenshotRepository};
use ascent_domain::VersionLocalization;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct LocalizationsArgs {
    #[command(subcommand)]
    pub command: LocalizationsCommand,
}

#[derive(Subcommand, Debug)]
pub enum LocalizationsCommand {
    /// List localizations of a store version.
    List {
        #[arg(long)]
        version_id: String,
    },

    /// Add a localization to a store version.
    Create {
        #[arg(long)]
        version_id: String,

        /// Locale code, e.g. "en-US" or "ja".
        #[arg(long)]
        locale: String,
    },
}

pub async fn run_localizations(args: &LocalizationsArgs, formatter: &Formatter) -> Result<()> {
    let repository = RestScreenshotRepository::new(provider::rest_client()?);
    match &args.command {
        LocalizationsCommand::List { version_id } => {
            let localizations = repository.list_localizations(version_id).await?;
            println!("{}", formatter.render(&localizations, &columns()));
        }
        LocalizationsCommand::Create { version_id, locale } => {
            let created = repository.create_localization(version_id, locale).await?;
            println!("{}", formatter.render(&[created], &columns()));
        }
    }
    Ok(())
}

fn columns() -> Vec<Column<VersionLocalization>> {
    vec![
        Column::new("ID", |localization: &VersionLocalization| {
            localization.id.clone()
        }),
        Column::new("Locale", |localization: &VersionLocalization| {
            localization.locale.clone()
        }),
    ]
}
