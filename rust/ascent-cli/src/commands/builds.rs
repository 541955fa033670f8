use crate::output::{Column, Formatter};
use crate::provider;
use anyhow::Result;
use ascent_api::{BuildRepository, RestBuildRepository};
use ascent_domain::Build;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct BuildsArgs {
    #[command(subcommand)]
    pub command: BuildsCommand,
}

#[derive(Subcommand, Debug)]
pub enum BuildsCommand {
    /// List uploaded builds.
    List {
        /// Restrict to builds of one app.
        #[arg(long)]
        app_id: Option<String>,

        /// Maximum number of builds to return.
        #[arg(long)]
        limit: Option<u32>,
    },
}

pub async fn run_builds(args: &BuildsArgs, formatter: &Formatter) -> Result<()> {
    match &args.command {
        BuildsCommand::List { app_id, limit } => {
            let repository = RestBuildRepository::new(provider::rest_client()?);
            let page = repository.list_builds(app_id.as_deref(), *limit).await?;
            println!("{}", formatter.render(&page.data, &columns()));
        }
    }
    Ok(())
}

fn columns() -> Vec<Column<Build>> {
    vec![
        Column::new("ID", |build: &Build| build.id.clone()),
        Column::new("Version", |build: &Build| build.version.clone()),
        Column::new("State", |build: &Build| {
            build.processing_state.display_name().to_string()
        }),
        Column::new("Usable", |build: &Build| {
            (if build.is_usable() { "yes" } else { "no" }).to_string()
        }),
    ]
}
