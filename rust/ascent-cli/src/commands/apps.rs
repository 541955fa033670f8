use crate::output::{Column, Formatter};
use crate::provider;
use anyhow::Result;
use ascent_api::{AppRepository, RestAppRepository};
use ascent_domain::App;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct AppsArgs {
    #[command(subcommand)]
    pub command: AppsCommand,
}

#[derive(Subcommand, Debug)]
pub enum AppsCommand {
    /// List apps visible to the configured credentials.
    List {
        /// Maximum number of apps to return.
        #[arg(long)]
        limit: Option<u32>,
    },
}

pub async fn run_apps(args: &AppsArgs, formatter: &Formatter) -> Result<()> {
    match &args.command {
        AppsCommand::List { limit } => {
            let repository = RestAppRepository::new(provider::rest_client()?);
            let page = repository.list_apps(*limit).await?;
            if page.has_more() {
                tracing::info!("more apps available; raise --limit to fetch them");
            }
            println!(
                "{}",
                formatter.render_with_affordances(&page.data, &columns())
            );
        }
    }
    Ok(())
}

fn columns() -> Vec<Column<App>> {
    vec![
        Column::new("ID", |app: &App| app.id.clone()),
        Column::new("Name", |app: &App| app.display_name().to_string()),
        Column::new("Bundle ID", |app: &App| app.bundle_id.clone()),
        Column::new("SKU", |app: &App| app.sku.clone().unwrap_or_default()),
    ]
}
