use crate::output::{Column, Formatter};
use crate::provider;
use anyhow::Result;
use ascent_api::{RestScreenshotRepository, ScreenshotRepository};
use ascent_domain::Screenshot;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ScreenshotsArgs {
    #[command(subcommand)]
    pub command: ScreenshotsCommand,
}

#[derive(Subcommand, Debug)]
pub enum ScreenshotsCommand {
    /// List screenshots in a set.
    List {
        #[arg(long)]
        set_id: String,
    },

    /// Upload an image file into a set.
    Upload {
        #[arg(long)]
        set_id: String,

        /// Path to the image file.
        #[arg(long)]
        file: PathBuf,
    },
}

pub async fn run_screenshots(args: &ScreenshotsArgs, formatter: &Formatter) -> Result<()> {
    let repository = RestScreenshotRepository::new(provider::rest_client()?);
    match &args.command {
        ScreenshotsCommand::List { set_id } => {
            let screenshots = repository.list_screenshots(set_id).await?;
            println!("{}", formatter.render(&screenshots, &columns()));
        }
        ScreenshotsCommand::Upload { set_id, file } => {
            let uploaded = repository.upload_screenshot(set_id, file).await?;
            tracing::info!(screenshot_id = %uploaded.id, "upload confirmed");
            println!("{}", formatter.render(&[uploaded], &columns()));
        }
    }
    Ok(())
}

fn columns() -> Vec<Column<Screenshot>> {
    vec![
        Column::new("ID", |screenshot: &Screenshot| screenshot.id.clone()),
        Column::new("File", |screenshot: &Screenshot| {
            screenshot.file_name.clone()
        }),
        Column::new("Size", |screenshot: &Screenshot| {
            screenshot.file_size_description()
        }),
        Column::new("Dimensions", |screenshot: &Screenshot| {
            screenshot.dimensions_description().unwrap_or_default()
        }),
        Column::new("State", |screenshot: &Screenshot| {
            screenshot
                .asset_state
                .map(|state| state.display_name().to_string())
                .unwrap_or_default()
        }),
    ]
}
