use crate::output::{Column, Formatter};
use crate::provider;
use anyhow::{Result, bail};
use ascent_api::{RestScreenshotRepository, ScreenshotRepository};
use ascent_domain::{DisplayType, ScreenshotSet};
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct ScreenshotSetsArgs {
    #[command(subcommand)]
    pub command: ScreenshotSetsCommand,
}

#[derive(Subcommand, Debug)]
pub enum ScreenshotSetsCommand {
    /// List screenshot sets of a localization.
    List {
        #[arg(long)]
        localization_id: String,
    },

    /// Create a screenshot set for a display type.
    Create {
        #[arg(long)]
        localization_id: String,

        /// Display type wire name, e.g. "APP_IPHONE_67".
        #[arg(long)]
        display_type: String,
    },
}

pub async fn run_screenshot_sets(args: &ScreenshotSetsArgs, formatter: &Formatter) -> Result<()> {
    let repository = RestScreenshotRepository::new(provider::rest_client()?);
    match &args.command {
        ScreenshotSetsCommand::List { localization_id } => {
            let sets = repository.list_screenshot_sets(localization_id).await?;
            println!("{}", formatter.render_with_affordances(&sets, &columns()));
        }
        ScreenshotSetsCommand::Create {
            localization_id,
            display_type,
        } => {
            let Some(display_type) = DisplayType::from_wire_name(display_type) else {
                bail!("unknown display type {display_type:?}");
            };
            let created = repository
                .create_screenshot_set(localization_id, display_type)
                .await?;
            println!("{}", formatter.render_with_affordances(&[created], &columns()));
        }
    }
    Ok(())
}

fn columns() -> Vec<Column<ScreenshotSet>> {
    vec![
        Column::new("ID", |set: &ScreenshotSet| set.id.clone()),
        Column::new("Display Type", |set: &ScreenshotSet| {
            set.display_type.wire_name().to_string()
        }),
        Column::new("Device", |set: &ScreenshotSet| {
            set.device_category().display_name().to_string()
        }),
        Column::new("Screenshots", |set: &ScreenshotSet| {
            set.screenshots_count.to_string()
        }),
    ]
}
