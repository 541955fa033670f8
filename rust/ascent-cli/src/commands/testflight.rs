use crate::output::{Column, Formatter};
use crate::provider;
use anyhow::Result;
use ascent_api::{RestTestFlightRepository, TestFlightRepository};
use ascent_domain::{BetaGroup, BetaTester};
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct TestFlightArgs {
    #[command(subcommand)]
    pub command: TestFlightCommand,
}

#[derive(Subcommand, Debug)]
pub enum TestFlightCommand {
    /// List beta groups.
    Groups {
        /// Restrict to groups of one app.
        #[arg(long)]
        app_id: Option<String>,

        #[arg(long)]
        limit: Option<u32>,
    },

    /// List beta testers.
    Testers {
        /// Restrict to members of one beta group.
        #[arg(long)]
        group_id: Option<String>,

        #[arg(long)]
        limit: Option<u32>,
    },
}

pub async fn run_testflight(args: &TestFlightArgs, formatter: &Formatter) -> Result<()> {
    let repository = RestTestFlightRepository::new(provider::rest_client()?);
    match &args.command {
        TestFlightCommand::Groups { app_id, limit } => {
            let page = repository
                .list_beta_groups(app_id.as_deref(), *limit)
                .await?;
            println!("{}", formatter.render(&page.data, &group_columns()));
        }
        TestFlightCommand::Testers { group_id, limit } => {
            let page = repository
                .list_beta_testers(group_id.as_deref(), *limit)
                .await?;
            println!("{}", formatter.render(&page.data, &tester_columns()));
        }
    }
    Ok(())
}

fn group_columns() -> Vec<Column<BetaGroup>> {
    vec![
        Column::new("ID", |group: &BetaGroup| group.id.clone()),
        Column::new("Name", |group: &BetaGroup| group.name.clone()),
        Column::new("Internal", |group: &BetaGroup| {
            (if group.is_internal_group { "yes" } else { "no" }).to_string()
        }),
        Column::new("Public Link", |group: &BetaGroup| {
            (if group.public_link_enabled { "yes" } else { "no" }).to_string()
        }),
    ]
}

fn tester_columns() -> Vec<Column<BetaTester>> {
    vec![
        Column::new("ID", |tester: &BetaTester| tester.id.clone()),
        Column::new("Name", |tester: &BetaTester| tester.display_name()),
        Column::new("Email", |tester: &BetaTester| {
            tester.email.clone().unwrap_or_default()
        }),
    ]
}
