//! # ascent CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Output defaults to JSON with per-item affordances so automated callers
//! can chain commands without consulting documentation.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ascent_cli::commands::apps::{AppsArgs, run_apps};
use ascent_cli::commands::auth::{AuthArgs, run_auth};
use ascent_cli::commands::builds::{BuildsArgs, run_builds};
use ascent_cli::commands::localizations::{LocalizationsArgs, run_localizations};
use ascent_cli::commands::screenshot_sets::{ScreenshotSetsArgs, run_screenshot_sets};
use ascent_cli::commands::screenshots::{ScreenshotsArgs, run_screenshots};
use ascent_cli::commands::testflight::{TestFlightArgs, run_testflight};
use ascent_cli::commands::versions::{VersionsArgs, run_versions};
use ascent_cli::output::{Formatter, OutputFormat};

/// Command-line client for the App Store Connect API.
///
/// Credentials come from the environment: ASCENT_KEY_ID, ASCENT_ISSUER_ID,
/// and one of ASCENT_PRIVATE_KEY_PATH, ASCENT_PRIVATE_KEY_B64, or
/// ASCENT_PRIVATE_KEY.
#[derive(Parser, Debug)]
#[command(name = "ascent", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    output: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// App metadata.
    Apps(AppsArgs),

    /// Credential checks.
    Auth(AuthArgs),

    /// Uploaded binary builds.
    Builds(BuildsArgs),

    /// Store versions: list, create, submit for review.
    Versions(VersionsArgs),

    /// Beta groups and testers.
    #[command(name = "testflight")]
    TestFlight(TestFlightArgs),

    /// Version localizations.
    Localizations(LocalizationsArgs),

    /// Screenshot sets per localization and display type.
    #[command(name = "screenshot-sets")]
    ScreenshotSets(ScreenshotSetsArgs),

    /// Screenshot assets: list, upload.
    Screenshots(ScreenshotsArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let formatter = Formatter::new(cli.output, cli.pretty);

    let result = match cli.command {
        Commands::Apps(args) => run_apps(&args, &formatter).await,
        Commands::Auth(args) => run_auth(&args, &formatter).await,
        Commands::Builds(args) => run_builds(&args, &formatter).await,
        Commands::Versions(args) => run_versions(&args, &formatter).await,
        Commands::TestFlight(args) => run_testflight(&args, &formatter).await,
        Commands::Localizations(args) => run_localizations(&args, &formatter).await,
        Commands::ScreenshotSets(args) => run_screenshot_sets(&args, &formatter).await,
        Commands::Screenshots(args) => run_screenshots(&args, &formatter).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascent_cli::commands::screenshots::ScreenshotsCommand;
    use ascent_cli::commands::versions::VersionsCommand;
    use std::path::PathBuf;

    #[test]
    fn parse_auth_check() {
        let cli = Cli::try_parse_from(["ascent", "auth", "check"]).unwrap();
        assert!(matches!(cli.command, Commands::Auth(_)));
    }

    #[test]
    fn parse_apps_list_with_limit() {
        let cli = Cli::try_parse_from(["ascent", "apps", "list", "--limit", "10"]).unwrap();
        assert!(matches!(cli.command, Commands::Apps(_)));
    }

    #[test]
    fn parse_versions_create() {
        let cli = Cli::try_parse_from([
            "ascent", "versions", "create", "--app-id", "app-1", "--version", "1.2.0",
            "--platform", "macos",
        ])
        .unwrap();
        if let Commands::Versions(args) = cli.command {
            if let VersionsCommand::Create { platform, version, .. } = args.command {
                assert_eq!(platform, "macos");
                assert_eq!(version, "1.2.0");
            } else {
                panic!("expected create subcommand");
            }
        } else {
            panic!("expected versions command");
        }
    }

    #[test]
    fn parse_versions_submit() {
        let cli =
            Cli::try_parse_from(["ascent", "versions", "submit", "--version-id", "v-1"]).unwrap();
        assert!(matches!(cli.command, Commands::Versions(_)));
    }

    #[test]
    fn parse_screenshot_upload() {
        let cli = Cli::try_parse_from([
            "ascent", "screenshots", "upload", "--set-id", "set-1", "--file", "hero.png",
        ])
        .unwrap();
        if let Commands::Screenshots(args) = cli.command {
            if let ScreenshotsCommand::Upload { set_id, file } = args.command {
                assert_eq!(set_id, "set-1");
                assert_eq!(file, PathBuf::from("hero.png"));
            } else {
                panic!("expected upload subcommand");
            }
        } else {
            panic!("expected screenshots command");
        }
    }

    #[test]
    fn parse_global_output_options() {
        let cli = Cli::try_parse_from([
            "ascent", "--output", "table", "--pretty", "-vv", "apps", "list",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputFormat::Table);
        assert!(cli.pretty);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["ascent"]).is_err());
    }

    #[test]
    fn parse_unknown_platform_is_accepted_until_dispatch() {
        // Platform validation happens in the handler, not the parser.
        let cli = Cli::try_parse_from([
            "ascent", "versions", "create", "--app-id", "a", "--version", "1.0",
            "--platform", "playdate",
        ]);
        assert!(cli.is_ok());
    }
}
