use crate::output::{Column, Formatter};
use anyhow::Result;
use ascent_auth::{CredentialsResolver, EnvResolver};
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Verify that credentials resolve from the environment, without
    /// calling the service.
    Check,
}

/// What `auth check` reports: identifiers only, never key material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialSummary {
    pub key_id: String,
    pub issuer_id: String,
}

pub async fn run_auth(args: &AuthArgs, formatter: &Formatter) -> Result<()> {
    match &args.command {
        AuthCommand::Check => {
            let summary = check(&EnvResolver::from_process_env())?;
            println!("{}", formatter.render(&[summary], &columns()));
        }
    }
    Ok(())
}

fn check(resolver: &dyn CredentialsResolver) -> Result<CredentialSummary> {
    let credentials = resolver.resolve()?;
    Ok(CredentialSummary {
        key_id: credentials.key_id,
        issuer_id: credentials.issuer_id,
    })
}

fn columns() -> Vec<Column<CredentialSummary>> {
    vec![
        Column::new("Key ID", |summary: &CredentialSummary| {
            summary.key_id.clone()
        }),
        Column::new("Issuer ID", |summary: &CredentialSummary| {
            summary.issuer_id.clone()
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use testresult::TestResult;

    fn env(pairs: &[(&str, &str)]) -> EnvResolver {
        EnvResolver::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn check_reports_identifiers_only() -> TestResult {
        let resolver = env(&[
            ("ASCENT_KEY_ID", "K1"),
            ("ASCENT_ISSUER_ID", "I1"),
            ("ASCENT_PRIVATE_KEY", "---secret-pem---"),
        ]);
        let summary = check(&resolver)?;
        assert_eq!(summary.key_id, "K1");
        assert_eq!(summary.issuer_id, "I1");

        let rendered =
            Formatter::new(OutputFormat::Json, false).render(&[summary], &columns());
        assert!(rendered.contains("K1"));
        assert!(!rendered.contains("secret-pem"));
        Ok(())
    }

    #[test]
    fn check_fails_when_credentials_are_incomplete() {
        let resolver = env(&[("ASCENT_KEY_ID", "K1")]);
        assert!(check(&resolver).is_err());
    }
}
