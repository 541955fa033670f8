use crate::error::AuthError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::collections::HashMap;
use std::path::PathBuf;

/// An immutable credential record: key identifier, issuer identifier, and a
/// PEM-encoded EC private key.
///
/// Held in memory for the lifetime of one invocation; never persisted or
/// logged.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub key_id: String,
    pub issuer_id: String,
    pub private_key_pem: String,
}

impl Credentials {
    pub fn new(
        key_id: impl Into<String>,
        issuer_id: impl Into<String>,
        private_key_pem: impl Into<String>,
    ) -> Self {
        Credentials {
            key_id: key_id.into(),
            issuer_id: issuer_id.into(),
            private_key_pem: private_key_pem.into(),
        }
    }

    /// All three fields must be non-empty.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.key_id.is_empty() {
            return Err(AuthError::MissingKeyId);
        }
        if self.issuer_id.is_empty() {
            return Err(AuthError::MissingIssuerId);
        }
        if self.private_key_pem.is_empty() {
            return Err(AuthError::MissingPrivateKey);
        }
        Ok(())
    }
}

// Key material must not leak through debug output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &self.key_id)
            .field("issuer_id", &self.issuer_id)
            .field("private_key_pem", &"<redacted>")
            .finish()
    }
}

/// Source of [`Credentials`] for one invocation.
pub trait CredentialsResolver: Send + Sync {
    fn resolve(&self) -> Result<Credentials, AuthError>;
}

/// Resolves credentials from environment variables.
///
/// The private key is sourced, in order of precedence, from
/// `ASCENT_PRIVATE_KEY_PATH` (a PEM file, `~` expanded),
/// `ASCENT_PRIVATE_KEY_B64` (base64-wrapped PEM), or `ASCENT_PRIVATE_KEY`
/// (inline PEM).
#[derive(Debug, Clone, Default)]
pub struct EnvResolver {
    vars: HashMap<String, String>,
}

impl EnvResolver {
    /// Resolve against the process environment.
    pub fn from_process_env() -> Self {
        EnvResolver {
            vars: std::env::vars().collect(),
        }
    }

    /// Resolve against an explicit variable map.
    pub fn new(vars: HashMap<String, String>) -> Self {
        EnvResolver { vars }
    }

    fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }

    fn load_key_from_file(path: &str) -> Result<String, AuthError> {
        let expanded = expand_tilde(path);
        std::fs::read_to_string(&expanded)
            .map_err(|e| AuthError::KeyFileUnreadable(format!("{}: {e}", expanded.display())))
    }

    fn load_key_from_base64(encoded: &str) -> Result<String, AuthError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|_| AuthError::InvalidPrivateKey("invalid base64 encoding".into()))?;
        String::from_utf8(bytes)
            .map_err(|_| AuthError::InvalidPrivateKey("could not decode PEM from base64".into()))
    }
}

impl CredentialsResolver for EnvResolver {
    fn resolve(&self) -> Result<Credentials, AuthError> {
        let key_id = self.var("ASCENT_KEY_ID").ok_or(AuthError::MissingKeyId)?;
        let issuer_id = self
            .var("ASCENT_ISSUER_ID")
            .ok_or(AuthError::MissingIssuerId)?;

        // Log the source only, never the key itself.
        let private_key_pem = if let Some(path) = self.var("ASCENT_PRIVATE_KEY_PATH") {
            tracing::debug!(%path, "loading private key from file");
            Self::load_key_from_file(path)?
        } else if let Some(encoded) = self.var("ASCENT_PRIVATE_KEY_B64") {
            tracing::debug!("loading private key from ASCENT_PRIVATE_KEY_B64");
            Self::load_key_from_base64(encoded)?
        } else if let Some(pem) = self.var("ASCENT_PRIVATE_KEY") {
            tracing::debug!("loading private key from ASCENT_PRIVATE_KEY");
            pem.to_string()
        } else {
            return Err(AuthError::MissingPrivateKey);
        };

        let credentials = Credentials::new(key_id, issuer_id, private_key_pem);
        credentials.validate()?;
        Ok(credentials)
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use testresult::TestResult;

    fn env(pairs: &[(&str, &str)]) -> EnvResolver {
        EnvResolver::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn validate_rejects_empty_fields() {
        assert_eq!(
            Credentials::new("", "I", "PEM").validate(),
            Err(AuthError::MissingKeyId)
        );
        assert_eq!(
            Credentials::new("K", "", "PEM").validate(),
            Err(AuthError::MissingIssuerId)
        );
        assert_eq!(
            Credentials::new("K", "I", "").validate(),
            Err(AuthError::MissingPrivateKey)
        );
        assert_eq!(Credentials::new("K", "I", "PEM").validate(), Ok(()));
    }

    #[test]
    fn debug_redacts_key_material() {
        let rendered = format!("{:?}", Credentials::new("K", "I", "SECRET"));
        assert!(!rendered.contains("SECRET"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn resolve_requires_key_and_issuer() {
        assert_eq!(
            env(&[]).resolve().unwrap_err(),
            AuthError::MissingKeyId
        );
        assert_eq!(
            env(&[("ASCENT_KEY_ID", "K")]).resolve().unwrap_err(),
            AuthError::MissingIssuerId
        );
        assert_eq!(
            env(&[("ASCENT_KEY_ID", "K"), ("ASCENT_ISSUER_ID", "I")])
                .resolve()
                .unwrap_err(),
            AuthError::MissingPrivateKey
        );
    }

    #[test]
    fn resolve_accepts_inline_key() -> TestResult {
        let resolver = env(&[
            ("ASCENT_KEY_ID", "K1"),
            ("ASCENT_ISSUER_ID", "I1"),
            ("ASCENT_PRIVATE_KEY", "---pem---"),
        ]);
        let credentials = resolver.resolve()?;
        assert_eq!(credentials.key_id, "K1");
        assert_eq!(credentials.issuer_id, "I1");
        assert_eq!(credentials.private_key_pem, "---pem---");
        Ok(())
    }

    #[test]
    fn resolve_decodes_base64_wrapped_key() -> TestResult {
        let encoded = STANDARD.encode("---pem---");
        let resolver = env(&[
            ("ASCENT_KEY_ID", "K"),
            ("ASCENT_ISSUER_ID", "I"),
            ("ASCENT_PRIVATE_KEY_B64", &encoded),
        ]);
        assert_eq!(resolver.resolve()?.private_key_pem, "---pem---");
        Ok(())
    }

    #[test]
    fn resolve_rejects_bad_base64_key() {
        let resolver = env(&[
            ("ASCENT_KEY_ID", "K"),
            ("ASCENT_ISSUER_ID", "I"),
            ("ASCENT_PRIVATE_KEY_B64", "!!not base64!!"),
        ]);
        assert!(matches!(
            resolver.resolve(),
            Err(AuthError::InvalidPrivateKey(_))
        ));
    }

    #[test]
    fn resolve_reads_key_file() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"---pem-from-file---")?;
        let path = file.path().to_string_lossy().to_string();
        let resolver = env(&[
            ("ASCENT_KEY_ID", "K"),
            ("ASCENT_ISSUER_ID", "I"),
            ("ASCENT_PRIVATE_KEY_PATH", &path),
        ]);
        assert_eq!(resolver.resolve()?.private_key_pem, "---pem-from-file---");
        Ok(())
    }

    #[test]
    fn resolve_surfaces_unreadable_key_file() {
        let resolver = env(&[
            ("ASCENT_KEY_ID", "K"),
            ("ASCENT_ISSUER_ID", "I"),
            ("ASCENT_PRIVATE_KEY_PATH", "/nonexistent/ascent-key.p8"),
        ]);
        assert!(matches!(
            resolver.resolve(),
            Err(AuthError::KeyFileUnreadable(_))
        ));
    }

    #[test]
    fn path_takes_precedence_over_inline_key() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"from-file")?;
        let path = file.path().to_string_lossy().to_string();
        let resolver = env(&[
            ("ASCENT_KEY_ID", "K"),
            ("ASCENT_ISSUER_ID", "I"),
            ("ASCENT_PRIVATE_KEY_PATH", &path),
            ("ASCENT_PRIVATE_KEY", "inline"),
        ]);
        assert_eq!(resolver.resolve()?.private_key_pem, "from-file");
        Ok(())
    }
}
