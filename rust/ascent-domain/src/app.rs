use crate::affordances::Affordances;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An application registered with the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    pub id: String,
    pub name: String,
    pub bundle_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_locale: Option<String>,
}

impl App {
    /// Human-facing name, falling back to the bundle identifier when the
    /// store listing has no name yet.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.bundle_id
        } else {
            &self.name
        }
    }
}

impl Affordances for App {
    fn affordances(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(
            "listVersions".to_string(),
            format!("ascent versions list --app-id {}", self.id),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn app(name: &str) -> App {
        App {
            id: "app-1".into(),
            name: name.into(),
            bundle_id: "com.example.demo".into(),
            sku: None,
            primary_locale: None,
        }
    }

    #[test]
    fn display_name_prefers_name() {
        assert_eq!(app("Demo").display_name(), "Demo");
    }

    #[test]
    fn display_name_falls_back_to_bundle_id() {
        assert_eq!(app("").display_name(), "com.example.demo");
    }

    #[test]
    fn affordances_reference_own_id() {
        let affordances = app("Demo").affordances();
        assert_eq!(
            affordances.get("listVersions").map(String::as_str),
            Some("ascent versions list --app-id app-1")
        );
    }
}
