//! Deployment client state.

use std::fmt;

use serde::Serialize;

/// Where this instance fetches deployment apps from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "uri", rename_all = "lowercase")]
pub enum DeploymentServer {
    /// The deployment client is explicitly disabled.
    Disabled,
    /// Enabled but no target URI is configured.
    None,
    Uri(String),
}

impl DeploymentServer {
    /// Combine the `disabled` and `targetUri` property values.
    pub fn from_properties(disabled: Option<&str>, target_uri: Option<&str>) -> Self {
        if disabled.map(str::trim) == Some("1") {
            return Self::Disabled;
        }
        match target_uri.map(str::trim) {
            Some(uri) if !uri.is_empty() => Self::Uri(uri.to_string()),
            _ => Self::None,
        }
    }
}

impl fmt::Display for DeploymentServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("(disabled)"),
            Self::None => f.write_str("(none)"),
            Self::Uri(uri) => f.write_str(uri),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_properties() {
        assert_eq!(
            DeploymentServer::from_properties(Some("1"), Some("ds:8089")),
            DeploymentServer::Disabled
        );
        assert_eq!(
            DeploymentServer::from_properties(Some("0"), Some("")),
            DeploymentServer::None
        );
        assert_eq!(DeploymentServer::from_properties(None, None), DeploymentServer::None);
        assert_eq!(
            DeploymentServer::from_properties(None, Some("ds01:8089\n")),
            DeploymentServer::Uri("ds01:8089".to_string())
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(DeploymentServer::Disabled.to_string(), "(disabled)");
        assert_eq!(DeploymentServer::None.to_string(), "(none)");
    }
}
