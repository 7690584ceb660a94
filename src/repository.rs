//! Normalization of the registry's `repository` field into a GitHub path

use serde::{Deserialize, Serialize};

const VCS_PREFIX: &str = "git+";
const GIT_SUFFIX: &str = ".git";
const GITHUB_MARKER: &str = "github.com/";

/// The `repository` field of an npm package document.
///
/// npm accepts both a bare URL string and an object with a `url` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepositoryDescriptor {
    Url(String),
    Detailed {
        #[serde(rename = "type", default)]
        kind: Option<String>,
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        directory: Option<String>,
    },
}

impl RepositoryDescriptor {
    /// The repository URL, if the descriptor carries one
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url.as_str()),
            Self::Detailed { url, .. } => url.as_deref(),
        }
    }
}

/// Derive the `owner/repo` path of a GitHub repository.
///
/// Strips a leading `git+` and a trailing `.git`, then returns everything
/// after `github.com/`. Returns `None` when there is no descriptor, no URL,
/// or the URL does not point at GitHub.
pub fn normalize_repository(descriptor: Option<&RepositoryDescriptor>) -> Option<String> {
    let url = descriptor?.url()?;
    let url = url.strip_prefix(VCS_PREFIX).unwrap_or(url);
    let url = url.strip_suffix(GIT_SUFFIX).unwrap_or(url);

    let start = url.find(GITHUB_MARKER)? + GITHUB_MARKER.len();
    Some(url[start..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detailed(url: &str) -> RepositoryDescriptor {
        RepositoryDescriptor::Detailed {
            kind: Some("git".to_string()),
            url: Some(url.to_string()),
            directory: None,
        }
    }

    #[test]
    fn test_normalize_github_urls() {
        let test_cases = vec![
            ("git+https://github.com/owner/repo.git", "owner/repo"),
            ("https://github.com/owner/repo", "owner/repo"),
            ("git://github.com/owner/repo.git", "owner/repo"),
            ("git+ssh://git@github.com/owner/repo.git", "owner/repo"),
        ];

        for (url, expected) in test_cases {
            assert_eq!(normalize_repository(Some(&detailed(url))).as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_non_github_urls_are_absent() {
        assert_eq!(normalize_repository(Some(&detailed("https://gitlab.com/owner/repo"))), None);
        assert_eq!(normalize_repository(Some(&detailed("git@github.com:owner/repo.git"))), None);
    }

    #[test]
    fn test_missing_descriptor_or_url() {
        assert_eq!(normalize_repository(None), None);

        let no_url = RepositoryDescriptor::Detailed {
            kind: Some("git".to_string()),
            url: None,
            directory: None,
        };
        assert_eq!(normalize_repository(Some(&no_url)), None);
    }

    #[test]
    fn test_string_descriptor() {
        let descriptor: RepositoryDescriptor =
            serde_json::from_str(r#""https://github.com/expressjs/express""#).unwrap();
        assert_eq!(normalize_repository(Some(&descriptor)).as_deref(), Some("expressjs/express"));
    }

    #[test]
    fn test_object_descriptor_deserializes() {
        let descriptor: RepositoryDescriptor = serde_json::from_str(
            r#"{"type": "git", "url": "git+https://github.com/babel/babel.git", "directory": "packages/babel-core"}"#,
        )
        .unwrap();
        assert_eq!(descriptor.url(), Some("git+https://github.com/babel/babel.git"));
        assert_eq!(normalize_repository(Some(&descriptor)).as_deref(), Some("babel/babel"));
    }
}
