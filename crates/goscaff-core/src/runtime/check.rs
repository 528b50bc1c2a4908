//! Toolchain detection for Go and Git

use crate::config::Toolchain;
use crate::error::{Result, ScaffoldError};
use semver::Version;
use std::process::Command;

/// Oldest Go release the generated code targets
pub const MIN_GO_VERSION: &str = "1.19.0";

/// Go image tag used in the Dockerfile when no local toolchain is found
pub const DEFAULT_GO_VERSION: &str = "1.22";

/// Runtime detection result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    fn missing(name: &'static str) -> Self {
        Self {
            name,
            version: None,
            available: false,
        }
    }
}

fn probe(binary: &str, arg: &str) -> Option<String> {
    let output = Command::new(binary).arg(arg).output().ok()?;
    if output.status.success() {
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        None
    }
}

/// Extract `1.22.3` from `go version go1.22.3 linux/amd64`
pub fn parse_go_version(output: &str) -> Option<String> {
    output
        .split_whitespace()
        .find_map(|token| {
            token
                .strip_prefix("go")
                .filter(|v| v.starts_with(|c: char| c.is_ascii_digit()))
        })
        .map(str::to_string)
}

/// Extract `2.43.0` from `git version 2.43.0`
pub fn parse_git_version(output: &str) -> Option<String> {
    output
        .split_whitespace()
        .find(|token| token.starts_with(|c: char| c.is_ascii_digit()))
        .map(str::to_string)
}

/// Check if Go is available
pub fn check_go(binary: &str) -> RuntimeInfo {
    match probe(binary, "version") {
        Some(out) => RuntimeInfo {
            name: "Go",
            version: parse_go_version(&out),
            available: true,
        },
        None => RuntimeInfo::missing("Go"),
    }
}

/// Check if Git is available
pub fn check_git(binary: &str) -> RuntimeInfo {
    match probe(binary, "--version") {
        Some(out) => RuntimeInfo {
            name: "Git",
            version: parse_git_version(&out),
            available: true,
        },
        None => RuntimeInfo::missing("Git"),
    }
}

/// Check the tools a plan needs; fails listing everything that is missing
pub fn check_toolchain(
    toolchain: &Toolchain,
    needs_go: bool,
    needs_git: bool,
) -> Result<Vec<RuntimeInfo>> {
    let mut results = Vec::new();
    let mut missing = Vec::new();

    if needs_go {
        let go = check_go(&toolchain.go);
        if go.available {
            results.push(go);
        } else {
            missing.push(format!("Go (install from https://go.dev/dl, looked for `{}`)", toolchain.go));
        }
    }

    if needs_git {
        let git = check_git(&toolchain.git);
        if git.available {
            results.push(git);
        } else {
            missing.push(format!("Git (install from https://git-scm.com, looked for `{}`)", toolchain.git));
        }
    }

    if !missing.is_empty() {
        return Err(ScaffoldError::MissingTools(missing));
    }

    Ok(results)
}

/// Parse a Go release string into semver, padding missing components.
///
/// Accepts `1.22`, `1.22.3`, `go1.21.0` and pre-release tags such as `1.23rc1`
/// (the tag is dropped).
pub fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str
        .trim()
        .trim_start_matches('v')
        .trim_start_matches("go");
    let numeric: String = cleaned
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut parts: Vec<&str> = numeric.split('.').filter(|p| !p.is_empty()).collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    while parts.len() < 3 {
        parts.push("0");
    }
    Version::parse(&parts.join(".")).ok()
}

/// Compare the installed Go against the minimum the templates target.
/// Returns a warning message if it is older.
pub fn go_version_warning(found: &str, minimum: &str) -> Option<String> {
    let found_ver = parse_version(found)?;
    let min_ver = parse_version(minimum)?;

    if found_ver < min_ver {
        Some(format!(
            "Go {} is older than {}, which the generated code expects.\n\
             Upgrade from https://go.dev/dl",
            found, minimum
        ))
    } else {
        None
    }
}

/// `major.minor` tag for the Dockerfile builder image
pub fn dockerfile_go_version(found: Option<&str>) -> String {
    found
        .and_then(parse_version)
        .map(|v| format!("{}.{}", v.major, v.minor))
        .unwrap_or_else(|| DEFAULT_GO_VERSION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_go_version_output() {
        assert_eq!(
            parse_go_version("go version go1.22.3 linux/amd64").as_deref(),
            Some("1.22.3")
        );
        assert_eq!(
            parse_go_version("go version go1.21 darwin/arm64").as_deref(),
            Some("1.21")
        );
        assert_eq!(parse_go_version("garbage"), None);
    }

    #[test]
    fn test_parse_git_version_output() {
        assert_eq!(
            parse_git_version("git version 2.43.0").as_deref(),
            Some("2.43.0")
        );
        assert_eq!(parse_git_version("git"), None);
    }

    #[test]
    fn test_parse_version_pads_and_strips() {
        assert_eq!(parse_version("1.22"), Some(Version::new(1, 22, 0)));
        assert_eq!(parse_version("go1.21.4"), Some(Version::new(1, 21, 4)));
        assert_eq!(parse_version("1.23rc1"), Some(Version::new(1, 23, 0)));
        assert_eq!(parse_version("devel"), None);
    }

    #[test]
    fn test_go_older_than_minimum() {
        let warning = go_version_warning("1.18.10", MIN_GO_VERSION);
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("1.19.0"));
    }

    #[test]
    fn test_go_same_or_newer_than_minimum() {
        assert!(go_version_warning("1.19", MIN_GO_VERSION).is_none());
        assert!(go_version_warning("1.22.3", MIN_GO_VERSION).is_none());
    }

    #[test]
    fn test_invalid_versions() {
        assert!(go_version_warning("devel", MIN_GO_VERSION).is_none());
    }

    #[test]
    fn test_dockerfile_go_version() {
        assert_eq!(dockerfile_go_version(Some("1.21.6")), "1.21");
        assert_eq!(dockerfile_go_version(Some("devel")), DEFAULT_GO_VERSION);
        assert_eq!(dockerfile_go_version(None), DEFAULT_GO_VERSION);
    }

    #[test]
    fn test_missing_binary_is_reported() {
        let toolchain = Toolchain {
            go: "goscaff-test-no-such-go".to_string(),
            git: "goscaff-test-no-such-git".to_string(),
        };
        let err = check_toolchain(&toolchain, true, true).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Go (install"));
        assert!(message.contains("Git (install"));
    }

    #[test]
    fn test_nothing_needed_checks_nothing() {
        let toolchain = Toolchain {
            go: "goscaff-test-no-such-go".to_string(),
            git: "goscaff-test-no-such-git".to_string(),
        };
        assert!(check_toolchain(&toolchain, false, false).unwrap().is_empty());
    }
}
