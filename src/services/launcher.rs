//! Hands external project links to the platform opener.

use crate::error::{LaunchError, LaunchResult};
use std::process::{Command, Stdio};
use url::Url;

/// Opens external links in a browser, detached from the TUI
pub struct LinkLauncher {
    /// Explicit browser command; platform opener when `None`
    browser_command: Option<String>,
}

impl LinkLauncher {
    /// Create a new LinkLauncher
    pub fn new(browser_command: Option<String>) -> Self {
        Self {
            browser_command: browser_command.filter(|c| !c.trim().is_empty()),
        }
    }

    /// Check that `link` is an absolute http(s) URL
    pub fn validate(link: &str) -> LaunchResult<Url> {
        let url = Url::parse(link.trim()).map_err(|_| LaunchError::InvalidUrl(link.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(LaunchError::InvalidUrl(link.to_string())),
        }
    }

    /// Program and leading arguments used to open a URL
    pub fn opener(&self) -> LaunchResult<(String, Vec<String>)> {
        if let Some(ref command) = self.browser_command {
            let mut parts = command.split_whitespace().map(str::to_string);
            let program = parts.next().ok_or(LaunchError::NoOpener)?;
            return Ok((program, parts.collect()));
        }

        platform_opener(std::env::consts::OS).ok_or(LaunchError::NoOpener)
    }

    /// Open `link` without waiting for the opener to exit
    pub fn open(&self, link: &str) -> LaunchResult<()> {
        let url = Self::validate(link)?;
        let (program, args) = self.opener()?;

        tracing::info!("Opening {} with {}", url, program);

        let mut child = Command::new(&program)
            .args(&args)
            .arg(url.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| LaunchError::SpawnFailed(format!("{}: {}", program, e)))?;

        // Reap the opener so it does not linger as a zombie
        std::thread::spawn(move || {
            if let Err(e) = child.wait() {
                tracing::debug!("Opener did not exit cleanly: {}", e);
            }
        });

        Ok(())
    }
}

/// Default opener for `os`, as named by `std::env::consts::OS`.
///
/// The URL is always handed over as a single argument to a program that
/// does not go through a shell, so `&` and friends in query strings stay
/// part of the URL.
fn platform_opener(os: &str) -> Option<(String, Vec<String>)> {
    match os {
        "macos" => Some(("open".to_string(), Vec::new())),
        "windows" => Some((
            "rundll32".to_string(),
            vec!["url.dll,FileProtocolHandler".to_string()],
        )),
        "linux" | "freebsd" | "dragonfly" | "netbsd" | "openbsd" | "solaris" | "illumos" => {
            Some(("xdg-open".to_string(), Vec::new()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_http_and_https() {
        assert!(LinkLauncher::validate("https://orbit.example.com").is_ok());
        assert!(LinkLauncher::validate(" http://example.com/path ").is_ok());
    }

    #[test]
    fn test_validate_rejects_other_schemes_and_relative_links() {
        assert!(LinkLauncher::validate("javascript:alert(1)").is_err());
        assert!(LinkLauncher::validate("file:///etc/passwd").is_err());
        assert!(LinkLauncher::validate("/work/orbit").is_err());
    }

    #[test]
    fn test_custom_browser_command() {
        let launcher = LinkLauncher::new(Some("firefox --new-tab".to_string()));
        let (program, args) = launcher.opener().unwrap();
        assert_eq!(program, "firefox");
        assert_eq!(args, vec!["--new-tab"]);
    }

    #[test]
    fn test_windows_opener_bypasses_the_shell() {
        let (program, args) = platform_opener("windows").unwrap();
        assert_eq!(program, "rundll32");
        assert_eq!(args, vec!["url.dll,FileProtocolHandler"]);
        assert!(!args.iter().any(|a| a.eq_ignore_ascii_case("/c")));
    }

    #[test]
    fn test_query_string_stays_one_argument() {
        // `&` must reach the opener untouched, not split into a second command
        let url = LinkLauncher::validate("https://x.example/?a=1&calc").unwrap();
        assert_eq!(url.as_str(), "https://x.example/?a=1&calc");
        let (program, _) = platform_opener("windows").unwrap();
        assert_ne!(program, "cmd");
    }

    #[test]
    fn test_platform_openers() {
        assert_eq!(platform_opener("macos").map(|o| o.0), Some("open".to_string()));
        assert_eq!(platform_opener("linux").map(|o| o.0), Some("xdg-open".to_string()));
        assert_eq!(platform_opener("plan9"), None);
    }

    #[test]
    fn test_blank_browser_command_falls_back_to_platform() {
        let launcher = LinkLauncher::new(Some("  ".to_string()));
        assert_eq!(launcher.browser_command, None);
    }

    #[test]
    fn test_open_rejects_invalid_link_before_spawning() {
        let launcher = LinkLauncher::new(Some("definitely-not-a-real-binary".to_string()));
        assert!(matches!(
            launcher.open("not a url"),
            Err(LaunchError::InvalidUrl(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_open_with_missing_binary_fails_to_spawn() {
        let launcher = LinkLauncher::new(Some("definitely-not-a-real-binary-xyz".to_string()));
        assert!(matches!(
            launcher.open("https://example.com"),
            Err(LaunchError::SpawnFailed(_))
        ));
    }
}
