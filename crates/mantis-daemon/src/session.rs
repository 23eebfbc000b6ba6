//! Session credentials bootstrap.
//!
//! The gateway reads its WhatsApp session from `creds.json` inside the
//! configured session directory. When that file is missing and a
//! `session_url` is configured, we fetch the blob once at startup so a
//! fresh deployment can come up without a manual QR scan. Every failure
//! here is non-fatal -- the gateway can still pair interactively.

use std::path::Path;

use tracing::{info, warn};

use mantis_types::BotConfig;

const CREDS_FILE: &str = "creds.json";

/// Outcome of the session bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// A local session file already exists.
    Present,
    /// The session blob was downloaded and written.
    Downloaded,
    /// No session is available; the gateway must pair on its own.
    Missing,
}

/// Make sure a session file exists if one can be obtained.
pub async fn ensure_session(config: &BotConfig) -> SessionStatus {
    let creds_path = config.session_dir.join(CREDS_FILE);
    if creds_path.exists() {
        return SessionStatus::Present;
    }

    let Some(url) = config.session_url.as_deref() else {
        info!("no session file and no session_url configured");
        return SessionStatus::Missing;
    };

    match download_session(url, &creds_path).await {
        Ok(()) => {
            info!(path = %creds_path.display(), "session credentials downloaded");
            SessionStatus::Downloaded
        }
        Err(e) => {
            warn!("session download failed: {e}");
            SessionStatus::Missing
        }
    }
}

async fn download_session(url: &str, creds_path: &Path) -> anyhow::Result<()> {
    let body = reqwest::get(url).await?.error_for_status()?.bytes().await?;
    if let Some(dir) = creds_path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    tokio::fs::write(creds_path, &body).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_with(session_dir: &Path, session_url: Option<String>) -> BotConfig {
        BotConfig {
            session_dir: session_dir.to_path_buf(),
            session_url,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn existing_session_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let creds = dir.path().join(CREDS_FILE);
        std::fs::write(&creds, b"{\"noiseKey\":{}}").unwrap();

        let status = ensure_session(&config_with(dir.path(), Some("https://unused".into()))).await;

        assert_eq!(status, SessionStatus::Present);
        assert_eq!(std::fs::read(&creds).unwrap(), b"{\"noiseKey\":{}}");
    }

    #[tokio::test]
    async fn no_url_means_missing() {
        let dir = tempfile::tempdir().unwrap();
        let status = ensure_session(&config_with(dir.path(), None)).await;
        assert_eq!(status, SessionStatus::Missing);
    }

    #[tokio::test]
    async fn downloads_blob_into_session_dir() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/session.json"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"{\"me\":{}}".as_slice()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("state");
        let url = format!("{}/session.json", server.uri());

        let status = ensure_session(&config_with(&nested, Some(url))).await;

        assert_eq!(status, SessionStatus::Downloaded);
        assert_eq!(
            std::fs::read(nested.join(CREDS_FILE)).unwrap(),
            b"{\"me\":{}}"
        );
    }

    #[tokio::test]
    async fn http_error_is_nonfatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/session.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let url = format!("{}/session.json", server.uri());

        let status = ensure_session(&config_with(dir.path(), Some(url))).await;

        assert_eq!(status, SessionStatus::Missing);
        assert!(!dir.path().join(CREDS_FILE).exists());
    }
}
