//! HTTP client for the Lingva translation endpoint.
//!
//! Two calls are consumed:
//! - `GET {origin}/api/v1/languages/{source|target}` -> `{ languages: [{code, name}] }`
//! - `GET {origin}/api/v1/{source}/{target}/{text}` -> `{ translation }`
//!
//! Any non-2xx status, transport failure or unexpected body is reported as a
//! [`TranslateError`]; nothing here retries.

use crate::cancellation::CancellationToken;
use crate::error::TranslateError;
use crate::model::{Language, LanguageKind, LanguagePair};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::{debug, warn};

pub const DEFAULT_API_ORIGIN: &str = "https://lingva.ml";

#[derive(Debug, Deserialize)]
struct TranslationBody {
    translation: String,
}

#[derive(Debug, Deserialize)]
struct LanguagesBody {
    languages: Vec<Language>,
}

/// Anything able to list the languages for one side of the catalog.
pub trait LanguageSource {
    fn languages(
        &self,
        kind: LanguageKind,
    ) -> impl Future<Output = Result<Vec<Language>, TranslateError>> + Send;
}

#[derive(Clone, Debug)]
pub struct LingvaClient {
    http: Client,
    origin: String,
}

impl LingvaClient {
    pub fn new(origin: impl Into<String>) -> Result<Self, TranslateError> {
        let http = Client::builder()
            .user_agent(concat!("lingva-panel/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let origin = origin.into().trim_end_matches('/').to_string();
        Ok(Self { http, origin })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn languages_url(&self, kind: LanguageKind) -> String {
        format!("{}/api/v1/languages/{}", self.origin, kind.as_str())
    }

    /// Endpoint for `text`, or `None` when there is nothing to translate.
    pub fn translation_url(&self, text: &str, pair: &LanguagePair) -> Option<String> {
        let query = urlencoding::encode(text.trim());
        if query.is_empty() {
            return None;
        }
        Some(format!(
            "{}/api/v1/{}/{}/{}",
            self.origin, pair.source, pair.target, query
        ))
    }

    /// Translate `text`. Blank input resolves to an empty translation without
    /// touching the network. Once `cancel` fires the call resolves to
    /// [`TranslateError::Cancelled`], even if a body already arrived.
    pub async fn translate(
        &self,
        text: &str,
        pair: &LanguagePair,
        cancel: &CancellationToken,
    ) -> Result<String, TranslateError> {
        let Some(url) = self.translation_url(text, pair) else {
            return Ok(String::new());
        };
        cancel.check_cancelled("before-send")?;
        debug!(source = %pair.source, target = %pair.target, "Requesting translation");

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TranslateError::Cancelled),
            body = self.get_json::<TranslationBody>(&url) => body.map(|body| body.translation),
        };
        cancel.check_cancelled("after-response")?;

        if let Err(err) = &result {
            warn!(source = %pair.source, target = %pair.target, "Error fetching translation: {err}");
        }
        result
    }

    pub async fn fetch_languages(
        &self,
        kind: LanguageKind,
    ) -> Result<Vec<Language>, TranslateError> {
        let body: LanguagesBody = self.get_json(&self.languages_url(kind)).await?;
        debug!(%kind, count = body.languages.len(), "Fetched language list");
        Ok(body.languages)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, TranslateError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| TranslateError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status.as_u16()));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| TranslateError::Malformed(e.to_string()))
    }
}

impl LanguageSource for LingvaClient {
    fn languages(
        &self,
        kind: LanguageKind,
    ) -> impl Future<Output = Result<Vec<Language>, TranslateError>> + Send {
        self.fetch_languages(kind)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::AUTO;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve a single canned HTTP response and report the request line seen.
    pub(crate) async fn serve_once(
        status: u16,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let origin = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request_line = read_request_line(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            let _ = tx.send(request_line);
        });
        (origin, rx)
    }

    async fn read_request_line(socket: &mut tokio::net::TcpStream) -> String {
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        String::from_utf8_lossy(&head)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn translation_url_encodes_trimmed_text() {
        let client = LingvaClient::new("https://lingva.ml/").unwrap();
        let url = client
            .translation_url("  hello world/?  ", &LanguagePair::new(AUTO, "es"))
            .unwrap();
        assert_eq!(url, "https://lingva.ml/api/v1/auto/es/hello%20world%2F%3F");
    }

    #[test]
    fn blank_text_has_no_url() {
        let client = LingvaClient::new(DEFAULT_API_ORIGIN).unwrap();
        assert_eq!(
            client.translation_url(" \n\t ", &LanguagePair::new(AUTO, "es")),
            None
        );
    }

    #[tokio::test]
    async fn blank_text_translates_to_empty_without_network() {
        // Port 9 is never served in the test environment; a request would fail.
        let client = LingvaClient::new("http://127.0.0.1:9").unwrap();
        let result = client
            .translate("   ", &LanguagePair::new(AUTO, "es"), &CancellationToken::new())
            .await;
        assert_eq!(result, Ok(String::new()));
    }

    #[tokio::test]
    async fn translate_reads_translation_field() {
        let (origin, seen) = serve_once(200, r#"{"translation":"hola"}"#).await;
        let client = LingvaClient::new(origin).unwrap();

        let result = client
            .translate("hello", &LanguagePair::new(AUTO, "es"), &CancellationToken::new())
            .await;

        assert_eq!(result, Ok("hola".to_string()));
        assert_eq!(seen.await.unwrap(), "GET /api/v1/auto/es/hello HTTP/1.1");
    }

    #[tokio::test]
    async fn non_success_status_is_a_failure() {
        let (origin, _seen) = serve_once(500, r#"{"error":"boom"}"#).await;
        let client = LingvaClient::new(origin).unwrap();

        let result = client
            .translate("hello", &LanguagePair::new("en", "es"), &CancellationToken::new())
            .await;

        assert_eq!(result, Err(TranslateError::Status(500)));
    }

    #[tokio::test]
    async fn body_without_translation_is_malformed() {
        let (origin, _seen) = serve_once(200, r#"{"nope":true}"#).await;
        let client = LingvaClient::new(origin).unwrap();

        let result = client
            .translate("hello", &LanguagePair::new("en", "es"), &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(TranslateError::Malformed(_))));
    }

    #[tokio::test]
    async fn cancelling_a_hung_call_yields_cancelled() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let origin = format!("http://{}", listener.local_addr().unwrap());
        // Accept and hold the connection open without answering.
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(socket);
        });
        let client = LingvaClient::new(origin).unwrap();
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            client.translate("hello", &LanguagePair::new("en", "es"), &cancel),
        )
        .await
        .expect("cancellation ends the call");

        assert_eq!(result, Err(TranslateError::Cancelled));
    }

    #[tokio::test]
    async fn fetch_languages_parses_listing() {
        let (origin, seen) = serve_once(
            200,
            r#"{"languages":[{"code":"auto","name":"Detect"},{"code":"en","name":"English"}]}"#,
        )
        .await;
        let client = LingvaClient::new(origin).unwrap();

        let langs = client.fetch_languages(LanguageKind::Source).await.unwrap();

        assert_eq!(langs.len(), 2);
        assert_eq!(langs[1], Language::new("en", "English"));
        assert_eq!(seen.await.unwrap(), "GET /api/v1/languages/source HTTP/1.1");
    }
}
