use async_stream::try_stream;

use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::{
    Client as HttpClient,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use std::time::Duration;

use crate::{
    api_v1::{
        ChatCompletionChunkResponse, ChatCompletionRequest, ChatCompletionResponse, ErrorResponse,
    },
    error::OpenAiError,
    sse::{Frame, FrameDecoder},
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Required prefix of a well-formed API key.  Checking it locally is a cheap
/// fail-fast guard, not a security measure.
const CREDENTIAL_PREFIX: &str = "sk-";

/// Substitute when a failure response carries no parseable error message.
const UNKNOWN_UPSTREAM_ERROR: &str = "unknown upstream error";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Ceiling on the silence between two reads of a streamed body.  A
/// whole-request deadline would abort long completions, so only idle time is
/// bounded.
pub(crate) const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(90);

/// Minimal HTTP client for OpenAI’s *chat/completions* endpoint.
///
/// * Accepts and returns the `api_v1` request / response structs defined
///   in this crate.
/// * Each streaming call is one fresh request lifecycle; nothing is shared
///   between calls except the connection pool.
/// * Shares a single `reqwest::Client`, so cloning `OpenAiClient` is cheap.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    api_key: String,
    http: HttpClient,
    base: String,
}

/// Build the default `reqwest` client: connect timeout, idle-read timeout,
/// Rustls TLS.
pub(crate) fn default_http(read_timeout: Duration) -> HttpClient {
    HttpClient::builder()
        .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
        .read_timeout(read_timeout)
        .build()
        .expect("building reqwest client")
}

impl OpenAiClient {
    /// Convenience constructor using the default HTTP client.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_http(api_key, default_http(DEFAULT_READ_TIMEOUT), None)
    }

    /// Build with a custom `reqwest::Client` in case the caller needs proxy
    /// settings, custom TLS, different timeouts, etc.
    pub fn with_http(
        api_key: impl Into<String>,
        http: HttpClient,
        base_url: Option<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            http,
            base: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        }
    }

    /// Validate the credential and assemble the request headers.  Runs before
    /// any socket is opened so a malformed key never reaches the network.
    fn auth_headers(&self) -> Result<HeaderMap, OpenAiError> {
        if !self.api_key.starts_with(CREDENTIAL_PREFIX) {
            return Err(OpenAiError::InvalidCredentialFormat);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| OpenAiError::InvalidCredentialFormat)?;
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }

    /// Perform a **non-streaming** chat completion.
    pub async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiError> {
        let headers = self.auth_headers()?;

        let url = format!("{}/chat/completions", self.base);
        let resp = self
            .http
            .post(url)
            .headers(headers)
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }

        let bytes = resp.bytes().await?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed)
    }

    /// Perform a **streaming** chat completion.
    ///
    /// The stream yields one decoded chunk envelope per wire frame, in
    /// arrival order, and terminates on the `[DONE]` sentinel or on
    /// end-of-data.  Dropping the stream abandons the transfer.
    pub fn chat_completion_stream(
        &self,
        mut request: ChatCompletionRequest,
    ) -> impl Stream<Item = Result<ChatCompletionChunkResponse, OpenAiError>> + '_ {
        // 1) enforce streaming flag
        request.stream = Some(true);

        let url = format!("{}/chat/completions", self.base);

        // 2) async stream wrapper
        try_stream! {
            let mut headers = self.auth_headers()?;
            headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));

            let resp = self.http.post(url).headers(headers).json(&request).send().await?;

            if !resp.status().is_success() {
                return Err(api_error(resp).await)?;
            }

            let mut bytes_stream = resp.bytes_stream();
            let mut decoder = FrameDecoder::new();

            while let Some(chunk) = bytes_stream.next().await {
                let chunk = chunk?;
                for frame in decoder.feed(&chunk) {
                    match frame {
                        Frame::Delta(parsed) => {
                            yield parsed;
                        }
                        // the stream is over even if the connection lingers
                        Frame::Done => {
                            return;
                        }
                    }
                }
            }

            // end-of-data without the sentinel is still a normal completion;
            // a trailing unterminated line is decoded on the way out
            if let Some(Frame::Delta(parsed)) = decoder.finish() {
                yield parsed;
            }

            #[cfg(feature = "tracing")]
            if decoder.dropped_frames() > 0 {
                tracing::debug!(
                    dropped = decoder.dropped_frames(),
                    "stream finished with undecodable frames"
                );
            }
        }
    }
}

/// Build the error for a non-success response, extracting the upstream
/// message from the JSON body when one is present.
async fn api_error(resp: reqwest::Response) -> OpenAiError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| UNKNOWN_UPSTREAM_ERROR.to_owned());
    OpenAiError::Api { status, message }
}
