use std::fmt;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct MessageRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct MessageReply {
    response: String,
}

/// How a send can fail. The two classes surface differently in the
/// conversation: server-reported messages are shown verbatim, transport
/// failures get an "Error: " prefix.
#[derive(Debug)]
pub enum SendError {
    /// The server answered with a non-success status and this message.
    Server(String),
    /// The request never produced a usable response.
    Transport(anyhow::Error),
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Server(msg) => write!(f, "{}", msg),
            SendError::Transport(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SendError::Server(_) => None,
            SendError::Transport(err) => Some(err.as_ref()),
        }
    }
}

impl From<reqwest::Error> for SendError {
    fn from(err: reqwest::Error) -> Self {
        SendError::Transport(err.into())
    }
}

#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
}

impl ChatClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Send one message and return the reply text. Exactly one request per
    /// call; serialization of calls is the caller's job.
    pub async fn send(&self, message: &str) -> Result<String, SendError> {
        let url = format!("{}/api/message", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&MessageRequest { message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SendError::Server(error_message(status, &body)));
        }

        let reply: MessageReply = response.json().await?;
        Ok(reply.response)
    }
}

/// Pull a human-readable message out of an error body. The server reuses the
/// `response` field for error text; anything else falls back to the status
/// code.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<MessageReply>(body)
        .map(|reply| reply.response)
        .unwrap_or_else(|_| format!("HTTP error! status: {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_string(&MessageRequest { message: "hi" }).unwrap();
        assert_eq!(body, r#"{"message":"hi"}"#);
    }

    #[test]
    fn test_reply_parsing() {
        let reply: MessageReply = serde_json::from_str(r#"{"response":"hello"}"#).unwrap();
        assert_eq!(reply.response, "hello");
    }

    #[test]
    fn test_error_message_from_body() {
        let msg = error_message(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"response":"server overloaded"}"#,
        );
        assert_eq!(msg, "server overloaded");
    }

    #[test]
    fn test_error_message_fallback_on_non_json() {
        let msg = error_message(StatusCode::BAD_GATEWAY, "<html>nope</html>");
        assert_eq!(msg, "HTTP error! status: 502");
    }

    #[test]
    fn test_error_message_fallback_on_missing_field() {
        let msg = error_message(StatusCode::NOT_FOUND, r#"{"detail":"gone"}"#);
        assert_eq!(msg, "HTTP error! status: 404");
    }

    #[test]
    fn test_send_error_display() {
        let err = SendError::Server("server overloaded".to_string());
        assert_eq!(err.to_string(), "server overloaded");

        let err = SendError::Transport(anyhow::anyhow!("connection refused"));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ChatClient::new("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
