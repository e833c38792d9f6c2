use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::{header, HeaderMap, Request};

use super::config::ErrorHandlingConfig;

/// Request details attached to every failure log entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub method: String,
    pub path: String,
    pub user_agent: Option<String>,
    pub client_address: Option<String>,
    pub trace_id: Option<String>,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_client_address(mut self, address: impl Into<String>) -> Self {
        self.client_address = Some(address.into());
        self
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Capture the context of an incoming request.
    ///
    /// Only the path is recorded; the query string is left out.
    pub fn from_request<B>(req: &Request<B>, config: &ErrorHandlingConfig) -> Self {
        let headers = req.headers();

        let trace_id = config
            .trace_id_headers
            .iter()
            .find_map(|name| header_value(headers, name));

        let socket_address = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        let client_address = if config.trust_proxy_headers {
            forwarded_for(headers).or(socket_address)
        } else {
            socket_address
        };

        Self {
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
            user_agent: header_value(headers, header::USER_AGENT.as_str()),
            client_address,
            trace_id,
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// First hop of `X-Forwarded-For`
fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    header_value(headers, "x-forwarded-for")
        .and_then(|value| value.split(',').next().map(|hop| hop.trim().to_string()))
        .filter(|hop| !hop.is_empty())
}
