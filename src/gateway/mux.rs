//! Forwarding multiplexer.
//!
//! # Responsibilities
//! - Own the established client channel for the lifetime of one attempt
//! - Rewrite request URIs to the upstream authority
//! - Forward every request over the channel and relay the response
//!
//! The mux defines no routes of its own: every path is forwarded verbatim,
//! and the wire-level translation is whatever the channel speaks.

use axum::{
    body::Body,
    extract::State,
    http::{
        header,
        uri::{PathAndQuery, Scheme},
        HeaderMap, Request, Response, StatusCode, Uri,
    },
    response::IntoResponse,
    Router,
};
use axum::http::uri::Authority;
use http_body_util::BodyExt;
use tonic::transport::Channel;
use tonic::Status;
use tower::ServiceExt;

/// Ready-to-serve multiplexer bound to one upstream channel.
#[derive(Clone)]
pub struct ForwardingMux {
    channel: Channel,
    authority: Authority,
}

#[derive(Clone)]
struct ForwardingState {
    channel: Channel,
    authority: Authority,
}

impl ForwardingMux {
    /// Build a mux over an already established channel.
    pub fn new(channel: Channel, authority: Authority) -> Self {
        Self { channel, authority }
    }

    /// The upstream authority requests are forwarded to.
    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Convert into the handler served by the HTTP server. Every route,
    /// including `/`, falls through to the forwarding handler.
    pub fn into_router(self) -> Router {
        let state = ForwardingState {
            channel: self.channel,
            authority: self.authority,
        };
        Router::new().fallback(forward).with_state(state)
    }
}

async fn forward(
    State(state): State<ForwardingState>,
    request: Request<Body>,
) -> Response<Body> {
    let (mut parts, body) = request.into_parts();

    let mut uri = parts.uri.clone().into_parts();
    uri.scheme = Some(Scheme::HTTP);
    uri.authority = Some(state.authority.clone());
    if uri.path_and_query.is_none() {
        uri.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    parts.uri = match Uri::from_parts(uri) {
        Ok(uri) => uri,
        Err(err) => {
            tracing::error!(error = %err, "failed to rewrite request URI");
            return (StatusCode::BAD_GATEWAY, "invalid upstream URI").into_response();
        }
    };

    // The upstream connection is HTTP/2; connection-scoped headers from an
    // HTTP/1.1 client are illegal there.
    strip_connection_headers(&mut parts.headers);

    let body = body
        .map_err(|err| Status::internal(err.to_string()))
        .boxed_unsync();
    let request = Request::from_parts(parts, body);

    match state.channel.clone().oneshot(request).await {
        Ok(response) => response.map(Body::new),
        Err(err) => {
            tracing::error!(upstream = %state.authority, error = %err, "upstream call failed");
            (StatusCode::BAD_GATEWAY, "upstream call failed").into_response()
        }
    }
}

/// Remove hop-by-hop headers. `te` stays: gRPC requires `te: trailers`.
fn strip_connection_headers(headers: &mut HeaderMap) {
    headers.remove(header::CONNECTION);
    headers.remove(header::TRANSFER_ENCODING);
    headers.remove(header::UPGRADE);
    headers.remove("keep-alive");
    headers.remove("proxy-connection");
}
