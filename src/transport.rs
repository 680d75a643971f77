use crate::endpoint::Method;
use crate::error::Result;
use std::io::Read;
use std::sync::Arc;
use tracing::trace;
use url::Url;

/// Header the service requires to return the documented response envelope
pub const ENVELOPE_HEADER: (&str, &str) = ("X-ADN-Migration-Overrides", "response_envelope=1");

/// Readable response body, released when dropped
pub type Body = Box<dyn Read + Send>;

/// A fully resolved outbound request. Requests never carry a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(&'static str, &'static str)>,
}

/// Sends requests and hands back the raw response body.
///
/// Implementations are shared between concurrent calls and must not keep
/// per-request state. HTTP status codes are not reported; the envelope
/// decides success.
pub trait Transport: Send + Sync {
    fn send(&self, request: &Request) -> Result<Body>;
}

impl Transport for reqwest::blocking::Client {
    fn send(&self, request: &Request) -> Result<Body> {
        let mut builder = self.request(request.method.into(), request.url.clone());
        for &(name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.send()?;
        trace!(status = %response.status(), url = %request.url, "response received");
        Ok(Box::new(response))
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: &Request) -> Result<Body> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &Request) -> Result<Body> {
        (**self).send(request)
    }
}
