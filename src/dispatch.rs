use crate::client::{create_client, Config};
use crate::endpoint::{Endpoint, Registry};
use crate::error::Result;
use crate::resources::Subscription;
use crate::response::{Envelope, Response};
use crate::template::PathArgs;
use crate::transport::{Body, Request, Transport, ENVELOPE_HEADER};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::io::Read;
use tracing::{debug, trace};
use url::Url;

/// Resolves named operations and runs them through a shared transport.
///
/// Each call owns its request and response, so one dispatcher can be used
/// from many threads at once when its transport allows it.
pub struct Dispatcher<T = Client> {
    /// HTTP transport
    pub transport: T,
    /// Configuration
    pub config: Config,
    registry: &'static Registry,
}

impl Dispatcher<Client> {
    /// Create a dispatcher with default configuration
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a dispatcher with custom configuration
    pub fn with_config(config: Config) -> Self {
        let client = create_client(config.timeout);
        Self::with_transport(client, config)
    }
}

impl Default for Dispatcher<Client> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Dispatcher<T> {
    /// Create a dispatcher that sends through `transport`
    pub fn with_transport(transport: T, config: Config) -> Self {
        Dispatcher {
            transport,
            config,
            registry: Registry::builtin(),
        }
    }

    pub fn registry(&self) -> &'static Registry {
        self.registry
    }

    /// Resolve the path of operation `name`
    ///
    /// # Arguments
    /// * `name` - Registered operation name, e.g. "retrieve user"
    /// * `args` - Values for the placeholders the operation references
    pub fn resolve(&self, name: &str, args: &PathArgs) -> Result<String> {
        let endpoint = self.registry.lookup(name)?;
        Ok(endpoint.template.render(endpoint.name, args)?)
    }

    /// Build the request for operation `name` without sending it
    pub fn request(&self, name: &str, args: &PathArgs) -> Result<Request> {
        let endpoint = self.registry.lookup(name)?;
        self.build_request(endpoint, args)
    }

    fn build_request(&self, endpoint: &Endpoint, args: &PathArgs) -> Result<Request> {
        let path = endpoint.template.render(endpoint.name, args)?;
        let url = Url::parse(&format!("{}{}", self.config.base_url(), path))?;

        Ok(Request {
            method: self.config.filter_deletion.method_for(endpoint),
            url,
            headers: vec![ENVELOPE_HEADER],
        })
    }

    /// Send operation `name` and return the raw response body
    ///
    /// Exactly one request is made; nothing is retried or cached.
    pub fn execute(&self, name: &str, args: &PathArgs) -> Result<Body> {
        let request = self.request(name, args)?;
        debug!(operation = name, method = %request.method, url = %request.url, "dispatching");
        self.transport.send(&request)
    }

    /// Send operation `name` and decode the response envelope
    fn envelope(&self, name: &str, args: &PathArgs) -> Result<Envelope> {
        let mut body = Vec::new();
        {
            let mut stream = self.execute(name, args)?;
            stream.read_to_end(&mut body)?;
        }
        trace!(operation = name, bytes = body.len(), "response body read");

        let envelope = Envelope::from_slice(&body)?;
        if envelope.meta.is_error() {
            debug!(
                operation = name,
                code = envelope.meta.code,
                error_id = %envelope.meta.error_id,
                "API returned an error"
            );
        }
        Ok(envelope)
    }

    /// Run operation `name` and decode its `data` into `destination`
    ///
    /// On an API error, or when `data` is null or missing, `destination` is
    /// left untouched.
    pub fn execute_decoded<D>(&self, name: &str, args: &PathArgs, destination: &mut D) -> Result<()>
    where
        D: DeserializeOwned,
    {
        self.envelope(name, args)?.apply_into(destination)
    }

    /// Run operation `name` and return its decoded `data`
    pub fn apply<D>(&self, name: &str, args: &PathArgs) -> Result<D>
    where
        D: DeserializeOwned,
    {
        self.envelope(name, args)?.apply()
    }

    /// Run operation `name` and return its decoded `data` along with `meta`
    pub fn do_request<D>(&self, name: &str, args: &PathArgs) -> Result<Response<D>>
    where
        D: DeserializeOwned,
    {
        self.envelope(name, args)?.into_response()
    }

    /// List the app's real-time subscriptions
    pub fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
        self.apply("list subscriptions", &PathArgs::new())
    }

    /// Delete one subscription, returning the deleted record
    pub fn delete_subscription(&self, id: &str) -> Result<Subscription> {
        self.apply("delete subscription", &PathArgs::new().subscription(id))
    }

    /// Delete every subscription of the app, returning the deleted records
    pub fn delete_all_subscriptions(&self) -> Result<Vec<Subscription>> {
        self.apply("delete all subscriptions", &PathArgs::new())
    }
}

impl<T: Clone> Clone for Dispatcher<T> {
    fn clone(&self) -> Self {
        Dispatcher {
            transport: self.transport.clone(),
            config: self.config.clone(),
            registry: self.registry,
        }
    }
}
