//! # adn - App.net REST API client
//!
//! A Rust client for the App.net social network API. Operations are called
//! by name ("follow user", "list subscriptions", ...) instead of by URL: the
//! crate looks the name up in a static endpoint registry, fills the path
//! template from typed arguments, sends the request and unwraps the
//! service's response envelope.
//!
//! ## Features
//!
//! - Declarative endpoint registry, compiled and validated once per process
//! - Typed path arguments (`User`, `Post`, `Hashtag`, `Stream`,
//!   `Subscription`, `Filter`)
//! - Generic decoding of the `data` payload into any `Deserialize` type
//! - Distinct error kinds for unknown operations, templates, transport,
//!   I/O, decoding and API-reported failures
//! - Pluggable [`Transport`], defaulting to a pooled `reqwest` client
//!
//! ## Basic Usage
//!
//! ```no_run
//! use adn::{Dispatcher, PathArgs};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: String,
//!     username: String,
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dispatcher = Dispatcher::new();
//!
//!     let user: User = dispatcher.apply("retrieve user", &PathArgs::new().user("1"))?;
//!
//!     println!("User: {} ({})", user.username, user.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Handling API errors
//!
//! ```no_run
//! use adn::{AdnError, Dispatcher, PathArgs};
//!
//! let dispatcher = Dispatcher::new();
//! let mut post = serde_json::Value::Null;
//!
//! match dispatcher.execute_decoded("retrieve post", &PathArgs::new().post("1"), &mut post) {
//!     Ok(()) => println!("{post}"),
//!     Err(AdnError::Api(err)) => eprintln!("service refused: {err}"),
//!     Err(other) => return Err(other),
//! }
//! # Ok::<(), AdnError>(())
//! ```

pub mod client;
pub mod dispatch;
pub mod endpoint;
pub mod error;
pub mod resources;
pub mod response;
pub mod template;
pub mod transport;

// Re-export main types for convenience
pub use client::{Config, FilterDeletion};
pub use dispatch::Dispatcher;
pub use endpoint::{Endpoint, Method, Registry, RegistryError};
pub use error::{AdnError, ApiError, ErrorKind, Result};
pub use resources::{Acl, Counts, Subscription, User};
pub use response::{Envelope, Meta, Response};
pub use template::{PathArgs, PathTemplate, Placeholder, TemplateError};
pub use transport::{Body, Request, Transport};
