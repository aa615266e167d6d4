//! HTTP client SDK for the api.ai conversational AI platform.
//!
//! This crate provides a typed client for the api.ai v1 REST API: text and
//! voice query submission plus session context and developer entity
//! management. Every call is a direct pass-through to the remote service;
//! requests carry a Bearer access token and a `v=<date>` protocol version
//! query parameter.
//!
//! # Example
//!
//! ```no_run
//! use apiai_client::{ApiAiClient, Context, QueryRequest, Result};
//!
//! # async fn example() -> Result<()> {
//! // Create a client
//! let client = ApiAiClient::builder()
//!     .access_token("secret")
//!     .build()?;
//!
//! // Submit a text query
//! let response = client
//!     .query()
//!     .text_message("what is the weather in paris", "session-1")
//!     .await?;
//! println!("{}", response.result.fulfillment.speech);
//!
//! // Inspect the contexts the query left active
//! for context in client.contexts().list("session-1").await? {
//!     println!("active: {} ({} queries left)", context.name, context.lifespan);
//! }
//!
//! // Submit a voice query from a WAV file (paid plan)
//! let request = QueryRequest::default().with_session("session-1");
//! let response = client.query().voice(request, "hello.wav").await?;
//! println!("{}", response.result.resolved_query);
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Query**: text queries, event triggers, voice (WAV) queries
//! - **Contexts**: list, get, create, delete per session
//! - **Entities**: CRUD plus entry-level add/update/delete

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiAiClient, ClientBuilder, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use types::*;
