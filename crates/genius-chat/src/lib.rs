//! Page logic for the Genius code-generation chat.
//!
//! Provides the `PromptForm` schema, the `CompletionTransport` trait (with an
//! HTTP implementation behind the `http` feature), the `ChatSession` state
//! machine shared by the web page and the CLI, and `render_markdown`.

mod config;
mod form;
#[cfg(feature = "http")]
mod http;
pub mod markdown;
mod session;
mod transport;

pub use config::*;
pub use form::*;
#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use markdown::render_markdown;
pub use session::*;
pub use transport::*;

pub use genius_types::*;
