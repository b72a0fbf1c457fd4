//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one request per connection, no
//! keep-alive, no chunked encoding and at most a single-line request body.
//!
//! # Architecture
//!
//! - **`connection`**: per-connection state machine driving one request/response
//! - **`parser`**: turns buffered bytes into a [`request::Request`]
//! - **`request`**: request model and the GET check
//! - **`response`**: status table and response builder
//! - **`writer`**: serializes responses and writes them to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Buffer until the header block ends
//!        └──────┬──────┘
//!               │ Request parsed
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Dispatch on method, resolve file
//!        └──────┬───────────┘
//!               │ Response built
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!             Closed
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
