//! Assistant Model Integration
//!
//! The language model is an untrusted calculation oracle: it receives the
//! formatted price tables and the user's request, and must answer in a
//! constrained JSON schema where every numeric field is a string. This
//! module owns the HTTP client, the prompt assembly and the lenient
//! response coercion back into typed results.

mod client;
mod coerce;
mod prompt;

pub use client::LlmClient;
pub use coerce::{coerce_calculation_result, strip_json_fence};
