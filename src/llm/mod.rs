// ABOUTME: LLM module - client abstraction and the throttled completion service.
// ABOUTME: Defines types, the client trait, and the Gemini provider.

mod client;
mod completion;
mod gemini;
mod types;

pub use client::*;
pub use completion::*;
pub use gemini::*;
pub use types::*;

#[cfg(test)]
pub(crate) mod testing;
