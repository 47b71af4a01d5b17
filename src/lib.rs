// ABOUTME: Root module for office-agent - spreadsheet, document and LLM automation.
// ABOUTME: Re-exports the public types from submodules.

pub mod config;
pub mod error;
pub mod llm;
pub mod office;
pub mod prelude;
pub mod shell;
pub mod throttle;
pub mod workflow;

pub use error::OfficeError;
