// ABOUTME: Workflow module - end-to-end jobs that combine files and the model.
// ABOUTME: Analysis, reports, the spreadsheet-to-report pipeline and AI generation.

mod agent;
mod prompts;

pub use agent::{DocumentLength, OfficeAgent, PipelineOutput, PIPELINE_HEADERS};

#[cfg(test)]
mod agent_test;
