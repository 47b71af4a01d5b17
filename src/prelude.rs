// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use office_agent::prelude::*;` to get started quickly.

pub use crate::config::AgentConfig;
pub use crate::error::{
    DocumentError, ExtractError, GovernorError, LlmError, OfficeError, ShellError,
};
pub use crate::llm::{
    CompletionService, ContentBlock, GeminiClient, LlmClient, Message, Request, Response, Role,
    StopReason, Usage,
};
pub use crate::office::{
    append_paragraph, create_document, create_table, extract_table, read_document, read_table,
    update_cell, CellValue, DocumentContent, Table,
};
pub use crate::throttle::{Guarded, RateGovernor, Spacing};
pub use crate::workflow::{DocumentLength, OfficeAgent, PipelineOutput};
