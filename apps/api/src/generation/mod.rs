// Resume generation: prompt assembly, the generation call, and the document pipeline.
// All model calls go through llm_client::GenerationClient.

pub mod assembler;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod store;
