//! Resume pipeline, one sequential run per request.
//!
//! Flow: assemble_prompt → GenerationClient::generate → layout::format →
//!       layout::materialize.
//!
//! Generation failures abort the run (no retry). Formatting and the temp-file
//! write are CPU/disk bound and run inside `tokio::task::spawn_blocking`.

use std::path::{Path, PathBuf};

use tempfile::TempPath;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::assembler::assemble_prompt;
use crate::generation::prompts::FOLLOW_UP_INSTRUCTION;
use crate::layout::{self, PageConfig, RenderedDocument, WriteError};
use crate::llm_client::GenerationClient;
use crate::models::resume::ResumeInput;

/// Everything one pipeline run produces.
#[derive(Debug)]
pub struct PipelineOutput {
    pub resume_id: Uuid,
    /// Generated text exactly as returned by the service (markers included).
    pub resume_text: String,
    pub document: RenderedDocument,
    /// Temp file holding `document.bytes`; deleted when dropped.
    pub path: TempPath,
}

pub async fn run_pipeline(
    generator: &dyn GenerationClient,
    input: &ResumeInput,
    page_config: &PageConfig,
    output_dir: Option<&Path>,
) -> Result<PipelineOutput, AppError> {
    let resume_id = Uuid::new_v4();

    // Step 1: Assemble prompt
    let prompt = assemble_prompt(input);
    info!(
        %resume_id,
        model = generator.model(),
        prompt_chars = prompt.len(),
        "Generating resume text"
    );

    // Step 2: Generate
    let resume_text = generator.generate(&prompt, FOLLOW_UP_INSTRUCTION).await?;
    info!(%resume_id, generated_chars = resume_text.len(), "Resume text generated");

    // Steps 3-4: Format and write, off the async executor
    let text = resume_text.clone();
    let config = page_config.clone();
    let dir: Option<PathBuf> = output_dir.map(Path::to_path_buf);
    let (document, path) = tokio::task::spawn_blocking(move || {
        let document = layout::format(&text, &config)?;
        let path = layout::materialize(&document, dir.as_deref())?;
        Ok::<_, WriteError>((document, path))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed formatting resume: {e}")))??;

    info!(
        %resume_id,
        blocks = document.blocks.len(),
        pages = document.page_count(),
        path = %path.display(),
        "Resume document written"
    );

    Ok(PipelineOutput {
        resume_id,
        resume_text,
        document,
        path,
    })
}
