//! Prompt assembler: embeds the six resume fields under labelled headings.
//!
//! Pure string building: no escaping, no length limits, no error cases. Field
//! text is inserted verbatim, never interpreted as a template.

use crate::generation::prompts::{PROMPT_PREAMBLE, SECTION_HEADINGS};
use crate::models::resume::ResumeInput;

pub fn assemble_prompt(input: &ResumeInput) -> String {
    let fields = [
        &input.personal_info,
        &input.education,
        &input.experience,
        &input.skills,
        &input.projects,
        &input.extracurricular,
    ];

    let sections = SECTION_HEADINGS
        .iter()
        .zip(fields)
        .map(|(heading, value)| format!("{heading}:\n{value}"))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{PROMPT_PREAMBLE}\n\n{sections}")
}
