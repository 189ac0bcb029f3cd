// Prompt text for resume generation.

/// Opening line of every generation prompt.
pub const PROMPT_PREAMBLE: &str = "Generate a professional resume using the following details:";

/// Second user turn sent after the assembled prompt.
pub const FOLLOW_UP_INSTRUCTION: &str = "Format as a professional resume.";

/// Labelled headings, in the order the prompt lists the resume fields.
pub const SECTION_HEADINGS: [&str; 6] = [
    "Personal Information",
    "Education",
    "Work Experience",
    "Skills",
    "Projects",
    "Extracurricular Activities",
];
