use serde::{Deserialize, Serialize};

/// Upper bound on education, experience and project entries per form.
pub const MAX_ENTRIES_PER_SECTION: usize = 5;

/// The six free-text fields the prompt is assembled from.
///
/// No validation: empty fields are allowed and simply produce an emptier prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeInput {
    pub personal_info: String,
    pub education: String,
    pub experience: String,
    pub skills: String,
    pub projects: String,
    pub extracurricular: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    /// Degree and major.
    pub degree: String,
    pub school: String,
    pub college: String,
    pub graduation_year: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub position: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
}

/// Structured form submitted by the presentation shell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeForm {
    pub personal: PersonalInfo,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    /// Comma-separated, passed through as typed.
    pub skills: String,
    pub projects: Vec<ProjectEntry>,
    /// Comma-separated, passed through as typed.
    pub extracurricular: String,
}

impl PersonalInfo {
    /// One labelled line per field, each newline-terminated.
    pub fn render(&self) -> String {
        format!(
            "Full Name: {}\nContact Number: {}\nEmail Address: {}\nLinkedIn Profile: {}\nGitHub Profile: {}\n",
            self.full_name, self.phone, self.email, self.linkedin, self.github
        )
    }
}

impl EducationEntry {
    pub fn render(&self) -> String {
        format!(
            "{} from {}, {} - {}",
            self.degree, self.school, self.college, self.graduation_year
        )
    }
}

impl ExperienceEntry {
    pub fn render(&self) -> String {
        format!(
            "{}, {} ({})\n  - {}",
            self.position, self.company, self.duration, self.description
        )
    }
}

impl ProjectEntry {
    pub fn render(&self) -> String {
        format!("{} - {}", self.name, self.description)
    }
}

impl ResumeForm {
    /// Sections holding more than [`MAX_ENTRIES_PER_SECTION`] entries, with their counts.
    pub fn oversized_sections(&self) -> Vec<(&'static str, usize)> {
        [
            ("education", self.education.len()),
            ("experience", self.experience.len()),
            ("projects", self.projects.len()),
        ]
        .into_iter()
        .filter(|(_, n)| *n > MAX_ENTRIES_PER_SECTION)
        .collect()
    }

    /// Collapses the structured form into the six prompt fields.
    pub fn to_input(&self) -> ResumeInput {
        ResumeInput {
            personal_info: self.personal.render(),
            education: join_rendered(&self.education, EducationEntry::render),
            experience: join_rendered(&self.experience, ExperienceEntry::render),
            skills: self.skills.clone(),
            projects: join_rendered(&self.projects, ProjectEntry::render),
            extracurricular: self.extracurricular.clone(),
        }
    }
}

fn join_rendered<T>(entries: &[T], render: fn(&T) -> String) -> String {
    entries.iter().map(render).collect::<Vec<_>>().join("\n")
}
