use axum::response::Html;

/// GET /
/// Single-page form: collects the resume fields, posts them as JSON,
/// shows the generated text and links the PDF download.
pub async fn form_handler() -> Html<&'static str> {
    Html(FORM_PAGE)
}

const FORM_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>AI Resume Builder</title>
<style>
  body { font-family: Helvetica, Arial, sans-serif; max-width: 860px; margin: 2rem auto; padding: 0 1rem; }
  fieldset { margin-bottom: 1rem; border: 1px solid #ccc; }
  label { display: block; margin: .4rem 0 .1rem; }
  input, textarea { width: 100%; box-sizing: border-box; }
  .entry { border-top: 1px dashed #ddd; padding-top: .4rem; margin-top: .4rem; }
  #resume-text { white-space: pre-wrap; background: #f6f6f6; padding: 1rem; }
  .error { color: #b00020; }
</style>
</head>
<body>
<h1>AI Resume Builder</h1>
<form id="resume-form">
  <fieldset>
    <legend>Personal Information</legend>
    <label>Full Name <input name="full_name"></label>
    <label>Email <input name="email" type="email"></label>
    <label>Contact Number <input name="phone"></label>
    <label>LinkedIn Profile <input name="linkedin"></label>
    <label>GitHub Profile <input name="github"></label>
  </fieldset>

  <fieldset>
    <legend>Education</legend>
    <label>Number of entries <input id="education-count" type="number" min="0" max="5" value="1"></label>
    <div id="education"></div>
  </fieldset>

  <fieldset>
    <legend>Work Experience</legend>
    <label>Number of entries <input id="experience-count" type="number" min="0" max="5" value="1"></label>
    <div id="experience"></div>
  </fieldset>

  <fieldset>
    <legend>Skills</legend>
    <label>Skills (comma-separated) <textarea name="skills" rows="3"></textarea></label>
  </fieldset>

  <fieldset>
    <legend>Projects</legend>
    <label>Number of entries <input id="projects-count" type="number" min="0" max="5" value="1"></label>
    <div id="projects"></div>
  </fieldset>

  <fieldset>
    <legend>Extracurricular Activities</legend>
    <label>Activities (comma-separated) <textarea name="extracurricular" rows="3"></textarea></label>
  </fieldset>

  <button type="submit">Generate Resume</button>
</form>

<p id="status"></p>
<section id="result" hidden>
  <h2>Generated Resume</h2>
  <pre id="resume-text"></pre>
  <a id="download" download="Resume.pdf">Download Resume as PDF</a>
</section>

<script>
const SECTIONS = {
  education: [["degree", "Degree and Major"], ["school", "School"], ["college", "College"], ["graduation_year", "Graduation Year"]],
  experience: [["position", "Position"], ["company", "Company"], ["duration", "Duration"], ["description", "Job Description"]],
  projects: [["name", "Project Name"], ["description", "Project Description"]],
};

function renderEntries(section) {
  const count = Math.max(0, Math.min(5, parseInt(document.getElementById(section + "-count").value, 10) || 0));
  const container = document.getElementById(section);
  container.innerHTML = "";
  for (let i = 0; i < count; i++) {
    const entry = document.createElement("div");
    entry.className = "entry";
    entry.dataset.section = section;
    for (const [field, label] of SECTIONS[section]) {
      const input = field === "description" ? document.createElement("textarea") : document.createElement("input");
      input.dataset.field = field;
      const wrapper = document.createElement("label");
      wrapper.textContent = label + " " + (i + 1);
      wrapper.appendChild(input);
      entry.appendChild(wrapper);
    }
    container.appendChild(entry);
  }
}

function collectEntries(section) {
  return Array.from(document.querySelectorAll('.entry[data-section="' + section + '"]')).map((entry) => {
    const value = {};
    entry.querySelectorAll("[data-field]").forEach((input) => { value[input.dataset.field] = input.value; });
    return value;
  });
}

for (const section of Object.keys(SECTIONS)) {
  document.getElementById(section + "-count").addEventListener("change", () => renderEntries(section));
  renderEntries(section);
}

document.getElementById("resume-form").addEventListener("submit", async (event) => {
  event.preventDefault();
  const form = event.target;
  const status = document.getElementById("status");
  status.className = "";
  status.textContent = "Generating...";
  document.getElementById("result").hidden = true;

  const body = {
    personal: {
      full_name: form.full_name.value,
      email: form.email.value,
      phone: form.phone.value,
      linkedin: form.linkedin.value,
      github: form.github.value,
    },
    education: collectEntries("education"),
    experience: collectEntries("experience"),
    skills: form.skills.value,
    projects: collectEntries("projects"),
    extracurricular: form.extracurricular.value,
  };

  try {
    const response = await fetch("/api/v1/resumes", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify(body),
    });
    const payload = await response.json();
    if (!response.ok) {
      throw new Error(payload.error ? payload.error.message : response.statusText);
    }
    status.textContent = "";
    document.getElementById("resume-text").textContent = payload.resume_text;
    document.getElementById("download").href = payload.download_url;
    document.getElementById("result").hidden = false;
  } catch (err) {
    status.className = "error";
    status.textContent = "Error: " + err.message;
  }
});
</script>
</body>
</html>
"#;
