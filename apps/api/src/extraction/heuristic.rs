//! Deterministic extraction backend.
//!
//! Section-aware regex heuristics over the decoded text. Always available,
//! no I/O, and the only backend that fills `ats_score`. Recall is best
//! effort; the point is a predictable result without an external service.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{
    Certification, ContactInformation, EducationEntry, ProjectEntry, ResumeData, Skills,
    WorkExperienceEntry,
};

use super::{ExtractMethod, ExtractionBackend, ExtractionError};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

static PHONE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\+?\d{1,3}[-.\s]?\(?\d{3,4}\)?[-.\s]?\d{3,4}[-.\s]?\d{3,4}").unwrap(),
        Regex::new(r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap(),
        Regex::new(r"\d{10,15}").unwrap(),
    ]
});

static LOCATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z][a-z]+,\s*[A-Z][A-Za-z]+(?:,\s*[A-Z][A-Za-z]+)?").unwrap());

static LINKEDIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)linkedin\.com/(?:in/)?[\w-]+").unwrap());

static GITHUB_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)github\.com/[\w-]+").unwrap());

static DEGREE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(bachelor|master|phd|doctorate|b\.?sc|m\.?sc|b\.?tech|m\.?tech|mba|bba|diploma)\b\.?(?:\s*(?:of|in|-)\s*([A-Za-z][A-Za-z ]{2,}))?",
    )
    .unwrap()
});

static INSTITUTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:university|college|institute|school)\s+of\s+[A-Za-z ]+|[A-Za-z][A-Za-z ]*(?:university|college|institute|school)\b").unwrap()
});

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

static GPA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+\.?\d*)\s*(gpa|cgpa|percentage|%)").unwrap());

static JOB_TITLE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)\b(?:senior|junior|lead|principal|chief)?\s*(?:software engineer|data scientist|product manager|business analyst|web developer|full stack developer|backend developer|frontend developer|devops engineer|qa engineer|intern)\b").unwrap(),
        Regex::new(r"(?i)\b(?:manager|director|coordinator|specialist|consultant|analyst|developer|engineer)\b").unwrap(),
    ]
});

static DURATION_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{4}\s*[-–]\s*(?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{4}|present)").unwrap(),
        Regex::new(r"(?i)\d{4}\s*[-–]\s*(?:\d{4}|present)").unwrap(),
        Regex::new(r"(?i)\b\d+\+?\s*(?:years?|months?|yrs?)\b").unwrap(),
    ]
});

static YEARS_NUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:years?|yrs?)").unwrap());
static MONTHS_NUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s*months?").unwrap());

const TECHNICAL_SKILLS: &[&str] = &[
    // Programming languages
    "Python", "Java", "JavaScript", "C++", "C#", "PHP", "Ruby", "Go", "Swift", "Kotlin",
    "Scala", "Rust", "TypeScript", "Dart", "MATLAB", "SQL",
    // Web
    "HTML", "CSS", "React", "Angular", "Vue.js", "Node.js", "Express.js", "Django", "Flask",
    "Spring Boot", "ASP.NET", "Laravel", "Bootstrap", "jQuery",
    // Databases
    "MySQL", "PostgreSQL", "MongoDB", "SQLite", "Oracle", "SQL Server", "Redis",
    "Elasticsearch", "Cassandra", "DynamoDB",
    // Cloud & DevOps
    "AWS", "Azure", "Google Cloud", "Docker", "Kubernetes", "Jenkins", "Git", "GitHub",
    "GitLab", "Terraform", "Ansible", "Linux", "Unix",
    // Data & ML
    "Machine Learning", "Deep Learning", "Data Science", "Pandas", "NumPy", "Matplotlib",
    "Seaborn", "Scikit-learn", "TensorFlow", "PyTorch", "Keras", "Tableau", "Power BI",
    "Excel", "Jupyter", "Spark", "Hadoop",
    // Mobile
    "Android", "iOS", "React Native", "Flutter", "Xamarin",
    // Other
    "Microservices", "RESTful API", "GraphQL", "WebSockets", "OAuth", "JWT",
];

const SOFT_SKILLS: &[&str] = &[
    "Leadership", "Communication", "Teamwork", "Problem Solving", "Project Management",
    "Time Management", "Analytical Thinking", "Creativity", "Adaptability",
    "Critical Thinking", "Collaboration", "Public Speaking", "Negotiation", "Mentoring",
    "Strategic Planning",
];

const PROJECT_TECH_KEYWORDS: &[&str] = &[
    "Python", "Java", "React", "Node.js", "SQL", "HTML", "CSS", "JavaScript", "Django",
    "Flask", "MongoDB", "MySQL",
];

const CERT_KEYWORDS: &[&str] = &[
    "aws certified", "microsoft certified", "google certified", "cisco certified", "pmp",
    "scrum master", "six sigma", "itil", "comptia", "cissp", "certified", "certification",
    "license",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Section {
    Summary,
    Skills,
    Education,
    Experience,
    Projects,
    Certifications,
}

/// Recognizes a section header line, tolerant of a trailing colon.
fn header_section(line: &str) -> Option<Section> {
    let trimmed = line.trim().trim_end_matches(':').trim();
    if trimmed.len() > 40 {
        return None;
    }
    let lower = trimmed.to_lowercase();
    match lower.as_str() {
        "summary" | "professional summary" | "career summary" | "profile" | "objective"
        | "career objective" | "about" | "about me" | "introduction" => Some(Section::Summary),
        "skills" | "technical skills" | "key skills" | "core competencies" | "technologies"
        | "programming languages" | "tools" | "frameworks" => Some(Section::Skills),
        "education" | "academic" | "academics" | "qualification" | "qualifications" => {
            Some(Section::Education)
        }
        "experience" | "work experience" | "professional experience" | "employment"
        | "employment history" | "work history" | "career" => Some(Section::Experience),
        "projects" | "personal projects" | "key projects" | "major projects"
        | "notable projects" | "portfolio" => Some(Section::Projects),
        "certifications" | "certification" | "certificates" | "licenses" | "credentials" => {
            Some(Section::Certifications)
        }
        _ => None,
    }
}

/// Splits the text into named sections by header lines. Lines before the
/// first header belong to no section (that is where contact info lives).
fn split_sections(text: &str) -> Vec<(Section, Vec<&str>)> {
    let mut sections: Vec<(Section, Vec<&str>)> = Vec::new();
    let mut current: Option<usize> = None;

    for line in text.lines() {
        if let Some(section) = header_section(line) {
            sections.push((section, Vec::new()));
            current = Some(sections.len() - 1);
            continue;
        }
        if let Some(idx) = current {
            sections[idx].1.push(line);
        }
    }

    sections
}

fn section_text(sections: &[(Section, Vec<&str>)], wanted: Section) -> Option<String> {
    let mut combined = String::new();
    for (section, lines) in sections {
        if *section == wanted {
            if !combined.is_empty() {
                combined.push('\n');
            }
            combined.push_str(&lines.join("\n"));
        }
    }
    if combined.trim().is_empty() {
        None
    } else {
        Some(combined)
    }
}

fn extract_contact(text: &str) -> ContactInformation {
    let mut contact = ContactInformation::default();

    // Name: first early line without digits or an email, at most five words.
    for line in text.lines().filter(|l| !l.trim().is_empty()).take(5) {
        let line = line.trim();
        if !line.contains('@')
            && !line.chars().any(|c| c.is_ascii_digit() || c == '+')
            && line.split_whitespace().count() <= 5
            && header_section(line).is_none()
        {
            contact.name = Some(line.to_string());
            break;
        }
    }

    contact.email = EMAIL_RE.find(text).map(|m| m.as_str().to_string());

    for pattern in PHONE_RES.iter() {
        if let Some(m) = pattern.find(text) {
            let digits: String = m
                .as_str()
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '+')
                .collect();
            if digits.trim_start_matches('+').len() >= 10 {
                contact.phone = Some(digits);
                break;
            }
        }
    }

    contact.location = LOCATION_RE
        .find(text)
        .map(|m| m.as_str().trim().to_string());
    contact.linkedin = LINKEDIN_RE.find(text).map(|m| m.as_str().to_string());
    contact.github = GITHUB_RE.find(text).map(|m| m.as_str().to_string());

    contact
}

fn extract_summary(sections: &[(Section, Vec<&str>)]) -> Option<String> {
    let text = section_text(sections, Section::Summary)?;
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.len() < 50 {
        return None;
    }
    let mut summary = collapsed;
    if summary.len() > 500 {
        summary.truncate(500);
    }
    Some(summary)
}

fn extract_skills(sections: &[(Section, Vec<&str>)], full_text: &str) -> Skills {
    // Prefer the skills section; fall back to scanning the whole document.
    let haystack = section_text(sections, Section::Skills).unwrap_or_else(|| full_text.to_string());
    let lower = haystack.to_lowercase();

    let matches_word = |skill: &str| -> bool {
        let needle = skill.to_lowercase();
        for (idx, _) in lower.match_indices(&needle) {
            let before_ok = idx == 0
                || !lower[..idx]
                    .chars()
                    .next_back()
                    .is_some_and(|c| c.is_alphanumeric());
            let end = idx + needle.len();
            let after_ok = end == lower.len()
                || !lower[end..].chars().next().is_some_and(|c| c.is_alphanumeric());
            if before_ok && after_ok {
                return true;
            }
        }
        false
    };

    let technical_skills: Vec<String> = TECHNICAL_SKILLS
        .iter()
        .filter(|s| matches_word(s))
        .map(|s| s.to_string())
        .collect();
    let soft_skills: Vec<String> = SOFT_SKILLS
        .iter()
        .filter(|s| matches_word(s))
        .map(|s| s.to_string())
        .collect();

    let mut all_skills = technical_skills.clone();
    all_skills.extend(soft_skills.iter().cloned());

    Skills {
        technical_skills,
        soft_skills,
        all_skills,
    }
}

fn extract_education(sections: &[(Section, Vec<&str>)], full_text: &str) -> Vec<EducationEntry> {
    let text = section_text(sections, Section::Education).unwrap_or_else(|| full_text.to_string());
    let mut entries = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.len() < 10 {
            continue;
        }
        let Some(caps) = DEGREE_RE.captures(line) else {
            continue;
        };

        let mut entry = EducationEntry {
            degree: caps.get(1).map(|m| m.as_str().to_string()),
            field_of_study: caps.get(2).map(|m| m.as_str().trim().to_string()),
            ..Default::default()
        };
        entry.institution = INSTITUTION_RE
            .find(line)
            .map(|m| m.as_str().trim().to_string());
        // Latest year on the line wins.
        entry.graduation_year = YEAR_RE
            .find_iter(line)
            .last()
            .map(|m| m.as_str().to_string());
        entry.gpa = GPA_RE
            .captures(line)
            .map(|c| format!("{} {}", &c[1], c[2].to_uppercase()));
        entries.push(entry);
    }

    entries
}

fn extract_experience(sections: &[(Section, Vec<&str>)]) -> Vec<WorkExperienceEntry> {
    let Some(text) = section_text(sections, Section::Experience) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for block in text.split("\n\n") {
        if block.trim().len() < 20 {
            continue;
        }
        let lines: Vec<&str> = block
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let mut entry = WorkExperienceEntry::default();

        for line in &lines {
            if JOB_TITLE_RES.iter().any(|re| re.is_match(line)) {
                entry.title = Some(line.to_string());
                break;
            }
        }

        for line in &lines {
            if Some(line.to_string()) == entry.title {
                continue;
            }
            if let Some(rest) = line
                .strip_prefix("at ")
                .or_else(|| line.strip_prefix("At "))
            {
                entry.company = Some(rest.trim().to_string());
                break;
            }
        }

        let joined = lines.join(" ");
        for pattern in DURATION_RES.iter() {
            if let Some(m) = pattern.find(&joined) {
                entry.duration = Some(m.as_str().to_string());
                break;
            }
        }

        let description: Vec<&str> = lines
            .iter()
            .filter(|l| {
                l.len() > 20
                    && Some(l.to_string()) != entry.title
                    && !l.starts_with("at ")
                    && !l.starts_with("At ")
            })
            .copied()
            .collect();
        if !description.is_empty() {
            entry.description = Some(description.join(" "));
        }

        if entry.title.is_some() || entry.company.is_some() {
            entries.push(entry);
        }
    }

    entries
}

fn extract_projects(sections: &[(Section, Vec<&str>)]) -> Vec<ProjectEntry> {
    let Some(text) = section_text(sections, Section::Projects) else {
        return Vec::new();
    };

    let mut projects = Vec::new();
    for block in text.split("\n\n") {
        if block.trim().len() < 30 {
            continue;
        }
        let lines: Vec<&str> = block
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let Some((name, rest)) = lines.split_first() else {
            continue;
        };

        let lower = block.to_lowercase();
        let technologies: Vec<String> = PROJECT_TECH_KEYWORDS
            .iter()
            .filter(|t| lower.contains(&t.to_lowercase()))
            .map(|t| t.to_string())
            .collect();

        projects.push(ProjectEntry {
            name: Some(name.to_string()),
            description: (!rest.is_empty()).then(|| rest.join(" ")),
            technologies,
            duration: DURATION_RES
                .iter()
                .find_map(|re| re.find(block))
                .map(|m| m.as_str().to_string()),
        });
    }

    projects
}

fn extract_certifications(
    sections: &[(Section, Vec<&str>)],
    full_text: &str,
) -> Vec<Certification> {
    let text =
        section_text(sections, Section::Certifications).unwrap_or_else(|| full_text.to_string());

    let mut certifications = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.len() <= 5 {
            continue;
        }
        let lower = line.to_lowercase();
        if CERT_KEYWORDS.iter().any(|k| lower.contains(k)) {
            certifications.push(Certification {
                name: line.to_string(),
                year: YEAR_RE.find(line).map(|m| m.as_str().to_string()),
            });
        }
    }

    certifications
}

/// Total years across entries, summed from duration strings. Year ranges
/// count whole years; open-ended ranges run to the current year; explicit
/// "N years"/"N months" mentions add directly.
pub(crate) fn experience_years(entries: &[WorkExperienceEntry]) -> f64 {
    let current_year = Utc::now().year();
    let mut total_months: i64 = 0;

    for entry in entries {
        let Some(duration) = entry.duration.as_deref() else {
            continue;
        };
        let lower = duration.to_lowercase();
        let years: Vec<i32> = YEAR_RE
            .find_iter(&lower)
            .filter_map(|m| m.as_str().parse().ok())
            .collect();

        if lower.contains("present") || lower.contains("current") {
            if let Some(&start) = years.first() {
                total_months += i64::from(current_year - start) * 12;
            }
        } else if years.len() >= 2 {
            total_months += i64::from(years[years.len() - 1] - years[0]) * 12;
        } else if let Some(caps) = YEARS_NUM_RE.captures(&lower) {
            total_months += caps[1].parse::<i64>().unwrap_or(0) * 12;
        } else if let Some(caps) = MONTHS_NUM_RE.captures(&lower) {
            total_months += caps[1].parse::<i64>().unwrap_or(0);
        } else if years.len() == 1 {
            total_months += 12;
        }
    }

    if total_months <= 0 {
        0.0
    } else {
        ((total_months / 12).max(1)) as f64
    }
}

/// Completeness score out of 100: contact 20, skills 30, education 20,
/// experience 30.
pub(crate) fn ats_score(data: &ResumeData) -> u8 {
    let mut score: u32 = 0;

    let contact = &data.contact_information;
    for present in [
        contact.name.is_some(),
        contact.email.is_some(),
        contact.phone.is_some(),
        contact.location.is_some(),
    ] {
        if present {
            score += 5;
        }
    }

    if !data.skills.technical_skills.is_empty() {
        score += 15;
    }
    if !data.skills.soft_skills.is_empty() {
        score += 10;
    }
    if data.skills.total() > 10 {
        score += 5;
    }

    if !data.education.is_empty() {
        score += 20;
    }

    if !data.work_experience.is_empty() {
        score += 20;
    }
    if data.work_experience.len() > 1 {
        score += 5;
    }
    if data.work_experience.iter().any(|e| e.description.is_some()) {
        score += 5;
    }

    score.min(100) as u8
}

/// The always-available regex backend.
pub struct HeuristicBackend;

impl HeuristicBackend {
    pub fn parse_text(&self, text: &str) -> ResumeData {
        let sections = split_sections(text);

        let mut data = ResumeData {
            contact_information: extract_contact(text),
            professional_summary: extract_summary(&sections),
            skills: extract_skills(&sections, text),
            education: extract_education(&sections, text),
            work_experience: extract_experience(&sections),
            projects: extract_projects(&sections),
            certifications: extract_certifications(&sections, text),
            ..Default::default()
        };
        data.years_of_experience = experience_years(&data.work_experience);
        data.ats_score = ats_score(&data);
        data
    }
}

#[async_trait]
impl ExtractionBackend for HeuristicBackend {
    fn method(&self) -> ExtractMethod {
        ExtractMethod::Deterministic
    }

    async fn extract(&self, text: &str) -> Result<ResumeData, ExtractionError> {
        Ok(self.parse_text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Jane Doe
Bangalore, India
Email: jane.doe@example.com
Phone: +91 9876543210
linkedin.com/in/janedoe
github.com/janedoe

Professional Summary:
Seasoned backend engineer with a focus on distributed systems, caching layers and developer tooling across multiple product teams.

Skills:
Python, Rust, PostgreSQL, Docker, Kubernetes, AWS, Leadership, Communication

Experience:
Senior Software Engineer
at Acme Technologies
2019 - present
Built the ingestion pipeline handling forty thousand documents per day.

Backend Developer
at Initech
2016 - 2019
Maintained billing services and the internal deployment tooling.

Education:
Bachelor of Computer Science, National Institute of Technology, 2016, 8.9 GPA

Projects:
Resume Analyzer
Search and scoring tool built with Python and Flask backed by PostgreSQL.

Certifications:
AWS Certified Solutions Architect, 2021
";

    fn parse(text: &str) -> ResumeData {
        HeuristicBackend.parse_text(text)
    }

    #[test]
    fn test_contact_extraction() {
        let data = parse(SAMPLE);
        let contact = &data.contact_information;
        assert_eq!(contact.name.as_deref(), Some("Jane Doe"));
        assert_eq!(contact.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(contact.linkedin.as_deref(), Some("linkedin.com/in/janedoe"));
        assert_eq!(contact.github.as_deref(), Some("github.com/janedoe"));
        let phone = contact.phone.as_deref().unwrap();
        assert!(phone.trim_start_matches('+').len() >= 10);
    }

    #[test]
    fn test_email_requirement_from_plain_line() {
        let data = parse("Email: jane.doe@example.com\n");
        assert_eq!(
            data.contact_information.email.as_deref(),
            Some("jane.doe@example.com")
        );
    }

    #[test]
    fn test_skills_split_into_technical_and_soft() {
        let data = parse(SAMPLE);
        assert!(data.skills.technical_skills.contains(&"Rust".to_string()));
        assert!(data.skills.technical_skills.contains(&"PostgreSQL".to_string()));
        assert!(data.skills.soft_skills.contains(&"Leadership".to_string()));
        assert_eq!(
            data.skills.total(),
            data.skills.technical_skills.len() + data.skills.soft_skills.len()
        );
    }

    #[test]
    fn test_skill_matching_respects_word_boundaries() {
        // "Scala" must not fire on "scalability"; "Go" must not fire on "Google".
        let data = parse("Skills:\nWorked on scalability with Google Sheets\n");
        assert!(!data.skills.technical_skills.contains(&"Scala".to_string()));
        assert!(!data.skills.technical_skills.contains(&"Go".to_string()));
    }

    #[test]
    fn test_experience_blocks_and_years() {
        let data = parse(SAMPLE);
        assert_eq!(data.work_experience.len(), 2);
        let first = &data.work_experience[0];
        assert!(first.title.as_deref().unwrap().contains("Senior Software Engineer"));
        assert_eq!(first.company.as_deref(), Some("Acme Technologies"));
        assert!(first.duration.as_deref().unwrap().contains("present"));
        // 2019..now plus 2016..2019; at least the closed three-year range.
        assert!(data.years_of_experience >= 3.0);
    }

    #[test]
    fn test_education_entry_fields() {
        let data = parse(SAMPLE);
        assert_eq!(data.education.len(), 1);
        let edu = &data.education[0];
        assert_eq!(edu.degree.as_deref().map(str::to_lowercase).as_deref(), Some("bachelor"));
        assert_eq!(edu.graduation_year.as_deref(), Some("2016"));
        assert_eq!(edu.gpa.as_deref(), Some("8.9 GPA"));
    }

    #[test]
    fn test_projects_and_certifications() {
        let data = parse(SAMPLE);
        assert_eq!(data.projects.len(), 1);
        let project = &data.projects[0];
        assert_eq!(project.name.as_deref(), Some("Resume Analyzer"));
        assert!(project.technologies.contains(&"Flask".to_string()));

        assert_eq!(data.certifications.len(), 1);
        assert_eq!(data.certifications[0].year.as_deref(), Some("2021"));
    }

    #[test]
    fn test_summary_requires_minimum_length() {
        let data = parse("Summary:\nToo short.\n");
        assert!(data.professional_summary.is_none());
        let full = parse(SAMPLE);
        let summary = full.professional_summary.unwrap();
        assert!(summary.len() >= 50);
        assert!(summary.len() <= 500);
    }

    #[test]
    fn test_ats_score_within_bounds_and_rewards_completeness() {
        let full = parse(SAMPLE);
        assert!(full.ats_score <= 100);
        // Contact 20 + skills >=25 + education 20 + experience 30.
        assert!(full.ats_score >= 90);

        let sparse = parse("random text with nothing useful in it at all\n");
        assert!(sparse.ats_score < full.ats_score);
    }

    #[test]
    fn test_empty_text_yields_empty_record() {
        let data = parse("");
        assert!(data.contact_information.email.is_none());
        assert!(data.work_experience.is_empty());
        assert_eq!(data.years_of_experience, 0.0);
        assert_eq!(data.ats_score, 0);
    }

    #[test]
    fn test_experience_years_from_explicit_mentions() {
        let entries = vec![
            WorkExperienceEntry {
                duration: Some("3 years".into()),
                ..Default::default()
            },
            WorkExperienceEntry {
                duration: Some("6 months".into()),
                ..Default::default()
            },
        ];
        assert_eq!(experience_years(&entries), 3.0);
    }
}
