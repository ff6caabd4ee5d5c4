//! Model-backed extraction backend.
//!
//! Talks to an Ollama-compatible server over HTTP. Availability is probed
//! once at startup and never re-checked per request; when the server or
//! model is missing, requests naming this backend fail fast instead of
//! silently downgrading to the deterministic one.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::{
    Certification, ContactInformation, EducationEntry, ProjectEntry, ResumeData, Skills,
    WorkExperienceEntry,
};

use super::heuristic::experience_years;
use super::prompts;
use super::{ExtractMethod, ExtractionBackend, ExtractionError};

const MAX_RETRIES: u32 = 3;
const TEMPERATURE: f32 = 0.1;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
struct TagModel {
    name: String,
}

/// What the model is asked to emit. Looser than `ResumeData`; normalized
/// after parsing.
#[derive(Debug, Default, Deserialize)]
struct ModelResume {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    location: Option<String>,
    summary: Option<String>,
    #[serde(default)]
    technical_skills: Vec<String>,
    #[serde(default)]
    soft_skills: Vec<String>,
    #[serde(default)]
    education: Vec<ModelEducation>,
    #[serde(default)]
    work_experience: Vec<ModelExperience>,
    #[serde(default)]
    projects: Vec<ModelProject>,
    #[serde(default)]
    certifications: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ModelEducation {
    institution: Option<String>,
    degree: Option<String>,
    field_of_study: Option<String>,
    graduation_year: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ModelExperience {
    company: Option<String>,
    position: Option<String>,
    duration: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ModelProject {
    name: Option<String>,
    description: Option<String>,
    technologies: Option<String>,
    duration: Option<String>,
}

pub struct ModelBackend {
    client: Client,
    base_url: String,
    model: String,
    timeout_secs: u64,
    available: bool,
}

impl ModelBackend {
    /// Builds the backend and probes the model server once. The probe
    /// result is final for the process lifetime.
    pub async fn connect(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        let available = probe(&client, base_url, model).await;
        if available {
            info!(model, base_url, "model backend available");
        } else {
            warn!(
                model,
                base_url, "model backend unavailable; modelBacked requests will be rejected"
            );
        }

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout_secs,
            available,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// A backend that failed its probe, for tests that exercise the
    /// unavailable path without a server.
    #[cfg(test)]
    pub(crate) fn offline() -> Self {
        Self {
            client: Client::new(),
            base_url: "http://localhost:11434".into(),
            model: "test-model".into(),
            timeout_secs: 120,
            available: false,
        }
    }

    /// One generation call with retry on 429/5xx. A client-side timeout is
    /// terminal and maps straight to `ExtractionError::Timeout`.
    async fn generate(&self, prompt: &str) -> Result<String, ExtractionError> {
        let request_body = GenerateRequest {
            model: &self.model,
            prompt,
            system: prompts::JSON_ONLY_SYSTEM,
            stream: false,
            options: GenerateOptions {
                temperature: TEMPERATURE,
            },
        };
        let url = format!("{}/api/generate", self.base_url);

        let mut last_error: Option<ExtractionError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "model call attempt {} failed, retrying after {}ms",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&url).json(&request_body).send().await {
                Ok(r) => r,
                Err(e) if e.is_timeout() => {
                    return Err(ExtractionError::Timeout(self.timeout_secs));
                }
                Err(e) => {
                    last_error = Some(ExtractionError::Failed(format!("http error: {e}")));
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("model server returned {status}: {body}");
                last_error = Some(ExtractionError::Failed(format!(
                    "model server returned {status}"
                )));
                continue;
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ExtractionError::Failed(format!(
                    "model server returned {status}: {body}"
                )));
            }

            let parsed: GenerateResponse = response
                .json()
                .await
                .map_err(|e| ExtractionError::Failed(format!("decoding model reply: {e}")))?;
            debug!(chars = parsed.response.len(), "model call succeeded");
            return Ok(parsed.response);
        }

        Err(last_error
            .unwrap_or_else(|| ExtractionError::Failed("retries exhausted".to_string())))
    }
}

/// GET /api/tags and check the requested model is actually pulled.
async fn probe(client: &Client, base_url: &str, model: &str) -> bool {
    let url = format!("{}/api/tags", base_url.trim_end_matches('/'));
    match client.get(&url).send().await {
        Ok(response) if response.status().is_success() => match response.json::<TagsResponse>().await {
            Ok(tags) => tags.models.iter().any(|m| m.name == model),
            Err(e) => {
                debug!("cannot decode model list: {e}");
                false
            }
        },
        Ok(response) => {
            debug!("model server probe returned {}", response.status());
            false
        }
        Err(e) => {
            debug!("cannot reach model server: {e}");
            false
        }
    }
}

/// Strips code fences and trims the reply to its outermost JSON object.
fn clean_model_json(reply: &str) -> &str {
    let reply = reply.trim();
    let reply = reply.strip_prefix("```json").unwrap_or(reply);
    let reply = reply.strip_prefix("```").unwrap_or(reply);
    let reply = reply.strip_suffix("```").unwrap_or(reply);

    let start = reply.find('{');
    let end = reply.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if start < end => &reply[start..=end],
        _ => reply.trim(),
    }
}

/// Normalizes the model's loose shape into `ResumeData`. The model backend
/// never scores; `ats_score` stays 0 and years of experience are recomputed
/// from the reported durations.
fn normalize(raw: ModelResume) -> ResumeData {
    let mut all_skills = raw.technical_skills.clone();
    all_skills.extend(raw.soft_skills.iter().cloned());

    let work_experience: Vec<WorkExperienceEntry> = raw
        .work_experience
        .into_iter()
        .map(|e| WorkExperienceEntry {
            title: e.position,
            company: e.company,
            duration: e.duration,
            description: e.description,
        })
        .collect();

    let mut data = ResumeData {
        contact_information: ContactInformation {
            name: raw.name,
            email: raw.email,
            phone: raw.phone,
            location: raw.location,
            linkedin: None,
            github: None,
        },
        professional_summary: raw.summary,
        skills: Skills {
            technical_skills: raw.technical_skills,
            soft_skills: raw.soft_skills,
            all_skills,
        },
        education: raw
            .education
            .into_iter()
            .map(|e| EducationEntry {
                degree: e.degree,
                field_of_study: e.field_of_study,
                institution: e.institution,
                graduation_year: e.graduation_year,
                gpa: None,
            })
            .collect(),
        work_experience,
        projects: raw
            .projects
            .into_iter()
            .map(|p| ProjectEntry {
                name: p.name,
                description: p.description,
                technologies: p
                    .technologies
                    .map(|t| {
                        t.split(',')
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty())
                            .collect()
                    })
                    .unwrap_or_default(),
                duration: p.duration,
            })
            .collect(),
        certifications: raw
            .certifications
            .into_iter()
            .map(|name| {
                let year = YEAR_RE.find(&name).map(|m| m.as_str().to_string());
                Certification { name, year }
            })
            .collect(),
        years_of_experience: 0.0,
        ats_score: 0,
    };
    data.years_of_experience = experience_years(&data.work_experience);
    data
}

#[async_trait]
impl ExtractionBackend for ModelBackend {
    fn method(&self) -> ExtractMethod {
        ExtractMethod::ModelBacked
    }

    async fn extract(&self, text: &str) -> Result<ResumeData, ExtractionError> {
        if !self.available {
            return Err(ExtractionError::Unavailable);
        }

        let prompt = prompts::extraction_prompt(text);
        let reply = self.generate(&prompt).await?;
        let raw: ModelResume = serde_json::from_str(clean_model_json(&reply))
            .map_err(|e| ExtractionError::Failed(format!("model returned invalid JSON: {e}")))?;
        Ok(normalize(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_model_json_with_fences() {
        let reply = "```json\n{\"name\": \"Jane\"}\n```";
        assert_eq!(clean_model_json(reply), "{\"name\": \"Jane\"}");
    }

    #[test]
    fn test_clean_model_json_with_surrounding_prose() {
        let reply = "Here is the extracted data: {\"name\": \"Jane\"} Hope that helps!";
        assert_eq!(clean_model_json(reply), "{\"name\": \"Jane\"}");
    }

    #[test]
    fn test_clean_model_json_plain() {
        assert_eq!(clean_model_json("{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn test_normalize_maps_position_to_title_and_splits_technologies() {
        let raw: ModelResume = serde_json::from_str(
            r#"{
                "name": "Jane Doe",
                "technical_skills": ["Python"],
                "soft_skills": ["Leadership"],
                "work_experience": [
                    {"company": "Acme", "position": "Engineer", "duration": "2018 - 2020"}
                ],
                "projects": [
                    {"name": "Analyzer", "technologies": "Python, Flask , PostgreSQL"}
                ],
                "certifications": ["AWS Certified, 2021"]
            }"#,
        )
        .unwrap();

        let data = normalize(raw);
        assert_eq!(data.contact_information.name.as_deref(), Some("Jane Doe"));
        assert_eq!(data.work_experience[0].title.as_deref(), Some("Engineer"));
        assert_eq!(
            data.projects[0].technologies,
            vec!["Python", "Flask", "PostgreSQL"]
        );
        assert_eq!(data.certifications[0].year.as_deref(), Some("2021"));
        assert_eq!(data.skills.total(), 2);
        // 2018..2020 is a closed two-year range.
        assert_eq!(data.years_of_experience, 2.0);
        // This backend never scores.
        assert_eq!(data.ats_score, 0);
    }

    #[test]
    fn test_normalize_tolerates_minimal_reply() {
        let raw: ModelResume = serde_json::from_str("{}").unwrap();
        let data = normalize(raw);
        assert!(data.contact_information.name.is_none());
        assert_eq!(data.years_of_experience, 0.0);
    }

    #[tokio::test]
    async fn test_unavailable_backend_rejects_without_io() {
        let backend = ModelBackend::offline();
        match backend.extract("any text").await {
            Err(ExtractionError::Unavailable) => {}
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }
}
