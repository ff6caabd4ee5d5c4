//! Domain records produced by the extraction backends and persisted by the
//! result store. Both backends emit the same `ResumeData` shape; callers can
//! only tell them apart via `ProcessingMetadata::processing_method`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extraction::ExtractMethod;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInformation {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    /// Union of technical and soft skills, preserving first-seen order.
    #[serde(default)]
    pub all_skills: Vec<String>,
}

impl Skills {
    pub fn total(&self) -> usize {
        self.all_skills.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub institution: Option<String>,
    pub graduation_year: Option<String>,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperienceEntry {
    pub title: Option<String>,
    pub company: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub year: Option<String>,
}

/// The normalized candidate record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeData {
    #[serde(default)]
    pub contact_information: ContactInformation,
    pub professional_summary: Option<String>,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub years_of_experience: f64,
    /// Completeness score in [0, 100]. The model backend reports 0 here
    /// (it does not score); the deterministic backend always fills it.
    #[serde(default)]
    pub ats_score: u8,
}

/// Per-request bookkeeping attached to every parse result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingMetadata {
    pub processing_method: ExtractMethod,
    /// Stage timings in seconds.
    pub total_time: f64,
    pub read_time: f64,
    pub extract_time: f64,
    pub save_time: f64,
    /// Length of the decoded text, in characters.
    pub text_length: usize,
    /// Size of the uploaded file, in bytes.
    pub file_size: usize,
    pub processed_at: DateTime<Utc>,
    pub request_id: String,
    /// True when this result was served from the content-addressed cache.
    pub cached: bool,
    /// SHA-256 hex digest of the uploaded bytes.
    pub content_hash: String,
}

/// A parse result: the extracted data plus its bookkeeping.
/// This is the value type stored in the result cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedResume {
    pub data: ResumeData,
    pub metadata: ProcessingMetadata,
}

/// The record written to disk by the result store, addressable by request id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub request_id: String,
    pub filename: String,
    pub method: ExtractMethod,
    pub data: ResumeData,
    pub metadata: ProcessingMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_data_deserializes_with_missing_sections() {
        // Model output frequently omits empty sections; every collection
        // field must default rather than fail the parse.
        let json = r#"{
            "contact_information": { "email": "a@b.com" },
            "professional_summary": null
        }"#;
        let data: ResumeData = serde_json::from_str(json).unwrap();
        assert_eq!(data.contact_information.email.as_deref(), Some("a@b.com"));
        assert!(data.skills.all_skills.is_empty());
        assert!(data.education.is_empty());
        assert_eq!(data.ats_score, 0);
    }

    #[test]
    fn test_parsed_resume_round_trips() {
        let parsed = ParsedResume {
            data: ResumeData {
                years_of_experience: 4.0,
                ats_score: 55,
                ..Default::default()
            },
            metadata: ProcessingMetadata {
                processing_method: ExtractMethod::Deterministic,
                total_time: 0.2,
                read_time: 0.1,
                extract_time: 0.1,
                save_time: 0.0,
                text_length: 1200,
                file_size: 4096,
                processed_at: Utc::now(),
                request_id: "req_deadbeef_1700000000".into(),
                cached: false,
                content_hash: "ab".repeat(32),
            },
        };
        let json = serde_json::to_string(&parsed).unwrap();
        let back: ParsedResume = serde_json::from_str(&json).unwrap();
        assert_eq!(back.metadata.request_id, parsed.metadata.request_id);
        assert_eq!(back.data.ats_score, 55);
    }

    #[test]
    fn test_processing_method_serializes_camel_case() {
        let json = serde_json::to_string(&ExtractMethod::ModelBacked).unwrap();
        assert_eq!(json, "\"modelBacked\"");
        let json = serde_json::to_string(&ExtractMethod::Deterministic).unwrap();
        assert_eq!(json, "\"deterministic\"");
    }
}
