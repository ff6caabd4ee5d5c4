//! Prompts for the model-backed extraction backend.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise résumé parser. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

const EXTRACTION_TEMPLATE: &str = r#"Extract information from the resume text and return ONLY a valid JSON object.

JSON Format:
{
    "name": "Full Name",
    "email": "email@domain.com",
    "phone": "phone number",
    "location": "City, Country",
    "summary": "Professional summary",
    "technical_skills": ["Python", "Java", "React"],
    "soft_skills": ["Leadership", "Communication"],
    "education": [
        {
            "institution": "University Name",
            "degree": "Bachelor/Master",
            "field_of_study": "Computer Science",
            "graduation_year": "2020"
        }
    ],
    "work_experience": [
        {
            "company": "Company Name",
            "position": "Job Title",
            "duration": "Start Date - End Date",
            "description": "Job responsibilities"
        }
    ],
    "projects": [
        {
            "name": "Project Name",
            "description": "Project description",
            "technologies": "Technologies used",
            "duration": "Timeline"
        }
    ],
    "years_of_experience": null,
    "certifications": ["Certification 1"]
}

Resume Text:
"#;

/// Builds the single-call extraction prompt for the given résumé text.
pub fn extraction_prompt(resume_text: &str) -> String {
    let mut prompt = String::with_capacity(EXTRACTION_TEMPLATE.len() + resume_text.len());
    prompt.push_str(EXTRACTION_TEMPLATE);
    prompt.push_str(resume_text);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_prompt_embeds_resume_text() {
        let prompt = extraction_prompt("Jane Doe\njane@example.com");
        assert!(prompt.contains("ONLY a valid JSON object"));
        assert!(prompt.ends_with("Jane Doe\njane@example.com"));
    }
}
