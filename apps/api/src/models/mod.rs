pub mod resume;

pub use resume::{
    Certification, ContactInformation, EducationEntry, ParsedResume, PersistedRecord,
    ProcessingMetadata, ProjectEntry, ResumeData, Skills, WorkExperienceEntry,
};
