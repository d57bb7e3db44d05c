//! Request-scoped document types

use serde::{Deserialize, Serialize};

/// An opaque text document tagged with the role it plays in an analysis.
/// Created at pipeline entry, discarded with the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub role: DocumentRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentRole {
    Resume,
    JobDescription,
}

impl Document {
    pub fn new(content: impl Into<String>, role: DocumentRole) -> Self {
        Self {
            content: content.into(),
            role,
        }
    }

    pub fn resume(content: impl Into<String>) -> Self {
        Self::new(content, DocumentRole::Resume)
    }

    pub fn job_description(content: impl Into<String>) -> Self {
        Self::new(content, DocumentRole::JobDescription)
    }

    /// Empty or whitespace-only content
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

impl std::fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentRole::Resume => write!(f, "resume"),
            DocumentRole::JobDescription => write!(f, "job description"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::resume("Software engineer with Rust experience");

        assert_eq!(doc.role, DocumentRole::Resume);
        assert!(!doc.is_blank());
    }

    #[test]
    fn test_blank_detection() {
        assert!(Document::job_description("").is_blank());
        assert!(Document::job_description("   \n\t ").is_blank());
        assert!(!Document::job_description("hiring").is_blank());
    }
}
