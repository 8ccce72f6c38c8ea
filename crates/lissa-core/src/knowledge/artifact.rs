use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// The closed set of artifact kinds an artifact provider can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactType {
    #[serde(rename = "source code")]
    SourceCode,
    #[serde(rename = "software architecture documentation")]
    SoftwareArchitectureDocumentation,
    #[serde(rename = "requirement")]
    Requirement,
    #[serde(rename = "software architecture model")]
    SoftwareArchitectureModel,
}

impl ArtifactType {
    pub const ALL: [ArtifactType; 4] = [
        Self::SourceCode,
        Self::SoftwareArchitectureDocumentation,
        Self::Requirement,
        Self::SoftwareArchitectureModel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SourceCode => "source code",
            Self::SoftwareArchitectureDocumentation => "software architecture documentation",
            Self::Requirement => "requirement",
            Self::SoftwareArchitectureModel => "software architecture model",
        }
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactType {
    type Err = ValidationError;

    /// Accepts both the display form (`source code`) and the constant form (`SOURCE_CODE`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', " ");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownArtifactType {
                value: s.to_string(),
            })
    }
}

/// A whole input document. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawArtifact")]
pub struct Artifact {
    identifier: String,
    #[serde(rename = "type")]
    artifact_type: ArtifactType,
    content: String,
}

#[derive(Deserialize)]
struct RawArtifact {
    identifier: String,
    #[serde(rename = "type")]
    artifact_type: ArtifactType,
    content: String,
}

impl TryFrom<RawArtifact> for Artifact {
    type Error = ValidationError;

    fn try_from(raw: RawArtifact) -> Result<Self, Self::Error> {
        Artifact::new(raw.identifier, raw.artifact_type, raw.content)
    }
}

impl Artifact {
    pub fn new(
        identifier: impl Into<String>,
        artifact_type: ArtifactType,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let identifier = identifier.into();
        let content = content.into();
        if content.is_empty() {
            return Err(ValidationError::EmptyContent { identifier });
        }
        Ok(Self {
            identifier,
            artifact_type,
            content,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn artifact_type(&self) -> ArtifactType {
        self.artifact_type
    }

    pub fn knowledge_type(&self) -> &'static str {
        self.artifact_type.as_str()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn normalized_content(&self) -> String {
        super::normalize_line_endings(&self.content)
    }
}
