//! Knowledge model: artifacts, the elements derived from them, and trace links.

pub mod artifact;
pub mod element;
pub mod trace_link;

pub use artifact::{Artifact, ArtifactType};
pub use element::Element;
pub use trace_link::TraceLink;

use serde::{Deserialize, Serialize};

/// Closed union over the two kinds of knowledge.
/// Serialized with a `kind` discriminator of `artifact` or `element`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Knowledge {
    Artifact(Artifact),
    Element(Element),
}

impl Knowledge {
    pub fn identifier(&self) -> &str {
        match self {
            Self::Artifact(a) => a.identifier(),
            Self::Element(e) => e.identifier(),
        }
    }

    pub fn knowledge_type(&self) -> &str {
        match self {
            Self::Artifact(a) => a.knowledge_type(),
            Self::Element(e) => e.knowledge_type(),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::Artifact(a) => a.content(),
            Self::Element(e) => e.content(),
        }
    }

    /// Content with `\r\n` line endings collapsed to `\n`.
    pub fn normalized_content(&self) -> String {
        normalize_line_endings(self.content())
    }
}

impl From<Artifact> for Knowledge {
    fn from(artifact: Artifact) -> Self {
        Self::Artifact(artifact)
    }
}

impl From<Element> for Knowledge {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

pub(crate) fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n")
}
