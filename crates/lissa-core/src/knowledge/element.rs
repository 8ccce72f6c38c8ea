use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Artifact;
use crate::constants::ELEMENT_ID_SEPARATOR;
use crate::errors::ValidationError;

/// A granular, possibly hierarchical unit derived from an artifact.
///
/// Elements know their ancestors through `parent`, never their descendants.
/// The parent handle is not serialized; `parent_id` is, and [`Element::rehydrate`]
/// resolves it back into a handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawElement")]
pub struct Element {
    identifier: String,
    #[serde(rename = "type")]
    knowledge_type: String,
    content: String,
    granularity: u32,
    parent_id: Option<String>,
    #[serde(skip)]
    parent: Option<Arc<Element>>,
    compare: bool,
}

#[derive(Deserialize)]
struct RawElement {
    identifier: String,
    #[serde(rename = "type")]
    knowledge_type: String,
    content: String,
    #[serde(default)]
    granularity: u32,
    #[serde(default)]
    parent_id: Option<String>,
    #[serde(default)]
    compare: bool,
}

impl TryFrom<RawElement> for Element {
    type Error = ValidationError;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        if raw.content.is_empty() {
            return Err(ValidationError::EmptyContent {
                identifier: raw.identifier,
            });
        }
        Ok(Self {
            identifier: raw.identifier,
            knowledge_type: raw.knowledge_type,
            content: raw.content,
            granularity: raw.granularity,
            parent_id: raw.parent_id,
            parent: None,
            compare: raw.compare,
        })
    }
}

impl Element {
    pub fn new(
        identifier: impl Into<String>,
        knowledge_type: impl Into<String>,
        content: impl Into<String>,
        granularity: u32,
        parent: Option<Arc<Element>>,
        compare: bool,
    ) -> Result<Self, ValidationError> {
        let identifier = identifier.into();
        let content = content.into();
        if content.is_empty() {
            return Err(ValidationError::EmptyContent { identifier });
        }
        Ok(Self {
            identifier,
            knowledge_type: knowledge_type.into(),
            content,
            granularity,
            parent_id: parent.as_ref().map(|p| p.identifier.clone()),
            parent,
            compare,
        })
    }

    /// Root element (granularity 0) covering a whole artifact.
    pub fn from_artifact(artifact: &Artifact, compare: bool) -> Result<Self, ValidationError> {
        Self::new(
            artifact.identifier(),
            artifact.knowledge_type(),
            artifact.content(),
            0,
            None,
            compare,
        )
    }

    /// Child element named `<parent id>$<index>` one granularity level below `parent`.
    pub fn from_parent(
        parent: &Arc<Element>,
        index: usize,
        content: impl Into<String>,
        compare: bool,
    ) -> Result<Self, ValidationError> {
        Self::new(
            format!("{}{}{}", parent.identifier, ELEMENT_ID_SEPARATOR, index),
            parent.knowledge_type.clone(),
            content,
            parent.granularity + 1,
            Some(Arc::clone(parent)),
            compare,
        )
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn knowledge_type(&self) -> &str {
        &self.knowledge_type
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn normalized_content(&self) -> String {
        super::normalize_line_endings(&self.content)
    }

    pub fn granularity(&self) -> u32 {
        self.granularity
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    pub fn parent(&self) -> Option<&Arc<Element>> {
        self.parent.as_ref()
    }

    pub fn compare(&self) -> bool {
        self.compare
    }

    /// Walks the parent chain to the element with exactly `granularity`.
    /// Returns `None` when this element is coarser than requested or the chain
    /// ends before reaching that level.
    pub fn ancestor_at(self: &Arc<Self>, granularity: u32) -> Option<Arc<Element>> {
        let mut current = Arc::clone(self);
        while current.granularity > granularity {
            let parent = current.parent.as_ref().map(Arc::clone)?;
            current = parent;
        }
        (current.granularity == granularity).then_some(current)
    }

    /// The top of the parent chain.
    pub fn root(self: &Arc<Self>) -> Arc<Element> {
        let mut current = Arc::clone(self);
        while let Some(parent) = current.parent.as_ref().map(Arc::clone) {
            current = parent;
        }
        current
    }

    /// Resolves `parent_id` references of deserialized elements against each other.
    ///
    /// Input order is preserved. Every referenced parent must be part of `elements`.
    pub fn rehydrate(elements: Vec<Element>) -> Result<Vec<Arc<Element>>, ValidationError> {
        let mut by_id: HashMap<String, Element> = HashMap::with_capacity(elements.len());
        let mut order = Vec::with_capacity(elements.len());
        for element in elements {
            if by_id.contains_key(&element.identifier) {
                return Err(ValidationError::DuplicateIdentifier {
                    identifier: element.identifier,
                });
            }
            order.push(element.identifier.clone());
            by_id.insert(element.identifier.clone(), element);
        }

        let mut resolved: HashMap<String, Arc<Element>> = HashMap::with_capacity(by_id.len());
        for id in &order {
            if let Some(element) = by_id.get(id) {
                let mut visiting = HashSet::new();
                resolve(element, &by_id, &mut resolved, &mut visiting)?;
            }
        }

        Ok(order
            .iter()
            .filter_map(|id| resolved.get(id).map(Arc::clone))
            .collect())
    }
}

fn resolve(
    element: &Element,
    by_id: &HashMap<String, Element>,
    resolved: &mut HashMap<String, Arc<Element>>,
    visiting: &mut HashSet<String>,
) -> Result<Arc<Element>, ValidationError> {
    let id = element.identifier.as_str();
    if let Some(done) = resolved.get(id) {
        return Ok(Arc::clone(done));
    }
    if !visiting.insert(id.to_string()) {
        return Err(ValidationError::ParentCycle {
            identifier: id.to_string(),
        });
    }

    let parent = match element.parent_id.as_deref() {
        None => None,
        Some(parent_id) => {
            let parent = by_id
                .get(parent_id)
                .ok_or_else(|| ValidationError::UnknownParent {
                    identifier: element.identifier.clone(),
                    parent_id: parent_id.to_string(),
                })?;
            Some(resolve(parent, by_id, resolved, visiting)?)
        }
    };

    let mut hydrated = element.clone();
    hydrated.parent = parent;
    let hydrated = Arc::new(hydrated);
    resolved.insert(id.to_string(), Arc::clone(&hydrated));
    Ok(hydrated)
}

// Identity ignores the parent handle; `parent_id` already captures it.
impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
            && self.knowledge_type == other.knowledge_type
            && self.content == other.content
            && self.granularity == other.granularity
            && self.parent_id == other.parent_id
            && self.compare == other.compare
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
        self.knowledge_type.hash(state);
        self.content.hash(state);
        self.granularity.hash(state);
        self.parent_id.hash(state);
        self.compare.hash(state);
    }
}
