//! Catalog planning - the ordered list of resources a run will reconcile

use crate::types::{AttributeSet, ResourceId};
use serde::Serialize;

/// Desired state for one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRequest {
    pub resource_type: String,
    pub id: ResourceId,
    /// Attributes the caller wants managed; anything missing is left alone
    pub desired: AttributeSet,
}

impl ResourceRequest {
    pub fn new(resource_type: impl Into<String>, id: ResourceId, desired: AttributeSet) -> Self {
        Self {
            resource_type: resource_type.into(),
            id,
            desired,
        }
    }

    /// `type[title]` as used in log lines
    pub fn reference(&self) -> String {
        format!("{}[{}]", self.resource_type, self.id)
    }
}

/// Resources to reconcile, in declaration order
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    pub resources: Vec<ResourceRequest>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, replacing an earlier declaration of the same resource
    pub fn push(&mut self, request: ResourceRequest) {
        if let Some(existing) = self
            .resources
            .iter_mut()
            .find(|r| r.resource_type == request.resource_type && r.id == request.id)
        {
            log::warn!("{} declared more than once, keeping the last", request.reference());
            *existing = request;
        } else {
            self.resources.push(request);
        }
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceRequest> {
        self.resources.iter()
    }

    /// Keep only resources matching a predicate
    pub fn filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&ResourceRequest) -> bool,
    {
        Self {
            resources: self.resources.into_iter().filter(|r| predicate(r)).collect(),
        }
    }

    /// Keep only resources matching a target pattern
    ///
    /// Target format: "type" or "type.title"
    pub fn filter_by_target(self, target: Option<&str>) -> Self {
        match target {
            None => self,
            Some(t) => {
                let (resource_type, title) = parse_target(t);
                self.filter(|r| matches_filter(r, resource_type, title))
            }
        }
    }
}

impl FromIterator<ResourceRequest> for Catalog {
    fn from_iter<I: IntoIterator<Item = ResourceRequest>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for request in iter {
            catalog.push(request);
        }
        catalog
    }
}

/// Parse a target string like "type.title" into (type, title).
///
/// Only the first dot separates; titles such as `eth0.100` keep theirs.
fn parse_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once('.') {
        Some((resource_type, title)) => (resource_type, Some(title)),
        None => (target, None),
    }
}

/// Check if a resource matches the filter criteria
fn matches_filter(request: &ResourceRequest, resource_type: &str, title: Option<&str>) -> bool {
    // "cisco" selects every "cisco::*" type
    let matches_type = request.resource_type == resource_type
        || request
            .resource_type
            .strip_prefix(resource_type)
            .is_some_and(|rest| rest.starts_with("::"));
    if !matches_type {
        return false;
    }

    if let Some(t) = title
        && !request.id.as_str().contains(t)
    {
        return false;
    }

    true
}
