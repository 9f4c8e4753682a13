//! Collaborator traits
//!
//! These traits let the reconciliation core run without depending on a
//! particular device transport or output format.

use crate::error::Result;
use crate::report::Event;
use crate::types::{AttributeSet, ResourceId};

/// Reads resource state from the remote target.
///
/// Implementations return `Error::NotFound` for a resource the target does
/// not have; the reconciler turns that into `ensure => absent`. Every other
/// error is treated as a transport failure for that resource.
pub trait StateFetcher: Send + Sync {
    /// Fetch the current state of one resource
    fn fetch(&self, resource_type: &str, id: &ResourceId) -> Result<AttributeSet>;

    /// Fetch every resource of a type the target knows about
    fn list(&self, resource_type: &str) -> Result<Vec<AttributeSet>>;
}

/// Writes resource state to the remote target.
pub trait Applier: Send + Sync {
    /// Make the target match `target` in full.
    ///
    /// A target with `ensure => absent` means the resource should be deleted.
    fn set(&self, resource_type: &str, id: &ResourceId, target: &AttributeSet) -> Result<()>;
}

/// Receives structured outcomes as they happen.
pub trait Reporter: Send {
    fn report(&mut self, event: &Event);
}

/// Reporter that drops everything
pub struct NoReport;

impl Reporter for NoReport {
    fn report(&mut self, _event: &Event) {}
}

/// Reporter that keeps events in memory
///
/// Used per worker in parallel runs so output can be replayed in catalog
/// order, and in tests.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub events: Vec<Event>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send every collected event to another reporter
    pub fn replay(self, into: &mut dyn Reporter) {
        for event in &self.events {
            into.report(event);
        }
    }

    /// Rendered lines, in order
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, event: &Event) {
        self.events.push(event.clone());
    }
}
