//! # Declarative
//!
//! Resource reconciliation for remote targets.
//!
//! Every resource type has a canonical form. A run fetches each resource's
//! current state, checks that the target returned it in canonical form,
//! compares it with the desired state, and hands any changes back to the
//! target. A strictness level decides what happens when the target returns
//! non-canonical state.
//!
//! ## Core Concepts
//!
//! - **Provider**: One resource type, with its [`Schema`] and canonicalizer
//! - **AttributeSet**: Current or desired state of one resource
//! - **Catalog**: The ordered list of resources a run reconciles
//! - **Reconciler**: The per-resource state machine
//! - **Executor**: Runs a catalog, optionally in parallel
//!
//! ## Example
//!
//! ```ignore
//! use declarative::{
//!     AttributeSet, Catalog, CollectingReporter, ExecuteOptions, ProviderRegistry,
//!     ResourceId, ResourceRequest, StrictnessLevel, execute,
//! };
//!
//! let mut registry = ProviderRegistry::new();
//! registry.register(Box::new(DeviceProvider::new()));
//!
//! let mut catalog = Catalog::new();
//! catalog.push(ResourceRequest::new(
//!     "device_provider",
//!     ResourceId::new("wibble")?,
//!     AttributeSet::new().with("ensure", "present"),
//! ));
//!
//! let opts = ExecuteOptions { strict: StrictnessLevel::Error, ..Default::default() };
//! let mut reporter = CollectingReporter::new();
//! let report = execute(&catalog, &registry, &device, &device, &opts, &mut reporter);
//! ```
//!
//! ## Collaborator Traits
//!
//! - [`StateFetcher`]: Reads state from the target
//! - [`Applier`]: Writes state to the target
//! - [`Reporter`]: Receives structured events
//!
//! The crate never does I/O itself and has no opinion on output format.

pub mod context;
pub mod diff;
pub mod error;
pub mod executor;
pub mod planner;
pub mod policy;
pub mod reconciler;
pub mod report;
pub mod resource;
pub mod schema;
pub mod types;

// Re-export main types at crate root
pub use context::{Applier, CollectingReporter, NoReport, Reporter, StateFetcher};
pub use diff::{Change, Delta, DiffSummary, compute_delta};
pub use error::{Error, Result};
pub use executor::{ExecuteReport, execute};
pub use planner::{Catalog, ResourceRequest};
pub use policy::{Decision, decide};
pub use reconciler::{Inspection, Phase, ReconcileOutcome, Reconciler, absent_state};
pub use report::{ChangeRecord, Event, Level, Violation, capitalize_type, render_resource};
pub use resource::{BoxedProvider, Provider, ProviderRegistry};
pub use schema::{AttributeDef, AttributeKind, DefaultValue, Schema};
pub use types::{
    ApplyResult, AttributeSet, ENSURE, Ensure, ExecuteOptions, ExecuteSummary, ResourceId,
    StrictnessLevel, Value,
};
