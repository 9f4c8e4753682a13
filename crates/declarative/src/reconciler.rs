//! Reconciler - fetch, canonicalize, compare, and converge one resource
//!
//! Each run walks `Idle → Fetching → Canonicalizing → Comparing` and ends in
//! either `Accepted` (changes, if any, handed to the target) or `Reported`
//! (the resource failed and nothing was applied).

use crate::context::{Applier, Reporter, StateFetcher};
use crate::diff::{Delta, compute_delta};
use crate::error::{Error, Result};
use crate::planner::ResourceRequest;
use crate::policy::{Decision, decide};
use crate::report::{ChangeRecord, Event, Violation};
use crate::resource::Provider;
use crate::schema::Schema;
use crate::types::{
    ApplyResult, AttributeSet, ENSURE, Ensure, ExecuteOptions, ResourceId, StrictnessLevel,
};
use serde::Serialize;
use std::fmt;

/// Where a reconciliation run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    Fetching,
    Canonicalizing,
    Comparing,
    Accepted,
    Reported,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Reported)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Current state of a resource as seen through its canonicalizer
#[derive(Debug, Clone)]
pub struct Inspection {
    /// State as the target returned it (typed per the schema), or the
    /// synthesized absent state
    pub observed: AttributeSet,
    /// Canonical form of `observed`
    pub canonical: AttributeSet,
    /// Whether the target actually returned the resource
    pub present: bool,
    pub violation: Option<Violation>,
    pub decision: Decision,
}

/// Final outcome for one resource
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileOutcome {
    pub resource_type: String,
    pub resource_id: String,
    pub phase: Phase,
    pub result: ApplyResult,
    pub delta: Delta,
}

impl ReconcileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }
}

/// State a resource has when the target does not know about it
pub fn absent_state(schema: &Schema, id: &ResourceId) -> AttributeSet {
    let attrs = AttributeSet::new().with(schema.namevar(), id.as_str());
    if schema.has_ensure() {
        attrs.with(ENSURE, Ensure::Absent)
    } else {
        attrs
    }
}

struct PhaseTracker<'a> {
    resource_type: &'a str,
    id: &'a ResourceId,
    phase: Phase,
}

impl<'a> PhaseTracker<'a> {
    fn new(resource_type: &'a str, id: &'a ResourceId) -> Self {
        Self {
            resource_type,
            id,
            phase: Phase::Idle,
        }
    }

    fn enter(&mut self, next: Phase) {
        log::trace!(
            "{}[{}]: {} -> {}",
            self.resource_type,
            self.id,
            self.phase,
            next
        );
        self.phase = next;
    }
}

/// Reconciles resources under one fixed strictness level
#[derive(Debug, Clone, Copy)]
pub struct Reconciler {
    strict: StrictnessLevel,
    noop: bool,
}

impl Reconciler {
    pub fn new(strict: StrictnessLevel) -> Self {
        Self {
            strict,
            noop: false,
        }
    }

    pub fn from_options(opts: &ExecuteOptions) -> Self {
        Self::new(opts.strict).noop(opts.noop)
    }

    /// Report changes without applying them
    pub fn noop(mut self, noop: bool) -> Self {
        self.noop = noop;
        self
    }

    pub fn strict(&self) -> StrictnessLevel {
        self.strict
    }

    /// Fetch a resource and check that the target returned it in canonical form.
    ///
    /// A `Warn` decision is reported here. A `Fail` decision comes back as
    /// `Error::CanonicalizationViolation`.
    pub fn inspect(
        &self,
        provider: &dyn Provider,
        fetcher: &dyn StateFetcher,
        id: &ResourceId,
        reporter: &mut dyn Reporter,
    ) -> Result<Inspection> {
        let mut tracker = PhaseTracker::new(provider.type_name(), id);
        self.inspect_tracked(provider, fetcher, id, reporter, &mut tracker)
    }

    fn inspect_tracked(
        &self,
        provider: &dyn Provider,
        fetcher: &dyn StateFetcher,
        id: &ResourceId,
        reporter: &mut dyn Reporter,
        tracker: &mut PhaseTracker<'_>,
    ) -> Result<Inspection> {
        let schema = provider.schema();

        tracker.enter(Phase::Fetching);
        let (observed, present) = match provider.fetch(fetcher, id) {
            Ok(attrs) if attrs.contains(schema.namevar()) => (attrs, true),
            Ok(attrs) => (attrs.with(schema.namevar(), id.as_str()), true),
            Err(e) if e.is_not_found() => {
                log::debug!("{}[{}] not found on target", provider.type_name(), id);
                (absent_state(schema, id), false)
            }
            Err(e) => return Err(e),
        };

        tracker.enter(Phase::Canonicalizing);
        if !present {
            return Ok(Inspection {
                canonical: observed.clone(),
                observed,
                present,
                violation: None,
                decision: Decision::Suppress,
            });
        }

        // Typing raw values is not canonicalization; only normalize can violate
        let observed = schema.coerce(&observed)?;
        let canonical = provider.canonicalize(&observed)?;
        let violation = (canonical != observed)
            .then(|| Violation::new(schema, id.as_str(), observed.clone(), canonical.clone()));
        let decision = decide(violation.is_some(), self.strict);

        if let Some(violation) = &violation {
            log::debug!(
                "{}[{}] not canonical: {}",
                provider.type_name(),
                id,
                violation.differing_attributes().join(", ")
            );
        }

        match (decision, violation) {
            (decision, Some(violation)) if decision.is_fatal() => {
                Err(Error::CanonicalizationViolation(Box::new(violation)))
            }
            (Decision::Warn, Some(violation)) => {
                reporter.report(&Event::Warning(violation.clone()));
                Ok(Inspection {
                    observed,
                    canonical,
                    present,
                    violation: Some(violation),
                    decision,
                })
            }
            (decision, violation) => Ok(Inspection {
                observed,
                canonical,
                present,
                violation,
                decision,
            }),
        }
    }

    /// Bring one resource to its desired state.
    ///
    /// Never fails: any error ends the run in `Phase::Reported` with an
    /// `ApplyResult::Failed` and an `Event::Failed` sent to `reporter`.
    pub fn reconcile(
        &self,
        provider: &dyn Provider,
        fetcher: &dyn StateFetcher,
        applier: &dyn Applier,
        request: &ResourceRequest,
        reporter: &mut dyn Reporter,
    ) -> ReconcileOutcome {
        let mut tracker = PhaseTracker::new(provider.type_name(), &request.id);

        match self.converge(provider, fetcher, applier, request, reporter, &mut tracker) {
            Ok((result, delta)) => {
                debug_assert!(tracker.phase.is_terminal());
                ReconcileOutcome {
                    resource_type: provider.type_name().to_string(),
                    resource_id: request.id.to_string(),
                    phase: tracker.phase,
                    result,
                    delta,
                }
            }
            Err(e) => {
                tracker.enter(Phase::Reported);
                reporter.report(&Event::Failed {
                    resource_type: provider.type_name().to_string(),
                    resource_id: request.id.to_string(),
                    message: e.to_string(),
                });
                ReconcileOutcome {
                    resource_type: provider.type_name().to_string(),
                    resource_id: request.id.to_string(),
                    phase: Phase::Reported,
                    result: ApplyResult::Failed {
                        error: e.to_string(),
                    },
                    delta: Delta::default(),
                }
            }
        }
    }

    fn converge(
        &self,
        provider: &dyn Provider,
        fetcher: &dyn StateFetcher,
        applier: &dyn Applier,
        request: &ResourceRequest,
        reporter: &mut dyn Reporter,
        tracker: &mut PhaseTracker<'_>,
    ) -> Result<(ApplyResult, Delta)> {
        let id = &request.id;
        let inspection = self.inspect_tracked(provider, fetcher, id, reporter, tracker)?;

        tracker.enter(Phase::Comparing);
        let target = self.target_state(provider, &inspection.canonical, request)?;
        let delta = compute_delta(provider.schema(), &inspection.observed, &target);

        tracker.enter(Phase::Accepted);
        if delta.is_empty() {
            return Ok((ApplyResult::NoChange, delta));
        }

        for change in delta.iter() {
            let record = ChangeRecord {
                resource_type: provider.type_name().to_string(),
                resource_id: id.to_string(),
                change: change.clone(),
            };
            if self.noop {
                reporter.report(&Event::NoopChange(record));
            } else {
                reporter.report(&Event::Change(record));
            }
        }

        if self.noop {
            return Ok((
                ApplyResult::Skipped {
                    reason: "noop".to_string(),
                },
                delta,
            ));
        }

        log::debug!(
            "applying {} change(s) to {}[{}]",
            delta.len(),
            provider.type_name(),
            id
        );
        provider.apply(applier, id, &target)?;
        let result = delta.apply_result();
        Ok((result, delta))
    }

    /// Canonical state the resource should end up in.
    ///
    /// Desired attributes are laid over the canonical current state; defaults
    /// fill the gaps unless the resource is being removed.
    fn target_state(
        &self,
        provider: &dyn Provider,
        base: &AttributeSet,
        request: &ResourceRequest,
    ) -> Result<AttributeSet> {
        let schema = provider.schema();
        let desired = provider.canonicalize(
            &request
                .desired
                .clone()
                .with(schema.namevar(), request.id.as_str()),
        )?;

        let merged = base.overlay(&desired);
        let merged = if merged.ensure() == Some(Ensure::Absent) {
            merged
        } else {
            schema.with_defaults(&merged)
        };
        provider.canonicalize(&merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CollectingReporter;
    use crate::schema::{AttributeDef, AttributeKind, DefaultValue};
    use crate::types::Value;
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Canonical form always carries `string => "changed"`
    #[derive(Debug)]
    struct Fixture {
        schema: Schema,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                schema: Schema::new("device_provider")
                    .ensurable()
                    .attribute(AttributeDef::new("string", AttributeKind::String)),
            }
        }
    }

    impl Provider for Fixture {
        fn type_name(&self) -> &str {
            "device_provider"
        }

        fn description(&self) -> String {
            "fixture".into()
        }

        fn schema(&self) -> &Schema {
            &self.schema
        }

        fn normalize(&self, attrs: AttributeSet) -> AttributeSet {
            if attrs.contains("string") {
                attrs.with("string", "changed")
            } else {
                attrs
            }
        }
    }

    #[derive(Debug)]
    struct Banner {
        schema: Schema,
    }

    impl Banner {
        fn new() -> Self {
            Self {
                schema: Schema::new("banner").attribute(
                    AttributeDef::new("message", AttributeKind::String)
                        .default_value(DefaultValue::Namevar),
                ),
            }
        }
    }

    impl Provider for Banner {
        fn type_name(&self) -> &str {
            "banner"
        }

        fn description(&self) -> String {
            "banner".into()
        }

        fn schema(&self) -> &Schema {
            &self.schema
        }
    }

    #[derive(Default)]
    struct MockTarget {
        resources: Mutex<BTreeMap<(String, String), AttributeSet>>,
        sets: AtomicUsize,
        offline: bool,
    }

    impl MockTarget {
        fn with_wibble() -> Self {
            let target = Self::default();
            target.resources.lock().unwrap().insert(
                ("device_provider".into(), "wibble".into()),
                AttributeSet::new()
                    .with("name", "wibble")
                    .with("ensure", Ensure::Present)
                    .with("string", "sample"),
            );
            target
        }

        fn offline() -> Self {
            Self {
                offline: true,
                ..Self::default()
            }
        }

        fn stored(&self, resource_type: &str, id: &str) -> Option<AttributeSet> {
            self.resources
                .lock()
                .unwrap()
                .get(&(resource_type.to_string(), id.to_string()))
                .cloned()
        }
    }

    impl StateFetcher for MockTarget {
        fn fetch(&self, resource_type: &str, id: &ResourceId) -> Result<AttributeSet> {
            if self.offline {
                return Err(Error::transport("connection refused"));
            }
            self.stored(resource_type, id.as_str())
                .ok_or_else(|| Error::not_found(resource_type, id.as_str()))
        }

        fn list(&self, resource_type: &str) -> Result<Vec<AttributeSet>> {
            Ok(self
                .resources
                .lock()
                .unwrap()
                .iter()
                .filter(|((t, _), _)| t == resource_type)
                .map(|(_, attrs)| attrs.clone())
                .collect())
        }
    }

    impl Applier for MockTarget {
        fn set(&self, resource_type: &str, id: &ResourceId, target: &AttributeSet) -> Result<()> {
            self.sets.fetch_add(1, Ordering::SeqCst);
            let key = (resource_type.to_string(), id.to_string());
            let mut resources = self.resources.lock().unwrap();
            if target.ensure() == Some(Ensure::Absent) {
                resources.remove(&key);
            } else {
                resources.insert(key, target.clone());
            }
            Ok(())
        }
    }

    fn request(id: &str, desired: AttributeSet) -> ResourceRequest {
        ResourceRequest::new("device_provider", ResourceId::new(id).unwrap(), desired)
    }

    fn ensure_present() -> AttributeSet {
        AttributeSet::new().with("ensure", "present")
    }

    #[test]
    fn test_error_level_aborts_before_apply() {
        let target = MockTarget::with_wibble();
        let mut reporter = CollectingReporter::new();

        let outcome = Reconciler::new(StrictnessLevel::Error).reconcile(
            &Fixture::new(),
            &target,
            &target,
            &request("wibble", ensure_present()),
            &mut reporter,
        );

        assert_eq!(outcome.phase, Phase::Reported);
        assert!(!outcome.is_success());
        assert_eq!(target.sets.load(Ordering::SeqCst), 0);
        assert_eq!(
            target.stored("device_provider", "wibble").unwrap().get("string"),
            Some(&Value::str("sample"))
        );

        let lines = reporter.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0],
            "Error: /Device_provider[wibble]: Could not evaluate: \
             device_provider[wibble]#get has not provided canonicalized values.\n\
             Returned values:       {:name=>\"wibble\", :ensure=>:present, :string=>\"sample\"}\n\
             Canonicalized values:  {:name=>\"wibble\", :ensure=>:present, :string=>\"changed\"}"
        );
    }

    #[test]
    fn test_warning_level_reports_and_continues() {
        let target = MockTarget::with_wibble();
        let mut reporter = CollectingReporter::new();

        let outcome = Reconciler::new(StrictnessLevel::Warning).reconcile(
            &Fixture::new(),
            &target,
            &target,
            &request("wibble", ensure_present()),
            &mut reporter,
        );

        assert_eq!(outcome.phase, Phase::Accepted);
        assert_eq!(outcome.result, ApplyResult::Modified);
        assert!(matches!(reporter.events[0], Event::Warning(_)));
        assert!(reporter.lines()[0].starts_with(
            "Warning: device_provider[wibble]#get has not provided canonicalized values.\n"
        ));
    }

    #[test]
    fn test_off_level_applies_canonical_change_silently() {
        let target = MockTarget::with_wibble();
        let mut reporter = CollectingReporter::new();

        let outcome = Reconciler::new(StrictnessLevel::Off).reconcile(
            &Fixture::new(),
            &target,
            &target,
            &request("wibble", ensure_present()),
            &mut reporter,
        );

        assert_eq!(outcome.result, ApplyResult::Modified);
        assert_eq!(
            reporter.lines(),
            vec!["Notice: /Device_provider[wibble]/string: string changed 'sample' to 'changed'"]
        );
        assert_eq!(target.sets.load(Ordering::SeqCst), 1);
        assert_eq!(
            target.stored("device_provider", "wibble").unwrap().get("string"),
            Some(&Value::str("changed"))
        );
    }

    #[test]
    fn test_absent_resource_is_defined() {
        let target = MockTarget::with_wibble();
        let mut reporter = CollectingReporter::new();

        let outcome = Reconciler::new(StrictnessLevel::Error).reconcile(
            &Fixture::new(),
            &target,
            &target,
            &request("foo", ensure_present()),
            &mut reporter,
        );

        assert_eq!(outcome.result, ApplyResult::Created);
        assert_eq!(
            reporter.lines(),
            vec!["Notice: /Device_provider[foo]/ensure: defined 'ensure' as 'present'"]
        );
        assert_eq!(
            target.stored("device_provider", "foo").unwrap().ensure(),
            Some(Ensure::Present)
        );
    }

    #[test]
    fn test_unmanaged_absent_resource_is_left_alone() {
        let target = MockTarget::default();
        let mut reporter = CollectingReporter::new();

        let outcome = Reconciler::new(StrictnessLevel::Error).reconcile(
            &Fixture::new(),
            &target,
            &target,
            &request("foo", AttributeSet::new()),
            &mut reporter,
        );

        assert_eq!(outcome.result, ApplyResult::NoChange);
        assert!(reporter.events.is_empty());
        assert_eq!(target.sets.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_ensure_absent_removes() {
        let target = MockTarget::with_wibble();
        let mut reporter = CollectingReporter::new();

        let outcome = Reconciler::new(StrictnessLevel::Off).reconcile(
            &Fixture::new(),
            &target,
            &target,
            &request("wibble", AttributeSet::new().with("ensure", "absent")),
            &mut reporter,
        );

        assert_eq!(outcome.result, ApplyResult::Removed);
        assert_eq!(
            reporter.lines(),
            vec!["Notice: /Device_provider[wibble]/ensure: ensure changed 'present' to 'absent'"]
        );
        assert!(target.stored("device_provider", "wibble").is_none());
    }

    #[test]
    fn test_defaults_fill_managed_resource() {
        let target = MockTarget::default();
        let mut reporter = CollectingReporter::new();

        let outcome = Reconciler::new(StrictnessLevel::Error).reconcile(
            &Banner::new(),
            &target,
            &target,
            &ResourceRequest::new("banner", ResourceId::new("foo").unwrap(), AttributeSet::new()),
            &mut reporter,
        );

        assert_eq!(outcome.result, ApplyResult::Modified);
        assert_eq!(
            reporter.lines(),
            vec!["Notice: /Banner[foo]/message: defined 'message' as 'foo'"]
        );
    }

    #[test]
    fn test_noop_reports_without_applying() {
        let target = MockTarget::with_wibble();
        let mut reporter = CollectingReporter::new();

        let outcome = Reconciler::new(StrictnessLevel::Off).noop(true).reconcile(
            &Fixture::new(),
            &target,
            &target,
            &request("wibble", ensure_present()),
            &mut reporter,
        );

        assert!(matches!(outcome.result, ApplyResult::Skipped { .. }));
        assert_eq!(target.sets.load(Ordering::SeqCst), 0);
        assert_eq!(
            reporter.lines(),
            vec![
                "Notice: /Device_provider[wibble]/string: current_value 'sample', should be 'changed' (noop)"
            ]
        );
    }

    #[test]
    fn test_transport_error_fails_resource() {
        let target = MockTarget::offline();
        let mut reporter = CollectingReporter::new();

        let outcome = Reconciler::new(StrictnessLevel::Off).reconcile(
            &Fixture::new(),
            &target,
            &target,
            &request("wibble", ensure_present()),
            &mut reporter,
        );

        assert_eq!(outcome.phase, Phase::Reported);
        assert_eq!(
            reporter.lines(),
            vec![
                "Error: /Device_provider[wibble]: Could not evaluate: transport error: connection refused"
            ]
        );
    }

    #[test]
    fn test_unknown_desired_attribute_fails_resource() {
        let target = MockTarget::with_wibble();
        let mut reporter = CollectingReporter::new();

        let outcome = Reconciler::new(StrictnessLevel::Off).reconcile(
            &Fixture::new(),
            &target,
            &target,
            &request("wibble", AttributeSet::new().with("colour", "blue")),
            &mut reporter,
        );

        assert!(matches!(outcome.result, ApplyResult::Failed { .. }));
        assert_eq!(target.sets.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_inspect_reports_violation() {
        let target = MockTarget::with_wibble();
        let mut reporter = CollectingReporter::new();
        let id = ResourceId::new("wibble").unwrap();

        let inspection = Reconciler::new(StrictnessLevel::Warning)
            .inspect(&Fixture::new(), &target, &id, &mut reporter)
            .unwrap();
        assert!(inspection.present);
        assert_eq!(inspection.decision, Decision::Warn);
        assert_eq!(reporter.events.len(), 1);

        let err = Reconciler::new(StrictnessLevel::Error)
            .inspect(&Fixture::new(), &target, &id, &mut CollectingReporter::new())
            .unwrap_err();
        assert!(matches!(err, Error::CanonicalizationViolation(_)));
    }

    #[test]
    fn test_untyped_values_are_not_violations() {
        let target = MockTarget::default();
        target.resources.lock().unwrap().insert(
            ("device_provider".into(), "bare".into()),
            AttributeSet::new().with("name", "bare").with("ensure", "present"),
        );
        let id = ResourceId::new("bare").unwrap();

        let inspection = Reconciler::new(StrictnessLevel::Error)
            .inspect(&Fixture::new(), &target, &id, &mut CollectingReporter::new())
            .unwrap();
        assert!(inspection.violation.is_none());
        assert_eq!(inspection.observed.ensure(), Some(Ensure::Present));
    }

    #[test]
    fn test_inspect_absent_resource() {
        let target = MockTarget::default();
        let id = ResourceId::new("nope").unwrap();

        let inspection = Reconciler::new(StrictnessLevel::Error)
            .inspect(&Fixture::new(), &target, &id, &mut CollectingReporter::new())
            .unwrap();
        assert!(!inspection.present);
        assert_eq!(inspection.observed.ensure(), Some(Ensure::Absent));
        assert!(inspection.violation.is_none());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// Canonical form trims surrounding whitespace from `description`
        #[derive(Debug)]
        struct Interface {
            schema: Schema,
        }

        impl Interface {
            fn new() -> Self {
                Self {
                    schema: Schema::new("device_interface")
                        .ensurable()
                        .attribute(AttributeDef::new("description", AttributeKind::String))
                        .attribute(AttributeDef::new("mtu", AttributeKind::Integer)),
                }
            }
        }

        impl Provider for Interface {
            fn type_name(&self) -> &str {
                "device_interface"
            }

            fn description(&self) -> String {
                "interface".into()
            }

            fn schema(&self) -> &Schema {
                &self.schema
            }

            fn normalize(&self, attrs: AttributeSet) -> AttributeSet {
                match attrs.get("description") {
                    Some(Value::Str(s)) => {
                        let trimmed = s.trim().to_string();
                        attrs.with("description", trimmed)
                    }
                    _ => attrs,
                }
            }
        }

        fn arb_attrs() -> impl Strategy<Value = AttributeSet> {
            (
                "[a-z]{1,8}",
                prop::bool::ANY,
                "[ ]{0,2}[a-z ]{0,10}[ ]{0,2}",
                prop::option::of(0i64..10_000),
            )
                .prop_map(|(name, present, description, mtu)| {
                    let ensure = if present { "present" } else { "absent" };
                    let attrs = AttributeSet::new()
                        .with("name", name)
                        .with("ensure", ensure)
                        .with("description", description);
                    match mtu {
                        Some(mtu) => attrs.with("mtu", mtu.to_string()),
                        None => attrs,
                    }
                })
        }

        proptest! {
            #[test]
            fn canonicalize_is_idempotent(attrs in arb_attrs()) {
                let provider = Interface::new();
                let once = provider.canonicalize(&attrs).unwrap();
                let twice = provider.canonicalize(&once).unwrap();
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn violation_iff_not_canonical(attrs in arb_attrs()) {
                let provider = Interface::new();
                let returned = provider.schema().coerce(&attrs).unwrap();
                let id = ResourceId::new(returned.get("name").unwrap().to_string()).unwrap();

                let target = MockTarget::default();
                target.resources.lock().unwrap().insert(
                    ("device_interface".to_string(), id.to_string()),
                    returned.clone(),
                );

                let inspection = Reconciler::new(StrictnessLevel::Off)
                    .inspect(&provider, &target, &id, &mut CollectingReporter::new())
                    .unwrap();
                let canonical = provider.canonicalize(&returned).unwrap();
                prop_assert_eq!(inspection.violation.is_some(), returned != canonical);
            }
        }
    }
}
