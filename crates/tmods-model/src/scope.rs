//! Scope documents and the containment hierarchy
//!
//! A scope document is the unit of persistence: the store only ever reads
//! and writes whole scopes. Parts, actions, and steps are owned lists with
//! insertion order preserved; deletion never reorders the survivors.

use crate::ids::{ActionId, PartId, ScopeId, StepId};
use crate::percent::{Percent, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Atomic boolean unit of work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Step identifier, immutable once assigned
    pub id: StepId,
    /// Checklist text
    pub text: String,
    /// Whether the step is done
    pub completed: bool,
}

impl Step {
    /// Create a new incomplete step
    #[inline]
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: StepId::new(),
            text: text.into(),
            completed: false,
        }
    }

    /// Create a step with a known completion state (fixtures, seeding)
    #[inline]
    #[must_use]
    pub fn with_completed(text: impl Into<String>, completed: bool) -> Self {
        Self {
            id: StepId::new(),
            text: text.into(),
            completed,
        }
    }
}

/// Image attachment metadata. The persisted schema carries metadata only;
/// actual image bytes live in a session-local cache and are never written
/// to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMeta {
    /// Original file name
    pub name: String,
    /// When the image was attached
    pub attached_at: DateTime<Utc>,
}

impl ImageMeta {
    /// Record an attachment made now
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attached_at: Utc::now(),
        }
    }
}

/// A unit of work within a part, composed of steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Action identifier, immutable once assigned
    pub id: ActionId,
    /// Action title
    pub title: String,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
    /// Owned checklist, insertion order
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Derived: `round(100 * completed / total)`, 0 when there are no steps
    #[serde(default)]
    pub percent_complete: Percent,
    /// Attachment metadata, if an image was ever attached
    #[serde(default)]
    pub image: Option<ImageMeta>,
}

impl Action {
    /// Create a new empty action
    #[inline]
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ActionId::new(),
            title: title.into(),
            notes: String::new(),
            steps: Vec::new(),
            percent_complete: Percent::ZERO,
            image: None,
        }
    }

    /// With an initial checklist
    #[inline]
    #[must_use]
    pub fn with_steps(mut self, steps: Vec<Step>) -> Self {
        self.steps = steps;
        self
    }

    /// Find a step by id
    #[inline]
    #[must_use]
    pub fn step_mut(&mut self, id: StepId) -> Option<&mut Step> {
        self.steps.iter_mut().find(|s| s.id == id)
    }
}

/// Link from a lead-abatement part to the scope its work gates.
/// Serialized as the plain scope id string, with `"none"` as the sentinel
/// for an unlinked part.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RelatedScope {
    /// Not linked to any scope
    #[default]
    None,
    /// Linked to exactly one other scope
    Scope(ScopeId),
}

impl RelatedScope {
    /// The linked scope id, if any
    #[inline]
    #[must_use]
    pub fn scope_id(&self) -> Option<&ScopeId> {
        match self {
            RelatedScope::None => None,
            RelatedScope::Scope(id) => Some(id),
        }
    }
}

impl Serialize for RelatedScope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            RelatedScope::None => serializer.serialize_str("none"),
            RelatedScope::Scope(id) => serializer.serialize_str(id.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for RelatedScope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        // Legacy documents used "N/A" interchangeably with "none".
        if raw.is_empty() || raw == "none" || raw == "N/A" {
            Ok(RelatedScope::None)
        } else {
            Ok(RelatedScope::Scope(ScopeId::new(raw)))
        }
    }
}

/// A trackable item within a scope (the source material calls it a
/// "drawing"). `related_scope` is only meaningful on lead-abatement parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Part identifier, immutable once assigned
    pub id: PartId,
    /// Part title
    pub title: String,
    /// Owned actions, insertion order
    #[serde(default)]
    pub actions: Vec<Action>,
    /// Derived: `round(mean of action percents)`, 0 when there are no actions
    #[serde(default)]
    pub percent_complete: Percent,
    /// Lead-abatement linkage to another scope
    #[serde(default)]
    pub related_scope: RelatedScope,
}

impl Part {
    /// Create a new empty part
    #[inline]
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: PartId::new(),
            title: title.into(),
            actions: Vec::new(),
            percent_complete: Percent::ZERO,
            related_scope: RelatedScope::None,
        }
    }

    /// With an initial action list
    #[inline]
    #[must_use]
    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = actions;
        self
    }

    /// With a related-scope link
    #[inline]
    #[must_use]
    pub fn linked_to(mut self, scope: ScopeId) -> Self {
        self.related_scope = RelatedScope::Scope(scope);
        self
    }

    /// Find an action by id
    #[inline]
    #[must_use]
    pub fn action_mut(&mut self, id: ActionId) -> Option<&mut Action> {
        self.actions.iter_mut().find(|a| a.id == id)
    }
}

/// Which prerequisite slot of a standard scope is being addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrereqKey {
    /// Materials readiness
    Materials,
    /// General pre-work conditions
    General,
}

/// A scope-level gating condition. The mode (simple dropdown vs.
/// step-tracked checklist) is fixed per prerequisite key by the catalog,
/// never per instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Prerequisite {
    /// User sets the status directly from a dropdown
    Simple {
        status: Status,
        #[serde(default)]
        notes: String,
    },
    /// Status is derived from the checklist and rewritten on every change
    Tracked {
        status: Status,
        #[serde(default)]
        notes: String,
        steps: Vec<Step>,
    },
}

impl Prerequisite {
    /// A fresh step-tracked prerequisite with the given checklist
    #[must_use]
    pub fn tracked(steps: Vec<Step>) -> Self {
        Prerequisite::Tracked {
            status: Status::NotStarted,
            notes: String::new(),
            steps,
        }
    }

    /// A fresh simple prerequisite
    #[must_use]
    pub fn simple() -> Self {
        Prerequisite::Simple {
            status: Status::NotStarted,
            notes: String::new(),
        }
    }

    /// Current status regardless of mode
    #[inline]
    #[must_use]
    pub fn status(&self) -> Status {
        match self {
            Prerequisite::Simple { status, .. } | Prerequisite::Tracked { status, .. } => *status,
        }
    }
}

/// The two own prerequisites of a standard scope. The third prerequisite
/// shown in the UI (lead abatement) is derived from the lead-abatement
/// scope at read time and is deliberately absent here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrereqSection {
    pub materials: Prerequisite,
    pub general: Prerequisite,
}

impl PrereqSection {
    /// Borrow a prerequisite slot by key
    #[inline]
    #[must_use]
    pub fn get(&self, key: PrereqKey) -> &Prerequisite {
        match key {
            PrereqKey::Materials => &self.materials,
            PrereqKey::General => &self.general,
        }
    }

    /// Mutably borrow a prerequisite slot by key
    #[inline]
    #[must_use]
    pub fn get_mut(&mut self, key: PrereqKey) -> &mut Prerequisite {
        match key {
            PrereqKey::Materials => &mut self.materials,
            PrereqKey::General => &mut self.general,
        }
    }
}

/// Scope flavor: standard scopes carry their own prerequisite section,
/// the distinguished lead-abatement scope has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "flavor", rename_all = "snake_case")]
pub enum ScopeKind {
    /// Ordinary TMOD scope with its own prerequisites
    Standard { prereqs: PrereqSection },
    /// The lead-abatement scope; its parts link into other scopes
    LeadAbatement,
}

/// One named work area of the project; the unit of persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    /// Catalog scope id
    pub id: ScopeId,
    /// Display title
    pub title: String,
    /// Standard or lead-abatement flavor
    pub kind: ScopeKind,
    /// Owned parts, insertion order
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Scope {
    /// Create an empty standard scope
    #[must_use]
    pub fn standard(id: ScopeId, title: impl Into<String>, prereqs: PrereqSection) -> Self {
        Self {
            id,
            title: title.into(),
            kind: ScopeKind::Standard { prereqs },
            parts: Vec::new(),
        }
    }

    /// Create the lead-abatement scope
    #[must_use]
    pub fn lead_abatement(id: ScopeId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            kind: ScopeKind::LeadAbatement,
            parts: Vec::new(),
        }
    }

    /// With an initial part list
    #[inline]
    #[must_use]
    pub fn with_parts(mut self, parts: Vec<Part>) -> Self {
        self.parts = parts;
        self
    }

    /// Whether this is the distinguished lead-abatement scope
    #[inline]
    #[must_use]
    pub fn is_lead_abatement(&self) -> bool {
        matches!(self.kind, ScopeKind::LeadAbatement)
    }

    /// Borrow the prerequisite section, if this scope has one
    #[inline]
    #[must_use]
    pub fn prereqs(&self) -> Option<&PrereqSection> {
        match &self.kind {
            ScopeKind::Standard { prereqs } => Some(prereqs),
            ScopeKind::LeadAbatement => None,
        }
    }

    /// Mutably borrow the prerequisite section, if this scope has one
    #[inline]
    #[must_use]
    pub fn prereqs_mut(&mut self) -> Option<&mut PrereqSection> {
        match &mut self.kind {
            ScopeKind::Standard { prereqs } => Some(prereqs),
            ScopeKind::LeadAbatement => None,
        }
    }

    /// Find a part by id
    #[inline]
    #[must_use]
    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.parts.iter().find(|p| p.id == id)
    }

    /// Find a part by id, mutably
    #[inline]
    #[must_use]
    pub fn part_mut(&mut self, id: PartId) -> Option<&mut Part> {
        self.parts.iter_mut().find(|p| p.id == id)
    }

    /// Remove a part by id, preserving the order of survivors.
    /// Returns the removed part, or `None` if the id is unknown.
    pub fn remove_part(&mut self, id: PartId) -> Option<Part> {
        let idx = self.parts.iter().position(|p| p.id == id)?;
        Some(self.parts.remove(idx))
    }
}
