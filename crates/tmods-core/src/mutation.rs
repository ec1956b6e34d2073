//! Mutation intents
//!
//! Everything the rendering boundary can ask for, as data. Each intent
//! addresses its leaf by id path; the facade resolves the path, applies
//! the change, recomputes ancestors, and persists the whole scope.

use tmods_model::{ActionId, PartId, PrereqKey, RelatedScope, Status, StepId};

/// A user-visible mutation of one scope document
#[derive(Debug, Clone)]
pub enum Mutation {
    /// Flip one step's completed flag
    ToggleStep {
        part: PartId,
        action: ActionId,
        step: StepId,
    },
    /// Append a step to an action's checklist
    AddStep {
        part: PartId,
        action: ActionId,
        text: String,
    },
    /// Remove a step; survivors keep their order
    DeleteStep {
        part: PartId,
        action: ActionId,
        step: StepId,
    },
    /// Rewrite a step's checklist text
    EditStepText {
        part: PartId,
        action: ActionId,
        step: StepId,
        text: String,
    },

    /// Append an empty action to a part
    AddAction { part: PartId, title: String },
    /// Remove an action; survivors keep their order
    DeleteAction { part: PartId, action: ActionId },
    /// Rewrite an action's title
    EditActionTitle {
        part: PartId,
        action: ActionId,
        title: String,
    },
    /// Rewrite an action's notes
    EditActionNotes {
        part: PartId,
        action: ActionId,
        notes: String,
    },
    /// Attach an image to an action. Metadata is persisted with the
    /// document; the bytes go to the session-local cache only.
    AttachImage {
        part: PartId,
        action: ActionId,
        name: String,
        bytes: Vec<u8>,
    },

    /// Append an empty part to the scope
    AddPart { title: String },
    /// Remove a part; survivors keep their order
    DeletePart { part: PartId },
    /// Rewrite a part's title
    EditPartTitle { part: PartId, title: String },
    /// Change a lead-abatement part's related-scope link
    SetRelatedScope {
        part: PartId,
        target: RelatedScope,
    },

    /// Set a simple prerequisite's status from the dropdown.
    /// Rejected on step-tracked prerequisites, whose status is derived.
    SetPrereqStatus { key: PrereqKey, status: Status },
    /// Flip one step of a step-tracked prerequisite's checklist
    TogglePrereqStep { key: PrereqKey, step: StepId },
    /// Rewrite a prerequisite's notes
    EditPrereqNotes { key: PrereqKey, notes: String },

    /// The simplified lead-abatement toggle: flips step 0 of the action.
    /// Deliberately not "all steps" - seeded abatement actions carry
    /// exactly one step, and for hand-built ones the toggle must agree
    /// with the full step editor on the same underlying state.
    ToggleAbatementAction { part: PartId, action: ActionId },
}
