//! The mutation facade
//!
//! Every user-visible mutation funnels through [`ProjectTracker::apply`],
//! which guarantees the write-path invariant: mutate the leaf, recompute
//! every derived field on the path to the scope root, then submit the
//! entire scope document as one write. A leaf change is never persisted
//! without its recomputed ancestors.

use std::collections::HashSet;

use tmods_model::{
    validate_scope, Action, ImageMeta, Part, Prerequisite, Scope, ScopeId, Snapshot, Step,
};
use tmods_progress::recompute_scope;
use tmods_store::ScopeStore;

use crate::dashboard::{project_summary, ProjectSummary};
use crate::error::MutationError;
use crate::images::SessionImageCache;
use crate::mutation::Mutation;
use crate::report::ScopeReport;

/// The single write path for the project
pub struct ProjectTracker {
    store: ScopeStore,
    images: SessionImageCache,
}

impl ProjectTracker {
    /// Wrap a connected scope store
    #[must_use]
    pub fn new(store: ScopeStore) -> Self {
        Self {
            store,
            images: SessionImageCache::new(),
        }
    }

    /// Apply one mutation to the named scope.
    ///
    /// Resolves the target in the current mirror, applies the leaf
    /// change, recomputes derived fields bottom-up, validates the
    /// resulting document, and writes it whole.
    ///
    /// # Errors
    /// [`MutationError`] when the target cannot be resolved, the mutation
    /// is illegal for the target, the mutated document fails validation,
    /// or the store rejects the write.
    pub async fn apply(&self, scope_id: &ScopeId, mutation: Mutation) -> Result<(), MutationError> {
        let snapshot = self.store.snapshot();
        let mut scope = snapshot
            .get(scope_id)
            .cloned()
            .ok_or_else(|| MutationError::UnknownScope(scope_id.clone()))?;

        tracing::debug!(scope = %scope_id, ?mutation, "applying mutation");
        self.apply_to_scope(&mut scope, mutation)?;
        recompute_scope(&mut scope);

        let known: HashSet<ScopeId> = snapshot.keys().cloned().collect();
        validate_scope(&scope, &known)?;

        self.store.write(scope_id, scope).await?;
        Ok(())
    }

    /// Current project summary over the mirror
    #[must_use]
    pub fn summary(&self) -> ProjectSummary {
        project_summary(&self.store.snapshot())
    }

    /// Report data for one scope, copied from its derived fields
    #[must_use]
    pub fn report(&self, scope_id: &ScopeId) -> Option<ScopeReport> {
        let snapshot = self.store.snapshot();
        let scope = snapshot.get(scope_id)?;
        Some(ScopeReport::from_scope(scope, &snapshot))
    }

    /// Clone of the current mirror, for the rendering boundary
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// The session-local image cache
    #[must_use]
    pub fn images(&self) -> &SessionImageCache {
        &self.images
    }

    /// The underlying store
    #[must_use]
    pub fn store(&self) -> &ScopeStore {
        &self.store
    }

    fn apply_to_scope(&self, scope: &mut Scope, mutation: Mutation) -> Result<(), MutationError> {
        match mutation {
            Mutation::ToggleStep { part, action, step } => {
                let step = resolve_step(scope, part, action, step)?;
                step.completed = !step.completed;
            }
            Mutation::AddStep { part, action, text } => {
                resolve_action(scope, part, action)?.steps.push(Step::new(text));
            }
            Mutation::DeleteStep { part, action, step } => {
                let act = resolve_action(scope, part, action)?;
                let idx = act
                    .steps
                    .iter()
                    .position(|s| s.id == step)
                    .ok_or(MutationError::UnknownStep(step))?;
                act.steps.remove(idx);
            }
            Mutation::EditStepText {
                part,
                action,
                step,
                text,
            } => {
                resolve_step(scope, part, action, step)?.text = text;
            }

            Mutation::AddAction { part, title } => {
                resolve_part(scope, part)?.actions.push(Action::new(title));
            }
            Mutation::DeleteAction { part, action } => {
                let p = resolve_part(scope, part)?;
                let idx = p
                    .actions
                    .iter()
                    .position(|a| a.id == action)
                    .ok_or(MutationError::UnknownAction(action))?;
                p.actions.remove(idx);
            }
            Mutation::EditActionTitle {
                part,
                action,
                title,
            } => {
                resolve_action(scope, part, action)?.title = title;
            }
            Mutation::EditActionNotes {
                part,
                action,
                notes,
            } => {
                resolve_action(scope, part, action)?.notes = notes;
            }
            Mutation::AttachImage {
                part,
                action,
                name,
                bytes,
            } => {
                let act = resolve_action(scope, part, action)?;
                let meta = ImageMeta::new(name);
                act.image = Some(meta.clone());
                // Bytes never reach the store.
                self.images.insert(action, meta, bytes);
            }

            Mutation::AddPart { title } => {
                scope.parts.push(Part::new(title));
            }
            Mutation::DeletePart { part } => {
                scope
                    .remove_part(part)
                    .ok_or(MutationError::UnknownPart(part))?;
            }
            Mutation::EditPartTitle { part, title } => {
                resolve_part(scope, part)?.title = title;
            }
            Mutation::SetRelatedScope { part, target } => {
                // Link legality (lead-abatement scope only, no self-link,
                // target must exist) is checked by document validation.
                resolve_part(scope, part)?.related_scope = target;
            }

            Mutation::SetPrereqStatus { key, status } => {
                let prereq = resolve_prereq(scope, key)?;
                match prereq {
                    Prerequisite::Simple { status: slot, .. } => *slot = status,
                    Prerequisite::Tracked { .. } => {
                        return Err(MutationError::StatusIsDerived { key });
                    }
                }
            }
            Mutation::TogglePrereqStep { key, step } => {
                let prereq = resolve_prereq(scope, key)?;
                match prereq {
                    Prerequisite::Tracked { steps, .. } => {
                        let target = steps
                            .iter_mut()
                            .find(|s| s.id == step)
                            .ok_or(MutationError::UnknownStep(step))?;
                        target.completed = !target.completed;
                    }
                    Prerequisite::Simple { .. } => {
                        return Err(MutationError::NoChecklist { key });
                    }
                }
            }
            Mutation::EditPrereqNotes { key, notes } => {
                let prereq = resolve_prereq(scope, key)?;
                match prereq {
                    Prerequisite::Simple { notes: slot, .. }
                    | Prerequisite::Tracked { notes: slot, .. } => *slot = notes,
                }
            }

            Mutation::ToggleAbatementAction { part, action } => {
                if !scope.is_lead_abatement() {
                    return Err(MutationError::NotLeadAbatement(scope.id.clone()));
                }
                let act = resolve_action(scope, part, action)?;
                let first = act
                    .steps
                    .first_mut()
                    .ok_or(MutationError::EmptyToggle(action))?;
                first.completed = !first.completed;
            }
        }
        Ok(())
    }
}

fn resolve_part(
    scope: &mut Scope,
    part: tmods_model::PartId,
) -> Result<&mut Part, MutationError> {
    scope.part_mut(part).ok_or(MutationError::UnknownPart(part))
}

fn resolve_action(
    scope: &mut Scope,
    part: tmods_model::PartId,
    action: tmods_model::ActionId,
) -> Result<&mut Action, MutationError> {
    resolve_part(scope, part)?
        .action_mut(action)
        .ok_or(MutationError::UnknownAction(action))
}

fn resolve_step(
    scope: &mut Scope,
    part: tmods_model::PartId,
    action: tmods_model::ActionId,
    step: tmods_model::StepId,
) -> Result<&mut Step, MutationError> {
    resolve_action(scope, part, action)?
        .step_mut(step)
        .ok_or(MutationError::UnknownStep(step))
}

fn resolve_prereq(
    scope: &mut Scope,
    key: tmods_model::PrereqKey,
) -> Result<&mut Prerequisite, MutationError> {
    let id = scope.id.clone();
    scope
        .prereqs_mut()
        .map(|section| section.get_mut(key))
        .ok_or(MutationError::NoPrereqSection(id))
}
