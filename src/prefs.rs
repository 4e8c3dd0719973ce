//! Property Merge Engine
//!
//! Three-way merge of `.prefs` fragments for setup/update runs, and the reverse
//! harvest that moves workspace edits back into the update template.

use crate::destination::WriteOutcome;
use crate::error::FragmentError;
use crate::fragment::Fragment;
use crate::resolver::Resolver;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// What a harvest did for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestOutcome {
    /// No workspace copy exists, nothing to harvest.
    NoWorkspaceCopy,
    /// The workspace copy matches the resolved update template.
    NoChanges,
    /// Changes were found but the merged template equals the current one.
    Unchanged,
    /// The update template was rewritten with `changes` entries overlaid.
    Saved { changes: usize },
}

/// Merges and harvests property fragments using a shared [`Resolver`].
#[derive(Debug, Clone)]
pub struct PreferenceMerger {
    resolver: Arc<Resolver>,
}

impl PreferenceMerger {
    pub fn new(resolver: Arc<Resolver>) -> Self {
        Self { resolver }
    }

    /// Build the workspace fragment: workspace copy if present, else setup copy,
    /// with the update copy overlaid and every value resolved, then persist it
    /// at `workspace`.
    ///
    /// Unreadable inputs count as empty, so an update template alone still
    /// bootstraps the workspace file.
    pub fn merge_for_setup_or_update(
        &self,
        workspace: &Path,
        setup: &Path,
        update: &Path,
    ) -> Result<WriteOutcome, FragmentError> {
        let workspace_fragment = load_present(workspace);
        let setup_fragment = if workspace_fragment.is_none() {
            load_present(setup)
        } else {
            None
        };
        let update_fragment = Fragment::load_or_empty(update);

        let merged = self.merge(
            workspace_fragment.as_ref(),
            setup_fragment.as_ref(),
            &update_fragment,
        );
        let outcome = merged.store(workspace)?;
        debug!(path = %workspace.display(), ?outcome, "Merged preferences");
        Ok(outcome)
    }

    /// Pure merge: base is `workspace` or else `setup`, `update` wins on every
    /// key it defines, and values are resolved afterwards.
    pub fn merge(
        &self,
        workspace: Option<&Fragment>,
        setup: Option<&Fragment>,
        update: &Fragment,
    ) -> Fragment {
        let mut merged = workspace.or(setup).cloned().unwrap_or_default();
        merged.overlay(update);
        self.resolve_fragment(&mut merged);
        merged
    }

    /// Workspace entries whose value differs from the resolved update value.
    ///
    /// Keys missing from `update` are only reported when `include_new` is set.
    /// Returned values are the workspace's.
    pub fn extract_changes(
        &self,
        update: &Fragment,
        workspace: &Fragment,
        include_new: bool,
    ) -> Fragment {
        let mut resolved_update = update.clone();
        self.resolve_fragment(&mut resolved_update);

        workspace
            .iter()
            .filter(|(key, value)| match resolved_update.get(key) {
                Some(current) => current != *value,
                None => include_new,
            })
            .collect()
    }

    /// Overlay `changes` on a copy of `update`.
    pub fn apply_changes(changes: &Fragment, update: &Fragment) -> Fragment {
        let mut merged = update.clone();
        merged.overlay(changes);
        merged
    }

    /// Harvest edits from the `workspace` file into the `update` file.
    ///
    /// Only writes when the merged fragment differs from the current update
    /// template; values are re-abstracted into placeholders before storing.
    pub fn save_changes(
        &self,
        workspace: &Path,
        update: &Path,
        include_new: bool,
    ) -> Result<HarvestOutcome, FragmentError> {
        let Some(workspace_fragment) = Fragment::load_optional(workspace)? else {
            return Ok(HarvestOutcome::NoWorkspaceCopy);
        };
        let update_fragment = Fragment::load_or_empty(update);

        let changes = self.extract_changes(&update_fragment, &workspace_fragment, include_new);
        if changes.is_empty() {
            return Ok(HarvestOutcome::NoChanges);
        }

        let mut merged = Self::apply_changes(&changes, &update_fragment);
        if merged == update_fragment {
            return Ok(HarvestOutcome::Unchanged);
        }

        self.unresolve_fragment(&mut merged);
        merged.store(update)?;
        info!(
            workspace = %workspace.display(),
            update = %update.display(),
            changes = changes.len(),
            "Saved workspace changes to update template"
        );
        Ok(HarvestOutcome::Saved {
            changes: changes.len(),
        })
    }

    /// Resolve every value of `fragment` in place.
    pub fn resolve_fragment(&self, fragment: &mut Fragment) {
        fragment.map_values(|value| self.resolver.resolve(value).into_owned());
    }

    /// Turn concrete values of `fragment` back into placeholders in place.
    pub fn unresolve_fragment(&self, fragment: &mut Fragment) {
        fragment.map_values(|value| self.resolver.unresolve(value));
    }
}

/// Load a fragment that may be absent; a broken file is logged and counts as
/// present but empty.
fn load_present(path: &Path) -> Option<Fragment> {
    if path.exists() {
        Some(Fragment::load_or_empty(path))
    } else {
        None
    }
}
