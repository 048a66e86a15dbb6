//! Display name resolution for identifier-labelled selector options.
//!
//! Each option gets its own profile lookup task. Tasks run concurrently and
//! finish in any order; each one relabels only its own option, and only if the
//! selector has not been repopulated in the meantime.

use crate::client::AuthorSource;
use crate::labels::resolved_label;
use crate::models::{lock_form, SharedForm};
use std::sync::Arc;
use tokio::task::{AbortHandle, JoinHandle};

/// Identity of one option within one population of the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionKey {
    pub generation: u64,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    Resolved,
    /// The lookup failed; the option keeps its bare identifier label.
    Failed,
    /// The lookup succeeded but its option was replaced before it returned.
    Stale,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionSummary {
    pub resolved: usize,
    pub failed: usize,
    pub stale: usize,
    pub cancelled: usize,
}

/// Option to look up: position, value, and the label used as the lookup key.
#[derive(Debug, Clone)]
pub struct PendingOption {
    pub index: usize,
    pub value: String,
    pub label: String,
}

/// Cancels every lookup of a batch. Cheap to clone and keep around after the
/// batch itself has been handed to someone else.
#[derive(Debug, Clone, Default)]
pub struct BatchCanceller {
    handles: Vec<AbortHandle>,
}

impl BatchCanceller {
    pub fn cancel(&self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

/// The lookups started for one population of the selector.
///
/// Dropping the batch detaches the tasks; they keep running. Call
/// [`ResolutionBatch::wait_all`] to learn when every label has settled.
#[derive(Debug)]
pub struct ResolutionBatch {
    generation: u64,
    tasks: Vec<(OptionKey, JoinHandle<LookupOutcome>)>,
}

impl ResolutionBatch {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn keys(&self) -> Vec<OptionKey> {
        self.tasks.iter().map(|(key, _)| *key).collect()
    }

    /// Number of lookups that have not finished yet.
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|(_, h)| !h.is_finished()).count()
    }

    /// Abort the lookup for one option. Returns false if `key` is not part of
    /// this batch.
    pub fn cancel(&self, key: OptionKey) -> bool {
        match self.tasks.iter().find(|(k, _)| *k == key) {
            Some((_, handle)) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&self) {
        for (_, handle) in &self.tasks {
            handle.abort();
        }
    }

    pub fn canceller(&self) -> BatchCanceller {
        BatchCanceller {
            handles: self.tasks.iter().map(|(_, h)| h.abort_handle()).collect(),
        }
    }

    /// Wait for every lookup to finish or be cancelled.
    pub async fn wait_all(self) -> ResolutionSummary {
        let mut summary = ResolutionSummary::default();
        for (key, handle) in self.tasks {
            match handle.await {
                Ok(LookupOutcome::Resolved) => summary.resolved += 1,
                Ok(LookupOutcome::Failed) => summary.failed += 1,
                Ok(LookupOutcome::Stale) => summary.stale += 1,
                Err(e) if e.is_cancelled() => summary.cancelled += 1,
                Err(e) => {
                    tracing::error!(?key, error = %e, "profile lookup task panicked");
                    summary.failed += 1;
                }
            }
        }
        summary
    }
}

pub struct DisplayNameResolver;

impl DisplayNameResolver {
    /// Start one lookup per option currently in the form's selector.
    pub fn start(form: &SharedForm, source: Arc<dyn AuthorSource>) -> ResolutionBatch {
        let (generation, pending) = {
            let f = lock_form(form);
            let pending = f
                .selector
                .options
                .iter()
                .enumerate()
                .map(|(index, opt)| PendingOption {
                    index,
                    value: opt.value.clone(),
                    label: opt.label.clone(),
                })
                .collect();
            (f.selector.generation, pending)
        };
        Self::start_for(form, source, generation, pending)
    }

    /// Start lookups for a known snapshot of options belonging to `generation`.
    pub fn start_for(
        form: &SharedForm,
        source: Arc<dyn AuthorSource>,
        generation: u64,
        pending: Vec<PendingOption>,
    ) -> ResolutionBatch {
        let tasks = pending
            .into_iter()
            .map(|opt| {
                let key = OptionKey {
                    generation,
                    index: opt.index,
                };
                let form = Arc::clone(form);
                let source = Arc::clone(&source);
                let handle = tokio::spawn(async move { resolve_one(&form, source.as_ref(), key, opt).await });
                (key, handle)
            })
            .collect();

        ResolutionBatch { generation, tasks }
    }
}

async fn resolve_one(
    form: &SharedForm,
    source: &dyn AuthorSource,
    key: OptionKey,
    opt: PendingOption,
) -> LookupOutcome {
    let profile = match source.fetch_profile(&opt.label).await {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(uid = %opt.label, error = %e, "profile lookup failed");
            return LookupOutcome::Failed;
        }
    };

    if profile.display_name.is_empty() {
        tracing::warn!(uid = %opt.label, "profile has an empty displayName");
        return LookupOutcome::Failed;
    }

    let label = resolved_label(&profile.display_name, &opt.label);
    let applied = lock_form(form)
        .selector
        .relabel(key.generation, key.index, &opt.value, label);

    if applied {
        LookupOutcome::Resolved
    } else {
        tracing::debug!(uid = %opt.label, ?key, "dropping stale profile lookup");
        LookupOutcome::Stale
    }
}
