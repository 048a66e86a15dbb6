//! Populating the `visibleFor` user selector from the author endpoints.

use crate::client::{AuthorSource, ClientError};
use crate::config::LabelMode;
use crate::labels::author_label;
use crate::models::{lock_form, AuthorEntry, SelectorOption, SharedForm};
use crate::resolver::{BatchCanceller, DisplayNameResolver, PendingOption, ResolutionBatch};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

pub type PopulateTask = JoinHandle<Result<PopulateOutcome, ClientError>>;

#[derive(Debug)]
pub struct PopulateOutcome {
    pub generation: u64,
    pub option_count: usize,
    pub selected_count: usize,
    /// Profile lookups started for the new options, in resolve mode.
    pub resolution: Option<ResolutionBatch>,
}

/// Options for a `/author` listing. Entries without a uid are skipped.
pub fn descriptive_options(authors: &[AuthorEntry]) -> Vec<SelectorOption> {
    authors
        .iter()
        .filter_map(|author| {
            let label = author_label(author)?;
            let uid = author.uid.as_deref()?;
            Some(SelectorOption::new(uid, label))
        })
        .collect()
}

/// Options for a `/author/available/` listing, labelled with the bare id.
pub fn identifier_options(ids: &[String]) -> Vec<SelectorOption> {
    ids.iter()
        .filter(|id| !id.is_empty())
        .map(|id| SelectorOption::new(id.as_str(), id.as_str()))
        .collect()
}

pub struct UserSelectorPopulator {
    source: Arc<dyn AuthorSource>,
    mode: LabelMode,
    in_flight: Mutex<Option<BatchCanceller>>,
}

impl UserSelectorPopulator {
    pub fn new(source: Arc<dyn AuthorSource>, mode: LabelMode) -> Self {
        Self {
            source,
            mode,
            in_flight: Mutex::new(None),
        }
    }

    pub fn mode(&self) -> LabelMode {
        self.mode
    }

    /// Fetch the author list and replace the selector's options with it.
    ///
    /// Options whose value is in `selected` come back selected. On a failed
    /// fetch the selector is left as it was.
    pub async fn populate(
        &self,
        form: &SharedForm,
        selected: Option<&[String]>,
    ) -> Result<PopulateOutcome, ClientError> {
        let fetched = match self.mode {
            LabelMode::Descriptive => self
                .source
                .list_authors()
                .await
                .map(|authors| descriptive_options(&authors)),
            LabelMode::ResolveProfiles => self
                .source
                .list_available()
                .await
                .map(|ids| identifier_options(&ids)),
        };

        let mut options = match fetched {
            Ok(options) => options,
            Err(e) => {
                tracing::warn!(error = %e, "could not load authors for the selector");
                return Err(e);
            }
        };

        let keep: HashSet<&str> = selected
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .collect();
        for opt in &mut options {
            opt.selected = keep.contains(opt.value.as_str());
        }

        let option_count = options.len();
        let selected_count = options.iter().filter(|o| o.selected).count();
        let pending: Vec<PendingOption> = options
            .iter()
            .enumerate()
            .map(|(index, opt)| PendingOption {
                index,
                value: opt.value.clone(),
                label: opt.label.clone(),
            })
            .collect();

        let generation = {
            let mut f = lock_form(form);
            f.selector.multiple = true;
            f.selector.replace_options(options)
        };

        if let Some(previous) = self.take_in_flight() {
            previous.cancel();
        }

        let resolution = match self.mode {
            LabelMode::ResolveProfiles => {
                let batch = DisplayNameResolver::start_for(
                    form,
                    Arc::clone(&self.source),
                    generation,
                    pending,
                );
                self.set_in_flight(batch.canceller());
                Some(batch)
            }
            LabelMode::Descriptive => None,
        };

        tracing::info!(
            generation,
            option_count,
            selected_count,
            "user selector repopulated"
        );

        Ok(PopulateOutcome {
            generation,
            option_count,
            selected_count,
            resolution,
        })
    }

    /// Run [`populate`](Self::populate) in the background. The handle may be
    /// dropped; the selector is still updated when the fetch completes.
    pub fn spawn(self: &Arc<Self>, form: &SharedForm, selected: Option<Vec<String>>) -> PopulateTask {
        let populator = Arc::clone(self);
        let form = Arc::clone(form);
        tokio::spawn(async move { populator.populate(&form, selected.as_deref()).await })
    }

    fn take_in_flight(&self) -> Option<BatchCanceller> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }

    fn set_in_flight(&self, canceller: BatchCanceller) {
        *self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(canceller);
    }
}
