//! Reacting to changes of the post visibility control.

use crate::models::{lock_form, ContainerVisibility, SharedForm, Visibility};
use crate::populate::{PopulateTask, UserSelectorPopulator};
use std::sync::Arc;

/// Apply a new value of the `visi` control to the form.
///
/// Choosing `PRIVATE` shows the `visibleTo` container and starts one selector
/// population in the background, keeping `selected` ids selected if they are
/// still offered. Any other value hides the container and starts nothing.
/// The returned task can be awaited or dropped.
pub fn visibility_changed(
    form: &SharedForm,
    value: &str,
    selected: Option<Vec<String>>,
    populator: &Arc<UserSelectorPopulator>,
) -> Option<PopulateTask> {
    let visibility = Visibility::from(value);
    let private = visibility.is_private();

    {
        let mut f = lock_form(form);
        f.visibility = visibility;
        f.visible_to = if private {
            ContainerVisibility::Visible
        } else {
            ContainerVisibility::Hidden
        };
    }

    tracing::debug!(visibility = value, private, "visibility changed");

    if private {
        Some(populator.spawn(form, selected))
    } else {
        None
    }
}
