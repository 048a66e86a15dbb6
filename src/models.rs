//! Data models for the posting form.
//!
//! Wire types mirror the JSON payloads served by the author endpoints. Form
//! types model the post-creation page as explicit records so that handlers and
//! background tasks can mutate it without a browser DOM.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

// ============================================================================
// Visibility
// ============================================================================

/// Post visibility as submitted by the `visi` form control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Visibility {
    Public,
    Foaf,
    #[default]
    Friends,
    Private,
    ServerOnly,
    /// Any value the form sends that we don't recognize. Treated as not private.
    Other(String),
}

impl Visibility {
    /// Choices in the order the form offers them, with their human labels.
    pub const CHOICES: [(&'static str, &'static str); 5] = [
        ("PUBLIC", "Public"),
        ("FOAF", "FOAF"),
        ("FRIENDS", "Friends"),
        ("PRIVATE", "Private"),
        ("SERVERONLY", "Server Admins Only"),
    ];

    pub fn is_private(&self) -> bool {
        matches!(self, Visibility::Private)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Visibility::Public => "PUBLIC",
            Visibility::Foaf => "FOAF",
            Visibility::Friends => "FRIENDS",
            Visibility::Private => "PRIVATE",
            Visibility::ServerOnly => "SERVERONLY",
            Visibility::Other(s) => s,
        }
    }
}

impl From<&str> for Visibility {
    fn from(s: &str) -> Self {
        match s {
            "PUBLIC" => Visibility::Public,
            "FOAF" => Visibility::Foaf,
            "FRIENDS" => Visibility::Friends,
            "PRIVATE" => Visibility::Private,
            "SERVERONLY" => Visibility::ServerOnly,
            other => Visibility::Other(other.to_string()),
        }
    }
}

impl FromStr for Visibility {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Visibility::from(s))
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CSS visibility of the `visibleTo` container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerVisibility {
    Visible,
    #[default]
    Hidden,
}

impl ContainerVisibility {
    pub fn as_css(&self) -> &'static str {
        match self {
            ContainerVisibility::Visible => "visible",
            ContainerVisibility::Hidden => "hidden",
        }
    }
}

// ============================================================================
// Author Endpoint Payloads
// ============================================================================

/// One entry of `GET /author`. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorEntry {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorListResponse {
    #[serde(default)]
    pub data: Vec<AuthorEntry>,
}

/// Body of `GET /author/available/`: bare identifiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailableAuthorsResponse {
    #[serde(default)]
    pub data: Vec<String>,
}

/// Body of `GET /author/profile/{uid}`. Only `displayName` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorProfile {
    pub display_name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

// ============================================================================
// User Selector
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectorOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected: false,
        }
    }
}

/// The `visibleFor` multi-select, as an ordered list of option records.
///
/// `generation` increases on every destructive repopulation, which lets late
/// background updates detect that the option they targeted is gone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserSelector {
    pub options: Vec<SelectorOption>,
    pub multiple: bool,
    pub generation: u64,
}

impl UserSelector {
    /// Discard all options and install `options`. Returns the new generation.
    pub fn replace_options(&mut self, options: Vec<SelectorOption>) -> u64 {
        self.options = options;
        self.generation += 1;
        self.generation
    }

    pub fn selected_values(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.clone())
            .collect()
    }

    /// Relabel the option at `index`, but only if it still belongs to
    /// `generation` and still carries `value`. Returns whether it was applied.
    pub fn relabel(&mut self, generation: u64, index: usize, value: &str, label: String) -> bool {
        if self.generation != generation {
            return false;
        }
        match self.options.get_mut(index) {
            Some(opt) if opt.value == value => {
                opt.label = label;
                true
            }
            _ => false,
        }
    }
}

// ============================================================================
// Post Form
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub visibility: Visibility,
    pub visible_to: ContainerVisibility,
    pub selector: UserSelector,
}

pub type SharedForm = Arc<Mutex<PostForm>>;

impl PostForm {
    pub fn shared() -> SharedForm {
        Arc::new(Mutex::new(PostForm::default()))
    }
}

/// Lock the form, recovering the data if a previous holder panicked.
pub fn lock_form(form: &SharedForm) -> MutexGuard<'_, PostForm> {
    form.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ============================================================================
// Image Links
// ============================================================================

/// One accepted markdown image link: its label and the rewritten URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLinkRecord {
    pub label: String,
    pub url: String,
}
