//! HTML templates and styling for the posting pages.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants
//! - `components` - Escaping, navigation bar, and the base page template
//! - `form` - The post-creation form with its visibility and user selectors

mod components;
mod form;
mod styles;

pub use components::{base_html, html_escape, nav_bar};
pub use form::render_post_form;
pub use styles::STYLE;
