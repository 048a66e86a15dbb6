//! The post-creation form.
//!
//! Renders a [`PostForm`] using the element ids the posting page has always
//! used: `visi`, `checkPrivate`, `visibleTo`, and `visibleFor`.

use super::components::html_escape;
use crate::models::{PostForm, UserSelector, Visibility};

fn visibility_select(current: &Visibility) -> String {
    let mut html = String::from(
        r#"<select id="visi" name="visibility" onchange="this.form.submit()">"#,
    );
    for (value, label) in Visibility::CHOICES {
        let selected = if current.as_str() == value { " selected" } else { "" };
        html.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            value, selected, label
        ));
    }
    html.push_str("</select>");
    html
}

fn user_select(selector: &UserSelector) -> String {
    let multiple = if selector.multiple { " multiple" } else { "" };
    let mut html = format!(r#"<select id="visibleFor" name="selected"{}>"#, multiple);
    for opt in &selector.options {
        let selected = if opt.selected { " selected" } else { "" };
        html.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            html_escape(&opt.value),
            selected,
            html_escape(&opt.label)
        ));
    }
    html.push_str("</select>");
    html
}

/// Render the form. `notice` is shown above it, e.g. when the author list
/// could not be loaded.
pub fn render_post_form(form: &PostForm, notice: Option<&str>) -> String {
    let notice_html = notice
        .map(|n| format!(r#"<div class="notice">{}</div>"#, html_escape(n)))
        .unwrap_or_default();

    format!(
        r#"<h1>New Post</h1>
        {notice}
        <form class="post-form" action="/create_post" method="get">
            <div class="form-row">
                <label for="visi">Visibility</label>
                {visibility}
                <input type="hidden" id="checkPrivate" value="{private}">
            </div>
            <div class="form-row" id="visibleTo" style="visibility: {container};">
                <label for="visibleFor">Visible to</label>
                {users}
            </div>
            <div class="form-row">
                <button class="btn" type="submit">Update</button>
            </div>
        </form>"#,
        notice = notice_html,
        visibility = visibility_select(&form.visibility),
        private = form.visibility.is_private(),
        container = form.visible_to.as_css(),
        users = user_select(&form.selector),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContainerVisibility, SelectorOption};

    #[test]
    fn test_hidden_container_by_default() {
        let html = render_post_form(&PostForm::default(), None);
        assert!(html.contains(r#"id="visibleTo" style="visibility: hidden;""#));
        assert!(html.contains(r#"<option value="FRIENDS" selected>Friends</option>"#));
        assert!(html.contains(r#"<select id="visibleFor" name="selected">"#));
        assert!(!html.contains("class=\"notice\""));
    }

    #[test]
    fn test_private_form_renders_selection() {
        let mut form = PostForm {
            visibility: Visibility::Private,
            visible_to: ContainerVisibility::Visible,
            ..PostForm::default()
        };
        form.selector.multiple = true;
        let mut bob = SelectorOption::new("b", "Bob <b>");
        bob.selected = true;
        form.selector
            .replace_options(vec![SelectorOption::new("a", "Alice"), bob]);

        let html = render_post_form(&form, Some("Could not load authors"));
        assert!(html.contains(r#"style="visibility: visible;""#));
        assert!(html.contains(r#"id="checkPrivate" value="true""#));
        assert!(html.contains(r#"<select id="visibleFor" name="selected" multiple>"#));
        assert!(html.contains(r#"<option value="a">Alice</option>"#));
        assert!(html.contains(r#"<option value="b" selected>Bob &lt;b&gt;</option>"#));
        assert!(html.contains("Could not load authors"));
    }

    #[test]
    fn test_every_styled_class_is_rendered() {
        let mut form = PostForm::default();
        form.selector.replace_options(vec![SelectorOption::new("a", "Alice")]);
        let page = crate::templates::base_html(
            "New Post",
            &render_post_form(&form, Some("Could not load authors")),
        );

        let rendered: std::collections::HashSet<&str> = regex::Regex::new(r#"class="([^"]*)""#)
            .unwrap()
            .captures_iter(&page)
            .flat_map(|c| c.get(1).unwrap().as_str().split_whitespace())
            .collect();

        let selector = regex::Regex::new(r"\.([a-z][a-z-]*)").unwrap();
        for c in selector.captures_iter(crate::templates::STYLE) {
            let class = c.get(1).unwrap().as_str();
            assert!(rendered.contains(class), "unused style class: {}", class);
        }
    }
}
