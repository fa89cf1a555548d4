//! HTML rendering of the documentation browser.
//!
//! Rendering is a pure function of `(entries, selected module, search)` and
//! is fully re-derived on every request instead of patching a previous view.
//! Documentation text is arbitrary and may contain markup characters, so
//! everything interpolated goes through [`escape`].

use crate::{
    index::{filter, modules},
    model::{DocEntry, DocField},
};
use std::fmt::Write;

/// Escapes `&`, `<` and `>` so documentation text cannot corrupt the markup.
#[must_use]
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders the sidebar + content layout for the given view state.
#[must_use]
pub fn render(entries: &[DocEntry], selected_module: Option<&str>, search: &str) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"docs-layout\">\n");
    html.push_str(&render_sidebar(entries, selected_module, search));

    html.push_str("<main class=\"docs-content\">\n");
    let visible = filter(entries, selected_module, search);
    if visible.is_empty() {
        html.push_str("<div class=\"no-results\">No results found</div>\n");
    } else {
        for entry in visible {
            html.push_str(&render_entry(entry));
        }
    }
    html.push_str("</main>\n</div>\n");
    html
}

fn render_sidebar(entries: &[DocEntry], selected_module: Option<&str>, search: &str) -> String {
    let mut html = String::new();
    html.push_str("<nav class=\"docs-sidebar\">\n<form method=\"get\">\n");
    let _ = writeln!(
        html,
        "<input type=\"text\" name=\"search\" placeholder=\"Search...\" value=\"{}\" />",
        escape(search)
    );
    html.push_str("</form>\n<div class=\"module-list\">\n");
    for module in modules(entries) {
        let active = selected_module == Some(module.as_str());
        // clicking the active module deselects it
        let href = if active {
            href_for(None, search)
        } else {
            href_for(Some(&module), search)
        };
        let class = if active {
            "module-item active"
        } else {
            "module-item"
        };
        let _ = writeln!(
            html,
            "<a href=\"{href}\" class=\"{class}\">{}</a>",
            escape(&module)
        );
    }
    html.push_str("</div>\n</nav>\n");
    html
}

fn href_for(module: Option<&str>, search: &str) -> String {
    let mut href = String::from("?");
    if let Some(module) = module {
        let _ = write!(href, "module={}&amp;", escape(module));
    }
    let _ = write!(href, "search={}", escape(search));
    href
}

/// Renders a single entry block: name, source file, description, signature
/// and fields.
#[must_use]
pub fn render_entry(entry: &DocEntry) -> String {
    let mut html = String::new();
    let _ = writeln!(
        html,
        "<div class=\"doc-entry\" id=\"{}\">",
        escape(&entry.name)
    );
    let _ = writeln!(html, "<h3>{}</h3>", escape(&entry.name));

    if let Some(file) = entry.source_file() {
        let _ = writeln!(html, "<div class=\"doc-file\">{}</div>", escape(file));
    }
    if let Some(desc) = entry.description() {
        let _ = writeln!(html, "<div class=\"doc-desc\">{}</div>", escape(desc));
    }
    if let Some(view) = &entry.view {
        let _ = writeln!(html, "<pre class=\"doc-type\">{}</pre>", escape(view));
    }

    if !entry.fields.is_empty() {
        html.push_str("<div class=\"doc-fields\">\n");
        for field in &entry.fields {
            html.push_str(&render_field(field));
        }
        html.push_str("</div>\n");
    }

    html.push_str("</div>\n");
    html
}

fn render_field(field: &DocField) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"doc-field\">\n");
    let _ = writeln!(
        html,
        "<span class=\"field-name\">{}</span>",
        escape(&field.name)
    );
    if let Some(view) = &field.view {
        let _ = writeln!(html, "<span class=\"field-type\">{}</span>", escape(view));
    }
    if let Some(desc) = field.description() {
        let _ = writeln!(html, "<div class=\"field-desc\">{}</div>", escape(desc));
    }
    html.push_str("</div>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::{escape, render, render_entry};
    use crate::model::{DocDefine, DocEntry, DocField};

    fn entry(name: &str) -> DocEntry {
        DocEntry {
            name: name.to_owned(),
            kind: None,
            view: None,
            defines: Vec::new(),
            fields: Vec::new(),
        }
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }

    #[test]
    fn entry_markup_is_escaped() {
        let entry = DocEntry {
            view: Some("fun(a: table<string, number>)".to_owned()),
            defines: vec![DocDefine {
                file: None,
                desc: Some("a & b".to_owned()),
                view: None,
            }],
            fields: vec![DocField {
                name: "x".to_owned(),
                view: Some("<number>".to_owned()),
                desc: None,
                rawdesc: None,
            }],
            ..entry("sokol.gfx")
        };
        let html = render_entry(&entry);
        assert!(html.contains("table&lt;string, number&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(html.contains("&lt;number&gt;"));
        assert!(!html.contains("<number>"));
    }

    #[test]
    fn empty_result_renders_the_no_results_notice() {
        let entries = [entry("sokol.gfx")];
        let html = render(&entries, None, "definitely-absent");
        assert!(html.contains("No results found"));
    }

    #[test]
    fn selected_module_is_marked_active() {
        let entries = [entry("sokol.gfx"), entry("imgui.begin")];
        let html = render(&entries, Some("sokol"), "");
        assert!(html.contains("module-item active"));
        assert!(html.contains("sokol.gfx"));
        assert!(!html.contains("imgui.begin"), "other modules are filtered out");
    }
}
