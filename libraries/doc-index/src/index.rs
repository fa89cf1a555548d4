//! Module derivation and filtering.
//!
//! The rules here drive the sidebar grouping of the documentation browser
//! and must not drift: dotted names split on the first `.`, a handful of
//! bare math type names share the `glm` module, everything else is its own
//! module.

use crate::model::DocEntry;

/// Bare names that belong to the shared math module.
const GLM_NAMES: [&str; 6] = ["vec2", "vec3", "vec4", "mat3", "mat4", "vec_base"];

/// Lua primitives and lifecycle hooks that never show up in the browser.
const STOPLIST: [&str; 20] = [
    "LuaLS",
    "boolean",
    "function",
    "integer",
    "nil",
    "number",
    "string",
    "table",
    "thread",
    "userdata",
    "lightuserdata",
    "any",
    "unknown",
    "true",
    "false",
    "metatable",
    "init",
    "frame",
    "event",
    "cleanup",
];

/// Derives the module an entry is grouped under.
#[must_use]
pub fn module_of(name: &str) -> &str {
    if let Some((prefix, _)) = name.split_once('.') {
        return prefix;
    }
    if GLM_NAMES.contains(&name) {
        return "glm";
    }
    name
}

/// Whether an entry is internal or reserved and therefore never rendered.
#[must_use]
pub fn is_hidden(name: &str) -> bool {
    STOPLIST.contains(&name) || name.starts_with('_')
}

/// Sorted, deduplicated module names of all visible entries.
#[must_use]
pub fn modules(entries: &[DocEntry]) -> Vec<String> {
    let mut modules: Vec<String> = entries
        .iter()
        .filter(|entry| !is_hidden(&entry.name))
        .map(|entry| module_of(&entry.name).to_owned())
        .collect();
    modules.sort_unstable();
    modules.dedup();
    modules
}

/// Filters entries by module and search text, preserving source order.
///
/// Applied in order: stoplist/underscore cleaning, module equality on the
/// derived module, then case-insensitive substring search over the entry
/// name and all field names.
#[must_use]
pub fn filter<'entries>(
    entries: &'entries [DocEntry],
    module: Option<&str>,
    search: &str,
) -> Vec<&'entries DocEntry> {
    let needle = search.to_lowercase();
    entries
        .iter()
        .filter(|entry| !is_hidden(&entry.name))
        .filter(|entry| module.map_or(true, |module| module_of(&entry.name) == module))
        .filter(|entry| needle.is_empty() || matches_search(entry, &needle))
        .collect()
}

fn matches_search(entry: &DocEntry, needle: &str) -> bool {
    if entry.name.to_lowercase().contains(needle) {
        return true;
    }
    entry
        .fields
        .iter()
        .any(|field| field.name.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::{filter, is_hidden, module_of, modules};
    use crate::model::{DocEntry, DocField};

    fn entry(name: &str) -> DocEntry {
        DocEntry {
            name: name.to_owned(),
            kind: None,
            view: None,
            defines: Vec::new(),
            fields: Vec::new(),
        }
    }

    fn entry_with_field(name: &str, field: &str) -> DocEntry {
        DocEntry {
            fields: vec![DocField {
                name: field.to_owned(),
                view: None,
                desc: None,
                rawdesc: None,
            }],
            ..entry(name)
        }
    }

    #[test]
    fn dotted_names_split_on_the_first_dot() {
        assert_eq!(module_of("sokol.gfx.begin_pass"), "sokol");
        // the dot split wins over the glm lookup table
        assert_eq!(module_of("vec2.add"), "vec2");
    }

    #[test]
    fn bare_math_names_group_under_glm() {
        for name in ["vec2", "vec3", "vec4", "mat3", "mat4", "vec_base"] {
            assert_eq!(module_of(name), "glm");
        }
        assert_eq!(module_of("imgui"), "imgui");
    }

    #[test]
    fn modules_are_sorted_and_deduplicated() {
        let entries = [
            entry("sokol.gfx"),
            entry("imgui"),
            entry("vec2"),
            entry("mat3"),
            entry("sokol.app"),
        ];
        assert_eq!(modules(&entries), ["glm", "imgui", "sokol"]);
    }

    #[test]
    fn stoplisted_and_underscored_names_are_always_hidden() {
        assert!(is_hidden("nil"));
        assert!(is_hidden("frame"));
        assert!(is_hidden("_private"));
        assert!(!is_hidden("sokol.gfx"));

        let entries = [entry("nil"), entry("_internal"), entry("b2d.world")];
        let visible = filter(&entries, None, "");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible.first().unwrap().name, "b2d.world");

        // hidden entries stay hidden even when they match module and search
        let visible = filter(&entries, Some("nil"), "nil");
        assert!(visible.is_empty());
    }

    #[test]
    fn filtering_is_stable() {
        let entries = [
            entry("sokol.gl"),
            entry("imgui.begin"),
            entry("sokol.app"),
            entry("sokol.audio"),
        ];
        let visible = filter(&entries, Some("sokol"), "");
        let names: Vec<&str> = visible.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, ["sokol.gl", "sokol.app", "sokol.audio"]);
    }

    #[test]
    fn search_matches_field_names_case_insensitively() {
        let entries = [
            entry_with_field("vec2.ops", "Add"),
            entry("imgui.begin"),
        ];
        let visible = filter(&entries, None, "ADD");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible.first().unwrap().name, "vec2.ops");
    }

    #[test]
    fn empty_search_matches_everything() {
        let entries = [entry("imgui.begin"), entry("b2d.world")];
        assert_eq!(filter(&entries, None, "").len(), 2);
    }
}
