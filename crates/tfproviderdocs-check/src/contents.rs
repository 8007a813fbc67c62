//! Attribute lists in document bodies, and their comparison to the schema.
//!
//! Grammar for the top-level attribute list of a section:
//!
//! ```text
//! ## Argument Reference            <- section start (level 2 heading)
//!
//! The following arguments are supported:
//!
//! * `name` - (Required) ...        <- collected
//!   * `nested` - ...               <- indented, skipped
//! * `tags` - (Optional) ...        <- collected
//!
//! The `timeouts` block supports:   <- paragraph after the list ends collection
//!
//! * `create` - ...                 <- later list, skipped
//!
//! ### nested_block                 <- subsection, skipped
//! ```
//!
//! Nested block arguments are documented in later lists or subsections,
//! which matches the schema's top-level granularity (attributes plus block
//! type names).

use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

/// Section of a document an attribute was listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentSection {
    Arguments,
    Attributes,
}

impl ContentSection {
    pub fn heading(self) -> &'static str {
        match self {
            Self::Arguments => "Argument Reference",
            Self::Attributes => "Attributes Reference",
        }
    }

    fn from_heading(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "argument reference" | "arguments reference" => Some(Self::Arguments),
            "attribute reference" | "attributes reference" => Some(Self::Attributes),
            _ => None,
        }
    }
}

/// Attribute names in the order they appear in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentAttributes {
    entries: Vec<(ContentSection, String)>,
}

impl ContentAttributes {
    /// A single-section list, mostly useful for callers that already hold
    /// extracted names.
    pub fn new<I, S>(section: ContentSection, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: names
                .into_iter()
                .map(|name| (section, name.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, section: ContentSection, name: impl Into<String>) {
        self.entries.push((section, name.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, name)| name.as_str())
    }

    pub fn section(&self, section: ContentSection) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(entry_section, _)| *entry_section == section)
            .map(|(_, name)| name.as_str())
            .collect()
    }

    pub fn name_set(&self) -> BTreeSet<&str> {
        self.names().collect()
    }
}

fn list_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[*+-]\s+(.*)$").expect("list item regex must compile")
    })
}

fn attribute_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^`([^`\s]+)`").expect("attribute name regex must compile")
    })
}

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(#{1,6})\s+(.*?)\s*#*\s*$").expect("heading regex must compile")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListState {
    Before,
    Inside,
    Done,
}

/// Collect top-level attribute names from the argument and attribute
/// reference sections of `body`. Missing sections yield nothing.
pub fn extract_content_attributes(body: &str) -> ContentAttributes {
    let mut attributes = ContentAttributes::default();
    let mut section: Option<ContentSection> = None;
    let mut state = ListState::Before;
    let mut fence: Option<&str> = None;

    for line in body.lines() {
        let trimmed = line.trim_start();

        if let Some(marker) = fence {
            if trimmed.starts_with(marker) {
                fence = None;
            }
            continue;
        }
        if let Some(marker) = ["```", "~~~"]
            .into_iter()
            .find(|marker| trimmed.starts_with(marker))
        {
            fence = Some(marker);
            if state == ListState::Inside && !line.starts_with(char::is_whitespace) {
                state = ListState::Done;
            }
            continue;
        }

        if let Some(captures) = heading_re().captures(line) {
            let level = captures.get(1).map_or(0, |m| m.as_str().len());
            let text = captures.get(2).map_or("", |m| m.as_str());
            if level <= 2 {
                section = ContentSection::from_heading(text);
                state = ListState::Before;
            } else {
                state = ListState::Done;
            }
            continue;
        }

        let Some(current) = section else {
            continue;
        };
        if state == ListState::Done || line.trim().is_empty() {
            continue;
        }
        if line.starts_with(char::is_whitespace) {
            // Continuation or nested item.
            continue;
        }

        match list_item_re().captures(line) {
            Some(captures) => {
                state = ListState::Inside;
                let text = captures.get(1).map_or("", |m| m.as_str());
                if let Some(name) = attribute_name_re()
                    .captures(text)
                    .and_then(|name| name.get(1))
                {
                    attributes.push(current, name.as_str());
                }
            }
            None if state == ListState::Inside => state = ListState::Done,
            None => {}
        }
    }

    attributes
}

/// One disagreement between documented attributes and the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentsViolation {
    /// Documented, but the schema does not declare it.
    NotInSchema { name: String },
    /// Declared by the schema, but not documented.
    NotDocumented { name: String },
    /// Adjacent names within one section out of ascending order.
    Unordered {
        section: ContentSection,
        previous: String,
        next: String,
    },
}

impl ContentsViolation {
    pub fn is_ordering(&self) -> bool {
        matches!(self, Self::Unordered { .. })
    }
}

impl fmt::Display for ContentsViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInSchema { name } => {
                write!(f, "attribute `{name}` is documented but not in the schema")
            }
            Self::NotDocumented { name } => {
                write!(f, "schema attribute `{name}` is missing from the documentation")
            }
            Self::Unordered {
                section,
                previous,
                next,
            } => write!(
                f,
                "{} attributes out of order: `{previous}` is listed before `{next}`",
                section.heading()
            ),
        }
    }
}

/// Compare extracted names with the schema's attribute set, optionally
/// requiring each section to be in strictly ascending order.
pub fn check_contents(
    attributes: &ContentAttributes,
    schema: &BTreeSet<String>,
    require_ordering: bool,
) -> Vec<ContentsViolation> {
    let documented = attributes.name_set();
    let mut violations: Vec<ContentsViolation> = documented
        .iter()
        .filter(|name| !schema.contains(**name))
        .map(|name| ContentsViolation::NotInSchema {
            name: name.to_string(),
        })
        .collect();
    violations.extend(
        schema
            .iter()
            .filter(|name| !documented.contains(name.as_str()))
            .map(|name| ContentsViolation::NotDocumented { name: name.clone() }),
    );

    if require_ordering {
        for section in [ContentSection::Arguments, ContentSection::Attributes] {
            let names = attributes.section(section);
            for pair in names.windows(2) {
                if pair[0] >= pair[1] {
                    violations.push(ContentsViolation::Unordered {
                        section,
                        previous: pair[0].to_string(),
                        next: pair[1].to_string(),
                    });
                }
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    const RESOURCE_BODY: &str = r#"
# Resource: example_thing

Manages a thing.

## Example Usage

```terraform
# Argument Reference
resource "example_thing" "test" {
  name = "example"
}
```

## Argument Reference

The following arguments are supported:

* `name` - (Required) Name of the thing.
* `settings` - (Optional) Settings block.
  * `level` - (Optional) Nested argument.
    continuation line
* `tags` - (Optional) Map of tags.

The `settings` block supports:

* `mode` - (Optional) Mode.

### timeouts

* `create` - (Default `10m`)

## Attributes Reference

In addition to all arguments above, the following attributes are exported:

* `arn` - ARN of the thing.
* `id` - Identifier of the thing.

## Import

Things can be imported using the `id`.
"#;

    #[test]
    fn extract_collects_top_level_names_in_order() {
        let attributes = extract_content_attributes(RESOURCE_BODY);
        assert_eq!(
            attributes.names().collect::<Vec<_>>(),
            vec!["name", "settings", "tags", "arn", "id"]
        );
        assert_eq!(
            attributes.section(ContentSection::Attributes),
            vec!["arn", "id"]
        );
    }

    #[test]
    fn extract_without_sections_is_empty() {
        let attributes = extract_content_attributes("# Guide\n\n* `not` - an attribute list\n");
        assert!(attributes.is_empty());
    }

    #[test]
    fn extract_skips_items_without_backticked_names() {
        let body = "## Arguments Reference\n\n* plain text item\n- `id` - identifier\n";
        let attributes = extract_content_attributes(body);
        assert_eq!(attributes.names().collect::<Vec<_>>(), vec!["id"]);
    }

    #[test]
    fn missing_schema_attribute_is_reported() {
        let attributes = ContentAttributes::new(ContentSection::Arguments, ["id", "name"]);
        let violations = check_contents(&attributes, &schema(&["id", "name", "size"]), false);
        assert_eq!(
            violations,
            vec![ContentsViolation::NotDocumented {
                name: "size".to_string()
            }]
        );
    }

    #[test]
    fn undocumented_schema_name_and_extra_name_are_reported() {
        let attributes = ContentAttributes::new(ContentSection::Arguments, ["id", "bogus"]);
        let violations = check_contents(&attributes, &schema(&["id"]), false);
        assert_eq!(
            violations,
            vec![ContentsViolation::NotInSchema {
                name: "bogus".to_string()
            }]
        );
    }

    #[test]
    fn unordered_complete_list_reports_one_ordering_violation() {
        let attributes = ContentAttributes::new(ContentSection::Arguments, ["name", "id"]);
        let violations = check_contents(&attributes, &schema(&["id", "name"]), true);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].is_ordering());
        assert_eq!(
            violations[0].to_string(),
            "Argument Reference attributes out of order: `name` is listed before `id`"
        );
    }

    #[test]
    fn ordering_is_judged_per_section() {
        let attributes = extract_content_attributes(RESOURCE_BODY);
        let violations = check_contents(
            &attributes,
            &schema(&["arn", "id", "name", "settings", "tags"]),
            true,
        );
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn ordering_is_not_checked_unless_requested() {
        let attributes = ContentAttributes::new(ContentSection::Arguments, ["name", "id"]);
        assert!(check_contents(&attributes, &schema(&["id", "name"]), false).is_empty());
    }
}
