//! YAML front matter: parsing and subcategory rules.

use serde_yaml::{Mapping, Value};
use std::collections::BTreeSet;

const FRONT_MATTER_DELIMITER: &str = "---";

/// Recognized front matter keys of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub subcategory: Option<String>,
    pub page_title: Option<String>,
    pub description: Option<String>,
    pub layout: Option<String>,
    pub sidebar_current: Option<String>,
}

impl FrontMatter {
    pub fn has_title(&self) -> bool {
        self.page_title.is_some()
    }

    pub fn has_description(&self) -> bool {
        self.description.is_some()
    }

    fn from_mapping(mapping: &Mapping) -> Self {
        let field = |key: &str| mapping.get(key).and_then(scalar_string);
        Self {
            subcategory: field("subcategory"),
            page_title: field("page_title"),
            description: field("description"),
            layout: field("layout"),
            sidebar_current: field("sidebar_current"),
        }
    }
}

/// A document split into front matter and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument<'a> {
    pub front_matter: FrontMatter,
    pub body: &'a str,
    /// Why the leading block was discarded, when it was present but unusable.
    pub malformed: Option<String>,
}

/// Split the leading `---` delimited block off `document`.
///
/// Absent or malformed front matter yields default (all unset) fields.
pub fn parse_document(document: &str) -> ParsedDocument<'_> {
    let text = document.strip_prefix('\u{feff}').unwrap_or(document);
    let unparsed = |malformed: Option<String>| ParsedDocument {
        front_matter: FrontMatter::default(),
        body: text,
        malformed,
    };

    let Some(first_line_end) = text.find('\n') else {
        return unparsed(None);
    };
    if text[..first_line_end].trim_end() != FRONT_MATTER_DELIMITER {
        return unparsed(None);
    }

    let mut offset = first_line_end + 1;
    let mut closing = None;
    for line in text[offset..].split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_DELIMITER {
            closing = Some((offset, offset + line.len()));
            break;
        }
        offset += line.len();
    }
    let Some((raw_end, body_start)) = closing else {
        return unparsed(Some("missing closing front matter delimiter".to_string()));
    };

    let raw = &text[first_line_end + 1..raw_end];
    let front_matter = match serde_yaml::from_str::<Value>(raw) {
        Ok(Value::Mapping(mapping)) => FrontMatter::from_mapping(&mapping),
        Ok(Value::Null) => FrontMatter::default(),
        Ok(_) => {
            return unparsed(Some("front matter is not a YAML mapping".to_string()));
        }
        Err(err) => return unparsed(Some(format!("error parsing YAML front matter: {err}"))),
    };

    ParsedDocument {
        front_matter,
        body: &text[body_start..],
        malformed: None,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => return None,
    };
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Front matter requirements for one document category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatterRules {
    /// Empty means any subcategory is accepted.
    pub allowed_subcategories: BTreeSet<String>,
    pub require_subcategory: bool,
    /// Reject `layout` and `sidebar_current`, which only legacy sites use.
    pub forbid_legacy_keys: bool,
}

impl FrontMatterRules {
    pub fn check(&self, front_matter: &FrontMatter) -> Vec<String> {
        let mut violations = Vec::new();

        match front_matter.subcategory.as_deref() {
            None if self.require_subcategory => {
                violations.push("missing required front matter subcategory".to_string());
            }
            Some(subcategory)
                if !self.allowed_subcategories.is_empty()
                    && !self.allowed_subcategories.contains(subcategory) =>
            {
                violations.push(format!(
                    "front matter subcategory {subcategory:?} is not allowed, expected one of: {}",
                    self.allowed_subcategories
                        .iter()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
            }
            _ => {}
        }

        if self.forbid_legacy_keys {
            if front_matter.layout.is_some() {
                violations.push("front matter `layout` is not valid for registry documentation".to_string());
            }
            if front_matter.sidebar_current.is_some() {
                violations.push(
                    "front matter `sidebar_current` is not valid for registry documentation"
                        .to_string(),
                );
            }
        }

        violations
    }
}
