//! Document attributes and preprocessor conditionals
//!
//! Tracks `:name: value` entries as the scanner walks the document tree,
//! substitutes `{name}` references in directive targets and evaluates
//! `ifdef`/`ifndef` conditions.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::Path;

/// Attribute entry: `:name: value`, `:name!:` or `:!name:`
pub static ATTRIBUTE_ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^:(!?\w[^:]*?):(?:[ \t]+(.*))?$").expect("Invalid ATTRIBUTE_ENTRY_RE regex")
});

/// Attribute reference: `{name}`
static ATTRIBUTE_REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\w[\w-]*)\}").expect("Invalid ATTRIBUTE_REF_RE regex"));

/// Attributes in effect at the current point of the document
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    values: HashMap<String, String>,
}

impl Attributes {
    /// Seed the intrinsic attributes for a root document
    pub fn for_document(path: &Path) -> Self {
        let mut attributes = Self::default();
        attributes.set("empty", "");
        attributes.set("sp", " ");
        if let Some(dir) = path.parent() {
            attributes.set("docdir", &dir.to_string_lossy());
        }
        attributes.set("docfile", &path.to_string_lossy());
        if let Some(stem) = path.file_stem() {
            attributes.set("docname", &stem.to_string_lossy());
        }
        attributes
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_lowercase(), value.to_string());
    }

    pub fn unset(&mut self, name: &str) {
        self.values.remove(&name.to_lowercase());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(&name.to_lowercase())
    }

    /// Apply an attribute entry line. Returns false if the line is not one.
    pub fn apply_entry(&mut self, line: &str) -> bool {
        let Some(caps) = ATTRIBUTE_ENTRY_RE.captures(line) else {
            return false;
        };
        let raw_name = &caps[1];
        let value = caps.get(2).map_or("", |m| m.as_str().trim_end());

        if let Some(name) = raw_name.strip_prefix('!') {
            self.unset(name);
        } else if let Some(name) = raw_name.strip_suffix('!') {
            self.unset(name);
        } else {
            let value = self.substitute_lenient(value);
            self.set(raw_name, &value);
        }
        true
    }

    /// Replace attribute references, failing on the first undefined one
    pub fn substitute(&self, text: &str) -> Result<String, String> {
        let mut missing = None;
        let replaced = ATTRIBUTE_REF_RE.replace_all(text, |caps: &Captures| {
            match self.get(&caps[1]) {
                Some(value) => value.to_string(),
                None => {
                    missing.get_or_insert_with(|| caps[1].to_string());
                    caps[0].to_string()
                }
            }
        });
        match missing {
            Some(name) => Err(name),
            None => Ok(replaced.into_owned()),
        }
    }

    /// Replace attribute references, leaving undefined ones in place
    fn substitute_lenient(&self, text: &str) -> String {
        ATTRIBUTE_REF_RE
            .replace_all(text, |caps: &Captures| {
                self.get(&caps[1])
                    .map_or_else(|| caps[0].to_string(), str::to_string)
            })
            .into_owned()
    }
}

/// Preprocessor conditional directive
pub static CONDITIONAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\\)?(ifdef|ifndef|ifeval|endif)::(\S*?(?:([,+])\S*?)?)\[(.+)?\]$")
        .expect("Invalid CONDITIONAL_RE regex")
});

/// A parsed conditional directive line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conditional<'a> {
    /// Opens a region (or guards a single line when `content` is set)
    Open {
        active: bool,
        content: Option<&'a str>,
    },
    Close,
}

impl<'a> Conditional<'a> {
    /// Parse a conditional directive; escaped directives are plain text
    pub fn parse(line: &'a str, attributes: &Attributes) -> Option<Self> {
        let caps = CONDITIONAL_RE.captures(line)?;
        if caps.get(1).is_some() {
            return None;
        }
        let keyword = caps.get(2)?.as_str();
        let target = caps.get(3).map_or("", |m| m.as_str());
        let content = caps.get(5).map(|m| m.as_str());

        let active = match keyword {
            "endif" => return Some(Conditional::Close),
            // Expressions are not evaluated; the region stays visible
            "ifeval" => true,
            "ifdef" => evaluate(target, caps.get(4).map(|m| m.as_str()), attributes),
            _ => !evaluate(target, caps.get(4).map(|m| m.as_str()), attributes),
        };

        let content = if keyword == "ifeval" { None } else { content };
        Some(Conditional::Open { active, content })
    }
}

/// `,` means any attribute is set, `+` means all are set.
/// `ifndef` excludes its region exactly when this holds.
fn evaluate(target: &str, delimiter: Option<&str>, attributes: &Attributes) -> bool {
    match delimiter {
        Some(",") => target.split(',').any(|name| attributes.is_set(name)),
        Some("+") => target.split('+').all(|name| attributes.is_set(name)),
        _ => attributes.is_set(target),
    }
}

/// Stack of open conditional regions for one document
#[derive(Debug, Default)]
pub struct ConditionalStack {
    frames: Vec<bool>,
}

impl ConditionalStack {
    /// Whether lines at the current position are visible
    pub fn active(&self) -> bool {
        self.frames.iter().all(|active| *active)
    }

    pub fn push(&mut self, active: bool) {
        self.frames.push(active);
    }

    pub fn pop(&mut self) {
        if self.frames.pop().is_none() {
            log::debug!("unmatched endif directive");
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}
