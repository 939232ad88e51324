// ABOUTME: Inline style and class bookkeeping for elements.
// ABOUTME: Applies property/value pairs, vendor-prefixed flex properties, and raw CSS text.

use std::collections::BTreeMap;
use std::fmt;

/// Prefixes written for flexbox properties, unprefixed last
pub const VENDOR_PREFIXES: [&str; 4] = ["-webkit-", "-ms-", "-moz-", ""];

/// Inline style properties of one element, keyed by CSS property name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    props: BTreeMap<String, String>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, prop: impl Into<String>, value: impl ToString) {
        self.props.insert(prop.into(), value.to_string());
    }

    pub fn get(&self, prop: &str) -> Option<&str> {
        self.props.get(prop).map(String::as_str)
    }

    pub fn remove(&mut self, prop: &str) -> Option<String> {
        self.props.remove(prop)
    }

    /// Set a flexbox property along with its vendor-prefixed variants
    pub fn set_prefixed(&mut self, prop: &str, value: impl ToString) {
        let value = value.to_string();
        for prefix in VENDOR_PREFIXES {
            self.props.insert(format!("{}{}", prefix, prop), value.clone());
        }
    }

    pub fn remove_prefixed(&mut self, prop: &str) {
        for prefix in VENDOR_PREFIXES {
            self.props.remove(&format!("{}{}", prefix, prop));
        }
    }

    /// Merge raw `prop: value; prop: value` text, later entries winning
    pub fn merge_css(&mut self, css: &str) {
        for decl in css.split(';') {
            if let Some((prop, value)) = decl.split_once(':') {
                let prop = prop.trim();
                let value = value.trim();
                if !prop.is_empty() {
                    self.props.insert(prop.to_string(), value.to_string());
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (prop, value) in &self.props {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}: {};", prop, value)?;
            first = false;
        }
        Ok(())
    }
}

/// Space-separated class names, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    names: Vec<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all classes with the names in `class_name`
    pub fn set(&mut self, class_name: &str) {
        self.names.clear();
        for name in class_name.split_whitespace() {
            self.add(name);
        }
    }

    pub fn add(&mut self, name: &str) {
        if !self.contains(name) {
            self.names.push(name.to_string());
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.names.retain(|n| n != name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.join(" "))
    }
}
