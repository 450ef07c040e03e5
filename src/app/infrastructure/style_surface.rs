use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Destination for resolved style variables (a document root, a stylesheet,
/// a widget toolkit's color table).
pub trait StyleSurface {
    fn set_property(&mut self, name: &str, value: &str);
    fn set_attribute(&mut self, name: &str, value: &str);
}

/// In-memory surface that can be rendered to CSS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    properties: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    writes: usize,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Total number of property writes seen, including overwrites.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Render as a `:root` rule, keyed on the current attributes.
    pub fn to_css(&self) -> String {
        let mut selector = String::from(":root");
        for (name, value) in &self.attributes {
            let _ = write!(selector, "[{}=\"{}\"]", name, value);
        }

        let mut css = format!("{} {{\n", selector);
        for (name, value) in &self.properties {
            let _ = writeln!(css, "  {}: {};", name, value);
        }
        css.push_str("}\n");
        css
    }
}

impl StyleSurface for StyleSheet {
    fn set_property(&mut self, name: &str, value: &str) {
        self.writes += 1;
        self.properties.insert(name.to_string(), value.to_string());
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }
}
