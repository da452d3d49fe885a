//! Section-scoped key/value store for layered INI configuration.

use super::layer_io::ParsedLayer;

/// Name used for keys that appear before any section header.
const DEFAULT_SECTION: &str = "DEFAULT";

/// Merged view of the base file and all drop-in layers.
///
/// Keys are identified by `(section, key)`, case-sensitively. Applying a
/// layer overrides only the keys it defines; everything else is kept.
/// Sections and keys keep their first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedConfig {
    sections: Vec<MergedSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MergedSection {
    name: String,
    entries: Vec<(String, String)>,
}

impl MergedConfig {
    /// Value for `key` in `section`, if any layer defined it.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?
            .entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Whether any layer defined `key` in `section`, even with an empty value.
    pub fn has_key(&self, section: &str, key: &str) -> bool {
        self.get(section, key).is_some()
    }

    /// Section names in first-appearance order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.name.as_str())
    }

    /// `(key, value)` pairs of `section`, empty if the section is absent.
    pub fn entries<'a>(&'a self, section: &str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.section(section)
            .into_iter()
            .flat_map(|section| section.entries.iter())
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Override keys with the values of a parsed layer.
    pub(super) fn apply(&mut self, layer: &ParsedLayer) {
        for (section, key, value) in layer.entries() {
            self.set(section.unwrap_or(DEFAULT_SECTION), key, value);
        }
    }

    pub(super) fn set(&mut self, section: &str, key: &str, value: &str) {
        let index = match self.sections.iter().position(|s| s.name == section) {
            Some(index) => index,
            None => {
                self.sections.push(MergedSection {
                    name: section.to_string(),
                    entries: Vec::new(),
                });
                self.sections.len() - 1
            }
        };
        let entries = &mut self.sections[index].entries;
        match entries.iter_mut().find(|(name, _)| name == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => entries.push((key.to_string(), value.to_string())),
        }
    }

    fn section(&self, name: &str) -> Option<&MergedSection> {
        self.sections.iter().find(|section| section.name == name)
    }
}
