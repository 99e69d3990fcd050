//! Display labels for anatomical parts
//!
//! Maps internal mesh names from the brain asset to the text shown in the
//! floating hover label. A missing entry shows the raw name.

use std::collections::HashMap;

/// Built-in labels for the clinic's brain model.
const DEFAULT_LABELS: &[(&str, &str)] = &[
    ("Brain_Part_04_Colour_Brain_Texture_0", "Hemisfério Esquerdo"),
    ("Brain_Part_06_Colour_Brain_Texture_0", "Hemisfério Direito"),
    ("Brain_Part_02_Colour_Brain_Texture_0", "Cerebelo"),
    ("Brain_Part_05_Colour_Brain_Texture_0", "Tronco Cerebral"),
    ("Brain_Part_01_Colour_Brain_Texture_0", "Glandula Pituitária"),
];

/// Internal mesh name to human-readable label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelTable {
    labels: HashMap<String, String>,
}

impl LabelTable {
    /// An empty table: every lookup falls back to the raw name.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in Portuguese labels.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.extend(
            DEFAULT_LABELS
                .iter()
                .map(|(name, label)| (name.to_string(), label.to_string())),
        );
        table
    }

    /// Add or replace a label.
    pub fn insert(&mut self, name: impl Into<String>, label: impl Into<String>) {
        self.labels.insert(name.into(), label.into());
    }

    /// Add or replace many labels.
    pub fn extend(&mut self, labels: impl IntoIterator<Item = (String, String)>) {
        self.labels.extend(labels);
    }

    /// Mapped label, if any
    pub fn get(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }

    /// Label to display for `name`: the mapped label, or `name` itself.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.get(name).unwrap_or(name)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
