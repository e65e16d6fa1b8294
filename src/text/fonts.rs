use crate::foundation::error::{SlideforgeError, SlideforgeResult};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A registered typeface: raw font-file bytes shared across render workers.
#[derive(Clone)]
pub struct FontFace {
    family: String,
    bytes: Arc<Vec<u8>>,
}

impl FontFace {
    /// Family name the face was registered under.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Raw font-file bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

/// Registry mapping family names to font bytes.
///
/// The registry is populated at the boundary (CLI, host UI, tests); the
/// render path itself never touches the filesystem. Cloning is cheap: font
/// bytes are shared.
#[derive(Clone, Debug, Default)]
pub struct FontLibrary {
    faces: BTreeMap<String, FontFace>,
}

impl FontLibrary {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a typeface under `family`, replacing any existing entry.
    pub fn register(&mut self, family: impl Into<String>, bytes: Vec<u8>) {
        let family = family.into();
        self.faces.insert(
            family.clone(),
            FontFace {
                family,
                bytes: Arc::new(bytes),
            },
        );
    }

    /// Resolve a family registered earlier.
    pub fn resolve(&self, family: &str) -> SlideforgeResult<&FontFace> {
        self.faces.get(family).ok_or_else(|| {
            SlideforgeError::validation(format!("unknown font family '{family}'"))
        })
    }

    /// Number of registered faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Return `true` when no faces are registered.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Iterate over the registered family names, in sorted order.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.faces.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
