//! Diagnosis codes and the ordered, duplicate-free list the editor works on.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// A single diagnosis code such as `M54.5`.
///
/// The value is handled opaquely. The only rule is that it is a single
/// non-empty token, so it can round-trip through a whitespace separated
/// command line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code(String);

impl Code {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return Err(ModelError::InvalidCode(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Code {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Code {
    type Error = ModelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.0
    }
}

/// Ordered list of distinct codes.
///
/// Insertion order is kept and the first occurrence of a value wins. Lists
/// are short (one printed page), so membership is a linear scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeList {
    codes: Vec<Code>,
}

impl CodeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `code` unless it is already present.
    ///
    /// Returns `true` when the list changed.
    pub fn add(&mut self, code: Code) -> bool {
        if self.contains(code.as_str()) {
            return false;
        }
        self.codes.push(code);
        true
    }

    /// Removes every occurrence of `code`.
    ///
    /// Returns `true` when the list changed. Removing an absent code is a no-op.
    pub fn remove(&mut self, code: &str) -> bool {
        let before = self.codes.len();
        self.codes.retain(|existing| existing.as_str() != code);
        self.codes.len() != before
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|existing| existing.as_str() == code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Code> {
        self.codes.iter()
    }

    pub fn as_slice(&self) -> &[Code] {
        &self.codes
    }
}

impl FromIterator<Code> for CodeList {
    fn from_iter<I: IntoIterator<Item = Code>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl Extend<Code> for CodeList {
    fn extend<I: IntoIterator<Item = Code>>(&mut self, iter: I) {
        for code in iter {
            self.add(code);
        }
    }
}

impl<'a> IntoIterator for &'a CodeList {
    type Item = &'a Code;
    type IntoIter = std::slice::Iter<'a, Code>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for CodeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, code) in self.codes.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            f.write_str(code.as_str())?;
        }
        Ok(())
    }
}
