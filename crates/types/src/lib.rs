//! # MediMind Types
//!
//! Small validated value types shared by the diagnostics crates.
//!
//! - [`NonEmptyText`]: trimmed text with at least one non-whitespace character
//! - [`SymptomTag`]: a staged symptom label, compared by exact (case-sensitive) text

/// Errors that can occur when creating validated text types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction, so two
/// values built from `" Fever"` and `"Fever "` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Empty`] if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A symptom label staged for analysis.
///
/// Construction trims the input. Equality is exact text equality, so `"fever"` and `"Fever"`
/// are distinct tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SymptomTag(NonEmptyText);

impl SymptomTag {
    /// Creates a tag from free text typed by the user.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Empty`] if the text is blank after trimming.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        NonEmptyText::new(input).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for SymptomTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for SymptomTag {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq<str> for SymptomTag {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_text_trims_input() {
        let text = NonEmptyText::new("  chest pain \n").unwrap();
        assert_eq!(text.as_str(), "chest pain");
    }

    #[test]
    fn test_non_empty_text_rejects_whitespace() {
        assert_eq!(NonEmptyText::new("   \t"), Err(TextError::Empty));
        assert_eq!(NonEmptyText::new(""), Err(TextError::Empty));
    }

    #[test]
    fn test_non_empty_text_deserialize_rejects_blank() {
        let ok: NonEmptyText = serde_json::from_str("\" Cough \"").unwrap();
        assert_eq!(ok.as_str(), "Cough");

        let err = serde_json::from_str::<NonEmptyText>("\"  \"");
        assert!(err.is_err());
    }

    #[test]
    fn test_symptom_tag_equality_is_case_sensitive() {
        let upper = SymptomTag::new("Fever").unwrap();
        let lower = SymptomTag::new("fever").unwrap();
        let padded = SymptomTag::new("  Fever ").unwrap();

        assert_ne!(upper, lower);
        assert_eq!(upper, padded);
        assert!(upper == *"Fever");
    }

    #[test]
    fn test_symptom_tag_serializes_as_plain_string() {
        let tags = vec![
            SymptomTag::new("Headache").unwrap(),
            SymptomTag::new("Fever").unwrap(),
        ];
        let json = serde_json::to_string(&tags).unwrap();
        assert_eq!(json, r#"["Headache","Fever"]"#);
    }
}
