//! Validated text and value types shared across the DocSpot workspace.
//!
//! These wrappers guarantee their invariant at construction time so the rest
//! of the codebase never has to re-check it: a [`NonEmptyText`] always holds
//! at least one non-whitespace character, an [`EmailAddress`] is always a
//! trimmed, lowercased `local@domain` string, and a [`Rating`] always sits
//! inside the 0.0–5.0 marketplace scale.

/// Errors that can occur when constructing validated value types.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// The input text was empty or contained only whitespace.
    #[error("text cannot be empty")]
    EmptyText,
    /// The input was not a plausible email address.
    #[error("invalid email address: '{0}'")]
    InvalidEmail(String),
    /// The rating fell outside the supported 0.0–5.0 scale.
    #[error("rating must be between 0.0 and 5.0, got {0}")]
    RatingOutOfRange(f32),
}

/// A string that is guaranteed to contain at least one non-whitespace
/// character. Input is trimmed during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::EmptyText`] if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TypeError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TypeError::EmptyText);
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
        write!(f, "{}", self.0)
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

/// A normalised email address.
///
/// The email space is the identity key of the marketplace: a customer and a
/// doctor may never share one. Normalising here (trim + lowercase) means
/// uniqueness checks elsewhere are plain string equality.
///
/// Validation is deliberately shallow — one `@` with a non-empty local part
/// and a dotted domain. This is an identity lookup key, not a deliverability
/// check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses and normalises an email address.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::InvalidEmail`] when the input does not look like
    /// `local@domain.tld`.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TypeError> {
        let normalised = input.as_ref().trim().to_ascii_lowercase();

        let invalid = || TypeError::InvalidEmail(input.as_ref().to_owned());

        let (local, domain) = normalised.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(invalid());
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(invalid());
        }
        if normalised.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        Ok(Self(normalised))
    }

    /// Returns the normalised address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for EmailAddress {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EmailAddress::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A doctor rating on the 0.0–5.0 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Rating(f32);

impl Rating {
    /// Creates a new `Rating`.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::RatingOutOfRange`] when `value` is not a finite
    /// number in `0.0..=5.0`.
    pub fn new(value: f32) -> Result<Self, TypeError> {
        if !value.is_finite() || !(0.0..=5.0).contains(&value) {
            return Err(TypeError::RatingOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the rating as a plain `f32`.
    pub fn value(&self) -> f32 {
        self.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl serde::Serialize for Rating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f32(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f32::deserialize(deserializer)?;
        Rating::new(value).map_err(serde::de::Error::custom)
    }
}
