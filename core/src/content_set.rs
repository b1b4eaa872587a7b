use std::fmt;

pub const CONTENT_SET_MAX_LEN: usize = 96;

pub fn is_valid_content_set_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '-' | '_' | '.')
}

/// Identifies which folder's layout is being addressed. Used verbatim in
/// document paths and cache keys, so separators are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentSetId(String);

impl ContentSetId {
    pub fn parse(value: &str) -> Result<Self, ContentSetIdError> {
        if value.is_empty() {
            return Err(ContentSetIdError::Empty);
        }
        let len = value.chars().count();
        if len > CONTENT_SET_MAX_LEN {
            return Err(ContentSetIdError::TooLong {
                max: CONTENT_SET_MAX_LEN,
                found: len,
            });
        }
        if value.starts_with('.') {
            return Err(ContentSetIdError::InvalidCharacter { ch: '.', index: 0 });
        }
        for (idx, ch) in value.chars().enumerate() {
            if !is_valid_content_set_char(ch) {
                return Err(ContentSetIdError::InvalidCharacter { ch, index: idx });
            }
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human title for a folder slug: separators become spaces and each
    /// word is capitalized.
    pub fn title(&self) -> String {
        self.0
            .split(['-', '_'])
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ContentSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ContentSetId {
    type Err = ContentSetIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSetIdError {
    Empty,
    TooLong { max: usize, found: usize },
    InvalidCharacter { ch: char, index: usize },
}

impl fmt::Display for ContentSetIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSetIdError::Empty => write!(f, "content set id must not be empty"),
            ContentSetIdError::TooLong { max, found } => {
                write!(f, "content set id must be at most {max} chars, got {found}")
            }
            ContentSetIdError::InvalidCharacter { ch, index } => {
                write!(f, "invalid character '{ch}' at position {index}")
            }
        }
    }
}

impl std::error::Error for ContentSetIdError {}
