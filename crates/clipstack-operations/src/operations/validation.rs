use clipstack_core::CoreError;

/// A single rejected input field, with an actionable tip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text missing or only whitespace
    Blank { field: &'static str },
    /// Text longer than the column allows
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    /// Value outside its enumerated or formatted domain
    Invalid {
        field: &'static str,
        source: CoreError,
    },
    /// Avatar whose content type is not `image/*`
    NotAnImage { content_type: String },
    /// Uploaded file with no bytes
    EmptyFile { field: &'static str },
    /// Uploaded file above the configured limit
    FileTooLarge {
        field: &'static str,
        size: u64,
        max: u64,
    },
    /// Numeric metadata that must be positive
    NotPositive { field: &'static str },
    /// Partial update carrying no fields at all
    NoFieldsProvided,
}

impl ValidationError {
    /// Returns an actionable tip for resolving this error.
    #[must_use]
    pub fn tip(&self) -> String {
        match self {
            Self::Blank { field } => format!("Provide a non-empty value for `{field}`"),
            Self::TooLong { field, max, .. } => {
                format!("Shorten `{field}` to at most {max} characters")
            }
            Self::Invalid { source, .. } => match source {
                CoreError::InvalidGender(_) => "Use one of: male, female, other".to_string(),
                CoreError::InvalidBirthday { .. } => {
                    "Write the date as YYYY-MM-DD, for example 1990-05-13".to_string()
                }
                CoreError::InvalidPrivacy(_) => "Use one of: public, private".to_string(),
                CoreError::InvalidVisibility(_) => {
                    "Use one of: public, friends, private, unlisted".to_string()
                }
                _ => "Check the value and try again".to_string(),
            },
            Self::NotAnImage { .. } => {
                "Upload a PNG, JPEG, GIF or WebP image as the avatar".to_string()
            }
            Self::EmptyFile { field } => format!("Attach a non-empty file for `{field}`"),
            Self::FileTooLarge { max, .. } => format!("Upload a file of at most {max} bytes"),
            Self::NotPositive { field } => format!("Set `{field}` to a number above zero"),
            Self::NoFieldsProvided => "Pass at least one setting to change".to_string(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank { field } => write!(f, "`{field}` is required"),
            Self::TooLong { field, max, actual } => {
                write!(f, "`{field}` is {actual} characters long (max {max})")
            }
            Self::Invalid { field, source } => write!(f, "`{field}`: {source}"),
            Self::NotAnImage { content_type } => {
                write!(f, "avatar must be an image, got '{content_type}'")
            }
            Self::EmptyFile { field } => write!(f, "`{field}` is empty"),
            Self::FileTooLarge { field, size, max } => {
                write!(f, "`{field}` is {size} bytes (max {max})")
            }
            Self::NotPositive { field } => write!(f, "`{field}` must be greater than zero"),
            Self::NoFieldsProvided => write!(f, "no valid fields provided"),
        }
    }
}

/// Collection of validation errors (guaranteed non-empty when constructed).
#[derive(Debug)]
#[allow(clippy::len_without_is_empty)]
pub struct ValidationErrors {
    first: ValidationError,
    rest: Vec<ValidationError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn try_from_vec(mut errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        let first = errors.remove(0);
        Some(Self {
            first,
            rest: errors,
        })
    }

    #[must_use]
    pub fn single(error: ValidationError) -> Self {
        Self {
            first: error,
            rest: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<ValidationError> {
        let mut errors = vec![self.first];
        errors.extend(self.rest);
        errors
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} problem(s) with the request:", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {error}", i + 1)?;
            writeln!(f, "     Tip: {}", error.tip())?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

/// Accumulates errors while validating, so the caller sees every problem at once.
#[derive(Debug, Default)]
pub(crate) struct ValidationErrorCollector {
    errors: Vec<ValidationError>,
}

impl ValidationErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Records a blank or overlong field. Returns the trimmed value when it passed.
    pub fn text<'a>(
        &mut self,
        field: &'static str,
        value: &'a str,
        max: Option<usize>,
    ) -> Option<&'a str> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(ValidationError::Blank { field });
            return None;
        }
        if let Some(max) = max {
            let actual = trimmed.chars().count();
            if actual > max {
                self.push(ValidationError::TooLong { field, max, actual });
                return None;
            }
        }
        Some(trimmed)
    }

    /// Records a parse failure from a domain type.
    pub fn parsed<T>(&mut self, field: &'static str, result: Result<T, CoreError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(source) => {
                self.push(ValidationError::Invalid { field, source });
                None
            }
        }
    }

    pub fn positive<T: Default + PartialOrd>(&mut self, field: &'static str, value: T) {
        if value <= T::default() {
            self.push(ValidationError::NotPositive { field });
        }
    }

    pub fn file(&mut self, field: &'static str, size: u64, max: u64) {
        if size == 0 {
            self.push(ValidationError::EmptyFile { field });
        } else if size > max {
            self.push(ValidationError::FileTooLarge { field, size, max });
        }
    }

    pub fn into_errors(self) -> Option<ValidationErrors> {
        ValidationErrors::try_from_vec(self.errors)
    }
}
