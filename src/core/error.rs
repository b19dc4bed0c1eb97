//! Purpose: Closed error taxonomy for attribute-value transformation and the CLI around it.
//! Exports: `ErrorKind`, `Error`, `to_exit_code`.
//! Role: Every fallible path in the crate reports through this one type.
//! Invariants: Kinds carry no payload; context (path, tag, message) is optional decoration.
//! Invariants: Exit code mapping is stable once published.
use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The value is not the expected carrier type, or no usable tag was found.
    InvalidData,
    /// The value is empty after trimming, or an aggregate has no surviving entries.
    EmptyData,
    /// The tag key is present but not one of the recognized tags.
    InvalidType,
    /// A number payload is not a valid base-10 float.
    Parse,
    /// Input nesting exceeds the configured depth.
    DepthLimit,
    Usage,
    Io,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidData => "invalid-data",
            ErrorKind::EmptyData => "empty-data",
            ErrorKind::InvalidType => "invalid-type",
            ErrorKind::Parse => "parse",
            ErrorKind::DepthLimit => "depth-limit",
            ErrorKind::Usage => "usage",
            ErrorKind::Io => "io",
        }
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    path: Option<String>,
    tag: Option<String>,
    hint: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            path: None,
            tag: None,
            hint: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches the attribute path, keeping the innermost one if already set.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        if self.path.is_none() {
            self.path = Some(path.into());
        }
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(tag) = &self.tag {
            write!(f, " (tag: {tag})")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {path})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Usage => 2,
        ErrorKind::Io => 3,
        ErrorKind::InvalidData => 4,
        ErrorKind::EmptyData => 5,
        ErrorKind::InvalidType => 6,
        ErrorKind::Parse => 7,
        ErrorKind::DepthLimit => 8,
    }
}
