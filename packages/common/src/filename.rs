/// Reason a client-supplied filename was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameError {
    /// Filename is empty or whitespace-only.
    Empty,
    /// Filename contains path separators (`/` or `\`).
    ContainsPathSeparator,
    /// Filename is `.` or `..`.
    PathTraversal,
    /// Filename contains null bytes.
    NullByte,
    /// Filename starts with a dot (hidden file).
    Hidden,
    /// Filename contains control characters (CR, LF, etc.).
    ControlCharacter,
    /// Filename starts or ends with whitespace.
    SurroundingWhitespace,
}

impl FilenameError {
    /// Returns a human-readable error message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Filename cannot be empty",
            Self::ContainsPathSeparator => "Invalid filename: path separators are not allowed",
            Self::PathTraversal => "Invalid filename: '.' and '..' are not allowed",
            Self::NullByte => "Invalid filename: null bytes are not allowed",
            Self::Hidden => "Invalid filename: hidden files (starting with '.') are not allowed",
            Self::ControlCharacter => "Invalid filename: control characters are not allowed",
            Self::SurroundingWhitespace => {
                "Invalid filename: leading or trailing whitespace is not allowed"
            }
        }
    }
}

impl std::fmt::Display for FilenameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for FilenameError {}

/// Validates a flat filename (no directory components allowed).
///
/// Names are used verbatim, so a name only passes if it resolves to a single
/// entry directly inside the upload directory without any rewriting. Anything
/// that could climb out of it, or address the hidden staging area, does not.
pub fn validate_flat_filename(filename: &str) -> Result<&str, FilenameError> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(FilenameError::Empty);
    }

    if trimmed != filename {
        return Err(FilenameError::SurroundingWhitespace);
    }

    if trimmed.contains('\0') {
        return Err(FilenameError::NullByte);
    }

    // CR/LF would end up in Content-Disposition on download.
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(FilenameError::ControlCharacter);
    }

    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(FilenameError::ContainsPathSeparator);
    }

    if trimmed == "." || trimmed == ".." {
        return Err(FilenameError::PathTraversal);
    }

    if trimmed.starts_with('.') {
        return Err(FilenameError::Hidden);
    }

    Ok(trimmed)
}
