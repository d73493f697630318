use std::fmt;
use std::path::{Path, PathBuf};

const DIRECTIVE_PREFIX: &str = "gazelle:";

/// A `# gazelle:key value` comment found in a build file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub key: String,
    pub value: String,
    /// 1-based line in the build file, 0 when not read from a file.
    pub line: usize,
}

impl Directive {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            line: 0,
        }
    }

    /// Parses a single line, returning `None` if it is not a directive comment.
    pub fn parse_line(line: &str) -> Option<Self> {
        let comment = line.trim().strip_prefix('#')?;
        let body = comment.trim_start().strip_prefix(DIRECTIVE_PREFIX)?;
        let (key, value) = match body.find(char::is_whitespace) {
            Some(idx) => (&body[..idx], body[idx..].trim()),
            None => (body, ""),
        };
        if key.is_empty() {
            return None;
        }
        Some(Self::new(key, value))
    }
}

/// The directives declared in one directory's build file, in file order.
#[derive(Debug, Clone, Default)]
pub struct BuildFile {
    pub path: PathBuf,
    pub directives: Vec<Directive>,
}

impl BuildFile {
    pub fn parse(path: &Path, content: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            directives: content
                .lines()
                .enumerate()
                .filter_map(|(idx, line)| {
                    Directive::parse_line(line).map(|d| Directive { line: idx + 1, ..d })
                })
                .collect(),
        }
    }
}

/// A directive that was skipped because its arguments were malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub key: String,
    pub value: String,
    pub line: usize,
    pub reason: String,
}

impl Diagnostic {
    pub fn new(directive: &Directive, reason: impl Into<String>) -> Self {
        Self {
            key: directive.key.clone(),
            value: directive.value.clone(),
            line: directive.line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "line {}: ", self.line)?;
        }
        write!(f, "`{} {}`: {}", self.key, self.value, self.reason)
    }
}

/// Boolean spellings accepted by directive arguments.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
