use regex::bytes::Regex;

use super::error::ConfigError;

/// Any single byte that is not an ASCII letter or digit, or the edge of the input.
const LEFT_BOUNDARY: &str = r"(?-u:(?:^|[^a-zA-Z0-9]))";
const RIGHT_BOUNDARY: &str = r"(?-u:(?:$|[^a-zA-Z0-9]))";

/// A crude implicit-dependency rule: if `token` appears in a source file as a
/// standalone word, `label` is added to the generated rule's deps.
#[derive(Debug, Clone)]
pub struct GrepExtern {
    token: String,
    label: String,
    pattern: Regex,
}

impl GrepExtern {
    pub fn new(token: &str, label: &str) -> Result<Self, ConfigError> {
        if token.is_empty() {
            return Err(ConfigError::EmptyToken(label.to_string()));
        }
        let source = format!("{LEFT_BOUNDARY}{}{RIGHT_BOUNDARY}", regex::escape(token));
        let pattern = Regex::new(&source)?;
        Ok(Self {
            token: token.to_string(),
            label: label.to_string(),
            pattern,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Reports whether the token occurs in `content` with no ASCII
    /// alphanumeric byte directly before or after it.
    pub fn matches(&self, content: &[u8]) -> bool {
        self.pattern.is_match(content)
    }
}

impl PartialEq for GrepExtern {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token && self.label == other.label
    }
}

impl Eq for GrepExtern {}
