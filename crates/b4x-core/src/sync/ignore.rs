//! Ignore rules read from the project `.gitignore`
//!
//! Every pattern is checked three ways against a `/`-separated relative path,
//! all case-insensitive:
//!
//! - the path ends with the pattern (file names, extensions)
//! - the path starts with the pattern (folders such as `Objects/`)
//! - patterns holding `*` or `?` also match as an anchored wildcard
//!
//! A path is ignored when any check of any pattern matches.

use regex::{Regex, RegexBuilder};

use b4x_fs::{NormalizedPath, io};

use crate::{Error, Result};

/// Content written when the project has no ignore file yet.
pub const DEFAULT_IGNORE_FILE: &str = "# ignore files
*.meta
*.zip

# ignore ALL files in these directories
AutoBackups/
Objects/
";

#[derive(Debug, Clone)]
struct IgnoreRule {
    pattern: String,
    lowered: String,
    wildcard: Option<Regex>,
}

impl IgnoreRule {
    fn new(pattern: &str) -> Result<Self> {
        let wildcard = if pattern.contains('*') || pattern.contains('?') {
            let translated = regex::escape(pattern)
                .replace(r"\*", ".*")
                .replace(r"\?", ".");
            let regex = RegexBuilder::new(&format!("^{translated}$"))
                .case_insensitive(true)
                .build()
                .map_err(|e| Error::InvalidIgnorePattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                })?;
            Some(regex)
        } else {
            None
        };

        Ok(Self {
            pattern: pattern.to_string(),
            lowered: pattern.to_lowercase(),
            wildcard,
        })
    }

    fn matches(&self, lowered_path: &str, path: &str) -> bool {
        lowered_path.ends_with(&self.lowered)
            || lowered_path.starts_with(&self.lowered)
            || self.wildcard.as_ref().is_some_and(|re| re.is_match(path))
    }
}

/// An ordered set of ignore patterns.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    rules: Vec<IgnoreRule>,
}

impl IgnoreRules {
    /// No patterns; nothing is ignored.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build rules from `.gitignore` style lines.
    ///
    /// Lines are trimmed; blank lines and `#` comments are skipped.
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Vec::new();
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            rules.push(IgnoreRule::new(line)?);
        }
        Ok(Self { rules })
    }

    /// Parse the content of an ignore file.
    pub fn parse(content: &str) -> Result<Self> {
        Self::from_lines(content.lines())
    }

    /// Load rules from `path`, writing [`DEFAULT_IGNORE_FILE`] there first
    /// when the file does not exist.
    pub fn load_or_create(path: &NormalizedPath) -> Result<Self> {
        if !path.is_file() {
            tracing::info!(path = %path, "Creating default ignore file");
            io::write_text(path, DEFAULT_IGNORE_FILE)?;
        }
        let content = io::read_text(path)?;
        let rules = Self::parse(&content)?;
        tracing::debug!(path = %path, count = rules.len(), "Loaded ignore rules");
        Ok(rules)
    }

    /// Whether `path` matches any rule. Backslashes are treated as `/`.
    pub fn is_ignored(&self, path: &str) -> bool {
        let path = path.replace('\\', "/");
        let lowered = path.to_lowercase();
        self.rules.iter().any(|rule| rule.matches(&lowered, &path))
    }

    /// The patterns, in file order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.pattern.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
