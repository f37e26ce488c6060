use gantry_core::{GantryError, GantryResult};
use regex::Regex;

/// Regex line filter applied to motion scripts before parsing.
///
/// A line passes when it matches every configured pattern; `negate`
/// inverts that decision. With no patterns every line passes, so
/// `negate` on its own suppresses the whole script.
#[derive(Debug)]
pub struct LineFilter {
    patterns: Vec<Regex>,
    negate: bool,
}

impl LineFilter {
    pub fn new(patterns: &[String], negate: bool) -> GantryResult<Self> {
        let mut compiled = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let regex = Regex::new(pattern).map_err(|e| {
                GantryError::Validation(format!("invalid pattern '{}': {}", pattern, e))
            })?;
            compiled.push(regex);
        }
        Ok(Self {
            patterns: compiled,
            negate,
        })
    }

    /// Build a filter from CLI arguments, or `None` when there is
    /// nothing to apply.
    pub fn from_args(patterns: &[String], negate: bool) -> GantryResult<Option<Self>> {
        if patterns.is_empty() && !negate {
            return Ok(None);
        }
        Ok(Some(Self::new(patterns, negate)?))
    }

    pub fn matches(&self, line: &str) -> bool {
        let all_match = self.patterns.iter().all(|re| re.is_match(line));
        all_match != self.negate
    }
}
