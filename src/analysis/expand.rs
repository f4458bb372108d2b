use super::CheckError;
use crate::resolver::{PatternMatcher, needs_expansion};

/// Turns a mix of identifiers and wildcard patterns into concrete module
/// identifiers.
pub struct PatternExpander<'a> {
    matcher: &'a dyn PatternMatcher,
}

impl<'a> PatternExpander<'a> {
    pub fn new(matcher: &'a dyn PatternMatcher) -> Self {
        Self { matcher }
    }

    /// Lists without a wildcard come back unchanged and never reach the
    /// matcher. Otherwise the whole batch is matched in one call.
    pub fn expand<S: AsRef<str>>(&self, identifiers: &[S]) -> Result<Vec<String>, CheckError> {
        let identifiers: Vec<String> = identifiers
            .iter()
            .map(|i| i.as_ref().to_string())
            .collect();

        if !needs_expansion(&identifiers) {
            return Ok(identifiers);
        }

        let matched = self
            .matcher
            .match_patterns(&identifiers)
            .map_err(|source| CheckError::Resolution {
                patterns: identifiers.clone(),
                source,
            })?;

        if matched.is_empty() {
            return Err(CheckError::EmptyMatch {
                patterns: identifiers,
            });
        }

        tracing::debug!(
            patterns = ?identifiers,
            matched = matched.len(),
            "expanded module patterns"
        );
        Ok(matched)
    }
}
