//! Fetch outcome value object.
//!
//! Every fetch attempt produces exactly one [`FetchOutcome`]; transport and
//! HTTP failures are data here, not errors. The aggregation step consumes
//! these and keeps only outcomes that pass the numeric validity filter.

/// Tagged outcome of a single per-city fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The labeled value container was found; its text, verbatim.
    Value(String),
    /// The page loaded but carried no value container.
    NotFound,
    /// The request never produced a response.
    Transport(String),
    /// The server answered with a non-success status.
    HttpStatus(u16),
}

impl FetchOutcome {
    /// Reduce this outcome to a validated reading, if it holds one.
    ///
    /// Returns the trimmed text iff this is a [`Value`](Self::Value) whose
    /// trimmed text is non-empty and entirely ASCII decimal digits.
    /// Placeholders such as `"-"` or `"N/A"` yield `None`, as do all
    /// non-`Value` outcomes.
    pub fn into_valid_reading(self) -> Option<String> {
        match self {
            Self::Value(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
                    Some(trimmed.to_string())
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}
