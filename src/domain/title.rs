// src/domain/title.rs

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Marker placed in the job identifier of annual (recurring) jobs.
pub const ANNUAL_MARKER: char = '=';

/// Visit titles carry four positional tokens, e.g. `"Jones -NE- 12 Elm St - W1"`.
/// Matches are taken left to right and fill identifier, geo code, address and
/// work code in that order, whichever alternative produced them.
static TITLE_TOKENS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^[^-]+)|(-[A-Z]+-)|([^-\s][^-\n]*[^-\s])|(-[^-\s][^-\n]*[^-\s])").unwrap()
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("title has no usable tokens: {0:?}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitle {
    pub job_identifier: String,
    pub geo_code: Option<String>,
    pub address: Option<String>,
    pub work_code: Option<String>,
}

/// Annual classification derived from the job identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnualStatus {
    NotAnnual,
    /// Marker somewhere after the first character.
    Confirmed,
    /// Identifier starts with the marker.
    Unconfirmed,
}

pub fn tokenize(title: &str) -> Result<ParsedTitle, TitleError> {
    if title.trim().is_empty() {
        return Err(TitleError::Malformed(title.to_string()));
    }

    let tokens: Vec<String> = TITLE_TOKENS
        .find_iter(title)
        .take(4)
        .map(|m| m.as_str().trim().to_string())
        .collect();

    // A blank leading run still occupies the identifier slot, but a title
    // made only of blanks and delimiters has nothing to show.
    if tokens.iter().all(|t| t.is_empty()) {
        return Err(TitleError::Malformed(title.to_string()));
    }

    let mut tokens = tokens.into_iter();
    Ok(ParsedTitle {
        job_identifier: tokens.next().unwrap_or_default(),
        geo_code: tokens.next(),
        address: tokens.next(),
        work_code: tokens.next(),
    })
}

impl ParsedTitle {
    /// Used when a title cannot be tokenized: the whole title becomes the
    /// identifier and every other token is missing.
    pub fn fallback(title: &str) -> Self {
        Self {
            job_identifier: title.trim().to_string(),
            geo_code: None,
            address: None,
            work_code: None,
        }
    }

    /// Tokenize, falling back instead of failing. The caller gets to log.
    pub fn parse_lenient(title: &str) -> Result<Self, (Self, TitleError)> {
        tokenize(title).map_err(|e| (Self::fallback(title), e))
    }

    pub fn annual_status(&self) -> AnnualStatus {
        if !self.job_identifier.contains(ANNUAL_MARKER) {
            AnnualStatus::NotAnnual
        } else if self.job_identifier.starts_with(ANNUAL_MARKER) {
            AnnualStatus::Unconfirmed
        } else {
            AnnualStatus::Confirmed
        }
    }

    pub fn geo_code_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.geo_code.as_deref().unwrap_or(default)
    }

    pub fn address_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.address.as_deref().unwrap_or(default)
    }

    pub fn work_code_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.work_code.as_deref().unwrap_or(default)
    }
}
