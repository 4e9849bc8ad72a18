use thiserror::Error;

use crate::matcher::model::{Kind, Registry};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MatchError<'a> {
    #[error("Option '--{0}' does not exist.")]
    InvalidOption(&'a str),

    #[error("Short option '-{0}' does not exist.")]
    InvalidShortOption(char),

    #[error("No more arguments to match '{0}' against.")]
    ArgumentsExhausted(&'a str),
}

// Each match is a linear scan in registration order; the first match wins.
impl<'a> Registry<'a> {
    pub(crate) fn match_long(&self, name: &'a str) -> Result<usize, MatchError<'a>> {
        let found = self
            .specs()
            .iter()
            .position(|spec| spec.names().and_then(|names| names.long()) == Some(name));

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Long option '{name}' matched {found:?}.");
        }

        found.ok_or(MatchError::InvalidOption(name))
    }

    pub(crate) fn match_short(&self, short: char) -> Result<usize, MatchError<'a>> {
        let found = self
            .specs()
            .iter()
            .position(|spec| spec.names().and_then(|names| names.short()) == Some(short));

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Short option '{short}' matched {found:?}.");
        }

        found.ok_or(MatchError::InvalidShortOption(short))
    }

    /// Match the positional at `index`; `token` is only used to describe the failure.
    pub(crate) fn match_positional(
        &self,
        index: usize,
        token: &'a str,
    ) -> Result<usize, MatchError<'a>> {
        let found = self.specs().iter().position(|spec| {
            matches!(spec.kind(), Kind::Positional { index: i, .. } if *i == index)
        });

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Positional #{index} '{token}' matched {found:?}.");
        }

        found.ok_or(MatchError::ArgumentsExhausted(token))
    }
}
