use thiserror::Error;

use crate::matcher::{MatchError, Registry};
use crate::model::{Label, Names};
use crate::tokens::{classify, Token};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The reasons a parse fails.
///
/// Borrows from the parsed tokens and the registered names, so it never allocates.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError<'a> {
    /// The token is empty, or a lone `-`.
    #[error("invalid argument '{0}'")]
    Malformed(&'a str),

    /// No flag/value option has this long name.
    #[error("invalid argument '--{0}'")]
    UnknownOption(&'a str),

    /// No flag/value option has this short name.
    #[error("invalid argument '-{0}'")]
    UnknownShortOption(char),

    /// A value option in a burst of short options was followed by another short option.
    #[error("expected argument following '-{short}', instead got another argument '-{next}'")]
    InterruptedValue {
        /// The value option awaiting its value.
        short: char,
        /// The short option which came next in the burst.
        next: char,
    },

    /// More positional tokens were provided than positionals were registered.
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(&'a str),

    /// The tokens ended while a value option was awaiting its value.
    #[error("expected argument following '{0}'")]
    MissingValue(Names<'a>),

    /// A required positional was not provided.
    #[error("required argument '{0}' not provided")]
    MissingPositional(Label<'a>),

    /// A required flag/value option was not provided.
    #[error("required argument '{0}' not found")]
    MissingOption(Names<'a>),
}

impl<'a> From<MatchError<'a>> for ParseError<'a> {
    fn from(error: MatchError<'a>) -> Self {
        match error {
            MatchError::InvalidOption(name) => ParseError::UnknownOption(name),
            MatchError::InvalidShortOption(short) => ParseError::UnknownShortOption(short),
            MatchError::ArgumentsExhausted(token) => ParseError::UnexpectedArgument(token),
        }
    }
}

/// Match the `tokens` (excluding the program name) against the `registry`, capturing into the targets as matches are made.
///
/// The registry is expected to be freshly reset.
/// Parsing happens in two phases:
/// 1. Each token is classified and matched, failing immediately on the first token which cannot be matched.
/// 2. Once all tokens are consumed, the registry is checked for any unmet required parameters.
pub(crate) fn consume<'a>(registry: &mut Registry<'a>, tokens: &[&'a str]) -> Result<(), ParseError<'a>> {
    // A value option awaiting its value (the index into the registry).
    let mut pending: Option<usize> = None;
    let mut positional_cursor: usize = 0;
    let mut token_iter = tokens.iter().copied();

    while let Some(token) = token_iter.next() {
        // The token directly after a value option is its value, regardless of how it looks.
        if let Some(index) = pending.take() {
            registry.spec_mut(index).capture(token);
            continue;
        }

        match classify(token) {
            Token::Malformed(text) => {
                return Err(ParseError::Malformed(text));
            }
            Token::LongOption(name) => {
                let index = registry.match_long(name)?;
                pending = awaiting(registry, index);
            }
            Token::ShortOptionBurst(burst) => {
                let mut previous: Option<char> = None;

                for single in burst.chars() {
                    if let (Some(_), Some(short)) = (pending, previous) {
                        return Err(ParseError::InterruptedValue {
                            short,
                            next: single,
                        });
                    }

                    let index = registry.match_short(single)?;
                    pending = awaiting(registry, index);
                    previous.replace(single);
                }
            }
            Token::StopSignal => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Stop signal; treating the remaining tokens as positionals.");
                }

                for token in token_iter.by_ref() {
                    capture_positional(registry, &mut positional_cursor, token)?;
                }
            }
            Token::Positional(text) => {
                capture_positional(registry, &mut positional_cursor, text)?;
            }
        }
    }

    if let Some(index) = pending {
        let names = registry.specs()[index]
            .names()
            .expect("internal error - only a value option may await a value");
        return Err(ParseError::MissingValue(names));
    }

    match registry.first_unmet() {
        Some(spec) => match (spec.label(), spec.names()) {
            (Some(label), _) => Err(ParseError::MissingPositional(label)),
            (None, Some(names)) => Err(ParseError::MissingOption(names)),
            (None, None) => unreachable!("internal error - a parameter is named or positional"),
        },
        None => Ok(()),
    }
}

fn awaiting(registry: &mut Registry<'_>, index: usize) -> Option<usize> {
    if registry.spec_mut(index).matched() {
        Some(index)
    } else {
        None
    }
}

fn capture_positional<'a>(
    registry: &mut Registry<'a>,
    positional_cursor: &mut usize,
    token: &'a str,
) -> Result<(), ParseError<'a>> {
    let index = registry.match_positional(*positional_cursor, token)?;
    *positional_cursor += 1;
    registry.spec_mut(index).capture(token);
    Ok(())
}
