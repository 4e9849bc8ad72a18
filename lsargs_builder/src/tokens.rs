#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The classification of a single raw Cli token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// `--name`, without the leading `--`.
    LongOption(&'a str),
    /// `-abc`, without the leading `-`.
    /// Each character is a separate short option, resolved left to right.
    ShortOptionBurst(&'a str),
    /// `--` on its own.
    StopSignal,
    /// Anything not starting with `-`.
    Positional(&'a str),
    /// The empty string, or `-` on its own.
    Malformed(&'a str),
}

pub(crate) fn classify(token: &str) -> Token<'_> {
    let classified = if token.is_empty() || token == "-" {
        Token::Malformed(token)
    } else if let Some(name) = token.strip_prefix("--") {
        if name.is_empty() {
            Token::StopSignal
        } else {
            Token::LongOption(name)
        }
    } else if let Some(burst) = token.strip_prefix('-') {
        Token::ShortOptionBurst(burst)
    } else {
        Token::Positional(token)
    };

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Classified '{token}' as {classified:?}.");
    }

    classified
}
