/// Whether a parameter must be present on the Cli.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The parameter may be absent.
    #[default]
    Optional,
    /// The parameter must be matched, otherwise parsing fails during the final validation.
    Required,
}

/// The short and/or long name of a flag or value option.
///
/// At least one of the two is always present.
/// The long name is stored without its leading dashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Names<'a> {
    short: Option<char>,
    long: Option<&'a str>,
}

impl<'a> Names<'a> {
    pub(crate) fn new(short: Option<char>, long: Option<&'a str>) -> Self {
        debug_assert!(short.is_some() || long.is_some());
        Self { short, long }
    }

    /// The single character name, matched via `-c`.
    pub fn short(&self) -> Option<char> {
        self.short
    }

    /// The long name, matched via `--name`.
    pub fn long(&self) -> Option<&'a str> {
        self.long
    }
}

/// Renders the name as it would be typed on the Cli, preferring the long form.
impl std::fmt::Display for Names<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.long, self.short) {
            (Some(long), _) => write!(f, "--{long}"),
            (None, Some(short)) => write!(f, "-{short}"),
            (None, None) => unreachable!("internal error - names must include a short or long"),
        }
    }
}

/// The display name of a positional parameter: its help text, or `arg<index>` when undocumented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label<'a> {
    help: Option<&'a str>,
    index: usize,
}

impl<'a> Label<'a> {
    pub(crate) fn new(help: Option<&'a str>, index: usize) -> Self {
        Self { help, index }
    }

    /// The registration order of the positional parameter (starting at `0`).
    pub fn index(&self) -> usize {
        self.index
    }
}

impl std::fmt::Display for Label<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.help {
            Some(help) => write!(f, "{help}"),
            None => write!(f, "arg{}", self.index),
        }
    }
}
