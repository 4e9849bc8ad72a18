use std::cell::Cell;
use thiserror::Error;

use crate::allocator::{AllocError, Allocator, SystemAllocator};
use crate::constant::*;
use crate::matcher::Registry;
use crate::model::{Mode, Names};
use crate::parser::{consume, terminal_width, ParseError, Printer, TextBuffer};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The reasons a registration fails.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError<'a> {
    /// A flag/value option needs at least one of a short or long name.
    #[error("Config error: a flag or value option requires a short or long name.")]
    Unnamed,

    /// The short name cannot be typed as `-c`.
    #[error("Config error: invalid short name '{0}'.")]
    InvalidShort(char),

    /// The long name is empty once its leading dashes are stripped.
    #[error("Config error: invalid long name '{0}'.")]
    InvalidLong(&'a str),

    /// The registry could not grow.
    #[error("Allocation failure: {0}")]
    Allocation(#[from] AllocError),
}

enum Status {
    Fixed(&'static str),
    Rendered,
}

/// The command line parser session: a registry of parameters, plus the last error and help texts.
///
/// Parameters write into caller owned [`Cell`]s, so their values may be read between parses.
/// A session may be parsed any number of times; every parse starts afresh.
///
/// ### Example
/// ```
/// # use lsargs_builder as lsargs;
/// use lsargs::{Mode, Session};
/// use std::cell::Cell;
///
/// let verbose = Cell::new(false);
/// let output = Cell::new(Some("out.txt"));
/// let input = Cell::new(None);
/// let mut session = Session::new();
/// session.register_flag(&verbose, Some('v'), Some("verbose"), Some("Print more."), Mode::Optional).unwrap();
/// session.register_value_option(&output, Some('o'), Some("output"), Some("Write here."), Mode::Optional).unwrap();
/// session.register_positional(&input, Some("input"), Mode::Required).unwrap();
///
/// session.parse(&["program", "-vo", "result.txt", "data.csv"]).unwrap();
///
/// assert!(verbose.get());
/// assert_eq!(output.get(), Some("result.txt"));
/// assert_eq!(input.get(), Some("data.csv"));
/// assert_eq!(session.last_error(), "Success");
/// ```
pub struct Session<'a> {
    program: &'a str,
    about: Option<&'a str>,
    help_width: Option<usize>,
    registry: Registry<'a>,
    allocator: Box<dyn Allocator>,
    error: TextBuffer,
    status: Status,
    help: TextBuffer,
}

impl<'a> std::fmt::Debug for Session<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("program", &self.program)
            .field("last_error", &self.last_error())
            .finish()
    }
}

impl<'a> Default for Session<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Session<'a> {
    /// Create an empty session.
    ///
    /// The last error starts as `"Success"`.
    pub fn new() -> Self {
        Self {
            program: "",
            about: None,
            help_width: None,
            registry: Registry::default(),
            allocator: Box::new(SystemAllocator),
            error: TextBuffer::default(),
            status: Status::Fixed(SUCCESS),
            help: TextBuffer::default(),
        }
    }

    /// Document the session with a description, printed in the help message after the usage line.
    /// If repeated, only the final description will apply.
    pub fn about(mut self, description: &'a str) -> Self {
        self.about.replace(description);
        self
    }

    /// Use the `allocator` for all of the session's storage.
    pub fn allocator(mut self, allocator: impl Allocator + 'static) -> Self {
        self.allocator = Box::new(allocator);
        self
    }

    /// Wrap the help message to `width` columns (`None` disables wrapping, which is the default).
    pub fn help_width(mut self, width: Option<usize>) -> Self {
        self.help_width = width;
        self
    }

    /// Wrap the help message to the width of the attached terminal, if there is one.
    pub fn terminal_width(self) -> Self {
        let width = terminal_width();
        self.help_width(width)
    }

    /// Register a flag: a switch which sets `target` to `true` when present.
    ///
    /// The `long` name may be given with or without its leading dashes.
    /// Nothing is written to `target` until parse time, and absence never resets it.
    ///
    /// ### Example
    /// ```
    /// # use lsargs_builder as lsargs;
    /// use lsargs::{Mode, Session};
    /// use std::cell::Cell;
    ///
    /// let help = Cell::new(false);
    /// let test = Cell::new(false);
    /// let mut session = Session::new();
    /// session.register_flag(&help, Some('h'), Some("--help"), None, Mode::Optional).unwrap();
    /// session.register_flag(&test, Some('t'), None, None, Mode::Optional).unwrap();
    ///
    /// session.parse(&["program", "-ht"]).unwrap();
    ///
    /// assert!(help.get());
    /// assert!(test.get());
    /// ```
    pub fn register_flag(
        &mut self,
        target: &'a Cell<bool>,
        short: Option<char>,
        long: Option<&'a str>,
        help: Option<&'a str>,
        mode: Mode,
    ) -> Result<(), ConfigError<'a>> {
        let result = names(short, long).and_then(|names| {
            self.registry
                .flag(self.allocator.as_ref(), names, target, help, mode)
                .map_err(ConfigError::from)
        });
        self.registered(result)
    }

    /// Register a value option: an option whose value is the token directly following it.
    ///
    /// The `long` name may be given with or without its leading dashes.
    pub fn register_value_option(
        &mut self,
        target: &'a Cell<Option<&'a str>>,
        short: Option<char>,
        long: Option<&'a str>,
        help: Option<&'a str>,
        mode: Mode,
    ) -> Result<(), ConfigError<'a>> {
        let result = names(short, long).and_then(|names| {
            self.registry
                .value(self.allocator.as_ref(), names, target, help, mode)
                .map_err(ConfigError::from)
        });
        self.registered(result)
    }

    /// Register a positional.
    ///
    /// The order of positional registrations corresponds to their positional order during parsing.
    /// The `help` text doubles as the positional's name in the usage and error messages.
    ///
    /// Notice, an optional positional followed by a required positional is effectively required: the second can only be provided after the first.
    pub fn register_positional(
        &mut self,
        target: &'a Cell<Option<&'a str>>,
        help: Option<&'a str>,
        mode: Mode,
    ) -> Result<(), ConfigError<'a>> {
        let result = self
            .registry
            .positional(self.allocator.as_ref(), target, help, mode)
            .map(|_| ())
            .map_err(ConfigError::from);
        self.registered(result)
    }

    fn registered(&mut self, result: Result<(), ConfigError<'a>>) -> Result<(), ConfigError<'a>> {
        match &result {
            Ok(()) => {}
            Err(ConfigError::Allocation(_)) => {
                self.status = Status::Fixed(ALLOCATION_FAILURE);
            }
            Err(error) => {
                self.fail(error);
            }
        }

        result
    }

    /// Run the parser against the `argv` tokens, where the first token is the program name.
    ///
    /// Matched parameters are written into their targets as the tokens are consumed.
    /// If a token cannot be matched, parsing stops immediately (the targets matched before it remain written).
    /// Once all tokens are consumed, every required parameter is checked.
    ///
    /// On failure, [`Session::last_error`] describes the problem.
    ///
    /// ### Example
    /// ```
    /// # use lsargs_builder as lsargs;
    /// use lsargs::{Mode, Session};
    /// use std::cell::Cell;
    ///
    /// let first = Cell::new(None);
    /// let second = Cell::new(None);
    /// let mut session = Session::new();
    /// session.register_positional(&first, Some("first"), Mode::Optional).unwrap();
    /// session.register_positional(&second, Some("second"), Mode::Optional).unwrap();
    ///
    /// // Tokens after `--` are always positionals.
    /// session.parse(&["program", "--", "-h", "--test"]).unwrap();
    /// assert_eq!(first.get(), Some("-h"));
    /// assert_eq!(second.get(), Some("--test"));
    ///
    /// session.parse(&["program", "a", "b", "c"]).unwrap_err();
    /// assert_eq!(session.last_error(), "unexpected argument 'c'");
    /// ```
    pub fn parse(&mut self, argv: &[&'a str]) -> Result<(), ParseError<'a>> {
        self.registry.reset();
        self.error.clear();
        self.status = Status::Fixed(SUCCESS);

        let tokens = match argv.split_first() {
            Some((program, tokens)) => {
                self.program = *program;
                tokens
            }
            None => {
                self.program = "";
                argv
            }
        };

        match consume(&mut self.registry, tokens) {
            Ok(()) => Ok(()),
            Err(error) => {
                self.fail(&error);
                Err(error)
            }
        }
    }

    /// The program name, as given by the most recent [`Session::parse`].
    pub fn program(&self) -> &'a str {
        self.program
    }

    /// The message describing the most recent failure, or `"Success"`.
    pub fn last_error(&self) -> &str {
        match self.status {
            Status::Fixed(message) => message,
            Status::Rendered => self.error.as_str(),
        }
    }

    /// Render the help message.
    ///
    /// The help message lists the usage line, the about description, and the flags/value options in registration order.
    /// Required positionals are written as `<name>`, optional positionals as `[name]`.
    ///
    /// Should the rendering fail to allocate, a fixed fallback message is returned instead (and recorded as the last error).
    ///
    /// ### Example
    /// ```
    /// # use lsargs_builder as lsargs;
    /// use lsargs::{Mode, Session};
    /// use std::cell::Cell;
    ///
    /// let verbose = Cell::new(false);
    /// let input = Cell::new(None);
    /// let mut session = Session::new();
    /// session.register_flag(&verbose, Some('v'), Some("verbose"), Some("Print more."), Mode::Optional).unwrap();
    /// session.register_positional(&input, Some("input"), Mode::Required).unwrap();
    /// session.parse(&["program", "data.csv"]).unwrap();
    ///
    /// assert_eq!(
    ///     session.help(),
    ///     "Usage: program [OPTION] <input>\n\nOptions:\n  -v, --verbose  Print more.\n"
    /// );
    /// ```
    pub fn help(&mut self) -> &str {
        self.help.release();
        let printer = Printer::new(self.program, self.about, self.help_width);

        match printer.print_help(&self.registry, &mut self.help, self.allocator.as_ref()) {
            Ok(()) => self.help.as_str(),
            Err(_error) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Help rendering failed: {_error}");
                }

                self.help.release();
                self.status = Status::Fixed(ALLOCATION_FAILURE);
                HELP_UNAVAILABLE
            }
        }
    }

    /// Release every registration along with the error and help storage.
    ///
    /// The session returns to its freshly created state (keeping its configuration), so this may be called any number of times.
    pub fn teardown(&mut self) {
        self.registry.release();
        self.error.release();
        self.help.release();
        self.status = Status::Fixed(SUCCESS);
        self.program = "";
    }

    fn fail(&mut self, error: &dyn std::fmt::Display) {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Session failure: {error}");
        }

        self.error.clear();

        match self
            .error
            .render(self.allocator.as_ref(), format_args!("{error}"))
        {
            Ok(()) => {
                self.status = Status::Rendered;
            }
            Err(_) => {
                self.error.release();
                self.status = Status::Fixed(ALLOCATION_FAILURE);
            }
        }
    }
}

fn names<'a>(short: Option<char>, long: Option<&'a str>) -> Result<Names<'a>, ConfigError<'a>> {
    if let Some(short) = short {
        if short == '-' || short.is_whitespace() {
            return Err(ConfigError::InvalidShort(short));
        }
    }

    let long = match long {
        Some(given) => {
            let stripped = given.trim_start_matches('-');

            if stripped.is_empty() {
                return Err(ConfigError::InvalidLong(given));
            }

            Some(stripped)
        }
        None => None,
    };

    if short.is_none() && long.is_none() {
        return Err(ConfigError::Unnamed);
    }

    Ok(Names::new(short, long))
}
