//! `lsargs` is a small command line parser for Rust, in the style of `ls`.
//!
//! `lsargs` deliberately keeps to a narrow set of concerns:
//! * *Three kinds of parameters*:
//! Flags (`-v`, `--verbose`), value options (`-o FILE`, `--output FILE`), and positionals.
//! * *Caller owned storage*:
//! Every parameter writes into a [`std::cell::Cell`] owned by the caller.
//! Values are borrowed straight from the command line tokens; `lsargs` never copies them.
//! * *Allocation awareness*:
//! All of the session's storage is requested through an [`Allocator`].
//! A refused request surfaces as an error (and a fixed last-error message), never as a panic or abort.
//! * *Detailed yet basic UX*:
//! Errors are reported via [`Session::last_error`], and the help message is generated from the registrations.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/basic.rs")]
//! ```
//!
//! ```console
//! $ basic -h
//! Usage: basic [OPTION] <input> [arg1]
//!
//! Copy the input file to the output file, reporting on the way.
//!
//! Options:
//!   -h, --help            Show this help message.
//!   -v, --verbose         Print each step as it happens.
//!   -o, --output [VALUE]  Write to this file (default out.txt).
//!
//! $ basic data.csv -vo result.txt
//! input: Some("data.csv")
//! output: Some("result.txt")
//! extra: None
//! data.csv -> result.txt
//!
//! $ basic -o
//! basic: expected argument following '--output'
//! ...
//! ```
//!
//! # Parameters
//! Configure `lsargs` by starting with a [`Session`] and registering parameters.
//! Each registration takes a [`Mode`]: whether the parameter must be present.
//!
//! * [`Session::register_flag`]: a switch which sets its `Cell<bool>` to `true` when present.
//! * [`Session::register_value_option`]: an option which captures the token directly following it.
//! The value token is taken verbatim, even if it looks like an option (ex: `-o -h` captures `"-h"`).
//! * [`Session::register_positional`]: a bare token, matched in registration order.
//!
//! Flags and value options need at least one of a short name (`-c`) or a long name (`--name`).
//! Short options may be bundled (`-abc`); a value option inside a bundle must come last, and takes the next token as its value.
//! The token `--` ends option processing: every token after it is a positional.
//!
//! # Parsing
//! [`Session::parse`] takes the full `argv`, including the program name as its first token.
//! Parsing stops at the first token which cannot be matched, leaving the targets matched before it written.
//! Targets of absent parameters are never touched, so they act as the parameter defaults.
//!
//! A session may be parsed repeatedly; every parse starts from a clean slate of matches.
//!
//! # Allocation
//! By default, the session uses the [`SystemAllocator`].
//! Provide any other [`Allocator`] via [`Session::allocator`] to bound (or observe) the session's storage.
//! When the help message cannot be rendered, [`Session::help`] returns a fixed fallback message instead.
//!
//! # Features
//! * `unit_test`: provides [`ExhaustAfter`], an allocator which refuses every request past a fixed count.
//! * `tracing_debug`: emits `tracing` debug events for the classification and matching of tokens.

pub use lsargs_builder::*;
