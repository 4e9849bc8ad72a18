use lsargs::{ConfigError, ExhaustAfter, Mode, ParseError, Session};
use rand::Rng;
use rstest::rstest;
use std::cell::Cell;

#[test]
fn absent_flags_untouched() {
    let mut rng = rand::thread_rng();

    for _ in 0..32 {
        let help_initial: bool = rng.gen();
        let test_initial: bool = rng.gen();
        let help = Cell::new(help_initial);
        let test = Cell::new(test_initial);
        let output = Cell::new(Some("initial"));
        let mut session = Session::new();
        session
            .register_flag(&help, Some('h'), Some("help"), None, Mode::Optional)
            .unwrap();
        session
            .register_flag(&test, Some('t'), Some("test"), None, Mode::Optional)
            .unwrap();
        session
            .register_value_option(&output, Some('o'), Some("output"), None, Mode::Optional)
            .unwrap();

        session.parse(&["program", "-t"]).unwrap();

        assert_eq!(help.get(), help_initial);
        assert!(test.get());
        assert_eq!(output.get(), Some("initial"));
    }
}

#[rstest]
#[case(vec!["program", "-h", "--test"])]
#[case(vec!["program", "-ht"])]
#[case(vec!["program", "-h", "-t"])]
#[case(vec!["program", "--test", "--help"])]
fn flags_round_trip(#[case] argv: Vec<&str>) {
    let help = Cell::new(false);
    let test = Cell::new(false);
    let nope = Cell::new(false);
    let mut session = Session::new();
    session
        .register_flag(&help, Some('h'), Some("help"), None, Mode::Optional)
        .unwrap();
    session
        .register_flag(&test, Some('t'), Some("test"), None, Mode::Optional)
        .unwrap();
    session
        .register_flag(&nope, Some('n'), Some("nope"), None, Mode::Optional)
        .unwrap();

    session.parse(&argv).unwrap();

    assert!(help.get());
    assert!(test.get());
    assert!(!nope.get());
    assert_eq!(session.last_error(), "Success");
}

#[test]
fn stop_signal() {
    let help = Cell::new(false);
    let first = Cell::new(None);
    let second = Cell::new(None);
    let mut session = Session::new();
    session
        .register_flag(&help, None, Some("help"), None, Mode::Optional)
        .unwrap();
    session
        .register_positional(&first, Some("first"), Mode::Optional)
        .unwrap();
    session
        .register_positional(&second, Some("second"), Mode::Optional)
        .unwrap();

    session
        .parse(&["program", "--help", "--", "-h", "--test"])
        .unwrap();

    assert!(help.get());
    assert_eq!(first.get(), Some("-h"));
    assert_eq!(second.get(), Some("--test"));
}

#[test]
fn required_after_optional_positional() {
    let a = Cell::new(None);
    let b = Cell::new(None);
    let mut session = Session::new();
    session
        .register_positional(&a, Some("source"), Mode::Optional)
        .unwrap();
    session
        .register_positional(&b, Some("destination"), Mode::Required)
        .unwrap();

    let error = session.parse(&["program"]).unwrap_err();
    assert_matches::assert_matches!(error, ParseError::MissingPositional(label) if label.index() == 1);
    assert_eq!(
        session.last_error(),
        "required argument 'destination' not provided"
    );

    // A single positional always lands in the first slot.
    session.parse(&["program", "x"]).unwrap_err();
    assert_eq!(a.get(), Some("x"));
    assert_eq!(b.get(), None);

    session.parse(&["program", "x", "y"]).unwrap();
    assert_eq!(b.get(), Some("y"));
}

#[test]
fn reparse_does_not_leak() {
    let help = Cell::new(false);
    let config = Cell::new(None);
    let mut session = Session::new();
    session
        .register_flag(&help, Some('h'), Some("help"), None, Mode::Optional)
        .unwrap();
    session
        .register_value_option(&config, Some('c'), Some("config"), None, Mode::Required)
        .unwrap();

    session.parse(&["program", "-c", "a.toml"]).unwrap();
    assert_eq!(config.get(), Some("a.toml"));

    // The required option was found in the first parse only.
    let error = session.parse(&["program", "-h"]).unwrap_err();
    assert_eq!(error.to_string(), "required argument '--config' not found");
    assert_eq!(session.last_error(), "required argument '--config' not found");

    session.parse(&["program", "--config", "b.toml"]).unwrap();
    assert_eq!(config.get(), Some("b.toml"));
    assert_eq!(session.last_error(), "Success");
}

#[rstest]
#[case(vec!["program", ""], "invalid argument ''")]
#[case(vec!["program", "-"], "invalid argument '-'")]
#[case(vec!["program", "--nope"], "invalid argument '--nope'")]
#[case(vec!["program", "-x"], "invalid argument '-x'")]
#[case(vec!["program", "-oh"], "expected argument following '-o', instead got another argument '-h'")]
#[case(vec!["program", "-o"], "expected argument following '--output'")]
#[case(vec!["program", "in", "extra"], "unexpected argument 'extra'")]
#[case(vec!["program", "-h"], "required argument 'input' not provided")]
fn parse_failures(#[case] argv: Vec<&str>, #[case] expected: &str) {
    let help = Cell::new(false);
    let output = Cell::new(None);
    let input = Cell::new(None);
    let mut session = Session::new();
    session
        .register_flag(&help, Some('h'), Some("help"), None, Mode::Optional)
        .unwrap();
    session
        .register_value_option(&output, Some('o'), Some("output"), None, Mode::Optional)
        .unwrap();
    session
        .register_positional(&input, Some("input"), Mode::Required)
        .unwrap();

    let error = session.parse(&argv).unwrap_err();

    assert_eq!(error.to_string(), expected);
    assert_eq!(session.last_error(), expected);
}

#[test]
fn value_takes_next_token_verbatim() {
    let help = Cell::new(false);
    let output = Cell::new(None);
    let mut session = Session::new();
    session
        .register_flag(&help, Some('h'), Some("help"), None, Mode::Optional)
        .unwrap();
    session
        .register_value_option(&output, Some('o'), Some("output"), None, Mode::Optional)
        .unwrap();

    session.parse(&["program", "-ho", "--help"]).unwrap();

    assert!(help.get());
    assert_eq!(output.get(), Some("--help"));
}

#[test]
fn register_invalid_names() {
    let flag = Cell::new(false);
    let value = Cell::new(None);
    let mut session = Session::new();

    assert_eq!(
        session.register_flag(&flag, None, None, None, Mode::Optional),
        Err(ConfigError::Unnamed)
    );
    assert_eq!(
        session.register_value_option(&value, Some('-'), None, None, Mode::Optional),
        Err(ConfigError::InvalidShort('-'))
    );
    assert_eq!(
        session.register_value_option(&value, None, Some("--"), None, Mode::Optional),
        Err(ConfigError::InvalidLong("--"))
    );
    assert_ne!(session.last_error(), "Success");

    // Nothing was registered.
    session.parse(&["program"]).unwrap();
    assert_eq!(session.help(), "Usage: program\n");
}

#[test]
fn help_without_named_options() {
    let a = Cell::new(None);
    let b = Cell::new(None);
    let c = Cell::new(None);
    let mut session = Session::new().about("Joins things.");
    session
        .register_positional(&a, Some("left"), Mode::Required)
        .unwrap();
    session
        .register_positional(&b, Some("right"), Mode::Optional)
        .unwrap();
    session.register_positional(&c, None, Mode::Required).unwrap();
    session.parse(&["join", "x", "y", "z"]).unwrap();

    let help = session.help();

    assert_eq!(help, "Usage: join <left> [right] <arg2>\n\nJoins things.\n");
    assert!(!help.contains("Options:"));
    assert!(!help.contains("[OPTION]"));
}

#[test]
fn help_with_named_options() {
    let verbose = Cell::new(false);
    let output = Cell::new(None);
    let input = Cell::new(None);
    let mut session = Session::new();
    session
        .register_positional(&input, Some("input"), Mode::Optional)
        .unwrap();
    session
        .register_flag(&verbose, None, Some("verbose"), Some("Print more."), Mode::Optional)
        .unwrap();
    session
        .register_value_option(&output, Some('o'), None, Some("Write here."), Mode::Required)
        .unwrap();
    session.parse(&["program", "-o", "out"]).unwrap();

    assert_eq!(
        session.help(),
        [
            "Usage: program [OPTION] [input]\n",
            "\n",
            "Options:\n",
            "      --verbose  Print more.\n",
            "  -o [VALUE]     Write here.\n",
        ]
        .concat()
    );
}

#[test]
fn help_wrapped() {
    let verbose = Cell::new(false);
    let mut session = Session::new().help_width(Some(40));
    session
        .register_flag(
            &verbose,
            Some('v'),
            Some("verbose"),
            Some("Print every step of the process, as it happens."),
            Mode::Optional,
        )
        .unwrap();

    let help = session.help();

    for line in help.lines() {
        assert!(line.chars().count() <= 40, "'{line}' exceeds 40 columns");
    }
    assert!(help.contains("Print every step of"));
}

struct Exercised {
    errors: Vec<String>,
    parsed: bool,
    help: String,
}

fn exercise(session: &mut Session<'_>) -> Exercised {
    let mut errors = Vec::default();

    if session.parse(&["program", "-v", "--nope"]).is_err() {
        errors.push(session.last_error().to_string());
    }

    let parsed = session.parse(&["program", "-vo", "file", "input"]).is_ok();

    if !parsed {
        errors.push(session.last_error().to_string());
    }

    let help = session.help().to_string();
    assert!(!help.is_empty());
    errors.push(session.last_error().to_string());

    Exercised {
        errors,
        parsed,
        help,
    }
}

#[test]
fn allocation_failure_injection() {
    let mut completed = false;

    for grants in 0..64 {
        let verbose = Cell::new(false);
        let output = Cell::new(None);
        let input = Cell::new(None);
        let mut session = Session::new()
            .about("Exercises every allocation the session makes.")
            .help_width(Some(30))
            .allocator(ExhaustAfter::new(grants));

        let registered = session
            .register_flag(&verbose, Some('v'), Some("verbose"), Some("Print more."), Mode::Optional)
            .and_then(|_| {
                session.register_value_option(
                    &output,
                    Some('o'),
                    Some("output"),
                    Some("Write to FILE."),
                    Mode::Optional,
                )
            })
            .and_then(|_| session.register_positional(&input, Some("input"), Mode::Required));

        if let Err(error) = registered {
            assert_matches::assert_matches!(error, ConfigError::Allocation(_));
            assert_eq!(session.last_error(), "Allocation failure.");
        }

        let exercised = exercise(&mut session);

        for error in &exercised.errors {
            assert!(!error.is_empty());
            assert!(
                error == "Success"
                    || error == "Allocation failure."
                    || error.starts_with("invalid argument")
                    || error.starts_with("required argument"),
                "unexpected last error '{error}'"
            );
        }

        if registered.is_ok() {
            // Parsing itself never allocates, so a complete registry always parses.
            assert!(exercised.parsed);
            assert!(verbose.get());
            assert_eq!(output.get(), Some("file"));
            assert_eq!(input.get(), Some("input"));

            if exercised.help != "Help unavailable: allocation failure." {
                assert_eq!(
                    exercised.help,
                    [
                        "Usage: program [OPTION] <input>\n",
                        "\n",
                        "Exercises every allocation the\n",
                        "session makes.\n",
                        "\n",
                        "Options:\n",
                        "  -v, --verbose         Print more.\n",
                        "  -o, --output [VALUE]  Write to FILE.\n",
                    ]
                    .concat()
                );
                completed = true;
            }
        } else {
            assert!(!exercised.parsed);
            assert_eq!(output.get(), None);
            assert_eq!(input.get(), None);
        }

        session.teardown();
        session.teardown();
        assert_eq!(session.last_error(), "Success");
    }

    // Enough grants were given, eventually, for everything to succeed.
    assert!(completed);
}

#[test]
fn allocation_failure_help_fallback() {
    let verbose = Cell::new(false);
    let mut session = Session::new().allocator(ExhaustAfter::new(1));
    session
        .register_flag(&verbose, Some('v'), None, Some("Print more."), Mode::Optional)
        .unwrap();

    assert_eq!(session.help(), "Help unavailable: allocation failure.");
    assert_eq!(session.last_error(), "Allocation failure.");

    session.teardown();
}

#[test]
fn teardown_idempotent() {
    let mut session = Session::new();

    session.teardown();
    session.teardown();

    assert_eq!(session.last_error(), "Success");
    session.parse(&["program"]).unwrap();
}
