use lsargs::{Mode, Session};
use std::cell::Cell;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let argv: Vec<&str> = args.iter().map(String::as_str).collect();

    let help = Cell::new(false);
    let verbose = Cell::new(false);
    let output = Cell::new(Some("out.txt"));
    let input = Cell::new(None);
    let extra = Cell::new(None);

    let mut session = Session::new()
        .about("Copy the input file to the output file, reporting on the way.")
        .terminal_width();
    let registered = session
        .register_flag(&help, Some('h'), Some("help"), Some("Show this help message."), Mode::Optional)
        .and_then(|_| {
            session.register_flag(
                &verbose,
                Some('v'),
                Some("verbose"),
                Some("Print each step as it happens."),
                Mode::Optional,
            )
        })
        .and_then(|_| {
            session.register_value_option(
                &output,
                Some('o'),
                Some("output"),
                Some("Write to this file (default out.txt)."),
                Mode::Optional,
            )
        })
        .and_then(|_| session.register_positional(&input, Some("input"), Mode::Required))
        .and_then(|_| session.register_positional(&extra, None, Mode::Optional));

    if registered.is_err() {
        eprintln!("{}", session.last_error());
        std::process::exit(1);
    }

    if session.parse(&argv).is_err() && !help.get() {
        eprintln!("{}: {}", session.program(), session.last_error());
        eprint!("{}", session.help());
        std::process::exit(1);
    }

    if help.get() {
        print!("{}", session.help());
        return;
    }

    if verbose.get() {
        println!("input: {:?}", input.get());
        println!("output: {:?}", output.get());
        println!("extra: {:?}", extra.get());
    }

    println!(
        "{} -> {}",
        input.get().unwrap_or_default(),
        output.get().unwrap_or_default()
    );
    session.teardown();
}
