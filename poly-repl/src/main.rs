mod request;

use log::{debug, warn};
use poly_parser::{ParseOptions, ParseOptionsBuilder};
use rustyline::{error::ReadlineError, DefaultEditor};
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};
use std::{
    fs::File,
    io::{self, BufReader, IsTerminal, Read},
    process::ExitCode,
};

/// Installs the terminal logger, with the level taken from `POLY_LOG`.
fn init_logger() {
    let (level, invalid) = match std::env::var("POLY_LOG") {
        Ok(value) => match value.parse::<LevelFilter>() {
            Ok(level) => (level, None),
            Err(_) => (LevelFilter::Warn, Some(value)),
        },
        Err(_) => (LevelFilter::Warn, None),
    };

    let logger = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )]);
    if let Err(err) = logger {
        eprintln!("could not install logger: {}", err);
    }

    if let Some(value) = invalid {
        warn!("unknown log level `{}` in POLY_LOG, using `warn`", value);
    }
}

/// Reads the parse options, with the nesting limit taken from `POLY_MAX_DEPTH` if it is set.
fn parse_options() -> ParseOptions {
    let builder = ParseOptionsBuilder::new();
    let Ok(value) = std::env::var("POLY_MAX_DEPTH") else {
        return builder.build();
    };

    match value.trim().parse::<usize>() {
        Ok(max_depth) => builder.max_depth(max_depth).build(),
        Err(_) => {
            warn!("invalid POLY_MAX_DEPTH `{}`, using the default", value);
            builder.build()
        },
    }
}

/// Runs a single request line, printing each result, or the error report.
fn run_line(line: &str, options: ParseOptions) {
    if line.trim().is_empty() {
        return;
    }

    debug!("request: {}", line);
    match request::run(line, options) {
        Ok(results) => results.iter().for_each(|result| println!("{}", result)),
        Err(err) => {
            if let Err(io_err) = err.report_to_stderr("input", line) {
                eprintln!("could not print error report: {}", io_err);
            }
        },
    }
}

/// Runs every line of the given source.
fn run_source(source: &str, options: ParseOptions) {
    for line in source.lines() {
        run_line(line, options);
    }
}

fn main() -> ExitCode {
    init_logger();
    let options = parse_options();

    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run source file
        let read = File::open(&filename).and_then(|file| {
            let mut input = String::new();
            BufReader::new(file).read_to_string(&mut input)?;
            Ok(input)
        });

        match read {
            Ok(input) => run_source(&input, options),
            Err(err) => {
                eprintln!("could not read `{}`: {}", filename, err);
                return ExitCode::FAILURE;
            },
        }
    } else if !io::stdin().is_terminal() {
        // read source from stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("could not read stdin: {}", err);
            return ExitCode::FAILURE;
        }

        run_source(&input, options);
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("could not start the editor: {}", err);
                return ExitCode::FAILURE;
            },
        };

        fn process_line(rl: &mut DefaultEditor, options: ParseOptions) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            run_line(&input, options);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, options) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }

    ExitCode::SUCCESS
}
