use std::io::{self, BufWriter};
use std::process;

use clap::Parser;
use clap::error::ErrorKind;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use log::info;

use ippcode::Failure;

/// Exit code for any invocation other than no arguments or `--help`.
const EXIT_USAGE: i32 = 10;

const EXIT_CODES: &str = "\
Exit codes:
  0   success
  10  invalid arguments
  11  input could not be read
  12  output could not be written
  21  missing or invalid .IPPcode23 header
  22  unknown opcode
  23  other lexical or syntax error";

#[derive(Parser)]
#[command(
    name = "ippc-parse",
    about = "Check IPPcode23 source read from stdin and print its XML representation",
    override_usage = "ippc-parse [--help] < INPUT",
    after_help = EXIT_CODES,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Print this help and exit
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,
}

fn main() {
    let env = env_logger::Env::default().filter_or("IPPC_LOG", "warn");
    env_logger::init_from_env(env);

    let args: Vec<String> = std::env::args().collect();
    process::exit(run(&args));
}

fn run(args: &[String]) -> i32 {
    // `--help` is only valid on its own.
    if args.len() > 2 {
        eprintln!("error: expected at most one argument, got {}", args.len() - 1);
        eprintln!("usage: ippc-parse [--help] < INPUT");
        return EXIT_USAGE;
    }

    if let Err(err) = Cli::try_parse_from(args) {
        let _ = err.print();
        return match err.kind() {
            ErrorKind::DisplayHelp => 0,
            _ => EXIT_USAGE,
        };
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    match ippcode::translate(stdin.lock(), BufWriter::new(stdout.lock()), 0) {
        Ok(summary) => {
            info!(
                "translated {} instruction(s) from {} line(s)",
                summary.instructions, summary.lines
            );
            0
        }
        Err(failure) => {
            report(&failure);
            failure.error.exit_code()
        }
    }
}

fn color_choice() -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

fn report(failure: &Failure) {
    let mut files = SimpleFiles::new();
    let file_id = files.add("<stdin>".to_string(), failure.source.clone());
    let diagnostic = failure.error.clone().with_file_id(file_id).to_diagnostic();

    let writer = StandardStream::stderr(color_choice());
    let config = term::Config::default();
    let _ = term::emit_to_write_style(&mut writer.lock(), &config, &files, &diagnostic);
}
