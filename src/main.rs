use std::{
    fmt::Display,
    io::{self, BufWriter, Write, stdout},
    path::PathBuf,
    process::ExitCode,
};

use anstream::stderr;
use anstyle::{AnsiColor, Color, Style};
use clap::{CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::{Generator, Shell};

use unicode_idgen::{
    error::Error,
    header,
    recipes::{RECIPES, Table, build_tables},
    source::{CompiledData, UcdDirectory},
};

const DEFAULT_OUTPUT: &str = "include/unicode.h";

/// A tool for generating Unicode identifier and whitespace tables as a C header
///
/// Without a subcommand, the tables are written to the output header.
#[derive(Parser, Debug)]
#[command(version, args_conflicts_with_subcommands = true)]
struct Args {
    #[command(flatten)]
    options: Options,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Args, Debug)]
struct Options {
    /// The path of the generated header
    #[arg(short, long, value_hint = ValueHint::FilePath, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Read Unicode data from a Unicode Character Database directory instead of the built-in data
    ///
    /// The directory must contain UnicodeData.txt and Blocks.txt.
    #[arg(long, value_hint = ValueHint::DirPath)]
    ucd_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check if the generated header is up to date
    ///
    /// Will exit with exit code 0 if it is and with exit code 1 if it isn't.
    /// The header is never written.
    Check {
        #[command(flatten)]
        options: Options,
    },
    /// Generate a tab-completion script for your shell
    Completions {
        /// The shell to target
        shell: Shell,
    },
}

mod exit_codes {
    pub const OUT_OF_DATE: u8 = 1;
    pub const _USAGE: u8 = 2; // Used by clap
    pub const IO: u8 = 3;
    pub const DATA: u8 = 4;
}

fn main() -> ExitCode {
    let args = Args::parse();

    match args.command {
        None => handle_result(generate(&args.options)),
        Some(Command::Check { options }) => match check(&options) {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => {
                print_error(&format_args!(
                    "{} is out of date",
                    options.output.display()
                ));
                ExitCode::from(exit_codes::OUT_OF_DATE)
            }
            Err(error) => report(&error),
        },
        Some(Command::Completions { shell }) => handle_io_result({
            let mut command = Args::command();
            command.set_bin_name(command.get_name().to_string());
            command.build();

            let mut file = stdout().lock();

            shell
                .try_generate(&command, &mut file)
                .and_then(|()| file.flush())
        }),
    }
}

fn build(options: &Options) -> Result<Vec<Table>, Error> {
    match &options.ucd_dir {
        Some(dir) => build_tables(RECIPES, &UcdDirectory::open(dir)?),
        None => build_tables(RECIPES, &CompiledData),
    }
}

fn generate(options: &Options) -> Result<(), Error> {
    let tables = build(options)?;
    header::write_atomically(&tables, &options.output)
}

fn check(options: &Options) -> Result<bool, Error> {
    let tables = build(options)?;
    header::is_up_to_date(&tables, &options.output)
}

fn print_error<E: Display>(error: &E) {
    const STYLE: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

    let mut stream = BufWriter::new(stderr().lock());
    let _ = writeln!(stream, "{STYLE}Error:{STYLE:#} {error}");
}

fn report(error: &Error) -> ExitCode {
    print_error(error);

    match error {
        Error::Io { .. } | Error::OutputWrite { .. } => ExitCode::from(exit_codes::IO),
        Error::DataSourceLoad { .. } | Error::InvalidRange { .. } | Error::UndefinedTable { .. } => {
            ExitCode::from(exit_codes::DATA)
        }
    }
}

fn handle_result(result: Result<(), Error>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report(&error),
    }
}

fn handle_io_result(result: io::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            print_error(&error);
            ExitCode::from(exit_codes::IO)
        }
    }
}
