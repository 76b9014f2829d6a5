use clap::Parser as ClapParser;
use rpal_ast::cli::{self, CliError, Invocation};
use std::ffi::OsString;
use std::io;

#[derive(ClapParser)]
#[command(name = "rpal")]
#[command(about = "RPAL front-end - prints the abstract syntax tree of a program")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// `-ast FILE` to print the tree of FILE, or `-l` for a listing
    #[arg(allow_hyphen_values = true, trailing_var_arg = true, num_args = 0..)]
    args: Vec<String>,
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .try_init();

    // A leading `--` puts clap in trailing mode before any user argument, so
    // a literal `--` from the user reaches `Invocation::from_args` and is
    // reported as an unidentified switch instead of being swallowed.
    let mut raw = std::env::args_os();
    let bin = raw.next().unwrap_or_else(|| OsString::from("rpal"));
    let cli = Cli::parse_from([bin, OsString::from("--")].into_iter().chain(raw));

    if let Err(e) = run(&cli.args) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), CliError> {
    let invocation = Invocation::from_args(args)?;
    let stdout = io::stdout();
    cli::run(&invocation, &mut stdout.lock())
}
