extern crate structopt;

use std::fs::read_to_string;
use std::io::{stdin, stdout};
use std::path::PathBuf;
use std::process::exit;

use flexi_logger::Logger;
use structopt::StructOpt;

use gridlang::run::*;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "gridlang",
    about = "Runs a two-dimensional array program and prints the value of its top-left item."
)]
struct Opt {
    #[structopt(parse(from_os_str), required_unless = "code", help = "Program file")]
    file: Option<PathBuf>,
    #[structopt(short, long, conflicts_with = "file", help = "Program text, given inline")]
    code: Option<String>,
    #[structopt(long, help = "Seed for the random number generator")]
    seed: Option<u64>,
    #[structopt(long, help = "Disable colors in error messages")]
    no_color: bool,
    #[structopt(
        long,
        default_value = "warn",
        help = "Log level when RUST_LOG is not set, e.g. `debug` or `trace`"
    )]
    log_level: String,
}

fn main() {
    let opt = Opt::from_args();

    let _logger = match Logger::try_with_env_or_str(&opt.log_level).and_then(|logger| logger.start()) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("cannot start logging: {}", e);
            exit(2)
        }
    };

    let (name, source) = match (&opt.code, &opt.file) {
        (Some(code), _) => ("<code>".to_string(), code.clone()),
        (None, Some(path)) => match read_to_string(path) {
            Ok(source) => (path.display().to_string(), source),
            Err(e) => {
                eprintln!("cannot read {}: {}", path.display(), e);
                exit(2)
            }
        },
        (None, None) => unreachable!("structopt requires a file or --code"),
    };

    let sess = Sess::new(&name, &source, !opt.no_color);
    let stdin = stdin();
    let stdout = stdout();
    let ok = match opt.seed {
        Some(seed) => run_program(&sess, &mut Runner::with_seed(stdin.lock(), stdout.lock(), seed)),
        None => run_program(&sess, &mut Runner::new(stdin.lock(), stdout.lock())),
    };
    if !ok {
        exit(1)
    }
}
