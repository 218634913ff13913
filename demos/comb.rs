//! Simple command that prints one or '-n count' timestamped UUID strings, or with '-r' the span of
//! time the default layout covers before its timestamp wraps

use std::{env, io, io::Write, process::ExitCode};

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let opts = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opts) => opts,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-n count] [-r]",
                    program.as_deref().unwrap_or("comb")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    if opts.range {
        writeln!(buf, "{}", comb::Config::DEFAULT.time_range())?;
        return Ok(ExitCode::SUCCESS);
    }

    for _ in 0..opts.count.unwrap_or(1) {
        writeln!(buf, "{}", comb::new_timestamped_uuid()?)?;
    }

    Ok(ExitCode::SUCCESS)
}

#[derive(Default)]
struct Opts {
    count: Option<usize>,
    range: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Opts, String> {
    let mut opts = Opts::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-r" => opts.range = true,
            "-n" => {
                if opts.count.is_some() {
                    return Err("option 'n' given more than once".to_owned());
                }
                let Some(n_arg) = args.next() else {
                    return Err("argument to option 'n' missing".to_owned());
                };
                let Ok(c) = n_arg.parse() else {
                    return Err(format!("invalid argument to option 'n': '{}'", n_arg));
                };
                opts.count.replace(c);
            }
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        }
    }
    Ok(opts)
}
