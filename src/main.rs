use std::io::{self, Write};
use std::process::ExitCode;

use negascout::driver::{self, DriverError};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), DriverError> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    let request = driver::read_request(stdin.lock(), &mut stdout)?;
    let response = driver::respond(&request)?;
    write!(stdout, "{response}")?;
    Ok(())
}
