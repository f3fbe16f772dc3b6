use std::{
    io::{stdin, stdout, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;

use interpreter::{InterpretError, Interpreter};

// Exit codes from sysexits.h
const EX_USAGE: u8 = 64;
const EX_DATAERR: u8 = 65;
const EX_IOERR: u8 = 74;

/// Runs a script, or starts an interactive prompt when no file is given.
#[derive(clap::Parser)]
#[command(name = "rlox")]
struct Args {
    file: Option<PathBuf>,
}

fn run_file(path: &Path, interpreter: &mut Interpreter) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    interpreter.run_source(&source, &mut stdout())?;
    Ok(())
}

fn run_prompt(interpreter: &mut Interpreter) -> anyhow::Result<()> {
    loop {
        print!("> ");
        stdout().flush()?;

        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 || line.trim().is_empty() {
            return Ok(());
        }

        match interpreter.run_source(&line, &mut stdout()) {
            Ok(()) => (),
            Err(InterpretError::Io(e)) => return Err(e.into()),
            Err(e) => eprintln!("{}", e),
        }
    }
}

fn exit_code(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<InterpretError>() {
        Some(InterpretError::CompileError(_) | InterpretError::RuntimeError(_)) => EX_DATAERR,
        _ => EX_IOERR,
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { ExitCode::from(EX_USAGE) } else { ExitCode::SUCCESS };
        }
    };

    let mut interpreter = Interpreter::new();

    let result = match args.file {
        Some(file) => {
            log::debug!("Running {}", file.display());
            run_file(&file, &mut interpreter)
        }
        None => run_prompt(&mut interpreter),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}
