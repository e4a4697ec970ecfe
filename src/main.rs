use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;

use clap::Parser;

use jlv::cli::Cli;
use jlv::config::Config;
use jlv::pipeline::{Outcome, Pipeline};
use jlv::reader::LineReader;
use jlv::render::{self, Renderer};

/// Set by the SIGINT handler; polled by the pipeline between records.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("jlv: {e}");
            return ExitCode::from(1);
        }
    };

    // Color capability is decided exactly once, before the pipeline starts.
    let use_color = render::resolve_color(config.color_mode);

    install_interrupt_handler();

    let input: Box<dyn BufRead> = if cli.input == "-" {
        Box::new(io::stdin().lock())
    } else {
        match File::open(&cli.input) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("jlv: cannot open {}: {e}", cli.input);
                return ExitCode::from(2);
            }
        }
    };

    let stdout = io::stdout();
    let reader = LineReader::new(input);
    let renderer = Renderer::new(stdout.lock(), use_color);
    let mut pipeline = Pipeline::new(reader, renderer);

    match pipeline.run(&config, &INTERRUPTED) {
        Ok(Outcome::Drained) => ExitCode::SUCCESS,
        Ok(Outcome::Interrupted) => ExitCode::from(130),
        Err(e) => {
            eprintln!("jlv: {e}");
            ExitCode::from(2)
        }
    }
}

/// Install a SIGINT handler that requests pipeline termination.
///
/// Rendered lines are written whole, so stopping between records cannot leave
/// an unterminated escape sequence on the terminal.
#[cfg(unix)]
fn install_interrupt_handler() {
    extern "C" fn handle_sigint(_: libc::c_int) {
        INTERRUPTED.store(true, std::sync::atomic::Ordering::Relaxed);
    }

    unsafe {
        libc::signal(libc::SIGINT, handle_sigint as libc::sighandler_t);
    }
}

#[cfg(not(unix))]
fn install_interrupt_handler() {}
