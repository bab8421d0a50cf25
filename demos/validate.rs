// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// An example showing caller-side validation with the value-error
/// signal: resolved values that fail a domain check are rejected with
/// a friendly message rather than a stack trace.
use std::process;

use argmap::{App, Arg, Args, Error, Flags, Value};

fn run(flags: Flags) -> argmap::Result<()> {
    let mut args = Args::new();

    args.add(
        Arg::new("port, p")
            .help("TCP port to listen on.")
            .default(8080)
            .convert(|value| match value {
                Value::String(s) => {
                    s.parse::<u64>().map(Value::from).unwrap_or(Value::Null)
                }
                value => value,
            }),
    );

    let mut app = App::new().args(args).flags(flags);

    app.set_description("Pretend to listen on a TCP port.");

    if app.should_help() {
        return Err(app.help_requested());
    }

    // The convertor produced a number (or Null); the range check is
    // plain code, reported through the value-error factory.
    let port = app
        .get("port")?
        .as_u64()
        .ok_or_else(|| Error::invalid_value("port must be a number"))?;

    if port == 0 || port > 65535 {
        return Err(Error::invalid_value(format!(
            "port {} out of range (1-65535)",
            port
        )));
    }

    println!("listening on port {} (not really)", port);

    Ok(())
}

fn main() {
    let mut flags = Flags::new();

    // Hand-built flag map; see the `resolve` demo for a tokenizer.
    for cli_arg in std::env::args().skip(1) {
        match cli_arg.split_once('=') {
            Some((name, value)) => {
                let name = name.trim_start_matches('-');
                flags.insert(name.to_string(), Value::from(value));
            }
            None => {
                let name = cli_arg.trim_start_matches('-');
                flags.insert(name.to_string(), Value::Bool(true));
            }
        }
    }

    if let Err(err) = run(flags) {
        if err.is_signal() {
            match err {
                Error::HelpRequested(text) => println!("{}", text),
                err => {
                    eprintln!("ERROR: {}", err);
                    process::exit(1);
                }
            }
        } else {
            eprintln!("BUG: {}", err);
            process::exit(2);
        }
    }
}
