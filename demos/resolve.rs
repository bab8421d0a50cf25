// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// A full example: tokenize the command line, declare the supported
/// arguments, honour `--help`, and resolve values through convertors.
use std::process;

use argmap::{App, Arg, Args, Error, Flags, Value};

/// Minimal long-flag tokenizer, standing in for whatever real parser
/// feeds the application. Supports `--name value`, `--name=value` and
/// bare `--flag` (boolean true). The library never tokenizes; this is
/// the caller's side of the bargain.
fn tokenize(cli_args: &[String]) -> Flags {
    let mut flags = Flags::new();

    let mut iter = cli_args.iter().peekable();

    while let Some(cli_arg) = iter.next() {
        let name = match cli_arg.strip_prefix("--") {
            Some(name) if !name.is_empty() => name,
            _ => continue,
        };

        if let Some((name, value)) = name.split_once('=') {
            flags.insert(name.to_string(), Value::from(value));
            continue;
        }

        match iter.peek() {
            Some(next) if !next.starts_with("--") => {
                flags.insert(name.to_string(), Value::from(next.as_str()));
                iter.next();
            }
            _ => {
                flags.insert(name.to_string(), Value::Bool(true));
            }
        }
    }

    flags
}

/// Convertor for `--count`: numeric strings become numbers, numbers
/// pass through, anything else resolves to `Null`.
fn to_number(value: Value) -> Value {
    match value {
        Value::String(s) => s.parse::<u64>().map(Value::from).unwrap_or(Value::Null),
        Value::Number(_) => value,
        _ => Value::Null,
    }
}

fn run(flags: Flags) -> argmap::Result<()> {
    let mut args = Args::new();

    args.add(
        Arg::new("name, n")
            .help("Name to greet.")
            .default("world"),
    );

    args.add(
        Arg::new("count, c")
            .help("Number of greetings.\nMust be a positive number.")
            .default(1)
            .convert(to_number),
    );

    args.add(Arg::new("shout").help("Greet in capitals."));

    let mut app = App::new().args(args).flags(flags);

    app.set_description("Greet someone from the command line.");
    app.set_version("v0.1.0");

    if app.should_help() {
        return Err(app.help_requested());
    }

    let count = app
        .get("count")?
        .as_u64()
        .ok_or_else(|| Error::invalid_value("count must be a positive number"))?;

    let name = app.get("name")?;
    let name = name.as_str().unwrap_or("world");

    let shout = app.get_raw(["shout"]).is_some();

    for _ in 0..count {
        if shout {
            println!("HELLO, {}!", name.to_uppercase());
        } else {
            println!("hello, {}", name);
        }
    }

    Ok(())
}

fn main() {
    let cli_args: Vec<String> = std::env::args().skip(1).collect();

    if let Err(err) = run(tokenize(&cli_args)) {
        match err {
            // Expected outcomes: print and exit accordingly.
            Error::HelpRequested(text) => println!("{}", text),
            err if err.is_signal() => {
                eprintln!("ERROR: {}", err);
                process::exit(1);
            }

            // Anything else is a bug in this program.
            err => {
                eprintln!("BUG: {}", err);
                process::exit(2);
            }
        }
    }
}
