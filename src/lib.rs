// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

#![deny(missing_docs)]
#![forbid(unsafe_code)]

//! Declare command-line arguments and resolve their values from
//! pre-parsed flags.
//!
//! If you want a batteries-included framework (tokenizing, subcommands,
//! completions), you should consider the excellent
//! [`clap`](https://crates.io/crates/clap) crate instead.
//!
//! ---
//!
//! Table of contents:
//!
//! * [Overview](#overview)
//! * [Quickstart](#quickstart)
//! * [Examples](#examples)
//! * [Help text](#help-text)
//! * [Errors and signals](#errors-and-signals)
//! * [Terminology](#terminology)
//! * [Limitations](#limitations)
//!
//! ---
//!
//! # Overview
//!
//! This crate does not tokenize the command line. It sits one layer up:
//! a tokenizer (any minimist-style parser, or twenty lines of your own)
//! turns the raw invocation into a map of flag name to value, and this
//! crate answers the questions a program actually asks ("what is the
//! value of `port`?", "should I show help?", "what does the help text
//! look like?") from a set of declared expectations.
//!
//! Each declaration carries:
//!
//! - one or more interchangeable **aliases** (`"port, p"`),
//! - an optional **default** value,
//! - an optional **help** description,
//! - an optional **convertor**: a function from the untyped resolved
//!   value to whatever the program wants.
//!
//! Resolution precedence is fixed: a raw value supplied under any alias
//! (scanned in declared order) beats the declared default, which beats
//! the absent marker [Value::Null]. Whichever of the three was selected
//! is passed through the convertor.
//!
//! # Quickstart
//!
//! 1. Create an [Args] collection and [add][Args::add] an [Arg]
//!    declaration for every argument your program supports.
//!
//!    ```rust
//!    # use argmap::{Arg, Args};
//!    #
//!    let mut args = Args::new();
//!
//!    // Support "--port <value>" (alias "--p"), defaulting to 8080.
//!    args.add(Arg::new("port, p").help("TCP port to bind").default(8080));
//!
//!    // Support a bare "--quiet" flag.
//!    args.add(Arg::new("quiet"));
//!    ```
//!
//! 1. Create an [App] from the declarations and the flag map your
//!    tokenizer produced.
//!
//!    ```rust
//!    # use argmap::{App, Arg, Args, Flags};
//!    #
//!    # let mut args = Args::new();
//!    # args.add(Arg::new("port, p").default(8080));
//!    #
//!    # let flags = Flags::new();
//!    let app = App::new().args(args).flags(flags);
//!    ```
//!
//! 1. Query it.
//!
//!    ```rust
//!    # use argmap::{App, Arg, Args, Flags};
//!    #
//!    # fn main() -> argmap::Result<()> {
//!    # let mut args = Args::new();
//!    # args.add(Arg::new("port, p").default(8080));
//!    #
//!    # let app = App::new().args(args).flags(Flags::new());
//!    if app.should_help() {
//!        return Err(app.help_requested());
//!    }
//!
//!    let port = app.get("port")?;
//!    # assert_eq!(port, argmap::Value::from(8080));
//!    # Ok(())
//!    # }
//!    ```
//!
//! # Examples
//!
//! Below is a full program, including the signal handling a real `main`
//! performs. The flag map is built inline here; normally it comes from
//! your tokenizer.
//!
//! ```rust
//! use argmap::{App, Arg, Args, Error, Flags, Value};
//!
//! fn run(flags: Flags) -> argmap::Result<()> {
//!     let mut args = Args::new();
//!
//!     args.add(
//!         Arg::new("name, n")
//!             .help("Name to greet")
//!             .default("world"),
//!     );
//!
//!     args.add(
//!         Arg::new("count, c")
//!             .help("Number of greetings")
//!             .default(1)
//!             .convert(|value| match value {
//!                 Value::String(s) => {
//!                     s.parse::<u64>().map(Value::from).unwrap_or(Value::Null)
//!                 }
//!                 value => value,
//!             }),
//!     );
//!
//!     let mut app = App::new().args(args).flags(flags);
//!
//!     app.set_description("Greet someone from the command line.");
//!     app.set_version("v0.1.0");
//!
//!     if app.should_help() {
//!         return Err(app.help_requested());
//!     }
//!
//!     let count = app
//!         .get("count")?
//!         .as_u64()
//!         .ok_or_else(|| Error::invalid_value("count must be a number"))?;
//!
//!     let name = app.get("name")?;
//!     let name = name.as_str().unwrap_or("world");
//!
//!     for _ in 0..count {
//!         println!("hello, {}", name);
//!     }
//!
//!     Ok(())
//! }
//!
//! fn main() {
//!     let mut flags = Flags::new();
//!     flags.insert("c".into(), Value::from("2"));
//!
//!     if let Err(err) = run(flags) {
//!        match err {
//!            Error::HelpRequested(text) => println!("{}", text),
//!            err if err.is_signal() => eprintln!("ERROR: {}", err),
//!            err => panic!("BUG: {}", err),
//!        }
//!     }
//! }
//! ```
//!
//! For further examples, try out the programs in the `demos/` directory:
//!
//! ```bash
//! $ cargo run --example resolve -- --name rust --count 3
//! $ cargo run --example resolve -- --help
//! $ cargo run --example validate -- --port=70000
//! ```
//!
//! # Help text
//!
//! [App::help_message] renders a deterministic message from the same
//! declarations used for resolution: a leading block with the session
//! description and a `Version:` line (each only when set), then one
//! block per declaration in registration order, blocks separated by
//! blank lines:
//!
//! ```text
//!   Greet someone from the command line.
//!   Version: 0.1.0
//!
//!   --name, --n
//!     Name to greet
//!     [default: "world"]
//!
//!   --count, --c
//!     Number of greetings
//!     [default: 1]
//! ```
//!
//! Defaults are rendered through a generic value inspector (strings are
//! quoted, numbers are not), so what you declared is what you read.
//! Versions are normalized: a leading `v` on a dotted-numeric run is
//! stripped, so `set_version("v1.2.3")` renders as `1.2.3`.
//!
//! # Errors and signals
//!
//! Two [Error] variants are *signals*: expected, user-facing outcomes
//! meant to be caught once at the top of the program and printed.
//!
//! - [Error::HelpRequested] carries the rendered help text. It is never
//!   raised automatically: the program consults [App::should_help] and
//!   raises it via [App::help_requested] when it sees fit. Print the
//!   payload and exit zero.
//! - [Error::InvalidValue] carries a message about a rejected value,
//!   built with [Error::invalid_value] by convertors or caller-side
//!   validation. Print the payload and exit non-zero.
//!
//! [Error::is_signal] distinguishes these, with a single check, from
//! faults such as [Error::UnknownArgument] (querying a name that was
//! never declared: a bug in the calling program, not user input).
//! The crate itself never catches anything: convertor panics and
//! caller errors propagate untouched.
//!
//! # Terminology
//!
//! - An "alias" is one of possibly several interchangeable names for a
//!   single declared argument. The first is the primary name.
//!
//! - The "flag map" is the externally parsed mapping from flag name to
//!   untyped value that resolution runs against. Keys carry no dashes.
//!
//! - A "convertor" is a caller-supplied total function mapping the
//!   untyped raw (or default, or absent) value to the argument's
//!   intended type.
//!
//! - A "signal" is a typed error used to short-circuit normal execution
//!   for an expected reason (help requested, invalid value).
//!
//! # Limitations
//!
//! - No tokenizing: the crate consumes a flag map, it never looks at
//!   `std::env::args()`.
//!
//! - Values are [serde_json::Value]s, not native types; type narrowing
//!   is the convertor's (or the caller's) job.
//!
//! - "No default given" and "default explicitly set to `Null`" are the
//!   same state, just as a flag-map entry holding `Null` is the same as
//!   a missing entry.
//!
//! - Alias uniqueness across declarations is not enforced; lookups are
//!   first-registered-wins.
//!
//! - No constraint DSL (ranges, patterns): convertors are free-form
//!   transforms and validation is ordinary code.

mod args;
mod error;

pub use error::{Error, Result};

pub use args::{App, Arg, Args, Convert, Flags};

pub use serde_json::Value;
