// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::fmt;
use std::rc::Rc;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{Error, Result};

/// Prefix used when rendering aliases in help text.
const FLAG_PREFIX: &str = "--";

/// Name of the raw flag that [App::should_help] consults.
const HELP_FLAG: &str = "help";

/// Indentation for header lines in help text.
const HEADER_INDENT: &str = "  ";

/// Indentation for help and default lines beneath a header.
const BODY_INDENT: &str = "    ";

/// The map of pre-parsed flags that an [App] resolves against.
///
/// Produced externally, by whatever tokenizer the program uses to turn
/// the raw command line into flag/value pairs (conventional long-flag
/// syntax: `--name value`, `--name=value`, bare `--flag` as boolean
/// true). Keys are bare flag names without dashes; values are whatever
/// the tokenizer produced: strings, booleans, numbers, or arrays for
/// repeated flags.
///
/// # Notes
///
/// - This crate never re-tokenizes or validates the original command
///   line; the map is treated as an opaque, immutable source.
/// - An entry whose value is [Value::Null] is indistinguishable from a
///   missing entry.
pub type Flags = serde_json::Map<String, Value>;

/// A convertor: total function from the untyped selected value to the
/// argument's intended type, still carried as a [Value].
///
/// The selected value is the raw flag value if any alias of the
/// argument was supplied, otherwise the declared default, otherwise
/// [Value::Null]. A convertor that cares about type safety must
/// therefore tolerate its own absent case.
pub type Convert = dyn Fn(Value) -> Value;

/// Split a joined name declaration into its component aliases.
///
/// Splits on any run of whitespace and/or commas, so `"port, p"`,
/// `"port p"` and `"port,p"` are all equivalent to `["port", "p"]`.
fn split_aliases(name: &str) -> Vec<String> {
    name.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect()
}

/// JavaScript-style truthiness for flag values.
///
/// `Null`, `false`, `0` and the empty string are falsy; everything else
/// (including empty arrays and objects) is truthy.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strip the leading `v` from the first dotted-numeric run in `text`.
///
/// `"v1.2.3"` becomes `"1.2.3"`; text outside the run is untouched, so
/// `"release v2.0 (beta)"` becomes `"release 2.0 (beta)"`. A bare `v2`
/// is left alone: a single integer is not a dotted run.
fn strip_version_prefix(text: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();

    let pattern = PATTERN.get_or_init(|| {
        // A 'v' immediately followed by two or more dot-separated
        // numeric components.
        Regex::new(r"v(\d+(?:\.\d+)+)").expect("hard-coded pattern")
    });

    pattern.replace(text, "$1").into_owned()
}

/// One declared argument: its aliases, help text, default value and
/// convertor.
///
/// Declarations use the consuming-builder pattern:
///
/// ```rust
/// use argmap::Arg;
///
/// let arg = Arg::new("port, p")
///     .help("TCP port to bind")
///     .default(8080);
/// ```
///
/// # Notes
///
/// - The first alias is the primary name, shown first in help text; any
///   alias is accepted by [App::get].
/// - A declaration without a convertor resolves values as-is.
#[derive(Clone)]
pub struct Arg {
    /// Alias names, primary first.
    names: Vec<String>,
    /// Description of the argument.
    help: Option<String>,
    /// Value to resolve to when no alias appears in the flag map.
    default: Option<Value>,
    /// Conversion applied to the resolved value.
    convert: Option<Rc<Convert>>,
}

impl Arg {
    /// Create a new declaration from a joined name string.
    ///
    /// The string is split into aliases on runs of whitespace and/or a
    /// comma optionally surrounded by whitespace: `"port, p"`,
    /// `"port p"` and `"port,p"` all declare the aliases `port` and
    /// `p`.
    pub fn new(name: &str) -> Self {
        Arg {
            names: split_aliases(name),
            help: None,
            default: None,
            convert: None,
        }
    }

    /// Create a new declaration from explicit alias strings.
    ///
    /// Each element is trimmed independently but never re-split, and
    /// elements that are empty after trimming are dropped.
    pub fn aliases<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        Arg {
            names,
            help: None,
            default: None,
            convert: None,
        }
    }

    /// Specify the help text for the argument.
    ///
    /// Embedded newlines are honoured: each line is rendered separately
    /// (and indented) in the help message.
    pub fn help(self, help: &str) -> Self {
        Arg {
            help: Some(help.into()),
            ..self
        }
    }

    /// Specify the value the argument resolves to when no alias is
    /// present in the flag map.
    ///
    /// Falsy values (`0`, `false`, `""`) are honoured as defaults; only
    /// [Value::Null] means "no default".
    pub fn default(self, default: impl Into<Value>) -> Self {
        Arg {
            default: Some(default.into()),
            ..self
        }
    }

    /// Specify the convertor for the argument.
    ///
    /// The convertor runs on every resolution, whether the selected
    /// value came from the flag map, from the declared default, or is
    /// [Value::Null] because neither was present.
    pub fn convert<F>(self, convert: F) -> Self
    where
        F: Fn(Value) -> Value + 'static,
    {
        Arg {
            convert: Some(Rc::new(convert)),
            ..self
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Arg")
            .field("names", &self.names)
            .field("help", &self.help)
            .field("default", &self.default)
            .field("convert", &self.convert.as_ref().map(Rc::as_ptr))
            .finish()
    }
}

/// The canonical, normalized form of one declared argument.
///
/// Built once when a registry is installed into an [App]; immutable
/// thereafter.
#[derive(Clone)]
struct Expect {
    /// Trimmed, non-empty aliases, primary first.
    names: Vec<String>,
    /// Trimmed help text, or absent.
    help: Option<String>,
    /// Declared default, or absent.
    default: Option<Value>,
    /// Convertor; the identity function when none was declared.
    convert: Rc<Convert>,
}

impl From<Arg> for Expect {
    /// Normalize a declaration: trim the help text (empty becomes
    /// absent), collapse a [Value::Null] default to absent, fall back
    /// to the identity convertor.
    fn from(arg: Arg) -> Self {
        let help = arg
            .help
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty());

        let default = arg.default.filter(|d| !d.is_null());

        let convert: Rc<Convert> = arg
            .convert
            .unwrap_or_else(|| Rc::new(std::convert::identity));

        Expect {
            names: arg.names,
            help,
            default,
            convert,
        }
    }
}

impl fmt::Display for Expect {
    /// Renders the header line for the expectation: every alias as a
    /// flag-style token, joined by `, `.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let flags: Vec<String> = self
            .names
            .iter()
            .map(|n| format!("{}{}", FLAG_PREFIX, n))
            .collect();

        write!(f, "{}", flags.join(", "))
    }
}

impl fmt::Debug for Expect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Expect")
            .field("names", &self.names)
            .field("help", &self.help)
            .field("default", &self.default)
            .field("convert", &Rc::as_ptr(&self.convert))
            .finish()
    }
}

/// Represents a collection of argument declarations.
///
/// Declaration order is preserved: it determines help-text order, and
/// when two declarations share an alias the first registered wins at
/// lookup time.
#[derive(Clone, Debug, Default)]
pub struct Args {
    /// Declarations, in the order they were added.
    entries: Vec<Arg>,
}

impl Args {
    /// Create a new argument collection.
    pub fn new() -> Self {
        Args::default()
    }

    /// Returns the number of registered arguments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no arguments have been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a single argument.
    pub fn add(&mut self, arg: Arg) {
        self.entries.push(arg);
    }

    /// Determine if a declaration exists for the specified alias.
    pub fn exists(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the first declaration whose alias set contains `name`.
    pub fn get(&self, name: &str) -> Option<&Arg> {
        self.entries
            .iter()
            .find(|a| a.names.iter().any(|n| n == name))
    }
}

/// The main object used to resolve declared arguments against a flag
/// map.
///
/// All consumers of the crate create a single object of this type,
/// built once with the declarations and the externally parsed flags:
///
/// ```rust
/// use argmap::{App, Arg, Args, Flags};
///
/// let mut args = Args::new();
/// args.add(Arg::new("port, p").default(8080));
///
/// let app = App::new().args(args).flags(Flags::new());
/// # assert!(!app.should_help());
/// ```
///
/// The description and version are the only state that may change after
/// construction ([App::set_description], [App::set_version]); both are
/// expected to be set before the first call to [App::help_message].
#[derive(Clone, Debug, Default)]
pub struct App {
    /// Text shown at the top of the help message.
    description: String,
    /// Version shown in the help message, normalized.
    version: String,
    /// Canonical declarations, in registration order.
    expects: Vec<Expect>,
    /// The externally parsed flag map.
    flags: Flags,
}

impl App {
    /// Create a new application object.
    pub fn new() -> Self {
        App::default()
    }

    /// Install the argument declarations.
    ///
    /// Normalization happens here, once: every declaration is converted
    /// to its canonical form in registration order. The registry is
    /// read-only from this point on.
    pub fn args(self, args: Args) -> Self {
        let expects = args.entries.into_iter().map(Expect::from).collect();

        App { expects, ..self }
    }

    /// Supply the pre-parsed flag map to resolve against.
    pub fn flags(self, flags: Flags) -> Self {
        App { flags, ..self }
    }

    /// Set the description shown at the top of the help message.
    pub fn set_description(&mut self, text: &str) {
        self.description = text.trim().to_string();
    }

    /// Set the version shown in the help message.
    ///
    /// A leading `v` on the first embedded dotted-numeric run is
    /// stripped, so `"v1.2.3"` renders as `1.2.3`; text outside the run
    /// is preserved as-is.
    pub fn set_version(&mut self, text: &str) {
        self.version = strip_version_prefix(text.trim());
    }

    /// Returns the raw value for the first of `names` present in the
    /// flag map, or [None] if none of them are.
    ///
    /// Candidates are scanned in the order given; an entry whose value
    /// is [Value::Null] counts as absent. This is the low-level,
    /// pre-conversion lookup that [App::get] builds on, exposed for
    /// callers that need a value before its convertor runs.
    pub fn get_raw<'a, I>(&self, names: I) -> Option<&Value>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .filter_map(|name| self.flags.get(name))
            .find(|value| !value.is_null())
    }

    /// Resolve the value of the declared argument known by `name`.
    ///
    /// `name` may be any alias of the declaration. The raw value is
    /// looked up under *all* of the declaration's aliases (in declared
    /// order), falling back to the declared default, falling back to
    /// [Value::Null]; whichever was selected is passed through the
    /// declaration's convertor and the result returned.
    ///
    /// Since the flag map and the registry never change, repeated calls
    /// for the same name return the same value.
    ///
    /// # Errors
    ///
    /// Fails with [Error::UnknownArgument] if no declaration carries
    /// `name`. That is a bug in the calling program, not a user
    /// mistake: fix the declaration rather than handling the error.
    pub fn get(&self, name: &str) -> Result<Value> {
        let expect = self
            .expects
            .iter()
            .find(|e| e.names.iter().any(|n| n == name))
            .ok_or_else(|| Error::UnknownArgument(name.into()))?;

        let selected = self
            .get_raw(expect.names.iter().map(String::as_str))
            .cloned()
            .or_else(|| expect.default.clone())
            .unwrap_or(Value::Null);

        Ok((expect.convert)(selected))
    }

    /// Report whether the user asked for help.
    ///
    /// Returns `true` iff the flag map holds a truthy value under
    /// `help`; `false`, `0` and the empty string do not count.
    pub fn should_help(&self) -> bool {
        self.flags.get(HELP_FLAG).map_or(false, truthy)
    }

    /// Render the full help message.
    ///
    /// A pure function of the registry plus the description/version
    /// metadata: calling it twice without intervening mutation yields
    /// byte-identical output.
    ///
    /// The message is a sequence of blocks separated by single blank
    /// lines. The leading block carries the description and a
    /// `Version:` line, each only when set; it is omitted entirely when
    /// neither is. Then one block per declaration, in registration
    /// order: a header line listing every alias as a `--flag` token,
    /// the help text one line at a time beneath it, and a
    /// `[default: ..]` line when a default was declared.
    pub fn help_message(&self) -> String {
        let mut lines = Vec::<String>::new();

        if !self.description.is_empty() {
            lines.push(format!("{}{}", HEADER_INDENT, self.description));
        }

        if !self.version.is_empty() {
            lines.push(format!("{}Version: {}", HEADER_INDENT, self.version));
        }

        for expect in &self.expects {
            // Blank separator between blocks (none before the first).
            if !lines.is_empty() {
                lines.push(String::new());
            }

            lines.push(format!("{}{}", HEADER_INDENT, expect));

            if let Some(help) = &expect.help {
                for line in help.lines() {
                    lines.push(format!("{}{}", BODY_INDENT, line));
                }
            }

            if let Some(default) = &expect.default {
                lines.push(format!("{}[default: {}]", BODY_INDENT, default));
            }
        }

        let mut message = lines.join("\n");
        message.push('\n');

        message
    }

    /// Build the help-requested signal, carrying the fully rendered
    /// help message as its payload.
    ///
    /// This never fires on its own: the caller decides when, usually
    /// right after [App::should_help] returns `true`, and raises it by
    /// returning it as the error from `main` (or wherever the program
    /// triages this crate's signals).
    pub fn help_requested(&self) -> Error {
        Error::HelpRequested(self.help_message())
    }
}
