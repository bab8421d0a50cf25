use thiserror::Error;

/// The error type.
///
/// Two variants are "signals": expected, user-facing outcomes that a
/// program catches once, near the top of `main`, and renders before
/// exiting ([Error::HelpRequested] and [Error::InvalidValue]). The rest
/// are programming faults that should surface with full diagnostic
/// detail. Use [Error::is_signal] to tell the two groups apart with a
/// single check.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    //------------------------------
    // Signals (user-facing, caught once at the top level)
    //------------------------------
    /// The user asked for help.
    ///
    /// The payload is the fully rendered help text: print it and exit
    /// zero.
    #[error("{0}")]
    HelpRequested(String),

    /// A resolved value failed caller-side validation or conversion.
    ///
    /// The payload is a user-facing message: print it and exit non-zero.
    #[error("{0}")]
    InvalidValue(String),

    //------------------------------
    // Incorrect API usage errors (programmer error)
    //------------------------------
    /// A value was requested for a name that was never declared.
    ///
    /// This means the calling code queried an argument it forgot to
    /// register, not that the user omitted a flag. Fix the declaration
    /// rather than catching this at runtime.
    #[error("unknown argument: {0:?}")]
    UnknownArgument(String),
}

impl Error {
    /// Build an [Error::InvalidValue] signal carrying `msg`.
    ///
    /// Intended for convertors and caller-side validation logic that
    /// want a rejected value reported as a friendly message rather than
    /// a fault.
    pub fn invalid_value<M: Into<String>>(msg: M) -> Self {
        Error::InvalidValue(msg.into())
    }

    /// Returns `true` if the error is one of this crate's user-facing
    /// signals.
    ///
    /// Programs use this to decide between printing a friendly message
    /// and surfacing a fault (stack trace, bug report, non-zero exit):
    /// [Error::HelpRequested] and [Error::InvalidValue] are signals,
    /// [Error::UnknownArgument] is not.
    pub fn is_signal(&self) -> bool {
        matches!(self, Error::HelpRequested(_) | Error::InvalidValue(_))
    }
}

/// Convenience type that allows a function to be defined as returning a
/// [Result], but which only requires the success type to be specified,
/// defaulting the error type to this crates `Error` type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
