//! Exit statuses reserved by the launcher.
//!
//! Every other value is owned by whichever application ran and is passed
//! through to the process exit code unchanged.

/// value: 2 <br>
/// The global command line could not be parsed. Matches clap's own usage
/// error code.
pub const NO_PARSE_CMD_LINE: i32 = 2;

/// value: 3 <br>
/// No application name was given.
pub const NO_APP_SPECIFIED: i32 = 3;

/// value: 4 <br>
/// The application name did not match any registered application.
pub const UNKNOWN_APP_SPECIFIED: i32 = 4;

/// Status for a run that completed without complaint.
pub const SUCCESS: i32 = 0;

/// Generic failure status used by the built-in applications.
pub const FAILURE: i32 = 1;
