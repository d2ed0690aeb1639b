//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — batch scripts that schedule
//! nightly runs branch on them.
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 1    | Runtime error (artifact write failure, bad file) |
//! | 2    | CLI usage error (bad args, missing option)       |
//! | 3    | No extractable shipment data in any input        |
//! | 4    | Configuration error (parse or validation)        |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Runtime error - an input that should have been readable was not, or an
/// artifact could not be written.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
/// Also what clap itself exits with on parse failure.
pub const EXIT_USAGE: u8 = 2;

/// Every input was read, yet no sheet yielded a single record or reject.
/// Distinct from EXIT_ERROR so schedulers can tell "empty batch" from
/// "broken batch".
pub const EXIT_NO_DATA: u8 = 3;

/// Configuration file failed to parse or validate.
pub const EXIT_CONFIG: u8 = 4;
