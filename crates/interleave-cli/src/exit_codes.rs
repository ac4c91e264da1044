//! Process exit codes. Part of the CLI contract.

pub const OK: i32 = 0;
/// Unreadable or malformed configuration, dataset or results input.
pub const CONFIG_ERROR: i32 = 2;
