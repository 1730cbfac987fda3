// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) wires these modules into the interactive prompt.
//
// Module responsibilities:
// - `config`: Endpoint URLs, request timeout and pacing delay, read from
//   the environment with defaults.
// - `models`: User, post and user-id shapes received from (or sent to)
//   the remote API.
// - `api`: Blocking HTTP GET wrapper plus the two fetch functions.
// - `interrupt`: Ctrl-C flag polled by the loop between steps.
// - `report`: Orchestrates both fetches for one id and prints the summary.
// - `ui`: The read-eval-print loop and its input sources.
pub mod api;
pub mod config;
pub mod interrupt;
pub mod models;
pub mod report;
pub mod ui;
