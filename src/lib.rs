// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![warn(dead_code)]                   // Unused code is reported
#![warn(unused_imports)]              // Unused imports are reported
#![warn(unused_variables)]            // Unused variables are reported
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # UniFi Group Sync
//!
//! Keeps a UniFi Controller firewall group in sync with the DNS resolution
//! of a list of hostnames.
//!
//! ## Overview
//!
//! Allow-lists for services whose egress addresses rotate (synthetic
//! monitoring probes, for example) go stale quickly. This crate treats a
//! plain hostname file as the source of truth:
//!
//! 1. **Resolve**: every hostname is resolved to its IPv4 addresses
//! 2. **Fetch**: the firewall group is read from the controller
//! 3. **Diff**: the current members are compared with the resolved set
//! 4. **Confirm**: the change table is shown and, optionally, approved
//! 5. **Apply**: the group is written back with only its members replaced
//!
//! ## Modules
//!
//! - [`config`]: Run settings, `.env` loading and validation
//! - [`resolver`]: Host list parsing and DNS resolution
//! - [`controller`]: Controller REST client and firewall group model
//! - [`planner`]: Desired group construction and member diff
//! - [`syncer`]: The pipeline driver
//! - [`cli`]: Command-line interface
//!
//! ## Host file
//!
//! ```text
//! # Grafana Cloud synthetic monitoring probes
//! probe-eu-west.example.com
//! probe-us-east.example.com
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod planner;
pub mod resolver;
pub mod syncer;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, OutputFormatter, Prompter, TerminalPrompter};
pub use config::{LogLevel, SyncSettings};
pub use controller::{ControllerClient, FirewallGroup, GroupStore};
pub use error::{Result, SyncError};
pub use planner::{DiffEngine, DiffReport, SyncPlan};
pub use resolver::{HostIpMap, HostResolver, SystemResolver};
pub use syncer::{SyncOutcome, Syncer};
