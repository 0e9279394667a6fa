//! # Flip-Ceremony Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-subsystem ceremony flows
//!     ├── ceremony_flow.rs   # Fetch -> answer -> deadline -> submit
//!     ├── epoch_boundary.rs  # Epoch resets, archiving, notifier races
//!     └── restart.rs         # Durable state across simulated restarts
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p fc-tests
//!
//! # By category
//! cargo test -p fc-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
