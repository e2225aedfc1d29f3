// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for process management.
//!
//! ```text
//!              core
//!               |
//!        +------+------+
//!        |             |
//!        v             v
//!     process        signal
//!        |             |
//!   Builder/Output  SignalForwarder
//!   stream readers  SIGINT/SIGTERM -> child or its group
//! ```

pub mod process;
pub mod signal;
