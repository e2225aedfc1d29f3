// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                                      |
//!              ,-----------------------+------------------,
//!              v                       v                  v
//!           command  ---------->     output             editor
//!       switches, shortcuts    filter, rules, sink   proxy mode,
//!              |                 pager, summary      redirect
//!              v                       |
//!             url                      |
//!    aliases, keywords, inference      |
//!              |                       |
//!              v                       v
//!             svn  ----------------> core
//!     client adapter, info URL    process, signal
//!
//!   +-----------------------------------------+
//!   |  foundation   config, error, logging    |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod command;
pub mod config;
pub mod core;
pub mod editor;
pub mod error;
pub mod logging;
pub mod output;
pub mod svn;
pub mod url;
