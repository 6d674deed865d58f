// datatybe-build: MPI-datatybe Build Orchestrator
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
//!                |        clone / configure / compile
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  key = value, env, --set  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!              layout      state    options
//!              paths     .json mark  cmake -D
//!                 |
//!          +------+------+
//!          v             v
//!       acquire        tools
//!    clone / copy   git/cmake/make/generator
//!          |
//!          v
//!         git (gix HEAD)
//!
//!   +-----------------------------------------+
//!   |  core        process runner             |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod acquire;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod layout;
pub mod logging;
pub mod options;
pub mod state;
pub mod tools;
pub mod utility;
