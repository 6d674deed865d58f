// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   copy:   copy_dir_contents_async()  recursive tree copy
//!   remove: remove_*_if_exists(), replace_dir()
//! ```

pub mod fs;
