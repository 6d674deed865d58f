// datatybe-build: MPI-datatybe Build Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async filesystem helpers.
//!
//! ```text
//! copy:   copy_dir_contents_async() recursive directory copy
//! remove: remove_dir_if_exists()    rm -r, absent is fine
//!         remove_file_if_exists()   rm, absent is fine
//!         replace_dir()             drop old target, rename staged tree in
//! ```

pub mod copy;
pub mod remove;
