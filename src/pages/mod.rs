// SPDX-License-Identifier: MPL-2.0

//! Page view modules for the Stageboard application.
//! Each module contains the view logic for a specific page.

pub mod board;
pub mod settings;
pub mod widgets;
