// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! - [`notifications`] - Toast manager, host overlay and toast widget
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode and toast color schemes

pub mod design_tokens;
pub mod notifications;
pub mod theming;
