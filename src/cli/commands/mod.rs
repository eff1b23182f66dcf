//! Command implementations organized by category.

/// Product management commands
pub mod product;

/// Monthly recap command
pub mod recap;

/// Sale commands
pub mod sale;

/// Widget summary command
pub mod widget;
