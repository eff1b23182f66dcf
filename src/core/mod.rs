//! Core business logic - framework-agnostic product, sale and reporting operations.

/// Pure monthly, weekly and product-ranking aggregation
pub mod aggregator;
/// Writing the rendered recap to a file
pub mod export;
/// Product management
pub mod product;
/// Monthly recap assembly and formatting
pub mod report;
/// Recording and loading sales
pub mod sale;
/// Summary record shared with the widget process
pub mod widget;
