//! Localized calculator pages.
//!
//! One calculator implementation is served under a different slug in each
//! supported locale. Requests resolve through the calculator registry, slugs
//! from another locale redirect to the right one, and the calculator module
//! is located by the shape of its exports and loaded into the page shell.

pub mod calculator;
pub mod config;
pub mod i18n;
pub mod locator;
pub mod metrics;
pub mod registry;
pub mod render;
pub mod resolver;
pub mod server;
