//! Internationalization (i18n) module for multi-locale support.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported locales, their
//!   metadata, and the priority order used by cross-locale lookups
//! - `locale`: Type-safe `Locale` that can only hold supported codes
//! - `strings`: Localized UI chrome (breadcrumbs, headings, notices)
//! - `format`: Locale-aware number formatting and parsing
//!
//! # Example
//!
//! ```rust,ignore
//! use calc_pages::i18n::Locale;
//!
//! let default = Locale::default();
//! let spanish = Locale::parse("es");
//! let priority: Vec<Locale> = Locale::all().collect();
//! ```

mod format;
mod locale;
mod registry;
mod strings;

pub use format::{format_number, parse_number};
pub use locale::Locale;
pub use registry::{LocaleConfig, LocaleRegistry};
pub use strings::LocaleStrings;
