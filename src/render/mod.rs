//! Page rendering.
//!
//! - `server`: request -> page shell, redirect or 404
//! - `client`: loads the calculator into a rendered shell
//! - `page`: shell and full-page documents
//! - `surface`: calculator form and the not-available block
//! - `metadata`: page texts, head metadata, hreflang alternates
//! - `sitemap`: XML sitemap with hreflang alternates

pub mod client;
mod html;
pub mod metadata;
pub mod page;
pub mod server;
mod sitemap;
pub mod surface;

pub use client::{ClientLoader, LoaderState, PlaceholderSlot};
pub use html::escape_html;
pub use metadata::{absolute_url, alternates, title_from_slug, Alternate, PageMetadata, PageTexts};
pub use page::{browse_page, not_found_page, BrowseItem, Crumb, PageDocument, PageShell};
pub use server::{RenderOutcome, ServerRenderer};
pub use sitemap::sitemap_xml;
