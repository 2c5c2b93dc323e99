//! `greennest-storefront`
//!
//! **Responsibility:** the page surface of the shop.
//!
//! This crate provides:
//! - Route resolution (`/`, `/products`, `/cart`, fallback to the listing)
//! - Page view models built from catalog and cart snapshots
//! - A plain-text renderer
//! - An interactive session that turns input lines into cart actions
//!
//! Pages are a **thin shell** around the cart store; no business rules live here.

pub mod config;
pub mod error;
pub mod pages;
pub mod render;
pub mod route;
pub mod shell;

pub use config::{ConfigError, StorefrontConfig};
pub use error::ShellError;
pub use pages::{AddButton, CartPage, Header, LandingPage, ListingPage, Notice, Page, PageBody};
pub use render::Renderer;
pub use route::Route;
pub use shell::{Command, HELP, Session, Step};
