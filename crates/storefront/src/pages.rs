//! Page view models.
//!
//! Pages hold no business logic: each one is built from a read-only snapshot
//! of the catalog and cart state and describes what can be shown and which
//! actions are offered.

use greennest_cart::{CartState, total_cost, total_item_count};
use greennest_catalog::{Catalog, Product, ProductId};
use greennest_core::Money;

use crate::route::Route;

/// Shared header: brand, navigation, and the cart badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub cart_count: u64,
}

impl Header {
    pub fn build(cart: &CartState) -> Self {
        Self {
            cart_count: total_item_count(cart),
        }
    }
}

/// Landing page. Reads no state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingPage {
    pub get_started: Route,
}

impl Default for LandingPage {
    fn default() -> Self {
        Self {
            get_started: Route::Products,
        }
    }
}

/// State of a product's add action on the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddButton {
    Enabled,
    /// Already in the cart. Stays disabled until the line is zeroed or removed.
    Disabled,
}

/// One product row. The row carries the product itself, which is what its
/// add action hands to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingItem {
    pub product: Product,
    pub add: AddButton,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCategory {
    pub name: String,
    pub items: Vec<ListingItem>,
}

/// Catalog listing grouped by category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    pub categories: Vec<ListingCategory>,
}

impl ListingPage {
    pub fn build(catalog: &Catalog, cart: &CartState) -> Self {
        let categories = catalog
            .categorized()
            .into_iter()
            .map(|group| ListingCategory {
                name: group.category.to_owned(),
                items: group
                    .products
                    .into_iter()
                    .map(|p| ListingItem {
                        product: p.clone(),
                        add: if cart.is_added(p.id_typed()) {
                            AddButton::Disabled
                        } else {
                            AddButton::Enabled
                        },
                    })
                    .collect(),
            })
            .collect();

        Self { categories }
    }

    pub fn item(&self, id: &ProductId) -> Option<&ListingItem> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .find(|item| item.product.id_typed() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPageLine {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub image_ref: String,
    pub quantity: u32,
}

/// Cart detail page.
///
/// Every line offers increase, decrease and delete. Checkout is offered but
/// only ever answers with [`Notice::ComingSoon`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPage {
    pub lines: Vec<CartPageLine>,
    pub total_items: u64,
    pub total_cost: Money,
    pub continue_shopping: Route,
}

impl CartPage {
    pub fn build(cart: &CartState) -> Self {
        let lines = cart
            .lines()
            .map(|line| CartPageLine {
                id: line.product.id_typed().clone(),
                name: line.product.name().to_owned(),
                unit_price: line.product.unit_price(),
                image_ref: line.product.image_ref().to_owned(),
                quantity: line.quantity,
            })
            .collect();

        Self {
            lines,
            total_items: total_item_count(cart),
            total_cost: total_cost(cart),
            continue_shopping: Route::Products,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, id: &ProductId) -> Option<&CartPageLine> {
        self.lines.iter().find(|line| &line.id == id)
    }
}

/// A page body, selected by route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageBody {
    Landing(LandingPage),
    Listing(ListingPage),
    Cart(CartPage),
}

/// Everything needed to show one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub header: Header,
    pub body: PageBody,
}

impl Page {
    pub fn build(route: Route, catalog: &Catalog, cart: &CartState) -> Self {
        let body = match route {
            Route::Landing => PageBody::Landing(LandingPage::default()),
            Route::Products => PageBody::Listing(ListingPage::build(catalog, cart)),
            Route::Cart => PageBody::Cart(CartPage::build(cart)),
        };

        Self {
            header: Header::build(cart),
            body,
        }
    }
}

/// A blocking message shown to the user instead of performing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Checkout is not implemented.
    ComingSoon,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::ComingSoon => "Coming Soon",
        }
    }
}
