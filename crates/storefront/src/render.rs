//! Plain-text rendering of pages.

use core::fmt::Write;

use greennest_core::Money;

use crate::config::StorefrontConfig;
use crate::pages::{AddButton, CartPage, Header, LandingPage, ListingPage, Notice, Page, PageBody};

const RULE_WIDTH: usize = 56;

#[derive(Debug, Clone)]
pub struct Renderer {
    brand: String,
    currency: String,
}

impl Renderer {
    pub fn new(brand: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            currency: currency.into(),
        }
    }

    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self::new(config.brand.clone(), config.currency_symbol.clone())
    }

    pub fn price(&self, amount: Money) -> String {
        format!("{}{}", self.currency, amount)
    }

    pub fn render(&self, page: &Page) -> String {
        let mut out = String::new();
        self.header(&mut out, &page.header);
        match &page.body {
            PageBody::Landing(landing) => self.landing(&mut out, landing),
            PageBody::Listing(listing) => self.listing(&mut out, listing),
            PageBody::Cart(cart) => self.cart(&mut out, cart),
        }
        out
    }

    pub fn notice(&self, notice: Notice) -> String {
        let line = "*".repeat(RULE_WIDTH);
        format!("{line}\n  {}\n{line}\n", notice.message())
    }

    fn header(&self, out: &mut String, header: &Header) {
        let _ = writeln!(
            out,
            "{}   [Products /products]   [Cart /cart ({})]",
            self.brand, header.cart_count
        );
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    }

    fn landing(&self, out: &mut String, landing: &LandingPage) {
        let _ = writeln!(out, "Welcome to {}", self.brand);
        let _ = writeln!(
            out,
            "We handpick healthy houseplants that thrive indoors: easy care, stylish pots, and fast delivery."
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "[Get Started {}]", landing.get_started);
    }

    fn listing(&self, out: &mut String, listing: &ListingPage) {
        let _ = writeln!(out, "Shop Plants");
        for category in &listing.categories {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", category.name);
            for item in &category.items {
                let button = match item.add {
                    AddButton::Enabled => "[Add to Cart]",
                    AddButton::Disabled => "[Added]",
                };
                let _ = writeln!(
                    out,
                    "  {:<4} {:<22} {:>8}  {}",
                    item.product.id_typed().as_str(),
                    item.product.name(),
                    self.price(item.product.unit_price()),
                    button
                );
                let _ = writeln!(out, "       {}", item.product.image_ref());
            }
        }
    }

    fn cart(&self, out: &mut String, cart: &CartPage) {
        let _ = writeln!(out, "Shopping Cart");
        let _ = writeln!(out, "Total plants: {}", cart.total_items);
        let _ = writeln!(out, "Total cost: {}", self.price(cart.total_cost));
        let _ = writeln!(out);

        if cart.is_empty() {
            let _ = writeln!(out, "Your cart is empty.");
        }

        for line in &cart.lines {
            let _ = writeln!(
                out,
                "  {:<4} {:<22} Unit price: {:>8}   [+] {:>3} [-]   [Delete]",
                line.id.as_str(),
                line.name,
                self.price(line.unit_price),
                line.quantity
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "[Checkout]   [Continue Shopping {}]", cart.continue_shopping);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;
    use greennest_cart::{CartAction, CartState, reduce};
    use greennest_catalog::{Catalog, ProductId};

    fn renderer() -> Renderer {
        Renderer::new("GreenNest", "₹")
    }

    #[test]
    fn landing_links_to_products() {
        let page = Page::build(Route::Landing, &Catalog::seed(), &CartState::new());
        let text = renderer().render(&page);
        assert!(text.starts_with("GreenNest"));
        assert!(text.contains("Welcome to GreenNest"));
        assert!(text.contains("[Get Started /products]"));
        assert!(text.contains("(0)"));
    }

    #[test]
    fn listing_shows_prices_and_buttons() {
        let catalog = Catalog::seed();
        let p1 = catalog.get(&ProductId::new("p1").unwrap()).cloned().unwrap();
        let cart = reduce(&CartState::new(), &CartAction::AddToCart(p1));
        let text = renderer().render(&Page::build(Route::Products, &catalog, &cart));

        assert!(text.contains("Shop Plants"));
        assert!(text.contains("Low Light"));
        let monstera = text.lines().find(|l| l.contains("Monstera Deliciosa")).unwrap();
        assert!(monstera.contains("₹799"));
        assert!(monstera.ends_with("[Added]"));
        let pothos = text.lines().find(|l| l.contains("Pothos")).unwrap();
        assert!(pothos.ends_with("[Add to Cart]"));
    }

    #[test]
    fn empty_cart_page() {
        let text = renderer().render(&Page::build(Route::Cart, &Catalog::seed(), &CartState::new()));
        assert!(text.contains("Total plants: 0"));
        assert!(text.contains("Total cost: ₹0"));
        assert!(text.contains("Your cart is empty."));
        assert!(text.contains("[Continue Shopping /products]"));
    }

    #[test]
    fn notice_is_framed() {
        let text = renderer().notice(Notice::ComingSoon);
        assert!(text.contains("  Coming Soon\n"));
    }

    #[test]
    fn custom_currency_symbol() {
        assert_eq!(Renderer::new("Shop", "$").price(Money::from_minor(1797)), "$1797");
    }
}
