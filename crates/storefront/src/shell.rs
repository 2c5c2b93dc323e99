//! Interactive session: one line of input is one user action.
//!
//! The session owns the cart store and the current route. Actions are only
//! accepted on the page that offers them, mirroring the buttons that page
//! renders; everything else is rejected before reaching the store.

use greennest_cart::{CartAction, CartEvent, CartStore};
use greennest_catalog::{Catalog, ProductId};
use greennest_core::SessionId;
use greennest_events::{EventEnvelope, Subscription};

use crate::error::ShellError;
use crate::pages::{AddButton, CartPage, ListingPage, Notice, Page};
use crate::render::Renderer;
use crate::route::Route;

pub const HELP: &str = "\
commands:
  go <path>     navigate (/, /products, /cart)
  add <id>      add a product to the cart (listing page)
  inc <id>      increase a cart line (cart page)
  dec <id>      decrease a cart line (cart page)
  rm <id>       delete a cart line (cart page)
  clear         empty the cart (cart page)
  checkout      check out (cart page)
  help          show this help
  quit          leave the shop";

/// A parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(String),
    Add(ProductId),
    Increase(ProductId),
    Decrease(ProductId),
    Remove(ProductId),
    Clear,
    Checkout,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, ShellError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(ShellError::UnknownCommand(String::new()));
        };
        let arg = words.next();

        let product = |name: &'static str| -> Result<ProductId, ShellError> {
            let raw = arg.ok_or(ShellError::MissingArgument(name))?;
            Ok(raw.parse::<ProductId>()?)
        };

        match verb.to_ascii_lowercase().as_str() {
            "go" | "open" => Ok(Command::Go(arg.unwrap_or("/").to_string())),
            "add" => product("add").map(Command::Add),
            "inc" | "+" => product("inc").map(Command::Increase),
            "dec" | "-" => product("dec").map(Command::Decrease),
            "rm" | "delete" => product("rm").map(Command::Remove),
            "clear" => Ok(Command::Clear),
            "checkout" => Ok(Command::Checkout),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(ShellError::UnknownCommand(other.to_string())),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Command::Go(_) => "go",
            Command::Add(_) => "add",
            Command::Increase(_) => "inc",
            Command::Decrease(_) => "dec",
            Command::Remove(_) => "rm",
            Command::Clear => "clear",
            Command::Checkout => "checkout",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

/// What the caller should do after a handled line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Step {
    pub notice: Option<Notice>,
    pub show_help: bool,
    /// State or route changed; the current page should be drawn again.
    pub rerender: bool,
    pub quit: bool,
}

pub struct Session {
    id: SessionId,
    catalog: Catalog,
    store: CartStore,
    route: Route,
    renderer: Renderer,
    changes: Subscription<EventEnvelope<CartEvent>>,
}

impl Session {
    pub fn new(catalog: Catalog, renderer: Renderer) -> Self {
        let store = CartStore::new();
        let changes = store.subscribe();
        let id = SessionId::new();
        tracing::info!(session_id = %id, cart_id = %store.id(), products = catalog.len(), "session started");

        Self {
            id,
            catalog,
            store,
            route: Route::Landing,
            renderer,
            changes,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn store(&self) -> &CartStore {
        &self.store
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn page(&self) -> Page {
        Page::build(self.route, &self.catalog, self.store.state())
    }

    /// The current page as text.
    pub fn screen(&self) -> String {
        self.renderer.render(&self.page())
    }

    pub fn navigate(&mut self, path: &str) -> bool {
        let next = Route::resolve(path);
        let changed = next != self.route;
        if changed {
            tracing::info!(session_id = %self.id, from = %self.route, to = %next, "navigate");
        }
        self.route = next;
        changed
    }

    /// Parse and handle one line of input.
    pub fn handle_line(&mut self, line: &str) -> Result<Step, ShellError> {
        let command = Command::parse(line).inspect_err(|err| {
            tracing::warn!(session_id = %self.id, %err, "rejected input");
        })?;
        self.handle(command)
    }

    pub fn handle(&mut self, command: Command) -> Result<Step, ShellError> {
        let result = self.apply(command);
        if let Err(err) = &result {
            tracing::warn!(session_id = %self.id, route = %self.route, %err, "rejected command");
        }
        result
    }

    fn apply(&mut self, command: Command) -> Result<Step, ShellError> {
        let name = command.name();
        let mut step = Step::default();

        match command {
            Command::Go(path) => {
                step.rerender = self.navigate(&path);
            }
            Command::Help => step.show_help = true,
            Command::Quit => step.quit = true,
            Command::Add(id) => {
                self.require(Route::Products, name)?;
                let product = match ListingPage::build(&self.catalog, self.store.state()).item(&id) {
                    None => return Err(ShellError::UnknownProduct(id)),
                    Some(item) if item.add == AddButton::Disabled => {
                        return Err(ShellError::AlreadyAdded(id));
                    }
                    Some(item) => item.product.clone(),
                };
                self.store.dispatch(CartAction::AddToCart(product));
            }
            Command::Increase(id) => {
                let id = self.require_line(id, name)?;
                self.store.dispatch(CartAction::Increase(id));
            }
            Command::Decrease(id) => {
                let id = self.require_line(id, name)?;
                self.store.dispatch(CartAction::Decrease(id));
            }
            Command::Remove(id) => {
                let id = self.require_line(id, name)?;
                self.store.dispatch(CartAction::RemoveItem(id));
            }
            Command::Clear => {
                self.require(Route::Cart, name)?;
                self.store.dispatch(CartAction::ClearCart);
            }
            Command::Checkout => {
                self.require(Route::Cart, name)?;
                tracing::info!(session_id = %self.id, "checkout requested; not implemented");
                step.notice = Some(Notice::ComingSoon);
            }
        }

        if !self.changes.drain().is_empty() {
            step.rerender = true;
        }
        Ok(step)
    }

    fn require(&self, route: Route, action: &'static str) -> Result<(), ShellError> {
        if self.route == route {
            Ok(())
        } else {
            Err(ShellError::NotOnPage {
                action,
                route: self.route,
            })
        }
    }

    fn require_line(&self, id: ProductId, action: &'static str) -> Result<ProductId, ShellError> {
        self.require(Route::Cart, action)?;
        if CartPage::build(self.store.state()).line(&id).is_some() {
            Ok(id)
        } else {
            Err(ShellError::NoSuchLine(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(id: &str) -> ProductId {
        ProductId::new(id).unwrap()
    }

    fn session() -> Session {
        Session::new(Catalog::seed(), Renderer::new("GreenNest", "₹"))
    }

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse("go /cart").unwrap(), Command::Go("/cart".into()));
        assert_eq!(Command::parse("go").unwrap(), Command::Go("/".into()));
        assert_eq!(Command::parse("ADD p1").unwrap(), Command::Add(pid("p1")));
        assert_eq!(Command::parse("  dec   p2 ").unwrap(), Command::Decrease(pid("p2")));
        assert_eq!(Command::parse("checkout").unwrap(), Command::Checkout);
        assert_eq!(Command::parse("q").unwrap(), Command::Quit);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Command::parse("add"), Err(ShellError::MissingArgument("add")));
        assert_eq!(
            Command::parse("fly away"),
            Err(ShellError::UnknownCommand("fly".into()))
        );
        assert!(matches!(Command::parse(""), Err(ShellError::UnknownCommand(_))));
    }

    #[test]
    fn starts_on_landing_with_empty_cart() {
        let s = session();
        assert_eq!(s.route(), Route::Landing);
        assert!(s.store().state().is_empty());
    }

    #[test]
    fn add_only_from_listing() {
        let mut s = session();
        let err = s.handle_line("add p1").unwrap_err();
        assert_eq!(
            err,
            ShellError::NotOnPage {
                action: "add",
                route: Route::Landing
            }
        );

        s.handle_line("go /products").unwrap();
        let step = s.handle_line("add p1").unwrap();
        assert!(step.rerender);
        assert_eq!(s.store().state().quantity(&pid("p1")), 1);
    }

    #[test]
    fn add_is_disabled_once_added() {
        let mut s = session();
        s.navigate("/products");
        s.handle_line("add p2").unwrap();
        assert_eq!(s.handle_line("add p2"), Err(ShellError::AlreadyAdded(pid("p2"))));
        assert_eq!(s.store().state().quantity(&pid("p2")), 1);
    }

    #[test]
    fn add_puts_the_listed_product_in_the_cart() {
        let mut s = session();
        s.navigate("/products");
        s.handle_line("add p4").unwrap();

        let line = s.store().state().line(&pid("p4")).unwrap();
        assert_eq!(&line.product, s.catalog().get(&pid("p4")).unwrap());
        assert_eq!(s.store().revision(), 1);
    }

    #[test]
    fn add_unknown_product() {
        let mut s = session();
        s.navigate("/products");
        assert_eq!(s.handle_line("add p42"), Err(ShellError::UnknownProduct(pid("p42"))));
        assert_eq!(s.store().revision(), 0);
    }

    #[test]
    fn cart_actions_need_the_cart_page_and_a_line() {
        let mut s = session();
        s.navigate("/products");
        s.handle_line("add p1").unwrap();

        assert!(matches!(s.handle_line("inc p1"), Err(ShellError::NotOnPage { .. })));

        s.navigate("/cart");
        assert_eq!(s.handle_line("inc p3"), Err(ShellError::NoSuchLine(pid("p3"))));

        s.handle_line("inc p1").unwrap();
        assert_eq!(s.store().state().quantity(&pid("p1")), 2);
        s.handle_line("dec p1").unwrap();
        s.handle_line("dec p1").unwrap();
        assert!(s.store().state().line(&pid("p1")).is_none());
    }

    #[test]
    fn checkout_shows_notice_without_side_effects() {
        let mut s = session();
        s.navigate("/products");
        s.handle_line("add p5").unwrap();
        s.navigate("/cart");

        let revision = s.store().revision();
        let step = s.handle_line("checkout").unwrap();
        assert_eq!(step.notice, Some(Notice::ComingSoon));
        assert!(!step.rerender);
        assert_eq!(s.route(), Route::Cart);
        assert_eq!(s.store().revision(), revision);
    }

    #[test]
    fn navigating_to_same_route_does_not_rerender() {
        let mut s = session();
        assert!(s.handle_line("go /products").unwrap().rerender);
        assert!(!s.handle_line("go /nowhere").unwrap().rerender);
        assert_eq!(s.route(), Route::Products);
    }

    #[test]
    fn help_and_quit() {
        let mut s = session();
        assert!(s.handle_line("help").unwrap().show_help);
        assert!(s.handle_line("quit").unwrap().quit);
    }
}
