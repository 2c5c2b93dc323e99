use thiserror::Error;

use greennest_catalog::ProductId;
use greennest_core::DomainError;

use crate::route::Route;

/// Rejected shell input. The cart itself never fails; these only describe
/// requests the current page does not offer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("unknown command {0:?} (try `help`)")]
    UnknownCommand(String),

    #[error("`{0}` needs a product id")]
    MissingArgument(&'static str),

    #[error(transparent)]
    InvalidProductId(#[from] DomainError),

    #[error("`{action}` is not available on {route}")]
    NotOnPage { action: &'static str, route: Route },

    #[error("no product {0} in the catalog")]
    UnknownProduct(ProductId),

    #[error("{0} is already in the cart")]
    AlreadyAdded(ProductId),

    #[error("no cart line for {0}")]
    NoSuchLine(ProductId),
}
