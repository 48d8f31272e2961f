//! Product Details
//!
//! What a client sends when putting a product in a cart, wishlist or
//! order. The catalog lives elsewhere, so these fields are snapshots taken
//! at the time of the request.

use rust_decimal::Decimal;

use crate::domain::value_object::money;
use crate::error::{ShopError, ShopResult};

const PRODUCT_DETAILS_REQUIRED: &str = "Product details are required";
const PRICE_OUT_OF_RANGE: &str = "Price is out of range";

/// Validated product snapshot plus its variant discriminators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    pub product_id: String,
    pub product_slug: String,
    pub name: String,
    /// Unit price, positive and within the stored money range
    pub price: Decimal,
    pub image: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Unvalidated product fields as they arrive in a request
#[derive(Debug, Clone, Default)]
pub struct ProductInput {
    pub product_id: Option<String>,
    pub product_slug: Option<String>,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ProductDetails {
    /// Product id, slug and name must be non-blank and the price a positive
    /// amount that fits `money::max_amount`
    pub fn new(input: ProductInput) -> ShopResult<Self> {
        let required = || ShopError::validation(PRODUCT_DETAILS_REQUIRED);

        let product_id = non_blank(input.product_id).ok_or_else(required)?;
        let product_slug = non_blank(input.product_slug).ok_or_else(required)?;
        let name = non_blank(input.name).ok_or_else(required)?;
        let price = input
            .price
            .filter(|p| p.is_sign_positive() && !p.is_zero())
            .ok_or_else(required)?;
        let price = money::within_range(price)
            .ok_or_else(|| ShopError::validation(PRICE_OUT_OF_RANGE))?;

        Ok(Self {
            product_id,
            product_slug,
            name,
            price,
            image: non_blank(input.image),
            size: non_blank(input.size),
            color: non_blank(input.color),
        })
    }
}
