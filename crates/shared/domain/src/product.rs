//! Product, seller and the product query result shapes.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{PRODUCT_TYPE_CLOTHING, PRODUCT_TYPE_ELECTRONICS, PRODUCT_TYPE_FOOD};
use crate::error::{DomainError, DomainResult};
use crate::fetch::{Entity, Reference};

/// Product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductType {
    Food,
    Clothing,
    Electronics,
}

impl ProductType {
    /// Stored value of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Food => PRODUCT_TYPE_FOOD,
            ProductType::Clothing => PRODUCT_TYPE_CLOTHING,
            ProductType::Electronics => PRODUCT_TYPE_ELECTRONICS,
        }
    }
}

impl std::str::FromStr for ProductType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PRODUCT_TYPE_FOOD => Ok(ProductType::Food),
            PRODUCT_TYPE_CLOTHING => Ok(ProductType::Clothing),
            PRODUCT_TYPE_ELECTRONICS => Ok(ProductType::Electronics),
            other => Err(DomainError::unknown_tag("product type", other)),
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Embedded postal address, stored in the product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub zipcode: String,
}

impl Address {
    pub fn new(
        city: impl Into<String>,
        street: impl Into<String>,
        zipcode: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            street: street.into(),
            zipcode: zipcode.into(),
        }
    }

    /// Rebuild an address from its nullable columns.
    ///
    /// The address exists only when every column is set.
    pub fn from_columns(
        city: Option<String>,
        street: Option<String>,
        zipcode: Option<String>,
    ) -> Option<Self> {
        Some(Self {
            city: city?,
            street: street?,
            zipcode: zipcode?,
        })
    }
}

/// Seller referenced by products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: Option<i32>,
    pub email: String,
}

impl Seller {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
        }
    }
}

impl Entity for Seller {
    fn id(&self) -> Option<i32> {
        self.id
    }
}

/// Product domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    pub id: Option<i32>,
    #[validate(length(min = 1, message = "Product name must not be empty"))]
    pub name: String,
    #[validate(range(min = 1, message = "Product price must be a positive integer"))]
    pub price: i32,
    pub product_type: ProductType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub seller: Option<Reference<Seller>>,
}

impl Product {
    /// Create a transient product without address or seller
    pub fn new(name: impl Into<String>, price: i32, product_type: ProductType) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            product_type,
            address: None,
            seller: None,
        }
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_seller(mut self, seller: Reference<Seller>) -> Self {
        self.seller = Some(seller);
        self
    }

    /// Identifier of the referenced seller, if any
    pub fn seller_id(&self) -> Option<i32> {
        self.seller.as_ref().and_then(Reference::id)
    }

    /// Check field rules before the product is stored
    pub fn ensure_valid(&self) -> DomainResult<()> {
        self.validate().map_err(DomainError::from)
    }
}

impl Entity for Product {
    fn id(&self) -> Option<i32> {
        self.id
    }
}

/// Product name paired with its seller's email (projection, not an entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSellerEmail {
    pub name: String,
    pub email: Option<String>,
}

/// Price sum of one product type group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypePriceSum {
    pub product_type: ProductType,
    pub total: i64,
}
