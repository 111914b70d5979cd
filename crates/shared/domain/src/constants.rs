//! Domain-level constants.
//!
//! These constants define stored tags and the fixed parameters of the
//! product queries.

// =============================================================================
// Account Roles
// =============================================================================

/// Stored value of a regular account
pub const ROLE_USER: &str = "USER";

/// Stored value of an administrator account
pub const ROLE_ADMIN: &str = "ADMIN";

// =============================================================================
// Product Types
// =============================================================================

pub const PRODUCT_TYPE_FOOD: &str = "FOOD";

pub const PRODUCT_TYPE_CLOTHING: &str = "CLOTHING";

pub const PRODUCT_TYPE_ELECTRONICS: &str = "ELECTRONICS";

// =============================================================================
// Item Discriminators
// =============================================================================

/// Discriminator of album rows
pub const ITEM_TAG_ALBUM: &str = "ALBUM";

/// Discriminator of book rows
pub const ITEM_TAG_BOOK: &str = "BOOK";

/// Discriminator of movie rows
pub const ITEM_TAG_MOVIE: &str = "MOVIE";

/// All valid discriminator values
pub const ITEM_TAGS: &[&str] = &[ITEM_TAG_ALBUM, ITEM_TAG_BOOK, ITEM_TAG_MOVIE];

// =============================================================================
// Product Queries
// =============================================================================

/// Rows skipped by the fixed product page
pub const PRODUCT_PAGE_OFFSET: u64 = 30;

/// Rows returned by the fixed product page
pub const PRODUCT_PAGE_SIZE: u64 = 10;

/// A product type group is reported once its price sum exceeds this value
pub const SUM_PRICE_THRESHOLD: i64 = 100_000;

/// Products priced below this value are repriced by the bulk update
pub const BULK_UPDATE_PRICE_CEILING: i32 = 10_000;

/// Multiplier applied by the bulk price updates
pub const PRICE_INCREASE_RATE: f64 = 1.1;
