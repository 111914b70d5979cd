//! Demo data for the `seed` command.

use serde::Serialize;
use tracing::info;

use common::AppResult;
use domain::{Account, Address, Item, Locker, Member, Product, ProductType, Reference, Role, Seller, Team};

use crate::repository::{
    AccountRepository, ItemRepository, LockerRepository, ProductRepository, SellerRepository,
    Stores, TeamRepository,
};

const SELLER_EMAILS: [&str; 3] = ["kim@shop.com", "lee@shop.com", "park@shop.com"];
const CITIES: [(&str, &str, &str); 3] = [
    ("Seoul", "Teheran-ro", "06236"),
    ("Busan", "Haeundae-ro", "48094"),
    ("Seongnam", "Pangyo-ro", "13494"),
];
const PRODUCT_TYPES: [ProductType; 3] = [
    ProductType::Food,
    ProductType::Clothing,
    ProductType::Electronics,
];
const PRODUCT_COUNT: i32 = 45;

/// Counts of what was written
#[derive(Debug, Default, Serialize)]
pub struct SeedSummary {
    pub accounts: usize,
    pub sellers: usize,
    pub products: usize,
    pub teams: usize,
    pub members: usize,
    pub items: usize,
}

/// Populate sellers, products, teams with members, items and accounts.
pub async fn seed(stores: &Stores) -> AppResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    stores
        .accounts
        .save(Account::new("admin", Role::Admin).with_description("seeded administrator"))
        .await?;
    stores.accounts.save(Account::new("member", Role::User).with_age(20)).await?;
    summary.accounts = 2;

    let mut sellers = Vec::with_capacity(SELLER_EMAILS.len());
    for email in SELLER_EMAILS {
        sellers.push(stores.sellers.save(Seller::new(email)).await?);
    }
    summary.sellers = sellers.len();

    for n in 1..=PRODUCT_COUNT {
        let index = n as usize;
        let (city, street, zipcode) = CITIES[index % CITIES.len()];
        let seller = &sellers[index % sellers.len()];

        let mut product = Product::new(
            format!("product{}", n),
            n * 1_000,
            PRODUCT_TYPES[index % PRODUCT_TYPES.len()],
        )
        .with_address(Address::new(city, street, zipcode));
        if let Some(id) = seller.id {
            product = product.with_seller(Reference::unloaded(id));
        }

        stores.products.save(product).await?;
        summary.products += 1;
    }

    let locker = stores.lockers.save(Locker::new("locker1")).await?;

    let mut team_a = Team::new("teamA");
    let mut first = Member::new("member1");
    if let Some(id) = locker.id {
        first = first.with_locker(Reference::unloaded(id));
    }
    team_a.add_member(first);
    team_a.add_member(Member::new("member2"));

    let mut team_b = Team::new("teamB");
    team_b.add_member(Member::new("member3"));

    for team in [team_a, team_b] {
        let saved = stores.teams.save(team).await?;
        summary.teams += 1;
        summary.members += saved.members.get().map_or(0, <[Member]>::len);
    }

    let items = [
        Item::album("Abbey Road", 15_000, "The Beatles"),
        Item::book("Dune", 20_000, "Herbert", "9780441172719"),
        Item::movie("Inception", 12_000, "Nolan", "DiCaprio"),
    ];
    for item in items {
        stores.items.save(item).await?;
        summary.items += 1;
    }

    info!(?summary, "Seed data written");
    Ok(summary)
}
