//! Database seeder for Gestao development and testing.
//!
//! Creates the first operator account and a small starter catalog.
//! Running it twice is harmless: existing data is left alone.
//!
//! Usage: cargo run --bin seeder
//!
//! The operator comes from `GESTAO_SEED_EMAIL` / `GESTAO_SEED_PASSWORD`
//! (defaults suit local development only).

use rust_decimal::Decimal;

use gestao_core::auth::{check_password_policy, hash_password};
use gestao_core::cost::{CostCategory, CostInput};
use gestao_core::product::{ProductCategory, ProductInput};
use gestao_db::{CostRepository, ProductFilter, ProductRepository, UserRepository};
use gestao_shared::AppConfig;
use sea_orm::DatabaseConnection;

const DEFAULT_EMAIL: &str = "admin@gestao.local";
const DEFAULT_PASSWORD: &str = "gestao-admin";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    println!("Connecting to database...");
    let db = gestao_db::connect(&config.database).await?;

    println!("Seeding operator...");
    seed_operator(&db).await?;

    println!("Seeding catalog...");
    seed_products(&db).await?;

    println!("Seeding fixed costs...");
    seed_fixed_costs(&db).await?;

    println!("Seeding complete!");
    Ok(())
}

async fn seed_operator(db: &DatabaseConnection) -> anyhow::Result<()> {
    let email = std::env::var("GESTAO_SEED_EMAIL").unwrap_or_else(|_| DEFAULT_EMAIL.to_string());
    let password =
        std::env::var("GESTAO_SEED_PASSWORD").unwrap_or_else(|_| DEFAULT_PASSWORD.to_string());

    let repo = UserRepository::new(db.clone());
    if repo.email_exists(&email).await? {
        println!("  Operator {email} already exists, skipping...");
        return Ok(());
    }

    check_password_policy(&password)?;
    let hash = hash_password(&password)?;
    let user = repo.create(&email, &hash, "Administrador").await?;
    println!("  Created operator {} ({})", user.email, user.id);
    Ok(())
}

async fn seed_products(db: &DatabaseConnection) -> anyhow::Result<()> {
    let repo = ProductRepository::new(db.clone());
    if !repo.list(&ProductFilter::default()).await?.is_empty() {
        println!("  Catalog not empty, skipping...");
        return Ok(());
    }

    let products = [
        ("Piso porcelanato 60x60 (m²)", ProductCategory::Material, 8990, 6120),
        ("Argamassa AC-III 20kg", ProductCategory::Material, 4290, 2850),
        ("Rejunte flexível 1kg", ProductCategory::Material, 1890, 1100),
        ("Mão de obra assentamento (m²)", ProductCategory::Service, 4500, 3000),
        ("Locação de betoneira (diária)", ProductCategory::Equipment, 12000, 7000),
    ];

    for (name, category, sale_cents, cost_cents) in products {
        repo.create(ProductInput {
            name: name.to_string(),
            description: None,
            category,
            sale_price: Decimal::new(sale_cents, 2),
            cost_price: Decimal::new(cost_cents, 2),
        })
        .await?;
        println!("  Created product {name}");
    }
    Ok(())
}

async fn seed_fixed_costs(db: &DatabaseConnection) -> anyhow::Result<()> {
    let repo = CostRepository::new(db.clone());
    if !repo.list_fixed(None).await?.is_empty() {
        println!("  Fixed costs present, skipping...");
        return Ok(());
    }

    let costs = [
        ("Aluguel do galpão", CostCategory::Rent, 320_000),
        ("Energia elétrica", CostCategory::Utilities, 48_000),
        ("Internet e telefone", CostCategory::Utilities, 19_990),
        ("Contador", CostCategory::Services, 65_000),
    ];

    for (description, category, cents) in costs {
        repo.create_fixed(CostInput {
            description: description.to_string(),
            category,
            amount: Decimal::new(cents, 2),
            date: None,
        })
        .await?;
        println!("  Created fixed cost {description}");
    }
    Ok(())
}
