//! Demo seed data for the catalog and news.

use sqlx::PgPool;

use bakehuset_core::Price;
use bakehuset_core::catalog::PricingRule;

use super::{CommandError, connect};

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price: Price,
    image: &'static str,
    category: &'static str,
    variants: &'static [&'static str],
    pricing: PricingRule,
}

const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Wienerbrødsnurrer",
        description: "Sprø wienerbrødsnurrer, nystekt hver morgen.",
        price: Price::from_kroner(35),
        image: "https://idefull.no/bilder/karamellsnurr.jpg",
        category: "wienerbrød",
        variants: &["Kanel", "Karamell"],
        pricing: PricingRule::Unit,
    },
    SeedProduct {
        name: "Konfekt",
        description: "Håndlaget konfekt i eske.",
        price: Price::from_kroner(129),
        image: "https://images.unsplash.com/photo-1549007994-cb92caebd54b",
        category: "konfekt",
        variants: &["Salt karamell", "Lakris", "Pistasj", "Jordbær"],
        pricing: PricingRule::Unit,
    },
    SeedProduct {
        name: "Hamburgerbrød",
        description: "Luftige hamburgerbrød, perfekte til grillkvelden.",
        price: Price::from_kroner(45),
        image: "https://images.unsplash.com/photo-1586444248902-2f64eddc13df",
        category: "brød",
        variants: &["Med sesamfrø", "Uten sesamfrø"],
        pricing: PricingRule::Unit,
    },
    SeedProduct {
        name: "Focaccia 230g",
        description: "Italiensk focaccia med havsalt og rosmarin. 1 stk for 35 kr, 3 stk for 90 kr.",
        price: Price::from_kroner(35),
        image: "https://images.unsplash.com/photo-1600398137887-5d8f14dbcc39",
        category: "brød",
        variants: &[],
        pricing: PricingRule::Bundle {
            size: 3,
            price: Price::from_kroner(90),
        },
    },
];

/// Seed the catalog and news tables with demo data.
///
/// Skips tables that already contain rows so the command stays safe to
/// re-run.
pub async fn run() -> Result<(), CommandError> {
    tracing::info!("Connecting to database...");
    let pool = connect("ADMIN_DATABASE_URL").await?;

    seed_products(&pool).await?;
    seed_news(&pool).await?;

    tracing::info!("Seeding complete!");
    Ok(())
}

async fn seed_products(pool: &PgPool) -> Result<(), CommandError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM product")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        tracing::info!("Product table already has {count} rows, skipping");
        return Ok(());
    }

    for product in SEED_PRODUCTS {
        let (bundle_size, bundle_price) = match product.pricing {
            PricingRule::Unit => (None, None),
            PricingRule::Bundle { size, price } => (Some(i64::from(size)), Some(price)),
        };
        let variants: Vec<String> = product.variants.iter().map(ToString::to_string).collect();

        sqlx::query(
            r"
            INSERT INTO product
                (name, description, price, image, category, variants, bundle_size, bundle_price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(product.name)
        .bind(product.description)
        .bind(product.price)
        .bind(product.image)
        .bind(product.category)
        .bind(&variants)
        .bind(bundle_size)
        .bind(bundle_price)
        .execute(pool)
        .await?;

        tracing::info!("Seeded product: {}", product.name);
    }

    Ok(())
}

async fn seed_news(pool: &PgPool) -> Result<(), CommandError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM news")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        tracing::info!("News table already has {count} rows, skipping");
        return Ok(());
    }

    sqlx::query("INSERT INTO news (title, content) VALUES ($1, $2)")
        .bind("Velkommen til Bakehuset")
        .bind(
            "Vi har åpnet nettbutikken! Bestill favorittene dine på nett \
             og hent dem ferske i butikken, eller få dem levert på døren.",
        )
        .execute(pool)
        .await?;

    tracing::info!("Seeded welcome news post");
    Ok(())
}
