use std::collections::HashMap;

use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    entity::{
        Products, product_associations::ActiveModel as AssociationActive,
        products::ActiveModel as ProductActive,
    },
    error::AppResult,
    models::AssociationType,
    state::AppState,
};

struct SeedProduct {
    /// Stable key used to wire associations after insertion.
    key: &'static str,
    name: &'static str,
    description: &'static str,
    price_cents: i64,
    image_url: &'static str,
    category: &'static str,
    stock: i32,
    rating: f64,
    review_count: i32,
}

const SEED_PRODUCTS: &[SeedProduct] = &[
    // Electronics - smartphones
    SeedProduct {
        key: "iphone-15-pro",
        name: "iPhone 15 Pro",
        description: "Latest iPhone with A17 Pro chip, 6.1-inch Super Retina XDR display, Pro camera system with 48MP main camera",
        price_cents: 99999,
        image_url: "https://images.unsplash.com/photo-1592750475338-74b7b21085ab?w=500&h=500&fit=crop",
        category: "Electronics",
        stock: 50,
        rating: 4.8,
        review_count: 120,
    },
    SeedProduct {
        key: "galaxy-s24-ultra",
        name: "Samsung Galaxy S24 Ultra",
        description: "Flagship Android smartphone with 6.8-inch Dynamic AMOLED display, 200MP camera, S Pen support",
        price_cents: 119999,
        image_url: "https://images.unsplash.com/photo-1511707171634-5f897ff02aa9?w=500&h=500&fit=crop",
        category: "Electronics",
        stock: 40,
        rating: 4.7,
        review_count: 95,
    },
    SeedProduct {
        key: "oneplus-12",
        name: "OnePlus 12",
        description: "Premium Android phone with Snapdragon 8 Gen 3, 6.82-inch LTPO display, 50MP triple camera",
        price_cents: 79999,
        image_url: "https://images.unsplash.com/photo-1511707171634-5f897ff02aa9?w=500&h=500&fit=crop",
        category: "Electronics",
        stock: 35,
        rating: 4.6,
        review_count: 88,
    },
    // Electronics - laptops
    SeedProduct {
        key: "macbook-pro-16",
        name: "MacBook Pro 16\" M3",
        description: "M3 Pro chip, 16GB RAM, 512GB SSD, Liquid Retina XDR display, 22-hour battery life",
        price_cents: 249999,
        image_url: "https://images.unsplash.com/photo-1541807084-5c52b6b3adef?w=500&h=500&fit=crop",
        category: "Electronics",
        stock: 30,
        rating: 4.9,
        review_count: 85,
    },
    SeedProduct {
        key: "dell-xps-15",
        name: "Dell XPS 15",
        description: "Intel i7-13700H, 16GB RAM, 1TB SSD, 15.6-inch 4K OLED touchscreen, NVIDIA RTX 4050",
        price_cents: 189999,
        image_url: "https://images.unsplash.com/photo-1496181133206-80ce9b88a853?w=500&h=500&fit=crop",
        category: "Electronics",
        stock: 25,
        rating: 4.6,
        review_count: 70,
    },
    SeedProduct {
        key: "hp-spectre-x360",
        name: "HP Spectre x360",
        description: "Intel i7, 16GB RAM, 512GB SSD, 13.5-inch 3K OLED touchscreen, 2-in-1 convertible",
        price_cents: 139999,
        image_url: "https://images.unsplash.com/photo-1496181133206-80ce9b88a853?w=500&h=500&fit=crop",
        category: "Electronics",
        stock: 20,
        rating: 4.5,
        review_count: 65,
    },
    // Clothing
    SeedProduct {
        key: "classic-white-tshirt",
        name: "Classic White T-Shirt",
        description: "100% cotton, comfortable fit, breathable fabric, perfect for everyday wear",
        price_cents: 1999,
        image_url: "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=500&h=500&fit=crop",
        category: "Clothing",
        stock: 150,
        rating: 4.5,
        review_count: 200,
    },
    SeedProduct {
        key: "denim-jeans-blue",
        name: "Denim Jeans - Blue",
        description: "Classic fit denim jeans, 98% cotton 2% elastane, stretch comfort, regular fit",
        price_cents: 4999,
        image_url: "https://images.unsplash.com/photo-1542272604-787c3835535d?w=500&h=500&fit=crop",
        category: "Clothing",
        stock: 100,
        rating: 4.4,
        review_count: 180,
    },
    SeedProduct {
        key: "leather-jacket",
        name: "Leather Jacket",
        description: "Genuine leather jacket, classic biker style, quilted lining, multiple pockets",
        price_cents: 19999,
        image_url: "https://images.unsplash.com/photo-1551028719-00167b16eac5?w=500&h=500&fit=crop",
        category: "Clothing",
        stock: 40,
        rating: 4.7,
        review_count: 95,
    },
    SeedProduct {
        key: "nike-running-shoes",
        name: "Nike Running Shoes",
        description: "Lightweight running shoes with cushioned sole, breathable mesh upper, perfect for jogging",
        price_cents: 8999,
        image_url: "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=500&h=500&fit=crop",
        category: "Clothing",
        stock: 80,
        rating: 4.6,
        review_count: 150,
    },
    SeedProduct {
        key: "floral-summer-dress",
        name: "Floral Summer Dress",
        description: "Beautiful floral print dress, lightweight fabric, perfect for summer occasions",
        price_cents: 3999,
        image_url: "https://images.unsplash.com/photo-1595777457583-95e059d581b8?w=500&h=500&fit=crop",
        category: "Clothing",
        stock: 120,
        rating: 4.5,
        review_count: 175,
    },
    SeedProduct {
        key: "designer-handbag",
        name: "Designer Handbag",
        description: "Premium leather handbag, spacious interior, multiple compartments, elegant design",
        price_cents: 14999,
        image_url: "https://images.unsplash.com/photo-1590874103328-eac38a683ce7?w=500&h=500&fit=crop",
        category: "Clothing",
        stock: 60,
        rating: 4.8,
        review_count: 110,
    },
    SeedProduct {
        key: "high-heel-sandals",
        name: "High Heel Sandals",
        description: "Elegant high heel sandals, comfortable padding, perfect for parties and events",
        price_cents: 5999,
        image_url: "https://images.unsplash.com/photo-1543163521-1bf539c55dd2?w=500&h=500&fit=crop",
        category: "Clothing",
        stock: 90,
        rating: 4.4,
        review_count: 140,
    },
    // Home & Kitchen
    SeedProduct {
        key: "cookware-set",
        name: "Stainless Steel Cookware Set",
        description: "10-piece cookware set, non-stick coating, dishwasher safe, induction compatible",
        price_cents: 12999,
        image_url: "https://images.unsplash.com/photo-1556911220-bff31c812dba?w=500&h=500&fit=crop",
        category: "Home & Kitchen",
        stock: 45,
        rating: 4.6,
        review_count: 125,
    },
    SeedProduct {
        key: "memory-foam-mattress",
        name: "Memory Foam Mattress",
        description: "Queen size memory foam mattress, pressure-relieving, hypoallergenic, 10-year warranty",
        price_cents: 49999,
        image_url: "https://images.unsplash.com/photo-1631049307264-da0ec9d70304?w=500&h=500&fit=crop",
        category: "Home & Kitchen",
        stock: 25,
        rating: 4.7,
        review_count: 88,
    },
    SeedProduct {
        key: "coffee-maker",
        name: "Coffee Maker",
        description: "12-cup programmable coffee maker, auto shut-off, reusable filter, glass carafe",
        price_cents: 7999,
        image_url: "https://images.unsplash.com/photo-1517487881594-2787fef5ebf7?w=500&h=500&fit=crop",
        category: "Home & Kitchen",
        stock: 70,
        rating: 4.5,
        review_count: 160,
    },
    SeedProduct {
        key: "smart-led-tv-55",
        name: "Smart LED TV 55\"",
        description: "55-inch 4K UHD Smart TV, HDR support, Android TV, voice control, multiple HDMI ports",
        price_cents: 59999,
        image_url: "https://images.unsplash.com/photo-1593359677879-a4bb92f829d1?w=500&h=500&fit=crop",
        category: "Electronics",
        stock: 35,
        rating: 4.8,
        review_count: 200,
    },
    // Accessories
    SeedProduct {
        key: "wireless-earbuds",
        name: "Wireless Bluetooth Earbuds",
        description: "True wireless earbuds, noise cancellation, 30-hour battery, water resistant, touch controls",
        price_cents: 7999,
        image_url: "https://images.unsplash.com/photo-1590658268037-6bf12165a8df?w=500&h=500&fit=crop",
        category: "Accessories",
        stock: 200,
        rating: 4.6,
        review_count: 300,
    },
    SeedProduct {
        key: "smart-watch",
        name: "Smart Watch",
        description: "Fitness tracking smartwatch, heart rate monitor, GPS, water resistant, 7-day battery",
        price_cents: 19999,
        image_url: "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=500&h=500&fit=crop",
        category: "Accessories",
        stock: 80,
        rating: 4.7,
        review_count: 180,
    },
    SeedProduct {
        key: "phone-case-clear",
        name: "Phone Case - Clear",
        description: "Protective clear case, shock absorption, raised edges, wireless charging compatible",
        price_cents: 2499,
        image_url: "https://images.unsplash.com/photo-nfWPbwWFTTs?w=500&h=500&fit=crop",
        category: "Accessories",
        stock: 300,
        rating: 4.5,
        review_count: 250,
    },
    SeedProduct {
        key: "usb-c-cable",
        name: "USB-C Fast Charging Cable",
        description: "6ft braided cable, 3A fast charging, data transfer, durable design, multiple device support",
        price_cents: 1999,
        image_url: "https://images.unsplash.com/photo-dYocS1QjjvI?w=500&h=500&fit=crop",
        category: "Accessories",
        stock: 500,
        rating: 4.6,
        review_count: 400,
    },
    SeedProduct {
        key: "wireless-charging-pad",
        name: "Wireless Charging Pad",
        description: "15W fast wireless charger, LED indicator, non-slip surface, compatible with all Qi devices",
        price_cents: 3999,
        image_url: "https://images.unsplash.com/photo-r0Do56ntkBs?w=500&h=500&fit=crop",
        category: "Accessories",
        stock: 150,
        rating: 4.7,
        review_count: 220,
    },
    SeedProduct {
        key: "laptop-backpack",
        name: "Laptop Backpack",
        description: "Waterproof laptop backpack, padded compartment for 15\" laptop, USB charging port, multiple pockets",
        price_cents: 7999,
        image_url: "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=500&h=500&fit=crop",
        category: "Accessories",
        stock: 100,
        rating: 4.5,
        review_count: 180,
    },
    SeedProduct {
        key: "wireless-mouse",
        name: "Wireless Mouse",
        description: "Ergonomic wireless mouse, 2.4GHz connectivity, 1600 DPI, long battery life, silent clicks",
        price_cents: 2999,
        image_url: "https://images.unsplash.com/photo-1527864550417-7fd91fc51a46?w=500&h=500&fit=crop",
        category: "Accessories",
        stock: 200,
        rating: 4.4,
        review_count: 250,
    },
    SeedProduct {
        key: "mechanical-keyboard",
        name: "Mechanical Keyboard",
        description: "RGB mechanical keyboard, Cherry MX switches, customizable backlighting, aluminum frame",
        price_cents: 9999,
        image_url: "https://images.unsplash.com/photo-1541140532154-b024d705b90a?w=500&h=500&fit=crop",
        category: "Accessories",
        stock: 80,
        rating: 4.6,
        review_count: 190,
    },
    // Beauty
    SeedProduct {
        key: "skincare-set",
        name: "Skincare Set",
        description: "Complete skincare routine set, cleanser, toner, moisturizer, serum, suitable for all skin types",
        price_cents: 8999,
        image_url: "https://images.unsplash.com/photo-1556228578-0d85b1a4d571?w=500&h=500&fit=crop",
        category: "Beauty",
        stock: 60,
        rating: 4.5,
        review_count: 140,
    },
    SeedProduct {
        key: "perfume-eau-de-parfum",
        name: "Perfume - Eau de Parfum",
        description: "Luxury fragrance, long-lasting scent, elegant bottle, perfect for special occasions",
        price_cents: 6999,
        image_url: "https://images.unsplash.com/photo-1541643600914-78b084683601?w=500&h=500&fit=crop",
        category: "Beauty",
        stock: 90,
        rating: 4.6,
        review_count: 165,
    },
    // Sports
    SeedProduct {
        key: "yoga-mat",
        name: "Yoga Mat",
        description: "Premium yoga mat, non-slip surface, extra thick padding, eco-friendly material, carrying strap",
        price_cents: 3499,
        image_url: "https://images.unsplash.com/photo-1601925260368-ae2f83cf8b7f?w=500&h=500&fit=crop",
        category: "Sports",
        stock: 120,
        rating: 4.5,
        review_count: 180,
    },
    SeedProduct {
        key: "dumbbell-set",
        name: "Dumbbell Set",
        description: "Adjustable dumbbell set, 5-50 lbs per dumbbell, compact design, perfect for home gym",
        price_cents: 14999,
        image_url: "https://images.unsplash.com/photo-dhJd3ax1pFs?w=500&h=500&fit=crop",
        category: "Sports",
        stock: 40,
        rating: 4.7,
        review_count: 95,
    },
];

/// Curated (source key, target key, strength) triples; all COMPLEMENTARY.
const SEED_ASSOCIATIONS: &[(&str, &str, f64)] = &[
    // Phones and their accessories
    ("iphone-15-pro", "phone-case-clear", 0.95),
    ("iphone-15-pro", "usb-c-cable", 0.90),
    ("iphone-15-pro", "wireless-charging-pad", 0.85),
    ("iphone-15-pro", "wireless-earbuds", 0.80),
    ("iphone-15-pro", "smart-watch", 0.75),
    ("galaxy-s24-ultra", "phone-case-clear", 0.95),
    ("galaxy-s24-ultra", "usb-c-cable", 0.90),
    ("galaxy-s24-ultra", "wireless-charging-pad", 0.85),
    ("galaxy-s24-ultra", "wireless-earbuds", 0.80),
    ("oneplus-12", "phone-case-clear", 0.95),
    ("oneplus-12", "usb-c-cable", 0.90),
    // Laptops and their accessories
    ("macbook-pro-16", "laptop-backpack", 0.90),
    ("macbook-pro-16", "wireless-mouse", 0.85),
    ("macbook-pro-16", "mechanical-keyboard", 0.80),
    ("dell-xps-15", "laptop-backpack", 0.90),
    ("dell-xps-15", "wireless-mouse", 0.85),
    ("dell-xps-15", "mechanical-keyboard", 0.80),
    ("hp-spectre-x360", "laptop-backpack", 0.90),
    ("hp-spectre-x360", "wireless-mouse", 0.85),
    // Outfits
    ("classic-white-tshirt", "denim-jeans-blue", 0.75),
    ("denim-jeans-blue", "nike-running-shoes", 0.70),
    ("leather-jacket", "classic-white-tshirt", 0.65),
    // Kitchen
    ("cookware-set", "coffee-maker", 0.60),
];

/// Seed the demo catalog when the product table is empty.
///
/// Not safe to re-run against a populated catalog; the count guard covers the
/// normal startup path. Concurrent double-invocation needs an external
/// run-once guard such as a migration lock.
pub async fn run_if_empty(state: &AppState) -> AppResult<bool> {
    let count = Products::find().count(&state.orm).await?;
    if count > 0 {
        tracing::debug!(products = count, "catalog already populated, skipping seed");
        return Ok(false);
    }

    let ids = seed_products(state).await?;
    let associations = seed_associations(state, &ids).await?;

    if let Err(err) = log_audit(
        &state.pool,
        "catalog_seed",
        Some("products"),
        Some(serde_json::json!({ "products": ids.len(), "associations": associations })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    tracing::info!(products = ids.len(), associations, "demo catalog seeded");
    Ok(true)
}

async fn seed_products(state: &AppState) -> AppResult<HashMap<&'static str, Uuid>> {
    let mut ids = HashMap::with_capacity(SEED_PRODUCTS.len());
    for seed in SEED_PRODUCTS {
        let product = ProductActive {
            id: Set(Uuid::new_v4()),
            name: Set(seed.name.to_string()),
            description: Set(Some(seed.description.to_string())),
            price: Set(Decimal::new(seed.price_cents, 2)),
            image_url: Set(Some(seed.image_url.to_string())),
            category: Set(seed.category.to_string()),
            stock: Set(seed.stock),
            rating: Set(seed.rating),
            review_count: Set(seed.review_count),
            created_at: NotSet,
        }
        .insert(&state.orm)
        .await?;
        ids.insert(seed.key, product.id);
    }
    Ok(ids)
}

/// Wire the curated triples against the captured ids. Best effort: a key that
/// did not make it into the catalog drops only the triples depending on it.
async fn seed_associations(
    state: &AppState,
    ids: &HashMap<&'static str, Uuid>,
) -> AppResult<usize> {
    let mut created = 0;
    for &(source_key, target_key, strength) in SEED_ASSOCIATIONS {
        let (Some(&source), Some(&target)) = (ids.get(source_key), ids.get(target_key)) else {
            tracing::warn!(
                source_key,
                target_key,
                "seed association skipped, unknown product key"
            );
            continue;
        };
        AssociationActive {
            id: Set(Uuid::new_v4()),
            product_id: Set(source),
            associated_product_id: Set(target),
            association_type: Set(AssociationType::Complementary.as_str().to_string()),
            strength: Set(strength),
            created_at: NotSet,
        }
        .insert(&state.orm)
        .await?;
        created += 1;
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn association_keys_resolve_to_seed_products() {
        for (source, target, strength) in SEED_ASSOCIATIONS {
            assert!(
                SEED_PRODUCTS.iter().any(|p| p.key == *source),
                "unknown source key {source}"
            );
            assert!(
                SEED_PRODUCTS.iter().any(|p| p.key == *target),
                "unknown target key {target}"
            );
            assert!((0.0..=1.0).contains(strength), "strength out of range");
        }
    }

    #[test]
    fn seed_keys_are_unique() {
        let mut keys: Vec<_> = SEED_PRODUCTS.iter().map(|p| p.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), SEED_PRODUCTS.len());
    }

    #[test]
    fn no_seed_association_points_at_its_own_source() {
        for (source, target, _) in SEED_ASSOCIATIONS {
            assert_ne!(source, target);
        }
    }
}
