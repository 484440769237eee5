//! Listing and detail commands, driven through the browse session.

use anyhow::bail;

use offcat_client::{BrowseSession, OffClient};
use offcat_core::{FilterState, Product};

pub async fn search(
    client: &OffClient,
    query: &str,
    pages: u32,
    page_size: u32,
) -> anyhow::Result<()> {
    run_listing(client, FilterState::Name(query.to_string()), pages, page_size).await
}

pub async fn category(
    client: &OffClient,
    name: &str,
    pages: u32,
    page_size: u32,
) -> anyhow::Result<()> {
    run_listing(
        client,
        FilterState::Category(name.to_string()),
        pages,
        page_size,
    )
    .await
}

pub async fn popular(client: &OffClient, pages: u32, page_size: u32) -> anyhow::Result<()> {
    run_listing(client, FilterState::None, pages, page_size).await
}

async fn run_listing(
    client: &OffClient,
    filter: FilterState,
    pages: u32,
    page_size: u32,
) -> anyhow::Result<()> {
    let mut session = BrowseSession::new(client.clone(), page_size);
    session.set_filter(filter);
    session.refresh().await?;

    let mut fetched = 1;
    while fetched < pages && session.load_more().await? {
        fetched += 1;
    }

    println!(
        "{} matches, showing page {}/{} ({} items)",
        session.total_count(),
        session.page(),
        session.page_count(),
        session.products().len()
    );
    for product in session.products() {
        println!("{}", listing_line(product));
    }
    if session.has_more() {
        println!("(more available: rerun with --pages {})", fetched + 1);
    }
    Ok(())
}

pub async fn barcode(client: &OffClient, code: &str) -> anyhow::Result<()> {
    let Some(product) = client.product_by_barcode(code).await? else {
        bail!("no product found for barcode {code}");
    };

    println!("{}  {}", product.code, product.display_name());
    if let Some(brands) = &product.brands {
        println!("  brand:      {brands}");
    }
    if let Some(quantity) = &product.quantity {
        println!("  quantity:   {quantity}");
    }
    if let Some(grade) = &product.nutriscore_grade {
        println!("  nutriscore: {}", grade.to_uppercase());
    }
    if let Some(categories) = &product.categories {
        println!("  categories: {categories}");
    }
    if let Some(n) = &product.nutriments {
        println!("  per 100g:");
        let rows = [
            ("energy (kcal)", n.energy_kcal_100g),
            ("fat", n.fat_100g),
            ("saturated fat", n.saturated_fat_100g),
            ("carbohydrates", n.carbohydrates_100g),
            ("sugars", n.sugars_100g),
            ("fiber", n.fiber_100g),
            ("proteins", n.proteins_100g),
            ("salt", n.salt_100g),
        ];
        for (label, value) in rows {
            if let Some(v) = value {
                println!("    {label:<14} {v}");
            }
        }
    }
    Ok(())
}

pub async fn categories(client: &OffClient, limit: usize) -> anyhow::Result<()> {
    let names = client.top_categories(limit).await?;
    if names.is_empty() {
        println!("no categories returned");
        return Ok(());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

fn listing_line(product: &Product) -> String {
    let grade = product
        .nutriscore_grade
        .as_deref()
        .map_or(String::from("-"), str::to_uppercase);
    let brand = product.brands.as_deref().unwrap_or("-");
    format!(
        "{:<14} [{}] {}  ({})",
        product.code,
        grade,
        product.display_name(),
        brand
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_line_includes_code_grade_and_name() {
        let product = Product {
            product_name: Some("Dark chocolate".into()),
            brands: Some("Acme".into()),
            nutriscore_grade: Some("c".into()),
            ..Product::with_code("3017620422003")
        };
        let line = listing_line(&product);
        assert!(line.contains("3017620422003"));
        assert!(line.contains("[C]"));
        assert!(line.contains("Dark chocolate"));
        assert!(line.contains("Acme"));
    }

    #[test]
    fn listing_line_handles_missing_fields() {
        let line = listing_line(&Product::with_code("1"));
        assert!(line.contains("[-]"));
        assert!(line.contains("Unknown product"));
    }
}
