//! Terminal output for command results.

#![allow(clippy::print_stdout)]

use maison_core::{Price, Product, ProductSummary};
use maison_storefront::stores::CartSnapshot;

pub fn cart(snapshot: &CartSnapshot) {
    if snapshot.items.is_empty() {
        println!("Your cart is empty.");
    } else {
        for item in &snapshot.items {
            println!(
                "  {:<10} {:<28} {:>3} x {:>10} = {:>10}",
                item.product.id,
                item.product.name,
                item.quantity,
                Price::usd(item.product.price).to_string(),
                Price::usd(item.line_total()).to_string(),
            );
        }
        println!();
    }

    let totals = &snapshot.totals;
    println!("  {:<10} {:>10}", "Subtotal", Price::usd(totals.subtotal).to_string());
    println!("  {:<10} {:>10}", "Tax", Price::usd(totals.tax).to_string());
    println!("  {:<10} {:>10}", "Shipping", Price::usd(totals.shipping).to_string());
    println!("  {:<10} {:>10}", "Total", Price::usd(totals.total).to_string());
}

pub fn wishlist(items: &[Product]) {
    if items.is_empty() {
        println!("Your wishlist is empty.");
        return;
    }
    for product in items {
        println!(
            "  {:<10} {:<28} {:>10}",
            product.id,
            product.name,
            Price::usd(product.price).to_string(),
        );
    }
}

pub fn search_results(query: &str, results: &[ProductSummary]) {
    if results.is_empty() {
        println!("No products match \"{query}\".");
        return;
    }
    println!("{} result(s) for \"{query}\":", results.len());
    summaries(results);
}

pub fn catalog(products: &[ProductSummary]) {
    summaries(products);
}

fn summaries(products: &[ProductSummary]) {
    for product in products {
        println!(
            "  {:<10} {:<28} {:<12} {:>10}",
            product.id,
            product.name,
            product.category,
            Price::usd(product.price).to_string(),
        );
    }
}
