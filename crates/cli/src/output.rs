//! Text and JSON rendering for command results.

use serde::Serialize;
use serde_json::json;

use happyhome_catalog::{Category, Product};
use happyhome_quote::{RequestErrors, SubmissionReceipt};
use happyhome_view::{QuoteView, Surface};

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn products(products: &[&Product], json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(products);
    }
    if products.is_empty() {
        println!("No products found.");
        return Ok(());
    }
    for p in products {
        let star = if p.is_popular() { " *" } else { "" };
        println!(
            "{:<10} {:<40} {:<14} {}{star}",
            p.id_typed().as_str(),
            p.name(),
            p.price_range(),
            p.category()
        );
    }
    Ok(())
}

pub(crate) fn categories(categories: &[Category], json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(categories);
    }
    for c in categories {
        println!("{:<20} {:>3}  {}", c.slug, c.product_count, c.name);
    }
    Ok(())
}

pub(crate) fn quote(view: &QuoteView, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(view);
    }
    if view.is_empty {
        println!("Your quote is empty");
        return Ok(());
    }

    if let Surface::Drawer { expanded: false } = view.surface {
        println!("Your Quote ({})", view.count_label);
        return Ok(());
    }

    println!("Your Quote");
    for row in &view.rows {
        println!(
            "  {:>4} x {:<40} {:<14} [{}]",
            row.quantity, row.name, row.price_range, row.product_id
        );
    }
    println!("{} in your quote", view.count_label);
    Ok(())
}

pub(crate) fn receipt(receipt: &SubmissionReceipt, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&json!({
            "lineCount": receipt.line_count,
            "itemCount": receipt.item_count,
            "link": receipt.link,
        }));
    }
    println!(
        "Quote request ready: {} product(s), {} item(s)",
        receipt.line_count, receipt.item_count
    );
    if let Some(link) = &receipt.link {
        println!("{link}");
    }
    Ok(())
}

pub(crate) fn field_errors(errors: &RequestErrors, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(errors);
    }
    for e in &errors.errors {
        eprintln!("  {}: {}", e.field, e.message);
    }
    Ok(())
}
