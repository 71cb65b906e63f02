use chrono::{DateTime, Local, TimeZone};
use std::fmt::{Display, Write};

use crate::models::Product;
use crate::operator::Operator;

pub const CURRENCY_GLYPH: &str = "¥";
pub const EMPTY_PLACEHOLDER: &str = "No products yet.";
const DESCRIPTION_WIDTH: usize = 32;
const HEADERS: [&str; 7] = ["ID", "Name", "Description", "Price", "Stock", "Category", "Created"];

#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    Edit(Product),
    Delete(i64),
}

/// Read-only view over the current product snapshot.
pub struct ProductTable<'a> {
    products: &'a [Product],
}

impl<'a> ProductTable<'a> {
    pub fn new(products: &'a [Product]) -> Self {
        ProductTable { products }
    }

    fn find(&self, id: i64) -> Option<&'a Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn request_edit(&self, id: i64) -> Option<TableAction> {
        self.find(id).cloned().map(TableAction::Edit)
    }

    /// Asks the operator before handing out a delete. A declined prompt or an
    /// id that is not on screen yields nothing.
    pub fn request_delete(&self, id: i64, operator: &mut dyn Operator) -> Option<TableAction> {
        let product = self.find(id)?;
        let prompt = format!("Delete product \"{}\"?", product.name);
        if operator.confirm(&prompt) {
            Some(TableAction::Delete(product.id))
        } else {
            None
        }
    }

    pub fn render(&self) -> String {
        if self.products.is_empty() {
            return format!("{}\n", EMPTY_PLACEHOLDER);
        }

        let rows: Vec<[String; 7]> = self
            .products
            .iter()
            .map(|p| {
                [
                    p.id.to_string(),
                    p.name.clone(),
                    truncate(&p.description, DESCRIPTION_WIDTH),
                    format_price(p.price),
                    p.stock.to_string(),
                    p.category.clone(),
                    format_timestamp(p.created_at.as_deref()),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_line(&mut out, &HEADERS.map(String::from), &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let _ = writeln!(out, "{}", rule.join("-+-"));
        for row in &rows {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max - 1).collect();
    short.push('…');
    short
}

pub fn format_price(price: f64) -> String {
    // Adding zero turns -0.0 into 0.0.
    format!("{}{:.2}", CURRENCY_GLYPH, price + 0.0)
}

/// Local-time rendering of a server timestamp, `-` when there is nothing
/// usable to show.
pub fn format_timestamp(raw: Option<&str>) -> String {
    format_timestamp_in(raw, &Local)
}

pub fn format_timestamp_in<Tz>(raw: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let raw = match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return "-".to_string(),
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(instant) => instant
            .with_timezone(tz)
            .format("%Y/%-m/%-d %H:%M:%S")
            .to_string(),
        Err(_) => "-".to_string(),
    }
}
