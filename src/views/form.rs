use std::fmt::Write;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{Product, ProductDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
    Price,
    Stock,
    Category,
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Field::Name),
            "description" | "desc" => Ok(Field::Description),
            "price" => Ok(Field::Price),
            "stock" => Ok(Field::Stock),
            "category" => Ok(Field::Category),
            other => Err(format!("unknown field '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed area around the modal.
    Overlay,
    /// Anything inside the modal itself.
    Body,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    Submit(ProductDraft),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormValidationError {
    #[error("Name is required")]
    NameRequired,
    #[error("Price must be at least 0")]
    NegativePrice,
    #[error("Stock must be at least 0")]
    NegativeStock,
}

/// Modal create/edit form. Holds a local draft that only leaves the form
/// through [`FormEvent::Submit`].
#[derive(Debug, Default)]
pub struct ProductForm {
    visible: bool,
    initial_data: Option<Product>,
    draft: ProductDraft,
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current props. The local draft is rebuilt whenever
    /// `visible` or `initial_data` differs from the previous call.
    pub fn sync(&mut self, visible: bool, initial_data: Option<&Product>) {
        if self.visible == visible && self.initial_data.as_ref() == initial_data {
            return;
        }
        self.visible = visible;
        self.initial_data = initial_data.cloned();
        self.draft = match initial_data {
            Some(product) => ProductDraft::from(product),
            None => ProductDraft::default(),
        };
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_edit(&self) -> bool {
        self.initial_data.is_some()
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn set_field(&mut self, field: Field, raw: &str) {
        match field {
            Field::Name => self.draft.name = raw.to_string(),
            Field::Description => self.draft.description = raw.to_string(),
            Field::Price => self.draft.price = coerce_price(raw),
            Field::Stock => self.draft.stock = coerce_stock(raw),
            Field::Category => self.draft.category = raw.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), FormValidationError> {
        if self.draft.name.is_empty() {
            return Err(FormValidationError::NameRequired);
        }
        if self.draft.price < 0.0 {
            return Err(FormValidationError::NegativePrice);
        }
        if self.draft.stock < 0 {
            return Err(FormValidationError::NegativeStock);
        }
        Ok(())
    }

    pub fn submit(&self) -> Result<FormEvent, FormValidationError> {
        self.validate()?;
        Ok(FormEvent::Submit(self.draft.clone()))
    }

    pub fn click(&self, target: ClickTarget) -> Option<FormEvent> {
        match target {
            ClickTarget::Overlay => Some(FormEvent::Cancel),
            ClickTarget::Body => None,
        }
    }

    pub fn render(&self) -> Option<String> {
        if !self.visible {
            return None;
        }
        let (title, action) = if self.is_edit() {
            ("Edit product", "save")
        } else {
            ("New product", "create")
        };

        let mut out = String::new();
        let _ = writeln!(out, "+-- {} --", title);
        let _ = writeln!(out, "| name*        {}", self.draft.name);
        let _ = writeln!(out, "| description  {}", self.draft.description);
        let _ = writeln!(out, "| price*       {}", self.draft.price);
        let _ = writeln!(out, "| stock*       {}", self.draft.stock);
        let _ = writeln!(out, "| category     {}", self.draft.category);
        let _ = writeln!(out, "+-- set <field> <value> | submit ({}) | cancel", action);
        Some(out)
    }
}

/// Leading decimal number of `raw`, exponent included, or 0 when there is
/// none.
fn coerce_price(raw: &str) -> f64 {
    let raw = raw.trim_start();
    let bytes = raw.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mantissa_start = end;
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => {}
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !bytes[mantissa_start..end].iter().any(u8::is_ascii_digit) {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let digits = bytes[exp_end..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits > 0 {
            end = exp_end + digits;
        }
    }

    raw[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Leading integer of `raw`, or 0 when there is none.
fn coerce_stock(raw: &str) -> i64 {
    let raw = raw.trim_start();
    let end = raw
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '+' || c == '-'))))
        .map(|(i, _)| i)
        .unwrap_or(raw.len());
    raw[..end].parse::<i64>().unwrap_or(0)
}
