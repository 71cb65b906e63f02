use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use tracing::info;

use crate::models::ProductDraft;
use crate::stub::AppState;

// Validation function for product data
pub fn validate_product(product: &ProductDraft) -> Result<(), String> {
    if product.name.trim().is_empty() {
        return Err("Product name cannot be empty".to_string());
    }
    if !product.price.is_finite() || product.price < 0.0 {
        return Err("Product price cannot be negative".to_string());
    }
    if product.stock < 0 {
        return Err("Product stock cannot be negative".to_string());
    }
    Ok(())
}

fn not_found(id: i64) -> HttpResponse {
    HttpResponse::NotFound().json(json!({"message": format!("Product not found: id={}", id)}))
}

pub async fn get_products(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.store.list())
}

pub async fn get_product(data: web::Data<AppState>, id: web::Path<i64>) -> impl Responder {
    let id = id.into_inner();
    match data.store.get(id) {
        Some(product) => HttpResponse::Ok().json(product),
        None => not_found(id),
    }
}

pub async fn create_product(
    data: web::Data<AppState>,
    product: web::Json<ProductDraft>,
) -> impl Responder {
    let draft = product.into_inner();
    if let Err(message) = validate_product(&draft) {
        return HttpResponse::BadRequest().json(json!({"message": message}));
    }
    let product = data.store.create(draft);
    info!(id = product.id, "stub created product");
    HttpResponse::Created().json(product)
}

pub async fn update_product(
    data: web::Data<AppState>,
    id: web::Path<i64>,
    product: web::Json<ProductDraft>,
) -> impl Responder {
    let id = id.into_inner();
    let draft = product.into_inner();
    if let Err(message) = validate_product(&draft) {
        return HttpResponse::BadRequest().json(json!({"message": message}));
    }
    match data.store.update(id, draft) {
        Some(product) => {
            info!(id, "stub updated product");
            HttpResponse::Ok().json(product)
        }
        None => not_found(id),
    }
}

pub async fn delete_product(data: web::Data<AppState>, id: web::Path<i64>) -> impl Responder {
    let id = id.into_inner();
    if data.store.delete(id) {
        info!(id, "stub deleted product");
        HttpResponse::NoContent().finish()
    } else {
        not_found(id)
    }
}
