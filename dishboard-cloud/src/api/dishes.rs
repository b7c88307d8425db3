//! Dish admin API
//!
//! GET    /api/dishes       — list, newest first
//! POST   /api/dishes       — multipart `name`, `category`, `file` → image host → store
//! DELETE /api/dishes/{id}  — remove one dish

use std::sync::Arc;

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use serde::Serialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::{DishCreate, DishRecord};

use crate::error::ServiceResult;
use crate::media::{ImageHost, MAX_FILE_SIZE, SUPPORTED_FORMATS, supported_extension};
use crate::state::AppState;
use crate::store::DishStore;

#[derive(Debug, Serialize)]
pub struct DishList {
    pub items: Vec<DishRecord>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DishCreated {
    pub id: String,
    pub image_url: String,
}

/// Raw form fields as submitted
#[derive(Default)]
struct DishForm {
    name: String,
    category: Option<String>,
    file_name: String,
    file: Vec<u8>,
}

fn store(state: &AppState) -> Result<Arc<dyn DishStore>, AppError> {
    state
        .store
        .clone()
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotConfigured))
}

fn image_host(state: &AppState) -> Result<Arc<dyn ImageHost>, AppError> {
    state
        .images
        .clone()
        .ok_or_else(|| AppError::new(ErrorCode::UploadNotConfigured))
}

/// GET /api/dishes
pub async fn list_dishes(State(state): State<AppState>) -> ServiceResult<ApiResponse<DishList>> {
    let items = store(&state)?.list().await?;
    Ok(ApiResponse::success(DishList {
        count: items.len(),
        items,
    }))
}

/// POST /api/dishes
pub async fn create_dish(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ServiceResult<ApiResponse<DishCreated>> {
    let store = store(&state)?;
    let images = image_host(&state)?;

    let form = read_form(multipart).await?;
    validate(&form)?;

    let image_url = images.upload(&form.file_name, form.file).await?;
    let dish = DishCreate::new(&form.name, image_url, form.category.as_deref());
    dish.validate().map_err(invalid_dish)?;
    let id = store.create(dish.clone()).await?;

    tracing::info!(dish_id = %id, name = %dish.name, "Dish added");
    Ok(ApiResponse::success_with_message(
        "Dish added",
        DishCreated {
            id,
            image_url: dish.image_url,
        },
    ))
}

/// DELETE /api/dishes/{id}
pub async fn delete_dish(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<ApiResponse<()>> {
    let store = store(&state)?;
    if id.trim().is_empty() || id.contains('/') {
        return Err(AppError::invalid_request("Invalid dish id").into());
    }

    store.delete(&id).await?;
    tracing::info!(dish_id = %id, "Dish deleted");
    Ok(ApiResponse::ok())
}

async fn read_form(mut multipart: Multipart) -> Result<DishForm, AppError> {
    let mut form = DishForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("name") => form.name = field.text().await.map_err(multipart_error)?,
            Some("category") => {
                form.category = Some(field.text().await.map_err(multipart_error)?)
            }
            Some("file") => {
                form.file_name = field.file_name().unwrap_or_default().to_string();
                form.file = field.bytes().await.map_err(multipart_error)?.to_vec();
            }
            other => tracing::debug!(field = ?other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}

/// Checks in the order the admin form reports them
fn validate(form: &DishForm) -> Result<(), AppError> {
    if form.name.trim().is_empty() {
        return Err(AppError::new(ErrorCode::DishNameRequired).with_detail("field", "name"));
    }
    if form.file.is_empty() {
        return Err(AppError::new(ErrorCode::DishImageRequired).with_detail("field", "file"));
    }
    if form.file.len() > MAX_FILE_SIZE {
        return Err(too_large(form.file.len()));
    }
    if supported_extension(&form.file_name).is_none() {
        return Err(AppError::with_message(
            ErrorCode::UnsupportedImageFormat,
            format!(
                "Unsupported format: {}. Supported: {}",
                form.file_name,
                SUPPORTED_FORMATS.join(", ")
            ),
        ));
    }
    Ok(())
}

/// Payload check failed after upload; only the host can leave the URL blank
fn invalid_dish(field: &'static str) -> AppError {
    match field {
        "name" => AppError::new(ErrorCode::DishNameRequired).with_detail("field", field),
        _ => AppError::with_message(ErrorCode::ImageUploadFailed, "Image host returned no URL")
            .with_detail("field", field),
    }
}

fn too_large(size: usize) -> AppError {
    AppError::with_message(
        ErrorCode::ImageTooLarge,
        format!("File too large: {size} bytes (max {MAX_FILE_SIZE})"),
    )
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == http::StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::with_message(
            ErrorCode::ImageTooLarge,
            format!("File too large (max {MAX_FILE_SIZE} bytes)"),
        );
    }
    AppError::with_message(ErrorCode::InvalidRequest, format!("Multipart error: {e}"))
}
