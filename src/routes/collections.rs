use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use uuid::Uuid;

use crate::AppState;
use crate::auth::Principal;
use crate::error::AppError;
use crate::views::CollectionView;

/// The deployment-time `{area}` segment this router is mounted under; used
/// to build Location headers for created collections.
#[derive(Debug, Clone, Copy)]
pub struct ApiArea(pub &'static str);

pub fn router<V: CollectionView>() -> Router<AppState> {
    Router::new()
        .route("/collections", get(list::<V>).post(create::<V>))
        .route("/collection", get(get_default::<V>))
        .route("/collection/{id}", get(get_by_id::<V>).delete(remove))
}

async fn list<V: CollectionView>(
    State(state): State<AppState>,
    Principal(caller): Principal,
) -> Result<Json<Vec<V>>, AppError> {
    let collections = state.service.list(caller).await?;

    Ok(Json(collections.iter().map(V::from_model).collect()))
}

async fn get_default<V: CollectionView>(
    State(state): State<AppState>,
    Principal(caller): Principal,
) -> Result<Json<V>, AppError> {
    let collection = state.service.get(caller, None).await?;

    Ok(Json(V::from_model(&collection)))
}

async fn get_by_id<V: CollectionView>(
    State(state): State<AppState>,
    Principal(caller): Principal,
    Path(id): Path<String>,
) -> Result<Json<V>, AppError> {
    let id = parse_path_id(&id)?;
    let collection = state.service.get(caller, Some(id)).await?;

    Ok(Json(V::from_model(&collection)))
}

async fn create<V: CollectionView>(
    State(state): State<AppState>,
    Extension(ApiArea(area)): Extension<ApiArea>,
    Principal(caller): Principal,
    Json(view): Json<V>,
) -> Result<impl IntoResponse, AppError> {
    let input = view.into_model()?;
    let created = state.service.add(caller, input).await?;

    let location = format!("/api/{}/collection/{}", area, created.id.simple());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(V::from_model(&created)),
    ))
}

async fn remove(
    State(state): State<AppState>,
    Principal(caller): Principal,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_path_id(&id)?;
    state.service.delete(caller, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// Path segments that are not UUIDs behave like unknown collections.
fn parse_path_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound)
}
