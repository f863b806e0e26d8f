use super::engine::{distinct_values, search};
use super::types::{ParticipantPage, SearchParams};
use crate::error::AppError;
use crate::storage::store::SharedStore;
use crate::storage::types::ParticipantRecord;

use axum::extract::{Path, Query};
use axum::{Extension, Json};

pub async fn handle_list_participants(
    Query(params): Query<SearchParams>,
    Extension(store): Extension<SharedStore>,
) -> Json<ParticipantPage> {
    let filter = params.filter();
    let request = params.page_request();

    let store = store.read().await;
    let page = search(store.all(), &filter, request);

    tracing::debug!(
        "Search {:?} page {} matched {} of {}",
        filter,
        request.page,
        page.pagination.total,
        store.len()
    );

    Json(page)
}

pub async fn handle_get_participant(
    Path(p_no): Path<String>,
    Extension(store): Extension<SharedStore>,
) -> Result<Json<ParticipantRecord>, AppError> {
    let store = store.read().await;
    store
        .find_by_p_no(&p_no)
        .cloned()
        .map(Json)
        .ok_or(AppError::ParticipantNotFound)
}

pub async fn handle_list_trades(Extension(store): Extension<SharedStore>) -> Json<Vec<String>> {
    let store = store.read().await;
    Json(distinct_values(store.all(), |r| r.trade.as_str()))
}

pub async fn handle_list_genders(Extension(store): Extension<SharedStore>) -> Json<Vec<String>> {
    let store = store.read().await;
    Json(distinct_values(store.all(), |r| r.gender.as_str()))
}
