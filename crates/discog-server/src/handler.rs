use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::json;

use discog_records::Catalog;
use discog_types::{Album, AlbumFields, AlbumId, Role};

use crate::auth::{Credentials, Identity};
use crate::error::{ServerError, ServerResult};

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Info handler.
pub async fn info_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "discog-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn validate_fields(fields: &AlbumFields) -> ServerResult<()> {
    if fields.title.trim().is_empty() {
        return Err(ServerError::BadRequest("title must not be empty".into()));
    }
    Ok(())
}

fn album_not_found(id: AlbumId) -> ServerError {
    ServerError::NotFound(format!("album {id}"))
}

/// Run `f` against the catalog on tokio's blocking pool.
///
/// Store calls read and rewrite files and wait on `std::sync` locks, so they
/// must stay off the async worker threads.
pub(crate) async fn with_catalog<T, F>(catalog: Catalog, f: F) -> ServerResult<T>
where
    F: FnOnce(&Catalog) -> ServerResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&catalog))
        .await
        .map_err(|e| ServerError::Internal(format!("store task failed: {e}")))?
}

pub async fn list_albums(State(catalog): State<Catalog>) -> ServerResult<Json<Vec<Album>>> {
    let albums = with_catalog(catalog, |c| Ok(c.albums().list()?)).await?;
    Ok(Json(albums))
}

pub async fn get_album(
    State(catalog): State<Catalog>,
    Path(id): Path<AlbumId>,
) -> ServerResult<Json<Album>> {
    let album = with_catalog(catalog, move |c| {
        c.albums().get(id)?.ok_or_else(|| album_not_found(id))
    })
    .await?;
    Ok(Json(album))
}

pub async fn create_album(
    State(catalog): State<Catalog>,
    Json(fields): Json<AlbumFields>,
) -> ServerResult<(StatusCode, Json<Album>)> {
    validate_fields(&fields)?;
    let album = with_catalog(catalog, move |c| Ok(c.albums().add(fields)?)).await?;
    tracing::info!(id = %album.id, title = %album.title, "album created");
    Ok((StatusCode::CREATED, Json(album)))
}

pub async fn update_album(
    State(catalog): State<Catalog>,
    Path(id): Path<AlbumId>,
    Json(fields): Json<AlbumFields>,
) -> ServerResult<Json<Album>> {
    validate_fields(&fields)?;
    let album = with_catalog(catalog, move |c| {
        c.albums()
            .update(id, fields)?
            .ok_or_else(|| album_not_found(id))
    })
    .await?;
    tracing::info!(id = %album.id, "album updated");
    Ok(Json(album))
}

/// Deleting an unknown id succeeds too; the album is gone either way.
pub async fn delete_album(
    State(catalog): State<Catalog>,
    Path(id): Path<AlbumId>,
) -> ServerResult<StatusCode> {
    if with_catalog(catalog, move |c| Ok(c.albums().delete(id)?)).await? {
        tracing::info!(id = %id, "album deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn register_user(
    State(catalog): State<Catalog>,
    Json(credentials): Json<Credentials>,
) -> ServerResult<(StatusCode, Json<Identity>)> {
    credentials.validate()?;
    let Credentials { username, password } = credentials;
    let identity = with_catalog(catalog, move |c| {
        if !c.users().register(&username, &password)? {
            return Err(ServerError::Conflict(format!("user {username}")));
        }
        Ok(Identity::new(username, Role::User))
    })
    .await?;
    tracing::info!(username = %identity.username, "user registered");
    Ok((StatusCode::CREATED, Json(identity)))
}

pub async fn login(
    State(catalog): State<Catalog>,
    Json(credentials): Json<Credentials>,
) -> ServerResult<Json<Identity>> {
    let Credentials { username, password } = credentials;
    let identity = with_catalog(catalog, move |c| {
        let users = c.users();
        if !users.authenticate(&username, &password)? {
            return Err(ServerError::Unauthorized("invalid username or password".into()));
        }
        let record = users
            .find(&username)?
            .ok_or_else(|| ServerError::Internal("authenticated user vanished".into()))?;
        Ok(Identity::new(username, record.role))
    })
    .await?;
    Ok(Json(identity))
}
