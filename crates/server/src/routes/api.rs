//! Menu API handlers.

use axum::{
    extract::{Path, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};

use food3d_core::MenuItemId;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// `GET /api/menu` - the full menu as a JSON array.
#[tracing::instrument(skip(state))]
pub async fn menu(State(state): State<AppState>) -> Result<Response> {
    json_response(state.menu())
}

/// `GET /api/menu/{id}` - a single menu item.
#[tracing::instrument(skip(state))]
pub async fn menu_item(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    let id = MenuItemId::new(id);
    let item = state
        .menu_item(id)
        .ok_or_else(|| AppError::NotFound(format!("menu item {id}")))?;
    json_response(item)
}

fn json_response<T: serde::Serialize + ?Sized>(value: &T) -> Result<Response> {
    let body = serde_json::to_vec(value).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(([(CONTENT_TYPE, "application/json")], body).into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode};

    use food3d_core::{MenuItem, Price};

    use super::*;

    fn state() -> AppState {
        let items = vec![
            MenuItem {
                id: MenuItemId::new(1),
                name: "Pizza".to_string(),
                description: "Cheesy".to_string(),
                price: Price::parse("12.99").unwrap(),
                category: "pizza".to_string(),
                image: None,
            },
            MenuItem {
                id: MenuItemId::new(2),
                name: "Soda".to_string(),
                description: String::new(),
                price: Price::parse("1.5").unwrap(),
                category: "drinks".to_string(),
                image: Some("soda.glb".to_string()),
            },
        ];
        AppState::new(items, "public").unwrap()
    }

    #[tokio::test]
    async fn test_menu_returns_all_items() {
        let response = menu(State(state())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let items: Vec<MenuItem> = serde_json::from_slice(&body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].price.to_string(), "1.50");
    }

    #[tokio::test]
    async fn test_menu_item_found() {
        let response = menu_item(State(state()), Path(2)).await.unwrap();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let item: MenuItem = serde_json::from_slice(&body).unwrap();
        assert_eq!(item.name, "Soda");
    }

    #[tokio::test]
    async fn test_menu_item_not_found() {
        let err = menu_item(State(state()), Path(99)).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
