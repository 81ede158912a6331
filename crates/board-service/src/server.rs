//! HTTP server for the order board gesture API.
//!
//! The console frontend renders the board and forwards user gestures here.
//! Gesture rejections are ordinary board answers rendered as toasts, so
//! they travel as HTTP 200 with the serialized outcome; only transport and
//! repository failures map to error status codes.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::Json,
	routing::{get, post},
	Router,
};
use board_config::Config;
use board_core::{OrderBoard, TransitionOutcome};
use board_types::{BoardView, DropRequest, ErrorResponse, OrderId};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Reference to the order board for processing gestures.
	pub board: Arc<OrderBoard>,
}

/// Builds the API router over the given board.
pub fn build_router(board: Arc<OrderBoard>) -> Router {
	let app_state = AppState { board };

	Router::new()
		.nest(
			"/api",
			Router::new()
				.route("/board", get(handle_board))
				.route("/board/refresh", post(handle_refresh))
				.route("/board/drop", post(handle_drop))
				.route("/board/confirm", post(handle_confirm))
				.route("/board/cancel", post(handle_cancel))
				.route("/orders/{id}/expand", post(handle_expand))
				.route("/orders/{id}/drag", post(handle_drag))
				.route("/orders/{id}/advance", post(handle_advance)),
		)
		.layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
		.with_state(app_state)
}

/// Starts the HTTP server for the gesture API.
pub async fn start_server(
	config: Config,
	board: Arc<OrderBoard>,
) -> Result<(), Box<dyn std::error::Error>> {
	let app = build_router(board);

	let bind_address = format!("{}:{}", config.api.host, config.api.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Order board API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}

/// Handles GET /api/board requests.
///
/// Returns the kanban view model: one column per stage, derived from the
/// cached order collection.
async fn handle_board(State(state): State<AppState>) -> Json<BoardView> {
	Json(state.board.view().await)
}

/// Handles POST /api/board/refresh requests.
///
/// Replaces the cached order collection from the repository. A repository
/// failure has already been notified on the bus; here it maps to 502.
async fn handle_refresh(
	State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
	match state.board.load().await {
		Ok(count) => Ok(Json(serde_json::json!({ "loaded": count }))),
		Err(e) => {
			tracing::warn!(error = %e, "Board refresh failed");
			Err((
				StatusCode::BAD_GATEWAY,
				Json(ErrorResponse {
					error: "REPOSITORY_UNAVAILABLE".to_string(),
					message: e.to_string(),
				}),
			))
		},
	}
}

/// Handles POST /api/board/drop requests (drop-on-column gesture).
async fn handle_drop(
	State(state): State<AppState>,
	Json(request): Json<DropRequest>,
) -> Json<TransitionOutcome> {
	Json(state.board.drop_on_column(request.target).await)
}

/// Handles POST /api/orders/{id}/advance requests (double-click gesture).
async fn handle_advance(
	Path(id): Path<OrderId>,
	State(state): State<AppState>,
) -> Json<TransitionOutcome> {
	Json(state.board.advance_by_double_click(id).await)
}

/// Handles POST /api/orders/{id}/drag requests (drag start).
async fn handle_drag(Path(id): Path<OrderId>, State(state): State<AppState>) -> StatusCode {
	state.board.begin_drag(id).await;
	StatusCode::NO_CONTENT
}

/// Handles POST /api/orders/{id}/expand requests (detail panel toggle).
async fn handle_expand(
	Path(id): Path<OrderId>,
	State(state): State<AppState>,
) -> Json<serde_json::Value> {
	let expanded = state.board.toggle_expand(id).await;
	Json(serde_json::json!({ "expanded": expanded }))
}

/// Handles POST /api/board/confirm requests (terminal-stage confirmation).
async fn handle_confirm(State(state): State<AppState>) -> Json<TransitionOutcome> {
	Json(state.board.confirm_pending_transition().await)
}

/// Handles POST /api/board/cancel requests (terminal-stage cancellation).
async fn handle_cancel(State(state): State<AppState>) -> Json<serde_json::Value> {
	let cancelled = state.board.cancel_pending_transition().await;
	Json(serde_json::json!({ "cancelled": cancelled }))
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::body::{to_bytes, Body};
	use axum::http::Request;
	use board_core::{EventBus, StatusFlow};
	use board_repository::implementations::memory::MemoryRepository;
	use board_types::{Order, OrderStatus};
	use tower::ServiceExt;

	fn order(id: OrderId, status: OrderStatus) -> Order {
		Order {
			id,
			order_name: format!("Pedido {}", id),
			date: "2024-05-10 19:32".to_string(),
			payment: "Pix".to_string(),
			comment: String::new(),
			status,
		}
	}

	async fn router_with(orders: Vec<Order>) -> (Router, Arc<OrderBoard>) {
		let repo = Arc::new(MemoryRepository::new());
		repo.seed(orders).await;
		let board = Arc::new(OrderBoard::new(
			repo,
			StatusFlow::default(),
			EventBus::default(),
		));
		board.load().await.unwrap();
		(build_router(Arc::clone(&board)), board)
	}

	async fn body_json(response: axum::response::Response) -> serde_json::Value {
		let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		serde_json::from_slice(&bytes).unwrap()
	}

	#[tokio::test]
	async fn test_get_board_groups_orders_into_columns() {
		let (router, _board) = router_with(vec![
			order(1, OrderStatus::AwaitingAcceptance),
			order(2, OrderStatus::EnRoute),
		])
		.await;

		let response = router
			.oneshot(Request::get("/api/board").body(Body::empty()).unwrap())
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::OK);
		let body = body_json(response).await;
		let columns = body["columns"].as_array().unwrap();
		assert_eq!(columns.len(), 4);
		assert_eq!(columns[0]["label"], "Esperando Aceitação");
		assert_eq!(columns[0]["orders"].as_array().unwrap().len(), 1);
		assert_eq!(columns[2]["orders"][0]["id"], 2);
	}

	#[tokio::test]
	async fn test_advance_endpoint_applies_forward_move() {
		let (router, board) = router_with(vec![order(1, OrderStatus::AwaitingAcceptance)]).await;

		let response = router
			.oneshot(
				Request::post("/api/orders/1/advance")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::OK);
		let body = body_json(response).await;
		assert_eq!(body["outcome"], "applied");
		assert_eq!(
			board.orders().await[0].status,
			OrderStatus::InPreparation
		);
	}

	#[tokio::test]
	async fn test_drop_endpoint_rejects_backward_move_with_200() {
		let (router, _board) = router_with(vec![order(1, OrderStatus::EnRoute)]).await;

		let drag = Request::post("/api/orders/1/drag").body(Body::empty()).unwrap();
		let response = router.clone().oneshot(drag).await.unwrap();
		assert_eq!(response.status(), StatusCode::NO_CONTENT);

		let drop = Request::post("/api/board/drop")
			.header("content-type", "application/json")
			.body(Body::from(
				serde_json::json!({ "target": "Em Preparo" }).to_string(),
			))
			.unwrap();
		let response = router.oneshot(drop).await.unwrap();

		assert_eq!(response.status(), StatusCode::OK);
		let body = body_json(response).await;
		assert_eq!(body["outcome"], "rejected");
		assert_eq!(body["reason"], "not_forward");
	}

	#[tokio::test]
	async fn test_confirm_flow_over_http() {
		let (router, board) = router_with(vec![order(7, OrderStatus::EnRoute)]).await;

		let advance = Request::post("/api/orders/7/advance")
			.body(Body::empty())
			.unwrap();
		let response = router.clone().oneshot(advance).await.unwrap();
		let body = body_json(response).await;
		assert_eq!(body["outcome"], "confirmation_required");
		assert_eq!(board.orders().await[0].status, OrderStatus::EnRoute);

		let confirm = Request::post("/api/board/confirm")
			.body(Body::empty())
			.unwrap();
		let response = router.oneshot(confirm).await.unwrap();
		let body = body_json(response).await;
		assert_eq!(body["outcome"], "applied");
		assert_eq!(board.orders().await[0].status, OrderStatus::Delivered);
	}

	#[tokio::test]
	async fn test_cancel_endpoint_reports_whether_anything_was_pending() {
		let (router, _board) = router_with(vec![order(7, OrderStatus::EnRoute)]).await;

		let cancel = Request::post("/api/board/cancel")
			.body(Body::empty())
			.unwrap();
		let response = router.oneshot(cancel).await.unwrap();
		let body = body_json(response).await;
		assert_eq!(body["cancelled"], false);
	}

	#[tokio::test]
	async fn test_refresh_endpoint_reports_count() {
		let (router, _board) = router_with(vec![
			order(1, OrderStatus::AwaitingAcceptance),
			order(2, OrderStatus::AwaitingAcceptance),
		])
		.await;

		let response = router
			.oneshot(
				Request::post("/api/board/refresh")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::OK);
		let body = body_json(response).await;
		assert_eq!(body["loaded"], 2);
	}
}
