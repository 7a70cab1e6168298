//! HTTP route handlers.
//!
//! Each request drives a fresh component through its events and renders
//! the result. Nothing is kept between requests.

use std::path::Path;

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use futures::future::join_all;
use tower_http::services::ServeDir;
use tracing::{debug, error, info};

use crate::api::TransportApi;
use crate::components::{LineCard, SearchBar, StationListener};
use crate::domain::{LoadedSet, Station, Suggestion};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router<A>(state: AppState<A>, static_dir: impl AsRef<Path>) -> Router
where
    A: TransportApi + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/search/stations", get(search_stations::<A>))
        .route("/search/select", post(select_station::<A>))
        .route("/cards", post(render_cards::<A>))
        .route("/cards/toggle", post(toggle_card::<A>))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the search bar.
async fn index_page() -> Response {
    askama_axum::into_response(&IndexTemplate)
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

fn render<T: Template>(template: &T) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html).into_response())
}

/// Autocomplete. API failures yield an empty list, never an error.
async fn search_stations<A>(
    State(state): State<AppState<A>>,
    headers: HeaderMap,
    Query(req): Query<StationSearchRequest>,
) -> Result<Response, AppError>
where
    A: TransportApi + Send + Sync + 'static,
{
    let mut bar = SearchBar::new(None);
    bar.on_input(state.api.as_ref(), &req.q).await;

    if accepts_html(&headers) {
        render(&SuggestionsTemplate {
            labels: bar.labels(),
        })
    } else {
        let suggestions = bar.suggestions().iter().map(SuggestionResult::from).collect();
        Ok(Json(StationSearchResponse { suggestions }).into_response())
    }
}

/// Collects what the search bar reports on a confirmed selection.
#[derive(Default)]
struct SelectionSink {
    station: Option<Station>,
    loaded: Option<LoadedSet>,
}

impl StationListener for SelectionSink {
    fn update_station(&mut self, station: Station) {
        self.station = Some(station);
    }

    fn update_loaded(&mut self, loaded: LoadedSet) {
        self.loaded = Some(loaded);
    }
}

/// Resolve a picked suggestion.
///
/// Responds 204 when nothing was confirmed (no exact match, lookup failure,
/// unparsable label), so the page keeps its current station.
async fn select_station<A>(
    State(state): State<AppState<A>>,
    headers: HeaderMap,
    Form(req): Form<SelectStationRequest>,
) -> Result<Response, AppError>
where
    A: TransportApi + Send + Sync + 'static,
{
    let api = state.api.as_ref();
    let mut bar = SearchBar::new(None);
    let mut sink = SelectionSink::default();

    let outcome = match (req.station, req.network, req.label) {
        (Some(station), Some(network), _) => {
            let pending = bar.choose(&Suggestion::new(station, network));
            bar.resolve(api, pending, &mut sink).await
        }
        (_, _, Some(label)) => bar.on_select(api, &label, &mut sink).await,
        _ => {
            return Err(AppError::BadRequest {
                message: "expected `label`, or `station` and `network`".to_string(),
            });
        }
    };

    let Some(station) = sink.station else {
        debug!(?outcome, "selection not confirmed");
        return Ok(StatusCode::NO_CONTENT.into_response());
    };
    info!(station = %station.name, network = %station.network, "station confirmed");

    if accepts_html(&headers) {
        render(&StationTemplate::new(station))
    } else {
        let loaded = sink.loaded.unwrap_or_default().into_iter().collect();
        Ok(Json(SelectStationResponse { station, loaded }).into_response())
    }
}

/// Render a station's line cards. Each card is mounted, so each fetches its
/// decorative image; the fetches run concurrently.
async fn render_cards<A>(
    State(state): State<AppState<A>>,
    headers: HeaderMap,
    Json(req): Json<LineCardsRequest>,
) -> Result<Response, AppError>
where
    A: TransportApi + Send + Sync + 'static,
{
    let api = state.api.as_ref();
    let mut cards: Vec<LineCard> = req
        .lines
        .into_iter()
        .map(|line| LineCard::new(line, req.station.clone()))
        .collect();

    join_all(cards.iter_mut().map(|card| card.mount(api))).await;

    if accepts_html(&headers) {
        render(&LineCardsTemplate {
            cards: cards.iter().map(CardEntry::from_card).collect(),
        })
    } else {
        let cards = cards
            .iter()
            .map(|card| LineCardResult::from(card.view()))
            .collect();
        Ok(Json(LineCardsResponse { cards }).into_response())
    }
}

/// Apply a click to a line card and return its stats panel.
async fn toggle_card<A>(
    State(state): State<AppState<A>>,
    headers: HeaderMap,
    Json(req): Json<ToggleCardRequest>,
) -> Result<Response, AppError>
where
    A: TransportApi + Send + Sync + 'static,
{
    let mut card =
        LineCard::new(req.line, req.station).with_stat_panel(req.stat_panel, &state.features);
    let changed = card.click(&state.features);

    if accepts_html(&headers) {
        render(&StatPanelTemplate {
            chart: card.freq_chart(),
        })
    } else {
        Ok(Json(ToggleCardResponse {
            stat_panel: card.stat_panel_visible(),
            changed,
        })
        .into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::HeaderValue;

    use crate::api::MockTransportApi;
    use crate::domain::{GifImage, Line};
    use crate::features::NetworkFeatures;

    fn state(api: MockTransportApi) -> AppState<MockTransportApi> {
        AppState::new(api, NetworkFeatures::default())
    }

    fn html_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/html"));
        headers
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn c1() -> Line {
        Line::new("C1", "Chantepie", vec!["10:02".into(), "10:15".into()])
    }

    #[test]
    fn accepts_html_detection() {
        assert!(accepts_html(&html_headers()));
        assert!(!accepts_html(&HeaderMap::new()));
    }

    #[tokio::test]
    async fn search_returns_json_suggestions() {
        let api = MockTransportApi::new()
            .with_suggestions("gar", vec![Suggestion::new("Gares", "SNCF")]);
        let req = StationSearchRequest { q: "gar".into() };

        let response = search_stations(State(state(api)), HeaderMap::new(), Query(req))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["suggestions"][0]["label"], "Gares - SNCF");
    }

    #[tokio::test]
    async fn search_failure_is_empty_not_error() {
        let api = MockTransportApi::new().failing_find_stations();
        let req = StationSearchRequest { q: "gar".into() };

        let response = search_stations(State(state(api)), HeaderMap::new(), Query(req))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["suggestions"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn search_renders_html_fragment() {
        let api = MockTransportApi::new()
            .with_suggestions("gar", vec![Suggestion::new("Gares", "SNCF")]);
        let req = StationSearchRequest { q: "gar".into() };

        let response = search_stations(State(state(api)), html_headers(), Query(req))
            .await
            .unwrap();

        let html = body_text(response).await;
        assert!(html.contains(r#"<div class="searchbar-result-box">Gares - SNCF</div>"#));
    }

    #[tokio::test]
    async fn select_by_label_confirms_station() {
        let api = MockTransportApi::new().with_station(Station::new("Gares", "SNCF"));
        let req = SelectStationRequest {
            label: Some("Gares - SNCF".into()),
            station: None,
            network: None,
        };

        let response = select_station(State(state(api)), HeaderMap::new(), Form(req))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["station"]["station"], "Gares");
        assert_eq!(json["loaded"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn select_structured_confirms_station() {
        let api = MockTransportApi::new().with_station(Station::new("Gares", "SNCF"));
        let req = SelectStationRequest {
            label: None,
            station: Some("Gares".into()),
            network: Some("SNCF".into()),
        };

        let response = select_station(State(state(api)), html_headers(), Form(req))
            .await
            .unwrap();

        let html = body_text(response).await;
        assert!(html.contains(r#"data-station="Gares""#));
    }

    #[tokio::test]
    async fn select_without_match_is_no_content() {
        let api = MockTransportApi::new().with_station(Station::new("Gares Nord", "SNCF"));
        let req = SelectStationRequest {
            label: Some("Gares - SNCF".into()),
            station: None,
            network: None,
        };

        let response = select_station(State(state(api)), HeaderMap::new(), Form(req))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn select_without_fields_is_bad_request() {
        let req = SelectStationRequest {
            label: None,
            station: Some("Gares".into()),
            network: None,
        };

        let result = select_station(
            State(state(MockTransportApi::new())),
            HeaderMap::new(),
            Form(req),
        )
        .await;

        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn cards_fetch_one_image_each() {
        let api = MockTransportApi::new().with_gif(GifImage::from_base64("R0lGODlh").unwrap());
        let calls = api.clone();
        let req = LineCardsRequest {
            station: Station::new("République", "Rennes"),
            lines: vec![c1(), Line::new("a", "J.F. Kennedy", vec![])],
        };

        let response = render_cards(State(state(api)), HeaderMap::new(), Json(req))
            .await
            .unwrap();

        assert_eq!(calls.calls().gif, 2);
        let json = body_json(response).await;
        assert_eq!(json["cards"][0]["departures"], serde_json::json!(["10:02", "10:15", null]));
        assert_eq!(json["cards"][1]["departures"], serde_json::json!([null, null, null]));
        assert_eq!(json["cards"][0]["gif_src"], "data:image/gif;base64,R0lGODlh");
    }

    #[tokio::test]
    async fn cards_render_without_images() {
        let api = MockTransportApi::new().failing_gif();
        let req = LineCardsRequest {
            station: Station::new("République", "Rennes"),
            lines: vec![c1()],
        };

        let response = render_cards(State(state(api)), html_headers(), Json(req))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Chantepie"));
        assert!(!html.contains(r#"<img class="gif""#));
    }

    #[tokio::test]
    async fn toggle_opens_panel_on_rennes() {
        let req = ToggleCardRequest {
            line: c1(),
            station: Station::new("République", "Rennes"),
            stat_panel: false,
        };

        let response = toggle_card(
            State(state(MockTransportApi::new())),
            HeaderMap::new(),
            Json(req),
        )
        .await
        .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["stat_panel"], true);
        assert_eq!(json["changed"], true);
    }

    #[tokio::test]
    async fn toggle_closes_open_panel() {
        let req = ToggleCardRequest {
            line: c1(),
            station: Station::new("République", "Rennes"),
            stat_panel: true,
        };

        let response = toggle_card(
            State(state(MockTransportApi::new())),
            html_headers(),
            Json(req),
        )
        .await
        .unwrap();

        let html = body_text(response).await;
        assert!(html.trim().is_empty());
    }

    #[tokio::test]
    async fn toggle_is_noop_elsewhere() {
        let req = ToggleCardRequest {
            line: c1(),
            station: Station::new("Gares", "SNCF"),
            stat_panel: false,
        };

        let response = toggle_card(
            State(state(MockTransportApi::new())),
            HeaderMap::new(),
            Json(req),
        )
        .await
        .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["stat_panel"], false);
        assert_eq!(json["changed"], false);
    }

    #[tokio::test]
    async fn toggle_ignores_claimed_panel_elsewhere() {
        let req = ToggleCardRequest {
            line: c1(),
            station: Station::new("Gares", "SNCF"),
            stat_panel: true,
        };

        let response = toggle_card(
            State(state(MockTransportApi::new())),
            html_headers(),
            Json(req),
        )
        .await
        .unwrap();

        let html = body_text(response).await;
        assert!(!html.contains("Fréquentation"));
        assert!(html.trim().is_empty());
    }

    #[tokio::test]
    async fn confirmed_record_lines_render_as_cards() {
        let api = MockTransportApi::from_file("data/mock_api.json").unwrap();
        let req = SelectStationRequest {
            label: Some("République - Rennes".into()),
            station: None,
            network: None,
        };

        let response = select_station(State(state(api.clone())), HeaderMap::new(), Form(req))
            .await
            .unwrap();
        let record = body_json(response).await["station"].clone();

        let req: LineCardsRequest = serde_json::from_value(serde_json::json!({
            "station": record,
            "lines": record["lines"],
        }))
        .unwrap();
        assert_eq!(req.lines.len(), 2);

        let response = render_cards(State(state(api)), html_headers(), Json(req))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert_eq!(html.matches(r#"class="line-card""#).count(), 2);
        assert!(html.contains("J.F. Kennedy"));
    }

    #[tokio::test]
    async fn health_check() {
        assert_eq!(health().await, "ok");
    }
}
