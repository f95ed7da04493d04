//! HTTP handler functions for the booth map API.
//!
//! Each handler locks the shared controller, replays the request's query
//! parameters as commands, and serializes the resulting view. Re-issuing
//! the same parameters is idempotent, so concurrent clients only pay the
//! cost of a constituency load when they actually switch.

use actix_web::{HttpResponse, web};
use booth_map_app::{AppController, AppError, Command};
use booth_map_server_models::{
    ApiBoothRow, ApiCell, ApiErrorBody, ApiHealth, ApiSummaryResponse, ApiTablePage,
    BoothQueryParams, CellQueryParams, SummaryQueryParams,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/constituencies`
///
/// Returns the district-level master summary: every district with its
/// constituency references.
pub async fn constituencies(state: web::Data<AppState>) -> HttpResponse {
    let controller = state.controller.lock().await;
    HttpResponse::Ok().json(controller.master())
}

/// `GET /api/summary`
///
/// Returns the aggregate figures and area list for one constituency,
/// loading it first if it is not the active one.
pub async fn summary(
    state: web::Data<AppState>,
    params: web::Query<SummaryQueryParams>,
) -> HttpResponse {
    let mut controller = state.controller.lock().await;
    if let Err(e) = ensure_loaded(&mut controller, &params.constituency).await {
        return error_response(&e);
    }

    let areas = controller.area_names();
    controller.session().map_or_else(
        no_session_response,
        |session| {
            HttpResponse::Ok().json(ApiSummaryResponse {
                constituency: session.constituency.name.clone(),
                ac_number: session.constituency.ac_number.clone(),
                summary: session.summary.clone(),
                areas,
            })
        },
    )
}

/// `GET /api/booths`
///
/// Returns one page of the filtered, sorted booth table.
pub async fn booths(
    state: web::Data<AppState>,
    params: web::Query<BoothQueryParams>,
) -> HttpResponse {
    let mut controller = state.controller.lock().await;
    if let Err(e) = apply_view(&mut controller, &params).await {
        return error_response(&e);
    }

    controller.table_page().map_or_else(no_session_response, |page| {
        HttpResponse::Ok().json(ApiTablePage {
            rows: page.rows.iter().map(ApiBoothRow::from).collect(),
            page: page.page,
            total_pages: page.total_pages,
        })
    })
}

/// `GET /api/cells`
///
/// Returns the spatial cell aggregates over the filtered booth set, for
/// the map overlay.
pub async fn cells(state: web::Data<AppState>, params: web::Query<CellQueryParams>) -> HttpResponse {
    let booth_params = BoothQueryParams::from(&*params);
    let mut controller = state.controller.lock().await;
    if let Err(e) = apply_view(&mut controller, &booth_params).await {
        return error_response(&e);
    }

    let cells: Vec<ApiCell> = controller
        .overlay_cells()
        .into_iter()
        .map(ApiCell::from)
        .collect();
    HttpResponse::Ok().json(cells)
}

/// Loads the requested constituency unless it is already the active one.
async fn ensure_loaded(controller: &mut AppController, name: &str) -> Result<(), AppError> {
    let active = controller
        .session()
        .is_some_and(|s| s.constituency.name.eq_ignore_ascii_case(name));
    if !active {
        controller
            .dispatch(Command::LoadConstituency(name.to_string()))
            .await?;
    }
    Ok(())
}

/// Replays the request's filter, sort, and page parameters as commands.
async fn apply_view(
    controller: &mut AppController,
    params: &BoothQueryParams,
) -> Result<(), AppError> {
    ensure_loaded(controller, &params.constituency).await?;

    let filter = params.filter_state();
    controller.dispatch(Command::SetAreaFilter(filter.area)).await?;
    controller
        .dispatch(Command::SetCategoryFilter(filter.category))
        .await?;
    controller.dispatch(Command::SetSearch(filter.search)).await?;

    // The sort command toggles direction on a repeated column, so it can
    // take two dispatches to land on the requested absolute state.
    let sort = params.sort_state();
    if controller.session().is_some_and(|s| s.sort.column != sort.column) {
        controller.dispatch(Command::SetSort(sort.column)).await?;
    }
    if controller
        .session()
        .is_some_and(|s| s.sort.descending != sort.descending)
    {
        controller.dispatch(Command::SetSort(sort.column)).await?;
    }

    controller
        .dispatch(Command::ChangePage(params.page.unwrap_or(1)))
        .await?;
    Ok(())
}

fn error_response(e: &AppError) -> HttpResponse {
    match e {
        AppError::UnknownConstituency(_) => HttpResponse::NotFound().json(ApiErrorBody {
            error: e.to_string(),
        }),
        AppError::Load(inner) => {
            log::error!("Failed to load constituency data: {inner}");
            HttpResponse::InternalServerError().json(ApiErrorBody {
                error: "Failed to load constituency data".to_string(),
            })
        }
    }
}

fn no_session_response() -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiErrorBody {
        error: "No constituency loaded".to_string(),
    })
}
