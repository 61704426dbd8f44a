use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{MessageDto, PaginatedDto},
        ticket::{CloseTicketDto, TicketListQuery},
    },
    server::{
        controller::{owned_bot, running_http},
        data::ticket::TicketRepository,
        error::AppError,
        middleware::auth::AuthGuard,
        service::ticket::{
            close::Closer,
            history::{status_filter, TicketHistoryService},
            TicketService,
        },
        state::AppState,
    },
};

/// GET /api/bots/{bot_id}/guilds/{guild_id}/tickets - Paginated ticket history
///
/// # Query Parameters
/// - `page`: Zero-indexed page (default 0)
/// - `limit`: Page size, 1 to 100 (default 20)
/// - `status`: `open` or `closed`; anything else lists all tickets
pub async fn list_tickets(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
    Query(query): Query<TicketListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let (tickets, total) = TicketHistoryService::new(&state.db, bot.id)
        .list(
            guild_id,
            status_filter(query.status.as_deref()),
            query.page,
            query.limit,
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(PaginatedDto {
            items: tickets.into_iter().map(|ticket| ticket.into_dto()).collect(),
            total,
            page: query.page,
            limit: query.limit.clamp(1, 100),
        }),
    ))
}

/// GET /api/bots/{bot_id}/guilds/{guild_id}/tickets/{ticket_number} - Ticket detail
///
/// Closed tickets return the snapshot saved before their channel was deleted.
/// Open tickets return the live channel history while the bot is running.
pub async fn get_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id, ticket_number)): Path<(i32, u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;
    let http = state.bots.http(bot.id).await;

    let detail = TicketHistoryService::new(&state.db, bot.id)
        .detail(http.as_deref(), guild_id, ticket_number)
        .await?;

    Ok((StatusCode::OK, Json(detail.into_dto())))
}

/// POST /api/bots/{bot_id}/guilds/{guild_id}/tickets/{ticket_number}/close
///
/// Closes a ticket on behalf of the dashboard user. The close reason defaults
/// to `Web Dashboard`.
///
/// # Returns
/// - `200 OK`: Ticket closed; its channel is deleted shortly after
/// - `400 Bad Request`: Ticket is already closed
/// - `404 Not Found`: No ticket with that number
/// - `409 Conflict`: Bot is not running
pub async fn close_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id, ticket_number)): Path<(i32, u64, i32)>,
    payload: Option<Json<CloseTicketDto>>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let (ticket, _) = TicketRepository::new(&state.db)
        .find_by_number(bot.id, guild_id, ticket_number)
        .await?
        .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))?;
    if !ticket.is_open() {
        return Err(AppError::BadRequest("Ticket is already closed".to_string()));
    }

    let http = running_http(&state, bot.id).await?;
    let payload = payload.map(|Json(dto)| dto).unwrap_or_default();

    TicketService::new(&state.db, http, bot.id)
        .close_and_announce(&ticket, Closer::Dashboard(user.id), payload.reason.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Ticket closed"))))
}
