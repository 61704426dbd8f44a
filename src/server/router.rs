use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::server::{
    config::Config,
    controller::{admin, auth, bot, command, community, embed, guild, panel, ticket},
    error::{config::ConfigError, AppError},
    state::AppState,
};

/// Seconds to replenish one auth request: 10 requests per 15 minutes per IP.
const AUTH_REPLENISH_SECONDS: u64 = 90;
const AUTH_BURST: u32 = 10;
const API_REPLENISH_MILLIS: u64 = 100;
const API_BURST: u32 = 200;

/// Builds the dashboard API.
///
/// Login and registration share a strict per-IP limit; every other route has a
/// burst limit. The limiters key on the peer address, so the router must be
/// served with connect info.
pub fn router(config: &Config) -> Result<Router<AppState>, AppError> {
    let auth_limit = GovernorConfigBuilder::default()
        .per_second(AUTH_REPLENISH_SECONDS)
        .burst_size(AUTH_BURST)
        .finish()
        .ok_or_else(|| AppError::InternalError("Invalid auth rate limit".to_string()))?;
    let api_limit = GovernorConfigBuilder::default()
        .per_millisecond(API_REPLENISH_MILLIS)
        .burst_size(API_BURST)
        .finish()
        .ok_or_else(|| AppError::InternalError("Invalid API rate limit".to_string()))?;

    let auth_routes = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .layer(GovernorLayer::new(Arc::new(auth_limit)));

    let guild_base = "/api/bots/{bot_id}/guilds/{guild_id}";
    let api_routes = Router::new()
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::get_user))
        // bots
        .route("/api/bots", get(bot::list_bots).post(bot::add_bot))
        .route("/api/bots/{bot_id}", delete(bot::delete_bot))
        .route("/api/bots/{bot_id}/start", post(bot::start_bot))
        .route("/api/bots/{bot_id}/stop", post(bot::stop_bot))
        .route("/api/bots/{bot_id}/presence", put(bot::update_presence))
        // guilds
        .route("/api/bots/{bot_id}/guilds", get(guild::list_guilds))
        .route(guild_base, get(guild::get_guild_info))
        .route(&format!("{guild_base}/channels"), get(guild::get_guild_channels))
        .route(&format!("{guild_base}/roles"), get(guild::get_guild_roles))
        .route(&format!("{guild_base}/emojis"), get(guild::get_guild_emojis))
        .route(&format!("{guild_base}/config"), get(guild::get_guild_config))
        .route(
            &format!("{guild_base}/settings"),
            put(guild::update_guild_settings),
        )
        .route(&format!("{guild_base}/stats"), get(guild::get_guild_stats))
        // tickets
        .route(&format!("{guild_base}/tickets"), get(ticket::list_tickets))
        .route(
            &format!("{guild_base}/tickets/{{ticket_number}}"),
            get(ticket::get_ticket),
        )
        .route(
            &format!("{guild_base}/tickets/{{ticket_number}}/close"),
            post(ticket::close_ticket),
        )
        // panels and templates
        .route(
            &format!("{guild_base}/panels"),
            get(panel::list_panels).post(panel::create_panel),
        )
        .route(
            &format!("{guild_base}/panels/{{panel_id}}"),
            get(panel::get_panel)
                .put(panel::update_panel)
                .delete(panel::delete_panel),
        )
        .route(
            &format!("{guild_base}/panels/{{panel_id}}/resend"),
            post(panel::resend_panel),
        )
        .route(
            &format!("{guild_base}/panels/{{panel_id}}/move"),
            post(panel::move_panel),
        )
        .route(
            &format!("{guild_base}/panels/{{panel_id}}/template"),
            post(panel::save_template),
        )
        .route(&format!("{guild_base}/templates"), get(panel::list_templates))
        .route(
            &format!("{guild_base}/templates/{{template_id}}"),
            get(panel::get_template).delete(panel::delete_template),
        )
        .route(
            &format!("{guild_base}/templates/{{template_id}}/panel"),
            post(panel::create_panel_from_template),
        )
        // community
        .route(
            &format!("{guild_base}/commands"),
            get(command::list_commands).post(command::create_command),
        )
        .route(
            &format!("{guild_base}/commands/{{command_id}}"),
            put(command::update_command).delete(command::delete_command),
        )
        .route(
            &format!("{guild_base}/embeds"),
            get(embed::list_embeds).post(embed::create_embed),
        )
        .route(
            &format!("{guild_base}/embeds/{{embed_id}}"),
            get(embed::get_embed)
                .put(embed::update_embed)
                .delete(embed::delete_embed),
        )
        .route(
            &format!("{guild_base}/embeds/{{embed_id}}/send"),
            post(embed::send_embed),
        )
        .route(
            &format!("{guild_base}/welcome"),
            get(community::get_welcome).put(community::save_welcome),
        )
        .route(
            &format!("{guild_base}/sticky"),
            get(community::list_sticky).put(community::save_sticky),
        )
        .route(
            &format!("{guild_base}/sticky/{{channel_id}}"),
            delete(community::delete_sticky),
        )
        .route(
            &format!("{guild_base}/invites/leaderboard"),
            get(community::get_invite_leaderboard),
        )
        .route(
            &format!("{guild_base}/invites/recent"),
            get(community::get_recent_joins),
        )
        // admin
        .route("/api/admin/stats", get(admin::get_stats))
        .route("/api/admin/users", get(admin::get_users))
        .route(
            "/api/admin/users/{user_id}",
            put(admin::update_user).delete(admin::delete_user),
        )
        .route(
            "/api/admin/invite-codes",
            get(admin::get_invite_codes).post(admin::create_invite_code),
        )
        .route(
            "/api/admin/invite-codes/{code_id}",
            delete(admin::delete_invite_code),
        )
        .layer(GovernorLayer::new(Arc::new(api_limit)));

    Ok(auth_routes
        .merge(api_routes)
        .layer(cors_layer(config.cors_origin.as_deref())?))
}

/// CORS for the dashboard.
///
/// With a configured origin, credentials (the session cookie) are allowed for
/// that origin only. Without one, any origin may call the API using bearer tokens.
fn cors_layer(origin: Option<&str>) -> Result<CorsLayer, ConfigError> {
    let Some(origin) = origin else {
        return Ok(CorsLayer::permissive());
    };

    let origin = HeaderValue::from_str(origin).map_err(|e| ConfigError::InvalidEnvVar {
        name: "CORS_ORIGIN".to_string(),
        reason: e.to_string(),
    })?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::exact(origin))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_cors_origin() {
        assert!(cors_layer(Some("https://dash.example.com")).is_ok());
        assert!(cors_layer(None).is_ok());
        assert!(matches!(
            cors_layer(Some("bad\norigin")),
            Err(ConfigError::InvalidEnvVar { .. })
        ));
    }
}
