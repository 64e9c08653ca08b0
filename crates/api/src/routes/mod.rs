pub mod admin;
pub mod alerts;
pub mod analytics;
pub mod attendance;
pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod health;
pub mod notifications;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         current user
///
/// /offices                                         list
/// /offices/{id}                                    get
/// /offices/{id}/floors                             floors of an office
/// /floors/{id}/desks                               desks on a floor
/// /floors/{id}/rooms                               rooms on a floor
/// /desks/{id}                                      get
/// /desks/{id}/bookings                             confirmed bookings in a window
/// /rooms/{id}                                      get
/// /rooms/{id}/bookings                             confirmed bookings in a window
///
/// /bookings                                        caller's bookings
/// /bookings/desk                                   book a desk (POST)
/// /bookings/room                                   book a meeting room (POST)
/// /bookings/{id}                                   get
/// /bookings/{id}/cancel                            cancel (POST)
///
/// /attendance                                      caller's history
/// /attendance/check-in                             check in (POST)
/// /attendance/current                              caller's active record
/// /attendance/active                               everyone present (manager/admin)
/// /attendance/{id}/check-out                       check out (POST)
///
/// /notifications                                   list
/// /notifications/unread-count                      unread count
/// /notifications/read-all                          mark all read (POST)
/// /notifications/{id}/read                         mark read (POST)
///
/// /alerts                                          list
/// /alerts/{id}/resolve                             resolve (POST, manager/admin)
///
/// /analytics/overview                              organisation figures (manager/admin)
/// /analytics/offices                               per-office occupancy (manager/admin)
/// /analytics/me                                    personal statistics
///
/// /admin/users                                     list (admin only)
/// /admin/users/{id}/role                           change role (PUT)
/// /admin/desks/{id}/status                         desk status (PUT)
/// /admin/rooms/{id}/status                         room status (PUT)
/// /admin/events                                    activity log
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login, refresh, logout, me).
        .nest("/auth", auth::router())
        // Resource catalog.
        .nest("/offices", catalog::offices_router())
        .nest("/floors", catalog::floors_router())
        .nest("/desks", catalog::desks_router())
        .nest("/rooms", catalog::rooms_router())
        // Desk and meeting-room bookings.
        .nest("/bookings", bookings::router())
        // Check-in / check-out with mask detection.
        .nest("/attendance", attendance::router())
        .nest("/notifications", notifications::router())
        .nest("/alerts", alerts::router())
        .nest("/analytics", analytics::router())
        // Admin routes (users, resource status, activity log).
        .nest("/admin", admin::router())
}
