mod handlers;
mod identity;
mod routes;
mod state;

pub use identity::resolve_user_id;
pub use routes::create_router;
pub use state::AppState;
