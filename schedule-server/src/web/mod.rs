//! Web layer for the schedule server.
//!
//! Accepts weekly schedules as JSON and returns display-ready departures.

mod dto;
mod error;
mod routes;
mod state;

pub use dto::*;
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
