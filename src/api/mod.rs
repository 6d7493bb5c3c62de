//! HTTP API module for the buyout engine.
//!
//! This module provides the REST endpoints for evaluating a buyout against
//! the pension, capturing newsletter signups, and reporting which config
//! version the figures come from.

mod handlers;
mod request;
mod response;
mod state;
mod subscribers;

pub use handlers::create_router;
pub use request::{CalculationRequest, SignupRequest, YearQuery};
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, ConfigResponse, ResponseMeta, SignupResponse,
};
pub use state::AppState;
pub use subscribers::{
    InMemorySubscriberStore, SignupOutcome, SubscriberStore, is_valid_email,
    ALREADY_SUBSCRIBED_MESSAGE, SUBSCRIBED_MESSAGE,
};
