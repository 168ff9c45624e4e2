//! `GET /api/contact`: the "Chat with us" deep-link.

use axum::extract::State;
use axum::Json;
use jobica_core::order::general_inquiry;
use jobica_core::ContactLink;

use crate::state::AppState;

// GET /api/contact
pub async fn contact(State(state): State<AppState>) -> Json<ContactLink> {
    let config = &state.config;
    Json(ContactLink::new(
        &config.whatsapp_number,
        general_inquiry(&config.store_name),
    ))
}
