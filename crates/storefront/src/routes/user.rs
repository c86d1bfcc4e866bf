//! Shopper name.

use axum::{Form, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::{Username, session as session_keys};

/// Name form data.
#[derive(Debug, Deserialize)]
pub struct UserForm {
    pub username: String,
}

/// Remember the shopper's name for this session, then show the cart.
#[instrument(skip(session))]
pub async fn set_username(session: Session, Form(form): Form<UserForm>) -> Result<Redirect> {
    let username = Username::parse(&form.username)?;
    session.insert(session_keys::USERNAME, &username).await?;
    Ok(Redirect::to("/cart"))
}
