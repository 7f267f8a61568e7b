//! Authorization gate as an Actix extractor.
//!
//! Handlers that require authentication take [`AuthenticatedCaller`] as a
//! parameter; extraction reads the custom bearer header, verifies the
//! token through the [`TokenAuthenticator`] port, and fails closed with
//! `401` on any problem. Endpoints without the parameter stay public.
//!
//! [`TokenAuthenticator`]: crate::domain::ports::TokenAuthenticator

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, ProfileId};
use crate::inbound::http::state::HttpState;

/// Custom header carrying the stateless admin credential, kept from the
/// original system's wire contract.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Identity attached to a request that passed the authorization gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedCaller {
    pub profile_id: ProfileId,
}

impl FromRequest for AuthenticatedCaller {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .headers()
            .get(AUTH_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let state = req.app_data::<web::Data<HttpState>>().cloned();

        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("authentication state not configured"))?;
            let token = token.ok_or_else(|| Error::unauthorized("missing auth token"))?;
            let profile_id = state.authenticator.authenticate(&token).await?;
            Ok(Self { profile_id })
        })
    }
}
