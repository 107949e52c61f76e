//! Validated JSON body extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::LocalBoxFuture;
use garde::Validate;
use serde::de::DeserializeOwned;

use super::error::AppError;

/// JSON body that has passed its rule set; the handler never sees invalid input.
///
/// Malformed JSON is rejected by the `JsonConfig` error handler before validation runs.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    T::Context: Default,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = web::Json::<T>::from_request(req, payload);

        Box::pin(async move {
            let value = body.await?.into_inner();
            quill_shared::check(&value).map_err(AppError::Validation)?;
            Ok(ValidatedJson(value))
        })
    }
}
