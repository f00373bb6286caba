use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::error::ApiError;

/// Json extractor that also runs `validator` rules, rejecting with the
/// structured error payload instead of axum's plain-text rejection.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|err| ApiError::InvalidArgument(err.body_text()))?;

        value
            .validate()
            .map_err(|err| ApiError::InvalidArgument(flatten_errors(&err)))?;

        Ok(Self(value))
    }
}

fn flatten_errors(errors: &ValidationErrors) -> String {
    let messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .filter_map(|err| err.message.as_ref().map(|msg| msg.to_string()))
        .collect();

    if messages.is_empty() {
        errors.to_string().replace('\n', ", ")
    } else {
        messages.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(range(min = 1, message = "Quantity must be at least 1"))]
        quantity: i32,
    }

    #[test]
    fn validation_messages_are_flattened() {
        let bad = Payload { quantity: 0 };
        let err = bad.validate().unwrap_err();
        assert_eq!(flatten_errors(&err), "Quantity must be at least 1");
    }
}
