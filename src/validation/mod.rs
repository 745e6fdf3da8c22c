use axum::{
    Json, async_trait,
    extract::FromRequest,
    http::Request,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{db::models::api::ErrorDetail, error::AppError};

/// 验证的 JSON 提取器
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<axum::body::Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(format!("Invalid JSON format: {}", e)))?;

        validate_value(&value)?;
        Ok(ValidatedJson(value))
    }
}

/// Runs the derived rules of `value`; the first failing field becomes the
/// reported one.
pub fn validate_value<T: Validate>(value: &T) -> Result<(), AppError> {
    value.validate().map_err(|errors| {
        let mut details = error_details(&errors);
        details.sort_by(|a, b| a.field.cmp(&b.field));
        match details.into_iter().next() {
            Some(first) => AppError::Validation {
                message: first.message,
                field: first.field,
            },
            None => AppError::validation("Validation failed"),
        }
    })
}

pub fn error_details(errors: &validator::ValidationErrors) -> Vec<ErrorDetail> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| ErrorDetail {
                field: Some(field.to_string()),
                code: error.code.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation failed for field: {}", field)),
            })
        })
        .collect()
}

/// 常用验证规则
pub mod rules {
    use validator::ValidationError;

    /// 验证用户名格式：字母、数字和 @ . + - _
    pub fn validate_username_format(username: &str) -> Result<(), ValidationError> {
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
        {
            let mut err = ValidationError::new("invalid_username_format");
            err.message = Some("Username may contain only letters, digits and @/./+/-/_".into());
            return Err(err);
        }
        Ok(())
    }

    /// 验证颜色格式 #RRGGBB
    pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
        let valid = color.len() == 7
            && color.starts_with('#')
            && color[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            let mut err = ValidationError::new("invalid_color");
            err.message = Some("Color must be in #RRGGBB format".into());
            return Err(err);
        }
        Ok(())
    }
}
