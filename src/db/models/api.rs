use serde::Serialize;

// 统一API响应结构
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    pub timestamp: String,
}

#[derive(Serialize, Debug)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    fn build(success: bool, code: u16, message: &str) -> Self {
        Self {
            success,
            code,
            message: message.to_string(),
            data: None,
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn failure(code: u16, message: &str, field: Option<String>, error_code: &str) -> Self {
        Self {
            errors: Some(vec![ErrorDetail {
                field,
                code: error_code.to_string(),
                message: message.to_string(),
            }]),
            ..Self::build(false, code, message)
        }
    }

    pub fn success(data: T, message: &str) -> Self {
        Self {
            data: Some(data),
            ..Self::build(true, 200, message)
        }
    }

    pub fn created(data: T, message: &str) -> Self {
        Self {
            data: Some(data),
            ..Self::build(true, 201, message)
        }
    }

    pub fn ok(message: &str) -> Self {
        Self::build(true, 200, message)
    }

    pub fn bad_request(message: &str, field: Option<String>) -> Self {
        Self::failure(400, message, field, error_codes::VALIDATION_ERROR)
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::failure(401, message, None, error_codes::UNAUTHENTICATED)
    }

    pub fn forbidden(message: &str, error_code: &str) -> Self {
        Self::failure(403, message, None, error_code)
    }

    pub fn not_found(message: &str) -> Self {
        Self::failure(404, message, None, error_codes::NOT_FOUND)
    }

    pub fn conflict(message: &str, field: Option<String>, error_code: &str) -> Self {
        Self::failure(409, message, field, error_code)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::failure(500, message, None, error_codes::INTERNAL_ERROR)
    }
}

// 业务错误码常量
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const NOT_MEMBER: &str = "NOT_MEMBER";
    pub const INSUFFICIENT_ROLE: &str = "INSUFFICIENT_ROLE";
    pub const DUPLICATE_MEMBERSHIP: &str = "DUPLICATE_MEMBERSHIP";
    pub const CONFLICT: &str = "CONFLICT";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

    // 用户相关
    pub const USER_USERNAME_EXISTS: &str = "USER_USERNAME_EXISTS";
    pub const USER_EMAIL_EXISTS: &str = "USER_EMAIL_EXISTS";
}
