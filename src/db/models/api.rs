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
    pub meta: Option<ResponseMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

// 便捷构造函数
impl<T> ApiResponse<T> {
    pub fn success(data: T, message: &str) -> Self {
        Self {
            success: true,
            code: 200,
            message: message.to_string(),
            data: Some(data),
            meta: None,
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn success_with_meta(data: T, message: &str, meta: ResponseMeta) -> Self {
        Self {
            success: true,
            code: 200,
            message: message.to_string(),
            data: Some(data),
            meta: Some(meta),
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn created(data: T, message: &str) -> Self {
        Self {
            success: true,
            code: 201,
            message: message.to_string(),
            data: Some(data),
            meta: None,
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn validation_error(errors: Vec<ErrorDetail>) -> Self {
        Self {
            success: false,
            code: 400,
            message: "Validation failed".to_string(),
            data: None,
            meta: None,
            errors: Some(errors),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn unauthorized(message: &str) -> Self {
        Self {
            success: false,
            code: 401,
            message: message.to_string(),
            data: None,
            meta: None,
            errors: Some(vec![ErrorDetail {
                field: None,
                code: "UNAUTHORIZED".to_string(),
                message: message.to_string(),
            }]),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn forbidden(message: &str) -> Self {
        Self {
            success: false,
            code: 403,
            message: message.to_string(),
            data: None,
            meta: None,
            errors: Some(vec![ErrorDetail {
                field: None,
                code: error_codes::WORKFLOW_ACTION_DENIED.to_string(),
                message: message.to_string(),
            }]),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self {
            success: false,
            code: 404,
            message: message.to_string(),
            data: None,
            meta: None,
            errors: Some(vec![ErrorDetail {
                field: None,
                code: "NOT_FOUND".to_string(),
                message: message.to_string(),
            }]),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn conflict(message: &str, field: Option<String>, error_code: &str) -> Self {
        Self {
            success: false,
            code: 409,
            message: message.to_string(),
            data: None,
            meta: None,
            errors: Some(vec![ErrorDetail {
                field,
                code: error_code.to_string(),
                message: message.to_string(),
            }]),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self {
            success: false,
            code: 400,
            message: message.to_string(),
            data: None,
            meta: None,
            errors: Some(vec![ErrorDetail {
                field: None,
                code: "BAD_REQUEST".to_string(),
                message: message.to_string(),
            }]),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn precondition_failed(message: &str) -> Self {
        Self {
            success: false,
            code: 422,
            message: message.to_string(),
            data: None,
            meta: None,
            errors: Some(vec![ErrorDetail {
                field: None,
                code: error_codes::WORKFLOW_PRECONDITION_FAILED.to_string(),
                message: message.to_string(),
            }]),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            success: false,
            code: 500,
            message: message.to_string(),
            data: None,
            meta: None,
            errors: Some(vec![ErrorDetail {
                field: None,
                code: "INTERNAL_ERROR".to_string(),
                message: message.to_string(),
            }]),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// 业务错误码常量
pub mod error_codes {
    // 工作流相关
    pub const WORKFLOW_ACTION_DENIED: &str = "FORBIDDEN";
    pub const WORKFLOW_PRECONDITION_FAILED: &str = "PRECONDITION_FAILED";

    // 项目相关
    pub const PROJECT_AUDITOR_ALREADY_ASSIGNED: &str = "PROJECT_001";
    pub const PROJECT_ALREADY_FINALIZED: &str = "PROJECT_002";

    // 系统相关
    pub const SYSTEM_DATABASE_ERROR: &str = "SYSTEM_001";
    pub const SYSTEM_CACHE_ERROR: &str = "SYSTEM_002";
}
