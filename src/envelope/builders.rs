use serde_json::{json, Value};

/// `{ success: true, data }`
pub fn success_body(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

/// `{ success: false, error: { code, message, details? } }`
pub fn failure_body(code: &str, message: &str, details: Option<Value>) -> Value {
    let mut error = json!({ "code": code, "message": message });
    if let Some(details) = details {
        error["details"] = details;
    }
    json!({ "success": false, "error": error })
}

pub fn paginated_body(data: Vec<Value>, page: u64, limit: u64, total: u64) -> Value {
    json!({
        "success": true,
        "data": data,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": total,
            "totalPages": total_pages(total, limit),
        },
    })
}

/// Ceiling division. A zero limit yields zero pages.
pub fn total_pages(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}
