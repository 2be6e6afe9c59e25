use crate::common::*;

#[doc = r#"
    핸들러 공통 오류 타입.

    요청 처리 중의 오류는 내부 정보를 노출하지 않는 균일한 JSON 응답으로 변환된다.
    * `NotFound` - 요청한 차트 파일이 존재하지 않는 경우 (404)
    * `Internal` - 그 외 모든 내부 오류 (500). 상세 내용은 로그로만 남긴다
"#]
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(file_name) => {
                warn!("[ApiError->into_response] Plot file not found: {}", file_name);
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "File not found" })),
                )
                    .into_response()
            }
            ApiError::Internal(e) => {
                error!("[ApiError->into_response] {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        ApiError::Internal(err.into())
    }
}
