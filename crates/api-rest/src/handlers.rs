use axum::{extract::Multipart, http::StatusCode, response::Json};

use api_shared::{wire, HealthService, FILES_FIELD, MEDICAL_HISTORY_FIELD, SYMPTOMS_FIELD};

pub(crate) type ApiError = (StatusCode, Json<wire::ErrorRes>);

fn api_error(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (
        status,
        Json(wire::ErrorRes {
            detail: detail.into(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = wire::RootRes)
    )
)]
pub(crate) async fn root() -> Json<wire::RootRes> {
    Json(wire::RootRes {
        message: "MediMind Diagnostics API is running".into(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = wire::HealthRes)
    )
)]
/// Health check endpoint used by monitoring and by `medimind health`.
pub(crate) async fn health() -> Json<wire::HealthRes> {
    Json(HealthService::check_health())
}

/// Fields collected from an analysis upload.
#[derive(Debug, Default)]
struct AnalyzeUpload {
    file_names: Vec<String>,
    symptoms: Option<String>,
    medical_history: String,
}

async fn read_upload(mut multipart: Multipart) -> Result<AnalyzeUpload, ApiError> {
    let mut upload = AnalyzeUpload::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(api_error(e.status(), e.body_text())),
        };

        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_owned);

        match name.as_str() {
            FILES_FIELD => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| api_error(e.status(), e.body_text()))?;
                let file_name = file_name.unwrap_or_default();
                tracing::debug!(file = %file_name, size = bytes.len(), "received file part");
                upload.file_names.push(file_name);
            }
            SYMPTOMS_FIELD => {
                upload.symptoms = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| api_error(e.status(), e.body_text()))?,
                );
            }
            MEDICAL_HISTORY_FIELD => {
                upload.medical_history = field
                    .text()
                    .await
                    .map_err(|e| api_error(e.status(), e.body_text()))?;
            }
            other => {
                tracing::debug!(field = other, "ignoring unknown multipart field");
            }
        }
    }

    Ok(upload)
}

#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body(content = wire::AnalyzeReq, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Analysis result", body = wire::AnalyzeRes),
        (status = 400, description = "Symptoms are not a JSON array of strings", body = wire::ErrorRes),
        (status = 413, description = "Upload exceeds the configured limit", body = wire::ErrorRes),
        (status = 422, description = "Missing symptoms field", body = wire::ErrorRes)
    )
)]
/// Accept an intake upload and return the reference analysis result.
///
/// The result does not depend on the upload; this endpoint stands in for a real analysis
/// backend during development.
///
/// # Errors
/// - `400 Bad Request` if `symptoms` is not a JSON array of strings. This includes well-formed
///   JSON of another shape (an object, a bare string, `null`, an array of numbers): the field
///   must decode as a list of symptom texts, not merely parse.
/// - `422 Unprocessable Entity` if `symptoms` is missing.
/// - The multipart extractor's own status (e.g. `413`) if the body cannot be read.
pub(crate) async fn analyze(multipart: Multipart) -> Result<Json<wire::AnalyzeRes>, ApiError> {
    let upload = read_upload(multipart).await?;

    let Some(raw_symptoms) = upload.symptoms else {
        return Err(api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Missing form field: {SYMPTOMS_FIELD}"),
        ));
    };

    let symptoms: Vec<String> = serde_json::from_str(&raw_symptoms).map_err(|e| {
        tracing::warn!(error = %e, "rejecting upload with invalid symptoms");
        api_error(StatusCode::BAD_REQUEST, "Invalid symptoms JSON format")
    })?;

    tracing::info!(
        symptoms = ?symptoms,
        files = ?upload.file_names,
        history_chars = upload.medical_history.chars().count(),
        "analysis request received"
    );

    Ok(Json(wire::AnalyzeRes::reference()))
}

#[utoipa::path(
    post,
    path = "/api/diagnose",
    request_body(content = wire::AnalyzeReq, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Analysis result", body = wire::AnalyzeRes),
        (status = 400, description = "Symptoms are not a JSON array of strings", body = wire::ErrorRes),
        (status = 422, description = "Missing symptoms field", body = wire::ErrorRes)
    )
)]
/// Same operation as [`analyze`], served on the older backend path.
pub(crate) async fn diagnose(multipart: Multipart) -> Result<Json<wire::AnalyzeRes>, ApiError> {
    analyze(multipart).await
}
