use axum::{
    Extension,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{Res, export, server::ApiContext, types::Report};

pub async fn download_detailed(Extension(context): Extension<ApiContext>) -> Response {
    let jobs = context.jobs.lock().await;
    csv_response(jobs.report(), export::DETAILED_FILE_NAME, |r| {
        export::detailed_csv(&r.detailed)
    })
}

pub async fn download_formatted(Extension(context): Extension<ApiContext>) -> Response {
    let jobs = context.jobs.lock().await;
    csv_response(jobs.report(), export::FORMATTED_FILE_NAME, |r| {
        export::formatted_csv(&r.formatted)
    })
}

fn csv_response<F>(report: Option<&Report>, file_name: &str, render: F) -> Response
where
    F: FnOnce(&Report) -> Res<Vec<u8>>,
{
    let Some(report) = report else {
        return (StatusCode::NOT_FOUND, "No finished analysis available.").into_response();
    };

    match render(report) {
        Ok(csv) => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file_name),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Cannot render CSV: {}", e),
        )
            .into_response(),
    }
}
