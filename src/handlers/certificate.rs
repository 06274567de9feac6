use actix_web::{web, HttpRequest, HttpResponse};
use actix_multipart::Multipart;
use futures_util::StreamExt;
use log::{error, info};

use crate::errors::AppError;
use crate::service::ActivityService;
use crate::utils::content_type;

// Certificates are small documents; anything bigger than this is rejected
// before it reaches storage.
const MAX_CERTIFICATE_SIZE: usize = 5 * 1024 * 1024;

const ALLOWED_CERTIFICATE_TYPES: [&str; 3] = ["application/pdf", "image/jpeg", "image/png"];

// PUT /api/userActivity/upload/{id}
pub async fn upload_certificate(
    req: HttpRequest,
    service: web::Data<dyn ActivityService>,
    id: web::Path<i32>,
    payload: web::Payload,
) -> Result<HttpResponse, AppError> {
    let mut multipart = Multipart::new(req.headers(), payload);
    let mut file_data = Vec::new();
    let mut file_name: Option<String> = None;
    let mut file_size = 0;

    // Collect file data
    while let Some(item) = multipart.next().await {
        let mut field = item.map_err(|err| {
            error!("Invalid multipart field: {:?}", err);
            AppError::BadRequest("Invalid multipart field".to_string())
        })?;

        if field.name() != "file" {
            error!("Invalid field name: expected 'file'");
            return Err(AppError::BadRequest(
                "Invalid field name: expected 'file'".to_string(),
            ));
        }

        file_name = field
            .content_disposition()
            .get_filename()
            .map(|name| name.to_string());

        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|err| {
                error!("Failed to read chunk: {:?}", err);
                AppError::BadRequest("Failed to read chunk".to_string())
            })?;
            file_size += chunk.len();
            if file_size > MAX_CERTIFICATE_SIZE {
                error!("Certificate exceeds {} byte limit", MAX_CERTIFICATE_SIZE);
                return Err(AppError::BadRequest(
                    "Certificate file size exceeds 5MiB limit".to_string(),
                ));
            }
            file_data.extend_from_slice(&chunk);
        }
    }

    if file_data.is_empty() {
        return Err(AppError::BadRequest("File part is missing".to_string()));
    }
    let file_name =
        file_name.ok_or_else(|| AppError::BadRequest("File name is missing".to_string()))?;

    // Detect file type from the content, not the client-supplied name
    let file_type = infer::get(&file_data).ok_or_else(|| {
        error!("Unable to detect certificate file type");
        AppError::BadRequest("Unable to detect file type".to_string())
    })?;
    if !ALLOWED_CERTIFICATE_TYPES.contains(&file_type.mime_type()) {
        return Err(AppError::BadRequest(
            "Only PDF, JPEG and PNG certificates are allowed".to_string(),
        ));
    }

    info!(
        "Uploading certificate {} ({} bytes) for UserActivity {}",
        file_name, file_size, id
    );

    let uploaded = service.upload_certificate(&file_name, file_data, *id).await?;
    if !uploaded {
        return Err(AppError::NotFound(format!("UserActivity: {} not found", id)));
    }

    let connection_info = req.connection_info().clone();
    let download_uri = format!(
        "{}://{}/api/userActivity/download/{}",
        connection_info.scheme(),
        connection_info.host(),
        id
    );
    Ok(HttpResponse::Ok().body(download_uri))
}

// GET /api/userActivity/download/{id}
pub async fn download_certificate(
    service: web::Data<dyn ActivityService>,
    id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let certificate_name = service.get_certificate_name_by_id(*id).await?;
    let certificate = service.get_certificate_by_id(*id).await?;

    Ok(HttpResponse::Ok()
        .content_type(content_type::guess_from_name(&certificate_name))
        .insert_header((
            "Content-Disposition",
            format!("attachment; fileName=\"{}\"", certificate_name),
        ))
        .body(certificate))
}
