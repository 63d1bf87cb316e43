use actix_web::{HttpResponse, Responder, web};
use log::{error, warn};
use serde::Deserialize;
use serde_json::json;

use crate::error::AlumnosError;
use crate::server::EstadoApp;
use crate::server_handlers::seleccion::respuesta_error;

#[derive(Debug, Deserialize)]
pub struct AlumnoQuery {
    #[serde(default)]
    pub rut: String,
}

#[derive(Debug, Deserialize)]
pub struct PdfRequest {
    #[serde(default)]
    pub rut: String,
}

fn servicio_no_configurado() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(json!({"error": "ALUMNOS_API_URL no está configurado"}))
}

/// GET /alumno?rut=12.345.678-K
/// 400 sin RUT, 404 si no existe, 502 si falla el servicio.
pub async fn alumno_handler(estado: web::Data<EstadoApp>, query: web::Query<AlumnoQuery>) -> impl Responder {
    let cliente = match &estado.alumnos {
        Some(c) => c.clone(),
        None => return servicio_no_configurado(),
    };

    // la sesión no se bloquea mientras se espera al servicio
    match cliente.buscar(&query.rut).await {
        Ok(Some(alumno)) => {
            estado.sesion().registrar_alumno(Some(alumno.clone()));
            HttpResponse::Ok().json(json!({"alumno": alumno}))
        }
        Ok(None) => {
            estado.sesion().registrar_alumno(None);
            HttpResponse::NotFound().json(json!({"error": "Alumno no encontrado."}))
        }
        Err(AlumnosError::RutVacio) => HttpResponse::BadRequest().json(json!({"error": AlumnosError::RutVacio.to_string()})),
        Err(AlumnosError::Obsoleta) => {
            HttpResponse::Conflict().json(json!({"error": AlumnosError::Obsoleta.to_string(), "obsoleta": true}))
        }
        Err(e) => {
            warn!("Error buscando alumno: {}", e);
            HttpResponse::BadGateway().json(json!({"error": format!("Error buscando alumno: {}", e)}))
        }
    }
}

/// POST /pdf  {"rut": "12.345.678-K"}
/// Envía la selección vigente al generador de PDF.
pub async fn pdf_handler(estado: web::Data<EstadoApp>, body: web::Json<PdfRequest>) -> impl Responder {
    let cliente = match &estado.alumnos {
        Some(c) => c.clone(),
        None => return servicio_no_configurado(),
    };

    let solicitud = match estado.sesion().solicitud_pdf(&body.rut) {
        Ok(s) => s,
        Err(e) => return respuesta_error(&e),
    };

    match cliente.generar_pdf(&solicitud).await {
        Ok(()) => HttpResponse::Accepted().json(json!({"status": "ok", "cursos": solicitud.cursos.len()})),
        Err(e) => {
            error!("Error generando PDF: {}", e);
            HttpResponse::BadGateway().json(json!({"error": e.to_string()}))
        }
    }
}
