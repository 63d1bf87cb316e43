use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;

use crate::error::SesionError;
use crate::models::Jornada;
use crate::server::EstadoApp;

#[derive(Debug, Deserialize)]
pub struct AgregarRequest {
    #[serde(default)]
    pub nrc: String,
}

#[derive(Debug, Deserialize)]
pub struct JornadaRequest {
    pub jornada: String,
}

/// Código HTTP para cada acción rechazada. Ninguna altera la selección.
pub(crate) fn respuesta_error(e: &SesionError) -> HttpResponse {
    let body = json!({"error": e.to_string()});
    match e {
        SesionError::NrcNoEncontrado(_) => HttpResponse::NotFound().json(body),
        SesionError::JornadaDistinta { .. } => HttpResponse::Conflict().json(body),
        SesionError::NrcVacio | SesionError::RutVacio | SesionError::SinCursos => HttpResponse::BadRequest().json(body),
    }
}

/// GET /seleccion
pub async fn vista_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    HttpResponse::Ok().json(estado.sesion().vista())
}

/// POST /seleccion  {"nrc": "3001"}
/// Un NRC repetido responde 200 con `"resultado": "duplicada"`.
pub async fn agregar_handler(estado: web::Data<EstadoApp>, body: web::Json<AgregarRequest>) -> impl Responder {
    let mut sesion = estado.sesion();
    match sesion.agregar_por_nrc(&body.nrc) {
        Ok(resultado) => HttpResponse::Ok().json(json!({"resultado": resultado, "vista": sesion.vista()})),
        Err(e) => respuesta_error(&e),
    }
}

/// DELETE /seleccion/{nrc}
pub async fn quitar_handler(estado: web::Data<EstadoApp>, path: web::Path<String>) -> impl Responder {
    let nrc = path.into_inner();
    let mut sesion = estado.sesion();
    let quitada = sesion.quitar(&nrc);
    HttpResponse::Ok().json(json!({"quitada": quitada, "vista": sesion.vista()}))
}

/// DELETE /seleccion
/// Limpia todo, incluido el alumno consultado.
pub async fn limpiar_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    let mut sesion = estado.sesion();
    sesion.limpiar();
    HttpResponse::Ok().json(sesion.vista())
}

/// PUT /jornada  {"jornada": "Vespertino"}
/// Cambiar de jornada limpia la selección.
pub async fn cambiar_jornada_handler(estado: web::Data<EstadoApp>, body: web::Json<JornadaRequest>) -> impl Responder {
    let jornada: Jornada = match body.jornada.parse() {
        Ok(j) => j,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": e})),
    };
    let mut sesion = estado.sesion();
    sesion.cambiar_jornada(jornada);
    HttpResponse::Ok().json(sesion.vista())
}

/// GET /grilla
/// Encabezados de día y filas de la ventana visible.
pub async fn grilla_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    let sesion = estado.sesion();
    let ventana = sesion.ventana();
    HttpResponse::Ok().json(json!({
        "dias": ventana.encabezados(),
        "inicio": ventana.inicio,
        "fin": ventana.fin,
        "minutos_fila": ventana.minutos_fila,
        "filas": ventana.filas()
    }))
}
