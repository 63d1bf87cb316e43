use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;

use crate::catalogo::etiqueta_opcion;
use crate::server::EstadoApp;

#[derive(Debug, Deserialize)]
pub struct SeccionesQuery {
    pub asignatura: Option<String>,
}

/// GET /catalogo/asignaturas
/// Asignaturas de la jornada activa, ordenadas.
pub async fn asignaturas_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    let sesion = estado.sesion();
    HttpResponse::Ok().json(json!({
        "jornada": sesion.jornada(),
        "asignaturas": sesion.catalogo().asignaturas()
    }))
}

/// GET /catalogo/secciones?asignatura=Química
pub async fn secciones_handler(estado: web::Data<EstadoApp>, query: web::Query<SeccionesQuery>) -> impl Responder {
    let asignatura = match query.into_inner().asignatura.filter(|a| !a.trim().is_empty()) {
        Some(a) => a,
        None => return HttpResponse::BadRequest().json(json!({"error": "asignatura query parameter is required"})),
    };

    let sesion = estado.sesion();
    let secciones: Vec<serde_json::Value> = sesion
        .catalogo()
        .secciones_de(&asignatura)
        .into_iter()
        .map(|s| json!({"etiqueta": etiqueta_opcion(s), "seccion": s}))
        .collect();

    HttpResponse::Ok().json(json!({
        "asignatura": asignatura,
        "secciones": secciones
    }))
}
