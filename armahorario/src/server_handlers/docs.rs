use actix_web::{HttpResponse, Responder};
use serde_json::json;

pub async fn help_handler() -> impl Responder {
    let help = json!({
        "description": "API para armar un horario: elegir secciones del catálogo de la jornada, ver la grilla semanal con topes y enviar la solicitud de PDF.",
        "routes": {
            "GET /catalogo/asignaturas": "asignaturas de la jornada activa",
            "GET /catalogo/secciones?asignatura=...": "secciones de una asignatura, ordenadas por sección y NRC",
            "PUT /jornada": "cambia la jornada (Diurno | Vespertino) y limpia la selección",
            "GET /seleccion": "lista seleccionada y bloques de la grilla (OK / TOPE)",
            "POST /seleccion": "agrega una sección por NRC",
            "DELETE /seleccion/{nrc}": "quita una sección",
            "DELETE /seleccion": "limpia la selección y el alumno",
            "GET /grilla": "días y filas de la ventana visible",
            "GET /alumno?rut=...": "busca al alumno en el servicio externo",
            "POST /pdf": "envía la solicitud de PDF con la selección vigente"
        },
        "post_seleccion_example": {"nrc": "3001"},
        "put_jornada_example": {"jornada": "Vespertino"},
        "post_pdf_example": {"rut": "12.345.678-K"},
        "note": "Un NRC repetido se ignora. Una sección de otra jornada se rechaza con 409. Los topes no impiden agregar."
    });

    HttpResponse::Ok().json(help)
}
