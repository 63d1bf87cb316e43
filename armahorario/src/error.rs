//! Errores del sistema, uno por cada frontera.
//!
//! Todos son recuperables: ninguno altera la selección vigente.

use thiserror::Error;

use crate::models::Jornada;

/// Falla al cargar el catálogo. No se acepta un catálogo parcial.
#[derive(Debug, Error)]
pub enum CatalogoError {
    #[error("no se pudo leer el catálogo: {0}")]
    Io(#[from] std::io::Error),

    #[error("catálogo mal formado: {0}")]
    Formato(#[from] serde_json::Error),

    #[error("sección {nrc}: {detalle}")]
    HorarioInvalido { nrc: String, detalle: String },

    #[error("no se pudo descargar el catálogo: {0}")]
    Descarga(String),
}

/// Acciones del alumno que no se pueden completar.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SesionError {
    #[error("Escribe un NRC.")]
    NrcVacio,

    #[error("No encontré el NRC {0} en el catálogo.")]
    NrcNoEncontrado(String),

    #[error("Esa sección es de otra jornada.")]
    JornadaDistinta { nrc: String, jornada: Jornada },

    #[error("Ingresa el RUT del alumno.")]
    RutVacio,

    #[error("No hay cursos seleccionados.")]
    SinCursos,
}

/// Búsqueda de alumno por RUT. "No encontrado" no es un error: se representa
/// con `Ok(None)`.
#[derive(Debug, Error)]
pub enum AlumnosError {
    #[error("Escribe un RUT.")]
    RutVacio,

    #[error("error de transporte con el servicio de alumnos: {0}")]
    Transporte(String),

    #[error("el servicio de alumnos respondió con error: {0}")]
    Servicio(String),

    #[error("respuesta descartada: hay una búsqueda más reciente")]
    Obsoleta,
}

/// Envío de la solicitud de PDF.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("no se pudo serializar la solicitud: {0}")]
    Serializacion(#[from] serde_json::Error),

    #[error("error de transporte con el servicio de PDF: {0}")]
    Transporte(String),

    #[error("el servicio de PDF respondió {0}")]
    Estado(u16),
}
