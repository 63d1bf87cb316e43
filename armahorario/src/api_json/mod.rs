use serde::{Deserialize, Serialize};

use crate::error::{AlumnosError, SesionError};
use crate::models::{Alumno, Horario, Jornada, Seccion};

/// Normaliza un RUT igual que el servicio de alumnos: sin puntos, sin
/// espacios y en mayúsculas. El guion del dígito verificador se mantiene.
pub fn normalizar_rut(rut: &str) -> String {
    rut.trim()
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Respuesta del servicio de alumnos.
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "ok": true,
///   "alumno": {
///     "nombre_completo": "Ana Pérez Soto",
///     "rut": "12345678-K",
///     "correo": "ana.perez@alumnos.cl",
///     "jornada": "Diurno"
///   }
/// }
/// ```
///
/// Si el alumno no existe `alumno` viene `null` o ausente; si el servicio
/// falla `ok` es `false` y `error` trae el motivo.
#[derive(Debug, Serialize, Deserialize)]
pub struct RespuestaAlumnos {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub alumno: Option<Alumno>,
}

pub fn parse_respuesta_alumnos(json_str: &str) -> Result<RespuestaAlumnos, serde_json::Error> {
    serde_json::from_str::<RespuestaAlumnos>(json_str)
}

/// `Ok(None)` es "alumno no encontrado", distinto de un error del servicio.
pub fn interpretar_respuesta(resp: RespuestaAlumnos) -> Result<Option<Alumno>, AlumnosError> {
    if !resp.ok {
        return Err(AlumnosError::Servicio(resp.error.unwrap_or_else(|| "Error desconocido".to_string())));
    }
    Ok(resp.alumno)
}

/// Curso tal como lo espera el generador de PDF (todo en texto).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursoPdf {
    pub nrc: String,
    pub asignatura: String,
    pub seccion: String,
    pub profesor: String,
    pub horarios: Vec<Horario>,
    pub nivel: String,
    pub jornada: String,
}

impl From<&Seccion> for CursoPdf {
    fn from(s: &Seccion) -> Self {
        CursoPdf {
            nrc: s.nrc.clone(),
            asignatura: s.asignatura.clone(),
            seccion: s.seccion.clone(),
            profesor: s.profesor.clone(),
            horarios: s.horarios.clone(),
            nivel: s.nivel.clone(),
            jornada: s.jornada.to_string(),
        }
    }
}

/// Solicitud de generación de PDF.
///
/// ```json
/// {
///   "action": "generatePdf",
///   "rut": "12345678-K",
///   "jornada": "Diurno",
///   "cursos": [{"nrc": "3001", "asignatura": "Química", "seccion": "1", "profesor": "A",
///               "horarios": [{"dia": "Lun", "inicio": "08:00", "fin": "09:30"}],
///               "nivel": "1", "jornada": "Diurno"}]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolicitudPdf {
    pub action: String,
    pub rut: String,
    pub jornada: Jornada,
    pub cursos: Vec<CursoPdf>,
}

pub const ACCION_GENERAR_PDF: &str = "generatePdf";

/// Arma la solicitud a partir del RUT ingresado y la selección vigente.
pub fn construir_solicitud_pdf(rut: &str, jornada: Jornada, secciones: &[Seccion]) -> Result<SolicitudPdf, SesionError> {
    let rut = normalizar_rut(rut);
    if rut.is_empty() {
        return Err(SesionError::RutVacio);
    }
    if secciones.is_empty() {
        return Err(SesionError::SinCursos);
    }
    Ok(SolicitudPdf {
        action: ACCION_GENERAR_PDF.to_string(),
        rut,
        jornada,
        cursos: secciones.iter().map(CursoPdf::from).collect(),
    })
}
