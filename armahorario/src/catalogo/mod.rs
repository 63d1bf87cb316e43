//! Catálogo de secciones ofrecidas.
//!
//! El catálogo es una foto de sólo lectura: se carga completo o no se carga.
//! Cada horario se valida al cargar (inicio anterior al término).

use std::cmp::Ordering;
use std::path::Path;

use log::{info, warn};
use serde_json::Value;

use crate::error::CatalogoError;
use crate::models::{Jornada, Seccion};

/// Ruta por defecto del catálogo (relativa al directorio de trabajo)
pub const CATALOGO_POR_DEFECTO: &str = "data/courses.json";

#[derive(Debug, Clone, Default)]
pub struct Catalogo {
    secciones: Vec<Seccion>,
}

impl Catalogo {
    pub fn new(secciones: Vec<Seccion>) -> Result<Self, CatalogoError> {
        for s in &secciones {
            for h in &s.horarios {
                h.validar().map_err(|detalle| CatalogoError::HorarioInvalido { nrc: s.nrc.clone(), detalle })?;
            }
        }
        Ok(Catalogo { secciones })
    }

    /// Las filas con una jornada que no es Diurno ni Vespertino se omiten con
    /// un aviso: no son inválidas, sólo no calzan con ningún filtro.
    pub fn desde_json(json: &str) -> Result<Self, CatalogoError> {
        let filas: Vec<Value> = serde_json::from_str(json)?;
        let mut secciones = Vec::with_capacity(filas.len());
        for fila in filas {
            if let Some(Value::String(j)) = fila.get("jornada") {
                if j.parse::<Jornada>().is_err() {
                    warn!("sección {} omitida: jornada '{}' desconocida", fila.get("nrc").unwrap_or(&Value::Null), j);
                    continue;
                }
            }
            secciones.push(serde_json::from_value(fila)?);
        }
        Self::new(secciones)
    }

    pub fn desde_archivo<P: AsRef<Path>>(ruta: P) -> Result<Self, CatalogoError> {
        let contenido = std::fs::read_to_string(ruta.as_ref())?;
        let cat = Self::desde_json(&contenido)?;
        info!("catálogo '{}' cargado: {} secciones", ruta.as_ref().display(), cat.len());
        Ok(cat)
    }

    pub fn secciones(&self) -> &[Seccion] {
        &self.secciones
    }

    pub fn len(&self) -> usize {
        self.secciones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secciones.is_empty()
    }

    /// Secciones de la jornada, en el orden del catálogo.
    pub fn filtrar_por_jornada(&self, jornada: Jornada) -> Catalogo {
        Catalogo {
            secciones: self.secciones.iter().filter(|s| s.jornada == jornada).cloned().collect(),
        }
    }

    pub fn buscar_por_nrc(&self, nrc: &str) -> Option<&Seccion> {
        let nrc = nrc.trim();
        self.secciones.iter().find(|s| s.nrc == nrc)
    }

    /// Nombres de asignatura sin repetir, en orden alfabético sin distinguir
    /// tildes ni mayúsculas. Se omiten los vacíos.
    pub fn asignaturas(&self) -> Vec<String> {
        let mut nombres: Vec<&str> = self
            .secciones
            .iter()
            .map(|s| s.asignatura.as_str())
            .filter(|a| !a.trim().is_empty())
            .collect();
        nombres.sort_by(|a, b| comparar_texto(a, b));
        nombres.dedup();
        nombres.into_iter().map(|s| s.to_string()).collect()
    }

    /// Secciones de una asignatura ordenadas por sección y luego por NRC.
    pub fn secciones_de(&self, asignatura: &str) -> Vec<&Seccion> {
        let mut secs: Vec<&Seccion> = self.secciones.iter().filter(|s| s.asignatura == asignatura).collect();
        secs.sort_by(|a, b| comparar_texto(&a.seccion, &b.seccion).then_with(|| comparar_texto(&a.nrc, &b.nrc)));
        secs
    }
}

// Orden alfabético en español: se compara sin tildes ni mayúsculas y el texto
// original sólo desempata.
fn comparar_texto(a: &str, b: &str) -> Ordering {
    clave_orden(a).cmp(&clave_orden(b)).then_with(|| a.cmp(b))
}

fn clave_orden(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ñ' => 'n',
            otro => otro,
        })
        .collect()
}

/// Texto de la opción de sección que ve el alumno al elegir.
pub fn etiqueta_opcion(s: &Seccion) -> String {
    let sec = if s.seccion.is_empty() { "?" } else { s.seccion.as_str() };
    format!("Sección {} — NRC {} — {}", sec, s.nrc, s.profesor)
}
