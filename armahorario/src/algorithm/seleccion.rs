// Conjunto de secciones elegidas por el alumno.
use log::debug;
use serde::Serialize;

use crate::models::{Jornada, Seccion};

/// Resultado de intentar agregar una sección a la selección.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultadoAgregar {
    Agregada,
    /// El NRC ya estaba; la selección no cambia.
    Duplicada,
    /// La sección es de otra jornada; la selección no cambia.
    JornadaDistinta,
}

/// Secciones seleccionadas, en orden de inserción y únicas por NRC.
/// Todas comparten la jornada activa.
#[derive(Debug, Clone, Default)]
pub struct Seleccion {
    jornada: Jornada,
    secciones: Vec<Seccion>,
}

impl Seleccion {
    pub fn new(jornada: Jornada) -> Self {
        Seleccion { jornada, secciones: Vec::new() }
    }

    pub fn jornada(&self) -> Jornada {
        self.jornada
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

    pub fn contiene(&self, nrc: &str) -> bool {
        self.secciones.iter().any(|s| s.nrc == nrc)
    }

    pub fn agregar(&mut self, seccion: Seccion) -> ResultadoAgregar {
        if seccion.jornada != self.jornada {
            debug!("seccion {} rechazada: jornada {} != {}", seccion.nrc, seccion.jornada, self.jornada);
            return ResultadoAgregar::JornadaDistinta;
        }
        if self.contiene(&seccion.nrc) {
            return ResultadoAgregar::Duplicada;
        }
        self.secciones.push(seccion);
        ResultadoAgregar::Agregada
    }

    /// Devuelve true si había una sección con ese NRC.
    pub fn quitar(&mut self, nrc: &str) -> bool {
        let antes = self.secciones.len();
        self.secciones.retain(|s| s.nrc != nrc);
        self.secciones.len() != antes
    }

    pub fn limpiar(&mut self) {
        self.secciones.clear();
    }

    /// Cambiar de jornada invalida la selección completa, incluso si la
    /// jornada nueva es la misma.
    pub fn cambiar_jornada(&mut self, jornada: Jornada) {
        self.jornada = jornada;
        self.secciones.clear();
    }
}
