//! Estado de una sesión de armado de horario.
//!
//! Reúne el catálogo completo, la jornada activa, la selección y el alumno
//! consultado. Todas las operaciones son síncronas y no hacen red: los
//! adaptadores (HTTP) llaman a los clientes externos fuera de la sesión y
//! luego registran el resultado aquí.

use log::{info, warn};
use serde::Serialize;

use crate::algorithm::conflict::{calcular_topes, secciones_en_tope};
use crate::algorithm::grilla::{BloqueVisible, VentanaDia};
use crate::algorithm::seleccion::{ResultadoAgregar, Seleccion};
use crate::api_json::{SolicitudPdf, construir_solicitud_pdf};
use crate::catalogo::Catalogo;
use crate::error::SesionError;
use crate::models::{Alumno, Jornada, Seccion};

/// Línea de la lista de secciones seleccionadas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSeleccionado {
    pub nrc: String,
    pub asignatura: String,
    pub seccion: String,
    pub profesor: String,
    pub nivel: String,
    pub descripcion: String,
}

/// Lo que el adaptador necesita para dibujar: lista, bloques y topes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VistaHorario {
    pub jornada: Jornada,
    pub seleccionados: Vec<ItemSeleccionado>,
    pub bloques: Vec<BloqueVisible>,
    pub nrcs_en_tope: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Sesion {
    catalogo_completo: Catalogo,
    catalogo: Catalogo,
    seleccion: Seleccion,
    alumno: Option<Alumno>,
    ventana: VentanaDia,
}

impl Sesion {
    /// Comienza en jornada Diurno, con la selección vacía.
    pub fn new(catalogo: Catalogo) -> Self {
        let jornada = Jornada::default();
        Sesion {
            catalogo: catalogo.filtrar_por_jornada(jornada),
            catalogo_completo: catalogo,
            seleccion: Seleccion::new(jornada),
            alumno: None,
            ventana: VentanaDia::default(),
        }
    }

    pub fn con_ventana(mut self, ventana: VentanaDia) -> Self {
        self.ventana = ventana;
        self
    }

    pub fn jornada(&self) -> Jornada {
        self.seleccion.jornada()
    }

    /// Catálogo filtrado por la jornada activa.
    pub fn catalogo(&self) -> &Catalogo {
        &self.catalogo
    }

    pub fn seleccion(&self) -> &Seleccion {
        &self.seleccion
    }

    pub fn ventana(&self) -> &VentanaDia {
        &self.ventana
    }

    /// Refiltra el catálogo y limpia la selección: las jornadas no se mezclan.
    pub fn cambiar_jornada(&mut self, jornada: Jornada) {
        self.catalogo = self.catalogo_completo.filtrar_por_jornada(jornada);
        self.seleccion.cambiar_jornada(jornada);
        info!("jornada cambiada a {} ({} secciones disponibles)", jornada, self.catalogo.len());
    }

    pub fn agregar_por_nrc(&mut self, nrc: &str) -> Result<ResultadoAgregar, SesionError> {
        let nrc = nrc.trim();
        if nrc.is_empty() {
            return Err(SesionError::NrcVacio);
        }
        // se busca también en el catálogo completo para avisar si es de otra jornada
        let seccion = self
            .catalogo
            .buscar_por_nrc(nrc)
            .or_else(|| self.catalogo_completo.buscar_por_nrc(nrc))
            .cloned()
            .ok_or_else(|| SesionError::NrcNoEncontrado(nrc.to_string()))?;
        self.agregar_seccion(seccion)
    }

    /// Un NRC repetido no es error: devuelve `Duplicada` sin cambiar nada.
    pub fn agregar_seccion(&mut self, seccion: Seccion) -> Result<ResultadoAgregar, SesionError> {
        let nrc = seccion.nrc.clone();
        let jornada = seccion.jornada;
        match self.seleccion.agregar(seccion) {
            ResultadoAgregar::JornadaDistinta => {
                warn!("sección {} rechazada: es de jornada {}", nrc, jornada);
                Err(SesionError::JornadaDistinta { nrc, jornada })
            }
            otro => Ok(otro),
        }
    }

    pub fn quitar(&mut self, nrc: &str) -> bool {
        self.seleccion.quitar(nrc.trim())
    }

    /// Limpia la selección y olvida al alumno consultado.
    pub fn limpiar(&mut self) {
        self.seleccion.limpiar();
        self.alumno = None;
    }

    pub fn registrar_alumno(&mut self, alumno: Option<Alumno>) {
        self.alumno = alumno;
    }

    pub fn alumno(&self) -> Option<&Alumno> {
        self.alumno.as_ref()
    }

    pub fn vista(&self) -> VistaHorario {
        let bloques = calcular_topes(self.seleccion.secciones());
        let nrcs_en_tope = secciones_en_tope(&bloques);
        VistaHorario {
            jornada: self.jornada(),
            seleccionados: self.seleccion.secciones().iter().map(item_seleccionado).collect(),
            bloques: self.ventana.renderizar(&bloques),
            nrcs_en_tope,
        }
    }

    pub fn solicitud_pdf(&self, rut: &str) -> Result<SolicitudPdf, SesionError> {
        construir_solicitud_pdf(rut, self.jornada(), self.seleccion.secciones())
    }
}

fn item_seleccionado(s: &Seccion) -> ItemSeleccionado {
    ItemSeleccionado {
        nrc: s.nrc.clone(),
        asignatura: s.asignatura.clone(),
        seccion: s.seccion.clone(),
        profesor: s.profesor.clone(),
        nivel: s.nivel.clone(),
        descripcion: format!("{} (NRC {}, Sec {}) — {} — Nivel {}", s.asignatura, s.nrc, s.seccion, s.profesor, s.nivel),
    }
}
