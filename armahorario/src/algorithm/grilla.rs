// Ventana visible de la grilla semanal y recorte de bloques para dibujar.
use serde::Serialize;

use crate::models::{Bloque, Dia, EstadoBloque, Hora};

/// Franja del día que muestra la grilla, dividida en filas de `minutos_fila`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VentanaDia {
    pub inicio: Hora,
    pub fin: Hora,
    pub minutos_fila: u16,
}

impl Default for VentanaDia {
    fn default() -> Self {
        VentanaDia { inicio: Hora::new(8, 0), fin: Hora::new(22, 0), minutos_fila: 30 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilaGrilla {
    pub inicio: Hora,
    /// "HH:MM" en filas pares, vacío en las impares.
    pub etiqueta: String,
}

/// Bloque listo para dibujar. `fila_inicio` y `filas` van en unidades de fila
/// (pueden ser fraccionarias) contadas desde el inicio de la ventana.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BloqueVisible {
    pub bloque: Bloque,
    pub estado: EstadoBloque,
    pub columna: usize,
    pub inicio_visible: Hora,
    pub fin_visible: Hora,
    pub fila_inicio: f64,
    pub filas: f64,
}

impl VentanaDia {
    pub fn total_filas(&self) -> usize {
        let span = self.fin.minutos().saturating_sub(self.inicio.minutos()) as usize;
        let paso = self.minutos_fila.max(1) as usize;
        span.div_ceil(paso)
    }

    pub fn filas(&self) -> Vec<FilaGrilla> {
        (0..self.total_filas())
            .map(|i| {
                let inicio = Hora(self.inicio.minutos() + (i as u16) * self.minutos_fila);
                let etiqueta = if i % 2 == 0 { inicio.to_string() } else { String::new() };
                FilaGrilla { inicio, etiqueta }
            })
            .collect()
    }

    pub fn encabezados(&self) -> Vec<&'static str> {
        Dia::GRILLA.iter().map(|d| d.etiqueta()).collect()
    }

    /// Recorta el bloque a la ventana. Devuelve `None` si queda completamente
    /// fuera o si su día no tiene columna. Las horas del bloque no se tocan.
    pub fn recortar(&self, bloque: &Bloque) -> Option<BloqueVisible> {
        let columna = bloque.dia.columna()?;
        let top = bloque.inicio.max(self.inicio).min(self.fin);
        let bot = bloque.fin.max(self.inicio).min(self.fin);
        if bot <= self.inicio || top >= self.fin {
            return None;
        }
        let paso = f64::from(self.minutos_fila.max(1));
        Some(BloqueVisible {
            bloque: bloque.clone(),
            estado: bloque.estado(),
            columna,
            inicio_visible: top,
            fin_visible: bot,
            fila_inicio: f64::from(top.minutos() - self.inicio.minutos()) / paso,
            filas: f64::from(bot.minutos() - top.minutos()) / paso,
        })
    }

    pub fn renderizar(&self, bloques: &[Bloque]) -> Vec<BloqueVisible> {
        bloques.iter().filter_map(|b| self.recortar(b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bloque(dia: Dia, inicio: Hora, fin: Hora) -> Bloque {
        Bloque {
            nrc: "100".to_string(),
            asignatura: "Física".to_string(),
            profesor: String::new(),
            nivel: String::new(),
            seccion: "1".to_string(),
            dia,
            inicio,
            fin,
            conflicto: false,
            conflicto_con: Vec::new(),
        }
    }

    #[test]
    fn filas_por_defecto() {
        let v = VentanaDia::default();
        let filas = v.filas();
        assert_eq!(filas.len(), 28);
        assert_eq!(filas[0].etiqueta, "08:00");
        assert_eq!(filas[1].etiqueta, "");
        assert_eq!(filas[2].etiqueta, "09:00");
    }

    #[test]
    fn recorte_parcial_no_cambia_el_bloque() {
        let v = VentanaDia::default();
        let b = bloque(Dia::Jue, Hora::new(21, 0), Hora::new(23, 0));
        let vis = v.recortar(&b).expect("parcialmente visible");
        assert_eq!(vis.fin_visible, Hora::new(22, 0));
        assert_eq!(vis.bloque.fin, Hora::new(23, 0));
        assert_eq!(vis.columna, 3);
        assert_eq!(vis.fila_inicio, 26.0);
        assert_eq!(vis.filas, 2.0);
    }

    #[test]
    fn recorte_al_inicio_de_la_ventana() {
        let v = VentanaDia::default();
        let b = bloque(Dia::Lun, Hora::new(7, 0), Hora::new(9, 0));
        let vis = v.recortar(&b).expect("visible desde las 08:00");
        assert_eq!(vis.inicio_visible, Hora::new(8, 0));
        assert_eq!(vis.fin_visible, Hora::new(9, 0));
        assert_eq!(vis.bloque.inicio, Hora::new(7, 0));
        assert_eq!(vis.fila_inicio, 0.0);
        assert_eq!(vis.filas, 2.0);
    }

    #[test]
    fn fuera_de_ventana_o_sabado_se_omite() {
        let v = VentanaDia::default();
        assert!(v.recortar(&bloque(Dia::Lun, Hora::new(7, 0), Hora::new(8, 0))).is_none());
        assert!(v.recortar(&bloque(Dia::Lun, Hora::new(22, 0), Hora::new(23, 0))).is_none());
        assert!(v.recortar(&bloque(Dia::Sab, Hora::new(9, 0), Hora::new(10, 0))).is_none());
    }
}
