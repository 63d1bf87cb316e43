// Estructuras de datos principales

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Jornada del alumno. Las secciones de una jornada no se mezclan con las de otra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Jornada {
    #[default]
    Diurno,
    Vespertino,
}

impl fmt::Display for Jornada {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jornada::Diurno => write!(f, "Diurno"),
            Jornada::Vespertino => write!(f, "Vespertino"),
        }
    }
}

impl FromStr for Jornada {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "diurno" | "diurna" => Ok(Jornada::Diurno),
            "vespertino" | "vespertina" => Ok(Jornada::Vespertino),
            other => Err(format!("jornada desconocida: '{}'", other)),
        }
    }
}

/// Día de la semana de un bloque. Acepta las abreviaturas usadas en las ofertas
/// (LU, LUN, Lunes...) pero siempre se serializa con la etiqueta de la grilla.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dia {
    #[serde(rename = "Lun", alias = "LU", alias = "LUN", alias = "Lunes")]
    Lun,
    #[serde(rename = "Mar", alias = "MA", alias = "MAR", alias = "Martes")]
    Mar,
    #[serde(rename = "Mie", alias = "MI", alias = "MIE", alias = "Mié", alias = "Miercoles", alias = "Miércoles")]
    Mie,
    #[serde(rename = "Jue", alias = "JU", alias = "JUE", alias = "Jueves")]
    Jue,
    #[serde(rename = "Vie", alias = "VI", alias = "VIE", alias = "Viernes")]
    Vie,
    /// Se acepta en el catálogo, pero no tiene columna en la grilla.
    #[serde(rename = "Sab", alias = "SA", alias = "SAB", alias = "Sáb", alias = "Sabado", alias = "Sábado")]
    Sab,
}

impl Dia {
    /// Columnas de la grilla semanal, en orden.
    pub const GRILLA: [Dia; 5] = [Dia::Lun, Dia::Mar, Dia::Mie, Dia::Jue, Dia::Vie];

    pub fn etiqueta(&self) -> &'static str {
        match self {
            Dia::Lun => "Lun",
            Dia::Mar => "Mar",
            Dia::Mie => "Mie",
            Dia::Jue => "Jue",
            Dia::Vie => "Vie",
            Dia::Sab => "Sab",
        }
    }

    /// Índice de columna en la grilla, `None` si el día no se dibuja.
    pub fn columna(&self) -> Option<usize> {
        Dia::GRILLA.iter().position(|d| d == self)
    }
}

impl fmt::Display for Dia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.etiqueta())
    }
}

/// Hora de reloj expresada en minutos desde medianoche.
/// Se lee y se escribe como "HH:MM".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hora(pub u16);

impl Hora {
    pub fn new(horas: u16, minutos: u16) -> Self {
        Hora(horas * 60 + minutos)
    }

    pub fn minutos(&self) -> u16 {
        self.0
    }
}

impl FromStr for Hora {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // algunas ofertas usan "08.30" en vez de "08:30"
        let tok = s.trim().replace('.', ":");
        // fin de día; `validar` impide que sirva como inicio
        if tok == "24:00" {
            return Ok(Hora::new(24, 0));
        }
        let t = NaiveTime::parse_from_str(&tok, "%H:%M")
            .map_err(|e| format!("hora inválida '{}': {}", s, e))?;
        Ok(Hora::new(t.hour() as u16, t.minute() as u16))
    }
}

impl fmt::Display for Hora {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for Hora {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hora {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Una reunión semanal de la sección: día, hora de inicio y de término.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horario {
    pub dia: Dia,
    pub inicio: Hora,
    pub fin: Hora,
}

impl Horario {
    pub fn new(dia: Dia, inicio: Hora, fin: Hora) -> Result<Self, String> {
        let h = Horario { dia, inicio, fin };
        h.validar()?;
        Ok(h)
    }

    /// Inicio estrictamente anterior al término, mismo día.
    pub fn validar(&self) -> Result<(), String> {
        if self.inicio < self.fin {
            Ok(())
        } else {
            Err(format!("horario {} {}-{} termina antes de empezar", self.dia, self.inicio, self.fin))
        }
    }
}

/// Sección ofrecida en el catálogo. Se identifica por su NRC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seccion {
    #[serde(deserialize_with = "texto_o_numero")]
    pub nrc: String,
    #[serde(default)]
    pub asignatura: String,
    #[serde(default, deserialize_with = "texto_o_numero_opt")]
    pub seccion: String,
    #[serde(default)]
    pub profesor: String,
    #[serde(default, deserialize_with = "texto_o_numero_opt")]
    pub nivel: String,
    #[serde(default, deserialize_with = "jornada_o_diurno")]
    pub jornada: Jornada,
    #[serde(default)]
    pub horarios: Vec<Horario>,
}

/// Bloque derivado: una reunión concreta de una sección seleccionada.
/// Se recalcula en cada cambio de la selección.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bloque {
    pub nrc: String,
    pub asignatura: String,
    pub profesor: String,
    pub nivel: String,
    pub seccion: String,
    pub dia: Dia,
    pub inicio: Hora,
    pub fin: Hora,
    pub conflicto: bool,
    pub conflicto_con: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EstadoBloque {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "TOPE")]
    Tope,
}

impl Bloque {
    pub fn estado(&self) -> EstadoBloque {
        if self.conflicto_con.is_empty() { EstadoBloque::Ok } else { EstadoBloque::Tope }
    }
}

/// Datos del alumno tal como los devuelve el servicio de alumnos.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Alumno {
    #[serde(default)]
    pub nombre_completo: Option<String>,
    #[serde(default)]
    pub rut: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub jornada: Option<String>,
}

// El catálogo trae NRC y sección a veces como número y a veces como texto.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextoONumero {
    Texto(String),
    Entero(i64),
    Decimal(f64),
}

impl TextoONumero {
    fn into_string(self) -> String {
        match self {
            TextoONumero::Texto(s) => s.trim().to_string(),
            TextoONumero::Entero(n) => n.to_string(),
            TextoONumero::Decimal(f) => f.to_string(),
        }
    }
}

fn texto_o_numero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(TextoONumero::deserialize(deserializer)?.into_string())
}

fn texto_o_numero_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<TextoONumero>::deserialize(deserializer)?
        .map(TextoONumero::into_string)
        .unwrap_or_default())
}

fn jornada_o_diurno<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Jornada, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(Jornada::Diurno),
        Some(s) => s.parse().map_err(serde::de::Error::custom),
    }
}
