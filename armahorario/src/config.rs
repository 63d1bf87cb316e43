use std::env;
use std::time::Duration;

use crate::catalogo::CATALOGO_POR_DEFECTO;

pub const BIND_POR_DEFECTO: &str = "127.0.0.1:8080";
pub const TIMEOUT_POR_DEFECTO_SECS: u64 = 15;

/// Configuración del servidor, leída del entorno (y de `.env` si existe).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: String,
    /// Ruta local o URL http(s) del catálogo
    pub catalogo: String,
    /// URL del servicio de alumnos / PDF. Sin ella `/alumno` y `/pdf` responden 503.
    pub alumnos_api_url: Option<String>,
    pub timeout: Duration,
}

// load .env if present
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

impl Config {
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Igual que `from_env` pero con una función de búsqueda inyectable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let no_vacio = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let timeout_secs = no_vacio("ARMAHORARIO_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(TIMEOUT_POR_DEFECTO_SECS);

        Config {
            bind: no_vacio("ARMAHORARIO_BIND").unwrap_or_else(|| BIND_POR_DEFECTO.to_string()),
            catalogo: no_vacio("ARMAHORARIO_CATALOGO").unwrap_or_else(|| CATALOGO_POR_DEFECTO.to_string()),
            alumnos_api_url: no_vacio("ALUMNOS_API_URL"),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn catalogo_es_remoto(&self) -> bool {
        self.catalogo.starts_with("http://") || self.catalogo.starts_with("https://")
    }
}
