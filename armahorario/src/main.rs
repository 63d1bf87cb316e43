// --- Armado de horario - Archivo principal ---

use armahorario::catalogo::Catalogo;
use armahorario::clients::descargar_catalogo;
use armahorario::config::Config;
use armahorario::{Sesion, run_server};
use log::{error, info};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // primero la configuración: carga `.env`, que puede traer RUST_LOG
    let config = Config::from_env();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("=== Armado de Horario (API) ===");

    let catalogo = if config.catalogo_es_remoto() {
        descargar_catalogo(&config.catalogo, config.timeout).await
    } else {
        Catalogo::desde_archivo(&config.catalogo)
    };
    let catalogo = match catalogo {
        Ok(c) => c,
        Err(e) => {
            error!("Error cargando catálogo '{}': {}", config.catalogo, e);
            std::process::exit(1);
        }
    };

    run_server(config, Sesion::new(catalogo)).await
}
