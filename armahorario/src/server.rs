use std::sync::{Mutex, MutexGuard};

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use log::{info, warn};

use crate::clients::ClienteAlumnos;
use crate::config::Config;
use crate::sesion::Sesion;
use crate::server_handlers::{
    agregar_handler, alumno_handler, asignaturas_handler, cambiar_jornada_handler, grilla_handler, help_handler,
    limpiar_handler, pdf_handler, quitar_handler, secciones_handler, vista_handler,
};

/// Estado compartido por los handlers. La sesión es única: el servidor atiende
/// a un solo alumno a la vez.
pub struct EstadoApp {
    sesion: Mutex<Sesion>,
    pub alumnos: Option<ClienteAlumnos>,
}

impl EstadoApp {
    pub fn new(sesion: Sesion, alumnos: Option<ClienteAlumnos>) -> Self {
        EstadoApp { sesion: Mutex::new(sesion), alumnos }
    }

    /// Bloqueo breve: nunca se mantiene a través de un `.await`.
    pub fn sesion(&self) -> MutexGuard<'_, Sesion> {
        // un handler que entró en pánico no deja la sesión inconsistente:
        // todas las mutaciones son de un solo paso
        self.sesion.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Rutas de la API (también usadas por los tests con `actix_web::test`).
pub fn configurar_rutas(cfg: &mut web::ServiceConfig) {
    cfg.route("/catalogo/asignaturas", web::get().to(asignaturas_handler))
        .route("/catalogo/secciones", web::get().to(secciones_handler))
        .route("/jornada", web::put().to(cambiar_jornada_handler))
        .route("/seleccion", web::get().to(vista_handler))
        .route("/seleccion", web::post().to(agregar_handler))
        .route("/seleccion", web::delete().to(limpiar_handler))
        .route("/seleccion/{nrc}", web::delete().to(quitar_handler))
        .route("/grilla", web::get().to(grilla_handler))
        .route("/alumno", web::get().to(alumno_handler))
        .route("/pdf", web::post().to(pdf_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: Config, sesion: Sesion) -> std::io::Result<()> {
    let alumnos = match &config.alumnos_api_url {
        Some(url) => Some(
            ClienteAlumnos::new(url.clone(), config.timeout)
                .map_err(|e| std::io::Error::other(e.to_string()))?,
        ),
        None => {
            warn!("ALUMNOS_API_URL no definido: /alumno y /pdf responderán 503");
            None
        }
    };
    let estado = web::Data::new(EstadoApp::new(sesion, alumnos));

    info!("Iniciando servidor en http://{}", config.bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(estado.clone())
            .configure(configurar_rutas)
    })
    .bind(config.bind.as_str())?
    .run()
    .await
}
