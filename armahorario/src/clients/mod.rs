//! Clientes HTTP de los servicios externos: catálogo remoto y servicio de
//! alumnos (búsqueda por RUT y generación de PDF).

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::{debug, info, warn};
use reqwest::header::CACHE_CONTROL;

use crate::api_json::{SolicitudPdf, interpretar_respuesta, normalizar_rut, parse_respuesta_alumnos};
use crate::catalogo::Catalogo;
use crate::error::{AlumnosError, CatalogoError, PdfError};
use crate::models::Alumno;

fn construir_http(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(timeout).build()
}

/// Cliente del servicio de alumnos. Las búsquedas siguen la regla "gana la
/// última": si llega la respuesta de una búsqueda anterior a la más reciente,
/// se descarta con `AlumnosError::Obsoleta`.
#[derive(Debug, Clone)]
pub struct ClienteAlumnos {
    http: reqwest::Client,
    base_url: String,
    ultimo_ticket: Arc<AtomicU64>,
}

impl ClienteAlumnos {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AlumnosError> {
        let http = construir_http(timeout)
            .map_err(|e| AlumnosError::Transporte(format!("no se pudo crear el cliente HTTP: {}", e)))?;
        Ok(ClienteAlumnos { http, base_url: base_url.into(), ultimo_ticket: Arc::new(AtomicU64::new(0)) })
    }

    /// GET `{base}?rut=...`. `Ok(None)` cuando el alumno no existe.
    pub async fn buscar(&self, rut: &str) -> Result<Option<Alumno>, AlumnosError> {
        let rut = normalizar_rut(rut);
        if rut.is_empty() {
            return Err(AlumnosError::RutVacio);
        }
        let ticket = self.ultimo_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("buscando alumno {} (ticket {})", rut, ticket);

        let resp = self
            .http
            .get(&self.base_url)
            .query(&[("rut", rut.as_str())])
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| AlumnosError::Transporte(e.to_string()))?;
        let texto = resp.text().await.map_err(|e| AlumnosError::Transporte(e.to_string()))?;

        if self.ultimo_ticket.load(Ordering::SeqCst) != ticket {
            debug!("respuesta para {} descartada (ticket {})", rut, ticket);
            return Err(AlumnosError::Obsoleta);
        }

        // si el servicio devuelve HTML u otra cosa, lo tratamos como falla de transporte
        let parsed = parse_respuesta_alumnos(&texto)
            .map_err(|e| AlumnosError::Transporte(format!("respuesta no es JSON válido: {}", e)))?;
        let alumno = interpretar_respuesta(parsed)?;
        match &alumno {
            Some(_) => info!("alumno {} encontrado", rut),
            None => info!("alumno {} no encontrado", rut),
        }
        Ok(alumno)
    }

    /// Envío en un solo sentido: POST con el campo de formulario `payload`.
    /// El cuerpo de la respuesta no se consume.
    pub async fn generar_pdf(&self, solicitud: &SolicitudPdf) -> Result<(), PdfError> {
        let payload = serde_json::to_string(solicitud)?;
        let resp = self
            .http
            .post(&self.base_url)
            .form(&[("payload", payload)])
            .send()
            .await
            .map_err(|e| PdfError::Transporte(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            warn!("servicio de PDF respondió {}", status);
            return Err(PdfError::Estado(status.as_u16()));
        }
        info!("solicitud de PDF enviada para {} ({} cursos)", solicitud.rut, solicitud.cursos.len());
        Ok(())
    }
}

/// Descarga el catálogo completo desde una URL. Cualquier falla deja al
/// llamador sin catálogo.
pub async fn descargar_catalogo(url: &str, timeout: Duration) -> Result<Catalogo, CatalogoError> {
    let http = construir_http(timeout).map_err(|e| CatalogoError::Descarga(e.to_string()))?;
    let resp = http
        .get(url)
        .header(CACHE_CONTROL, "no-store")
        .send()
        .await
        .map_err(|e| CatalogoError::Descarga(e.to_string()))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(CatalogoError::Descarga(format!("No pude cargar {} ({})", url, status.as_u16())));
    }
    let texto = resp.text().await.map_err(|e| CatalogoError::Descarga(e.to_string()))?;
    let cat = Catalogo::desde_json(&texto)?;
    info!("catálogo remoto {} cargado: {} secciones", url, cat.len());
    Ok(cat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_json::construir_solicitud_pdf;
    use crate::models::Jornada;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cliente(server: &MockServer) -> ClienteAlumnos {
        ClienteAlumnos::new(format!("{}/exec", server.uri()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_buscar_alumno_encontrado() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/exec"))
            .and(query_param("rut", "12345678-K"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "alumno": {"nombre_completo": "Ana Pérez", "rut": "12345678-K", "correo": "ana@uni.cl", "jornada": "Diurno"}
            })))
            .mount(&server)
            .await;

        let alumno = cliente(&server).buscar("12.345.678-k").await.unwrap().expect("debe existir");
        assert_eq!(alumno.nombre_completo.as_deref(), Some("Ana Pérez"));
    }

    #[tokio::test]
    async fn test_buscar_alumno_no_encontrado_y_rut_vacio() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/exec"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "alumno": null})))
            .mount(&server)
            .await;

        let c = cliente(&server);
        assert!(c.buscar("1-9").await.unwrap().is_none());
        assert!(matches!(c.buscar("  ").await, Err(AlumnosError::RutVacio)));
    }

    #[tokio::test]
    async fn test_buscar_respuesta_html_es_transporte() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        assert!(matches!(cliente(&server).buscar("1-9").await, Err(AlumnosError::Transporte(_))));
    }

    #[tokio::test]
    async fn test_busqueda_antigua_se_descarta() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("rut", "1-9"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"ok": true, "alumno": {"rut": "1-9"}}))
                    .set_delay(Duration::from_millis(400)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("rut", "2-7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "alumno": {"rut": "2-7"}})))
            .mount(&server)
            .await;

        let c = cliente(&server);
        let (vieja, nueva) = tokio::join!(c.buscar("1-9"), c.buscar("2-7"));
        assert!(matches!(vieja, Err(AlumnosError::Obsoleta)));
        assert_eq!(nueva.unwrap().and_then(|a| a.rut).as_deref(), Some("2-7"));
    }

    #[tokio::test]
    async fn test_generar_pdf_envia_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/exec"))
            .and(body_string_contains("payload="))
            .and(body_string_contains("generatePdf"))
            .respond_with(ResponseTemplate::new(200).set_body_string("%PDF-1.4"))
            .expect(1)
            .mount(&server)
            .await;

        let sec: crate::models::Seccion = serde_json::from_value(json!({
            "nrc": 3001, "asignatura": "Química", "horarios": [{"dia": "Lun", "inicio": "08:00", "fin": "09:30"}]
        }))
        .unwrap();
        let solicitud = construir_solicitud_pdf("1-9", Jornada::Diurno, &[sec]).unwrap();
        cliente(&server).generar_pdf(&solicitud).await.unwrap();
    }

    #[tokio::test]
    async fn test_generar_pdf_error_de_estado() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let solicitud = SolicitudPdf { action: "generatePdf".into(), rut: "1-9".into(), jornada: Jornada::Diurno, cursos: vec![] };
        assert!(matches!(cliente(&server).generar_pdf(&solicitud).await, Err(PdfError::Estado(500))));
    }

    #[tokio::test]
    async fn test_descargar_catalogo() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/courses.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"nrc": 1, "asignatura": "Física", "horarios": [{"dia": "Vie", "inicio": "08:00", "fin": "09:00"}]}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/roto.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let cat = descargar_catalogo(&format!("{}/courses.json", server.uri()), Duration::from_secs(5)).await.unwrap();
        assert_eq!(cat.len(), 1);
        let err = descargar_catalogo(&format!("{}/roto.json", server.uri()), Duration::from_secs(5)).await;
        assert!(matches!(err, Err(CatalogoError::Descarga(_))));
    }
}
