use actix_web::{App, test, web};
use armahorario::Sesion;
use armahorario::catalogo::Catalogo;
use armahorario::clients::ClienteAlumnos;
use armahorario::server::{EstadoApp, configurar_rutas};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn estado(alumnos: Option<ClienteAlumnos>) -> web::Data<EstadoApp> {
    let ruta = concat!(env!("CARGO_MANIFEST_DIR"), "/data/courses.json");
    let catalogo = Catalogo::desde_archivo(ruta).expect("catálogo de ejemplo");
    web::Data::new(EstadoApp::new(Sesion::new(catalogo), alumnos))
}

#[actix_web::test]
async fn test_flujo_de_seleccion() {
    let app = test::init_service(App::new().app_data(estado(None)).configure(configurar_rutas)).await;

    let req = test::TestRequest::post().uri("/seleccion").set_json(json!({"nrc": "3101"})).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["resultado"], "agregada");

    let req = test::TestRequest::post().uri("/seleccion").set_json(json!({"nrc": "3201"})).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["vista"]["nrcs_en_tope"], json!(["3101", "3201"]));

    let req = test::TestRequest::post().uri("/seleccion").set_json(json!({"nrc": "3201"})).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["resultado"], "duplicada");
    assert_eq!(body["vista"]["seleccionados"].as_array().map(|a| a.len()), Some(2));

    let req = test::TestRequest::delete().uri("/seleccion/3201").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["quitada"], true);
    assert_eq!(body["vista"]["nrcs_en_tope"], json!([]));
}

#[actix_web::test]
async fn test_rechazos_de_seleccion() {
    let app = test::init_service(App::new().app_data(estado(None)).configure(configurar_rutas)).await;

    let req = test::TestRequest::post().uri("/seleccion").set_json(json!({"nrc": "5101"})).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 409);

    let req = test::TestRequest::post().uri("/seleccion").set_json(json!({"nrc": "0000"})).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);

    let req = test::TestRequest::post().uri("/seleccion").set_json(json!({"nrc": ""})).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_cambio_de_jornada() {
    let app = test::init_service(App::new().app_data(estado(None)).configure(configurar_rutas)).await;

    let req = test::TestRequest::post().uri("/seleccion").set_json(json!({"nrc": "3101"})).to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::put().uri("/jornada").set_json(json!({"jornada": "Vespertino"})).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["jornada"], "Vespertino");
    assert_eq!(body["seleccionados"], json!([]));

    let req = test::TestRequest::get().uri("/catalogo/asignaturas").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["asignaturas"], json!(["Cálculo I", "Programación"]));

    let req = test::TestRequest::put().uri("/jornada").set_json(json!({"jornada": "Nocturno"})).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_secciones_y_grilla() {
    let app = test::init_service(App::new().app_data(estado(None)).configure(configurar_rutas)).await;

    let req = test::TestRequest::get().uri("/catalogo/secciones?asignatura=C%C3%A1lculo%20I").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let secciones = body["secciones"].as_array().expect("lista de secciones");
    assert_eq!(secciones.len(), 2);
    assert_eq!(secciones[0]["etiqueta"], "Sección 1 — NRC 3101 — María González");

    let req = test::TestRequest::get().uri("/catalogo/secciones").to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 400);

    let req = test::TestRequest::get().uri("/grilla").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["dias"], json!(["Lun", "Mar", "Mie", "Jue", "Vie"]));
    assert_eq!(body["filas"].as_array().map(|f| f.len()), Some(28));
}

#[actix_web::test]
async fn test_alumno_sin_servicio_configurado() {
    let app = test::init_service(App::new().app_data(estado(None)).configure(configurar_rutas)).await;
    let req = test::TestRequest::get().uri("/alumno?rut=1-9").to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 503);
}

#[actix_web::test]
async fn test_alumno_no_encontrado_conserva_seleccion() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("rut", "1-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "alumno": null})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("rut", "2-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": false, "error": "hoja no encontrada"})))
        .mount(&server)
        .await;

    let cliente = ClienteAlumnos::new(server.uri(), Duration::from_secs(5)).unwrap();
    let app = test::init_service(App::new().app_data(estado(Some(cliente))).configure(configurar_rutas)).await;

    let req = test::TestRequest::post().uri("/seleccion").set_json(json!({"nrc": "3101"})).to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/alumno?rut=1-9").to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 404);

    let req = test::TestRequest::get().uri("/alumno?rut=2-7").to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 502);

    let req = test::TestRequest::get().uri("/alumno?rut=").to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 400);

    let req = test::TestRequest::get().uri("/seleccion").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["seleccionados"].as_array().map(|a| a.len()), Some(1));
}

#[actix_web::test]
async fn test_pdf() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let cliente = ClienteAlumnos::new(server.uri(), Duration::from_secs(5)).unwrap();
    let app = test::init_service(App::new().app_data(estado(Some(cliente))).configure(configurar_rutas)).await;

    let req = test::TestRequest::post().uri("/pdf").set_json(json!({"rut": "12.345.678-K"})).to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 400);

    let req = test::TestRequest::post().uri("/seleccion").set_json(json!({"nrc": "3102"})).to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post().uri("/pdf").set_json(json!({"rut": "12.345.678-K"})).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 202);
}

#[actix_web::test]
async fn test_alumno_busqueda_obsoleta_responde_409() {
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

    let cliente = ClienteAlumnos::new(server.uri(), Duration::from_secs(5)).unwrap();
    let app = test::init_service(App::new().app_data(estado(Some(cliente))).configure(configurar_rutas)).await;

    let vieja = test::TestRequest::get().uri("/alumno?rut=1-9").to_request();
    let nueva = test::TestRequest::get().uri("/alumno?rut=2-7").to_request();
    let (vieja, nueva) = tokio::join!(test::call_service(&app, vieja), test::call_service(&app, nueva));

    assert_eq!(nueva.status().as_u16(), 200);
    assert_eq!(vieja.status().as_u16(), 409);
    let body: Value = test::read_body_json(vieja).await;
    assert_eq!(body["obsoleta"], true);
}

#[actix_web::test]
async fn test_alumno_servicio_inalcanzable_responde_502() {
    // nada escucha en el puerto 1
    let cliente = ClienteAlumnos::new("http://127.0.0.1:1/exec", Duration::from_secs(2)).unwrap();
    let app = test::init_service(App::new().app_data(estado(Some(cliente))).configure(configurar_rutas)).await;

    let req = test::TestRequest::post().uri("/seleccion").set_json(json!({"nrc": "3102"})).to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/alumno?rut=1-9").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 502);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().is_some_and(|e| e.starts_with("Error buscando alumno")));

    let req = test::TestRequest::get().uri("/seleccion").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["seleccionados"][0]["nrc"], "3102");
}
