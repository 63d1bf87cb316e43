// Biblioteca raíz del crate `armahorario`.
// Expone el núcleo (selección + topes), el catálogo, los clientes externos
// y el servidor HTTP que hace de adaptador para la interfaz web.
pub mod algorithm;
pub mod api_json;
pub mod catalogo;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod server_handlers;
pub mod sesion;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
pub use sesion::Sesion;
