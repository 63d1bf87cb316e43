// Núcleo del armado de horario: selección y detección de topes.
// No depende de red ni de la grilla dibujada.
pub mod conflict;
pub mod grilla;
pub mod seleccion;

pub use conflict::{calcular_topes, expandir_bloques, marcar_topes, marcar_topes_barrido, secciones_en_tope};
pub use grilla::{BloqueVisible, FilaGrilla, VentanaDia};
pub use seleccion::{ResultadoAgregar, Seleccion};
