pub mod catalogo;
pub mod seleccion;
pub mod alumno;
pub mod docs;

pub use catalogo::*;
pub use seleccion::*;
pub use alumno::*;
pub use docs::*;
