pub mod document;
pub mod error;
pub mod graphics;
pub mod objects;
pub mod writer;

pub use document::{Blob, PageSize, PdfDocument, PdfPage};
pub use error::{PdfError, Result};
pub use graphics::{Brush, Color, Graphics, Pen, SolidColorBrush, TilingPatternBrush};
