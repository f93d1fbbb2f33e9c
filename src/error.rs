use std::io;

use thiserror::Error;

/// Errors produced while encoding a document.
///
/// Encoding is all-or-nothing: any failure aborts the whole pass and no
/// partial buffer is returned to the caller.
#[derive(Debug, Error)]
pub enum PdfError {
    /// I/O failure while writing one of the fixed encode phases
    /// (header, catalog, page tree, xref, trailer).
    #[error("error writing {phase}: {source}")]
    Write {
        phase: &'static str,
        #[source]
        source: io::Error,
    },

    /// I/O failure while serializing the indirect object with this number.
    #[error("error writing object {id}: {source}")]
    WriteObject {
        id: u32,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PdfError>;
