//! Process-wide transcoder tables
//!
//! The transcoding engine needs large read-only lookup tables before any
//! container can be opened. They are built once by [`initialize`] and shared
//! by every importer; a `&'static Codebook` is the proof that this happened.

use std::sync::OnceLock;

static CODEBOOK: OnceLock<Codebook> = OnceLock::new();

/// Handle to the initialized global transcoder tables
#[derive(Debug)]
pub struct Codebook {
    engine: &'static str,
}

impl Codebook {
    /// The codebook, if [`initialize`] has run
    #[must_use]
    pub fn get() -> Option<&'static Codebook> {
        CODEBOOK.get()
    }

    /// Name of the engine whose tables were initialized
    #[must_use]
    pub fn engine(&self) -> &'static str {
        self.engine
    }
}

/// Build the global transcoder tables
///
/// Call once at startup, before constructing importers. Later calls return
/// the same codebook without touching the tables again.
pub fn initialize() -> &'static Codebook {
    CODEBOOK.get_or_init(|| {
        #[cfg(feature = "basisu")]
        basis_universal::transcoding::transcoder_init();

        let engine = if cfg!(feature = "basisu") { "basisu" } else { "none" };
        tracing::debug!("Transcoder tables initialized ({engine})");
        Codebook { engine }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_once() {
        let first = initialize();
        let second = initialize();
        assert!(std::ptr::eq(first, second));
        assert!(Codebook::get().is_some_and(|codebook| std::ptr::eq(codebook, first)));
    }
}
