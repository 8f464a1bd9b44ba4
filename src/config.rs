use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Which engine renders DOCX to PDF. The builtin engine extracts text and
/// renders it directly; `libreoffice` shells out to a headless soffice and
/// keeps the original layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfEngine {
    Builtin,
    Libreoffice,
}

/// Immutable service settings, read from the environment once at startup and
/// shared read-only through the service collection.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub max_file_size: usize,
    pub request_timeout: Duration,
    pub pdf_engine: PdfEngine,
    pub soffice_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            port: 8000,
            max_file_size: 10 * 1024 * 1024,
            request_timeout: Duration::from_secs(59),
            pdf_engine: PdfEngine::Builtin,
            soffice_path: PathBuf::from("soffice"),
        }
    }
}

impl Settings {
    pub fn from_env() -> Settings {
        let mut settings = Settings::default();
        if let Ok(Ok(port)) = env::var("PORT").map(|port| port.parse::<u16>()) {
            settings.port = port;
        }
        if let Ok(Ok(max)) = env::var("MAX_FILE_SIZE").map(|max| max.parse::<usize>()) {
            settings.max_file_size = max;
        }
        if let Ok(Ok(timeout)) = env::var("REQUEST_TIMEOUT_SECONDS").map(|secs| secs.parse::<u64>()) {
            settings.request_timeout = Duration::from_secs(timeout);
        }
        if let Ok(engine) = env::var("PDF_ENGINE") {
            if engine.eq_ignore_ascii_case("libreoffice") {
                settings.pdf_engine = PdfEngine::Libreoffice;
            }
        }
        if let Ok(path) = env::var("SOFFICE_PATH") {
            settings.soffice_path = PathBuf::from(path);
        }
        settings
    }
}
