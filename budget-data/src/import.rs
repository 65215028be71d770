//! Asynchronous CSV import.
//!
//! Reading the source is the only suspension point. An import either
//! resolves to a [`CalculatorState`] or to a [`CsvCodecError`]; there is no
//! retry and no cancellation. Dropping the future abandons the read.
//!
//! A [`CsvImporter`] runs one import at a time. Starting a second import
//! while the first is still reading fails straight away with
//! [`CsvCodecError::ImportInProgress`] instead of racing the first one.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use budget_core::CalculatorState;
use tracing::{info, warn};

use crate::csv_codec::parse_csv;
use crate::error::CsvCodecError;

/// Somewhere CSV text can be read from.
#[async_trait]
pub trait CsvSource: Send + Sync {
    /// Human-readable name used in log messages.
    fn name(&self) -> String;

    async fn read_text(&self) -> std::io::Result<String>;
}

/// A CSV file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CsvSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_text(&self) -> std::io::Result<String> {
        tokio::fs::read_to_string(&self.path).await
    }
}

/// CSV text that is already in memory, e.g. an uploaded file.
#[derive(Debug, Clone)]
pub struct TextSource {
    name: String,
    text: String,
}

impl TextSource {
    pub fn new(
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

#[async_trait]
impl CsvSource for TextSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn read_text(&self) -> std::io::Result<String> {
        Ok(self.text.clone())
    }
}

/// Clears the in-flight flag when the import finishes, however it ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Imports calculator state from CSV sources, one at a time.
#[derive(Debug, Default)]
pub struct CsvImporter {
    in_flight: AtomicBool,
}

impl CsvImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an import is currently running.
    pub fn is_importing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Reads `source` and parses it into a calculator state.
    ///
    /// # Errors
    ///
    /// * [`CsvCodecError::ImportInProgress`] – another import on this
    ///   importer has not finished yet.
    /// * [`CsvCodecError::FileRead`] – the source could not be read.
    /// * Any error from [`parse_csv`].
    pub async fn import<S>(
        &self,
        source: &S,
    ) -> Result<CalculatorState, CsvCodecError>
    where
        S: CsvSource + ?Sized,
    {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!(source = %source.name(), "import rejected, another import is running");
            return Err(CsvCodecError::ImportInProgress);
        };

        info!(source = %source.name(), "importing calculator state");
        let result = match source.read_text().await {
            Ok(text) => parse_csv(&text),
            Err(e) => Err(CsvCodecError::FileRead(e)),
        };

        match &result {
            Ok(state) => info!(
                source = %source.name(),
                scenarios = state.loan_parameters.scenario_count(),
                "import finished"
            ),
            Err(error) => warn!(source = %source.name(), %error, "import failed"),
        }

        result
    }
}

/// Callback form of [`CsvImporter::import`].
///
/// Exactly one of `on_success` and `on_error` is called, exactly once.
pub async fn import_from_csv<S, F, E>(
    importer: &CsvImporter,
    source: &S,
    on_success: F,
    on_error: E,
) where
    S: CsvSource + ?Sized,
    F: FnOnce(CalculatorState),
    E: FnOnce(CsvCodecError),
{
    match importer.import(source).await {
        Ok(state) => on_success(state),
        Err(error) => on_error(error),
    }
}
