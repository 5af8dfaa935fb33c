//! Error adapter for converting CliError to miette diagnostics.
//!
//! This module provides the bridge between the CLI's standard error types
//! and miette's rich diagnostic formatting.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use lamina::LaminaError;

use crate::CliError;

/// Adapter wrapping a [`CliError`] for miette rendering.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CliError::Io(_) => "lamina::io",
            CliError::Config(_) => "lamina::config",
            CliError::Json(_) => "lamina::json",
            CliError::Lamina(err) => match err {
                LaminaError::Model(_) => "lamina::model",
                LaminaError::UnresolvedEndpoint { .. } => "lamina::assembler",
                LaminaError::Serialize(_) => "lamina::serialize",
            },
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            CliError::Lamina(LaminaError::UnresolvedEndpoint { .. }) => Some(Box::new(
                "every link endpoint must name a term point declared in some layer",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`CliError`] into a list of reportable errors.
///
/// Lamina errors carry no source spans, so every error maps to exactly one
/// reportable; the list shape keeps the rendering loop uniform.
pub fn to_reportables(err: &CliError) -> Vec<ErrorAdapter<'_>> {
    vec![ErrorAdapter(err)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_endpoint_reports_assembler_code_and_help() {
        let err = CliError::from(LaminaError::UnresolvedEndpoint {
            link: "layer1/a,a1,b,b1".to_string(),
            endpoint: "layer1/b/b1".to_string(),
        });

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        assert_eq!(
            reportables[0].code().map(|c| c.to_string()),
            Some("lamina::assembler".to_string())
        );
        assert!(reportables[0].help().is_some());
    }

    #[test]
    fn io_error_reports_io_code() {
        let err = CliError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let reportables = to_reportables(&err);
        assert_eq!(
            reportables[0].code().map(|c| c.to_string()),
            Some("lamina::io".to_string())
        );
    }
}
