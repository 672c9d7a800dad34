//! JSON output and error reporting.

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use mesh_convert::{ConvertError, ErrorKind};
use serde::Serialize;
use tracing::error;

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Error document printed on failure.
#[derive(Debug, Serialize)]
struct ErrorPayload {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<ErrorKind>,
    message: String,
}

/// Process exit code for an error kind.
pub const fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::InvalidBudget | ErrorKind::UnsupportedFormat | ErrorKind::InvalidRequest => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::EmptyMesh | ErrorKind::DegenerateFace | ErrorKind::IndexOutOfBounds => 4,
        ErrorKind::Io => 5,
    }
}

fn classify(err: &anyhow::Error) -> Option<ErrorKind> {
    err.downcast_ref::<ConvertError>().map(ConvertError::kind)
}

/// Log an error, print its JSON document and pick the exit code.
pub fn report_error(err: &anyhow::Error) -> ExitCode {
    let kind = classify(err);
    error!(kind = ?kind, "{err:#}");

    let payload = ErrorPayload {
        success: false,
        kind,
        message: format!("{err:#}"),
    };
    if let Err(print_err) = print_json(&payload) {
        error!("Failed to print error document: {print_err:#}");
    }

    ExitCode::from(kind.map_or(1, exit_code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_io::IoError;

    #[test]
    fn client_errors_share_a_code() {
        assert_eq!(exit_code(ErrorKind::InvalidBudget), 2);
        assert_eq!(exit_code(ErrorKind::UnsupportedFormat), 2);
        assert_eq!(exit_code(ErrorKind::InvalidRequest), 2);
        assert_eq!(exit_code(ErrorKind::NotFound), 3);
        assert_eq!(exit_code(ErrorKind::DegenerateFace), 4);
        assert_eq!(exit_code(ErrorKind::Io), 5);
    }

    #[test]
    fn classify_sees_convert_errors_through_anyhow() {
        let err = anyhow::Error::from(ConvertError::from(IoError::unsupported("glb")));
        assert_eq!(classify(&err), Some(ErrorKind::UnsupportedFormat));

        let err = anyhow::anyhow!("stdout closed");
        assert_eq!(classify(&err), None);
    }

    #[test]
    fn error_payload_shape() {
        let payload = ErrorPayload {
            success: false,
            kind: Some(ErrorKind::InvalidBudget),
            message: "face budget must be positive".into(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["kind"], "invalid_budget");
    }
}
