// ============================================================================
// feldata-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Turning core errors into the printed failure line
//
// Expected errors are printed as-is. Anything else is wrapped in a generic
// prefix so the user can tell a bad input from a bug or environment problem.
//
// AI-ASSISTANT-INFO: CLI error message formatting and exit codes

use feldata_core::CoreError;

/// Exit code for every failure, including missing arguments.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Message printed to stdout when the run fails.
pub fn failure_message(err: &CoreError) -> String {
    if err.is_expected() {
        err.to_string()
    } else {
        format!("There was an unexpected error: {}", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_error_printed_verbatim() {
        let err = CoreError::ToolExecutionFailed { exit_code: Some(2) };
        assert_eq!(
            failure_message(&err),
            "Failed to execute command with dovi_tool (error code: 2)"
        );
    }

    #[test]
    fn test_unexpected_error_prefixed() {
        let err = CoreError::JsonParse("expected value at line 1 column 1".into());
        assert_eq!(
            failure_message(&err),
            "There was an unexpected error: JSON parse error: expected value at line 1 column 1"
        );
    }
}
