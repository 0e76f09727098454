//! Checker configuration.

use serde::Deserialize;
use tybscri_common::limits::MAX_RESOLUTION_DEPTH;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckerOptions {
    /// Name attached to log spans; diagnostics carry spans only.
    pub file_name: String,
    /// Name bound by a lambda that declares no parameters.
    pub implicit_lambda_parameter: String,
    /// Report `is` guards applied to reassignable bindings.
    pub report_non_narrowable_guards: bool,
    pub max_resolution_depth: u32,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            file_name: "<script>".to_string(),
            implicit_lambda_parameter: "it".to_string(),
            report_non_narrowable_guards: true,
            max_resolution_depth: MAX_RESOLUTION_DEPTH,
        }
    }
}
