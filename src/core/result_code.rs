//! Mapping of Jenkins build results to process exit codes

/// The only result label that counts as a successful build
pub const SUCCESS_LABEL: &str = "SUCCESS";

/// Map a build result label to an exit code
///
/// `SUCCESS` maps to 0, anything else (including labels Jenkins may add in
/// the future) maps to 1.
pub fn exit_code_for(label: &str) -> i32 {
    if label == SUCCESS_LABEL {
        0
    } else {
        1
    }
}
