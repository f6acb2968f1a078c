#![allow(unused_macros)]

/// Helper macro for building a [`crate::diagnostics::Diagnostic`] from a diagnostic id
///
/// Severity and category are taken from the id, the message is formatted in place.
///
/// ```rust, ignore
///  let diag = diagnostic!(DiagnosticId::InvalidFieldOffset, member.location.clone(),
///      "FieldOffset ({}) must be >= 0", offset);
/// ```
macro_rules! diagnostic {
    // Single string version
    ($id:expr, $location:expr, $msg:expr) => {
        crate::diagnostics::Diagnostic::from_id($id, $location, $msg.to_string())
    };

    // Format string with arguments version
    ($id:expr, $location:expr, $fmt:expr, $($arg:tt)*) => {
        crate::diagnostics::Diagnostic::from_id($id, $location, format!($fmt, $($arg)*))
    };
}
