//! Diagnostic message table.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    /// The argument can never be found in the receiver container.
    pub const MAY_NOT_CONTAIN_OBJECTS_OF_TYPE: u32 = 7001;
    /// The argument only reaches the container's parameter through a conversion.
    pub const SUSPICIOUS_CALL_TO: u32 = 7002;
}

pub mod diagnostic_messages {
    pub const MAY_NOT_CONTAIN_OBJECTS_OF_TYPE: &str = "'{0}' may not contain objects of type '{1}'";
    pub const SUSPICIOUS_CALL_TO: &str = "Suspicious call to '{0}'";
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::MAY_NOT_CONTAIN_OBJECTS_OF_TYPE,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::MAY_NOT_CONTAIN_OBJECTS_OF_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::SUSPICIOUS_CALL_TO,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::SUSPICIOUS_CALL_TO,
    },
];
