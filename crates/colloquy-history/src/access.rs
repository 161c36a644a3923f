//! Static access-code gate for the credential/admin surface.
//!
//! The code is a local UX hurdle in front of the settings panel, not an
//! authentication mechanism; the gate never touches the network.

/// Code accepted when none was configured.
const DEFAULT_ACCESS_CODE: &str = "3005";

/// Gate checking attempts against one configured access code.
#[derive(Debug, Clone)]
pub struct AccessGate {
    code: String,
}

impl AccessGate {
    /// Gate with a custom access code.
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// Check an entered code.
    pub fn verify(&self, attempt: &str) -> bool {
        attempt == self.code
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new(DEFAULT_ACCESS_CODE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_gate_accepts_the_built_in_code_only() {
        let gate = AccessGate::default();
        assert!(gate.verify("3005"));
        assert!(!gate.verify("0000"));
        assert!(!gate.verify(""));
    }

    #[test]
    fn custom_codes_replace_the_default() {
        let gate = AccessGate::new("s3cret");
        assert!(gate.verify("s3cret"));
        assert!(!gate.verify("3005"));
    }
}
