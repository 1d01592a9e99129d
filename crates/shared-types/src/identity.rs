// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Process identity stamped into every response envelope

/// Host and build identity of the running service
///
/// Constructed once at startup and shared by reference with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    hostname: Option<String>,
    version: String,
}

impl ServiceIdentity {
    /// Create an identity from an optional host name and a version string
    pub fn new(hostname: Option<String>, version: impl Into<String>) -> Self {
        Self {
            hostname: hostname.filter(|name| !name.is_empty()),
            version: version.into(),
        }
    }

    /// Host name, if one was configured
    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    /// Build version
    pub fn version(&self) -> &str {
        &self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hostname_is_treated_as_unknown() {
        let identity = ServiceIdentity::new(Some(String::new()), "1.5.0");
        assert_eq!(identity.hostname(), None);
        assert_eq!(identity.version(), "1.5.0");
    }

    #[test]
    fn hostname_is_kept() {
        let identity = ServiceIdentity::new(Some("quote-pod-7".to_string()), "1.5.0");
        assert_eq!(identity.hostname(), Some("quote-pod-7"));
    }
}
