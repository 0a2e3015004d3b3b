// ABOUTME: Shared types used across runtime trait definitions.
// ABOUTME: Options that shape how an image is pushed.

/// Options for pushing an image to a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushOptions {
    /// Verify the registry's TLS certificate. Registries served over plain
    /// HTTP (such as a local `registry:2` on port 5001) need this off.
    pub tls_verify: bool,
}

impl PushOptions {
    pub fn insecure() -> Self {
        Self { tls_verify: false }
    }
}

impl Default for PushOptions {
    fn default() -> Self {
        Self::insecure()
    }
}
