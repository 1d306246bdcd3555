//! Domain-level constants.

// =============================================================================
// Responses
// =============================================================================

/// Status value returned after a successful delete
pub const STATUS_OK: &str = "ok";
