// exegate-connectors/src/echo.rs
// ============================================================================
// Module: Echo Connector
// Description: Built-in connector that reflects the query back to the caller.
// Purpose: Exercise the full gate path with observable inputs and outputs.
// Dependencies: exegate-core, serde_json
// ============================================================================

//! ## Overview
//! The `echo` connector reflects the fetch query back in its response. It is
//! registered explicitly rather than by default, which makes it a convenient
//! subject for allowlist and scope policy tests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use exegate_core::Connector;
use exegate_core::ConnectorContext;
use exegate_core::ConnectorError;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Connector
// ============================================================================

/// Stable name of the echo connector.
pub const ECHO_CONNECTOR_NAME: &str = "echo";

/// Connector reflecting queries back to the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoConnector;

impl EchoConnector {
    /// Creates the echo connector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Connector for EchoConnector {
    fn name(&self) -> &str {
        ECHO_CONNECTOR_NAME
    }

    fn healthcheck(&self, ctx: &ConnectorContext) -> Result<Value, ConnectorError> {
        Ok(json!({
            "ok": true,
            "connector": ECHO_CONNECTOR_NAME,
            "tenant_id": ctx.tenant_id.as_str(),
        }))
    }

    fn fetch(&self, ctx: &ConnectorContext, query: &Value) -> Result<Value, ConnectorError> {
        Ok(json!({
            "ok": true,
            "connector": ECHO_CONNECTOR_NAME,
            "tenant_id": ctx.tenant_id.as_str(),
            "echo": query.clone(),
        }))
    }
}
