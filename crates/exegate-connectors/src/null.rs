// exegate-connectors/src/null.rs
// ============================================================================
// Module: Null Connector
// Description: Built-in connector that answers without external effects.
// Purpose: Provide a baseline connector for wiring and smoke checks.
// Dependencies: exegate-core, serde_json
// ============================================================================

//! ## Overview
//! The `null` connector performs no external work. It answers every health
//! probe and fetch with a small structured payload naming the connector and
//! the tenant, which makes it the default choice for verifying gate and
//! registry wiring.

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

/// Stable name of the null connector.
pub const NULL_CONNECTOR_NAME: &str = "null";

/// Connector with no external effects.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullConnector;

impl NullConnector {
    /// Creates the null connector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Connector for NullConnector {
    fn name(&self) -> &str {
        NULL_CONNECTOR_NAME
    }

    fn healthcheck(&self, ctx: &ConnectorContext) -> Result<Value, ConnectorError> {
        Ok(json!({
            "ok": true,
            "connector": NULL_CONNECTOR_NAME,
            "tenant_id": ctx.tenant_id.as_str(),
        }))
    }

    fn fetch(&self, ctx: &ConnectorContext, _query: &Value) -> Result<Value, ConnectorError> {
        Ok(json!({
            "ok": true,
            "connector": NULL_CONNECTOR_NAME,
            "tenant_id": ctx.tenant_id.as_str(),
            "data": Value::Null,
        }))
    }
}
