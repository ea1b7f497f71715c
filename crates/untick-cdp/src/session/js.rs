//! JavaScript execution operations for CDP page session.

use serde_json::{json, Value};

use crate::error::CdpError;
use crate::protocol::RemoteObject;

use super::core::PageSession;

/// Turn `exceptionDetails` into an error, otherwise hand back the result.
fn check_exception(result: &Value) -> Result<(), CdpError> {
    if let Some(exception) = result.get("exceptionDetails") {
        let text = exception["exception"]["description"]
            .as_str()
            .or_else(|| exception["text"].as_str())
            .unwrap_or("Unknown error");
        return Err(CdpError::JavaScript(text.to_string()));
    }
    Ok(())
}

fn call_arguments(args: Vec<Value>) -> Value {
    json!(args.into_iter().map(|v| json!({"value": v})).collect::<Vec<_>>())
}

impl PageSession {
    /// Evaluate JavaScript expression.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        check_exception(&result)?;
        Ok(result["result"]["value"].clone())
    }

    /// Evaluate JavaScript and return remote object.
    pub async fn evaluate_handle(&self, expression: &str) -> Result<RemoteObject, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": false,
                })),
            )
            .await?;

        check_exception(&result)?;
        let remote_obj: RemoteObject = serde_json::from_value(result["result"].clone())?;
        Ok(remote_obj)
    }

    /// Call a function with `this` bound to a remote object, returning the value.
    pub async fn call_function_on(
        &self,
        object_id: &str,
        function: &str,
        args: Vec<Value>,
    ) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.callFunctionOn",
                Some(json!({
                    "objectId": object_id,
                    "functionDeclaration": function,
                    "arguments": call_arguments(args),
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        check_exception(&result)?;
        Ok(result["result"]["value"].clone())
    }

    /// Call a function with `this` bound to a remote object, returning a handle.
    pub async fn call_function_handle(
        &self,
        object_id: &str,
        function: &str,
        args: Vec<Value>,
    ) -> Result<RemoteObject, CdpError> {
        let result = self
            .call(
                "Runtime.callFunctionOn",
                Some(json!({
                    "objectId": object_id,
                    "functionDeclaration": function,
                    "arguments": call_arguments(args),
                    "returnByValue": false,
                })),
            )
            .await?;

        check_exception(&result)?;
        let remote_obj: RemoteObject = serde_json::from_value(result["result"].clone())?;
        Ok(remote_obj)
    }

    /// Release a remote object handle.
    pub async fn release_object(&self, object_id: &str) -> Result<(), CdpError> {
        self.call("Runtime.releaseObject", Some(json!({"objectId": object_id})))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_exception_passes_clean_result() {
        let result = json!({"result": {"type": "number", "value": 3}});
        assert!(check_exception(&result).is_ok());
    }

    #[test]
    fn test_check_exception_prefers_description() {
        let result = json!({
            "result": {"type": "object"},
            "exceptionDetails": {
                "text": "Uncaught",
                "exception": {"type": "object", "description": "TypeError: x is not a function"}
            }
        });
        match check_exception(&result) {
            Err(CdpError::JavaScript(msg)) => assert!(msg.contains("TypeError")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_call_arguments_wraps_values() {
        let args = call_arguments(vec![json!("label"), json!(300)]);
        assert_eq!(args, json!([{"value": "label"}, {"value": 300}]));
    }
}
