//! Basic arithmetic.

use crate::params::lookup;
use crate::{BoxError, LOCAL_TIMEOUT, Tool, ToolResult};
use async_trait::async_trait;
use protocol::{ParameterSpec, Parameters, ToolDescriptor};
use serde_json::Value;
use std::time::Duration;

const OPERATION: &[&str] = &["operation", "op", "operator"];
const LEFT: &[&str] = &["a", "x", "num1"];
const RIGHT: &[&str] = &["b", "y", "num2"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "add" | "addition" | "plus" | "sum" | "+" => Some(Self::Add),
            "subtract" | "subtraction" | "minus" | "-" => Some(Self::Subtract),
            "multiply" | "multiplication" | "times" | "*" | "x" | "×" => Some(Self::Multiply),
            "divide" | "division" | "/" | "÷" => Some(Self::Divide),
            _ => None,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }
}

/// `calculator`: add, subtract, multiply, or divide two numbers.
pub struct Calculator {
    descriptor: ToolDescriptor,
    timeout: Duration,
}

impl Calculator {
    pub fn new() -> Self {
        let descriptor = ToolDescriptor::new(
            "calculator",
            "Performs basic arithmetic operations (add, subtract, multiply, divide)",
        )
        .with_parameter(ParameterSpec::required(
            "operation",
            "string",
            "Operation: add, subtract, multiply, divide",
        ))
        .with_parameter(ParameterSpec::required("a", "float", "First number"))
        .with_parameter(ParameterSpec::required("b", "float", "Second number"));

        Self {
            descriptor,
            timeout: LOCAL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn calculate(params: &Parameters) -> Result<String, ToolResult> {
        let a = operand(params, LEFT)?;
        let b = operand(params, RIGHT)?;

        let requested = lookup(params, OPERATION)
            .and_then(Value::as_str)
            .unwrap_or_default();
        let op = Operation::parse(requested).ok_or_else(|| {
            ToolResult::error(format!(
                "Unknown operation '{requested}'. Supported operations: add, subtract, multiply, divide"
            ))
        })?;

        let value = match op {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Multiply => a * b,
            Operation::Divide if b == 0.0 => {
                return Err(ToolResult::error("Cannot divide by zero"));
            }
            Operation::Divide => a / b,
        };

        Ok(format!("The result of {a} {} {b} = {value}", op.symbol()))
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

fn operand(params: &Parameters, names: &[&str]) -> Result<f64, ToolResult> {
    let invalid = |raw: &dyn std::fmt::Display| {
        ToolResult::error(format!("Invalid number format - '{raw}'"))
    };

    match lookup(params, names) {
        None => Err(ToolResult::error(format!(
            "Missing required parameter '{}'",
            names[0]
        ))),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| invalid(n)),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| invalid(s)),
        Some(other) => Err(invalid(other)),
    }
}

#[async_trait]
impl Tool for Calculator {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn execute(&self, params: &Parameters) -> Result<ToolResult, BoxError> {
        Ok(match Self::calculate(params) {
            Ok(text) => ToolResult::ok(text),
            Err(error) => error,
        })
    }
}
