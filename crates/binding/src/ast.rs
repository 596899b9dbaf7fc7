//! Syntax tree for the inside of a `{{ ... }}` action.
use serde_json::Value;

/// A value-producing term.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A string, number, boolean or `nil` literal.
    Literal(Value),
    /// A path relative to the current data (`.`, `.customer.name`).
    Field(Vec<String>),
    /// A path anchored at the root data (`$`, `$.customer`).
    Root(Vec<String>),
    /// A parenthesised pipeline.
    Nested(Pipeline),
}

/// One stage of a pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A helper invocation with its explicit arguments.
    Call { name: String, args: Vec<Operand> },
    /// A bare operand.
    Operand(Operand),
}

/// Commands joined by `|`. Each stage after the first receives the previous
/// result as its final argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    pub commands: Vec<Command>,
}
