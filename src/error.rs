use thiserror::Error;

/// Compile-time failures.
///
/// The compiler is deliberately permissive: unrecognized schema shapes
/// degrade to pass-through types or empty bodies instead of failing. The
/// one structural fault that must abort a compile is a `$ref` pointing at
/// a name absent from the definitions table.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("unresolved reference `{reference}` in `{container}`")]
    UnresolvedReference {
        /// The dangling `$ref` string as written in the document.
        reference: String,
        /// The definition or operation that contained it.
        container: String,
    },
}

pub type Result<T> = std::result::Result<T, CompileError>;
