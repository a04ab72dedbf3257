//! Error type shared by every setup step.

use crate::gl::ShaderStage;

/// Everything that can stop the firefly field from starting.
///
/// None of these are fatal to the host page: the entry point logs them and
/// returns normally.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FireflyError {
    /// The canvas yielded neither a `webgl` nor an `experimental-webgl` context.
    #[error("WebGL is not supported.")]
    ContextUnavailable,

    /// A `create*` call on the context returned nothing.
    #[error("failed to create {0}")]
    ResourceCreation(&'static str),

    #[error("an error occurred compiling the {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("unable to initialize the shader program: {0}")]
    ProgramLink(String),

    /// The linked program has no active attribute with this name.
    #[error("shader program has no attribute `{0}`")]
    MissingAttribute(&'static str),

    /// More particles than a single `drawArrays` call can address.
    #[error("{0} particles exceed the draw call limit")]
    TooManyParticles(usize),

    /// A host DOM call failed or a required global was missing.
    #[error("DOM error: {0}")]
    Dom(String),
}

pub type Result<T, E = FireflyError> = std::result::Result<T, E>;
