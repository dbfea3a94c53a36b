pub type PlugroupResult<T> = Result<T, PlugroupError>;

#[derive(thiserror::Error, Debug)]
pub enum PlugroupError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("unknown node type '{0}'")]
    UnknownType(String),

    #[error("node '{node}' has no input socket {socket}")]
    Socket { node: String, socket: u32 },

    #[error("parameter error: {0}")]
    Param(String),

    #[error("graph error: {0}")]
    Graph(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlugroupError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn param(msg: impl Into<String>) -> Self {
        Self::Param(msg.into())
    }

    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
