pub mod canvas;
pub mod font;
pub mod layout;
pub mod style;

pub use canvas::*;
pub use font::*;
pub use style::*;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("font error: {0}")]
    Font(String),

    #[error("layout error: {0}")]
    Layout(String),

    #[error("canvas error: {0}")]
    Canvas(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RenderError {
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    pub fn canvas(msg: impl Into<String>) -> Self {
        Self::Canvas(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(RenderError::font("x").to_string().contains("font error:"));
        assert!(RenderError::layout("x").to_string().contains("layout error:"));
        assert!(RenderError::canvas("x").to_string().contains("canvas error:"));
    }
}
