/// Cursor style of the map canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    /// Whatever the page sets; an empty CSS value
    #[default]
    Default,
    Pointer,
}

impl Cursor {
    /// Value for the CSS `cursor` property
    pub fn as_css(&self) -> &'static str {
        match self {
            Cursor::Default => "",
            Cursor::Pointer => "pointer",
        }
    }
}
