use std::io;

pub const PLACEHOLDER_TEXT: &str = "No headlines available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub text: String,
    /// Empty when the entry carried no link.
    pub link: String,
}

impl Headline {
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
        }
    }

    /// Stand-in shown when a refresh produced nothing.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_TEXT, "")
    }

    pub fn has_link(&self) -> bool {
        !self.link.is_empty()
    }

    /// Open the link in the default browser. Returns `false` without
    /// launching anything when there is no link.
    pub fn open(&self) -> io::Result<bool> {
        self.open_with(webbrowser::open)
    }

    pub fn open_with<F>(&self, launch: F) -> io::Result<bool>
    where
        F: FnOnce(&str) -> io::Result<()>,
    {
        if !self.has_link() {
            return Ok(false);
        }
        launch(&self.link)?;
        Ok(true)
    }
}
