use std::borrow::Cow;

/// A specialized [`AdminError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("Incorrect password{}", format_context(.context))]
    InvalidPassword { context: Option<Cow<'static, str>> },

    /// A form was saved with invalid input.
    #[error("Invalid input{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unknown player{}: {id}", format_context(.context))]
    UnknownPlayer { id: String, context: Option<Cow<'static, str>> },

    #[error("Unknown box{}: {id}", format_context(.context))]
    UnknownBox { id: String, context: Option<Cow<'static, str>> },

    #[error("Unknown question{}: {id}", format_context(.context))]
    UnknownQuestion { id: String, context: Option<Cow<'static, str>> },

    /// The banner image exceeds the configured upload cap.
    #[error("Image is too large{}: {size} bytes, max {max} bytes", format_context(.context))]
    BannerTooLarge { size: u64, max: u64, context: Option<Cow<'static, str>> },

    #[error("Banner file I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
}

pub trait AdminErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, AdminError>;
}

impl<T> AdminErrorExt<T> for Result<T, AdminError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                AdminError::InvalidPassword { context: c }
                | AdminError::Validation { context: c, .. }
                | AdminError::UnknownPlayer { context: c, .. }
                | AdminError::UnknownBox { context: c, .. }
                | AdminError::UnknownQuestion { context: c, .. }
                | AdminError::BannerTooLarge { context: c, .. }
                | AdminError::Io { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

impl<T> AdminErrorExt<T> for Result<T, std::io::Error> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, AdminError> {
        self.map_err(|source| AdminError::Io { source, context: Some(context.into()) })
    }
}

impl AdminError {
    pub(crate) fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
