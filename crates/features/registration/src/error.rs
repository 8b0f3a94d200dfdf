use std::borrow::Cow;

/// A specialized [`RegistrationError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    /// Required questions left empty. Lists every missing label at once.
    #[error("Please answer{}: {}", format_context(.context), .labels.join(", "))]
    MissingAnswers { labels: Vec<String>, context: Option<Cow<'static, str>> },

    #[error("This box is full{}: {name} has {occupants} of {capacity} places taken", format_context(.context))]
    BoxFull {
        name: String,
        capacity: u32,
        occupants: usize,
        context: Option<Cow<'static, str>>,
    },

    #[error("Unknown box{}: {box_id}", format_context(.context))]
    UnknownBox { box_id: String, context: Option<Cow<'static, str>> },

    /// The player is gone, e.g. deleted by the administrator meanwhile.
    #[error("Unknown player{}: {player_id}", format_context(.context))]
    UnknownPlayer { player_id: String, context: Option<Cow<'static, str>> },

    /// The operation does not fit the current step of the flow.
    #[error("Registration step error{}: {message}", format_context(.context))]
    Step { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

pub trait RegistrationErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, RegistrationError>;
}

impl<T> RegistrationErrorExt<T> for Result<T, RegistrationError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                RegistrationError::MissingAnswers { context: c, .. }
                | RegistrationError::BoxFull { context: c, .. }
                | RegistrationError::UnknownBox { context: c, .. }
                | RegistrationError::UnknownPlayer { context: c, .. }
                | RegistrationError::Step { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
