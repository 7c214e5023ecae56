//! Contact command handler

use scout::contact::ContactForm;
use scout::{ScoutApp, ScoutError};

use crate::error::CliError;
use crate::render::{format_field_errors, format_sent};

/// Submit `form` to `username`, printing the outcome.
///
/// Field errors (including a role rejected by the server) are printed one per
/// line before the error is returned.
pub async fn submit_contact(
    app: &ScoutApp,
    username: &str,
    form: &ContactForm,
) -> Result<(), CliError> {
    match app.contact().contact(username, form).await {
        Ok(response) => {
            println!("{}", format_sent(username, &response));
            Ok(())
        }
        Err(err) => {
            let errors = err.field_errors();
            if !errors.is_empty() {
                eprint!("{}", format_field_errors(&errors));
            }
            Err(ScoutError::from(err).into())
        }
    }
}

pub async fn run_contact(
    app: &ScoutApp,
    username: String,
    role: String,
    message: String,
    email: String,
) -> Result<(), CliError> {
    let username = username.trim_start_matches('@').to_string();

    let candidates = app.api().get_user_list().await?;
    if !candidates.iter().any(|c| c.username == username) {
        return Err(CliError::InvalidInput(format!(
            "Candidate @{username} not found"
        )));
    }

    submit_contact(app, &username, &ContactForm::new(role, message, email)).await
}
