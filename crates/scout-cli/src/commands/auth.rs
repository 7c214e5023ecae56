//! Login, logout and status handlers

use scout::ScoutApp;
use scout::session::{Credentials, validate_login};

use crate::error::CliError;
use crate::prompt::read_secret;
use crate::render::format_field_errors;

pub async fn run_login(
    app: &ScoutApp,
    email: String,
    password: Option<String>,
) -> Result<(), CliError> {
    if app.session().is_authenticated() {
        println!("✅ Already logged in");
        return Ok(());
    }

    let password = match password {
        Some(password) => password,
        None => read_secret("Password: ")?,
    };

    let credentials = Credentials::new(email, password);
    if let Err(errors) = validate_login(&credentials) {
        eprint!("{}", format_field_errors(&errors));
        return Err(CliError::InvalidInput("login form is incomplete".to_string()));
    }

    if app.session().login(&credentials).await {
        println!("✅ Logged in as {}", credentials.email.trim());
        Ok(())
    } else {
        Err(CliError::InvalidInput("Invalid email or password".to_string()))
    }
}

pub async fn run_logout(app: &ScoutApp) -> Result<(), CliError> {
    app.session().logout().await;
    println!("👋 Logged out");
    Ok(())
}

pub async fn run_status(app: &ScoutApp) -> Result<(), CliError> {
    if app.session().is_authenticated() {
        println!("Logged in");
    } else {
        println!("Not logged in");
    }
    println!("API:        {}", app.config().api.base_url);
    println!("Data dir:   {}", app.config().data_dir().display());
    println!("Contacted:  {}", app.contacted().len());
    Ok(())
}
