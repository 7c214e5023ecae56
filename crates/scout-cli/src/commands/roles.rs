use scout::ScoutApp;

use crate::error::CliError;

pub async fn run_roles(app: &ScoutApp) -> Result<(), CliError> {
    let roles = app.api().get_roles_list().await?;
    for role in roles.roles {
        println!("{role}");
    }
    Ok(())
}
