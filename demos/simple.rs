//! Example of using the Stitch admin SDK
use serde_json::json;
use stitch_admin::{Credentials, StitchAdminClientFactory};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Enable logging
    env_logger::init();

    let base_url = std::env::var("STITCH_URL").unwrap_or_else(|_| "https://stitch.mongodb.com".to_string());
    let group_id = std::env::var("STITCH_GROUP_ID")?;
    let api_key = std::env::var("STITCH_API_KEY")?;

    // Initialize client
    let admin = StitchAdminClientFactory::create(base_url)?;

    // Login
    let user_id = admin.authenticate(Credentials::api_key(api_key)).await?;
    println!("Logged in as {}", user_id);

    // List all applications of the group
    let apps = admin.apps(&group_id).list(None).await?.into_json()?;
    println!("Current applications: \n{:#}", apps);

    // Create an app, add a value, then remove the app again
    let app = admin.apps(&group_id).create(&json!({"name": "demo-app"}), None).await?.into_json()?;
    let app_id = app["_id"].as_str().unwrap_or_default().to_string();

    let values = admin.apps(&group_id).app(&app_id).values();
    values.create(&json!({"name": "greeting", "value": "hello"})).await?;
    println!("Values: \n{:#}", values.list().await?.into_json()?);

    admin.apps(&group_id).app(&app_id).remove().await?;

    admin.logout().await?;
    Ok(())
}
