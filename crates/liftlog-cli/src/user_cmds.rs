//! `liftlog user` subcommand handlers.

use anyhow::Result;
use sqlx::SqlitePool;

use liftlog_core::user;

use crate::UserCommands;

/// Dispatch a `UserCommands` variant to the appropriate handler.
pub async fn run_user_command(command: UserCommands, pool: &SqlitePool) -> Result<()> {
    match command {
        UserCommands::Create {
            username,
            email,
            password_hash,
        } => cmd_create(pool, &username, &email, &password_hash).await,
        UserCommands::Show { user_id } => cmd_show(pool, user_id).await,
        UserCommands::Delete { user_id } => cmd_delete(pool, user_id).await,
    }
}

async fn cmd_create(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<()> {
    let created = user::create_user(pool, username, email, password_hash).await?;
    println!("User created.");
    println!("  ID:       {}", created.id);
    println!("  Username: {}", created.username);
    println!("  Email:    {}", created.email);
    Ok(())
}

async fn cmd_show(pool: &SqlitePool, user_id: i64) -> Result<()> {
    let found = user::get_user(pool, user_id).await?;
    println!("User {} ({})", found.username, found.id);
    println!("  Email:   {}", found.email);
    println!(
        "  Created: {}",
        found.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    Ok(())
}

async fn cmd_delete(pool: &SqlitePool, user_id: i64) -> Result<()> {
    user::delete_user(pool, user_id).await?;
    println!("User {user_id} deleted, along with all owned data.");
    Ok(())
}
