//! Session commands

use super::{user_error, Context};
use anyhow::{anyhow, Result};
use bookstore_core::types::{ChangePasswordRequest, RegisterClientRequest};
use bookstore_core::Role;
use serde_json::json;

/// Log in and persist the session
pub async fn login(ctx: &Context, email: &str, password: &str, role: &str) -> Result<()> {
    let role: Role = role.parse()?;
    let user = ctx
        .bookstore
        .auth()
        .login(email, password, role)
        .await
        .map_err(|e| {
            if e.is_unauthorized() {
                anyhow!("Invalid email, password or role")
            } else {
                user_error(e)
            }
        })?;

    if ctx.json {
        return ctx.print_json(&json!({"email": user.email, "role": role}));
    }
    println!("Logged in as {} ({})", user.email, role);
    Ok(())
}

/// Log out; the local session is cleared even if the server is unreachable
pub async fn logout(ctx: &Context) -> Result<()> {
    ctx.bookstore.auth().logout().await.map_err(user_error)?;
    println!("Logged out");
    Ok(())
}

/// Show the stored identity without contacting the server
pub async fn whoami(ctx: &Context) -> Result<()> {
    let current = ctx.bookstore.auth().current_user().await?;

    if ctx.json {
        let value = match &current {
            Some((user, role)) => json!({"email": user.email, "name": user.name, "role": role}),
            None => serde_json::Value::Null,
        };
        return ctx.print_json(&value);
    }

    match current {
        Some((user, role)) => match &user.name {
            Some(name) => println!("{} <{}> ({})", name, user.email, role),
            None => println!("{} ({})", user.email, role),
        },
        None => println!("Not logged in"),
    }
    Ok(())
}

pub async fn register(
    ctx: &Context,
    email: String,
    password: String,
    name: String,
    phone: Option<String>,
    address: Option<String>,
) -> Result<()> {
    let request = RegisterClientRequest {
        email,
        password,
        name,
        phone,
        address,
    };
    ctx.bookstore
        .auth()
        .register_client(&request)
        .await
        .map_err(user_error)?;
    println!("Registered {}", request.email);
    Ok(())
}

pub async fn forgot_password(ctx: &Context, email: &str) -> Result<()> {
    ctx.bookstore
        .auth()
        .forgot_password(email)
        .await
        .map_err(user_error)?;
    println!("If {} has an account, a reset code is on its way", email);
    Ok(())
}

pub async fn reset_password(
    ctx: &Context,
    email: String,
    reset_code: String,
    new_password: String,
) -> Result<()> {
    let request = ChangePasswordRequest {
        email,
        reset_code,
        new_password,
    };
    ctx.bookstore
        .auth()
        .change_password(&request)
        .await
        .map_err(user_error)?;
    println!("Password changed for {}", request.email);
    Ok(())
}
