//! Customer and staff account commands

use super::{run_search, user_error, Context};
use anyhow::Result;
use bookstore_client::ClientListing;
use bookstore_core::{Client, Employee, QueryParams};

fn client_line(client: &Client) -> String {
    let status = if client.blocked { "blocked" } else { "" };
    format!("{:<32} {:<28} {}", client.email, client.name, status)
}

fn employee_line(employee: &Employee) -> String {
    format!(
        "{:<32} {:<28} {}",
        employee.email,
        employee.name,
        employee.phone.as_deref().unwrap_or("")
    )
}

pub async fn list_clients(ctx: &Context, blocked: bool, params: QueryParams) -> Result<()> {
    let listing = if blocked {
        ClientListing::Blocked
    } else {
        ClientListing::All
    };
    let controller = ctx.bookstore.client_search(listing);
    run_search(ctx, controller, &params, client_line).await
}

pub async fn show_client(ctx: &Context, email: &str) -> Result<()> {
    let client = ctx.bookstore.clients().get(email).await.map_err(user_error)?;
    if ctx.json {
        return ctx.print_json(&client);
    }

    println!("Email:   {}", client.email);
    println!("Name:    {}", client.name);
    if let Some(phone) = &client.phone {
        println!("Phone:   {}", phone);
    }
    if let Some(address) = &client.address {
        println!("Address: {}", address);
    }
    if let Some(balance) = client.balance {
        println!("Balance: {:.2}", balance);
    }
    println!("Blocked: {}", if client.blocked { "yes" } else { "no" });
    Ok(())
}

pub async fn block_client(ctx: &Context, email: &str) -> Result<()> {
    ctx.bookstore.clients().block(email).await.map_err(user_error)?;
    println!("Blocked {}", email);
    Ok(())
}

pub async fn unblock_client(ctx: &Context, email: &str) -> Result<()> {
    ctx.bookstore
        .clients()
        .unblock(email)
        .await
        .map_err(user_error)?;
    println!("Unblocked {}", email);
    Ok(())
}

pub async fn list_employees(ctx: &Context, params: QueryParams) -> Result<()> {
    let controller = ctx.bookstore.employee_search();
    run_search(ctx, controller, &params, employee_line).await
}

pub async fn show_employee(ctx: &Context, email: &str) -> Result<()> {
    let employee = ctx
        .bookstore
        .employees()
        .get(email)
        .await
        .map_err(user_error)?;
    if ctx.json {
        return ctx.print_json(&employee);
    }

    println!("Email:      {}", employee.email);
    println!("Name:       {}", employee.name);
    if let Some(phone) = &employee.phone {
        println!("Phone:      {}", phone);
    }
    if let Some(birth_date) = &employee.birth_date {
        println!("Birth date: {}", birth_date);
    }
    Ok(())
}

pub async fn delete_employee(ctx: &Context, email: &str) -> Result<()> {
    ctx.bookstore
        .employees()
        .delete(email)
        .await
        .map_err(user_error)?;
    println!("Deleted {}", email);
    Ok(())
}
