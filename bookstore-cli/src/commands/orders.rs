//! Order commands

use super::{run_search, user_error, Context};
use anyhow::{anyhow, Result};
use bookstore_client::OrderScope;
use bookstore_core::{BookItem, NewOrder, Order, OrderAssignment, QueryParams};

fn order_line(order: &Order) -> String {
    let date = order
        .order_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    let assignee = order.employee_email.as_deref().unwrap_or("unassigned");
    format!(
        "#{:<6} {:<10} {:<28} {:>8.2}  {}",
        order.id, date, order.client_email, order.price, assignee
    )
}

/// Parse `NAME:QUANTITY`; the quantity defaults to 1
fn parse_item(raw: &str) -> Result<BookItem> {
    let (name, quantity) = match raw.rsplit_once(':') {
        Some((name, quantity)) => {
            let quantity = quantity
                .trim()
                .parse::<u32>()
                .map_err(|_| anyhow!("Invalid quantity in '{}'", raw))?;
            (name, quantity)
        }
        None => (raw, 1),
    };
    if name.trim().is_empty() {
        return Err(anyhow!("Missing book name in '{}'", raw));
    }
    Ok(BookItem {
        book_name: name.trim().to_string(),
        quantity,
    })
}

pub async fn list_orders(
    ctx: &Context,
    client: Option<String>,
    employee: Option<String>,
    params: QueryParams,
) -> Result<()> {
    let scope = match (client, employee) {
        (Some(email), _) => OrderScope::Client(email),
        (None, Some(email)) => OrderScope::Employee(email),
        (None, None) => OrderScope::All,
    };
    let controller = ctx.bookstore.order_search(scope);
    run_search(ctx, controller, &params, order_line).await
}

pub async fn place_order(ctx: &Context, client_email: &str, items: &[String]) -> Result<()> {
    let order = NewOrder {
        client_email: client_email.to_string(),
        book_items: items
            .iter()
            .map(|item| parse_item(item))
            .collect::<Result<Vec<_>>>()?,
    };
    ctx.bookstore
        .orders()
        .place(&order)
        .await
        .map_err(user_error)?;
    println!(
        "Order placed for {} ({} titles)",
        order.client_email,
        order.book_items.len()
    );
    Ok(())
}

pub async fn assign_order(ctx: &Context, order_id: i64, employee_email: &str) -> Result<()> {
    let assignment = OrderAssignment {
        order_id,
        employee_email: employee_email.to_string(),
    };
    ctx.bookstore
        .orders()
        .assign(&assignment)
        .await
        .map_err(user_error)?;
    println!("Order #{} assigned to {}", order_id, employee_email);
    Ok(())
}
