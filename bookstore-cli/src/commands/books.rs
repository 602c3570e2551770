//! Catalog commands

use super::{run_search, user_error, Context};
use anyhow::Result;
use bookstore_core::{Book, QueryParams};

fn book_line(book: &Book) -> String {
    let year = book
        .publication_year
        .map(|y| format!(" ({})", y))
        .unwrap_or_default();
    format!(
        "{:<40} {:<24} {:<12} {:>8.2}{}",
        book.name, book.author, book.genre, book.price, year
    )
}

pub async fn search_books(ctx: &Context, params: QueryParams) -> Result<()> {
    let controller = ctx.bookstore.book_search();
    run_search(ctx, controller, &params, book_line).await
}

pub async fn show_book(ctx: &Context, name: &str) -> Result<()> {
    let book = ctx.bookstore.books().get(name).await.map_err(user_error)?;
    if ctx.json {
        return ctx.print_json(&book);
    }

    println!("Name:        {}", book.name);
    println!("Author:      {}", book.author);
    println!("Genre:       {}", book.genre);
    println!("Price:       {:.2}", book.price);
    if let Some(language) = &book.language {
        println!("Language:    {}", language);
    }
    if let Some(year) = book.publication_year {
        println!("Published:   {}", year);
    }
    if let Some(pages) = book.pages {
        println!("Pages:       {}", pages);
    }
    if let Some(description) = &book.description {
        println!("Description: {}", description);
    }
    Ok(())
}

pub async fn delete_book(ctx: &Context, name: &str) -> Result<()> {
    ctx.bookstore.books().delete(name).await.map_err(user_error)?;
    println!("Deleted {}", name);
    Ok(())
}
