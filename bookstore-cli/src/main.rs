//! Bookstore CLI - Command-line client for the bookstore backend

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bookstore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Backend base address (defaults to BOOKSTORE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file (defaults to BOOKSTORE_SESSION_PATH or the user data directory)
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        email: String,

        #[arg(short, long)]
        password: String,

        /// client or employee
        #[arg(short, long, default_value = "client")]
        role: String,
    },

    /// Log out and clear the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Create a customer account
    Register {
        email: String,

        #[arg(short, long)]
        password: String,

        #[arg(short, long)]
        name: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },

    /// Request a password reset code by mail
    ForgotPassword { email: String },

    /// Set a new password using a reset code
    ResetPassword {
        email: String,

        #[arg(short, long)]
        code: String,

        #[arg(short, long)]
        password: String,
    },

    /// Browse and manage the catalog
    #[command(subcommand)]
    Books(BooksCommand),

    /// List, place and assign orders
    #[command(subcommand)]
    Orders(OrdersCommand),

    /// Manage customer accounts
    #[command(subcommand)]
    Clients(ClientsCommand),

    /// Manage staff accounts
    #[command(subcommand)]
    Employees(EmployeesCommand),
}

/// Page and sort selection shared by every listing
#[derive(Args)]
struct Paging {
    /// Sort option label, see the sort-options subcommands
    #[arg(short, long)]
    sort: Option<String>,

    /// 1-based page number
    #[arg(long, default_value = "1")]
    page: String,
}

#[derive(Subcommand)]
enum BooksCommand {
    /// Search the catalog
    Search {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        genre: Option<String>,

        #[arg(long)]
        language: Option<String>,

        #[arg(long)]
        min_price: Option<String>,

        #[arg(long)]
        max_price: Option<String>,

        #[command(flatten)]
        paging: Paging,
    },

    /// Show one book
    Show { name: String },

    /// Delete a book
    Delete { name: String },

    /// List the sort option labels
    SortOptions,
}

#[derive(Subcommand)]
enum OrdersCommand {
    /// List orders, optionally for one customer or staff member
    List {
        #[arg(long, conflicts_with = "employee")]
        client: Option<String>,

        #[arg(long)]
        employee: Option<String>,

        #[command(flatten)]
        paging: Paging,
    },

    /// Place an order; items are given as NAME:QUANTITY
    Place {
        #[arg(long)]
        client: String,

        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Hand an order to a staff member
    Assign { order_id: i64, employee: String },
}

#[derive(Subcommand)]
enum ClientsCommand {
    /// List customer accounts
    List {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Only blocked accounts
        #[arg(long)]
        blocked: bool,

        #[command(flatten)]
        paging: Paging,
    },

    /// Show one customer
    Show { email: String },

    /// Block a customer
    Block { email: String },

    /// Unblock a customer
    Unblock { email: String },
}

#[derive(Subcommand)]
enum EmployeesCommand {
    /// List staff accounts
    List {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[command(flatten)]
        paging: Paging,
    },

    /// Show one staff member
    Show { email: String },

    /// Delete a staff account
    Delete { email: String },
}

impl Paging {
    fn pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("sort", self.sort.clone()),
            ("page", Some(self.page.clone())),
        ]
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "bookstore_cli=debug,bookstore_client=debug,bookstore_core=debug"
    } else {
        "bookstore_cli=warn,bookstore_client=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = commands::Context::connect(cli.api_url, cli.session_file, cli.json).await?;

    match cli.command {
        Commands::Login {
            email,
            password,
            role,
        } => commands::login(&ctx, &email, &password, &role).await,

        Commands::Logout => commands::logout(&ctx).await,

        Commands::Whoami => commands::whoami(&ctx).await,

        Commands::Register {
            email,
            password,
            name,
            phone,
            address,
        } => commands::register(&ctx, email, password, name, phone, address).await,

        Commands::ForgotPassword { email } => commands::forgot_password(&ctx, &email).await,

        Commands::ResetPassword {
            email,
            code,
            password,
        } => commands::reset_password(&ctx, email, code, password).await,

        Commands::Books(command) => match command {
            BooksCommand::Search {
                name,
                author,
                genre,
                language,
                min_price,
                max_price,
                paging,
            } => {
                let mut filters = vec![
                    ("name", name),
                    ("author", author),
                    ("genre", genre),
                    ("language", language),
                    ("minPrice", min_price),
                    ("maxPrice", max_price),
                ];
                filters.extend(paging.pairs());
                commands::search_books(&ctx, commands::query(filters)).await
            }
            BooksCommand::Show { name } => commands::show_book(&ctx, &name).await,
            BooksCommand::Delete { name } => commands::delete_book(&ctx, &name).await,
            BooksCommand::SortOptions => {
                commands::sort_options(&bookstore_core::types::book_sort_options());
                Ok(())
            }
        },

        Commands::Orders(command) => match command {
            OrdersCommand::List {
                client,
                employee,
                paging,
            } => commands::list_orders(&ctx, client, employee, commands::query(paging.pairs())).await,
            OrdersCommand::Place { client, items } => {
                commands::place_order(&ctx, &client, &items).await
            }
            OrdersCommand::Assign { order_id, employee } => {
                commands::assign_order(&ctx, order_id, &employee).await
            }
        },

        Commands::Clients(command) => match command {
            ClientsCommand::List {
                name,
                email,
                blocked,
                paging,
            } => {
                let mut filters = vec![("name", name), ("email", email)];
                filters.extend(paging.pairs());
                commands::list_clients(&ctx, blocked, commands::query(filters)).await
            }
            ClientsCommand::Show { email } => commands::show_client(&ctx, &email).await,
            ClientsCommand::Block { email } => commands::block_client(&ctx, &email).await,
            ClientsCommand::Unblock { email } => commands::unblock_client(&ctx, &email).await,
        },

        Commands::Employees(command) => match command {
            EmployeesCommand::List {
                name,
                email,
                paging,
            } => {
                let mut filters = vec![("name", name), ("email", email)];
                filters.extend(paging.pairs());
                commands::list_employees(&ctx, commands::query(filters)).await
            }
            EmployeesCommand::Show { email } => commands::show_employee(&ctx, &email).await,
            EmployeesCommand::Delete { email } => commands::delete_employee(&ctx, &email).await,
        },
    }
}
