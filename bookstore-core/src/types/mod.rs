//! Resource types exchanged with the bookstore backend

mod account;
mod auth;
mod basket;
mod book;
mod order;

pub use account::{
    account_sort_options, Client, ClientUpdate, Employee, EmployeeUpdate, NewEmployee, Role,
    UserProfile, ACCOUNT_FILTER_KEYS,
};
pub use auth::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse,
    RefreshTokenRequest, RegisterClientRequest, SessionCredentials, TokenRefreshResponse,
};
pub use basket::{Basket, BasketLine};
pub use book::{book_sort_options, Book, BookSearch, BOOK_FILTER_KEYS};
pub use order::{
    order_sort_options, BookItem, NewOrder, Order, OrderAssignment, ORDER_FILTER_KEYS,
};
