pub mod admin;
pub mod auth;
pub mod checkout;
pub mod customer;
pub mod dashboard;
pub mod document;
pub mod registration;
