//! LoanDesk Backend Library
//!
//! Loan application intake and review: a record store, a status state
//! machine, portfolio statistics and per-application risk scoring, served
//! over a JSON API.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod loan;
pub mod loan_service;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
