//! Core business logic for Tally.
//!
//! This crate contains pure bookkeeping logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here.
//!
//! # Modules
//!
//! - `account` - Chart of accounts types and normal-balance arithmetic
//! - `auth` - Actor roles crossing the engine boundary
//! - `fiscal` - Financial period keys and lock rules
//! - `ledger` - Double-entry journal/ledger types, validation, reversals
//! - `postings` - Derived posting line builders (invoice, payroll, ...)

pub mod account;
pub mod auth;
pub mod fiscal;
pub mod ledger;
pub mod postings;
