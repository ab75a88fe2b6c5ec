//! # Repository Module
//!
//! Database repository implementations for Cono Orders.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.   │
//! │                                                                         │
//! │  HTTP Handler                                                           │
//! │       │                                                                 │
//! │       │  db.orders().get_by_id(7)                                       │
//! │       ▼                                                                 │
//! │  OrderRepository                                                        │
//! │  ├── insert(&self, new_order)                                           │
//! │  ├── get_by_id(&self, id)                                               │
//! │  ├── list(&self)                                                        │
//! │  ├── update(&self, order)                                               │
//! │  └── delete(&self, id)                                                  │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                         │
//! │  • SQL is isolated in one place                                         │
//! │  • Handlers stay free of persistence details                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`OrderRepository`](order::OrderRepository) - Cone order CRUD

pub mod order;
