//! Competition place booking over club-held points, with JSON document
//! persistence.
//!
//! # Examples
//!
//! In-memory usage with [`engine::BookingEngine`]:
//! ```
//! use chrono::NaiveDateTime;
//! use clubbook::{
//!     booking::BookingOutcome,
//!     core::store::EntityStore,
//!     engine::BookingEngine,
//!     entity::{Club, Competition},
//! };
//!
//! let store = EntityStore::from_collections(
//!     vec![Club {
//!         name: "Iron Temple".to_string(),
//!         email: "admin@irontemple.com".to_string(),
//!         points: "10".to_string(),
//!     }],
//!     vec![Competition {
//!         name: "Spring Festival".to_string(),
//!         date: "2030-03-27 10:00:00".to_string(),
//!         number_of_places: "25".to_string(),
//!     }],
//! );
//! let mut engine = BookingEngine::new(store);
//! let now = NaiveDateTime::parse_from_str("2024-06-01 12:00:00", "%Y-%m-%d %H:%M:%S")
//!     .expect("now");
//! let outcome = engine.attempt_booking("Spring Festival", "Iron Temple", "5", now);
//! assert!(matches!(outcome, BookingOutcome::Committed { places: 5, .. }));
//! ```
//!
//! Runtime usage over JSON document storage:
//! ```no_run
//! use clubbook::{
//!     engine::BookingEngine,
//!     persist::json::JsonFileStorage,
//!     runtime::handle::{spawn_booking, RuntimeConfig},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let storage = Box::new(JsonFileStorage::open("clubs.json", "competitions.json"));
//! let engine = BookingEngine::open(storage).expect("load collections");
//! let handle = spawn_booking(engine, RuntimeConfig::default());
//! let outcome = handle
//!     .attempt_booking("Spring Festival", "Iron Temple", "3")
//!     .await
//!     .expect("booking");
//! println!("{outcome:?}");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Booking decision and outcome value types.
pub mod booking;
/// In-memory entity store and index helpers.
pub mod core;
/// Lookup, admission, and commit engine.
pub mod engine;
/// Club and Competition domain records.
pub mod entity;
/// Persistence abstraction and JSON document implementation.
pub mod persist;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Shared primitive types and constants.
pub mod types;
