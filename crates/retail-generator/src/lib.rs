//! Document generator for the retail-loadgen framework.
//!
//! This crate provides the `DocumentFactory` which builds one referentially
//! consistent (Basket, Payment) pair per call from a seed catalog, and the
//! `DocumentGenerator` which owns a seeded RNG so that a run can be
//! reproduced from its seed.
//!
//! # Architecture
//!
//! ```text
//! SeedCatalog + RunConfig
//!        │
//!        ▼
//! ┌───────────────────┐
//! │ DocumentGenerator │
//! │                   │
//! │  - rng (StdRng)   │
//! │  - index          │
//! │  - factory ───────┼──► DocumentFactory::generate_at(rng, now)
//! └─────────┬─────────┘
//!           │
//!           ▼
//!    (Basket, Payment)
//! ```
//!
//! # Example
//!
//! ```rust
//! use retail_generator::DocumentGenerator;
//! use retail_types::{Clerk, Product, RunConfig, SeedCatalog, Store};
//!
//! let catalog = SeedCatalog::new(
//!     vec![Store::new("1", "Store A")],
//!     vec![Clerk::new("1", "Clerk One")],
//!     vec![Product {
//!         id: "p1".to_string(),
//!         name: "Bread".to_string(),
//!         brand: "Albany".to_string(),
//!         category: "Bakery".to_string(),
//!         price: 10.0,
//!     }],
//! );
//! let config = RunConfig::default();
//!
//! let mut generator = DocumentGenerator::new(&catalog, &config, 42);
//! let (basket, payment) = generator.next_pair().unwrap();
//! assert_eq!(basket.invoice_number, payment.invoice_number);
//! ```

pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use generator::{DocumentFactory, DocumentGenerator, GeneratorError, MAX_TERMINAL_POINT};
pub use generators::timestamp::TIMESTAMP_FORMAT;
