//! Document factory and the seeded generator that drives it.

use crate::generators::items::{draw_items, totals};
use crate::generators::timestamp::{payment_timestamp, sale_timestamp};
use crate::generators::uuid::random_id;
use chrono::{Local, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use retail_types::{Basket, Payment, RunConfig, SeedCatalog};

/// Highest terminal point number assigned to a basket.
pub const MAX_TERMINAL_POINT: u8 = 20;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// A seed sequence has nothing to draw from
    #[error("Seed catalog has no {0}")]
    EmptyCatalog(&'static str),

    /// The configured fixed store index is past the end of the store list
    #[error("Store index {index} out of range (catalog has {len} stores)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Builds one consistent (Basket, Payment) pair per call.
///
/// The factory borrows the catalog and configuration and keeps no state of
/// its own: the same inputs and RNG state always yield the same pair.
#[derive(Debug, Clone, Copy)]
pub struct DocumentFactory<'a> {
    catalog: &'a SeedCatalog,
    config: &'a RunConfig,
}

impl<'a> DocumentFactory<'a> {
    pub fn new(catalog: &'a SeedCatalog, config: &'a RunConfig) -> Self {
        Self { catalog, config }
    }

    /// Generate a pair stamped with the current local time.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<(Basket, Payment), GeneratorError> {
        self.generate_at(rng, Local::now().naive_local())
    }

    /// Generate a pair as if the sale happened at `now`.
    pub fn generate_at<R: Rng>(
        &self,
        rng: &mut R,
        now: NaiveDateTime,
    ) -> Result<(Basket, Payment), GeneratorError> {
        let catalog = self.catalog;
        let config = self.config;

        if catalog.stores.is_empty() {
            return Err(GeneratorError::EmptyCatalog("stores"));
        }
        if catalog.clerks.is_empty() {
            return Err(GeneratorError::EmptyCatalog("clerks"));
        }
        if catalog.products.is_empty() {
            return Err(GeneratorError::EmptyCatalog("products"));
        }

        // Index 0 doubles as "random", so the first store can never be pinned.
        let store = if config.fixed_store_index == 0 {
            &catalog.stores[rng.gen_range(0..catalog.stores.len())]
        } else {
            catalog
                .stores
                .get(config.fixed_store_index)
                .ok_or(GeneratorError::IndexOutOfRange {
                    index: config.fixed_store_index,
                    len: catalog.stores.len(),
                })?
        };

        let clerk = &catalog.clerks[rng.gen_range(0..catalog.clerks.len())];

        let items = draw_items(
            rng,
            &catalog.products,
            config.max_items_per_basket,
            config.max_quantity,
        );
        let amounts = totals(&items, config.vat_rate);

        let invoice_number = random_id(rng).to_string();
        let terminal_point = rng.gen_range(0..=MAX_TERMINAL_POINT);

        let basket = Basket {
            invoice_number: invoice_number.clone(),
            sale_timestamp: sale_timestamp(now, &config.time_offset),
            store: store.clone(),
            clerk: clerk.clone(),
            terminal_point,
            items,
            nett: amounts.nett,
            vat: amounts.vat,
            total: amounts.total,
        };

        let payment = Payment {
            invoice_number,
            pay_timestamp: payment_timestamp(rng, now, &config.time_offset),
            paid_amount: amounts.total,
            financial_transaction_id: random_id(rng).to_string(),
        };

        Ok((basket, payment))
    }
}

/// Generator that owns a seeded RNG and counts the pairs it has produced.
pub struct DocumentGenerator<'a> {
    factory: DocumentFactory<'a>,
    /// Seeded random number generator for reproducibility
    rng: StdRng,
    /// Number of pairs generated so far
    index: u64,
}

impl<'a> DocumentGenerator<'a> {
    /// Create a new generator with the given catalog, configuration and seed.
    pub fn new(catalog: &'a SeedCatalog, config: &'a RunConfig, seed: u64) -> Self {
        Self {
            factory: DocumentFactory::new(catalog, config),
            rng: StdRng::seed_from_u64(seed),
            index: 0,
        }
    }

    /// Generate the next pair stamped with the current local time.
    pub fn next_pair(&mut self) -> Result<(Basket, Payment), GeneratorError> {
        self.next_pair_at(Local::now().naive_local())
    }

    /// Generate the next pair as if the sale happened at `now`.
    pub fn next_pair_at(&mut self, now: NaiveDateTime) -> Result<(Basket, Payment), GeneratorError> {
        let pair = self.factory.generate_at(&mut self.rng, now)?;
        self.index += 1;
        Ok(pair)
    }

    /// Get the number of pairs generated so far.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    pub fn factory(&self) -> &DocumentFactory<'a> {
        &self.factory
    }
}
