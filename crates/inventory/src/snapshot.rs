//! Location-scoped stock snapshot cache.
//!
//! The cache holds on-hand quantities for exactly one location at a time.
//! Selecting a different location clears the cache *synchronously*, before
//! the replacement fetch is even issued, so draft validation can never read
//! the previous location's numbers.
//!
//! Refreshes are tokenized: `begin_refresh` hands out a generation ticket and
//! `complete_refresh` applies rows only when the ticket is still the latest.
//! A slow response for a superseded location resolves as a discarded no-op
//! instead of silently re-applying stale quantities.

use std::collections::HashMap;

use stockdesk_core::{LocationId, ProductId};

use crate::level::StockLevel;

/// Ticket identifying one refresh attempt. Obtained from
/// [`StockSnapshot::begin_refresh`]; redeemed by
/// [`StockSnapshot::complete_refresh`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RefreshTicket {
    location_id: LocationId,
    generation: u64,
}

impl RefreshTicket {
    pub fn location_id(&self) -> LocationId {
        self.location_id
    }
}

/// Cached on-hand quantities for the currently selected location.
#[derive(Debug, Default)]
pub struct StockSnapshot {
    location_id: Option<LocationId>,
    quantities: HashMap<ProductId, u32>,
    generation: u64,
    populated: bool,
}

impl StockSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location the cached quantities belong to, if any.
    pub fn location_id(&self) -> Option<LocationId> {
        self.location_id
    }

    /// Whether the latest refresh for the current location has landed.
    pub fn is_ready(&self) -> bool {
        self.populated
    }

    /// On-hand quantity for a product at the selected location.
    ///
    /// Products absent from the snapshot are out of stock (0), not unknown.
    /// The same applies while a refresh is still in flight.
    pub fn available_quantity(&self, product_id: ProductId) -> u32 {
        self.quantities.get(&product_id).copied().unwrap_or(0)
    }

    /// Start a refresh for `location_id`.
    ///
    /// Clears all cached quantities immediately and invalidates every ticket
    /// issued earlier, whether for this location or another one.
    pub fn begin_refresh(&mut self, location_id: LocationId) -> RefreshTicket {
        self.location_id = Some(location_id);
        self.quantities.clear();
        self.populated = false;
        self.generation += 1;

        RefreshTicket {
            location_id,
            generation: self.generation,
        }
    }

    /// Apply fetched rows for the refresh identified by `ticket`.
    ///
    /// Returns `true` when the rows were applied. A stale ticket (superseded
    /// by a later `begin_refresh`) is discarded and logged. Rows for other
    /// locations within an applied batch are skipped; the endpoint is keyed
    /// by location but the row shape still carries the id.
    pub fn complete_refresh(&mut self, ticket: RefreshTicket, rows: &[StockLevel]) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                location = %ticket.location_id,
                stale_generation = ticket.generation,
                current_generation = self.generation,
                "discarding stale stock snapshot response"
            );
            return false;
        }

        for row in rows {
            if row.location_id != ticket.location_id {
                tracing::warn!(
                    expected = %ticket.location_id,
                    got = %row.location_id,
                    product = %row.product_id,
                    "stock row for foreign location in snapshot response"
                );
                continue;
            }
            self.quantities.insert(row.product_id, row.quantity_on_hand);
        }

        self.populated = true;
        true
    }

    /// Forget everything (e.g. the owning form closed).
    pub fn clear(&mut self) {
        self.location_id = None;
        self.quantities.clear();
        self.populated = false;
        self.generation += 1;
    }
}
