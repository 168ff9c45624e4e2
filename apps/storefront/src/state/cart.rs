//! # Cart Sessions
//!
//! One [`Cart`] per browser session, keyed by an opaque id handed out by
//! `POST /api/carts`.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Session Operations                              │
//! │                                                                         │
//! │  Shopper Action           Handler                 Cart Change           │
//! │  ──────────────           ───────                 ───────────           │
//! │                                                                         │
//! │  Open shop ──────────────► create_cart() ───────► sessions.insert()    │
//! │                                                                         │
//! │  Tap "Add" ──────────────► add_item() ──────────► cart.add_item()      │
//! │                                                                         │
//! │  Change quantity ────────► update_item() ───────► cart.update_quantity()│
//! │                                                                         │
//! │  Tap remove ─────────────► remove_item() ───────► cart.remove_item()   │
//! │                                                                         │
//! │  "Order via WhatsApp" ───► checkout() ──────────► (read only)          │
//! │                                                                         │
//! │  NOTE: every access takes the Mutex; closures never await.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use jobica_core::Cart;
use tracing::debug;

/// Carts untouched for this long are dropped.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Open carts kept at once.
pub const DEFAULT_MAX_CARTS: usize = 10_000;

#[derive(Debug)]
struct CartSession {
    cart: Cart,
    last_touched: Instant,
}

/// All open carts.
///
/// ## Eviction
/// Every read or write of a cart refreshes its last-touched time. A cart
/// idle for longer than the timeout reads as unknown and is dropped the
/// next time a cart is created. When `max_carts` carts are open, creating
/// another drops the least recently touched one.
#[derive(Debug)]
pub struct CartState {
    sessions: Mutex<HashMap<String, CartSession>>,
    idle_timeout: Duration,
    max_carts: usize,
}

impl Default for CartState {
    fn default() -> Self {
        Self::with_limits(DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_CARTS)
    }
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `max_carts` below 1 is treated as 1.
    pub fn with_limits(idle_timeout: Duration, max_carts: usize) -> Self {
        CartState {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
            max_carts: max_carts.max(1),
        }
    }

    /// Opens an empty cart and returns its id.
    pub fn create(&self) -> String {
        let now = Instant::now();
        let mut sessions = self.lock();
        self.evict_idle(&mut sessions, now);

        while sessions.len() >= self.max_carts {
            let Some(stalest) = sessions
                .iter()
                .min_by_key(|(_, session)| session.last_touched)
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            sessions.remove(&stalest);
            debug!(cart_id = %stalest, "Dropped stalest cart to make room");
        }

        let id = uuid::Uuid::new_v4().to_string();
        sessions.insert(
            id.clone(),
            CartSession {
                cart: Cart::new(),
                last_touched: now,
            },
        );
        id
    }

    /// Runs `f` with read access to a cart. `None` if the id is unknown.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = carts.with_cart(&id, |cart| CartTotals::from(cart));
    /// ```
    pub fn with_cart<F, R>(&self, id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&Cart) -> R,
    {
        let mut sessions = self.lock();
        self.touch(&mut sessions, id, Instant::now())
            .map(|cart| f(cart))
    }

    /// Runs `f` with write access to a cart. `None` if the id is unknown.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// carts.with_cart_mut(&id, |cart| cart.add_item(&calc, &product, 1).map(|_| ()))
    /// ```
    pub fn with_cart_mut<F, R>(&self, id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut sessions = self.lock();
        self.touch(&mut sessions, id, Instant::now()).map(f)
    }

    /// Drops a session. Returns whether it existed.
    pub fn remove(&self, id: &str) -> bool {
        self.lock().remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Refreshes a live cart and hands it out; an idle one is dropped.
    fn touch<'a>(
        &self,
        sessions: &'a mut HashMap<String, CartSession>,
        id: &str,
        now: Instant,
    ) -> Option<&'a mut Cart> {
        let idle = sessions
            .get(id)
            .is_some_and(|session| self.is_idle(session, now));
        if idle {
            sessions.remove(id);
            debug!(cart_id = %id, "Idle cart expired");
            return None;
        }

        let session = sessions.get_mut(id)?;
        session.last_touched = now;
        Some(&mut session.cart)
    }

    fn evict_idle(&self, sessions: &mut HashMap<String, CartSession>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, session| !self.is_idle(session, now));

        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, remaining = sessions.len(), "Evicted idle carts");
        }
    }

    fn is_idle(&self, session: &CartSession, now: Instant) -> bool {
        now.saturating_duration_since(session.last_touched) > self.idle_timeout
    }

    // A panic inside a closure leaves the map itself consistent, so a
    // poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CartSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jobica_core::{Money, PricingCalculator, Product, ProductInput, ProductUnit};

    fn rice() -> Product {
        let input = ProductInput {
            name: "Local Rice".to_string(),
            brand: None,
            category: "Grains & Foodstuff".to_string(),
            unit: ProductUnit::Bag,
            size: Some("50kg".to_string()),
            selling_price_kobo: 8_500_000,
            row_price_kobo: None,
            half_row_price_kobo: None,
            price_per_unit_kobo: None,
            cost_price_kobo: None,
            image_url: None,
            tags: vec![],
            notes: None,
        };
        Product::from_input("rice", input, Utc::now())
    }

    #[test]
    fn test_sessions_are_independent() {
        let state = CartState::new();
        let calc = PricingCalculator::default();
        let a = state.create();
        let b = state.create();
        assert_ne!(a, b);

        state
            .with_cart_mut(&a, |cart| cart.add_item(&calc, &rice(), 2).map(|_| ()))
            .unwrap()
            .unwrap();

        assert_eq!(
            state.with_cart(&a, |cart| cart.total()),
            Some(Money::from_naira(170_000))
        );
        assert_eq!(state.with_cart(&b, |cart| cart.is_empty()), Some(true));
    }

    #[test]
    fn test_unknown_session() {
        let state = CartState::new();

        assert!(state.with_cart("missing", |cart| cart.total()).is_none());
        assert!(state.with_cart_mut("missing", |cart| cart.clear()).is_none());
        assert!(!state.remove("missing"));
    }

    #[test]
    fn test_idle_carts_expire_and_are_evicted() {
        let state = CartState::with_limits(Duration::from_millis(20), 100);
        let stale = state.create();
        let also_stale = state.create();

        std::thread::sleep(Duration::from_millis(40));
        assert!(state.with_cart(&stale, |_| ()).is_none());
        assert_eq!(state.len(), 1);

        let fresh = state.create();
        assert_eq!(state.len(), 1);
        assert!(state.with_cart(&also_stale, |_| ()).is_none());
        assert_eq!(state.with_cart(&fresh, |cart| cart.is_empty()), Some(true));
    }

    #[test]
    fn test_touching_a_cart_keeps_it_alive() {
        let state = CartState::with_limits(Duration::from_millis(200), 100);
        let id = state.create();

        for _ in 0..4 {
            std::thread::sleep(Duration::from_millis(80));
            assert!(state.with_cart_mut(&id, |cart| cart.clear()).is_some());
        }
    }

    #[test]
    fn test_creating_past_the_cap_drops_the_stalest_cart() {
        let state = CartState::with_limits(DEFAULT_IDLE_TIMEOUT, 2);
        let first = state.create();
        std::thread::sleep(Duration::from_millis(2));
        let second = state.create();
        std::thread::sleep(Duration::from_millis(2));

        // Reading the first cart makes the second one the stalest.
        assert!(state.with_cart(&first, |_| ()).is_some());
        std::thread::sleep(Duration::from_millis(2));

        let third = state.create();
        assert_eq!(state.len(), 2);
        assert!(state.with_cart(&second, |_| ()).is_none());
        assert!(state.with_cart(&first, |_| ()).is_some());
        assert!(state.with_cart(&third, |_| ()).is_some());
    }

    #[test]
    fn test_remove_drops_session() {
        let state = CartState::new();
        let id = state.create();
        assert_eq!(state.len(), 1);

        assert!(state.remove(&id));
        assert!(state.is_empty());
        assert!(state.with_cart(&id, |_| ()).is_none());
    }
}
