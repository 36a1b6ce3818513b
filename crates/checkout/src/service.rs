//! Order placement.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use thiserror::Error;

use storefront_cart::CartStore;
use storefront_core::{DomainError, OrderId};
use storefront_state::{Notifier, StateCell, Subscription};
use storefront_storage::{KeyValueStore, StorageKey};

use crate::form::CheckoutForm;
use crate::payment::{CustomField, PaymentGateway, PaymentOutcome, PaymentRequest};

pub const FORM_INVALID_MESSAGE: &str = "Please fill in all required fields";
pub const EMPTY_CART_MESSAGE: &str = "Cart is empty";
pub const INVALID_AMOUNT_MESSAGE: &str = "Invalid amount for payment";
pub const PAYMENT_CANCELLED_MESSAGE: &str = "Payment cancelled";
pub const PAYMENT_SUCCESS_MESSAGE: &str = "Payment successful! Order placed.";

/// Checkout rejected before the payment widget was opened.
///
/// No state is changed when one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("invalid checkout form: {0}")]
    InvalidForm(DomainError),

    #[error("cart is empty")]
    EmptyCart,

    #[error("invalid payment amount: {0}")]
    InvalidAmount(DomainError),

    #[error("a checkout is already in progress")]
    AlreadyProcessing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Completed { order_id: OrderId, reference: String },
    Cancelled,
}

/// Drives one checkout at a time against a [`PaymentGateway`].
#[derive(Debug)]
pub struct CheckoutService {
    cart: Arc<CartStore>,
    kv: KeyValueStore,
    notifier: Arc<Notifier>,
    currency: String,
    in_flight: AtomicBool,
    processing: StateCell<bool>,
}

impl CheckoutService {
    pub fn new(
        cart: Arc<CartStore>,
        kv: KeyValueStore,
        notifier: Arc<Notifier>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            cart,
            kv,
            notifier,
            currency: currency.into(),
            in_flight: AtomicBool::new(false),
            processing: StateCell::new(false),
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// True while the payment widget is open.
    pub fn is_processing(&self) -> bool {
        self.processing.get()
    }

    pub fn subscribe_processing(&self) -> Subscription<bool> {
        self.processing.subscribe()
    }

    /// Identifier of the last successfully paid order, if any.
    pub fn last_order_id(&self) -> Option<OrderId> {
        self.kv.get(StorageKey::LastOrderId)
    }

    /// Validate, open the payment widget for the cart total, and settle the
    /// outcome.
    ///
    /// The cart is cleared and the order id persisted only on success. Every
    /// path reports a toast.
    pub async fn place_order<G>(
        &self,
        form: &CheckoutForm,
        gateway: &G,
    ) -> Result<CheckoutOutcome, CheckoutError>
    where
        G: PaymentGateway + ?Sized,
    {
        if let Err(err) = form.validate() {
            tracing::debug!("checkout form rejected: {err}");
            self.notifier.error(FORM_INVALID_MESSAGE);
            return Err(CheckoutError::InvalidForm(err));
        }

        let cart = self.cart.cart();
        if cart.is_empty() {
            self.notifier.error(EMPTY_CART_MESSAGE);
            return Err(CheckoutError::EmptyCart);
        }

        let request = match PaymentRequest::new(
            cart.total(),
            self.currency.clone(),
            form.email.trim(),
            metadata(form),
        ) {
            Ok(request) => request,
            Err(err) => {
                self.notifier.error(INVALID_AMOUNT_MESSAGE);
                return Err(CheckoutError::InvalidAmount(err));
            }
        };

        if self.in_flight.swap(true, Ordering::SeqCst) {
            tracing::warn!("checkout requested while another is in progress");
            return Err(CheckoutError::AlreadyProcessing);
        }
        let _attempt = PaymentAttempt::begin(self);

        tracing::info!(
            amount = request.amount().minor(),
            currency = %request.currency(),
            lines = cart.items().len(),
            "opening payment"
        );
        let outcome = gateway.collect(request).await;

        let result = match outcome {
            PaymentOutcome::Success(receipt) => {
                let order_id = OrderId::generate(Utc::now());
                self.kv.set(StorageKey::LastOrderId, &order_id);
                self.cart.clear_cart();
                tracing::info!(order_id = %order_id, reference = %receipt.reference, status = %receipt.status, "order placed");
                self.notifier.success(PAYMENT_SUCCESS_MESSAGE);
                CheckoutOutcome::Completed {
                    order_id,
                    reference: receipt.reference,
                }
            }
            PaymentOutcome::Cancelled => {
                tracing::info!("payment cancelled by buyer");
                self.notifier.error(PAYMENT_CANCELLED_MESSAGE);
                CheckoutOutcome::Cancelled
            }
        };

        Ok(result)
    }
}

/// Holds the in-progress flags for one payment attempt.
///
/// Dropping it ends the attempt, including when the `place_order` future is
/// dropped while the gateway is still open.
struct PaymentAttempt<'a> {
    service: &'a CheckoutService,
}

impl<'a> PaymentAttempt<'a> {
    /// Caller must have claimed `in_flight` already.
    fn begin(service: &'a CheckoutService) -> Self {
        service.processing.set(true);
        Self { service }
    }
}

impl Drop for PaymentAttempt<'_> {
    fn drop(&mut self) {
        self.service.processing.set(false);
        self.service.in_flight.store(false, Ordering::SeqCst);
    }
}

fn metadata(form: &CheckoutForm) -> Vec<CustomField> {
    let phone = form
        .phone
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or("N/A");

    vec![
        CustomField::new("Customer Name", "customer_name", form.customer_name()),
        CustomField::new("Phone", "phone", phone),
        CustomField::new("Address", "address", form.address.trim()),
    ]
}
