//! Intent fulfillment.
//!
//! Routes a Dialogflow intent to its handler and produces the text the
//! chatbot replies with.
//!
//! | Intent                | Effect                                          |
//! |-----------------------|-------------------------------------------------|
//! | `add.product`         | Adds one cart line if the product is in stock   |
//! | `show.cart`           | Lists the session's cart lines                  |
//! | `purchase.complete`   | Moves every cart line into an order             |
//! | `product.information` | Describes one product                           |
//! | `product.inquiry`     | Lists the catalog                               |
//! | `product.recommend`   | Suggests a random product                       |
//!
//! Only `add.product` and `purchase.complete` write to the database.

mod error;
pub mod messages;

pub use error::FulfillmentError;

use tracing::{debug, info, instrument, warn};

use sales_chatbot_core::{Intent, SessionId};

use crate::db::Store;
use crate::models::{NewCartLine, ParameterError, Parameters};

/// Dialogflow parameter carrying the product entity.
pub const PRODUCT_PARAM: &str = "product";
/// Dialogflow parameter carrying the quantity (`@sys.number`).
pub const NUMBER_PARAM: &str = "number";

/// Intent fulfillment service.
///
/// Borrows a [`Store`] for the duration of one request.
pub struct FulfillmentService<'a, S> {
    store: &'a S,
}

impl<'a, S: Store> FulfillmentService<'a, S> {
    /// Create a new fulfillment service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Fulfill an intent by display name.
    ///
    /// Unknown intents get a generic reply instead of an error so the platform
    /// still has something to show.
    ///
    /// # Errors
    ///
    /// Returns `FulfillmentError::Parameter` if `add.product` lacks a product
    /// or a valid quantity.
    /// Returns `FulfillmentError::Repository` if storage fails.
    #[instrument(skip(self, parameters, session_id), fields(session_id = %session_id))]
    pub async fn fulfill(
        &self,
        intent_name: &str,
        parameters: &Parameters,
        session_id: &SessionId,
    ) -> Result<String, FulfillmentError> {
        let Ok(intent) = intent_name.parse::<Intent>() else {
            warn!(intent = intent_name, "Unsupported intent");
            return Ok(messages::UNSUPPORTED_INTENT.to_owned());
        };
        debug!(intent = intent.as_str(), mutating = intent.is_mutating(), "Dispatching intent");

        match intent {
            Intent::AddProduct => self.add_product(parameters, session_id).await,
            Intent::ShowCart => self.show_cart(session_id).await,
            Intent::PurchaseComplete => self.complete_purchase(session_id).await,
            Intent::ProductInformation => self.product_information(parameters).await,
            Intent::ProductInquiry => self.product_inquiry().await,
            Intent::ProductRecommend => self.recommend_product().await,
        }
    }

    /// `add.product`: add the first `product` in the first `number` quantity.
    ///
    /// # Errors
    ///
    /// Returns `FulfillmentError::Parameter` if the product or quantity is
    /// missing or invalid.
    /// Returns `FulfillmentError::Repository` if storage fails.
    pub async fn add_product(
        &self,
        parameters: &Parameters,
        session_id: &SessionId,
    ) -> Result<String, FulfillmentError> {
        let product_name = parameters
            .first_text(PRODUCT_PARAM)
            .ok_or_else(|| ParameterError::Missing(PRODUCT_PARAM.to_owned()))?;
        let quantity = parameters.first_quantity(NUMBER_PARAM)?;

        let Some(product) = self.store.find_product_by_name(product_name).await? else {
            info!(product = product_name, "Requested product not in catalog");
            return Ok(messages::not_carried(product_name));
        };

        if !product.is_in_stock() {
            info!(
                product = product_name,
                status = %product.availability_status,
                "Requested product out of stock"
            );
            return Ok(messages::out_of_stock(product_name));
        }

        let line = self
            .store
            .add_cart_line(NewCartLine {
                session_id: session_id.clone(),
                product_name: product.name.clone(),
                quantity,
                product_id: product.product_id,
            })
            .await?;

        info!(cart_id = %line.cart_id, quantity, product = %product.name, "Added to cart");
        Ok(messages::added_to_cart(quantity, &product.name))
    }

    /// `show.cart`: list the session's cart lines.
    ///
    /// # Errors
    ///
    /// Returns `FulfillmentError::Repository` if storage fails.
    pub async fn show_cart(&self, session_id: &SessionId) -> Result<String, FulfillmentError> {
        let lines = self.store.cart_lines(session_id).await?;
        Ok(messages::cart_contents(&lines))
    }

    /// `purchase.complete`: turn the cart into orders.
    ///
    /// Succeeds with the same reply whether or not the cart had any lines.
    ///
    /// # Errors
    ///
    /// Returns `FulfillmentError::Repository` if storage fails; the cart is
    /// left untouched in that case.
    pub async fn complete_purchase(
        &self,
        session_id: &SessionId,
    ) -> Result<String, FulfillmentError> {
        let orders = self.store.checkout(session_id).await?;
        if orders.is_empty() {
            info!("Checkout with empty cart");
        } else {
            info!(orders = orders.len(), "Purchase complete");
        }
        Ok(messages::PURCHASE_SUCCESS.to_owned())
    }

    /// `product.information`: describe the first `product`.
    ///
    /// # Errors
    ///
    /// Returns `FulfillmentError::Repository` if storage fails.
    pub async fn product_information(
        &self,
        parameters: &Parameters,
    ) -> Result<String, FulfillmentError> {
        let Some(product_name) = parameters.first_text(PRODUCT_PARAM) else {
            return Ok(messages::DID_NOT_CATCH.to_owned());
        };

        let reply = match self.store.find_product_by_name(product_name).await? {
            Some(product) => messages::product_details(&product),
            None => messages::product_unavailable(product_name),
        };
        Ok(reply)
    }

    /// `product.inquiry`: list every product name.
    ///
    /// # Errors
    ///
    /// Returns `FulfillmentError::Repository` if storage fails.
    pub async fn product_inquiry(&self) -> Result<String, FulfillmentError> {
        let products = self.store.list_products().await?;
        Ok(messages::catalog(&products))
    }

    /// `product.recommend`: suggest a random product.
    ///
    /// # Errors
    ///
    /// Returns `FulfillmentError::Repository` if storage fails.
    pub async fn recommend_product(&self) -> Result<String, FulfillmentError> {
        let reply = match self.store.random_product().await? {
            Some(product) => messages::recommendation(&product),
            None => messages::NOTHING_TO_RECOMMEND.to_owned(),
        };
        Ok(reply)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::db::RepositoryError;
    use crate::db::memory::MemoryStore;

    fn params(value: serde_json::Value) -> Parameters {
        serde_json::from_value(value).unwrap()
    }

    fn session(id: &str) -> SessionId {
        SessionId::new(id)
    }

    fn stocked_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert_product("Milk", "Fresh whole milk", 40, "in stock");
        store.insert_product("Bread", "Sourdough loaf", 55, "in stock");
        store.insert_product("Eggs", "Dozen free-range eggs", 90, "out of stock");
        store
    }

    async fn add(store: &MemoryStore, session_id: &SessionId, product: &str, qty: i32) -> String {
        FulfillmentService::new(store)
            .fulfill(
                "add.product",
                &params(json!({ "product": [product], "number": [qty] })),
                session_id,
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_in_stock_product_adds_one_line() {
        let store = stocked_store();
        let s = session("abc");

        let reply = add(&store, &s, "Milk", 2).await;

        assert_eq!(
            reply,
            "Added 2 Milk into your cart. Do you prefer to check your cart, add more items or complete the purchase?"
        );
        let lines = store.carts_for(&s);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].product_name, "Milk");
    }

    #[tokio::test]
    async fn test_add_same_product_twice_keeps_two_lines() {
        let store = stocked_store();
        let s = session("abc");

        add(&store, &s, "Milk", 1).await;
        add(&store, &s, "Milk", 3).await;

        let quantities: Vec<_> = store.carts_for(&s).iter().map(|l| l.quantity).collect();
        assert_eq!(quantities, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_add_unknown_product_adds_nothing() {
        let store = stocked_store();
        let s = session("abc");

        let reply = add(&store, &s, "Caviar", 1).await;

        assert_eq!(reply, "Sorry, we don't have Caviar at the moment.");
        assert_eq!(store.total_cart_lines(), 0);
    }

    #[tokio::test]
    async fn test_add_out_of_stock_product_adds_nothing() {
        let store = stocked_store();
        let s = session("abc");

        let reply = add(&store, &s, "Eggs", 1).await;

        assert_eq!(reply, "Sorry, Eggs is currently out of stock.");
        assert_eq!(store.total_cart_lines(), 0);
    }

    #[tokio::test]
    async fn test_add_product_requires_parameters() {
        let store = stocked_store();
        let service = FulfillmentService::new(&store);
        let s = session("abc");

        let err = service
            .fulfill("add.product", &params(json!({ "number": [1] })), &s)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FulfillmentError::Parameter(ParameterError::Missing(ref name)) if name == "product"
        ));

        let err = service
            .fulfill("add.product", &params(json!({ "product": ["Milk"], "number": [] })), &s)
            .await
            .unwrap_err();
        assert!(matches!(err, FulfillmentError::Parameter(ParameterError::Missing(_))));

        let err = service
            .fulfill("add.product", &params(json!({ "product": "Milk", "number": [0.5] })), &s)
            .await
            .unwrap_err();
        assert!(matches!(err, FulfillmentError::Parameter(ParameterError::Invalid { .. })));

        assert_eq!(store.total_cart_lines(), 0);
    }

    #[tokio::test]
    async fn test_show_cart_lists_lines_in_order() {
        let store = stocked_store();
        let s = session("abc");
        add(&store, &s, "Milk", 2).await;
        add(&store, &s, "Bread", 1).await;
        add(&store, &session("someone-else"), "Milk", 9).await;

        let reply = FulfillmentService::new(&store)
            .fulfill("show.cart", &Parameters::default(), &s)
            .await
            .unwrap();

        assert_eq!(
            reply,
            "Your cart contains: 2 Milk, 1 Bread. Do you prefer to add more items or complete the purchase?"
        );
    }

    #[tokio::test]
    async fn test_show_empty_cart_renders_empty_list() {
        let store = stocked_store();
        let reply = FulfillmentService::new(&store)
            .fulfill("show.cart", &Parameters::default(), &session("abc"))
            .await
            .unwrap();

        assert!(reply.starts_with("Your cart contains: . "));
    }

    #[tokio::test]
    async fn test_purchase_moves_lines_into_orders() {
        let store = stocked_store();
        let s = session("abc");
        let other = session("other");
        add(&store, &s, "Milk", 2).await;
        add(&store, &s, "Bread", 1).await;
        add(&store, &s, "Milk", 4).await;
        add(&store, &other, "Bread", 7).await;

        let service = FulfillmentService::new(&store);
        let reply = service
            .fulfill("purchase.complete", &Parameters::default(), &s)
            .await
            .unwrap();

        assert_eq!(reply, "Purchase Success. Visit Again");
        let orders = store.orders();
        assert_eq!(orders.len(), 3);
        let mut ids: Vec<_> = orders.iter().map(|o| o.order_id).collect();
        ids.sort_by_key(|id| id.as_uuid());
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert_eq!(
            orders.iter().map(|o| o.quantity).collect::<Vec<_>>(),
            vec![2, 1, 4]
        );
        assert!(store.carts_for(&s).is_empty());
        assert_eq!(store.carts_for(&other).len(), 1);

        // Second checkout finds nothing left
        let reply = service
            .fulfill("purchase.complete", &Parameters::default(), &s)
            .await
            .unwrap();
        assert_eq!(reply, "Purchase Success. Visit Again");
        assert_eq!(store.orders().len(), 3);
    }

    #[tokio::test]
    async fn test_product_information_renders_all_fields() {
        let store = MemoryStore::new();
        store.insert_product("Oat Milk", "Barista edition, 1L", 325, "ships in 2 days");

        let reply = FulfillmentService::new(&store)
            .fulfill(
                "product.information",
                &params(json!({ "product": "Oat Milk" })),
                &session("abc"),
            )
            .await
            .unwrap();

        for field in ["Oat Milk", "Barista edition, 1L", "325", "ships in 2 days"] {
            assert!(reply.contains(field), "{reply:?} is missing {field:?}");
        }
    }

    #[tokio::test]
    async fn test_product_information_without_product() {
        let store = stocked_store();
        let service = FulfillmentService::new(&store);

        for parameters in [json!({}), json!({ "product": "" }), json!({ "product": [] })] {
            let reply = service
                .fulfill("product.information", &params(parameters), &session("abc"))
                .await
                .unwrap();
            assert_eq!(reply, "Sorry, I didn't catch that.");
        }
    }

    #[tokio::test]
    async fn test_add_product_uses_first_non_empty_product() {
        let store = stocked_store();
        let s = session("abc");

        let reply = FulfillmentService::new(&store)
            .fulfill(
                "add.product",
                &params(json!({ "product": ["", "Milk"], "number": [1] })),
                &s,
            )
            .await
            .unwrap();

        assert!(reply.starts_with("Added 1 Milk"));
        assert_eq!(store.carts_for(&s)[0].product_name, "Milk");
    }

    #[tokio::test]
    async fn test_product_information_unknown_product() {
        let store = stocked_store();
        let reply = FulfillmentService::new(&store)
            .fulfill(
                "product.information",
                &params(json!({ "product": "Caviar" })),
                &session("abc"),
            )
            .await
            .unwrap();

        assert_eq!(reply, "Unfortunately, 'Caviar' is unavailable at the moment.");
    }

    #[tokio::test]
    async fn test_product_inquiry_lists_catalog() {
        let store = stocked_store();
        let reply = FulfillmentService::new(&store)
            .fulfill("product.inquiry", &Parameters::default(), &session("abc"))
            .await
            .unwrap();

        assert_eq!(reply, "Here are the available products: Milk, Bread, Eggs");
    }

    #[tokio::test]
    async fn test_recommend_from_empty_catalog() {
        let store = MemoryStore::new();
        let reply = FulfillmentService::new(&store)
            .fulfill("product.recommend", &Parameters::default(), &session("abc"))
            .await
            .unwrap();

        assert_eq!(
            reply,
            "Sorry, there are no products available for recommendation at the moment."
        );
        assert_eq!(store.total_cart_lines(), 0);
        assert!(store.orders().is_empty());
    }

    #[tokio::test]
    async fn test_recommend_names_a_catalog_product() {
        let store = stocked_store();
        let service = FulfillmentService::new(&store);

        for _ in 0..20 {
            let reply = service
                .fulfill("product.recommend", &Parameters::default(), &session("abc"))
                .await
                .unwrap();
            let named = ["Milk", "Bread", "Eggs"]
                .iter()
                .any(|name| reply.starts_with(&format!("I recommend {name}.")));
            assert!(named, "unexpected recommendation: {reply}");
        }
    }

    #[tokio::test]
    async fn test_unknown_intent_gets_fallback() {
        let store = stocked_store();
        let reply = FulfillmentService::new(&store)
            .fulfill("Default Welcome Intent", &Parameters::default(), &session("abc"))
            .await
            .unwrap();

        assert_eq!(reply, "Sorry, I can't help with that yet.");
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let store = stocked_store();
        store.fail_all();

        let err = FulfillmentService::new(&store)
            .fulfill("show.cart", &Parameters::default(), &session("abc"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            FulfillmentError::Repository(RepositoryError::Database(_))
        ));
    }

    #[tokio::test]
    async fn test_anonymous_session_is_shared() {
        let store = stocked_store();
        let anonymous = SessionId::from_context_name("no session here");
        add(&store, &anonymous, "Milk", 1).await;
        add(&store, &SessionId::default(), "Bread", 1).await;

        assert_eq!(store.carts_for(&SessionId::default()).len(), 2);
    }
}
